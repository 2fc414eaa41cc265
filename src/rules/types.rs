use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str().to_uppercase())
    }
}

/// Extra semantics attached to a rule beyond plain presence detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleTag {
    /// Capture group 1 is numeric; report only when the value exceeds the limit.
    NumericAbove(u64),
    /// Capture group 1 is numeric; report only when the value is below the limit.
    NumericBelow(u64),
    /// Marks environment-variable references. Matches are collected for the
    /// env-file cross-check instead of being reported directly.
    EnvReference,
}

/// One detectable condition: a named regex with severity and remediation.
///
/// Rules are process-wide constants built once at registry load; an invalid
/// pattern panics there, never during a scan.
#[derive(Debug, Clone)]
pub struct Rule {
    pub id: &'static str,
    pub name: &'static str,
    pub severity: Severity,
    pub pattern: regex::Regex,
    pub remediation: &'static str,
    pub tag: Option<RuleTag>,
}

/// A reported finding: a [`crate::matcher::Match`] folded together with the
/// rule that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub severity: Severity,
    pub file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    pub remediation: String,
}

impl Issue {
    pub fn new(rule: &Rule, m: &crate::matcher::Match) -> Self {
        Self {
            kind: rule.id.to_string(),
            name: rule.name.to_string(),
            severity: rule.severity,
            file: m.file.clone(),
            line: m.line,
            snippet: m.snippet.clone(),
            remediation: rule.remediation.to_string(),
        }
    }
}

/// Per-severity issue counts, serialized into every domain result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub info: usize,
}

impl SeverityCounts {
    pub fn from_issues(issues: &[Issue]) -> Self {
        issues.iter().fold(Self::default(), |mut counts, issue| {
            match issue.severity {
                Severity::Critical => counts.critical += 1,
                Severity::High => counts.high += 1,
                Severity::Medium => counts.medium += 1,
                Severity::Low => counts.low += 1,
                Severity::Info => counts.info += 1,
            }
            counts
        })
    }

    pub fn total(&self) -> usize {
        self.critical + self.high + self.medium + self.low + self.info
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_as_str() {
        assert_eq!(Severity::Info.as_str(), "info");
        assert_eq!(Severity::Low.as_str(), "low");
        assert_eq!(Severity::Medium.as_str(), "medium");
        assert_eq!(Severity::High.as_str(), "high");
        assert_eq!(Severity::Critical.as_str(), "critical");
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(format!("{}", Severity::High), "HIGH");
        assert_eq!(format!("{}", Severity::Critical), "CRITICAL");
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Info < Severity::Low);
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
        assert!(Severity::High < Severity::Critical);
    }

    #[test]
    fn test_severity_serialization() {
        let json = serde_json::to_string(&Severity::High).unwrap();
        assert_eq!(json, "\"high\"");
        let back: Severity = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Severity::High);
    }

    #[test]
    fn test_counts_from_empty() {
        let counts = SeverityCounts::from_issues(&[]);
        assert_eq!(counts, SeverityCounts::default());
        assert_eq!(counts.total(), 0);
    }

    #[test]
    fn test_counts_from_issues() {
        let issues = vec![
            test_issue(Severity::Critical),
            test_issue(Severity::High),
            test_issue(Severity::High),
            test_issue(Severity::Medium),
        ];
        let counts = SeverityCounts::from_issues(&issues);
        assert_eq!(counts.critical, 1);
        assert_eq!(counts.high, 2);
        assert_eq!(counts.medium, 1);
        assert_eq!(counts.low, 0);
        assert_eq!(counts.total(), 4);
    }

    #[test]
    fn test_issue_serializes_type_key() {
        let issue = test_issue(Severity::Low);
        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(json["type"], "T-001");
        assert_eq!(json["severity"], "low");
        assert!(json.get("line").is_none());
    }

    fn test_issue(severity: Severity) -> Issue {
        Issue {
            kind: "T-001".to_string(),
            name: "Test".to_string(),
            severity,
            file: "app.js".to_string(),
            line: None,
            snippet: None,
            remediation: "fix it".to_string(),
        }
    }
}
