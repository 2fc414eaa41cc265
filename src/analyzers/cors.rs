//! CORS domain: configuration issues plus a detection flag and the
//! domain-local score.

use crate::analyzers::collect_issues;
use crate::corpus::CorpusResolver;
use crate::rules::{self, Issue, Rule, Severity, SeverityCounts};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;

/// Any sign a CORS mechanism is in play: the middleware package or manual
/// response headers.
static DETECTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"require\(["']cors["']\)|from\s+["']cors["']|cors\s*\(|Access-Control-Allow-Origin"#)
        .expect("cors detection: invalid regex")
});

static WILDCARD_IDS: &[&str] = rules::WILDCARD_ORIGIN_IDS;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorsResult {
    pub detected: bool,
    pub issues: Vec<Issue>,
    pub counts: SeverityCounts,
    pub security_score: u32,
}

pub struct CorsAnalyzer {
    rules: Vec<Rule>,
}

impl CorsAnalyzer {
    pub fn new() -> Self {
        Self {
            rules: rules::cors_rules().to_vec(),
        }
    }

    pub fn with_rules(mut self, rules: Vec<Rule>) -> Self {
        self.rules = rules;
        self
    }

    pub fn scan(&self, root: &Path) -> CorsResult {
        let corpus = CorpusResolver::sources().resolve(root);
        let detected = corpus.iter().any(|f| DETECTION.is_match(&f.content));
        let issues = collect_issues(&corpus, &self.rules);
        let counts = SeverityCounts::from_issues(&issues);
        let security_score = score(detected, &issues);

        debug!(detected, issues = issues.len(), security_score, "cors scan complete");
        CorsResult {
            detected,
            issues,
            counts,
            security_score,
        }
    }
}

impl Default for CorsAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Domain-local score. Base 50 once any CORS mechanism is detected; the
/// medium-issue bonus only applies when no HIGH issue is present, which is
/// what keeps a wildcard-origin config at exactly 50.
fn score(detected: bool, issues: &[Issue]) -> u32 {
    if !detected {
        return 0;
    }

    let mut score: u32 = 50;

    let wildcard = issues.iter().any(|i| WILDCARD_IDS.contains(&i.kind.as_str()));
    if !wildcard {
        score += 25;
    }

    let high = issues.iter().filter(|i| i.severity >= Severity::High).count();
    if high == 0 {
        score += 15;
        let medium = issues.iter().filter(|i| i.severity == Severity::Medium).count();
        if medium == 0 {
            score += 10;
        } else if medium <= 1 {
            score += 5;
        }
    }

    score.min(100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn project_with(source: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("app.js"), source).unwrap();
        dir
    }

    #[test]
    fn test_wildcard_origin_scores_exactly_50() {
        let dir = project_with("app.use(cors({origin: '*'}));");
        let result = CorsAnalyzer::new().scan(dir.path());

        assert!(result.detected);
        assert_eq!(result.issues.len(), 1);
        assert_eq!(result.issues[0].kind, "CORS-001");
        assert_eq!(result.issues[0].severity, Severity::High);
        assert_eq!(result.security_score, 50);
    }

    #[test]
    fn test_clean_cors_config_scores_100() {
        let dir = project_with("app.use(cors({origin: 'https://app.example.com'}));");
        let result = CorsAnalyzer::new().scan(dir.path());
        assert!(result.detected);
        assert!(result.issues.is_empty());
        assert_eq!(result.security_score, 100);
    }

    #[test]
    fn test_no_cors_scores_zero() {
        let dir = project_with("app.get('/', handler);");
        let result = CorsAnalyzer::new().scan(dir.path());
        assert!(!result.detected);
        assert_eq!(result.security_score, 0);
    }

    #[test]
    fn test_one_medium_issue_scores_95() {
        let dir = project_with("cors({origin: allowlist, credentials: true})");
        let result = CorsAnalyzer::new().scan(dir.path());
        assert_eq!(result.counts.medium, 1);
        // 50 + 25 (no wildcard) + 15 (no high) + 5 (one medium)
        assert_eq!(result.security_score, 95);
    }

    #[test]
    fn test_two_medium_issues_drop_the_bonus() {
        let dir = project_with("cors({origin: true, credentials: true})");
        let result = CorsAnalyzer::new().scan(dir.path());
        assert_eq!(result.counts.medium, 2);
        // 50 + 25 + 15, no medium bonus
        assert_eq!(result.security_score, 90);
    }

    #[test]
    fn test_empty_project_is_well_formed() {
        let dir = TempDir::new().unwrap();
        let result = CorsAnalyzer::new().scan(dir.path());
        assert!(!result.detected);
        assert!(result.issues.is_empty());
        assert_eq!(result.counts.total(), 0);
        assert_eq!(result.security_score, 0);
    }

    #[test]
    fn test_scan_is_idempotent() {
        let dir = project_with("app.use(cors({origin: '*'}));");
        let analyzer = CorsAnalyzer::new();
        let a = analyzer.scan(dir.path());
        let b = analyzer.scan(dir.path());
        assert_eq!(a.security_score, b.security_score);
        assert_eq!(a.issues.len(), b.issues.len());
    }
}
