//! Middleware domain: inventory of expected security middleware and
//! configuration issues, with a deduction-based local score.

use crate::analyzers::collect_issues;
use crate::corpus::CorpusResolver;
use crate::manifest::{Manifest, PackageCheck};
use crate::rules::{self, Issue, MiddlewareSpec, Priority, Rule, SeverityCounts};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MiddlewareResult {
    pub packages: PackageCheck,
    /// Middleware proven to be wired into the app (usage found in code).
    pub detected: Vec<String>,
    pub missing_high_priority: Vec<String>,
    pub missing_medium_priority: Vec<String>,
    pub issues: Vec<Issue>,
    pub counts: SeverityCounts,
    pub security_score: u32,
}

pub struct MiddlewareAnalyzer {
    specs: Vec<MiddlewareSpec>,
    config_rules: Vec<Rule>,
}

impl MiddlewareAnalyzer {
    pub fn new() -> Self {
        Self {
            specs: rules::middleware_specs().to_vec(),
            config_rules: rules::middleware_config_rules().to_vec(),
        }
    }

    pub fn with_specs(mut self, specs: Vec<MiddlewareSpec>) -> Self {
        self.specs = specs;
        self
    }

    pub fn scan(&self, root: &Path) -> MiddlewareResult {
        let manifest = Manifest::load(root);
        let packages = {
            let names: Vec<&str> = self.specs.iter().map(|s| s.package).collect();
            PackageCheck::against(&manifest, &names)
        };
        let corpus = CorpusResolver::sources().resolve(root);

        let mut detected = Vec::new();
        let mut missing_high_priority = Vec::new();
        let mut missing_medium_priority = Vec::new();

        for spec in &self.specs {
            let used = corpus.iter().any(|f| spec.pattern.is_match(&f.content));
            if used {
                detected.push(spec.name.to_string());
            } else if !manifest.has(spec.package) {
                // Declared-but-unused gets the benefit of the doubt; only
                // middleware absent from both code and manifest is missing.
                match spec.priority {
                    Priority::High => missing_high_priority.push(spec.name.to_string()),
                    Priority::Medium => missing_medium_priority.push(spec.name.to_string()),
                }
            }
        }

        let issues = collect_issues(&corpus, &self.config_rules);
        let counts = SeverityCounts::from_issues(&issues);
        let security_score = score(
            missing_high_priority.len(),
            missing_medium_priority.len(),
            issues.len(),
        );

        debug!(
            detected = detected.len(),
            missing_high = missing_high_priority.len(),
            security_score,
            "middleware scan complete"
        );
        MiddlewareResult {
            packages,
            detected,
            missing_high_priority,
            missing_medium_priority,
            issues,
            counts,
            security_score,
        }
    }
}

impl Default for MiddlewareAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

fn score(missing_high: usize, missing_medium: usize, config_issues: usize) -> u32 {
    let deductions =
        15 * missing_high as i64 + 5 * missing_medium as i64 + 10 * config_issues as i64;
    (100 - deductions).clamp(0, 100) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_detected_middleware_counts() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("app.js"),
            "const helmet = require('helmet');\napp.use(helmet());\n",
        )
        .unwrap();

        let result = MiddlewareAnalyzer::new().scan(dir.path());
        assert!(result.detected.contains(&"helmet".to_string()));
        assert!(!result.missing_high_priority.contains(&"helmet".to_string()));
    }

    #[test]
    fn test_declared_but_unused_not_missing() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{"dependencies": {"helmet": "^7.0.0"}}"#,
        )
        .unwrap();
        fs::write(dir.path().join("app.js"), "app.listen(3000);").unwrap();

        let result = MiddlewareAnalyzer::new().scan(dir.path());
        assert!(!result.detected.contains(&"helmet".to_string()));
        assert!(!result.missing_high_priority.contains(&"helmet".to_string()));
    }

    #[test]
    fn test_empty_project_misses_everything() {
        let dir = TempDir::new().unwrap();
        let result = MiddlewareAnalyzer::new().scan(dir.path());
        assert_eq!(result.missing_high_priority.len(), 3);
        assert_eq!(result.missing_medium_priority.len(), 3);
        // 100 - 3*15 - 3*5 = 40
        assert_eq!(result.security_score, 40);
    }

    #[test]
    fn test_config_issue_deducts_ten() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("app.js"),
            concat!(
                "const helmet = require('helmet');\n",
                "const rateLimit = require('express-rate-limit');\n",
                "const sanitize = require('express-mongo-sanitize');\n",
                "const cors = require('cors');\n",
                "const hpp = require('hpp');\n",
                "const morgan = require('morgan');\n",
                "app.use(express.json({ limit: '50mb' }));\n",
            ),
        )
        .unwrap();

        let result = MiddlewareAnalyzer::new().scan(dir.path());
        assert!(result.missing_high_priority.is_empty());
        assert_eq!(result.issues.len(), 1);
        assert_eq!(result.issues[0].kind, "MWC-002");
        assert_eq!(result.security_score, 90);
    }

    #[test]
    fn test_score_clamps_at_zero() {
        // 1000 hypothetical missing packages must still clamp to 0.
        assert_eq!(score(1000, 0, 0), 0);
        assert_eq!(score(0, 0, 0), 100);
    }

    #[test]
    fn test_safe_body_limit_not_flagged() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("app.js"),
            "app.use(express.json({ limit: '5mb' }));",
        )
        .unwrap();

        let result = MiddlewareAnalyzer::new().scan(dir.path());
        assert!(result.issues.is_empty());
    }
}
