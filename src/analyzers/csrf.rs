//! CSRF domain: protection presence and weakened configurations.

use crate::analyzers::collect_issues;
use crate::corpus::CorpusResolver;
use crate::manifest::{Manifest, PackageCheck};
use crate::rules::{self, Issue, Rule, SeverityCounts};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;

const CSRF_PACKAGES: &[&str] = &["csurf", "csrf-csrf", "lusca"];

static DETECTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"require\(["'](?:csurf|csrf-csrf|lusca)["']\)|csurf\s*\(|lusca\.csrf|doubleCsrf"#)
        .expect("csrf detection: invalid regex")
});

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CsrfResult {
    pub detected: bool,
    pub packages: PackageCheck,
    pub issues: Vec<Issue>,
    pub counts: SeverityCounts,
}

pub struct CsrfAnalyzer {
    rules: Vec<Rule>,
}

impl CsrfAnalyzer {
    pub fn new() -> Self {
        Self {
            rules: rules::csrf_rules().to_vec(),
        }
    }

    pub fn with_rules(mut self, rules: Vec<Rule>) -> Self {
        self.rules = rules;
        self
    }

    pub fn scan(&self, root: &Path) -> CsrfResult {
        let manifest = Manifest::load(root);
        let packages = PackageCheck::against(&manifest, CSRF_PACKAGES);
        let corpus = CorpusResolver::sources().resolve(root);
        let detected = corpus.iter().any(|f| DETECTION.is_match(&f.content));
        let issues = collect_issues(&corpus, &self.rules);
        let counts = SeverityCounts::from_issues(&issues);

        debug!(detected, issues = issues.len(), "csrf scan complete");
        CsrfResult {
            detected,
            packages,
            issues,
            counts,
        }
    }
}

impl Default for CsrfAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_detects_csurf_usage() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("app.js"),
            "const csrf = require('csurf');\napp.use(csrf({ cookie: true }));\n",
        )
        .unwrap();

        let result = CsrfAnalyzer::new().scan(dir.path());
        assert!(result.detected);
        assert!(result.issues.is_empty());
    }

    #[test]
    fn test_detects_disabled_csrf() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("app.js"), "app.use(lusca({ csrf: false }));").unwrap();

        let result = CsrfAnalyzer::new().scan(dir.path());
        assert_eq!(result.issues.len(), 1);
        assert_eq!(result.issues[0].kind, "CSRF-001");
    }

    #[test]
    fn test_no_protection_detected() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("app.js"), "app.post('/items', handler);").unwrap();

        let result = CsrfAnalyzer::new().scan(dir.path());
        assert!(!result.detected);
        assert!(result.packages.installed.is_empty());
    }

    #[test]
    fn test_empty_project_is_well_formed() {
        let dir = TempDir::new().unwrap();
        let result = CsrfAnalyzer::new().scan(dir.path());
        assert!(!result.detected);
        assert!(result.issues.is_empty());
        assert_eq!(result.counts.total(), 0);
    }
}
