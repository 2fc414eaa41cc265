//! Input-validation domain: unvalidated request data reaching sensitive sinks.

use crate::analyzers::collect_issues;
use crate::corpus::CorpusResolver;
use crate::manifest::{Manifest, PackageCheck};
use crate::rules::{self, Issue, Rule, SeverityCounts};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

const VALIDATION_PACKAGES: &[&str] = &["express-validator", "joi", "zod", "yup", "ajv"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputValidationResult {
    pub packages: PackageCheck,
    pub issues: Vec<Issue>,
    pub counts: SeverityCounts,
}

pub struct InputValidationAnalyzer {
    rules: Vec<Rule>,
}

impl InputValidationAnalyzer {
    pub fn new() -> Self {
        Self {
            rules: rules::validation_rules().to_vec(),
        }
    }

    pub fn with_rules(mut self, rules: Vec<Rule>) -> Self {
        self.rules = rules;
        self
    }

    pub fn scan(&self, root: &Path) -> InputValidationResult {
        let manifest = Manifest::load(root);
        let packages = PackageCheck::against(&manifest, VALIDATION_PACKAGES);
        let corpus = CorpusResolver::sources().resolve(root);
        let issues = collect_issues(&corpus, &self.rules);
        let counts = SeverityCounts::from_issues(&issues);

        debug!(issues = issues.len(), "input validation scan complete");
        InputValidationResult {
            packages,
            issues,
            counts,
        }
    }
}

impl Default for InputValidationAnalyzer {
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
    fn test_detects_mass_assignment() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("users.js"),
            "const user = await User.create({ ...req.body });",
        )
        .unwrap();

        let result = InputValidationAnalyzer::new().scan(dir.path());
        assert_eq!(result.issues.len(), 1);
        assert_eq!(result.issues[0].kind, "VAL-001");
    }

    #[test]
    fn test_detects_open_redirect() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("auth.js"), "res.redirect(req.query.next);").unwrap();

        let result = InputValidationAnalyzer::new().scan(dir.path());
        assert!(result.issues.iter().any(|i| i.kind == "VAL-003"));
    }

    #[test]
    fn test_validator_packages_reported() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{"devDependencies": {"zod": "^3.22.0"}}"#,
        )
        .unwrap();

        let result = InputValidationAnalyzer::new().scan(dir.path());
        assert_eq!(result.packages.installed, vec!["zod"]);
    }

    #[test]
    fn test_empty_project_is_well_formed() {
        let dir = TempDir::new().unwrap();
        let result = InputValidationAnalyzer::new().scan(dir.path());
        assert!(result.issues.is_empty());
        assert_eq!(result.counts.total(), 0);
    }
}
