//! Injection domain: SQL/NoSQL/command injection patterns.

use crate::analyzers::collect_issues;
use crate::corpus::CorpusResolver;
use crate::rules::{self, Issue, Rule, SeverityCounts};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SqlInjectionResult {
    pub issues: Vec<Issue>,
    pub counts: SeverityCounts,
}

pub struct SqlInjectionAnalyzer {
    rules: Vec<Rule>,
}

impl SqlInjectionAnalyzer {
    pub fn new() -> Self {
        Self {
            rules: rules::injection_rules().to_vec(),
        }
    }

    pub fn with_rules(mut self, rules: Vec<Rule>) -> Self {
        self.rules = rules;
        self
    }

    pub fn scan(&self, root: &Path) -> SqlInjectionResult {
        let corpus = CorpusResolver::sources().resolve(root);
        let issues = collect_issues(&corpus, &self.rules);
        let counts = SeverityCounts::from_issues(&issues);

        debug!(issues = issues.len(), "injection scan complete");
        SqlInjectionResult { issues, counts }
    }
}

impl Default for SqlInjectionAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
