//! Cookie domain: missing httpOnly/secure/sameSite hardening.

use crate::analyzers::collect_issues;
use crate::corpus::CorpusResolver;
use crate::rules::{self, Issue, Rule, SeverityCounts};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CookieResult {
    pub issues: Vec<Issue>,
    pub counts: SeverityCounts,
}

pub struct CookieAnalyzer {
    rules: Vec<Rule>,
}

impl CookieAnalyzer {
    pub fn new() -> Self {
        Self {
            rules: rules::cookie_rules().to_vec(),
        }
    }

    pub fn with_rules(mut self, rules: Vec<Rule>) -> Self {
        self.rules = rules;
        self
    }

    pub fn scan(&self, root: &Path) -> CookieResult {
        let corpus = CorpusResolver::sources().resolve(root);
        let issues = collect_issues(&corpus, &self.rules);
        let counts = SeverityCounts::from_issues(&issues);

        debug!(issues = issues.len(), "cookie scan complete");
        CookieResult { issues, counts }
    }
}

impl Default for CookieAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
