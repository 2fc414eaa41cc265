//! Auth domain: weak hashing, unverified JWTs, session misconfiguration.

use crate::analyzers::collect_issues;
use crate::corpus::CorpusResolver;
use crate::manifest::{Manifest, PackageCheck};
use crate::rules::{self, Issue, Rule, SeverityCounts};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

const AUTH_PACKAGES: &[&str] = &[
    "bcrypt",
    "bcryptjs",
    "argon2",
    "jsonwebtoken",
    "passport",
    "express-session",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthResult {
    pub packages: PackageCheck,
    pub issues: Vec<Issue>,
    pub counts: SeverityCounts,
}

pub struct AuthAnalyzer {
    rules: Vec<Rule>,
}

impl AuthAnalyzer {
    pub fn new() -> Self {
        Self {
            rules: rules::auth_rules().to_vec(),
        }
    }

    pub fn with_rules(mut self, rules: Vec<Rule>) -> Self {
        self.rules = rules;
        self
    }

    pub fn scan(&self, root: &Path) -> AuthResult {
        let manifest = Manifest::load(root);
        let packages = PackageCheck::against(&manifest, AUTH_PACKAGES);
        let corpus = CorpusResolver::sources().resolve(root);
        let issues = collect_issues(&corpus, &self.rules);
        let counts = SeverityCounts::from_issues(&issues);

        debug!(issues = issues.len(), "auth scan complete");
        AuthResult {
            packages,
            issues,
            counts,
        }
    }
}

impl Default for AuthAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
