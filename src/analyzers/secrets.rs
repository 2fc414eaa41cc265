//! Secrets domain: hardcoded credential detection plus the env-file
//! cross-check for used-but-undefined variables.

use crate::analyzers::collect_issues;
use crate::corpus::{CorpusResolver, SourceFile};
use crate::matcher::{MatchMode, PatternMatcher};
use crate::rules::{self, Issue, Rule, RuleTag, SeverityCounts};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Environment files consulted for variable definitions.
const ENV_FILES: &[&str] = &[
    ".env",
    ".env.local",
    ".env.development",
    ".env.production",
    ".env.example",
];

/// Environment variables referenced in code vs. defined in env files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnvCheck {
    pub used: Vec<String>,
    pub defined: Vec<String>,
    pub missing: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SecretsResult {
    pub issues: Vec<Issue>,
    pub counts: SeverityCounts,
    pub env: EnvCheck,
}

pub struct SecretsAnalyzer {
    rules: Vec<Rule>,
}

impl SecretsAnalyzer {
    pub fn new() -> Self {
        Self {
            rules: rules::secret_rules().to_vec(),
        }
    }

    pub fn with_rules(mut self, rules: Vec<Rule>) -> Self {
        self.rules = rules;
        self
    }

    pub fn scan(&self, root: &Path) -> SecretsResult {
        let corpus = CorpusResolver::sources().resolve(root);
        let issues = collect_issues(&corpus, &self.rules);
        let counts = SeverityCounts::from_issues(&issues);
        let env = self.check_env(root, &corpus);

        debug!(issues = issues.len(), missing_env = env.missing.len(), "secrets scan complete");
        SecretsResult { issues, counts, env }
    }

    /// Collect every `process.env.X` reference (all occurrences, not
    /// presence-only: each distinct name matters) and diff against the
    /// variables defined in env files.
    fn check_env(&self, root: &Path, corpus: &[SourceFile]) -> EnvCheck {
        let matcher = PatternMatcher::new(corpus).with_mode(MatchMode::AllOccurrences);
        let mut used: FxHashSet<String> = FxHashSet::default();

        for rule in &self.rules {
            if rule.tag != Some(RuleTag::EnvReference) {
                continue;
            }
            for m in matcher.run(rule) {
                if let Some(name) = m.capture {
                    used.insert(name);
                }
            }
        }

        let mut defined: FxHashSet<String> = FxHashSet::default();
        for env_file in ENV_FILES {
            if let Some(content) = CorpusResolver::read_optional(root, env_file) {
                defined.extend(parse_env_names(&content));
            }
        }

        let mut used: Vec<String> = used.into_iter().collect();
        used.sort_unstable();
        let missing: Vec<String> = used
            .iter()
            .filter(|name| !defined.contains(*name))
            .cloned()
            .collect();
        let mut defined: Vec<String> = defined.into_iter().collect();
        defined.sort_unstable();

        EnvCheck {
            used,
            defined,
            missing,
        }
    }
}

impl Default for SecretsAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Variable names from `NAME=value` lines; comments and blanks are skipped.
fn parse_env_names(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(name, _)| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}
