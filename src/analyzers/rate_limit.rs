//! Rate-limit domain: limiter detection, threshold-checked configuration
//! issues, and the sensitive-endpoint cross-reference.

use crate::analyzers::collect_issues;
use crate::corpus::CorpusResolver;
use crate::manifest::{Manifest, PackageCheck};
use crate::matcher::{MatchMode, PatternMatcher};
use crate::rules::{self, Issue, Rule, Severity, SeverityCounts, SENSITIVE_ROUTES};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;

const RATE_LIMIT_PACKAGES: &[&str] = &[
    "express-rate-limit",
    "rate-limiter-flexible",
    "express-slow-down",
];

static DETECTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"require\(["'](?:express-rate-limit|rate-limiter-flexible|express-slow-down)["']\)|from\s+["']express-rate-limit["']|rateLimit\s*\(|new\s+RateLimiter"#,
    )
    .expect("rate limit detection: invalid regex")
});

/// POST route declarations; group 1 is the route path.
static POST_ROUTE: LazyLock<Rule> = LazyLock::new(|| Rule {
    id: "RATE-POST",
    name: "POST route declaration",
    severity: Severity::Info,
    pattern: Regex::new(r#"(?:app|router)\.post\(\s*["']([^"']+)["']"#)
        .expect("RATE-POST: invalid regex"),
    remediation: "",
    tag: None,
});

/// A limiter passed on the route declaration line itself.
static INLINE_LIMITER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)limit").expect("inline limiter: invalid regex"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Detection {
    pub count: usize,
    pub files: Vec<String>,
}

/// A sensitive POST route with no rate limiter on its declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnprotectedEndpoint {
    pub route: String,
    pub file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitResult {
    pub packages: PackageCheck,
    pub detected: Detection,
    pub issues: Vec<Issue>,
    pub counts: SeverityCounts,
    pub unprotected_endpoints: Vec<UnprotectedEndpoint>,
    pub security_score: u32,
    pub status: String,
}

pub struct RateLimitAnalyzer {
    rules: Vec<Rule>,
}

impl RateLimitAnalyzer {
    pub fn new() -> Self {
        Self {
            rules: rules::rate_limit_rules().to_vec(),
        }
    }

    pub fn with_rules(mut self, rules: Vec<Rule>) -> Self {
        self.rules = rules;
        self
    }

    pub fn scan(&self, root: &Path) -> RateLimitResult {
        let manifest = Manifest::load(root);
        let packages = PackageCheck::against(&manifest, RATE_LIMIT_PACKAGES);
        let corpus = CorpusResolver::sources().resolve(root);

        let files: Vec<String> = corpus
            .iter()
            .filter(|f| DETECTION.is_match(&f.content))
            .map(|f| f.path.clone())
            .collect();
        let detected = Detection {
            count: files.len(),
            files,
        };

        let issues = collect_issues(&corpus, &self.rules);
        let counts = SeverityCounts::from_issues(&issues);
        let unprotected_endpoints = find_unprotected_endpoints(&corpus);
        let security_score = score(&detected, &packages, &issues, &unprotected_endpoints);
        let status = status_line(&detected, &packages);

        debug!(
            detected = detected.count,
            issues = issues.len(),
            unprotected = unprotected_endpoints.len(),
            "rate limit scan complete"
        );
        RateLimitResult {
            packages,
            detected,
            issues,
            counts,
            unprotected_endpoints,
            security_score,
            status,
        }
    }
}

impl Default for RateLimitAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Cross-reference sensitive routes against POST declarations: a sensitive
/// POST route whose declaration line carries no limiter reference is flagged.
fn find_unprotected_endpoints(corpus: &[crate::corpus::SourceFile]) -> Vec<UnprotectedEndpoint> {
    let matcher = PatternMatcher::new(corpus).with_mode(MatchMode::AllOccurrences);

    matcher
        .run(&POST_ROUTE)
        .into_iter()
        .filter_map(|m| {
            let route = m.capture?;
            let sensitive = SENSITIVE_ROUTES
                .iter()
                .any(|s| route == *s || route.ends_with(s));
            if !sensitive {
                return None;
            }
            let protected = m
                .snippet
                .as_deref()
                .is_some_and(|line| INLINE_LIMITER.is_match(line));
            if protected {
                return None;
            }
            Some(UnprotectedEndpoint {
                route,
                file: m.file,
                line: m.line,
            })
        })
        .collect()
}

fn score(
    detected: &Detection,
    packages: &PackageCheck,
    issues: &[Issue],
    unprotected: &[UnprotectedEndpoint],
) -> u32 {
    if detected.count == 0 {
        return 0;
    }

    let mut score: i64 = 50;
    score += (packages.installed.len() as i64 * 5).min(20);
    score -= (issues.len() as i64 * 10).min(40);
    score -= (unprotected.len() as i64 * 10).min(30);
    score.clamp(0, 100) as u32
}

fn status_line(detected: &Detection, packages: &PackageCheck) -> String {
    if detected.count > 0 {
        format!("Rate limiting implemented in {} file(s)", detected.count)
    } else if !packages.installed.is_empty() {
        format!(
            "{} installed but no implementation detected in code",
            packages.installed.join(", ")
        )
    } else {
        "No rate limiting detected".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn project() -> TempDir {
        TempDir::new().unwrap()
    }

    #[test]
    fn test_safe_max_not_reported() {
        let dir = project();
        fs::write(
            dir.path().join("app.js"),
            "const limiter = rateLimit({ windowMs: 900000, max: 50 });",
        )
        .unwrap();

        let result = RateLimitAnalyzer::new().scan(dir.path());
        assert_eq!(result.detected.count, 1);
        assert!(result.issues.is_empty());
    }

    #[test]
    fn test_high_max_reported() {
        let dir = project();
        fs::write(
            dir.path().join("app.js"),
            "const limiter = rateLimit({ windowMs: 900000, max: 500 });",
        )
        .unwrap();

        let result = RateLimitAnalyzer::new().scan(dir.path());
        assert_eq!(result.issues.len(), 1);
        assert_eq!(result.issues[0].kind, "RATE-001");
    }

    #[test]
    fn test_short_window_reported() {
        let dir = project();
        fs::write(
            dir.path().join("app.js"),
            "const limiter = rateLimit({ windowMs: 5000, max: 50 });",
        )
        .unwrap();

        let result = RateLimitAnalyzer::new().scan(dir.path());
        assert_eq!(result.issues.len(), 1);
        assert_eq!(result.issues[0].kind, "RATE-002");
    }

    #[test]
    fn test_installed_but_unused() {
        let dir = project();
        fs::write(
            dir.path().join("package.json"),
            r#"{"dependencies": {"express-rate-limit": "^7.0.0"}}"#,
        )
        .unwrap();
        fs::write(dir.path().join("app.js"), "app.get('/', handler);").unwrap();

        let result = RateLimitAnalyzer::new().scan(dir.path());
        assert_eq!(result.packages.installed, vec!["express-rate-limit"]);
        assert_eq!(result.detected.count, 0);
        assert!(result.status.contains("no implementation detected in code"));
        assert_eq!(result.security_score, 0);
    }

    #[test]
    fn test_unprotected_sensitive_endpoint_flagged() {
        let dir = project();
        fs::write(
            dir.path().join("routes.js"),
            "app.post('/login', loginHandler);\napp.post('/items', createItem);\n",
        )
        .unwrap();

        let result = RateLimitAnalyzer::new().scan(dir.path());
        assert_eq!(result.unprotected_endpoints.len(), 1);
        assert_eq!(result.unprotected_endpoints[0].route, "/login");
        assert_eq!(result.unprotected_endpoints[0].line, Some(1));
    }

    #[test]
    fn test_inline_limiter_protects_endpoint() {
        let dir = project();
        fs::write(
            dir.path().join("routes.js"),
            "app.post('/login', loginLimiter, loginHandler);\n",
        )
        .unwrap();

        let result = RateLimitAnalyzer::new().scan(dir.path());
        assert!(result.unprotected_endpoints.is_empty());
    }

    #[test]
    fn test_score_formula() {
        let dir = project();
        fs::write(
            dir.path().join("package.json"),
            r#"{"dependencies": {"express-rate-limit": "^7.0.0"}}"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("app.js"),
            "const rl = require('express-rate-limit');\nconst limiter = rateLimit({ windowMs: 900000, max: 50 });\n",
        )
        .unwrap();

        let result = RateLimitAnalyzer::new().scan(dir.path());
        // 50 base + 5 for one installed package, no deductions.
        assert_eq!(result.security_score, 55);
    }

    #[test]
    fn test_score_clamps_at_zero() {
        let dir = project();
        let mut source = String::from("const rl = require('express-rate-limit');\n");
        for i in 0..6 {
            source.push_str(&format!("app.post('/login{i}/auth', handler);\n"));
        }
        source.push_str("rateLimit({ windowMs: 1000, max: 9999 });\n");
        fs::write(dir.path().join("app.js"), source).unwrap();

        let result = RateLimitAnalyzer::new().scan(dir.path());
        assert!(result.security_score <= 100);
        // 50 - 20 (two config issues) - 30 (capped endpoint deduction) = 0
        assert_eq!(result.security_score, 0);
    }

    #[test]
    fn test_empty_project_is_well_formed() {
        let dir = project();
        let result = RateLimitAnalyzer::new().scan(dir.path());
        assert_eq!(result.detected.count, 0);
        assert!(result.issues.is_empty());
        assert!(result.unprotected_endpoints.is_empty());
        assert_eq!(result.status, "No rate limiting detected");
    }
}
