//! Domain aggregators: one module per security concern, each a stateless
//! `scan(root) -> DomainResult` pass over the same resolved corpus.

pub mod auth;
pub mod cookies;
pub mod cors;
pub mod csrf;
pub mod dependencies;
pub mod input_validation;
pub mod middlewares;
pub mod rate_limit;
pub mod secrets;
pub mod sql_injection;

pub use auth::{AuthAnalyzer, AuthResult};
pub use cookies::{CookieAnalyzer, CookieResult};
pub use cors::{CorsAnalyzer, CorsResult};
pub use csrf::{CsrfAnalyzer, CsrfResult};
pub use dependencies::{AuditOutcome, DependencyAnalyzer, DependencyResult, VulnerabilityCounts};
pub use input_validation::{InputValidationAnalyzer, InputValidationResult};
pub use middlewares::{MiddlewareAnalyzer, MiddlewareResult};
pub use rate_limit::{RateLimitAnalyzer, RateLimitResult, UnprotectedEndpoint};
pub use secrets::{EnvCheck, SecretsAnalyzer, SecretsResult};
pub use sql_injection::{SqlInjectionAnalyzer, SqlInjectionResult};

use crate::corpus::SourceFile;
use crate::matcher::{Match, PatternMatcher};
use crate::rules::{Issue, Rule, RuleTag};

/// Run a rule set over a corpus in presence-only mode and fold matches into
/// issues, honoring numeric-threshold tags.
///
/// Issue order is rule registration order, then corpus order within a rule.
/// Env-reference rules are skipped here; they feed the secrets cross-check,
/// not the issue list.
pub(crate) fn collect_issues(corpus: &[SourceFile], rules: &[Rule]) -> Vec<Issue> {
    let matcher = PatternMatcher::new(corpus);
    let mut issues = Vec::new();

    for rule in rules {
        if matches!(rule.tag, Some(RuleTag::EnvReference)) {
            continue;
        }
        for m in matcher.run(rule) {
            if outside_safe_range(rule, &m) {
                issues.push(Issue::new(rule, &m));
            }
        }
    }

    issues
}

/// Threshold filter: a tagged rule only becomes an issue when the captured
/// value falls outside its safe range. Untagged rules always report.
/// A tagged match with no parseable capture is discarded, not reported.
fn outside_safe_range(rule: &Rule, m: &Match) -> bool {
    let value = || m.capture.as_deref().and_then(|c| c.parse::<u64>().ok());
    match rule.tag {
        Some(RuleTag::NumericAbove(limit)) => value().is_some_and(|v| v > limit),
        Some(RuleTag::NumericBelow(limit)) => value().is_some_and(|v| v < limit),
        Some(RuleTag::EnvReference) => false,
        None => true,
    }
}
