use crate::rules::types::{Rule, RuleTag, Severity};
use regex::Regex;

/// Highest request ceiling considered safe for a rate-limit window.
pub const SAFE_MAX_REQUESTS: u64 = 100;

/// Shortest window (ms) considered meaningful; anything below resets too fast.
pub const SAFE_WINDOW_MS: u64 = 60_000;

/// Routes that must carry a rate limiter when exposed as POST endpoints.
pub const SENSITIVE_ROUTES: &[&str] = &[
    "/login",
    "/register",
    "/reset-password",
    "/forgot-password",
    "/signin",
    "/signup",
    "/auth",
    "/api/auth",
];

pub(super) fn rules() -> Vec<Rule> {
    vec![rate_001(), rate_002()]
}

fn rate_001() -> Rule {
    Rule {
        id: "RATE-001",
        name: "Rate limit allows too many requests",
        severity: Severity::Medium,
        pattern: Regex::new(r"max\s*:\s*(\d+)").expect("RATE-001: invalid regex"),
        remediation: "Cap max at 100 requests per window for general endpoints, lower for auth routes.",
        tag: Some(RuleTag::NumericAbove(SAFE_MAX_REQUESTS)),
    }
}

fn rate_002() -> Rule {
    Rule {
        id: "RATE-002",
        name: "Rate limit window too short",
        severity: Severity::Medium,
        pattern: Regex::new(r"windowMs\s*:\s*(\d+)").expect("RATE-002: invalid regex"),
        remediation: "Use a window of at least 60000 ms; shorter windows make the limit trivial to wait out.",
        tag: Some(RuleTag::NumericBelow(SAFE_WINDOW_MS)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_001_captures_max_value() {
        let rule = rate_001();
        let caps = rule.pattern.captures("rateLimit({ max: 500 })").unwrap();
        assert_eq!(&caps[1], "500");
        assert_eq!(rule.tag, Some(RuleTag::NumericAbove(100)));
    }

    #[test]
    fn test_rate_002_captures_window_value() {
        let rule = rate_002();
        let caps = rule.pattern.captures("windowMs: 15000,").unwrap();
        assert_eq!(&caps[1], "15000");
        assert_eq!(rule.tag, Some(RuleTag::NumericBelow(60_000)));
    }
}
