use crate::rules::types::{Rule, Severity};
use regex::Regex;

/// Rule ids that count as a wildcard-origin problem for the domain score.
pub(crate) const WILDCARD_ORIGIN_IDS: &[&str] = &["CORS-001", "CORS-002"];

pub(super) fn rules() -> Vec<Rule> {
    vec![cors_001(), cors_002(), cors_003(), cors_004()]
}

fn cors_001() -> Rule {
    Rule {
        id: "CORS-001",
        name: "Permissive wildcard origin",
        severity: Severity::High,
        pattern: Regex::new(r#"origin\s*:\s*["'`]\*["'`]"#).expect("CORS-001: invalid regex"),
        remediation: "Replace the wildcard with an explicit allowlist of trusted origins.",
        tag: None,
    }
}

fn cors_002() -> Rule {
    Rule {
        id: "CORS-002",
        name: "Wildcard Access-Control-Allow-Origin header",
        severity: Severity::High,
        pattern: Regex::new(r#"Access-Control-Allow-Origin["'`]?\s*,\s*["'`]\*["'`]"#)
            .expect("CORS-002: invalid regex"),
        remediation: "Set the header to a specific trusted origin instead of '*'.",
        tag: None,
    }
}

fn cors_003() -> Rule {
    Rule {
        id: "CORS-003",
        name: "CORS credentials enabled",
        severity: Severity::Medium,
        pattern: Regex::new(r"credentials\s*:\s*true").expect("CORS-003: invalid regex"),
        remediation: "Credentials with CORS require a strict origin allowlist; verify the configured origins.",
        tag: None,
    }
}

fn cors_004() -> Rule {
    Rule {
        id: "CORS-004",
        name: "Origin reflection enabled",
        severity: Severity::Medium,
        pattern: Regex::new(r"origin\s*:\s*true").expect("CORS-004: invalid regex"),
        remediation: "origin: true reflects any caller's origin; use an explicit allowlist.",
        tag: None,
    }
}
