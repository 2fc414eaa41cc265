use crate::rules::types::{Rule, Severity};
use regex::Regex;

pub(super) fn rules() -> Vec<Rule> {
    vec![csrf_001(), csrf_002(), csrf_003()]
}

fn csrf_001() -> Rule {
    Rule {
        id: "CSRF-001",
        name: "CSRF protection explicitly disabled",
        severity: Severity::High,
        pattern: Regex::new(r"(?i)csrf\s*:\s*false").expect("CSRF-001: invalid regex"),
        remediation: "Re-enable CSRF protection or document why this surface is exempt (e.g. token-authenticated API).",
        tag: None,
    }
}

fn csrf_002() -> Rule {
    Rule {
        id: "CSRF-002",
        name: "CSRF check skipped for unsafe methods",
        severity: Severity::High,
        pattern: Regex::new(r#"ignoreMethods\s*:\s*\[[^\]]*["'](?:POST|PUT|DELETE|PATCH)["']"#)
            .expect("CSRF-002: invalid regex"),
        remediation: "Only safe methods (GET, HEAD, OPTIONS) should bypass CSRF validation.",
        tag: None,
    }
}

fn csrf_003() -> Rule {
    Rule {
        id: "CSRF-003",
        name: "CSRF cookie not httpOnly",
        severity: Severity::Medium,
        pattern: Regex::new(r"csurf\(\{[^}]*httpOnly\s*:\s*false").expect("CSRF-003: invalid regex"),
        remediation: "Keep the CSRF token cookie httpOnly so scripts cannot read it.",
        tag: None,
    }
}
