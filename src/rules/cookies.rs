use crate::rules::types::{Rule, Severity};
use regex::Regex;

pub(super) fn rules() -> Vec<Rule> {
    vec![cook_001(), cook_002(), cook_003(), cook_004()]
}

fn cook_001() -> Rule {
    Rule {
        id: "COOK-001",
        name: "Cookie without httpOnly",
        severity: Severity::Medium,
        pattern: Regex::new(r"httpOnly\s*:\s*false").expect("COOK-001: invalid regex"),
        remediation: "Set httpOnly: true so session cookies are invisible to client-side scripts.",
        tag: None,
    }
}

fn cook_002() -> Rule {
    Rule {
        id: "COOK-002",
        name: "Cookie without secure flag",
        severity: Severity::Medium,
        pattern: Regex::new(r"secure\s*:\s*false").expect("COOK-002: invalid regex"),
        remediation: "Set secure: true in production so cookies only travel over HTTPS.",
        tag: None,
    }
}

fn cook_003() -> Rule {
    Rule {
        id: "COOK-003",
        name: "SameSite disabled",
        severity: Severity::Medium,
        pattern: Regex::new(r#"sameSite\s*:\s*(?:["']none["']|false)"#)
            .expect("COOK-003: invalid regex"),
        remediation: "Use sameSite: 'lax' or 'strict'; 'none' requires secure and invites CSRF.",
        tag: None,
    }
}

fn cook_004() -> Rule {
    Rule {
        id: "COOK-004",
        name: "Cookie set without options",
        severity: Severity::Low,
        pattern: Regex::new(r#"res\.cookie\(\s*["'][^"']+["']\s*,\s*[^,)]+\)"#)
            .expect("COOK-004: invalid regex"),
        remediation: "Pass an options object with httpOnly, secure, and sameSite to res.cookie.",
        tag: None,
    }
}
