use crate::rules::types::{Rule, Severity};
use regex::Regex;

pub(super) fn rules() -> Vec<Rule> {
    vec![val_001(), val_002(), val_003(), val_004()]
}

fn val_001() -> Rule {
    Rule {
        id: "VAL-001",
        name: "Request body spread into database call",
        severity: Severity::High,
        pattern: Regex::new(r"(?:create|insert|update|save)\w*\s*\(\s*(?:\{\s*)?\.\.\.req\.body")
            .expect("VAL-001: invalid regex"),
        remediation: "Spreading req.body allows mass assignment; pick the expected fields explicitly.",
        tag: None,
    }
}

fn val_002() -> Rule {
    Rule {
        id: "VAL-002",
        name: "Request path segment used in filesystem call",
        severity: Severity::High,
        pattern: Regex::new(r"(?:readFile|readFileSync|createReadStream|sendFile)\s*\([^)]*req\.(?:params|query)")
            .expect("VAL-002: invalid regex"),
        remediation: "Resolve and normalize the path, then verify it stays inside the intended directory.",
        tag: None,
    }
}

fn val_003() -> Rule {
    Rule {
        id: "VAL-003",
        name: "Redirect target taken from request",
        severity: Severity::Medium,
        pattern: Regex::new(r"res\.redirect\s*\([^)]*req\.(?:query|body|params)")
            .expect("VAL-003: invalid regex"),
        remediation: "Validate redirect targets against an allowlist to prevent open redirects.",
        tag: None,
    }
}

fn val_004() -> Rule {
    Rule {
        id: "VAL-004",
        name: "JSON.parse of raw request data",
        severity: Severity::Low,
        pattern: Regex::new(r"JSON\.parse\s*\([^)]*req\.(?:body|query|params)")
            .expect("VAL-004: invalid regex"),
        remediation: "Wrap JSON.parse of request data in a try/catch and validate the parsed shape.",
        tag: None,
    }
}
