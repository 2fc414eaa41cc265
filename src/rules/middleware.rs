use crate::rules::types::{Rule, RuleTag, Severity};
use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
}

/// One expected security middleware: the package that provides it and the
/// usage pattern that proves it is wired into the app.
#[derive(Debug, Clone)]
pub struct MiddlewareSpec {
    pub name: &'static str,
    pub package: &'static str,
    pub pattern: Regex,
    pub priority: Priority,
}

pub(super) fn specs() -> Vec<MiddlewareSpec> {
    vec![
        MiddlewareSpec {
            name: "helmet",
            package: "helmet",
            pattern: Regex::new(r#"require\(["']helmet["']\)|from\s+["']helmet["']"#)
                .expect("middleware helmet: invalid regex"),
            priority: Priority::High,
        },
        MiddlewareSpec {
            name: "rate limiting",
            package: "express-rate-limit",
            pattern: Regex::new(
                r#"require\(["']express-rate-limit["']\)|from\s+["']express-rate-limit["']"#,
            )
            .expect("middleware express-rate-limit: invalid regex"),
            priority: Priority::High,
        },
        MiddlewareSpec {
            name: "mongo sanitization",
            package: "express-mongo-sanitize",
            pattern: Regex::new(
                r#"require\(["']express-mongo-sanitize["']\)|from\s+["']express-mongo-sanitize["']"#,
            )
            .expect("middleware express-mongo-sanitize: invalid regex"),
            priority: Priority::High,
        },
        MiddlewareSpec {
            name: "cors",
            package: "cors",
            pattern: Regex::new(r#"require\(["']cors["']\)|from\s+["']cors["']"#)
                .expect("middleware cors: invalid regex"),
            priority: Priority::Medium,
        },
        MiddlewareSpec {
            name: "parameter pollution guard",
            package: "hpp",
            pattern: Regex::new(r#"require\(["']hpp["']\)|from\s+["']hpp["']"#)
                .expect("middleware hpp: invalid regex"),
            priority: Priority::Medium,
        },
        MiddlewareSpec {
            name: "request logging",
            package: "morgan",
            pattern: Regex::new(r#"require\(["']morgan["']\)|from\s+["']morgan["']"#)
                .expect("middleware morgan: invalid regex"),
            priority: Priority::Medium,
        },
    ]
}

pub(super) fn config_rules() -> Vec<Rule> {
    vec![mwc_001(), mwc_002(), mwc_003()]
}

fn mwc_001() -> Rule {
    Rule {
        id: "MWC-001",
        name: "Development error handler in use",
        severity: Severity::Medium,
        pattern: Regex::new(r#"require\(["']errorhandler["']\)"#).expect("MWC-001: invalid regex"),
        remediation: "errorhandler leaks stack traces; guard it behind NODE_ENV !== 'production'.",
        tag: None,
    }
}

fn mwc_002() -> Rule {
    Rule {
        id: "MWC-002",
        name: "Oversized request body limit",
        severity: Severity::Medium,
        pattern: Regex::new(r#"limit\s*:\s*["'](\d+)mb["']"#).expect("MWC-002: invalid regex"),
        remediation: "Large body limits enable memory-exhaustion attacks; keep the limit at or below 10mb.",
        tag: Some(RuleTag::NumericAbove(10)),
    }
}

fn mwc_003() -> Rule {
    Rule {
        id: "MWC-003",
        name: "X-Powered-By header left enabled",
        severity: Severity::Low,
        pattern: Regex::new(r#"app\.enable\(\s*["']x-powered-by["']\s*\)"#)
            .expect("MWC-003: invalid regex"),
        remediation: "Disable the X-Powered-By header (helmet does this) to avoid fingerprinting.",
        tag: None,
    }
}
