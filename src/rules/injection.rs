use crate::rules::types::{Rule, Severity};
use regex::Regex;

pub(super) fn rules() -> Vec<Rule> {
    vec![inj_001(), inj_002(), inj_003(), inj_004(), inj_005(), inj_006()]
}

fn inj_001() -> Rule {
    Rule {
        id: "INJ-001",
        name: "SQL built with template literal interpolation",
        severity: Severity::Critical,
        pattern: Regex::new(r"(?i)(?:query|execute)\s*\(\s*`[^`]*\$\{")
            .expect("INJ-001: invalid regex"),
        remediation: "Use parameterized queries (placeholders) instead of interpolating values into SQL.",
        tag: None,
    }
}

fn inj_002() -> Rule {
    Rule {
        id: "INJ-002",
        name: "SQL built with string concatenation",
        severity: Severity::Critical,
        // The fragment may close with '" (a quote inside the literal), so a
        // run of quote characters is allowed before the concatenation.
        pattern: Regex::new(
            r#"(?i)["'](?:SELECT|INSERT|UPDATE|DELETE)\s[^"']*["']+\s*\+"#,
        )
        .expect("INJ-002: invalid regex"),
        remediation: "Concatenated SQL is injectable; switch to prepared statements with bound parameters.",
        tag: None,
    }
}

fn inj_003() -> Rule {
    Rule {
        id: "INJ-003",
        name: "MongoDB $where operator",
        severity: Severity::High,
        pattern: Regex::new(r#"\$where["']?\s*:"#).expect("INJ-003: invalid regex"),
        remediation: "$where evaluates JavaScript server-side; express the query with standard operators.",
        tag: None,
    }
}

fn inj_004() -> Rule {
    Rule {
        id: "INJ-004",
        name: "Request data passed to eval",
        severity: Severity::Critical,
        pattern: Regex::new(r"eval\s*\([^)]*req\.(?:body|query|params)")
            .expect("INJ-004: invalid regex"),
        remediation: "Never eval request input; parse it with JSON.parse or a schema validator.",
        tag: None,
    }
}

fn inj_005() -> Rule {
    Rule {
        id: "INJ-005",
        name: "Shell command built from request data",
        severity: Severity::Critical,
        pattern: Regex::new(r"(?:exec|execSync|spawn)\s*\([^)]*(?:\+|\$\{)[^)]*req\.")
            .expect("INJ-005: invalid regex"),
        remediation: "Pass arguments as an array to execFile/spawn; never interpolate request data into a shell string.",
        tag: None,
    }
}

fn inj_006() -> Rule {
    Rule {
        id: "INJ-006",
        name: "Dynamic Function constructor",
        severity: Severity::High,
        pattern: Regex::new(r"new\s+Function\s*\(").expect("INJ-006: invalid regex"),
        remediation: "new Function compiles arbitrary strings; replace with a static function or a safe parser.",
        tag: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inj_001_detects_template_sql() {
        let rule = inj_001();
        assert!(rule.pattern.is_match(r"db.query(`SELECT * FROM users WHERE id = ${id}`)"));
        assert!(!rule.pattern.is_match(r#"db.query('SELECT * FROM users WHERE id = ?', [id])"#));
    }

    #[test]
    fn test_inj_002_detects_concatenated_sql() {
        let rule = inj_002();
        assert!(rule.pattern.is_match(r#""SELECT * FROM users WHERE name = '" + name"#));
        assert!(!rule.pattern.is_match(r#""SELECT * FROM users WHERE id = ?""#));
    }

    #[test]
    fn test_inj_003_detects_where_operator() {
        let rule = inj_003();
        assert!(rule.pattern.is_match(r#"users.find({ $where: "this.age > " + age })"#));
        assert!(rule.pattern.is_match(r#"{ "$where": code }"#));
        assert!(!rule.pattern.is_match(r#"users.find({ age: { $gt: 21 } })"#));
    }

    #[test]
    fn test_inj_004_detects_eval_of_request() {
        let rule = inj_004();
        assert!(rule.pattern.is_match("eval(req.body.expression)"));
        assert!(!rule.pattern.is_match("eval(trustedTemplate)"));
    }

    #[test]
    fn test_inj_005_detects_shell_injection() {
        let rule = inj_005();
        assert!(rule.pattern.is_match(r#"exec('ping ' + req.query.host)"#));
        assert!(rule.pattern.is_match(r"execSync(`convert ${req.body.file}`)"));
        assert!(!rule.pattern.is_match(r#"execFile('ping', [host])"#));
    }
}
