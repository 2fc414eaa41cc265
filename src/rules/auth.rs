use crate::rules::types::{Rule, Severity};
use regex::Regex;

pub(super) fn rules() -> Vec<Rule> {
    vec![auth_001(), auth_002(), auth_003(), auth_004(), auth_005()]
}

fn auth_001() -> Rule {
    Rule {
        id: "AUTH-001",
        name: "Weak password hashing (MD5/SHA1)",
        severity: Severity::High,
        pattern: Regex::new(r#"createHash\(\s*["'](?:md5|sha1)["']\s*\)"#)
            .expect("AUTH-001: invalid regex"),
        remediation: "Hash passwords with bcrypt, scrypt, or argon2; MD5 and SHA1 are brute-forceable.",
        tag: None,
    }
}

fn auth_002() -> Rule {
    Rule {
        id: "AUTH-002",
        name: "Plaintext password comparison",
        severity: Severity::High,
        pattern: Regex::new(r"password\s*===?\s*[\w.\[\]'\x22]+password")
            .expect("AUTH-002: invalid regex"),
        remediation: "Compare against a stored hash with bcrypt.compare, never against plaintext.",
        tag: None,
    }
}

fn auth_003() -> Rule {
    Rule {
        id: "AUTH-003",
        name: "JWT verification disabled",
        severity: Severity::Critical,
        pattern: Regex::new(r"jwt\.decode\(").expect("AUTH-003: invalid regex"),
        remediation: "jwt.decode skips signature verification; use jwt.verify with the signing secret.",
        tag: None,
    }
}

fn auth_004() -> Rule {
    Rule {
        id: "AUTH-004",
        name: "JWT signed with 'none' algorithm",
        severity: Severity::Critical,
        pattern: Regex::new(r#"algorithm[s]?\s*:\s*\[?\s*["']none["']"#)
            .expect("AUTH-004: invalid regex"),
        remediation: "Never allow the 'none' algorithm; pin an explicit HMAC or RSA algorithm.",
        tag: None,
    }
}

fn auth_005() -> Rule {
    Rule {
        id: "AUTH-005",
        name: "Session without secure flags",
        severity: Severity::Medium,
        pattern: Regex::new(r"session\(\{[^}]*resave\s*:\s*true").expect("AUTH-005: invalid regex"),
        remediation: "Set resave: false and configure cookie.secure/httpOnly on the session middleware.",
        tag: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_001_detects_weak_hash() {
        let rule = auth_001();
        assert!(rule.pattern.is_match(r#"crypto.createHash('md5').update(password)"#));
        assert!(rule.pattern.is_match(r#"crypto.createHash("sha1")"#));
        assert!(!rule.pattern.is_match(r#"crypto.createHash('sha256')"#));
    }

    #[test]
    fn test_auth_002_detects_plaintext_compare() {
        let rule = auth_002();
        assert!(rule.pattern.is_match("if (password === user.password) {"));
        assert!(!rule.pattern.is_match("bcrypt.compare(password, user.hash)"));
    }

    #[test]
    fn test_auth_003_detects_decode() {
        let rule = auth_003();
        assert!(rule.pattern.is_match("const claims = jwt.decode(token);"));
        assert!(!rule.pattern.is_match("const claims = jwt.verify(token, secret);"));
    }

    #[test]
    fn test_auth_004_detects_none_algorithm() {
        let rule = auth_004();
        assert!(rule.pattern.is_match(r#"jwt.sign(payload, key, { algorithm: 'none' })"#));
        assert!(rule.pattern.is_match(r#"algorithms: ['none']"#));
        assert!(!rule.pattern.is_match(r#"algorithm: 'HS256'"#));
    }
}
