pub mod types;

mod auth;
mod cookies;
mod cors;
mod csrf;
mod injection;
mod middleware;
mod rate_limit;
mod secrets;
mod validation;

pub(crate) use cors::WILDCARD_ORIGIN_IDS;
pub use middleware::{MiddlewareSpec, Priority};
pub use rate_limit::{SAFE_MAX_REQUESTS, SAFE_WINDOW_MS, SENSITIVE_ROUTES};
pub use types::{Issue, Rule, RuleTag, Severity, SeverityCounts};

use std::sync::LazyLock;

static SECRET_RULES: LazyLock<Vec<Rule>> = LazyLock::new(secrets::rules);
static CORS_RULES: LazyLock<Vec<Rule>> = LazyLock::new(cors::rules);
static AUTH_RULES: LazyLock<Vec<Rule>> = LazyLock::new(auth::rules);
static CSRF_RULES: LazyLock<Vec<Rule>> = LazyLock::new(csrf::rules);
static COOKIE_RULES: LazyLock<Vec<Rule>> = LazyLock::new(cookies::rules);
static INJECTION_RULES: LazyLock<Vec<Rule>> = LazyLock::new(injection::rules);
static VALIDATION_RULES: LazyLock<Vec<Rule>> = LazyLock::new(validation::rules);
static RATE_LIMIT_RULES: LazyLock<Vec<Rule>> = LazyLock::new(rate_limit::rules);
static MIDDLEWARE_CONFIG_RULES: LazyLock<Vec<Rule>> = LazyLock::new(middleware::config_rules);
static MIDDLEWARE_SPECS: LazyLock<Vec<MiddlewareSpec>> = LazyLock::new(middleware::specs);

pub fn secret_rules() -> &'static [Rule] {
    &SECRET_RULES
}

pub fn cors_rules() -> &'static [Rule] {
    &CORS_RULES
}

pub fn auth_rules() -> &'static [Rule] {
    &AUTH_RULES
}

pub fn csrf_rules() -> &'static [Rule] {
    &CSRF_RULES
}

pub fn cookie_rules() -> &'static [Rule] {
    &COOKIE_RULES
}

pub fn injection_rules() -> &'static [Rule] {
    &INJECTION_RULES
}

pub fn validation_rules() -> &'static [Rule] {
    &VALIDATION_RULES
}

pub fn rate_limit_rules() -> &'static [Rule] {
    &RATE_LIMIT_RULES
}

pub fn middleware_config_rules() -> &'static [Rule] {
    &MIDDLEWARE_CONFIG_RULES
}

pub fn middleware_specs() -> &'static [MiddlewareSpec] {
    &MIDDLEWARE_SPECS
}
