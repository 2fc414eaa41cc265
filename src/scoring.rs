//! Composite scoring: folds all ten domain results into one 0-100 number.

use crate::report::SecurityReport;
use serde::{Deserialize, Serialize};

/// Deduction weights for the composite score.
///
/// These are calibration constants, kept as injectable data so they can be
/// tuned without touching scanning logic. `Default` carries the values the
/// report format is calibrated against; several categories interact in ways
/// that can exceed their nominal range before the final clamp, and that
/// behavior is part of the contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreWeights {
    pub dependency_critical: f64,
    pub dependency_high: f64,
    pub dependency_moderate: f64,
    pub dependency_low: f64,
    pub secret_critical: f64,
    pub secret_high: f64,
    pub auth_per_issue: f64,
    pub auth_cap: f64,
    pub validation_per_issue: f64,
    pub validation_cap: f64,
    pub injection_per_issue: f64,
    pub injection_cap: f64,
    pub csrf_per_issue: f64,
    pub csrf_cap: f64,
    pub cors_high_issue: f64,
    pub rate_limit_per_issue: f64,
    pub rate_limit_cap: f64,
    pub middleware_missing_high: f64,
    pub middleware_cap: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            dependency_critical: 15.0,
            dependency_high: 10.0,
            dependency_moderate: 5.0,
            dependency_low: 2.0,
            secret_critical: 10.0,
            secret_high: 5.0,
            auth_per_issue: 2.0,
            auth_cap: 20.0,
            validation_per_issue: 1.5,
            validation_cap: 15.0,
            injection_per_issue: 3.0,
            injection_cap: 20.0,
            csrf_per_issue: 2.0,
            csrf_cap: 15.0,
            cors_high_issue: 5.0,
            rate_limit_per_issue: 5.0,
            rate_limit_cap: 10.0,
            middleware_missing_high: 4.0,
            middleware_cap: 20.0,
        }
    }
}

/// Compute the composite security score: 100 minus per-category deductions,
/// each category independently capped, clamped to [0, 100] and rounded.
pub fn composite_score(report: &SecurityReport, weights: &ScoreWeights) -> u32 {
    let mut deduction = 0.0;

    let vulns = &report.dependencies.audit.vulnerabilities;
    deduction += vulns.critical as f64 * weights.dependency_critical
        + vulns.high as f64 * weights.dependency_high
        + vulns.moderate as f64 * weights.dependency_moderate
        + vulns.low as f64 * weights.dependency_low;

    deduction += report.secrets.counts.critical as f64 * weights.secret_critical
        + report.secrets.counts.high as f64 * weights.secret_high;

    deduction += capped(
        report.auth.issues.len(),
        weights.auth_per_issue,
        weights.auth_cap,
    );
    deduction += capped(
        report.input_validation.issues.len(),
        weights.validation_per_issue,
        weights.validation_cap,
    );
    deduction += capped(
        report.sql_injection.issues.len(),
        weights.injection_per_issue,
        weights.injection_cap,
    );
    deduction += capped(
        report.csrf.issues.len(),
        weights.csrf_per_issue,
        weights.csrf_cap,
    );

    deduction += report.cors.counts.high as f64 * weights.cors_high_issue;

    let rate_limit_findings =
        report.rate_limit.issues.len() + report.rate_limit.unprotected_endpoints.len();
    deduction += capped(
        rate_limit_findings,
        weights.rate_limit_per_issue,
        weights.rate_limit_cap,
    );

    deduction += capped(
        report.middlewares.missing_high_priority.len(),
        weights.middleware_missing_high,
        weights.middleware_cap,
    );

    (100.0 - deduction).clamp(0.0, 100.0).round() as u32
}

fn capped(count: usize, per_issue: f64, cap: f64) -> f64 {
    (count as f64 * per_issue).min(cap)
}
