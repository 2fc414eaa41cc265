//! Full-scan orchestration: runs every domain analyzer over a project root
//! and assembles the report artifact.

use crate::analyzers::{
    AuthAnalyzer, AuthResult, CookieAnalyzer, CookieResult, CorsAnalyzer, CorsResult,
    CsrfAnalyzer, CsrfResult, DependencyAnalyzer, DependencyResult, InputValidationAnalyzer,
    InputValidationResult, MiddlewareAnalyzer, MiddlewareResult, RateLimitAnalyzer,
    RateLimitResult, SecretsAnalyzer, SecretsResult, SqlInjectionAnalyzer, SqlInjectionResult,
};
use crate::scoring::{composite_score, ScoreWeights};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanStats {
    /// Wall-clock scan duration in milliseconds.
    pub execution_time: u128,
    pub total_issues: usize,
}

/// The complete scan artifact. Field order here is serialization order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityReport {
    pub dependencies: DependencyResult,
    pub secrets: SecretsResult,
    pub middlewares: MiddlewareResult,
    pub cors: CorsResult,
    pub rate_limit: RateLimitResult,
    pub sql_injection: SqlInjectionResult,
    pub auth: AuthResult,
    pub input_validation: InputValidationResult,
    pub csrf: CsrfResult,
    pub cookies: CookieResult,
    pub stats: ScanStats,
    pub security_score: u32,
    pub generated_at: String,
}

impl SecurityReport {
    /// Every issue the scan surfaced, counting unprotected endpoints as
    /// findings in their own right.
    fn count_issues(&self) -> usize {
        self.secrets.issues.len()
            + self.middlewares.issues.len()
            + self.cors.issues.len()
            + self.rate_limit.issues.len()
            + self.rate_limit.unprotected_endpoints.len()
            + self.sql_injection.issues.len()
            + self.auth.issues.len()
            + self.input_validation.issues.len()
            + self.csrf.issues.len()
            + self.cookies.issues.len()
    }
}

pub struct ReportBuilder {
    weights: ScoreWeights,
    run_audit: bool,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self {
            weights: ScoreWeights::default(),
            run_audit: true,
        }
    }

    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Disable the external `npm audit` pass. Useful when scanning projects
    /// that were never `npm install`ed, or to keep scans hermetic.
    pub fn with_audit(mut self, run_audit: bool) -> Self {
        self.run_audit = run_audit;
        self
    }

    /// Run every analyzer over the project root and assemble the report.
    ///
    /// A nonexistent root is not an error: every analyzer sees an empty
    /// corpus and an absent manifest, and the report comes back well formed.
    pub fn generate(&self, root: &Path) -> SecurityReport {
        let started = Instant::now();
        debug!(root = %root.display(), "starting scan");

        let mut report = SecurityReport {
            dependencies: DependencyAnalyzer::new()
                .with_audit(self.run_audit)
                .scan(root),
            secrets: SecretsAnalyzer::new().scan(root),
            middlewares: MiddlewareAnalyzer::new().scan(root),
            cors: CorsAnalyzer::new().scan(root),
            rate_limit: RateLimitAnalyzer::new().scan(root),
            sql_injection: SqlInjectionAnalyzer::new().scan(root),
            auth: AuthAnalyzer::new().scan(root),
            input_validation: InputValidationAnalyzer::new().scan(root),
            csrf: CsrfAnalyzer::new().scan(root),
            cookies: CookieAnalyzer::new().scan(root),
            stats: ScanStats::default(),
            security_score: 0,
            generated_at: Utc::now().to_rfc3339(),
        };

        report.stats = ScanStats {
            execution_time: started.elapsed().as_millis(),
            total_issues: report.count_issues(),
        };
        report.security_score = composite_score(&report, &self.weights);

        info!(
            score = report.security_score,
            issues = report.stats.total_issues,
            elapsed_ms = report.stats.execution_time,
            "scan complete"
        );
        report
    }
}

impl Default for ReportBuilder {
    fn default() -> Self {
        Self::new()
    }
}
