//! Dependency domain: declared packages vs. the recommended security set,
//! plus an `npm audit` pass for known vulnerabilities.

use crate::manifest::{Manifest, PackageCheck};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::process::Command;
use tracing::{debug, warn};

/// Packages a hardened Express service is expected to declare.
const RECOMMENDED_PACKAGES: &[&str] = &[
    "helmet",
    "cors",
    "express-rate-limit",
    "express-validator",
    "csurf",
    "bcrypt",
    "express-mongo-sanitize",
    "hpp",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VulnerabilityCounts {
    pub critical: usize,
    pub high: usize,
    pub moderate: usize,
    pub low: usize,
}

/// Outcome of the external audit tool. A failing or absent tool is captured
/// here rather than failing the domain.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditOutcome {
    pub success: bool,
    pub vulnerabilities: VulnerabilityCounts,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl AuditOutcome {
    fn failure(error: impl Into<String>, details: Option<String>) -> Self {
        Self {
            success: false,
            vulnerabilities: VulnerabilityCounts::default(),
            error: Some(error.into()),
            details,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyResult {
    pub packages: PackageCheck,
    pub audit: AuditOutcome,
}

pub struct DependencyAnalyzer {
    recommended: Vec<&'static str>,
    run_audit: bool,
}

impl DependencyAnalyzer {
    pub fn new() -> Self {
        Self {
            recommended: RECOMMENDED_PACKAGES.to_vec(),
            run_audit: true,
        }
    }

    pub fn with_recommended(mut self, recommended: Vec<&'static str>) -> Self {
        self.recommended = recommended;
        self
    }

    pub fn with_audit(mut self, run_audit: bool) -> Self {
        self.run_audit = run_audit;
        self
    }

    pub fn scan(&self, root: &Path) -> DependencyResult {
        let manifest = Manifest::load(root);
        let packages = PackageCheck::against(&manifest, &self.recommended);

        let audit = if self.run_audit {
            run_npm_audit(root)
        } else {
            AuditOutcome::failure("audit skipped", None)
        };

        DependencyResult { packages, audit }
    }
}

impl Default for DependencyAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

fn run_npm_audit(root: &Path) -> AuditOutcome {
    let output = match Command::new("npm")
        .args(["audit", "--json"])
        .current_dir(root)
        .output()
    {
        Ok(output) => output,
        Err(err) => {
            warn!(%err, "npm audit could not be spawned");
            return AuditOutcome::failure(format!("failed to run npm audit: {err}"), None);
        }
    };

    // npm audit exits non-zero when vulnerabilities exist; the JSON on
    // stdout is authoritative either way.
    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value = match serde_json::from_str(&stdout) {
        Ok(value) => value,
        Err(_) => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return AuditOutcome::failure(
                "npm audit produced unparseable output",
                Some(stderr.chars().take(500).collect()),
            );
        }
    };

    let tier = |name: &str| {
        parsed["metadata"]["vulnerabilities"][name]
            .as_u64()
            .unwrap_or(0) as usize
    };
    let vulnerabilities = VulnerabilityCounts {
        critical: tier("critical"),
        high: tier("high"),
        moderate: tier("moderate"),
        low: tier("low"),
    };
    debug!(?vulnerabilities, "npm audit complete");

    AuditOutcome {
        success: true,
        vulnerabilities,
        error: None,
        details: None,
    }
}
