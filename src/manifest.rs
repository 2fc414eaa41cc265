//! Dependency manifest (`package.json`) handling.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

/// The declared-dependency descriptor of a JavaScript project.
///
/// Only the dependency maps are read; the rest of package.json is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
    #[serde(default, rename = "devDependencies")]
    pub dev_dependencies: BTreeMap<String, String>,
}

impl Manifest {
    /// Load `package.json` beneath the project root.
    ///
    /// A missing or malformed manifest means "no declared dependencies",
    /// never a scan failure.
    pub fn load(root: &Path) -> Self {
        let path = root.join("package.json");
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(_) => {
                debug!(path = %path.display(), "no manifest found");
                return Self::default();
            }
        };

        match serde_json::from_str(&content) {
            Ok(manifest) => manifest,
            Err(err) => {
                warn!(path = %path.display(), %err, "malformed manifest, treating as empty");
                Self::default()
            }
        }
    }

    /// Union of `dependencies` and `devDependencies` names.
    pub fn declared(&self) -> FxHashSet<&str> {
        self.dependencies
            .keys()
            .chain(self.dev_dependencies.keys())
            .map(String::as_str)
            .collect()
    }

    pub fn has(&self, package: &str) -> bool {
        self.dependencies.contains_key(package) || self.dev_dependencies.contains_key(package)
    }
}

/// Declared packages split against a domain's recommended list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackageCheck {
    pub installed: Vec<String>,
    pub missing: Vec<String>,
}

impl PackageCheck {
    /// Partition a recommended-package list by manifest membership.
    /// Output order follows the recommended list, keeping results stable.
    pub fn against(manifest: &Manifest, recommended: &[&str]) -> Self {
        let declared = manifest.declared();
        let (installed, missing): (Vec<&str>, Vec<&str>) = recommended
            .iter()
            .copied()
            .partition(|pkg| declared.contains(*pkg));

        Self {
            installed: installed.into_iter().map(str::to_string).collect(),
            missing: missing.into_iter().map(str::to_string).collect(),
        }
    }
}
