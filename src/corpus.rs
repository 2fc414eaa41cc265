//! File corpus resolution: turning a project root into the set of
//! (relative path, content) pairs the pattern matcher scans.

use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Directories never worth scanning in a JavaScript project.
const SKIP_DIRS: &[&str] = &["node_modules", ".git", "dist", "build", "coverage", ".next"];

/// Source and config extensions recognized by the scanner.
pub const SOURCE_EXTENSIONS: &[&str] = &["js", "mjs", "cjs", "ts", "mts", "cts"];

/// One resolved file: path relative to the project root plus its raw text.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: String,
    pub content: String,
}

/// Configuration for corpus resolution.
#[derive(Debug, Clone, Default)]
pub struct CorpusConfig {
    /// File extensions to include. Empty means every file.
    pub extensions: Vec<&'static str>,
    /// Maximum depth to traverse. None means unlimited.
    pub max_depth: Option<usize>,
}

impl CorpusConfig {
    pub fn new(extensions: &[&'static str]) -> Self {
        Self {
            extensions: extensions.to_vec(),
            max_depth: None,
        }
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    fn matches_extension(&self, path: &Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.contains(&ext))
    }
}

/// Resolves the scannable file set beneath a project root.
pub struct CorpusResolver {
    config: CorpusConfig,
}

impl CorpusResolver {
    pub fn new(config: CorpusConfig) -> Self {
        Self { config }
    }

    /// Resolver over the standard JavaScript/TypeScript source extensions.
    pub fn sources() -> Self {
        Self::new(CorpusConfig::new(SOURCE_EXTENSIONS))
    }

    /// Walk the root and read every matching file.
    ///
    /// A root that does not exist yields an empty corpus, and unreadable
    /// files are skipped; neither aborts a scan. The result is sorted by
    /// relative path so one run's output is reproducible in the next.
    pub fn resolve(&self, root: &Path) -> Vec<SourceFile> {
        if !root.exists() {
            debug!(root = %root.display(), "project root does not exist, empty corpus");
            return Vec::new();
        }

        let mut walker = WalkDir::new(root).follow_links(false);
        if let Some(depth) = self.config.max_depth {
            walker = walker.max_depth(depth);
        }

        let mut files: Vec<SourceFile> = walker
            .into_iter()
            .filter_entry(|e| !is_skipped_dir(e.path()))
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| self.config.matches_extension(e.path()))
            .filter_map(|e| {
                let rel = relative_path(root, e.path());
                match std::fs::read_to_string(e.path()) {
                    Ok(content) => Some(SourceFile { path: rel, content }),
                    Err(err) => {
                        warn!(file = %e.path().display(), %err, "skipping unreadable file");
                        None
                    }
                }
            })
            .collect();

        files.sort_by(|a, b| a.path.cmp(&b.path));
        debug!(root = %root.display(), files = files.len(), "resolved corpus");
        files
    }

    /// Read a single named file beneath the root, tolerating its absence.
    pub fn read_optional(root: &Path, name: &str) -> Option<String> {
        let path: PathBuf = root.join(name);
        match std::fs::read_to_string(&path) {
            Ok(content) => Some(content),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
            Err(err) => {
                warn!(file = %path.display(), %err, "skipping unreadable file");
                None
            }
        }
    }
}

fn is_skipped_dir(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| SKIP_DIRS.contains(&n))
}

fn relative_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}
