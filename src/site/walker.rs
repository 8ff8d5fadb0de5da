//! Filesystem walker for collecting the regular files of a site directory

use crate::error::SiteError;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Walker configuration
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    /// Path component names to skip entirely (e.g. ".git")
    pub ignore_patterns: Vec<String>,
    /// Maximum depth to traverse (None = unlimited)
    pub max_depth: Option<usize>,
}

/// Filesystem walker
///
/// Symbolic links are never followed and never reported, so cyclic links cannot
/// loop the walk. Only regular files are returned.
pub struct Walker {
    root: PathBuf,
    config: WalkerConfig,
}

impl Walker {
    /// Create a new walker for the given root path
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            config: WalkerConfig::default(),
        }
    }

    /// Create a walker with custom configuration
    pub fn with_config(root: PathBuf, config: WalkerConfig) -> Self {
        Self { root, config }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walk the tree and collect regular file paths
    ///
    /// Returns paths sorted for determinism. Fails on a missing or unreadable root
    /// and on the first directory entry that cannot be read.
    pub fn walk(&self) -> Result<Vec<PathBuf>, SiteError> {
        let metadata =
            std::fs::metadata(&self.root).map_err(|e| SiteError::io(&self.root, e))?;
        if !metadata.is_dir() {
            return Err(SiteError::io(
                &self.root,
                std::io::Error::new(std::io::ErrorKind::Other, "not a directory"),
            ));
        }

        let walker = WalkDir::new(&self.root)
            .follow_links(false)
            .max_depth(self.config.max_depth.unwrap_or(usize::MAX))
            .sort_by_file_name();

        let mut files = Vec::new();
        let mut iter = walker.into_iter();
        while let Some(entry) = iter.next() {
            let entry = entry.map_err(|e| {
                let path = e
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| self.root.clone());
                let source = e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::new(std::io::ErrorKind::Other, "walk failed"));
                SiteError::io(path, source)
            })?;

            if entry.depth() > 0 && self.should_ignore(&entry) {
                if entry.file_type().is_dir() {
                    iter.skip_current_dir();
                }
                continue;
            }

            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
            // Directories are descended into; symlinks and special files are skipped
        }

        files.sort();
        Ok(files)
    }

    /// Check if an entry's own name matches an ignore pattern
    fn should_ignore(&self, entry: &DirEntry) -> bool {
        let name = entry.file_name().to_string_lossy();
        self.config
            .ignore_patterns
            .iter()
            .any(|pattern| pattern.as_str() == name.as_ref())
    }
}
