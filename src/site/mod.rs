//! Site manifest differ
//!
//! Builds a content-addressed inventory of a local site directory and compares
//! it against the path → hash manifest of the deployed site to find the files
//! to upload and delete.

pub mod diff;
pub mod media;
pub mod path;
pub mod walker;

pub use diff::compare;

use crate::config::SiteConfig;
use crate::error::SiteError;
use crate::hashing;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walker::{Walker, WalkerConfig};

/// Remote state: site-relative path → content hash
pub type Manifest = BTreeMap<String, String>;

/// One local file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Path relative to the site root, `/`-separated
    pub path: String,
    /// Hex SHA-256 of the file content
    pub hash: String,
    /// Content length in bytes
    pub size: u64,
    #[serde(rename = "mimeType")]
    pub media_type: String,
}

/// Local state partitioned against a manifest. Unchanged files appear nowhere.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffResult {
    pub added: Vec<FileEntry>,
    pub modified: Vec<FileEntry>,
    pub deleted: Vec<String>,
}

impl DiffResult {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.modified.is_empty() && self.deleted.is_empty()
    }

    pub fn change_count(&self) -> usize {
        self.added.len() + self.modified.len() + self.deleted.len()
    }

    /// Bytes that must be uploaded to apply this diff
    pub fn upload_bytes(&self) -> u64 {
        self.added
            .iter()
            .chain(self.modified.iter())
            .map(|entry| entry.size)
            .sum()
    }
}

/// Scan options
#[derive(Debug, Clone, Default)]
pub struct ScanConfig {
    /// Path component names excluded from the scan
    pub ignore: Vec<String>,
}

impl From<&SiteConfig> for ScanConfig {
    fn from(config: &SiteConfig) -> Self {
        Self {
            ignore: config.ignore.clone(),
        }
    }
}

/// Scanner for one site root
pub struct SiteScanner {
    root: PathBuf,
    config: ScanConfig,
}

impl SiteScanner {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_config(root, ScanConfig::default())
    }

    pub fn with_config(root: impl Into<PathBuf>, config: ScanConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    /// Hash every regular file under the root
    ///
    /// Entries are sorted by `path`. Any unreadable file aborts the scan, as do two
    /// on-disk names that normalize to the same key.
    pub fn scan(&self) -> Result<Vec<FileEntry>, SiteError> {
        let walker = Walker::with_config(
            self.root.clone(),
            WalkerConfig {
                ignore_patterns: self.config.ignore.clone(),
                max_depth: None,
            },
        );

        let mut entries = Vec::new();
        for file in walker.walk()? {
            let Some(relative) = path::relative_key(&self.root, &file) else {
                continue;
            };
            let content = std::fs::read(&file).map_err(|e| SiteError::io(&file, e))?;
            let entry = FileEntry {
                hash: hashing::digest(&content),
                size: content.len() as u64,
                media_type: media::media_type_for(&file),
                path: relative,
            };
            debug!(path = %entry.path, size = entry.size, "Scanned file");
            entries.push(entry);
        }

        entries.sort_by(|a, b| a.path.cmp(&b.path));
        if let Some(pair) = entries.windows(2).find(|pair| pair[0].path == pair[1].path) {
            return Err(SiteError::DuplicatePath(pair[0].path.clone()));
        }
        info!(root = %self.root.display(), files = entries.len(), "Site scan complete");
        Ok(entries)
    }
}

/// Scan `root` with default options
pub fn scan_directory(root: &Path) -> Result<Vec<FileEntry>, SiteError> {
    SiteScanner::new(root).scan()
}

/// Parse a JSON manifest (`{"path": "hash", ...}`), normalizing its keys
pub fn parse_manifest(json: &str) -> Result<Manifest, SiteError> {
    let raw: BTreeMap<String, String> =
        serde_json::from_str(json).map_err(|e| SiteError::Manifest(e.to_string()))?;
    Ok(raw
        .into_iter()
        .map(|(key, hash)| (path::normalize_key(&key), hash.to_ascii_lowercase()))
        .collect())
}

/// Manifest describing a scanned inventory
pub fn manifest_of(entries: &[FileEntry]) -> Manifest {
    entries
        .iter()
        .map(|entry| (entry.path.clone(), entry.hash.clone()))
        .collect()
}
