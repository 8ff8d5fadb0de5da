//! Site-relative path normalization
//!
//! Manifest keys must be identical for the same tree on every host, so a
//! relative path is rendered with `/` separators and Unicode NFC.

use std::path::{Component, Path};
use unicode_normalization::UnicodeNormalization;

/// Render `path` relative to `root` as a canonical manifest key
///
/// Returns `None` when `path` is not inside `root`.
pub fn relative_key(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;

    let parts: Vec<String> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(normalize_component(&name.to_string_lossy())),
            _ => None,
        })
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

/// Normalize a manifest key supplied from elsewhere (e.g. a remote manifest)
///
/// Converts `\` to `/`, strips leading `./` and `/`, and applies NFC.
pub fn normalize_key(key: &str) -> String {
    let normalized: String = key.nfc().collect();
    normalized
        .replace('\\', "/")
        .split('/')
        .filter(|part| !part.is_empty() && *part != ".")
        .collect::<Vec<_>>()
        .join("/")
}

fn normalize_component(name: &str) -> String {
    name.nfc().collect()
}
