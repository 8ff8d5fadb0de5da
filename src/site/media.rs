//! Media type lookup by file extension

use std::path::Path;

/// Fallback for unrecognized extensions
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Media type for a file, from its extension
pub fn media_type_for(path: &Path) -> String {
    mime_guess::from_path(path)
        .first()
        .map(|mime| mime.essence_str().to_string())
        .unwrap_or_else(|| OCTET_STREAM.to_string())
}
