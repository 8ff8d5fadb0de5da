//! Presentation: text and JSON formatters for scan and diff results.

use crate::error::ApiError;
use crate::site::{DiffResult, FileEntry};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ApiError::InvalidInput(format!("Failed to render JSON: {}", e)))
}

fn short_hash(hash: &str) -> &str {
    &hash[..hash.len().min(12)]
}

pub fn format_bytes(size: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];
    let mut value = size as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} B", size)
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

pub fn format_scan(entries: &[FileEntry], format: &str) -> Result<String, ApiError> {
    if format == "json" {
        return to_json(&entries);
    }

    if entries.is_empty() {
        return Ok("No files found.".to_string());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Path", "Size", "Type", "Hash"]);
    for entry in entries {
        table.add_row(vec![
            entry.path.clone(),
            format_bytes(entry.size),
            entry.media_type.clone(),
            short_hash(&entry.hash).to_string(),
        ]);
    }

    let total: u64 = entries.iter().map(|e| e.size).sum();
    Ok(format!(
        "{}\n{} files, {}",
        table,
        entries.len(),
        format_bytes(total)
    ))
}

pub fn format_diff(diff: &DiffResult, format: &str, color: bool) -> Result<String, ApiError> {
    if format == "json" {
        return to_json(diff);
    }

    if diff.is_empty() {
        return Ok("Site is up to date.".to_string());
    }

    let mut lines = Vec::with_capacity(diff.change_count() + 2);
    for entry in &diff.added {
        let line = format!("+ {} ({})", entry.path, format_bytes(entry.size));
        lines.push(if color { line.green().to_string() } else { line });
    }
    for entry in &diff.modified {
        let line = format!("~ {} ({})", entry.path, format_bytes(entry.size));
        lines.push(if color { line.yellow().to_string() } else { line });
    }
    for path in &diff.deleted {
        let line = format!("- {}", path);
        lines.push(if color { line.red().to_string() } else { line });
    }

    lines.push(String::new());
    lines.push(format!(
        "{} added, {} modified, {} deleted ({} to upload)",
        diff.added.len(),
        diff.modified.len(),
        diff.deleted.len(),
        format_bytes(diff.upload_bytes())
    ));
    Ok(lines.join("\n"))
}
