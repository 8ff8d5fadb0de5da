//! External tool capability and the blob client built on it
//!
//! `BlobClient` never spawns processes itself; it is handed an
//! `ExternalToolRunner`, so tests can substitute a scripted runner.

use crate::error::ToolError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, error, warn};

/// Captured result of one tool invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Something that can run an external tool with arguments
pub trait ExternalToolRunner {
    fn run(&self, args: &[String]) -> Result<ToolOutput, ToolError>;
}

impl<T: ExternalToolRunner + ?Sized> ExternalToolRunner for &T {
    fn run(&self, args: &[String]) -> Result<ToolOutput, ToolError> {
        (**self).run(args)
    }
}

/// Runs a binary as a child process and waits for it
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    binary: PathBuf,
}

impl ProcessRunner {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }
}

impl ExternalToolRunner for ProcessRunner {
    fn run(&self, args: &[String]) -> Result<ToolOutput, ToolError> {
        debug!(binary = %self.binary.display(), ?args, "Running external tool");
        let output = Command::new(&self.binary)
            .args(args)
            .output()
            .map_err(|source| ToolError::Spawn {
                binary: self.binary.clone(),
                source,
            })?;

        Ok(ToolOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            // Terminated by a signal: no exit code
            exit_code: output.status.code().unwrap_or(-1),
        })
    }
}

/// Result of storing a blob
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreBlobResult {
    pub blob_id: String,
}

#[derive(Deserialize)]
struct StoreJson {
    #[serde(rename = "blobId")]
    blob_id: Option<String>,
    id: Option<String>,
}

/// Blob storage operations expressed as tool invocations
pub struct BlobClient<R: ExternalToolRunner> {
    runner: R,
}

impl<R: ExternalToolRunner> BlobClient<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    /// `store <file> --json`
    pub fn store_blob(&self, file: &Path) -> Result<StoreBlobResult, ToolError> {
        if !file.exists() {
            return Err(ToolError::FileNotFound(file.to_path_buf()));
        }

        let args = vec![
            "store".to_string(),
            file.to_string_lossy().into_owned(),
            "--json".to_string(),
        ];
        let output = self.invoke("store", &args)?;
        let blob_id = parse_blob_id(&output.stdout)
            .ok_or_else(|| ToolError::UnparseableOutput(output.stdout.trim().to_string()))?;
        Ok(StoreBlobResult { blob_id })
    }

    /// `read <blob_id> --out <path>`
    pub fn read_blob(&self, blob_id: &str, out: &Path) -> Result<(), ToolError> {
        let args = vec![
            "read".to_string(),
            blob_id.to_string(),
            "--out".to_string(),
            out.to_string_lossy().into_owned(),
        ];
        self.invoke("read", &args).map(|_| ())
    }

    /// `delete <blob_id>`
    pub fn delete_blob(&self, blob_id: &str) -> Result<(), ToolError> {
        let args = vec!["delete".to_string(), blob_id.to_string()];
        self.invoke("delete", &args).map(|_| ())
    }

    fn invoke(&self, command: &str, args: &[String]) -> Result<ToolOutput, ToolError> {
        let output = self.runner.run(args)?;
        if !output.success() {
            error!(command, exit_code = output.exit_code, stderr = %output.stderr.trim(), "Walrus command failed");
            return Err(ToolError::Failed {
                command: command.to_string(),
                exit_code: output.exit_code,
                stderr: output.stderr.trim().to_string(),
            });
        }
        Ok(output)
    }
}

/// Blob ID from `store` output: JSON `blobId`/`id`, else a `Blob ID: <id>` line
fn parse_blob_id(stdout: &str) -> Option<String> {
    if let Ok(parsed) = serde_json::from_str::<StoreJson>(stdout.trim()) {
        if let Some(id) = parsed.blob_id.or(parsed.id) {
            return Some(id);
        }
    }

    warn!("Store output was not the expected JSON, trying text form");
    stdout.lines().find_map(|line| {
        let (_, rest) = line.split_once("Blob ID:")?;
        let id: String = rest
            .trim()
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
            .collect();
        (!id.is_empty()).then_some(id)
    })
}
