//! Shared fixtures for integration tests

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::path::Path;
use std::sync::Mutex;
use walrus_deploy::cli::Prompter;
use walrus_deploy::config::WalrusConfig;
use walrus_deploy::error::ApiError;

/// Serializes tests that touch process environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Run `f` with `key` set to `value`, restoring the previous value afterwards
pub fn with_env_var<F, R>(key: &str, value: &str, f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let previous = std::env::var(key).ok();
    std::env::set_var(key, value);

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(f));

    match previous {
        Some(orig) => std::env::set_var(key, orig),
        None => std::env::remove_var(key),
    }
    match result {
        Ok(value) => value,
        Err(panic) => std::panic::resume_unwind(panic),
    }
}

/// Low iteration count so encrypted keystore tests stay fast
pub const TEST_KDF_ITERATIONS: u32 = 10;

/// Write `files` (relative path, contents) under `root`, creating directories
pub fn write_site(root: &Path, files: &[(&str, &[u8])]) {
    for (rel, contents) in files {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }
}

/// Config whose keystore lives under `dir`
pub fn config_in(dir: &Path) -> WalrusConfig {
    let mut config = WalrusConfig::default();
    config.keystore.path = dir.join("walrus.keystore");
    config.keystore.kdf_iterations = TEST_KDF_ITERATIONS;
    config
}

/// Prompter that replays queued answers and fails when one is missing
#[derive(Default)]
pub struct ScriptedPrompter {
    passwords: RefCell<VecDeque<String>>,
    confirms: RefCell<VecDeque<bool>>,
    selections: RefCell<VecDeque<usize>>,
    pub asked: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_password(self, password: &str) -> Self {
        self.passwords.borrow_mut().push_back(password.to_string());
        self
    }

    pub fn with_confirm(self, answer: bool) -> Self {
        self.confirms.borrow_mut().push_back(answer);
        self
    }

    pub fn with_selection(self, index: usize) -> Self {
        self.selections.borrow_mut().push_back(index);
        self
    }

    fn exhausted(prompt: &str) -> ApiError {
        ApiError::Prompt(format!("no scripted answer for '{}'", prompt))
    }
}

impl Prompter for ScriptedPrompter {
    fn password(&self, prompt: &str, _confirm: bool) -> Result<String, ApiError> {
        self.asked.borrow_mut().push(prompt.to_string());
        self.passwords
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| Self::exhausted(prompt))
    }

    fn confirm(&self, prompt: &str, _default: bool) -> Result<bool, ApiError> {
        self.asked.borrow_mut().push(prompt.to_string());
        self.confirms
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| Self::exhausted(prompt))
    }

    fn select(&self, prompt: &str, _items: &[&str]) -> Result<usize, ApiError> {
        self.asked.borrow_mut().push(prompt.to_string());
        self.selections
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| Self::exhausted(prompt))
    }
}
