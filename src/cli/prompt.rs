//! Interactive prompts, behind a trait so route handlers can be driven in tests.

use crate::error::ApiError;
use dialoguer::{Confirm, Password, Select};

pub trait Prompter {
    /// Ask for a hidden value; `confirm` asks twice and requires a match
    fn password(&self, prompt: &str, confirm: bool) -> Result<String, ApiError>;

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool, ApiError>;

    /// Pick one of `items`; returns its index
    fn select(&self, prompt: &str, items: &[&str]) -> Result<usize, ApiError>;
}

/// Terminal prompts via dialoguer
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn password(&self, prompt: &str, confirm: bool) -> Result<String, ApiError> {
        let mut input = Password::new().with_prompt(prompt);
        if confirm {
            input = input.with_confirmation("Confirm password", "Passwords do not match");
        }
        input
            .interact()
            .map_err(|e| ApiError::Prompt(format!("Failed to get user input: {}", e)))
    }

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool, ApiError> {
        Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()
            .map_err(|e| ApiError::Prompt(format!("Failed to get user input: {}", e)))
    }

    fn select(&self, prompt: &str, items: &[&str]) -> Result<usize, ApiError> {
        Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact()
            .map_err(|e| ApiError::Prompt(format!("Failed to get user input: {}", e)))
    }
}
