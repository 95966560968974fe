//! Interactive confirmation.

use crate::error::ApiError;
use dialoguer::Select;

/// Asks the user to pick one of a fixed set of answers
pub trait Prompter {
    /// Index of the chosen entry in `choices`
    fn choose(&self, prompt: &str, choices: &[&str]) -> Result<usize, ApiError>;
}

/// Prompts on the controlling terminal
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl Prompter for DialoguerPrompter {
    fn choose(&self, prompt: &str, choices: &[&str]) -> Result<usize, ApiError> {
        Select::new()
            .with_prompt(prompt)
            .items(choices)
            .default(choices.len().saturating_sub(1))
            .interact()
            .map_err(|e| ApiError::PromptFailed(e.to_string()))
    }
}

/// Ask a yes/no question; `true` means yes
pub fn confirm(prompter: &dyn Prompter, prompt: &str) -> Result<bool, ApiError> {
    const CHOICES: [&str; 2] = ["yes", "no"];
    let choice = prompter.choose(prompt, &CHOICES)?;
    Ok(CHOICES.get(choice) == Some(&"yes"))
}
