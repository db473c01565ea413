use colored::*;
use dialoguer::{Input, Select};
use log::debug;

use crate::error::Result;

/// Source of answers for the questions a run asks.
///
/// The interactive implementation talks to the terminal; `AssumeYes` backs
/// `--yes`; tests supply scripted answers.
pub trait Prompter {
    /// Yes/no question. `default_yes` is the pre-selected answer.
    fn confirm(&mut self, prompt: &str, default_yes: bool) -> Result<bool>;

    /// Free-text question; an empty answer yields `default`.
    fn text(&mut self, prompt: &str, default: &str) -> Result<String>;
}

/// Arrow-key prompts on the attached terminal.
#[derive(Debug, Default)]
pub struct Interactive;

impl Prompter for Interactive {
    fn confirm(&mut self, prompt: &str, default_yes: bool) -> Result<bool> {
        prompt_confirmation(prompt, default_yes)
    }

    fn text(&mut self, prompt: &str, default: &str) -> Result<String> {
        text_input(prompt, Some(default))
    }
}

/// Non-interactive answers: every confirmation is "yes", every text
/// question takes its default.
#[derive(Debug, Default)]
pub struct AssumeYes;

impl Prompter for AssumeYes {
    fn confirm(&mut self, prompt: &str, _default_yes: bool) -> Result<bool> {
        debug!("Auto-confirming: {}", prompt);
        println!("{} {}", prompt.bright_blue(), "yes".bold());
        Ok(true)
    }

    fn text(&mut self, prompt: &str, default: &str) -> Result<String> {
        debug!("Using default '{}' for: {}", default, prompt);
        println!("{} {}", prompt.bright_blue(), default.bold());
        Ok(default.to_string())
    }
}

/// Interactive confirmation prompt using arrow-key navigable selection
///
/// # Arguments
/// * `prompt` - The question to ask the user
/// * `default_yes` - Whether "Yes" should be the default selection (index 0)
///
/// # Returns
/// * `Ok(true)` if user selects "Yes"
/// * `Ok(false)` if user selects "No"
pub fn prompt_confirmation(prompt: &str, default_yes: bool) -> Result<bool> {
    let items = vec!["Yes", "No"];
    let default_index = if default_yes { 0 } else { 1 };

    let selection = Select::new()
        .with_prompt(prompt)
        .items(&items)
        .default(default_index)
        .interact()?;

    Ok(selection == 0)
}

/// Simple text input prompt with optional default value
pub fn text_input(prompt: &str, default: Option<&str>) -> Result<String> {
    let mut input_prompt = Input::<String>::new().with_prompt(prompt);

    if let Some(default_val) = default {
        input_prompt = input_prompt.default(default_val.to_string());
    }

    Ok(input_prompt.interact_text()?.trim().to_string())
}

pub fn prompt_use_dropbox_root(root: &str) -> String {
    format!("Identified Dropbox path: '{}'. Use this path?", root)
}

pub fn prompt_library_folder() -> &'static str {
    "Please specify the desired Dropbox library folder"
}

pub fn prompt_store_under(target: &str) -> String {
    format!("Storing library under '{}'. Continue?", target)
}

pub fn prompt_migrate_now() -> &'static str {
    "Migrate local library to Dropbox now?"
}

pub fn prompt_overwrite_local(target: &str) -> String {
    format!(
        "Found existing Rekordbox Library files in '{}'. Overwrite local database?",
        target
    )
}

pub fn prompt_deactivate_agent() -> &'static str {
    "This will prevent the Rekordbox Agent from system startup. Continue?"
}
