// src/core/prompt.rs

use dialoguer::{Input, theme::ColorfulTheme};

/// Source of answers for interactive questions.
pub trait Prompter {
    /// Asks `prompt`, offering `default` when the user just presses enter.
    fn ask(&mut self, prompt: &str, default: Option<&str>) -> Result<String, dialoguer::Error>;
}

/// Asks on the terminal.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn ask(&mut self, prompt: &str, default: Option<&str>) -> Result<String, dialoguer::Error> {
        let theme = ColorfulTheme::default();
        let mut input = Input::<String>::with_theme(&theme)
            .with_prompt(prompt)
            .allow_empty(true);
        if let Some(default) = default {
            input = input.default(default.to_string());
        }
        input.interact_text()
    }
}

/// Never asks. Every question is answered with its default, or an empty string.
#[derive(Debug, Default)]
pub struct AutosolvePrompter;

impl Prompter for AutosolvePrompter {
    fn ask(&mut self, prompt: &str, default: Option<&str>) -> Result<String, dialoguer::Error> {
        log::debug!("Autosolving prompt '{}' with {:?}.", prompt, default);
        Ok(default.unwrap_or_default().to_string())
    }
}
