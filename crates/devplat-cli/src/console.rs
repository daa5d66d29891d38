//! Terminal console backed by dialoguer

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};
use devplat_core::{Console, Error, Result};
use std::io::ErrorKind;

/// Interactive [`Console`] on the controlling terminal.
#[derive(Default)]
pub struct DialoguerConsole {
    theme: ColorfulTheme,
}

impl DialoguerConsole {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Console for DialoguerConsole {
    fn select(&self, message: &str, options: &[String]) -> Result<usize> {
        Select::with_theme(&self.theme)
            .with_prompt(message)
            .items(options)
            .default(0)
            .interact()
            .map_err(console_error)
    }

    fn confirm(&self, message: &str, default: bool) -> Result<bool> {
        Confirm::with_theme(&self.theme)
            .with_prompt(message)
            .default(default)
            .interact()
            .map_err(console_error)
    }

    fn prompt(&self, message: &str, default: Option<&str>) -> Result<String> {
        let mut input = Input::<String>::with_theme(&self.theme)
            .with_prompt(message)
            .allow_empty(true);
        if let Some(default) = default {
            input = input.default(default.to_string());
        }
        input.interact_text().map_err(console_error)
    }

    fn message(&self, text: &str) {
        eprintln!("{}", text);
    }
}

fn console_error(error: dialoguer::Error) -> Error {
    match error {
        dialoguer::Error::IO(ref io) if io.kind() == ErrorKind::Interrupted => Error::Cancelled,
        other => Error::Console(other.to_string()),
    }
}
