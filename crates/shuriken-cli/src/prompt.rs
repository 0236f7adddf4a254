//! Terminal prompts for package commands.

use std::io::IsTerminal as _;

use shuriken_adapters::ScriptedPrompter;
use shuriken_core::application::ports::Prompter;

/// The prompter package actions get.
///
/// Without a terminal (or without the `interactive` feature) prompts resolve
/// to their defaults and fail when there is none.
pub fn for_terminal() -> Box<dyn Prompter> {
    #[cfg(feature = "interactive")]
    {
        if std::io::stdin().is_terminal() && std::io::stderr().is_terminal() {
            return Box::new(interactive::TerminalPrompter::new());
        }
    }
    tracing::debug!(
        stdin_is_terminal = std::io::stdin().is_terminal(),
        "Prompts will use their defaults"
    );
    Box::new(ScriptedPrompter::new())
}

#[cfg(feature = "interactive")]
mod interactive {
    use std::io;

    use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};

    use shuriken_core::{
        application::{ApplicationError, ports::Prompter},
        error::ShurikenResult,
    };

    /// Prompts on stderr via `dialoguer`.
    pub struct TerminalPrompter {
        theme: ColorfulTheme,
    }

    impl TerminalPrompter {
        pub fn new() -> Self {
            Self {
                theme: ColorfulTheme::default(),
            }
        }
    }

    fn map_err(err: dialoguer::Error) -> ApplicationError {
        match err {
            dialoguer::Error::IO(e) if e.kind() == io::ErrorKind::Interrupted => {
                ApplicationError::Cancelled
            }
            other => ApplicationError::PromptFailed {
                reason: other.to_string(),
            },
        }
    }

    impl Prompter for TerminalPrompter {
        fn input(&self, message: &str, default: Option<String>) -> ShurikenResult<String> {
            let mut input = Input::<String>::with_theme(&self.theme).with_prompt(message);
            if let Some(default) = default {
                input = input.default(default);
            }
            Ok(input.interact_text().map_err(map_err)?)
        }

        fn confirm(&self, message: &str, default: bool) -> ShurikenResult<bool> {
            Ok(Confirm::with_theme(&self.theme)
                .with_prompt(message)
                .default(default)
                .interact()
                .map_err(map_err)?)
        }

        fn select(&self, message: &str, items: &[String]) -> ShurikenResult<usize> {
            Ok(Select::with_theme(&self.theme)
                .with_prompt(message)
                .items(items)
                .default(0)
                .interact()
                .map_err(map_err)?)
        }
    }
}
