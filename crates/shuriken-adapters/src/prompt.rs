//! Non-interactive prompter fed from a script of answers.
//!
//! Used by tests and by the CLI when stdin is not a terminal.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use tracing::debug;

use shuriken_core::{
    application::{ApplicationError, ports::Prompter},
    error::ShurikenResult,
};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Answer {
    Text(String),
    Confirm(bool),
    Choice(usize),
}

/// Answers prompts in order from a prepared queue.
///
/// When the queue is empty, `input` falls back to its default, `confirm` to
/// its default, and `select` fails. Clones share the queue.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompter {
    answers: Arc<Mutex<VecDeque<Answer>>>,
}

impl ScriptedPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input(self, text: impl Into<String>) -> Self {
        self.push(Answer::Text(text.into()))
    }

    pub fn with_confirm(self, yes: bool) -> Self {
        self.push(Answer::Confirm(yes))
    }

    pub fn with_choice(self, index: usize) -> Self {
        self.push(Answer::Choice(index))
    }

    pub fn is_exhausted(&self) -> bool {
        self.answers.lock().map(|q| q.is_empty()).unwrap_or(true)
    }

    fn push(self, answer: Answer) -> Self {
        if let Ok(mut queue) = self.answers.lock() {
            queue.push_back(answer);
        }
        self
    }

    fn next(&self) -> ShurikenResult<Option<Answer>> {
        let mut queue = self
            .answers
            .lock()
            .map_err(|_| ApplicationError::StoreLockError)?;
        Ok(queue.pop_front())
    }
}

fn unexpected(message: &str, expected: &str, got: &Answer) -> ApplicationError {
    ApplicationError::PromptFailed {
        reason: format!("'{message}' expected {expected}, script has {got:?}"),
    }
}

impl Prompter for ScriptedPrompter {
    fn input(&self, message: &str, default: Option<String>) -> ShurikenResult<String> {
        match self.next()? {
            Some(Answer::Text(text)) => {
                debug!(prompt = message, answer = %text, "Scripted input");
                Ok(text)
            }
            Some(other) => Err(unexpected(message, "text", &other).into()),
            None => default.ok_or_else(|| {
                ApplicationError::PromptFailed {
                    reason: format!("no answer for '{message}'"),
                }
                .into()
            }),
        }
    }

    fn confirm(&self, message: &str, default: bool) -> ShurikenResult<bool> {
        match self.next()? {
            Some(Answer::Confirm(yes)) => Ok(yes),
            Some(other) => Err(unexpected(message, "yes/no", &other).into()),
            None => Ok(default),
        }
    }

    fn select(&self, message: &str, items: &[String]) -> ShurikenResult<usize> {
        match self.next()? {
            Some(Answer::Choice(index)) if index < items.len() => Ok(index),
            Some(other) => Err(unexpected(message, "a listed choice", &other).into()),
            None => Err(ApplicationError::PromptFailed {
                reason: format!("no answer for '{message}'"),
            }
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answers_in_order() {
        let p = ScriptedPrompter::new()
            .with_input("Button")
            .with_confirm(false)
            .with_choice(1);
        assert_eq!(p.input("name", None).unwrap(), "Button");
        assert!(!p.confirm("here?", true).unwrap());
        assert_eq!(p.select("pick", &["a".into(), "b".into()]).unwrap(), 1);
        assert!(p.is_exhausted());
    }

    #[test]
    fn empty_script_uses_defaults() {
        let p = ScriptedPrompter::new();
        assert_eq!(p.input("dir", Some("src".into())).unwrap(), "src");
        assert!(p.confirm("here?", true).unwrap());
        assert!(p.input("name", None).is_err());
        assert!(p.select("pick", &["a".into()]).is_err());
    }

    #[test]
    fn mismatched_answer_fails() {
        let p = ScriptedPrompter::new().with_confirm(true);
        assert!(p.input("name", None).is_err());
    }
}
