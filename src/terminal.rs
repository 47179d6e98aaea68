use std::io::ErrorKind;

use console::{Key, Term};
use dialoguer::{Error as DialoguerError, Input};

use crate::decision::Keystroke;
use crate::error::SafenamesError;
use crate::traits::DecisionSource;

/// Reads decisions from the controlling terminal.
///
/// Keypresses are read raw: no echo from the terminal, no waiting for Enter.
/// The key is echoed back once it has been read. Ctrl-C cancels the audit.
/// Names are read line-buffered with an editable default.
pub struct TerminalDecisions {
    term: Term,
}

impl Default for TerminalDecisions {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalDecisions {
    pub fn new() -> Self {
        Self { term: Term::stdout() }
    }
}

impl DecisionSource for TerminalDecisions {
    fn read_decision(&mut self) -> Result<Keystroke, SafenamesError> {
        let key = self.term.read_key().map_err(|err| match err.kind() {
            ErrorKind::Interrupted => SafenamesError::Cancelled,
            _ => SafenamesError::Prompt(format!("failed to read keypress: {err}")),
        })?;

        let keystroke = match key {
            Key::Enter => Keystroke::Enter,
            Key::Char('\x03') => return Err(SafenamesError::Cancelled),
            Key::Char(c) => Keystroke::Char(c),
            _ => Keystroke::Other,
        };

        self.term
            .write_line(&keystroke.to_string())
            .map_err(|err| SafenamesError::Prompt(err.to_string()))?;
        Ok(keystroke)
    }

    fn read_name(&mut self, prompt: &str, default: Option<&str>) -> Result<String, SafenamesError> {
        let mut input = Input::<String>::new().with_prompt(prompt).allow_empty(true);
        if let Some(default) = default {
            input = input.default(default.to_string());
        }
        match input.interact_text_on(&self.term) {
            Ok(value) => Ok(value),
            Err(DialoguerError::IO(err)) if err.kind() == ErrorKind::Interrupted => {
                Err(SafenamesError::Cancelled)
            }
            Err(err) => Err(SafenamesError::Prompt(format!("failed to read name: {err}"))),
        }
    }
}
