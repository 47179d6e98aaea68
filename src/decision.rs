use std::collections::VecDeque;
use std::fmt;

use crate::error::SafenamesError;
use crate::traits::DecisionSource;

/// A single keypress, as far as the confirmation protocol cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keystroke {
    Char(char),

    /// Enter / carriage return.
    Enter,

    /// Arrow keys, function keys, anything without a character.
    Other,
}

impl fmt::Display for Keystroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char(c) => write!(f, "{c}"),
            Self::Enter => f.write_str("y"),
            Self::Other => f.write_str("?"),
        }
    }
}

/// What the operator asked for in response to a proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accept,
    Decline,
    Retype,
    Delete,
}

impl From<Keystroke> for Decision {
    /// `y` and Enter accept, `t` retypes, `x` deletes, anything else declines.
    fn from(key: Keystroke) -> Self {
        match key {
            Keystroke::Enter => Self::Accept,
            Keystroke::Char(c) => match c.to_ascii_lowercase() {
                'y' | '\r' | '\n' => Self::Accept,
                't' => Self::Retype,
                'x' => Self::Delete,
                _ => Self::Decline,
            },
            Keystroke::Other => Self::Decline,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Step {
    Key(Keystroke),
    Name(String),
}

/// A decision source that replays a fixed script.
///
/// Running out of script is treated like the operator pressing Ctrl-C, so a
/// test that under-specifies its script fails loudly with
/// [`SafenamesError::Cancelled`] instead of hanging.
///
/// ```rust
/// use safenames::{DecisionSource, Keystroke, ScriptedDecisions};
///
/// let mut script = ScriptedDecisions::new().key('t').name("better.txt");
/// assert_eq!(script.read_decision().unwrap(), Keystroke::Char('t'));
/// assert_eq!(script.read_name("new filename", None).unwrap(), "better.txt");
/// assert!(script.is_exhausted());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScriptedDecisions {
    steps: VecDeque<Step>,
}

impl ScriptedDecisions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a keypress.
    pub fn key(mut self, c: char) -> Self {
        self.steps.push_back(Step::Key(Keystroke::Char(c)));
        self
    }

    /// Queue an Enter keypress.
    pub fn enter(mut self) -> Self {
        self.steps.push_back(Step::Key(Keystroke::Enter));
        self
    }

    /// Queue a typed name. An empty string takes the prompt's default.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.steps.push_back(Step::Name(name.into()));
        self
    }

    pub fn is_exhausted(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.steps.len()
    }
}

impl DecisionSource for ScriptedDecisions {
    fn read_decision(&mut self) -> Result<Keystroke, SafenamesError> {
        match self.steps.pop_front() {
            Some(Step::Key(key)) => Ok(key),
            Some(Step::Name(name)) => Err(SafenamesError::Prompt(format!(
                "script expected a keypress but holds name {name:?}"
            ))),
            None => Err(SafenamesError::Cancelled),
        }
    }

    fn read_name(
        &mut self,
        _prompt: &str,
        default: Option<&str>,
    ) -> Result<String, SafenamesError> {
        match self.steps.pop_front() {
            Some(Step::Name(name)) if name.is_empty() => {
                Ok(default.map(str::to_string).unwrap_or_default())
            }
            Some(Step::Name(name)) => Ok(name),
            Some(Step::Key(key)) => Err(SafenamesError::Prompt(format!(
                "script expected a name but holds keypress {key:?}"
            ))),
            None => Err(SafenamesError::Cancelled),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keystrokes_map_to_decisions() {
        assert_eq!(Decision::from(Keystroke::Enter), Decision::Accept);
        assert_eq!(Decision::from(Keystroke::Char('y')), Decision::Accept);
        assert_eq!(Decision::from(Keystroke::Char('Y')), Decision::Accept);
        assert_eq!(Decision::from(Keystroke::Char('\r')), Decision::Accept);
        assert_eq!(Decision::from(Keystroke::Char('t')), Decision::Retype);
        assert_eq!(Decision::from(Keystroke::Char('x')), Decision::Delete);
        assert_eq!(Decision::from(Keystroke::Char('n')), Decision::Decline);
        assert_eq!(Decision::from(Keystroke::Char('q')), Decision::Decline);
        assert_eq!(Decision::from(Keystroke::Other), Decision::Decline);
    }

    #[test]
    fn empty_script_cancels() {
        let mut script = ScriptedDecisions::new();
        assert!(matches!(script.read_decision(), Err(SafenamesError::Cancelled)));
        assert!(matches!(script.read_name("p", None), Err(SafenamesError::Cancelled)));
    }

    #[test]
    fn empty_name_takes_default() {
        let mut script = ScriptedDecisions::new().name("");
        assert_eq!(script.read_name("p", Some("CON_legal")).unwrap(), "CON_legal");
    }

    #[test]
    fn out_of_order_script_is_an_error() {
        let mut script = ScriptedDecisions::new().name("x");
        assert!(matches!(script.read_decision(), Err(SafenamesError::Prompt(_))));
    }
}
