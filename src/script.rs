//! Interaction scripts for replaying visitor behavior against a carousel.
//!
//! A script is a list of `AT:ACTION` steps, `AT` in milliseconds of virtual
//! time since the carousel was created:
//!
//! ```text
//! 1500:next      arrow click forward
//! 2000:prev      arrow click back
//! 2500:select=3  indicator click
//! 3000:goto=0    programmatic jump, no cooldown
//! 3500:hover     pointer enters the slider
//! 9000:unhover   pointer leaves
//! 12000:teardown host view unmounts
//! ```
//!
//! Steps are replayed in time order. Steps sharing a timestamp keep the order
//! they were given in.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScriptError {
    #[error("Invalid step `{step}`: {reason}")]
    Syntax { step: String, reason: String },
}

fn syntax(step: &str, reason: impl Into<String>) -> ScriptError {
    ScriptError::Syntax {
        step: step.to_string(),
        reason: reason.into(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "index", rename_all = "snake_case")]
pub enum Action {
    Next,
    Previous,
    GoTo(usize),
    Select(usize),
    Hover,
    Unhover,
    Teardown,
}

impl FromStr for Action {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, arg) = match s.split_once('=') {
            Some((name, arg)) => (name, Some(arg)),
            None => (s, None),
        };
        let index = |arg: Option<&str>| -> Result<usize, ScriptError> {
            let arg = arg.ok_or_else(|| {
                syntax(s, format!("`{name}` needs an index, e.g. `{name}=2`"))
            })?;
            arg.parse::<usize>()
                .map_err(|_| syntax(s, format!("`{arg}` is not a slide index")))
        };
        let action = match name {
            "next" => Action::Next,
            "prev" | "previous" => Action::Previous,
            "goto" => Action::GoTo(index(arg)?),
            "select" => Action::Select(index(arg)?),
            "hover" => Action::Hover,
            "unhover" => Action::Unhover,
            "teardown" => Action::Teardown,
            other => return Err(syntax(s, format!("unknown action `{other}`"))),
        };
        if arg.is_some() && !matches!(action, Action::GoTo(_) | Action::Select(_)) {
            return Err(syntax(s, format!("`{name}` takes no argument")));
        }
        Ok(action)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Next => write!(f, "next"),
            Action::Previous => write!(f, "prev"),
            Action::GoTo(i) => write!(f, "goto={i}"),
            Action::Select(i) => write!(f, "select={i}"),
            Action::Hover => write!(f, "hover"),
            Action::Unhover => write!(f, "unhover"),
            Action::Teardown => write!(f, "teardown"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Step {
    pub at_ms: u64,
    pub action: Action,
}

impl FromStr for Step {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (at, action) = trimmed
            .split_once(':')
            .ok_or_else(|| syntax(s, "expected AT:ACTION"))?;
        let at_ms = at
            .trim()
            .parse::<u64>()
            .map_err(|_| syntax(s, format!("`{at}` is not a time in milliseconds")))?;
        let action = action.trim().parse::<Action>().map_err(|err| match err {
            ScriptError::Syntax { reason, .. } => syntax(s, reason),
        })?;
        Ok(Step { at_ms, action })
    }
}

/// Parse and time-order a list of steps.
pub fn parse_script<S: AsRef<str>>(steps: &[S]) -> Result<Vec<Step>, ScriptError> {
    let mut parsed = steps
        .iter()
        .map(|s| s.as_ref().parse())
        .collect::<Result<Vec<Step>, _>>()?;
    // Stable: same-time steps keep their given order
    parsed.sort_by_key(|step| step.at_ms);
    Ok(parsed)
}
