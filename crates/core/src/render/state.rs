use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::RenderError;

/// Discriminant of [`PageState`], without the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Loading,
    Ready,
    NotFound,
    Error,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::Idle => "idle",
            Phase::Loading => "loading",
            Phase::Ready => "ready",
            Phase::NotFound => "not_found",
            Phase::Error => "error",
        };
        f.write_str(s)
    }
}

/// A transition the state machine does not allow.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Cannot {action} while {from}")]
pub struct TransitionError {
    pub from: Phase,
    pub action: &'static str,
}

/// What a page shows while its data is, or is not, available.
///
/// ```text
/// Idle --begin--> Loading --complete--> Ready | NotFound | Error
///   ^                                          |
///   +------------------reset-------------------+
/// ```
///
/// `Ready`, `NotFound` and `Error` end a render cycle. A new request or a
/// changed query resets to `Idle` before loading again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", content = "data", rename_all = "snake_case")]
pub enum PageState<T> {
    Idle,
    Loading,
    Ready(T),
    NotFound,
    Error,
}

impl<T> PageState<T> {
    pub fn phase(&self) -> Phase {
        match self {
            PageState::Idle => Phase::Idle,
            PageState::Loading => Phase::Loading,
            PageState::Ready(_) => Phase::Ready,
            PageState::NotFound => Phase::NotFound,
            PageState::Error => Phase::Error,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            PageState::Ready(_) | PageState::NotFound | PageState::Error
        )
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            PageState::Ready(data) => Some(data),
            _ => None,
        }
    }

    /// Idle -> Loading.
    pub fn begin(self) -> Result<Self, TransitionError> {
        match self {
            PageState::Idle => Ok(PageState::Loading),
            other => Err(TransitionError {
                from: other.phase(),
                action: "begin loading",
            }),
        }
    }

    /// Loading -> Ready / NotFound / Error.
    ///
    /// `Ok(None)` and not-found or parameter errors settle on `NotFound`;
    /// transport errors settle on `Error`.
    pub fn complete(self, outcome: Result<Option<T>, RenderError>) -> Result<Self, TransitionError> {
        match self {
            PageState::Loading => Ok(Self::terminal(outcome)),
            other => Err(TransitionError {
                from: other.phase(),
                action: "complete",
            }),
        }
    }

    /// Any state -> Idle.
    pub fn reset(self) -> Self {
        PageState::Idle
    }

    /// Runs a whole render cycle (Idle -> Loading -> terminal) for an
    /// outcome that is already known.
    pub fn settled(outcome: Result<Option<T>, RenderError>) -> Self {
        Self::terminal(outcome)
    }

    fn terminal(outcome: Result<Option<T>, RenderError>) -> Self {
        match outcome {
            Ok(Some(data)) => PageState::Ready(data),
            Ok(None) => PageState::NotFound,
            Err(err) if err.is_not_found() => PageState::NotFound,
            Err(_) => PageState::Error,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> PageState<U> {
        match self {
            PageState::Idle => PageState::Idle,
            PageState::Loading => PageState::Loading,
            PageState::Ready(data) => PageState::Ready(f(data)),
            PageState::NotFound => PageState::NotFound,
            PageState::Error => PageState::Error,
        }
    }
}

impl<T> Default for PageState<T> {
    fn default() -> Self {
        PageState::Idle
    }
}
