//! Shared error types for the services crate.

use thiserror::Error;

use crate::sessions::SessionPhase;

/// Errors emitted while building a `QuizBank`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BankError {
    #[error("a quiz bank needs at least one question")]
    Empty,
}

/// Malformed arguments passed to a session operation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InvalidArgument {
    #[error("question index {index} is out of range (session has {len} questions)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("{option:?} is not an option of question {index}")]
    UnknownOption { index: usize, option: String },
}

/// Errors emitted by `QuizSession`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("cannot {operation} while the session is {phase}")]
    InvalidState {
        operation: &'static str,
        phase: SessionPhase,
    },
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgument),
}
