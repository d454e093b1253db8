#![forbid(unsafe_code)]

pub mod bank;
pub mod error;
pub mod sessions;

pub use quiz_core::Clock;
pub use sessions as session;

pub use bank::{QuizBank, ShuffledQuestion};
pub use error::{BankError, InvalidArgument, SessionError};

pub use sessions::{
    Countdown, QuestionOutcome, QuizSession, ScoreReport, SessionPhase, SubmitReason,
};
