mod countdown;
mod score;
mod service;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use countdown::Countdown;
pub use score::{QuestionOutcome, ScoreReport};
pub use service::{QuizSession, SessionPhase, SubmitReason};
