mod question;
mod reference;
mod settings;

pub use question::{Question, QuestionError};
pub use reference::reference_questions;
pub use settings::{DEFAULT_PASS_THRESHOLD, DEFAULT_TIME_LIMIT_SECS, QuizSettings, SettingsError};
