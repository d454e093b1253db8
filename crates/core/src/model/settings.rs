use thiserror::Error;

/// Seconds a quiz attempt may run before it is submitted automatically.
pub const DEFAULT_TIME_LIMIT_SECS: u32 = 60;

/// Minimum percentage (inclusive) needed to pass.
pub const DEFAULT_PASS_THRESHOLD: f64 = 80.0;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("time limit must be > 0 seconds")]
    InvalidTimeLimit,

    #[error("pass threshold must be a percentage in [0, 100], got {0}")]
    InvalidPassThreshold(f64),
}

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

/// Timing and grading configuration for a quiz session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuizSettings {
    time_limit_secs: u32,
    pass_threshold: f64,
}

impl QuizSettings {
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidTimeLimit` for a zero time limit and
    /// `SettingsError::InvalidPassThreshold` for a threshold outside `[0, 100]`.
    pub fn new(time_limit_secs: u32, pass_threshold: f64) -> Result<Self, SettingsError> {
        if time_limit_secs == 0 {
            return Err(SettingsError::InvalidTimeLimit);
        }
        if !pass_threshold.is_finite() || !(0.0..=100.0).contains(&pass_threshold) {
            return Err(SettingsError::InvalidPassThreshold(pass_threshold));
        }

        Ok(Self {
            time_limit_secs,
            pass_threshold,
        })
    }

    #[must_use]
    pub fn time_limit_secs(&self) -> u32 {
        self.time_limit_secs
    }

    #[must_use]
    pub fn pass_threshold(&self) -> f64 {
        self.pass_threshold
    }

    /// Whether `percentage` meets the pass threshold. The boundary passes.
    #[must_use]
    pub fn passes(&self, percentage: f64) -> bool {
        percentage >= self.pass_threshold
    }
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            time_limit_secs: DEFAULT_TIME_LIMIT_SECS,
            pass_threshold: DEFAULT_PASS_THRESHOLD,
        }
    }
}
