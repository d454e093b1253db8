use std::fmt;

use chrono::{DateTime, Utc};
use log::{debug, info};
use quiz_core::model::QuizSettings;
use quiz_core::time::elapsed_secs;

use super::countdown::Countdown;
use super::score::ScoreReport;
use crate::Clock;
use crate::bank::{QuizBank, ShuffledQuestion};
use crate::error::{InvalidArgument, SessionError};

//
// ─── PHASE ─────────────────────────────────────────────────────────────────────
//

/// Lifecycle of a quiz attempt.
///
/// `Idle -> InProgress -> Submitted -> Idle`; `restart` also abandons an
/// in-progress attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    Idle,
    InProgress,
    Submitted,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionPhase::Idle => write!(f, "idle"),
            SessionPhase::InProgress => write!(f, "in progress"),
            SessionPhase::Submitted => write!(f, "submitted"),
        }
    }
}

/// Why a session was submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitReason {
    /// The user asked to submit; every question must be answered.
    Manual,
    /// The time limit ran out; unanswered questions score as incorrect.
    Timeout,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// State machine and scoring authority for one quiz attempt.
///
/// The driver owns the session and serializes every call into it: user input
/// and periodic `tick`s alike. Nothing here blocks or sleeps.
pub struct QuizSession {
    bank: QuizBank,
    settings: QuizSettings,
    clock: Clock,
    phase: SessionPhase,
    questions: Vec<ShuffledQuestion>,
    answers: Vec<Option<String>>,
    started_at: Option<DateTime<Utc>>,
    submitted_at: Option<DateTime<Utc>>,
    submit_reason: Option<SubmitReason>,
    score: Option<ScoreReport>,
}

impl QuizSession {
    #[must_use]
    pub fn new(bank: QuizBank, settings: QuizSettings) -> Self {
        Self {
            bank,
            settings,
            clock: Clock::default_clock(),
            phase: SessionPhase::Idle,
            questions: Vec::new(),
            answers: Vec::new(),
            started_at: None,
            submitted_at: None,
            submit_reason: None,
            score: None,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    #[must_use]
    pub fn bank(&self) -> &QuizBank {
        &self.bank
    }

    /// Working question list in session order. Empty while idle.
    #[must_use]
    pub fn working_questions(&self) -> &[ShuffledQuestion] {
        &self.questions
    }

    /// Selected option per working question; `None` means unanswered.
    #[must_use]
    pub fn answers(&self) -> &[Option<String>] {
        &self.answers
    }

    #[must_use]
    pub fn answer(&self, index: usize) -> Option<&str> {
        self.answers.get(index).and_then(Option::as_deref)
    }

    /// Working question at `index` of the running attempt.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidState` unless the session is in progress.
    /// Returns `SessionError::InvalidArgument` for an out-of-range index.
    pub fn question(&self, index: usize) -> Result<&ShuffledQuestion, SessionError> {
        self.ensure_in_progress("read a question")?;
        self.question_at(index)
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_some()).count()
    }

    /// True when every working question has a selected option.
    #[must_use]
    pub fn all_answered(&self) -> bool {
        self.answers.iter().all(Option::is_some)
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn submitted_at(&self) -> Option<DateTime<Utc>> {
        self.submitted_at
    }

    #[must_use]
    pub fn submit_reason(&self) -> Option<SubmitReason> {
        self.submit_reason
    }

    /// Begin a fresh attempt with a newly shuffled working set.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidState` if an attempt is already in progress.
    pub fn start(&mut self) -> Result<(), SessionError> {
        if self.phase == SessionPhase::InProgress {
            return Err(self.invalid_state("start"));
        }

        self.reset();
        self.questions = self.bank.shuffled_set();
        self.answers = vec![None; self.questions.len()];
        self.started_at = Some(self.clock.now());
        self.phase = SessionPhase::InProgress;

        debug!(
            "quiz started with {} questions, {}s limit",
            self.questions.len(),
            self.settings.time_limit_secs()
        );
        Ok(())
    }

    /// Select `option` for the working question at `index`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidState` unless the session is in progress.
    /// Returns `SessionError::InvalidArgument` for an out-of-range index or an
    /// option that does not belong to that question.
    pub fn record_answer(&mut self, index: usize, option: &str) -> Result<(), SessionError> {
        self.ensure_in_progress("record an answer")?;
        let question = self.question_at(index)?;
        if !question.contains(option) {
            return Err(InvalidArgument::UnknownOption {
                index,
                option: option.to_string(),
            }
            .into());
        }

        debug!("answer {index} set to {option:?}");
        self.answers[index] = Some(option.to_string());
        Ok(())
    }

    /// Reset the answer at `index` back to unanswered.
    ///
    /// # Errors
    ///
    /// Same preconditions as [`QuizSession::record_answer`].
    pub fn clear_answer(&mut self, index: usize) -> Result<(), SessionError> {
        self.ensure_in_progress("clear an answer")?;
        self.question_at(index)?;

        debug!("answer {index} cleared");
        self.answers[index] = None;
        Ok(())
    }

    /// Finish the attempt and grade it.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidState` unless the session is in progress,
    /// or for a manual submission while any question is unanswered.
    pub fn submit(&mut self, reason: SubmitReason) -> Result<&ScoreReport, SessionError> {
        self.ensure_in_progress("submit")?;
        if reason == SubmitReason::Manual && !self.all_answered() {
            return Err(self.invalid_state("submit with unanswered questions"));
        }

        let report = ScoreReport::tally(&self.questions, &self.answers, &self.settings);
        info!(
            "quiz submitted ({reason:?}): {}/{} correct, {:.2}%, passed={}",
            report.correct_count, report.total, report.percentage, report.passed
        );

        self.phase = SessionPhase::Submitted;
        self.submitted_at = Some(self.clock.now());
        self.submit_reason = Some(reason);
        Ok(self.score.insert(report))
    }

    /// Score of the submitted attempt.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidState` unless the session was submitted.
    pub fn score(&self) -> Result<&ScoreReport, SessionError> {
        match (&self.phase, &self.score) {
            (SessionPhase::Submitted, Some(report)) => Ok(report),
            _ => Err(self.invalid_state("read the score")),
        }
    }

    /// Evaluate the countdown at `now`. Does not change phase: when the
    /// reading is `expired`, the driver is expected to `submit(Timeout)`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidState` unless the session is in progress.
    pub fn tick(&self, now: DateTime<Utc>) -> Result<Countdown, SessionError> {
        self.ensure_in_progress("tick")?;
        let Some(started_at) = self.started_at else {
            return Err(self.invalid_state("tick"));
        };
        Ok(Countdown::new(
            self.settings.time_limit_secs(),
            elapsed_secs(started_at, now),
        ))
    }

    /// Seconds left at `now`, or `None` when no attempt is running.
    #[must_use]
    pub fn remaining(&self, now: DateTime<Utc>) -> Option<u64> {
        self.tick(now).ok().map(|c| c.remaining_secs)
    }

    /// Discard all working state and return to idle. Always succeeds.
    pub fn restart(&mut self) {
        if self.phase == SessionPhase::InProgress {
            debug!("abandoning in-progress quiz");
        }
        self.reset();
        debug!("quiz reset to idle");
    }

    fn reset(&mut self) {
        self.phase = SessionPhase::Idle;
        self.questions.clear();
        self.answers.clear();
        self.started_at = None;
        self.submitted_at = None;
        self.submit_reason = None;
        self.score = None;
    }

    fn question_at(&self, index: usize) -> Result<&ShuffledQuestion, SessionError> {
        self.questions.get(index).ok_or_else(|| {
            InvalidArgument::IndexOutOfRange {
                index,
                len: self.questions.len(),
            }
            .into()
        })
    }

    fn ensure_in_progress(&self, operation: &'static str) -> Result<(), SessionError> {
        if self.phase == SessionPhase::InProgress {
            Ok(())
        } else {
            Err(self.invalid_state(operation))
        }
    }

    fn invalid_state(&self, operation: &'static str) -> SessionError {
        SessionError::InvalidState {
            operation,
            phase: self.phase,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use quiz_core::time::{fixed_clock, fixed_now};

    fn session() -> QuizSession {
        QuizSession::new(QuizBank::reference().unwrap(), QuizSettings::default())
            .with_clock(fixed_clock())
    }

    fn answer_all_correctly(session: &mut QuizSession) {
        let correct: Vec<String> = session
            .working_questions()
            .iter()
            .map(|q| q.correct_option().to_string())
            .collect();
        for (i, option) in correct.iter().enumerate() {
            session.record_answer(i, option).unwrap();
        }
    }

    #[test]
    fn start_builds_fresh_working_set() {
        let mut s = session();
        s.start().unwrap();
        assert_eq!(s.phase(), SessionPhase::InProgress);
        assert_eq!(s.working_questions().len(), 5);
        assert_eq!(s.answers(), vec![None; 5].as_slice());
        assert_eq!(s.started_at(), Some(fixed_now()));
        assert!(!s.all_answered());
    }

    #[test]
    fn start_permutes_bank_questions_and_options() {
        let mut s = session();
        s.start().unwrap();

        let mut got: Vec<(String, Vec<String>)> = s
            .working_questions()
            .iter()
            .map(|q| {
                let mut options = q.options().to_vec();
                options.sort();
                (q.prompt().to_string(), options)
            })
            .collect();
        let mut want: Vec<(String, Vec<String>)> = s
            .bank()
            .questions()
            .iter()
            .map(|q| {
                let mut options = q.options().to_vec();
                options.sort();
                (q.prompt().to_string(), options)
            })
            .collect();
        got.sort();
        want.sort();

        assert_eq!(got.len(), s.bank().len());
        assert_eq!(got, want);
    }

    #[test]
    fn question_checks_phase_and_index() {
        let mut s = session();
        assert!(matches!(
            s.question(0),
            Err(SessionError::InvalidState {
                phase: SessionPhase::Idle,
                ..
            })
        ));

        s.start().unwrap();
        assert_eq!(s.question(4).unwrap(), &s.working_questions()[4]);
        assert_eq!(
            s.question(5).unwrap_err(),
            SessionError::InvalidArgument(InvalidArgument::IndexOutOfRange { index: 5, len: 5 })
        );
    }

    #[test]
    fn start_twice_is_rejected() {
        let mut s = session();
        s.start().unwrap();
        let err = s.start().unwrap_err();
        assert_eq!(
            err,
            SessionError::InvalidState {
                operation: "start",
                phase: SessionPhase::InProgress
            }
        );
    }

    #[test]
    fn start_from_submitted_clears_previous_attempt() {
        let mut s = session();
        s.start().unwrap();
        answer_all_correctly(&mut s);
        s.submit(SubmitReason::Manual).unwrap();

        s.start().unwrap();
        assert_eq!(s.answered_count(), 0);
        assert!(s.score().is_err());
        assert_eq!(s.submit_reason(), None);
    }

    #[test]
    fn record_answer_requires_in_progress() {
        let mut s = session();
        let err = s.record_answer(0, ".py").unwrap_err();
        assert!(matches!(
            err,
            SessionError::InvalidState {
                phase: SessionPhase::Idle,
                ..
            }
        ));
    }

    #[test]
    fn record_answer_validates_index_and_option() {
        let mut s = session();
        s.start().unwrap();

        let err = s.record_answer(5, "def").unwrap_err();
        assert_eq!(
            err,
            SessionError::InvalidArgument(InvalidArgument::IndexOutOfRange { index: 5, len: 5 })
        );

        let err = s.record_answer(0, "not an option").unwrap_err();
        assert!(matches!(
            err,
            SessionError::InvalidArgument(InvalidArgument::UnknownOption { index: 0, .. })
        ));
        assert_eq!(s.answered_count(), 0);
    }

    #[test]
    fn answers_can_be_changed_and_cleared() {
        let mut s = session();
        s.start().unwrap();
        let options = s.working_questions()[0].options().to_vec();

        s.record_answer(0, &options[0]).unwrap();
        s.record_answer(0, &options[1]).unwrap();
        assert_eq!(s.answer(0), Some(options[1].as_str()));

        s.clear_answer(0).unwrap();
        assert_eq!(s.answer(0), None);
    }

    #[test]
    fn manual_submit_requires_all_answers() {
        let mut s = session();
        s.start().unwrap();
        let first = s.working_questions()[0].correct_option().to_string();
        s.record_answer(0, &first).unwrap();

        let err = s.submit(SubmitReason::Manual).unwrap_err();
        assert!(matches!(err, SessionError::InvalidState { .. }));
        assert_eq!(s.phase(), SessionPhase::InProgress);
    }

    #[test]
    fn timeout_submit_ignores_missing_answers() {
        let mut s = session();
        s.start().unwrap();
        let report = s.submit(SubmitReason::Timeout).unwrap().clone();
        assert_eq!(report.correct_count, 0);
        assert_eq!(report.unanswered_count(), 5);
        assert_eq!(s.phase(), SessionPhase::Submitted);
        assert_eq!(s.submit_reason(), Some(SubmitReason::Timeout));
    }

    #[test]
    fn score_is_only_available_after_submit() {
        let mut s = session();
        assert!(s.score().is_err());
        s.start().unwrap();
        assert!(s.score().is_err());
        answer_all_correctly(&mut s);
        s.submit(SubmitReason::Manual).unwrap();
        let report = s.score().unwrap();
        assert_eq!(report.correct_count, 5);
        assert!(report.passed);
    }

    #[test]
    fn submit_twice_is_rejected() {
        let mut s = session();
        s.start().unwrap();
        s.submit(SubmitReason::Timeout).unwrap();
        assert!(s.submit(SubmitReason::Timeout).is_err());
        assert!(s.record_answer(0, "def").is_err());
    }

    #[test]
    fn tick_reports_remaining_time() {
        let mut s = session();
        s.start().unwrap();
        let start = fixed_now();

        let c = s.tick(start + Duration::seconds(59)).unwrap();
        assert_eq!(c.remaining_secs, 1);
        assert!(!c.expired);

        let c = s.tick(start + Duration::seconds(60)).unwrap();
        assert_eq!(c.remaining_secs, 0);
        assert!(c.expired);

        let c = s.tick(start + Duration::seconds(120)).unwrap();
        assert_eq!(c.elapsed_secs, 120);
        assert!(c.expired);
        assert_eq!(s.phase(), SessionPhase::InProgress);
    }

    #[test]
    fn tick_outside_attempt_is_rejected() {
        let s = session();
        assert!(s.tick(fixed_now()).is_err());
        assert_eq!(s.remaining(fixed_now()), None);
    }

    #[test]
    fn restart_from_every_phase_returns_to_idle() {
        let mut s = session();
        s.restart();
        assert_eq!(s.phase(), SessionPhase::Idle);

        s.start().unwrap();
        s.restart();
        assert_eq!(s.phase(), SessionPhase::Idle);
        assert!(s.working_questions().is_empty());
        assert!(s.answers().is_empty());
        assert_eq!(s.started_at(), None);

        s.start().unwrap();
        s.submit(SubmitReason::Timeout).unwrap();
        s.restart();
        assert_eq!(s.phase(), SessionPhase::Idle);
        assert!(s.score().is_err());
    }

    #[test]
    fn invalid_state_message_names_the_phase() {
        let s = session();
        let err = s.score().unwrap_err();
        assert_eq!(err.to_string(), "cannot read the score while the session is idle");
    }
}
