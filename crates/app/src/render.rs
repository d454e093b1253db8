//! Plain-text screens for each session phase.

use std::fmt::Write;

use quiz_core::model::QuizSettings;
use services::{Countdown, QuestionOutcome, QuizSession, ScoreReport, SessionPhase};

const UNANSWERED_LABEL: &str = "Select an answer";

#[must_use]
pub fn intro(settings: &QuizSettings) -> String {
    format!(
        "Python Quiz for Beginners\nYou have {} seconds to complete the quiz. You need at least {}% to pass.\nType `start` to begin.",
        settings.time_limit_secs(),
        settings.pass_threshold()
    )
}

/// Whole screen for the session's current phase.
#[must_use]
pub fn screen(session: &QuizSession) -> String {
    match session.phase() {
        SessionPhase::Idle => intro(session.settings()),
        SessionPhase::InProgress => questions(session),
        SessionPhase::Submitted => match session.score() {
            Ok(report) => summary(report),
            Err(err) => err.to_string(),
        },
    }
}

#[must_use]
pub fn questions(session: &QuizSession) -> String {
    let mut out = String::from("Answer the following questions:\n");
    for (i, question) in session.working_questions().iter().enumerate() {
        let selected = session.answer(i);
        let _ = writeln!(out, "\nQ{}: {}", i + 1, question.prompt());
        let _ = writeln!(
            out,
            "   [{}] {UNANSWERED_LABEL}",
            if selected.is_none() { 'x' } else { ' ' }
        );
        for (j, option) in question.options().iter().enumerate() {
            let mark = if selected == Some(option.as_str()) { 'x' } else { ' ' };
            let _ = writeln!(out, "   [{mark}] {}. {option}", j + 1);
        }
    }

    let total = session.working_questions().len();
    if session.all_answered() {
        out.push_str("\nAll questions answered. Type `submit` to finish.");
    } else {
        let _ = write!(
            out,
            "\nAnswered {}/{total}. Submit unlocks once every question is answered.",
            session.answered_count()
        );
    }
    out
}

#[must_use]
pub fn countdown(reading: &Countdown) -> String {
    if reading.expired {
        "Time is up! Submitting automatically...".to_string()
    } else {
        format!("Time remaining: {} seconds", reading.remaining_secs)
    }
}

/// Whether a countdown line is worth printing on this tick.
#[must_use]
pub fn should_announce(reading: &Countdown) -> bool {
    reading.expired || reading.remaining_secs <= 10 || reading.remaining_secs % 15 == 0
}

#[must_use]
pub fn summary(report: &ScoreReport) -> String {
    let mut out = String::from("---\nResult Summary\n");
    for (i, outcome) in report.outcomes.iter().enumerate() {
        let n = i + 1;
        let _ = match outcome {
            QuestionOutcome::Correct => writeln!(out, "Q{n}: Correct"),
            QuestionOutcome::Incorrect { correct_option } => {
                writeln!(out, "Q{n}: Incorrect. Correct answer is {correct_option}")
            }
            QuestionOutcome::Unanswered { correct_option } => writeln!(
                out,
                "Q{n}: No answer selected. Correct answer is {correct_option}"
            ),
        };
    }

    let _ = writeln!(
        out,
        "\nYour Score: {:.2}% ({}/{})",
        report.percentage, report.correct_count, report.total
    );
    if report.passed {
        out.push_str("Congratulations! You passed the quiz.\n");
    } else {
        out.push_str("You failed the quiz. Please try again.\n");
    }
    out.push_str("Type `retry` to go again.");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(outcomes: Vec<QuestionOutcome>, correct_count: usize, passed: bool) -> ScoreReport {
        let total = outcomes.len();
        ScoreReport {
            correct_count,
            total,
            percentage: correct_count as f64 * 100.0 / total as f64,
            passed,
            outcomes,
        }
    }

    #[test]
    fn summary_flags_unanswered_apart_from_wrong() {
        let text = summary(&report(
            vec![
                QuestionOutcome::Correct,
                QuestionOutcome::Incorrect {
                    correct_option: "def".to_string(),
                },
                QuestionOutcome::Unanswered {
                    correct_option: "8".to_string(),
                },
            ],
            1,
            false,
        ));

        assert!(text.contains("Q1: Correct"));
        assert!(text.contains("Q2: Incorrect. Correct answer is def"));
        assert!(text.contains("Q3: No answer selected. Correct answer is 8"));
        assert!(text.contains("Your Score: 33.33% (1/3)"));
        assert!(text.contains("You failed the quiz"));
    }

    #[test]
    fn summary_reports_pass() {
        let text = summary(&report(vec![QuestionOutcome::Correct; 5], 5, true));
        assert!(text.contains("Your Score: 100.00% (5/5)"));
        assert!(text.contains("You passed"));
    }

    #[test]
    fn countdown_lines() {
        let running = Countdown {
            elapsed_secs: 59,
            remaining_secs: 1,
            expired: false,
        };
        assert_eq!(countdown(&running), "Time remaining: 1 seconds");
        assert!(should_announce(&running));

        let quiet = Countdown {
            elapsed_secs: 13,
            remaining_secs: 47,
            expired: false,
        };
        assert!(!should_announce(&quiet));
    }

    #[test]
    fn intro_mentions_limits() {
        let text = intro(&QuizSettings::default());
        assert!(text.contains("60 seconds"));
        assert!(text.contains("80%"));
    }
}
