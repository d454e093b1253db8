use quiz_core::model::QuizSettings;

use crate::bank::ShuffledQuestion;

/// How a single working question was answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionOutcome {
    Correct,
    Incorrect { correct_option: String },
    /// No option was chosen. Scored like a wrong answer but reported apart.
    Unanswered { correct_option: String },
}

impl QuestionOutcome {
    fn classify(question: &ShuffledQuestion, answer: Option<&str>) -> Self {
        match answer {
            None => Self::Unanswered {
                correct_option: question.correct_option().to_string(),
            },
            Some(answer) if question.is_correct(answer) => Self::Correct,
            Some(_) => Self::Incorrect {
                correct_option: question.correct_option().to_string(),
            },
        }
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        matches!(self, Self::Correct)
    }
}

/// Final grading of a submitted session.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreReport {
    pub correct_count: usize,
    pub total: usize,
    pub percentage: f64,
    pub passed: bool,
    pub outcomes: Vec<QuestionOutcome>,
}

impl ScoreReport {
    pub(crate) fn tally(
        questions: &[ShuffledQuestion],
        answers: &[Option<String>],
        settings: &QuizSettings,
    ) -> Self {
        let outcomes: Vec<QuestionOutcome> = questions
            .iter()
            .enumerate()
            .map(|(i, q)| QuestionOutcome::classify(q, answers.get(i).and_then(Option::as_deref)))
            .collect();

        let correct_count = outcomes.iter().filter(|o| o.is_correct()).count();
        let total = outcomes.len();
        let percentage = percentage(correct_count, total);

        Self {
            correct_count,
            total,
            percentage,
            passed: settings.passes(percentage),
            outcomes,
        }
    }

    #[must_use]
    pub fn incorrect_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, QuestionOutcome::Incorrect { .. }))
            .count()
    }

    #[must_use]
    pub fn unanswered_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, QuestionOutcome::Unanswered { .. }))
            .count()
    }
}

#[allow(clippy::cast_precision_loss)]
fn percentage(correct: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (correct as f64 * 100.0) / total as f64
}
