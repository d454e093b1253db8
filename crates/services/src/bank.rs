use rand::seq::SliceRandom;
use rand::{Rng, rng};

use quiz_core::model::{Question, QuestionError, reference_questions};

use crate::error::BankError;

//
// ─── SHUFFLED QUESTION ─────────────────────────────────────────────────────────
//

/// Per-session copy of a bank question with its options permuted.
///
/// The correct option keeps its value; only its position may change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShuffledQuestion {
    prompt: String,
    options: Vec<String>,
    correct_option: String,
}

impl ShuffledQuestion {
    fn from_question<R: Rng + ?Sized>(question: &Question, rng: &mut R) -> Self {
        let mut options = question.options().to_vec();
        options.as_mut_slice().shuffle(rng);
        Self {
            prompt: question.prompt().to_string(),
            options,
            correct_option: question.correct_option().to_string(),
        }
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Options in session display order.
    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_option(&self) -> &str {
        &self.correct_option
    }

    #[must_use]
    pub fn contains(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }

    /// Display position of `option`, if it belongs to this question.
    #[must_use]
    pub fn position_of(&self, option: &str) -> Option<usize> {
        self.options.iter().position(|o| o == option)
    }

    #[must_use]
    pub fn is_correct(&self, answer: &str) -> bool {
        self.correct_option == answer
    }
}

//
// ─── BANK ──────────────────────────────────────────────────────────────────────
//

/// Immutable master list of questions.
#[derive(Debug, Clone)]
pub struct QuizBank {
    questions: Vec<Question>,
}

impl QuizBank {
    /// # Errors
    ///
    /// Returns `BankError::Empty` if no questions are given.
    pub fn new(questions: Vec<Question>) -> Result<Self, BankError> {
        if questions.is_empty() {
            return Err(BankError::Empty);
        }
        Ok(Self { questions })
    }

    /// The built-in five-question bank.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the built-in table fails validation.
    pub fn reference() -> Result<Self, QuestionError> {
        Ok(Self {
            questions: reference_questions()?,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Canonical question order.
    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Randomized working copy using the thread RNG.
    #[must_use]
    pub fn shuffled_set(&self) -> Vec<ShuffledQuestion> {
        self.shuffled_set_with(&mut rng())
    }

    /// Randomized working copy: question order and each question's option
    /// order are permuted independently. The bank itself is left untouched.
    pub fn shuffled_set_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<ShuffledQuestion> {
        let mut set: Vec<ShuffledQuestion> = self
            .questions
            .iter()
            .map(|q| ShuffledQuestion::from_question(q, rng))
            .collect();
        set.as_mut_slice().shuffle(rng);
        set
    }
}
