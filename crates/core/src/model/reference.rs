use crate::model::{Question, QuestionError};

const REFERENCE_BANK: [(&str, [&str; 4], &str); 5] = [
    (
        "What is the correct file extension for Python files?",
        [".pyth", ".pt", ".py", ".pyt"],
        ".py",
    ),
    (
        "Which keyword is used to define a function in Python?",
        ["function", "def", "define", "fun"],
        "def",
    ),
    (
        "What is the output of print(2 ** 3)?",
        ["6", "8", "9", "5"],
        "8",
    ),
    (
        "Which data type is used to store True/False values?",
        ["int", "str", "bool", "float"],
        "bool",
    ),
    (
        "Which of the following is a loop in Python?",
        ["for", "foreach", "loop", "iterate"],
        "for",
    ),
];

/// The built-in beginner Python quiz, in canonical order.
///
/// # Errors
///
/// Returns `QuestionError` only if the built-in table is malformed.
pub fn reference_questions() -> Result<Vec<Question>, QuestionError> {
    REFERENCE_BANK
        .iter()
        .map(|(prompt, options, correct)| Question::new(*prompt, *options, *correct))
        .collect()
}
