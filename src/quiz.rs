//! Post-hoc extraction of quiz questions from a finished completion.
//!
//! The upstream model wraps its JSON array in prose, so the extractor
//! scans for the first balanced bracketed span and parses that.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Questions kept per quiz, however many the model produced.
pub const MAX_QUIZ_QUESTIONS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: [String; 4],
    pub correct: usize,
}

impl QuizQuestion {
    /// The option text at the correct index, if the index is in range.
    pub fn correct_option(&self) -> Option<&str> {
        self.options.get(self.correct).map(String::as_str)
    }

    pub fn is_correct(&self, answer: usize) -> bool {
        answer == self.correct
    }
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("no JSON array found in response")]
    MissingArray,
    #[error("embedded array is not a valid quiz payload: {0}")]
    InvalidJson(String),
    #[error("embedded array contains no questions")]
    EmptyArray,
}

/// Pull the quiz questions out of a completed text buffer.
///
/// Locates the first balanced `[...]` span, parses it as an array of
/// question records, and truncates to [`MAX_QUIZ_QUESTIONS`].
pub fn extract_questions(text: &str) -> Result<Vec<QuizQuestion>, ExtractError> {
    let span = locate_array(text).ok_or(ExtractError::MissingArray)?;
    let mut questions: Vec<QuizQuestion> =
        serde_json::from_str(span).map_err(|err| ExtractError::InvalidJson(err.to_string()))?;
    if questions.is_empty() {
        return Err(ExtractError::EmptyArray);
    }
    questions.truncate(MAX_QUIZ_QUESTIONS);
    Ok(questions)
}

/// The first balanced bracketed span, or None if no `[` ever closes.
///
/// Brackets inside JSON string literals do not count toward nesting.
fn locate_array(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }
    None
}
