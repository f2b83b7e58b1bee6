//! Question bank.
//!
//! The bank is loaded once at startup and never mutated afterwards. Every
//! session gets a cheap `Arc` snapshot of it, answer key included, while
//! clients only ever see the [`PublicQuestion`] projection.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Answer index meaning "no determinable answer" (e.g. image-dependent questions).
pub const NO_ANSWER: i32 = -1;

const BUILTIN_QUESTIONS: &str = include_str!("../../data/questions.json");

/// A scored multiple-choice question, answer key included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: u32,
    pub question: String,
    pub options: Vec<String>,
    /// 0-based index into `options`, or [`NO_ANSWER`].
    pub answer: i32,
}

/// Client-facing view of a question. Has no answer field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicQuestion {
    pub id: u32,
    pub question: String,
    pub options: Vec<String>,
}

impl From<&Question> for PublicQuestion {
    fn from(q: &Question) -> Self {
        Self {
            id: q.id,
            question: q.question.clone(),
            options: q.options.clone(),
        }
    }
}

#[derive(Debug, Error)]
pub enum BankError {
    #[error("failed to read question bank {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse question bank: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("question bank is empty")]
    Empty,

    #[error("question id must be positive, got {0}")]
    InvalidId(u32),

    #[error("duplicate question id {0}")]
    DuplicateId(u32),

    #[error("question {id} has {count} option(s), at least 2 are required")]
    TooFewOptions { id: u32, count: usize },

    #[error("question {id} has answer index {answer} but only {count} options")]
    AnswerOutOfRange { id: u32, answer: i32, count: usize },
}

/// Immutable, shareable collection of scored questions.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    questions: Arc<[Question]>,
}

impl QuestionBank {
    /// The question bank compiled into the binary.
    pub fn builtin() -> Result<Self, BankError> {
        Self::from_json(BUILTIN_QUESTIONS)
    }

    /// Load a JSON array of questions from disk.
    pub fn from_file(path: &Path) -> Result<Self, BankError> {
        let content = std::fs::read_to_string(path).map_err(|source| BankError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self, BankError> {
        let questions: Vec<Question> = serde_json::from_str(json)?;
        Self::from_questions(questions)
    }

    pub fn from_questions(questions: Vec<Question>) -> Result<Self, BankError> {
        validate(&questions)?;
        Ok(Self {
            questions: questions.into(),
        })
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Shared handle to the full question set, answers included.
    pub fn snapshot(&self) -> Arc<[Question]> {
        Arc::clone(&self.questions)
    }

    pub fn public_view(&self) -> Vec<PublicQuestion> {
        self.questions.iter().map(PublicQuestion::from).collect()
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

fn validate(questions: &[Question]) -> Result<(), BankError> {
    if questions.is_empty() {
        return Err(BankError::Empty);
    }

    let mut seen = HashSet::with_capacity(questions.len());
    for q in questions {
        if q.id == 0 {
            return Err(BankError::InvalidId(q.id));
        }
        if !seen.insert(q.id) {
            return Err(BankError::DuplicateId(q.id));
        }
        if q.options.len() < 2 {
            return Err(BankError::TooFewOptions {
                id: q.id,
                count: q.options.len(),
            });
        }
        let in_range = usize::try_from(q.answer).is_ok_and(|idx| idx < q.options.len());
        if !in_range && q.answer != NO_ANSWER {
            return Err(BankError::AnswerOutOfRange {
                id: q.id,
                answer: q.answer,
                count: q.options.len(),
            });
        }
    }
    Ok(())
}
