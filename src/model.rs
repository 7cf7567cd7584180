//! The in-memory exam model and the question bank loader.
//!
//! A question bank is a JSON document:
//!
//! ```json
//! {
//!   "title": "Test Exam",
//!   "questions": [
//!     {
//!       "text": "What is 2 + 2?",
//!       "points": 2,
//!       "options": [
//!         { "text": "3", "is_correct": false },
//!         { "text": "4", "is_correct": true }
//!       ]
//!     }
//!   ]
//! }
//! ```

use crate::ExamError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exam {
    pub title: String,
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    pub points: Points,
    /// Printed in this order, labelled a, b, c, ...
    pub options: Vec<AnswerOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub text: String,
    pub is_correct: bool,
}

/// The score a question is worth. Whole numbers print without a fraction.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Points(pub f64);

impl fmt::Display for Points {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.fract() == 0.0 && self.0.abs() < 1e15 {
            write!(f, "{}", self.0 as i64)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl Exam {
    /// Parse a question bank from JSON text
    pub fn from_json(json: &str) -> Result<Exam, ExamError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a question bank file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Exam, ExamError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ExamError::BankUnreadable {
            path: path.to_owned(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| ExamError::BankMalformed {
            path: path.to_owned(),
            source,
        })
    }

    /// Check the preconditions of laying the exam out: every question has
    /// text, and no question has more options than there are `labels`.
    /// Question indices in errors are 1-based, in the current question order.
    pub fn validate(&self, labels: &[String]) -> Result<(), ExamError> {
        for (index, question) in self.questions.iter().enumerate() {
            let index = index + 1;
            if question.text.trim().is_empty() {
                return Err(ExamError::EmptyQuestion { index });
            }
            if question.options.len() > labels.len() {
                return Err(ExamError::TooManyOptions {
                    index,
                    count: question.options.len(),
                    available: labels.len(),
                });
            }
        }
        Ok(())
    }

    pub fn total_points(&self) -> Points {
        Points(self.questions.iter().map(|q| q.points.0).sum())
    }
}
