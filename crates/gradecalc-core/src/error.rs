//! Calculator error types.
//!
//! The calculator only ever reports two things to the user: input that is
//! outside its declared domain, and a collection with nothing valid in it.
//! Neither is fatal; callers render the message and keep going.

use thiserror::Error;

use crate::model::Mode;

/// Errors surfaced by the sheets and aggregators.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// User input outside declared domain or count bounds.
    #[error("{message}")]
    Validation { message: String },

    /// Zero valid rows or semesters across the whole collection.
    #[error("{}", empty_result_message(*mode))]
    EmptyResult { mode: Mode },
}

impl CalcError {
    pub fn validation(message: impl Into<String>) -> Self {
        CalcError::Validation {
            message: message.into(),
        }
    }

    /// Returns `true` if nothing in the collection was valid.
    pub fn is_empty_result(&self) -> bool {
        matches!(self, CalcError::EmptyResult { .. })
    }

    /// Returns `true` for out-of-domain input.
    pub fn is_validation(&self) -> bool {
        matches!(self, CalcError::Validation { .. })
    }
}

fn empty_result_message(mode: Mode) -> &'static str {
    match mode {
        Mode::Gpa => "Please enter valid marks (0-100) and credits for at least one subject.",
        Mode::Cgpa => "Please enter valid data for at least one semester.",
    }
}
