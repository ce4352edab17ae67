//! # Content Validation
//!
//! Checks a content tree against the course schema and reports every defect
//! with a locatable path. Validation never fails: malformed input becomes an
//! `INVALID_STRUCTURE` entry in the report.
//!
//! ## Modules
//!
//! - **`walk`**: the depth-first, pre-order pass shared with the id registry
//!
//! Errors appear in the order the walk meets them, so two runs over the same
//! input produce identical reports.

pub(crate) mod walk;

use std::fmt;

use serde::Serialize;

use crate::models::CourseTranslationMap;
use crate::path::ContentPath;
use crate::value::ContentValue;

/// Kinds of content-authoring defect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Two siblings share a key or id
    DuplicateId,
    /// `answerIndex` does not point into `options`
    InvalidAnswerIndex,
    /// Fewer than two options on a question
    InsufficientOptions,
    /// Block `type` missing or not one of quiz, terminal, explorer
    UnknownBlockType,
    /// Lesson has neither content nor blocks
    EmptyContent,
    /// Node has the wrong JSON shape
    InvalidStructure,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::DuplicateId => "DUPLICATE_ID",
            ErrorKind::InvalidAnswerIndex => "INVALID_ANSWER_INDEX",
            ErrorKind::InsufficientOptions => "INSUFFICIENT_OPTIONS",
            ErrorKind::UnknownBlockType => "UNKNOWN_BLOCK_TYPE",
            ErrorKind::EmptyContent => "EMPTY_CONTENT",
            ErrorKind::InvalidStructure => "INVALID_STRUCTURE",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub path: String,
    pub kind: ErrorKind,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: &ContentPath, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            path: path.as_str().to_string(),
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.path.is_empty() {
            "<root>"
        } else {
            &self.path
        };
        write!(f, "[{}] {}: {}", self.kind, path, self.message)
    }
}

/// Outcome of validating a content tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
}

impl ValidationReport {
    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    pub fn errors_of_kind(&self, kind: ErrorKind) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter().filter(move |e| e.kind == kind)
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::from_errors(Vec::new())
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.valid {
            return writeln!(f, "valid: no errors");
        }
        let noun = if self.errors.len() == 1 {
            "error"
        } else {
            "errors"
        };
        writeln!(f, "invalid: {} {}", self.errors.len(), noun)?;
        for error in &self.errors {
            writeln!(f, "  {error}")?;
        }
        Ok(())
    }
}

/// Validate an untyped content tree
pub fn validate(tree: &ContentValue) -> ValidationReport {
    let (registry, errors) = walk::walk(tree);
    log::debug!(
        "validated content tree: {} entities, {} errors",
        registry.len(),
        errors.len()
    );
    ValidationReport::from_errors(errors)
}

/// Validate an already decoded tree.
///
/// Typed decoding has already rejected unknown block types and collapsed
/// duplicate keys, so this mainly catches quiz and lesson defects in trees
/// built in code.
pub fn validate_tree(tree: &CourseTranslationMap) -> ValidationReport {
    match serde_json::to_value(tree) {
        Ok(value) => validate(&ContentValue::from(value)),
        Err(e) => ValidationReport::from_errors(vec![ValidationError::new(
            &ContentPath::root(),
            ErrorKind::InvalidStructure,
            format!("tree could not be serialized: {e}"),
        )]),
    }
}
