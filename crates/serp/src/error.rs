// ABOUTME: Error types for SERP extraction including the ErrorCode enum and ExtractError struct.
// ABOUTME: Provides categorized errors with convenience constructors and boolean helpers.

use std::fmt;

/// Error codes representing the different categories of extraction failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// The markup could not be turned into a tree at all.
    MalformedInput,
    /// The tree parsed, but a mandatory anchor is missing or invalid.
    InvalidDocument,
    /// A single organic result lacks a mandatory sub-field.
    MissingField,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::MalformedInput => "malformed input",
            ErrorCode::InvalidDocument => "invalid results page",
            ErrorCode::MissingField => "missing field",
        };
        write!(f, "{}", s)
    }
}

/// The main error type for extraction operations.
#[derive(Debug, thiserror::Error)]
pub struct ExtractError {
    pub code: ErrorCode,
    pub op: String,
    #[source]
    pub source: Option<anyhow::Error>,
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "serp: {}: {}", self.op, self.code)?;
        if let Some(ref src) = self.source {
            write!(f, ": {}", src)?;
        }
        Ok(())
    }
}

impl ExtractError {
    /// Create a MalformedInput error.
    pub fn malformed_input(op: impl Into<String>, source: Option<anyhow::Error>) -> Self {
        Self {
            code: ErrorCode::MalformedInput,
            op: op.into(),
            source,
        }
    }

    /// Create an InvalidDocument error.
    pub fn invalid_document(op: impl Into<String>, source: Option<anyhow::Error>) -> Self {
        Self {
            code: ErrorCode::InvalidDocument,
            op: op.into(),
            source,
        }
    }

    /// Create a MissingField error.
    pub fn missing_field(op: impl Into<String>, source: Option<anyhow::Error>) -> Self {
        Self {
            code: ErrorCode::MissingField,
            op: op.into(),
            source,
        }
    }

    /// Returns true if this is a MalformedInput error.
    pub fn is_malformed_input(&self) -> bool {
        self.code == ErrorCode::MalformedInput
    }

    /// Returns true if this is an InvalidDocument error.
    pub fn is_invalid_document(&self) -> bool {
        self.code == ErrorCode::InvalidDocument
    }

    /// Returns true if this is a MissingField error.
    pub fn is_missing_field(&self) -> bool {
        self.code == ErrorCode::MissingField
    }
}

pub type Result<T> = std::result::Result<T, ExtractError>;
