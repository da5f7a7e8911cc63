//! Error types for scanning and rendering project scripts.
//!
//! ## Error Categories
//!
//! - **I/O Errors**: the source could not be opened or fully read, or the sink
//!   refused a write
//! - **Structural Errors**: a field matched a qualifier but none of the value
//!   grammars; this points at a grammar gap, not at bad input
//! - **Invalid Filenames**: raised only by the [`project`](crate::project) layer
//!
//! A structural error aborts the whole scan. No partial document is ever
//! returned. Numbers too large for the native types are not errors; they
//! scan into the big value variants.
//!
//! ## Examples
//!
//! ```rust
//! use pto_scan::{from_str, Error};
//!
//! assert!(from_str("i w99999999999999999999\n").is_ok());
//!
//! let err = Error::structural(2, "x?", "i x?\n");
//! assert_eq!(err.line(), Some(2));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while scanning or rendering.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// A qualifier-matched field that no value grammar accepted
    #[error("Structural error at line {line}: no value grammar matched {text:?}\n{context}")]
    Structural {
        line: usize,
        text: String,
        context: String,
    },

    /// Requested project name was rejected by the project layer
    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a structural error carrying the offending line's number, the
    /// raw field text and the full source line.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pto_scan::Error;
    ///
    /// let err = Error::structural(4, "x?", "i x?\n");
    /// assert!(err.to_string().contains("line 4"));
    /// ```
    pub fn structural(line: usize, text: &str, context: &str) -> Self {
        Error::Structural {
            line,
            text: text.to_string(),
            context: context.trim_end().to_string(),
        }
    }

    /// Creates an invalid filename error.
    pub fn invalid_filename(name: &str) -> Self {
        Error::InvalidFilename(name.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for file reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns the zero-based source line for scan errors.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::Structural { line, .. } => Some(*line),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
