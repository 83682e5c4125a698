//! Error handling for the stamp application.
//! Defines custom error types and results used throughout the application.

use std::io;
use thiserror::Error;

/// Custom error types for stamp operations.
///
/// This enum represents all possible errors that can occur within the stamp
/// application. It implements the standard Error trait through thiserror's
/// derive macro.
#[derive(Error, Debug)]
pub enum StampError {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// Represents errors in the startup configuration (unknown mode,
    /// missing signal variables)
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// Represents a value-source document that could not be parsed
    #[error("Failed to parse '{path}': {reason}.")]
    ParseError { path: String, reason: String },

    /// Represents a value-source document missing the requested top-level key
    #[error("Key '{key}' not found in '{path}'.")]
    MissingKeyError { path: String, key: String },

    /// Represents a value-source section that is not a string-to-string mapping
    #[error("Key '{key}' in '{path}' is not a mapping of strings: {reason}.")]
    ShapeError {
        path: String,
        key: String,
        reason: String,
    },
}

/// Convenience type alias for Results with StampError as the error type.
pub type Result<T> = std::result::Result<T, StampError>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The StampError to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: StampError) {
    eprintln!("{}", err);
    std::process::exit(1);
}
