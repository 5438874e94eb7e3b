/*!
 * Error types for the termguard crate.
 *
 * Glossary loading has a fallible entry point that reports these errors and an
 * infallible one that logs them and degrades to an empty glossary. Protection
 * and restoration never fail.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a glossary resource
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GlossaryError {
    /// The glossary resource does not exist
    #[error("Glossary file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The glossary resource exists but could not be read
    #[error("Failed to read glossary file {}: {message}", path.display())]
    Io {
        /// Path of the resource
        path: PathBuf,
        /// Underlying I/O error message
        message: String,
    },

    /// The glossary resource is structurally invalid
    #[error("Invalid glossary configuration: {0}")]
    Configuration(String),
}

impl From<serde_json::Error> for GlossaryError {
    fn from(error: serde_json::Error) -> Self {
        Self::Configuration(error.to_string())
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from glossary loading
    #[error("Glossary error: {0}")]
    Glossary(#[from] GlossaryError),

    /// Error from the external translator
    #[error("Translation error: {0}")]
    Translation(String),
}
