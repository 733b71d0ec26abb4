//! Error types for umlsketch operations.
//!
//! This module provides the main error type [`UmlSketchError`] which wraps
//! the error conditions that can occur while loading, reading or exporting a
//! diagram.

use std::io;

use thiserror::Error;

use umlsketch_core::diagram::DiagramError;
use umlsketch_parser::error::ParseError;

/// The main error type for umlsketch operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the notation source next to the parser
/// diagnostics so that callers can render labeled source snippets.
#[derive(Debug, Error)]
pub enum UmlSketchError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Document error: {0}")]
    Document(#[from] serde_json::Error),

    #[error("Graph error: {0}")]
    Graph(String),

    #[error("Chat error: {0}")]
    Chat(String),
}

impl From<DiagramError> for UmlSketchError {
    fn from(error: DiagramError) -> Self {
        Self::Graph(error.to_string())
    }
}

impl UmlSketchError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
