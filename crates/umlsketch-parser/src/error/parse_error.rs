//! The error returned when a diagram cannot be read.

use std::fmt;

use crate::error::Diagnostic;

/// Everything a failed read reported, in source order.
///
/// At least one diagnostic is an error. Warnings found during the same read
/// (such as relations to undeclared nodes) are kept alongside so that a
/// report shows the whole picture.
#[derive(Debug)]
pub struct ParseError {
    diagnostics: Vec<Diagnostic>,
}

impl ParseError {
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    /// All diagnostics, errors and warnings.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Only the error diagnostics.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|diag| diag.severity().is_error())
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }
}

impl fmt::Display for ParseError {
    /// Shows the first error, then how many other diagnostics follow.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(first) = self.errors().next().or(self.diagnostics.first()) else {
            return f.write_str("diagram could not be read");
        };
        fmt::Display::fmt(first, f)?;

        match self.diagnostics.len() - 1 {
            0 => Ok(()),
            rest => write!(f, " (+{rest} more)"),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<Diagnostic> for ParseError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self::new(vec![diagnostic])
    }
}

impl From<Vec<Diagnostic>> for ParseError {
    fn from(diagnostics: Vec<Diagnostic>) -> Self {
        Self::new(diagnostics)
    }
}
