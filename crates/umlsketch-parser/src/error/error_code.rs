//! Error codes for the umlsketch diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E0xx` - Literal errors (strings and escapes)
//! - `E1xx` - Statement syntax errors
//! - `E3xx` - Diagram consistency errors

use std::fmt;

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Literal Errors (E0xx)
    // =========================================================================
    /// Unterminated string literal.
    ///
    /// A label or quoted identifier was opened with a quote but never closed
    /// on the same line.
    E001,

    /// Invalid escape sequence.
    ///
    /// Valid escapes are: `\n`, `\r`, `\t`, `\\`, `\"`.
    E003,

    // =========================================================================
    // Statement Errors (E1xx)
    // =========================================================================
    /// Unexpected input.
    ///
    /// The line is neither a node declaration, a relation, nor a header or
    /// footer, or it appears where none of those are allowed.
    E100,

    /// Incomplete input.
    ///
    /// The input ended before the `@enduml` footer.
    E101,

    /// Unterminated stereotype.
    ///
    /// A `<<` type tag was opened but never closed with `>>`.
    E102,

    // =========================================================================
    // Consistency Errors (E3xx)
    // =========================================================================
    /// Duplicate node definition.
    ///
    /// A node with this identifier has already been declared.
    E300,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E003 => "E003",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E300 => "E300",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "unterminated string literal",
            ErrorCode::E003 => "invalid escape sequence",
            ErrorCode::E100 => "unexpected input",
            ErrorCode::E101 => "incomplete input",
            ErrorCode::E102 => "unterminated stereotype",
            ErrorCode::E300 => "duplicate node definition",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E001.to_string(), "E001");
        assert_eq!(ErrorCode::E102.to_string(), "E102");
        assert_eq!(ErrorCode::E300.to_string(), "E300");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(ErrorCode::E001.description(), "unterminated string literal");
        assert_eq!(ErrorCode::E300.description(), "duplicate node definition");
    }
}
