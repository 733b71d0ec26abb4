//! Error and diagnostic system for the umlsketch notation reader.
//!
//! Every problem found while reading a diagram is a [`Diagnostic`]: a
//! severity, an optional [`ErrorCode`], labeled spans and help text. All
//! diagnostics of one read are returned together in a [`ParseError`].

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
