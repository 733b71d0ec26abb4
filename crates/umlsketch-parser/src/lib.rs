//! # umlsketch Parser
//!
//! Reads the component notation written by the umlsketch serializer back
//! into a [`Diagram`].
//!
//! ## Usage
//!
//! ```
//! # use umlsketch_parser::{parse, error::ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = r#"
//! @startuml
//! component "Database" as 1 <<database>>
//! component "Server" as 2 <<server>>
//!
//! 1 --> 2
//! @enduml
//! "#;
//!
//!     let diagram = parse(source)?;
//!     assert_eq!(diagram.nodes().len(), 2);
//!     assert_eq!(diagram.edges()[0].target(), "2");
//!     Ok(())
//! }
//! ```

pub mod error;

mod reader;
mod span;
mod syntax;

pub use span::{Span, Spanned};

use umlsketch_core::diagram::Diagram;

use error::ParseError;
use reader::Reader;

/// Parse notation source into a diagram.
///
/// Nodes and relations are returned in source order. Relations get fresh
/// edge ids (`edge-{source}-{target}`, suffixed on repeats) because the
/// notation does not carry edge ids. Relations to undeclared nodes are kept
/// and reported as warnings in the log.
///
/// # Errors
///
/// Returns a [`ParseError`] holding every diagnostic found when the header
/// or footer is missing, a line is malformed, or a node id is declared more
/// than once.
pub fn parse(source: &str) -> Result<Diagram, ParseError> {
    Reader::new(source).read()
}
