//! umlsketch Core Types and Definitions
//!
//! This crate provides the foundational types shared by the umlsketch
//! crates:
//!
//! - **Identifiers**: String-interned identifiers ([`identifier::Id`])
//! - **Diagram**: Nodes, edges and editing operations ([`diagram`] module)
//! - **Palette**: The catalog of node kinds ([`palette`] module)

pub mod diagram;
pub mod identifier;
pub mod palette;
