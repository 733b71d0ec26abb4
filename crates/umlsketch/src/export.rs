//! Text exports of a diagram.

pub mod notation;

pub use notation::{serialize, serialize_diagram};
