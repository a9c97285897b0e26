//! Pretty printers for Tree
//!
//! This module renders the untyped AST back to Tree source. The printed
//! form re-parses to the same structure, which the round-trip tests rely
//! on.

pub mod surface;
