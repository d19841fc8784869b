//! gridmirror Layout - the call window's video grid, reproduced
//!
//! This crate implements the grid geometry solver:
//! - Grid constants (spacing, tile aspect, window margins)
//! - The row/column search with aspect clamping and centering
//! - The solo-caller tile count rule applied before solving

pub mod constants;
pub mod rule;
pub mod solver;

pub use constants::*;
pub use rule::*;
pub use solver::*;
