//! gridmirror Scene - keeps the host's capture crops aligned with the grid
//!
//! This crate implements the scene synchronizer:
//! - Slot assignment (managed element → participant)
//! - Scene element model (visibility, crop, scale, bounds policy)
//! - Tile placement, aspect fitting and edge rounding
//! - The idempotent per-tick pass, with self-view mirroring and
//!   audio-only indicators

pub mod assignment;
pub mod crop;
pub mod element;
pub mod sync;

pub use assignment::*;
pub use crop::*;
pub use element::*;
pub use sync::*;
