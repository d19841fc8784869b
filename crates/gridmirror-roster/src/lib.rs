//! gridmirror Roster - who is on camera, in call-window order
//!
//! This crate implements the roster tracker:
//! - Case-insensitive display-name collation
//! - Channel switching and reseeding from a membership directory
//! - Incremental join/leave/rename/mode-change events
//! - Atomically swapped snapshots for the tick reader

pub mod collation;
pub mod event;
pub mod snapshot;
pub mod tracker;

pub use collation::*;
pub use event::*;
pub use snapshot::*;
pub use tracker::*;
