//! gridmirror Core - Fundamental types and primitives
//!
//! This crate defines the core types shared by the layout replication engine:
//! - Identifiers (ParticipantId, ChannelId)
//! - Participant modes (audio-only, video-active, absent)
//! - Geometry primitives (Size, Rect, Crop, Scale)
//! - The shared error type

pub mod error;
pub mod geometry;
pub mod id;
pub mod participant;

pub use error::*;
pub use geometry::*;
pub use id::*;
pub use participant::*;
