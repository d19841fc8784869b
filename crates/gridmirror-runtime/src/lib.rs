//! gridmirror Runtime - Engine orchestration
//!
//! This crate provides:
//! - Engine configuration
//! - The roster-owning task fed by the connection layer
//! - The per-tick engine driven by the compositing host
//! - Tracing setup

pub mod config;
pub mod engine;
pub mod roster_task;
pub mod telemetry;

pub use config::*;
pub use engine::*;
pub use roster_task::*;
pub use telemetry::*;
