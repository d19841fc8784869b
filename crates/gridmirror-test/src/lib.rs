//! gridmirror Test Harness - Scenario testing and benchmarking
//!
//! This crate provides:
//! - A simulated compositing host scene
//! - Scenario building on top of a real tracker and engine
//! - End-to-end integration scenarios

pub mod integration;
pub mod simulator;

pub use integration::*;
pub use simulator::*;
