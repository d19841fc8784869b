//! gridmirror Wire - the calling application's local RPC frames
//!
//! This crate provides:
//! - The JSON frame envelope (command, event, data, nonce)
//! - Voice-state and channel payload decoding
//! - Translation of dispatches into roster events
//! - Subscription commands for following a channel
//!
//! Socket handling and the authorization handshake live with the connection
//! layer, outside this workspace.

pub mod command;
pub mod dispatch;
pub mod frame;
pub mod voice;

pub use command::*;
pub use dispatch::*;
pub use frame::*;
pub use voice::*;
