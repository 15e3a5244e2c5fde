//! Core systems for Grid Overlay.
//!
//! This crate provides the foundation pieces shared by the overlay crates:
//!
//! - [`Signal`] - a signal/slot mechanism for host notifications
//! - [`logging`] - `tracing` target constants for log filtering
//!
//! The overlay is a single-threaded, event-driven component: every signal is
//! emitted from host event callbacks on the UI dispatch context, so slots are
//! always invoked directly on the emitting thread.

pub mod logging;
pub mod signal;

pub use signal::{ConnectionGuard, ConnectionId, Signal};
