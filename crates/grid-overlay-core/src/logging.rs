//! Logging facilities for Grid Overlay.
//!
//! The overlay uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in the host application:
//!
//! ```ignore
//! tracing_subscriber::fmt::init();
//! ```
//!
//! Use the constants in [`targets`] with `tracing` directives to filter logs
//! by subsystem, e.g. `RUST_LOG=grid_overlay::interaction=trace`.

/// Target names for log filtering.
pub mod targets {
    /// Core crate target (signals).
    pub const CORE: &str = "grid_overlay_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "grid_overlay_core::signal";
    /// Overlay painting target.
    pub const PAINT: &str = "grid_overlay::paint";
    /// Pointer interaction state machine target.
    pub const INTERACTION: &str = "grid_overlay::interaction";
}
