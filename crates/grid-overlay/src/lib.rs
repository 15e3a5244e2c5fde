//! Colored block annotations rendered over a row/column grid.
//!
//! This crate renders a set of colored, resizable, draggable block
//! annotations on top of a host grid widget and manages the pointer-driven
//! interactions (select, drag-move, resize, drop) that mutate them.
//!
//! The host implements two seams:
//!
//! - [`GridAdapter`] - translates between pixel space and the grid's
//!   row/column index space, and owns drop/resize policy
//! - [`Renderer`](grid_overlay_render::Renderer) - the 2D backend the
//!   overlay paints through
//!
//! and forwards its paint passes and raw pointer events to an
//! [`OverlayRenderer`]. Mutations the overlay performs (moves, resizes) are
//! announced through cancelable signals; a handler can veto a mutation and
//! the overlay reverts it consistently.
//!
//! # Example
//!
//! ```ignore
//! use std::rc::Rc;
//! use grid_overlay::{Block, BlockId, OverlayRenderer, RowId};
//! use grid_overlay_render::{Color, FontSpec};
//!
//! let adapter = Rc::new(MyGridAdapter::new());
//! let mut overlay = OverlayRenderer::new(adapter, FontSpec::default());
//!
//! let blocks = vec![
//!     Block::new(BlockId(1), RowId(1), 2, 3, Color::from_rgb8(200, 60, 60)),
//! ];
//! overlay.initialize_overlay(blocks, 2, 11);
//!
//! overlay.block_moved.connect(|event| {
//!     if event.new_row_pos == 0 {
//!         event.cancel(); // first row does not accept blocks
//!     }
//! });
//! ```

pub mod adapter;
pub mod block;
pub mod cursor;
pub mod events;
pub mod overlay;


pub use adapter::{GridAdapter, ResizeDecision};
pub use block::{Block, BlockId, ResizeBorder, ResizeBorders, RowId};
pub use cursor::CursorShape;
pub use events::{
    BlockMovedEvent, BlockResizedEvent, DropStatus, MouseButton, MouseMoveEvent, MousePressEvent,
    MouseReleaseEvent,
};
pub use overlay::{
    BlockKey, DragGesture, DragThresholds, OverlayRenderer, DRAG_IMAGE_HOTSPOT,
};
