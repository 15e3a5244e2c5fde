//! Pointer-event input types and the overlay's outgoing notifications.
//!
//! The host forwards its raw pointer events to the overlay as the input
//! types defined here. The overlay raises [`BlockMovedEvent`] and
//! [`BlockResizedEvent`] in return; both are cancelable — a handler can veto
//! the mutation from inside the notification and the overlay reverts it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use grid_overlay_render::Point;

use crate::block::BlockId;

/// A mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button (usually left).
    Left,
    /// Secondary button (usually right).
    Right,
    /// Middle button (scroll wheel click).
    Middle,
    /// Any other button, by platform index.
    Other(u16),
}

/// A mouse button was pressed over the grid surface.
#[derive(Debug, Clone, Copy)]
pub struct MousePressEvent {
    /// The button that was pressed.
    pub button: MouseButton,
    /// Position in grid-surface coordinates.
    pub position: Point,
}

/// A mouse button was released over the grid surface.
#[derive(Debug, Clone, Copy)]
pub struct MouseReleaseEvent {
    /// The button that was released.
    pub button: MouseButton,
    /// Position in grid-surface coordinates.
    pub position: Point,
}

/// The mouse moved over the grid surface.
#[derive(Debug, Clone, Copy)]
pub struct MouseMoveEvent {
    /// Position in grid-surface coordinates.
    pub position: Point,
}

/// The overlay's verdict on a drag hovering a candidate cell.
///
/// Returned from the drag-over protocol entry point so the host can show the
/// matching drop feedback (move cursor vs. forbidden cursor).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropStatus {
    /// The hovered cell accepts the dragged block.
    Accepted,
    /// The hovered cell rejects the dragged block.
    Rejected,
}

/// Shared cancel flag carried by cancelable notifications.
///
/// Handlers run synchronously on the UI context; setting the flag inside a
/// handler vetoes the mutation and the overlay performs a consistent revert
/// after the emission completes.
#[derive(Debug, Clone, Default)]
struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    fn is_canceled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Notification payload: a block was moved to a new row/column by a drop.
#[derive(Debug, Clone)]
pub struct BlockMovedEvent {
    /// The moved block.
    pub block_id: BlockId,
    /// Display position of the row the block was dragged from.
    pub original_row_pos: i32,
    /// Column the drag started over.
    pub original_col_pos: i32,
    /// Display position of the row the block was dropped onto.
    pub new_row_pos: i32,
    cancel: CancelFlag,
}

impl BlockMovedEvent {
    pub(crate) fn new(
        block_id: BlockId,
        original_row_pos: i32,
        original_col_pos: i32,
        new_row_pos: i32,
    ) -> Self {
        Self {
            block_id,
            original_row_pos,
            original_col_pos,
            new_row_pos,
            cancel: CancelFlag::default(),
        }
    }

    /// Veto the move; the block is returned to its original row and colspan.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Whether any handler vetoed the move.
    pub fn is_canceled(&self) -> bool {
        self.cancel.is_canceled()
    }
}

/// Notification payload: a block's colspan was changed by a resize gesture.
#[derive(Debug, Clone)]
pub struct BlockResizedEvent {
    /// The resized block.
    pub block_id: BlockId,
    /// Display position of the block's row.
    pub row_pos: i32,
    cancel: CancelFlag,
}

impl BlockResizedEvent {
    pub(crate) fn new(block_id: BlockId, row_pos: i32) -> Self {
        Self {
            block_id,
            row_pos,
            cancel: CancelFlag::default(),
        }
    }

    /// Veto the resize; the colspan is adjusted back toward its pre-resize
    /// boundary.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Whether any handler vetoed the resize.
    pub fn is_canceled(&self) -> bool {
        self.cancel.is_canceled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_flag_is_shared_across_clones() {
        let event = BlockMovedEvent::new(BlockId(1), 0, 2, 3);
        let observer = event.clone();
        assert!(!observer.is_canceled());
        event.cancel();
        assert!(observer.is_canceled());
    }

    #[test]
    fn test_resized_event_starts_uncanceled() {
        let event = BlockResizedEvent::new(BlockId(7), 4);
        assert!(!event.is_canceled());
        event.cancel();
        assert!(event.is_canceled());
    }
}
