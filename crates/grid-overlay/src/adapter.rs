//! The capability the host grid implements for the overlay.
//!
//! The overlay knows nothing about the widget that stores rows and columns.
//! Everything it needs — pixel geometry for cells, pixel-to-index mapping,
//! repaint scheduling, and drop/resize policy — goes through [`GridAdapter`].

use grid_overlay_render::{Point, Rect};

use crate::block::{Block, ResizeBorder, RowId};

/// Outcome of a [`GridAdapter::can_resize`] policy query.
///
/// The host may allow the requested boundary as-is, allow it with a
/// substituted column, or veto the resize entirely. A corrected column goes
/// through the same minimum-width clamp as any requested boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeDecision {
    /// Whether the resize may proceed.
    pub allowed: bool,
    /// Boundary column to use instead of the requested one, if the host
    /// wants to substitute it.
    pub corrected_col: Option<i32>,
}

impl ResizeDecision {
    /// Allow the resize at the requested boundary.
    pub const fn allow() -> Self {
        Self {
            allowed: true,
            corrected_col: None,
        }
    }

    /// Allow the resize, but at a host-substituted boundary column.
    pub const fn allow_corrected(col: i32) -> Self {
        Self {
            allowed: true,
            corrected_col: Some(col),
        }
    }

    /// Veto the resize; the block stays geometrically unchanged.
    pub const fn deny() -> Self {
        Self {
            allowed: false,
            corrected_col: None,
        }
    }
}

/// Functions the overlay depends on, implemented by the host grid.
///
/// Row and column *positions* are display indices; a [`RowId`] is the stable
/// identity of a row regardless of where sorting or filtering currently
/// places it. Positions the host cannot resolve (pointer outside the grid,
/// row not present) are `None`, and the overlay treats them as no-ops.
pub trait GridAdapter {
    /// Stable row identity for a display position, or `None` if the
    /// position resolves to no row.
    fn row_id_at(&self, row_pos: i32) -> Option<RowId>;

    /// Pixel rectangle for a cell. Must stay valid for cells scrolled out of
    /// view horizontally; the overlay computes full-width block geometry and
    /// clips, rather than recomputing per scroll tick. An empty rectangle
    /// means the cell is not resolvable at all (e.g. the row is not laid
    /// out).
    fn cell_bounds(&self, row_pos: i32, col_pos: i32) -> Rect;

    /// Right edge of the right-most visible frozen column, `0.0` if the
    /// grid has no frozen columns.
    fn left_scroll_boundary(&self) -> f32;

    /// Column display position under a point, or `None` when the point is
    /// outside any column.
    fn col_at(&self, point: Point) -> Option<i32>;

    /// Row display position under a point, or `None` when the point is
    /// outside any row.
    fn row_at(&self, point: Point) -> Option<i32>;

    /// Drop policy: may `block` be dropped onto the given row/column?
    fn can_drop(&self, block: &Block, row_pos: i32, col_pos: i32) -> bool;

    /// Resize policy: may `block`'s border be moved to the given boundary
    /// column?
    fn can_resize(&self, block: &Block, border: ResizeBorder, new_boundary_col: i32)
        -> ResizeDecision;

    /// Request an asynchronous repaint of the given row display positions.
    fn invalidate_rows(&self, row_positions: &[i32]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resize_decision_constructors() {
        assert_eq!(
            ResizeDecision::allow(),
            ResizeDecision {
                allowed: true,
                corrected_col: None
            }
        );
        assert_eq!(ResizeDecision::allow_corrected(5).corrected_col, Some(5));
        assert!(!ResizeDecision::deny().allowed);
    }
}
