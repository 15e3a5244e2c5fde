//! Cursor hints for the overlay's pointer interactions.
//!
//! The overlay never touches the platform cursor itself; it tracks which
//! shape should be shown and notifies the host when that changes. The host
//! applies the shape to its window through whatever windowing layer it uses
//! ([`CursorShape::to_cursor_icon`] converts to the common `cursor-icon`
//! vocabulary most of them accept).

use cursor_icon::CursorIcon;

/// The cursor shape the host should display over the grid surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CursorShape {
    /// The default arrow cursor.
    #[default]
    Arrow,
    /// East-west resize cursor, shown over a resizable block edge.
    ResizeHorizontal,
}

impl CursorShape {
    /// Convert to the `cursor-icon` crate's icon type.
    pub fn to_cursor_icon(self) -> CursorIcon {
        match self {
            CursorShape::Arrow => CursorIcon::Default,
            CursorShape::ResizeHorizontal => CursorIcon::EwResize,
        }
    }

    /// Check if this is a resize cursor.
    pub fn is_resize_cursor(self) -> bool {
        matches!(self, CursorShape::ResizeHorizontal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_shape_default() {
        assert_eq!(CursorShape::default(), CursorShape::Arrow);
    }

    #[test]
    fn test_cursor_icon_mapping() {
        assert_eq!(CursorShape::Arrow.to_cursor_icon(), CursorIcon::Default);
        assert_eq!(
            CursorShape::ResizeHorizontal.to_cursor_icon(),
            CursorIcon::EwResize
        );
        assert!(CursorShape::ResizeHorizontal.is_resize_cursor());
        assert!(!CursorShape::Arrow.is_resize_cursor());
    }
}
