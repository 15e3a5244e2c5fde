//! The block entity: one colored annotation spanning a run of columns.
//!
//! A [`Block`] owns its own geometry trimming, coloring, span-adjustment, and
//! painting logic. Everything that needs knowledge of the surrounding grid
//! (cell rectangles, the overlay column range, other blocks on the row) lives
//! in the overlay controller instead.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use grid_overlay_render::{
    Color, CornerRadii, FontSpec, Image, Point, Rect, Renderer, RoundedRect, Size, Stroke,
};

/// Corner radius of the rounded block outline.
const CORNER_ROUND_RADIUS: f32 = 5.0;
/// Width of the selection border.
const SELECTED_BORDER_WIDTH: f32 = 1.5;
/// Width of the pointer zone along a resizable edge.
const RESIZE_GRIP_ZONE_WIDTH: f32 = 4.0;
/// Horizontal trim applied to the cell-union bounds before painting.
const BORDER_TRIM_WIDTH: f32 = 8.0;
/// Vertical trim applied to the cell-union bounds before painting.
const BORDER_TRIM_HEIGHT: f32 = 6.0;
/// Side length of the square grip markers drawn on resizable edges.
const GRIP_MARKER_SIZE: f32 = 5.0;
/// Alpha applied to the base color for normal painting (0-255).
const PAINT_ALPHA: u8 = 175;

/// Host-supplied unique identifier for a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(pub u64);

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "block#{}", self.0)
    }
}

/// Host-supplied unique identifier for a row.
///
/// Row identity is stable across sorting and filtering; the display position
/// of a row may change while its `RowId` does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(pub u64);

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row#{}", self.0)
    }
}

/// One edge of a block that can be dragged to resize it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeBorder {
    Left,
    Right,
}

impl ResizeBorder {
    fn bit(self) -> u8 {
        match self {
            Self::Left => 1 << 0,
            Self::Right => 1 << 1,
        }
    }
}

/// The set of edges a block may currently be resized from.
///
/// Which borders are allowed doubles as the truncation signal: an edge
/// clipped by the overlay boundary is not resizable and is painted with
/// square corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ResizeBorders(u8);

impl ResizeBorders {
    /// No resizable edges.
    pub const NONE: Self = Self(0);
    /// Left edge only.
    pub const LEFT: Self = Self(1 << 0);
    /// Right edge only.
    pub const RIGHT: Self = Self(1 << 1);
    /// Both edges.
    pub const BOTH: Self = Self(Self::LEFT.0 | Self::RIGHT.0);

    /// Returns true if the given border is in the set.
    pub fn contains(self, border: ResizeBorder) -> bool {
        (self.0 & border.bit()) != 0
    }

    /// Add a border to the set.
    pub fn insert(&mut self, border: ResizeBorder) {
        self.0 |= border.bit();
    }

    /// Remove a border from the set.
    pub fn remove(&mut self, border: ResizeBorder) {
        self.0 &= !border.bit();
    }

    /// Returns true if no border is in the set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for ResizeBorders {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

/// A colored, optionally labeled annotation spanning a contiguous run of
/// columns on one row.
///
/// The colspan fields describe the *currently displayed* span;
/// [`total_column_count`](Self::total_column_count) is the block's full
/// logical width, which exceeds the displayed span when the block is clipped
/// by the overlay column range.
#[derive(Clone)]
pub struct Block {
    id: BlockId,
    row_id: RowId,
    colspan_start: i32,
    colspan_count: i32,
    total_column_count: i32,
    /// Semi-transparent variant of the base color used for normal painting.
    paint_color: Color,
    /// Opaque variant of the base color used for the drag-preview image.
    drag_color: Color,
    text: String,
    text_rendered: bool,
    icon: Option<Image>,
    icon_rendered: bool,
    tag: Option<Arc<dyn Any + Send + Sync>>,
    read_only: bool,
    selected: bool,
    allowed_resize_borders: ResizeBorders,
    /// Bounds passed to the most recent `render` call. Transient: read only
    /// by the drag-preview builder, never authoritative geometry.
    last_rendered_bounds: Option<Rect>,
    /// Font passed to the most recent `render` call.
    last_rendered_font: Option<FontSpec>,
}

impl fmt::Debug for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Block")
            .field("id", &self.id)
            .field("row_id", &self.row_id)
            .field("colspan_start", &self.colspan_start)
            .field("colspan_count", &self.colspan_count)
            .field("total_column_count", &self.total_column_count)
            .field("read_only", &self.read_only)
            .field("selected", &self.selected)
            .field("allowed_resize_borders", &self.allowed_resize_borders)
            .finish_non_exhaustive()
    }
}

impl Block {
    /// Create a new block covering `colspan_count` columns starting at
    /// `colspan_start` on the given row.
    ///
    /// The total column count starts equal to the displayed span; the overlay
    /// adjusts the displayed span during initialization if the block does not
    /// fit its column range.
    pub fn new(
        id: BlockId,
        row_id: RowId,
        colspan_start: i32,
        colspan_count: i32,
        color: Color,
    ) -> Self {
        let colspan_count = colspan_count.max(1);
        let mut block = Self {
            id,
            row_id,
            colspan_start,
            colspan_count,
            total_column_count: colspan_count,
            paint_color: Color::TRANSPARENT,
            drag_color: Color::TRANSPARENT,
            text: String::new(),
            text_rendered: false,
            icon: None,
            icon_rendered: false,
            tag: None,
            read_only: false,
            selected: false,
            allowed_resize_borders: ResizeBorders::NONE,
            last_rendered_bounds: None,
            last_rendered_font: None,
        };
        block.set_color(color);
        block
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Unique block id.
    pub fn id(&self) -> BlockId {
        self.id
    }

    /// Id of the row this block belongs to. Reassigned when the block is
    /// moved to another row.
    pub fn row_id(&self) -> RowId {
        self.row_id
    }

    pub(crate) fn set_row_id(&mut self, row_id: RowId) {
        self.row_id = row_id;
    }

    /// First column of the displayed span.
    pub fn colspan_start(&self) -> i32 {
        self.colspan_start
    }

    pub(crate) fn set_colspan_start(&mut self, start: i32) {
        self.colspan_start = start;
    }

    /// Number of columns in the displayed span.
    pub fn colspan_count(&self) -> i32 {
        self.colspan_count
    }

    pub(crate) fn set_colspan_count(&mut self, count: i32) {
        self.colspan_count = count;
    }

    /// Last column of the displayed span (inclusive).
    pub fn colspan_end(&self) -> i32 {
        self.colspan_start + self.colspan_count - 1
    }

    /// The block's full logical width in columns, irrespective of how many
    /// are currently displayed.
    pub fn total_column_count(&self) -> i32 {
        self.total_column_count
    }

    /// Override the block's full logical width. Values below the displayed
    /// span are clamped up to it.
    pub fn set_total_column_count(&mut self, total: i32) {
        self.total_column_count = total.max(self.colspan_count);
    }

    /// The semi-transparent color used when painting the block.
    pub fn color(&self) -> Color {
        self.paint_color
    }

    /// The opaque color variant used for the drag-preview image.
    pub fn drag_color(&self) -> Color {
        self.drag_color
    }

    /// Set the base hue. Normal painting uses a semi-transparent variant,
    /// the drag preview an opaque one.
    pub fn set_color(&mut self, color: Color) {
        self.paint_color = color.with_alpha(PAINT_ALPHA as f32 / 255.0);
        self.drag_color = color.opaque();
    }

    /// Text rendered inside the block.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Whether the text is drawn.
    pub fn is_text_rendered(&self) -> bool {
        self.text_rendered
    }

    pub fn set_text_rendered(&mut self, rendered: bool) {
        self.text_rendered = rendered;
    }

    /// Icon drawn in a square area at the leading edge of the block.
    pub fn icon(&self) -> Option<&Image> {
        self.icon.as_ref()
    }

    pub fn set_icon(&mut self, icon: Option<Image>) {
        self.icon = icon;
    }

    /// Whether the icon is drawn.
    pub fn is_icon_rendered(&self) -> bool {
        self.icon_rendered
    }

    pub fn set_icon_rendered(&mut self, rendered: bool) {
        self.icon_rendered = rendered;
    }

    /// Attach an opaque host payload to this block.
    pub fn set_tag<T: Send + Sync + 'static>(&mut self, tag: T) {
        self.tag = Some(Arc::new(tag));
    }

    /// Get the host payload, if one of the requested type is attached.
    pub fn tag<T: Send + Sync + 'static>(&self) -> Option<&T> {
        self.tag.as_deref().and_then(|tag| tag.downcast_ref())
    }

    /// A read-only block cannot be selected, moved, or resized.
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// Whether the block is currently selected.
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    /// The edges the block may currently be resized from.
    pub fn allowed_resize_borders(&self) -> ResizeBorders {
        self.allowed_resize_borders
    }

    pub(crate) fn set_allowed_resize_borders(&mut self, borders: ResizeBorders) {
        self.allowed_resize_borders = borders;
    }

    pub(crate) fn allow_resize_border(&mut self, border: ResizeBorder) {
        self.allowed_resize_borders.insert(border);
    }

    /// Bounds passed to the most recent render call, if any.
    pub fn last_rendered_bounds(&self) -> Option<Rect> {
        self.last_rendered_bounds
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Shrink the given cell-union bounds by the trim margins and decide the
    /// corner rounding.
    ///
    /// Corners are rounded only on edges where resize is currently allowed;
    /// an edge constrained by the overlay boundary stays square, visually
    /// signaling that the block continues beyond the visible range.
    pub fn compute_display_path(&self, bounds: Rect) -> (Rect, RoundedRect) {
        let mut rect = bounds;
        rect.size.height -= BORDER_TRIM_HEIGHT;
        rect.origin.y += BORDER_TRIM_HEIGHT / 2.0;

        let left = self.allowed_resize_borders.contains(ResizeBorder::Left);
        let right = self.allowed_resize_borders.contains(ResizeBorder::Right);

        let radii = match (left, right) {
            (true, true) => {
                rect.size.width -= BORDER_TRIM_WIDTH;
                rect.origin.x += BORDER_TRIM_WIDTH / 2.0;
                CornerRadii::uniform(CORNER_ROUND_RADIUS)
            }
            (true, false) => {
                rect.size.width -= BORDER_TRIM_WIDTH / 2.0;
                rect.origin.x += BORDER_TRIM_WIDTH / 4.0;
                CornerRadii::left_only(CORNER_ROUND_RADIUS)
            }
            (false, true) => {
                rect.size.width -= BORDER_TRIM_WIDTH / 2.0;
                CornerRadii::right_only(CORNER_ROUND_RADIUS)
            }
            (false, false) => CornerRadii::ZERO,
        };

        (rect, RoundedRect::with_radii(rect, radii))
    }

    /// Perceptual-luminance contrast color: black text on bright
    /// backgrounds, white text on dark ones.
    pub fn contrast_text_color(color: Color) -> Color {
        let [r, g, b, _] = color.to_rgba8();
        // The human eye favors green; weight the channels accordingly.
        let luminance =
            1.0 - (0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b)) / 255.0;
        if luminance < 0.5 {
            Color::BLACK
        } else {
            Color::WHITE
        }
    }

    // =========================================================================
    // Hit testing and span adjustment
    // =========================================================================

    /// Classify a pointer position against the block's resize grip zones.
    ///
    /// Uses the bounds of the most recent render. Returns `None` when the
    /// pointer is not within grip distance of a trimmed edge, when the
    /// corresponding border is not currently resizable, or when the block is
    /// read-only.
    pub fn hit_test_resize_zone(&self, position: Point) -> Option<ResizeBorder> {
        if self.read_only {
            return None;
        }
        let bounds = self.last_rendered_bounds?;

        let zone = if position.x < bounds.left() + BORDER_TRIM_WIDTH / 2.0 + RESIZE_GRIP_ZONE_WIDTH
        {
            ResizeBorder::Left
        } else if position.x > bounds.right() - BORDER_TRIM_WIDTH / 2.0 - RESIZE_GRIP_ZONE_WIDTH {
            ResizeBorder::Right
        } else {
            return None;
        };

        self.allowed_resize_borders.contains(zone).then_some(zone)
    }

    /// Clamp a requested boundary column so the span keeps at least one
    /// column.
    fn clamp_boundary(&self, border: ResizeBorder, new_boundary_col: i32) -> i32 {
        match border {
            ResizeBorder::Left => new_boundary_col.min(self.colspan_end()),
            ResizeBorder::Right => new_boundary_col.max(self.colspan_start),
        }
    }

    /// Pure predicate: would moving the given border to `new_boundary_col`
    /// change the displayed span?
    pub fn would_colspan_change(&self, border: ResizeBorder, new_boundary_col: i32) -> bool {
        let target = self.clamp_boundary(border, new_boundary_col);
        match border {
            ResizeBorder::Left => target != self.colspan_start,
            ResizeBorder::Right => target != self.colspan_end(),
        }
    }

    /// Resize the given border of the block by adjusting its colspan.
    ///
    /// The boundary is clamped so the span never shrinks below one column.
    /// Any net change in the displayed span is also applied to the total
    /// column count, so the block's logical width tracks manual resizes.
    ///
    /// Returns whether the colspan actually changed.
    pub fn adjust_colspan(&mut self, border: ResizeBorder, new_boundary_col: i32) -> bool {
        let initial_count = self.colspan_count;
        let target = self.clamp_boundary(border, new_boundary_col);

        let changed = match border {
            ResizeBorder::Left => {
                if target != self.colspan_start {
                    self.colspan_count += self.colspan_start - target;
                    self.colspan_start = target;
                    true
                } else {
                    false
                }
            }
            ResizeBorder::Right => {
                if target != self.colspan_end() {
                    self.colspan_count += target - self.colspan_end();
                    true
                } else {
                    false
                }
            }
        };

        if changed {
            self.total_column_count += self.colspan_count - initial_count;
        }

        changed
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Paint the block into the given cell-union bounds.
    ///
    /// Also caches the bounds and font so a later drag gesture can synthesize
    /// a preview image from the same parameters.
    pub fn render(&mut self, renderer: &mut dyn Renderer, bounds: Rect, font: &FontSpec) {
        self.last_rendered_bounds = Some(bounds);
        self.last_rendered_font = Some(font.clone());

        let (rect, path) = self.compute_display_path(bounds);
        self.render_parts(renderer, rect, path, font);
    }

    /// Paint fill, icon, text, and selection decorations. Does not touch the
    /// last-rendered cache.
    fn render_parts(
        &self,
        renderer: &mut dyn Renderer,
        rect: Rect,
        path: RoundedRect,
        font: &FontSpec,
    ) {
        renderer.fill_rounded_rect(path, self.paint_color);

        let mut content_x = rect.left() + 3.0;
        if self.icon_rendered {
            if let Some(icon) = &self.icon {
                let icon_size = rect.height() - 4.0;
                renderer.draw_image(
                    icon,
                    Rect::new(content_x, rect.top() + 2.0, icon_size, icon_size),
                );
                content_x += icon_size + 3.0;
            }
        }

        if self.text_rendered {
            let text_rect = Rect::new(
                content_x,
                rect.top(),
                (rect.right() - 3.0 - content_x).max(0.0),
                rect.height() - 1.0,
            );
            renderer.fill_text(
                &self.text,
                text_rect,
                font,
                Self::contrast_text_color(self.paint_color),
            );
        }

        if self.selected {
            renderer.stroke_rounded_rect(path, &Stroke::new(Color::BLACK, SELECTED_BORDER_WIDTH));

            // Mini grip markers on each currently resizable edge.
            let middle_y = rect.top() + rect.height() / 2.0;
            let marker_y = middle_y - GRIP_MARKER_SIZE / 2.0;
            let marker_stroke = Stroke::new(Color::BLACK, 1.0);

            if self.allowed_resize_borders.contains(ResizeBorder::Left) {
                let marker = Rect::new(rect.left(), marker_y, GRIP_MARKER_SIZE, GRIP_MARKER_SIZE);
                renderer.fill_rect(marker, Color::WHITE);
                renderer.stroke_rect(marker, &marker_stroke);
            }
            if self.allowed_resize_borders.contains(ResizeBorder::Right) {
                let marker = Rect::new(
                    rect.right() - GRIP_MARKER_SIZE,
                    marker_y,
                    GRIP_MARKER_SIZE,
                    GRIP_MARKER_SIZE,
                );
                renderer.fill_rect(marker, Color::WHITE);
                renderer.stroke_rect(marker, &marker_stroke);
            }
        }
    }

    /// Render a standalone drag-preview image of this block at the origin of
    /// the given renderer.
    ///
    /// The preview shows up to `min(total_column_count, max_col_span)`
    /// columns at the block's last-known average per-column width, painted
    /// with the opaque drag color over a solid underlay. The left border is
    /// always drawn as resizable (a freshly dropped block starts fully
    /// inside view on its left edge); the right border only if the full
    /// logical width fits within `max_col_span`.
    ///
    /// Persistent block state is untouched: all temporary flag changes are
    /// applied to a scratch copy. Returns the preview size, or `None` if the
    /// block has never been rendered.
    pub fn build_drag_preview(
        &self,
        renderer: &mut dyn Renderer,
        max_col_span: i32,
    ) -> Option<Size> {
        let bounds = self.last_rendered_bounds?;
        let font = self.last_rendered_font.clone().unwrap_or_default();

        let mut preview = self.clone();
        preview.paint_color = self.drag_color;
        preview.selected = false;
        preview.allowed_resize_borders.insert(ResizeBorder::Left);
        if self.total_column_count <= max_col_span {
            preview.allowed_resize_borders.insert(ResizeBorder::Right);
        }

        // Estimate full-size bounds even when the block is clipped at a
        // boundary: scale by the average cell width of the last render.
        let average_cell_width = bounds.width() / self.colspan_count as f32;
        let span = self.total_column_count.min(max_col_span);
        let preview_bounds = Rect::new(
            0.0,
            0.0,
            span as f32 * average_cell_width,
            bounds.height(),
        );

        let (rect, path) = preview.compute_display_path(preview_bounds);
        renderer.fill_rounded_rect(path, Color::WHITE);
        preview.render_parts(renderer, rect, path, &font);

        Some(preview_bounds.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grid_overlay_render::{DisplayListRenderer, DrawCommand};

    fn test_block() -> Block {
        Block::new(
            BlockId(1),
            RowId(10),
            4,
            3,
            Color::from_rgb8(200, 60, 60),
        )
    }

    #[test]
    fn test_new_block_defaults() {
        let block = test_block();
        assert_eq!(block.colspan_start(), 4);
        assert_eq!(block.colspan_count(), 3);
        assert_eq!(block.total_column_count(), 3);
        assert_eq!(block.allowed_resize_borders(), ResizeBorders::NONE);
        assert!(!block.is_selected());
        assert!(!block.is_read_only());
    }

    #[test]
    fn test_color_variants() {
        let block = test_block();
        assert_eq!(block.color().to_rgba8(), [200, 60, 60, 175]);
        assert_eq!(block.drag_color().to_rgba8(), [200, 60, 60, 255]);
    }

    #[test]
    fn test_contrast_text_color_extremes() {
        assert_eq!(
            Block::contrast_text_color(Color::from_rgb8(255, 255, 255)),
            Color::BLACK
        );
        assert_eq!(
            Block::contrast_text_color(Color::from_rgb8(0, 0, 0)),
            Color::WHITE
        );
    }

    #[test]
    fn test_contrast_text_color_favors_green() {
        // Saturated green reads as bright, saturated blue as dark.
        assert_eq!(
            Block::contrast_text_color(Color::from_rgb8(0, 255, 0)),
            Color::BLACK
        );
        assert_eq!(
            Block::contrast_text_color(Color::from_rgb8(0, 0, 255)),
            Color::WHITE
        );
    }

    #[test]
    fn test_display_path_rounding_follows_resize_borders() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 20.0);

        let mut block = test_block();
        block.set_allowed_resize_borders(ResizeBorders::BOTH);
        let (_, path) = block.compute_display_path(bounds);
        assert_eq!(path.radii, CornerRadii::uniform(5.0));

        block.set_allowed_resize_borders(ResizeBorders::LEFT);
        let (_, path) = block.compute_display_path(bounds);
        assert_eq!(path.radii, CornerRadii::left_only(5.0));

        block.set_allowed_resize_borders(ResizeBorders::RIGHT);
        let (_, path) = block.compute_display_path(bounds);
        assert_eq!(path.radii, CornerRadii::right_only(5.0));

        block.set_allowed_resize_borders(ResizeBorders::NONE);
        let (rect, path) = block.compute_display_path(bounds);
        assert!(path.radii.is_zero());
        // Vertical trim always applies; horizontal trim only on resizable sides.
        assert_eq!(rect.height(), 20.0 - 6.0);
        assert_eq!(rect.width(), 100.0);
    }

    #[test]
    fn test_adjust_colspan_left_border() {
        let mut block = test_block(); // spans 4..=6
        assert!(block.would_colspan_change(ResizeBorder::Left, 2));
        assert!(block.adjust_colspan(ResizeBorder::Left, 2));
        assert_eq!(block.colspan_start(), 2);
        assert_eq!(block.colspan_count(), 5);
        assert_eq!(block.total_column_count(), 5);
    }

    #[test]
    fn test_adjust_colspan_right_border() {
        let mut block = test_block(); // spans 4..=6
        assert!(block.adjust_colspan(ResizeBorder::Right, 8));
        assert_eq!(block.colspan_start(), 4);
        assert_eq!(block.colspan_count(), 5);
        assert_eq!(block.total_column_count(), 5);
    }

    #[test]
    fn test_adjust_colspan_cannot_shrink_below_one_column() {
        let mut block = test_block(); // spans 4..=6

        // Dragging the left border past the right edge clamps to one column.
        assert!(block.adjust_colspan(ResizeBorder::Left, 99));
        assert_eq!(block.colspan_start(), 6);
        assert_eq!(block.colspan_count(), 1);

        // Repeating the same resize is a no-op once the minimum is reached.
        assert!(!block.would_colspan_change(ResizeBorder::Left, 99));
        assert!(!block.adjust_colspan(ResizeBorder::Left, 99));
        assert_eq!(block.colspan_count(), 1);

        // Same for the right border.
        assert!(!block.adjust_colspan(ResizeBorder::Right, -5));
        assert_eq!(block.colspan_count(), 1);
        assert_eq!(block.colspan_start(), 6);
    }

    #[test]
    fn test_total_column_count_tracks_resizes() {
        let mut block = test_block();
        block.adjust_colspan(ResizeBorder::Right, 4); // shrink 3 -> 1
        assert_eq!(block.total_column_count(), 1);
        block.adjust_colspan(ResizeBorder::Right, 9); // grow 1 -> 6
        assert_eq!(block.total_column_count(), 6);
    }

    #[test]
    fn test_hit_test_resize_zone() {
        let mut block = test_block();
        block.set_allowed_resize_borders(ResizeBorders::BOTH);

        let mut renderer = DisplayListRenderer::new();
        block.render(
            &mut renderer,
            Rect::new(100.0, 0.0, 80.0, 20.0),
            &FontSpec::default(),
        );

        // Trim (4) + grip zone (4) = 8 px band on each edge.
        assert_eq!(
            block.hit_test_resize_zone(Point::new(105.0, 10.0)),
            Some(ResizeBorder::Left)
        );
        assert_eq!(
            block.hit_test_resize_zone(Point::new(176.0, 10.0)),
            Some(ResizeBorder::Right)
        );
        assert_eq!(block.hit_test_resize_zone(Point::new(140.0, 10.0)), None);
    }

    #[test]
    fn test_hit_test_respects_allowed_borders_and_read_only() {
        let mut block = test_block();
        block.set_allowed_resize_borders(ResizeBorders::RIGHT);

        let mut renderer = DisplayListRenderer::new();
        block.render(
            &mut renderer,
            Rect::new(100.0, 0.0, 80.0, 20.0),
            &FontSpec::default(),
        );

        // Left band hit, but the left border is not resizable.
        assert_eq!(block.hit_test_resize_zone(Point::new(105.0, 10.0)), None);
        assert_eq!(
            block.hit_test_resize_zone(Point::new(176.0, 10.0)),
            Some(ResizeBorder::Right)
        );

        block.set_read_only(true);
        assert_eq!(block.hit_test_resize_zone(Point::new(176.0, 10.0)), None);
    }

    #[test]
    fn test_hit_test_before_first_render_is_none() {
        let mut block = test_block();
        block.set_allowed_resize_borders(ResizeBorders::BOTH);
        assert_eq!(block.hit_test_resize_zone(Point::new(0.0, 0.0)), None);
    }

    #[test]
    fn test_render_paints_selection_grips_per_border() {
        let mut block = test_block();
        block.set_selected(true);
        block.set_allowed_resize_borders(ResizeBorders::LEFT);

        let mut renderer = DisplayListRenderer::new();
        block.render(
            &mut renderer,
            Rect::new(0.0, 0.0, 80.0, 20.0),
            &FontSpec::default(),
        );

        let commands = renderer.finish().expect("balanced paint");
        let grip_fills = commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillRect { color, .. } if *color == Color::WHITE))
            .count();
        assert_eq!(grip_fills, 1);
        assert!(commands
            .iter()
            .any(|c| matches!(c, DrawCommand::StrokeRoundedRect { .. })));
    }

    #[test]
    fn test_drag_preview_is_side_effect_free() {
        let mut block = test_block();
        block.set_selected(true);
        block.set_allowed_resize_borders(ResizeBorders::NONE);

        let mut renderer = DisplayListRenderer::new();
        block.render(
            &mut renderer,
            Rect::new(0.0, 0.0, 90.0, 20.0),
            &FontSpec::default(),
        );

        let mut preview_renderer = DisplayListRenderer::new();
        let size = block
            .build_drag_preview(&mut preview_renderer, 10)
            .expect("rendered block has preview");

        // 3 columns at 30 px average width.
        assert_eq!(size, Size::new(90.0, 20.0));
        assert!(block.is_selected());
        assert_eq!(block.allowed_resize_borders(), ResizeBorders::NONE);

        // The preview paints with the opaque drag color, not the
        // translucent paint color.
        let commands = preview_renderer.finish().expect("balanced preview");
        assert!(commands.iter().any(|c| matches!(
            c,
            DrawCommand::FillRoundedRect { color, .. } if *color == block.drag_color()
        )));
    }

    #[test]
    fn test_drag_preview_width_capped_by_max_col_span() {
        let mut block = test_block();
        block.set_total_column_count(12);

        let mut renderer = DisplayListRenderer::new();
        block.render(
            &mut renderer,
            Rect::new(0.0, 0.0, 90.0, 20.0),
            &FontSpec::default(),
        );

        let mut preview_renderer = DisplayListRenderer::new();
        let size = block
            .build_drag_preview(&mut preview_renderer, 5)
            .expect("preview");
        // Capped at 5 columns of the 30 px average width.
        assert_eq!(size.width, 150.0);
    }

    #[test]
    fn test_drag_preview_requires_a_prior_render() {
        let block = test_block();
        let mut renderer = DisplayListRenderer::new();
        assert!(block.build_drag_preview(&mut renderer, 10).is_none());
    }

    #[test]
    fn test_tag_round_trip() {
        let mut block = test_block();
        block.set_tag(String::from("payload"));
        assert_eq!(block.tag::<String>().map(String::as_str), Some("payload"));
        assert!(block.tag::<i32>().is_none());
    }
}
