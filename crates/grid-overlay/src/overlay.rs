//! The overlay renderer and interaction controller.
//!
//! [`OverlayRenderer`] owns the row index (and through it every [`Block`]),
//! computes per-row clipped geometry, drives hit-testing, and implements the
//! pointer state machine for select, drag-move, resize, and drop.
//!
//! # Host integration
//!
//! The host grid forwards paint passes ([`render`](OverlayRenderer::render))
//! and raw pointer events ([`mouse_press`](OverlayRenderer::mouse_press),
//! [`mouse_move`](OverlayRenderer::mouse_move),
//! [`mouse_release`](OverlayRenderer::mouse_release)). When `mouse_move`
//! returns a [`DragGesture`], the host begins its native drag loop: it calls
//! [`paint_drag_preview`](OverlayRenderer::paint_drag_preview) to capture the
//! drag image, then routes the loop's hover and drop callbacks to
//! [`drag_over`](OverlayRenderer::drag_over) and
//! [`drag_drop`](OverlayRenderer::drag_drop).
//!
//! All entry points run on the host's serial UI dispatch context; the
//! controller performs no internal threading.

use std::collections::HashMap;
use std::rc::Rc;

use slotmap::{new_key_type, SlotMap};
use tracing::{debug, trace};

use grid_overlay_core::logging::targets;
use grid_overlay_core::Signal;
use grid_overlay_render::{FontSpec, Point, Rect, Renderer, Size};

use crate::adapter::GridAdapter;
use crate::block::{Block, BlockId, ResizeBorder, ResizeBorders, RowId};
use crate::cursor::CursorShape;
use crate::events::{
    BlockMovedEvent, BlockResizedEvent, DropStatus, MouseButton, MouseMoveEvent, MousePressEvent,
    MouseReleaseEvent,
};

new_key_type! {
    /// Arena key for a block owned by the overlay.
    pub struct BlockKey;
}

/// Offset of the pointer hotspot within the drag-preview image.
pub const DRAG_IMAGE_HOTSPOT: Point = Point::new(10.0, 10.0);

/// Minimum pointer travel before an armed press turns into a drag gesture.
///
/// A platform affordance: defaults match the common desktop drag distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragThresholds {
    pub horizontal: f32,
    pub vertical: f32,
}

impl Default for DragThresholds {
    fn default() -> Self {
        Self {
            horizontal: 4.0,
            vertical: 4.0,
        }
    }
}

/// Instruction to the host to begin its native drag-and-drop loop.
///
/// Returned by [`OverlayRenderer::mouse_move`] when the drag threshold is
/// exceeded over a movable block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragGesture {
    /// The block being dragged.
    pub block_id: BlockId,
    /// Where to anchor the drag image relative to the pointer.
    pub hotspot: Point,
}

/// What the pointer is currently over, tracked on idle mouse moves.
#[derive(Debug, Default)]
struct HoverState {
    key: Option<BlockKey>,
    row_pos: Option<i32>,
    col_pos: Option<i32>,
    resize_zone: Option<ResizeBorder>,
}

/// The pointer interaction state machine.
#[derive(Debug, Clone, Copy)]
enum Interaction {
    Idle,
    /// Primary button went down on a movable block; waiting for the drag
    /// threshold.
    DragArmed { start: Point },
    /// The host's native drag loop is running for this block.
    Dragging {
        key: BlockKey,
        original_row_pos: i32,
        /// Column the drag started over; reported in the moved notification.
        original_col_pos: i32,
        /// Pre-move placement, restored exactly if the host cancels.
        original_colspan_start: i32,
        original_colspan: i32,
    },
    /// Live resize of one block border.
    Resizing {
        key: BlockKey,
        border: ResizeBorder,
        row_pos: i32,
        /// Column under the pointer when the resize started; the revert
        /// target if the host cancels.
        original_col: i32,
    },
}

/// Renders colored block annotations over a host grid and manages the
/// pointer interactions that mutate them.
pub struct OverlayRenderer {
    adapter: Rc<dyn GridAdapter>,

    blocks: SlotMap<BlockKey, Block>,
    ids: HashMap<BlockId, BlockKey>,
    /// Row index: block keys per row, ascending by colspan start. The order
    /// is both paint order and hit-test priority (later = on top).
    rows: HashMap<RowId, Vec<BlockKey>>,

    first_col_pos: i32,
    last_col_pos: i32,
    col_count: i32,

    // Updated on each render pass.
    first_visible_row_pos: i32,
    last_visible_row_pos: i32,

    block_text_font: FontSpec,
    drag_thresholds: DragThresholds,

    selected: Option<BlockKey>,
    hover: HoverState,
    interaction: Interaction,
    cursor: CursorShape,

    /// Raised after a drop moved a block. Cancelable.
    pub block_moved: Signal<BlockMovedEvent>,
    /// Raised when a resize gesture ends. Cancelable.
    pub block_resized: Signal<BlockResizedEvent>,
    /// Raised when the cursor hint changes; the host applies the shape to
    /// its window.
    pub cursor_changed: Signal<CursorShape>,
}

impl OverlayRenderer {
    /// Create a controller over the given host grid.
    ///
    /// `block_text_font` is the font used for block labels; it can be
    /// changed later via
    /// [`set_block_text_font`](Self::set_block_text_font).
    pub fn new(adapter: Rc<dyn GridAdapter>, block_text_font: FontSpec) -> Self {
        Self {
            adapter,
            blocks: SlotMap::with_key(),
            ids: HashMap::new(),
            rows: HashMap::new(),
            first_col_pos: 0,
            last_col_pos: 0,
            col_count: 0,
            first_visible_row_pos: 0,
            last_visible_row_pos: 0,
            block_text_font,
            drag_thresholds: DragThresholds::default(),
            selected: None,
            hover: HoverState::default(),
            interaction: Interaction::Idle,
            cursor: CursorShape::Arrow,
            block_moved: Signal::new(),
            block_resized: Signal::new(),
            cursor_changed: Signal::new(),
        }
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    /// Populate the overlay wholesale from a block collection.
    ///
    /// Blocks are grouped by row id, clamped into the column range
    /// `[first_col_pos, last_col_pos]`, given their initial resize grips,
    /// and sorted within each row by colspan start. Re-invocation fully
    /// replaces prior state, including selection and any interaction in
    /// progress.
    pub fn initialize_overlay(&mut self, blocks: Vec<Block>, first_col_pos: i32, last_col_pos: i32) {
        self.first_col_pos = first_col_pos;
        self.last_col_pos = last_col_pos;
        self.col_count = last_col_pos - first_col_pos + 1;

        self.blocks.clear();
        self.ids.clear();
        self.rows.clear();
        self.selected = None;
        self.hover = HoverState::default();
        self.interaction = Interaction::Idle;

        debug!(
            target: targets::PAINT,
            block_count = blocks.len(),
            first_col_pos,
            last_col_pos,
            "initializing overlay"
        );

        for mut block in blocks {
            Self::clamp_to_overlay(&mut block, first_col_pos, last_col_pos);
            Self::init_resize_grips(&mut block, first_col_pos, last_col_pos);

            let id = block.id();
            let row_id = block.row_id();
            let key = self.blocks.insert(block);
            self.ids.insert(id, key);
            self.rows.entry(row_id).or_default().push(key);
        }

        for keys in self.rows.values_mut() {
            keys.sort_by_key(|&key| self.blocks[key].colspan_start());
        }
    }

    /// Clamp a block into the overlay column range.
    ///
    /// Never rejects: the start is pulled into range and the count shrunk to
    /// fit (floor one column). `total_column_count` is never adjusted here,
    /// so a clipped block remembers its full logical width.
    fn clamp_to_overlay(block: &mut Block, first_col_pos: i32, last_col_pos: i32) {
        let start = block.colspan_start().clamp(first_col_pos, last_col_pos);
        block.set_colspan_start(start);
        if block.colspan_end() > last_col_pos {
            block.set_colspan_count(last_col_pos - start + 1);
        }
        if block.colspan_count() < 1 {
            block.set_colspan_count(1);
        }
    }

    /// Derive a block's resize grips from how the overlay boundary clips it.
    ///
    /// A fully visible block is resizable on both sides. A clipped block
    /// loses the grip on each edge pinned to the boundary. A clipped block
    /// touching neither boundary keeps whatever grips it had.
    fn init_resize_grips(block: &mut Block, first_col_pos: i32, last_col_pos: i32) {
        if block.colspan_count() < block.total_column_count() {
            let at_first = block.colspan_start() == first_col_pos;
            let at_last = block.colspan_end() == last_col_pos;
            match (at_first, at_last) {
                (true, true) => block.set_allowed_resize_borders(ResizeBorders::NONE),
                (true, false) => block.set_allowed_resize_borders(ResizeBorders::RIGHT),
                (false, true) => block.set_allowed_resize_borders(ResizeBorders::LEFT),
                (false, false) => {}
            }
        } else {
            block.set_allowed_resize_borders(ResizeBorders::BOTH);
        }
    }

    // =========================================================================
    // Geometry and painting
    // =========================================================================

    /// Union the cell rectangles for each column of the block's span,
    /// accumulating width left to right from the first resolvable cell.
    ///
    /// `None` when no cell resolves (row not currently laid out).
    fn compute_row_span_bounds(&self, row_pos: i32, block: &Block) -> Option<Rect> {
        let mut bounds: Option<Rect> = None;
        for col in block.colspan_start()..=block.colspan_end() {
            let cell = self.adapter.cell_bounds(row_pos, col);
            match &mut bounds {
                None if !cell.is_empty() => bounds = Some(cell),
                Some(acc) => acc.size.width += cell.width(),
                None => {}
            }
        }
        bounds
    }

    /// Clamp, lay out, and paint one block of a row, clipping away whatever
    /// would land over frozen columns.
    fn draw_block(
        &mut self,
        key: BlockKey,
        row_pos: i32,
        renderer: &mut dyn Renderer,
        left_scroll_boundary: f32,
    ) {
        let (first, last) = (self.first_col_pos, self.last_col_pos);
        let Some(block) = self.blocks.get_mut(key) else {
            return;
        };
        Self::clamp_to_overlay(block, first, last);

        let bounds = {
            let block = &self.blocks[key];
            self.compute_row_span_bounds(row_pos, block)
        };
        let Some(bounds) = bounds else {
            return;
        };

        // The full-width bounds may start under the frozen columns; trim the
        // clip to the scroll boundary so horizontal scrolling reveals the
        // block instead of painting it over the frozen area.
        let clipped = bounds.left() < left_scroll_boundary;
        if clipped {
            let mut clip = bounds;
            clip.size.width -= left_scroll_boundary - bounds.left();
            clip.origin.x = left_scroll_boundary;
            renderer.clip_rect(clip);
        }

        let font = self.block_text_font.clone();
        self.blocks[key].render(renderer, bounds, &font);

        if clipped {
            renderer.restore_clip();
        }
    }

    /// Paint every block of every row in the visible range.
    ///
    /// Called once per host paint pass. The visible row range is also
    /// remembered for selection bookkeeping between paints.
    pub fn render(
        &mut self,
        renderer: &mut dyn Renderer,
        first_visible_row_pos: i32,
        last_visible_row_pos: i32,
    ) {
        self.first_visible_row_pos = first_visible_row_pos;
        self.last_visible_row_pos = last_visible_row_pos;

        if self.rows.is_empty() {
            return;
        }

        trace!(
            target: targets::PAINT,
            first_visible_row_pos,
            last_visible_row_pos,
            "rendering overlay"
        );

        let left_scroll_boundary = self.adapter.left_scroll_boundary();
        for row_pos in first_visible_row_pos..=last_visible_row_pos {
            let Some(row_id) = self.adapter.row_id_at(row_pos) else {
                continue;
            };
            let Some(keys) = self.rows.get(&row_id) else {
                continue;
            };
            for key in keys.clone() {
                self.draw_block(key, row_pos, renderer, left_scroll_boundary);
            }
        }
    }

    // =========================================================================
    // Hit testing and queries
    // =========================================================================

    fn topmost_key_at(&self, row_pos: i32, col_pos: i32) -> Option<BlockKey> {
        let row_id = self.adapter.row_id_at(row_pos)?;
        let keys = self.rows.get(&row_id)?;

        // Last block spanning the column wins: it was drawn on top.
        let mut topmost = None;
        for &key in keys {
            let block = &self.blocks[key];
            if col_pos >= block.colspan_start() && col_pos <= block.colspan_end() {
                topmost = Some(key);
            }
        }
        topmost
    }

    /// The top-most block at the given row/column, if any.
    pub fn topmost_block_at(&self, row_pos: i32, col_pos: i32) -> Option<&Block> {
        self.topmost_key_at(row_pos, col_pos)
            .map(|key| &self.blocks[key])
    }

    /// The currently selected block, if any.
    pub fn selected_block(&self) -> Option<&Block> {
        self.selected.map(|key| &self.blocks[key])
    }

    /// Look up a block by its host-supplied id.
    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.ids.get(&id).map(|&key| &self.blocks[key])
    }

    /// The blocks on a row, in paint order.
    pub fn blocks_in_row(&self, row_id: RowId) -> impl Iterator<Item = &Block> {
        self.rows
            .get(&row_id)
            .map(|keys| keys.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(|&key| &self.blocks[key])
    }

    /// Number of blocks in the overlay.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// The inclusive overlay column range set by the last initialization.
    pub fn overlay_area(&self) -> (i32, i32) {
        (self.first_col_pos, self.last_col_pos)
    }

    /// The cursor shape the host should currently display.
    pub fn cursor_hint(&self) -> CursorShape {
        self.cursor
    }

    /// Font used for block labels.
    pub fn block_text_font(&self) -> &FontSpec {
        &self.block_text_font
    }

    pub fn set_block_text_font(&mut self, font: FontSpec) {
        self.block_text_font = font;
    }

    /// Pointer travel needed before a press becomes a drag.
    pub fn drag_thresholds(&self) -> DragThresholds {
        self.drag_thresholds
    }

    pub fn set_drag_thresholds(&mut self, thresholds: DragThresholds) {
        self.drag_thresholds = thresholds;
    }

    // =========================================================================
    // Pointer state machine
    // =========================================================================

    /// Forward a pointer move.
    ///
    /// Returns a [`DragGesture`] when an armed press crosses the drag
    /// threshold; the host must then start its native drag loop.
    pub fn mouse_move(&mut self, event: &MouseMoveEvent) -> Option<DragGesture> {
        match self.interaction {
            Interaction::DragArmed { start } => {
                let crossed = (event.position.x - start.x).abs() > self.drag_thresholds.horizontal
                    || (event.position.y - start.y).abs() > self.drag_thresholds.vertical;
                if crossed {
                    return self.start_dragging(start);
                }
                None
            }
            Interaction::Resizing {
                key,
                border,
                row_pos,
                ..
            } => {
                self.resize_step(key, border, row_pos, event.position);
                None
            }
            Interaction::Idle | Interaction::Dragging { .. } => {
                self.track_hover(event.position);
                None
            }
        }
    }

    /// Forward a pointer press. Only the primary button drives interactions.
    pub fn mouse_press(&mut self, event: &MousePressEvent) {
        if event.button != MouseButton::Left {
            return;
        }

        self.select_block_under_cursor();

        let Some(key) = self.hover.key else {
            return;
        };
        if self.blocks[key].is_read_only() {
            return;
        }

        match self.hover.resize_zone {
            None => {
                self.interaction = Interaction::DragArmed {
                    start: event.position,
                };
                trace!(target: targets::INTERACTION, block = %self.blocks[key].id(), "drag armed");
            }
            Some(border) => {
                let (Some(row_pos), Some(col_pos)) = (self.hover.row_pos, self.hover.col_pos)
                else {
                    return;
                };
                self.interaction = Interaction::Resizing {
                    key,
                    border,
                    row_pos,
                    original_col: col_pos,
                };
                debug!(
                    target: targets::INTERACTION,
                    block = %self.blocks[key].id(),
                    ?border,
                    "resize started"
                );
            }
        }
    }

    /// Forward a pointer release.
    ///
    /// Ends an armed-but-never-dragged press as a plain click, or finishes a
    /// resize by raising the cancelable resized notification.
    pub fn mouse_release(&mut self, _event: &MouseReleaseEvent) {
        match self.interaction {
            Interaction::DragArmed { .. } => {
                self.interaction = Interaction::Idle;
            }
            Interaction::Resizing {
                key,
                border,
                row_pos,
                original_col,
            } => {
                self.interaction = Interaction::Idle;
                self.finish_resize(key, border, row_pos, original_col);
            }
            Interaction::Idle | Interaction::Dragging { .. } => {}
        }
    }

    /// Track the block, column, and resize zone under the pointer and keep
    /// the cursor hint current.
    fn track_hover(&mut self, position: Point) {
        self.hover.col_pos = self.adapter.col_at(position);
        self.hover.row_pos = self.adapter.row_at(position);

        self.hover.key = match (self.hover.row_pos, self.hover.col_pos) {
            (Some(row_pos), Some(col_pos)) => self.topmost_key_at(row_pos, col_pos),
            _ => None,
        };

        self.hover.resize_zone = self
            .hover
            .key
            .and_then(|key| self.blocks[key].hit_test_resize_zone(position));

        let shape = if self.hover.key.is_some() && self.hover.resize_zone.is_some() {
            CursorShape::ResizeHorizontal
        } else {
            CursorShape::Arrow
        };
        if shape != self.cursor {
            self.cursor = shape;
            self.cursor_changed.emit(shape);
        }
    }

    /// Commit a pending selection change: deselect the previous block,
    /// select the hovered one unless read-only, and repaint at most the two
    /// affected rows.
    fn select_block_under_cursor(&mut self) {
        if self.selected == self.hover.key {
            return;
        }

        let mut rows_to_invalidate: Vec<i32> = Vec::with_capacity(2);

        if let Some(old_key) = self.selected.take() {
            self.blocks[old_key].set_selected(false);

            // The deselected block's display row is found by scanning the
            // last-known visible range; sorting may have moved it since.
            let old_row_id = self.blocks[old_key].row_id();
            for row_pos in self.first_visible_row_pos..=self.last_visible_row_pos {
                if self.adapter.row_id_at(row_pos) == Some(old_row_id) {
                    rows_to_invalidate.push(row_pos);
                    break;
                }
            }
        }

        if let Some(key) = self.hover.key {
            if !self.blocks[key].is_read_only() {
                self.blocks[key].set_selected(true);
                self.selected = Some(key);
                if let Some(row_pos) = self.hover.row_pos {
                    rows_to_invalidate.push(row_pos);
                }
                trace!(target: targets::INTERACTION, block = %self.blocks[key].id(), "selected");
            }
        }

        rows_to_invalidate.dedup();
        self.adapter.invalidate_rows(&rows_to_invalidate);
    }

    // =========================================================================
    // Resizing
    // =========================================================================

    /// One live resize step: clamp the pointer's column into the overlay
    /// range and, if the host allows, adjust the colspan and repaint.
    fn resize_step(&mut self, key: BlockKey, border: ResizeBorder, row_pos: i32, position: Point) {
        let Some(col_pos) = self.adapter.col_at(position) else {
            return;
        };
        let resize_to_col = col_pos.clamp(self.first_col_pos, self.last_col_pos);

        let decision = {
            let block = &self.blocks[key];
            if !block.would_colspan_change(border, resize_to_col) {
                return;
            }
            self.adapter.can_resize(block, border, resize_to_col)
        };
        if !decision.allowed {
            return;
        }

        // A host-corrected boundary goes through the same minimum-width
        // clamp as the requested one.
        let boundary = decision.corrected_col.unwrap_or(resize_to_col);
        if self.blocks[key].adjust_colspan(border, boundary) {
            trace!(
                target: targets::INTERACTION,
                block = %self.blocks[key].id(),
                ?border,
                boundary,
                "resized"
            );
        }
        self.adapter.invalidate_rows(&[row_pos]);
    }

    /// Raise the cancelable resized notification; on veto, resize back
    /// toward the boundary column recorded at resize start.
    fn finish_resize(&mut self, key: BlockKey, border: ResizeBorder, row_pos: i32, original_col: i32) {
        let block_id = self.blocks[key].id();
        let event = BlockResizedEvent::new(block_id, row_pos);
        self.block_resized.emit(event.clone());

        if event.is_canceled() {
            debug!(target: targets::INTERACTION, block = %block_id, "resize canceled by host");
            if self.blocks[key].adjust_colspan(border, original_col) {
                self.adapter.invalidate_rows(&[row_pos]);
            }
        } else {
            debug!(target: targets::INTERACTION, block = %block_id, "resize finished");
        }
    }

    // =========================================================================
    // Drag and drop
    // =========================================================================

    /// Resolve the block under the armed press and hand the host a drag
    /// gesture to start.
    fn start_dragging(&mut self, start: Point) -> Option<DragGesture> {
        self.interaction = Interaction::Idle;

        let col_pos = self.adapter.col_at(start)?;
        let row_pos = self.adapter.row_at(start)?;
        let key = self.topmost_key_at(row_pos, col_pos)?;

        let block = &self.blocks[key];
        self.interaction = Interaction::Dragging {
            key,
            original_row_pos: row_pos,
            original_col_pos: col_pos,
            original_colspan_start: block.colspan_start(),
            original_colspan: block.colspan_count(),
        };
        debug!(
            target: targets::INTERACTION,
            block = %block.id(),
            row_pos,
            col_pos,
            "drag started"
        );

        Some(DragGesture {
            block_id: block.id(),
            hotspot: DRAG_IMAGE_HOTSPOT,
        })
    }

    /// Paint the drag image for the block currently being dragged.
    ///
    /// The host records this into its preferred backend when starting the
    /// native drag loop. Returns the image size, or `None` when no drag is
    /// active or the block has never been rendered.
    pub fn paint_drag_preview(&self, renderer: &mut dyn Renderer) -> Option<Size> {
        let Interaction::Dragging { key, .. } = self.interaction else {
            return None;
        };
        self.blocks[key].build_drag_preview(renderer, self.col_count)
    }

    /// Drag-loop hover callback: is the cell under `position` a valid drop
    /// target for the dragged block?
    ///
    /// A cell qualifies only if its column lies inside the overlay range and
    /// the host's drop policy accepts the triple.
    pub fn drag_over(&self, position: Point) -> DropStatus {
        let Interaction::Dragging { key, .. } = self.interaction else {
            return DropStatus::Rejected;
        };

        let (Some(col_pos), Some(row_pos)) =
            (self.adapter.col_at(position), self.adapter.row_at(position))
        else {
            return DropStatus::Rejected;
        };

        let in_area = self.first_col_pos <= col_pos && col_pos <= self.last_col_pos;
        if in_area && self.adapter.can_drop(&self.blocks[key], row_pos, col_pos) {
            DropStatus::Accepted
        } else {
            DropStatus::Rejected
        }
    }

    /// Drag-loop drop callback: move the dragged block to the cell under
    /// `position` and raise the cancelable moved notification.
    ///
    /// The drop is ignored when the position does not resolve or lands on
    /// the block's original row and start column. On veto, the block moves
    /// back to its original row, column, and colspan. Returns whether a move
    /// was performed (a vetoed move still counts; the notification fired).
    pub fn drag_drop(&mut self, position: Point) -> bool {
        let Interaction::Dragging {
            key,
            original_row_pos,
            original_col_pos,
            original_colspan_start,
            original_colspan,
        } = self.interaction
        else {
            return false;
        };
        self.interaction = Interaction::Idle;

        let (Some(new_col_pos), Some(new_row_pos)) =
            (self.adapter.col_at(position), self.adapter.row_at(position))
        else {
            return false;
        };

        // Dropping back onto the same position is a no-op.
        let moved_away = new_row_pos != original_row_pos
            || new_col_pos != self.blocks[key].colspan_start();
        if new_col_pos < self.first_col_pos || !moved_away {
            return false;
        }

        if !self.move_block(key, new_row_pos, new_col_pos, None) {
            return false;
        }
        self.reinit_grips_after_drop(key);
        self.adapter
            .invalidate_rows(&[new_row_pos, original_row_pos]);

        let block_id = self.blocks[key].id();
        debug!(
            target: targets::INTERACTION,
            block = %block_id,
            original_row_pos,
            original_col_pos,
            new_row_pos,
            new_col_pos,
            "block moved"
        );

        let event =
            BlockMovedEvent::new(block_id, original_row_pos, original_col_pos, new_row_pos);
        self.block_moved.emit(event.clone());

        if event.is_canceled() {
            debug!(target: targets::INTERACTION, block = %block_id, "move canceled by host");
            if self.move_block(
                key,
                original_row_pos,
                original_colspan_start,
                Some(original_colspan),
            ) {
                // The restore re-derives grips from the original clip; the
                // forced left grip is for fresh drops only.
                let (first, last) = (self.first_col_pos, self.last_col_pos);
                Self::init_resize_grips(&mut self.blocks[key], first, last);
                self.adapter
                    .invalidate_rows(&[new_row_pos, original_row_pos]);
            }
        }

        true
    }

    /// Drag-loop leave callback. The drag may still re-enter the surface;
    /// no state is discarded.
    pub fn drag_leave(&self) {
        trace!(target: targets::INTERACTION, "drag left surface");
    }

    /// Drag-loop teardown callback: the host's drag loop finished without a
    /// drop on this surface (escape, release elsewhere). Returns the
    /// interaction to rest so no stale drag preview remains.
    pub fn drag_end(&mut self) {
        if matches!(self.interaction, Interaction::Dragging { .. }) {
            trace!(target: targets::INTERACTION, "drag ended without drop");
            self.interaction = Interaction::Idle;
        }
    }

    /// Detach a block from its row, reassign it to the target row/column,
    /// and re-insert it sorted.
    ///
    /// With no colspan override, the displayed span becomes the full logical
    /// width trimmed to the overlay's right edge. Fails (no-op) only when
    /// the target row has no stable identity.
    fn move_block(
        &mut self,
        key: BlockKey,
        new_row_pos: i32,
        new_col_pos: i32,
        colspan_override: Option<i32>,
    ) -> bool {
        let Some(new_row_id) = self.adapter.row_id_at(new_row_pos) else {
            return false;
        };

        let old_row_id = self.blocks[key].row_id();
        if let Some(keys) = self.rows.get_mut(&old_row_id) {
            keys.retain(|&k| k != key);
            if keys.is_empty() {
                self.rows.remove(&old_row_id);
            }
        }

        let block = &mut self.blocks[key];
        block.set_row_id(new_row_id);
        block.set_colspan_start(new_col_pos);

        match colspan_override {
            Some(count) if count > 0 => block.set_colspan_count(count),
            _ => {
                let room = self.last_col_pos - new_col_pos + 1;
                block.set_colspan_count(block.total_column_count().min(room).max(1));
            }
        }

        let keys = self.rows.entry(new_row_id).or_default();
        keys.push(key);
        keys.sort_by_key(|&k| self.blocks[k].colspan_start());
        true
    }

    /// Recompute grips for a just-moved block and force the left grip on: a
    /// freshly dropped block always starts fully inside view on its left
    /// edge.
    fn reinit_grips_after_drop(&mut self, key: BlockKey) {
        let (first, last) = (self.first_col_pos, self.last_col_pos);
        let block = &mut self.blocks[key];
        Self::init_resize_grips(block, first, last);
        block.allow_resize_border(ResizeBorder::Left);
    }
}
