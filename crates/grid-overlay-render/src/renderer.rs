//! Core renderer trait defining the 2D drawing interface.
//!
//! This module defines the [`Renderer`] trait which provides the drawing
//! operations the overlay needs. Implementations can use any backend
//! (GPU, software rasterizer, a recording display list, ...); the overlay
//! only ever draws through this trait, one render call at a time, and never
//! retains the renderer between calls.

use crate::paint::Stroke;
use crate::types::{Color, Rect, RoundedRect, Size};

/// A font selection passed through to the host's text backend.
///
/// The overlay does not rasterize glyphs; it forwards the requested family
/// and size with each text draw and the backend resolves the actual font
/// resource.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    /// Font family name.
    pub family: String,
    /// Font size in pixels.
    pub size: f32,
}

impl FontSpec {
    /// Create a new font spec.
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
        }
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: "sans-serif".to_string(),
            size: 12.0,
        }
    }
}

/// A handle to an image resource owned by the host.
///
/// The overlay never decodes or stores pixel data; the host registers its
/// images with whatever backend it paints with and hands the overlay opaque
/// handles carrying the image's identity and natural size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Image {
    /// Host-assigned resource identifier.
    pub id: u64,
    /// Natural size of the image in pixels.
    pub size: Size,
}

impl Image {
    /// Create a new image handle.
    pub fn new(id: u64, size: Size) -> Self {
        Self { id, size }
    }
}

/// The 2D rendering trait.
///
/// # State Stack
///
/// The renderer maintains a state stack: [`save`](Self::save) pushes the
/// current transform, [`restore`](Self::restore) pops it. Clips are pushed
/// with [`clip_rect`](Self::clip_rect) and popped with
/// [`restore_clip`](Self::restore_clip); a clip set inside a `save`/`restore`
/// pair must be popped before the pair closes.
pub trait Renderer {
    /// Push the current transform state.
    fn save(&mut self);

    /// Pop the most recently saved transform state.
    fn restore(&mut self);

    /// Translate subsequent drawing by the given offset.
    fn translate(&mut self, tx: f32, ty: f32);

    /// Intersect the current clip with the given rectangle.
    fn clip_rect(&mut self, rect: Rect);

    /// Remove the most recently applied clip.
    fn restore_clip(&mut self);

    /// Fill a rectangle with a solid color.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Fill a rounded rectangle with a solid color.
    fn fill_rounded_rect(&mut self, rect: RoundedRect, color: Color);

    /// Stroke a rectangle outline.
    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke);

    /// Stroke a rounded rectangle outline. The stroke is inset so the
    /// outline stays within the rectangle bounds.
    fn stroke_rounded_rect(&mut self, rect: RoundedRect, stroke: &Stroke);

    /// Draw an image scaled into the destination rectangle.
    fn draw_image(&mut self, image: &Image, dest: Rect);

    /// Draw a single line of text inside the given rectangle.
    ///
    /// Layout is leading-aligned horizontally and centered vertically, and
    /// the text is clipped to the rectangle.
    fn fill_text(&mut self, text: &str, rect: Rect, font: &FontSpec, color: Color);
}
