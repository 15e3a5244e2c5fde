//! Geometry, color, and the renderer abstraction for Grid Overlay.
//!
//! This crate provides the drawing-side vocabulary of the overlay:
//!
//! - Basic geometry and color types ([`Point`], [`Size`], [`Rect`],
//!   [`RoundedRect`], [`CornerRadii`], [`Color`])
//! - Paint types ([`Stroke`])
//! - The [`Renderer`] trait, the seam between the overlay and whatever 2D
//!   backend the host paints with
//! - [`DisplayListRenderer`], a recording backend used for tests and for
//!   capturing drag-preview images

pub mod display_list;
pub mod error;
pub mod paint;
pub mod renderer;
pub mod types;

pub use display_list::{DisplayListRenderer, DrawCommand};
pub use error::{RenderError, RenderResult};
pub use paint::Stroke;
pub use renderer::{FontSpec, Image, Renderer};
pub use types::{Color, CornerRadii, Point, Rect, RoundedRect, Size};
