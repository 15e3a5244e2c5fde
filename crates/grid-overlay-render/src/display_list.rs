//! A recording [`Renderer`] backend.
//!
//! [`DisplayListRenderer`] records every drawing operation as a
//! [`DrawCommand`]. It serves two purposes:
//!
//! - The test backend: overlay tests paint into it and assert on the
//!   recorded commands instead of pixels.
//! - The drag-preview capture target: the host records the preview drawing
//!   and replays it against its real backend (or converts it to a bitmap)
//!   when starting a native drag gesture.

use crate::error::{RenderError, RenderResult};
use crate::paint::Stroke;
use crate::renderer::{FontSpec, Image, Renderer};
use crate::types::{Color, Rect, RoundedRect};

/// A single recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Save,
    Restore,
    Translate { tx: f32, ty: f32 },
    ClipRect(Rect),
    RestoreClip,
    FillRect { rect: Rect, color: Color },
    FillRoundedRect { rect: RoundedRect, color: Color },
    StrokeRect { rect: Rect, stroke: Stroke },
    StrokeRoundedRect { rect: RoundedRect, stroke: Stroke },
    DrawImage { image: Image, dest: Rect },
    FillText { text: String, rect: Rect, font: FontSpec, color: Color },
}

/// A renderer that records draw commands instead of rasterizing.
#[derive(Debug, Default)]
pub struct DisplayListRenderer {
    commands: Vec<DrawCommand>,
    state_depth: i32,
    clip_depth: i32,
}

impl DisplayListRenderer {
    /// Create a new, empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// The commands recorded so far.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Discard all recorded commands and reset stack bookkeeping.
    pub fn clear(&mut self) {
        self.commands.clear();
        self.state_depth = 0;
        self.clip_depth = 0;
    }

    /// Finish recording and return the command list.
    ///
    /// Fails if `save`/`restore` or `clip_rect`/`restore_clip` calls were
    /// left unbalanced, which would corrupt state on a real backend.
    pub fn finish(self) -> RenderResult<Vec<DrawCommand>> {
        if self.state_depth != 0 {
            return Err(RenderError::UnbalancedState(self.state_depth));
        }
        if self.clip_depth != 0 {
            return Err(RenderError::UnbalancedClip(self.clip_depth));
        }
        Ok(self.commands)
    }
}

impl Renderer for DisplayListRenderer {
    fn save(&mut self) {
        self.state_depth += 1;
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.state_depth -= 1;
        self.commands.push(DrawCommand::Restore);
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.commands.push(DrawCommand::Translate { tx, ty });
    }

    fn clip_rect(&mut self, rect: Rect) {
        self.clip_depth += 1;
        self.commands.push(DrawCommand::ClipRect(rect));
    }

    fn restore_clip(&mut self) {
        self.clip_depth -= 1;
        self.commands.push(DrawCommand::RestoreClip);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn fill_rounded_rect(&mut self, rect: RoundedRect, color: Color) {
        self.commands.push(DrawCommand::FillRoundedRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke) {
        self.commands.push(DrawCommand::StrokeRect {
            rect,
            stroke: stroke.clone(),
        });
    }

    fn stroke_rounded_rect(&mut self, rect: RoundedRect, stroke: &Stroke) {
        self.commands.push(DrawCommand::StrokeRoundedRect {
            rect,
            stroke: stroke.clone(),
        });
    }

    fn draw_image(&mut self, image: &Image, dest: Rect) {
        self.commands.push(DrawCommand::DrawImage {
            image: *image,
            dest,
        });
    }

    fn fill_text(&mut self, text: &str, rect: Rect, font: &FontSpec, color: Color) {
        self.commands.push(DrawCommand::FillText {
            text: text.to_string(),
            rect,
            font: font.clone(),
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_commands_in_order() {
        let mut renderer = DisplayListRenderer::new();
        renderer.save();
        renderer.translate(5.0, 10.0);
        renderer.fill_rect(Rect::new(0.0, 0.0, 4.0, 4.0), Color::WHITE);
        renderer.restore();

        let commands = renderer.finish().expect("balanced recording");
        assert_eq!(commands.len(), 4);
        assert_eq!(commands[0], DrawCommand::Save);
        assert_eq!(commands[1], DrawCommand::Translate { tx: 5.0, ty: 10.0 });
        assert!(matches!(commands[2], DrawCommand::FillRect { .. }));
        assert_eq!(commands[3], DrawCommand::Restore);
    }

    #[test]
    fn test_unbalanced_save_is_an_error() {
        let mut renderer = DisplayListRenderer::new();
        renderer.save();
        renderer.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::BLACK);
        assert_eq!(renderer.finish(), Err(RenderError::UnbalancedState(1)));
    }

    #[test]
    fn test_unbalanced_clip_is_an_error() {
        let mut renderer = DisplayListRenderer::new();
        renderer.clip_rect(Rect::new(0.0, 0.0, 8.0, 8.0));
        assert_eq!(renderer.finish(), Err(RenderError::UnbalancedClip(1)));
    }

    #[test]
    fn test_clear_resets_bookkeeping() {
        let mut renderer = DisplayListRenderer::new();
        renderer.save();
        renderer.clip_rect(Rect::new(0.0, 0.0, 8.0, 8.0));
        renderer.clear();
        assert!(renderer.commands().is_empty());

        renderer.fill_text(
            "hello",
            Rect::new(0.0, 0.0, 40.0, 12.0),
            &FontSpec::default(),
            Color::BLACK,
        );
        let commands = renderer.finish().expect("balanced after clear");
        assert_eq!(commands.len(), 1);
    }
}
