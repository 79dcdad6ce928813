use glam::Vec2;
use serde::Serialize;

use super::{Canvas2d, Fill, Rgba};

/// One recorded drawing operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawCall {
    /// [`Canvas2d::fill_rect`].
    Rect {
        /// Top-left corner.
        origin: Vec2,
        /// Width and height.
        size: Vec2,
        /// Fill color.
        color: Rgba,
    },
    /// [`Canvas2d::stroke_line`].
    Line {
        /// Start point.
        from: Vec2,
        /// End point.
        to: Vec2,
        /// Stroke width.
        width: f32,
        /// Stroke color.
        color: Rgba,
    },
    /// [`Canvas2d::fill_circle`].
    FillCircle {
        /// Center.
        center: Vec2,
        /// Radius.
        radius: f32,
        /// Paint.
        fill: Fill,
    },
    /// [`Canvas2d::stroke_circle`].
    StrokeCircle {
        /// Center.
        center: Vec2,
        /// Radius.
        radius: f32,
        /// Stroke width.
        width: f32,
        /// Stroke color.
        color: Rgba,
    },
    /// [`Canvas2d::fill_text`].
    Text {
        /// Text content.
        text: String,
        /// Baseline start.
        at: Vec2,
        /// CSS font shorthand.
        font: String,
        /// Text color.
        color: Rgba,
    },
}

/// Canvas that records every call instead of rasterizing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingCanvas {
    width: f32,
    height: f32,
    calls: Vec<DrawCall>,
}

impl RecordingCanvas {
    /// Empty log for a `width × height` surface.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            calls: Vec::new(),
        }
    }

    /// Change the reported size. Recorded calls are dropped, as a real
    /// canvas clears when resized.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.calls.clear();
    }

    /// Calls since construction, the last resize or the last [`Self::clear`].
    #[must_use]
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Forget recorded calls.
    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl Canvas2d for RecordingCanvas {
    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Rgba) {
        self.calls.push(DrawCall::Rect {
            origin,
            size,
            color,
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        self.calls.push(DrawCall::Line {
            from,
            to,
            width,
            color,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, fill: Fill) {
        self.calls.push(DrawCall::FillCircle {
            center,
            radius,
            fill,
        });
    }

    fn stroke_circle(
        &mut self,
        center: Vec2,
        radius: f32,
        width: f32,
        color: Rgba,
    ) {
        self.calls.push(DrawCall::StrokeCircle {
            center,
            radius,
            width,
            color,
        });
    }

    fn fill_text(&mut self, text: &str, at: Vec2, font: &str, color: Rgba) {
        self.calls.push(DrawCall::Text {
            text: text.to_owned(),
            at,
            font: font.to_owned(),
            color,
        });
    }
}
