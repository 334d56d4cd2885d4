//! Tool state machine for raster edits
//!
//! One [`Tool`] is active at a time. A stroke is a begin / move* / end
//! sequence: the tool's effect is applied at the begin point and again at
//! every move point until the stroke ends. Moves outside a stroke do
//! nothing.
//!
//! Coordinates are canvas pixels already translated by the caller.

use image::Rgba;

use crate::error::Result;
use crate::models::{PixelStore, BLANK};

/// Editing tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// No raster effect
    #[default]
    Cursor,
    /// Paint one pixel with the brush color
    Pen,
    /// Reset one pixel to transparent
    Eraser,
    /// Paint the whole layer with the brush color
    Fill,
}

/// A canvas pixel coordinate. May lie outside the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Foreground color plus an independent opacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Brush {
    /// Only the RGB channels are used
    pub color: Rgba<u8>,
    pub opacity: u8,
}

impl Default for Brush {
    fn default() -> Self {
        Self { color: Rgba([255, 255, 255, 255]), opacity: 255 }
    }
}

impl Brush {
    /// The color actually written: brush RGB with the brush opacity as alpha.
    pub fn paint_color(&self) -> Rgba<u8> {
        let [r, g, b, _] = self.color.0;
        Rgba([r, g, b, self.opacity])
    }
}

#[derive(Debug, Clone, Default)]
pub struct EditEngine {
    tool: Tool,
    brush: Brush,
    drawing: bool,
}

impl EditEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Switch tools. Never touches raster data.
    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    pub fn brush(&self) -> Brush {
        self.brush
    }

    pub fn set_color(&mut self, color: Rgba<u8>) {
        self.brush.color = color;
    }

    pub fn set_opacity(&mut self, opacity: u8) {
        self.brush.opacity = opacity;
    }

    pub fn reset_brush(&mut self) {
        self.brush = Brush::default();
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// Apply the active tool once at `point`.
    ///
    /// Returns whether raster data was written. Pen and eraser reject points
    /// outside the canvas without writing anything.
    pub fn apply(&self, pixels: &mut PixelStore, point: Point) -> Result<bool> {
        match self.tool {
            Tool::Cursor => Ok(false),
            Tool::Pen => pixels.set(point.x, point.y, self.brush.paint_color()).map(|_| true),
            Tool::Eraser => pixels.set(point.x, point.y, BLANK).map(|_| true),
            Tool::Fill => {
                pixels.fill(self.brush.paint_color());
                Ok(true)
            }
        }
    }

    /// Start a stroke. A rejected begin point does not start one.
    pub fn begin(&mut self, pixels: &mut PixelStore, point: Point) -> Result<bool> {
        let changed = self.apply(pixels, point)?;
        self.drawing = true;
        Ok(changed)
    }

    /// Continue the stroke at `point`. Does nothing outside a stroke.
    pub fn move_to(&mut self, pixels: &mut PixelStore, point: Point) -> Result<bool> {
        if !self.drawing {
            return Ok(false);
        }
        self.apply(pixels, point)
    }

    /// Finish the stroke. Returns whether one was in progress.
    pub fn end(&mut self) -> bool {
        std::mem::replace(&mut self.drawing, false)
    }
}
