//! Frame flattening

use image::{Rgba, RgbaImage};

use crate::models::Frame;

use super::blend::blit_over;

/// Background of every composite before any layer is drawn.
pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Flatten a frame's visible layers into one image.
///
/// Starts from a transparent canvas and draws layers from the last index up
/// to index 0, so index 0 ends up on top. Hidden layers are skipped entirely.
/// Pure: the frame is only read.
pub fn composite(frame: &Frame) -> RgbaImage {
    let size = frame.size();
    let mut canvas = RgbaImage::from_pixel(size, size, TRANSPARENT);

    for layer in frame.layers().iter().rev().filter(|l| l.visible) {
        blit_over(&mut canvas, layer.pixels.as_image());
    }

    canvas
}
