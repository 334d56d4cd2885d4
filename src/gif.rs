//! GIF animation rendering

use crate::output::{ensure_parent_dir, OutputError};
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};
use std::path::Path;

/// Encode frames as an infinitely looping animated GIF.
///
/// `delay_cs` is the per-frame delay in hundredths of a second. Every frame
/// is encoded into memory and the encoder finalized before the file is
/// written, so the file on disk is either complete or untouched.
pub fn encode_gif(frames: &[RgbaImage], delay_cs: u16) -> Result<Vec<u8>, OutputError> {
    let mut bytes = Vec::new();
    {
        let mut encoder = GifEncoder::new(&mut bytes);
        encoder.set_repeat(Repeat::Infinite)?;

        let delay = Delay::from_numer_denom_ms(u32::from(delay_cs) * 10, 1);
        for image in frames {
            encoder.encode_frame(Frame::from_parts(image.clone(), 0, 0, delay))?;
        }
        // Dropping the encoder writes the GIF trailer
    }
    Ok(bytes)
}

/// Render a sequence of frames as an animated GIF file.
pub fn render_gif(frames: &[RgbaImage], delay_cs: u16, path: &Path) -> Result<(), OutputError> {
    let bytes = encode_gif(frames, delay_cs)?;
    ensure_parent_dir(path)?;
    std::fs::write(path, bytes)?;
    Ok(())
}
