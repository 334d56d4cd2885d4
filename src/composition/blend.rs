//! Source-over alpha blending of straight-alpha pixels

use image::{Rgba, RgbaImage};

/// Composite `layer` over `canvas` in place. Both images must share
/// dimensions.
pub(crate) fn blit_over(canvas: &mut RgbaImage, layer: &RgbaImage) {
    for (dst, src) in canvas.pixels_mut().zip(layer.pixels()) {
        // Fully transparent source, skip
        if src[3] == 0 {
            continue;
        }
        *dst = blend_over(src, dst);
    }
}

/// Blend source pixel over destination using porter-duff "source over".
pub(crate) fn blend_over(src: &Rgba<u8>, dst: &Rgba<u8>) -> Rgba<u8> {
    let src_alpha = src[3] as f32 / 255.0;
    let dst_alpha = dst[3] as f32 / 255.0;

    // out_alpha = src_alpha + dst_alpha * (1 - src_alpha)
    let out_alpha = src_alpha + dst_alpha * (1.0 - src_alpha);

    if out_alpha == 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    // out_color = (src_color * src_alpha + dst_color * dst_alpha * (1 - src_alpha)) / out_alpha
    let composite = |src: u8, dst: u8| -> u8 {
        let src = src as f32 / 255.0;
        let dst = dst as f32 / 255.0;
        let result = (src * src_alpha + dst * dst_alpha * (1.0 - src_alpha)) / out_alpha;
        (result.clamp(0.0, 1.0) * 255.0).round() as u8
    };

    Rgba([
        composite(src[0], dst[0]),
        composite(src[1], dst[1]),
        composite(src[2], dst[2]),
        (out_alpha * 255.0).round() as u8,
    ])
}
