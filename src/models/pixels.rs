//! Square RGBA raster owned by a layer

use image::{Rgba, RgbaImage};

use crate::error::{EditError, Result};

/// The sample a freshly created store is filled with: white, fully transparent.
pub const BLANK: Rgba<u8> = Rgba([255, 255, 255, 0]);

/// A `size x size` grid of straight-alpha RGBA samples.
///
/// Coordinates are `(x, y)` with the origin at the top-left; `x` is the
/// column and `y` the row.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelStore {
    image: RgbaImage,
}

impl PixelStore {
    /// Create a blank store. `size` must be at least 1; callers validate it.
    pub fn new(size: u32) -> Self {
        Self { image: RgbaImage::from_pixel(size, size, BLANK) }
    }

    /// Wrap an existing image. Returns `None` unless the image is square.
    pub fn from_image(image: RgbaImage) -> Option<Self> {
        (image.width() == image.height() && image.width() > 0).then_some(Self { image })
    }

    pub fn size(&self) -> u32 {
        self.image.width()
    }

    pub fn contains(&self, x: i64, y: i64) -> bool {
        let size = i64::from(self.size());
        (0..size).contains(&x) && (0..size).contains(&y)
    }

    /// Read one sample, or `None` outside the canvas.
    pub fn get(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        (x < self.size() && y < self.size()).then(|| *self.image.get_pixel(x, y))
    }

    /// Write one sample. Coordinates outside the canvas are rejected without
    /// touching the store.
    pub fn set(&mut self, x: i64, y: i64, color: Rgba<u8>) -> Result<()> {
        if !self.contains(x, y) {
            return Err(EditError::OutOfRange { x, y, size: self.size() });
        }
        self.image.put_pixel(x as u32, y as u32, color);
        Ok(())
    }

    /// Overwrite every sample.
    pub fn fill(&mut self, color: Rgba<u8>) {
        for pixel in self.image.pixels_mut() {
            *pixel = color;
        }
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_store_is_blank() {
        let store = PixelStore::new(4);
        assert_eq!(store.size(), 4);
        assert!(store.as_image().pixels().all(|p| *p == BLANK));
    }

    #[test]
    fn test_set_and_get() {
        let mut store = PixelStore::new(3);
        store.set(2, 1, Rgba([1, 2, 3, 4])).unwrap();
        assert_eq!(store.get(2, 1), Some(Rgba([1, 2, 3, 4])));
        assert_eq!(store.get(1, 2), Some(BLANK));
        assert_eq!(store.get(3, 0), None);
    }

    #[test]
    fn test_set_out_of_range_leaves_store_unchanged() {
        let mut store = PixelStore::new(3);
        let before = store.clone();
        assert_eq!(
            store.set(3, 0, Rgba([0, 0, 0, 255])),
            Err(EditError::OutOfRange { x: 3, y: 0, size: 3 })
        );
        assert_eq!(
            store.set(-1, 1, Rgba([0, 0, 0, 255])),
            Err(EditError::OutOfRange { x: -1, y: 1, size: 3 })
        );
        assert_eq!(store, before);
    }

    #[test]
    fn test_fill_covers_everything() {
        let mut store = PixelStore::new(5);
        store.fill(Rgba([9, 8, 7, 6]));
        assert!(store.as_image().pixels().all(|p| *p == Rgba([9, 8, 7, 6])));
    }

    #[test]
    fn test_from_image_requires_square() {
        assert!(PixelStore::from_image(RgbaImage::new(2, 3)).is_none());
        assert!(PixelStore::from_image(RgbaImage::new(0, 0)).is_none());
        assert_eq!(PixelStore::from_image(RgbaImage::new(4, 4)).map(|s| s.size()), Some(4));
    }
}
