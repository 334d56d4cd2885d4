//! A named, toggleable raster layer

use super::pixels::PixelStore;

/// Name given to every newly created (or duplicated) layer.
pub const DEFAULT_LAYER_NAME: &str = "New Layer";

#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub name: String,
    pub visible: bool,
    pub pixels: PixelStore,
}

impl Layer {
    /// A visible, blank layer with the default name.
    pub fn new(size: u32) -> Self {
        Self::from_pixels(PixelStore::new(size))
    }

    pub fn from_pixels(pixels: PixelStore) -> Self {
        Self { name: DEFAULT_LAYER_NAME.to_string(), visible: true, pixels }
    }

    /// Copy of this layer's raster and visibility under the default name.
    pub fn duplicate(&self) -> Self {
        Self { name: DEFAULT_LAYER_NAME.to_string(), visible: self.visible, pixels: self.pixels.clone() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_duplicate_resets_name_only() {
        let mut layer = Layer::new(2);
        layer.name = "outline".to_string();
        layer.visible = false;
        layer.pixels.fill(Rgba([10, 20, 30, 255]));

        let copy = layer.duplicate();
        assert_eq!(copy.name, DEFAULT_LAYER_NAME);
        assert!(!copy.visible);
        assert_eq!(copy.pixels, layer.pixels);
    }
}
