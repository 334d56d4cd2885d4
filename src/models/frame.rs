//! One animation step: an ordered layer stack
//!
//! Stacking order: index 0 renders on top and each higher index renders
//! further underneath. New layers are appended at the highest index, so
//! they start out beneath everything already in the frame.

use image::RgbaImage;

use super::layer::Layer;
use crate::composition;
use crate::error::{EditError, Result};

/// Direction for [`Frame::move_layer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Toward index 0 (visually higher in the stack)
    Up,
    /// Toward the last index (visually lower in the stack)
    Down,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub name: String,
    layers: Vec<Layer>,
    active_layer: usize,
}

impl Frame {
    /// A frame holding one blank layer.
    pub fn new(size: u32) -> Self {
        Self { name: String::new(), layers: vec![Layer::new(size)], active_layer: 0 }
    }

    /// Build a frame from a non-empty layer stack. Returns `None` when empty.
    pub fn from_layers(layers: Vec<Layer>) -> Option<Self> {
        (!layers.is_empty()).then(|| Self { name: String::new(), layers, active_layer: 0 })
    }

    pub fn size(&self) -> u32 {
        self.layers[0].pixels.size()
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn layer(&self, index: usize) -> Result<&Layer> {
        let len = self.layers.len();
        self.layers.get(index).ok_or(EditError::layer_index(index, len))
    }

    pub fn layer_mut(&mut self, index: usize) -> Result<&mut Layer> {
        let len = self.layers.len();
        self.layers.get_mut(index).ok_or(EditError::layer_index(index, len))
    }

    pub fn active_layer_index(&self) -> usize {
        self.active_layer
    }

    pub fn active_layer(&self) -> &Layer {
        &self.layers[self.active_layer]
    }

    pub fn active_layer_mut(&mut self) -> &mut Layer {
        &mut self.layers[self.active_layer]
    }

    pub fn select_layer(&mut self, index: usize) -> Result<()> {
        self.layer(index)?;
        self.active_layer = index;
        Ok(())
    }

    /// Append a blank layer at the bottom of the stack. The active layer is
    /// unchanged.
    pub fn add_layer(&mut self) -> usize {
        self.layers.push(Layer::new(self.size()));
        self.layers.len() - 1
    }

    /// Remove a layer and reselect index 0.
    pub fn remove_layer(&mut self, index: usize) -> Result<Layer> {
        self.layer(index)?;
        if self.layers.len() == 1 {
            return Err(EditError::LastLayerRejected);
        }
        let removed = self.layers.remove(index);
        self.active_layer = 0;
        Ok(removed)
    }

    /// Swap a layer with its neighbour in `direction`.
    ///
    /// Returns the layer's new index. At either end of the stack this is a
    /// no-op and the index is returned unchanged. The active index follows
    /// whichever layer it pointed at.
    pub fn move_layer(&mut self, index: usize, direction: Direction) -> Result<usize> {
        self.layer(index)?;
        let target = match direction {
            Direction::Up if index > 0 => index - 1,
            Direction::Down if index + 1 < self.layers.len() => index + 1,
            _ => return Ok(index),
        };
        self.layers.swap(index, target);
        if self.active_layer == index {
            self.active_layer = target;
        } else if self.active_layer == target {
            self.active_layer = index;
        }
        Ok(target)
    }

    pub fn set_visibility(&mut self, index: usize, visible: bool) -> Result<()> {
        self.layer_mut(index)?.visible = visible;
        Ok(())
    }

    pub fn rename_layer(&mut self, index: usize, name: impl Into<String>) -> Result<()> {
        self.layer_mut(index)?.name = name.into();
        Ok(())
    }

    /// Deep copy of every layer's raster and visibility. Layer names reset to
    /// the default and the copy is unnamed.
    pub fn duplicate(&self) -> Self {
        Self {
            name: String::new(),
            layers: self.layers.iter().map(Layer::duplicate).collect(),
            active_layer: 0,
        }
    }

    /// Flatten the visible layers. See [`composition::composite`].
    pub fn composite(&self) -> RgbaImage {
        composition::composite(self)
    }
}
