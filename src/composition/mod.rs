//! Composition rendering - flattening a frame's layer stack onto a canvas

mod blend;
mod render;

// Re-export public API
pub use render::{composite, TRANSPARENT};
