//! Layered raster data model
//!
//! A [`Project`] owns its [`Frame`]s, each frame owns its [`Layer`]s and
//! each layer owns one [`PixelStore`]. Every store in a project shares the
//! project's square size.

mod frame;
mod layer;
mod pixels;
mod project;

pub use frame::{Direction, Frame};
pub use layer::{Layer, DEFAULT_LAYER_NAME};
pub use pixels::{PixelStore, BLANK};
pub use project::{Project, DEFAULT_PLAYBACK_RATE, DEFAULT_SIZE, MAX_CANVAS_SIZE};
