//! pxedit - core of a layered, frame-based sprite editor
//!
//! This library provides:
//! - A layered raster model: projects of square frames, frames of layers
//! - Compositing of a frame's visible layers into one image
//! - A pen / eraser / fill tool engine with stroke sessions
//! - Project save and load as a JSON document
//! - Still PNG and animated GIF export
//!
//! [`editor::Editor`] ties these together and queues change notifications
//! for whatever presentation layer drives it.

pub mod cli;
pub mod color;
pub mod composition;
pub mod config;
pub mod document;
pub mod edit;
pub mod editor;
pub mod error;
pub mod events;
pub mod gif;
pub mod logging;
pub mod models;
pub mod output;
