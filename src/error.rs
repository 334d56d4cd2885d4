//! Error types for structural and raster edits
//!
//! Every variant here is a local, recoverable rejection: the operation that
//! produced it did not mutate anything.

use std::fmt;
use thiserror::Error;

/// What kind of collection an index was checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    Layer,
    Frame,
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexKind::Layer => write!(f, "layer"),
            IndexKind::Frame => write!(f, "frame"),
        }
    }
}

/// A rejected edit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// Pixel coordinate outside the canvas
    #[error("pixel ({x}, {y}) is outside the {size}x{size} canvas")]
    OutOfRange { x: i64, y: i64, size: u32 },
    /// Layer or frame index does not exist
    #[error("{kind} index {index} is out of range (have {len})")]
    IndexOutOfRange { kind: IndexKind, index: usize, len: usize },
    /// Removing the only layer of a frame
    #[error("a frame must keep at least one layer")]
    LastLayerRejected,
    /// Removing the only frame of a project
    #[error("a project must keep at least one frame")]
    LastFrameRejected,
    /// Canvas side of zero
    #[error("canvas size must be at least 1")]
    ZeroSize,
    /// Canvas side above the supported maximum
    #[error("canvas size {size} exceeds the maximum of {max}")]
    SizeTooLarge { size: u32, max: u32 },
    /// Playback rate of zero frames per second
    #[error("playback rate must be at least 1 frame per second")]
    ZeroPlaybackRate,
}

impl EditError {
    pub(crate) fn layer_index(index: usize, len: usize) -> Self {
        EditError::IndexOutOfRange { kind: IndexKind::Layer, index, len }
    }

    pub(crate) fn frame_index(index: usize, len: usize) -> Self {
        EditError::IndexOutOfRange { kind: IndexKind::Frame, index, len }
    }
}

/// Result type alias for edit operations.
pub type Result<T> = std::result::Result<T, EditError>;
