//! Change notifications for the presentation layer
//!
//! The editor queues one or more events after each operation. A host drains
//! the queue and refreshes whatever it displays; nothing in here knows how.

use image::RgbaImage;

use crate::error::EditError;

#[derive(Debug, Clone, PartialEq)]
pub enum ChangeEvent {
    /// Layers of a frame were added, removed, reordered, renamed, toggled or
    /// painted
    LayerSetChanged { frame: usize },
    /// Frames were added, removed, renamed or replaced wholesale
    FrameSetChanged { count: usize },
    /// The preview and export rate changed
    PlaybackRateChanged { rate: u32 },
    /// The editing cursor moved
    ActiveFrameChanged { index: usize },
    /// The preview cursor moved; carries the new preview composite
    PreviewAdvanced { index: usize, composite: RgbaImage },
    /// An operation was refused and changed nothing
    OperationRejected { reason: EditError },
}
