//! The editable document: frames, shared size, playback rate and cursors

use std::time::Duration;

use image::RgbaImage;
use tracing::debug;

use super::frame::Frame;
use crate::error::{EditError, Result};

/// Canvas side of a fresh project.
pub const DEFAULT_SIZE: u32 = 8;

/// Largest canvas side a project accepts.
pub const MAX_CANVAS_SIZE: u32 = 4096;

/// Frames per second of a fresh project.
pub const DEFAULT_PLAYBACK_RATE: u32 = 1;

/// An ordered, non-empty sequence of square frames of one shared size.
///
/// Two cursors index into the frames: the active frame that edits apply to,
/// and the preview frame that looping playback advances. They move
/// independently.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    size: u32,
    frames: Vec<Frame>,
    playback_rate: u32,
    active_frame: usize,
    preview_frame: usize,
}

impl Default for Project {
    fn default() -> Self {
        Self::blank(DEFAULT_SIZE)
    }
}

impl Project {
    /// A project with one blank frame holding one blank layer.
    pub fn new(size: u32) -> Result<Self> {
        check_size(size)?;
        Ok(Self::blank(size))
    }

    fn blank(size: u32) -> Self {
        Self::with_frames(size, vec![Frame::new(size)])
    }

    /// Assemble a project from already-built frames.
    ///
    /// Returns `None` if `frames` is empty or any layer's side differs from
    /// `size`.
    pub fn from_frames(size: u32, frames: Vec<Frame>) -> Option<Self> {
        let consistent = !frames.is_empty()
            && frames.iter().all(|f| f.layers().iter().all(|l| l.pixels.size() == size));
        consistent.then(|| Self::with_frames(size, frames))
    }

    /// Unchecked [`Self::from_frames`] for callers that built every frame at
    /// `size` themselves.
    pub(crate) fn with_frames(size: u32, frames: Vec<Frame>) -> Self {
        debug_assert!(!frames.is_empty());
        Self {
            size,
            frames,
            playback_rate: DEFAULT_PLAYBACK_RATE,
            active_frame: 0,
            preview_frame: 0,
        }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Discard every frame and start over with one blank `size x size` frame.
    ///
    /// The playback rate is kept; both cursors return to 0.
    pub fn set_size(&mut self, size: u32) -> Result<()> {
        check_size(size)?;
        debug!(size, discarded_frames = self.frames.len(), "Resetting project");
        *self = Self { playback_rate: self.playback_rate, ..Self::blank(size) };
        Ok(())
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn frame(&self, index: usize) -> Result<&Frame> {
        let len = self.frames.len();
        self.frames.get(index).ok_or(EditError::frame_index(index, len))
    }

    pub fn frame_mut(&mut self, index: usize) -> Result<&mut Frame> {
        let len = self.frames.len();
        self.frames.get_mut(index).ok_or(EditError::frame_index(index, len))
    }

    pub fn active_frame_index(&self) -> usize {
        self.active_frame
    }

    pub fn active_frame(&self) -> &Frame {
        &self.frames[self.active_frame]
    }

    pub fn active_frame_mut(&mut self) -> &mut Frame {
        &mut self.frames[self.active_frame]
    }

    pub fn select_frame(&mut self, index: usize) -> Result<()> {
        self.frame(index)?;
        self.active_frame = index;
        Ok(())
    }

    /// Move the active cursor one frame forward, wrapping to the first.
    pub fn next_frame(&mut self) -> usize {
        self.active_frame = (self.active_frame + 1) % self.frames.len();
        self.active_frame
    }

    /// Move the active cursor one frame back, wrapping to the last.
    pub fn previous_frame(&mut self) -> usize {
        self.active_frame = self.active_frame.checked_sub(1).unwrap_or(self.frames.len() - 1);
        self.active_frame
    }

    /// Append a blank frame. Returns its index.
    pub fn add_frame(&mut self) -> usize {
        self.frames.push(Frame::new(self.size));
        debug!(frames = self.frames.len(), "Added frame");
        self.frames.len() - 1
    }

    /// Remove a frame, keeping both cursors in bounds.
    ///
    /// A cursor past the removed frame shifts back so it keeps pointing at the
    /// same frame; a cursor on the removed frame lands on the frame that took
    /// its place, or on the new last frame if the removed one was last.
    pub fn remove_frame(&mut self, index: usize) -> Result<Frame> {
        self.frame(index)?;
        if self.frames.len() == 1 {
            return Err(EditError::LastFrameRejected);
        }
        let removed = self.frames.remove(index);
        let len = self.frames.len();
        let reposition = |cursor: usize| {
            if cursor > index {
                cursor - 1
            } else {
                cursor.min(len - 1)
            }
        };
        self.active_frame = reposition(self.active_frame);
        self.preview_frame = reposition(self.preview_frame);
        debug!(index, frames = len, active = self.active_frame, "Removed frame");
        Ok(removed)
    }

    /// Append a deep copy of a frame. Returns the copy's index.
    pub fn duplicate_frame(&mut self, index: usize) -> Result<usize> {
        let copy = self.frame(index)?.duplicate();
        self.frames.push(copy);
        Ok(self.frames.len() - 1)
    }

    pub fn rename_frame(&mut self, index: usize, name: impl Into<String>) -> Result<()> {
        self.frame_mut(index)?.name = name.into();
        Ok(())
    }

    pub fn playback_rate(&self) -> u32 {
        self.playback_rate
    }

    pub fn set_playback_rate(&mut self, rate: u32) -> Result<()> {
        if rate == 0 {
            return Err(EditError::ZeroPlaybackRate);
        }
        self.playback_rate = rate;
        Ok(())
    }

    pub fn preview_frame_index(&self) -> usize {
        self.preview_frame
    }

    /// Step the preview cursor, wrapping to 0 after the last frame.
    ///
    /// Meant to be called by a host scheduler every [`Self::preview_interval`].
    pub fn advance_preview(&mut self) -> usize {
        self.preview_frame = if self.preview_frame + 1 >= self.frames.len() {
            0
        } else {
            self.preview_frame + 1
        };
        self.preview_frame
    }

    /// Period between preview ticks: `1000 / playback_rate` milliseconds.
    pub fn preview_interval(&self) -> Duration {
        Duration::from_millis(u64::from(1000 / self.playback_rate))
    }

    /// Per-frame delay for sequence export, `100 / playback_rate` hundredths
    /// of a second (truncated).
    pub fn frame_delay_centiseconds(&self) -> u16 {
        (100 / self.playback_rate) as u16
    }

    /// Composite of every frame, in order.
    pub fn composites(&self) -> Vec<RgbaImage> {
        self.frames.iter().map(Frame::composite).collect()
    }
}

fn check_size(size: u32) -> Result<()> {
    match size {
        0 => Err(EditError::ZeroSize),
        s if s > MAX_CANVAS_SIZE => Err(EditError::SizeTooLarge { size, max: MAX_CANVAS_SIZE }),
        _ => Ok(()),
    }
}
