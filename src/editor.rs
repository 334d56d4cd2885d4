//! Editor session: one project, one tool engine, one event queue
//!
//! Every operation runs to completion before returning and queues the
//! change events a display needs. Rejected operations change nothing and
//! queue [`ChangeEvent::OperationRejected`] besides returning the error.

use std::path::{Path, PathBuf};
use std::time::Duration;

use image::Rgba;
use tracing::{debug, info};

use crate::color::ColorError;
use crate::config::PxeConfig;
use crate::document::{self, DocumentError, DocumentWarning, PixelLayout};
use crate::edit::{Brush, EditEngine, Point, Tool};
use crate::error::{EditError, Result};
use crate::events::ChangeEvent;
use crate::gif::render_gif;
use crate::models::{Direction, Project};
use crate::output::{png_path, save_png, scale_image, scaled_side, OutputError};

/// Error building an editor from configuration.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error(transparent)]
    Edit(#[from] EditError),
    #[error("brush color: {0}")]
    Color(#[from] ColorError),
}

#[derive(Debug, Clone, Default)]
pub struct Editor {
    project: Project,
    engine: EditEngine,
    layout: PixelLayout,
    events: Vec<ChangeEvent>,
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Editor for an existing project.
    pub fn with_project(project: Project) -> Self {
        Self { project, ..Self::default() }
    }

    /// Editor with a blank project sized, timed and brushed per `config`.
    pub fn from_config(config: &PxeConfig) -> std::result::Result<Self, SetupError> {
        let mut project = Project::new(config.canvas.size)?;
        project.set_playback_rate(config.canvas.playback_rate)?;

        let mut engine = EditEngine::new();
        engine.set_color(config.brush.parse_color()?);
        engine.set_opacity(config.brush.opacity);

        Ok(Self { project, engine, layout: config.document.pixel_layout, events: Vec::new() })
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn pixel_layout(&self) -> PixelLayout {
        self.layout
    }

    pub fn set_pixel_layout(&mut self, layout: PixelLayout) {
        self.layout = layout;
    }

    /// Drain queued change events, oldest first.
    pub fn take_events(&mut self) -> Vec<ChangeEvent> {
        std::mem::take(&mut self.events)
    }

    fn emit(&mut self, event: ChangeEvent) {
        self.events.push(event);
    }

    fn check<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(reason) = &result {
            debug!(%reason, "Operation rejected");
            self.emit(ChangeEvent::OperationRejected { reason: reason.clone() });
        }
        result
    }

    fn layers_changed(&mut self) {
        let frame = self.project.active_frame_index();
        self.emit(ChangeEvent::LayerSetChanged { frame });
    }

    // Tools

    pub fn tool(&self) -> Tool {
        self.engine.tool()
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.engine.set_tool(tool);
    }

    pub fn brush(&self) -> Brush {
        self.engine.brush()
    }

    pub fn set_color(&mut self, color: Rgba<u8>) {
        self.engine.set_color(color);
    }

    pub fn set_opacity(&mut self, opacity: u8) {
        self.engine.set_opacity(opacity);
    }

    pub fn is_drawing(&self) -> bool {
        self.engine.is_drawing()
    }

    /// Start a stroke on the active layer of the active frame.
    pub fn begin_stroke(&mut self, point: Point) -> Result<()> {
        let pixels = &mut self.project.active_frame_mut().active_layer_mut().pixels;
        let result = self.engine.begin(pixels, point);
        if self.check(result)? {
            self.layers_changed();
        }
        Ok(())
    }

    /// Continue the current stroke. Does nothing when no stroke is active.
    pub fn continue_stroke(&mut self, point: Point) -> Result<()> {
        let pixels = &mut self.project.active_frame_mut().active_layer_mut().pixels;
        let result = self.engine.move_to(pixels, point);
        if self.check(result)? {
            self.layers_changed();
        }
        Ok(())
    }

    pub fn end_stroke(&mut self) {
        self.engine.end();
    }

    // Layers of the active frame

    pub fn select_layer(&mut self, index: usize) -> Result<()> {
        let result = self.project.active_frame_mut().select_layer(index);
        self.check(result)?;
        self.layers_changed();
        Ok(())
    }

    pub fn add_layer(&mut self) -> usize {
        let index = self.project.active_frame_mut().add_layer();
        self.layers_changed();
        index
    }

    pub fn remove_layer(&mut self, index: usize) -> Result<()> {
        let result = self.project.active_frame_mut().remove_layer(index);
        self.check(result)?;
        self.layers_changed();
        Ok(())
    }

    pub fn move_layer(&mut self, index: usize, direction: Direction) -> Result<usize> {
        let result = self.project.active_frame_mut().move_layer(index, direction);
        let moved_to = self.check(result)?;
        if moved_to != index {
            self.layers_changed();
        }
        Ok(moved_to)
    }

    pub fn set_layer_visibility(&mut self, index: usize, visible: bool) -> Result<()> {
        let result = self.project.active_frame_mut().set_visibility(index, visible);
        self.check(result)?;
        self.layers_changed();
        Ok(())
    }

    pub fn rename_layer(&mut self, index: usize, name: impl Into<String>) -> Result<()> {
        let result = self.project.active_frame_mut().rename_layer(index, name);
        self.check(result)?;
        self.layers_changed();
        Ok(())
    }

    // Frames

    fn frames_changed(&mut self) {
        let count = self.project.frame_count();
        self.emit(ChangeEvent::FrameSetChanged { count });
    }

    fn active_frame_changed(&mut self) {
        let index = self.project.active_frame_index();
        self.emit(ChangeEvent::ActiveFrameChanged { index });
    }

    pub fn add_frame(&mut self) -> usize {
        let index = self.project.add_frame();
        self.frames_changed();
        index
    }

    pub fn remove_frame(&mut self, index: usize) -> Result<()> {
        let result = self.project.remove_frame(index);
        self.check(result)?;
        self.frames_changed();
        self.active_frame_changed();
        Ok(())
    }

    pub fn duplicate_frame(&mut self, index: usize) -> Result<usize> {
        let result = self.project.duplicate_frame(index);
        let copy = self.check(result)?;
        self.frames_changed();
        Ok(copy)
    }

    pub fn rename_frame(&mut self, index: usize, name: impl Into<String>) -> Result<()> {
        let result = self.project.rename_frame(index, name);
        self.check(result)?;
        self.frames_changed();
        Ok(())
    }

    pub fn select_frame(&mut self, index: usize) -> Result<()> {
        let result = self.project.select_frame(index);
        self.check(result)?;
        self.active_frame_changed();
        Ok(())
    }

    pub fn next_frame(&mut self) -> usize {
        let index = self.project.next_frame();
        self.active_frame_changed();
        index
    }

    pub fn previous_frame(&mut self) -> usize {
        let index = self.project.previous_frame();
        self.active_frame_changed();
        index
    }

    /// Replace the project with one blank `size x size` frame.
    ///
    /// An unfinished stroke is ended first. The brush color returns to its
    /// default; opacity is kept.
    pub fn set_size(&mut self, size: u32) -> Result<()> {
        let result = self.project.set_size(size);
        self.check(result)?;
        self.engine.end();
        self.engine.set_color(Brush::default().color);
        self.frames_changed();
        self.active_frame_changed();
        self.layers_changed();
        Ok(())
    }

    // Playback

    pub fn set_playback_rate(&mut self, rate: u32) -> Result<()> {
        let result = self.project.set_playback_rate(rate);
        self.check(result)?;
        self.emit(ChangeEvent::PlaybackRateChanged { rate });
        Ok(())
    }

    /// How often a host scheduler should call [`Self::advance_preview`].
    pub fn preview_interval(&self) -> Duration {
        self.project.preview_interval()
    }

    /// One preview tick. Returns the new preview index.
    pub fn advance_preview(&mut self) -> usize {
        let index = self.project.advance_preview();
        let composite = self.project.frames()[index].composite();
        self.emit(ChangeEvent::PreviewAdvanced { index, composite });
        index
    }

    // Files

    pub fn save(&self, path: &Path) -> std::result::Result<(), DocumentError> {
        document::save_project(&self.project, path, self.layout)
    }

    /// Replace the project with the one stored at `path`.
    ///
    /// On error the current project is untouched. The playback rate carries
    /// over since documents do not store it.
    pub fn load(&mut self, path: &Path) -> std::result::Result<Vec<DocumentWarning>, DocumentError> {
        let decoded = document::load_project(path, self.layout)?;
        let mut project = decoded.project;
        project.set_playback_rate(self.project.playback_rate()).ok();

        self.engine.end();
        self.project = project;
        self.frames_changed();
        self.active_frame_changed();
        self.layers_changed();
        Ok(decoded.warnings)
    }

    /// Write the active frame's composite as PNG, scaled by an integer
    /// factor. Returns the path written, which gains a `.png` extension if
    /// `path` has none.
    pub fn export_still(&self, path: &Path, scale: u8) -> std::result::Result<PathBuf, OutputError> {
        scaled_side(self.project.size(), scale)?;
        let path = png_path(path);
        let image = scale_image(self.project.active_frame().composite(), scale)?;
        save_png(&image, &path)?;
        info!(path = %path.display(), frame = self.project.active_frame_index(), "Exported still");
        Ok(path)
    }

    /// Write every frame's composite as one animated GIF with a delay of
    /// `100 / playback_rate` centiseconds per frame.
    pub fn export_sequence(&self, path: &Path, scale: u8) -> std::result::Result<(), OutputError> {
        scaled_side(self.project.size(), scale)?;
        let frames = self
            .project
            .composites()
            .into_iter()
            .map(|image| scale_image(image, scale))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let delay = self.project.frame_delay_centiseconds();
        render_gif(&frames, delay, path)?;
        info!(path = %path.display(), frames = frames.len(), delay_cs = delay, "Exported sequence");
        Ok(())
    }
}
