//! Project persistence
//!
//! Projects are saved as a JSON document holding each frame's composite.
//! Layer structure is not saved: a loaded project has exactly one layer per
//! frame.
//!
//! # Pixel layout
//!
//! Files written by earlier versions of the editor store each "row" of
//! `arrayOfRows` as a column of the image, and their loader compensates by
//! filling the raster row by row and rotating it 90 degrees clockwise. The
//! net effect of a save/load cycle is a horizontal mirror. [`PixelLayout`]
//! selects between reproducing that exactly and a conventional row-major
//! layout that round-trips losslessly.

mod codec;
mod error;
mod schema;

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use tracing::info;

use crate::models::Project;

pub use codec::{decode, encode, Decoded, MAX_DOCUMENT_SIZE};
pub use error::{DocumentError, DocumentWarning};
pub use schema::{FrameRecord, PixelRecord, ProjectDocument};

/// How pixel rows are laid out in `arrayOfRows`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PixelLayout {
    /// Compatible with existing files: `arrayOfRows[x][y]` on save, row-major
    /// fill plus a clockwise quarter turn on load
    #[default]
    Legacy,
    /// `arrayOfRows[y][x]` on both save and load
    RowMajor,
}

/// Serialize a project to pretty JSON with four-space indentation.
pub fn to_json_string(project: &Project, layout: PixelLayout) -> Result<String, DocumentError> {
    let document = encode(project, layout);
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    document.serialize(&mut serializer)?;
    // serde_json only emits valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Parse and decode a project document.
pub fn from_json_str(json: &str, layout: PixelLayout) -> Result<Decoded, DocumentError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    decode(&value, layout)
}

/// Write a project document to `path`, creating parent directories.
pub fn save_project(
    project: &Project,
    path: &Path,
    layout: PixelLayout,
) -> Result<(), DocumentError> {
    let json = to_json_string(project, layout)?;
    let write_err = |source| DocumentError::Write { path: path.to_path_buf(), source };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
    }
    fs::write(path, json).map_err(write_err)?;

    info!(path = %path.display(), frames = project.frame_count(), "Saved project");
    Ok(())
}

/// Read and decode a project document from `path`.
pub fn load_project(path: &Path, layout: PixelLayout) -> Result<Decoded, DocumentError> {
    let json = fs::read_to_string(path)
        .map_err(|source| DocumentError::Read { path: path.to_path_buf(), source })?;
    let decoded = from_json_str(&json, layout)?;

    info!(
        path = %path.display(),
        size = decoded.project.size(),
        frames = decoded.project.frame_count(),
        warnings = decoded.warnings.len(),
        "Loaded project"
    );
    Ok(decoded)
}
