//! CLI implementation for the `frame` command

use clap::Subcommand;
use std::path::Path;
use std::process::ExitCode;

use crate::config::PxeConfig;

use super::{open_project, save_project, EXIT_ERROR, EXIT_SUCCESS};

#[derive(Subcommand)]
pub enum FrameAction {
    /// Append a blank frame
    Add,
    /// Remove the frame at INDEX (the last frame cannot be removed)
    Remove { index: usize },
    /// Append a copy of the frame at INDEX
    Duplicate { index: usize },
    /// Rename the frame at INDEX
    Rename { index: usize, name: String },
}

/// Execute the frame command
pub fn run_frame(
    input: &Path,
    action: FrameAction,
    output: Option<&Path>,
    config: &PxeConfig,
) -> ExitCode {
    let mut editor = match open_project(input, config) {
        Ok(editor) => editor,
        Err(code) => return code,
    };

    let result = match action {
        FrameAction::Add => {
            let index = editor.add_frame();
            Ok(format!("Added frame {}", index))
        }
        FrameAction::Remove { index } => {
            editor.remove_frame(index).map(|()| format!("Removed frame {}", index))
        }
        FrameAction::Duplicate { index } => editor
            .duplicate_frame(index)
            .map(|copy| format!("Duplicated frame {} as {}", index, copy)),
        FrameAction::Rename { index, name } => {
            let message = format!("Renamed frame {} to '{}'", index, name);
            editor.rename_frame(index, name).map(|()| message)
        }
    };

    let message = match result {
        Ok(message) => message,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    if let Err(code) = save_project(&editor, output.unwrap_or(input)) {
        return code;
    }
    println!("{} ({} frames)", message, editor.project().frame_count());
    ExitCode::from(EXIT_SUCCESS)
}
