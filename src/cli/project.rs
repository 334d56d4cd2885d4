//! CLI implementation for the `new` and `info` commands

use std::path::Path;
use std::process::ExitCode;

use crate::config::PxeConfig;
use crate::editor::Editor;

use super::{open_project, save_project, EXIT_ERROR, EXIT_SUCCESS};

/// Execute the new command
pub fn run_new(output: &Path, size: Option<u32>, config: &PxeConfig) -> ExitCode {
    let mut editor = match Editor::from_config(config) {
        Ok(editor) => editor,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    if let Some(size) = size {
        if let Err(e) = editor.set_size(size) {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    }

    if let Err(code) = save_project(&editor, output) {
        return code;
    }
    let size = editor.project().size();
    println!("Created {} ({}x{}, 1 frame)", output.display(), size, size);
    ExitCode::from(EXIT_SUCCESS)
}

/// Execute the info command
pub fn run_info(input: &Path, config: &PxeConfig) -> ExitCode {
    let editor = match open_project(input, config) {
        Ok(editor) => editor,
        Err(code) => return code,
    };

    let project = editor.project();
    println!("{}", input.display());
    println!("  Size: {}x{}", project.size(), project.size());
    println!("  Frames: {}", project.frame_count());
    for (index, frame) in project.frames().iter().enumerate() {
        if frame.name.is_empty() {
            println!("    {}: (unnamed)", index);
        } else {
            println!("    {}: {}", index, frame.name);
        }
    }

    ExitCode::from(EXIT_SUCCESS)
}
