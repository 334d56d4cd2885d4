//! CLI implementation for the `export` command

use std::path::Path;
use std::process::ExitCode;

use crate::config::PxeConfig;

use super::{open_project, EXIT_ERROR, EXIT_SUCCESS};

/// Execute the export command
///
/// Without `--gif` the chosen frame is written as a PNG; with it every
/// frame goes into one animated GIF timed by the playback rate.
pub fn run_export(
    input: &Path,
    output: &Path,
    frame: usize,
    gif: bool,
    scale: u8,
    config: &PxeConfig,
) -> ExitCode {
    let mut editor = match open_project(input, config) {
        Ok(editor) => editor,
        Err(code) => return code,
    };

    if gif {
        if let Err(e) = editor.export_sequence(output, scale) {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
        let project = editor.project();
        println!(
            "Saved {} ({} frames at {} fps)",
            output.display(),
            project.frame_count(),
            project.playback_rate()
        );
        return ExitCode::from(EXIT_SUCCESS);
    }

    if let Err(e) = editor.select_frame(frame) {
        eprintln!("Error: {}", e);
        return ExitCode::from(EXIT_ERROR);
    }
    match editor.export_still(output, scale) {
        Ok(path) => {
            println!("Saved {}", path.display());
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
