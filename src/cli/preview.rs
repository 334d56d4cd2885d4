//! CLI implementation for the `preview` command
//!
//! Plays the role of the host timer: it sleeps one preview interval, ticks
//! the editor and reports where the preview cursor landed.

use std::path::Path;
use std::process::ExitCode;
use std::thread;

use crate::config::PxeConfig;
use crate::events::ChangeEvent;

use super::{open_project, EXIT_SUCCESS};

/// Execute the preview command
pub fn run_preview(
    input: &Path,
    ticks: Option<usize>,
    no_wait: bool,
    config: &PxeConfig,
) -> ExitCode {
    let mut editor = match open_project(input, config) {
        Ok(editor) => editor,
        Err(code) => return code,
    };
    editor.take_events();

    let ticks = ticks.unwrap_or_else(|| editor.project().frame_count());
    let interval = editor.preview_interval();

    for tick in 1..=ticks {
        if !no_wait {
            thread::sleep(interval);
        }
        editor.advance_preview();

        for event in editor.take_events() {
            if let ChangeEvent::PreviewAdvanced { index, .. } = event {
                let name = &editor.project().frames()[index].name;
                if name.is_empty() {
                    println!("tick {}: frame {}", tick, index);
                } else {
                    println!("tick {}: frame {} ({})", tick, index, name);
                }
            }
        }
    }

    ExitCode::from(EXIT_SUCCESS)
}
