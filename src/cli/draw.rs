//! CLI dispatch for the `pxe draw` command.
//!
//! Each painted point is its own one-pixel stroke through the editor, so the
//! command behaves exactly like a host clicking on the canvas.

use std::path::Path;
use std::process::ExitCode;

use crate::color::parse_color;
use crate::config::PxeConfig;
use crate::edit::{Point, Tool};
use crate::editor::Editor;
use crate::error::EditError;

use super::{open_project, parse_point, save_project, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Arguments of one draw invocation.
pub struct DrawOptions<'a> {
    pub frame: usize,
    pub fill: bool,
    pub set: &'a [String],
    pub erase: &'a [String],
    pub color: Option<&'a str>,
    pub opacity: Option<u8>,
}

fn parse_points(values: &[String]) -> Result<Vec<Point>, String> {
    values.iter().map(|value| parse_point(value)).collect()
}

fn click(editor: &mut Editor, tool: Tool, point: Point) -> Result<(), EditError> {
    editor.set_tool(tool);
    let result = editor.begin_stroke(point);
    editor.end_stroke();
    result
}

/// Execute the draw command.
pub fn run_draw(
    input: &Path,
    options: &DrawOptions<'_>,
    output: Option<&Path>,
    config: &PxeConfig,
) -> ExitCode {
    // Validate arguments before touching any file
    let color = match options.color.map(parse_color).transpose() {
        Ok(color) => color,
        Err(e) => {
            eprintln!("Error: --color: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };
    let (pen_points, erase_points) =
        match (parse_points(options.set), parse_points(options.erase)) {
            (Ok(set), Ok(erase)) => (set, erase),
            (Err(e), _) | (_, Err(e)) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_INVALID_ARGS);
            }
        };
    if !options.fill && pen_points.is_empty() && erase_points.is_empty() {
        eprintln!("Error: nothing to draw; use --fill, --set or --erase");
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let mut editor = match open_project(input, config) {
        Ok(editor) => editor,
        Err(code) => return code,
    };

    if let Some(color) = color {
        editor.set_color(color);
    }
    if let Some(opacity) = options.opacity {
        editor.set_opacity(opacity);
    }

    let mut result = editor.select_frame(options.frame);
    if result.is_ok() && options.fill {
        result = click(&mut editor, Tool::Fill, Point::new(0, 0));
    }
    for &point in &pen_points {
        if result.is_err() {
            break;
        }
        result = click(&mut editor, Tool::Pen, point);
    }
    for &point in &erase_points {
        if result.is_err() {
            break;
        }
        result = click(&mut editor, Tool::Eraser, point);
    }
    if let Err(e) = result {
        eprintln!("Error: {}", e);
        return ExitCode::from(EXIT_ERROR);
    }

    match save_project(&editor, output.unwrap_or(input)) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(code) => code,
    }
}
