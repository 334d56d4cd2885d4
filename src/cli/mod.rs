//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations. The CLI plays the presentation
//! role for scripted use: it translates arguments into canvas coordinates,
//! colors, rates and paths and hands them to an [`Editor`].

mod draw;
mod export;
mod frame;
mod preview;
mod project;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::{load_config, merge_cli_overrides, CliOverrides, PxeConfig};
use crate::document::PixelLayout;
use crate::edit::Point;
use crate::editor::Editor;
use crate::models::MAX_CANVAS_SIZE;
use crate::logging::init_logging;

pub use frame::FrameAction;

pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// pxe - edit and export layered sprite animation projects
#[derive(Parser)]
#[command(name = "pxe")]
#[command(about = "pxe - edit layered sprite projects and export them to PNG or GIF")]
#[command(version)]
pub struct Cli {
    /// Configuration file (default: nearest pxedit.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Pixel layout of project documents
    #[arg(long, global = true, value_enum)]
    pub layout: Option<LayoutArg>,

    /// Log filter, e.g. "info" or "pxedit=debug"
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LayoutArg {
    /// Layout used by existing project files
    Legacy,
    /// Conventional rows-of-pixels layout
    RowMajor,
}

impl From<LayoutArg> for PixelLayout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Legacy => PixelLayout::Legacy,
            LayoutArg::RowMajor => PixelLayout::RowMajor,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a blank project file
    New {
        /// Project file to write
        output: PathBuf,

        /// Canvas side in pixels (default from config)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_CANVAS_SIZE)))]
        size: Option<u32>,
    },

    /// Print a project's size, frames and load warnings
    Info {
        /// Project file
        input: PathBuf,
    },

    /// Paint on one frame of a project
    ///
    /// Operations run in this order: --fill, every --set, every --erase.
    Draw {
        /// Project file to modify
        input: PathBuf,

        /// Frame to paint on (default: 0)
        #[arg(short, long, default_value = "0")]
        frame: usize,

        /// Fill the whole frame with the brush
        #[arg(long)]
        fill: bool,

        /// Paint one pixel with the brush: x,y (repeatable)
        #[arg(long, value_name = "X,Y")]
        set: Vec<String>,

        /// Erase one pixel: x,y (repeatable)
        #[arg(long, value_name = "X,Y")]
        erase: Vec<String>,

        /// Brush color as hex (#RGB, #RRGGBB, ...)
        #[arg(long)]
        color: Option<String>,

        /// Brush opacity 0-255
        #[arg(long)]
        opacity: Option<u8>,

        /// Output file (default: overwrite input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Add, remove, duplicate or rename frames
    Frame {
        /// Project file to modify
        input: PathBuf,

        #[command(subcommand)]
        action: FrameAction,

        /// Output file (default: overwrite input)
        #[arg(short, long, global = true)]
        output: Option<PathBuf>,
    },

    /// Export a frame as PNG or every frame as an animated GIF
    Export {
        /// Project file
        input: PathBuf,

        /// Output image path (PNG gains a .png extension if it has none)
        #[arg(short, long)]
        output: PathBuf,

        /// Frame to export as PNG (default: 0)
        #[arg(short, long, default_value = "0")]
        frame: usize,

        /// Export all frames as an animated GIF
        #[arg(long)]
        gif: bool,

        /// Frames per second for the GIF (default from config)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        fps: Option<u32>,

        /// Scale output by integer factor (1-64)
        #[arg(long, default_value = "1", value_parser = clap::value_parser!(u8).range(1..=64))]
        scale: u8,
    },

    /// Play the preview loop and print the frame shown at each tick
    Preview {
        /// Project file
        input: PathBuf,

        /// Number of ticks (default: one full loop)
        #[arg(long)]
        ticks: Option<usize>,

        /// Frames per second (default from config)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        fps: Option<u32>,

        /// Do not wait between ticks
        #[arg(long)]
        no_wait: bool,
    },
}

/// Parse `x,y` into a canvas point. Negative values are allowed here and
/// rejected by the edit engine.
pub(crate) fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("invalid coordinate '{}', expected X,Y", s))?;
    let x = x.trim().parse::<i64>().map_err(|_| format!("invalid x in '{}'", s))?;
    let y = y.trim().parse::<i64>().map_err(|_| format!("invalid y in '{}'", s))?;
    Ok(Point::new(x, y))
}

/// Load a project into an editor configured from `config`, printing load
/// warnings.
pub(crate) fn open_project(input: &Path, config: &PxeConfig) -> Result<Editor, ExitCode> {
    let mut editor = Editor::from_config(config).map_err(|e| {
        eprintln!("Error: {}", e);
        ExitCode::from(EXIT_ERROR)
    })?;

    match editor.load(input) {
        Ok(warnings) => {
            for warning in warnings {
                eprintln!("Warning: {}", warning);
            }
            Ok(editor)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            Err(ExitCode::from(EXIT_ERROR))
        }
    }
}

/// Save the editor's project, printing any error.
pub(crate) fn save_project(editor: &Editor, path: &Path) -> Result<(), ExitCode> {
    editor.save(path).map_err(|e| {
        eprintln!("Error: {}", e);
        ExitCode::from(EXIT_ERROR)
    })
}

/// Run the CLI
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };
    let fps = match &cli.command {
        Commands::Export { fps, .. } | Commands::Preview { fps, .. } => *fps,
        _ => None,
    };
    let overrides = CliOverrides {
        pixel_layout: cli.layout.map(PixelLayout::from),
        playback_rate: fps,
        log_level: cli.log_level.clone(),
    };
    merge_cli_overrides(&mut config, &overrides);
    init_logging(&config.logging);

    match cli.command {
        Commands::New { output, size } => project::run_new(&output, size, &config),
        Commands::Info { input } => project::run_info(&input, &config),
        Commands::Draw { input, frame, fill, set, erase, color, opacity, output } => {
            let options = draw::DrawOptions {
                frame,
                fill,
                set: &set,
                erase: &erase,
                color: color.as_deref(),
                opacity,
            };
            draw::run_draw(&input, &options, output.as_deref(), &config)
        }
        Commands::Frame { input, action, output } => {
            frame::run_frame(&input, action, output.as_deref(), &config)
        }
        Commands::Export { input, output, frame, gif, scale, .. } => {
            export::run_export(&input, &output, frame, gif, scale, &config)
        }
        Commands::Preview { input, ticks, no_wait, .. } => {
            preview::run_preview(&input, ticks, no_wait, &config)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_point() {
        assert_eq!(parse_point("3,4"), Ok(Point::new(3, 4)));
        assert_eq!(parse_point(" -1 , 7 "), Ok(Point::new(-1, 7)));
        assert!(parse_point("3").is_err());
        assert!(parse_point("a,4").is_err());
        assert!(parse_point("3,").is_err());
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
