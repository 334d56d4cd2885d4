//! Project <-> document conversion
//!
//! Encoding flattens every frame to its composite. Decoding rebuilds one
//! single-layer frame per record and tolerates missing or malformed fields,
//! reporting each as a [`DocumentWarning`].

use image::{imageops, Rgba, RgbaImage};
use serde_json::{Map, Value};
use tracing::warn;

use super::error::{DocumentError, DocumentWarning};
use super::schema::{FrameRecord, PixelRecord, ProjectDocument};
use super::PixelLayout;
use crate::models::{Frame, Layer, PixelStore, Project, BLANK, DEFAULT_SIZE, MAX_CANVAS_SIZE};

/// Largest canvas side accepted from a document.
pub const MAX_DOCUMENT_SIZE: u32 = MAX_CANVAS_SIZE;

/// A project rebuilt from a document, with everything that had to be
/// defaulted along the way.
#[derive(Debug, Clone)]
pub struct Decoded {
    pub project: Project,
    pub warnings: Vec<DocumentWarning>,
}

/// Flatten a project into its document form.
pub fn encode(project: &Project, layout: PixelLayout) -> ProjectDocument {
    let size = project.size();
    let frames = project
        .frames()
        .iter()
        .map(|frame| FrameRecord {
            array_of_rows: encode_rows(&frame.composite(), layout),
            name: frame.name.clone(),
        })
        .collect();

    ProjectDocument { frames, height: size, number_of_frames: project.frame_count(), width: size }
}

fn encode_rows(image: &RgbaImage, layout: PixelLayout) -> Vec<Vec<PixelRecord>> {
    let size = image.width();
    (0..size)
        .map(|row| {
            (0..size)
                .map(|col| {
                    let pixel = match layout {
                        // Rows are sampled along the x-axis
                        PixelLayout::Legacy => image.get_pixel(row, col),
                        PixelLayout::RowMajor => image.get_pixel(col, row),
                    };
                    PixelRecord::from(*pixel)
                })
                .collect()
        })
        .collect()
}

/// Rebuild a project from a parsed document.
///
/// Only a non-object root is an error; everything else is defaulted.
pub fn decode(value: &Value, layout: PixelLayout) -> Result<Decoded, DocumentError> {
    let root = value.as_object().ok_or(DocumentError::NotAnObject)?;
    let mut warnings = Vec::new();

    let height = read_dimension(root, "height", &mut warnings);
    let width = read_dimension(root, "width", &mut warnings);
    let size = match (height, width) {
        (Some(height), Some(width)) => {
            if height != width {
                warnings.push(DocumentWarning::InvalidDimension { height, width });
            }
            height
        }
        (Some(height), None) => height,
        (None, Some(width)) => width,
        (None, None) => DEFAULT_SIZE,
    };

    let declared_frames = match root.get("numberOfFrames") {
        Some(v) => {
            let count = v.as_u64();
            if count.is_none() {
                warnings.push(DocumentWarning::malformed(
                    "numberOfFrames",
                    "expected a non-negative integer",
                ));
            }
            count
        }
        None => {
            warnings.push(DocumentWarning::malformed("numberOfFrames", "missing"));
            None
        }
    };

    let mut frames: Vec<Frame> = match root.get("frames").map(Value::as_array) {
        Some(Some(records)) => records
            .iter()
            .enumerate()
            .map(|(i, record)| decode_frame(record, i, size, layout, &mut warnings))
            .collect(),
        Some(None) => {
            warnings.push(DocumentWarning::malformed("frames", "expected an array"));
            Vec::new()
        }
        None => {
            warnings.push(DocumentWarning::malformed("frames", "missing"));
            Vec::new()
        }
    };

    if let Some(declared) = declared_frames {
        if declared != frames.len() as u64 {
            warnings.push(DocumentWarning::malformed(
                "numberOfFrames",
                format!("declares {} frames but {} are present", declared, frames.len()),
            ));
        }
    }

    if frames.is_empty() {
        warnings.push(DocumentWarning::malformed("frames", "no frames; using one blank frame"));
        frames.push(Frame::new(size));
    }

    for warning in &warnings {
        warn!(%warning, "Project document anomaly");
    }

    Ok(Decoded { project: Project::with_frames(size, frames), warnings })
}

fn read_dimension(
    root: &Map<String, Value>,
    field: &str,
    warnings: &mut Vec<DocumentWarning>,
) -> Option<u32> {
    let Some(value) = root.get(field) else {
        warnings.push(DocumentWarning::malformed(field, "missing"));
        return None;
    };
    match value.as_u64() {
        Some(n) if (1..=u64::from(MAX_DOCUMENT_SIZE)).contains(&n) => Some(n as u32),
        _ => {
            warnings.push(DocumentWarning::malformed(
                field,
                format!("expected an integer between 1 and {}, got {}", MAX_DOCUMENT_SIZE, value),
            ));
            None
        }
    }
}

fn decode_frame(
    record: &Value,
    index: usize,
    size: u32,
    layout: PixelLayout,
    warnings: &mut Vec<DocumentWarning>,
) -> Frame {
    let field = |name: &str| format!("frames[{}].{}", index, name);

    let Some(record) = record.as_object() else {
        warnings.push(DocumentWarning::malformed(
            format!("frames[{}]", index),
            "expected an object; using a blank frame",
        ));
        return Frame::new(size);
    };

    let name = match record.get("name") {
        Some(Value::String(name)) => name.clone(),
        Some(_) => {
            warnings.push(DocumentWarning::malformed(field("name"), "expected a string"));
            String::new()
        }
        None => String::new(),
    };

    let mut raster = RgbaImage::from_pixel(size, size, BLANK);
    match record.get("arrayOfRows").map(Value::as_array) {
        Some(Some(rows)) => {
            let stats = fill_rows(&mut raster, rows);
            if stats.overflow {
                warnings.push(DocumentWarning::malformed(
                    field("arrayOfRows"),
                    format!("pixels beyond {}x{} ignored", size, size),
                ));
            }
            if stats.malformed_rows > 0 {
                warnings.push(DocumentWarning::malformed(
                    field("arrayOfRows"),
                    format!("{} rows are not arrays", stats.malformed_rows),
                ));
            }
            if stats.malformed_pixels > 0 {
                warnings.push(DocumentWarning::malformed(
                    field("arrayOfRows"),
                    format!("{} pixels had missing or invalid channels", stats.malformed_pixels),
                ));
            }
        }
        Some(None) => {
            warnings.push(DocumentWarning::malformed(field("arrayOfRows"), "expected an array"))
        }
        None => warnings.push(DocumentWarning::malformed(field("arrayOfRows"), "missing")),
    }

    let raster = match layout {
        PixelLayout::Legacy => imageops::rotate90(&raster),
        PixelLayout::RowMajor => raster,
    };

    let pixels = PixelStore::from_image(raster).unwrap_or_else(|| PixelStore::new(size));
    let mut frame = Frame::from_layers(vec![Layer::from_pixels(pixels)])
        .unwrap_or_else(|| Frame::new(size));
    frame.name = name;
    frame
}

#[derive(Default)]
struct FillStats {
    overflow: bool,
    malformed_rows: usize,
    malformed_pixels: usize,
}

/// Write rows in document order: row `i`, entry `j` lands at `(x = j, y = i)`.
fn fill_rows(raster: &mut RgbaImage, rows: &[Value]) -> FillStats {
    let size = raster.width() as usize;
    let mut stats = FillStats::default();

    for (y, row) in rows.iter().enumerate() {
        let Some(row) = row.as_array() else {
            stats.malformed_rows += 1;
            continue;
        };
        for (x, pixel) in row.iter().enumerate() {
            if x >= size || y >= size {
                stats.overflow = true;
                continue;
            }
            let (color, clean) = read_pixel(pixel);
            if !clean {
                stats.malformed_pixels += 1;
            }
            raster.put_pixel(x as u32, y as u32, color);
        }
    }

    stats
}

/// Read `{r, g, b, a}`. Missing channels are 0 and out-of-range channels are
/// clamped; the flag reports whether either happened.
fn read_pixel(value: &Value) -> (Rgba<u8>, bool) {
    let mut clean = value.is_object();
    let mut channel = |name: &str| -> u8 {
        let raw = value
            .get(name)
            .and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f as i64)));
        match raw {
            Some(n) if (0..=255).contains(&n) => n as u8,
            Some(n) => {
                clean = false;
                n.clamp(0, 255) as u8
            }
            None => {
                clean = false;
                0
            }
        }
    };
    let color = Rgba([channel("r"), channel("g"), channel("b"), channel("a")]);
    (color, clean)
}
