//! On-disk project document
//!
//! ```json
//! {
//!   "frames": [ { "arrayOfRows": [[{"a":255,"b":0,"g":0,"r":255}, ...], ...], "name": "" } ],
//!   "height": 8,
//!   "numberOfFrames": 1,
//!   "width": 8
//! }
//! ```
//!
//! Field names are fixed by existing saved files. Fields are declared in
//! the alphabetical order those files list them in.

use image::Rgba;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDocument {
    pub frames: Vec<FrameRecord>,
    pub height: u32,
    pub number_of_frames: usize,
    pub width: u32,
}

/// One frame, flattened. Layers do not survive a save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameRecord {
    pub array_of_rows: Vec<Vec<PixelRecord>>,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRecord {
    pub a: u8,
    pub b: u8,
    pub g: u8,
    pub r: u8,
}

impl From<Rgba<u8>> for PixelRecord {
    fn from(color: Rgba<u8>) -> Self {
        let [r, g, b, a] = color.0;
        Self { a, b, g, r }
    }
}

impl From<PixelRecord> for Rgba<u8> {
    fn from(pixel: PixelRecord) -> Self {
        Rgba([pixel.r, pixel.g, pixel.b, pixel.a])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names_and_order() {
        let doc = ProjectDocument {
            frames: vec![FrameRecord {
                array_of_rows: vec![vec![PixelRecord::from(Rgba([1, 2, 3, 4]))]],
                name: "idle".to_string(),
            }],
            height: 1,
            number_of_frames: 1,
            width: 1,
        };
        let json = serde_json::to_string(&doc).unwrap();
        assert_eq!(
            json,
            r#"{"frames":[{"arrayOfRows":[[{"a":4,"b":3,"g":2,"r":1}]],"name":"idle"}],"height":1,"numberOfFrames":1,"width":1}"#
        );
    }
}
