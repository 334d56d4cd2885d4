//! Property tests for the editor core.
//!
//! Random rasters, layer stacks and operation sequences are pushed through
//! compositing, editing and persistence to check the guarantees callers
//! rely on.

use image::imageops::flip_horizontal;
use image::{Rgba, RgbaImage};
use proptest::collection::vec;
use proptest::prelude::*;

use pxedit::composition::{composite, TRANSPARENT};
use pxedit::document::{from_json_str, to_json_string, PixelLayout};
use pxedit::edit::{Point, Tool};
use pxedit::editor::Editor;
use pxedit::models::{Direction, Frame, Layer, PixelStore, Project, BLANK};

/// Either fully transparent or fully opaque, so compositing is exact.
fn pixel() -> impl Strategy<Value = Rgba<u8>> {
    prop_oneof![
        Just(TRANSPARENT),
        (any::<u8>(), any::<u8>(), any::<u8>()).prop_map(|(r, g, b)| Rgba([r, g, b, 255])),
    ]
}

fn raster(size: u32) -> impl Strategy<Value = RgbaImage> {
    vec(pixel(), (size * size) as usize).prop_map(move |samples| {
        RgbaImage::from_fn(size, size, |x, y| samples[(y * size + x) as usize])
    })
}

fn layer(size: u32) -> impl Strategy<Value = Layer> {
    (raster(size), any::<bool>()).prop_map(|(image, visible)| {
        let mut layer = Layer::from_pixels(PixelStore::from_image(image).unwrap());
        layer.visible = visible;
        layer
    })
}

fn layered_frame(size: u32) -> impl Strategy<Value = Frame> {
    vec(layer(size), 1..4).prop_map(|layers| Frame::from_layers(layers).unwrap())
}

/// A project whose frames each hold one visible layer.
fn flat_project() -> impl Strategy<Value = Project> {
    (1u32..6).prop_flat_map(|size| {
        vec((raster(size), "[a-z]{0,6}"), 1..4).prop_map(move |frames| {
            let frames = frames
                .into_iter()
                .map(|(image, name)| {
                    let layer = Layer::from_pixels(PixelStore::from_image(image).unwrap());
                    let mut frame = Frame::from_layers(vec![layer]).unwrap();
                    frame.name = name;
                    frame
                })
                .collect();
            Project::from_frames(size, frames).unwrap()
        })
    })
}

#[derive(Debug, Clone)]
enum Op {
    AddFrame,
    RemoveFrame(usize),
    DuplicateFrame(usize),
    SelectFrame(usize),
    NextFrame,
    PreviousFrame,
    AddLayer,
    RemoveLayer(usize),
    MoveLayer(usize, bool),
    SelectLayer(usize),
    AdvancePreview,
    Paint(i64, i64),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::AddFrame),
        (0usize..6).prop_map(Op::RemoveFrame),
        (0usize..6).prop_map(Op::DuplicateFrame),
        (0usize..6).prop_map(Op::SelectFrame),
        Just(Op::NextFrame),
        Just(Op::PreviousFrame),
        Just(Op::AddLayer),
        (0usize..6).prop_map(Op::RemoveLayer),
        ((0usize..6), any::<bool>()).prop_map(|(i, up)| Op::MoveLayer(i, up)),
        (0usize..6).prop_map(Op::SelectLayer),
        Just(Op::AdvancePreview),
        ((-2i64..6), (-2i64..6)).prop_map(|(x, y)| Op::Paint(x, y)),
    ]
}

/// Apply an operation and report whether the editor accepted it.
fn apply(editor: &mut Editor, op: &Op) -> bool {
    match *op {
        Op::AddFrame => {
            editor.add_frame();
            true
        }
        Op::RemoveFrame(i) => editor.remove_frame(i).is_ok(),
        Op::DuplicateFrame(i) => editor.duplicate_frame(i).is_ok(),
        Op::SelectFrame(i) => editor.select_frame(i).is_ok(),
        Op::NextFrame => {
            editor.next_frame();
            true
        }
        Op::PreviousFrame => {
            editor.previous_frame();
            true
        }
        Op::AddLayer => {
            editor.add_layer();
            true
        }
        Op::RemoveLayer(i) => editor.remove_layer(i).is_ok(),
        Op::MoveLayer(i, up) => {
            let direction = if up { Direction::Up } else { Direction::Down };
            editor.move_layer(i, direction).is_ok()
        }
        Op::SelectLayer(i) => editor.select_layer(i).is_ok(),
        Op::AdvancePreview => {
            editor.advance_preview();
            true
        }
        Op::Paint(x, y) => {
            editor.set_tool(Tool::Pen);
            let accepted = editor.begin_stroke(Point::new(x, y)).is_ok();
            editor.end_stroke();
            accepted
        }
    }
}

fn check_structure(project: &Project) -> Result<(), TestCaseError> {
    prop_assert!(project.frame_count() >= 1);
    prop_assert!(project.active_frame_index() < project.frame_count());
    prop_assert!(project.preview_frame_index() < project.frame_count());
    for frame in project.frames() {
        prop_assert!(frame.layer_count() >= 1);
        prop_assert!(frame.active_layer_index() < frame.layer_count());
        for layer in frame.layers() {
            prop_assert_eq!(layer.pixels.size(), project.size());
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn composite_is_deterministic_and_pure(frame in (1u32..6).prop_flat_map(layered_frame)) {
        let before = frame.clone();
        let first = composite(&frame);
        let second = composite(&frame);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(frame, before);
    }

    #[test]
    fn topmost_visible_opaque_layer_wins(frame in (1u32..6).prop_flat_map(layered_frame)) {
        let image = composite(&frame);
        let size = frame.size();
        for y in 0..size {
            for x in 0..size {
                let expected = frame
                    .layers()
                    .iter()
                    .filter(|layer| layer.visible)
                    .filter_map(|layer| layer.pixels.get(x, y))
                    .find(|sample| sample[3] == 255)
                    .unwrap_or(TRANSPARENT);
                prop_assert_eq!(*image.get_pixel(x, y), expected);
            }
        }
    }

    #[test]
    fn hidden_layers_do_not_contribute(frame in (1u32..6).prop_flat_map(layered_frame)) {
        let visible: Vec<Layer> =
            frame.layers().iter().filter(|layer| layer.visible).cloned().collect();
        prop_assume!(!visible.is_empty());
        let pruned = Frame::from_layers(visible).unwrap();
        prop_assert_eq!(composite(&frame), composite(&pruned));
    }

    #[test]
    fn row_major_round_trip_is_exact(project in flat_project()) {
        let json = to_json_string(&project, PixelLayout::RowMajor).unwrap();
        let decoded = from_json_str(&json, PixelLayout::RowMajor).unwrap();
        prop_assert!(decoded.warnings.is_empty());
        prop_assert_eq!(decoded.project.size(), project.size());
        prop_assert_eq!(decoded.project.composites(), project.composites());
        let names: Vec<_> = decoded.project.frames().iter().map(|f| f.name.clone()).collect();
        let expected: Vec<_> = project.frames().iter().map(|f| f.name.clone()).collect();
        prop_assert_eq!(names, expected);
    }

    #[test]
    fn legacy_round_trip_mirrors_horizontally(project in flat_project()) {
        let json = to_json_string(&project, PixelLayout::Legacy).unwrap();
        let decoded = from_json_str(&json, PixelLayout::Legacy).unwrap();
        prop_assert!(decoded.warnings.is_empty());
        let mirrored: Vec<RgbaImage> =
            project.composites().iter().map(flip_horizontal).collect();
        prop_assert_eq!(decoded.project.composites(), mirrored);
    }

    #[test]
    fn structure_survives_any_operation_sequence(ops in vec(op(), 0..40)) {
        let mut editor = Editor::with_project(Project::new(4).unwrap());
        for op in &ops {
            let before = editor.project().clone();
            if !apply(&mut editor, op) {
                prop_assert_eq!(editor.project(), &before);
            }
            check_structure(editor.project())?;
        }
    }

    #[test]
    fn resize_leaves_one_blank_frame(
        ops in vec(op(), 0..20),
        size in 1u32..10,
    ) {
        let mut editor = Editor::with_project(Project::new(4).unwrap());
        for op in &ops {
            apply(&mut editor, op);
        }
        editor.set_size(size).unwrap();

        let project = editor.project();
        prop_assert_eq!(project.size(), size);
        prop_assert_eq!(project.frame_count(), 1);
        let frame = project.frame(0).unwrap();
        prop_assert_eq!(frame.layer_count(), 1);
        prop_assert!(frame.layer(0).unwrap().pixels.as_image().pixels().all(|p| *p == BLANK));
    }

    #[test]
    fn pen_touches_exactly_one_pixel_or_nothing(
        size in 1u32..6,
        x in -3i64..8,
        y in -3i64..8,
    ) {
        let mut editor = Editor::with_project(Project::new(size).unwrap());
        editor.set_tool(Tool::Pen);
        editor.set_color(Rgba([9, 8, 7, 255]));
        let result = editor.begin_stroke(Point::new(x, y));
        editor.end_stroke();

        let inside = (0..i64::from(size)).contains(&x) && (0..i64::from(size)).contains(&y);
        prop_assert_eq!(result.is_ok(), inside);

        let pixels = editor.project().active_frame().active_layer().pixels.as_image();
        let changed = pixels.enumerate_pixels().filter(|(_, _, p)| **p != BLANK).count();
        prop_assert_eq!(changed, usize::from(inside));
    }

    #[test]
    fn fill_is_confined_to_the_active_layer(
        layers in 2usize..5,
        target in 0usize..5,
        frames in 1usize..4,
    ) {
        prop_assume!(target < layers);
        let mut editor = Editor::with_project(Project::new(3).unwrap());
        for _ in 1..frames {
            editor.add_frame();
        }
        for _ in 1..layers {
            editor.add_layer();
        }
        editor.select_layer(target).unwrap();
        editor.set_tool(Tool::Fill);
        editor.begin_stroke(Point::new(0, 0)).unwrap();
        editor.end_stroke();

        let project = editor.project();
        for (f, frame) in project.frames().iter().enumerate() {
            for (l, layer) in frame.layers().iter().enumerate() {
                let filled = layer.pixels.as_image().pixels().all(|p| *p == Rgba([255, 255, 255, 255]));
                let blank = layer.pixels.as_image().pixels().all(|p| *p == BLANK);
                if f == 0 && l == target {
                    prop_assert!(filled);
                } else {
                    prop_assert!(blank);
                }
            }
        }
    }

    #[test]
    fn sequence_timing_follows_playback_rate(rate in 1u32..200, frames in 1usize..5) {
        let mut project = Project::new(2).unwrap();
        for _ in 1..frames {
            project.add_frame();
        }
        project.set_playback_rate(rate).unwrap();

        prop_assert_eq!(u32::from(project.frame_delay_centiseconds()), 100 / rate);
        prop_assert_eq!(project.preview_interval().as_millis(), u128::from(1000 / rate));
        prop_assert_eq!(project.composites().len(), frames);
    }

    #[test]
    fn preview_visits_every_frame_in_order(frames in 1usize..6, ticks in 0usize..20) {
        let mut project = Project::new(2).unwrap();
        for _ in 1..frames {
            project.add_frame();
        }
        for tick in 1..=ticks {
            prop_assert_eq!(project.advance_preview(), tick % frames);
        }
    }
}

#[test]
fn known_sequence_timing() {
    let mut project = Project::new(2).unwrap();
    project.set_playback_rate(4).unwrap();
    assert_eq!(project.frame_delay_centiseconds(), 25);
    project.set_playback_rate(1).unwrap();
    assert_eq!(project.frame_delay_centiseconds(), 100);
    project.set_playback_rate(3).unwrap();
    assert_eq!(project.frame_delay_centiseconds(), 33);
}
