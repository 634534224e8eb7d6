// This file is part of Pixelpile.
// Copyright (C) 2026 The Pixelpile developers
//
// Pixelpile is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// As additional permission under section 7, you are allowed to distribute
// the software through an app store, even if that store has restrictive
// terms and conditions that are incompatible with the GPL, provided that
// the source is also available under the GPL with or without this permission
// through a channel without those restrictive terms and conditions.
//
// Pixelpile is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with Pixelpile.  If not, see <https://www.gnu.org/licenses/>.

use pixelpile_cli::renderer::{render_document, Edit, RenderOpts, ViewOpts};

use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder, RgbaImage};
use serde_json::json;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::write::FileOptions;
use zip::ZipWriter;

const RED: [u8; 4] = [255, 0, 0, 255];
const BLUE: [u8; 4] = [0, 0, 255, 255];
const CLEAR: [u8; 4] = [0, 0, 0, 0];

fn png(img: &RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    PngEncoder::new(&mut buf)
        .write_image(img.as_raw(), img.width(), img.height(), ColorType::Rgba8)
        .unwrap();
    buf
}

/// A canvas with an opaque red layer on top of a blue layer that
/// only covers the right half.
fn write_container(dir: &TempDir, width: u32, height: u32) -> PathBuf {
    let path = dir.path().join("doc.pyxel");
    let mut zip = ZipWriter::new(File::create(&path).unwrap());

    let docdata = json!({"canvas": {"width": width, "height": height, "layers": {
        "0": {"name": "Red", "hidden": false, "alpha": 255, "blendMode": "normal"},
        "1": {"name": "Blue", "hidden": false, "alpha": 255, "blendMode": null},
    }}});
    zip.start_file("docData.json", FileOptions::default())
        .unwrap();
    zip.write_all(docdata.to_string().as_bytes()).unwrap();

    let red = RgbaImage::from_pixel(width, height, image::Rgba(RED));
    let blue = RgbaImage::from_fn(width, height, |x, _| {
        image::Rgba(if x < width / 2 { CLEAR } else { BLUE })
    });
    for (index, img) in [red, blue].iter().enumerate() {
        zip.start_file(format!("layer{}.png", index), FileOptions::default())
            .unwrap();
        zip.write_all(&png(img)).unwrap();
    }

    zip.finish().unwrap();
    path
}

fn view(zoom: f64) -> ViewOpts {
    ViewOpts {
        zoom,
        min_zoom: -3.0,
        max_zoom: 12.0,
        device_pixel_ratio: 1.0,
    }
}

fn render_to(input: &Path, output: &Path, view: ViewOpts, edit: Edit) -> anyhow::Result<RgbaImage> {
    render_document(&RenderOpts {
        input_file: input.to_str().unwrap(),
        output_file: Some(output.to_str().unwrap()),
        view,
        edit,
    })?;
    Ok(image::open(output).unwrap().into_rgba8())
}

fn row(img: &RgbaImage, y: u32) -> Vec<[u8; 4]> {
    (0..img.width()).map(|x| img.get_pixel(x, y).0).collect()
}

#[test]
fn test_render_unedited() {
    let dir = TempDir::new().unwrap();
    let input = write_container(&dir, 2, 2);

    let img = render_to(&input, &dir.path().join("out.png"), view(0.0), Edit::None).unwrap();
    assert_eq!(img.dimensions(), (2, 2));
    assert_eq!(row(&img, 0), [RED, RED]);
    assert_eq!(row(&img, 1), [RED, RED]);
}

#[test]
fn test_render_with_default_output_name() {
    let dir = TempDir::new().unwrap();
    let input = write_container(&dir, 2, 2);

    render_document(&RenderOpts {
        input_file: input.to_str().unwrap(),
        output_file: None,
        view: view(0.0),
        edit: Edit::None,
    })
    .unwrap();

    assert!(dir.path().join("doc.png").exists());
}

#[test]
fn test_render_moved_layer() {
    let dir = TempDir::new().unwrap();
    let input = write_container(&dir, 2, 2);

    let img = render_to(
        &input,
        &dir.path().join("out.png"),
        view(0.0),
        Edit::Move { layer: 1, to: 0 },
    )
    .unwrap();
    assert_eq!(row(&img, 0), [RED, BLUE]);
    assert_eq!(row(&img, 1), [RED, BLUE]);

    // the source document itself is not modified
    let img = render_to(&input, &dir.path().join("out.png"), view(0.0), Edit::None).unwrap();
    assert_eq!(row(&img, 0), [RED, RED]);
}

#[test]
fn test_render_hidden_layer() {
    let dir = TempDir::new().unwrap();
    let input = write_container(&dir, 2, 2);

    let img = render_to(
        &input,
        &dir.path().join("out.png"),
        view(0.0),
        Edit::Hide { layer: 0 },
    )
    .unwrap();
    assert_eq!(row(&img, 0), [CLEAR, BLUE]);
    assert_eq!(row(&img, 1), [CLEAR, BLUE]);
}

#[test]
fn test_render_bad_layer_index() {
    let dir = TempDir::new().unwrap();
    let input = write_container(&dir, 2, 2);
    let output = dir.path().join("out.png");

    assert!(render_to(&input, &output, view(0.0), Edit::Hide { layer: 2 }).is_err());
    assert!(render_to(&input, &output, view(0.0), Edit::Move { layer: 5, to: 0 }).is_err());
    assert!(!output.exists());
}

#[test]
fn test_render_zoomed() {
    let dir = TempDir::new().unwrap();
    let input = write_container(&dir, 2, 2);

    let img = render_to(
        &input,
        &dir.path().join("out.png"),
        view(1.0),
        Edit::Hide { layer: 0 },
    )
    .unwrap();
    assert_eq!(img.dimensions(), (4, 4));
    for y in 0..4 {
        assert_eq!(row(&img, y), [CLEAR, CLEAR, BLUE, BLUE]);
    }

    let img = render_to(&input, &dir.path().join("out.png"), view(-1.0), Edit::None).unwrap();
    assert_eq!(img.dimensions(), (1, 1));
    assert_eq!(row(&img, 0), [RED]);
}

#[test]
fn test_render_zoom_too_big() {
    let dir = TempDir::new().unwrap();
    let input = write_container(&dir, 16, 16);
    let output = dir.path().join("out.png");

    // 16 * 2^12 = 65536 pixels square
    match render_to(&input, &output, view(12.0), Edit::None) {
        Err(e) => assert!(e.to_string().contains("too big"), "{}", e),
        Ok(img) => panic!("rendered a {:?} image", img.dimensions()),
    }
    assert!(!output.exists());

    let img = render_to(&input, &output, view(4.0), Edit::None).unwrap();
    assert_eq!(img.dimensions(), (256, 256));
}
