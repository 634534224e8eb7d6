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

use anyhow::{anyhow, Result};
use pxcore::canvas::render;
use pxcore::paint::{Image8, Size};
use pxcore::view::{ViewTransform, ZoomLimits, ZOOM_STEP};
use pximpex::{load_document, save_flat_image};
use tracing::{info, warn};

use std::path::{Path, PathBuf};
use std::time::Instant;

/// Zoom settings for the rendered image
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewOpts {
    pub zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub device_pixel_ratio: f64,
}

impl ViewOpts {
    pub fn transform(&self) -> Result<ViewTransform> {
        let limits =
            ZoomLimits::new(self.min_zoom, self.max_zoom, ZOOM_STEP).map_err(|e| anyhow!(e))?;

        if !(self.device_pixel_ratio.is_finite() && self.device_pixel_ratio > 0.0) {
            return Err(anyhow!(
                "invalid device pixel ratio {}",
                self.device_pixel_ratio
            ));
        }

        let mut transform =
            ViewTransform::with_limits(limits).with_device_pixel_ratio(self.device_pixel_ratio);
        transform.set_zoom(self.zoom);

        if transform.zoom_level() != self.zoom {
            warn!(
                "Zoom level {} clamped to {}",
                self.zoom,
                transform.zoom_level()
            );
        }

        Ok(transform)
    }
}

/// A change to apply to the document before rendering it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edit {
    None,

    /// Move the layer at the given stacking index to a new index
    Move { layer: usize, to: usize },

    /// Hide the layer at the given stacking index
    Hide { layer: usize },
}

pub struct RenderOpts<'a> {
    /// Name of the input document
    pub input_file: &'a str,

    /// Name of the output image. Defaults to the input file with a .png suffix
    pub output_file: Option<&'a str>,

    pub view: ViewOpts,

    pub edit: Edit,
}

pub fn output_path(input_file: &str, output_file: Option<&str>) -> PathBuf {
    match output_file {
        Some(f) => PathBuf::from(f),
        None => Path::new(input_file).with_extension("png"),
    }
}

pub fn render_document(opts: &RenderOpts) -> Result<()> {
    let start = Instant::now();
    let transform = opts.view.transform()?;
    let mut doc = load_document(opts.input_file)?;

    match opts.edit {
        Edit::None => {}
        Edit::Move { layer, to } => {
            let id = doc.layer_at(layer)?.id();
            if doc.move_layer(id, to)? {
                info!("Moved layer {} to {}", layer, doc.index_of(id).unwrap_or(to));
            } else {
                info!("Layer {} not moved", layer);
            }
        }
        Edit::Hide { layer } => {
            let id = doc.layer_at(layer)?.id();
            doc.edit_layer(id)?.set_hidden(true);
            info!("Hid layer {} ({})", layer, doc.layer_at(layer)?.name());
        }
    }

    let scaled_size = transform.scaled_size(doc.size());
    let scaled_size = Size::new(scaled_size.width.max(1), scaled_size.height.max(1));
    if scaled_size.checked_bytes().is_none() {
        return Err(anyhow!(
            "scaled image {} is too big, use a lower zoom level",
            scaled_size
        ));
    }

    let flat = render(&doc)?;
    let image = if scaled_size == flat.size() {
        flat
    } else {
        scale_nearest(&flat, scaled_size)
    };

    let output = output_path(opts.input_file, opts.output_file);
    save_flat_image(&output, &image)?;

    info!(
        "Wrote {} image to {} in {:.3}s",
        image.size(),
        output.display(),
        start.elapsed().as_secs_f64()
    );

    Ok(())
}

/// Nearest neighbour scaling, so zoomed in pixels stay sharp
fn scale_nearest(image: &Image8, size: Size) -> Image8 {
    let (width, height) = (size.width as usize, size.height as usize);
    let mut pixels = Vec::with_capacity(width * height);
    for y in 0..height {
        let row = (y * image.height / height) * image.width;
        pixels.extend((0..width).map(|x| image.pixels[row + x * image.width / width]));
    }
    Image8 {
        pixels,
        width,
        height,
    }
}
