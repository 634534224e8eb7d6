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

use image::{Rgba, RgbaImage};
use pxcore::paint::color::{premultiply_pixel8, unpremultiply_pixel8, Pixel8};
use pxcore::paint::Image8;

/// Convert a straight alpha RGBA image into a premultiplied Image8
pub fn to_image8(img: &RgbaImage) -> Image8 {
    let pixels = bytemuck::cast_slice::<_, Pixel8>(img.as_raw());

    Image8 {
        pixels: pixels.iter().map(|&p| premultiply_pixel8(p)).collect(),
        width: img.width() as usize,
        height: img.height() as usize,
    }
}

/// Convert a premultiplied Image8 into a straight alpha RGBA image
pub fn from_image8(img: &Image8) -> RgbaImage {
    RgbaImage::from_fn(img.width as u32, img.height as u32, |x, y| {
        Rgba(unpremultiply_pixel8(
            img.pixels[y as usize * img.width + x as usize],
        ))
    })
}
