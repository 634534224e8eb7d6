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

use std::path::Path;

use image::ImageFormat;
use pxcore::paint::Image8;
use tracing::debug;

use super::conv::from_image8;
use crate::ImageExportResult;

/// Save a flattened image as a PNG file
pub fn save_flat_image<P>(path: P, image: &Image8) -> ImageExportResult
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    from_image8(image).save_with_format(path, ImageFormat::Png)?;
    debug!("Wrote {} image to {}", image.size(), path.display());
    Ok(())
}
