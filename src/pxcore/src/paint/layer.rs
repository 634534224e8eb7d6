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

use super::image::Image8;
use super::{Blendmode, LayerID, Size};

/// A single raster layer.
///
/// The pixel buffer is fixed at construction: its size always equals
/// the canvas size of the document that owns the layer. The properties
/// can only be changed through the owning document so that observers
/// get notified.
#[derive(Clone, Debug)]
pub struct Layer {
    id: LayerID,
    pub(crate) name: String,
    pub(crate) hidden: bool,
    pub(crate) alpha: u8,
    pub(crate) blend_mode: Option<String>,
    pixels: Image8,
}

impl Layer {
    /// Create a layer around premultiplied pixel content
    pub fn from_image(id: LayerID, pixels: Image8) -> Layer {
        Layer {
            id,
            name: String::new(),
            hidden: false,
            alpha: 255,
            blend_mode: None,
            pixels,
        }
    }

    pub fn id(&self) -> LayerID {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Layer opacity: 0 is fully transparent, 255 is fully opaque
    pub fn alpha(&self) -> u8 {
        self.alpha
    }

    /// The blend mode name as stored in the document.
    ///
    /// None means the default (normal) mode.
    pub fn blend_mode(&self) -> Option<&str> {
        self.blend_mode.as_deref()
    }

    /// Resolve the blend mode name. Returns None if it is not a known mode.
    pub fn blendmode(&self) -> Option<Blendmode> {
        Blendmode::from_name(self.blend_mode())
    }

    pub fn size(&self) -> Size {
        self.pixels.size()
    }

    pub fn pixels(&self) -> &Image8 {
        &self.pixels
    }
}
