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

use super::observable::{DocumentChange, DocumentObserver};
use super::Document;
use crate::paint::{rasterop, Image8, LayerID, Size};

use std::fmt;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// A visible layer uses a blend mode that does not exist
    UnsupportedBlendmode { layer: LayerID, name: String },
    /// The canvas is too big to allocate a pixel buffer for
    CanvasTooLarge(Size),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::UnsupportedBlendmode { layer, name } => {
                write!(f, "layer {}: unsupported blend mode '{}'", layer, name)
            }
            RenderError::CanvasTooLarge(size) => write!(f, "canvas {} is too big to render", size),
        }
    }
}

impl std::error::Error for RenderError {}

/// Flatten the visible layers of the document into a single image.
///
/// The result has the same size as the canvas and a transparent background.
pub fn render(document: &Document) -> Result<Image8, RenderError> {
    let mut image = Image8::default();
    render_into(document, &mut image)?;
    Ok(image)
}

/// Flatten the document into an existing image buffer.
///
/// The buffer is cleared (and resized to the canvas size if needed)
/// first. Layers are painted bottom to top. If a layer's blend mode
/// cannot be resolved, rendering stops before that layer is drawn and
/// the buffer is left containing the layers below it.
pub fn render_into(document: &Document, image: &mut Image8) -> Result<(), RenderError> {
    let size = document.size();
    if size.checked_bytes().is_none() {
        warn!("Canvas {} is too big to render", size);
        return Err(RenderError::CanvasTooLarge(size));
    }
    if image.size() != size {
        *image = Image8::new(size.width as usize, size.height as usize);
    } else {
        image.fill([0; 4]);
    }

    for layer in document.layers().iter().rev() {
        if layer.is_hidden() {
            continue;
        }

        let mode = layer.blendmode().ok_or_else(|| {
            let name = layer.blend_mode().unwrap_or_default().to_owned();
            warn!("Layer {} has unsupported blend mode '{}'", layer.id(), name);
            RenderError::UnsupportedBlendmode {
                layer: layer.id(),
                name,
            }
        })?;

        rasterop::pixel_blend(
            &mut image.pixels,
            &layer.pixels().pixels,
            layer.alpha(),
            mode,
        );
    }

    Ok(())
}

/// A renderer that keeps the last flattened image until the
/// document reports a change.
///
/// Register it as an observer of the document it renders. A fresh
/// renderer has nothing cached.
#[derive(Default)]
pub struct CachedRenderer {
    image: Image8,
    valid: bool,
}

impl CachedRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Is there a cached image that reflects the current document state
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn invalidate(&mut self) {
        self.valid = false;
    }

    /// Get the flattened document, rendering it again if it has changed
    pub fn render(&mut self, document: &Document) -> Result<&Image8, RenderError> {
        if !self.valid {
            debug!("Rendering {}", document.name());
            render_into(document, &mut self.image)?;
            self.valid = true;
        }
        Ok(&self.image)
    }
}

impl DocumentObserver for CachedRenderer {
    fn changed(&mut self, _change: &DocumentChange) {
        self.valid = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::LayerContent;
    use crate::paint::{Blendmode, Pixel8, Size};

    const RED: Pixel8 = [255, 0, 0, 255];
    const BLUE: Pixel8 = [0, 0, 255, 255];

    fn solid(name: &str, color: Pixel8) -> LayerContent {
        LayerContent {
            name: name.into(),
            hidden: false,
            alpha: 255,
            blend_mode: None,
            pixels: Image8::from_pixels(vec![color], 1, 1).unwrap(),
        }
    }

    #[test]
    fn test_top_layer_wins() {
        // index 0 is the topmost layer
        let mut doc = Document::from_layers(
            Size::new(1, 1),
            vec![solid("top", BLUE), solid("bottom", RED)],
        )
        .unwrap();
        assert_eq!(render(&doc).unwrap().pixels, [BLUE]);

        doc.edit_layer(1).unwrap().set_hidden(true);
        assert_eq!(render(&doc).unwrap().pixels, [RED]);
    }

    #[test]
    fn test_empty_document() {
        let doc = Document::new(Size::new(3, 2));
        let img = render(&doc).unwrap();
        assert_eq!(img.size(), Size::new(3, 2));
        assert!(img.pixels.iter().all(|p| *p == [0, 0, 0, 0]));
    }

    #[test]
    fn test_oversized_canvas() {
        let doc = Document::new(Size::new(u32::MAX, u32::MAX));
        assert_eq!(
            render(&doc),
            Err(RenderError::CanvasTooLarge(Size::new(u32::MAX, u32::MAX)))
        );

        let mut cached = CachedRenderer::new();
        assert!(cached.render(&doc).is_err());
        assert!(!cached.is_valid());
    }

    #[test]
    fn test_layer_alpha() {
        let mut doc = Document::from_layers(Size::new(1, 1), vec![solid("a", RED)]).unwrap();
        doc.edit_layer(1).unwrap().set_alpha(0);
        assert_eq!(render(&doc).unwrap().pixels, [[0, 0, 0, 0]]);

        doc.edit_layer(1).unwrap().set_alpha(128);
        assert_eq!(render(&doc).unwrap().pixels, [[128, 0, 0, 128]]);
    }

    #[test]
    fn test_unsupported_blendmode() {
        let mut doc = Document::from_layers(
            Size::new(1, 1),
            vec![solid("top", BLUE), solid("bottom", RED)],
        )
        .unwrap();
        doc.edit_layer(1).unwrap().set_blend_mode(Some("sparkle"));

        let mut image = Image8::default();
        assert_eq!(
            render_into(&doc, &mut image),
            Err(RenderError::UnsupportedBlendmode {
                layer: 1,
                name: "sparkle".into()
            })
        );
        assert_eq!(image.pixels, [RED]);

        // Hidden layers are not composited, so their mode doesn't matter
        doc.edit_layer(1).unwrap().set_hidden(true);
        assert_eq!(render(&doc).unwrap().pixels, [RED]);

        doc.edit_layer(1)
            .unwrap()
            .set_hidden(false)
            .set_blendmode(Blendmode::Normal);
        assert_eq!(render(&doc).unwrap().pixels, [BLUE]);
    }

    #[test]
    fn test_cached_renderer_render_once() {
        let doc = Document::from_layers(Size::new(1, 1), vec![solid("a", RED)]).unwrap();
        let mut renderer = CachedRenderer::new();
        assert!(!renderer.is_valid());

        assert_eq!(renderer.render(&doc).unwrap().pixels, [RED]);
        assert!(renderer.is_valid());

        renderer.changed(&DocumentChange::LayerOrder);
        assert!(!renderer.is_valid());
    }
}
