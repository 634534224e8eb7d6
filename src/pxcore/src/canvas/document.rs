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

use super::observable::{DocumentChange, DocumentObserver, ObserverList};
use crate::paint::{Blendmode, Color, Image8, Layer, LayerID, Size};

use std::cell::RefCell;
use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// Layer index past the end of the layer list
    OutOfBounds { index: usize, count: usize },

    /// No layer with this ID exists in the document
    UnknownLayer(LayerID),

    /// Layer content does not match the canvas size
    SizeMismatch {
        index: usize,
        expected: Size,
        actual: Size,
    },
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentError::OutOfBounds { index, count } => {
                write!(f, "layer index {} out of bounds (layer count {})", index, count)
            }
            DocumentError::UnknownLayer(id) => write!(f, "no such layer: {}", id),
            DocumentError::SizeMismatch {
                index,
                expected,
                actual,
            } => write!(
                f,
                "layer {} is {} but the canvas is {}",
                index, actual, expected
            ),
        }
    }
}

impl std::error::Error for DocumentError {}

/// Content and properties of a layer that is about to be added to a document
#[derive(Clone, Debug)]
pub struct LayerContent {
    pub name: String,
    pub hidden: bool,
    pub alpha: u8,
    pub blend_mode: Option<String>,
    pub pixels: Image8,
}

/// A layered drawing document.
///
/// Layers are ordered top to bottom: index 0 is the topmost layer.
/// The layer list is populated once at construction; afterwards only
/// the order and the layer properties can change. Every change is
/// delivered to the registered observers before the mutating call
/// returns.
pub struct Document {
    size: Size,
    layers: Vec<Layer>,
    palette: Vec<Option<Color>>,
    source_path: Option<PathBuf>,
    observers: ObserverList,
}

impl Document {
    /// Create an empty document (a fresh canvas without layers)
    pub fn new(size: Size) -> Document {
        Document {
            size,
            layers: Vec::new(),
            palette: Vec::new(),
            source_path: None,
            observers: ObserverList::default(),
        }
    }

    /// Create a document with the given layers, topmost first.
    ///
    /// Layer IDs are assigned in order, starting from 1.
    pub fn from_layers(size: Size, layers: Vec<LayerContent>) -> Result<Document, DocumentError> {
        let mut doc = Document::new(size);
        doc.layers.reserve(layers.len());

        for (index, content) in layers.into_iter().enumerate() {
            let actual = content.pixels.size();
            if actual != size {
                return Err(DocumentError::SizeMismatch {
                    index,
                    expected: size,
                    actual,
                });
            }

            let mut layer = Layer::from_image(index as LayerID + 1, content.pixels);
            layer.name = content.name;
            layer.hidden = content.hidden;
            layer.alpha = content.alpha;
            layer.blend_mode = content.blend_mode;
            doc.layers.push(layer);
        }

        debug!("Created {} document with {} layers", size, doc.layers.len());
        Ok(doc)
    }

    pub fn with_palette(mut self, palette: Vec<Option<Color>>) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_source_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_path = Some(path.into());
        self
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// The layers, topmost first
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn layer_at(&self, index: usize) -> Result<&Layer, DocumentError> {
        self.layers.get(index).ok_or(DocumentError::OutOfBounds {
            index,
            count: self.layers.len(),
        })
    }

    pub fn layer(&self, id: LayerID) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id() == id)
    }

    /// Find the current stacking index of a layer
    pub fn index_of(&self, id: LayerID) -> Option<usize> {
        self.layers.iter().position(|l| l.id() == id)
    }

    /// Palette slots. A slot without a color is None.
    pub fn palette(&self) -> &[Option<Color>] {
        &self.palette
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    /// Display name of the document
    pub fn name(&self) -> String {
        self.source_path
            .as_deref()
            .and_then(|p| p.file_stem())
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Untitled".into())
    }

    /// Add a new observer.
    /// The document will hold a weak reference to it.
    pub fn add_observer(&mut self, o: Rc<RefCell<dyn DocumentObserver>>) {
        self.observers.add(o);
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Move a layer to a new position in the stack.
    ///
    /// The target index is clamped to the valid range. Returns true if
    /// the layer was moved. Moving a layer to where it already is does
    /// nothing and sends no notification.
    pub fn move_layer(&mut self, id: LayerID, new_index: usize) -> Result<bool, DocumentError> {
        let current = self.index_of(id).ok_or(DocumentError::UnknownLayer(id))?;
        let new_index = new_index.min(self.layers.len() - 1);

        if current == new_index {
            return Ok(false);
        }

        let layer = self.layers.remove(current);
        self.layers.insert(new_index, layer);
        debug!("Moved layer {} from {} to {}", id, current, new_index);

        self.observers.notify(DocumentChange::LayerOrder);
        Ok(true)
    }

    /// Get a handle for changing the properties of a layer
    pub fn edit_layer(&mut self, id: LayerID) -> Result<LayerEdit<'_>, DocumentError> {
        let index = self.index_of(id).ok_or(DocumentError::UnknownLayer(id))?;
        Ok(LayerEdit { doc: self, index })
    }
}

/// Property setters for a single layer.
///
/// Each setter writes the value and notifies the document's observers.
pub struct LayerEdit<'a> {
    doc: &'a mut Document,
    index: usize,
}

impl<'a> LayerEdit<'a> {
    pub fn layer(&self) -> &Layer {
        &self.doc.layers[self.index]
    }

    pub fn set_hidden(&mut self, hidden: bool) -> &mut Self {
        self.update(|l| l.hidden = hidden)
    }

    pub fn set_alpha(&mut self, alpha: u8) -> &mut Self {
        self.update(|l| l.alpha = alpha)
    }

    /// Set the blend mode by name.
    ///
    /// The name is not validated here: an unknown mode is reported
    /// when the document is rendered.
    pub fn set_blend_mode(&mut self, mode: Option<&str>) -> &mut Self {
        let mode = mode.map(str::to_owned);
        self.update(|l| l.blend_mode = mode)
    }

    pub fn set_blendmode(&mut self, mode: Blendmode) -> &mut Self {
        self.set_blend_mode(Some(mode.name()))
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        let name = name.into();
        self.update(|l| l.name = name)
    }

    fn update<F: FnOnce(&mut Layer)>(&mut self, f: F) -> &mut Self {
        let layer = &mut self.doc.layers[self.index];
        f(layer);
        let id = layer.id();
        self.doc
            .observers
            .notify(DocumentChange::LayerProperties(id));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(name: &str, size: Size) -> LayerContent {
        LayerContent {
            name: name.into(),
            hidden: false,
            alpha: 255,
            blend_mode: None,
            pixels: Image8::new(size.width as usize, size.height as usize),
        }
    }

    fn three_layers() -> Document {
        let size = Size::new(2, 2);
        Document::from_layers(
            size,
            vec![content("a", size), content("b", size), content("c", size)],
        )
        .unwrap()
    }

    fn names(doc: &Document) -> Vec<&str> {
        doc.layers().iter().map(|l| l.name()).collect()
    }

    #[test]
    fn test_from_layers_assigns_ids_in_order() {
        let doc = three_layers();
        assert_eq!(doc.layer_count(), 3);
        assert_eq!(names(&doc), ["a", "b", "c"]);
        assert_eq!(
            doc.layers().iter().map(|l| l.id()).collect::<Vec<_>>(),
            [1, 2, 3]
        );
    }

    #[test]
    fn test_size_mismatch() {
        let err = Document::from_layers(
            Size::new(2, 2),
            vec![content("a", Size::new(2, 2)), content("b", Size::new(3, 2))],
        )
        .err();
        assert_eq!(
            err,
            Some(DocumentError::SizeMismatch {
                index: 1,
                expected: Size::new(2, 2),
                actual: Size::new(3, 2)
            })
        );
    }

    #[test]
    fn test_layer_at_out_of_bounds() {
        let doc = three_layers();
        assert_eq!(doc.layer_at(2).unwrap().name(), "c");
        assert_eq!(
            doc.layer_at(3).err(),
            Some(DocumentError::OutOfBounds { index: 3, count: 3 })
        );
    }

    #[test]
    fn test_move_layer() {
        let mut doc = three_layers();

        assert_eq!(doc.move_layer(1, 2), Ok(true));
        assert_eq!(names(&doc), ["b", "c", "a"]);

        assert_eq!(doc.move_layer(1, 0), Ok(true));
        assert_eq!(names(&doc), ["a", "b", "c"]);

        // Target index is clamped
        assert_eq!(doc.move_layer(2, 100), Ok(true));
        assert_eq!(names(&doc), ["a", "c", "b"]);

        assert_eq!(doc.move_layer(2, 2), Ok(false));
        assert_eq!(doc.move_layer(2, 5), Ok(false));
        assert_eq!(doc.move_layer(9, 0), Err(DocumentError::UnknownLayer(9)));
    }

    #[test]
    fn test_edit_layer() {
        let mut doc = three_layers();
        doc.edit_layer(2)
            .unwrap()
            .set_hidden(true)
            .set_alpha(128)
            .set_blendmode(Blendmode::Screen)
            .set_name("renamed");

        let layer = doc.layer(2).unwrap();
        assert!(layer.is_hidden());
        assert_eq!(layer.alpha(), 128);
        assert_eq!(layer.blend_mode(), Some("screen"));
        assert_eq!(layer.name(), "renamed");

        doc.edit_layer(2).unwrap().set_blend_mode(None);
        assert_eq!(doc.layer(2).unwrap().blendmode(), Some(Blendmode::Normal));

        assert!(doc.edit_layer(7).is_err());
    }

    #[test]
    fn test_document_name() {
        assert_eq!(Document::new(Size::new(1, 1)).name(), "Untitled");
        assert_eq!(
            Document::new(Size::new(1, 1))
                .with_source_path("/tmp/drawings/castle.pyxel")
                .name(),
            "castle"
        );
    }
}
