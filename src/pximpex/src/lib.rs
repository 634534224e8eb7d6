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

use image::error::ImageError;
use pxcore::canvas::{Document, DocumentError, LayerContent};
use std::path::Path;
use std::{fmt, io};
use tracing::info;
use zip::result::ZipError;

pub mod container;
pub mod conv;
mod flat;

pub use container::{Container, LayerInfo};
pub use flat::save_flat_image;

#[derive(Debug)]
pub enum ImpexError {
    IoError(io::Error),
    CodecError(ImageError),

    /// The file is not a valid document container
    FormatError(String),

    /// Layer index past the end of the container's layer list
    OutOfBounds { index: usize, count: usize },
}

impl fmt::Display for ImpexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImpexError::IoError(e) => e.fmt(f),
            ImpexError::CodecError(e) => e.fmt(f),
            ImpexError::FormatError(msg) => write!(f, "invalid document: {}", msg),
            ImpexError::OutOfBounds { index, count } => {
                write!(f, "layer {} out of bounds (layer count {})", index, count)
            }
        }
    }
}

impl std::error::Error for ImpexError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImpexError::IoError(e) => Some(e),
            ImpexError::CodecError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ImpexError {
    fn from(err: io::Error) -> Self {
        Self::IoError(err)
    }
}

impl From<ImageError> for ImpexError {
    fn from(err: ImageError) -> Self {
        Self::CodecError(err)
    }
}

impl From<ZipError> for ImpexError {
    fn from(err: ZipError) -> Self {
        match err {
            ZipError::Io(io) => Self::IoError(io),
            e => Self::FormatError(e.to_string()),
        }
    }
}

impl From<serde_json::Error> for ImpexError {
    fn from(err: serde_json::Error) -> Self {
        Self::FormatError(format!("docData.json: {}", err))
    }
}

impl From<DocumentError> for ImpexError {
    fn from(err: DocumentError) -> Self {
        Self::FormatError(err.to_string())
    }
}

pub type DocumentImportResult = Result<Document, ImpexError>;
pub type ImageExportResult = Result<(), ImpexError>;

/// Load a layered document from a container file.
///
/// Every layer is decoded before this returns. Any problem aborts the
/// whole load; a partially loaded document is never returned.
pub fn load_document<P>(path: P) -> DocumentImportResult
where
    P: AsRef<Path>,
{
    fn inner(path: &Path) -> DocumentImportResult {
        let mut container = Container::open(path)?;

        let mut layers = Vec::with_capacity(container.layer_count());
        for index in 0..container.layer_count() {
            let pixels = container.layer_image(index)?;
            let info = container.layer_info(index)?;
            layers.push(LayerContent {
                name: info.name.clone(),
                hidden: info.hidden,
                alpha: info.alpha,
                blend_mode: info.blend_mode.clone(),
                pixels,
            });
        }

        let doc = Document::from_layers(container.size(), layers)?
            .with_palette(container.palette().to_vec())
            .with_source_path(path);

        info!(
            "Loaded {} ({}, {} layers)",
            path.display(),
            doc.size(),
            doc.layer_count()
        );
        Ok(doc)
    }
    inner(path.as_ref())
}
