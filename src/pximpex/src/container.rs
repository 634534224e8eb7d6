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

//! Reader for the zip based layered document container.
//!
//! A container holds a `docData.json` metadata entry and one PNG
//! stream per layer, named `layer{N}.png`, where N is the layer's
//! stacking index (0 is the topmost layer.)

use super::conv::to_image8;
use super::ImpexError;
use pxcore::paint::{Color, Image8, Size};

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Cursor, Read, Seek};
use std::path::Path;
use std::str::FromStr;

use image::io::Reader as ImageReader;
use image::ImageFormat;
use serde::Deserialize;
use tracing::{debug, warn};
use zip::result::ZipError;
use zip::ZipArchive;

const METADATA_ENTRY: &str = "docData.json";

/// Upper limit for the number of palette slots
const MAX_PALETTE_SLOTS: usize = 0x10000;

/// Metadata of a single layer, as stored in the container
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayerInfo {
    pub name: String,
    pub hidden: bool,
    pub alpha: u8,

    /// Blend mode name. None means the default (normal) mode.
    pub blend_mode: Option<String>,
}

#[derive(Deserialize)]
struct DocData {
    canvas: CanvasData,
    #[serde(default)]
    palette: Option<PaletteData>,
}

#[derive(Deserialize)]
struct CanvasData {
    width: i64,
    height: i64,
    layers: BTreeMap<String, LayerData>,
}

// A missing or null blendMode means normal, the other fields are required
#[derive(Deserialize)]
struct LayerData {
    name: String,
    hidden: bool,
    alpha: u8,
    #[serde(rename = "blendMode")]
    blend_mode: Option<String>,
}

#[derive(Deserialize)]
struct PaletteData {
    #[serde(default)]
    colors: BTreeMap<String, Option<String>>,
    #[serde(default, rename = "numColors")]
    num_colors: Option<usize>,
}

/// An open document container.
///
/// The metadata is parsed when the container is opened. Layer images
/// are decoded on request.
pub struct Container<R> {
    archive: ZipArchive<R>,
    size: Size,
    layers: Vec<LayerInfo>,
    palette: Vec<Option<Color>>,
}

impl Container<File> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ImpexError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            warn!("Couldn't open {}: {}", path.display(), e);
            e
        })?;
        Self::from_reader(file)
    }
}

impl<R: Read + Seek> Container<R> {
    pub fn from_reader(reader: R) -> Result<Self, ImpexError> {
        let mut archive = ZipArchive::new(reader)?;

        let docdata: DocData = match archive.by_name(METADATA_ENTRY) {
            Ok(entry) => serde_json::from_reader(entry).map_err(|e| {
                warn!("Couldn't parse {}: {}", METADATA_ENTRY, e);
                ImpexError::from(e)
            })?,
            Err(ZipError::FileNotFound) => {
                warn!("{} not found", METADATA_ENTRY);
                return Err(format_error(format!("{} not found", METADATA_ENTRY)));
            }
            Err(e) => return Err(e.into()),
        };

        let size = Size::new(
            dimension("width", docdata.canvas.width)?,
            dimension("height", docdata.canvas.height)?,
        );
        if size.checked_bytes().is_none() {
            warn!("Canvas {} is too big", size);
            return Err(format_error(format!("canvas {} is too big", size)));
        }
        let layers = ordered_layers(docdata.canvas.layers)?;
        let palette = match docdata.palette {
            Some(p) => parse_palette(p)?,
            None => Vec::new(),
        };

        debug!(
            "Opened {} container with {} layers and {} palette slots",
            size,
            layers.len(),
            palette.len()
        );

        Ok(Self {
            archive,
            size,
            layers,
            palette,
        })
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Layer metadata, topmost layer first
    pub fn layers(&self) -> &[LayerInfo] {
        &self.layers
    }

    pub fn layer_info(&self, index: usize) -> Result<&LayerInfo, ImpexError> {
        self.check_index(index)?;
        Ok(&self.layers[index])
    }

    pub fn palette(&self) -> &[Option<Color>] {
        &self.palette
    }

    /// Decode the pixel content of a layer.
    ///
    /// The image must be exactly the size of the canvas.
    pub fn layer_image(&mut self, index: usize) -> Result<Image8, ImpexError> {
        self.check_index(index)?;

        let filename = format!("layer{}.png", index);
        let mut content = Vec::new();
        match self.archive.by_name(&filename) {
            Ok(mut entry) => {
                entry.read_to_end(&mut content)?;
            }
            Err(ZipError::FileNotFound) => {
                warn!("Layer {}: {} not found", index, filename);
                return Err(format_error(format!(
                    "layer {}: {} not found",
                    index, filename
                )));
            }
            Err(e) => return Err(e.into()),
        }

        let img = ImageReader::with_format(Cursor::new(content), ImageFormat::Png)
            .decode()
            .map_err(|e| {
                warn!("Layer {}: couldn't decode {}: {}", index, filename, e);
                format_error(format!("layer {}: {}", index, e))
            })?
            .into_rgba8();

        let actual = Size::new(img.width(), img.height());
        if actual != self.size {
            warn!(
                "Layer {} is {} but the canvas is {}",
                index, actual, self.size
            );
            return Err(format_error(format!(
                "layer {}: image is {} but the canvas is {}",
                index, actual, self.size
            )));
        }

        Ok(to_image8(&img))
    }

    fn check_index(&self, index: usize) -> Result<(), ImpexError> {
        if index >= self.layers.len() {
            return Err(ImpexError::OutOfBounds {
                index,
                count: self.layers.len(),
            });
        }
        Ok(())
    }
}

fn format_error(msg: String) -> ImpexError {
    ImpexError::FormatError(msg)
}

fn dimension(name: &str, value: i64) -> Result<u32, ImpexError> {
    match u32::try_from(value) {
        Ok(v) if v > 0 => Ok(v),
        _ => {
            warn!("Invalid canvas {}: {}", name, value);
            Err(format_error(format!("invalid canvas {}: {}", name, value)))
        }
    }
}

/// Parse a decimal index key. Only plain digits are accepted.
fn parse_index(key: &str, what: &str) -> Result<usize, ImpexError> {
    if !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(i) = key.parse() {
            return Ok(i);
        }
    }
    warn!("Invalid {} key '{}'", what, key);
    Err(format_error(format!("invalid {} key '{}'", what, key)))
}

/// Put the layer table in stacking order.
///
/// Keys are ordered numerically and must cover 0..len without gaps.
fn ordered_layers(layers: BTreeMap<String, LayerData>) -> Result<Vec<LayerInfo>, ImpexError> {
    let mut numbered = BTreeMap::new();
    for (key, data) in layers {
        let index = parse_index(&key, "layer")?;
        if numbered.insert(index, data).is_some() {
            warn!("Duplicate layer key '{}'", key);
            return Err(format_error(format!("duplicate layer {}", index)));
        }
    }

    numbered
        .into_iter()
        .enumerate()
        .map(|(expected, (index, data))| {
            if index != expected {
                warn!("Layer {} missing from {}", expected, METADATA_ENTRY);
                return Err(format_error(format!("layer {} is missing", expected)));
            }
            Ok(LayerInfo {
                name: data.name,
                hidden: data.hidden,
                alpha: data.alpha,
                blend_mode: data.blend_mode,
            })
        })
        .collect()
}

/// Build the palette slot list. Slots without a color are None.
fn parse_palette(palette: PaletteData) -> Result<Vec<Option<Color>>, ImpexError> {
    let mut colors = BTreeMap::new();
    for (key, value) in palette.colors {
        let index = parse_index(&key, "palette")?;
        let color = value
            .map(|s| {
                Color::from_str(&s).map_err(|e| {
                    warn!("Palette slot {}: {} ('{}')", index, e, s);
                    format_error(format!("palette slot {}: {}", index, e))
                })
            })
            .transpose()?;
        colors.insert(index, color);
    }

    let count = colors
        .keys()
        .next_back()
        .map_or(0, |&i| i + 1)
        .max(palette.num_colors.unwrap_or(0));

    if count > MAX_PALETTE_SLOTS {
        warn!("Palette too big: {} slots", count);
        return Err(format_error(format!("palette too big ({} slots)", count)));
    }

    let mut slots = vec![None; count];
    for (index, color) in colors {
        slots[index] = color;
    }
    Ok(slots)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer(name: &str) -> LayerData {
        LayerData {
            name: name.into(),
            hidden: false,
            alpha: 255,
            blend_mode: None,
        }
    }

    #[test]
    fn test_parse_index() {
        assert_eq!(parse_index("0", "layer").unwrap(), 0);
        assert_eq!(parse_index("12", "layer").unwrap(), 12);
        assert!(parse_index("", "layer").is_err());
        assert!(parse_index("-1", "layer").is_err());
        assert!(parse_index("+1", "layer").is_err());
        assert!(parse_index("one", "layer").is_err());
        assert!(parse_index("99999999999999999999999", "layer").is_err());
    }

    #[test]
    fn test_numeric_order() {
        let mut map = BTreeMap::new();
        for i in 0..12 {
            map.insert(i.to_string(), layer(&format!("L{}", i)));
        }

        let layers = ordered_layers(map).unwrap();
        let names: Vec<_> = layers.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(
            names,
            ["L0", "L1", "L2", "L3", "L4", "L5", "L6", "L7", "L8", "L9", "L10", "L11"]
        );
    }

    #[test]
    fn test_gaps_and_duplicates() {
        let mut map = BTreeMap::new();
        map.insert("0".to_string(), layer("a"));
        map.insert("2".to_string(), layer("c"));
        assert!(matches!(
            ordered_layers(map),
            Err(ImpexError::FormatError(msg)) if msg.contains("layer 1")
        ));

        let mut map = BTreeMap::new();
        map.insert("0".to_string(), layer("a"));
        map.insert("00".to_string(), layer("b"));
        assert!(ordered_layers(map).is_err());
    }

    #[test]
    fn test_palette_slots() {
        let mut colors = BTreeMap::new();
        colors.insert("0".to_string(), Some("ff0000".to_string()));
        colors.insert("1".to_string(), None);
        colors.insert("3".to_string(), Some("800000ff".to_string()));

        let palette = parse_palette(PaletteData {
            colors,
            num_colors: Some(6),
        })
        .unwrap();

        assert_eq!(palette.len(), 6);
        assert_eq!(palette[0], Some(Color::rgb8(255, 0, 0)));
        assert_eq!(palette[1], None);
        assert_eq!(palette[2], None);
        assert_eq!(palette[3].unwrap().as_rounded_argb32(), 0x80_0000ff);
        assert_eq!(palette[5], None);
    }

    #[test]
    fn test_bad_palette_color() {
        let mut colors = BTreeMap::new();
        colors.insert("0".to_string(), Some("banana".to_string()));
        assert!(parse_palette(PaletteData {
            colors,
            num_colors: None
        })
        .is_err());
    }
}
