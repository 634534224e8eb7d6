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

use anyhow::Result;
use pximpex::load_document;

/// Print the canvas size, palette and layer stack of a document
pub fn print_info(input_file: &str) -> Result<()> {
    let doc = load_document(input_file)?;

    println!("{} ({})", doc.name(), doc.size());

    let colors = doc.palette().iter().filter(|c| c.is_some()).count();
    println!("Palette: {} slots, {} colors", doc.palette().len(), colors);
    for (slot, color) in doc.palette().iter().enumerate() {
        if let Some(c) = color {
            println!("  {:3} {}", slot, c);
        }
    }

    println!("Layers (topmost first):");
    for (index, layer) in doc.layers().iter().enumerate() {
        println!(
            "  {:3} {:<24} {:7} alpha={:3} mode={}",
            index,
            layer.name(),
            if layer.is_hidden() { "hidden" } else { "visible" },
            layer.alpha(),
            layer.blend_mode().unwrap_or("normal"),
        );
    }

    Ok(())
}
