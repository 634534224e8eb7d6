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

/// The blend modes a layer can be composited with.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Blendmode {
    Normal,
    Darken,
    Lighten,
    Add,
    Difference,
    Multiply,
    Screen,
    Invert,
    Overlay,
    HardLight,
    SoftLight,
    Dodge,
    Burn,
}

impl Blendmode {
    pub const ALL: [Blendmode; 13] = [
        Blendmode::Normal,
        Blendmode::Darken,
        Blendmode::Lighten,
        Blendmode::Add,
        Blendmode::Difference,
        Blendmode::Multiply,
        Blendmode::Screen,
        Blendmode::Invert,
        Blendmode::Overlay,
        Blendmode::HardLight,
        Blendmode::SoftLight,
        Blendmode::Dodge,
        Blendmode::Burn,
    ];

    /// The name used for this mode in document files
    pub fn name(self) -> &'static str {
        use Blendmode::*;
        match self {
            Normal => "normal",
            Darken => "darken",
            Lighten => "lighten",
            Add => "add",
            Difference => "difference",
            Multiply => "multiply",
            Screen => "screen",
            Invert => "invert",
            Overlay => "overlay",
            HardLight => "hardlight",
            SoftLight => "softlight",
            Dodge => "dodge",
            Burn => "burn",
        }
    }

    /// Look up a blend mode by its file format name.
    ///
    /// A missing or empty name means the default mode. Unknown names
    /// return None: the caller decides how to report them.
    pub fn from_name(name: Option<&str>) -> Option<Self> {
        let name = match name {
            None | Some("") => return Some(Blendmode::Normal),
            Some(n) => n,
        };

        use Blendmode::*;
        Some(match name {
            "normal" => Normal,
            "darken" => Darken,
            "lighten" => Lighten,
            "add" => Add,
            "difference" => Difference,
            "multiply" => Multiply,
            "screen" => Screen,
            "invert" => Invert,
            "overlay" => Overlay,
            "hardlight" => HardLight,
            "softlight" => SoftLight,
            "dodge" => Dodge,
            "burn" => Burn,
            _ => {
                return None;
            }
        })
    }
}

impl Default for Blendmode {
    fn default() -> Self {
        Blendmode::Normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_roundtrip() {
        for mode in Blendmode::ALL {
            assert_eq!(Blendmode::from_name(Some(mode.name())), Some(mode));
        }
    }

    #[test]
    fn test_default_names() {
        assert_eq!(Blendmode::from_name(None), Some(Blendmode::Normal));
        assert_eq!(Blendmode::from_name(Some("")), Some(Blendmode::Normal));
        assert_eq!(Blendmode::from_name(Some("sparkle")), None);
        assert_eq!(Blendmode::from_name(Some("Multiply")), None);
    }
}
