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

use std::fmt;
use std::str::FromStr;

/// An 8 bit per channel RGBA pixel.
///
/// Pixels inside layers and rendered images are premultiplied.
pub type Pixel8 = [u8; 4];

pub const ALPHA_CHANNEL: usize = 3;

pub const ZERO_PIXEL8: Pixel8 = [0; 4];

/// Multiply two 8 bit values as if they were in range 0..1
pub fn u8_mult(a: u32, b: u32) -> u32 {
    let c = a * b + 0x80;
    ((c >> 8) + c) >> 8
}

pub fn premultiply_pixel8(p: Pixel8) -> Pixel8 {
    if p[ALPHA_CHANNEL] == 255 {
        return p;
    } else if p[ALPHA_CHANNEL] == 0 {
        return ZERO_PIXEL8;
    }
    let a = p[ALPHA_CHANNEL] as u32;
    [
        u8_mult(p[0] as u32, a) as u8,
        u8_mult(p[1] as u32, a) as u8,
        u8_mult(p[2] as u32, a) as u8,
        p[3],
    ]
}

pub fn unpremultiply_pixel8(p: Pixel8) -> Pixel8 {
    if p[ALPHA_CHANNEL] == 255 {
        return p;
    } else if p[ALPHA_CHANNEL] == 0 {
        return ZERO_PIXEL8;
    }

    let ia = 0xff00ff / p[ALPHA_CHANNEL] as i32;
    [
        ((p[0] as i32 * ia + 0x8000) >> 16).min(255) as u8,
        ((p[1] as i32 * ia + 0x8000) >> 16).min(255) as u8,
        ((p[2] as i32 * ia + 0x8000) >> 16).min(255) as u8,
        p[3],
    ]
}

/// A straight (non-premultiplied) floating point color.
///
/// Used for palette swatches.
#[derive(Copy, Clone, Debug)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub fn rgb8(r: u8, g: u8, b: u8) -> Color {
        Color {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    pub fn from_argb32(c: u32) -> Color {
        Color {
            r: ((c & 0x00_ff0000) >> 16) as f32 / 255.0,
            g: ((c & 0x00_00ff00) >> 8) as f32 / 255.0,
            b: (c & 0x00_0000ff) as f32 / 255.0,
            a: ((c & 0xff_000000) >> 24) as f32 / 255.0,
        }
    }

    // Like as_argb32 would be, but the value is rounded instead of floored.
    pub fn as_rounded_argb32(&self) -> u32 {
        ((self.r * 255.0 + 0.5) as u32) << 16
            | ((self.g * 255.0 + 0.5) as u32) << 8
            | ((self.b * 255.0 + 0.5) as u32)
            | ((self.a * 255.0 + 0.5) as u32) << 24
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let argb = self.as_rounded_argb32();
        if argb >> 24 < 255 {
            write!(f, "#{:08x}", argb)
        } else {
            write!(f, "#{:06x}", argb & 0x00_ffffff)
        }
    }
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        self.as_rounded_argb32() == other.as_rounded_argb32()
    }
}

/// Parses `rrggbb` or `aarrggbb` hex strings, with or without a leading `#`.
///
/// Palette files store colors without the hash prefix.
impl FromStr for Color {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.is_empty() {
            return Err("empty color string");
        }
        if hex.len() != 6 && hex.len() != 8 {
            return Err("doesn't look like a color string");
        }
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err("not a valid color");
        }

        match u32::from_str_radix(hex, 16) {
            Ok(v) if hex.len() == 6 => Ok(Color::from_argb32(v | 0xff_000000)),
            Ok(v) => Ok(Color::from_argb32(v)),
            Err(_) => Err("not a valid color"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality() {
        let c1 = Color::rgb8(0, 0, 0);
        let c2 = Color::rgb8(255, 255, 255);
        let c3 = Color::rgb8(255, 255, 254);

        assert!(c1 == c1);
        assert!(c1 != c2);
        assert!(c2 != c3);
        assert!(
            c1 == Color {
                r: 0.001,
                g: 0.0,
                b: 0.0,
                a: 1.0
            }
        );
    }

    #[test]
    fn test_string_parsing() {
        assert_eq!(Color::from_argb32(0), Color::from_str("#00000000").unwrap());
        assert_eq!(Color::rgb8(0, 0, 0), Color::from_str("#000000").unwrap());
        assert_eq!(Color::rgb8(255, 0, 0), Color::from_str("ff0000").unwrap());
        assert_eq!(Color::rgb8(18, 52, 86), Color::from_str("ff123456").unwrap());
        assert!(Color::from_str("").is_err());
        assert!(Color::from_str("#12345").is_err());
        assert!(Color::from_str("+12345").is_err());
        assert!(Color::from_str("zzzzzz").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Color::rgb8(255, 0, 0).to_string(), "#ff0000");
        assert_eq!(Color::from_argb32(0x80_00ff00).to_string(), "#8000ff00");
    }

    #[test]
    fn test_premultiplication() {
        for i in 1..=255 {
            let p: Pixel8 = [i, i, i, i];

            let up = unpremultiply_pixel8(p);
            assert_eq!(up, [255, 255, 255, i]);
            let p2 = premultiply_pixel8(up);

            assert_eq!(p, p2);
        }
    }
}
