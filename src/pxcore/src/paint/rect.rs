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

/// Largest pixel buffer, in bytes, a canvas or rendered image may need.
pub const MAX_IMAGE_BYTES: usize = 1 << 30;

#[derive(Eq, PartialEq, Debug, Clone, Copy, Default)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Size {
        Size { width, height }
    }

    /// Byte length of an 8 bit RGBA buffer of this size.
    ///
    /// Returns None if it would exceed `MAX_IMAGE_BYTES`.
    pub fn checked_bytes(&self) -> Option<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|n| n.checked_mul(4))
            .filter(|&n| n <= MAX_IMAGE_BYTES)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size() {
        assert_eq!(Size::new(3, 4).checked_bytes(), Some(48));
        assert_eq!(Size::new(0, 4).checked_bytes(), Some(0));
        assert_eq!(Size::new(16384, 16384).checked_bytes(), Some(MAX_IMAGE_BYTES));
        assert_eq!(Size::new(16384, 16385).checked_bytes(), None);
        assert_eq!(Size::new(u32::MAX, u32::MAX).checked_bytes(), None);
        assert_eq!(Size::new(64, 32).to_string(), "64x32");
    }
}
