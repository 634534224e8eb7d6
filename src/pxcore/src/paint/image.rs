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

use super::color::Pixel8;
use super::Size;

/// A flat image buffer
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Image<T>
where
    T: Clone + Default + Eq,
{
    pub pixels: Vec<T>,
    pub width: usize,
    pub height: usize,
}

pub type Image8 = Image<Pixel8>;

impl<T> Image<T>
where
    T: Clone + Default + Eq,
{
    pub fn new(width: usize, height: usize) -> Image<T> {
        Image {
            pixels: vec![T::default(); width * height],
            width,
            height,
        }
    }

    /// Wrap an existing pixel vector.
    ///
    /// Returns None if the vector length does not match the dimensions.
    pub fn from_pixels(pixels: Vec<T>, width: usize, height: usize) -> Option<Image<T>> {
        if pixels.len() != width * height {
            return None;
        }
        Some(Image {
            pixels,
            width,
            height,
        })
    }

    pub fn size(&self) -> Size {
        Size::new(self.width as u32, self.height as u32)
    }

    pub fn fill(&mut self, value: T) {
        self.pixels.iter_mut().for_each(|p| *p = value.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_image_is_transparent() {
        let img = Image8::new(3, 2);
        assert_eq!(img.size(), Size::new(3, 2));
        assert!(img.pixels.iter().all(|p| *p == [0, 0, 0, 0]));
        assert!(Image8::new(0, 0).pixels.is_empty());
    }

    #[test]
    fn test_from_pixels() {
        assert!(Image8::from_pixels(vec![[0; 4]; 5], 2, 2).is_none());

        #[rustfmt::skip]
        let img = Image8::from_pixels(vec![
            [1, 0, 0, 255], [2, 0, 0, 255],
            [3, 0, 0, 255], [4, 0, 0, 255],
        ], 2, 2).unwrap();

        assert_eq!(img.size(), Size::new(2, 2));
        assert_eq!(img.pixels[1], [2, 0, 0, 255]);
        assert_eq!(img.pixels[2], [3, 0, 0, 255]);
    }
}
