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

use super::transform::{ViewTransform, ZoomAnchor};
use crate::paint::Size;
use glam::DVec2;

/// A scrollable window onto the scaled canvas.
///
/// Coordinates are in the same units as the canvas (logical pixels).
/// When the canvas is smaller than the viewport along an axis it is
/// centered and cannot be scrolled along that axis.
#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
    size: DVec2,
    content: DVec2,
    scroll: DVec2,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: DVec2::new(width.max(0.0), height.max(0.0)),
            content: DVec2::ZERO,
            scroll: DVec2::ZERO,
        }
    }

    pub fn size(&self) -> DVec2 {
        self.size
    }

    pub fn scroll(&self) -> DVec2 {
        self.scroll
    }

    pub fn content_size(&self) -> DVec2 {
        self.content
    }

    /// Set the size of the scaled canvas. The scroll position is
    /// clamped to the new content bounds.
    pub fn set_content_size(&mut self, size: Size) {
        self.content = DVec2::new(size.width as f64, size.height as f64);
        self.scroll_to(self.scroll);
    }

    pub fn scroll_to(&mut self, scroll: DVec2) {
        let max = (self.content - self.size).max(DVec2::ZERO);
        self.scroll = scroll.clamp(DVec2::ZERO, max);
    }

    /// Offset of the canvas inside the viewport when it is smaller than the viewport
    fn content_offset(&self) -> DVec2 {
        ((self.size - self.content) / 2.0).max(DVec2::ZERO)
    }

    /// Convert a position inside the viewport to canvas coordinates
    pub fn to_canvas(&self, viewport_point: DVec2) -> DVec2 {
        viewport_point + self.scroll - self.content_offset()
    }

    /// Convert canvas coordinates to a position inside the viewport
    pub fn from_canvas(&self, canvas_point: DVec2) -> DVec2 {
        canvas_point - self.scroll + self.content_offset()
    }

    /// The canvas point currently at the center of the viewport
    pub fn anchor(&self) -> DVec2 {
        self.to_canvas(self.size / 2.0)
    }

    /// Scroll so that the given canvas point is at the center of the
    /// viewport, as far as the content bounds allow.
    pub fn center_on(&mut self, canvas_point: DVec2) {
        self.scroll_to(canvas_point - self.size / 2.0);
    }

    /// Change the zoom level, keeping the document pixel at the center
    /// of the viewport in place.
    pub fn zoom(
        &mut self,
        transform: &mut ViewTransform,
        level: f64,
        canvas_size: Size,
    ) -> ZoomAnchor {
        let za = transform.zoom_around(self.anchor(), level);
        self.set_content_size(transform.scaled_size(canvas_size));
        self.center_on(za.canvas_point);
        za
    }

    pub fn zoom_in(&mut self, transform: &mut ViewTransform, canvas_size: Size) -> ZoomAnchor {
        let level = transform.zoom_level() + transform.limits().step();
        self.zoom(transform, level, canvas_size)
    }

    pub fn zoom_out(&mut self, transform: &mut ViewTransform, canvas_size: Size) -> ZoomAnchor {
        let level = transform.zoom_level() - transform.limits().step();
        self.zoom(transform, level, canvas_size)
    }

    pub fn reset_zoom(&mut self, transform: &mut ViewTransform, canvas_size: Size) -> ZoomAnchor {
        self.zoom(transform, 0.0, canvas_size)
    }
}
