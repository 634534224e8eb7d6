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

use crate::paint::Size;
use glam::{DAffine2, DVec2};
use tracing::debug;

pub const MIN_ZOOM_LEVEL: f64 = -3.0;
pub const MAX_ZOOM_LEVEL: f64 = 12.0;
pub const ZOOM_STEP: f64 = 0.25;

/// Bounds and step size of the zoom level
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomLimits {
    min_level: f64,
    max_level: f64,
    step: f64,
}

impl ZoomLimits {
    pub fn new(min_level: f64, max_level: f64, step: f64) -> Result<Self, &'static str> {
        if !min_level.is_finite() || !max_level.is_finite() {
            return Err("zoom limits must be finite");
        }
        if min_level > max_level {
            return Err("minimum zoom level is greater than the maximum");
        }
        if !(step.is_finite() && step > 0.0) {
            return Err("zoom step must be a positive number");
        }

        Ok(Self {
            min_level,
            max_level,
            step,
        })
    }

    pub fn min_level(&self) -> f64 {
        self.min_level
    }

    pub fn max_level(&self) -> f64 {
        self.max_level
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn clamp(&self, level: f64) -> f64 {
        level.clamp(self.min_level, self.max_level)
    }
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            min_level: MIN_ZOOM_LEVEL,
            max_level: MAX_ZOOM_LEVEL,
            step: ZOOM_STEP,
        }
    }
}

/// The result of an anchored zoom
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomAnchor {
    /// The document pixel that was under the anchor before the zoom
    pub doc_point: DVec2,

    /// Where that document pixel is on the rescaled canvas.
    /// The viewport should be scrolled so this point is at the anchor.
    pub canvas_point: DVec2,
}

/// Uniform scaling between document pixels and canvas (viewport) coordinates.
///
/// The scale factor is `2^zoom_level`, divided by the device pixel
/// ratio when the canvas is measured in logical rather than
/// physical pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewTransform {
    zoom_level: f64,
    device_pixel_ratio: f64,
    limits: ZoomLimits,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewTransform {
    pub fn new() -> Self {
        Self::with_limits(ZoomLimits::default())
    }

    pub fn with_limits(limits: ZoomLimits) -> Self {
        Self {
            zoom_level: limits.clamp(0.0),
            device_pixel_ratio: 1.0,
            limits,
        }
    }

    pub fn with_device_pixel_ratio(mut self, ratio: f64) -> Self {
        if ratio.is_finite() && ratio > 0.0 {
            self.device_pixel_ratio = ratio;
        }
        self
    }

    pub fn zoom_level(&self) -> f64 {
        self.zoom_level
    }

    pub fn limits(&self) -> &ZoomLimits {
        &self.limits
    }

    pub fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }

    pub fn scale(&self) -> f64 {
        self.zoom_level.exp2() / self.device_pixel_ratio
    }

    /// The document to canvas transformation matrix
    pub fn transform(&self) -> DAffine2 {
        DAffine2::from_scale(DVec2::splat(self.scale()))
    }

    /// Set the zoom level. The level is clamped to the zoom limits;
    /// NaN is ignored.
    pub fn set_zoom(&mut self, level: f64) {
        if level.is_nan() {
            return;
        }
        self.zoom_level = self.limits.clamp(level);
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom_level + self.limits.step);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom_level - self.limits.step);
    }

    pub fn reset_zoom(&mut self) {
        self.set_zoom(0.0);
    }

    /// Map a document point to canvas coordinates
    pub fn to_viewport(&self, doc_point: DVec2) -> DVec2 {
        self.transform().transform_point2(doc_point)
    }

    /// Map a canvas point back to document coordinates
    pub fn to_document(&self, viewport_point: DVec2) -> DVec2 {
        self.transform().inverse().transform_point2(viewport_point)
    }

    /// Size of the canvas when the document is shown at the current scale
    pub fn scaled_size(&self, canvas_size: Size) -> Size {
        let scale = self.scale();
        Size::new(
            (canvas_size.width as f64 * scale).round() as u32,
            (canvas_size.height as f64 * scale).round() as u32,
        )
    }

    /// Change the zoom level while keeping track of the document pixel
    /// under the anchor point.
    ///
    /// The anchor is given in canvas coordinates at the current scale.
    /// The returned canvas point is where that same document pixel
    /// lands at the new scale.
    pub fn zoom_around(&mut self, anchor: DVec2, level: f64) -> ZoomAnchor {
        let doc_point = self.to_document(anchor);
        self.set_zoom(level);
        let canvas_point = self.to_viewport(doc_point);

        debug!(
            "Zoom level {} (scale {:.3}): anchor {:?} -> {:?}",
            self.zoom_level,
            self.scale(),
            anchor,
            canvas_point
        );

        ZoomAnchor {
            doc_point,
            canvas_point,
        }
    }

    pub fn zoom_in_around(&mut self, anchor: DVec2) -> ZoomAnchor {
        self.zoom_around(anchor, self.zoom_level + self.limits.step)
    }

    pub fn zoom_out_around(&mut self, anchor: DVec2) -> ZoomAnchor {
        self.zoom_around(anchor, self.zoom_level - self.limits.step)
    }

    pub fn reset_zoom_around(&mut self, anchor: DVec2) -> ZoomAnchor {
        self.zoom_around(anchor, 0.0)
    }
}
