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

use super::color::*;
use super::Blendmode;

/// Composite a row of premultiplied pixels over the base pixels.
///
/// `opacity` scales the contribution of every source pixel,
/// including its alpha channel.
pub fn pixel_blend(base: &mut [Pixel8], over: &[Pixel8], opacity: u8, mode: Blendmode) {
    debug_assert!(base.len() == over.len());
    if opacity == 0 {
        return;
    }

    match mode {
        Blendmode::Normal => alpha_pixel_blend(base, over, opacity),
        Blendmode::Add => pixel_add(base, over, opacity),
        Blendmode::Darken => pixel_composite(comp_op_darken, base, over, opacity),
        Blendmode::Lighten => pixel_composite(comp_op_lighten, base, over, opacity),
        Blendmode::Difference => pixel_composite(comp_op_difference, base, over, opacity),
        Blendmode::Multiply => pixel_composite(comp_op_multiply, base, over, opacity),
        Blendmode::Screen => pixel_composite(comp_op_screen, base, over, opacity),
        Blendmode::Invert => pixel_composite(comp_op_invert, base, over, opacity),
        Blendmode::Overlay => pixel_composite(comp_op_overlay, base, over, opacity),
        Blendmode::HardLight => pixel_composite(comp_op_hard_light, base, over, opacity),
        Blendmode::SoftLight => pixel_composite(comp_op_soft_light, base, over, opacity),
        Blendmode::Dodge => pixel_composite(comp_op_dodge, base, over, opacity),
        Blendmode::Burn => pixel_composite(comp_op_burn, base, over, opacity),
    }
}

trait ScratchArray {
    fn into_work(self) -> [u32; 4];
    fn from_work(p: [u32; 4]) -> Self;
}

impl ScratchArray for Pixel8 {
    fn from_work(p: [u32; 4]) -> Self {
        [p[0] as u8, p[1] as u8, p[2] as u8, p[3] as u8]
    }
    fn into_work(self) -> [u32; 4] {
        [
            self[0] as u32,
            self[1] as u32,
            self[2] as u32,
            self[3] as u32,
        ]
    }
}

/// Perform a premultiplied alpha blend operation on a slice of 32 bit RGBA pixels
fn alpha_pixel_blend(base: &mut [Pixel8], over: &[Pixel8], opacity: u8) {
    let o = opacity as u32;

    for (dp, sp) in base.iter_mut().zip(over.iter()) {
        let bp = dp.into_work();
        let src = sp.into_work();
        let a_s = 255 - u8_mult(src[ALPHA_CHANNEL], o);

        let result = [
            u8_mult(src[0], o) + u8_mult(bp[0], a_s),
            u8_mult(src[1], o) + u8_mult(bp[1], a_s),
            u8_mult(src[2], o) + u8_mult(bp[2], a_s),
            u8_mult(src[3], o) + u8_mult(bp[3], a_s),
        ];

        *dp = Pixel8::from_work(result);
    }
}

/// Additive blending: premultiplied channels (alpha included) are summed
/// and clamped at the maximum value.
fn pixel_add(base: &mut [Pixel8], over: &[Pixel8], opacity: u8) {
    let o = opacity as u32;

    for (dp, sp) in base.iter_mut().zip(over.iter()) {
        let bp = dp.into_work();
        let src = sp.into_work();

        let result = [
            255.min(bp[0] + u8_mult(src[0], o)),
            255.min(bp[1] + u8_mult(src[1], o)),
            255.min(bp[2] + u8_mult(src[2], o)),
            255.min(bp[3] + u8_mult(src[3], o)),
        ];

        *dp = Pixel8::from_work(result);
    }
}

// Separable blend functions. The first argument is the (straight) base
// color channel, the second the (straight) source color channel.

fn comp_op_multiply(a: f32, b: f32) -> f32 {
    a * b
}

fn comp_op_screen(a: f32, b: f32) -> f32 {
    a + b - a * b
}

fn comp_op_overlay(a: f32, b: f32) -> f32 {
    comp_op_hard_light(b, a)
}

fn comp_op_hard_light(a: f32, b: f32) -> f32 {
    if b <= 0.5 {
        comp_op_multiply(a, 2.0 * b)
    } else {
        comp_op_screen(a, 2.0 * b - 1.0)
    }
}

fn comp_op_soft_light(a: f32, b: f32) -> f32 {
    if b <= 0.5 {
        a - (1.0 - 2.0 * b) * a * (1.0 - a)
    } else {
        let d = if a <= 0.25 {
            ((16.0 * a - 12.0) * a + 4.0) * a
        } else {
            a.sqrt()
        };
        a + (2.0 * b - 1.0) * (d - a)
    }
}

fn comp_op_darken(a: f32, b: f32) -> f32 {
    a.min(b)
}

fn comp_op_lighten(a: f32, b: f32) -> f32 {
    a.max(b)
}

fn comp_op_difference(a: f32, b: f32) -> f32 {
    (a - b).abs()
}

fn comp_op_invert(a: f32, _: f32) -> f32 {
    1.0 - a
}

fn comp_op_dodge(a: f32, b: f32) -> f32 {
    if a <= 0.0 {
        0.0
    } else if b >= 1.0 {
        1.0
    } else {
        1f32.min(a / (1.0 - b))
    }
}

fn comp_op_burn(a: f32, b: f32) -> f32 {
    if a >= 1.0 {
        1.0
    } else if b <= 0.0 {
        0.0
    } else {
        1.0 - 1f32.min((1.0 - a) / b)
    }
}

fn channel(c: f32) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0 + 0.5) as u8
}

/// Generic separable compositing operation.
///
/// Applies the blend function where both the source and the base have
/// coverage and falls back to plain source-over elsewhere:
///
/// `Cr = (1 - ab) * Cs + (1 - as) * Cb + as * ab * B(cb, cs)`
/// `ar = as + ab - as * ab`
fn pixel_composite(
    comp_op: fn(f32, f32) -> f32,
    base: &mut [Pixel8],
    over: &[Pixel8],
    opacity: u8,
) {
    let o = opacity as f32 / 255.0;

    for (dp, sp) in base.iter_mut().zip(over.iter()) {
        let sa = sp[ALPHA_CHANNEL] as f32 / 255.0 * o;
        if sa <= 0.0 {
            continue;
        }
        let da = dp[ALPHA_CHANNEL] as f32 / 255.0;
        let ra = sa + da - sa * da;
        let alpha = channel(ra);

        let mut result = [0, 0, 0, alpha];
        for c in 0..ALPHA_CHANNEL {
            let src = sp[c] as f32 / 255.0 * o;
            let dst = dp[c] as f32 / 255.0;
            let cs = (src / sa).min(1.0);
            let cb = if da > 0.0 { (dst / da).min(1.0) } else { 0.0 };

            let blended = (1.0 - da) * src + (1.0 - sa) * dst + sa * da * comp_op(cb, cs);
            // premultiplied color can never exceed the alpha value
            result[c] = channel(blended).min(alpha);
        }

        *dp = result;
    }
}
