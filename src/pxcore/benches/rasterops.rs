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

use criterion::{criterion_group, criterion_main, Criterion};
use pxcore::paint::{rasterop, Blendmode, Pixel8};

fn pixel_blend(over: &[Pixel8], mode: Blendmode) {
    let mut base = [[128, 128, 128, 255]; 64 * 64];
    rasterop::pixel_blend(&mut base, over, 200, mode);
}

fn pixel_blend_benchmark(c: &mut Criterion) {
    let over = vec![[200, 100, 50, 255]; 64 * 64];

    for mode in [
        Blendmode::Normal,
        Blendmode::Add,
        Blendmode::Multiply,
        Blendmode::Overlay,
        Blendmode::SoftLight,
        Blendmode::Burn,
    ] {
        c.bench_function(&format!("pixel {}", mode.name()), |b| {
            b.iter(|| pixel_blend(&over, mode))
        });
    }
}

criterion_group!(benches, pixel_blend_benchmark);
criterion_main!(benches);
