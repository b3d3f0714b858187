// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Linear gradients with one-, two-, and many-stop paths.

use peniko::color::{AlphaColor, Srgb};
use peniko::Extend;
use smallvec::SmallVec;

use crate::geom::Point;
use crate::math;
use crate::matrix::Matrix;
use crate::pixel::Pixel;

use super::tile_unit;

/// A linear gradient shader between two points.
///
/// The gradient axis runs from `p0` (position 0) to `p1` (position 1); the
/// tile mode maps positions outside `[0, 1]` back into range. Stops are
/// spaced evenly along the axis.
#[derive(Debug)]
pub struct LinearGradientShader {
    stops: SmallVec<[AlphaColor<Srgb>; 8]>,
    /// Device-independent transform taking `p0` to the origin and `p1` to
    /// `(1, 0)`. `None` when `p0 == p1`, which leaves nothing to shade.
    t_gradient: Option<Matrix>,
    extend: Extend,
    /// Packed first and last stops, used by the fast paths.
    first: Pixel,
    last: Pixel,
}

impl LinearGradientShader {
    /// Create a new linear gradient shader.
    pub fn new(p0: Point, p1: Point, stops: &[AlphaColor<Srgb>], extend: Extend) -> Self {
        let d = p1 - p0;
        // The forward map is a rotate-and-scale taking (0,0) -> p0 and
        // (1,0) -> p1; shading uses its inverse.
        let t_gradient = Matrix::new([d.x, -d.y, p0.x, d.y, d.x, p0.y]).invert();
        let first = stops.first().map_or(Pixel::TRANSPARENT, |c| Pixel::from_color(*c));
        let last = stops.last().map_or(Pixel::TRANSPARENT, |c| Pixel::from_color(*c));
        Self {
            stops: SmallVec::from_slice(stops),
            t_gradient,
            extend,
            first,
            last,
        }
    }

    pub(crate) fn is_opaque(&self) -> bool {
        !self.stops.is_empty() && self.stops.iter().all(|c| c.components[3] == 1.)
    }

    pub(crate) fn prepare(&self, ctm: Matrix) -> Option<PreparedGradient<'_>> {
        match self.stops.len() {
            0 => None,
            // A single stop is a constant; no transform is consulted.
            1 => Some(PreparedGradient {
                shader: self,
                m: Matrix::IDENTITY,
            }),
            _ => {
                let m = self.t_gradient? * ctm.invert()?;
                Some(PreparedGradient { shader: self, m })
            }
        }
    }
}

#[derive(Debug)]
pub(crate) struct PreparedGradient<'s> {
    shader: &'s LinearGradientShader,
    /// Device space to gradient space; only the u axis is consumed.
    m: Matrix,
}

impl PreparedGradient<'_> {
    pub(crate) fn shade_row(&self, x: i32, y: i32, out: &mut [Pixel]) {
        let s = self.shader;
        match s.stops.len() {
            0 => unreachable!("preparation fails without stops"),
            1 => out.fill(s.first),
            2 => self.shade_row_two_stops(x, y, out),
            _ => self.shade_row_many_stops(x, y, out),
        }
    }

    fn shade_row_two_stops(&self, x: i32, y: i32, out: &mut [Pixel]) {
        let s = self.shader;
        let (u0, du) = self.row_start(x, y);
        for (j, px) in out.iter_mut().enumerate() {
            let u = u0 + du * j as f32;
            *px = if s.extend == Extend::Pad && u <= 0. {
                s.first
            } else if s.extend == Extend::Pad && u >= 1. {
                s.last
            } else {
                let t = tile_unit(u, s.extend);
                Pixel::from_color(lerp_color(s.stops[0], s.stops[1], t))
            };
        }
    }

    fn shade_row_many_stops(&self, x: i32, y: i32, out: &mut [Pixel]) {
        let s = self.shader;
        let n = s.stops.len();
        let (u0, du) = self.row_start(x, y);
        for (j, px) in out.iter_mut().enumerate() {
            let u = tile_unit(u0 + du * j as f32, s.extend);
            let f = u * (n - 1) as f32;
            // Clamping the index lets u == 1 share the last stop pair.
            let i = (math::floor(f) as usize).min(n - 2);
            let t = f - i as f32;
            *px = Pixel::from_color(lerp_color(s.stops[i], s.stops[i + 1], t));
        }
    }

    /// The gradient position of the row's first pixel center, and its
    /// per-pixel step.
    fn row_start(&self, x: i32, y: i32) -> (f32, f32) {
        let p = self.m.map_point(Point::new(x as f32 + 0.5, y as f32 + 0.5));
        (p.x, self.m.as_coeffs()[0])
    }
}

fn lerp_color(a: AlphaColor<Srgb>, b: AlphaColor<Srgb>, t: f32) -> AlphaColor<Srgb> {
    let [ar, ag, ab, aa] = a.components;
    let [br, bg, bb, ba] = b.components;
    let mt = 1. - t;
    AlphaColor::new([
        ar * mt + br * t,
        ag * mt + bg * t,
        ab * mt + bb * t,
        aa * mt + ba * t,
    ])
}
