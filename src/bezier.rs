// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quadratic and cubic Bezier segments: evaluation, chopping, and the
//! subdivision counts used for flattening.

use crate::geom::Point;
use crate::math;

/// A quadratic Bezier segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadBez {
    /// The start point.
    pub p0: Point,
    /// The control point.
    pub p1: Point,
    /// The end point.
    pub p2: Point,
}

impl QuadBez {
    /// Create a new quadratic Bezier segment.
    pub const fn new(p0: Point, p1: Point, p2: Point) -> Self {
        Self { p0, p1, p2 }
    }

    /// Evaluate the curve at parameter `t`.
    pub fn eval(&self, t: f32) -> Point {
        let mt = 1. - t;
        self.p0 * (mt * mt) + self.p1 * (2. * t * mt) + self.p2 * (t * t)
    }

    /// Split the curve at parameter `t` into two sub-curves sharing the split
    /// point.
    pub fn chop(&self, t: f32) -> (Self, Self) {
        let q0 = self.p0.lerp(self.p1, t);
        let q1 = self.p1.lerp(self.p2, t);
        let mid = q0.lerp(q1, t);
        (Self::new(self.p0, q0, mid), Self::new(mid, q1, self.p2))
    }

    /// The number of equal-`t` chords needed so the polyline stays within
    /// `tolerance` of the curve. Always at least one.
    ///
    /// The bound comes from the second difference of the control polygon:
    /// `E = (p0 - 2 p1 + p2) / 4`, `n = ceil(sqrt(|E| / tolerance))`.
    pub fn segment_count(&self, tolerance: f32) -> usize {
        let e = (self.p0 - self.p1 * 2. + self.p2) * 0.25;
        (math::ceil(math::sqrt(e.length() / tolerance)) as usize).max(1)
    }
}

/// A cubic Bezier segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicBez {
    /// The start point.
    pub p0: Point,
    /// The first control point.
    pub p1: Point,
    /// The second control point.
    pub p2: Point,
    /// The end point.
    pub p3: Point,
}

impl CubicBez {
    /// Create a new cubic Bezier segment.
    pub const fn new(p0: Point, p1: Point, p2: Point, p3: Point) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// Evaluate the curve at parameter `t`.
    pub fn eval(&self, t: f32) -> Point {
        let mt = 1. - t;
        self.p0 * (mt * mt * mt)
            + self.p1 * (3. * t * mt * mt)
            + self.p2 * (3. * t * t * mt)
            + self.p3 * (t * t * t)
    }

    /// Split the curve at parameter `t` into two sub-curves sharing the split
    /// point.
    pub fn chop(&self, t: f32) -> (Self, Self) {
        let q0 = self.p0.lerp(self.p1, t);
        let q1 = self.p1.lerp(self.p2, t);
        let q2 = self.p2.lerp(self.p3, t);
        let r0 = q0.lerp(q1, t);
        let r1 = q1.lerp(q2, t);
        let mid = r0.lerp(r1, t);
        (
            Self::new(self.p0, q0, r0, mid),
            Self::new(mid, r1, q2, self.p3),
        )
    }

    /// The number of equal-`t` chords needed so the polyline stays within
    /// `tolerance` of the curve. Always at least one.
    ///
    /// Uses the larger of the two control-polygon second differences,
    /// per axis: `n = ceil(sqrt(3 |E| / (4 tolerance)))`.
    pub fn segment_count(&self, tolerance: f32) -> usize {
        let e0 = self.p0 - self.p1 * 2. + self.p2;
        let e1 = self.p1 - self.p2 * 2. + self.p3;
        let e = Point::new(e0.x.abs().max(e1.x.abs()), e0.y.abs().max(e1.y.abs()));
        (math::ceil(math::sqrt(3. * e.length() / (4. * tolerance))) as usize).max(1)
    }
}
