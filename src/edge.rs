// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Directed edges and their assembly: flattening curves to chords and
//! clipping every chord against the device before the scan converters see it.

use alloc::vec::Vec;

use crate::bezier::{CubicBez, QuadBez};
use crate::geom::Point;
use crate::math::round_to_i32;
use crate::path::{Path, PathSeg};

/// Flattening tolerance in pixels: the maximum distance between a curve and
/// its approximating polyline.
pub(crate) const DEFAULT_TOLERANCE: f32 = 0.25;

/// A directed edge, clipped to the device.
///
/// The edge crosses scan line `y` at `x(y) = m * (y + 0.5) + b`, and covers
/// the scan lines `top..bot` with `top < bot`. `winding` is `+1` if the
/// source segment pointed up in device space (decreasing y) and `-1` if it
/// pointed down.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Edge {
    pub winding: i8,
    pub top: i32,
    pub bot: i32,
    pub m: f32,
    pub b: f32,
}

impl Edge {
    /// The x coordinate where this edge crosses the center of scan line `y`.
    #[inline(always)]
    pub(crate) fn x_at(&self, y: i32) -> f32 {
        self.m * (y as f32 + 0.5) + self.b
    }
}

/// Accumulates device-space segments into clipped [`Edge`]s.
///
/// Curves are flattened to chords first; every chord is then clipped
/// vertically against `y in [0, height]` (rejecting or shortening) and
/// horizontally against `x in [0, width]`. Horizontal overshoot is not
/// discarded: the out-of-slab portion is projected onto the slab boundary as
/// a vertical edge, preserving the winding contribution of shapes that extend
/// past the device.
#[derive(Debug)]
pub(crate) struct EdgeBuilder {
    width: f32,
    height: f32,
    tolerance: f32,
    edges: Vec<Edge>,
}

impl EdgeBuilder {
    pub(crate) fn new(width: u16, height: u16) -> Self {
        Self::with_tolerance(width, height, DEFAULT_TOLERANCE)
    }

    pub(crate) fn with_tolerance(width: u16, height: u16, tolerance: f32) -> Self {
        Self {
            width: f32::from(width),
            height: f32::from(height),
            tolerance,
            edges: Vec::new(),
        }
    }

    pub(crate) fn finish(self) -> Vec<Edge> {
        self.edges
    }

    /// Add every segment of a device-space path, closing each contour.
    pub(crate) fn add_path(&mut self, path: &Path) {
        for seg in path.segments() {
            match seg {
                PathSeg::Line(p0, p1) => self.add_line(p0, p1),
                PathSeg::Quad(p0, p1, p2) => self.add_quad(QuadBez::new(p0, p1, p2)),
                PathSeg::Cubic(p0, p1, p2, p3) => self.add_cubic(CubicBez::new(p0, p1, p2, p3)),
            }
        }
    }

    /// Add the boundary of a device-space polygon, including the closing
    /// segment.
    pub(crate) fn add_polygon(&mut self, pts: &[Point]) {
        if pts.len() < 2 {
            return;
        }
        for pair in pts.windows(2) {
            self.add_line(pair[0], pair[1]);
        }
        self.add_line(pts[pts.len() - 1], pts[0]);
    }

    /// Flatten a quadratic Bezier into chords.
    pub(crate) fn add_quad(&mut self, q: QuadBez) {
        let n = q.segment_count(self.tolerance);
        let dt = 1. / n as f32;
        let mut p0 = q.p0;
        let mut t = dt;
        for _ in 1..n {
            let p1 = q.eval(t);
            self.add_line(p0, p1);
            p0 = p1;
            t += dt;
        }
        self.add_line(p0, q.p2);
    }

    /// Flatten a cubic Bezier into chords.
    pub(crate) fn add_cubic(&mut self, c: CubicBez) {
        let n = c.segment_count(self.tolerance);
        let dt = 1. / n as f32;
        let mut p0 = c.p0;
        let mut t = dt;
        for _ in 1..n {
            let p1 = c.eval(t);
            self.add_line(p0, p1);
            p0 = p1;
            t += dt;
        }
        self.add_line(p0, c.p3);
    }

    /// Clip one segment against the device and emit the surviving edges.
    pub(crate) fn add_line(&mut self, p0: Point, p1: Point) {
        let winding: i8 = if p0.y < p1.y { -1 } else { 1 };
        let (mut p0, mut p1) = if p1.y < p0.y { (p1, p0) } else { (p0, p1) };

        // Vertical clip against y in [0, height].
        if p0.y < 0. {
            if p1.y < 0. {
                return;
            }
            p0.x += (p1.x - p0.x) * (-p0.y) / (p1.y - p0.y);
            p0.y = 0.;
        }
        if p1.y > self.height {
            if p0.y > self.height {
                return;
            }
            p1.x += (p0.x - p1.x) * (p1.y - self.height) / (p1.y - p0.y);
            p1.y = self.height;
        }

        // Horizontal clip against x in [0, width]. Portions outside the slab
        // become vertical edges on the boundary so winding survives.
        let w = self.width;
        if p0.x.max(p1.x) <= 0. {
            self.push_edge(Point::new(0., p0.y), Point::new(0., p1.y), winding);
            return;
        }
        if p0.x.min(p1.x) >= w {
            self.push_edge(Point::new(w, p0.y), Point::new(w, p1.y), winding);
            return;
        }

        let dx = p1.x - p0.x;
        if dx == 0. {
            self.push_edge(p0, p1, winding);
            return;
        }

        // The in-slab portion is the t-interval [ta, tb] of the segment's
        // parameterization; x(t) is monotonic, so it is contiguous.
        let t0 = -p0.x / dx;
        let tw = (w - p0.x) / dx;
        let (ta, tb) = if t0 < tw { (t0, tw) } else { (tw, t0) };
        let ta = ta.max(0.);
        let tb = tb.min(1.);
        let at = |t: f32| Point::new(p0.x + dx * t, p0.y + (p1.y - p0.y) * t);

        if ta > 0. {
            let boundary = if p0.x < 0. { 0. } else { w };
            self.push_edge(
                Point::new(boundary, p0.y),
                Point::new(boundary, at(ta).y),
                winding,
            );
        }
        let a = at(ta);
        let b = at(tb);
        self.push_edge(
            Point::new(a.x.clamp(0., w), a.y),
            Point::new(b.x.clamp(0., w), b.y),
            winding,
        );
        if tb < 1. {
            let boundary = if p1.x < 0. { 0. } else { w };
            self.push_edge(
                Point::new(boundary, at(tb).y),
                Point::new(boundary, p1.y),
                winding,
            );
        }
    }

    /// Quantize a clipped segment into an edge, dropping segments that do not
    /// span a scan line. Expects `p_top.y <= p_bot.y`.
    fn push_edge(&mut self, p_top: Point, p_bot: Point, winding: i8) {
        debug_assert!(p_top.y <= p_bot.y);
        let top = round_to_i32(p_top.y);
        let bot = round_to_i32(p_bot.y);
        if top == bot {
            return;
        }
        let m = (p_top.x - p_bot.x) / (p_top.y - p_bot.y);
        let b = p_top.x - m * p_top.y;
        self.edges.push(Edge {
            winding,
            top,
            bot,
            m,
            b,
        });
    }
}
