// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The path model: a verb stream with a parallel point stream.

use alloc::vec::Vec;

use crate::geom::{Point, Rect};
use crate::matrix::Matrix;

/// A path verb. Each verb consumes 1, 1, 2, or 3 points respectively.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verb {
    /// Start a new contour.
    Move,
    /// A line segment to the next point.
    Line,
    /// A quadratic Bezier through one control point to an end point.
    Quad,
    /// A cubic Bezier through two control points to an end point.
    Cubic,
}

/// One segment of a path, with its start point resolved.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathSeg {
    /// A line segment.
    Line(Point, Point),
    /// A quadratic Bezier segment.
    Quad(Point, Point, Point),
    /// A cubic Bezier segment.
    Cubic(Point, Point, Point, Point),
}

/// Winding direction for the closed figures added by the `add_*` helpers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    /// Clockwise in a y-down coordinate system.
    #[default]
    Cw,
    /// Counterclockwise in a y-down coordinate system.
    Ccw,
}

/// A sequence of contours built from move/line/quad/cubic verbs.
///
/// Contours are not stored closed; the rasterizer closes each contour
/// implicitly from its last point back to its starting point.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    verbs: Vec<Verb>,
    points: Vec<Point>,
}

impl Path {
    /// Create a new, empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the path contains no verbs.
    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }

    /// The point stream backing the path.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Start a new contour at `p`.
    pub fn move_to(&mut self, p: impl Into<Point>) {
        self.verbs.push(Verb::Move);
        self.points.push(p.into());
    }

    /// Extend the current contour with a line to `p`.
    pub fn line_to(&mut self, p: impl Into<Point>) {
        debug_assert!(!self.verbs.is_empty(), "path must start with a move");
        self.verbs.push(Verb::Line);
        self.points.push(p.into());
    }

    /// Extend the current contour with a quadratic Bezier.
    pub fn quad_to(&mut self, ctrl: impl Into<Point>, end: impl Into<Point>) {
        debug_assert!(!self.verbs.is_empty(), "path must start with a move");
        self.verbs.push(Verb::Quad);
        self.points.push(ctrl.into());
        self.points.push(end.into());
    }

    /// Extend the current contour with a cubic Bezier.
    pub fn cubic_to(
        &mut self,
        ctrl0: impl Into<Point>,
        ctrl1: impl Into<Point>,
        end: impl Into<Point>,
    ) {
        debug_assert!(!self.verbs.is_empty(), "path must start with a move");
        self.verbs.push(Verb::Cubic);
        self.points.push(ctrl0.into());
        self.points.push(ctrl1.into());
        self.points.push(end.into());
    }

    /// Add a rectangle as a new contour.
    pub fn add_rect(&mut self, rect: &Rect, direction: Direction) {
        let [p0, p1, p2, p3] = rect.corners();
        self.move_to(p0);
        match direction {
            Direction::Cw => {
                self.line_to(p1);
                self.line_to(p2);
                self.line_to(p3);
            }
            Direction::Ccw => {
                self.line_to(p3);
                self.line_to(p2);
                self.line_to(p1);
            }
        }
    }

    /// Add a polygon as a new contour.
    ///
    /// Does nothing for an empty point slice.
    pub fn add_polygon(&mut self, pts: &[Point]) {
        let Some((first, rest)) = pts.split_first() else {
            return;
        };
        self.move_to(*first);
        for p in rest {
            self.line_to(*p);
        }
    }

    /// Add a circle as a new contour of eight quadratic segments.
    pub fn add_circle(&mut self, center: Point, radius: f32, direction: Direction) {
        // Control points for one octant of the unit circle; the on-curve
        // points sit at multiples of 45 degrees, the off-curve points at
        // tan(pi/8) along the tangents.
        const T8: f32 = 0.414_213_56;
        const T4: f32 = core::f32::consts::FRAC_1_SQRT_2;
        const CCW: [Point; 16] = [
            Point::new(1., -T8),
            Point::new(T4, -T4),
            Point::new(T8, -1.),
            Point::new(0., -1.),
            Point::new(-T8, -1.),
            Point::new(-T4, -T4),
            Point::new(-1., -T8),
            Point::new(-1., 0.),
            Point::new(-1., T8),
            Point::new(-T4, T4),
            Point::new(-T8, 1.),
            Point::new(0., 1.),
            Point::new(T8, 1.),
            Point::new(T4, T4),
            Point::new(1., T8),
            Point::new(1., 0.),
        ];

        let mx = Matrix::translate(center.x, center.y) * Matrix::scale(radius, radius);
        self.move_to(mx.map_point(Point::new(1., 0.)));
        match direction {
            Direction::Ccw => {
                for pair in CCW.chunks_exact(2) {
                    self.quad_to(mx.map_point(pair[0]), mx.map_point(pair[1]));
                }
            }
            Direction::Cw => {
                // The reversed traversal revisits the same control points,
                // ending back at (1, 0).
                for i in 0..8 {
                    let ctrl = CCW[14 - 2 * i];
                    let end = CCW[(29 - 2 * i) % 16];
                    self.quad_to(mx.map_point(ctrl), mx.map_point(end));
                }
            }
        }
    }

    /// The tight bounds of the control-point stream.
    ///
    /// This bounds the path (control polygons contain their curves), but is
    /// not necessarily tight around curved segments.
    pub fn bounds(&self) -> Rect {
        let Some((first, rest)) = self.points.split_first() else {
            return Rect::default();
        };
        let mut r = Rect::new(first.x, first.y, first.x, first.y);
        for p in rest {
            r.x0 = r.x0.min(p.x);
            r.y0 = r.y0.min(p.y);
            r.x1 = r.x1.max(p.x);
            r.y1 = r.y1.max(p.y);
        }
        r
    }

    /// Transform every point of the path in place.
    pub fn transform(&mut self, m: &Matrix) {
        m.map_points(&mut self.points);
    }

    /// Iterate the path as resolved segments.
    ///
    /// Every contour that drew at least one segment is closed with a final
    /// line back to its starting point.
    pub fn segments(&self) -> Segments<'_> {
        Segments {
            verbs: self.verbs.iter(),
            points: &self.points,
            idx: 0,
            contour_start: Point::ZERO,
            last: Point::ZERO,
            needs_close: false,
        }
    }
}

/// Iterator over the segments of a [`Path`], including the implicit closing
/// line of each contour.
#[derive(Clone, Debug)]
pub struct Segments<'a> {
    verbs: core::slice::Iter<'a, Verb>,
    points: &'a [Point],
    idx: usize,
    contour_start: Point,
    last: Point,
    needs_close: bool,
}

impl Segments<'_> {
    fn take(&mut self) -> Point {
        let p = self.points[self.idx];
        self.idx += 1;
        p
    }
}

impl Iterator for Segments<'_> {
    type Item = PathSeg;

    fn next(&mut self) -> Option<PathSeg> {
        loop {
            let Some(verb) = self.verbs.next() else {
                if self.needs_close {
                    self.needs_close = false;
                    return Some(PathSeg::Line(self.last, self.contour_start));
                }
                return None;
            };
            match verb {
                Verb::Move => {
                    let p = self.take();
                    if self.needs_close {
                        let close = PathSeg::Line(self.last, self.contour_start);
                        self.contour_start = p;
                        self.last = p;
                        self.needs_close = false;
                        return Some(close);
                    }
                    self.contour_start = p;
                    self.last = p;
                }
                Verb::Line => {
                    let p = self.take();
                    let seg = PathSeg::Line(self.last, p);
                    self.last = p;
                    self.needs_close = true;
                    return Some(seg);
                }
                Verb::Quad => {
                    let ctrl = self.take();
                    let end = self.take();
                    let seg = PathSeg::Quad(self.last, ctrl, end);
                    self.last = end;
                    self.needs_close = true;
                    return Some(seg);
                }
                Verb::Cubic => {
                    let ctrl0 = self.take();
                    let ctrl1 = self.take();
                    let end = self.take();
                    let seg = PathSeg::Cubic(self.last, ctrl0, ctrl1, end);
                    self.last = end;
                    self.needs_close = true;
                    return Some(seg);
                }
            }
        }
    }
}
