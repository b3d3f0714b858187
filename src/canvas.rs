// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The canvas: a transform stack and the draw entry points.

use alloc::vec;
use alloc::vec::Vec;

use log::warn;
use peniko::color::{AlphaColor, Srgb};
use smallvec::SmallVec;

use crate::blend::{blend_row, RowSource};
use crate::edge::EdgeBuilder;
use crate::geom::{Point, Rect};
use crate::matrix::Matrix;
use crate::mesh::subdivide_quad;
use crate::paint::{Brush, Paint};
use crate::path::Path;
use crate::pixel::Pixel;
use crate::pixmap::Pixmap;
use crate::scan::{sweep_convex, sweep_winding, Filler};
use crate::shader::{Shader, TriColorShader, TriColorTexShader, TriTexShader};

/// A drawing context over a mutably borrowed device pixmap.
///
/// The canvas owns a stack of transforms; the top of the stack is the current
/// transformation matrix (CTM) applied to every primitive. [`save`][Self::save]
/// duplicates the top, [`restore`][Self::restore] pops back to the matching
/// save, and [`concat`][Self::concat] right-multiplies the top so that
/// later-concatenated transforms act on the object first.
#[derive(Debug)]
pub struct Canvas<'a> {
    device: &'a mut Pixmap,
    stack: Vec<Matrix>,
}

impl<'a> Canvas<'a> {
    /// Create a canvas drawing into `device`, with an identity CTM.
    pub fn new(device: &'a mut Pixmap) -> Self {
        Self {
            device,
            stack: vec![Matrix::IDENTITY],
        }
    }

    /// Push a copy of the current transform.
    pub fn save(&mut self) {
        let top = self.ctm();
        self.stack.push(top);
    }

    /// Pop back to the transform of the matching [`save`][Self::save].
    ///
    /// # Panics
    ///
    /// Panics when called without a matching save.
    pub fn restore(&mut self) {
        assert!(self.stack.len() > 1, "restore without a matching save");
        self.stack.pop();
    }

    /// Right-multiply the current transform by `m`.
    pub fn concat(&mut self, m: Matrix) {
        let top = self.stack.last_mut().expect("stack is never empty");
        *top = *top * m;
    }

    /// The current transformation matrix.
    pub fn ctm(&self) -> Matrix {
        *self.stack.last().expect("stack is never empty")
    }

    /// Fill the entire device with `paint`.
    ///
    /// A shader-driven paint writes every row directly; the paint's compose
    /// mode is not applied on that path.
    pub fn draw_paint(&mut self, paint: &Paint<'_>) {
        let ctm = self.ctm();
        match paint.brush {
            Brush::Solid(color) => {
                let src = Pixel::from_color(color);
                for y in 0..self.device.height() {
                    blend_row(paint.compose, RowSource::Solid(src), self.device.row_mut(y));
                }
            }
            Brush::Shader(shader) => {
                let Some(prepared) = shader.prepare(ctm) else {
                    warn!("Shader context could not be resolved, skipping the draw.");
                    return;
                };
                for y in 0..self.device.height() {
                    prepared.shade_row(0, i32::from(y), self.device.row_mut(y));
                }
            }
        }
    }

    /// Fill a rectangle.
    pub fn draw_rect(&mut self, rect: &Rect, paint: &Paint<'_>) {
        self.draw_convex_polygon(&rect.corners(), paint);
    }

    /// Fill a convex polygon given by its vertices in order.
    ///
    /// Concave input produces unspecified (but memory-safe) output; use
    /// [`draw_path`][Self::draw_path] for arbitrary shapes.
    pub fn draw_convex_polygon(&mut self, points: &[Point], paint: &Paint<'_>) {
        if points.len() < 3 {
            return;
        }
        let ctm = self.ctm();
        let mut pts: SmallVec<[Point; 8]> = SmallVec::from_slice(points);
        ctm.map_points(&mut pts);
        if pts.iter().any(|p| !p.is_finite()) {
            warn!("A polygon contains a non-finite point, ignoring it.");
            return;
        }

        let (width, height) = (self.device.width(), self.device.height());
        let Some(mut filler) = Filler::new(self.device, paint, ctm) else {
            warn!("Shader context could not be resolved, skipping the draw.");
            return;
        };
        let mut builder = EdgeBuilder::new(width, height);
        builder.add_polygon(&pts);
        sweep_convex(builder.finish(), &mut filler);
    }

    /// Fill a path with the non-zero winding rule.
    ///
    /// Every contour is implicitly closed back to its starting point.
    pub fn draw_path(&mut self, path: &Path, paint: &Paint<'_>) {
        if path.is_empty() {
            return;
        }
        let ctm = self.ctm();
        let mut dev_path = path.clone();
        dev_path.transform(&ctm);
        if dev_path.points().iter().any(|p| !p.is_finite()) {
            warn!("A path contains a non-finite point, ignoring it.");
            return;
        }

        let (width, height) = (self.device.width(), self.device.height());
        let Some(mut filler) = Filler::new(self.device, paint, ctm) else {
            warn!("Shader context could not be resolved, skipping the draw.");
            return;
        };
        let mut builder = EdgeBuilder::new(width, height);
        builder.add_path(&dev_path);
        sweep_winding(builder.finish(), &mut filler);
    }

    /// Fill a triangle mesh.
    ///
    /// `indices` holds vertex index triples, one per triangle. Per-vertex
    /// `colors` are interpolated in barycentric coordinates; per-vertex
    /// `texs` sample the paint's shader (texture coordinates require a shader
    /// paint, and are otherwise ignored). When both are given, color
    /// modulates texture. With neither, the call is a no-op.
    pub fn draw_mesh(
        &mut self,
        verts: &[Point],
        colors: Option<&[AlphaColor<Srgb>]>,
        texs: Option<&[Point]>,
        indices: &[u32],
        paint: &Paint<'_>,
    ) {
        let textured = match (paint.brush, texs) {
            (Brush::Shader(provider), Some(texs)) => Some((provider, texs)),
            _ => None,
        };
        if colors.is_none() && textured.is_none() {
            return;
        }

        for tri in indices.chunks_exact(3) {
            let [i0, i1, i2] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            let pts = [verts[i0], verts[i1], verts[i2]];
            match (colors, textured) {
                (Some(cols), Some((provider, texs))) => {
                    let color = TriColorShader::new([cols[i0], cols[i1], cols[i2]], pts);
                    let tex = TriTexShader::new([texs[i0], texs[i1], texs[i2]], pts, provider);
                    let shader = Shader::TriColorTex(TriColorTexShader::new(tex, color));
                    self.draw_convex_polygon(&pts, &Paint::new(&shader).with_compose(paint.compose));
                }
                (Some(cols), None) => {
                    let shader = Shader::tri_color([cols[i0], cols[i1], cols[i2]], pts);
                    self.draw_convex_polygon(&pts, &Paint::new(&shader).with_compose(paint.compose));
                }
                (None, Some((provider, texs))) => {
                    let shader = Shader::tri_tex([texs[i0], texs[i1], texs[i2]], pts, provider);
                    self.draw_convex_polygon(&pts, &Paint::new(&shader).with_compose(paint.compose));
                }
                (None, None) => return,
            }
        }
    }

    /// Fill a quad, bilinearly subdivided `level` times into a triangle mesh.
    ///
    /// Vertices, colors, and texture coordinates are all interpolated with
    /// the same bilinear weights before the mesh is drawn via
    /// [`draw_mesh`][Self::draw_mesh].
    pub fn draw_quad(
        &mut self,
        verts: &[Point; 4],
        colors: Option<&[AlphaColor<Srgb>; 4]>,
        texs: Option<&[Point; 4]>,
        level: u32,
        paint: &Paint<'_>,
    ) {
        if colors.is_none() && texs.is_none() {
            return;
        }
        let mesh = subdivide_quad(verts, colors, texs, level);
        self.draw_mesh(
            &mesh.verts,
            mesh.colors.as_deref(),
            mesh.texs.as_deref(),
            &mesh.indices,
            paint,
        );
    }
}
