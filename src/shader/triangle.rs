// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Triangle shaders: barycentric color ramps, triangle texture mapping, and
//! their combination.

use peniko::color::{AlphaColor, Srgb};

use crate::geom::Point;
use crate::matrix::Matrix;
use crate::pixel::Pixel;

use super::{Prepared, Shader};

/// The affine map taking the unit basis to a triangle: `(1,0) -> v1 - v0`,
/// `(0,1) -> v2 - v0`, origin to `v0`.
fn vertex_matrix(verts: &[Point; 3]) -> Matrix {
    let [v0, v1, v2] = verts;
    Matrix::new([
        v1.x - v0.x,
        v2.x - v0.x,
        v0.x,
        v1.y - v0.y,
        v2.y - v0.y,
        v0.y,
    ])
}

/// A shader interpolating three vertex colors across a triangle in
/// barycentric coordinates.
#[derive(Debug)]
pub struct TriColorShader {
    colors: [AlphaColor<Srgb>; 3],
    /// Model space to barycentric space; `None` for a degenerate triangle.
    to_barycentric: Option<Matrix>,
    opaque: bool,
}

impl TriColorShader {
    /// Create a new triangle color shader over `verts`.
    pub fn new(colors: [AlphaColor<Srgb>; 3], verts: [Point; 3]) -> Self {
        let opaque = colors.iter().all(|c| c.components[3] == 1.);
        Self {
            colors,
            to_barycentric: vertex_matrix(&verts).invert(),
            opaque,
        }
    }

    pub(crate) fn is_opaque(&self) -> bool {
        self.opaque
    }

    pub(crate) fn prepare(&self, ctm: Matrix) -> Option<PreparedTriColor<'_>> {
        let inv_ctm = ctm.invert()?;
        Some(PreparedTriColor {
            shader: self,
            m: self.to_barycentric? * inv_ctm,
        })
    }
}

#[derive(Debug)]
pub(crate) struct PreparedTriColor<'s> {
    shader: &'s TriColorShader,
    /// Device space to barycentric space.
    m: Matrix,
}

impl PreparedTriColor<'_> {
    pub(crate) fn shade_row(&self, x: i32, y: i32, out: &mut [Pixel]) {
        let [c0, c1, c2] = self.shader.colors.map(|c| c.components);
        let dc1 = sub(c1, c0);
        let dc2 = sub(c2, c0);
        let [a, _, _, d, _, _] = self.m.as_coeffs();

        // Color at the row start, and its per-pixel step along x.
        let bary = self.m.map_point(Point::new(x as f32 + 0.5, y as f32 + 0.5));
        let mut color = add(add(scale(dc1, bary.x), scale(dc2, bary.y)), c0);
        let step = add(scale(dc1, a), scale(dc2, d));

        for px in out {
            *px = Pixel::from_color(AlphaColor::new(color));
            color = add(color, step);
        }
    }
}

fn sub(a: [f32; 4], b: [f32; 4]) -> [f32; 4] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2], a[3] - b[3]]
}

fn add(a: [f32; 4], b: [f32; 4]) -> [f32; 4] {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2], a[3] + b[3]]
}

fn scale(a: [f32; 4], s: f32) -> [f32; 4] {
    [a[0] * s, a[1] * s, a[2] * s, a[3] * s]
}

/// A shader mapping a provider shader (typically a bitmap) across a triangle,
/// so each vertex samples the provider at its texture coordinate.
///
/// Preparation composes the texture-to-vertex map into the CTM handed to the
/// provider; shading is pure delegation.
#[derive(Debug)]
pub struct TriTexShader<'a> {
    provider: &'a Shader<'a>,
    /// Texture space to vertex (model) space; `None` when the texture
    /// coordinates are collinear.
    m: Option<Matrix>,
}

impl<'a> TriTexShader<'a> {
    /// Create a new triangle texture shader.
    pub fn new(texs: [Point; 3], verts: [Point; 3], provider: &'a Shader<'a>) -> Self {
        let m = vertex_matrix(&texs)
            .invert()
            .map(|tex_inv| vertex_matrix(&verts) * tex_inv);
        Self { provider, m }
    }

    pub(crate) fn is_opaque(&self) -> bool {
        self.provider.is_opaque()
    }

    pub(crate) fn prepare(&self, ctm: Matrix) -> Option<Prepared<'_>> {
        self.provider.prepare(ctm * self.m?)
    }
}

/// A shader multiplying a triangle texture with a triangle color ramp,
/// channel by channel.
#[derive(Debug)]
pub struct TriColorTexShader<'a> {
    tex: TriTexShader<'a>,
    color: TriColorShader,
}

impl<'a> TriColorTexShader<'a> {
    /// Create a new combined shader from its two children.
    pub fn new(tex: TriTexShader<'a>, color: TriColorShader) -> Self {
        Self { tex, color }
    }

    pub(crate) fn is_opaque(&self) -> bool {
        self.tex.is_opaque() && self.color.is_opaque()
    }

    pub(crate) fn tex(&self) -> &TriTexShader<'a> {
        &self.tex
    }

    pub(crate) fn color(&self) -> &TriColorShader {
        &self.color
    }
}
