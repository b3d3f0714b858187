// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bilinear quad tessellation into a triangle mesh.

use alloc::vec::Vec;

use peniko::color::{AlphaColor, Srgb};

use crate::geom::Point;

/// A tessellated quad: a `(level + 2)^2` vertex grid in row-major order plus
/// `(level + 1)^2 * 2` triangles, with attributes interpolated alongside the
/// positions.
#[derive(Debug)]
pub(crate) struct QuadMesh {
    pub verts: Vec<Point>,
    pub colors: Option<Vec<AlphaColor<Srgb>>>,
    pub texs: Option<Vec<Point>>,
    pub indices: Vec<u32>,
}

/// Evaluate the bilinear patch at `(s, t)`.
fn bilerp_point(corners: &[Point; 4], s: f32, t: f32) -> Point {
    corners[0] * ((1. - s) * (1. - t))
        + corners[1] * (s * (1. - t))
        + corners[2] * (s * t)
        + corners[3] * ((1. - s) * t)
}

fn bilerp_color(corners: &[AlphaColor<Srgb>; 4], s: f32, t: f32) -> AlphaColor<Srgb> {
    let w = [(1. - s) * (1. - t), s * (1. - t), s * t, (1. - s) * t];
    let mut out = [0.; 4];
    for (corner, weight) in corners.iter().zip(w) {
        for (o, c) in out.iter_mut().zip(corner.components) {
            *o += c * weight;
        }
    }
    AlphaColor::new(out)
}

/// Subdivide a quad `level` times into a triangle mesh.
///
/// The grid point `(i, j)` sits at parameters `(s, t) = (j / (level + 1),
/// i / (level + 1))`; each cell becomes the triangles `{(i,j), (i,j+1),
/// (i+1,j)}` and `{(i+1,j), (i,j+1), (i+1,j+1)}`.
pub(crate) fn subdivide_quad(
    verts: &[Point; 4],
    colors: Option<&[AlphaColor<Srgb>; 4]>,
    texs: Option<&[Point; 4]>,
    level: u32,
) -> QuadMesh {
    let side = level as usize + 2;
    let step = 1. / (level + 1) as f32;

    let mut grid_verts = Vec::with_capacity(side * side);
    let mut grid_colors = colors.map(|_| Vec::with_capacity(side * side));
    let mut grid_texs = texs.map(|_| Vec::with_capacity(side * side));

    for i in 0..side {
        let t = i as f32 * step;
        for j in 0..side {
            let s = j as f32 * step;
            grid_verts.push(bilerp_point(verts, s, t));
            if let (Some(out), Some(corners)) = (grid_colors.as_mut(), colors) {
                out.push(bilerp_color(corners, s, t));
            }
            if let (Some(out), Some(corners)) = (grid_texs.as_mut(), texs) {
                out.push(bilerp_point(corners, s, t));
            }
        }
    }

    let cells = side - 1;
    let mut indices = Vec::with_capacity(cells * cells * 6);
    for i in 0..cells {
        for j in 0..cells {
            let a = (i * side + j) as u32;
            let b = (i * side + j + 1) as u32;
            let c = ((i + 1) * side + j) as u32;
            let d = ((i + 1) * side + j + 1) as u32;
            indices.extend_from_slice(&[a, b, c]);
            indices.extend_from_slice(&[c, b, d]);
        }
    }

    QuadMesh {
        verts: grid_verts,
        colors: grid_colors,
        texs: grid_texs,
        indices,
    }
}
