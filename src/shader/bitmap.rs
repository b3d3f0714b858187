// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sampling a bitmap through a local transform and tile mode.

use peniko::Extend;

use crate::geom::Point;
use crate::matrix::Matrix;
use crate::pixel::Pixel;
use crate::pixmap::Bitmap;

use super::tile_coord;

/// A shader that samples the nearest texel of a source bitmap.
///
/// `local_inverse` maps device space into the caller's chosen local space of
/// the bitmap; the tile mode decides what happens outside the bitmap's
/// extent.
#[derive(Debug)]
pub struct BitmapShader<'a> {
    view: Bitmap<'a>,
    local_inverse: Matrix,
    extend: Extend,
}

impl<'a> BitmapShader<'a> {
    /// Create a new bitmap shader.
    pub fn new(view: Bitmap<'a>, local_inverse: Matrix, extend: Extend) -> Self {
        Self {
            view,
            local_inverse,
            extend,
        }
    }

    pub(crate) fn is_opaque(&self) -> bool {
        self.view.is_opaque()
    }

    pub(crate) fn prepare(&self, ctm: Matrix) -> Option<PreparedBitmap<'_>> {
        let inv_ctm = ctm.invert()?;
        Some(PreparedBitmap {
            view: self.view,
            extend: self.extend,
            m: self.local_inverse * inv_ctm,
        })
    }
}

#[derive(Debug)]
pub(crate) struct PreparedBitmap<'s> {
    view: Bitmap<'s>,
    extend: Extend,
    /// Device space to bitmap space.
    m: Matrix,
}

impl PreparedBitmap<'_> {
    pub(crate) fn shade_row(&self, x: i32, y: i32, out: &mut [Pixel]) {
        if self.view.width() == 0 || self.view.height() == 0 {
            return;
        }
        let width = f32::from(self.view.width());
        let height = f32::from(self.view.height());
        let start = self.m.map_point(Point::new(x as f32 + 0.5, y as f32 + 0.5));
        let [dx, _, _, dy, _, _] = self.m.as_coeffs();

        for (j, px) in out.iter_mut().enumerate() {
            let u = start.x + dx * j as f32;
            let v = start.y + dy * j as f32;
            let ix = tile_coord(u, width, self.extend) as usize;
            let iy = tile_coord(v, height, self.extend) as usize;
            *px = self.view.sample(ix, iy);
        }
    }
}
