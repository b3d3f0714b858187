// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Porter-Duff compositing over packed premultiplied pixels.

use peniko::Compose;

use crate::pixel::Pixel;

/// The source operand for one span: a single broadcast pixel when the paint
/// has no shader, or a shaded row of the span's length.
#[derive(Clone, Copy, Debug)]
pub(crate) enum RowSource<'a> {
    Solid(Pixel),
    Shaded(&'a [Pixel]),
}

/// Composite one source pixel against one destination pixel.
///
/// With `a` the source alpha and `A` the destination alpha, the operators are
/// the classical table:
///
/// | mode     | result              |
/// |----------|---------------------|
/// | Clear    | 0                   |
/// | Copy     | S                   |
/// | Dest     | D                   |
/// | SrcOver  | S + (1 - a) D       |
/// | DestOver | D + (1 - A) S       |
/// | SrcIn    | A S                 |
/// | DestIn   | a D                 |
/// | SrcOut   | (1 - A) S           |
/// | DestOut  | (1 - a) D           |
/// | SrcAtop  | A S + (1 - a) D     |
/// | DestAtop | a D + (1 - A) S     |
/// | Xor      | (1 - a) D + (1 - A) S |
/// | Plus     | min(S + D, 1)       |
#[inline(always)]
pub(crate) fn blend_pixel(compose: Compose, src: Pixel, dst: Pixel) -> Pixel {
    match compose {
        Compose::Clear => Pixel::TRANSPARENT,
        Compose::Copy => src,
        Compose::Dest => dst,
        Compose::SrcOver => src.plus(dst.scale(255 - src.a())),
        Compose::DestOver => dst.plus(src.scale(255 - dst.a())),
        Compose::SrcIn => src.scale(dst.a()),
        Compose::DestIn => dst.scale(src.a()),
        Compose::SrcOut => src.scale(255 - dst.a()),
        Compose::DestOut => dst.scale(255 - src.a()),
        Compose::SrcAtop => src.scale(dst.a()).plus(dst.scale(255 - src.a())),
        Compose::DestAtop => dst.scale(src.a()).plus(src.scale(255 - dst.a())),
        Compose::Xor => dst.scale(255 - src.a()).plus(src.scale(255 - dst.a())),
        Compose::Plus => src.saturating_plus(dst),
        // Have not been able to find a formula for this, so just fall back to Plus.
        Compose::PlusLighter => src.saturating_plus(dst),
    }
}

/// Composite a source row into a destination row.
///
/// A [`RowSource::Shaded`] slice must be exactly as long as `dst`.
pub(crate) fn blend_row(compose: Compose, source: RowSource<'_>, dst: &mut [Pixel]) {
    match source {
        RowSource::Solid(src) => match compose {
            Compose::Dest => {}
            Compose::Clear => dst.fill(Pixel::TRANSPARENT),
            Compose::Copy => dst.fill(src),
            _ => {
                for d in dst {
                    *d = blend_pixel(compose, src, *d);
                }
            }
        },
        RowSource::Shaded(srcs) => {
            debug_assert_eq!(srcs.len(), dst.len());
            for (d, s) in dst.iter_mut().zip(srcs) {
                *d = blend_pixel(compose, *s, *d);
            }
        }
    }
}
