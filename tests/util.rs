// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Utility functions shared across different tests.

#![allow(dead_code, reason = "not every test binary uses every helper")]

use scanfill::{Canvas, Pixel, Pixmap};

/// Render into a fresh transparent pixmap of the given size.
pub fn render(width: u16, height: u16, f: impl FnOnce(&mut Canvas<'_>)) -> Pixmap {
    let mut pixmap = Pixmap::new(width, height);
    let mut canvas = Canvas::new(&mut pixmap);
    f(&mut canvas);
    pixmap
}

/// Assert two renders are identical, reporting the first differing pixel.
pub fn assert_identical(a: &Pixmap, b: &Pixmap) {
    assert_eq!(a.width(), b.width());
    assert_eq!(a.height(), b.height());
    for y in 0..a.height() {
        for x in 0..a.width() {
            assert_eq!(
                a.sample(x, y),
                b.sample(x, y),
                "pixels differ at ({x}, {y}): {:?} vs {:?}",
                a.sample(x, y),
                b.sample(x, y)
            );
        }
    }
}

/// Copy a window out of a pixmap.
pub fn crop(src: &Pixmap, x0: u16, y0: u16, width: u16, height: u16) -> Pixmap {
    let mut out = Pixmap::new(width, height);
    for y in 0..height {
        for x in 0..width {
            out.set_pixel(x, y, src.sample(x0 + x, y0 + y));
        }
    }
    out
}

/// The number of pixels equal to `px`.
pub fn count_pixels(pm: &Pixmap, px: Pixel) -> usize {
    pm.data().iter().filter(|p| **p == px).count()
}
