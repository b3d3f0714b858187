// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bitmap shaders drawn through the canvas.

mod util;

use scanfill::color::palette::css;
use scanfill::geom::Rect;
use scanfill::{Bitmap, Compose, Extend, Matrix, Paint, Pixel, Pixmap, Shader};
use util::render;

/// A 4x4 two-color checkerboard.
fn checker() -> Pixmap {
    let black = Pixel::from_color(css::BLACK);
    let white = Pixel::from_color(css::WHITE);
    let data = (0..4)
        .flat_map(|y| (0..4).map(move |x| if (x + y) % 2 == 0 { black } else { white }))
        .collect();
    Pixmap::from_parts_with_opacity(data, 4, 4, true)
}

#[test]
fn repeat_tiles_the_checker() {
    let source = checker();
    let shader = Shader::bitmap(Bitmap::from_pixmap(&source), Matrix::IDENTITY, Extend::Repeat);
    let pm = render(8, 8, |canvas| {
        canvas.draw_paint(&Paint::new(&shader));
    });
    for y in 0..8_u16 {
        for x in 0..8_u16 {
            assert_eq!(pm.sample(x, y), source.sample(x % 4, y % 4), "({x}, {y})");
        }
    }
}

#[test]
fn pad_clamps_to_the_border_texels() {
    let source = checker();
    let shader = Shader::bitmap(Bitmap::from_pixmap(&source), Matrix::IDENTITY, Extend::Pad);
    let pm = render(8, 8, |canvas| {
        canvas.draw_paint(&Paint::new(&shader));
    });
    for y in 0..8_u16 {
        for x in 0..8_u16 {
            let sx = x.min(3);
            let sy = y.min(3);
            assert_eq!(pm.sample(x, y), source.sample(sx, sy), "({x}, {y})");
        }
    }
}

#[test]
fn reflect_mirrors_each_tile() {
    let source = checker();
    let shader = Shader::bitmap(Bitmap::from_pixmap(&source), Matrix::IDENTITY, Extend::Reflect);
    let pm = render(8, 1, |canvas| {
        canvas.draw_paint(&Paint::new(&shader));
    });
    // Columns 4..8 sample the source reversed: u in [4, 8) folds to 8 - u.
    for x in 0..4_u16 {
        assert_eq!(pm.sample(4 + x, 0), source.sample(3 - x, 0), "x = {x}");
    }
}

#[test]
fn ctm_translation_shifts_sampling() {
    let source = checker();
    let shader = Shader::bitmap(Bitmap::from_pixmap(&source), Matrix::IDENTITY, Extend::Repeat);
    let pm = render(8, 8, |canvas| {
        canvas.concat(Matrix::translate(2., 1.));
        canvas.draw_paint(&Paint::new(&shader));
    });
    // The CTM moves the bitmap with the geometry: device (x, y) samples
    // local (x - 2, y - 1).
    for y in 1..8_u16 {
        for x in 2..8_u16 {
            assert_eq!(pm.sample(x, y), source.sample((x - 2) % 4, (y - 1) % 4), "({x}, {y})");
        }
    }
}

#[test]
fn local_inverse_scales_sampling() {
    let source = checker();
    // A local inverse halving coordinates: each texel covers 2x2 device
    // pixels.
    let shader = Shader::bitmap(
        Bitmap::from_pixmap(&source),
        Matrix::scale(0.5, 0.5),
        Extend::Pad,
    );
    let pm = render(8, 8, |canvas| {
        canvas.draw_paint(&Paint::new(&shader));
    });
    for y in 0..8_u16 {
        for x in 0..8_u16 {
            assert_eq!(pm.sample(x, y), source.sample(x / 2, y / 2), "({x}, {y})");
        }
    }
}

#[test]
fn opaque_bitmap_rect_fill_writes_directly() {
    let source = checker();
    let shader = Shader::bitmap(Bitmap::from_pixmap(&source), Matrix::IDENTITY, Extend::Repeat);
    // DestOver would keep the red background if the blender ran, but an
    // opaque shader overwrites the span wholesale.
    let pm = render(4, 4, |canvas| {
        canvas.draw_paint(&Paint::new(css::RED).with_compose(Compose::Copy));
        canvas.draw_rect(
            &Rect::new(0., 0., 4., 4.),
            &Paint::new(&shader).with_compose(Compose::DestOver),
        );
    });
    for y in 0..4_u16 {
        for x in 0..4_u16 {
            assert_eq!(pm.sample(x, y), source.sample(x, y), "({x}, {y})");
        }
    }
}

#[test]
fn translucent_bitmap_blends() {
    // A half-transparent 1x1 source stretched across the device via Pad.
    let half = Pixel::from_argb(128, 128, 0, 0);
    let source = Pixmap::from_parts(vec![half], 1, 1);
    let shader = Shader::bitmap(Bitmap::from_pixmap(&source), Matrix::IDENTITY, Extend::Pad);
    let pm = render(2, 2, |canvas| {
        canvas.draw_paint(&Paint::new(css::BLUE).with_compose(Compose::Copy));
        canvas.draw_rect(&Rect::new(0., 0., 2., 2.), &Paint::new(&shader));
    });
    // SrcOver of (128 red, a=128) over opaque blue.
    let px = pm.sample(0, 0);
    assert_eq!(px.a(), 255);
    assert!(px.r().abs_diff(128) <= 1);
    assert!(px.b().abs_diff(127) <= 1);
}

#[test]
fn bitmap_view_with_stride_samples_a_subrect() {
    // An 8-wide buffer whose left 4 columns form the shader source.
    let wide = {
        let mut pm = Pixmap::new(8, 2);
        for y in 0..2 {
            for x in 0..8 {
                pm.set_pixel(x, y, Pixel::from_argb(255, x as u8, y as u8, 0));
            }
        }
        pm
    };
    let view = Bitmap::with_stride(wide.data(), 4, 2, 8, true);
    let shader = Shader::bitmap(view, Matrix::IDENTITY, Extend::Repeat);
    let pm = render(8, 2, |canvas| {
        canvas.draw_paint(&Paint::new(&shader));
    });
    for y in 0..2_u16 {
        for x in 0..8_u16 {
            assert_eq!(pm.sample(x, y), Pixel::from_argb(255, (x % 4) as u8, y as u8, 0));
        }
    }
}
