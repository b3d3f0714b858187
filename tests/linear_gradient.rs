// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Linear gradients drawn through the canvas.

mod util;

use scanfill::color::palette::css;
use scanfill::geom::{Point, Rect};
use scanfill::{Compose, Extend, Matrix, Paint, Pixel, Shader};
use util::render;

#[test]
fn horizontal_ramp_is_monotonic_and_row_constant() {
    let stops = [css::BLACK, css::WHITE];
    let shader = Shader::linear_gradient(Point::ZERO, Point::new(9., 0.), &stops, Extend::Pad);
    let pm = render(10, 10, |canvas| {
        canvas.draw_paint(&Paint::new(&shader));
    });

    let first_row: Vec<Pixel> = (0..10).map(|x| pm.sample(x, 0)).collect();
    // Gray values grow monotonically left to right and stay near the
    // endpoint colors at the edges.
    for pair in first_row.windows(2) {
        assert!(pair[0].r() <= pair[1].r());
    }
    for px in &first_row {
        assert_eq!(px.a(), 255);
        assert_eq!(px.r(), px.g());
        assert_eq!(px.g(), px.b());
    }
    assert!(first_row[0].r() < 20);
    assert!(first_row[9].r() > 235);

    // A horizontal axis shades every row identically.
    for y in 1..10 {
        for x in 0..10 {
            assert_eq!(pm.sample(x, y), pm.sample(x, 0));
        }
    }
}

#[test]
fn pad_extends_the_endpoint_colors() {
    // The gradient span covers only columns 4..=5; Pad holds the end colors
    // outside it.
    let stops = [css::RED, css::BLUE];
    let shader =
        Shader::linear_gradient(Point::new(4., 0.), Point::new(6., 0.), &stops, Extend::Pad);
    let pm = render(10, 1, |canvas| {
        canvas.draw_paint(&Paint::new(&shader));
    });
    for x in 0..4 {
        assert_eq!(pm.sample(x, 0), Pixel::from_color(css::RED), "x = {x}");
    }
    for x in 6..10 {
        assert_eq!(pm.sample(x, 0), Pixel::from_color(css::BLUE), "x = {x}");
    }
}

#[test]
fn repeat_tiles_the_axis_periodically() {
    let stops = [css::BLACK, css::WHITE];
    let shader =
        Shader::linear_gradient(Point::ZERO, Point::new(2., 0.), &stops, Extend::Repeat);
    let pm = render(8, 1, |canvas| {
        canvas.draw_paint(&Paint::new(&shader));
    });
    for x in 0..6 {
        assert_eq!(pm.sample(x, 0), pm.sample(x + 2, 0), "x = {x}");
    }
}

#[test]
fn reflect_tiles_the_axis_symmetrically() {
    let stops = [css::BLACK, css::WHITE];
    let shader =
        Shader::linear_gradient(Point::ZERO, Point::new(4., 0.), &stops, Extend::Reflect);
    let pm = render(8, 1, |canvas| {
        canvas.draw_paint(&Paint::new(&shader));
    });
    // One period is 8 wide and mirrors about x = 4: positions u and 8 - u
    // shade alike.
    for x in 0..4 {
        assert_eq!(pm.sample(x, 0), pm.sample(7 - x, 0), "x = {x}");
    }
}

#[test]
fn gradient_follows_the_ctm() {
    let stops = [css::BLACK, css::WHITE];
    let shader = Shader::linear_gradient(Point::ZERO, Point::new(8., 0.), &stops, Extend::Pad);

    let base = render(8, 8, |canvas| {
        canvas.draw_paint(&Paint::new(&shader));
    });
    // Rotating the CTM by 90 degrees turns the horizontal ramp vertical.
    let rotated = render(8, 8, |canvas| {
        canvas.concat(Matrix::rotate(core::f32::consts::FRAC_PI_2));
        canvas.draw_paint(&Paint::new(&shader));
    });
    for i in 0..8 {
        for j in 0..8 {
            // rotated(x, y) samples the base gradient at u = y.
            assert_eq!(rotated.sample(i, j), base.sample(j, 0), "({i}, {j})");
        }
    }
}

#[test]
fn draw_paint_with_shader_ignores_compose() {
    let stops = [css::RED, css::BLUE];
    let shader =
        Shader::linear_gradient(Point::new(0.5, 0.), Point::new(7., 0.), &stops, Extend::Pad);
    // Clear would wipe the device if the compose mode applied; the shader
    // fast path writes rows directly instead.
    let cleared = render(8, 2, |canvas| {
        canvas.draw_paint(&Paint::new(&shader).with_compose(Compose::Clear));
    });
    let plain = render(8, 2, |canvas| {
        canvas.draw_paint(&Paint::new(&shader));
    });
    util::assert_identical(&cleared, &plain);
    assert_eq!(cleared.sample(0, 0), Pixel::from_color(css::RED));
}

#[test]
fn rect_fill_honors_compose_with_gradients() {
    // Unlike draw_paint, geometry fills do apply the compose mode.
    let stops = [css::RED.with_alpha(0.5), css::BLUE.with_alpha(0.5)];
    let shader = Shader::linear_gradient(Point::ZERO, Point::new(7., 0.), &stops, Extend::Pad);
    let pm = render(8, 2, |canvas| {
        canvas.draw_paint(&Paint::new(css::WHITE).with_compose(Compose::Copy));
        canvas.draw_rect(
            &Rect::new(0., 0., 8., 2.),
            &Paint::new(&shader).with_compose(Compose::Clear),
        );
    });
    assert!(pm.data().iter().all(|px| *px == Pixel::TRANSPARENT));
}

#[test]
fn three_stop_gradient_hits_the_middle_stop() {
    let stops = [css::BLACK, css::RED, css::WHITE];
    // Axis chosen so pixel 4's center sits exactly on the middle stop.
    let shader =
        Shader::linear_gradient(Point::new(0.5, 0.), Point::new(8.5, 0.), &stops, Extend::Pad);
    let pm = render(9, 1, |canvas| {
        canvas.draw_paint(&Paint::new(&shader));
    });
    assert_eq!(pm.sample(0, 0), Pixel::from_color(css::BLACK));
    assert_eq!(pm.sample(4, 0), Pixel::from_color(css::RED));
    assert_eq!(pm.sample(8, 0), Pixel::from_color(css::WHITE));
}
