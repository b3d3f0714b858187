// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A scanline software rasterizer for 2D vector graphics.
//!
//! `scanfill` renders vector primitives — rectangles, convex polygons, paths
//! built from lines and quadratic/cubic Bezier curves, triangle meshes, and
//! bilinearly subdivided quads — into a caller-owned [`Pixmap`] of packed,
//! premultiplied 32-bit pixels. Rendering is single-sample (pixel centers at
//! `(x + 0.5, y + 0.5)`), driven by a [`Paint`] that pairs a solid color or a
//! [`Shader`] with a Porter-Duff [`Compose`] mode, under a transform stack
//! managed by the [`Canvas`].
//!
//! To draw:
//!
//! - Create a [`Pixmap`] and wrap it in a [`Canvas`].
//! - Adjust the current transform with [`save`][Canvas::save],
//!   [`concat`][Canvas::concat], and [`restore`][Canvas::restore].
//! - Call the draw methods, like [`draw_rect`][Canvas::draw_rect] or
//!   [`draw_path`][Canvas::draw_path], with a [`Paint`].
//!
//! ```rust
//! use scanfill::color::palette::css;
//! use scanfill::geom::Rect;
//! use scanfill::{Canvas, Paint, Pixel, Pixmap};
//!
//! let mut pixmap = Pixmap::new(10, 5);
//! let mut canvas = Canvas::new(&mut pixmap);
//! canvas.draw_rect(&Rect::new(3.0, 1.0, 7.0, 4.0), &Paint::new(css::MAGENTA));
//!
//! let magenta = Pixel::from_color(css::MAGENTA);
//! let filled = pixmap.data().iter().filter(|px| **px == magenta).count();
//! assert_eq!(filled, 12);
//! ```
//!
//! ## Features
//!
//! - `std` (enabled by default): Get floating point functions from the standard
//!   library (likely using your target's libc).
//! - `libm`: Use floating point implementations from `libm`.
//! - `png` (enabled by default): Allow loading and storing [`Pixmap`]s as PNG
//!   images. Implies `std`.
//!
//! At least one of `std` and `libm` is required; `std` overrides `libm`.
//!
//! ## What this crate is not
//!
//! There is no anti-aliasing, no stroking, no text, and no GPU involvement.
//! Shapes are filled with the non-zero winding rule and hard pixel edges.

// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![forbid(unsafe_code)]
#![expect(
    clippy::cast_possible_truncation,
    reason = "Pixel channel math and span indexing deliberately quantize f32 values \
that are known to be in range."
)]
#![no_std]

// Suppress the unused_crate_dependencies lint when both std and libm are specified.
#[cfg(all(feature = "std", feature = "libm"))]
use libm as _;

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod bezier;
pub mod canvas;
pub mod geom;
pub mod matrix;
pub mod paint;
pub mod path;
pub mod pixel;
pub mod pixmap;
pub mod shader;

mod blend;
mod edge;
mod math;
mod mesh;
mod scan;

pub use canvas::Canvas;
pub use matrix::Matrix;
pub use paint::{Brush, Paint};
pub use path::Path;
pub use pixel::Pixel;
pub use pixmap::{Bitmap, Pixmap};
pub use shader::Shader;

pub use peniko;
pub use peniko::color;
pub use peniko::{Compose, Extend};
