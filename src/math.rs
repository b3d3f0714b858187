// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mathematical helper functions.
//!
//! Float operations that live in `std` but not `core` are routed through this
//! module so the rest of the crate stays agnostic of the `std`/`libm` split.

#[cfg(feature = "std")]
#[inline(always)]
pub(crate) fn floor(x: f32) -> f32 {
    x.floor()
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
#[inline(always)]
pub(crate) fn floor(x: f32) -> f32 {
    libm::floorf(x)
}

#[cfg(feature = "std")]
#[inline(always)]
pub(crate) fn ceil(x: f32) -> f32 {
    x.ceil()
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
#[inline(always)]
pub(crate) fn ceil(x: f32) -> f32 {
    libm::ceilf(x)
}

#[cfg(feature = "std")]
#[inline(always)]
pub(crate) fn sqrt(x: f32) -> f32 {
    x.sqrt()
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
#[inline(always)]
pub(crate) fn sqrt(x: f32) -> f32 {
    libm::sqrtf(x)
}

#[cfg(feature = "std")]
#[inline(always)]
pub(crate) fn sin_cos(x: f32) -> (f32, f32) {
    x.sin_cos()
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
#[inline(always)]
pub(crate) fn sin_cos(x: f32) -> (f32, f32) {
    libm::sincosf(x)
}

/// Round to the nearest integer, halfway cases away from negative infinity.
///
/// This is the rounding rule used for all device-space quantization: span
/// endpoints, edge tops and bottoms, and color channel scaling.
#[inline(always)]
pub(crate) fn round_to_i32(x: f32) -> i32 {
    floor(x + 0.5) as i32
}
