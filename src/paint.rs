// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paints: a brush plus a compositing mode.

use peniko::color::{AlphaColor, Srgb};
use peniko::Compose;

use crate::shader::Shader;

/// What a paint draws with: a solid color or a borrowed shader.
#[derive(Clone, Copy, Debug)]
pub enum Brush<'a> {
    /// A solid, non-premultiplied color.
    Solid(AlphaColor<Srgb>),
    /// A shader producing one source pixel per device pixel.
    Shader(&'a Shader<'a>),
}

impl From<AlphaColor<Srgb>> for Brush<'_> {
    fn from(color: AlphaColor<Srgb>) -> Self {
        Self::Solid(color)
    }
}

impl<'a> From<&'a Shader<'a>> for Brush<'a> {
    fn from(shader: &'a Shader<'a>) -> Self {
        Self::Shader(shader)
    }
}

/// How shapes are filled: a [`Brush`] combined with a Porter-Duff
/// [`Compose`] mode (`SrcOver` by default).
#[derive(Clone, Copy, Debug)]
pub struct Paint<'a> {
    /// The source of the paint.
    pub brush: Brush<'a>,
    /// The compositing mode applied against the destination.
    pub compose: Compose,
}

impl<'a> Paint<'a> {
    /// Create a paint composited with `SrcOver`.
    pub fn new(brush: impl Into<Brush<'a>>) -> Self {
        Self {
            brush: brush.into(),
            compose: Compose::SrcOver,
        }
    }

    /// Replace the compositing mode.
    pub fn with_compose(mut self, compose: Compose) -> Self {
        self.compose = compose;
        self
    }
}
