// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scan conversion: sweeping edge lists into filled spans.
//!
//! Both converters work a scan line at a time. An edge crosses line `y` at
//! `x(y) = m * (y + 0.5) + b`; crossings are rounded to the nearest pixel and
//! spans are filled half-open, `[left, right)`.

use alloc::vec::Vec;

use peniko::Compose;

use crate::blend::{blend_row, RowSource};
use crate::edge::Edge;
use crate::math::round_to_i32;
use crate::matrix::Matrix;
use crate::paint::{Brush, Paint};
use crate::pixel::Pixel;
use crate::pixmap::Pixmap;
use crate::shader::Prepared;

/// Everything needed to fill spans for one draw call: the destination, the
/// resolved source, and the compose mode.
pub(crate) struct Filler<'d, 's> {
    device: &'d mut Pixmap,
    compose: Compose,
    source: SpanSource<'s>,
}

enum SpanSource<'s> {
    Solid(Pixel),
    Shaded {
        prepared: Prepared<'s>,
        opaque: bool,
        scratch: Vec<Pixel>,
    },
}

impl<'d, 's> Filler<'d, 's> {
    /// Resolve a paint against the CTM. Returns `None` when the paint uses a
    /// shader whose preparation fails; such draws are skipped entirely.
    pub(crate) fn new(
        device: &'d mut Pixmap,
        paint: &Paint<'s>,
        ctm: Matrix,
    ) -> Option<Self> {
        let source = match paint.brush {
            Brush::Solid(color) => SpanSource::Solid(Pixel::from_color(color)),
            Brush::Shader(shader) => SpanSource::Shaded {
                prepared: shader.prepare(ctm)?,
                opaque: shader.is_opaque(),
                scratch: Vec::new(),
            },
        };
        Some(Self {
            device,
            compose: paint.compose,
            source,
        })
    }

    pub(crate) fn height(&self) -> i32 {
        i32::from(self.device.height())
    }

    /// Fill the half-open span `[left, right)` on scan line `y`, clamped to
    /// the device.
    pub(crate) fn fill_row(&mut self, y: i32, left: i32, right: i32) {
        let width = i32::from(self.device.width());
        let left = left.max(0);
        let right = right.min(width);
        if left >= right || y < 0 || y >= self.height() {
            return;
        }
        let row = &mut self.device.row_mut(y as u16)[left as usize..right as usize];

        match &mut self.source {
            SpanSource::Solid(src) => blend_row(self.compose, RowSource::Solid(*src), row),
            SpanSource::Shaded {
                prepared,
                opaque,
                scratch,
            } => {
                if *opaque {
                    // Opaque sources overwrite the destination wholesale, so
                    // the blend stage is skipped.
                    prepared.shade_row(left, y, row);
                } else {
                    scratch.clear();
                    scratch.resize(row.len(), Pixel::TRANSPARENT);
                    prepared.shade_row(left, y, scratch.as_mut_slice());
                    blend_row(self.compose, RowSource::Shaded(scratch.as_slice()), row);
                }
            }
        }
    }
}

/// Sweep a convex polygon's edges.
///
/// Only correct when at most two edges are active on any scan line, which
/// clipped convex input guarantees. Edges are consumed in `(top, bot)` order,
/// always keeping the two frontmost.
pub(crate) fn sweep_convex(mut edges: Vec<Edge>, filler: &mut Filler<'_, '_>) {
    edges.sort_unstable_by(|a, b| (a.top, a.bot).cmp(&(b.top, b.bot)));

    let mut rest = edges.into_iter();
    let (Some(mut e0), Some(mut e1)) = (rest.next(), rest.next()) else {
        return;
    };

    for y in 0..filler.height() {
        // Swap in replacements for edges this scan line has passed.
        while y >= e0.bot {
            match rest.next() {
                Some(e) => e0 = e,
                None => return,
            }
        }
        while y >= e1.bot {
            match rest.next() {
                Some(e) => e1 = e,
                None => return,
            }
        }
        if y < e0.top || y < e1.top {
            continue;
        }
        let x0 = round_to_i32(e0.x_at(y));
        let x1 = round_to_i32(e1.x_at(y));
        filler.fill_row(y, x0.min(x1), x0.max(x1));
    }
}

/// Sweep arbitrary (possibly self-intersecting, multi-contour) edges with
/// the non-zero winding rule.
pub(crate) fn sweep_winding(mut edges: Vec<Edge>, filler: &mut Filler<'_, '_>) {
    if edges.is_empty() {
        return;
    }
    edges.sort_unstable_by(|a, b| {
        a.top.cmp(&b.top).then_with(|| {
            a.x_at(a.top)
                .partial_cmp(&b.x_at(b.top))
                .unwrap_or(core::cmp::Ordering::Equal)
        })
    });

    let mut pending = edges.into_iter().peekable();
    let mut active: Vec<Edge> = Vec::new();

    for y in 0..filler.height() {
        while let Some(e) = pending.next_if(|e| e.top <= y) {
            active.push(e);
        }
        active.retain(|e| e.bot > y);
        if active.is_empty() {
            if pending.peek().is_none() {
                return;
            }
            continue;
        }

        // Active lists are short; insertion sort by the current crossing.
        for i in 1..active.len() {
            let mut j = i;
            while j > 0 && active[j - 1].x_at(y) > active[j].x_at(y) {
                active.swap(j - 1, j);
                j -= 1;
            }
        }

        let mut winding = 0_i32;
        let mut left = 0_i32;
        for e in &active {
            let x = round_to_i32(e.x_at(y));
            if winding == 0 {
                left = x;
            }
            winding += i32::from(e.winding);
            if winding == 0 {
                filler.fill_row(y, left, x);
            }
        }
    }
}
