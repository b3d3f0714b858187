// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Owned pixel buffers and borrowed bitmap views.

use alloc::vec;
use alloc::vec::Vec;

use crate::geom::ISize;
use crate::pixel::Pixel;

#[cfg(feature = "png")]
extern crate std;

/// An owned pixmap of packed premultiplied [`Pixel`]s in row-major order.
#[derive(Debug, Clone)]
pub struct Pixmap {
    /// Width of the pixmap in pixels.
    width: u16,
    /// Height of the pixmap in pixels.
    height: u16,
    /// Pixel buffer, `width * height` long.
    buf: Vec<Pixel>,
    /// Whether every pixel is known to be fully opaque.
    opaque: bool,
}

impl Pixmap {
    /// Create a new pixmap with all pixels set to transparent black.
    pub fn new(width: u16, height: u16) -> Self {
        let buf = vec![Pixel::TRANSPARENT; usize::from(width) * usize::from(height)];
        Self {
            width,
            height,
            buf,
            opaque: false,
        }
    }

    /// Create a pixmap from existing premultiplied pixel data in row-major
    /// order.
    ///
    /// The data is assumed to possibly contain non-opaque pixels; use
    /// [`from_parts_with_opacity`](Self::from_parts_with_opacity) when the
    /// opacity status is already known.
    ///
    /// # Panics
    ///
    /// Panics if `data` is not exactly `width * height` long.
    pub fn from_parts(data: Vec<Pixel>, width: u16, height: u16) -> Self {
        Self::from_parts_with_opacity(data, width, height, false)
    }

    /// Create a pixmap from existing premultiplied pixel data and a
    /// precomputed opacity flag.
    ///
    /// # Panics
    ///
    /// Panics if `data` is not exactly `width * height` long.
    pub fn from_parts_with_opacity(data: Vec<Pixel>, width: u16, height: u16, opaque: bool) -> Self {
        assert_eq!(
            data.len(),
            usize::from(width) * usize::from(height),
            "expected `data` to have length of exactly `width * height`"
        );
        Self {
            width,
            height,
            buf: data,
            opaque,
        }
    }

    /// The width of the pixmap in pixels.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// The height of the pixmap in pixels.
    pub fn height(&self) -> u16 {
        self.height
    }

    /// The size of the pixmap in pixels.
    pub fn size(&self) -> ISize {
        ISize::new(self.width, self.height)
    }

    /// Whether every pixel is known to be fully opaque.
    ///
    /// This is a conservative flag: it may be `false` for a buffer that
    /// happens to be opaque, but never `true` for one that is not — assuming
    /// callers of [`data_mut`](Self::data_mut) keep it truthful.
    pub fn is_opaque(&self) -> bool {
        self.opaque
    }

    /// Recompute the opacity flag by scanning every pixel.
    pub fn recompute_opacity(&mut self) {
        self.opaque = self.buf.iter().all(|px| px.a() == 255);
    }

    /// The pixel data in row-major order.
    pub fn data(&self) -> &[Pixel] {
        &self.buf
    }

    /// The pixel data in row-major order, mutably.
    pub fn data_mut(&mut self) -> &mut [Pixel] {
        self.opaque = false;
        &mut self.buf
    }

    /// The pixel data as raw bytes in host byte order.
    pub fn data_as_u8_slice(&self) -> &[u8] {
        bytemuck::cast_slice(&self.buf)
    }

    /// One row of pixels.
    pub fn row(&self, y: u16) -> &[Pixel] {
        let w = usize::from(self.width);
        let start = usize::from(y) * w;
        &self.buf[start..start + w]
    }

    /// One row of pixels, mutably.
    pub(crate) fn row_mut(&mut self, y: u16) -> &mut [Pixel] {
        let w = usize::from(self.width);
        let start = usize::from(y) * w;
        &mut self.buf[start..start + w]
    }

    /// Sample the pixel at `(x, y)`.
    pub fn sample(&self, x: u16, y: u16) -> Pixel {
        self.buf[usize::from(y) * usize::from(self.width) + usize::from(x)]
    }

    /// Overwrite the pixel at `(x, y)`.
    pub fn set_pixel(&mut self, x: u16, y: u16, pixel: Pixel) {
        self.opaque = false;
        self.buf[usize::from(y) * usize::from(self.width) + usize::from(x)] = pixel;
    }

    /// Consume the pixmap, returning the pixel data.
    pub fn take(self) -> Vec<Pixel> {
        self.buf
    }

    /// Load a pixmap from a PNG stream, premultiplying the image data.
    #[cfg(feature = "png")]
    pub fn from_png(data: impl std::io::Read) -> Result<Self, png::DecodingError> {
        let mut decoder = png::Decoder::new(data);
        decoder.set_transformations(
            png::Transformations::normalize_to_color8() | png::Transformations::ALPHA,
        );

        let mut reader = decoder.read_info()?;
        let (width, height) = {
            let info = reader.info();
            let width: u16 = info
                .width
                .try_into()
                .map_err(|_| png::DecodingError::LimitsExceeded)?;
            let height: u16 = info
                .height
                .try_into()
                .map_err(|_| png::DecodingError::LimitsExceeded)?;
            (width, height)
        };

        let mut raw = vec![0_u8; reader.output_buffer_size()];
        reader.next_frame(&mut raw)?;

        // The transformations leave either RGBA or grayscale-alpha samples.
        let (color_type, bit_depth) = reader.output_color_type();
        debug_assert_eq!(
            bit_depth,
            png::BitDepth::Eight,
            "normalize_to_color8 means the bit depth is always 8"
        );
        let mut opaque = true;
        let premultiply = |rgba: [u8; 4]| {
            let alpha = u32::from(rgba[3]);
            let mul = |c: u8| ((u32::from(c) * alpha) / 255) as u8;
            Pixel::from_argb(rgba[3], mul(rgba[0]), mul(rgba[1]), mul(rgba[2]))
        };
        let pixels: Vec<Pixel> = match color_type {
            png::ColorType::Rgba => raw
                .chunks_exact(4)
                .map(|c| {
                    opaque &= c[3] == 255;
                    premultiply([c[0], c[1], c[2], c[3]])
                })
                .collect(),
            png::ColorType::GrayscaleAlpha => raw
                .chunks_exact(2)
                .map(|c| {
                    opaque &= c[1] == 255;
                    premultiply([c[0], c[0], c[0], c[1]])
                })
                .collect(),
            _ => unreachable!("the requested transformations always produce alpha output"),
        };

        Ok(Self::from_parts_with_opacity(pixels, width, height, opaque))
    }

    /// Encode the pixmap as a PNG, unpremultiplying the pixel data.
    #[cfg(feature = "png")]
    pub fn into_png(self) -> Result<Vec<u8>, png::EncodingError> {
        let mut rgba = Vec::with_capacity(self.buf.len() * 4);
        for px in &self.buf {
            let a = px.a();
            if a == 0 || a == 255 {
                rgba.extend_from_slice(&[px.r(), px.g(), px.b(), a]);
            } else {
                let unmul = |c: u8| ((f32::from(c) * 255. / f32::from(a)) + 0.5) as u8;
                rgba.extend_from_slice(&[unmul(px.r()), unmul(px.g()), unmul(px.b()), a]);
            }
        }

        let mut data = Vec::new();
        let mut encoder = png::Encoder::new(&mut data, u32::from(self.width), u32::from(self.height));
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&rgba)?;
        writer.finish().map(|()| data)
    }
}

/// A borrowed view of premultiplied pixel memory, usable as a shader source.
///
/// Unlike [`Pixmap`], a `Bitmap` carries an explicit row stride, so it can
/// describe a sub-rectangle of a larger buffer. The pixel at `(x, y)` lives at
/// index `y * stride + x`; the row pitch in bytes is `4 * stride`.
#[derive(Clone, Copy, Debug)]
pub struct Bitmap<'a> {
    pixels: &'a [Pixel],
    width: u16,
    height: u16,
    /// Row stride in pixels, at least `width`.
    stride: usize,
    opaque: bool,
}

impl<'a> Bitmap<'a> {
    /// View an entire [`Pixmap`].
    pub fn from_pixmap(pixmap: &'a Pixmap) -> Self {
        Self {
            pixels: pixmap.data(),
            width: pixmap.width(),
            height: pixmap.height(),
            stride: usize::from(pixmap.width()),
            opaque: pixmap.is_opaque(),
        }
    }

    /// View raw pixel memory with an explicit row stride (in pixels).
    ///
    /// # Panics
    ///
    /// Panics if `stride < width` or the slice cannot hold `height` rows.
    pub fn with_stride(
        pixels: &'a [Pixel],
        width: u16,
        height: u16,
        stride: usize,
        opaque: bool,
    ) -> Self {
        assert!(usize::from(width) <= stride, "stride must cover a full row");
        if height > 0 {
            let needed = stride * (usize::from(height) - 1) + usize::from(width);
            assert!(pixels.len() >= needed, "buffer too short for {height} rows");
        }
        Self {
            pixels,
            width,
            height,
            stride,
            opaque,
        }
    }

    /// The width of the view in pixels.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// The height of the view in pixels.
    pub fn height(&self) -> u16 {
        self.height
    }

    /// The row pitch in bytes (always a multiple of 4).
    pub fn row_bytes(&self) -> usize {
        self.stride * 4
    }

    /// Whether every pixel is known to be fully opaque.
    pub fn is_opaque(&self) -> bool {
        self.opaque
    }

    /// Sample the pixel at `(x, y)`.
    #[inline(always)]
    pub fn sample(&self, x: usize, y: usize) -> Pixel {
        self.pixels[y * self.stride + x]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_pixmap_is_transparent() {
        let pm = Pixmap::new(4, 3);
        assert_eq!(pm.data().len(), 12);
        assert!(pm.data().iter().all(|px| *px == Pixel::TRANSPARENT));
        assert!(!pm.is_opaque());
    }

    #[test]
    fn sample_and_set_round_trip() {
        let mut pm = Pixmap::new(4, 3);
        let px = Pixel::from_argb(255, 10, 20, 30);
        pm.set_pixel(2, 1, px);
        assert_eq!(pm.sample(2, 1), px);
        assert_eq!(pm.row(1)[2], px);
    }

    #[test]
    fn bitmap_with_stride_addresses_subrect() {
        // A 4-wide buffer viewed as a 2-wide bitmap with stride 4.
        let mut buf = alloc::vec![Pixel::TRANSPARENT; 8];
        buf[4] = Pixel::from_argb(255, 1, 2, 3);
        let bm = Bitmap::with_stride(&buf, 2, 2, 4, false);
        assert_eq!(bm.sample(0, 1), Pixel::from_argb(255, 1, 2, 3));
        assert_eq!(bm.row_bytes(), 16);
    }

    #[test]
    fn opacity_tracking() {
        let data = alloc::vec![Pixel::from_argb(255, 0, 0, 0); 4];
        let mut pm = Pixmap::from_parts(data, 2, 2);
        assert!(!pm.is_opaque());
        pm.recompute_opacity();
        assert!(pm.is_opaque());
        pm.set_pixel(0, 0, Pixel::TRANSPARENT);
        assert!(!pm.is_opaque());
    }

    #[cfg(feature = "png")]
    #[test]
    fn png_round_trip() {
        let mut pm = Pixmap::new(2, 2);
        pm.set_pixel(0, 0, Pixel::from_argb(255, 255, 0, 0));
        pm.set_pixel(1, 1, Pixel::from_argb(128, 128, 0, 0));
        let encoded = pm.clone().into_png().unwrap();
        let decoded = Pixmap::from_png(&encoded[..]).unwrap();
        assert_eq!(decoded.sample(0, 0), Pixel::from_argb(255, 255, 0, 0));
        // Premultiplication after the unpremultiplied round trip is lossless
        // for these exact values.
        assert_eq!(decoded.sample(1, 1), Pixel::from_argb(128, 128, 0, 0));
        assert_eq!(decoded.sample(0, 1), Pixel::TRANSPARENT);
    }
}
