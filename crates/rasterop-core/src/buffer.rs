//! The owned RGBA pixel buffer every transform operates on.
//!
//! A `PixelBuffer` is the single mutable resource of the engine. Transforms
//! that produce a new buffer never alias the source: the result owns fresh
//! storage and the caller is expected to drop the old buffer. The only
//! in-place operations are [`crate::compose::fill`] and
//! [`crate::compose::merge`].

use crate::color::Color;
use crate::error::TransformError;

/// Bytes per RGBA pixel.
pub const BYTES_PER_PIXEL: usize = 4;

/// A dense, row-major RGBA image buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    /// RGBA pixel data, `width * height * 4` bytes.
    pixels: Vec<u8>,
}

impl PixelBuffer {
    /// Allocate a buffer of fully transparent pixels.
    ///
    /// # Errors
    ///
    /// `InvalidDimensions` for a zero width or height; `AllocationFailure`
    /// when the byte length overflows or the memory cannot be reserved.
    pub fn new(width: u32, height: u32) -> Result<Self, TransformError> {
        let len = Self::byte_len(width, height)?;
        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(len)
            .map_err(|_| TransformError::AllocationFailure { width, height })?;
        pixels.resize(len, 0);
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Allocate a buffer with every pixel set to `color`.
    pub fn filled(width: u32, height: u32, color: Color) -> Result<Self, TransformError> {
        let mut buffer = Self::new(width, height)?;
        let ch = color.to_channels();
        for px in buffer.pixels.chunks_exact_mut(BYTES_PER_PIXEL) {
            px.copy_from_slice(&ch);
        }
        Ok(buffer)
    }

    /// Wrap raw RGBA bytes produced by an external decoder.
    ///
    /// # Errors
    ///
    /// `CorruptPixelData` when the data length does not match
    /// `width * height * 4`.
    pub fn from_raw(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, TransformError> {
        let expected = Self::byte_len(width, height)?;
        if pixels.len() != expected {
            return Err(TransformError::CorruptPixelData(format!(
                "expected {} bytes for {}x{} RGBA, got {}",
                expected,
                width,
                height,
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    pub fn byte_size(&self) -> usize {
        self.pixels.len()
    }

    /// Read the pixel at `(x, y)`. Coordinates must be in bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Color {
        let idx = self.index(x, y);
        Color::from_channels([
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ])
    }

    /// Write the pixel at `(x, y)`. Coordinates must be in bounds.
    #[inline]
    pub fn put_pixel(&mut self, x: u32, y: u32, color: Color) {
        let idx = self.index(x, y);
        self.pixels[idx..idx + BYTES_PER_PIXEL].copy_from_slice(&color.to_channels());
    }

    /// The raw RGBA bytes, row-major.
    pub fn as_raw(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.pixels
    }

    /// One row of raw RGBA bytes.
    pub(crate) fn row(&self, y: u32) -> &[u8] {
        let stride = self.width as usize * BYTES_PER_PIXEL;
        let start = y as usize * stride;
        &self.pixels[start..start + stride]
    }

    pub(crate) fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let stride = self.width as usize * BYTES_PER_PIXEL;
        let start = y as usize * stride;
        &mut self.pixels[start..start + stride]
    }

    /// Convert to an `image::RgbaImage` for resampling.
    pub fn to_rgba_image(&self) -> Option<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// Take ownership of an `image::RgbaImage`.
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.into_raw(),
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL
    }

    fn byte_len(width: u32, height: u32) -> Result<usize, TransformError> {
        if width == 0 || height == 0 {
            return Err(TransformError::InvalidDimensions(format!(
                "buffer dimensions must be positive, got {width}x{height}"
            )));
        }
        (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(BYTES_PER_PIXEL))
            .ok_or(TransformError::AllocationFailure { width, height })
    }
}
