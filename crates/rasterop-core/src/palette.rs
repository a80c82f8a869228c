//! Palette-indexed buffers and truecolor normalization.
//!
//! External codecs hand over either a direct RGBA buffer or a
//! palette-indexed one. Normalization runs once, at ingestion time, before
//! any geometric transform: it converts indexed storage to direct RGBA and
//! migrates the palette's single transparent index (a property of 8-bit
//! palette formats) into true per-pixel alpha.

use crate::buffer::PixelBuffer;
use crate::color::Color;
use crate::error::TransformError;

/// A palette-indexed image as produced by an external decoder.
#[derive(Debug, Clone)]
pub struct PaletteBuffer {
    width: u32,
    height: u32,
    /// One palette index per pixel, row-major.
    indices: Vec<u8>,
    /// Up to 256 opaque palette entries.
    palette: Vec<Color>,
    /// The palette index rendered as fully transparent, if any.
    transparent: Option<u8>,
}

impl PaletteBuffer {
    /// Build a palette buffer, validating the index data against the
    /// palette.
    ///
    /// `transparent_indices` carries the indices the decoder marked
    /// transparent. 8-bit palette formats can designate at most one; more
    /// than one fails with `UnsupportedPaletteTransparency`.
    ///
    /// # Errors
    ///
    /// `InvalidDimensions` for zero dimensions, `CorruptPixelData` when the
    /// index data length does not match the dimensions or an index points
    /// outside the palette.
    pub fn new(
        width: u32,
        height: u32,
        indices: Vec<u8>,
        palette: Vec<Color>,
        transparent_indices: &[u8],
    ) -> Result<Self, TransformError> {
        if width == 0 || height == 0 {
            return Err(TransformError::InvalidDimensions(format!(
                "palette buffer dimensions must be positive, got {width}x{height}"
            )));
        }
        let expected = width as usize * height as usize;
        if indices.len() != expected {
            return Err(TransformError::CorruptPixelData(format!(
                "expected {} palette indices for {}x{}, got {}",
                expected,
                width,
                height,
                indices.len()
            )));
        }
        if transparent_indices.len() > 1 {
            return Err(TransformError::UnsupportedPaletteTransparency(
                transparent_indices.len(),
            ));
        }
        if let Some(bad) = indices.iter().find(|&&i| usize::from(i) >= palette.len()) {
            return Err(TransformError::CorruptPixelData(format!(
                "palette index {} out of range for a {}-entry palette",
                bad,
                palette.len()
            )));
        }
        Ok(Self {
            width,
            height,
            indices,
            palette,
            transparent: transparent_indices.first().copied(),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The single transparent palette index, if one was declared.
    pub fn transparent_index(&self) -> Option<u8> {
        self.transparent
    }

    /// Resolve every pixel into a direct RGBA buffer.
    ///
    /// Pixels of the transparent index come out as [`Color::TRANSPARENT`]
    /// (alpha 0, black don't-care RGB); all others keep their palette color
    /// at full opacity. Single O(width * height) pass.
    pub fn into_truecolor(self) -> Result<PixelBuffer, TransformError> {
        let mut out = PixelBuffer::new(self.width, self.height)?;
        for y in 0..self.height {
            let row_start = y as usize * self.width as usize;
            for x in 0..self.width {
                let idx = self.indices[row_start + x as usize];
                let color = if self.transparent == Some(idx) {
                    Color::TRANSPARENT
                } else {
                    let c = self.palette[usize::from(idx)];
                    Color::rgb(c.r, c.g, c.b)
                };
                out.put_pixel(x, y, color);
            }
        }
        Ok(out)
    }
}

/// A decoded image as handed over by an external codec.
#[derive(Debug, Clone)]
pub enum DecodedBuffer {
    /// Already direct RGBA; normalization is the identity.
    TrueColor(PixelBuffer),
    /// Palette-indexed; normalization resolves every pixel.
    Indexed(PaletteBuffer),
}

impl DecodedBuffer {
    /// Normalize to a direct RGBA buffer.
    ///
    /// Idempotent: an already-direct buffer is returned unchanged.
    pub fn into_truecolor(self) -> Result<PixelBuffer, TransformError> {
        match self {
            DecodedBuffer::TrueColor(buffer) => Ok(buffer),
            DecodedBuffer::Indexed(palette) => palette.into_truecolor(),
        }
    }
}
