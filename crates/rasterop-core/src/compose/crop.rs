//! Rectangular cropping.

use serde::{Deserialize, Serialize};

use crate::buffer::{PixelBuffer, BYTES_PER_PIXEL};
use crate::error::TransformError;

/// A crop rectangle in source pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Copy the addressed region into a new buffer.
///
/// The origin must lie within the source; an extent past the right or
/// bottom edge is truncated, so the output can be smaller than requested.
///
/// # Errors
///
/// `InvalidDimensions` for a zero-sized rectangle or an origin outside the
/// source bounds.
pub fn crop(source: &PixelBuffer, rect: CropRect) -> Result<PixelBuffer, TransformError> {
    if rect.width == 0 || rect.height == 0 {
        return Err(TransformError::InvalidDimensions(format!(
            "crop rectangle must be positive, got {}x{}",
            rect.width, rect.height
        )));
    }
    if rect.x >= source.width() || rect.y >= source.height() {
        return Err(TransformError::InvalidDimensions(format!(
            "crop origin ({}, {}) is outside the {}x{} source",
            rect.x,
            rect.y,
            source.width(),
            source.height()
        )));
    }

    let out_width = rect.width.min(source.width() - rect.x);
    let out_height = rect.height.min(source.height() - rect.y);

    let mut out = PixelBuffer::new(out_width, out_height)?;
    let start = rect.x as usize * BYTES_PER_PIXEL;
    let len = out_width as usize * BYTES_PER_PIXEL;
    for y in 0..out_height {
        let src_row = source.row(rect.y + y);
        out.row_mut(y).copy_from_slice(&src_row[start..start + len]);
    }
    Ok(out)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
