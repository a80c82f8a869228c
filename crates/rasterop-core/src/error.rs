//! Error types for raster transform operations.

use thiserror::Error;

/// Errors produced by planning and compositing operations.
///
/// Variants separate bad input parameters (`InvalidColorSpec`,
/// `InvalidDimensions`, `UnderspecifiedResize`) from bad pixel data
/// (`CorruptPixelData`, `UnsupportedPaletteTransparency`) and from
/// resource exhaustion (`AllocationFailure`), so callers can decide
/// whether retrying with different parameters makes sense.
///
/// All failures are deterministic input-validation failures surfaced
/// synchronously; nothing is retried internally, and a failed operation
/// leaves its input buffer untouched.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A packed color value outside the 24-bit `0xRRGGBB` range.
    #[error("invalid color spec: {0:#08x} is outside the 24-bit RGB range")]
    InvalidColorSpec(u32),

    /// A zero, negative or non-finite requested size.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// A resize request with neither width nor height.
    #[error("underspecified resize: neither width nor height was given")]
    UnderspecifiedResize,

    /// A palette declaring more than one transparent index. 8-bit palette
    /// formats can only mark one; this is a defensive fatal check.
    #[error("unsupported palette transparency: {0} indices marked transparent")]
    UnsupportedPaletteTransparency(usize),

    /// The pixel buffer would not fit in memory.
    #[error("allocation failure: cannot allocate a {width}x{height} buffer")]
    AllocationFailure { width: u32, height: u32 },

    /// Supplied pixel data inconsistent with its declared dimensions or
    /// palette.
    #[error("corrupt pixel data: {0}")]
    CorruptPixelData(String),
}
