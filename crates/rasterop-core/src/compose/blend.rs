//! Alpha compositing: the "over" primitive, in-place fill and merge.

use crate::buffer::PixelBuffer;
use crate::color::{Color, ColorSpec};
use crate::error::TransformError;

use super::resample::scale_content;
use super::FilterType;

/// Composite `src` over `dst` with standard non-premultiplied "over" math.
///
/// `out_a = sa + da * (1 - sa)`; channels are weighted by their alphas and
/// renormalized. Integer arithmetic with rounding, clamped by construction.
pub(crate) fn blend_over(dst: Color, src: Color) -> Color {
    if src.a == 255 {
        return src;
    }
    if src.a == 0 {
        return dst;
    }

    let sa = u32::from(src.a);
    let da_scaled = u32::from(dst.a) * (255 - sa);
    // Both numerators carry a denominator of 255^2.
    let out_a_num = sa * 255 + da_scaled;

    let channel = |s: u8, d: u8| -> u8 {
        let num = u32::from(s) * sa * 255 + u32::from(d) * da_scaled;
        ((num + out_a_num / 2) / out_a_num) as u8
    };

    Color::rgba(
        channel(src.r, dst.r),
        channel(src.g, dst.g),
        channel(src.b, dst.b),
        ((out_a_num + 127) / 255) as u8,
    )
}

/// Paint a solid rectangle from `(x, y)` to the buffer's extent, in place.
///
/// Non-blended overwrite semantics: the color replaces every channel
/// including alpha, so filling with the transparent sentinel punches a
/// transparent hole. Origins outside the buffer paint nothing.
///
/// # Errors
///
/// `InvalidColorSpec` for an unparseable color.
pub fn fill(
    buffer: &mut PixelBuffer,
    color: ColorSpec,
    x: u32,
    y: u32,
) -> Result<(), TransformError> {
    let c = color.resolve()?;
    for yy in y..buffer.height() {
        for xx in x..buffer.width() {
            buffer.put_pixel(xx, yy, c);
        }
    }
    Ok(())
}

/// Alpha-blend `source` onto `dest` at `(x, y)`, in place.
///
/// When `width`/`height` are given and differ from the source dimensions,
/// the source is resampled to that size first. Blending respects both
/// buffers' alpha channels ("over" compositing); the overlay is clipped to
/// `dest`.
///
/// # Errors
///
/// `InvalidDimensions` for a zero overlay size; allocation and conversion
/// errors from the resampling path.
pub fn merge(
    dest: &mut PixelBuffer,
    source: &PixelBuffer,
    x: u32,
    y: u32,
    width: Option<u32>,
    height: Option<u32>,
    filter: FilterType,
) -> Result<(), TransformError> {
    let w = width.unwrap_or(source.width());
    let h = height.unwrap_or(source.height());
    if w == 0 || h == 0 {
        return Err(TransformError::InvalidDimensions(format!(
            "merge overlay must be positive, got {w}x{h}"
        )));
    }

    let scaled;
    let overlay = if (w, h) == (source.width(), source.height()) {
        source
    } else {
        scaled = scale_content(source, w, h, filter)?;
        &scaled
    };

    for sy in 0..h {
        let Some(dy) = y.checked_add(sy).filter(|&dy| dy < dest.height()) else {
            break;
        };
        for sx in 0..w {
            let Some(dx) = x.checked_add(sx).filter(|&dx| dx < dest.width()) else {
                break;
            };
            let blended = blend_over(dest.pixel(dx, dy), overlay.pixel(sx, sy));
            dest.put_pixel(dx, dy, blended);
        }
    }
    Ok(())
}
