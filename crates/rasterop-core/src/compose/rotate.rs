//! Arbitrary-angle rotation with canvas expansion.
//!
//! Rotation uses inverse mapping: for each pixel of the expanded output
//! canvas, the source location that lands there is computed and sampled
//! bilinearly. Samples that fall outside the source resolve to the
//! requested background color, which may be the transparent sentinel, so
//! rotation never flattens per-pixel alpha. Exact quarter turns relocate
//! pixels directly without resampling.
//!
//! The inverse transform works in pixel-center coordinates (pixel (x, y)
//! occupies x + 0.5, y + 0.5); for rotation by angle θ:
//! ```text
//! src_x = (dst_x + 0.5 - cx) * cos(-θ) - (dst_y + 0.5 - cy) * sin(-θ) + src_cx - 0.5
//! src_y = (dst_x + 0.5 - cx) * sin(-θ) + (dst_y + 0.5 - cy) * cos(-θ) + src_cy - 0.5
//! ```

use crate::buffer::PixelBuffer;
use crate::color::{Color, ColorSpec};
use crate::error::TransformError;

/// Compute the bounding box of an image rotated by `angle_degrees`.
///
/// Angles are normalized, so 360, 450 or -90 behave as expected; exact
/// multiples of 90 take integer fast paths instead of accumulating float
/// rounding.
pub fn rotated_bounds(width: u32, height: u32, angle_degrees: f64) -> (u32, u32) {
    let angle_normalized = angle_degrees % 360.0;
    let abs_angle = angle_normalized.abs();

    if abs_angle < 0.001 || (360.0 - abs_angle) < 0.001 {
        return (width, height);
    }
    if (abs_angle - 90.0).abs() < 0.001 || (abs_angle - 270.0).abs() < 0.001 {
        return (height, width);
    }
    if (abs_angle - 180.0).abs() < 0.001 {
        return (width, height);
    }

    let angle_rad = angle_degrees.to_radians();
    let cos = angle_rad.cos().abs();
    let sin = angle_rad.sin().abs();

    let w = f64::from(width);
    let h = f64::from(height);

    // Bounding box of a rotated rectangle.
    let new_w = (w * cos + h * sin).round() as u32;
    let new_h = (w * sin + h * cos).round() as u32;

    (new_w.max(1), new_h.max(1))
}

/// Rotate a buffer about its center, expanding the canvas to avoid
/// clipping the corners.
///
/// Positive angles rotate counter-clockwise. Regions of the expanded
/// canvas the source does not cover take `background`; pass the
/// transparent sentinel to keep them clear.
///
/// # Errors
///
/// `InvalidDimensions` for a non-finite angle, `InvalidColorSpec` for a
/// bad background, `AllocationFailure` when the expanded canvas does not
/// fit in memory.
pub fn rotate(
    source: &PixelBuffer,
    angle_degrees: f64,
    background: ColorSpec,
) -> Result<PixelBuffer, TransformError> {
    if !angle_degrees.is_finite() {
        return Err(TransformError::InvalidDimensions(format!(
            "rotation angle must be finite, got {angle_degrees}"
        )));
    }
    let bg = background.resolve()?;

    // Quarter turns are lossless pixel relocations; routing them through
    // the interpolating path would bleed background into the edges.
    let turn = angle_degrees.rem_euclid(360.0);
    if turn < 0.001 || turn > 359.999 {
        return Ok(source.clone());
    }
    if (turn - 90.0).abs() < 0.001 {
        return rotate_quarter(source, 90);
    }
    if (turn - 180.0).abs() < 0.001 {
        return rotate_quarter(source, 180);
    }
    if (turn - 270.0).abs() < 0.001 {
        return rotate_quarter(source, 270);
    }

    let (src_w, src_h) = (f64::from(source.width()), f64::from(source.height()));
    let (dst_w, dst_h) = rotated_bounds(source.width(), source.height(), angle_degrees);

    // Negate so a positive angle rotates counter-clockwise visually.
    let angle_rad = -angle_degrees.to_radians();
    let cos = angle_rad.cos();
    let sin = angle_rad.sin();

    let src_cx = src_w / 2.0;
    let src_cy = src_h / 2.0;
    let dst_cx = f64::from(dst_w) / 2.0;
    let dst_cy = f64::from(dst_h) / 2.0;

    let mut output = PixelBuffer::new(dst_w, dst_h)?;

    for dst_y in 0..dst_h {
        for dst_x in 0..dst_w {
            let dx = f64::from(dst_x) + 0.5 - dst_cx;
            let dy = f64::from(dst_y) + 0.5 - dst_cy;

            let src_x = dx * cos - dy * sin + src_cx - 0.5;
            let src_y = dx * sin + dy * cos + src_cy - 0.5;

            output.put_pixel(dst_x, dst_y, sample_bilinear(source, src_x, src_y, bg));
        }
    }

    Ok(output)
}

/// Rotate by an exact multiple of 90 degrees counter-clockwise by
/// relocating pixels, so every source pixel survives unchanged.
fn rotate_quarter(source: &PixelBuffer, turn: u32) -> Result<PixelBuffer, TransformError> {
    let (w, h) = (source.width(), source.height());
    let (dst_w, dst_h) = if turn == 180 { (w, h) } else { (h, w) };

    let mut output = PixelBuffer::new(dst_w, dst_h)?;
    for dst_y in 0..dst_h {
        for dst_x in 0..dst_w {
            let (src_x, src_y) = match turn {
                90 => (dst_y, h - 1 - dst_x),
                180 => (w - 1 - dst_x, h - 1 - dst_y),
                _ => (w - 1 - dst_y, dst_x),
            };
            output.put_pixel(dst_x, dst_y, source.pixel(src_x, src_y));
        }
    }
    Ok(output)
}

/// Fetch a pixel, substituting the background outside the source.
#[inline]
fn pixel_or_bg(source: &PixelBuffer, x: i64, y: i64, bg: Color) -> [f64; 4] {
    let ch = if x >= 0 && y >= 0 && (x as u32) < source.width() && (y as u32) < source.height() {
        source.pixel(x as u32, y as u32).to_channels()
    } else {
        bg.to_channels()
    };
    [
        f64::from(ch[0]),
        f64::from(ch[1]),
        f64::from(ch[2]),
        f64::from(ch[3]),
    ]
}

/// Sample all four channels bilinearly; neighbors outside the source
/// contribute the background, which anti-aliases the content edge against
/// it.
fn sample_bilinear(source: &PixelBuffer, x: f64, y: f64, bg: Color) -> Color {
    let w = f64::from(source.width());
    let h = f64::from(source.height());

    // Wholly outside, beyond interpolation reach of the edge.
    if x < -1.0 || y < -1.0 || x > w || y > h {
        return bg;
    }

    let x0 = x.floor();
    let y0 = y.floor();
    let fx = x - x0;
    let fy = y - y0;
    let (x0, y0) = (x0 as i64, y0 as i64);

    let p00 = pixel_or_bg(source, x0, y0, bg);
    let p10 = pixel_or_bg(source, x0 + 1, y0, bg);
    let p01 = pixel_or_bg(source, x0, y0 + 1, bg);
    let p11 = pixel_or_bg(source, x0 + 1, y0 + 1, bg);

    let mut result = [0u8; 4];
    for i in 0..4 {
        let v = p00[i] * (1.0 - fx) * (1.0 - fy)
            + p10[i] * fx * (1.0 - fy)
            + p01[i] * (1.0 - fx) * fy
            + p11[i] * fx * fy;
        result[i] = v.clamp(0.0, 255.0).round() as u8;
    }

    Color::from_channels(result)
}
