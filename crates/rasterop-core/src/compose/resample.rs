//! Plan execution: canvas allocation, background fill and smooth blitting.

use crate::buffer::PixelBuffer;
use crate::color::ColorSpec;
use crate::error::TransformError;
use crate::plan::ResizePlan;

use super::blend::blend_over;
use super::FilterType;

/// Scale a buffer to exact dimensions using the `image` crate's
/// area-weighted filters. Identity dimensions short-circuit to a clone.
pub(crate) fn scale_content(
    source: &PixelBuffer,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<PixelBuffer, TransformError> {
    if source.width() == width && source.height() == height {
        return Ok(source.clone());
    }
    let img = source.to_rgba_image().ok_or_else(|| {
        TransformError::CorruptPixelData("pixel buffer does not form a valid RGBA image".to_string())
    })?;
    let scaled = image::imageops::resize(&img, width, height, filter.to_image_filter());
    Ok(PixelBuffer::from_rgba_image(scaled))
}

/// Execute a resize plan against a source buffer.
///
/// Allocates the canvas, fills it with the requested background (every
/// pixel fully transparent for the sentinel), resamples the source to the
/// plan's content size and places it at the plan's offsets. Placement is
/// clipped, so negative offsets and oversized content are legal.
///
/// Over a concrete background the content is "over"-composited; over the
/// transparent sentinel it is copied raw so the source's per-pixel alpha
/// survives in the output.
///
/// # Errors
///
/// `InvalidColorSpec` for a bad fill, `InvalidDimensions` for a degenerate
/// plan, `AllocationFailure` when the canvas does not fit in memory.
pub fn resample(
    source: &PixelBuffer,
    plan: &ResizePlan,
    fill: ColorSpec,
    filter: FilterType,
) -> Result<PixelBuffer, TransformError> {
    if plan.content_width == 0 || plan.content_height == 0 {
        return Err(TransformError::InvalidDimensions(format!(
            "plan content must be positive, got {}x{}",
            plan.content_width, plan.content_height
        )));
    }

    let background = fill.resolve()?;
    let mut canvas = PixelBuffer::filled(plan.canvas_width, plan.canvas_height, background)?;
    let content = scale_content(source, plan.content_width, plan.content_height, filter)?;

    let preserve_alpha = fill.is_transparent();
    for cy in 0..content.height() {
        let dy = i64::from(plan.offset_y) + i64::from(cy);
        if dy < 0 || dy >= i64::from(canvas.height()) {
            continue;
        }
        let dy = dy as u32;
        for cx in 0..content.width() {
            let dx = i64::from(plan.offset_x) + i64::from(cx);
            if dx < 0 || dx >= i64::from(canvas.width()) {
                continue;
            }
            let dx = dx as u32;
            let px = content.pixel(cx, cy);
            if preserve_alpha {
                canvas.put_pixel(dx, dy, px);
            } else {
                canvas.put_pixel(dx, dy, blend_over(canvas.pixel(dx, dy), px));
            }
        }
    }
    Ok(canvas)
}
