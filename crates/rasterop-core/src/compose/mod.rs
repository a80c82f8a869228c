//! The compositor: executes geometry plans against pixel buffers.
//!
//! Every operation here either produces a freshly allocated buffer that
//! shares no storage with its source (`resample`, `crop`, `rotate`, the
//! high-level entry points) or mutates a destination in place (`fill`,
//! `merge`). Producing operations leave the source untouched on both the
//! success and failure paths.

mod blend;
mod crop;
mod resample;
mod rotate;

pub use blend::{fill, merge};
pub use crop::{crop, CropRect};
pub use resample::resample;
pub use rotate::{rotate, rotated_bounds};

use serde::{Deserialize, Serialize};

use crate::buffer::PixelBuffer;
use crate::color::ColorSpec;
use crate::error::TransformError;
use crate::plan::{plan_resize, plan_zoom_crop, ResizeRequest, SizeSpec};

/// Filter used when resampling pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterType {
    /// Nearest neighbor (fastest, lowest quality).
    Nearest,
    /// Bilinear (fast, blends partial-coverage edge pixels).
    #[default]
    Bilinear,
    /// Lanczos3 (slower, highest quality).
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub(crate) fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// Plan and execute a resize in one step.
pub fn resize(
    source: &PixelBuffer,
    request: &ResizeRequest,
    filter: FilterType,
) -> Result<PixelBuffer, TransformError> {
    let plan = plan_resize(source.width(), source.height(), request)?;
    resample(source, &plan, request.background, filter)
}

/// Resize and center-crop so the output exactly fills the target box with
/// no distortion, sacrificing overflow content at the edges.
pub fn zoom_crop(
    source: &PixelBuffer,
    target_width: u32,
    target_height: u32,
    background: ColorSpec,
    filter: FilterType,
) -> Result<PixelBuffer, TransformError> {
    let plan = plan_zoom_crop(
        source.width(),
        source.height(),
        target_width,
        target_height,
    )?;
    let request = ResizeRequest::force_exact(
        Some(SizeSpec::Px(plan.intermediate_width)),
        Some(SizeSpec::Px(plan.intermediate_height)),
    )
    .with_background(background);
    let intermediate = resize(source, &request, filter)?;
    crop(
        &intermediate,
        CropRect::new(plan.crop_x, plan.crop_y, target_width, target_height),
    )
}

/// Composite the image over an opaque background, discarding transparency.
pub fn flatten_background(
    source: &PixelBuffer,
    background: ColorSpec,
) -> Result<PixelBuffer, TransformError> {
    let bg = background.resolve()?;
    let mut canvas = PixelBuffer::filled(source.width(), source.height(), bg)?;
    merge(&mut canvas, source, 0, 0, None, None, FilterType::Bilinear)?;
    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    const RED: Color = Color::rgb(255, 0, 0);

    #[test]
    fn test_resize_entry_point() {
        let source = PixelBuffer::filled(800, 600, RED).unwrap();
        let request = ResizeRequest::bounded(Some(SizeSpec::Px(400)), None);
        let out = resize(&source, &request, FilterType::Bilinear).unwrap();
        assert_eq!((out.width(), out.height()), (400, 300));
    }

    #[test]
    fn test_zoom_crop_exact_output_size() {
        let source = PixelBuffer::filled(800, 600, RED).unwrap();
        let out = zoom_crop(&source, 300, 300, ColorSpec::default(), FilterType::Bilinear).unwrap();
        assert_eq!((out.width(), out.height()), (300, 300));
        assert_eq!(out.pixel(150, 150), RED);
    }

    #[test]
    fn test_zoom_crop_portrait_source() {
        let source = PixelBuffer::filled(600, 800, RED).unwrap();
        let out = zoom_crop(&source, 200, 100, ColorSpec::default(), FilterType::Bilinear).unwrap();
        assert_eq!((out.width(), out.height()), (200, 100));
    }

    #[test]
    fn test_zoom_crop_upscales_small_source() {
        let source = PixelBuffer::filled(50, 40, RED).unwrap();
        let out = zoom_crop(&source, 120, 120, ColorSpec::default(), FilterType::Bilinear).unwrap();
        assert_eq!((out.width(), out.height()), (120, 120));
    }

    #[test]
    fn test_flatten_background_removes_alpha() {
        let mut source = PixelBuffer::filled(4, 4, RED).unwrap();
        source.put_pixel(1, 1, Color::TRANSPARENT);
        source.put_pixel(2, 2, Color::rgba(0, 0, 255, 128));

        let out = flatten_background(&source, ColorSpec::Rgb(0xFFFFFF)).unwrap();
        assert_eq!(out.pixel(0, 0), RED);
        // Transparent pixel shows the background.
        assert_eq!(out.pixel(1, 1), Color::WHITE);
        // Half-transparent blue blends with white, ends opaque.
        let px = out.pixel(2, 2);
        assert_eq!(px.a, 255);
        assert!(px.r > 100 && px.b > 200, "got {px:?}");
    }
}
