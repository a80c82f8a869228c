//! Zoom-crop planning: fill an exact target box with no distortion.
//!
//! A zoom-crop resizes the source just far enough that it covers the target
//! box on both axes, then crops the overflow symmetrically. The final image
//! always equals the requested dimensions; content is lost at the
//! overflowing edges instead of being padded or stretched.

use serde::{Deserialize, Serialize};

use crate::error::TransformError;

/// The two-step geometry of a zoom-crop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoomCropPlan {
    /// Oversized intermediate resize target; matches the requested box on
    /// one axis and overflows on the other.
    pub intermediate_width: u32,
    pub intermediate_height: u32,
    /// Top-left corner of the centered crop within the intermediate image.
    pub crop_x: u32,
    pub crop_y: u32,
}

/// Derive the intermediate resize and centered crop for a zoom-crop.
///
/// If the source is relatively wider than the target box, the intermediate
/// fixes the height and overflows on width; otherwise it fixes the width
/// and overflows on height.
///
/// # Errors
///
/// `InvalidDimensions` when the source or target dimensions are zero.
pub fn plan_zoom_crop(
    source_width: u32,
    source_height: u32,
    target_width: u32,
    target_height: u32,
) -> Result<ZoomCropPlan, TransformError> {
    if source_width == 0 || source_height == 0 {
        return Err(TransformError::InvalidDimensions(format!(
            "source dimensions must be positive, got {source_width}x{source_height}"
        )));
    }
    if target_width == 0 || target_height == 0 {
        return Err(TransformError::InvalidDimensions(format!(
            "zoom-crop target must be positive, got {target_width}x{target_height}"
        )));
    }

    let source_ratio = f64::from(source_width) / f64::from(source_height);
    let target_ratio = f64::from(target_width) / f64::from(target_height);

    // The rounded derived axis is clamped up to the target so the centered
    // crop always fits.
    let (intermediate_width, intermediate_height) = if source_ratio > target_ratio {
        let w = (f64::from(target_height) * source_ratio).round() as u32;
        (w.max(target_width), target_height)
    } else {
        let h = (f64::from(target_width) / source_ratio).round() as u32;
        (target_width, h.max(target_height))
    };

    Ok(ZoomCropPlan {
        intermediate_width,
        intermediate_height,
        crop_x: (intermediate_width - target_width) / 2,
        crop_y: (intermediate_height - target_height) / 2,
    })
}


// ============================================================================
// Property-Based Tests
// ============================================================================
