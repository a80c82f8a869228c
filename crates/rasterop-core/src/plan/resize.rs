//! Resize planning: pure scale and aspect-ratio arithmetic.
//!
//! `plan_resize` maps (source dimensions, request) to a [`ResizePlan`]
//! without touching pixels. The compositor executes the plan. All mode
//! semantics live here, as an explicit enum rather than interacting boolean
//! flags, so each mode is independently testable.

use serde::{Deserialize, Serialize};

use crate::color::ColorSpec;
use crate::error::TransformError;

/// How a resize request maps the source into the target box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResizeMode {
    /// Shrink-only fit: the image is never enlarged, and the resampled
    /// content fits within the requested box on both axes. The larger
    /// source/target ratio among the supplied axes binds the scale.
    #[default]
    Bounded,
    /// Supplied axes are taken verbatim as the content size, stretching the
    /// image; an absent axis is derived from the other's scale.
    ForceExact,
    /// Aspect-preserving scale that may enlarge. With both axes supplied,
    /// the larger per-axis scale binds and the canvas keeps the literal
    /// target size, letterboxing the other axis.
    RescaleEnlarge,
    /// Shrink-only scale as in `Bounded`, but the canvas is tightened to
    /// the resampled content instead of the requested box.
    CropToFill,
}

/// One axis of a resize request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SizeSpec {
    /// Absolute size in pixels.
    Px(u32),
    /// Percentage of the source dimension. When the other axis is absent,
    /// the same percentage applies to both axes.
    Percent(f64),
}

/// A resize request as supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResizeRequest {
    pub width: Option<SizeSpec>,
    pub height: Option<SizeSpec>,
    pub mode: ResizeMode,
    /// Background for canvas areas the content does not cover.
    pub background: ColorSpec,
}

impl ResizeRequest {
    fn with_mode(width: Option<SizeSpec>, height: Option<SizeSpec>, mode: ResizeMode) -> Self {
        Self {
            width,
            height,
            mode,
            background: ColorSpec::default(),
        }
    }

    /// Shrink-only resize fitting within the given box.
    pub fn bounded(width: Option<SizeSpec>, height: Option<SizeSpec>) -> Self {
        Self::with_mode(width, height, ResizeMode::Bounded)
    }

    /// Resize to exactly the given dimensions, stretching if needed.
    pub fn force_exact(width: Option<SizeSpec>, height: Option<SizeSpec>) -> Self {
        Self::with_mode(width, height, ResizeMode::ForceExact)
    }

    /// Aspect-preserving resize that may enlarge.
    pub fn rescale(width: Option<SizeSpec>, height: Option<SizeSpec>) -> Self {
        Self::with_mode(width, height, ResizeMode::RescaleEnlarge)
    }

    /// Shrink-only resize with the canvas tightened to the content.
    pub fn crop_to_fill(width: Option<SizeSpec>, height: Option<SizeSpec>) -> Self {
        Self::with_mode(width, height, ResizeMode::CropToFill)
    }

    pub fn with_background(mut self, background: ColorSpec) -> Self {
        self.background = background;
        self
    }
}

/// The geometry a resize resolves to.
///
/// `canvas_*` is the size of the buffer to allocate; `content_*` the size
/// the resampled source occupies inside it; the offsets center the content
/// and are signed because clipped placements are legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResizePlan {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub content_width: u32,
    pub content_height: u32,
    pub offset_x: i32,
    pub offset_y: i32,
}

/// Compute the canvas/content geometry for a resize request.
///
/// # Errors
///
/// `InvalidDimensions` for zero source dimensions or zero/negative/
/// non-finite requested sizes; `UnderspecifiedResize` when neither axis is
/// given.
pub fn plan_resize(
    source_width: u32,
    source_height: u32,
    request: &ResizeRequest,
) -> Result<ResizePlan, TransformError> {
    if source_width == 0 || source_height == 0 {
        return Err(TransformError::InvalidDimensions(format!(
            "source dimensions must be positive, got {source_width}x{source_height}"
        )));
    }
    if request.width.is_none() && request.height.is_none() {
        return Err(TransformError::UnderspecifiedResize);
    }

    let (target_w, target_h) = resolve_targets(source_width, source_height, request)?;

    let sw = f64::from(source_width);
    let sh = f64::from(source_height);

    // Source-pixels-per-target-pixel. Larger scale means smaller content.
    let mut scale = 1.0f64;
    match request.mode {
        ResizeMode::Bounded | ResizeMode::CropToFill => {
            if let Some(w) = target_w {
                if source_width > w {
                    scale = sw / f64::from(w);
                }
            }
            if let Some(h) = target_h {
                let s = sh / f64::from(h);
                if source_height > h && s > scale {
                    scale = s;
                }
            }
        }
        ResizeMode::ForceExact | ResizeMode::RescaleEnlarge => {
            let rescale = request.mode == ResizeMode::RescaleEnlarge;
            if let Some(w) = target_w {
                scale = sw / f64::from(w);
            }
            if let Some(h) = target_h {
                let s = sh / f64::from(h);
                scale = if target_w.is_some() && rescale {
                    scale.max(s)
                } else {
                    s
                };
            }
        }
    }

    // Forced axes are taken verbatim; everything else derives from scale.
    let force = request.mode == ResizeMode::ForceExact;
    let content_width = match target_w {
        Some(w) if force => w,
        _ => ((sw / scale).round() as u32).max(1),
    };
    let content_height = match target_h {
        Some(h) if force => h,
        _ => ((sh / scale).round() as u32).max(1),
    };

    // An absent axis auto-fits to the content; CropToFill tightens both.
    let tighten = request.mode == ResizeMode::CropToFill;
    let canvas_width = if tighten {
        content_width
    } else {
        target_w.unwrap_or(content_width)
    };
    let canvas_height = if tighten {
        content_height
    } else {
        target_h.unwrap_or(content_height)
    };

    let offset_x = ((i64::from(canvas_width) - i64::from(content_width)) / 2) as i32;
    let offset_y = ((i64::from(canvas_height) - i64::from(content_height)) / 2) as i32;

    Ok(ResizePlan {
        canvas_width,
        canvas_height,
        content_width,
        content_height,
        offset_x,
        offset_y,
    })
}

/// Resolve both axes to absolute pixel targets, applying a lone percentage
/// to both axes.
fn resolve_targets(
    source_width: u32,
    source_height: u32,
    request: &ResizeRequest,
) -> Result<(Option<u32>, Option<u32>), TransformError> {
    let mut target_w = resolve_axis(request.width, source_width)?;
    let mut target_h = resolve_axis(request.height, source_height)?;

    if target_h.is_none() {
        if let Some(SizeSpec::Percent(p)) = request.width {
            target_h = Some(apply_percent(source_height, p));
        }
    }
    if target_w.is_none() {
        if let Some(SizeSpec::Percent(p)) = request.height {
            target_w = Some(apply_percent(source_width, p));
        }
    }

    Ok((target_w, target_h))
}

fn resolve_axis(spec: Option<SizeSpec>, source: u32) -> Result<Option<u32>, TransformError> {
    match spec {
        None => Ok(None),
        Some(SizeSpec::Px(0)) => Err(TransformError::InvalidDimensions(
            "requested size must be positive, got 0".to_string(),
        )),
        Some(SizeSpec::Px(n)) => Ok(Some(n)),
        Some(SizeSpec::Percent(p)) => {
            if !p.is_finite() || p <= 0.0 {
                return Err(TransformError::InvalidDimensions(format!(
                    "requested percentage must be positive and finite, got {p}"
                )));
            }
            Ok(Some(apply_percent(source, p)))
        }
    }
}

fn apply_percent(source: u32, percent: f64) -> u32 {
    ((f64::from(source) * percent / 100.0).round() as u32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn px(n: u32) -> Option<SizeSpec> {
        Some(SizeSpec::Px(n))
    }

    #[test]
    fn test_bounded_single_axis() {
        // 800x600 at width 400: scale 2.0, aspect preserved.
        let plan = plan_resize(800, 600, &ResizeRequest::bounded(px(400), None)).unwrap();
        assert_eq!(plan.canvas_width, 400);
        assert_eq!(plan.canvas_height, 300);
        assert_eq!(plan.content_width, 400);
        assert_eq!(plan.content_height, 300);
        assert_eq!((plan.offset_x, plan.offset_y), (0, 0));
    }

    #[test]
    fn test_bounded_larger_axis_binds() {
        // Width ratio 2.0 beats height ratio 1.5; content letterboxed.
        let plan = plan_resize(800, 600, &ResizeRequest::bounded(px(400), px(400))).unwrap();
        assert_eq!((plan.canvas_width, plan.canvas_height), (400, 400));
        assert_eq!((plan.content_width, plan.content_height), (400, 300));
        assert_eq!((plan.offset_x, plan.offset_y), (0, 50));
    }

    #[test]
    fn test_bounded_never_enlarges() {
        let plan = plan_resize(100, 50, &ResizeRequest::bounded(px(400), px(300))).unwrap();
        // Content keeps the source size, centered in the requested canvas.
        assert_eq!((plan.content_width, plan.content_height), (100, 50));
        assert_eq!((plan.canvas_width, plan.canvas_height), (400, 300));
        assert_eq!((plan.offset_x, plan.offset_y), (150, 125));
    }

    #[test]
    fn test_force_exact_both_axes() {
        let plan = plan_resize(800, 600, &ResizeRequest::force_exact(px(200), px(300))).unwrap();
        assert_eq!((plan.content_width, plan.content_height), (200, 300));
        assert_eq!((plan.canvas_width, plan.canvas_height), (200, 300));
        assert_eq!((plan.offset_x, plan.offset_y), (0, 0));
    }

    #[test]
    fn test_force_exact_single_axis_preserves_aspect() {
        let plan = plan_resize(800, 600, &ResizeRequest::force_exact(px(400), None)).unwrap();
        assert_eq!((plan.content_width, plan.content_height), (400, 300));
        assert_eq!((plan.canvas_width, plan.canvas_height), (400, 300));
    }

    #[test]
    fn test_rescale_enlarges() {
        let plan = plan_resize(800, 600, &ResizeRequest::rescale(px(1600), None)).unwrap();
        assert_eq!((plan.content_width, plan.content_height), (1600, 1200));
        assert_eq!((plan.canvas_width, plan.canvas_height), (1600, 1200));
    }

    #[test]
    fn test_rescale_both_axes_larger_scale_binds() {
        let plan = plan_resize(800, 600, &ResizeRequest::rescale(px(400), px(400))).unwrap();
        // Width scale 2.0 binds; height letterboxed within the 400 canvas.
        assert_eq!((plan.content_width, plan.content_height), (400, 300));
        assert_eq!((plan.canvas_width, plan.canvas_height), (400, 400));
        assert_eq!((plan.offset_x, plan.offset_y), (0, 50));
    }

    #[test]
    fn test_crop_to_fill_tightens_canvas() {
        let plan = plan_resize(800, 600, &ResizeRequest::crop_to_fill(px(400), px(400))).unwrap();
        assert_eq!((plan.content_width, plan.content_height), (400, 300));
        assert_eq!((plan.canvas_width, plan.canvas_height), (400, 300));
        assert_eq!((plan.offset_x, plan.offset_y), (0, 0));
    }

    #[test]
    fn test_percent_applies_to_both_axes() {
        let request = ResizeRequest::bounded(Some(SizeSpec::Percent(50.0)), None);
        let plan = plan_resize(800, 600, &request).unwrap();
        assert_eq!((plan.canvas_width, plan.canvas_height), (400, 300));
        assert_eq!((plan.content_width, plan.content_height), (400, 300));
    }

    #[test]
    fn test_percent_on_height_axis() {
        let request = ResizeRequest::bounded(None, Some(SizeSpec::Percent(25.0)));
        let plan = plan_resize(800, 600, &request).unwrap();
        assert_eq!((plan.canvas_width, plan.canvas_height), (200, 150));
    }

    #[test]
    fn test_underspecified_request() {
        let request = ResizeRequest::bounded(None, None);
        assert!(matches!(
            plan_resize(800, 600, &request),
            Err(TransformError::UnderspecifiedResize)
        ));
    }

    #[test]
    fn test_zero_target_rejected() {
        let request = ResizeRequest::bounded(px(0), None);
        assert!(matches!(
            plan_resize(800, 600, &request),
            Err(TransformError::InvalidDimensions(_))
        ));
    }

    #[test]
    fn test_bad_percent_rejected() {
        for p in [0.0, -10.0, f64::NAN, f64::INFINITY] {
            let request = ResizeRequest::bounded(Some(SizeSpec::Percent(p)), None);
            assert!(
                matches!(
                    plan_resize(800, 600, &request),
                    Err(TransformError::InvalidDimensions(_))
                ),
                "percentage {p} should be rejected"
            );
        }
    }

    #[test]
    fn test_zero_source_rejected() {
        let request = ResizeRequest::bounded(px(100), None);
        assert!(matches!(
            plan_resize(0, 600, &request),
            Err(TransformError::InvalidDimensions(_))
        ));
    }

    #[test]
    fn test_extreme_aspect_keeps_min_dimension() {
        // 1000x1 strip shrunk hard: the thin axis must not round to zero.
        let plan = plan_resize(1000, 1, &ResizeRequest::bounded(px(10), None)).unwrap();
        assert_eq!(plan.content_width, 10);
        assert_eq!(plan.content_height, 1);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
