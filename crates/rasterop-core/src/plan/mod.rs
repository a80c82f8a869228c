//! Pure geometry planning for resize and zoom-crop.
//!
//! Planners compute target geometry only; no pixels move until the
//! compositor executes a plan.

mod resize;
mod zoom;

pub use resize::{plan_resize, ResizeMode, ResizePlan, ResizeRequest, SizeSpec};
pub use zoom::{plan_zoom_crop, ZoomCropPlan};
