//! Rasterop Core - raster image transform engine
//!
//! This crate provides the geometric core of the Rasterop library:
//! aspect-ratio-aware resize planning, zoom-crop, rectangular crops,
//! palette-to-truecolor normalization and alpha-aware compositing (fill,
//! merge, rotate) over owned RGBA pixel buffers.
//!
//! # Architecture
//!
//! Decoding and encoding live outside this crate: a codec hands over a
//! [`DecodedBuffer`], which is normalized once into a [`PixelBuffer`] at
//! ingestion. Planners ([`plan_resize`], [`plan_zoom_crop`]) turn a request
//! into pure geometry; the compositor executes that geometry, always
//! producing a fresh buffer the caller then owns. Every operation is a
//! synchronous CPU-bound transform with no shared state, so independent
//! buffers can be processed on separate threads without coordination.

pub mod buffer;
pub mod color;
pub mod compose;
pub mod error;
pub mod palette;
pub mod plan;

pub use buffer::PixelBuffer;
pub use color::{Color, ColorSpec};
pub use compose::{
    crop, fill, flatten_background, merge, resample, resize, rotate, rotated_bounds, zoom_crop,
    CropRect, FilterType,
};
pub use error::TransformError;
pub use palette::{DecodedBuffer, PaletteBuffer};
pub use plan::{
    plan_resize, plan_zoom_crop, ResizeMode, ResizePlan, ResizeRequest, SizeSpec, ZoomCropPlan,
};
