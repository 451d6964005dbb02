//! Straight-alpha RGBA8 compositing.
//!
//! [`composite`] places a foreground [`RasterRgba8`] over a background raster at an integer
//! [`Placement`], scaling foreground alpha by an opacity factor and blending with the
//! Porter-Duff "over" operator. The background is mutated in place; only pixels inside the
//! clipped overlap rectangle change.
//!
//! [`composite_with_opts`] runs the same blend with the overlap rows split across a rayon pool
//! and reports [`CompositeStats`]. [`CompositeJob`] is the JSON form used by the `overlay` CLI.
#![forbid(unsafe_code)]

mod composite;
mod foundation;
mod raster;

pub mod job;

pub use composite::over::{CompositeOpts, CompositeStats, composite, composite_with_opts, over};
pub use composite::pixel::{NormalizedPixel, denormalize_channel, read_pixel, write_pixel};
pub use foundation::core::{OverlapRect, Placement, overlap_rect};
pub use foundation::error::{OverlayError, OverlayResult};
pub use job::CompositeJob;
pub use raster::buffer::RasterRgba8;
