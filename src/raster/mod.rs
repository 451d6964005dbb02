//! Validated RGBA8 raster buffers.

pub(crate) mod buffer;
