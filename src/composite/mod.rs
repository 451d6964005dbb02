//! Straight-alpha "over" compositing of a foreground raster onto a background raster.

pub(crate) mod over;
pub(crate) mod pixel;
