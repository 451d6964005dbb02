use crate::foundation::error::{OverlayError, OverlayResult};

/// Straight-alpha RGBA8 raster, row-major with a top-left origin.
///
/// The buffer length is always exactly `width * height * 4`; every constructor checks it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterRgba8 {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RasterRgba8 {
    /// Wrap an existing pixel buffer.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> OverlayResult<Self> {
        let expected = expected_len(width, height)?;
        if data.len() != expected {
            return Err(OverlayError::validation(format!(
                "raster buffer length {} does not match {width}x{height}x4 = {expected}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// A raster with every pixel set to `rgba`.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> OverlayResult<Self> {
        let expected = expected_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: rgba.repeat(expected / 4),
        })
    }

    /// A fully transparent raster.
    pub fn transparent(width: u32, height: u32) -> OverlayResult<Self> {
        Self::filled(width, height, [0, 0, 0, 0])
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Byte offset of pixel `(x, y)` in [`Self::data`].
    pub fn index_of(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * 4
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.index_of(x, y);
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) -> OverlayResult<()> {
        if x >= self.width || y >= self.height {
            return Err(OverlayError::validation(format!(
                "pixel ({x}, {y}) is outside {}x{} raster",
                self.width, self.height
            )));
        }
        let i = self.index_of(x, y);
        self.data[i..i + 4].copy_from_slice(&rgba);
        Ok(())
    }
}

fn expected_len(width: u32, height: u32) -> OverlayResult<usize> {
    if width == 0 || height == 0 {
        return Err(OverlayError::validation(format!(
            "raster dimensions must be > 0, got {width}x{height}"
        )));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| OverlayError::validation("raster buffer size overflow"))
}

#[cfg(test)]
#[path = "../../tests/unit/raster/buffer.rs"]
mod tests;
