/// One pixel with channels scaled from `0..=255` to `0.0..=1.0`.
///
/// Alpha may exceed 1.0 once an opacity above 1.0 has been folded in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormalizedPixel {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl NormalizedPixel {
    pub const TRANSPARENT: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };
}

/// Read the RGBA8 pixel starting at byte `index` and normalize it, scaling alpha by `opacity`.
pub fn read_pixel(data: &[u8], index: usize, opacity: f64) -> NormalizedPixel {
    NormalizedPixel {
        r: f64::from(data[index]) / 255.0,
        g: f64::from(data[index + 1]) / 255.0,
        b: f64::from(data[index + 2]) / 255.0,
        a: f64::from(data[index + 3]) / 255.0 * opacity,
    }
}

/// Write `px` back as RGBA8 at byte `index`.
pub fn write_pixel(data: &mut [u8], index: usize, px: NormalizedPixel) {
    data[index] = denormalize_channel(px.r);
    data[index + 1] = denormalize_channel(px.g);
    data[index + 2] = denormalize_channel(px.b);
    data[index + 3] = denormalize_channel(px.a);
}

/// Scale to `0..=255`, round half away from zero and clamp. NaN maps to 0.
pub fn denormalize_channel(v: f64) -> u8 {
    let scaled = (v * 255.0).round();
    if scaled.is_nan() {
        return 0;
    }
    scaled.clamp(0.0, 255.0) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/composite/pixel.rs"]
mod tests;
