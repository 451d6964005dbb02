/// Background-space coordinate of the foreground's top-left pixel.
///
/// Either axis may be negative or beyond the background bounds; the compositor clips.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Placement {
    pub x: i64,
    pub y: i64,
}

impl Placement {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Clipped intersection of the background canvas and the translated foreground,
/// in background coordinates. `x1`/`y1` are exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OverlapRect {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl OverlapRect {
    pub fn width(self) -> u32 {
        self.x1 - self.x0
    }

    pub fn height(self) -> u32 {
        self.y1 - self.y0
    }

    pub fn area(self) -> u64 {
        u64::from(self.width()) * u64::from(self.height())
    }

    pub fn contains(self, x: u32, y: u32) -> bool {
        self.x0 <= x && x < self.x1 && self.y0 <= y && y < self.y1
    }
}

/// Compute where a `fg_w`x`fg_h` foreground placed at `placement` overlaps a `bg_w`x`bg_h`
/// background. Returns `None` when the intersection has zero area.
pub fn overlap_rect(
    bg_w: u32,
    bg_h: u32,
    fg_w: u32,
    fg_h: u32,
    placement: Placement,
) -> Option<OverlapRect> {
    let x_start = placement.x.max(0);
    let y_start = placement.y.max(0);
    let x_end = i64::from(bg_w).min(placement.x.saturating_add(i64::from(fg_w)));
    let y_end = i64::from(bg_h).min(placement.y.saturating_add(i64::from(fg_h)));

    if x_start >= x_end || y_start >= y_end {
        return None;
    }

    // Bounded by [0, bg_w] / [0, bg_h] at this point.
    Some(OverlapRect {
        x0: x_start as u32,
        y0: y_start as u32,
        x1: x_end as u32,
        y1: y_end as u32,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
