use rayon::prelude::*;

use crate::composite::pixel::{NormalizedPixel, read_pixel, write_pixel};
use crate::foundation::core::{OverlapRect, Placement, overlap_rect};
use crate::foundation::error::{OverlayError, OverlayResult};
use crate::raster::buffer::RasterRgba8;

/// Threading options for [`composite_with_opts`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompositeOpts {
    /// Split the overlap rows across a rayon pool when `true`.
    pub parallel: bool,
    /// Optional explicit worker thread count (parallel mode only).
    pub threads: Option<usize>,
}

/// Per-call pixel counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CompositeStats {
    /// Pixels written with the blended colour.
    pub pixels_blended: u64,
    /// Pixels zeroed because the combined alpha was not positive.
    pub pixels_cleared: u64,
}

impl CompositeStats {
    pub fn pixels_written(self) -> u64 {
        self.pixels_blended + self.pixels_cleared
    }

    fn merge(self, other: Self) -> Self {
        Self {
            pixels_blended: self.pixels_blended + other.pixels_blended,
            pixels_cleared: self.pixels_cleared + other.pixels_cleared,
        }
    }
}

/// Composite `foreground` over `background` in place.
///
/// `opacity` scales the foreground alpha; `placement` is where the foreground's top-left pixel
/// lands in background space. Missing rasters, a non-positive opacity, or a placement with no
/// overlap leave `background` untouched. Only pixels inside the overlap rectangle are written.
/// A NaN opacity is not filtered out; it makes every blended alpha NaN, so the overlap is
/// cleared to transparent black.
#[tracing::instrument(skip(background, foreground))]
pub fn composite(
    background: Option<&mut RasterRgba8>,
    foreground: Option<&RasterRgba8>,
    opacity: f64,
    placement: Placement,
) {
    let Some((bg, fg, rect)) = prepare(background, foreground, opacity, placement) else {
        return;
    };
    let stats = composite_rows_serial(bg, fg, opacity, placement, rect);
    tracing::debug!(?rect, ?stats, "composite done");
}

/// Same as [`composite`], with optional row-parallel execution and pixel counters.
///
/// Serial and parallel runs produce identical bytes. Fails only on invalid `opts`.
#[tracing::instrument(skip(background, foreground))]
pub fn composite_with_opts(
    background: Option<&mut RasterRgba8>,
    foreground: Option<&RasterRgba8>,
    opacity: f64,
    placement: Placement,
    opts: &CompositeOpts,
) -> OverlayResult<CompositeStats> {
    if let Some(n) = opts.threads
        && n == 0
    {
        return Err(OverlayError::validation(
            "composite 'threads' must be >= 1 when set",
        ));
    }

    let Some((bg, fg, rect)) = prepare(background, foreground, opacity, placement) else {
        return Ok(CompositeStats::default());
    };

    let stats = if opts.parallel {
        let pool = build_thread_pool(opts.threads)?;
        pool.install(|| composite_rows_parallel(bg, fg, opacity, placement, rect))
    } else {
        composite_rows_serial(bg, fg, opacity, placement, rect)
    };
    tracing::debug!(?rect, ?stats, parallel = opts.parallel, "composite done");
    Ok(stats)
}

/// Porter-Duff "over": `src` on top of `dst`, both straight alpha.
///
/// Returns `None` when the combined alpha is not positive (or NaN); callers write a
/// transparent pixel.
pub fn over(dst: NormalizedPixel, src: NormalizedPixel) -> Option<NormalizedPixel> {
    let inv = 1.0 - src.a;
    let out_a = src.a + dst.a * inv;
    if out_a.is_nan() || out_a <= 0.0 {
        return None;
    }

    let channel = |s: f64, d: f64| (s * src.a + d * dst.a * inv) / out_a;
    Some(NormalizedPixel {
        r: channel(src.r, dst.r),
        g: channel(src.g, dst.g),
        b: channel(src.b, dst.b),
        a: out_a,
    })
}

fn prepare<'a, 'b>(
    background: Option<&'a mut RasterRgba8>,
    foreground: Option<&'b RasterRgba8>,
    opacity: f64,
    placement: Placement,
) -> Option<(&'a mut RasterRgba8, &'b RasterRgba8, OverlapRect)> {
    let (Some(bg), Some(fg)) = (background, foreground) else {
        tracing::debug!("missing raster, nothing to composite");
        return None;
    };
    if opacity <= 0.0 {
        tracing::debug!(opacity, "non-positive opacity, nothing to composite");
        return None;
    }
    let Some(rect) = overlap_rect(bg.width(), bg.height(), fg.width(), fg.height(), placement)
    else {
        tracing::debug!("foreground does not overlap background");
        return None;
    };
    Some((bg, fg, rect))
}

fn composite_rows_serial(
    bg: &mut RasterRgba8,
    fg: &RasterRgba8,
    opacity: f64,
    placement: Placement,
    rect: OverlapRect,
) -> CompositeStats {
    let row_bytes = (bg.width() as usize) * 4;
    bg.data_mut()
        .chunks_exact_mut(row_bytes)
        .skip(rect.y0 as usize)
        .take(rect.height() as usize)
        .enumerate()
        .fold(CompositeStats::default(), |acc, (i, row)| {
            let y = rect.y0 + i as u32;
            acc.merge(blend_row(row, y, fg, opacity, placement, rect))
        })
}

fn composite_rows_parallel(
    bg: &mut RasterRgba8,
    fg: &RasterRgba8,
    opacity: f64,
    placement: Placement,
    rect: OverlapRect,
) -> CompositeStats {
    let row_bytes = (bg.width() as usize) * 4;
    bg.data_mut()
        .par_chunks_exact_mut(row_bytes)
        .skip(rect.y0 as usize)
        .take(rect.height() as usize)
        .enumerate()
        .map(|(i, row)| {
            let y = rect.y0 + i as u32;
            blend_row(row, y, fg, opacity, placement, rect)
        })
        .reduce(CompositeStats::default, CompositeStats::merge)
}

// `row` is background row `y`; only columns inside `rect` are touched.
fn blend_row(
    row: &mut [u8],
    y: u32,
    fg: &RasterRgba8,
    opacity: f64,
    placement: Placement,
    rect: OverlapRect,
) -> CompositeStats {
    let fy = (i64::from(y) - placement.y) as u32;
    let fg_data = fg.data();
    let mut stats = CompositeStats::default();

    for x in rect.x0..rect.x1 {
        let fx = (i64::from(x) - placement.x) as u32;
        let bg_idx = (x as usize) * 4;
        let fg_idx = fg.index_of(fx, fy);

        let src = read_pixel(fg_data, fg_idx, opacity);
        let dst = read_pixel(row, bg_idx, 1.0);
        match over(dst, src) {
            Some(out) => {
                write_pixel(row, bg_idx, out);
                stats.pixels_blended += 1;
            }
            None => {
                write_pixel(row, bg_idx, NormalizedPixel::TRANSPARENT);
                stats.pixels_cleared += 1;
            }
        }
    }
    stats
}

fn build_thread_pool(threads: Option<usize>) -> OverlayResult<rayon::ThreadPool> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder.build().map_err(|e| {
        OverlayError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}"))
    })
}

#[cfg(test)]
#[path = "../../tests/unit/composite/over.rs"]
mod tests;
