//! Time-window selection on a 1D time coordinate.

use equimap_types::constants::TIME_WINDOW_EPSILON;
use equimap_types::error::{EquimapError, EquimapResult};
use equimap_types::state::RawSeries;

/// Locate the inclusive index range of samples within
/// `[slice - halfwidth - ε, slice + halfwidth + ε]`.
///
/// The scan runs in index order: the first finite sample at or above the
/// lower bound opens the window; with `halfwidth == 0` it also closes it.
/// Otherwise the first finite sample strictly above the upper bound closes
/// the window at the previous index. Non-finite samples neither open nor
/// close the window and do not invalidate adjacent good samples.
///
/// Fails with `TimeNotLocated` when no opening or no closing index exists,
/// an entirely non-finite time axis included. This is reported, never
/// silently defaulted.
pub fn select_time_window(
    time: &[f64],
    slice: f64,
    halfwidth: f64,
) -> EquimapResult<(usize, usize)> {
    let eps = TIME_WINDOW_EPSILON;
    let mut target1: Option<usize> = None;
    let mut target2: Option<usize> = None;

    for (j, &t) in time.iter().enumerate() {
        if target1.is_none() {
            if t.is_finite() && t >= slice - halfwidth - eps {
                target1 = Some(j);
                if halfwidth <= f64::EPSILON {
                    target2 = Some(j);
                    break;
                }
            }
            continue;
        }
        if t.is_finite() && t > slice + halfwidth + eps {
            target2 = Some(j - 1);
            break;
        }
    }

    match (target1, target2) {
        (Some(i0), Some(i1)) => Ok((i0, i1)),
        _ => Err(EquimapError::TimeNotLocated { slice }),
    }
}

/// Window selection against a resolved series' own time axis.
pub fn select_series_window(
    series: &RawSeries,
    slice: f64,
    halfwidth: f64,
) -> EquimapResult<(usize, usize)> {
    select_time_window(series.time_coord(), slice, halfwidth)
}
