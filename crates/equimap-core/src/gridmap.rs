//! Piecewise-linear resampling onto the fixed target grids.
//!
//! Two interpolation primitives with deliberately different edge behavior.
//! The increasing-grid mapper tolerates NaNs and extrapolates toward a
//! caller-supplied minimum at both edges; the decreasing-grid mapper is
//! strict and aborts on any non-finite input. Downstream callers rely on
//! both contracts; the asymmetry is preserved, not unified.

use equimap_types::error::{EquimapError, EquimapResult};
use equimap_types::state::MappedProfile;
use ndarray::Array1;

/// Which interpolation primitive to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapMode {
    /// Source abscissa increasing; NaN intervals skipped; min-value
    /// extrapolation at both edges.
    IncreasingWithExtrapolation,
    /// Source abscissa decreasing; no extrapolation; any non-finite input
    /// anywhere aborts the whole call.
    DecreasingStrict,
}

/// Resample `data(abscissa)` onto `target` in the requested mode.
pub fn map_to_grid(
    target: &[f64],
    abscissa: &[f64],
    data: &[f64],
    min_value: f64,
    mode: MapMode,
) -> EquimapResult<MappedProfile> {
    match mode {
        MapMode::IncreasingWithExtrapolation => {
            map_increasing(target, abscissa, data, min_value)
        }
        MapMode::DecreasingStrict => map_decreasing_strict(target, abscissa, data),
    }
}

fn check_paired_lengths(abscissa: &[f64], data: &[f64]) -> EquimapResult<()> {
    if abscissa.len() != data.len() {
        return Err(EquimapError::ConfigError(format!(
            "abscissa/data length mismatch: {} vs {}",
            abscissa.len(),
            data.len()
        )));
    }
    Ok(())
}

/// First and last index with both coordinate and value finite.
///
/// Distinct errors for "nothing finite at all" and "a single good point":
/// callers report them with different codes.
fn good_span(abscissa: &[f64], data: &[f64]) -> EquimapResult<(usize, usize)> {
    let good = |j: usize| abscissa[j].is_finite() && data[j].is_finite();
    let j0 = (0..data.len())
        .find(|&j| good(j))
        .ok_or(EquimapError::AllPointsNonFinite)?;
    let jn = (0..data.len()).rev().find(|&j| good(j)).unwrap_or(j0);
    if j0 == jn {
        return Err(EquimapError::OneValidPoint);
    }
    Ok((j0, jn))
}

/// Increasing-grid mapper with asymmetric min-value extrapolation.
///
/// Every target value starts at zero. Three passes then run: linear
/// extrapolation below the first good source point through
/// `(target[0], min_value)`, the symmetric pass at the high end through
/// `(target[last], min_value)`, and interval interpolation inside the good
/// span. An interval with a non-finite endpoint is skipped, leaving those
/// target points at their prior value with `valid == false` — callers
/// overwrite known boundary values afterwards, so this is a partial result
/// by contract, not a failure.
pub fn map_increasing(
    target: &[f64],
    abscissa: &[f64],
    data: &[f64],
    min_value: f64,
) -> EquimapResult<MappedProfile> {
    check_paired_lengths(abscissa, data)?;
    let n = target.len();
    let mut out = MappedProfile::zeroed(n);
    if n == 0 {
        return Ok(out);
    }

    let (j0, jn) = good_span(abscissa, data)?;

    // Low edge: first good source point inside the target domain.
    let mut istart = 0;
    if abscissa[j0] > target[0] {
        let gradient = (data[j0] - min_value) / (abscissa[j0] - target[0]);
        for i in 0..n {
            if target[i] >= abscissa[j0] {
                istart = i;
                break;
            }
            out.values[i] = gradient * (target[i] - target[0]) + min_value;
            out.valid[i] = true;
        }
    }

    // High edge: last good source point inside the target domain.
    let mut istop = n - 1;
    if abscissa[jn] < target[n - 1] {
        let gradient = (data[jn] - min_value) / (abscissa[jn] - target[n - 1]);
        for i in istart..n {
            if target[i] <= abscissa[jn] {
                istop = i;
            } else {
                out.values[i] = gradient * (target[i] - target[n - 1]) + min_value;
                out.valid[i] = true;
            }
        }
    }

    // Interior: bracket among consecutive finite source pairs.
    for i in istart..=istop {
        for j in j0..jn {
            if abscissa[j].is_finite()
                && abscissa[j + 1].is_finite()
                && data[j].is_finite()
                && data[j + 1].is_finite()
                && abscissa[j] <= target[i]
                && target[i] < abscissa[j + 1]
            {
                let gradient = (data[j + 1] - data[j]) / (abscissa[j + 1] - abscissa[j]);
                out.values[i] = gradient * (target[i] - abscissa[j]) + data[j];
                out.valid[i] = true;
            }
        }
    }

    Ok(out)
}

/// Decreasing-grid mapper, no extrapolation.
///
/// Used for innately monotone physical quantities; any non-finite grid,
/// abscissa or data value aborts the whole call with no partial result.
pub fn map_decreasing_strict(
    target: &[f64],
    abscissa: &[f64],
    data: &[f64],
) -> EquimapResult<MappedProfile> {
    check_paired_lengths(abscissa, data)?;
    let n = target.len();
    let mut out = MappedProfile::zeroed(n);

    for i in 0..n {
        if !target[i].is_finite() {
            return Err(EquimapError::InterpolationDomain(format!(
                "target grid point {i} is not finite"
            )));
        }
        for j in 0..data.len().saturating_sub(1) {
            if !abscissa[j].is_finite()
                || !abscissa[j + 1].is_finite()
                || !data[j].is_finite()
                || !data[j + 1].is_finite()
            {
                return Err(EquimapError::InterpolationDomain(format!(
                    "source interval {j} contains non-finite values"
                )));
            }
            if target[i] >= abscissa[j + 1] && target[i] < abscissa[j] {
                let gradient = (data[j + 1] - data[j]) / (abscissa[j + 1] - abscissa[j]);
                out.values[i] = gradient * (target[i] - abscissa[j + 1]) + data[j + 1];
                out.valid[i] = true;
                break;
            }
        }
    }

    Ok(out)
}

/// Cumulative trapezoid integration of `data` over `abscissa`.
///
/// Returns the abscissa of each accumulated sample and the running sum.
/// When the first good point does not sit at index 0, the integral is
/// seeded with `min_value * abscissa[j0]` to account for the uncovered
/// span below it. Used to build cumulative volume/area profiles.
pub fn integrate_cumulative(
    abscissa: &[f64],
    data: &[f64],
    min_value: f64,
) -> EquimapResult<(Array1<f64>, Array1<f64>)> {
    check_paired_lengths(abscissa, data)?;
    let (j0, jn) = good_span(abscissa, data)?;

    let mut x = Vec::with_capacity(jn - j0 + 1);
    let mut area = Vec::with_capacity(jn - j0 + 1);
    if j0 > 0 {
        x.push(abscissa[j0]);
        area.push(min_value * abscissa[j0]);
    } else {
        x.push(0.0);
        area.push(0.0);
    }

    for j in j0..jn {
        if abscissa[j].is_finite()
            && abscissa[j + 1].is_finite()
            && data[j].is_finite()
            && data[j + 1].is_finite()
        {
            let last = *area.last().unwrap_or(&0.0);
            x.push(abscissa[j + 1]);
            area.push(last + 0.5 * (data[j] + data[j + 1]) * (abscissa[j + 1] - abscissa[j]));
        }
    }

    Ok((Array1::from_vec(x), Array1::from_vec(area)))
}
