// ─────────────────────────────────────────────────────────────────────
// SCPN EquiMap — Grid Reduction
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Reduction and smoothing of the fixed (R,Z) flux map.
//!
//! Operates across all time slices of a session: unions the per-slice
//! plasma-boundary boxes, snaps the union onto the fixed grid with one
//! cell of margin, copies each slice's sub-block and optionally clamps
//! values outside the boundary toward ψ_bnd.

use equimap_types::constants::CLAMP_DAMPING;
use equimap_types::error::{EquimapError, EquimapResult};
use equimap_types::state::{BoundaryBox, ReducedFluxMap};
use ndarray::{Array1, Array2};
use tracing::debug;

/// Reduce the fixed grid to the minimum size enclosing the plasma boundary
/// at all times, then optionally smooth the far field.
///
/// `boundary_boxes` and `psi_bnd` are per time slice and must match
/// `psi_maps` in length; the fixed grid is shared across slices, so the
/// reduced coordinate vectors are computed once.
///
/// With `limit_r_maj` set, the scanned Rmax is overridden by the limit,
/// the Z box is forced top-down symmetric and the Z index range is kept
/// full — the explicit-box mode deliberately reduces R only. The boundary
/// clamp applies only when `limit_psi` is requested and no radial limit is
/// in effect.
#[allow(clippy::too_many_arguments)]
pub fn reduce_and_smooth(
    r_grid: &[f64],
    z_grid: &[f64],
    psi_maps: &[Array2<f64>],
    boundary_boxes: &[BoundaryBox],
    psi_bnd: &[f64],
    invert: bool,
    limit_psi: bool,
    limit_r_maj: Option<f64>,
) -> EquimapResult<ReducedFluxMap> {
    let nt = psi_maps.len();
    if nt == 0 {
        return Err(EquimapError::ConfigError(
            "grid reduction needs at least one time slice".to_string(),
        ));
    }
    if boundary_boxes.len() != nt || psi_bnd.len() != nt {
        return Err(EquimapError::ConfigError(format!(
            "per-slice input lengths disagree: {} maps, {} boxes, {} psi_bnd",
            nt,
            boundary_boxes.len(),
            psi_bnd.len()
        )));
    }
    let nr = r_grid.len();
    let nz = z_grid.len();
    for (t, map) in psi_maps.iter().enumerate() {
        if map.dim() != (nz, nr) {
            return Err(EquimapError::ConfigError(format!(
                "flux map {t} has shape {:?}, expected ({nz}, {nr})",
                map.dim()
            )));
        }
    }

    // Union across all time slices; per-slice boxes are kept for the clamp.
    let mut boxes: Vec<BoundaryBox> = boundary_boxes.to_vec();
    let mut global = boxes[0];
    for b in &boxes[1..] {
        global = global.union(b);
    }

    if let Some(limit) = limit_r_maj {
        global.r_max = limit;
        for b in boxes.iter_mut() {
            b.r_max = limit;
        }
        // Top-down symmetric Z box
        if global.z_max > global.z_min.abs() {
            global.z_min = -global.z_max;
        } else if global.z_max < global.z_min.abs() {
            global.z_max = global.z_min.abs();
        }
    }

    debug!(
        r_min = global.r_min,
        r_max = global.r_max,
        z_min = global.z_min,
        z_max = global.z_max,
        ?limit_r_maj,
        "reducing flux map grid"
    );

    // Snap onto the fixed grid, one extra cell outward as margin.
    let mut wrmin: isize = -1;
    let mut wrmax: isize = -1;
    let mut wzmin: isize = -1;
    let mut wzmax: isize = -1;

    for (i, &r) in r_grid.iter().enumerate() {
        if r >= global.r_min {
            wrmin = i as isize - 1;
            break;
        }
    }
    for (i, &r) in r_grid.iter().enumerate() {
        if r >= global.r_max {
            wrmax = i as isize + 1;
            break;
        }
    }
    for (i, &z) in z_grid.iter().enumerate() {
        if z >= global.z_min {
            wzmin = i as isize - 1;
            break;
        }
    }
    for (i, &z) in z_grid.iter().enumerate().rev() {
        if z <= global.z_max {
            wzmax = i as isize + 1;
            break;
        }
    }

    // Clamp failed or overflowing scans into the grid.
    let wrmin = wrmin.max(0) as usize;
    let wzmin = wzmin.max(0) as usize;
    let wrmax = if wrmax < 0 { nr - 1 } else { (wrmax as usize).min(nr - 1) };
    let wzmax = if wzmax < 0 { nz - 1 } else { (wzmax as usize).min(nz - 1) };

    // Explicit-box mode never narrows Z.
    let (wzmin, wzmax) = if limit_r_maj.is_some() {
        (0, nz - 1)
    } else {
        (wzmin, wzmax)
    };

    debug!(wrmin, wrmax, wzmin, wzmax, "snapped reduction window");

    // Reduced coordinate vectors, shared across time slices.
    let nr_red = wrmax - wrmin + 1;
    let nz_red = wzmax - wzmin + 1;
    let r = Array1::from_iter(r_grid[wrmin..=wrmax].iter().copied());
    let z = Array1::from_iter(z_grid[wzmin..=wzmax].iter().copied());

    // Copy each slice's sub-block, sign-inverting on request.
    let sign = if invert { -1.0 } else { 1.0 };
    let mut psi: Vec<Array2<f64>> = Vec::with_capacity(nt);
    for map in psi_maps {
        let mut reduced = Array2::zeros((nz_red, nr_red));
        for j in 0..nz_red {
            for k in 0..nr_red {
                reduced[[j, k]] = sign * map[[wzmin + j, wrmin + k]];
            }
        }
        psi.push(reduced);
    }

    if !limit_psi || limit_r_maj.is_some() {
        return Ok(ReducedFluxMap { r, z, psi });
    }

    debug!("clamping flux outside the plasma boundary");

    // Damped clamp: cells outside a slice's boundary box whose flux crossed
    // ψ_bnd keep 10% of the overshoot, preserving a gradient for
    // contour-following downstream.
    for (t, reduced) in psi.iter_mut().enumerate() {
        let b = &boxes[t];
        let bnd = psi_bnd[t];
        for j in 0..nz_red {
            for k in 0..nr_red {
                let outside = r[k] <= b.r_min
                    || r[k] >= b.r_max
                    || z[j] <= b.z_min
                    || z[j] >= b.z_max;
                if !outside {
                    continue;
                }
                let v = reduced[[j, k]];
                if invert {
                    if v < -bnd {
                        reduced[[j, k]] = -bnd + CLAMP_DAMPING * (v + bnd).abs();
                    }
                } else if v > bnd {
                    reduced[[j, k]] = bnd - CLAMP_DAMPING * (v - bnd).abs();
                }
            }
        }
    }

    Ok(ReducedFluxMap { r, z, psi })
}
