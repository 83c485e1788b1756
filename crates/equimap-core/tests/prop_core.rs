// ─────────────────────────────────────────────────────────────────────
// SCPN EquiMap — Property-Based Tests (proptest) for equimap-core
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for equimap-core using proptest.
//!
//! Covers: time-window selection, flux-label conversion, grid mapping,
//! cumulative integration, flux-map reduction.

use equimap_core::fluxlabel::convert_flux_labels;
use equimap_core::gridmap::{integrate_cumulative, map_decreasing_strict, map_increasing};
use equimap_core::reduce::reduce_and_smooth;
use equimap_core::window::select_time_window;
use equimap_types::state::BoundaryBox;
use ndarray::Array2;
use proptest::prelude::*;

/// Strictly increasing axis from positive steps.
fn increasing_axis(start: f64, steps: &[f64]) -> Vec<f64> {
    let mut axis = vec![start];
    for &s in steps {
        axis.push(axis[axis.len() - 1] + s);
    }
    axis
}

// ── Window Selection Properties ──────────────────────────────────────

proptest! {
    /// A zero-width request landing exactly on a sample returns it.
    #[test]
    fn window_exact_sample(
        steps in prop::collection::vec(0.01f64..0.5, 2..30),
        pick in any::<prop::sample::Index>(),
    ) {
        let time = increasing_axis(0.0, &steps);
        let j = pick.index(time.len());
        let (i0, i1) = select_time_window(&time, time[j], 0.0).unwrap();
        prop_assert_eq!(i0, j);
        prop_assert_eq!(i1, j);
    }

    /// Every sample inside a successfully selected window lies within
    /// the tolerant bounds.
    #[test]
    fn window_samples_within_bounds(
        steps in prop::collection::vec(0.01f64..0.5, 4..30),
        pick in any::<prop::sample::Index>(),
        halfwidth in 0.05f64..0.4,
    ) {
        let time = increasing_axis(0.0, &steps);
        // keep the request away from the last sample so a closing index
        // can exist
        let j = pick.index(time.len() - 2);
        if let Ok((i0, i1)) = select_time_window(&time, time[j], halfwidth) {
            prop_assert!(i0 <= i1);
            for t in &time[i0..=i1] {
                prop_assert!(*t >= time[j] - halfwidth - 3.0 * f64::EPSILON);
                prop_assert!(*t <= time[j] + halfwidth + 3.0 * f64::EPSILON);
            }
        }
    }
}

// ── Flux-Label Properties ────────────────────────────────────────────

proptest! {
    /// For strictly positive Q the toroidal labels are monotone and
    /// normalised to [0, 1].
    #[test]
    fn flux_labels_monotone_and_normalised(
        q in prop::collection::vec(0.5f64..8.0, 3..80),
        psi_mag in -2.0f64..-0.1,
        psi_bnd in 0.1f64..2.0,
        b_vac in 0.5f64..5.0,
    ) {
        let labels = convert_flux_labels(&q, psi_mag, psi_bnd, b_vac).unwrap();
        let n = q.len();

        prop_assert_eq!(labels.rho_tor_sqrt[0], 0.0);
        prop_assert!((labels.rho_tor_sqrt[n - 1] - 1.0).abs() < 1e-10);
        prop_assert!((labels.rho_tor_itm[n - 1] - 1.0).abs() < 1e-10);
        for i in 1..n {
            prop_assert!(labels.phi[i] >= labels.phi[i - 1]);
            prop_assert!(labels.rho_tor_sqrt[i] > labels.rho_tor_sqrt[i - 1]);
            prop_assert!(labels.psi[i] > labels.psi[i - 1]);
        }
    }

    /// φ depends only on |dψ|, not on the sign of the ψ ladder.
    #[test]
    fn flux_labels_psi_direction_invariant(
        q in prop::collection::vec(0.5f64..8.0, 3..40),
        span in 0.2f64..3.0,
    ) {
        let up = convert_flux_labels(&q, -span, span, 2.0).unwrap();
        let down = convert_flux_labels(&q, span, -span, 2.0).unwrap();
        for i in 0..q.len() {
            prop_assert!((up.phi[i] - down.phi[i]).abs() < 1e-10 * (1.0 + up.phi[i]));
        }
    }
}

// ── Grid-Mapping Properties ──────────────────────────────────────────

proptest! {
    /// Interpolating a linear function reproduces it exactly inside the
    /// covered span, extrapolation regions included (the extrapolation
    /// anchors then lie on the same line only inside the span, so only
    /// covered points are checked).
    #[test]
    fn increasing_map_is_exact_for_linear_data(
        steps in prop::collection::vec(0.05f64..0.5, 2..20),
        slope in -5.0f64..5.0,
        intercept in -10.0f64..10.0,
        fractions in prop::collection::vec(0.0f64..0.999, 1..15),
    ) {
        let abscissa = increasing_axis(0.0, &steps);
        let data: Vec<f64> = abscissa.iter().map(|&x| slope * x + intercept).collect();
        let lo = abscissa[0];
        let hi = abscissa[abscissa.len() - 1];

        let mut target: Vec<f64> = fractions.iter().map(|f| lo + f * (hi - lo)).collect();
        target.sort_by(|a, b| a.partial_cmp(b).unwrap());

        let mapped = map_increasing(&target, &abscissa, &data, 0.0).unwrap();
        for (i, &t) in target.iter().enumerate() {
            prop_assert!(mapped.valid[i], "point {} at {} not covered", i, t);
            let expected = slope * t + intercept;
            prop_assert!(
                (mapped.values[i] - expected).abs() < 1e-9 * (1.0 + expected.abs()),
                "point {}: {} vs {}", i, mapped.values[i], expected
            );
        }
    }

    /// Low-edge extrapolated values lie on the line through
    /// (target[0], min_value) and the first source point.
    #[test]
    fn low_edge_extrapolation_is_linear(
        gap in 0.2f64..1.0,
        first_value in 1.0f64..10.0,
        min_value in 0.0f64..0.5,
        fractions in prop::collection::vec(0.0f64..0.99, 1..10),
    ) {
        let abscissa = [gap, gap + 0.5];
        let data = [first_value, first_value + 1.0];

        let mut target: Vec<f64> = fractions.iter().map(|f| f * gap).collect();
        target.sort_by(|a, b| a.partial_cmp(b).unwrap());
        target.push(gap + 0.5);

        let mapped = map_increasing(&target, &abscissa, &data, min_value).unwrap();
        let gradient = (first_value - min_value) / (gap - target[0]);
        for (i, &t) in target.iter().enumerate() {
            if t >= gap {
                continue;
            }
            let expected = gradient * (t - target[0]) + min_value;
            prop_assert!((mapped.values[i] - expected).abs() < 1e-10,
                "point {}: {} vs {}", i, mapped.values[i], expected);
        }
    }

    /// The strict decreasing-grid mapper agrees with linear data.
    #[test]
    fn decreasing_map_is_exact_for_linear_data(
        steps in prop::collection::vec(0.05f64..0.5, 2..20),
        slope in -5.0f64..5.0,
        intercept in -10.0f64..10.0,
        fractions in prop::collection::vec(0.001f64..0.999, 1..10),
    ) {
        // decreasing abscissa in index order
        let mut abscissa = increasing_axis(0.0, &steps);
        abscissa.reverse();
        let data: Vec<f64> = abscissa.iter().map(|&x| slope * x + intercept).collect();
        let hi = abscissa[0];
        let lo = abscissa[abscissa.len() - 1];

        let target: Vec<f64> = fractions.iter().map(|f| lo + f * (hi - lo)).collect();
        let mapped = map_decreasing_strict(&target, &abscissa, &data).unwrap();
        for (i, &t) in target.iter().enumerate() {
            prop_assert!(mapped.valid[i]);
            let expected = slope * t + intercept;
            prop_assert!(
                (mapped.values[i] - expected).abs() < 1e-9 * (1.0 + expected.abs())
            );
        }
    }

    /// Cumulative integration of non-negative data never decreases.
    #[test]
    fn cumulative_integral_monotone(
        steps in prop::collection::vec(0.05f64..0.5, 2..30),
        data in prop::collection::vec(0.0f64..10.0, 3..31),
    ) {
        let abscissa = increasing_axis(0.0, &steps);
        let n = abscissa.len().min(data.len());
        let (_, area) = integrate_cumulative(&abscissa[..n], &data[..n], 0.0).unwrap();
        for i in 1..area.len() {
            prop_assert!(area[i] >= area[i - 1]);
        }
    }
}

// ── Reduction Properties ─────────────────────────────────────────────

proptest! {
    /// The reduced grid brackets the boundary box and the sub-block is a
    /// faithful copy of the full map.
    #[test]
    fn reduction_brackets_box_and_copies(
        r0 in 2.0f64..4.0,
        r1 in 6.0f64..9.0,
        z0 in -3.0f64..-1.0,
        z1 in 1.0f64..3.0,
    ) {
        let n = 25;
        let r_grid: Vec<f64> = (0..n).map(|i| 10.0 * i as f64 / (n as f64 - 1.0)).collect();
        let z_grid: Vec<f64> = (0..n).map(|i| -5.0 + 10.0 * i as f64 / (n as f64 - 1.0)).collect();
        let map = Array2::from_shape_fn((n, n), |(j, k)| {
            (r_grid[k] - 5.0).powi(2) + z_grid[j].powi(2)
        });
        let boundary = BoundaryBox { r_min: r0, r_max: r1, z_min: z0, z_max: z1 };

        let out = reduce_and_smooth(
            &r_grid, &z_grid, &[map.clone()], &[boundary], &[1.0],
            false, false, None,
        ).unwrap();

        prop_assert!(out.r[0] <= r0 && out.r[out.r.len() - 1] >= r1);
        prop_assert!(out.z[0] <= z0 && out.z[out.z.len() - 1] >= z1);

        let k0 = r_grid.iter().position(|&r| (r - out.r[0]).abs() < 1e-12).unwrap();
        let j0 = z_grid.iter().position(|&z| (z - out.z[0]).abs() < 1e-12).unwrap();
        for j in 0..out.z.len() {
            for k in 0..out.r.len() {
                prop_assert!((out.psi[0][[j, k]] - map[[j0 + j, k0 + k]]).abs() < 1e-15);
            }
        }
    }

    /// With the clamp enabled no cell outside the boundary box exceeds
    /// ψ_bnd.
    #[test]
    fn clamp_caps_far_field(psi_bnd in 0.5f64..8.0) {
        let n = 25;
        let r_grid: Vec<f64> = (0..n).map(|i| 10.0 * i as f64 / (n as f64 - 1.0)).collect();
        let z_grid: Vec<f64> = (0..n).map(|i| -5.0 + 10.0 * i as f64 / (n as f64 - 1.0)).collect();
        let map = Array2::from_shape_fn((n, n), |(j, k)| {
            (r_grid[k] - 5.0).powi(2) + z_grid[j].powi(2)
        });
        let boundary = BoundaryBox { r_min: 3.0, r_max: 7.0, z_min: -2.0, z_max: 2.0 };

        let out = reduce_and_smooth(
            &r_grid, &z_grid, &[map], &[boundary], &[psi_bnd],
            false, true, None,
        ).unwrap();

        for j in 0..out.z.len() {
            for k in 0..out.r.len() {
                let outside = out.r[k] <= boundary.r_min
                    || out.r[k] >= boundary.r_max
                    || out.z[j] <= boundary.z_min
                    || out.z[j] >= boundary.z_max;
                if outside {
                    prop_assert!(out.psi[0][[j, k]] <= psi_bnd + 1e-12);
                }
            }
        }
    }
}
