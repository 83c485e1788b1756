//! Flux-surface coordinate conversion.
//!
//! Derives the interchangeable radial labels (normalised poloidal flux,
//! sqrt-normalised toroidal flux, normalised ITM flux radius, raw poloidal
//! flux) from a safety-factor profile. ψ_mag, ψ_bnd and B_vac are
//! time-dependent scalars, so the conversion is recomputed for every slice
//! and never cached.

use equimap_types::error::{EquimapError, EquimapResult};
use equimap_types::state::FluxLabelSet;
use ndarray::Array1;

/// Signed trapezoid accumulation of `arr` over the abscissa `x`.
///
/// Each interval contributes `0.5 * w * (arr[i] + arr[i+1]) * |Δx|` with
/// `w = +1` where the abscissa increases and `-1` where it decreases, so
/// the magnitude of the result is direction-independent.
pub fn line_integral(arr: &[f64], x: &[f64]) -> f64 {
    let n = arr.len().min(x.len());
    let mut ans = 0.0;
    for i in 0..n.saturating_sub(1) {
        let weight = if x[i + 1] - x[i] >= 0.0 { 1.0 } else { -1.0 };
        ans += 0.5 * weight * (arr[i] + arr[i + 1]) * (x[i] - x[i + 1]).abs();
    }
    ans
}

/// Build all flux labels for one time slice from its Q profile.
///
/// Degenerate Q data (non-positive, non-finite) pass through unmodified;
/// validating the physics of the profile is the caller's concern.
pub fn convert_flux_labels(
    q: &[f64],
    psi_mag: f64,
    psi_bnd: f64,
    b_vac: f64,
) -> EquimapResult<FluxLabelSet> {
    let n = q.len();
    if n < 2 {
        return Err(EquimapError::ConfigError(format!(
            "flux label conversion needs at least 2 Q samples, got {n}"
        )));
    }

    let mut rho_pol = Array1::zeros(n);
    let mut psi = Array1::zeros(n);
    let mut phi = Array1::zeros(n);

    for i in 0..n {
        rho_pol[i] = i as f64 / (n as f64 - 1.0);
        psi[i] = psi_mag + rho_pol[i] * (psi_bnd - psi_mag);
        phi[i] = line_integral(&q[..=i], &psi.as_slice().unwrap()[..=i]).abs();
    }

    let phi_bnd = phi[n - 1];
    let mut rho_tor_sqrt = Array1::zeros(n);
    for i in 1..n {
        rho_tor_sqrt[i] = (phi[i] / phi_bnd).sqrt();
    }

    let rho_tor_bnd = (phi_bnd / std::f64::consts::PI / b_vac.abs()).sqrt();
    let mut rho_tor_itm = Array1::zeros(n);
    for i in 0..n {
        rho_tor_itm[i] = (phi[i] / std::f64::consts::PI / b_vac.abs()).sqrt() / rho_tor_bnd;
    }

    Ok(FluxLabelSet {
        rho_pol,
        psi,
        phi,
        rho_tor_sqrt,
        rho_tor_itm,
        rho_tor_bnd,
    })
}
