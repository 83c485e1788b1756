// ─────────────────────────────────────────────────────────────────────
// SCPN EquiMap — Time-Slice Extraction
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Per-time extraction of equilibrium quantities.
//!
//! Thin orchestration over the resolver, window selector, flux-label
//! converter and grid mapper: one window per signal, one label set per
//! slice, one mapping per profile per target grid.

use equimap_types::config::RhoLabel;
use equimap_types::error::{EquimapError, EquimapResult};
use equimap_types::state::{
    BoundaryBox, FluxLabelSet, MappedProfile, RawSeries, TargetGrid,
};
use ndarray::{Array1, Array2};

use crate::fluxlabel::convert_flux_labels;
use crate::gridmap::{integrate_cumulative, map_increasing};
use crate::resolve::{resolve_array, SignalClient};
use crate::window::select_series_window;

/// Signal names of one equilibrium source, supplied by the catalog layer.
#[derive(Debug, Clone)]
pub struct SignalCatalog {
    pub psi_mag: String,
    pub psi_bnd: String,
    pub b_vac: String,
    pub ip: String,
    pub r_mag: String,
    pub z_mag: String,
    pub q: String,
    pub p: String,
    pub f: String,
    pub p_prime: String,
    pub ff_prime: String,
    pub volume: String,
    pub area: String,
    pub r_lcfs: String,
    pub z_lcfs: String,
    pub psi_map: String,
}

/// All series one session needs, resolved once per load.
#[derive(Debug, Clone)]
pub struct SliceSignals {
    pub psi_mag: RawSeries,
    pub psi_bnd: RawSeries,
    pub b_vac: RawSeries,
    pub ip: RawSeries,
    pub r_mag: RawSeries,
    pub z_mag: RawSeries,
    pub q: RawSeries,
    pub p: RawSeries,
    pub f: RawSeries,
    pub p_prime: RawSeries,
    pub ff_prime: RawSeries,
    pub volume: RawSeries,
    pub area: RawSeries,
    pub r_lcfs: RawSeries,
    pub z_lcfs: RawSeries,
    pub psi_map: RawSeries,
}

impl SliceSignals {
    /// Resolve every catalogued signal. Any upstream or shape failure
    /// aborts the whole load; a half-resolved session is useless.
    pub fn resolve(
        client: &dyn SignalClient,
        source: &str,
        catalog: &SignalCatalog,
    ) -> EquimapResult<Self> {
        Ok(SliceSignals {
            psi_mag: resolve_array(client, &catalog.psi_mag, source)?,
            psi_bnd: resolve_array(client, &catalog.psi_bnd, source)?,
            b_vac: resolve_array(client, &catalog.b_vac, source)?,
            ip: resolve_array(client, &catalog.ip, source)?,
            r_mag: resolve_array(client, &catalog.r_mag, source)?,
            z_mag: resolve_array(client, &catalog.z_mag, source)?,
            q: resolve_array(client, &catalog.q, source)?,
            p: resolve_array(client, &catalog.p, source)?,
            f: resolve_array(client, &catalog.f, source)?,
            p_prime: resolve_array(client, &catalog.p_prime, source)?,
            ff_prime: resolve_array(client, &catalog.ff_prime, source)?,
            volume: resolve_array(client, &catalog.volume, source)?,
            area: resolve_array(client, &catalog.area, source)?,
            r_lcfs: resolve_array(client, &catalog.r_lcfs, source)?,
            z_lcfs: resolve_array(client, &catalog.z_lcfs, source)?,
            psi_map: resolve_array(client, &catalog.psi_map, source)?,
        })
    }
}

/// A profile mapped onto both fixed grids: volume-centred ρ and surface ρ_B.
#[derive(Debug, Clone)]
pub struct MappedPair {
    pub centre: MappedProfile,
    pub bound: MappedProfile,
}

/// Everything extracted for one requested time.
#[derive(Debug, Clone)]
pub struct TimeSliceData {
    pub time: f64,
    pub psi_mag: f64,
    pub psi_bnd: f64,
    pub b_vac: f64,
    pub ip: f64,
    /// Magnetic-axis position (R, Z).
    pub r_mag: f64,
    pub z_mag: f64,
    pub labels: FluxLabelSet,
    pub q: MappedPair,
    pub p: MappedPair,
    pub f: MappedPair,
    pub p_prime: MappedPair,
    pub ff_prime: MappedPair,
    pub volume: MappedPair,
    pub area: MappedPair,
    /// Cumulative volume vs. the label abscissa.
    pub cum_volume: (Array1<f64>, Array1<f64>),
    pub r_lcfs: Vec<f64>,
    pub z_lcfs: Vec<f64>,
    pub boundary: BoundaryBox,
    /// Full-grid ψ map at this time, `[z][r]`, kept for grid reduction.
    pub psi_map: Array2<f64>,
}

/// Scalar value of a rank-1 signal at the requested time: samples within
/// the window are averaged, so a widened window smooths noisy scalars.
fn scalar_at(series: &RawSeries, time: f64, halfwidth: f64) -> EquimapResult<f64> {
    let (i0, i1) = select_series_window(series, time, halfwidth)?;
    let mut sum = 0.0;
    for i in i0..=i1 {
        sum += series.data[i];
    }
    Ok(sum / (i1 - i0 + 1) as f64)
}

fn label_abscissa<'a>(labels: &'a FluxLabelSet, label: RhoLabel) -> &'a Array1<f64> {
    match label {
        RhoLabel::SqrtNormalisedToroidalFlux => &labels.rho_tor_sqrt,
        RhoLabel::NormalisedPoloidalFlux => &labels.rho_pol,
        RhoLabel::NormalisedItmFluxRadius => &labels.rho_tor_itm,
    }
}

fn map_pair(
    target: &TargetGrid,
    abscissa: &Array1<f64>,
    profile: &Array1<f64>,
) -> EquimapResult<MappedPair> {
    let abscissa = abscissa.as_slice().ok_or_else(|| {
        EquimapError::ConfigError("abscissa must be contiguous".to_string())
    })?;
    let data = profile.as_slice().ok_or_else(|| {
        EquimapError::ConfigError("profile must be contiguous".to_string())
    })?;
    let rho = target.rho.as_slice().ok_or_else(|| {
        EquimapError::ConfigError("target grid must be contiguous".to_string())
    })?;
    let rho_b = target.rho_b.as_slice().ok_or_else(|| {
        EquimapError::ConfigError("target grid must be contiguous".to_string())
    })?;
    Ok(MappedPair {
        centre: map_increasing(rho, abscissa, data, 0.0)?,
        bound: map_increasing(rho_b, abscissa, data, 0.0)?,
    })
}

/// Extract one time slice's derived quantities.
///
/// One time window is selected per signal (the signals carry independent
/// time axes), the flux labels are recomputed from that slice's Q profile
/// and scalars, and every profile is resampled onto both target grids in
/// the configured label system.
pub fn extract_slice(
    signals: &SliceSignals,
    target: &TargetGrid,
    label: RhoLabel,
    time: f64,
    halfwidth: f64,
) -> EquimapResult<TimeSliceData> {
    let psi_mag = scalar_at(&signals.psi_mag, time, halfwidth)?;
    let psi_bnd = scalar_at(&signals.psi_bnd, time, halfwidth)?;
    let b_vac = scalar_at(&signals.b_vac, time, halfwidth)?;
    let ip = scalar_at(&signals.ip, time, halfwidth)?;
    let r_mag = scalar_at(&signals.r_mag, time, halfwidth)?;
    let z_mag = scalar_at(&signals.z_mag, time, halfwidth)?;

    let (tq, _) = select_series_window(&signals.q, time, halfwidth)?;
    let q_profile = signals.q.profile_at(tq)?;
    let labels = convert_flux_labels(
        q_profile.as_slice().ok_or_else(|| {
            EquimapError::ConfigError("q profile must be contiguous".to_string())
        })?,
        psi_mag,
        psi_bnd,
        b_vac,
    )?;
    let abscissa = label_abscissa(&labels, label).clone();

    let mut profile_on_labels = |series: &RawSeries| -> EquimapResult<MappedPair> {
        let (t, _) = select_series_window(series, time, halfwidth)?;
        let profile = series.profile_at(t)?;
        if profile.len() != q_profile.len() {
            return Err(EquimapError::ShapeInconsistency {
                signal: series.signal.clone(),
                declared: profile.len(),
                product: q_profile.len(),
            });
        }
        map_pair(target, &abscissa, &profile)
    };

    let q = map_pair(target, &abscissa, &q_profile)?;
    let p = profile_on_labels(&signals.p)?;
    let f = profile_on_labels(&signals.f)?;
    let p_prime = profile_on_labels(&signals.p_prime)?;
    let ff_prime = profile_on_labels(&signals.ff_prime)?;
    let volume = profile_on_labels(&signals.volume)?;
    let area = profile_on_labels(&signals.area)?;

    let (tv, _) = select_series_window(&signals.volume, time, halfwidth)?;
    let volume_profile = signals.volume.profile_at(tv)?;
    let cum_volume = integrate_cumulative(
        abscissa.as_slice().ok_or_else(|| {
            EquimapError::ConfigError("label abscissa must be contiguous".to_string())
        })?,
        volume_profile.as_slice().ok_or_else(|| {
            EquimapError::ConfigError("volume profile must be contiguous".to_string())
        })?,
        0.0,
    )?;

    let (tb, _) = select_series_window(&signals.r_lcfs, time, halfwidth)?;
    let r_lcfs = signals.r_lcfs.profile_at(tb)?.to_vec();
    let (tb, _) = select_series_window(&signals.z_lcfs, time, halfwidth)?;
    let z_lcfs = signals.z_lcfs.profile_at(tb)?.to_vec();
    let boundary = BoundaryBox::scan(&r_lcfs, &z_lcfs);

    let (tm, _) = select_series_window(&signals.psi_map, time, halfwidth)?;
    let psi_map = signals.psi_map.plane_at(tm)?;

    Ok(TimeSliceData {
        time,
        psi_mag,
        psi_bnd,
        b_vac,
        ip,
        r_mag,
        z_mag,
        labels,
        q,
        p,
        f,
        p_prime,
        ff_prime,
        volume,
        area,
        cum_volume,
        r_lcfs,
        z_lcfs,
        boundary,
        psi_map,
    })
}
