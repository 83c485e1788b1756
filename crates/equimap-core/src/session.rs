// ─────────────────────────────────────────────────────────────────────
// SCPN EquiMap — Session
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Session lifecycle for the equilibrium-mapping engine.
//!
//! A session owns the configuration, the fixed target grids and all
//! extracted time slices. State lives here and nowhere else: the
//! computational modules are free functions over explicit inputs.

use equimap_types::config::EquimapConfig;
use equimap_types::error::{EquimapError, EquimapResult};
use equimap_types::state::{ReducedFluxMap, TargetGrid};
use tracing::info;

use crate::reduce::reduce_and_smooth;
use crate::resolve::SignalClient;
use crate::slice::{extract_slice, SignalCatalog, SliceSignals, TimeSliceData};

/// One equilibrium-mapping run: configuration, fixed grids, loaded slices
/// and (after reduction) the reduced flux maps.
#[derive(Debug, Clone)]
pub struct EquimapSession {
    pub config: EquimapConfig,
    pub target: TargetGrid,
    /// Requested times, in load order.
    pub times: Vec<f64>,
    pub slices: Vec<TimeSliceData>,
    /// Fixed R grid of the full flux map, taken from the map signal.
    pub r_grid: Vec<f64>,
    /// Fixed Z grid of the full flux map.
    pub z_grid: Vec<f64>,
    /// Boundary-box reduction of the flux maps.
    pub reduced: Option<ReducedFluxMap>,
    /// Explicit radial-limit reduction, built only when configured.
    pub rz_box: Option<ReducedFluxMap>,
}

impl EquimapSession {
    /// Validate the configuration and build the fixed target grids.
    pub fn new(config: EquimapConfig) -> EquimapResult<Self> {
        let target = config.create_target_grid()?;
        Ok(EquimapSession {
            config,
            target,
            times: Vec::new(),
            slices: Vec::new(),
            r_grid: Vec::new(),
            z_grid: Vec::new(),
            reduced: None,
            rz_box: None,
        })
    }

    pub fn is_loaded(&self) -> bool {
        !self.slices.is_empty()
    }

    /// Resolve every signal once, then extract one slice per requested
    /// time. A repeated load replaces all previously extracted state.
    pub fn load(
        &mut self,
        client: &dyn SignalClient,
        source: &str,
        catalog: &SignalCatalog,
        times: &[f64],
        halfwidth: f64,
    ) -> EquimapResult<()> {
        if times.is_empty() {
            return Err(EquimapError::ConfigError(
                "load needs at least one requested time".to_string(),
            ));
        }
        info!(source, n_times = times.len(), "loading equilibrium source");

        let signals = SliceSignals::resolve(client, source, catalog)?;

        // The flux map's spatial axes carry the fixed (R, Z) grids; the
        // lower-numbered of the non-time axes is R.
        let time_axis = signals.psi_map.order.index();
        let mut space = Vec::with_capacity(2);
        for axis in 0..signals.psi_map.rank {
            if axis != time_axis {
                space.push(axis);
            }
        }
        if space.len() != 2 {
            return Err(EquimapError::ConfigError(format!(
                "{}: flux map must be rank 3",
                signals.psi_map.signal
            )));
        }
        let r_grid = signals.psi_map.axis_coord(space[0]).to_vec();
        let z_grid = signals.psi_map.axis_coord(space[1]).to_vec();

        let mut slices = Vec::with_capacity(times.len());
        for &time in times {
            slices.push(extract_slice(
                &signals,
                &self.target,
                self.config.flux_surface_label,
                time,
                halfwidth,
            )?);
        }

        self.times = times.to_vec();
        self.slices = slices;
        self.r_grid = r_grid;
        self.z_grid = z_grid;
        self.reduced = None;
        self.rz_box = None;
        info!(n_slices = self.slices.len(), "equilibrium source loaded");
        Ok(())
    }

    /// Reduce the loaded flux maps across all slices.
    ///
    /// Always builds the boundary-box reduction; with `limit_r_maj`
    /// configured additionally builds the explicit radial-limit variant.
    pub fn reduce_flux_maps(&mut self) -> EquimapResult<()> {
        if !self.is_loaded() {
            return Err(EquimapError::ConfigError(
                "flux-map reduction requires a loaded session".to_string(),
            ));
        }
        let psi_maps: Vec<_> = self.slices.iter().map(|s| s.psi_map.clone()).collect();
        let boxes: Vec<_> = self.slices.iter().map(|s| s.boundary).collect();
        let psi_bnd: Vec<_> = self.slices.iter().map(|s| s.psi_bnd).collect();
        let opts = &self.config.reduction;

        self.reduced = Some(reduce_and_smooth(
            &self.r_grid,
            &self.z_grid,
            &psi_maps,
            &boxes,
            &psi_bnd,
            opts.invert,
            opts.limit_psi,
            None,
        )?);

        self.rz_box = match opts.limit_r_maj {
            Some(limit) => Some(reduce_and_smooth(
                &self.r_grid,
                &self.z_grid,
                &psi_maps,
                &boxes,
                &psi_bnd,
                opts.invert,
                opts.limit_psi,
                Some(limit),
            )?),
            None => None,
        };
        Ok(())
    }

    /// Drop everything loaded; the configuration and target grids survive.
    pub fn reset(&mut self) {
        self.times.clear();
        self.slices.clear();
        self.r_grid.clear();
        self.z_grid.clear();
        self.reduced = None;
        self.rz_box = None;
    }
}
