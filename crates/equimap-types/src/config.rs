// ─────────────────────────────────────────────────────────────────────
// SCPN EquiMap — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use serde::{Deserialize, Serialize};

use crate::constants::COORDINATE_COUNT;
use crate::error::{EquimapError, EquimapResult};
use crate::state::TargetGrid;

/// Flux-surface label selected for profile mapping.
///
/// The fixed target grid carries no particular definition; the label decides
/// which source abscissa (ρ_pol, √(φ/φ_b), or the ITM flux radius) each
/// profile is interpolated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RhoLabel {
    #[serde(rename = "SQRTNORMALISEDTOROIDALFLUX")]
    SqrtNormalisedToroidalFlux,
    #[serde(rename = "NORMALISEDPOLOIDALFLUX")]
    NormalisedPoloidalFlux,
    #[serde(rename = "NORMALISEDITMFLUXRADIUS")]
    NormalisedItmFluxRadius,
}

/// Grid-reduction and smoothing options.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ReductionOptions {
    /// Sign-invert every flux value while copying the reduced sub-grid.
    #[serde(default)]
    pub invert: bool,
    /// Clamp flux values outside the plasma boundary toward ψ_bnd.
    /// Ignored when `limit_r_maj` is set.
    #[serde(default)]
    pub limit_psi: bool,
    /// Explicit major-radius box limit overriding the scanned Rmax.
    /// Forces a top-down-symmetric Z box and leaves the Z index range full.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit_r_maj: Option<f64>,
}

/// Session configuration for the equilibrium-mapping engine.
///
/// Mirrors the plugin's init-time name-value arguments: the flux-surface
/// label is mandatory, the surface count defaults to 51.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquimapConfig {
    /// Number of bounding flux surfaces, magnetic axis and LCFS included.
    #[serde(default = "default_flux_surface_count")]
    pub flux_surface_count: usize,
    /// Flux-surface label used for all profile mapping.
    pub flux_surface_label: RhoLabel,
    #[serde(default)]
    pub reduction: ReductionOptions,
}

fn default_flux_surface_count() -> usize {
    COORDINATE_COUNT
}

impl EquimapConfig {
    pub fn new(flux_surface_label: RhoLabel) -> Self {
        EquimapConfig {
            flux_surface_count: COORDINATE_COUNT,
            flux_surface_label,
            reduction: ReductionOptions::default(),
        }
    }

    /// Load from a JSON file.
    pub fn from_file(path: &str) -> EquimapResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// The surface grid needs at least the magnetic axis and the LCFS.
    pub fn validate(&self) -> EquimapResult<()> {
        if self.flux_surface_count < 2 {
            return Err(EquimapError::ConfigError(format!(
                "flux_surface_count must be >= 2, got {}",
                self.flux_surface_count
            )));
        }
        if let Some(limit) = self.reduction.limit_r_maj {
            if !limit.is_finite() || limit < 0.0 {
                return Err(EquimapError::ConfigError(format!(
                    "limit_r_maj must be finite and >= 0, got {limit}"
                )));
            }
        }
        Ok(())
    }

    /// Build the fixed ρ / ρ_B target grids from this configuration.
    pub fn create_target_grid(&self) -> EquimapResult<TargetGrid> {
        self.validate()?;
        Ok(TargetGrid::new(self.flux_surface_count))
    }
}
