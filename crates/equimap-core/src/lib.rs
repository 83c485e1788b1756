//! Coordinate remapping and interpolation engine for equilibrium mapping.
//!
//! Resolves heterogeneous time-dependent signals (unknown axis order,
//! NaN-bearing), derives flux-surface coordinate systems, resamples
//! profiles onto fixed ρ / ρ_B grids and reduces 2D (R,Z) flux maps to the
//! minimal region enclosing the plasma boundary.

pub mod fluxlabel;
pub mod gridmap;
pub mod reduce;
pub mod resolve;
pub mod session;
pub mod slice;
pub mod window;

#[cfg(test)]
pub(crate) mod testdata;
