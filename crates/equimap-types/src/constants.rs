// ─────────────────────────────────────────────────────────────────────
// SCPN EquiMap — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
/// Default number of bounding flux surfaces, magnetic axis and LCFS included.
pub const COORDINATE_COUNT: usize = 51;

/// Tolerance pad applied to both ends of a requested time window.
/// Exact-boundary samples must not be dropped by rounding.
pub const TIME_WINDOW_EPSILON: f64 = 2.0 * f64::EPSILON;

/// Fraction of the boundary-flux overshoot retained by the damped clamp.
/// A hard clip would flatten the field outside the LCFS and break
/// contour-following; keeping 10% preserves a gradient.
pub const CLAMP_DAMPING: f64 = 0.1;
