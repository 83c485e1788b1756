// ─────────────────────────────────────────────────────────────────────
// SCPN EquiMap — State
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use ndarray::{Array1, Array2};

use crate::error::{EquimapError, EquimapResult};

/// Position of the time axis within a signal's rank.
///
/// Replaces the raw `order` integer delivered by the data-access client.
/// All strided indexing goes through this type; no call site repeats the
/// offset arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisOrder {
    TimeFirst,
    TimeMiddle,
    TimeLast,
}

impl AxisOrder {
    /// Interpret the client's axis-order integer. Negative means the signal
    /// carries no time vector at all.
    pub fn from_index(order: i32, rank: usize) -> EquimapResult<Self> {
        let parsed = match order {
            0 => AxisOrder::TimeFirst,
            1 => AxisOrder::TimeMiddle,
            2 => AxisOrder::TimeLast,
            _ => return Err(EquimapError::NoTimeVector),
        };
        if parsed.index() >= rank {
            return Err(EquimapError::NoTimeVector);
        }
        Ok(parsed)
    }

    pub fn index(&self) -> usize {
        match self {
            AxisOrder::TimeFirst => 0,
            AxisOrder::TimeMiddle => 1,
            AxisOrder::TimeLast => 2,
        }
    }

    /// Offset of the time axis within a concatenated coordinate buffer:
    /// axis `k` starts at `sum(extents[0..k])`.
    pub fn coord_offset(&self, extents: &[usize]) -> usize {
        extents[..self.index()].iter().sum()
    }
}

/// Raw numeric buffer in whatever representation the client stored.
/// The resolver widens everything to `f64` before any slicing runs.
#[derive(Debug, Clone)]
pub enum SignalValues {
    F32(Vec<f32>),
    F64(Vec<f64>),
    I16(Vec<i16>),
    I32(Vec<i32>),
    I64(Vec<i64>),
}

impl SignalValues {
    pub fn len(&self) -> usize {
        match self {
            SignalValues::F32(v) => v.len(),
            SignalValues::F64(v) => v.len(),
            SignalValues::I16(v) => v.len(),
            SignalValues::I32(v) => v.len(),
            SignalValues::I64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn to_f64(&self) -> Vec<f64> {
        match self {
            SignalValues::F32(v) => v.iter().map(|&x| x as f64).collect(),
            SignalValues::F64(v) => v.clone(),
            SignalValues::I16(v) => v.iter().map(|&x| x as f64).collect(),
            SignalValues::I32(v) => v.iter().map(|&x| x as f64).collect(),
            SignalValues::I64(v) => v.iter().map(|&x| x as f64).collect(),
        }
    }
}

/// A signal as delivered by the client and validated by the resolver.
///
/// `data` is the flat measurement buffer, axis 0 varying fastest. `coords`
/// holds the per-axis coordinate vectors concatenated in axis order, so the
/// vector for axis `k` begins at `sum(extents[0..k])`.
#[derive(Debug, Clone)]
pub struct RawSeries {
    pub signal: String,
    pub rank: usize,
    pub order: AxisOrder,
    pub extents: Vec<usize>,
    pub data: Vec<f64>,
    pub coords: Vec<f64>,
}

impl RawSeries {
    /// Construct and enforce the shape invariants: the extents product must
    /// equal the element count, and the coordinate buffer must hold exactly
    /// one vector per axis.
    pub fn new(
        signal: String,
        order: AxisOrder,
        extents: Vec<usize>,
        data: Vec<f64>,
        coords: Vec<f64>,
    ) -> EquimapResult<Self> {
        let rank = extents.len();
        if rank == 0 || rank > 3 {
            return Err(EquimapError::ConfigError(format!(
                "{signal}: rank must be 1-3, got {rank}"
            )));
        }
        let product: usize = extents.iter().product();
        if product != data.len() {
            return Err(EquimapError::ShapeInconsistency {
                signal,
                declared: data.len(),
                product,
            });
        }
        let coord_len: usize = extents.iter().sum();
        if coord_len != coords.len() {
            return Err(EquimapError::ShapeInconsistency {
                signal,
                declared: coords.len(),
                product: coord_len,
            });
        }
        if order.index() >= rank {
            return Err(EquimapError::NoTimeVector);
        }
        Ok(RawSeries {
            signal,
            rank,
            order,
            extents,
            data,
            coords,
        })
    }

    /// Coordinate vector of axis `k`.
    pub fn axis_coord(&self, k: usize) -> &[f64] {
        let start: usize = self.extents[..k].iter().sum();
        &self.coords[start..start + self.extents[k]]
    }

    /// The time coordinate vector.
    pub fn time_coord(&self) -> &[f64] {
        self.axis_coord(self.order.index())
    }

    pub fn time_extent(&self) -> usize {
        self.extents[self.order.index()]
    }

    fn flat_index(&self, idx: &[usize]) -> usize {
        let mut flat = 0;
        let mut stride = 1;
        for (k, &i) in idx.iter().enumerate() {
            flat += i * stride;
            stride *= self.extents[k];
        }
        flat
    }

    /// Extract the 1D profile of a rank-2 signal at time index `t`.
    pub fn profile_at(&self, t: usize) -> EquimapResult<Array1<f64>> {
        if self.rank != 2 {
            return Err(EquimapError::ConfigError(format!(
                "{}: profile extraction requires rank 2, got {}",
                self.signal, self.rank
            )));
        }
        let time_axis = self.order.index();
        let space_axis = 1 - time_axis;
        let n = self.extents[space_axis];
        let mut out = Array1::zeros(n);
        let mut idx = [0usize; 2];
        idx[time_axis] = t;
        for i in 0..n {
            idx[space_axis] = i;
            out[i] = self.data[self.flat_index(&idx)];
        }
        Ok(out)
    }

    /// Extract the (R,Z) plane of a rank-3 signal at time index `t`.
    ///
    /// Of the two remaining axes the lower-numbered one is R; the result is
    /// indexed `[z][r]` to match the rest of the engine.
    pub fn plane_at(&self, t: usize) -> EquimapResult<Array2<f64>> {
        if self.rank != 3 {
            return Err(EquimapError::ConfigError(format!(
                "{}: plane extraction requires rank 3, got {}",
                self.signal, self.rank
            )));
        }
        let time_axis = self.order.index();
        let mut space = [0usize; 2];
        let mut s = 0;
        for axis in 0..3 {
            if axis != time_axis {
                space[s] = axis;
                s += 1;
            }
        }
        let (r_axis, z_axis) = (space[0], space[1]);
        let (nr, nz) = (self.extents[r_axis], self.extents[z_axis]);
        let mut out = Array2::zeros((nz, nr));
        let mut idx = [0usize; 3];
        idx[time_axis] = t;
        for iz in 0..nz {
            idx[z_axis] = iz;
            for ir in 0..nr {
                idx[r_axis] = ir;
                out[[iz, ir]] = self.data[self.flat_index(&idx)];
            }
        }
        Ok(out)
    }
}

/// The two fixed, time-invariant radial target grids.
///
/// `rho_b` spans [0, 1] over `count` surface points; `rho` holds the
/// `count - 1` midpoints (volume-centred grid). Built once per session,
/// immutable thereafter.
#[derive(Debug, Clone)]
pub struct TargetGrid {
    pub count: usize,
    pub rho_b: Array1<f64>,
    pub rho: Array1<f64>,
}

impl TargetGrid {
    pub fn new(count: usize) -> Self {
        let rho_b = Array1::from_shape_fn(count, |i| i as f64 / (count as f64 - 1.0));
        let rho = Array1::from_shape_fn(count - 1, |i| 0.5 * (rho_b[i] + rho_b[i + 1]));
        TargetGrid { count, rho_b, rho }
    }
}

/// The four interchangeable radial flux-surface coordinate systems derived
/// from one time slice's Q profile.
#[derive(Debug, Clone)]
pub struct FluxLabelSet {
    /// Uniform normalised poloidal flux grid, i/(N-1).
    pub rho_pol: Array1<f64>,
    /// Poloidal flux interpolated between ψ_mag and ψ_bnd.
    pub psi: Array1<f64>,
    /// Toroidal flux, |signed line integral of Q dψ|.
    pub phi: Array1<f64>,
    /// sqrt(φ/φ_bnd); 0 at the axis by convention.
    pub rho_tor_sqrt: Array1<f64>,
    /// Normalised ITM flux radius.
    pub rho_tor_itm: Array1<f64>,
    /// ITM flux radius at the boundary, sqrt(φ_bnd / (π |B_vac|)).
    pub rho_tor_bnd: f64,
}

/// Minimal (R,Z) rectangle enclosing a boundary locus.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryBox {
    pub r_min: f64,
    pub r_max: f64,
    pub z_min: f64,
    pub z_max: f64,
}

impl BoundaryBox {
    /// Scan a boundary locus. Non-finite points never win a comparison and
    /// are skipped; an all-bad locus keeps the sentinel extremes.
    pub fn scan(r_locus: &[f64], z_locus: &[f64]) -> Self {
        let mut b = BoundaryBox {
            r_min: 1.0e10,
            r_max: -1.0e10,
            z_min: 1.0e10,
            z_max: -1.0e10,
        };
        for (&r, &z) in r_locus.iter().zip(z_locus) {
            if r > b.r_max {
                b.r_max = r;
            }
            if r < b.r_min {
                b.r_min = r;
            }
            if z > b.z_max {
                b.z_max = z;
            }
            if z < b.z_min {
                b.z_min = z;
            }
        }
        b
    }

    pub fn union(&self, other: &BoundaryBox) -> BoundaryBox {
        BoundaryBox {
            r_min: self.r_min.min(other.r_min),
            r_max: self.r_max.max(other.r_max),
            z_min: self.z_min.min(other.z_min),
            z_max: self.z_max.max(other.z_max),
        }
    }
}

/// A profile resampled onto a fixed target grid.
///
/// Target points no mapping pass covered keep their zero initialisation and
/// `valid == false`; callers overwriting known boundary values (magnetic
/// axis, LCFS) can tell "unmapped" from "measured zero".
#[derive(Debug, Clone)]
pub struct MappedProfile {
    pub values: Array1<f64>,
    pub valid: Vec<bool>,
}

impl MappedProfile {
    pub fn zeroed(n: usize) -> Self {
        MappedProfile {
            values: Array1::zeros(n),
            valid: vec![false; n],
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A reduced (R,Z) flux map: shared sub-grid coordinates plus one reduced
/// ψ block per time slice.
#[derive(Debug, Clone)]
pub struct ReducedFluxMap {
    pub r: Array1<f64>,
    pub z: Array1<f64>,
    pub psi: Vec<Array2<f64>>,
}
