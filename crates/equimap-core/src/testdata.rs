//! Synthetic equilibrium dataset shared by the unit tests.
//!
//! Two time slices of a circular plasma centred at (R, Z) = (5, 0):
//! ψ(R,Z) = (R-5)² + Z², LCFS of radius 1.5, smooth q/p/F profiles on a
//! uniform normalised-flux abscissa.

use std::collections::HashMap;

use equimap_types::error::{EquimapError, EquimapResult};
use equimap_types::state::SignalValues;

use crate::resolve::{RawSignal, SignalClient};
use crate::slice::SignalCatalog;

pub const TIMES: [f64; 2] = [0.1, 0.2];
pub const N_PROFILE: usize = 11;
const N_LCFS: usize = 16;
pub const N_GRID: usize = 17;

pub struct TestClient {
    signals: HashMap<String, RawSignal>,
}

impl SignalClient for TestClient {
    fn fetch(&self, signal: &str, source: &str) -> EquimapResult<RawSignal> {
        self.signals
            .get(signal)
            .cloned()
            .ok_or_else(|| EquimapError::UpstreamFetch {
                signal: signal.to_string(),
                source: source.to_string(),
                message: "signal not in test catalog".to_string(),
            })
    }
}

pub fn catalog() -> SignalCatalog {
    SignalCatalog {
        psi_mag: "psi_mag".into(),
        psi_bnd: "psi_bnd".into(),
        b_vac: "b_vac".into(),
        ip: "ip".into(),
        r_mag: "r_mag".into(),
        z_mag: "z_mag".into(),
        q: "q".into(),
        p: "p".into(),
        f: "f".into(),
        p_prime: "p_prime".into(),
        ff_prime: "ff_prime".into(),
        volume: "volume".into(),
        area: "area".into(),
        r_lcfs: "r_lcfs".into(),
        z_lcfs: "z_lcfs".into(),
        psi_map: "psi_map".into(),
    }
}

fn scalar(values: [f64; 2]) -> RawSignal {
    RawSignal {
        order: 0,
        extents: vec![2],
        values: SignalValues::F64(values.to_vec()),
        coords: vec![SignalValues::F64(TIMES.to_vec())],
    }
}

/// Rank-2 profile vs (ψ_norm, t), time as the second axis.
fn profile(f: impl Fn(f64, usize) -> f64) -> RawSignal {
    let mut data = Vec::with_capacity(N_PROFILE * 2);
    for t in 0..2 {
        for x in 0..N_PROFILE {
            let u = x as f64 / (N_PROFILE as f64 - 1.0);
            data.push(f(u, t));
        }
    }
    let psi_norm: Vec<f64> = (0..N_PROFILE)
        .map(|x| x as f64 / (N_PROFILE as f64 - 1.0))
        .collect();
    RawSignal {
        order: 1,
        extents: vec![N_PROFILE, 2],
        values: SignalValues::F64(data),
        coords: vec![
            SignalValues::F64(psi_norm),
            SignalValues::F64(TIMES.to_vec()),
        ],
    }
}

fn lcfs(f: impl Fn(f64) -> f64) -> RawSignal {
    let mut data = Vec::with_capacity(N_LCFS * 2);
    for _t in 0..2 {
        for k in 0..N_LCFS {
            let theta = 2.0 * std::f64::consts::PI * k as f64 / N_LCFS as f64;
            data.push(f(theta));
        }
    }
    let index: Vec<f64> = (0..N_LCFS).map(|k| k as f64).collect();
    RawSignal {
        order: 1,
        extents: vec![N_LCFS, 2],
        values: SignalValues::F64(data),
        coords: vec![SignalValues::F64(index), SignalValues::F64(TIMES.to_vec())],
    }
}

fn psi_map() -> RawSignal {
    let r: Vec<f64> = (0..N_GRID)
        .map(|i| 2.0 + 6.0 * i as f64 / (N_GRID as f64 - 1.0))
        .collect();
    let z: Vec<f64> = (0..N_GRID)
        .map(|i| -3.0 + 6.0 * i as f64 / (N_GRID as f64 - 1.0))
        .collect();
    let mut data = Vec::with_capacity(N_GRID * N_GRID * 2);
    for t in 0..2 {
        for iz in 0..N_GRID {
            for ir in 0..N_GRID {
                data.push((r[ir] - 5.0).powi(2) + z[iz].powi(2) + 0.01 * t as f64);
            }
        }
    }
    RawSignal {
        order: 2,
        extents: vec![N_GRID, N_GRID, 2],
        values: SignalValues::F64(data),
        coords: vec![
            SignalValues::F64(r),
            SignalValues::F64(z),
            SignalValues::F64(TIMES.to_vec()),
        ],
    }
}

pub fn synthetic_client() -> TestClient {
    let mut signals = HashMap::new();
    signals.insert("psi_mag".to_string(), scalar([-0.30, -0.28]));
    signals.insert("psi_bnd".to_string(), scalar([0.50, 0.52]));
    signals.insert("b_vac".to_string(), scalar([2.5, 2.5]));
    signals.insert("ip".to_string(), scalar([1.0e6, 1.1e6]));
    signals.insert("r_mag".to_string(), scalar([5.0, 5.02]));
    signals.insert("z_mag".to_string(), scalar([0.0, 0.01]));
    signals.insert(
        "q".to_string(),
        profile(|u, t| 1.0 + 2.0 * u * u + 0.1 * t as f64),
    );
    signals.insert(
        "p".to_string(),
        profile(|u, t| 1.0e4 * (1.0 - u * u) + 100.0 * t as f64),
    );
    signals.insert("f".to_string(), profile(|u, _| 5.0 - 0.5 * u));
    signals.insert("p_prime".to_string(), profile(|u, _| -2.0e4 * u));
    signals.insert("ff_prime".to_string(), profile(|u, _| -0.5 * u));
    signals.insert("volume".to_string(), profile(|u, _| 20.0 * u));
    signals.insert("area".to_string(), profile(|u, _| 6.0 * u));
    signals.insert(
        "r_lcfs".to_string(),
        lcfs(|theta| 5.0 + 1.5 * theta.cos()),
    );
    signals.insert("z_lcfs".to_string(), lcfs(|theta| 1.5 * theta.sin()));
    signals.insert("psi_map".to_string(), psi_map());
    TestClient { signals }
}
