//! Array-descriptor resolution.
//!
//! Turns an opaque fetched signal into a validated [`RawSeries`]: rank,
//! time-axis order, per-axis extents, one concatenated coordinate buffer
//! and a measurement buffer widened to `f64` regardless of the stored
//! numeric type.

use equimap_types::error::{EquimapError, EquimapResult};
use equimap_types::state::{AxisOrder, RawSeries, SignalValues};

/// A signal exactly as the data-access client delivered it, unvalidated.
#[derive(Debug, Clone)]
pub struct RawSignal {
    /// Index of the time axis, negative when no time vector exists.
    pub order: i32,
    /// Per-axis extents; the rank is the number of entries.
    pub extents: Vec<usize>,
    /// Flat measurement buffer, axis 0 varying fastest.
    pub values: SignalValues,
    /// One coordinate vector per axis.
    pub coords: Vec<SignalValues>,
}

/// The excluded network/client collaborator: fetches raw signals by name
/// and source identifier.
pub trait SignalClient {
    fn fetch(&self, signal: &str, source: &str) -> EquimapResult<RawSignal>;
}

/// Resolve a named signal into a validated series.
///
/// Fatal failure modes: the client reporting no data (`UpstreamFetch`), a
/// declared element count inconsistent with the extents product, or a
/// coordinate vector whose length disagrees with its axis extent (both
/// `ShapeInconsistency`). Downstream slicing cannot proceed safely after
/// either, so nothing is retried here.
///
/// Resolution is pure: the same fetched payload always resolves to the
/// same `(rank, order, extents)`.
pub fn resolve_array(
    client: &dyn SignalClient,
    signal: &str,
    source: &str,
) -> EquimapResult<RawSeries> {
    let raw = client.fetch(signal, source)?;

    let rank = raw.extents.len();
    let order = AxisOrder::from_index(raw.order, rank)?;

    if raw.coords.len() != rank {
        return Err(EquimapError::ShapeInconsistency {
            signal: signal.to_string(),
            declared: raw.coords.len(),
            product: rank,
        });
    }
    for (k, coord) in raw.coords.iter().enumerate() {
        if coord.len() != raw.extents[k] {
            return Err(EquimapError::ShapeInconsistency {
                signal: signal.to_string(),
                declared: coord.len(),
                product: raw.extents[k],
            });
        }
    }

    // Concatenate the per-axis coordinate vectors in axis order and widen
    // everything to f64.
    let mut coords = Vec::with_capacity(raw.extents.iter().sum());
    for coord in &raw.coords {
        coords.extend(coord.to_f64());
    }

    RawSeries::new(
        signal.to_string(),
        order,
        raw.extents,
        raw.values.to_f64(),
        coords,
    )
}
