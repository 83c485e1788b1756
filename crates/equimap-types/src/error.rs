// ─────────────────────────────────────────────────────────────────────
// SCPN EquiMap — Errors
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
/// Error taxonomy of the remapping engine.
///
/// Every variant maps to a stable numeric code via [`EquimapError::code`];
/// the hosting middleware keys its error-stack reporting off these codes,
/// so they must not change between releases. No component retries: a failed
/// request is aborted and the error propagated to the caller.
///
/// `Display`/`Error` are implemented by hand because `UpstreamFetch` carries
/// a `source` field that is a plain label, not a chained error, and the
/// derive would insist on treating it as the error source.
#[derive(Debug)]
pub enum EquimapError {
    ShapeInconsistency {
        signal: String,
        declared: usize,
        product: usize,
    },

    NoTimeVector,

    TimeNotLocated { slice: f64 },

    AllPointsNonFinite,

    OneValidPoint,

    InterpolationDomain(String),

    UpstreamFetch {
        signal: String,
        source: String,
        message: String,
    },

    ConfigError(String),

    Io(std::io::Error),

    Json(serde_json::Error),
}

impl std::fmt::Display for EquimapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EquimapError::ShapeInconsistency {
                signal,
                declared,
                product,
            } => write!(
                f,
                "{signal}: declared element count {declared} inconsistent with extents product {product}"
            ),
            EquimapError::NoTimeVector => write!(f, "there is no time vector for this data"),
            EquimapError::TimeNotLocated { slice } => write!(
                f,
                "the requested time {slice:e} could not be located in the coordinate data"
            ),
            EquimapError::AllPointsNonFinite => {
                write!(f, "all data are either NaN or infinite")
            }
            EquimapError::OneValidPoint => write!(
                f,
                "only one good data point - no points to interpolate between"
            ),
            EquimapError::InterpolationDomain(msg) => {
                write!(f, "interpolation domain contains non-finite values: {msg}")
            }
            EquimapError::UpstreamFetch {
                signal,
                source,
                message,
            } => write!(f, "no {signal} data from {source}: {message}"),
            EquimapError::ConfigError(msg) => write!(f, "configuration error: {msg}"),
            EquimapError::Io(err) => write!(f, "IO error: {err}"),
            EquimapError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl std::error::Error for EquimapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EquimapError::Io(err) => Some(err),
            EquimapError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for EquimapError {
    fn from(err: std::io::Error) -> Self {
        EquimapError::Io(err)
    }
}

impl From<serde_json::Error> for EquimapError {
    fn from(err: serde_json::Error) -> Self {
        EquimapError::Json(err)
    }
}

impl EquimapError {
    /// Stable numeric code reported through the caller-visible error channel.
    pub fn code(&self) -> i32 {
        match self {
            EquimapError::ShapeInconsistency { .. } => 3,
            EquimapError::NoTimeVector => 1,
            EquimapError::TimeNotLocated { .. } => 2,
            EquimapError::AllPointsNonFinite => 1,
            EquimapError::OneValidPoint => 2,
            EquimapError::InterpolationDomain(_) => 4,
            EquimapError::UpstreamFetch { .. } => 5,
            EquimapError::ConfigError(_) => 999,
            EquimapError::Io(_) => 998,
            EquimapError::Json(_) => 997,
        }
    }
}

pub type EquimapResult<T> = Result<T, EquimapError>;
