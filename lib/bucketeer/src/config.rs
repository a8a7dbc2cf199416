//! Declarative bucket layout configuration.

use serde::Deserialize;
use tracing::debug;

use crate::buckets::{exponential_buckets, linear_buckets, BucketError, BucketSequence, DEFAULT_BUCKETS};

/// Configuration describing how a histogram's bucket bounds should be built.
///
/// This is the typed, deserializable form of the bucket generators, letting consumers declare a
/// bucket layout in their own configuration instead of hardcoding generator calls:
///
/// ```
/// use bucketeer::BucketsConfig;
///
/// let config: BucketsConfig = serde_json::from_str(
///     r#"{ "strategy": "exponential", "start": 0.005, "factor": 2.0, "max_bound": 180.0 }"#,
/// )
/// .unwrap();
/// let buckets = config.build().unwrap();
/// assert_eq!(buckets[0], 0.005);
/// ```
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum BucketsConfig {
    /// The shared default latency bucket set.
    #[default]
    Default,

    /// Geometrically spaced bounds from `start` up to `max_bound`.
    Exponential {
        /// First bucket bound.
        start: f64,
        /// Multiplier applied to produce each subsequent bound.
        factor: f64,
        /// Largest finite bound, always present exactly once.
        max_bound: f64,
    },

    /// Arithmetically spaced bounds starting at `start`.
    Linear {
        /// First bucket bound.
        start: f64,
        /// Distance between adjacent bounds.
        width: f64,
        /// Number of finite bounds to emit.
        count: usize,
    },

    /// Hand-tuned finite bounds, used as-is.
    Explicit {
        /// Strictly increasing finite bounds, without the sentinel.
        bounds: Vec<f64>,
    },
}

impl BucketsConfig {
    /// Builds the bucket bounds described by this configuration.
    ///
    /// # Errors
    ///
    /// If the configured generator arguments are invalid, an error is returned.
    pub fn build(&self) -> Result<BucketSequence, BucketError> {
        let buckets = match self {
            Self::Default => DEFAULT_BUCKETS.clone(),
            Self::Exponential { start, factor, max_bound } => exponential_buckets(*start, *factor, *max_bound)?,
            Self::Linear { start, width, count } => linear_buckets(*start, *width, *count)?,
            Self::Explicit { bounds } => BucketSequence::from_bounds(bounds.iter().copied())?,
        };

        debug!(num_buckets = buckets.len(), "Resolved histogram bucket layout.");

        Ok(buckets)
    }
}
