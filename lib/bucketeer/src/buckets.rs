//! Histogram bucket boundary generation.

use std::{ops::Deref, sync::LazyLock};

use snafu::{ensure, Snafu};

/// Sentinel bucket bound representing "no upper limit".
///
/// Every [`BucketSequence`] terminates in this value, so observations exceeding the largest finite
/// boundary are always counted by the final, open-ended bucket.
pub const INF: f64 = f64::INFINITY;

// Hand-tuned latency bounds: sub-10ms resolution for fast calls, coarse single-digit-second
// resolution for regular calls, and a 30s-to-180s tail for large workloads.
const DEFAULT_BUCKET_BOUNDS: [f64; 15] = [
    0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0, 180.0,
];

/// Default latency bucket set, spanning 5 milliseconds to 180 seconds.
///
/// Shared, read-only configuration for any component recording latency histograms: 15 finite
/// bounds plus the trailing [`INF`] sentinel, 16 entries in total. Covers fast calls (5ms floor),
/// regular calls (100ms floor), long calls (2.5s floor), and large workloads (30s floor, 180s
/// ceiling).
pub static DEFAULT_BUCKETS: LazyLock<BucketSequence> = LazyLock::new(|| {
    let mut bounds = DEFAULT_BUCKET_BOUNDS.to_vec();
    bounds.push(INF);
    BucketSequence(bounds)
});

/// Errors related to invalid bucket generator arguments.
///
/// These indicate programming errors at the call site: validation happens before any boundary is
/// emitted, no partial sequence is ever returned, and nothing is retried.
#[derive(Debug, PartialEq, Snafu)]
pub enum BucketError {
    /// The starting bound was not usable.
    #[snafu(display("bucket start must be positive, got {}", start))]
    InvalidStart {
        /// Starting bound that was given.
        start: f64,
    },

    /// The growth factor would not produce an increasing sequence.
    #[snafu(display("bucket growth factor must be greater than 1, got {}", factor))]
    InvalidFactor {
        /// Growth factor that was given.
        factor: f64,
    },

    /// The maximum bound did not exceed the starting bound.
    #[snafu(display(
        "bucket maximum bound must be finite and greater than start: got {} with start {}",
        max_bound,
        start
    ))]
    InvalidMaxBound {
        /// Starting bound that was given.
        start: f64,
        /// Maximum bound that was given.
        max_bound: f64,
    },

    /// The bucket width was not usable.
    #[snafu(display("bucket width must be positive, got {}", width))]
    InvalidWidth {
        /// Bucket width that was given.
        width: f64,
    },

    /// The bucket count was zero.
    #[snafu(display("bucket count must be at least one"))]
    InvalidCount,

    /// Explicit bounds were empty, non-finite, or not strictly increasing.
    #[snafu(display("explicit bucket bounds must be non-empty, finite, and strictly increasing"))]
    InvalidBounds,
}

/// An ordered sequence of histogram bucket upper bounds.
///
/// Invariants: the sequence is strictly increasing, has at least two elements, and its last
/// element is the [`INF`] sentinel while all prior elements are finite. There is no mutation API,
/// so a sequence that has been constructed always upholds these invariants.
///
/// Dereferences to `[f64]` for read access, which is how the bounds are handed to a histogram
/// recorder.
#[derive(Clone, Debug, PartialEq)]
pub struct BucketSequence(Vec<f64>);

impl BucketSequence {
    /// Creates a bucket sequence from explicit finite bounds, appending the [`INF`] sentinel.
    ///
    /// # Errors
    ///
    /// If the given bounds are empty, contain a non-finite value, or are not strictly increasing,
    /// an error is returned.
    pub fn from_bounds<I>(bounds: I) -> Result<Self, BucketError>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut bounds = bounds.into_iter().collect::<Vec<_>>();
        ensure!(!bounds.is_empty(), InvalidBoundsSnafu);
        ensure!(bounds.iter().all(|b| b.is_finite()), InvalidBoundsSnafu);
        ensure!(bounds.windows(2).all(|w| w[0] < w[1]), InvalidBoundsSnafu);

        bounds.push(INF);
        Ok(Self(bounds))
    }

    /// Returns the bucket bounds as a slice, including the trailing sentinel.
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Returns the finite bucket bounds, excluding the trailing sentinel.
    pub fn finite_bounds(&self) -> &[f64] {
        &self.0[..self.0.len() - 1]
    }
}

impl Deref for BucketSequence {
    type Target = [f64];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<[f64]> for BucketSequence {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

/// Creates geometrically spaced bucket bounds from `start` up to `max_bound`.
///
/// Emits every value of the series `start * factor^k` that falls below `max_bound`, then
/// `max_bound` itself, so the configured ceiling is always present exactly once, and finally the
/// [`INF`] sentinel. Values carry full double-precision floating point error accumulation; no
/// rounding or snapping is applied.
///
/// # Errors
///
/// If `start` is not positive, `factor` is not greater than 1, or `max_bound` is not finite and
/// greater than `start`, an error is returned.
pub fn exponential_buckets(start: f64, factor: f64, max_bound: f64) -> Result<BucketSequence, BucketError> {
    ensure!(start > 0.0, InvalidStartSnafu { start });
    ensure!(factor > 1.0, InvalidFactorSnafu { factor });
    ensure!(max_bound.is_finite() && max_bound > start, InvalidMaxBoundSnafu { start, max_bound });

    let mut bounds = Vec::new();
    let mut bound = start;
    while bound < max_bound {
        bounds.push(bound);
        bound *= factor;
    }

    // The loop stops before emitting anything at or above the ceiling, whether the series
    // overshoots it or lands on it exactly, so appending it here keeps it present exactly once.
    bounds.push(max_bound);
    bounds.push(INF);

    Ok(BucketSequence(bounds))
}

/// Creates arithmetically spaced bucket bounds starting at `start`.
///
/// Emits exactly `count` values `start + i*width` for `i` in `0..count`, followed by the [`INF`]
/// sentinel. Unlike [`exponential_buckets`], there is no ceiling parameter: the caller controls
/// the largest finite bound purely through `count` and `width`, and no extra boundary value is
/// inserted before the sentinel.
///
/// # Errors
///
/// If `start` is not finite, `width` is not finite and positive, or `count` is zero, an error is
/// returned.
pub fn linear_buckets(start: f64, width: f64, count: usize) -> Result<BucketSequence, BucketError> {
    ensure!(start.is_finite(), InvalidStartSnafu { start });
    ensure!(width.is_finite() && width > 0.0, InvalidWidthSnafu { width });
    ensure!(count >= 1, InvalidCountSnafu);

    let mut bounds = Vec::with_capacity(count + 1);
    for i in 0..count {
        bounds.push(start + (i as f64) * width);
    }
    bounds.push(INF);

    Ok(BucketSequence(bounds))
}
