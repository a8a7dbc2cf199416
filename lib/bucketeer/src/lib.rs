//! Histogram bucket boundary generation and canonical metric name formatting.
//!
//! `bucketeer` provides the two small pieces of shared plumbing that histogram-style
//! instrumentation needs before any value is ever recorded: strictly increasing bucket bound
//! sequences terminating in an open-ended overflow bucket ([`exponential_buckets`],
//! [`linear_buckets`], [`DEFAULT_BUCKETS`]), and collision-resistant metric name construction
//! from heterogeneous parts ([`metric_name()`]). Every operation is pure and synchronous, so all of
//! it is safe to call from any number of threads without synchronization.
#![deny(warnings)]
#![deny(missing_docs)]

pub mod buckets;
pub mod config;
pub mod name;

pub use self::buckets::{
    exponential_buckets, linear_buckets, BucketError, BucketSequence, DEFAULT_BUCKETS, INF,
};
pub use self::config::BucketsConfig;
pub use self::name::{metric_name, MetricName, MetricPart};
