//! Prometheus metrics for the OpenStack credentials operator
//!
//! Tracks reconciliations and whether each secret binding carries usable credentials.

pub mod prometheus;

pub use prometheus::*;
