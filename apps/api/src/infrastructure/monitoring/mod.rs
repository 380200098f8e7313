//! Monitoring infrastructure: the Prometheus-backed registry that every request,
//! handler and the `/metrics` scrape endpoint share.

pub mod metrics;

pub use metrics::{
    ACTIVE_REQUESTS, CONTENT_TYPE, ERRORS_TOTAL, LATENCY_BUCKETS, Labels, MetricsError, MetricsService,
    REQUEST_COUNT, REQUEST_LATENCY,
};
