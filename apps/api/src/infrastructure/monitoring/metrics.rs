use crate::domain::simulation::entity::ErrorKind;
use prometheus::{
    Encoder, Gauge, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
    proto::MetricFamily,
};
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

pub const REQUEST_COUNT: &str = "http_requests_total";
pub const REQUEST_LATENCY: &str = "http_request_duration_seconds";
pub const ACTIVE_REQUESTS: &str = "active_requests";
pub const ERRORS_TOTAL: &str = "application_errors_total";

/// Upper bounds, in seconds, of the request latency histogram. `+Inf` is implicit.
pub const LATENCY_BUCKETS: [f64; 10] = [0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0];

/// Content type of the text exposition served on `/metrics`.
pub const CONTENT_TYPE: &str = prometheus::TEXT_FORMAT;

/// Labels passed to the by-name operations. Order does not matter.
pub type Labels<'a> = HashMap<&'a str, &'a str>;

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("Unknown metric: {0}")]
    UnknownMetric(String),
    #[error("Prometheus error: {0}")]
    Prometheus(#[from] prometheus::Error),
}

/// Process-wide registry of every series the service exports.
///
/// Backed by a private `prometheus::Registry`; all metric handles are atomic, so the
/// service is shared behind an `Arc` and mutated from any request task without extra locking.
/// A label combination that has never been seen starts at zero the first time it is touched.
pub struct MetricsService {
    registry: Registry,

    /// Requests by method, endpoint and status code
    request_count: IntCounterVec,

    /// Request latency by method and endpoint
    request_latency: HistogramVec,

    /// Requests between the start and end of instrumentation
    active_requests: Gauge,

    /// Synthetic application errors by type
    errors_total: IntCounterVec,

    counters: HashMap<&'static str, IntCounterVec>,
    histograms: HashMap<&'static str, HistogramVec>,
    gauges: HashMap<&'static str, Gauge>,
}

impl MetricsService {
    /// Creates the registry and registers the four service metrics.
    pub fn new() -> Result<Self, MetricsError> {
        let registry = Registry::new();

        let request_count = IntCounterVec::new(
            Opts::new(REQUEST_COUNT, "Total HTTP requests received"),
            &["method", "endpoint", "status"],
        )?;
        let request_latency = HistogramVec::new(
            HistogramOpts::new(REQUEST_LATENCY, "HTTP request latency in seconds")
                .buckets(LATENCY_BUCKETS.to_vec()),
            &["method", "endpoint"],
        )?;
        let active_requests = Gauge::new(
            ACTIVE_REQUESTS,
            "Number of active requests being processed",
        )?;
        let errors_total = IntCounterVec::new(
            Opts::new(ERRORS_TOTAL, "Total application errors"),
            &["type"],
        )?;

        registry.register(Box::new(request_count.clone()))?;
        registry.register(Box::new(request_latency.clone()))?;
        registry.register(Box::new(active_requests.clone()))?;
        registry.register(Box::new(errors_total.clone()))?;

        let counters = HashMap::from([
            (REQUEST_COUNT, request_count.clone()),
            (ERRORS_TOTAL, errors_total.clone()),
        ]);
        let histograms = HashMap::from([(REQUEST_LATENCY, request_latency.clone())]);
        let gauges = HashMap::from([(ACTIVE_REQUESTS, active_requests.clone())]);

        Ok(Self {
            registry,
            request_count,
            request_latency,
            active_requests,
            errors_total,
            counters,
            histograms,
            gauges,
        })
    }

    // === By-name operations ===

    pub fn increment_counter(&self, name: &str, labels: &Labels<'_>) -> Result<(), MetricsError> {
        let counter = self
            .counters
            .get(name)
            .ok_or_else(|| MetricsError::UnknownMetric(name.to_string()))?;
        counter.get_metric_with(labels)?.inc();
        Ok(())
    }

    pub fn observe_histogram(
        &self,
        name: &str,
        labels: &Labels<'_>,
        value: f64,
    ) -> Result<(), MetricsError> {
        let histogram = self
            .histograms
            .get(name)
            .ok_or_else(|| MetricsError::UnknownMetric(name.to_string()))?;
        histogram.get_metric_with(labels)?.observe(value);
        Ok(())
    }

    pub fn set_gauge(&self, name: &str, value: f64) -> Result<(), MetricsError> {
        self.gauge(name)?.set(value);
        Ok(())
    }

    pub fn inc_gauge(&self, name: &str, value: f64) -> Result<(), MetricsError> {
        self.gauge(name)?.add(value);
        Ok(())
    }

    pub fn dec_gauge(&self, name: &str, value: f64) -> Result<(), MetricsError> {
        self.gauge(name)?.sub(value);
        Ok(())
    }

    fn gauge(&self, name: &str) -> Result<&Gauge, MetricsError> {
        self.gauges
            .get(name)
            .ok_or_else(|| MetricsError::UnknownMetric(name.to_string()))
    }

    /// Renders every registered series in the Prometheus text exposition format.
    pub fn render_exposition(&self) -> Result<Vec<u8>, MetricsError> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(buffer)
    }

    // === Typed operations used by the HTTP layer ===

    pub fn request_started(&self) {
        self.active_requests.inc();
    }

    pub fn request_finished(&self) {
        self.active_requests.dec();
    }

    /// Records one completed request: a latency observation and a count for its status.
    pub fn record_request(&self, method: &str, endpoint: &str, status: u16, latency: Duration) {
        self.request_latency
            .with_label_values(&[method, endpoint])
            .observe(latency.as_secs_f64());
        self.request_count
            .with_label_values(&[method, endpoint, &status.to_string()])
            .inc();
    }

    pub fn record_error(&self, kind: ErrorKind) {
        self.errors_total.with_label_values(&[kind.label()]).inc();
    }

    // === Read accessors ===
    //
    // These read through `gather()` so that looking at a series never creates it.

    pub fn request_count(&self, method: &str, endpoint: &str, status: u16) -> u64 {
        let status = status.to_string();
        self.find(
            REQUEST_COUNT,
            &[("method", method), ("endpoint", endpoint), ("status", &status)],
        )
        .map(|m| m.get_counter().get_value() as u64)
        .unwrap_or(0)
    }

    pub fn latency_sample_count(&self, method: &str, endpoint: &str) -> u64 {
        self.find(REQUEST_LATENCY, &[("method", method), ("endpoint", endpoint)])
            .map(|m| m.get_histogram().get_sample_count())
            .unwrap_or(0)
    }

    pub fn latency_sample_sum(&self, method: &str, endpoint: &str) -> f64 {
        self.find(REQUEST_LATENCY, &[("method", method), ("endpoint", endpoint)])
            .map(|m| m.get_histogram().get_sample_sum())
            .unwrap_or(0.0)
    }

    pub fn active_requests(&self) -> f64 {
        self.active_requests.get()
    }

    pub fn error_count(&self, kind: ErrorKind) -> u64 {
        self.find(ERRORS_TOTAL, &[("type", kind.label())])
            .map(|m| m.get_counter().get_value() as u64)
            .unwrap_or(0)
    }

    /// Total number of distinct series across all metric families.
    pub fn series_count(&self) -> usize {
        self.registry
            .gather()
            .iter()
            .map(|family| family.get_metric().len())
            .sum()
    }

    fn find(&self, name: &str, labels: &[(&str, &str)]) -> Option<prometheus::proto::Metric> {
        self.registry
            .gather()
            .into_iter()
            .find(|family: &MetricFamily| family.get_name() == name)?
            .get_metric()
            .iter()
            .find(|metric| {
                let pairs = metric.get_label();
                pairs.len() == labels.len()
                    && labels.iter().all(|(key, value)| {
                        pairs
                            .iter()
                            .any(|p| p.get_name() == *key && p.get_value() == *value)
                    })
            })
            .cloned()
    }
}
