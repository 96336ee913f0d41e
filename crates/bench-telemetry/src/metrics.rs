//! Prometheus metrics for Mint-Bench runs.
//!
//! All metrics follow the naming convention: `mb_<metric>_<unit>`
//!
//! ## Metric Types
//!
//! - **Counter**: tool invocations by network and outcome
//! - **Histogram**: wall-clock duration of each invocation
//! - **Gauge**: gas used by the last successful mint per (network, length)

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, CounterVec, Encoder, GaugeVec, HistogramOpts, HistogramVec, Opts,
    Registry, TextEncoder,
};
use std::sync::Arc;
use std::time::Duration;

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    /// Tool invocations by network and outcome
    pub static ref INVOCATIONS: CounterVec = CounterVec::new(
        Opts::new("mb_invocations_total", "Total external tool invocations"),
        &["network", "outcome"]  // outcome: success/failed/timeout
    ).expect("metric creation failed");

    /// Invocation duration histogram
    pub static ref INVOCATION_DURATION: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            "mb_invocation_duration_seconds",
            "Wall-clock time of a single tool invocation"
        ).buckets(exponential_buckets(0.05, 2.0, 12).expect("valid buckets")),
        &["network"]
    ).expect("metric creation failed");

    /// Gas used by the most recent successful mint
    pub static ref GAS_USED: GaugeVec = GaugeVec::new(
        Opts::new("mb_gas_used", "Gas used by the last mint per network and payload length"),
        &["network", "length"]
    ).expect("metric creation failed");
}

/// Outcome label for [`INVOCATIONS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationOutcome {
    /// Tool exited with status 0.
    Success,
    /// Tool could not be spawned or exited non-zero.
    Failed,
    /// Tool was killed after the configured timeout.
    Timeout,
}

impl InvocationOutcome {
    /// Label value used in exported metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failed => "failed",
            Self::Timeout => "timeout",
        }
    }
}

/// Handle returned once collectors are registered
pub struct MetricsHandle {
    _registry: Arc<Registry>,
}

/// Register all metrics with the global registry.
///
/// Calling this more than once is harmless.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(INVOCATIONS.clone()),
        Box::new(INVOCATION_DURATION.clone()),
        Box::new(GAS_USED.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(MetricsHandle {
        _registry: Arc::new(REGISTRY.clone()),
    })
}

/// Record one finished invocation.
pub fn record_invocation(network: &str, outcome: InvocationOutcome, elapsed: Duration) {
    INVOCATIONS
        .with_label_values(&[network, outcome.as_str()])
        .inc();
    INVOCATION_DURATION
        .with_label_values(&[network])
        .observe(elapsed.as_secs_f64());
}

/// Record the gas used by a successful mint.
pub fn record_gas_used(network: &str, length: usize, gas_used: u64) {
    GAS_USED
        .with_label_values(&[network, &length.to_string()])
        .set(gas_used as f64);
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}
