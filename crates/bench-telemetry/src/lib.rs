//! # Bench Telemetry
//!
//! Observability for Mint-Bench runs.
//!
//! ## Components
//!
//! - **Logging**: `tracing` subscriber writing plain or JSON lines to stderr
//! - **Metrics**: Prometheus collectors for tool invocations and gas usage
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bench_telemetry::{init_telemetry, service_span, TelemetryConfig};
//!
//! fn main() {
//!     let config = TelemetryConfig::from_env();
//!     let _guard = init_telemetry(config.clone()).expect("telemetry");
//!     let _span = service_span(&config).entered();
//!     // Invocations recorded from here on show up in `encode_metrics()`
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `MB_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `MB_JSON_LOGS` | `false` | Emit JSON formatted logs |
//! | `MB_CONSOLE_OUTPUT` | `true` | Write logs to stderr at all |
//! | `MB_SERVICE_NAME` | `mint-bench` | Service name on the root span |

#![warn(missing_docs)]

mod config;
mod logging;
pub mod metrics;

pub use config::TelemetryConfig;
pub use logging::{init_logging, service_span};
pub use metrics::{
    encode_metrics, record_gas_used, record_invocation, register_metrics, InvocationOutcome,
    MetricsHandle, GAS_USED, INVOCATIONS, INVOCATION_DURATION,
};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// The global subscriber could not be installed.
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    /// A collector could not be registered or encoded.
    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    /// The log filter directive was rejected.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Initialize logging and metrics.
///
/// Returns a guard that should be held for the lifetime of the process.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    // Metrics first so the first logged invocation is already counted
    let metrics_handle = register_metrics()?;

    init_logging(&config)?;

    tracing::debug!(
        service = %config.service_name,
        json_logs = config.json_logs,
        "Telemetry initialized"
    );

    Ok(TelemetryGuard {
        _metrics: metrics_handle,
    })
}

/// Guard that keeps telemetry active.
pub struct TelemetryGuard {
    _metrics: MetricsHandle,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::debug!("Shutting down telemetry");
    }
}
