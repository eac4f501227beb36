//! Error telemetry seam
//!
//! The relay reports every failed operation to a telemetry sink exactly
//! once before surfacing the error to the caller. The deployment sink
//! writes to the tracing pipeline under the `telemetry` target; tests
//! inject a recording sink instead.

use crate::core::error::RelayError;

/// Sink for request-scoped failures
pub trait ErrorTelemetry: Send + Sync {
    fn capture(&self, error: &RelayError);
}

/// Tracing-backed [`ErrorTelemetry`]
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingTelemetry;

impl TracingTelemetry {
    pub fn new() -> Self {
        Self
    }
}

impl ErrorTelemetry for TracingTelemetry {
    fn capture(&self, error: &RelayError) {
        tracing::error!(target: "telemetry", error = %error, "Relay operation failed");
    }
}
