//! Print job identities and stored records
//!
//! A job lives in the shared store under `printJob:<printer>:<suffix>` with a
//! JSON value `{status, order}`. The `order` field is itself a JSON-encoded
//! string (double-encoded by the upstream order system), so reading an order
//! always takes two parse steps: first the record, then the payload.

use crate::receipt::Order;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Key namespace shared with the upstream order system
pub const KEY_NAMESPACE: &str = "printJob";

/// Stable hardware identifier of one physical printer (MAC-like string)
///
/// Each printer owns its own slice of the key space; two printers never see
/// each other's jobs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PrinterIdentity(String);

impl PrinterIdentity {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PrinterIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PrinterIdentity {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

/// Full store key of one print job
///
/// Serializes transparently as the raw key string so a list of keys is a
/// plain JSON array of strings on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobKey(String);

impl JobKey {
    /// Compose a namespaced key for a printer and a unique suffix
    pub fn new(printer: &PrinterIdentity, suffix: &str) -> Self {
        Self(format!("{}:{}:{}", KEY_NAMESPACE, printer, suffix))
    }

    /// Scan prefix matching every job owned by `printer`
    pub fn scan_prefix(printer: &PrinterIdentity) -> String {
        format!("{}:{}:", KEY_NAMESPACE, printer)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for JobKey {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for JobKey {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

/// Job state as written by the upstream order system
///
/// Only PENDING jobs are ever printed. DONE is the other value observed in
/// production; anything else (`COMPLETE` has been seen) parses into `Other`
/// and is treated as a valid, non-pending record rather than a corrupt one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JobStatus {
    Pending,
    Done,
    Other(String),
}

impl From<String> for JobStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "PENDING" => JobStatus::Pending,
            "DONE" => JobStatus::Done,
            _ => JobStatus::Other(raw),
        }
    }
}

impl From<JobStatus> for String {
    fn from(status: JobStatus) -> Self {
        match status {
            JobStatus::Pending => "PENDING".to_string(),
            JobStatus::Done => "DONE".to_string(),
            JobStatus::Other(raw) => raw,
        }
    }
}

/// Stored job value: `{status, order}`
///
/// `order` stays a String here on purpose — the store value is JSON whose
/// `order` field is a JSON string, not a nested object. [`Self::parse_order`]
/// runs the second decode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRecord {
    pub status: JobStatus,
    pub order: String,
}

impl JobRecord {
    /// Decode the embedded order payload (the second of the two parse steps)
    pub fn parse_order(&self) -> Result<Order, serde_json::Error> {
        serde_json::from_str(&self.order)
    }
}
