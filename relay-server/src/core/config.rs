use star_markup::PrinterModel;
use std::str::FromStr;

/// Which document encoder serves fetch requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncoderKind {
    /// Convert markup to StarPRNT bytes through the `cputil` tool
    Cputil,
    /// Deliver the markup text verbatim (markup-aware printers, tests)
    Passthrough,
}

impl FromStr for EncoderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cputil" => Ok(EncoderKind::Cputil),
            "passthrough" => Ok(EncoderKind::Passthrough),
            other => Err(format!("unknown encoder: {}", other)),
        }
    }
}

/// Relay configuration
///
/// # Environment variables
///
/// Every item can be overridden through the environment:
///
/// | Variable | Default | Purpose |
/// |----------|---------|---------|
/// | HTTP_PORT | 3000 | HTTP service port |
/// | STORE_PATH | data/print_jobs.redb | Job database file |
/// | ENCODER | cputil | `cputil` or `passthrough` |
/// | CPUTIL_PATH | cputil | Path to the cputil binary |
/// | PRINTER_MODEL | thermal3 | Target printer family |
/// | RECEIPT_WIDTH | 48 | Paper width in characters |
/// | JOB_PURGE_INTERVAL_SECS | 300 | Delay between expired-job sweeps |
/// | LOG_LEVEL | info | Log verbosity |
/// | LOG_DIR | (unset) | Log file directory; console only when unset |
///
/// # Example
///
/// ```ignore
/// HTTP_PORT=8080 ENCODER=passthrough cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API service port
    pub http_port: u16,
    /// Path of the embedded job database
    pub store_path: String,
    /// Encoder selection for fetch payloads
    pub encoder: EncoderKind,
    /// Path to the `cputil` binary (only used with `EncoderKind::Cputil`)
    pub cputil_path: String,
    /// Printer family passed to `cputil`
    pub printer_model: PrinterModel,
    /// Receipt paper width in characters
    pub receipt_width: usize,
    /// Seconds between expired-job purge sweeps
    pub job_purge_interval_secs: u64,
    /// Log verbosity: trace | debug | info | warn | error
    pub log_level: String,
    /// Log file directory; console-only logging when `None`
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset or unparsable variables fall back to their defaults.
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            store_path: std::env::var("STORE_PATH")
                .unwrap_or_else(|_| "data/print_jobs.redb".into()),
            encoder: std::env::var("ENCODER")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(EncoderKind::Cputil),
            cputil_path: std::env::var("CPUTIL_PATH").unwrap_or_else(|_| "cputil".into()),
            printer_model: std::env::var("PRINTER_MODEL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(PrinterModel::Thermal3),
            receipt_width: std::env::var("RECEIPT_WIDTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(48),
            job_purge_interval_secs: std::env::var("JOB_PURGE_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoder_kind_parse() {
        assert_eq!("cputil".parse(), Ok(EncoderKind::Cputil));
        assert_eq!("PASSTHROUGH".parse(), Ok(EncoderKind::Passthrough));
        assert!("laser".parse::<EncoderKind>().is_err());
    }
}
