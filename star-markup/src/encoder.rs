//! Document encoders for turning markup into printer payloads
//!
//! Supports:
//! - `cputil` conversion to StarPRNT bytes (Star's CloudPRNT utility)
//! - Pass-through delivery of the markup itself

use crate::error::{EncodeError, EncodeResult};
use async_trait::async_trait;
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tokio::process::Command;
use tracing::{debug, instrument};

/// Media type of an encoded document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    /// Star Document Markup text, consumed by markup-aware printers
    StarMarkup,
    /// StarPRNT printer-native command stream
    StarPrnt,
}

impl ContentType {
    /// The MIME type string sent on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::StarMarkup => "text/vnd.star.markup",
            ContentType::StarPrnt => "application/vnd.star.starprnt",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Target printer family passed to `cputil`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrinterModel {
    /// 2 inch (58mm) thermal printers
    Thermal2,
    /// 3 inch (80mm) thermal printers
    Thermal3,
    /// 4 inch (112mm) thermal printers
    Thermal4,
}

impl PrinterModel {
    /// Command-line token `cputil` expects for this model
    pub fn as_arg(&self) -> &'static str {
        match self {
            PrinterModel::Thermal2 => "thermal2",
            PrinterModel::Thermal3 => "thermal3",
            PrinterModel::Thermal4 => "thermal4",
        }
    }
}

impl fmt::Display for PrinterModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_arg())
    }
}

impl FromStr for PrinterModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "thermal2" => Ok(PrinterModel::Thermal2),
            "thermal3" => Ok(PrinterModel::Thermal3),
            "thermal4" => Ok(PrinterModel::Thermal4),
            other => Err(format!("unknown printer model: {}", other)),
        }
    }
}

/// Trait for document encoders
#[async_trait]
pub trait DocumentEncoder: Send + Sync {
    /// Convert a markup document into the bytes a printer consumes
    async fn encode(&self, markup: &str) -> EncodeResult<Vec<u8>>;

    /// Media type of the bytes `encode` produces
    fn media_type(&self) -> ContentType;
}

/// Pass-through encoder
///
/// Returns the markup verbatim for printers that accept
/// `text/vnd.star.markup` natively. Also the deterministic encoder used in
/// tests, since its output needs no external tool.
#[derive(Debug, Clone, Default)]
pub struct PassthroughEncoder;

impl PassthroughEncoder {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DocumentEncoder for PassthroughEncoder {
    async fn encode(&self, markup: &str) -> EncodeResult<Vec<u8>> {
        Ok(markup.as_bytes().to_vec())
    }

    fn media_type(&self) -> ContentType {
        ContentType::StarMarkup
    }
}

/// `cputil` subprocess encoder
///
/// Writes the markup to a scratch file, runs
/// `cputil <model> decode application/vnd.star.starprnt <in> <out>` and
/// returns the converted bytes. The scratch directory is removed on drop.
#[derive(Debug, Clone)]
pub struct CputilEncoder {
    tool: PathBuf,
    model: PrinterModel,
}

impl CputilEncoder {
    /// Create an encoder wrapping the `cputil` binary at `tool`
    pub fn new(tool: impl Into<PathBuf>, model: PrinterModel) -> Self {
        Self {
            tool: tool.into(),
            model,
        }
    }

    /// Get the configured printer model
    pub fn model(&self) -> PrinterModel {
        self.model
    }

    fn build_args(&self, input: &Path, output: &Path) -> Vec<OsString> {
        vec![
            self.model.as_arg().into(),
            "decode".into(),
            ContentType::StarPrnt.as_str().into(),
            input.as_os_str().to_os_string(),
            output.as_os_str().to_os_string(),
        ]
    }
}

#[async_trait]
impl DocumentEncoder for CputilEncoder {
    #[instrument(skip(self, markup), fields(tool = %self.tool.display(), markup_len = markup.len()))]
    async fn encode(&self, markup: &str) -> EncodeResult<Vec<u8>> {
        let dir = tempfile::tempdir()?;
        let input = dir.path().join("document.stm");
        let output = dir.path().join("document.bin");

        tokio::fs::write(&input, markup).await?;

        let result = Command::new(&self.tool)
            .args(self.build_args(&input, &output))
            .output()
            .await?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr).trim().to_string();
            return Err(EncodeError::ToolFailed {
                status: result.status.code().unwrap_or(-1),
                stderr,
            });
        }

        let bytes = tokio::fs::read(&output)
            .await
            .map_err(|_| EncodeError::MissingOutput(output.display().to_string()))?;

        debug!(bytes = bytes.len(), "markup converted");
        Ok(bytes)
    }

    fn media_type(&self) -> ContentType {
        ContentType::StarPrnt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_passthrough_returns_markup_verbatim() {
        let encoder = PassthroughEncoder::new();
        let markup = "[align: center]\nThank you!\n[cut: feed; partial]\n";

        let bytes = encoder.encode(markup).await.unwrap();
        assert_eq!(bytes, markup.as_bytes());
        assert_eq!(encoder.media_type(), ContentType::StarMarkup);
    }

    #[test]
    fn test_cputil_args() {
        let encoder = CputilEncoder::new("/usr/bin/cputil", PrinterModel::Thermal3);
        let args = encoder.build_args(Path::new("/tmp/in.stm"), Path::new("/tmp/out.bin"));

        let args: Vec<String> = args
            .into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            args,
            vec![
                "thermal3",
                "decode",
                "application/vnd.star.starprnt",
                "/tmp/in.stm",
                "/tmp/out.bin",
            ]
        );
        assert_eq!(encoder.media_type(), ContentType::StarPrnt);
    }

    #[test]
    fn test_printer_model_parse() {
        assert_eq!("thermal3".parse::<PrinterModel>(), Ok(PrinterModel::Thermal3));
        assert_eq!("THERMAL2".parse::<PrinterModel>(), Ok(PrinterModel::Thermal2));
        assert!("dot-matrix".parse::<PrinterModel>().is_err());
    }

    #[test]
    fn test_content_type_strings() {
        assert_eq!(ContentType::StarMarkup.as_str(), "text/vnd.star.markup");
        assert_eq!(
            ContentType::StarPrnt.as_str(),
            "application/vnd.star.starprnt"
        );
    }
}
