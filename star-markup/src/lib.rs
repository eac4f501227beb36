//! # star-markup
//!
//! Star Document Markup library - low-level receipt document building only.
//!
//! ## Scope
//!
//! This crate handles HOW a document reaches the printer:
//! - Star Document Markup composition (alignment, magnification, columns, cuts)
//! - Conversion to printer-native bytes via Star's `cputil` tool
//! - Pass-through delivery for printers that consume markup directly
//!
//! Business logic (WHAT to print) should stay in application code:
//! - Receipt rendering → relay-server
//!
//! ## Example
//!
//! ```ignore
//! use star_markup::{CputilEncoder, DocumentEncoder, MarkupBuilder, PrinterModel};
//!
//! // Build markup content
//! let mut b = MarkupBuilder::new(48);
//! b.align_center();
//! b.magnify(2, 2);
//! b.line("Thank you!");
//! b.plain();
//! b.cut();
//!
//! // Convert to StarPRNT bytes
//! let encoder = CputilEncoder::new("cputil", PrinterModel::Thermal3);
//! let bytes = encoder.encode(&b.finalize()).await?;
//! ```

mod document;
mod encoder;
mod error;

// Re-exports
pub use document::{Font, Indent, MarkupBuilder};
pub use encoder::{ContentType, CputilEncoder, DocumentEncoder, PassthroughEncoder, PrinterModel};
pub use error::{EncodeError, EncodeResult};
