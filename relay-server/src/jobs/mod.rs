//! Print Job Module
//!
//! Everything between the HTTP boundary and the store:
//! - Job identities and stored record shapes
//! - Print tokens (the client-held cursor of the pull protocol)
//! - Pending-job lookup
//! - The poll / fetch / acknowledge lifecycle service

pub mod query;
pub mod service;
pub mod token;
pub mod types;

pub use query::find_pending;
pub use service::{FetchPayload, PollOutcome, PrintJobService};
pub use token::{PrintToken, TokenError};
pub use types::{JobKey, JobRecord, JobStatus, KEY_NAMESPACE, PrinterIdentity};
