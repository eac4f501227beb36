//! Utility module
//!
//! - [`logger`] - tracing setup (console + optional rolling files)

pub mod logger;
