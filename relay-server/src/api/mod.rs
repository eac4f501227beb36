//! API route modules
//!
//! # Structure
//!
//! - [`health`] - liveness check
//! - [`print`] - the printer pull protocol

pub mod health;
pub mod print;
