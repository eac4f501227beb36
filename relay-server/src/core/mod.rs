//! Core module - configuration, state, server and error taxonomy
//!
//! # Structure
//!
//! - [`Config`] - environment-driven configuration
//! - [`ServerState`] - shared request state
//! - [`Server`] - HTTP server lifecycle
//! - [`RelayError`] - request failure taxonomy

pub mod config;
pub mod error;
pub mod server;
pub mod state;
pub mod tasks;

pub use config::{Config, EncoderKind};
pub use error::{RelayError, RelayResult};
pub use server::{Server, build_app};
pub use state::ServerState;
pub use tasks::BackgroundTasks;
