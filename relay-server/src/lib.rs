//! Print Relay Server - pull-protocol job relay for polling thermal printers
//!
//! # Overview
//!
//! The relay sits between an upstream order system, which writes print jobs
//! into a shared store, and CloudPRNT-style printers, which poll over HTTP:
//!
//! - **Store** (`store`): job store seam; embedded redb in deployment
//! - **Jobs** (`jobs`): job identities, print tokens, the lifecycle service
//! - **Receipts** (`receipt`): order payload model and markup rendering
//! - **HTTP API** (`api`): the three-verb printer pull protocol
//!
//! Printers drive everything. The relay never pushes, retries or schedules;
//! it answers polls, serves rendered receipts and deletes what printers
//! acknowledge.
//!
//! # Module structure
//!
//! ```text
//! relay-server/src/
//! ├── core/          # config, state, server, tasks, error taxonomy
//! ├── api/           # HTTP routes and handlers
//! ├── jobs/          # job domain and lifecycle service
//! ├── receipt/       # order model and receipt renderer
//! ├── store/         # job store trait and backends
//! ├── telemetry.rs   # error telemetry seam
//! └── utils/         # logging
//! ```

pub mod api;
pub mod core;
pub mod jobs;
pub mod receipt;
pub mod store;
pub mod telemetry;
pub mod utils;

// Re-export public types
pub use crate::core::{Config, EncoderKind, RelayError, RelayResult, Server, ServerState, build_app};
pub use jobs::{PrintJobService, PrintToken, PrinterIdentity};
pub use store::{JobStore, MemoryJobStore, RedbJobStore};
pub use telemetry::{ErrorTelemetry, TracingTelemetry};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Prepare the process environment: dotenv, log directory, logging
///
/// Call once, before [`Config::from_env`].
pub fn setup_environment() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let log_dir = std::env::var("LOG_DIR").ok();
    if let Some(dir) = &log_dir {
        std::fs::create_dir_all(dir)?;
    }

    let log_level = std::env::var("LOG_LEVEL").ok();
    utils::logger::init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    ____       __
   / __ \___  / /___ ___  __
  / /_/ / _ \/ / __ `/ / / /
 / _, _/  __/ / /_/ / /_/ /
/_/ |_|\___/_/\__,_/\__, /
                   /____/
    "#
    );
}
