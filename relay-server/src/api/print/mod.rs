//! Print Protocol API Module
//!
//! # Routes
//!
//! | Path | Method | Purpose |
//! |------|--------|---------|
//! | /print | POST | Poll for pending jobs |
//! | /print | GET | Fetch rendered receipts |
//! | /print | DELETE | Acknowledge printed jobs |

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub use handler::{JOB_TOKEN_HEADER, PRINTER_MAC_HEADER};

pub fn router() -> Router<ServerState> {
    Router::new().route(
        "/print",
        post(handler::poll)
            .get(handler::fetch)
            .delete(handler::acknowledge),
    )
}
