//! Print Protocol Handlers
//!
//! The three-verb pull protocol polling printers speak:
//! - POST /print - printer announces itself, receives a job token
//! - GET /print - printer trades the token for printable bytes
//! - DELETE /print - printer confirms printing; named jobs are deleted
//!
//! Printers identify themselves and carry tokens in headers, never bodies.

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::core::ServerState;
use crate::core::error::{RelayError, RelayResult};
use crate::jobs::PrinterIdentity;

/// Header carrying the printer's MAC address on poll
pub const PRINTER_MAC_HEADER: &str = "x-star-mac";
/// Header carrying the job token on fetch and acknowledge
pub const JOB_TOKEN_HEADER: &str = "x-star-token";

/// Poll reply offering a job token
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PollResponse {
    status_code: &'static str,
    job_ready: bool,
    job_token: String,
    media_types: Vec<String>,
}

/// Acknowledge reply
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AckResponse {
    status_code: &'static str,
}

fn required_header<'a>(headers: &'a HeaderMap, name: &'static str) -> RelayResult<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| RelayError::Validation(format!("Missing or invalid {} header", name)))
}

/// POST /print - poll for pending jobs
pub async fn poll(
    State(state): State<ServerState>,
    headers: HeaderMap,
) -> RelayResult<Json<PollResponse>> {
    let printer = PrinterIdentity::new(required_header(&headers, PRINTER_MAC_HEADER)?);

    let outcome = state.print_jobs.poll(&printer).await?;

    Ok(Json(PollResponse {
        status_code: "200 OK",
        job_ready: outcome.has_work,
        job_token: outcome.token,
        media_types: vec![state.print_jobs.media_type().to_string()],
    }))
}

/// GET /print - fetch the rendered receipts named by the token
pub async fn fetch(State(state): State<ServerState>, headers: HeaderMap) -> RelayResult<Response> {
    let token = required_header(&headers, JOB_TOKEN_HEADER)?;

    let payload = state.print_jobs.fetch(token).await?;

    let response = (
        [
            (
                header::CONTENT_TYPE,
                payload.media_type.as_str().to_string(),
            ),
            (header::CONTENT_LENGTH, payload.bytes.len().to_string()),
        ],
        payload.bytes,
    )
        .into_response();

    Ok(response)
}

/// DELETE /print - acknowledge printed jobs
pub async fn acknowledge(
    State(state): State<ServerState>,
    headers: HeaderMap,
) -> RelayResult<Json<AckResponse>> {
    let token = required_header(&headers, JOB_TOKEN_HEADER)?;

    state.print_jobs.acknowledge(token).await?;

    Ok(Json(AckResponse {
        status_code: "200 OK",
    }))
}
