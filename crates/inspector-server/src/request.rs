//! Request extraction and path parameter parsing.
//!
//! [`Inspected`] normalizes the incoming request into a
//! [`RequestSnapshot`] once, before the handler body runs. Parameter
//! parsers validate at the handler boundary so invalid input never reaches
//! the renderer.

use std::convert::Infallible;
use std::time::Duration;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::StatusCode;
use axum::http::request::Parts;
use tracing::debug;
use uuid::Uuid;

use inspector_common::InspectorError;
use inspector_core::RequestSnapshot;

use crate::state::AppState;

/// Extractor yielding the normalized snapshot of the current request.
#[derive(Debug, Clone)]
pub struct Inspected(pub RequestSnapshot);

#[async_trait]
impl FromRequestParts<AppState> for Inspected {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let edge_metadata = state.edge_provider().metadata(parts);
        let snapshot = RequestSnapshot::from_parts(parts, edge_metadata);

        debug!(
            request_id = %Uuid::new_v4(),
            method = snapshot.method(),
            url = snapshot.url(),
            header_count = snapshot.headers().len(),
            edge_keys = snapshot.edge_metadata().len(),
            "Normalized request"
        );

        Ok(Self(snapshot))
    }
}

/// Parse a status code path parameter. Accepts integers in `[100, 599]`.
pub fn parse_status_code(raw: &str) -> Result<StatusCode, InspectorError> {
    raw.parse::<u16>()
        .ok()
        .filter(|code| (100..=599).contains(code))
        .and_then(|code| StatusCode::from_u16(code).ok())
        .ok_or_else(|| InspectorError::invalid_parameter("status code", raw))
}

/// Parse a delay path parameter given in milliseconds.
///
/// Negative values are accepted; they wait zero milliseconds.
pub fn parse_delay(raw: &str) -> Result<i64, InspectorError> {
    raw.parse::<i64>()
        .map_err(|_| InspectorError::invalid_parameter("delay", raw))
}

/// Wait time for a parsed delay, clamping negatives to zero.
pub fn delay_duration(ms: i64) -> Duration {
    Duration::from_millis(u64::try_from(ms).unwrap_or(0))
}
