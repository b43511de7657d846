//! Request handlers for the inspection endpoints.
//!
//! Every handler is a stateless transformation of the current request.
//! Inspection handlers take the normalized [`Inspected`] snapshot; the
//! status and delay handlers validate their path parameter first and answer
//! 400 on bad input.

use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::{debug, instrument};

use inspector_core::{AttributeValue, Format, render, render_json};

use crate::dashboard::render_dashboard;
use crate::request::{Inspected, delay_duration, parse_delay, parse_status_code};
use crate::response::InspectorResponse;

/// `GET /` - HTML dashboard.
#[instrument(skip_all)]
pub async fn dashboard(Inspected(snapshot): Inspected) -> InspectorResponse {
    InspectorResponse::html(200, render_dashboard(&snapshot))
}

/// `GET /json` - edge metadata, headers, url and method as pretty JSON.
#[instrument(skip_all)]
pub async fn inspect_json(Inspected(snapshot): Inspected) -> InspectorResponse {
    InspectorResponse::json(200, render(&snapshot.inspection_document(), Format::Json))
}

/// `GET /ip` - resolved client IP or `unknown`.
#[instrument(skip_all)]
pub async fn client_ip(Inspected(snapshot): Inspected) -> InspectorResponse {
    InspectorResponse::text(200, snapshot.client_ip())
}

/// `GET /user-agent` - the `User-Agent` header or `unknown`.
#[instrument(skip_all)]
pub async fn user_agent(Inspected(snapshot): Inspected) -> InspectorResponse {
    InspectorResponse::text(200, snapshot.user_agent())
}

/// `GET /headers` - request headers as pretty JSON.
#[instrument(skip_all)]
pub async fn headers(Inspected(snapshot): Inspected) -> InspectorResponse {
    let headers = AttributeValue::Map(snapshot.headers().clone());
    InspectorResponse::json(200, render_json(&headers))
}

/// `ANY /status/:code` - respond with the requested status.
///
/// Every code in `[100, 599]` passes validation and leaves the router
/// unchanged. A 1xx is not a valid final response, though: over an HTTP/1
/// connection hyper replaces it with 500 on the wire. Codes from 200 up
/// reach the client as requested, including unregistered ones like 599.
#[instrument(skip_all, fields(code = %code))]
pub async fn status_echo(Path(code): Path<String>) -> InspectorResponse {
    match parse_status_code(&code) {
        Ok(status) => {
            let code = status.as_u16();
            InspectorResponse::text(code, format!("Returned status: {code}"))
        }
        Err(e) => {
            debug!(error = %e, "Rejected status code");
            e.into()
        }
    }
}

/// `ANY /delay/:ms` - wait `ms` milliseconds, then answer.
///
/// A negative `ms` answers immediately and is echoed as given.
///
/// The wait is a tokio timer, so other requests keep being served. If the
/// client disconnects or the request timeout fires, the future is dropped
/// and the timer with it.
#[instrument(skip_all, fields(ms = %ms))]
pub async fn delay(Path(ms): Path<String>) -> InspectorResponse {
    let millis = match parse_delay(&ms) {
        Ok(millis) => millis,
        Err(e) => {
            debug!(error = %e, "Rejected delay");
            return e.into();
        }
    };

    tokio::time::sleep(delay_duration(millis)).await;

    InspectorResponse::text(200, format!("Delayed by {millis}ms"))
}

/// Health check handler.
///
/// Returns 200 OK if the server is running.
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_status_echo_valid() {
        let resp = status_echo(Path("503".to_string())).await;
        assert_eq!(resp.status, 503);
        assert_eq!(resp.body, b"Returned status: 503");
    }

    #[tokio::test]
    async fn test_status_echo_invalid() {
        let resp = status_echo(Path("abc".to_string())).await;
        assert_eq!(resp.status, 400);
        assert_eq!(resp.body, b"Invalid status code");
    }

    #[tokio::test]
    async fn test_delay_invalid() {
        let resp = delay(Path("later".to_string())).await;
        assert_eq!(resp.status, 400);
        assert_eq!(resp.body, b"Invalid delay");
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_waits_on_timer() {
        let start = tokio::time::Instant::now();
        let resp = delay(Path("1500".to_string())).await;

        assert_eq!(resp.status, 200);
        assert_eq!(resp.body, b"Delayed by 1500ms");
        assert!(start.elapsed() >= Duration::from_millis(1500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_negative_delay_answers_immediately() {
        let start = tokio::time::Instant::now();
        let resp = delay(Path("-5".to_string())).await;

        assert_eq!(resp.status, 200);
        assert_eq!(resp.body, b"Delayed by -5ms");
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_is_cancellable() {
        let pending = tokio::spawn(delay(Path("60000".to_string())));
        tokio::time::sleep(Duration::from_millis(10)).await;

        pending.abort();
        let err = pending.await.unwrap_err();
        assert!(err.is_cancelled());
    }
}
