//! HTTP response building.
//!
//! [`InspectorResponse`] is the status/headers/body triple every handler
//! returns; it converts into an Axum response.

use axum::body::Body;
use axum::http::{HeaderName, HeaderValue, Response, StatusCode};
use axum::response::IntoResponse;

use inspector_common::InspectorError;

/// Content type of JSON responses.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";
/// Content type of plain-text responses.
pub const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";
/// Content type of HTML responses.
pub const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Handler response before conversion to Axum.
#[derive(Debug, Clone)]
pub struct InspectorResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers as key-value pairs
    pub headers: Vec<(String, String)>,
    /// Response body
    pub body: Vec<u8>,
}

impl InspectorResponse {
    fn with_content_type(status: u16, content_type: &str, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: vec![("content-type".to_string(), content_type.to_string())],
            body: body.into(),
        }
    }

    /// Create a plain-text response.
    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self::with_content_type(status, TEXT_CONTENT_TYPE, body.into())
    }

    /// Create a JSON response from already serialized text.
    pub fn json(status: u16, body: impl Into<String>) -> Self {
        Self::with_content_type(status, JSON_CONTENT_TYPE, body.into())
    }

    /// Create an HTML response.
    pub fn html(status: u16, body: impl Into<String>) -> Self {
        Self::with_content_type(status, HTML_CONTENT_TYPE, body.into())
    }

    /// Convert to Axum response.
    ///
    /// Headers that are not valid HTTP are dropped.
    pub fn into_axum_response(self) -> Response<Body> {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = status;

        for (name, value) in &self.headers {
            if let (Ok(name), Ok(value)) = (
                HeaderName::try_from(name.as_str()),
                HeaderValue::try_from(value.as_str()),
            ) {
                response.headers_mut().insert(name, value);
            }
        }

        response
    }
}

impl IntoResponse for InspectorResponse {
    fn into_response(self) -> axum::response::Response {
        self.into_axum_response()
    }
}

impl From<InspectorError> for InspectorResponse {
    /// Client errors become 400 with a short text body; anything else is a 500.
    fn from(error: InspectorError) -> Self {
        let status = if error.is_client_error() { 400 } else { 500 };
        Self::text(status, error.client_message())
    }
}
