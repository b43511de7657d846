//! Normalized, immutable view of one inbound request.

use http::header::{HOST, USER_AGENT};
use http::Version;
use http::request::Parts;
use url::Url;

use crate::value::{AttributeBag, AttributeValue};

/// Value returned by single-field lookups when the header is missing.
pub const UNKNOWN: &str = "unknown";

const CF_CONNECTING_IP: &str = "cf-connecting-ip";
const X_FORWARDED_FOR: &str = "x-forwarded-for";
const X_FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Everything the handlers know about a request.
///
/// Header names are lower-cased and values kept raw; escaping happens at
/// render time so the same snapshot feeds both HTML and JSON output.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSnapshot {
    method: String,
    protocol: String,
    url: String,
    headers: AttributeBag,
    edge_metadata: AttributeBag,
}

impl RequestSnapshot {
    /// Build a snapshot from request parts and the provider's edge bag.
    ///
    /// A header that appears several times keeps its last value.
    pub fn from_parts(parts: &Parts, edge_metadata: AttributeBag) -> Self {
        let mut headers = AttributeBag::with_capacity(parts.headers.len());
        for (name, value) in &parts.headers {
            let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
            headers.insert(name.as_str().to_ascii_lowercase(), value.into());
        }

        Self {
            method: parts.method.to_string(),
            protocol: protocol_name(parts.version).to_string(),
            url: absolute_url(parts),
            headers,
            edge_metadata,
        }
    }

    /// HTTP method, verbatim.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Protocol version, e.g. `HTTP/1.1`.
    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    /// Absolute request URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// All request headers.
    pub fn headers(&self) -> &AttributeBag {
        &self.headers
    }

    /// Edge metadata supplied by the hosting environment.
    pub fn edge_metadata(&self) -> &AttributeBag {
        &self.edge_metadata
    }

    /// Look up a header value. Empty values count as missing.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .and_then(AttributeValue::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Resolved client IP: `CF-Connecting-IP`, then `X-Forwarded-For`.
    pub fn client_ip(&self) -> &str {
        self.header(CF_CONNECTING_IP)
            .or_else(|| self.header(X_FORWARDED_FOR))
            .unwrap_or(UNKNOWN)
    }

    /// The `User-Agent` header.
    pub fn user_agent(&self) -> &str {
        self.header(USER_AGENT.as_str()).unwrap_or(UNKNOWN)
    }

    /// Document served by `/json`: edge metadata followed by
    /// `requestHeaders`, `url` and `method`.
    ///
    /// Request fields replace edge entries with the same key.
    pub fn inspection_document(&self) -> AttributeValue {
        let mut doc = self.edge_metadata.clone();
        doc.insert(
            "requestHeaders".to_string(),
            AttributeValue::Map(self.headers.clone()),
        );
        doc.insert("url".to_string(), self.url.as_str().into());
        doc.insert("method".to_string(), self.method.as_str().into());
        doc.into()
    }

    /// Server-side panel of the dashboard: edge metadata plus
    /// `requestMethod`, and `httpProtocol` when the edge did not supply one.
    pub fn server_view(&self) -> AttributeValue {
        let mut view = self.edge_metadata.clone();
        view.insert("requestMethod".to_string(), self.method.as_str().into());
        view.entry("httpProtocol".to_string())
            .or_insert_with(|| self.protocol.as_str().into());
        view.into()
    }
}

/// Protocol label for a request version.
fn protocol_name(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "HTTP/0.9",
        Version::HTTP_10 => "HTTP/1.0",
        Version::HTTP_11 => "HTTP/1.1",
        Version::HTTP_2 => "HTTP/2.0",
        Version::HTTP_3 => "HTTP/3.0",
        _ => UNKNOWN,
    }
}

/// Rebuild the absolute URL the client asked for.
fn absolute_url(parts: &Parts) -> String {
    if parts.uri.scheme().is_some() {
        return parts.uri.to_string();
    }

    let scheme = parts
        .headers
        .get(X_FORWARDED_PROTO)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or("http");
    let host = parts
        .headers
        .get(HOST)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .unwrap_or("localhost");
    let path = parts.uri.path_and_query().map_or("/", |pq| pq.as_str());

    Url::parse(&format!("{scheme}://{host}{path}"))
        .map_or_else(|_| parts.uri.to_string(), String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::{Method, Request, Version};

    fn parts(builder: http::request::Builder) -> Parts {
        builder.body(()).unwrap().into_parts().0
    }

    fn snapshot(builder: http::request::Builder) -> RequestSnapshot {
        RequestSnapshot::from_parts(&parts(builder), AttributeBag::new())
    }

    #[test]
    fn test_basic_fields() {
        let snap = snapshot(
            Request::builder()
                .method(Method::POST)
                .uri("/json?x=1")
                .version(Version::HTTP_2)
                .header("Host", "inspect.example.com"),
        );

        assert_eq!(snap.method(), "POST");
        assert_eq!(snap.protocol(), "HTTP/2.0");
        assert_eq!(snap.url(), "http://inspect.example.com/json?x=1");
    }

    #[test]
    fn test_protocol_names() {
        for (version, name) in [
            (Version::HTTP_09, "HTTP/0.9"),
            (Version::HTTP_10, "HTTP/1.0"),
            (Version::HTTP_11, "HTTP/1.1"),
            (Version::HTTP_2, "HTTP/2.0"),
            (Version::HTTP_3, "HTTP/3.0"),
        ] {
            let (parts, ()) = Request::builder()
                .version(version)
                .body(())
                .unwrap()
                .into_parts();
            let snap = RequestSnapshot::from_parts(&parts, AttributeBag::new());
            assert_eq!(snap.protocol(), name);
        }
    }

    #[test]
    fn test_header_names_lower_cased() {
        let snap = snapshot(Request::builder().header("X-Custom-Header", "Value"));
        assert_eq!(
            snap.headers().get("x-custom-header"),
            Some(&AttributeValue::from("Value"))
        );
        assert_eq!(snap.header("X-CUSTOM-HEADER"), Some("Value"));
    }

    #[test]
    fn test_repeated_header_last_wins() {
        let snap = snapshot(
            Request::builder()
                .header("x-dup", "first")
                .header("x-dup", "second"),
        );
        assert_eq!(snap.headers().len(), 1);
        assert_eq!(snap.header("x-dup"), Some("second"));
    }

    #[test]
    fn test_values_are_not_escaped() {
        let snap = snapshot(Request::builder().header("x-html", "<b>&</b>"));
        assert_eq!(snap.header("x-html"), Some("<b>&</b>"));
    }

    #[test]
    fn test_client_ip_priority() {
        let both = snapshot(
            Request::builder()
                .header("x-forwarded-for", "10.0.0.1")
                .header("cf-connecting-ip", "203.0.113.7"),
        );
        assert_eq!(both.client_ip(), "203.0.113.7");

        let forwarded = snapshot(Request::builder().header("x-forwarded-for", "10.0.0.1"));
        assert_eq!(forwarded.client_ip(), "10.0.0.1");

        let empty_cf = snapshot(
            Request::builder()
                .header("cf-connecting-ip", "")
                .header("x-forwarded-for", "10.0.0.2"),
        );
        assert_eq!(empty_cf.client_ip(), "10.0.0.2");

        assert_eq!(snapshot(Request::builder()).client_ip(), UNKNOWN);
    }

    #[test]
    fn test_user_agent() {
        let snap = snapshot(Request::builder().header("User-Agent", "curl/8.4.0"));
        assert_eq!(snap.user_agent(), "curl/8.4.0");
        assert_eq!(snapshot(Request::builder()).user_agent(), UNKNOWN);
    }

    #[test]
    fn test_url_defaults_and_forwarded_proto() {
        assert_eq!(snapshot(Request::builder().uri("/")).url(), "http://localhost/");

        let snap = snapshot(
            Request::builder()
                .uri("/ip")
                .header("host", "example.com")
                .header("x-forwarded-proto", "https, http"),
        );
        assert_eq!(snap.url(), "https://example.com/ip");

        let absolute = snapshot(Request::builder().uri("http://proxy.test/headers"));
        assert_eq!(absolute.url(), "http://proxy.test/headers");
    }

    #[test]
    fn test_inspection_document() {
        let mut edge = AttributeBag::new();
        edge.insert("colo".into(), "SJC".into());
        edge.insert("url".into(), "edge-url".into());
        let snap = RequestSnapshot::from_parts(
            &parts(Request::builder().uri("/json").header("host", "h.test")),
            edge,
        );

        let AttributeValue::Map(doc) = snap.inspection_document() else {
            panic!("expected a mapping");
        };
        let keys: Vec<_> = doc.keys().map(String::as_str).collect();
        assert_eq!(keys, ["colo", "url", "requestHeaders", "method"]);
        assert_eq!(doc["url"].as_str(), Some("http://h.test/json"));
        assert_eq!(doc["method"].as_str(), Some("GET"));
    }

    #[test]
    fn test_server_view_protocol_fallback() {
        let snap = snapshot(Request::builder().method(Method::PUT));
        let AttributeValue::Map(view) = snap.server_view() else {
            panic!("expected a mapping");
        };
        assert_eq!(view["requestMethod"].as_str(), Some("PUT"));
        assert_eq!(view["httpProtocol"].as_str(), Some("HTTP/1.1"));

        let mut edge = AttributeBag::new();
        edge.insert("httpProtocol".into(), "HTTP/3".into());
        let snap = RequestSnapshot::from_parts(&parts(Request::builder()), edge);
        let AttributeValue::Map(view) = snap.server_view() else {
            panic!("expected a mapping");
        };
        assert_eq!(view["httpProtocol"].as_str(), Some("HTTP/3"));
    }
}
