//! HTTP transport types for the delivery API.
//!
//! # Design
//! Requests and responses are plain data. `ContentfulClient` builds
//! `HttpRequest` values and parses `HttpResponse` values; executing the
//! round-trip is the job of a `Transport` implementation. The delivery API is
//! read-only, so every request is a bodiless GET.

/// A GET request described as plain data.
///
/// Built by `ContentfulClient::build_*` methods. `url` is fully qualified,
/// including any query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    /// Look up a header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// An HTTP response described as plain data.
///
/// `reason` is the status line's reason phrase when one is known. The body
/// is kept as raw bytes; decoding happens in `ContentfulClient::parse_*`.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub reason: String,
    pub body: Vec<u8>,
}
