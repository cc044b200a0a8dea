//! Request builder and response parser for the delivery API.
//!
//! # Design
//! `ContentfulClient` holds only its `ClientConfig` and carries no state
//! between calls. Each resource has a `build_*` method producing an
//! `HttpRequest`, a `parse_*` method consuming an `HttpResponse`, and a
//! `get_*` method that runs the two through a `Transport`. Building and
//! parsing never touch the network, so they can be driven by any HTTP stack.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};
use url::form_urlencoded;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::query::Query;
use crate::transport::Transport;
use crate::types::{Asset, Assets, ContentType, ContentTypes, Entries, Entry, Space};

const CONTENT_TYPES: &str = "content_types";
const ENTRIES: &str = "entries";
const ASSETS: &str = "assets";

/// Read-only client for one space.
///
/// Cheap to clone and safe to share across threads; every call is
/// independent of every other.
#[derive(Debug, Clone)]
pub struct ContentfulClient {
    config: ClientConfig,
}

impl ContentfulClient {
    /// Client for `space_id` on the public delivery host.
    pub fn new(access_token: impl Into<String>, space_id: impl Into<String>) -> Self {
        Self::with_config(ClientConfig::new(access_token, space_id))
    }

    pub fn with_config(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn space_url(&self) -> String {
        format!("{}/spaces/{}", self.config.base_url, self.config.space_id)
    }

    // -----------------------------------------------------------------------
    // Build
    // -----------------------------------------------------------------------

    pub fn build_get_space(&self) -> HttpRequest {
        self.request(&[], &Query::default())
    }

    pub fn build_get_content_types(&self, query: &Query) -> HttpRequest {
        self.request(&[CONTENT_TYPES], query)
    }

    pub fn build_get_content_type(&self, id: &str) -> HttpRequest {
        self.request(&[CONTENT_TYPES, id], &Query::default())
    }

    pub fn build_get_entries(&self, query: &Query) -> HttpRequest {
        self.request(&[ENTRIES], query)
    }

    pub fn build_get_entry(&self, id: &str) -> HttpRequest {
        self.request(&[ENTRIES, id], &Query::default())
    }

    pub fn build_get_assets(&self, query: &Query) -> HttpRequest {
        self.request(&[ASSETS], query)
    }

    pub fn build_get_asset(&self, id: &str) -> HttpRequest {
        self.request(&[ASSETS, id], &Query::default())
    }

    /// Each segment is percent-encoded whole, so an id can never add path
    /// levels or a query string. An empty id still yields an empty trailing
    /// segment (`/entries/`); the service decides what that returns.
    fn request(&self, segments: &[&str], query: &Query) -> HttpRequest {
        let mut url = self.space_url();
        for segment in segments {
            url.push('/');
            url.push_str(&encode_segment(segment));
        }
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query.to_query_string());
        }
        HttpRequest {
            url,
            headers: vec![
                (
                    "Authorization".to_string(),
                    format!("Bearer {}", self.config.access_token),
                ),
                ("User-Agent".to_string(), self.config.user_agent.clone()),
            ],
        }
    }

    // -----------------------------------------------------------------------
    // Parse
    // -----------------------------------------------------------------------

    pub fn parse_get_space(&self, response: HttpResponse) -> Result<Space, ApiError> {
        decode(response)
    }

    pub fn parse_get_content_types(&self, response: HttpResponse) -> Result<ContentTypes, ApiError> {
        decode(response)
    }

    pub fn parse_get_content_type(&self, response: HttpResponse) -> Result<ContentType, ApiError> {
        decode(response)
    }

    pub fn parse_get_entries(&self, response: HttpResponse) -> Result<Entries, ApiError> {
        decode(response)
    }

    pub fn parse_get_entry(&self, response: HttpResponse) -> Result<Entry, ApiError> {
        decode(response)
    }

    pub fn parse_get_assets(&self, response: HttpResponse) -> Result<Assets, ApiError> {
        decode(response)
    }

    pub fn parse_get_asset(&self, response: HttpResponse) -> Result<Asset, ApiError> {
        decode(response)
    }

    // -----------------------------------------------------------------------
    // Fetch
    // -----------------------------------------------------------------------

    pub fn get_space<T: Transport + ?Sized>(&self, transport: &T) -> Result<Space, ApiError> {
        self.parse_get_space(execute(transport, &self.build_get_space())?)
    }

    /// First page with the API's default limit.
    pub fn get_content_types<T: Transport + ?Sized>(
        &self,
        transport: &T,
    ) -> Result<ContentTypes, ApiError> {
        self.get_content_types_with(transport, &Query::default())
    }

    pub fn get_content_types_with<T: Transport + ?Sized>(
        &self,
        transport: &T,
        query: &Query,
    ) -> Result<ContentTypes, ApiError> {
        self.parse_get_content_types(execute(transport, &self.build_get_content_types(query))?)
    }

    pub fn get_content_type<T: Transport + ?Sized>(
        &self,
        transport: &T,
        id: &str,
    ) -> Result<ContentType, ApiError> {
        self.parse_get_content_type(execute(transport, &self.build_get_content_type(id))?)
    }

    /// First page with the API's default limit.
    pub fn get_entries<T: Transport + ?Sized>(&self, transport: &T) -> Result<Entries, ApiError> {
        self.get_entries_with(transport, &Query::default())
    }

    pub fn get_entries_with<T: Transport + ?Sized>(
        &self,
        transport: &T,
        query: &Query,
    ) -> Result<Entries, ApiError> {
        self.parse_get_entries(execute(transport, &self.build_get_entries(query))?)
    }

    pub fn get_entry<T: Transport + ?Sized>(&self, transport: &T, id: &str) -> Result<Entry, ApiError> {
        self.parse_get_entry(execute(transport, &self.build_get_entry(id))?)
    }

    /// First page with the API's default limit.
    pub fn get_assets<T: Transport + ?Sized>(&self, transport: &T) -> Result<Assets, ApiError> {
        self.get_assets_with(transport, &Query::default())
    }

    pub fn get_assets_with<T: Transport + ?Sized>(
        &self,
        transport: &T,
        query: &Query,
    ) -> Result<Assets, ApiError> {
        self.parse_get_assets(execute(transport, &self.build_get_assets(query))?)
    }

    pub fn get_asset<T: Transport + ?Sized>(&self, transport: &T, id: &str) -> Result<Asset, ApiError> {
        self.parse_get_asset(execute(transport, &self.build_get_asset(id))?)
    }
}

/// Percent-encodes everything but `[A-Za-z0-9*-._]`. Dot-only segments are
/// encoded too so `.` and `..` stay literal ids.
fn encode_segment(segment: &str) -> String {
    if !segment.is_empty() && segment.bytes().all(|b| b == b'.') {
        return "%2E".repeat(segment.len());
    }
    form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

fn execute<T: Transport + ?Sized>(
    transport: &T,
    request: &HttpRequest,
) -> Result<HttpResponse, ApiError> {
    debug!(url = %request.url, "fetching");
    transport.execute(request)
}

/// Anything but 200 is an error and the body is dropped undecoded.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.status == 200 {
        return Ok(());
    }
    warn!(status = response.status, reason = %response.reason, "unexpected status");
    Err(ApiError::Status {
        status: response.status,
        reason: response.reason.clone(),
    })
}

/// Every resource is a JSON object; an array or scalar body is a decode
/// error rather than a positional or all-default value.
fn decode<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    let value: Value = serde_json::from_slice(&response.body)?;
    if !value.is_object() {
        return Err(ApiError::Decode(serde::de::Error::custom(format!(
            "expected a JSON object, found {}",
            kind(&value)
        ))));
    }
    let decoded = serde_json::from_value(value)?;
    debug!(bytes = response.body.len(), "decoded response");
    Ok(decoded)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use super::*;

    fn client() -> ContentfulClient {
        ContentfulClient::with_config(
            ClientConfig::new("b4c0n73n7fu1", "cfexampleapi").base_url("http://localhost:3000"),
        )
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            reason: String::new(),
            body: body.as_bytes().to_vec(),
        }
    }

    /// Replays canned responses in order and records every request.
    struct StubTransport {
        responses: RefCell<VecDeque<HttpResponse>>,
        requests: RefCell<Vec<HttpRequest>>,
    }

    impl StubTransport {
        fn new(responses: Vec<HttpResponse>) -> Self {
            Self {
                responses: RefCell::new(responses.into()),
                requests: RefCell::new(Vec::new()),
            }
        }
    }

    impl Transport for StubTransport {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
            self.requests.borrow_mut().push(request.clone());
            Ok(self
                .responses
                .borrow_mut()
                .pop_front()
                .expect("no canned response left"))
        }
    }

    #[test]
    fn new_targets_delivery_host() {
        let client = ContentfulClient::new("token", "cfexampleapi");
        assert_eq!(
            client.build_get_space().url,
            "https://cdn.contentful.com/spaces/cfexampleapi"
        );
    }

    #[test]
    fn build_paths_for_every_resource() {
        let c = client();
        let q = Query::default();
        let base = "http://localhost:3000/spaces/cfexampleapi";
        assert_eq!(c.build_get_space().url, base);
        assert_eq!(c.build_get_content_types(&q).url, format!("{base}/content_types"));
        assert_eq!(c.build_get_content_type("X").url, format!("{base}/content_types/X"));
        assert_eq!(c.build_get_entries(&q).url, format!("{base}/entries"));
        assert_eq!(c.build_get_entry("nyancat").url, format!("{base}/entries/nyancat"));
        assert_eq!(c.build_get_assets(&q).url, format!("{base}/assets"));
        assert_eq!(c.build_get_asset("happycat").url, format!("{base}/assets/happycat"));
    }

    #[test]
    fn build_encodes_ids_as_one_segment() {
        let c = client();
        let base = "http://localhost:3000/spaces/cfexampleapi";
        assert_eq!(
            c.build_get_entry("nyancat?locale=tlh").url,
            format!("{base}/entries/nyancat%3Flocale%3Dtlh")
        );
        assert_eq!(
            c.build_get_content_type("../assets/happycat").url,
            format!("{base}/content_types/..%2Fassets%2Fhappycat")
        );
        assert_eq!(c.build_get_asset("..").url, format!("{base}/assets/%2E%2E"));
        assert_eq!(c.build_get_entry("a b+c#d").url, format!("{base}/entries/a%20b%2Bc%23d"));
        assert_eq!(c.build_get_entry("5KsDBWseXY6QegucYAoacS").url, format!("{base}/entries/5KsDBWseXY6QegucYAoacS"));
    }

    #[test]
    fn build_empty_id_stays_under_resource() {
        let req = client().build_get_entry("");
        assert_eq!(req.url, "http://localhost:3000/spaces/cfexampleapi/entries/");
    }

    #[test]
    fn build_appends_query_string() {
        let req = client().build_get_entries(&Query::new().skip(100).limit(50));
        assert_eq!(
            req.url,
            "http://localhost:3000/spaces/cfexampleapi/entries?skip=100&limit=50"
        );
    }

    #[test]
    fn every_request_carries_bearer_token() {
        let c = client();
        let q = Query::default();
        for req in [
            c.build_get_space(),
            c.build_get_content_types(&q),
            c.build_get_content_type("cat"),
            c.build_get_entries(&q),
            c.build_get_entry("nyancat"),
            c.build_get_assets(&q),
            c.build_get_asset("nyancat"),
        ] {
            assert_eq!(req.header("Authorization"), Some("Bearer b4c0n73n7fu1"), "{}", req.url);
        }
    }

    #[test]
    fn parse_space_success() {
        let space = client()
            .parse_get_space(response(
                200,
                r#"{"sys": {"type": "Space", "id": "cfexampleapi"}, "name": "Contentful Example API",
                    "locales": [{"code": "en-US", "default": true, "name": "English"}]}"#,
            ))
            .unwrap();
        assert_eq!(space.sys.id, "cfexampleapi");
        assert_eq!(space.name, "Contentful Example API");
        assert_eq!(space.locales[0].code, "en-US");
    }

    #[test]
    fn parse_not_found_skips_decoding() {
        // Body would fail to decode; the status must win.
        let err = client()
            .parse_get_content_type(response(404, "not json"))
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(matches!(err, ApiError::Status { status: 404, .. }));
    }

    #[test]
    fn parse_server_error_is_status_error() {
        let err = client()
            .parse_get_entries(response(500, r#"{"sys": {"type": "Error"}}"#))
            .unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 500, .. }));
    }

    #[test]
    fn parse_other_success_codes_are_rejected() {
        let err = client().parse_get_entry(response(204, "")).unwrap_err();
        assert_eq!(err.status(), Some(204));
    }

    #[test]
    fn parse_bad_json_is_decode_error() {
        let err = client().parse_get_assets(response(200, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn parse_non_object_body_is_decode_error() {
        let c = client();
        assert!(matches!(c.parse_get_space(response(200, "[]")), Err(ApiError::Decode(_))));
        assert!(matches!(
            c.parse_get_entry(response(200, r#"[{"id": "x", "type": "Entry"}]"#)),
            Err(ApiError::Decode(_))
        ));
        assert!(matches!(c.parse_get_entries(response(200, "null")), Err(ApiError::Decode(_))));
        assert!(matches!(c.parse_get_asset(response(200, "42")), Err(ApiError::Decode(_))));
    }

    #[test]
    fn parse_entry_ignores_unknown_keys() {
        let entry = client()
            .parse_get_entry(response(
                200,
                r#"{"sys": {"type": "Entry", "id": "nyancat", "revision": 5},
                    "fields": {"name": "Nyan Cat"},
                    "metadata": {"tags": []},
                    "unexpected": 42}"#,
            ))
            .unwrap();
        assert_eq!(entry.sys.id, "nyancat");
        assert_eq!(entry.sys.revision, 5);
        assert_eq!(entry.field("name"), Some(&serde_json::json!("Nyan Cat")));
    }

    #[test]
    fn get_entry_round_trips_through_transport() {
        let transport = StubTransport::new(vec![response(
            200,
            r#"{"sys": {"id": "nyancat"}, "fields": {"color": "rainbow"}}"#,
        )]);
        let entry = client().get_entry(&transport, "nyancat").unwrap();
        assert_eq!(entry.fields["color"], "rainbow");

        let requests = transport.requests.borrow();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].url,
            "http://localhost:3000/spaces/cfexampleapi/entries/nyancat"
        );
    }

    #[test]
    fn sequential_gets_are_independent() {
        let transport = StubTransport::new(vec![
            response(200, r#"{"sys": {"id": "a"}, "fields": {"only_in_a": 1}}"#),
            response(200, r#"{"sys": {"id": "b"}, "fields": {"only_in_b": 2}}"#),
        ]);
        let c = client();
        let a = c.get_entry(&transport, "a").unwrap();
        let b = c.get_entry(&transport, "b").unwrap();

        assert_eq!(a.sys.id, "a");
        assert_eq!(b.sys.id, "b");
        assert!(b.field("only_in_a").is_none());
        assert_eq!(b.field("only_in_b"), Some(&serde_json::json!(2)));

        let urls: Vec<_> = transport.requests.borrow().iter().map(|r| r.url.clone()).collect();
        assert!(urls[0].ends_with("/entries/a"));
        assert!(urls[1].ends_with("/entries/b"));
    }

    #[test]
    fn get_propagates_transport_failure() {
        struct Down;
        impl Transport for Down {
            fn execute(&self, _: &HttpRequest) -> Result<HttpResponse, ApiError> {
                Err(ApiError::Transport("connection refused".into()))
            }
        }
        let err = client().get_space(&Down).unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }

    #[test]
    fn get_collections_accept_query() {
        let body = r#"{"sys": {"type": "Array"}, "total": 0, "skip": 5, "limit": 1, "items": []}"#;
        let transport = StubTransport::new(vec![
            response(200, body),
            response(200, body),
            response(200, body),
        ]);
        let c = client();
        let q = Query::new().skip(5).limit(1);
        assert_eq!(c.get_content_types_with(&transport, &q).unwrap().skip, 5);
        assert_eq!(c.get_entries_with(&transport, &q).unwrap().limit, 1);
        assert!(c.get_assets_with(&transport, &q).unwrap().items.is_empty());

        for req in transport.requests.borrow().iter() {
            assert!(req.url.ends_with("?skip=5&limit=1"), "{}", req.url);
        }
    }
}
