//! Read-only client for the Contentful content delivery API.
//!
//! # Overview
//! Fetches a space, its content types, entries and assets as typed values
//! decoded from the API's JSON. Every call is one authenticated GET.
//!
//! # Design
//! - `ContentfulClient` holds only its `ClientConfig` (token, space id,
//!   base URL); no state survives between calls.
//! - Each resource is split into `build_*` (produces an `HttpRequest`) and
//!   `parse_*` (consumes an `HttpResponse`). `get_*` joins the two through a
//!   `Transport`; `UreqTransport` is the blocking default.
//! - Collections expose `total`/`skip`/`limit` but are never walked
//!   automatically; pass a `Query` to request another page.
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use contentful_core::{ClientConfig, ContentfulClient, Query, UreqTransport};
//!
//! let config = ClientConfig::new("b4c0n73n7fu1", "cfexampleapi").timeout(Duration::from_secs(10));
//! let client = ContentfulClient::with_config(config);
//! // The transport carries the timeout; `UreqTransport::new()` would ignore it.
//! let transport = UreqTransport::from_config(client.config());
//! let space = client.get_space(&transport)?;
//! let cats = client.get_entries_with(&transport, &Query::new().content_type("cat"))?;
//! println!("{}: {} cats", space.name, cats.total);
//! # Ok::<(), contentful_core::ApiError>(())
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod query;
pub mod transport;
pub mod types;

pub use client::ContentfulClient;
pub use config::ClientConfig;
pub use error::{ApiError, ConfigError};
pub use http::{HttpRequest, HttpResponse};
pub use query::Query;
pub use transport::{Transport, UreqTransport};
pub use types::{
    Asset, AssetFields, Assets, Collection, ContentType, ContentTypes, Entries, Entry, Field,
    FieldItems, File, Includes, Locale, Space, Sys,
};
