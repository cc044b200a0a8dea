//! Query parameters for the collection endpoints.
//!
//! The API pages collections with `skip`/`limit` and filters them with
//! search parameters. `Query` only encodes them; walking pages is left to
//! the caller.

use url::form_urlencoded;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    skip: Option<u64>,
    limit: Option<u64>,
    order: Option<String>,
    content_type: Option<String>,
    search: Option<String>,
    locale: Option<String>,
    include: Option<u8>,
    filters: Vec<(String, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn skip(mut self, skip: u64) -> Self {
        self.skip = Some(skip);
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sort key, e.g. `sys.createdAt` or `-fields.name`.
    pub fn order(mut self, order: impl Into<String>) -> Self {
        self.order = Some(order.into());
        self
    }

    /// Restrict entries to one content type. Required by the API before
    /// filtering on `fields.*`.
    pub fn content_type(mut self, id: impl Into<String>) -> Self {
        self.content_type = Some(id.into());
        self
    }

    /// Full-text search across all text fields (the API's `query` param).
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    pub fn locale(mut self, code: impl Into<String>) -> Self {
        self.locale = Some(code.into());
        self
    }

    /// Depth of linked resources to side-load into `includes`.
    pub fn include(mut self, depth: u8) -> Self {
        self.include = Some(depth);
        self
    }

    /// Arbitrary search parameter, e.g. `("fields.color", "rainbow")` or
    /// `("sys.id[in]", "a,b")`.
    pub fn filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((key.into(), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Encoded query string without the leading `?`. Empty when no
    /// parameter is set.
    pub fn to_query_string(&self) -> String {
        let mut out = form_urlencoded::Serializer::new(String::new());
        if let Some(skip) = self.skip {
            out.append_pair("skip", &skip.to_string());
        }
        if let Some(limit) = self.limit {
            out.append_pair("limit", &limit.to_string());
        }
        if let Some(order) = &self.order {
            out.append_pair("order", order);
        }
        if let Some(content_type) = &self.content_type {
            out.append_pair("content_type", content_type);
        }
        if let Some(search) = &self.search {
            out.append_pair("query", search);
        }
        if let Some(locale) = &self.locale {
            out.append_pair("locale", locale);
        }
        if let Some(include) = self.include {
            out.append_pair("include", &include.to_string());
        }
        for (key, value) in &self.filters {
            out.append_pair(key, value);
        }
        out.finish()
    }
}
