//! Resource types returned by the delivery API.
//!
//! # Design
//! Field names follow the API's camelCase JSON. Unknown keys are ignored and
//! absent keys fall back to their defaults, so a partial `sys` block (a
//! space's `sys` has no timestamps) still decodes. Payloads whose shape
//! depends on the space's own content model (`Entry::fields`,
//! `File::details`, the link objects in `Sys`) stay as `serde_json::Value`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// CMS-managed metadata attached to every resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Sys {
    pub space: Value,
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
    pub content_type: Value,
    pub revision: i64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

impl Sys {
    /// Id of the linked content type, for entries.
    pub fn content_type_id(&self) -> Option<&str> {
        link_id(&self.content_type)
    }

    /// Id of the linked space.
    pub fn space_id(&self) -> Option<&str> {
        link_id(&self.space)
    }
}

/// Reads `sys.id` out of a link object: `{"sys": {"type": "Link", "id": ...}}`.
fn link_id(link: &Value) -> Option<&str> {
    link.get("sys")?.get("id")?.as_str()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Locale {
    pub code: String,
    pub name: String,
    pub default: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_code: Option<String>,
}

/// Top-level container of content types, entries and assets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Space {
    pub sys: Sys,
    pub name: String,
    pub locales: Vec<Locale>,
}

impl Space {
    pub fn default_locale(&self) -> Option<&Locale> {
        self.locales.iter().find(|locale| locale.default)
    }
}

/// Schema describing the fields of entries of one type.
///
/// Fields are passed through as-is; nothing checks entries against them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentType {
    pub sys: Sys,
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_field: Option<String>,
    pub fields: Vec<Field>,
}

impl ContentType {
    pub fn field(&self, id: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.id == id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Field {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_type: Option<String>,
    pub items: FieldItems,
    pub required: bool,
    pub localized: bool,
    pub disabled: bool,
    pub omitted: bool,
}

/// Element type of an `Array` field. Empty for non-array fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldItems {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Entry {
    pub sys: Sys,
    pub fields: Value,
}

impl Entry {
    /// Value of a single field from the untyped payload.
    pub fn field(&self, id: &str) -> Option<&Value> {
        self.fields.get(id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Asset {
    pub sys: Sys,
    pub fields: AssetFields,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetFields {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub file: File,
}

/// Binary behind an asset. `details` carries size and, for images,
/// dimensions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct File {
    pub file_name: String,
    pub content_type: String,
    pub url: String,
    pub details: Value,
}

/// One page of a collection endpoint.
///
/// `total`, `skip` and `limit` describe the page; fetching the next one is
/// up to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Collection<T> {
    pub sys: Sys,
    pub total: i64,
    pub skip: i64,
    pub limit: i64,
    pub items: Vec<T>,
    pub includes: Includes,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            sys: Sys::default(),
            total: 0,
            skip: 0,
            limit: 0,
            items: Vec::new(),
            includes: Includes::default(),
        }
    }
}

impl<T> Collection<T> {
    /// Whether items beyond this page exist.
    pub fn has_more(&self) -> bool {
        self.skip.saturating_add(self.items.len() as i64) < self.total
    }
}

/// Linked resources the API side-loads alongside entry collections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Includes {
    #[serde(rename = "Entry")]
    pub entries: Vec<Entry>,
    #[serde(rename = "Asset")]
    pub assets: Vec<Asset>,
}

pub type ContentTypes = Collection<ContentType>;
pub type Entries = Collection<Entry>;
pub type Assets = Collection<Asset>;
