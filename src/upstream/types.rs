//! Wire types for the Patreon JSON:API post listing
//!
//! Only the post fields the relay reads are typed. Included resources are
//! kept whole.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Reads an explicit `null` as the type's default
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A post as received from upstream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPost {
    /// Opaque identifier, unique within a fetch
    pub id: String,

    #[serde(rename = "type", default)]
    pub kind: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub attributes: PostAttributes,
}

/// The requested `fields[post]` of a post
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostAttributes {
    #[serde(default)]
    pub title: Option<String>,

    /// Post body with embedded markup
    #[serde(default)]
    pub content: Option<String>,

    #[serde(default)]
    pub published_at: Option<String>,

    #[serde(default)]
    pub is_public: Option<bool>,
}

impl RawPost {
    pub fn title(&self) -> &str {
        self.attributes.title.as_deref().unwrap_or("")
    }

    /// Post body, or `None` when absent or empty
    pub fn content(&self) -> Option<&str> {
        self.attributes
            .content
            .as_deref()
            .filter(|content| !content.is_empty())
    }

    pub fn published_at(&self) -> Option<&str> {
        self.attributes.published_at.as_deref()
    }

    pub fn is_public(&self) -> bool {
        self.attributes.is_public.unwrap_or(false)
    }
}

/// A related resource (campaign, user) returned next to the posts
///
/// Passed through untouched: members other than `id`, `type` and
/// `attributes` (`relationships`, `links`, ...) are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncludedResource {
    pub id: String,

    #[serde(rename = "type", default)]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Map<String, Value>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Every post and included resource of a campaign, in fetch order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PostCollection {
    pub posts: Vec<RawPost>,
    pub included: Vec<IncludedResource>,
}

/// One successful page of the post listing
#[derive(Debug, Clone, Deserialize)]
pub struct PostsPage {
    #[serde(default)]
    pub data: Vec<RawPost>,

    #[serde(default)]
    pub included: Vec<IncludedResource>,

    #[serde(default)]
    pub meta: Option<PageMeta>,
}

impl PostsPage {
    /// Cursor of the following page; `None` ends pagination
    ///
    /// An empty string is treated like `null`.
    pub fn next_cursor(&self) -> Option<&str> {
        self.meta
            .as_ref()?
            .pagination
            .as_ref()?
            .cursors
            .as_ref()?
            .next
            .as_deref()
            .filter(|cursor| !cursor.is_empty())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PageMeta {
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub cursors: Option<Cursors>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Cursors {
    #[serde(default)]
    pub next: Option<String>,
}

/// Error payload of a failed request
///
/// Upstream reports either a JSON:API `errors` array or a bare `error` string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub errors: Option<Vec<ErrorObject>>,

    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorObject {
    #[serde(default)]
    pub detail: Option<String>,
}

impl ErrorBody {
    /// Human-readable detail: first structured detail, then `error`, then a generic message
    pub fn detail(&self) -> String {
        self.errors
            .as_ref()
            .and_then(|errors| errors.first())
            .and_then(|first| first.detail.clone())
            .or_else(|| self.error.clone())
            .unwrap_or_else(|| "Unknown error".to_string())
    }
}
