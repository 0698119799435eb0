//! Common metadata shared by all API resources: object identity, list
//! pagination, and the paginated list envelope.

use serde::{Deserialize, Serialize};

/// Identity and audit metadata attached to every API resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    #[serde(default)]
    pub id: String,
    /// RFC 3339 creation timestamp, set by the API server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
}

/// Pagination controls for list operations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListOptions {
    /// Opaque continuation cursor from a previous response. `None` starts
    /// from the beginning.
    pub continue_token: Option<String>,
    /// Maximum number of items per page. `None` uses the server default.
    pub limit: Option<i64>,
}

/// Metadata carried by a paginated list response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMeta {
    /// Continuation cursor. Absent (or empty) on the final page.
    #[serde(rename = "continue", default, skip_serializing_if = "Option::is_none")]
    pub continue_token: Option<String>,
    /// Number of matching items not included in this page.
    #[serde(default)]
    pub remaining_item_count: i64,
}

/// A single page of a paginated list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct List<T> {
    #[serde(default)]
    pub metadata: ListMeta,
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self {
            metadata: ListMeta::default(),
            items: Vec::new(),
        }
    }
}

impl<T> List<T> {
    /// Total logical count of matching items, valid for a single call:
    /// items on this page plus the count the server reported as remaining.
    pub fn total(&self) -> i64 {
        self.items.len() as i64 + self.metadata.remaining_item_count
    }

    /// The continuation cursor, if the server reported more pages.
    ///
    /// An empty-string cursor is treated the same as an absent one.
    pub fn continue_token(&self) -> Option<&str> {
        self.metadata
            .continue_token
            .as_deref()
            .filter(|t| !t.is_empty())
    }
}
