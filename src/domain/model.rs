use serde::{Deserialize, Serialize};

/// Header row of a patient list as returned by the `list` resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSummary {
    #[serde(rename = "uuid", alias = "id")]
    pub id: String,
    #[serde(rename = "name", alias = "display")]
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ListSummary {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            description: None,
        }
    }
}

/// One row of a patient list. The shape is owned by the server, so the
/// record is kept as raw JSON and only read through accessors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListMember(pub serde_json::Value);

impl ListMember {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn uuid(&self) -> Option<&str> {
        self.0.get("uuid").and_then(|v| v.as_str())
    }

    /// Header text rendered server-side from the list's header template.
    pub fn header_content(&self) -> Option<&str> {
        self.0.get("headerContent").and_then(|v| v.as_str())
    }

    /// Body text rendered server-side from the list's body template.
    pub fn body_content(&self) -> Option<&str> {
        self.0.get("bodyContent").and_then(|v| v.as_str())
    }

    pub fn patient(&self) -> Option<&serde_json::Value> {
        self.0.get("patient").filter(|v| !v.is_null())
    }

    pub fn visit(&self) -> Option<&serde_json::Value> {
        self.0.get("visit").filter(|v| !v.is_null())
    }

    pub fn as_json(&self) -> &serde_json::Value {
        &self.0
    }
}

/// Paged response envelope. `length` is the total across all pages, not the
/// size of `results`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default)]
    pub length: u64,
}

impl<T> ListResponse<T> {
    pub fn new(results: Vec<T>, length: u64) -> Self {
        Self { results, length }
    }
}

pub const DEFAULT_PAGE_LIMIT: u32 = 5;

/// Pagination counters of a list page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageState {
    pub current_page: u32,
    pub limit: u32,
    pub total_results: u64,
}

impl PageState {
    pub fn new(limit: u32) -> Self {
        Self {
            current_page: 1,
            limit: limit.max(1),
            total_results: 0,
        }
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_LIMIT)
    }
}
