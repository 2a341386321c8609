use crate::domain::model::{ListMember, ListResponse, ListSummary};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;

/// Network side of the list page. Implementations own transport errors;
/// callers only see a `Result`.
#[async_trait]
pub trait ListDataService: Send + Sync {
    async fn fetch_summaries(&self) -> Result<ListResponse<ListSummary>>;

    /// `page` is 1-based. The response `length` is the total across all pages.
    async fn fetch_members(
        &self,
        list_id: &str,
        page: u32,
        limit: u32,
    ) -> Result<ListResponse<ListMember>>;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn rest_path(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
    fn credentials(&self) -> Option<(&str, &str)>;
    fn session_id(&self) -> Option<&str>;
    fn page_limit(&self) -> u32;
    fn messages(&self) -> HashMap<String, String>;
}
