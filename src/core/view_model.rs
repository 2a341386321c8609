use crate::core::pagination;
use crate::domain::model::{ListMember, ListSummary, PageState};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

/// State bound to the list page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListViewModel {
    pub page: PageState,
    pub summaries: Vec<ListSummary>,
    pub members: Vec<ListMember>,
    pub selected_list: Option<String>,
    pub loading_summaries: bool,
    pub loading_members: bool,
    pub last_error: Option<String>,
}

impl ListViewModel {
    pub fn paging_from(&self) -> u64 {
        pagination::paging_from(self.page.current_page, self.page.limit)
    }

    pub fn paging_to(&self) -> u64 {
        pagination::paging_to(
            self.page.current_page,
            self.page.limit,
            self.page.total_results,
        )
    }

    pub fn display_range(&self) -> Option<(u64, u64)> {
        pagination::display_range(&self.page)
    }

    pub fn total_pages(&self) -> u32 {
        pagination::total_pages(self.page.limit, self.page.total_results)
    }

    pub fn summary(&self, list_id: &str) -> Option<&ListSummary> {
        self.summaries.iter().find(|s| s.id == list_id)
    }

    pub fn is_loading(&self) -> bool {
        self.loading_summaries || self.loading_members
    }
}

/// Shared handle to the page's view model. Cloning shares the same state.
#[derive(Debug, Clone, Default)]
pub struct ViewModelHandle {
    inner: Arc<Mutex<ListViewModel>>,
}

impl ViewModelHandle {
    pub fn new(model: ListViewModel) -> Self {
        Self {
            inner: Arc::new(Mutex::new(model)),
        }
    }

    pub async fn lock(&self) -> MutexGuard<'_, ListViewModel> {
        self.inner.lock().await
    }

    pub async fn snapshot(&self) -> ListViewModel {
        self.inner.lock().await.clone()
    }
}
