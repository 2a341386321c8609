use crate::core::entity::{ControllerSettings, EntityIdentity, EntityRegistry};
use crate::core::hooks::{ControllerHooks, Navigation};
use crate::core::pagination;
use crate::core::view_model::{ListViewModel, ViewModelHandle};
use crate::domain::model::PageState;
use crate::domain::ports::ListDataService;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;

/// What happened to a load request. Loads never return errors; failures are
/// recorded on the view model instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    Failed,
    /// A newer request of the same kind was issued before this one resolved.
    Superseded,
    /// Nothing to load, e.g. a page change with no list selected.
    Skipped,
}

#[derive(Debug, Default)]
struct RequestSequence(AtomicU64);

impl RequestSequence {
    fn next(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, token: u64) -> bool {
        self.0.load(Ordering::SeqCst) == token
    }
}

/// Controller behind the patient list page.
pub struct ListPageController<D: ListDataService> {
    service: D,
    settings: ControllerSettings,
    hooks: ControllerHooks,
    registry: EntityRegistry,
    view: ViewModelHandle,
    identity: OnceLock<EntityIdentity>,
    summary_requests: RequestSequence,
    member_requests: RequestSequence,
}

impl<D: ListDataService> ListPageController<D> {
    pub fn new(service: D, settings: ControllerSettings) -> Self {
        Self::with_hooks(service, settings, ControllerHooks::default(), EntityRegistry::new())
    }

    pub fn with_hooks(
        service: D,
        settings: ControllerSettings,
        hooks: ControllerHooks,
        registry: EntityRegistry,
    ) -> Self {
        Self {
            service,
            view: ViewModelHandle::new(ListViewModel {
                page: PageState::new(settings.page_limit),
                ..Default::default()
            }),
            settings,
            hooks,
            registry,
            identity: OnceLock::new(),
            summary_requests: RequestSequence::default(),
            member_requests: RequestSequence::default(),
        }
    }

    pub fn view(&self) -> ViewModelHandle {
        self.view.clone()
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    pub fn settings(&self) -> &ControllerSettings {
        &self.settings
    }

    pub fn service(&self) -> &D {
        &self.service
    }

    /// Identity declared by `initialize`, if it has run.
    pub fn identity(&self) -> Option<&EntityIdentity> {
        self.identity.get()
    }

    /// Runs the page lifecycle: identity first, then view binding and the
    /// initial summary load.
    pub async fn open(&self) -> LoadOutcome {
        self.initialize();
        self.bind_view_state().await
    }

    /// Declares and registers the page identity. Later calls are no-ops.
    pub fn initialize(&self) {
        self.identity.get_or_init(|| {
            let identity = match &self.hooks.set_required_init_parameters {
                Some(hook) => hook(&self.settings),
                None => self.settings.identity(),
            };

            if self.registry.register(identity.clone()) {
                tracing::info!(
                    "Registered page '{}' for {}/{}",
                    identity.title,
                    identity.module_name,
                    identity.rest_entity_name
                );
            } else {
                tracing::debug!(
                    "Entity {}/{} already registered",
                    identity.module_name,
                    identity.rest_entity_name
                );
            }

            identity
        });
    }

    /// Resets the page counters and loads the list summaries. A member
    /// request still in flight is superseded by the rebind.
    pub async fn bind_view_state(&self) -> LoadOutcome {
        {
            let mut view = self.view.lock().await;
            self.member_requests.next();
            view.loading_members = false;
            match &self.hooks.bind_extra_variables {
                Some(hook) => hook(&self.settings, &mut view),
                None => {
                    view.page = PageState::new(self.settings.page_limit);
                    view.members.clear();
                }
            }
            tracing::debug!(
                "Bound list page: limit={}, page={}",
                view.page.limit,
                view.page.current_page
            );
        }

        self.load_list_summaries().await
    }

    pub async fn load_list_summaries(&self) -> LoadOutcome {
        let token = self.summary_requests.next();
        self.view.lock().await.loading_summaries = true;

        let result = self.service.fetch_summaries().await;

        let mut view = self.view.lock().await;
        if !self.summary_requests.is_current(token) {
            tracing::debug!("Discarding superseded summary response #{}", token);
            return LoadOutcome::Superseded;
        }
        view.loading_summaries = false;

        match result {
            Ok(response) => {
                tracing::debug!("Loaded {} patient lists", response.results.len());
                view.last_error = None;
                match &self.hooks.on_summaries_loaded {
                    Some(hook) => hook(&mut view, response),
                    None => view.summaries = response.results,
                }
                LoadOutcome::Applied
            }
            Err(e) => {
                tracing::warn!("Failed to load patient lists: {}", e);
                view.last_error = Some(e.to_string());
                LoadOutcome::Failed
            }
        }
    }

    /// Loads one page of members of `list_id`. The member collection and
    /// total are cleared before the request is awaited. `limit` only sizes
    /// the request; the view's page size stays fixed.
    pub async fn load_list_members(&self, list_id: &str, page: u32, limit: u32) -> LoadOutcome {
        let page = page.max(1);
        let limit = limit.max(1);
        let token = self.member_requests.next();

        {
            let mut view = self.view.lock().await;
            if view.summary(list_id).is_none() && !view.summaries.is_empty() {
                tracing::debug!("List {} is not among the loaded summaries", list_id);
            }
            view.members.clear();
            view.page.total_results = 0;
            view.page.current_page = page;
            view.selected_list = Some(list_id.to_string());
            view.loading_members = true;
        }

        tracing::debug!("Requesting page {} (limit {}) of list {}", page, limit, list_id);
        let result = self.service.fetch_members(list_id, page, limit).await;

        let mut view = self.view.lock().await;
        if !self.member_requests.is_current(token) {
            tracing::debug!("Discarding superseded member response #{} for list {}", token, list_id);
            return LoadOutcome::Superseded;
        }
        view.loading_members = false;

        match result {
            Ok(response) => {
                tracing::debug!(
                    "Loaded {} of {} members for list {}",
                    response.results.len(),
                    response.length,
                    list_id
                );
                view.last_error = None;
                match &self.hooks.on_members_loaded {
                    Some(hook) => hook(&mut view, response),
                    None => {
                        view.members = response.results;
                        view.page.total_results = response.length;
                    }
                }
                LoadOutcome::Applied
            }
            Err(e) => {
                tracing::warn!("Failed to load members of list {}: {}", list_id, e);
                view.last_error = Some(e.to_string());
                LoadOutcome::Failed
            }
        }
    }

    /// Selects a list and shows its first page.
    pub async fn select_list(&self, list_id: &str) -> LoadOutcome {
        let limit = self.view.lock().await.page.limit;
        self.load_list_members(list_id, 1, limit).await
    }

    /// Reloads the selected list at `page`.
    pub async fn change_page(&self, page: u32) -> LoadOutcome {
        let (selected, limit) = {
            let view = self.view.lock().await;
            (view.selected_list.clone(), view.page.limit)
        };

        match selected {
            Some(list_id) => self.load_list_members(&list_id, page, limit).await,
            None => {
                tracing::debug!("Page change to {} ignored: no list selected", page);
                LoadOutcome::Skipped
            }
        }
    }

    pub async fn next_page(&self) -> LoadOutcome {
        let page = {
            let view = self.view.lock().await;
            let state = view.page;
            if !pagination::has_next(state.current_page, state.limit, state.total_results) {
                return LoadOutcome::Skipped;
            }
            state.current_page + 1
        };
        self.change_page(page).await
    }

    pub async fn previous_page(&self) -> LoadOutcome {
        let page = {
            let view = self.view.lock().await;
            if !pagination::has_previous(view.page.current_page) {
                return LoadOutcome::Skipped;
            }
            view.page.current_page - 1
        };
        self.change_page(page).await
    }

    /// The list page is read-only, so cancel stays put unless a hook says
    /// otherwise.
    pub async fn cancel(&self) -> Navigation {
        let view = self.view.lock().await;
        match &self.hooks.cancel {
            Some(hook) => hook(&view),
            None => {
                tracing::debug!("Cancel ignored on list page");
                Navigation::Stay
            }
        }
    }
}
