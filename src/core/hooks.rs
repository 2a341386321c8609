//! Optional overrides for the list page lifecycle.
//!
//! A variant page installs only the hooks it needs; every hook left as
//! `None` falls back to the controller's built-in behaviour.

use crate::core::entity::{ControllerSettings, EntityIdentity};
use crate::core::view_model::ListViewModel;
use crate::domain::model::{ListMember, ListResponse, ListSummary};
use std::fmt;
use std::sync::Arc;

/// Where the page should go after a cancel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Stay,
    Return(String),
}

pub type InitHook = Arc<dyn Fn(&ControllerSettings) -> EntityIdentity + Send + Sync>;
pub type BindHook = Arc<dyn Fn(&ControllerSettings, &mut ListViewModel) + Send + Sync>;
pub type SummariesHook = Arc<dyn Fn(&mut ListViewModel, ListResponse<ListSummary>) + Send + Sync>;
pub type MembersHook = Arc<dyn Fn(&mut ListViewModel, ListResponse<ListMember>) + Send + Sync>;
pub type CancelHook = Arc<dyn Fn(&ListViewModel) -> Navigation + Send + Sync>;

#[derive(Clone, Default)]
pub struct ControllerHooks {
    pub set_required_init_parameters: Option<InitHook>,
    pub bind_extra_variables: Option<BindHook>,
    pub on_summaries_loaded: Option<SummariesHook>,
    pub on_members_loaded: Option<MembersHook>,
    pub cancel: Option<CancelHook>,
}

impl ControllerHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_init(
        mut self,
        hook: impl Fn(&ControllerSettings) -> EntityIdentity + Send + Sync + 'static,
    ) -> Self {
        self.set_required_init_parameters = Some(Arc::new(hook));
        self
    }

    pub fn with_bind(
        mut self,
        hook: impl Fn(&ControllerSettings, &mut ListViewModel) + Send + Sync + 'static,
    ) -> Self {
        self.bind_extra_variables = Some(Arc::new(hook));
        self
    }

    pub fn with_summaries_loaded(
        mut self,
        hook: impl Fn(&mut ListViewModel, ListResponse<ListSummary>) + Send + Sync + 'static,
    ) -> Self {
        self.on_summaries_loaded = Some(Arc::new(hook));
        self
    }

    pub fn with_members_loaded(
        mut self,
        hook: impl Fn(&mut ListViewModel, ListResponse<ListMember>) + Send + Sync + 'static,
    ) -> Self {
        self.on_members_loaded = Some(Arc::new(hook));
        self
    }

    pub fn with_cancel(
        mut self,
        hook: impl Fn(&ListViewModel) -> Navigation + Send + Sync + 'static,
    ) -> Self {
        self.cancel = Some(Arc::new(hook));
        self
    }
}

impl fmt::Debug for ControllerHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerHooks")
            .field("set_required_init_parameters", &self.set_required_init_parameters.is_some())
            .field("bind_extra_variables", &self.bind_extra_variables.is_some())
            .field("on_summaries_loaded", &self.on_summaries_loaded.is_some())
            .field("on_members_loaded", &self.on_members_loaded.is_some())
            .field("cancel", &self.cancel.is_some())
            .finish()
    }
}
