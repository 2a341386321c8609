use crate::core::messages::{MessageCatalog, PATIENT_LIST_PAGE_KEY};
use crate::domain::model::DEFAULT_PAGE_LIMIT;
use crate::domain::ports::ConfigProvider;
use std::sync::{Arc, Mutex, PoisonError};

pub const PATIENT_LIST_MODULE_NAME: &str = "patientlist";
pub const LIST_REST_ENTITY_NAME: &str = "list";

/// Metadata a page declares to the shared entity infrastructure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityIdentity {
    pub module_name: String,
    pub rest_entity_name: String,
    pub title: String,
    pub base_path: String,
}

impl EntityIdentity {
    pub fn new(
        module_name: impl Into<String>,
        rest_entity_name: impl Into<String>,
        title: impl Into<String>,
        base_path: impl Into<String>,
    ) -> Self {
        Self {
            module_name: module_name.into(),
            rest_entity_name: rest_entity_name.into(),
            title: title.into(),
            base_path: base_path.into(),
        }
    }

    fn same_entity(&self, other: &EntityIdentity) -> bool {
        self.module_name == other.module_name && self.rest_entity_name == other.rest_entity_name
    }
}

/// Identities registered by pages, keyed by module and REST entity name.
/// The first registration for a key wins.
#[derive(Debug, Clone, Default)]
pub struct EntityRegistry {
    entries: Arc<Mutex<Vec<EntityIdentity>>>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when the entity was already registered; the existing
    /// identity is left untouched.
    pub fn register(&self, identity: EntityIdentity) -> bool {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if entries.iter().any(|e| e.same_entity(&identity)) {
            return false;
        }
        entries.push(identity);
        true
    }

    pub fn get(&self, module_name: &str, rest_entity_name: &str) -> Option<EntityIdentity> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries
            .iter()
            .find(|e| e.module_name == module_name && e.rest_entity_name == rest_entity_name)
            .cloned()
    }

    pub fn snapshot(&self) -> Vec<EntityIdentity> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Explicit identity and page configuration handed to a list controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerSettings {
    pub module_name: String,
    pub rest_entity_name: String,
    pub title_key: String,
    pub base_path: String,
    pub page_limit: u32,
    pub messages: MessageCatalog,
}

impl ControllerSettings {
    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self {
            page_limit: config.page_limit(),
            messages: MessageCatalog::with_overrides(config.messages()),
            ..Self::default()
        }
    }

    pub fn title(&self) -> String {
        self.messages.message(&self.title_key)
    }

    /// Identity built from these settings; what `initialize` registers when
    /// no override hook is installed.
    pub fn identity(&self) -> EntityIdentity {
        EntityIdentity::new(
            self.module_name.clone(),
            self.rest_entity_name.clone(),
            self.title(),
            self.base_path.clone(),
        )
    }
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            module_name: PATIENT_LIST_MODULE_NAME.to_string(),
            rest_entity_name: LIST_REST_ENTITY_NAME.to_string(),
            title_key: PATIENT_LIST_PAGE_KEY.to_string(),
            base_path: String::new(),
            page_limit: DEFAULT_PAGE_LIMIT,
            messages: MessageCatalog::default(),
        }
    }
}
