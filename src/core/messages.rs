use std::collections::HashMap;

pub const PATIENT_LIST_PAGE_KEY: &str = "patientlist.page";

/// Localized message lookup. Unknown keys resolve to the key itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageCatalog {
    entries: HashMap<String, String>,
}

impl MessageCatalog {
    pub fn new(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }

    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Built-in messages overlaid with `overrides`.
    pub fn with_overrides(overrides: HashMap<String, String>) -> Self {
        let mut catalog = Self::default();
        catalog.entries.extend(overrides);
        catalog
    }

    pub fn message(&self, key: &str) -> String {
        self.entries
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }
}

impl Default for MessageCatalog {
    fn default() -> Self {
        let mut entries = HashMap::new();
        entries.insert(PATIENT_LIST_PAGE_KEY.to_string(), "Patient List".to_string());
        Self { entries }
    }
}
