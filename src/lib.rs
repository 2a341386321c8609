pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::rest::RestListDataService;
pub use crate::config::toml_config::TomlConfig;
pub use crate::core::controller::{ListPageController, LoadOutcome};
pub use crate::core::entity::{ControllerSettings, EntityIdentity, EntityRegistry};
pub use crate::core::hooks::{ControllerHooks, Navigation};
pub use crate::core::view_model::{ListViewModel, ViewModelHandle};
pub use crate::utils::error::{PatientListError, Result};
