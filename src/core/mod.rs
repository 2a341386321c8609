pub mod controller;
pub mod entity;
pub mod hooks;
pub mod messages;
pub mod pagination;
pub mod view_model;

pub use crate::domain::model::{ListMember, ListResponse, ListSummary, PageState};
pub use crate::domain::ports::{ConfigProvider, ListDataService};
pub use crate::utils::error::Result;
