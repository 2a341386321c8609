use crate::adapters::rest::DEFAULT_REST_PATH;
use crate::domain::model::DEFAULT_PAGE_LIMIT;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

#[derive(Clone, Serialize, Deserialize, Parser)]
#[command(name = "patient-list")]
#[command(about = "Browse OpenMRS patient lists from the command line")]
pub struct CliConfig {
    #[arg(long, help = "TOML configuration file; overrides the server flags")]
    pub config: Option<String>,

    #[arg(long, default_value = "http://localhost:8080/openmrs")]
    pub base_url: String,

    #[arg(long, default_value = DEFAULT_REST_PATH)]
    pub rest_path: String,

    #[arg(long, env = "PATIENT_LIST_USERNAME")]
    pub username: Option<String>,

    #[arg(long, env = "PATIENT_LIST_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    #[arg(long, help = "Existing JSESSIONID to reuse")]
    pub session_id: Option<String>,

    #[arg(long, default_value_t = DEFAULT_PAGE_LIMIT)]
    pub limit: u32,

    #[arg(long, help = "Patient list uuid to show")]
    pub list: Option<String>,

    #[arg(long, default_value_t = 1)]
    pub page: u32,

    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    #[arg(long, help = "Emit JSON log lines")]
    pub json_logs: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

fn redact(value: &Option<String>) -> Option<&'static str> {
    value.as_ref().map(|_| "***")
}

// Secrets never reach the logs.
impl fmt::Debug for CliConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CliConfig")
            .field("config", &self.config)
            .field("base_url", &self.base_url)
            .field("rest_path", &self.rest_path)
            .field("username", &self.username)
            .field("password", &redact(&self.password))
            .field("session_id", &redact(&self.session_id))
            .field("limit", &self.limit)
            .field("list", &self.list)
            .field("page", &self.page)
            .field("timeout", &self.timeout)
            .field("json_logs", &self.json_logs)
            .field("verbose", &self.verbose)
            .finish()
    }
}

impl ConfigProvider for CliConfig {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn rest_path(&self) -> &str {
        &self.rest_path
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout
    }

    fn credentials(&self) -> Option<(&str, &str)> {
        self.username.as_deref().zip(self.password.as_deref())
    }

    fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    fn page_limit(&self) -> u32 {
        self.limit
    }

    fn messages(&self) -> HashMap<String, String> {
        HashMap::new()
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("base_url", &self.base_url)?;
        validation::validate_rest_path("rest_path", &self.rest_path)?;
        validation::validate_credentials(self.username.as_deref(), self.password.as_deref())?;
        validation::validate_range("limit", self.limit, 1, 1000)?;
        validation::validate_positive_number("page", u64::from(self.page), 1)?;
        validation::validate_positive_number("timeout", self.timeout, 1)?;
        if let Some(list) = &self.list {
            validation::validate_non_empty_string("list", list)?;
        }
        Ok(())
    }
}
