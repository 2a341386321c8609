use crate::adapters::rest::DEFAULT_REST_PATH;
use crate::core::entity::ControllerSettings;
use crate::domain::model::DEFAULT_PAGE_LIMIT;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{PatientListError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub page: PageConfig,
    #[serde(default)]
    pub messages: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub base_url: String,
    pub rest_path: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageConfig {
    pub limit: Option<u32>,
    pub module_name: Option<String>,
    pub rest_entity_name: Option<String>,
    pub title_key: Option<String>,
    pub base_path: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PatientListError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PatientListError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${OPENMRS_PASSWORD})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PatientListError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("server.base_url", &self.server.base_url)?;
        validation::validate_rest_path("server.rest_path", self.rest_path())?;
        validation::validate_credentials(
            self.server.username.as_deref(),
            self.server.password.as_deref(),
        )?;

        if let Some(timeout) = self.server.timeout_seconds {
            validation::validate_positive_number("server.timeout_seconds", timeout, 1)?;
        }

        if let Some(limit) = self.page.limit {
            validation::validate_range("page.limit", limit, 1, 1000)?;
        }

        for (field, value) in [
            ("page.module_name", &self.page.module_name),
            ("page.rest_entity_name", &self.page.rest_entity_name),
            ("page.title_key", &self.page.title_key),
        ] {
            if let Some(value) = value {
                validation::validate_non_empty_string(field, value)?;
            }
        }

        Ok(())
    }

    pub fn rest_path(&self) -> &str {
        self.server.rest_path.as_deref().unwrap_or(DEFAULT_REST_PATH)
    }

    /// Controller settings with the page table applied over the defaults.
    pub fn controller_settings(&self) -> ControllerSettings {
        let mut settings = ControllerSettings::from_config(self);
        if let Some(module_name) = &self.page.module_name {
            settings.module_name = module_name.clone();
        }
        if let Some(rest_entity_name) = &self.page.rest_entity_name {
            settings.rest_entity_name = rest_entity_name.clone();
        }
        if let Some(title_key) = &self.page.title_key {
            settings.title_key = title_key.clone();
        }
        if let Some(base_path) = &self.page.base_path {
            settings.base_path = base_path.clone();
        }
        settings
    }
}

impl ConfigProvider for TomlConfig {
    fn base_url(&self) -> &str {
        &self.server.base_url
    }

    fn rest_path(&self) -> &str {
        TomlConfig::rest_path(self)
    }

    fn timeout_seconds(&self) -> u64 {
        self.server.timeout_seconds.unwrap_or(30)
    }

    fn credentials(&self) -> Option<(&str, &str)> {
        self.server
            .username
            .as_deref()
            .zip(self.server.password.as_deref())
    }

    fn session_id(&self) -> Option<&str> {
        self.server.session_id.as_deref()
    }

    fn page_limit(&self) -> u32 {
        self.page.limit.unwrap_or(DEFAULT_PAGE_LIMIT)
    }

    fn messages(&self) -> HashMap<String, String> {
        self.messages.clone()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
