//! Application Configuration
//!
//! Deserialized from a JSON overlay embedded in the host page.
//! Every field has a default so a partial (or missing) overlay works.

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult, ValidationIssue};

const MAX_PAGE_SIZE: usize = 500;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Backend base URL, without trailing slash
    pub api_base_url: String,
    /// Deepest category nesting accepted from the backend
    pub max_tree_depth: usize,
    /// Rows per BoM table page
    pub page_size: usize,
    /// How long a toast stays on screen
    pub notification_ttl_ms: u32,
    /// `error`, `warn`, `info`, `debug` or `trace`
    pub log_level: String,
    /// Title of the assistant chat panel
    pub assistant_name: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            max_tree_depth: 32,
            page_size: 25,
            notification_ttl_ms: 4000,
            log_level: "info".to_string(),
            assistant_name: "BoM Assistant".to_string(),
        }
    }
}

impl AppConfig {
    /// Parse an overlay, keeping defaults for missing fields
    pub fn from_json(json: &str) -> AppResult<Self> {
        let config: AppConfig = serde_json::from_str(json)?;
        config.checked()
    }

    /// Normalize and validate an overlay obtained by other means
    pub fn checked(mut self) -> AppResult<Self> {
        self.normalize();
        self.validate()?;
        Ok(self)
    }

    fn normalize(&mut self) {
        while self.api_base_url.ends_with('/') {
            self.api_base_url.pop();
        }
        self.page_size = self.page_size.clamp(1, MAX_PAGE_SIZE);
    }

    pub fn validate(&self) -> AppResult<()> {
        let mut issues = Vec::new();
        if self.api_base_url.trim().is_empty() {
            issues.push(ValidationIssue::new("api_base_url", "api_base_url must not be empty"));
        }
        if self.max_tree_depth == 0 {
            issues.push(ValidationIssue::new("max_tree_depth", "max_tree_depth must be at least 1"));
        }
        if self.log_level().is_none() {
            issues.push(ValidationIssue::new(
                "log_level",
                format!("unknown log level '{}'", self.log_level),
            ));
        }
        if issues.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(issues))
        }
    }

    /// Parsed `log_level`
    pub fn log_level(&self) -> Option<log::LevelFilter> {
        self.log_level.parse().ok()
    }
}
