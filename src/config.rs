//! Store configuration.

use serde::{Deserialize, Serialize};

use crate::error::{FsError, FsResult};
use crate::logging::LoggingConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Name of the root folder; paths render as `/<root_name>/...`.
    #[serde(default = "default_root_name")]
    pub root_name: String,

    /// Compare sibling names exactly instead of case-insensitively.
    #[serde(default)]
    pub case_sensitive: bool,

    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_root_name() -> String {
    "root".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root_name: default_root_name(),
            case_sensitive: false,
            logging: LoggingConfig::default(),
        }
    }
}

impl StoreConfig {
    pub fn new(root_name: impl Into<String>) -> Self {
        Self {
            root_name: root_name.into(),
            ..Default::default()
        }
    }

    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json(json: &str) -> FsResult<Self> {
        let config: StoreConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> FsResult<()> {
        if self.root_name.is_empty() {
            return Err(FsError::Config("root_name must not be empty".into()));
        }
        if self.root_name.contains('/') {
            return Err(FsError::Config(format!(
                "root_name `{}` must not contain '/'",
                self.root_name
            )));
        }
        Ok(())
    }
}
