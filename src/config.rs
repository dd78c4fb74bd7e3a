//! Key format and logging preferences
//!
//! The browser build always runs with [`Config::default`], which matches the
//! key shape already present in users' storage. Embedders of the library can
//! override fields from JSON.

use serde::{Deserialize, Serialize};

use crate::consts;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Namespace placed before the user identifier
    pub key_prefix: String,
    /// Placed after the user identifier
    pub key_suffix: String,
    /// Attribute read from the last script element
    pub user_attribute: String,
    /// Key fragment when the attribute is missing
    pub missing_user: String,
    /// Minimum log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            key_prefix: consts::KEY_PREFIX.to_string(),
            key_suffix: consts::KEY_SUFFIX.to_string(),
            user_attribute: consts::USER_ATTRIBUTE.to_string(),
            missing_user: consts::MISSING_USER.to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Parse a config, filling absent fields with defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Configured level, falling back to Info for unknown names
    pub fn level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }
}
