//! Configuration structures for deposit dispatch
//!
//! Deposit points and notification settings are owned by the host's
//! configuration store, keyed by publishing context. This module provides
//! the type-safe view the dispatch core reads, loaded from YAML with
//! `${VAR}` environment-variable expansion for credential fields.

use crate::core::error::ConfigError;
use regex::Regex;
use secrecy::SecretString;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Rendering used wherever a stored password must be displayed
pub const PASSWORD_SLUG: &str = "******";

static ENV_VAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    // ${VAR_NAME}
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("env var pattern is valid")
});

/// Behavioral type of a deposit point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DepositPointType {
    Automatic,
    OptionalSelection,
    OptionalFixed,
    ManagerOnly,
}

impl DepositPointType {
    /// Get string representation of this deposit point type
    pub fn as_str(&self) -> &'static str {
        match self {
            DepositPointType::Automatic => "automatic",
            DepositPointType::OptionalSelection => "optional-selection",
            DepositPointType::OptionalFixed => "optional-fixed",
            DepositPointType::ManagerOnly => "manager-only",
        }
    }

    /// Human-readable label for display surfaces
    pub fn label(&self) -> &'static str {
        match self {
            DepositPointType::Automatic => "Automatic deposit on publication",
            DepositPointType::OptionalSelection => "Optional deposit: authors select repository",
            DepositPointType::OptionalFixed => "Optional deposit: fixed repository",
            DepositPointType::ManagerOnly => "Manager-initiated deposit only",
        }
    }
}

/// A configured remote repository endpoint with its credentials
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositPoint {
    pub id: i64,

    pub name: String,

    #[serde(rename = "type")]
    pub point_type: DepositPointType,

    /// SWORD create-resource endpoint URL
    pub sword_url: String,

    pub username: String,

    pub password: SecretString,

    /// Optional API key sent alongside basic auth
    #[serde(default)]
    pub api_key: Option<SecretString>,
}

/// Delivery-report notification settings
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationConfig {
    pub sender_email: String,

    #[serde(default = "default_sender_name")]
    pub sender_name: String,

    /// Single fixed administrative recipient for delivery reports
    pub recipient_email: String,

    #[serde(default = "default_recipient_name")]
    pub recipient_name: String,
}

fn default_sender_name() -> String {
    "Publishing Admin".to_string()
}

fn default_recipient_name() -> String {
    "Sword Deposit Administration".to_string()
}

/// Root configuration for one publishing context
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwordConfig {
    pub context_id: i64,

    /// Localized context name, used in the notification identifier
    pub context_name: String,

    /// Root directory for transient deposit packages
    pub working_directory: PathBuf,

    /// Per-request timeout for deposit calls (default: 30s)
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Host-supplied ordering is preserved for dispatch
    #[serde(default)]
    pub deposit_points: Vec<DepositPoint>,

    pub notification: NotificationConfig,
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl SwordConfig {
    /// Load configuration from a YAML file
    ///
    /// `${VAR}` references anywhere in the file are expanded from the
    /// process environment before parsing, so credentials can stay out of
    /// the file itself.
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let env: HashMap<String, String> = std::env::vars().collect();
        let expanded = expand_env_vars(&raw, &env)?;

        serde_yaml::from_str(&expanded).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Expand `${VAR}` references in a configuration document
///
/// An unset variable is an error rather than an empty expansion: a blank
/// password would otherwise fail much later, at the remote endpoint.
pub fn expand_env_vars(
    input: &str,
    env: &HashMap<String, String>,
) -> Result<String, ConfigError> {
    let mut result = input.to_string();
    for cap in ENV_VAR_PATTERN.captures_iter(input) {
        let var_name = &cap[1];
        match env.get(var_name) {
            Some(value) => {
                result = result.replace(&format!("${{{}}}", var_name), value);
            }
            None => {
                return Err(ConfigError::MissingEnvVar {
                    name: var_name.to_string(),
                });
            }
        }
    }
    Ok(result)
}
