//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Telegram bot section
    #[serde(default)]
    pub telegram: TelegramSection,

    /// Router section
    #[serde(default)]
    pub router: RouterSection,

    /// Subscription state section
    #[serde(default)]
    pub state: StateSection,

    /// Logging section
    #[serde(default)]
    pub log: LogSection,
}

/// Telegram bot configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TelegramSection {
    /// Bot token
    pub token: Option<String>,

    /// Display names allowed to use the bot
    pub access_list: Option<Vec<String>>,
}

/// Router configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouterSection {
    /// Router address (host or host:port)
    pub address: Option<String>,

    /// Polling interval in seconds
    pub poll_interval: Option<u64>,

    /// Path to the device alias table
    pub alias_table: Option<String>,
}

/// Subscription state configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StateSection {
    /// Path to the state file
    pub file: Option<String>,
}

/// Logging configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogSection {
    /// Enable debug logging
    #[serde(default)]
    pub debug: bool,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# lanwatch configuration file

[telegram]
# Bot token from @BotFather (required, can be overridden by --token)
# token = "123456:ABC-DEF"

# Display names allowed to use the bot (empty = everyone)
# Note: --access-list REPLACES this list entirely (not merged)
# access_list = ["Alice", "Bob"]

[router]
# Router address, host or host:port (default: 192.168.1.1)
# address = "192.168.1.1"

# Polling interval in seconds (default: 3)
poll_interval = 3

# JSON file mapping device ids to display names
# alias_table = "~/.config/lanwatch/aliases.json"

[state]
# Subscription state file (default: <data dir>/lanwatch/subscriptions.json)
# file = "~/.local/share/lanwatch/subscriptions.json"

[log]
# Enable debug logging (same as --debug)
# debug = false
"#
    .to_string()
}
