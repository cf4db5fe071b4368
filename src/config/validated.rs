//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use url::Url;

use crate::bot::AccessList;
use crate::device::AliasTable;

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the application.
///
/// This struct represents a complete, validated configuration where all
/// required fields are present and all values have been validated.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Telegram bot token (required)
    pub token: String,

    /// Senders allowed to use the bot
    pub access_list: AccessList,

    /// Device alias table path, if any
    pub alias_table: Option<PathBuf>,

    /// Router address (host or host:port)
    pub router_address: String,

    /// Router polling interval
    pub poll_interval: Duration,

    /// Subscription state file
    pub state_file: PathBuf,

    /// Debug logging enabled
    pub debug: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let alias_str = self
            .alias_table
            .as_ref()
            .map_or_else(|| "none".to_string(), |p| p.display().to_string());
        let access_str = if self.access_list.is_open() {
            "everyone".to_string()
        } else {
            self.access_list.names().join(",")
        };

        write!(
            f,
            "Config {{ token: <redacted>, router: {}, poll_interval: {}s, access: {}, \
             alias_table: {}, state_file: {}, debug: {} }}",
            self.router_address,
            self.poll_interval.as_secs(),
            access_str,
            alias_str,
            self.state_file.display(),
            self.debug,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The token is missing or blank
    /// - The router address does not form a valid URL
    /// - The polling interval is zero
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let token = Self::resolve_token(cli, toml)?;
        let access_list = Self::resolve_access_list(cli, toml);
        let router_address = Self::resolve_router(cli, toml)?;
        let poll_interval = Self::resolve_poll_interval(cli, toml)?;

        let alias_table = cli.uid_table.clone().or_else(|| {
            toml.and_then(|t| t.router.alias_table.as_deref())
                .map(expand_tilde)
        });

        let state_file = cli
            .state_file
            .clone()
            .or_else(|| toml.and_then(|t| t.state.file.as_deref()).map(expand_tilde))
            .unwrap_or_else(defaults::state_file);

        // OR semantics: either source can enable it
        let debug = cli.debug || toml.is_some_and(|t| t.log.debug);

        Ok(Self {
            token,
            access_list,
            alias_table,
            router_address,
            poll_interval,
            state_file,
            debug,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    /// Loads the configured alias table, or an empty one if none is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the alias file cannot be read or parsed.
    pub fn load_aliases(&self) -> Result<AliasTable, ConfigError> {
        match &self.alias_table {
            Some(path) => Ok(AliasTable::load(path)?),
            None => Ok(AliasTable::new()),
        }
    }

    fn resolve_token(cli: &Cli, toml: Option<&TomlConfig>) -> Result<String, ConfigError> {
        cli.token
            .as_deref()
            .or_else(|| toml.and_then(|t| t.telegram.token.as_deref()))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(ToString::to_string)
            .ok_or_else(|| {
                ConfigError::missing(
                    field::TOKEN,
                    "Use --token or set telegram.token in config file",
                )
            })
    }

    fn resolve_access_list(cli: &Cli, toml: Option<&TomlConfig>) -> AccessList {
        // CLI replaces TOML entirely
        if !cli.access_list.is_empty() {
            return AccessList::new(cli.access_list.iter().map(|n| n.trim()));
        }

        toml.and_then(|t| t.telegram.access_list.as_ref())
            .map_or_else(AccessList::open, |names| AccessList::new(names.iter().map(String::as_str)))
    }

    fn resolve_router(cli: &Cli, toml: Option<&TomlConfig>) -> Result<String, ConfigError> {
        let address = cli
            .router
            .as_deref()
            .or_else(|| toml.and_then(|t| t.router.address.as_deref()))
            .unwrap_or(defaults::ROUTER_ADDRESS)
            .trim();

        Url::parse(&format!("http://{address}/"))
            .ok()
            .filter(|url| url.path() == "/" && url.query().is_none())
            .ok_or_else(|| ConfigError::InvalidRouter {
                address: address.to_string(),
                reason: "expected host or host:port".to_string(),
            })?;

        Ok(address.to_string())
    }

    fn resolve_poll_interval(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<Duration, ConfigError> {
        // Priority: CLI explicit > TOML > default
        let seconds = cli
            .poll_interval
            .or_else(|| toml.and_then(|t| t.router.poll_interval))
            .unwrap_or(defaults::POLL_INTERVAL_SECS);

        if seconds == 0 {
            return Err(ConfigError::InvalidDuration {
                field: "poll_interval",
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(Duration::from_secs(seconds))
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Expands a leading `~/` to the home directory.
///
/// Paths without the prefix, or on systems without a home directory, are
/// returned unchanged.
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
