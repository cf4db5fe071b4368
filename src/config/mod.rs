//! Configuration layer for lanwatch.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **TOML config file** - Values from the configuration file
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! The bot token has no default and must come from one of the first two sources.
//!
//! The access list follows "replace" semantics: a non-empty `--access-list`
//! replaces `telegram.access_list` entirely. An empty resulting list lets
//! every sender use the bot.
//!
//! # Boolean Flag Semantics
//!
//! `--debug` uses OR semantics with `log.debug`: if either is `true`, debug
//! logging is enabled.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod validated_tests;

pub use cli::{Cli, Command};
pub use error::{ConfigError, field};
pub use toml::{TomlConfig, default_config_template};
pub use validated::{ValidatedConfig, expand_tilde, write_default_config};
