//! Chat bot layer: command handling and change notifications.
//!
//! This module provides:
//! - Inbound commands and the chat abstraction ([`Command`], [`ChatTransport`])
//! - The static command table and access list ([`CommandTable`], [`AccessList`])
//! - Command dispatch and the receive loop ([`CommandDispatcher`], [`CommandLoop`])
//! - Delivery of device changes to subscribers ([`ChangeNotifier`])
//! - Startup replay of stored subscriptions ([`restore_subscriptions`])

mod access;
mod command;
mod command_loop;
mod dispatcher;
pub mod format;
mod notifier;
mod restore;
mod table;
mod transport;

pub use access::AccessList;
pub use command::Command;
pub use command_loop::{CommandLoop, FETCH_TIMEOUT, RETRY_DELAY};
pub use dispatcher::{CommandContext, CommandDispatcher, reply};
pub use notifier::ChangeNotifier;
pub use restore::restore_subscriptions;
pub use table::{Action, COMMANDS, CommandSpec, CommandTable};
pub use transport::{ChatTransport, CommandBatch};

#[cfg(test)]
pub use transport::mock;
