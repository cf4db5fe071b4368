//! Command dispatch.

use std::sync::Arc;

use super::format;
use super::{AccessList, Action, Command, CommandTable};
use crate::device::{DeviceScanner, DeviceSource};
use crate::notify::{HandlerId, RegistryWriter, Subscription};
use crate::state::{StateError, Subscriber, SubscriptionStore};

/// Fixed reply texts.
pub mod reply {
    /// Sender is not on the access list.
    pub const ACCESS_DENIED: &str = "Access denied";
    /// Text matched no command.
    pub const UNKNOWN_COMMAND: &str = "Unknown command";
    /// Subscription added.
    pub const REGISTERED: &str = "notification registered";
    /// Subscription removed.
    pub const UNREGISTERED: &str = "notification unregistered";
    /// Router gave no device list.
    pub const DEVICES_UNAVAILABLE: &str = "Device list is not available";
    /// Router answered but no registered device is connected.
    pub const NO_DEVICES_ONLINE: &str = "No devices online";
    /// Subscription change could not be persisted.
    pub const STATE_NOT_SAVED: &str = "Failed to save subscription state";
}

/// Collaborators a command may use.
#[derive(Debug)]
pub struct CommandContext<S, St> {
    /// Scanner shared with the polling loop.
    pub scanner: Arc<DeviceScanner<S>>,
    /// Mutating view of the subscription registry.
    pub registry: RegistryWriter,
    /// Durable subscription state.
    pub store: Arc<St>,
}

/// Routes commands to their actions and produces the reply text.
#[derive(Debug)]
pub struct CommandDispatcher<S, St> {
    table: CommandTable,
    access: AccessList,
    context: CommandContext<S, St>,
}

impl<S, St> CommandDispatcher<S, St>
where
    S: DeviceSource,
    St: SubscriptionStore,
{
    /// Creates a dispatcher.
    #[must_use]
    pub const fn new(table: CommandTable, access: AccessList, context: CommandContext<S, St>) -> Self {
        Self {
            table,
            access,
            context,
        }
    }

    /// Returns the access list applied to every command.
    #[must_use]
    pub const fn access(&self) -> &AccessList {
        &self.access
    }

    /// Handles one command and returns the reply for its sender.
    ///
    /// Access is checked before lookup: a denied sender learns nothing
    /// about which commands exist.
    pub async fn handle(&self, command: &Command) -> String {
        if !self.access.permits(&command.user_name) {
            tracing::warn!(
                user = %command.user_name,
                command = %command.value,
                offset = command.offset,
                "Access denied"
            );
            return reply::ACCESS_DENIED.to_string();
        }

        let Some(action) = self.table.lookup(&command.value) else {
            tracing::debug!(command = %command.value, offset = command.offset, "Unknown command");
            return reply::UNKNOWN_COMMAND.to_string();
        };

        match action {
            Action::ListDevices => self.list_devices().await,
            Action::Register => self.register(command).await,
            Action::Unregister => self.unregister(command).await,
            Action::Help => self.table.help_text(),
        }
    }

    async fn list_devices(&self) -> String {
        match self.context.scanner.snapshot().await {
            Some(devices) if devices.is_empty() => reply::NO_DEVICES_ONLINE.to_string(),
            Some(devices) => format::device_list(&devices),
            None => reply::DEVICES_UNAVAILABLE.to_string(),
        }
    }

    async fn register(&self, command: &Command) -> String {
        let handler = HandlerId::DeviceChanges;
        let subscriber = Subscriber::new(command.user_id, command.user_name.clone());

        let saved = self
            .context
            .store
            .add(handler.kind(), &command.value, &subscriber)
            .await;
        if let Err(e) = saved {
            return state_not_saved(&e, command);
        }

        self.context
            .registry
            .register(Subscription::device_changes(command.user_id));
        tracing::info!(user = %command.user_name, chat_id = command.user_id, "Subscribed to device changes");
        reply::REGISTERED.to_string()
    }

    async fn unregister(&self, command: &Command) -> String {
        let handler = HandlerId::DeviceChanges;

        let saved = self
            .context
            .store
            .remove(handler.kind(), command.user_id)
            .await;
        if let Err(e) = saved {
            return state_not_saved(&e, command);
        }

        self.context
            .registry
            .unregister(&Subscription::device_changes(command.user_id));
        tracing::info!(user = %command.user_name, chat_id = command.user_id, "Unsubscribed from device changes");
        reply::UNREGISTERED.to_string()
    }
}

fn state_not_saved(error: &StateError, command: &Command) -> String {
    tracing::error!(user = %command.user_name, command = %command.value, "{error}");
    reply::STATE_NOT_SAVED.to_string()
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;
