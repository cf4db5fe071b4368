//! Static command table.

/// What a command does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Reply with the devices currently online.
    ListDevices,
    /// Subscribe the sender to device change notifications.
    Register,
    /// Unsubscribe the sender from device change notifications.
    Unregister,
    /// Reply with the command list.
    Help,
}

/// One table entry: the names a command answers to plus its help line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    /// Accepted names, already normalized.
    pub names: &'static [&'static str],
    /// Action to run.
    pub action: Action,
    /// Help line.
    pub description: &'static str,
}

/// The commands the bot understands, in help order.
pub const COMMANDS: [CommandSpec; 4] = [
    CommandSpec {
        names: &["d", "devices"],
        action: Action::ListDevices,
        description: "d, devices - Get current devices list",
    },
    CommandSpec {
        names: &["r", "register"],
        action: Action::Register,
        description: "r, register - Register device changes notification",
    },
    CommandSpec {
        names: &["u", "unregister"],
        action: Action::Unregister,
        description: "u, unregister - Unregister device changes notification",
    },
    CommandSpec {
        names: &["h", "help"],
        action: Action::Help,
        description: "h, help - Command list",
    },
];

/// Lookup table from normalized command text to action.
#[derive(Debug, Clone, Copy)]
pub struct CommandTable {
    specs: &'static [CommandSpec],
}

impl CommandTable {
    /// The bot's built-in commands.
    #[must_use]
    pub const fn standard() -> Self {
        Self { specs: &COMMANDS }
    }

    /// Returns the action registered under `name`, if any.
    ///
    /// `name` must already be normalized.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<Action> {
        self.specs
            .iter()
            .find(|spec| spec.names.iter().any(|n| *n == name))
            .map(|spec| spec.action)
    }

    /// Renders the help reply.
    #[must_use]
    pub fn help_text(&self) -> String {
        let lines: Vec<&str> = self.specs.iter().map(|spec| spec.description).collect();
        format!("Help:\n{}", lines.join("\n"))
    }
}

impl Default for CommandTable {
    fn default() -> Self {
        Self::standard()
    }
}
