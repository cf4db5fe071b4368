//! Sender allow-list.

/// Display names allowed to use the bot.
///
/// An empty list admits everyone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessList {
    names: Vec<String>,
}

impl AccessList {
    /// Creates a list admitting exactly `names`.
    #[must_use]
    pub fn new(names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a list that admits everyone.
    #[must_use]
    pub const fn open() -> Self {
        Self { names: Vec::new() }
    }

    /// Returns true if `user_name` may issue commands.
    ///
    /// Names are compared exactly.
    #[must_use]
    pub fn permits(&self, user_name: &str) -> bool {
        self.names.is_empty() || self.names.iter().any(|n| n == user_name)
    }

    /// Returns the configured names.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Returns true if no restriction is configured.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.names.is_empty()
    }
}
