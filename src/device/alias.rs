//! Static device id → display name table.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised while loading the alias table at startup.
#[derive(Debug, Error)]
pub enum AliasError {
    /// The alias file could not be read.
    #[error("Failed to read alias table '{}': {source}", path.display())]
    Read {
        /// Path to the alias file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The alias file is not a JSON object of strings.
    #[error("Failed to parse alias table '{}': {source}", path.display())]
    Parse {
        /// Path to the alias file
        path: PathBuf,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },
}

/// Read-only mapping from device id to a human-assigned name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    names: HashMap<String, String>,
}

impl AliasTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the table from a JSON document of the form `{"<id>": "<name>"}`.
    ///
    /// # Errors
    ///
    /// Returns [`AliasError`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, AliasError> {
        let content = std::fs::read_to_string(path).map_err(|source| AliasError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let names = serde_json::from_str(&content).map_err(|source| AliasError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self { names })
    }

    /// Returns the alias for `id`, if any.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    /// Number of aliases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if the table has no aliases.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl FromIterator<(String, String)> for AliasTable {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn load_reads_json_object() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("aliases.json");
        std::fs::write(&path, r#"{"dev-1": "Laptop", "dev-2": "Phone"}"#).unwrap();

        let table = AliasTable::load(&path).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.get("dev-1"), Some("Laptop"));
        assert_eq!(table.get("dev-3"), None);
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.json");

        let err = AliasTable::load(&path).unwrap_err();

        assert!(matches!(err, AliasError::Read { .. }));
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn load_rejects_non_string_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("aliases.json");
        std::fs::write(&path, r#"{"dev-1": 5}"#).unwrap();

        let err = AliasTable::load(&path).unwrap_err();
        assert!(matches!(err, AliasError::Parse { .. }));
    }

    #[test]
    fn new_table_is_empty() {
        assert!(AliasTable::new().is_empty());
    }
}
