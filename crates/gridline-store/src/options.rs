//! Store configuration.

use serde::{Deserialize, Serialize};

/// How an imported document combines with the current collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportMode {
    /// The imported grids become the whole collection.
    #[default]
    Replace,
    /// Imported grids overwrite same-id grids in place; new ids are appended.
    Merge,
}

/// Options for a [`GridStore`](crate::GridStore).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreOptions {
    pub import_mode: ImportMode,
    /// Appended to the name of a duplicated grid
    pub copy_suffix: String,
    /// Indent exported JSON
    pub pretty_export: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            import_mode: ImportMode::Replace,
            copy_suffix: " (Copy)".to_string(),
            pretty_export: true,
        }
    }
}

impl StoreOptions {
    pub fn with_import_mode(mut self, mode: ImportMode) -> Self {
        self.import_mode = mode;
        self
    }

    pub fn with_copy_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.copy_suffix = suffix.into();
        self
    }

    pub fn with_pretty_export(mut self, pretty: bool) -> Self {
        self.pretty_export = pretty;
        self
    }
}
