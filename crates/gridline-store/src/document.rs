//! The versioned export/persistence document.
//!
//! ```json
//! { "version": 1, "exportedAt": "2024-03-01T12:00:00Z", "grids": [ ... ] }
//! ```

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use gridline_core::SavedGrid;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};

/// Version tag written to, and required from, every document.
pub const FORMAT_VERSION: u64 = 1;

/// A serialized collection of saved grids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridDocument {
    pub version: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<DateTime<Utc>>,
    pub grids: Vec<SavedGrid>,
}

/// Borrowed view used when writing, to avoid cloning the collection.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DocumentView<'a> {
    version: u64,
    exported_at: DateTime<Utc>,
    grids: &'a [SavedGrid],
}

impl GridDocument {
    pub fn new(grids: Vec<SavedGrid>, exported_at: DateTime<Utc>) -> Self {
        Self {
            version: FORMAT_VERSION,
            exported_at: Some(exported_at),
            grids,
        }
    }

    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    /// Parse and validate a document.
    ///
    /// Checks, in order: JSON syntax, object shape, version tag, record
    /// shape, each grid configuration, and id uniqueness.
    pub fn parse(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| StoreError::format(format!("not valid JSON: {}", e)))?;

        let object = value
            .as_object()
            .ok_or_else(|| StoreError::format("expected a JSON object"))?;

        match object.get("version") {
            None => return Err(StoreError::format("missing version tag")),
            Some(v) if v.as_u64() == Some(FORMAT_VERSION) => {}
            Some(v) => {
                return Err(StoreError::format(format!("unsupported version {}", v)));
            }
        }

        if !object.get("grids").is_some_and(|g| g.is_array()) {
            return Err(StoreError::format("missing grids list"));
        }

        let document: GridDocument = serde_json::from_value(value)
            .map_err(|e| StoreError::format(format!("malformed grid record: {}", e)))?;
        document.validate()?;
        Ok(document)
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::with_capacity(self.grids.len());
        for grid in &self.grids {
            if grid.id.as_str().is_empty() {
                return Err(StoreError::format(format!("grid '{}' has an empty id", grid.name)));
            }
            if !seen.insert(&grid.id) {
                return Err(StoreError::format(format!("duplicate grid id '{}'", grid.id)));
            }
            grid.config.validate().map_err(|e| {
                StoreError::format(format!("grid '{}' ({}): {}", grid.name, grid.id, e))
            })?;
        }
        Ok(())
    }
}

/// Serialize a collection in document form without cloning it.
pub(crate) fn write_document(
    grids: &[SavedGrid],
    exported_at: DateTime<Utc>,
    pretty: bool,
) -> Result<String> {
    let view = DocumentView {
        version: FORMAT_VERSION,
        exported_at,
        grids,
    };
    let json = if pretty {
        serde_json::to_string_pretty(&view)?
    } else {
        serde_json::to_string(&view)?
    };
    Ok(json)
}
