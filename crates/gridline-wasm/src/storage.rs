//! Browser `localStorage` persistence.

use gridline_store::{Result, StorageBackend, StoreError};
use wasm_bindgen::JsValue;
use web_sys::Storage;

/// Key the saved grids document is kept under.
pub const DEFAULT_STORAGE_KEY: &str = "gridline.savedGrids";

/// Stores the grid document under one `localStorage` key.
#[derive(Debug, Clone)]
pub struct LocalStorageBackend {
    key: String,
}

impl LocalStorageBackend {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    fn storage(&self) -> Result<Storage> {
        let window =
            web_sys::window().ok_or_else(|| StoreError::Backend("no browser window".into()))?;
        window
            .local_storage()
            .map_err(js_error)?
            .ok_or_else(|| StoreError::Backend("localStorage is unavailable".into()))
    }
}

impl Default for LocalStorageBackend {
    fn default() -> Self {
        Self::new(DEFAULT_STORAGE_KEY)
    }
}

impl StorageBackend for LocalStorageBackend {
    fn read(&self) -> Result<Option<String>> {
        self.storage()?.get_item(&self.key).map_err(js_error)
    }

    fn write(&mut self, contents: &str) -> Result<()> {
        self.storage()?.set_item(&self.key, contents).map_err(js_error)
    }

    fn clear(&mut self) -> Result<()> {
        self.storage()?.remove_item(&self.key).map_err(js_error)
    }
}

fn js_error(value: JsValue) -> StoreError {
    StoreError::Backend(
        value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value)),
    )
}
