//! Saved grid store for gridline.
//!
//! A [`GridStore`] owns the user's saved grids and keeps them in sync with a
//! [`StorageBackend`]. Grids are exported and imported as a versioned
//! [`GridDocument`].
//!
//! # Example
//!
//! ```
//! use gridline_core::{AxisGridConfig, GridConfig, GridDraft};
//! use gridline_store::{GridStore, MemoryBackend, StoreOptions};
//!
//! let mut store = GridStore::open(MemoryBackend::new(), StoreOptions::default());
//! let config = GridConfig::new().with_columns(AxisGridConfig::percent(12, 5.0, 2.0));
//! let grid = store.create(GridDraft::new("Twelve", config)).unwrap();
//!
//! assert_eq!(store.search("twelve")[0].id, grid.id);
//! ```

mod backend;
mod document;
mod error;
mod options;
mod store;

pub use backend::{JsonFileBackend, MemoryBackend, StorageBackend};
pub use document::{GridDocument, FORMAT_VERSION};
pub use error::{Result, StoreError};
pub use options::{ImportMode, StoreOptions};
pub use store::{GridStore, ImportOutcome};
