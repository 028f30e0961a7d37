//! The saved grid store.

use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use gridline_core::{GridDraft, GridId, GridPatch, SavedGrid};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::backend::StorageBackend;
use crate::document::{write_document, GridDocument};
use crate::error::Result;
use crate::options::{ImportMode, StoreOptions};

/// Result of an import, shaped for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportOutcome {
    pub success: bool,
    /// The imported records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grids: Option<Vec<SavedGrid>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub count: usize,
}

impl ImportOutcome {
    fn imported(grids: Vec<SavedGrid>) -> Self {
        Self {
            success: true,
            count: grids.len(),
            grids: Some(grids),
            error: None,
        }
    }

    fn failed(error: String) -> Self {
        Self {
            success: false,
            grids: None,
            error: Some(error),
            count: 0,
        }
    }
}

/// Ordered collection of saved grids kept in sync with a backend.
///
/// Every mutation builds the next collection, persists it, and only then
/// replaces the in-memory state, so a failed write leaves the store as it was.
#[derive(Debug)]
pub struct GridStore<B: StorageBackend> {
    grids: Vec<SavedGrid>,
    backend: B,
    options: StoreOptions,
    last_issued: Option<DateTime<Utc>>,
}

impl<B: StorageBackend> GridStore<B> {
    /// Load the collection from `backend`.
    ///
    /// A missing document is an empty store. An unreadable or invalid one is
    /// logged and also starts empty; it is overwritten on the next mutation.
    pub fn open(backend: B, options: StoreOptions) -> Self {
        let grids = match backend.read() {
            Ok(None) => Vec::new(),
            Ok(Some(json)) => match GridDocument::parse(&json) {
                Ok(document) => document.grids,
                Err(err) => {
                    warn!(%err, "ignoring invalid saved grids document");
                    Vec::new()
                }
            },
            Err(err) => {
                warn!(%err, "could not read saved grids");
                Vec::new()
            }
        };
        debug!(count = grids.len(), "opened grid store");

        let last_issued = grids
            .iter()
            .flat_map(|g| [g.created_at, g.updated_at])
            .max();

        Self {
            grids,
            backend,
            options,
            last_issued,
        }
    }

    pub fn grids(&self) -> &[SavedGrid] {
        &self.grids
    }

    pub fn get(&self, id: &GridId) -> Option<&SavedGrid> {
        self.grids.iter().find(|g| &g.id == id)
    }

    pub fn len(&self) -> usize {
        self.grids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grids.is_empty()
    }

    /// Distinct tags across all grids, in first-seen order.
    pub fn all_tags(&self) -> IndexSet<&str> {
        self.grids
            .iter()
            .flat_map(|g| g.tags.iter().map(String::as_str))
            .collect()
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Save a new grid and return it.
    pub fn create(&mut self, draft: GridDraft) -> Result<SavedGrid> {
        let now = self.next_timestamp();
        let grid = SavedGrid::from_draft(draft, new_id(), now);

        let mut next = self.grids.clone();
        next.push(grid.clone());
        self.commit(next)?;

        info!(id = %grid.id, name = %grid.name, "created grid");
        Ok(grid)
    }

    /// Merge `patch` into the grid with `id` and bump its `updated_at`.
    ///
    /// An unknown id leaves the collection unchanged.
    pub fn update(&mut self, id: &GridId, patch: GridPatch) -> Result<&[SavedGrid]> {
        let Some(index) = self.position(id) else {
            debug!(%id, "update of unknown grid ignored");
            return Ok(&self.grids);
        };

        let now = self.next_timestamp();
        let mut next = self.grids.clone();
        patch.apply_to(&mut next[index]);
        next[index].updated_at = now;
        self.commit(next)?;

        debug!(%id, "updated grid");
        Ok(&self.grids)
    }

    /// Remove the grid with `id` if present.
    pub fn delete(&mut self, id: &GridId) -> Result<&[SavedGrid]> {
        let Some(index) = self.position(id) else {
            debug!(%id, "delete of unknown grid ignored");
            return Ok(&self.grids);
        };

        let mut next = self.grids.clone();
        next.remove(index);
        self.commit(next)?;

        info!(%id, "deleted grid");
        Ok(&self.grids)
    }

    /// Copy the grid with `id` under a new id, directly after the original.
    pub fn duplicate(&mut self, id: &GridId) -> Result<Option<SavedGrid>> {
        let Some(index) = self.position(id) else {
            debug!(%id, "duplicate of unknown grid ignored");
            return Ok(None);
        };

        let now = self.next_timestamp();
        let source = &self.grids[index];
        let copy = SavedGrid {
            id: new_id(),
            name: format!("{}{}", source.name, self.options.copy_suffix),
            created_at: now,
            updated_at: now,
            ..source.clone()
        };

        let mut next = self.grids.clone();
        next.insert(index + 1, copy.clone());
        self.commit(next)?;

        info!(source = %id, id = %copy.id, "duplicated grid");
        Ok(Some(copy))
    }

    /// Grids whose name, description or tags contain `query`, ignoring case.
    pub fn search(&self, query: &str) -> Vec<&SavedGrid> {
        self.grids.iter().filter(|g| g.matches(query)).collect()
    }

    /// Snapshot of the collection as an export document.
    pub fn export_all(&self) -> GridDocument {
        GridDocument::new(self.grids.clone(), Utc::now())
    }

    pub fn export_json(&self) -> Result<String> {
        write_document(&self.grids, Utc::now(), self.options.pretty_export)
    }

    /// Validate and load an export document.
    ///
    /// On failure the collection is untouched and the outcome carries the
    /// reason.
    pub fn import_from(&mut self, json: &str) -> ImportOutcome {
        match self.try_import(json) {
            Ok(imported) => {
                info!(count = imported.len(), mode = ?self.options.import_mode, "imported grids");
                ImportOutcome::imported(imported)
            }
            Err(err) => {
                warn!(%err, "grid import rejected");
                ImportOutcome::failed(err.to_string())
            }
        }
    }

    /// Read a document from disk and import it.
    pub fn import_file(&mut self, path: impl AsRef<Path>) -> ImportOutcome {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => self.import_from(&json),
            Err(err) => {
                warn!(path = %path.display(), %err, "could not read import file");
                ImportOutcome::failed(format!("Could not read {}: {}", path.display(), err))
            }
        }
    }

    /// Remove every grid and the persisted document.
    pub fn clear(&mut self) -> Result<()> {
        self.backend.clear()?;
        self.grids.clear();
        info!("cleared grid store");
        Ok(())
    }

    fn try_import(&mut self, json: &str) -> Result<Vec<SavedGrid>> {
        let document = GridDocument::parse(json)?;
        let imported = document.grids;

        let next = match self.options.import_mode {
            ImportMode::Replace => imported.clone(),
            ImportMode::Merge => {
                let mut merged = self.grids.clone();
                for grid in &imported {
                    match merged.iter_mut().find(|g| g.id == grid.id) {
                        Some(existing) => *existing = grid.clone(),
                        None => merged.push(grid.clone()),
                    }
                }
                merged
            }
        };

        self.commit(next)?;
        if let Some(latest) = imported.iter().flat_map(|g| [g.created_at, g.updated_at]).max() {
            self.last_issued = self.last_issued.max(Some(latest));
        }
        Ok(imported)
    }

    fn position(&self, id: &GridId) -> Option<usize> {
        self.grids.iter().position(|g| &g.id == id)
    }

    fn commit(&mut self, next: Vec<SavedGrid>) -> Result<()> {
        let json = write_document(&next, Utc::now(), false)?;
        self.backend.write(&json)?;
        self.grids = next;
        Ok(())
    }

    /// Current time, strictly after anything this store has issued or loaded.
    fn next_timestamp(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let next = match self.last_issued {
            Some(last) if now <= last => last + Duration::milliseconds(1),
            _ => now,
        };
        self.last_issued = Some(next);
        next
    }
}

fn new_id() -> GridId {
    GridId(Uuid::new_v4().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{JsonFileBackend, MemoryBackend};
    use crate::error::StoreError;
    use gridline_core::{AxisGridConfig, BaselineGridConfig, GridConfig};
    use tempfile::TempDir;

    /// Backend whose writes can be made to fail.
    #[derive(Default)]
    struct FlakyBackend {
        inner: MemoryBackend,
        fail_writes: bool,
    }

    impl StorageBackend for FlakyBackend {
        fn read(&self) -> Result<Option<String>> {
            self.inner.read()
        }

        fn write(&mut self, contents: &str) -> Result<()> {
            if self.fail_writes {
                return Err(StoreError::Backend("disk full".into()));
            }
            self.inner.write(contents)
        }

        fn clear(&mut self) -> Result<()> {
            self.inner.clear()
        }
    }

    fn memory_store() -> GridStore<MemoryBackend> {
        GridStore::open(MemoryBackend::new(), StoreOptions::default())
    }

    fn columns(count: u32) -> GridConfig {
        GridConfig::new().with_columns(AxisGridConfig::percent(count, 5.0, 2.0))
    }

    fn seeded() -> GridStore<MemoryBackend> {
        let mut store = memory_store();
        store
            .create(
                GridDraft::new("Editorial", columns(12))
                    .with_description("Long-form magazine layout")
                    .with_tags(["print", "magazine"]),
            )
            .unwrap();
        store
            .create(GridDraft::new("Mobile", columns(4)).with_tags(["web"]))
            .unwrap();
        store
            .create(
                GridDraft::new(
                    "Type scale",
                    GridConfig::new().with_baseline(BaselineGridConfig::new(8.0, 0.0)),
                )
                .with_tags(["Print"]),
            )
            .unwrap();
        store
    }

    #[test]
    fn test_create_assigns_identity() {
        let mut store = memory_store();
        let grid = store.create(GridDraft::new("A", columns(3))).unwrap();

        assert!(Uuid::parse_str(grid.id.as_str()).is_ok());
        assert_eq!(grid.created_at, grid.updated_at);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&grid.id), Some(&grid));
        assert_eq!(store.backend().write_count(), 1);
    }

    #[test]
    fn test_reopen_reads_persisted_grids() {
        let store = seeded();
        let backend = store.backend().clone();
        let reopened = GridStore::open(backend, StoreOptions::default());
        assert_eq!(reopened.grids(), store.grids());
    }

    #[test]
    fn test_open_with_garbage_starts_empty() {
        let store = GridStore::open(MemoryBackend::with_contents("{oops"), StoreOptions::default());
        assert!(store.is_empty());

        let store = GridStore::open(
            MemoryBackend::with_contents(r#"{"version": 9, "grids": []}"#),
            StoreOptions::default(),
        );
        assert!(store.is_empty());
    }

    #[test]
    fn test_update_bumps_updated_at() {
        let mut store = seeded();
        let id = store.grids()[1].id.clone();
        let before = store.grids()[1].clone();

        let grids = store
            .update(
                &id,
                GridPatch {
                    name: Some("Mobile 6".into()),
                    config: Some(columns(6)),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(grids[1].name, "Mobile 6");
        assert_eq!(grids[1].created_at, before.created_at);
        assert!(grids[1].updated_at > before.updated_at);
        assert_eq!(grids[1].config.columns.as_ref().unwrap().count, 6);
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut store = seeded();
        let before = store.grids().to_vec();
        let writes = store.backend().write_count();

        let patch = GridPatch {
            name: Some("Ghost".into()),
            ..Default::default()
        };
        let grids = store.update(&GridId::from("missing"), patch).unwrap();

        assert_eq!(grids, before.as_slice());
        assert_eq!(store.backend().write_count(), writes);
    }

    #[test]
    fn test_double_delete_is_idempotent() {
        let mut store = seeded();
        let id = store.grids()[0].id.clone();

        let after_first = store.delete(&id).unwrap().to_vec();
        assert_eq!(after_first.len(), 2);
        assert!(store.get(&id).is_none());

        let after_second = store.delete(&id).unwrap();
        assert_eq!(after_second, after_first.as_slice());
    }

    #[test]
    fn test_duplicate_inserts_after_source() {
        let mut store = seeded();
        let source = store.grids()[0].clone();

        let copy = store.duplicate(&source.id).unwrap().unwrap();

        assert_ne!(copy.id, source.id);
        assert_ne!(copy.created_at, source.created_at);
        assert!(copy.created_at > source.created_at);
        assert_eq!(copy.config, source.config);
        assert_eq!(copy.tags, source.tags);
        assert_eq!(copy.name, "Editorial (Copy)");
        assert_eq!(store.len(), 4);
        assert_eq!(store.grids()[1].id, copy.id);
    }

    #[test]
    fn test_duplicate_unknown_id() {
        let mut store = seeded();
        assert_eq!(store.duplicate(&GridId::from("missing")).unwrap(), None);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_duplicate_uses_configured_suffix() {
        let mut store = GridStore::open(
            MemoryBackend::new(),
            StoreOptions::default().with_copy_suffix(" copy"),
        );
        let grid = store.create(GridDraft::new("Base", columns(2))).unwrap();
        let copy = store.duplicate(&grid.id).unwrap().unwrap();
        assert_eq!(copy.name, "Base copy");
    }

    #[test]
    fn test_search_keeps_insertion_order() {
        let store = seeded();

        let names: Vec<_> = store.search("PRINT").iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, ["Editorial", "Type scale"]);

        let names: Vec<_> = store.search("magazine").iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, ["Editorial"]);

        assert_eq!(store.search("  ").len(), 3);
        assert!(store.search("nothing here").is_empty());
    }

    #[test]
    fn test_all_tags_first_seen_order() {
        let store = seeded();
        let tags: Vec<_> = store.all_tags().into_iter().collect();
        assert_eq!(tags, ["print", "magazine", "web", "Print"]);
    }

    #[test]
    fn test_export_import_round_trip() {
        let store = seeded();
        let json = store.export_json().unwrap();

        let mut other = memory_store();
        other.create(GridDraft::new("Will be replaced", columns(1))).unwrap();
        let outcome = other.import_from(&json);

        assert!(outcome.success);
        assert_eq!(outcome.count, 3);
        assert_eq!(outcome.error, None);
        assert_eq!(other.grids(), store.grids());
        assert_eq!(outcome.grids.as_deref(), Some(store.grids()));
    }

    #[test]
    fn test_round_trip_keeps_every_float_bit() {
        let mut store = memory_store();
        let mut margins = vec![40.0 * 1600.0 / 1440.0, 26.712166879246958, 0.1 + 0.2];
        let mut state: u64 = 0x2545_f491_4f6c_dd1d;
        for _ in 0..200 {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            margins.push((state >> 11) as f64 / (1u64 << 53) as f64 * 120.0);
        }
        for (i, margin) in margins.iter().enumerate() {
            let config = GridConfig::new()
                .with_columns(AxisGridConfig::absolute(6, *margin, margin / 3.0))
                .with_baseline(BaselineGridConfig::new(margin / 7.0 + 1.0, margin / 11.0));
            store.create(GridDraft::new(format!("g{i}"), config)).unwrap();
        }

        let mut other = memory_store();
        let outcome = other.import_from(&store.export_json().unwrap());
        assert!(outcome.success);
        assert_eq!(other.grids(), store.grids());

        let reopened = GridStore::open(store.backend().clone(), StoreOptions::default());
        assert_eq!(reopened.grids(), store.grids());
    }

    #[test]
    fn test_export_all_document() {
        let store = seeded();
        let document = store.export_all();
        assert_eq!(document.version, crate::FORMAT_VERSION);
        assert!(document.exported_at.is_some());
        assert_eq!(document.grids, store.grids());
    }

    #[test]
    fn test_import_rejects_bad_version() {
        let mut store = seeded();
        let before = store.grids().to_vec();

        let outcome = store.import_from(r#"{"version": 2, "grids": []}"#);

        assert!(!outcome.success);
        assert_eq!(outcome.count, 0);
        assert!(outcome.grids.is_none());
        assert_eq!(
            outcome.error.as_deref(),
            Some("Invalid grid document: unsupported version 2")
        );
        assert_eq!(store.grids(), before.as_slice());
    }

    #[test]
    fn test_import_merge_mode() {
        let source = seeded();
        let mut edited = source.export_all();
        edited.grids.truncate(1);
        edited.grids[0].name = "Editorial (imported)".into();
        let json = edited.to_json(false).unwrap();

        let mut store = GridStore::open(
            source.backend().clone(),
            StoreOptions::default().with_import_mode(ImportMode::Merge),
        );
        let extra = store.create(GridDraft::new("Local only", columns(2))).unwrap();
        let outcome = store.import_from(&json);

        assert!(outcome.success);
        assert_eq!(outcome.count, 1);
        assert_eq!(store.len(), 4);
        assert_eq!(store.grids()[0].name, "Editorial (imported)");
        assert_eq!(store.grids()[3].id, extra.id);
    }

    #[test]
    fn test_failed_write_leaves_state_unchanged() {
        let mut store = GridStore::open(FlakyBackend::default(), StoreOptions::default());
        let grid = store.create(GridDraft::new("Keep", columns(2))).unwrap();

        store.backend.fail_writes = true;
        assert!(matches!(
            store.create(GridDraft::new("Lost", columns(2))),
            Err(StoreError::Backend(_))
        ));
        assert!(store.delete(&grid.id).is_err());
        assert!(store.duplicate(&grid.id).is_err());

        let json = seeded().export_json().unwrap();
        let outcome = store.import_from(&json);
        assert!(!outcome.success);
        assert_eq!(
            outcome.error.as_deref(),
            Some("Storage backend error: disk full")
        );

        assert_eq!(store.grids(), [grid]);
    }

    #[test]
    fn test_clear() {
        let mut store = seeded();
        store.clear().unwrap();
        assert!(store.is_empty());
        assert_eq!(store.backend().contents(), None);
    }

    #[test]
    fn test_file_backend_store() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("grids.json");

        let mut store = GridStore::open(JsonFileBackend::new(&path), StoreOptions::default());
        let grid = store.create(GridDraft::new("On disk", columns(5))).unwrap();

        let reopened = GridStore::open(JsonFileBackend::new(&path), StoreOptions::default());
        assert_eq!(reopened.grids(), [grid]);
    }

    #[test]
    fn test_import_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("export.json");
        std::fs::write(&path, seeded().export_json().unwrap()).unwrap();

        let mut store = memory_store();
        let outcome = store.import_file(&path);
        assert!(outcome.success);
        assert_eq!(store.len(), 3);

        let outcome = store.import_file(dir.path().join("missing.json"));
        assert!(!outcome.success);
        assert!(outcome.error.unwrap().starts_with("Could not read"));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_timestamps_strictly_increase() {
        let mut store = memory_store();
        let mut last = None;
        for i in 0..20 {
            let grid = store.create(GridDraft::new(format!("g{i}"), columns(1))).unwrap();
            if let Some(previous) = last {
                assert!(grid.created_at > previous);
            }
            last = Some(grid.created_at);
        }
    }
}
