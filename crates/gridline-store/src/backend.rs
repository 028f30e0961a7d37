//! Persistence backends for the grid store.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Where the store keeps its serialized document.
///
/// The store is the only writer. Implementations store one opaque string.
pub trait StorageBackend {
    /// Read the stored document, or `None` if nothing has been written yet.
    fn read(&self) -> Result<Option<String>>;

    /// Replace the stored document.
    fn write(&mut self, contents: &str) -> Result<()>;

    /// Remove the stored document.
    fn clear(&mut self) -> Result<()>;
}

/// In-memory backend for tests and short-lived sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    contents: Option<String>,
    writes: usize,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend pre-loaded with a document.
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: Some(contents.into()),
            writes: 0,
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }

    /// Number of successful writes.
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self) -> Result<Option<String>> {
        Ok(self.contents.clone())
    }

    fn write(&mut self, contents: &str) -> Result<()> {
        self.contents = Some(contents.to_string());
        self.writes += 1;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.contents = None;
        Ok(())
    }
}

/// JSON file on disk, written atomically (temp file + rename).
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backend at the platform default location.
    ///
    /// - Linux: `~/.local/share/gridline/saved-grids.json`
    /// - macOS: `~/Library/Application Support/gridline/saved-grids.json`
    /// - Windows: `%APPDATA%\gridline\saved-grids.json`
    pub fn at_default_path() -> Option<Self> {
        Self::default_path().map(Self::new)
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("gridline").join("saved-grids.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "saved-grids.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl StorageBackend for JsonFileBackend {
    fn read(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&self.path)?))
    }

    fn write(&mut self, contents: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let temp = self.temp_path();
        fs::write(&temp, contents)?;
        fs::rename(&temp, &self.path)?;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
