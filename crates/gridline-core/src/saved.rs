//! User-owned saved grid records.

use std::fmt;

use chrono::{DateTime, Utc};
use indexmap::IndexSet;

use crate::preset::GridPreset;
use crate::types::GridConfig;

/// Opaque identifier of a saved grid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct GridId(pub String);

impl GridId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GridId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GridId {
    fn from(s: &str) -> Self {
        GridId(s.to_string())
    }
}

impl From<String> for GridId {
    fn from(s: String) -> Self {
        GridId(s)
    }
}

/// A grid saved by the user.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SavedGrid {
    pub id: GridId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub category: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: IndexSet<String>,
    pub config: GridConfig,
    /// Where the grid came from (preset id, "detected", ...)
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub source: Option<String>,
    /// Metadata from an analysis step; carried verbatim.
    #[cfg_attr(
        feature = "serde",
        serde(default, deserialize_with = "keep_null", skip_serializing_if = "Option::is_none")
    )]
    pub detected_data: Option<serde_json::Value>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub aspect_ratio: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SavedGrid {
    /// Build a record from a draft with assigned identity and timestamps.
    pub fn from_draft(draft: GridDraft, id: GridId, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            category: draft.category,
            tags: draft.tags,
            config: draft.config,
            source: draft.source,
            detected_data: draft.detected_data,
            aspect_ratio: draft.aspect_ratio,
            created_at: now,
            updated_at: now,
        }
    }

    /// Case-insensitive substring match over name, description and tags.
    ///
    /// A blank query matches everything.
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
            || self.tags.iter().any(|tag| tag.to_lowercase().contains(&needle))
    }
}

/// User-supplied fields of a grid about to be saved.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct GridDraft {
    pub name: String,
    pub description: String,
    pub category: String,
    pub tags: IndexSet<String>,
    pub config: GridConfig,
    pub source: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(default, deserialize_with = "keep_null", skip_serializing_if = "Option::is_none")
    )]
    pub detected_data: Option<serde_json::Value>,
    pub aspect_ratio: Option<String>,
}

impl GridDraft {
    pub fn new(name: impl Into<String>, config: GridConfig) -> Self {
        Self {
            name: name.into(),
            config,
            ..Default::default()
        }
    }

    /// Seed a draft from a catalog preset, recording it as the source.
    pub fn from_preset(preset: &GridPreset) -> Self {
        Self {
            name: preset.name.clone(),
            description: preset.description.clone(),
            category: preset.category.clone(),
            tags: preset.tags.clone(),
            config: preset.config.clone(),
            source: Some(format!("preset:{}", preset.id)),
            detected_data: None,
            aspect_ratio: preset.aspect_ratio.clone(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// Partial update for a saved grid. `None` leaves a field untouched.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct GridPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub tags: Option<IndexSet<String>>,
    pub config: Option<GridConfig>,
    pub source: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(default, deserialize_with = "keep_null", skip_serializing_if = "Option::is_none")
    )]
    pub detected_data: Option<serde_json::Value>,
    pub aspect_ratio: Option<String>,
}

impl GridPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge the present fields into `grid`. Timestamps are left to the caller.
    pub fn apply_to(self, grid: &mut SavedGrid) {
        if let Some(name) = self.name {
            grid.name = name;
        }
        if let Some(description) = self.description {
            grid.description = description;
        }
        if let Some(category) = self.category {
            grid.category = category;
        }
        if let Some(tags) = self.tags {
            grid.tags = tags;
        }
        if let Some(config) = self.config {
            grid.config = config;
        }
        if self.source.is_some() {
            grid.source = self.source;
        }
        if self.detected_data.is_some() {
            grid.detected_data = self.detected_data;
        }
        if self.aspect_ratio.is_some() {
            grid.aspect_ratio = self.aspect_ratio;
        }
    }
}

/// A present `detectedData` is kept even when it is `null`; only an absent
/// key means no metadata.
#[cfg(feature = "serde")]
fn keep_null<'de, D>(deserializer: D) -> Result<Option<serde_json::Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    serde::Deserialize::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AxisGridConfig, BaselineGridConfig};
    use chrono::TimeZone;

    fn sample() -> SavedGrid {
        let draft = GridDraft::new(
            "Editorial 12",
            GridConfig::new().with_columns(AxisGridConfig::percent(12, 5.0, 2.0)),
        )
        .with_description("Twelve columns for long-form layouts")
        .with_category("web")
        .with_tags(["Magazine", "responsive"]);
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        SavedGrid::from_draft(draft, GridId::from("g-1"), now)
    }

    #[test]
    fn test_from_draft_sets_both_timestamps() {
        let grid = sample();
        assert_eq!(grid.created_at, grid.updated_at);
        assert_eq!(grid.id.as_str(), "g-1");
        assert_eq!(grid.tags.len(), 2);
    }

    #[test]
    fn test_matches_is_case_insensitive() {
        let grid = sample();
        assert!(grid.matches("editorial"));
        assert!(grid.matches("LONG-FORM"));
        assert!(grid.matches("magaz"));
        assert!(grid.matches("   "));
        assert!(!grid.matches("print"));
    }

    #[test]
    fn test_patch_merges_present_fields() {
        let mut grid = sample();
        let patch = GridPatch {
            name: Some("Editorial 8".into()),
            config: Some(GridConfig::new().with_baseline(BaselineGridConfig::new(8.0, 0.0))),
            ..Default::default()
        };
        assert!(!patch.is_empty());
        patch.apply_to(&mut grid);

        assert_eq!(grid.name, "Editorial 8");
        assert_eq!(grid.category, "web");
        assert!(grid.config.columns.is_none());
        assert!(grid.config.baseline.is_some());
        assert!(GridPatch::default().is_empty());
    }

    #[test]
    fn test_draft_from_preset() {
        let preset = GridPreset {
            id: "golden".into(),
            name: "Golden".into(),
            description: "Golden ratio columns".into(),
            tags: ["classic".to_string()].into_iter().collect(),
            category: "print".into(),
            config: GridConfig::new().with_columns(AxisGridConfig::percent(3, 6.0, 3.0)),
            aspect_ratio: Some("√2".into()),
        };
        let draft = GridDraft::from_preset(&preset);
        assert_eq!(draft.source.as_deref(), Some("preset:golden"));
        assert_eq!(draft.config, preset.config);
        assert_eq!(draft.aspect_ratio.as_deref(), Some("√2"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_saved_grid_wire_format() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["id"], "g-1");
        assert_eq!(value["createdAt"], "2024-03-01T12:00:00Z");
        assert!(value.get("detectedData").is_none());
        assert_eq!(value["tags"][0], "Magazine");

        let back: SavedGrid = serde_json::from_value(value).unwrap();
        assert_eq!(back, sample());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_null_detected_data_survives_round_trip() {
        let mut grid = sample();
        grid.detected_data = Some(serde_json::Value::Null);
        let json = serde_json::to_string(&grid).unwrap();
        assert!(json.contains(r#""detectedData":null"#));
        let back: SavedGrid = serde_json::from_str(&json).unwrap();
        assert_eq!(back.detected_data, Some(serde_json::Value::Null));

        let absent: SavedGrid = serde_json::from_str(&serde_json::to_string(&sample()).unwrap()).unwrap();
        assert_eq!(absent.detected_data, None);

        let draft: GridDraft = serde_json::from_str(r#"{"name": "A", "detectedData": null}"#).unwrap();
        assert_eq!(draft.detected_data, Some(serde_json::Value::Null));
        let patch: GridPatch = serde_json::from_str(r#"{"detectedData": null}"#).unwrap();
        assert!(!patch.is_empty());
        let untouched: GridPatch = serde_json::from_str(r#"{"name": "B"}"#).unwrap();
        assert_eq!(untouched.detected_data, None);
    }
}
