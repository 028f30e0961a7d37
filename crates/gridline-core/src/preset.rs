//! Built-in grid presets and aspect ratio labels.
//!
//! Presets come from a static, read-only catalog. The catalog contents live
//! outside this crate; only the lookup interface is defined here.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexSet;

use crate::types::GridConfig;

/// Width of the reference rectangle presets are authored against.
pub const DEFAULT_REFERENCE_WIDTH: f64 = 800.0;
/// Height used when a preset carries no usable aspect ratio.
pub const DEFAULT_REFERENCE_HEIGHT: f64 = 600.0;

/// A read-only grid shipped with the catalog.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct GridPreset {
    pub id: String,
    pub name: String,
    pub description: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: IndexSet<String>,
    pub category: String,
    pub config: GridConfig,
    /// Label such as "16:9" or "√2"
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub aspect_ratio: Option<String>,
}

impl GridPreset {
    /// Parsed aspect ratio, if the label is recognized.
    pub fn ratio(&self) -> Option<AspectRatio> {
        self.aspect_ratio.as_deref().and_then(|label| label.parse().ok())
    }

    /// Rectangle used to preview or create a frame for this preset.
    pub fn reference_size(&self) -> (f64, f64) {
        reference_size(self.aspect_ratio.as_deref())
    }
}

/// Reference rectangle for an optional aspect ratio label.
pub fn reference_size(aspect_ratio: Option<&str>) -> (f64, f64) {
    let height = aspect_ratio
        .and_then(|label| label.parse::<AspectRatio>().ok())
        .map(|ratio| ratio.reference_height(DEFAULT_REFERENCE_WIDTH))
        .unwrap_or(DEFAULT_REFERENCE_HEIGHT);
    (DEFAULT_REFERENCE_WIDTH, height)
}

/// A width:height proportion parsed from a preset label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectRatio {
    pub width: f64,
    pub height: f64,
}

impl AspectRatio {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// ISO 216 paper proportion, portrait.
    pub fn iso_paper() -> Self {
        Self::new(1.0, std::f64::consts::SQRT_2)
    }

    /// Height of a rectangle of the given width in this proportion.
    pub fn reference_height(&self, width: f64) -> f64 {
        width * self.height / self.width
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::iso_paper() {
            f.write_str("√2")
        } else {
            write!(f, "{}:{}", self.width, self.height)
        }
    }
}

/// Unrecognized aspect ratio label.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unrecognized aspect ratio: {0:?}")]
pub struct AspectRatioError(pub String);

impl FromStr for AspectRatio {
    type Err = AspectRatioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        if matches!(label, "√2" | "sqrt2" | "1:√2") {
            return Ok(Self::iso_paper());
        }

        let err = || AspectRatioError(s.to_string());
        let (w, h) = label.split_once(':').ok_or_else(err)?;
        let width: f64 = w.trim().parse().map_err(|_| err())?;
        let height: f64 = h.trim().parse().map_err(|_| err())?;

        let positive = |v: f64| v.is_finite() && v > 0.0;
        if positive(width) && positive(height) {
            Ok(Self::new(width, height))
        } else {
            Err(err())
        }
    }
}

/// Read-only source of presets.
pub trait PresetCatalog {
    /// All presets in catalog order.
    fn presets(&self) -> &[GridPreset];

    fn get(&self, id: &str) -> Option<&GridPreset> {
        self.presets().iter().find(|p| p.id == id)
    }

    fn by_category<'a>(&'a self, category: &'a str) -> Box<dyn Iterator<Item = &'a GridPreset> + 'a> {
        Box::new(self.presets().iter().filter(move |p| p.category == category))
    }

    /// Distinct categories in first-seen order.
    fn categories(&self) -> IndexSet<&str> {
        self.presets().iter().map(|p| p.category.as_str()).collect()
    }
}

/// A catalog backed by an in-memory list.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    presets: Vec<GridPreset>,
}

impl StaticCatalog {
    pub fn new(presets: Vec<GridPreset>) -> Self {
        Self { presets }
    }
}

impl PresetCatalog for StaticCatalog {
    fn presets(&self) -> &[GridPreset] {
        &self.presets
    }
}
