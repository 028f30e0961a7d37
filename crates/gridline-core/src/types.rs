//! Core value types for grid configurations.

use std::fmt;
use std::str::FromStr;

use crate::errors::GridError;

/// An overlay color. RGB channels are 0-255, alpha is 0.0-1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl GridColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create from hex string (e.g., "#FF5733" or "FF5733CC").
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            6 => Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Self::rgba(
                channel(0)?,
                channel(2)?,
                channel(4)?,
                channel(6)? as f32 / 255.0,
            )),
            _ => None,
        }
    }

    /// Alpha must lie in 0.0-1.0. NaN is rejected.
    pub fn validate(&self) -> Result<(), GridError> {
        if (0.0..=1.0).contains(&self.a) {
            Ok(())
        } else {
            Err(GridError::invalid(format!(
                "color alpha must be between 0 and 1, got {}",
                self.a
            )))
        }
    }

    /// CSS `rgba()` notation.
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }

    pub const RED_OVERLAY: Self = Self::rgba(255, 0, 0, 0.1);
    pub const BASELINE_CYAN: Self = Self::rgba(0, 180, 216, 0.3);
}

impl Default for GridColor {
    fn default() -> Self {
        Self::RED_OVERLAY
    }
}

/// Unit of a margin or gutter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Unit {
    /// Percentage of the governing axis length
    #[default]
    #[cfg_attr(feature = "serde", serde(alias = "%"))]
    Percent,
    /// Raw pixels
    #[cfg_attr(feature = "serde", serde(alias = "px"))]
    Absolute,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Percent => "percent",
            Unit::Absolute => "absolute",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "percent" | "%" => Ok(Unit::Percent),
            "absolute" | "px" => Ok(Unit::Absolute),
            _ => Err(GridError::InvalidUnit { tag: s.to_string() }),
        }
    }
}

/// A magnitude paired with its unit.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dimension {
    pub value: f64,
    pub unit: Unit,
}

impl Dimension {
    pub fn percent(value: f64) -> Self {
        Self { value, unit: Unit::Percent }
    }

    pub fn px(value: f64) -> Self {
        Self { value, unit: Unit::Absolute }
    }
}

/// Column or row system along one axis.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct AxisGridConfig {
    /// Number of bands (at least 1)
    pub count: u32,
    /// Space between the outer bands and the edges
    pub margin: f64,
    pub margin_unit: Unit,
    /// Space between adjacent bands
    pub gutter_size: f64,
    pub gutter_unit: Unit,
    #[cfg_attr(feature = "serde", serde(default))]
    pub color: GridColor,
}

/// Vertical bands laid out along the width.
pub type ColumnGridConfig = AxisGridConfig;

/// Horizontal bands laid out along the height.
pub type RowGridConfig = AxisGridConfig;

impl AxisGridConfig {
    /// Create a system with explicit margin and gutter dimensions.
    pub fn new(count: u32, margin: Dimension, gutter: Dimension) -> Self {
        Self {
            count,
            margin: margin.value,
            margin_unit: margin.unit,
            gutter_size: gutter.value,
            gutter_unit: gutter.unit,
            color: GridColor::default(),
        }
    }

    /// Margin and gutter both in percent of the axis.
    pub fn percent(count: u32, margin: f64, gutter: f64) -> Self {
        Self::new(count, Dimension::percent(margin), Dimension::percent(gutter))
    }

    /// Margin and gutter both in pixels.
    pub fn absolute(count: u32, margin: f64, gutter: f64) -> Self {
        Self::new(count, Dimension::px(margin), Dimension::px(gutter))
    }

    pub fn with_color(mut self, color: GridColor) -> Self {
        self.color = color;
        self
    }

    pub fn margin_dimension(&self) -> Dimension {
        Dimension { value: self.margin, unit: self.margin_unit }
    }

    pub fn gutter_dimension(&self) -> Dimension {
        Dimension { value: self.gutter_size, unit: self.gutter_unit }
    }

    /// Check count, margin and gutter invariants.
    pub fn validate(&self) -> Result<(), GridError> {
        if self.count == 0 {
            return Err(GridError::invalid("count must be at least 1"));
        }
        if !self.margin.is_finite() || self.margin < 0.0 {
            return Err(GridError::invalid(format!(
                "margin must be a non-negative number, got {}",
                self.margin
            )));
        }
        if !self.gutter_size.is_finite() || self.gutter_size < 0.0 {
            return Err(GridError::invalid(format!(
                "gutter must be a non-negative number, got {}",
                self.gutter_size
            )));
        }
        self.color.validate()
    }
}

/// Evenly spaced horizontal guide lines.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaselineGridConfig {
    /// Spacing between consecutive lines in pixels
    pub height: f64,
    /// Position of the first line in pixels
    #[cfg_attr(feature = "serde", serde(default))]
    pub offset: f64,
    #[cfg_attr(feature = "serde", serde(default = "baseline_color"))]
    pub color: GridColor,
}

#[cfg(feature = "serde")]
fn baseline_color() -> GridColor {
    GridColor::BASELINE_CYAN
}

impl BaselineGridConfig {
    pub fn new(height: f64, offset: f64) -> Self {
        Self {
            height,
            offset,
            color: GridColor::BASELINE_CYAN,
        }
    }

    pub fn with_color(mut self, color: GridColor) -> Self {
        self.color = color;
        self
    }

    pub fn validate(&self) -> Result<(), GridError> {
        if !self.height.is_finite() || self.height <= 0.0 {
            return Err(GridError::invalid(format!(
                "baseline height must be positive, got {}",
                self.height
            )));
        }
        if !self.offset.is_finite() {
            return Err(GridError::invalid("baseline offset must be finite"));
        }
        self.color.validate()
    }
}

/// A full grid: any combination of columns, rows and baseline.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridConfig {
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub columns: Option<ColumnGridConfig>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub rows: Option<RowGridConfig>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub baseline: Option<BaselineGridConfig>,
}

/// Shape of a grid, derived from which parts are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum GridKind {
    Empty,
    Columns,
    Rows,
    Baseline,
    /// Columns and rows
    Modular,
    /// Baseline together with columns and/or rows
    Combined,
}

impl GridConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_columns(mut self, columns: ColumnGridConfig) -> Self {
        self.columns = Some(columns);
        self
    }

    pub fn with_rows(mut self, rows: RowGridConfig) -> Self {
        self.rows = Some(rows);
        self
    }

    pub fn with_baseline(mut self, baseline: BaselineGridConfig) -> Self {
        self.baseline = Some(baseline);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_none() && self.rows.is_none() && self.baseline.is_none()
    }

    pub fn kind(&self) -> GridKind {
        match (
            self.columns.is_some(),
            self.rows.is_some(),
            self.baseline.is_some(),
        ) {
            (false, false, false) => GridKind::Empty,
            (true, false, false) => GridKind::Columns,
            (false, true, false) => GridKind::Rows,
            (false, false, true) => GridKind::Baseline,
            (true, true, false) => GridKind::Modular,
            (_, _, true) => GridKind::Combined,
        }
    }

    /// Validate every present part. An empty grid is valid.
    pub fn validate(&self) -> Result<(), GridError> {
        if let Some(columns) = &self.columns {
            columns
                .validate()
                .map_err(|e| GridError::invalid(format!("columns: {}", reason_of(e))))?;
        }
        if let Some(rows) = &self.rows {
            rows.validate()
                .map_err(|e| GridError::invalid(format!("rows: {}", reason_of(e))))?;
        }
        if let Some(baseline) = &self.baseline {
            baseline.validate()?;
        }
        Ok(())
    }
}

fn reason_of(err: GridError) -> String {
    match err {
        GridError::InvalidGrid { reason } => reason,
        other => other.to_string(),
    }
}
