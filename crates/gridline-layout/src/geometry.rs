//! Full grid geometry for a frame, and scaled previews.

use gridline_core::{GridConfig, GridPreset, DEFAULT_REFERENCE_HEIGHT, DEFAULT_REFERENCE_WIDTH};

use crate::baseline::{baseline_lines, BaselineLine};
use crate::bounds::Bounds;
use crate::scale::scale_or_original;
use crate::tracks::{solve_columns, solve_rows};

/// Pixel geometry of every part of a grid on one frame.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridGeometry {
    pub width: f64,
    pub height: f64,
    pub columns: Vec<Bounds>,
    pub rows: Vec<Bounds>,
    pub baseline: Vec<BaselineLine>,
}

impl GridGeometry {
    /// Run every solver the configuration asks for over a `width` x `height` frame.
    pub fn compute(config: &GridConfig, width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            columns: config
                .columns
                .as_ref()
                .map(|c| solve_columns(c, width, height))
                .unwrap_or_default(),
            rows: config
                .rows
                .as_ref()
                .map(|r| solve_rows(r, height, width))
                .unwrap_or_default(),
            baseline: config
                .baseline
                .as_ref()
                .map(|b| baseline_lines(b, height).collect())
                .unwrap_or_default(),
        }
    }

    pub fn frame(&self) -> Bounds {
        Bounds::from_size(self.width, self.height)
    }

    /// Column and row bands clipped to the frame, for drawing.
    pub fn clipped(&self) -> Self {
        let frame = self.frame();
        Self {
            width: self.width,
            height: self.height,
            columns: Bounds::clip_all(&self.columns, &frame),
            rows: Bounds::clip_all(&self.rows, &frame),
            baseline: self.baseline.clone(),
        }
    }

    /// Column/row cells where modular grids intersect.
    pub fn cells(&self) -> Vec<Bounds> {
        self.rows
            .iter()
            .flat_map(|row| self.columns.iter().filter_map(move |col| col.intersect(row)))
            .collect()
    }
}

/// How previews map a grid onto a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct PreviewOptions {
    /// Width the grid was authored against
    pub reference_width: f64,
    /// Height the grid was authored against
    pub reference_height: f64,
    /// Scale absolute values with the frame
    pub preserve_proportions: bool,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            reference_width: DEFAULT_REFERENCE_WIDTH,
            reference_height: DEFAULT_REFERENCE_HEIGHT,
            preserve_proportions: true,
        }
    }
}

impl PreviewOptions {
    /// Options for a grid authored against the given rectangle.
    pub fn with_reference(mut self, width: f64, height: f64) -> Self {
        self.reference_width = width;
        self.reference_height = height;
        self
    }

    /// Options for a catalog preset, authored against the rectangle its
    /// aspect ratio label implies.
    pub fn for_preset(preset: &GridPreset) -> Self {
        let (width, height) = preset.reference_size();
        Self::default().with_reference(width, height)
    }

    pub fn with_preserve_proportions(mut self, preserve: bool) -> Self {
        self.preserve_proportions = preserve;
        self
    }
}

/// Scale `config` from the reference in `options` onto the target and solve it.
pub fn preview_geometry(
    config: &GridConfig,
    options: &PreviewOptions,
    target_width: f64,
    target_height: f64,
) -> GridGeometry {
    let scaled = scale_or_original(
        config,
        options.reference_width,
        options.reference_height,
        target_width,
        target_height,
        options.preserve_proportions,
    );
    GridGeometry::compute(&scaled, target_width, target_height)
}
