//! Grid geometry for gridline.
//!
//! This crate turns grid configurations into pixel geometry and adapts them
//! between frame sizes.
//!
//! # Architecture
//!
//! 1. **Units**: percent/absolute values resolved against an axis
//! 2. **Tracks**: column and row bands with a 1px floor
//! 3. **Baseline**: lazy sequence of guide lines with accent flags
//! 4. **Scaling**: reference rectangle to target rectangle
//!
//! # Example
//!
//! ```
//! use gridline_core::{AxisGridConfig, GridConfig};
//! use gridline_layout::GridGeometry;
//!
//! let config = GridConfig::new().with_columns(AxisGridConfig::percent(4, 8.0, 4.0));
//! let geometry = GridGeometry::compute(&config, 800.0, 600.0);
//!
//! assert_eq!(geometry.columns.len(), 4);
//! assert!((geometry.columns[1].x - 240.0).abs() < 1e-9);
//! ```

mod baseline;
mod bounds;
mod geometry;
mod scale;
mod tracks;
mod units;

pub use baseline::{baseline_lines, BaselineLine, BaselineLines, ACCENT_INTERVAL};
pub use bounds::Bounds;
pub use geometry::{preview_geometry, GridGeometry, PreviewOptions};
pub use scale::{scale, scale_or_original};
pub use tracks::{solve_columns, solve_rows, AxisMetrics, MIN_BAND_SIZE};
pub use units::{resolve, resolve_dimension, resolve_tag};
