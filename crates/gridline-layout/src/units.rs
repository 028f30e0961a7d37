//! Unit resolution: percent or absolute values to pixels.
//!
//! Resolution is a pure conversion. Absolute values are never rescaled here;
//! callers that preview at a different scale run the value through
//! [`scale`](crate::scale()) first.

use gridline_core::{Dimension, GridError, Unit};

/// Resolve a value in `unit` against an axis of `axis_length` pixels.
pub fn resolve(value: f64, unit: Unit, axis_length: f64) -> f64 {
    match unit {
        Unit::Percent => value / 100.0 * axis_length,
        Unit::Absolute => value,
    }
}

/// Resolve a [`Dimension`] against an axis.
pub fn resolve_dimension(dimension: Dimension, axis_length: f64) -> f64 {
    resolve(dimension.value, dimension.unit, axis_length)
}

/// Resolve a value tagged with a textual unit ("percent", "absolute", "%", "px").
pub fn resolve_tag(value: f64, tag: &str, axis_length: f64) -> Result<f64, GridError> {
    let unit: Unit = tag.parse()?;
    Ok(resolve(value, unit, axis_length))
}
