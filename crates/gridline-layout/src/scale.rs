//! Adapting a grid authored for one rectangle onto another.
//!
//! Percent values are resolution independent and never change. With
//! `preserve_proportions`, absolute values follow the frame: width-axis
//! quantities scale by `target_w / ref_w`, height-axis quantities (rows and
//! baseline) by `target_h / ref_h`. Counts are structural and never change.

use gridline_core::{AxisGridConfig, BaselineGridConfig, GridConfig, GridError, Unit};
use tracing::warn;

/// Scale `config` from a `ref_w` x `ref_h` reference onto a `target_w` x `target_h` frame.
///
/// Without `preserve_proportions` the result is an unchanged copy ("same
/// recipe"); with it, the result is visually equivalent on the target.
///
/// # Errors
///
/// Returns [`GridError::InvalidReferenceSize`] unless both reference
/// dimensions are positive and finite.
pub fn scale(
    config: &GridConfig,
    ref_w: f64,
    ref_h: f64,
    target_w: f64,
    target_h: f64,
    preserve_proportions: bool,
) -> Result<GridConfig, GridError> {
    let valid = |v: f64| v.is_finite() && v > 0.0;
    if !valid(ref_w) || !valid(ref_h) {
        return Err(GridError::InvalidReferenceSize {
            width: ref_w,
            height: ref_h,
        });
    }

    if !preserve_proportions {
        return Ok(config.clone());
    }

    let x_ratio = target_w / ref_w;
    let y_ratio = target_h / ref_h;

    Ok(GridConfig {
        columns: config.columns.as_ref().map(|c| scale_axis(c, x_ratio)),
        rows: config.rows.as_ref().map(|r| scale_axis(r, y_ratio)),
        baseline: config.baseline.as_ref().map(|b| scale_baseline(b, y_ratio)),
    })
}

/// Like [`scale`], but falls back to the unscaled configuration when the
/// reference size is unusable.
pub fn scale_or_original(
    config: &GridConfig,
    ref_w: f64,
    ref_h: f64,
    target_w: f64,
    target_h: f64,
    preserve_proportions: bool,
) -> GridConfig {
    match scale(config, ref_w, ref_h, target_w, target_h, preserve_proportions) {
        Ok(scaled) => scaled,
        Err(err) => {
            warn!(%err, "using unscaled grid");
            config.clone()
        }
    }
}

fn scale_axis(config: &AxisGridConfig, ratio: f64) -> AxisGridConfig {
    AxisGridConfig {
        margin: scale_value(config.margin, config.margin_unit, ratio),
        gutter_size: scale_value(config.gutter_size, config.gutter_unit, ratio),
        ..config.clone()
    }
}

fn scale_baseline(config: &BaselineGridConfig, ratio: f64) -> BaselineGridConfig {
    BaselineGridConfig {
        height: config.height * ratio,
        offset: config.offset * ratio,
        ..config.clone()
    }
}

fn scale_value(value: f64, unit: Unit, ratio: f64) -> f64 {
    match unit {
        Unit::Percent => value,
        Unit::Absolute => value * ratio,
    }
}
