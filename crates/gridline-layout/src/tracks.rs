//! Column and row band solvers.
//!
//! Both axes share one algorithm: resolve margin and gutter, split what is
//! left evenly between `count` bands, and lay the bands out from the leading
//! margin. Band size never drops below [`MIN_BAND_SIZE`], so an axis that is
//! too short for the requested count still yields `count` visible bands.
//! Bands are not clipped to the axis.

use gridline_core::AxisGridConfig;

use crate::bounds::Bounds;
use crate::units::resolve;

/// Smallest band size the solvers emit.
pub const MIN_BAND_SIZE: f64 = 1.0;

/// Resolved pixel metrics of one axis system.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct AxisMetrics {
    pub count: u32,
    /// Leading and trailing margin in pixels
    pub margin: f64,
    /// Space between bands in pixels
    pub gutter: f64,
    /// Size of each band along the axis
    pub band_size: f64,
}

impl AxisMetrics {
    /// Resolve a configuration against an axis of `axis_length` pixels.
    pub fn resolve(config: &AxisGridConfig, axis_length: f64) -> Self {
        let margin = resolve(config.margin, config.margin_unit, axis_length);
        let gutter = resolve(config.gutter_size, config.gutter_unit, axis_length);

        let band_size = if config.count == 0 {
            0.0
        } else {
            let available = axis_length - 2.0 * margin;
            let total_gutter = gutter * config.count.saturating_sub(1) as f64;
            ((available - total_gutter) / config.count as f64).max(MIN_BAND_SIZE)
        };

        Self {
            count: config.count,
            margin,
            gutter,
            band_size,
        }
    }

    /// Leading edge of each band.
    pub fn positions(&self) -> impl Iterator<Item = f64> + '_ {
        let step = self.band_size + self.gutter;
        (0..self.count).map(move |i| self.margin + i as f64 * step)
    }

    /// Extent from the first band's start to the last band's end.
    pub fn span(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        let n = self.count as f64;
        n * self.band_size + (n - 1.0) * self.gutter
    }
}

/// Vertical bands across an axis of `axis_length` (the frame width).
///
/// Each band covers `0..height` vertically.
pub fn solve_columns(config: &AxisGridConfig, axis_length: f64, height: f64) -> Vec<Bounds> {
    let metrics = AxisMetrics::resolve(config, axis_length);
    metrics
        .positions()
        .map(|x| Bounds::new(x, 0.0, metrics.band_size, height))
        .collect()
}

/// Horizontal bands down an axis of `axis_length` (the frame height).
///
/// Each band covers `0..width` horizontally. Uses the same 1px floor as
/// [`solve_columns`].
pub fn solve_rows(config: &AxisGridConfig, axis_length: f64, width: f64) -> Vec<Bounds> {
    let metrics = AxisMetrics::resolve(config, axis_length);
    metrics
        .positions()
        .map(|y| Bounds::new(0.0, y, width, metrics.band_size))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridline_core::{Dimension, Unit};
    use proptest::prelude::*;

    #[test]
    fn test_four_percent_columns() {
        let config = AxisGridConfig::percent(4, 8.0, 4.0);
        let metrics = AxisMetrics::resolve(&config, 800.0);
        assert!((metrics.margin - 64.0).abs() < 0.001);
        assert!((metrics.gutter - 32.0).abs() < 0.001);
        assert!((metrics.band_size - 144.0).abs() < 0.001);

        let bands = solve_columns(&config, 800.0, 600.0);
        assert_eq!(bands.len(), 4);
        let xs: Vec<f64> = bands.iter().map(|b| b.x).collect();
        for (x, expected) in xs.iter().zip([64.0, 240.0, 416.0, 592.0]) {
            assert!((x - expected).abs() < 0.001, "{x} != {expected}");
        }
        for band in &bands {
            assert!((band.width - 144.0).abs() < 0.001);
            assert_eq!(band.y, 0.0);
            assert_eq!(band.height, 600.0);
        }
        // Last band ends at the trailing margin
        assert!((bands[3].right() - 736.0).abs() < 0.001);
    }

    #[test]
    fn test_absolute_columns() {
        let config = AxisGridConfig::absolute(3, 20.0, 10.0);
        let bands = solve_columns(&config, 320.0, 100.0);
        // (320 - 40 - 20) / 3
        assert!((bands[0].width - 86.666).abs() < 0.01);
        assert!((bands[1].x - (20.0 + 86.666 + 10.0)).abs() < 0.01);
    }

    #[test]
    fn test_mixed_units() {
        let config = AxisGridConfig::new(2, Dimension::px(10.0), Dimension::percent(10.0));
        let metrics = AxisMetrics::resolve(&config, 200.0);
        assert_eq!(metrics.margin, 10.0);
        assert!((metrics.gutter - 20.0).abs() < 0.001);
        assert!((metrics.band_size - 80.0).abs() < 0.001);
        assert_eq!(config.margin_unit, Unit::Absolute);
    }

    #[test]
    fn test_single_column_has_no_gutter() {
        let config = AxisGridConfig::absolute(1, 10.0, 500.0);
        let bands = solve_columns(&config, 100.0, 50.0);
        assert_eq!(bands.len(), 1);
        assert!((bands[0].width - 80.0).abs() < 0.001);
    }

    #[test]
    fn test_degenerate_columns_clamp_to_one_pixel() {
        let config = AxisGridConfig::absolute(12, 40.0, 20.0);
        let bands = solve_columns(&config, 50.0, 100.0);
        assert_eq!(bands.len(), 12);
        for band in &bands {
            assert_eq!(band.width, MIN_BAND_SIZE);
        }
        // Not clipped: bands run past the axis
        assert!(bands[11].right() > 50.0);
    }

    #[test]
    fn test_zero_length_axis() {
        let config = AxisGridConfig::percent(6, 5.0, 2.0);
        let bands = solve_columns(&config, 0.0, 0.0);
        assert_eq!(bands.len(), 6);
        assert!(bands.iter().all(|b| b.width == MIN_BAND_SIZE));
        assert_eq!(bands[0].x, 0.0);
        assert_eq!(bands[1].x, 1.0);
    }

    #[test]
    fn test_zero_count_yields_nothing() {
        let config = AxisGridConfig::percent(0, 5.0, 2.0);
        assert!(solve_columns(&config, 800.0, 600.0).is_empty());
        assert!(solve_rows(&config, 600.0, 800.0).is_empty());
        assert_eq!(AxisMetrics::resolve(&config, 800.0).span(), 0.0);
    }

    #[test]
    fn test_rows_mirror_columns() {
        let config = AxisGridConfig::percent(3, 10.0, 5.0);
        let rows = solve_rows(&config, 600.0, 800.0);
        let columns = solve_columns(&config, 600.0, 800.0);
        assert_eq!(rows.len(), 3);
        for (row, column) in rows.iter().zip(&columns) {
            assert_eq!(row.y, column.x);
            assert_eq!(row.height, column.width);
            assert_eq!(row.x, 0.0);
            assert_eq!(row.width, 800.0);
        }
    }

    // Rows clamp negative heights exactly like columns do.
    #[test]
    fn test_degenerate_rows_clamp_to_one_pixel() {
        let config = AxisGridConfig::absolute(5, 30.0, 10.0);
        let rows = solve_rows(&config, 40.0, 200.0);
        assert_eq!(rows.len(), 5);
        assert!(rows.iter().all(|r| r.height == MIN_BAND_SIZE));
        assert!((rows[1].y - (30.0 + 1.0 + 10.0)).abs() < 0.001);
    }

    #[test]
    fn test_span() {
        let config = AxisGridConfig::percent(4, 8.0, 4.0);
        let metrics = AxisMetrics::resolve(&config, 800.0);
        assert!((metrics.span() - 672.0).abs() < 0.001);
    }

    fn unit_strategy() -> impl Strategy<Value = Unit> {
        prop_oneof![Just(Unit::Percent), Just(Unit::Absolute)]
    }

    proptest! {
        #[test]
        fn prop_columns_count_and_floor(
            count in 1u32..64,
            axis in 0.0f64..5000.0,
            margin in 0.0f64..400.0,
            gutter in 0.0f64..200.0,
            margin_unit in unit_strategy(),
            gutter_unit in unit_strategy(),
        ) {
            let config = AxisGridConfig::new(
                count,
                Dimension { value: margin, unit: margin_unit },
                Dimension { value: gutter, unit: gutter_unit },
            );
            let bands = solve_columns(&config, axis, 100.0);
            prop_assert_eq!(bands.len(), count as usize);
            for band in &bands {
                prop_assert!(band.width >= MIN_BAND_SIZE);
            }
            for pair in bands.windows(2) {
                prop_assert!(pair[1].x > pair[0].x);
            }

            let rows = solve_rows(&config, axis, 100.0);
            prop_assert_eq!(rows.len(), count as usize);
            prop_assert!(rows.iter().all(|r| r.height >= MIN_BAND_SIZE));
        }
    }
}
