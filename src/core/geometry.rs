use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::Point;
use crate::error::{ChartError, ChartResult};

pub const FULL_CIRCLE_DEG: f64 = 360.0;

/// Angular extent of one proportional segment, in degrees.
///
/// `start_deg` is relative to the first segment, not to any screen direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepSegment {
    pub start_deg: f64,
    pub sweep_deg: f64,
}

impl SweepSegment {
    #[must_use]
    pub fn end_deg(self) -> f64 {
        self.start_deg + self.sweep_deg
    }

    #[must_use]
    pub fn mid_deg(self) -> f64 {
        self.start_deg + self.sweep_deg / 2.0
    }
}

/// Rejects non-finite or negative values, reporting the first offender.
pub fn ensure_non_negative(values: &[f64]) -> ChartResult<()> {
    for (index, &value) in values.iter().enumerate() {
        if !value.is_finite() {
            return Err(ChartError::InvalidData(format!(
                "value at index {index} must be finite"
            )));
        }
        if value < 0.0 {
            return Err(ChartError::NegativeValue { index, value });
        }
    }
    Ok(())
}

/// Splits a full circle into segments proportional to `values`.
///
/// Segment `i` sweeps `360 * v_i / total` degrees and starts where segment
/// `i - 1` ended. Empty input yields no segments. Values are normalized by
/// the largest one first, so the total cannot overflow for finite input.
pub fn sweep_angles(values: &[f64]) -> ChartResult<Vec<SweepSegment>> {
    ensure_non_negative(values)?;
    if values.is_empty() {
        return Ok(Vec::new());
    }

    let largest = values
        .iter()
        .copied()
        .map(OrderedFloat)
        .max()
        .map_or(0.0, |value| value.0);
    if largest <= 0.0 {
        return Err(ChartError::InvalidData(
            "sum of values must be > 0".to_owned(),
        ));
    }
    let total: f64 = values.iter().map(|value| value / largest).sum();
    if !total.is_finite() {
        return Err(ChartError::InvalidData(
            "sum of values must be finite".to_owned(),
        ));
    }

    let mut start_deg = 0.0;
    let mut segments = Vec::with_capacity(values.len());
    for &value in values {
        let sweep_deg = value / largest / total * FULL_CIRCLE_DEG;
        segments.push(SweepSegment {
            start_deg,
            sweep_deg,
        });
        start_deg += sweep_deg;
    }
    Ok(segments)
}

/// Maps a polar coordinate to pixel space.
///
/// 0 degrees points along +x; positive angles turn clockwise on screen.
#[must_use]
pub fn polar_to_cartesian(center: Point, radius: f64, angle_deg: f64) -> Point {
    let radians = angle_deg.to_radians();
    Point::new(
        center.x + radius * radians.cos(),
        center.y + radius * radians.sin(),
    )
}

/// Position of `value` inside `[lower, upper]` as a fraction.
pub fn value_ratio(value: f64, lower: f64, upper: f64) -> ChartResult<f64> {
    let span = upper - lower;
    if !span.is_finite() || span == 0.0 {
        return Err(ChartError::InvalidData(
            "value range must be finite and non-zero".to_owned(),
        ));
    }
    Ok((value - lower) / span)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::{polar_to_cartesian, sweep_angles, value_ratio};
    use crate::ChartError;
    use crate::core::Point;

    #[test]
    fn sweep_angles_are_cumulative_in_series_order() {
        let segments = sweep_angles(&[1.0, 2.0, 1.0]).expect("valid values");
        assert_eq!(segments.len(), 3);
        assert_relative_eq!(segments[0].start_deg, 0.0);
        assert_relative_eq!(segments[0].sweep_deg, 90.0);
        assert_relative_eq!(segments[1].start_deg, 90.0);
        assert_relative_eq!(segments[1].sweep_deg, 180.0);
        assert_relative_eq!(segments[2].start_deg, 270.0);
        assert_relative_eq!(segments[2].end_deg(), 360.0);
    }

    #[test]
    fn sweep_angles_reject_negative_value() {
        let err = sweep_angles(&[3.0, -1.0]).expect_err("negative must fail");
        assert!(matches!(err, ChartError::NegativeValue { index: 1, .. }));
    }

    #[test]
    fn sweep_angles_reject_all_zero_series() {
        assert!(sweep_angles(&[0.0, 0.0]).is_err());
        assert!(sweep_angles(&[]).expect("empty is fine").is_empty());
    }

    #[test]
    fn sweep_angles_stay_finite_near_f64_max() {
        for values in [[1e307, 1e307], [1e308, 1e308]] {
            let segments = sweep_angles(&values).expect("large finite values");
            assert_relative_eq!(segments[0].sweep_deg, 180.0);
            assert_relative_eq!(segments[1].start_deg, 180.0);
            assert_relative_eq!(segments[1].end_deg(), 360.0);
        }
    }

    #[test]
    fn polar_points_turn_clockwise_on_screen() {
        let center = Point::new(10.0, 10.0);
        let down = polar_to_cartesian(center, 5.0, 90.0);
        assert_relative_eq!(down.x, 10.0, epsilon = 1e-9);
        assert_relative_eq!(down.y, 15.0, epsilon = 1e-9);
    }

    #[test]
    fn value_ratio_rejects_flat_range() {
        assert!(value_ratio(1.0, 2.0, 2.0).is_err());
        assert_relative_eq!(value_ratio(5.0, 0.0, 10.0).expect("ratio"), 0.5);
    }
}
