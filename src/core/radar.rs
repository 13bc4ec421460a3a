use serde::{Deserialize, Serialize};

use crate::core::geometry::polar_to_cartesian;
use crate::core::{AnimationProgress, Point, Viewport};
use crate::error::{ChartError, ChartResult};

pub const MIN_RADAR_LABELS: usize = 3;
/// Space kept free around the net for axis labels.
pub const RADAR_LABEL_MARGIN_PX: f64 = 50.0;
/// Ray 0 points to 12 o'clock.
pub const RADAR_START_ANGLE_DEG: f64 = -90.0;
/// Upper bound on net rings; each ring is materialized as a path.
pub const MAX_SCALAR_STEPS: i32 = 1_000;

/// Converts `scalar_steps` to a ring count within `0..=MAX_SCALAR_STEPS`.
fn scalar_step_count(scalar_steps: i32) -> ChartResult<u32> {
    if scalar_steps > MAX_SCALAR_STEPS {
        return Err(ChartError::InvalidData(format!(
            "scalar steps must be <= {MAX_SCALAR_STEPS}, got {scalar_steps}"
        )));
    }
    u32::try_from(scalar_steps)
        .map_err(|_| ChartError::InvalidData("scalar steps must be >= 0".to_owned()))
}

/// Validates radar inputs before any geometry is computed.
///
/// Checks run in a fixed order and the first failing rule is reported.
pub fn validate_radar<'a>(
    label_count: usize,
    scalar_value: f64,
    polygons: impl IntoIterator<Item = &'a [f64]>,
    scalar_steps: i32,
) -> ChartResult<()> {
    scalar_step_count(scalar_steps)?;
    if !scalar_value.is_finite() || scalar_value < 0.0 {
        return Err(ChartError::InvalidData(
            "scalar value must be finite and >= 0".to_owned(),
        ));
    }
    if label_count < MIN_RADAR_LABELS {
        return Err(ChartError::InvalidData(format!(
            "radar needs at least {MIN_RADAR_LABELS} labels, got {label_count}"
        )));
    }

    for values in polygons {
        if values.len() != label_count {
            return Err(ChartError::LengthMismatch {
                what: "polygon values per radar label",
                expected: label_count,
                actual: values.len(),
            });
        }
        for (index, &value) in values.iter().enumerate() {
            if !value.is_finite() || value < 0.0 || value > scalar_value {
                return Err(ChartError::ValueOutOfRange {
                    index,
                    value,
                    min: 0.0,
                    max: scalar_value,
                });
            }
        }
    }
    Ok(())
}

/// Net geometry for one radar render pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarLayout {
    pub center: Point,
    pub radius: f64,
    pub axis_angles_deg: Vec<f64>,
    /// Radii of the concentric net rings, innermost first.
    pub ring_radii: Vec<f64>,
}

impl RadarLayout {
    pub fn resolve(viewport: Viewport, label_count: usize, scalar_steps: i32) -> ChartResult<Self> {
        let viewport = viewport.ensure_valid()?;
        if label_count < MIN_RADAR_LABELS {
            return Err(ChartError::InvalidData(format!(
                "radar needs at least {MIN_RADAR_LABELS} labels, got {label_count}"
            )));
        }
        let steps = scalar_step_count(scalar_steps)?;

        let radius = (viewport.min_dimension() / 2.0 - RADAR_LABEL_MARGIN_PX).max(0.0);
        let step_deg = 360.0 / label_count as f64;
        let axis_angles_deg = (0..label_count)
            .map(|index| RADAR_START_ANGLE_DEG + index as f64 * step_deg)
            .collect();
        let ring_radii = (1..=steps)
            .map(|step| radius * f64::from(step) / f64::from(steps))
            .collect();

        Ok(Self {
            center: viewport.center(),
            radius,
            axis_angles_deg,
            ring_radii,
        })
    }

    /// End point of every axis ray on the outer ring.
    #[must_use]
    pub fn axis_end_points(&self) -> Vec<Point> {
        self.ring_points(self.radius)
    }

    /// Vertices of a net ring at `radius`, one per axis.
    #[must_use]
    pub fn ring_points(&self, radius: f64) -> Vec<Point> {
        self.axis_angles_deg
            .iter()
            .map(|&angle| polar_to_cartesian(self.center, radius, angle))
            .collect()
    }
}

/// Places polygon vertex `i` at `radius * value_i / scalar_value` along ray `i`.
///
/// Progress scales every radial distance. A zero `scalar_value` collapses the
/// polygon onto the center.
#[must_use]
pub fn polygon_vertices(
    values: &[f64],
    layout: &RadarLayout,
    scalar_value: f64,
    progress: AnimationProgress,
) -> Vec<Point> {
    values
        .iter()
        .zip(&layout.axis_angles_deg)
        .map(|(&value, &angle)| {
            let ratio = if scalar_value > 0.0 {
                value / scalar_value
            } else {
                0.0
            };
            polar_to_cartesian(
                layout.center,
                layout.radius * ratio * progress.value(),
                angle,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::{MAX_SCALAR_STEPS, RadarLayout, polygon_vertices, validate_radar};
    use crate::ChartError;
    use crate::core::{AnimationProgress, Viewport};

    #[test]
    fn layout_places_rays_at_equal_increments() {
        let layout = RadarLayout::resolve(Viewport::new(300, 300), 4, 2).expect("layout");
        assert_relative_eq!(layout.radius, 100.0);
        assert_eq!(layout.axis_angles_deg, vec![-90.0, 0.0, 90.0, 180.0]);
        assert_eq!(layout.ring_radii, vec![50.0, 100.0]);
    }

    #[test]
    fn vertices_scale_with_value_ratio() {
        let layout = RadarLayout::resolve(Viewport::new(300, 300), 4, 2).expect("layout");
        let vertices = polygon_vertices(
            &[10.0, 5.0, 0.0, 10.0],
            &layout,
            10.0,
            AnimationProgress::COMPLETE,
        );
        assert_relative_eq!(vertices[0].x, 150.0, epsilon = 1e-9);
        assert_relative_eq!(vertices[0].y, 50.0, epsilon = 1e-9);
        assert_relative_eq!(vertices[1].x, 200.0, epsilon = 1e-9);
        assert_relative_eq!(vertices[2].y, 150.0, epsilon = 1e-9);
        assert_relative_eq!(vertices[3].x, 50.0, epsilon = 1e-9);
    }

    #[test]
    fn validation_reports_first_failing_rule() {
        let values = [1.0, 2.0];
        let err = validate_radar(2, -1.0, [values.as_slice()], -1).expect_err("must fail");
        assert!(err.to_string().contains("scalar steps"));

        let err = validate_radar(3, 5.0, [values.as_slice()], 1).expect_err("must fail");
        assert!(matches!(
            err,
            ChartError::LengthMismatch {
                expected: 3,
                actual: 2,
                ..
            }
        ));
    }

    #[test]
    fn scalar_steps_are_capped() {
        let values = [1.0, 2.0, 3.0];
        assert!(validate_radar(3, 5.0, [values.as_slice()], MAX_SCALAR_STEPS).is_ok());
        let err = validate_radar(3, 5.0, [values.as_slice()], MAX_SCALAR_STEPS + 1)
            .expect_err("too many steps");
        assert!(matches!(err, ChartError::InvalidData(_)));
        assert!(RadarLayout::resolve(Viewport::new(300, 300), 3, i32::MAX).is_err());
    }
}
