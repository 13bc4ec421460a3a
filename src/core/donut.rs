use serde::{Deserialize, Serialize};

use crate::core::geometry::{polar_to_cartesian, sweep_angles};
use crate::core::{AnimationProgress, Point, Rect};
use crate::error::{ChartError, ChartResult};

const ARC_WIDTH_FACTOR: f64 = 0.13;
const GUIDE_CIRCLE_OFFSET_DIVISOR: f64 = 1.5;

/// Ring geometry derived from the drawing area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DonutLayout {
    pub center: Point,
    /// Largest extent the ring may occupy, bounded by half of each side.
    pub min_value: f64,
    pub arc_width: f64,
}

impl DonutLayout {
    pub fn resolve(area: Rect) -> ChartResult<Self> {
        if !area.is_drawable() {
            return Err(ChartError::InvalidData(
                "donut area must be finite with size > 0".to_owned(),
            ));
        }
        let width = area.width;
        let height = area.height;
        let min_value = width.min(height).min(height / 2.0).min(width / 2.0);
        let arc_width = (area.min_dimension() * ARC_WIDTH_FACTOR).min(min_value / 4.0);
        Ok(Self {
            center: area.center(),
            min_value,
            arc_width,
        })
    }

    #[must_use]
    pub fn ring_radius(self) -> f64 {
        self.min_value / 2.0
    }

    #[must_use]
    pub fn outer_guide_radius(self) -> f64 {
        self.ring_radius() + self.arc_width / GUIDE_CIRCLE_OFFSET_DIVISOR
    }

    #[must_use]
    pub fn inner_guide_radius(self) -> f64 {
        (self.ring_radius() - self.arc_width / GUIDE_CIRCLE_OFFSET_DIVISOR).max(0.0)
    }
}

/// Screen-space slice of a donut/pie ring after animation scaling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DonutSlice {
    pub index: usize,
    pub start_deg: f64,
    pub sweep_deg: f64,
    /// Full, un-animated sweep of the slice.
    pub target_sweep_deg: f64,
    /// Share of the total, in percent.
    pub ratio_percent: f64,
}

impl DonutSlice {
    #[must_use]
    pub fn mid_deg(self) -> f64 {
        self.start_deg + self.sweep_deg / 2.0
    }

    /// Returns `true` once the animated ring has reached this slice's middle.
    #[must_use]
    pub fn is_mid_revealed(self) -> bool {
        self.target_sweep_deg > 0.0 && self.sweep_deg >= self.target_sweep_deg / 2.0
    }

    #[must_use]
    pub fn point_at(self, layout: DonutLayout, radius: f64) -> Point {
        polar_to_cartesian(layout.center, radius, self.mid_deg())
    }
}

/// Projects values into animated slices starting at `start_angle_deg`.
///
/// Both cumulative start and sweep scale with progress, so a partially
/// animated ring grows clockwise from the start angle without gaps.
pub fn project_donut_slices(
    values: &[f64],
    start_angle_deg: f64,
    progress: AnimationProgress,
) -> ChartResult<Vec<DonutSlice>> {
    let segments = sweep_angles(values)?;
    let scale = progress.value();
    Ok(segments
        .into_iter()
        .enumerate()
        .map(|(index, segment)| DonutSlice {
            index,
            start_deg: start_angle_deg + segment.start_deg * scale,
            sweep_deg: segment.sweep_deg * scale,
            target_sweep_deg: segment.sweep_deg,
            ratio_percent: segment.sweep_deg / 3.6,
        })
        .collect())
}
