use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::geometry::value_ratio;
use crate::core::{PathCommand, Point, Viewport};
use crate::error::{ChartError, ChartResult};

/// Inclusive value range mapped onto the plot height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub lower: f64,
    pub upper: f64,
}

impl ValueRange {
    pub fn new(lower: f64, upper: f64) -> ChartResult<Self> {
        if !lower.is_finite() || !upper.is_finite() || lower >= upper {
            return Err(ChartError::InvalidData(
                "value range must be finite with lower < upper".to_owned(),
            ));
        }
        Ok(Self { lower, upper })
    }

    /// Range covering every value; flat input is widened by one unit upwards.
    pub fn covering<'a>(series: impl IntoIterator<Item = &'a [f64]>) -> ChartResult<Self> {
        let mut lower: Option<OrderedFloat<f64>> = None;
        let mut upper: Option<OrderedFloat<f64>> = None;
        for values in series {
            for &value in values {
                let value = OrderedFloat(value);
                lower = Some(lower.map_or(value, |current| current.min(value)));
                upper = Some(upper.map_or(value, |current| current.max(value)));
            }
        }
        let (Some(lower), Some(upper)) = (lower, upper) else {
            return Err(ChartError::InvalidData(
                "value range needs at least one value".to_owned(),
            ));
        };
        if lower == upper {
            return Self::new(lower.0, upper.0 + 1.0);
        }
        Self::new(lower.0, upper.0)
    }
}

/// Plot-area mapping shared by every line of one chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineLayout {
    pub width: f64,
    pub height: f64,
    pub spacing_x: f64,
    pub spacing_y: f64,
    pub space_between_xes: f64,
    pub range: ValueRange,
}

impl LineLayout {
    pub fn resolve(
        viewport: Viewport,
        x_axis_size: usize,
        spacing_x: f64,
        spacing_y: f64,
        range: ValueRange,
    ) -> ChartResult<Self> {
        let viewport = viewport.ensure_valid()?;
        if x_axis_size == 0 {
            return Err(ChartError::InvalidData(
                "x-axis size must be > 0".to_owned(),
            ));
        }
        let width = viewport.width_px();
        let height = viewport.height_px();
        if !spacing_x.is_finite() || !spacing_y.is_finite() || spacing_x < 0.0 || spacing_y < 0.0
        {
            return Err(ChartError::InvalidData(
                "line spacing must be finite and >= 0".to_owned(),
            ));
        }
        if spacing_x >= width || spacing_y >= height {
            return Err(ChartError::InvalidData(
                "line spacing must leave a non-empty plot area".to_owned(),
            ));
        }

        Ok(Self {
            width,
            height,
            spacing_x,
            spacing_y,
            space_between_xes: (width - spacing_x) / x_axis_size as f64,
            range,
        })
    }

    #[must_use]
    pub fn x_at(self, index: usize) -> f64 {
        self.spacing_x / 2.0 + index as f64 * self.space_between_xes
    }

    /// Bottom edge of the plot area.
    #[must_use]
    pub fn baseline_y(self) -> f64 {
        self.height - self.spacing_y
    }

    pub fn y_for(self, value: f64) -> ChartResult<f64> {
        let ratio = value_ratio(value, self.range.lower, self.range.upper)?;
        let plot_height = self.baseline_y();
        Ok(plot_height - ratio * plot_height)
    }

    pub fn point_at(self, index: usize, value: f64) -> ChartResult<Point> {
        Ok(Point::new(self.x_at(index), self.y_for(value)?))
    }
}

fn map_points(data: &[f64], layout: LineLayout) -> ChartResult<Vec<Point>> {
    data.iter()
        .enumerate()
        .map(|(index, &value)| layout.point_at(index, value))
        .collect()
}

/// Smoothed path through `data`.
///
/// Every point after the first emits a quadratic curve whose control point is
/// the data point itself and whose end is the midpoint towards the next point.
/// The last point pairs with itself, so the path ends on it.
pub fn project_quadratic_line(data: &[f64], layout: LineLayout) -> ChartResult<Vec<PathCommand>> {
    let points = map_points(data, layout)?;
    let mut commands = Vec::with_capacity(points.len());
    for (index, &point) in points.iter().enumerate() {
        if index == 0 {
            commands.push(PathCommand::MoveTo(point));
            continue;
        }
        let next = points.get(index + 1).copied().unwrap_or(point);
        commands.push(PathCommand::QuadTo {
            control: point,
            end: point.midpoint(next),
        });
    }
    Ok(commands)
}

/// Polyline through `data`.
pub fn project_straight_line(data: &[f64], layout: LineLayout) -> ChartResult<Vec<PathCommand>> {
    let points = map_points(data, layout)?;
    Ok(points
        .into_iter()
        .enumerate()
        .map(|(index, point)| {
            if index == 0 {
                PathCommand::MoveTo(point)
            } else {
                PathCommand::LineTo(point)
            }
        })
        .collect())
}

/// Closes a stroke path down to the plot baseline for shadow filling.
#[must_use]
pub fn close_to_baseline(stroke: &[PathCommand], layout: LineLayout) -> Vec<PathCommand> {
    let baseline = layout.baseline_y();
    let mut commands = Vec::with_capacity(stroke.len() + 3);
    commands.extend_from_slice(stroke);
    commands.push(PathCommand::LineTo(Point::new(
        layout.width - layout.space_between_xes,
        baseline,
    )));
    commands.push(PathCommand::LineTo(Point::new(layout.spacing_x, baseline)));
    commands.push(PathCommand::Close);
    commands
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::{LineLayout, ValueRange, close_to_baseline, project_quadratic_line};
    use crate::core::{PathCommand, Point, Viewport};

    fn layout() -> LineLayout {
        let range = ValueRange::new(0.0, 10.0).expect("range");
        LineLayout::resolve(Viewport::new(440, 220), 4, 40.0, 20.0, range).expect("layout")
    }

    #[test]
    fn layout_spaces_points_evenly() {
        let layout = layout();
        assert_relative_eq!(layout.space_between_xes, 100.0);
        assert_relative_eq!(layout.x_at(0), 20.0);
        assert_relative_eq!(layout.x_at(3), 320.0);
        assert_relative_eq!(layout.y_for(0.0).expect("y"), 200.0);
        assert_relative_eq!(layout.y_for(10.0).expect("y"), 0.0);
    }

    #[test]
    fn quadratic_line_ends_on_last_point() {
        let commands = project_quadratic_line(&[0.0, 10.0, 5.0], layout()).expect("line");
        assert_eq!(commands.len(), 3);
        assert_eq!(commands[0], PathCommand::MoveTo(Point::new(20.0, 200.0)));
        assert_eq!(
            commands[1],
            PathCommand::QuadTo {
                control: Point::new(120.0, 0.0),
                end: Point::new(170.0, 50.0),
            }
        );
        assert_eq!(
            commands[2],
            PathCommand::QuadTo {
                control: Point::new(220.0, 100.0),
                end: Point::new(220.0, 100.0),
            }
        );
    }

    #[test]
    fn baseline_closure_appends_two_corners_and_close() {
        let layout = layout();
        let stroke = project_quadratic_line(&[1.0, 2.0], layout).expect("line");
        let fill = close_to_baseline(&stroke, layout);
        assert_eq!(fill.len(), stroke.len() + 3);
        assert_eq!(fill[fill.len() - 3], PathCommand::LineTo(Point::new(340.0, 200.0)));
        assert_eq!(fill[fill.len() - 2], PathCommand::LineTo(Point::new(40.0, 200.0)));
        assert_eq!(fill[fill.len() - 1], PathCommand::Close);
    }

    #[test]
    fn covering_range_widens_flat_series() {
        let range = ValueRange::covering([[3.0, 3.0].as_slice()]).expect("range");
        assert_relative_eq!(range.lower, 3.0);
        assert_relative_eq!(range.upper, 4.0);
    }
}
