use crate::core::{Point, Rect};
use crate::render::{CirclePrimitive, Color, DrawCommand, ShapePaint, TextHAlign};

use super::TextStyle;

const LEGEND_PADDING_PX: f64 = 16.0;
const SWATCH_GAP_PX: f64 = 8.0;
const ROW_GAP_PX: f64 = 8.0;
const COLUMN_GAP_PX: f64 = 24.0;

/// One legend row: a color swatch and its label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegendEntry<'a> {
    pub label: &'a str,
    pub color: Color,
}

/// Vertical list of swatch/label rows inside `area`.
///
/// Rows that overflow the area height wrap into a new column to the right.
/// Entries with an empty label are skipped.
pub(super) fn layout_vertical_legend(
    entries: &[LegendEntry<'_>],
    area: Rect,
    style: TextStyle,
) -> Vec<DrawCommand> {
    let swatch_radius = style.font_size_px / 2.0;
    let row_height = style.text_height().max(swatch_radius * 2.0) + ROW_GAP_PX;
    let top = area.y + LEGEND_PADDING_PX / 2.0;

    let mut commands = Vec::with_capacity(entries.len() * 2);
    let mut column_x = area.x + LEGEND_PADDING_PX;
    let mut column_width: f64 = 0.0;
    let mut y = top;
    for entry in entries.iter().filter(|entry| !entry.label.is_empty()) {
        if y + row_height > area.bottom() && y > top {
            column_x += column_width + COLUMN_GAP_PX;
            column_width = 0.0;
            y = top;
        }

        let center_y = y + row_height / 2.0 - ROW_GAP_PX / 2.0;
        commands.push(DrawCommand::Circle(CirclePrimitive::new(
            Point::new(column_x + swatch_radius, center_y),
            swatch_radius,
            entry.color,
            ShapePaint::Fill,
        )));
        let text_x = column_x + swatch_radius * 2.0 + SWATCH_GAP_PX;
        commands.push(DrawCommand::Text(style.primitive(
            entry.label,
            text_x,
            center_y - style.text_height() / 2.0,
            TextHAlign::Left,
        )));

        column_width = column_width
            .max(swatch_radius * 2.0 + SWATCH_GAP_PX + style.text_width(entry.label));
        y += row_height;
    }
    commands
}

/// Single row of swatch/label pairs starting at `origin`.
pub(super) fn layout_horizontal_legend(
    entries: &[LegendEntry<'_>],
    origin: Point,
    style: TextStyle,
) -> Vec<DrawCommand> {
    let swatch_radius = style.font_size_px / 2.0;
    let center_y = origin.y + style.text_height() / 2.0;

    let mut commands = Vec::with_capacity(entries.len() * 2);
    let mut x = origin.x;
    for entry in entries.iter().filter(|entry| !entry.label.is_empty()) {
        commands.push(DrawCommand::Circle(CirclePrimitive::new(
            Point::new(x + swatch_radius, center_y),
            swatch_radius,
            entry.color,
            ShapePaint::Fill,
        )));
        let text_x = x + swatch_radius * 2.0 + SWATCH_GAP_PX;
        commands.push(DrawCommand::Text(style.primitive(
            entry.label,
            text_x,
            origin.y,
            TextHAlign::Left,
        )));
        x = text_x + style.text_width(entry.label) + COLUMN_GAP_PX;
    }
    commands
}

#[cfg(test)]
mod tests {
    use super::{LegendEntry, layout_horizontal_legend, layout_vertical_legend};
    use crate::api::TextStyle;
    use crate::core::{Point, Rect};
    use crate::render::{Color, DrawCommand};

    fn text_x_positions(commands: &[DrawCommand]) -> Vec<f64> {
        commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Text(text) => Some(text.x),
                _ => None,
            })
            .collect()
    }

    fn entry(label: &str) -> LegendEntry<'_> {
        LegendEntry {
            label,
            color: Color::BLACK,
        }
    }

    #[test]
    fn vertical_legend_wraps_into_new_column() {
        let entries = [entry("a"), entry("b"), entry("c")];
        let style = TextStyle::new(10.0, Color::BLACK);
        // Row height is 12 + 8 = 20; only two rows fit below the 8px top padding.
        let commands = layout_vertical_legend(&entries, Rect::new(0.0, 0.0, 300.0, 50.0), style);
        let xs = text_x_positions(&commands);
        assert_eq!(xs.len(), 3);
        assert_eq!(xs[0], xs[1]);
        assert!(xs[2] > xs[1]);
    }

    #[test]
    fn empty_labels_are_skipped() {
        let entries = [entry(""), entry("x")];
        let commands =
            layout_horizontal_legend(&entries, Point::new(0.0, 0.0), TextStyle::default());
        assert_eq!(commands.len(), 2);
    }
}
