//! Peg and disk rendering
//!
//! Draws the scene on a ratatui [`Canvas`]. Scene coordinates are top-down,
//! canvas coordinates bottom-up, so every y is flipped against the scene
//! height before drawing.

use crate::animation::AnimationRecord;
use crate::model::VisualPegs;
use crate::ui::theme::{disk_color, DEFAULT_THEME};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::Span,
    widgets::{
        canvas::{Canvas, Painter, Shape},
        Block, Borders,
    },
    Frame,
};

/// Peg width in scene units
const PEG_WIDTH: f64 = 10.0;
/// Widest a disk may get before disk widths are scaled down
const MAX_DISK_SPAN: f64 = 280.0;
const DISK_UNIT: f64 = 20.0;

/// Solid rectangle in canvas coordinates (`y` is the bottom edge)
struct FilledRect {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    color: Color,
}

impl Shape for FilledRect {
    fn draw(&self, painter: &mut Painter) {
        let Some((left, top)) = painter.get_point(self.x, self.y + self.height) else {
            return;
        };
        let Some((right, bottom)) = painter.get_point(self.x + self.width, self.y) else {
            return;
        };
        for row in top..=bottom {
            for col in left..=right {
                painter.paint(col, row, self.color);
            }
        }
    }
}

/// Maps scene rectangles onto the canvas, clipping to the scene bounds
struct SceneMapper {
    width: f64,
    height: f64,
}

impl SceneMapper {
    /// `top` is the scene y of the rectangle's upper edge
    fn rect(&self, left: f64, top: f64, width: f64, height: f64, color: Color) -> Option<FilledRect> {
        let x0 = left.max(0.0);
        let x1 = (left + width).min(self.width);
        let y0 = (self.height - (top + height)).max(0.0);
        let y1 = (self.height - top).min(self.height);
        (x1 > x0 && y1 > y0).then(|| FilledRect {
            x: x0,
            y: y0,
            width: x1 - x0,
            height: y1 - y0,
            color,
        })
    }
}

/// Per-disk width unit so the widest disk fits between two pegs
fn disk_unit(disk_count: u32) -> f64 {
    if disk_count == 0 {
        DISK_UNIT
    } else {
        (MAX_DISK_SPAN / disk_count as f64).min(DISK_UNIT)
    }
}

/// Render the pegs, landed disks and disks in flight
pub fn render_board_pane(
    frame: &mut Frame,
    area: Rect,
    visual: &VisualPegs,
    records: &[&AnimationRecord],
    disk_count: u32,
    caption: &str,
    is_focused: bool,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let title = if caption.is_empty() {
        String::from(" Tower of Hanoi ")
    } else {
        format!(" {} ", caption)
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    let layout = *visual.layout();
    let mapper = SceneMapper {
        width: layout.width as f64,
        height: layout.height as f64,
    };
    let unit = disk_unit(disk_count);
    let disk_height = layout.disk_height as f64;

    let mut shapes: Vec<FilledRect> = Vec::new();
    let mut labels: Vec<(f64, f64, String)> = Vec::new();

    for (peg, visual_peg) in visual.iter() {
        let anchor = visual_peg.anchor;
        let x = anchor.x as f64;
        shapes.extend(mapper.rect(
            x - PEG_WIDTH / 2.0,
            anchor.top_y as f64,
            PEG_WIDTH,
            anchor.height as f64,
            DEFAULT_THEME.peg,
        ));

        for (level, &disk) in visual_peg.disks.iter().enumerate() {
            let width = disk as f64 * unit;
            shapes.extend(mapper.rect(
                x - width / 2.0,
                anchor.slot_y(level, layout.disk_height) as f64,
                width,
                disk_height,
                disk_color(disk, false),
            ));
        }

        labels.push((
            x - 7.0,
            mapper.height - (anchor.base_y() as f64 + 50.0),
            peg.to_string(),
        ));
    }

    for record in records {
        let width = record.disk as f64 * unit;
        shapes.extend(mapper.rect(
            record.current.x as f64 - width / 2.0,
            record.current.y as f64,
            width,
            disk_height,
            disk_color(record.disk, true),
        ));
    }

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::HalfBlock)
        .x_bounds([0.0, mapper.width])
        .y_bounds([0.0, mapper.height])
        .paint(|ctx| {
            for shape in &shapes {
                ctx.draw(shape);
            }
            for (x, y, text) in &labels {
                ctx.print(
                    *x,
                    *y,
                    Span::styled(text.clone(), Style::default().fg(DEFAULT_THEME.fg)),
                );
            }
        });

    frame.render_widget(canvas, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disk_unit_scales_down() {
        assert_eq!(disk_unit(3), DISK_UNIT);
        assert_eq!(disk_unit(20), 14.0);
    }

    #[test]
    fn test_mapper_flips_and_clips() {
        let mapper = SceneMapper {
            width: 1000.0,
            height: 500.0,
        };
        let rect = mapper.rect(190.0, 100.0, 20.0, 20.0, Color::Red).unwrap();
        assert_eq!((rect.x, rect.y, rect.width, rect.height), (190.0, 380.0, 20.0, 20.0));

        let clipped = mapper.rect(-10.0, -10.0, 20.0, 20.0, Color::Red).unwrap();
        assert_eq!((clipped.x, clipped.width), (0.0, 10.0));
        assert_eq!(clipped.y + clipped.height, 500.0);

        assert!(mapper.rect(2000.0, 0.0, 10.0, 10.0, Color::Red).is_none());
    }
}
