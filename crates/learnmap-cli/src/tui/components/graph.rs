//! Graph canvas component.

use ratatui::{
    prelude::*,
    symbols::Marker,
    widgets::{
        canvas::{Canvas as CanvasWidget, Circle, Context, Line as CanvasLine},
        Block, BorderType, Borders,
    },
};

use unicode_width::UnicodeWidthStr;

use learnmap_core::graph::{dash_segments, Canvas, LineDash, Point, Rgb, SELECTION_COLOR};

use crate::tui::app::App;

/// Extra radius of the ring around the node shown in the details panel.
const SELECTED_RING_GAP: f64 = 5.0;

fn graph_block(title: String) -> Block<'static> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray))
}

/// Area the canvas paints into, inside the block border.
pub fn canvas_area(area: Rect) -> Rect {
    graph_block(String::new()).inner(area)
}

/// Render the knowledge graph.
pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let settings = app.surface.settings();
    let (width, height) = (settings.width, settings.height);
    let inner = canvas_area(area);
    let cell = Point::new(
        width / f64::from(inner.width.max(1)),
        height / f64::from(inner.height.max(1)),
    );
    let elapsed = app.elapsed();

    let title = format!(" {} ({}) ", app.stage.display_name(), app.stage);
    let canvas = CanvasWidget::default()
        .block(graph_block(title))
        .marker(Marker::Braille)
        .x_bounds([0.0, width])
        .y_bounds([0.0, height])
        .paint(|ctx| {
            let mut target = TerminalCanvas { ctx, height, cell };
            app.surface.render(&mut target, elapsed);

            if let (Some(idx), Some(node)) = (app.selected, app.selected_node()) {
                let radius = app.surface.radius_of(idx).unwrap_or_default();
                target.circle(node.position, radius + SELECTED_RING_GAP, SELECTION_COLOR, false);
            }
        });

    frame.render_widget(canvas, area);
}

/// Adapts a ratatui canvas context to the surface's drawing interface.
///
/// The surface draws with Y growing downward; the ratatui canvas grows
/// upward, so every Y is flipped against the surface height.
struct TerminalCanvas<'a, 'b> {
    ctx: &'a mut Context<'b>,
    height: f64,
    /// Surface size of one terminal cell.
    cell: Point,
}

impl TerminalCanvas<'_, '_> {
    fn flip(&self, y: f64) -> f64 {
        self.height - y
    }
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

/// Width of `text` in terminal cells.
fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

impl Canvas for TerminalCanvas<'_, '_> {
    fn line(&mut self, from: Point, to: Point, rgb: Rgb, dash: LineDash) {
        for (a, b) in dash_segments(from, to, dash) {
            let shape = CanvasLine::new(a.x, self.flip(a.y), b.x, self.flip(b.y), color(rgb));
            self.ctx.draw(&shape);
        }
    }

    fn circle(&mut self, center: Point, radius: f64, rgb: Rgb, filled: bool) {
        let (x, y) = (center.x, self.flip(center.y));
        if !filled {
            self.ctx.draw(&Circle {
                x,
                y,
                radius,
                color: color(rgb),
            });
            return;
        }

        // Braille dots are half a cell wide; concentric rings one dot apart fill the disc.
        let step = (self.cell.x / 2.0).max(f64::EPSILON);
        let mut r = radius;
        while r > 0.0 {
            self.ctx.draw(&Circle {
                x,
                y,
                radius: r,
                color: color(rgb),
            });
            r -= step;
        }
    }

    fn text(&mut self, at: Point, text: &str, rgb: Rgb) {
        let half_width = display_width(text) as f64 * self.cell.x / 2.0;
        self.ctx.print(
            at.x - half_width,
            self.flip(at.y),
            Span::styled(text.to_string(), Style::default().fg(color(rgb))),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_width() {
        assert_eq!(display_width("abc"), 3);
        assert_eq!(display_width("一次函数"), 8);
        assert_eq!(display_width("x轴"), 3);
        // Full-width punctuation takes two cells, combining marks none.
        assert_eq!(display_width("（一）"), 6);
        assert_eq!(display_width("e\u{301}"), 1);
    }

    #[test]
    fn test_canvas_area_is_inside_border() {
        let area = canvas_area(Rect::new(0, 0, 70, 20));
        assert_eq!(area, Rect::new(1, 1, 68, 18));
    }
}
