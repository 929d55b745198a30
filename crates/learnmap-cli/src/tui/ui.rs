//! UI rendering for the TUI.

use ratatui::{prelude::*, widgets::Paragraph};

use super::app::App;
use super::components::{details, graph};

/// Screen regions.
struct AppLayout {
    graph: Rect,
    details: Rect,
    status: Rect,
}

fn layout(area: Rect) -> AppLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),   // Graph + details
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(70), // Graph
            Constraint::Percentage(30), // Details
        ])
        .split(rows[0]);

    AppLayout {
        graph: columns[0],
        details: columns[1],
        status: rows[1],
    }
}

/// Canvas area of the graph view for a given terminal area.
pub fn graph_canvas_area(area: Rect) -> Rect {
    graph::canvas_area(layout(area).graph)
}

/// Render the entire UI.
pub fn render(app: &App, frame: &mut Frame) {
    let regions = layout(frame.area());

    graph::render(app, frame, regions.graph);
    details::render(app, frame, regions.details);
    render_status_bar(app, frame, regions.status);
}

/// Render the status bar.
fn render_status_bar(app: &App, frame: &mut Frame, area: Rect) {
    let keys = "[c] Centre  [z] Zoom  [p] Path  [x] Clear  [Tab] Select  [+/-] Mastery  [q] Quit";

    let status = match &app.status_message {
        Some(message) => format!("{}  |  {}", keys, message),
        None => keys.to_string(),
    };

    let status_bar = Paragraph::new(status).style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status_bar, area);
}
