//! Details panel for the selected knowledge point.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, List, ListItem},
};

use learnmap_core::graph::{status_color, NodeStatus};

use crate::tui::app::App;

const MASTERY_BAR_WIDTH: usize = 10;

/// Render the details panel, or key help when nothing is selected.
pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Details ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray));

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let items = match app.selected_node() {
        Some(_) => node_lines(app),
        None => help_lines(),
    };

    let list = List::new(items.into_iter().map(ListItem::new).collect::<Vec<_>>());
    frame.render_widget(list, inner_area);
}

fn help_lines() -> Vec<Line<'static>> {
    let dim = Style::default().fg(Color::DarkGray);
    vec![
        Line::styled(" Click a knowledge point", dim),
        Line::styled(" or press [Tab] to select.", dim),
        Line::default(),
        Line::styled(" Drag to move points.", dim),
        Line::styled(" [p] highlights the learning", dim),
        Line::styled("     path of the selection.", dim),
    ]
}

fn node_lines(app: &App) -> Vec<Line<'static>> {
    let Some(node) = app.selected_node() else {
        return Vec::new();
    };
    let status = status_style(node.status);
    let mut lines = vec![
        Line::from(Span::styled(
            format!(" {}", node.label),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::styled(format!(" id: {}", node.id), Style::default().fg(Color::DarkGray)),
        Line::default(),
        Line::from(vec![
            Span::raw(" Status   "),
            Span::styled(node.status.display_name().to_string(), status),
        ]),
        Line::from(vec![
            Span::raw(" Mastery  "),
            Span::styled(mastery_bar(node.mastery), status),
            Span::raw(format!(" {:.0}%", node.mastery * 100.0)),
        ]),
    ];

    if let Some(plan) = app.selected_plan() {
        lines.push(Line::default());
        lines.push(Line::styled(
            " Prerequisites",
            Style::default().fg(Color::Yellow),
        ));
        if plan.prerequisites.is_empty() {
            lines.push(Line::styled("   none", Style::default().fg(Color::DarkGray)));
        }
        for prerequisite in &plan.prerequisites {
            lines.push(Line::raw(format!("   ○ {}", prerequisite)));
        }

        if plan.offer_start {
            lines.push(Line::default());
            lines.push(Line::styled(
                " Learning path",
                Style::default().fg(Color::Yellow),
            ));
            for (i, step) in plan.path.iter().chain([&plan.target]).enumerate() {
                lines.push(Line::raw(format!("   {}. {}", i + 1, step)));
            }
        }
    }

    lines
}

fn status_style(status: NodeStatus) -> Style {
    let rgb = status_color(status);
    Style::default().fg(Color::Rgb(rgb.0, rgb.1, rgb.2))
}

/// Text gauge such as `██████░░░░`.
fn mastery_bar(mastery: f32) -> String {
    let filled = ((mastery.clamp(0.0, 1.0) * MASTERY_BAR_WIDTH as f32).round()) as usize;
    format!(
        "{}{}",
        "█".repeat(filled),
        "░".repeat(MASTERY_BAR_WIDTH - filled)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mastery_bar() {
        assert_eq!(mastery_bar(0.0), "░░░░░░░░░░");
        assert_eq!(mastery_bar(0.64), "██████░░░░");
        assert_eq!(mastery_bar(1.0), "██████████");
    }
}
