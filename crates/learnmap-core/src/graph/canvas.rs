//! Drawing backends for the render surface.

use super::models::Point;
use super::style::{LineDash, Rgb};

/// A 2D drawing target.
///
/// Coordinates are surface pixels with Y growing downward; backends with
/// other conventions convert on their side.
pub trait Canvas {
    /// Stroke a straight line.
    fn line(&mut self, from: Point, to: Point, color: Rgb, dash: LineDash);

    /// Draw a circle, filled or as an outline ring.
    fn circle(&mut self, center: Point, radius: f64, color: Rgb, filled: bool);

    /// Draw text anchored at its centre.
    fn text(&mut self, at: Point, text: &str, color: Rgb);
}

/// A single recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Line {
        from: Point,
        to: Point,
        color: Rgb,
        dash: LineDash,
    },
    Circle {
        center: Point,
        radius: f64,
        color: Rgb,
        filled: bool,
    },
    Text {
        at: Point,
        text: String,
        color: Rgb,
    },
}

/// Canvas that records draw calls instead of rasterizing them.
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    pub commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filled circles, in draw order.
    pub fn filled_circles(&self) -> impl Iterator<Item = (Point, f64, Rgb)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Circle {
                center,
                radius,
                color,
                filled: true,
            } => Some((*center, *radius, *color)),
            _ => None,
        })
    }

    /// Outline rings, in draw order.
    pub fn rings(&self) -> impl Iterator<Item = (Point, f64, Rgb)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Circle {
                center,
                radius,
                color,
                filled: false,
            } => Some((*center, *radius, *color)),
            _ => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> + '_ {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Canvas for DisplayList {
    fn line(&mut self, from: Point, to: Point, color: Rgb, dash: LineDash) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            dash,
        });
    }

    fn circle(&mut self, center: Point, radius: f64, color: Rgb, filled: bool) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
            filled,
        });
    }

    fn text(&mut self, at: Point, text: &str, color: Rgb) {
        self.commands.push(DrawCommand::Text {
            at,
            text: text.to_string(),
            color,
        });
    }
}
