//! Visual styling for nodes and edges.
//!
//! Colors follow a small fixed palette so any backend can map them.

use std::fmt;

use super::models::{NodeStatus, Point, RelationKind};

// =============================================================================
// Colors
// =============================================================================

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// `#rrggbb` form, for JSON export.
    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

pub const MASTERED_COLOR: Rgb = Rgb(0x1a, 0x7f, 0x37); // Green
pub const LEARNING_COLOR: Rgb = Rgb(0x09, 0x69, 0xda); // Blue
pub const TODO_COLOR: Rgb = Rgb(0x8c, 0x95, 0x9f); // Gray
pub const LOCKED_COLOR: Rgb = Rgb(0x42, 0x4a, 0x53); // Dark gray
pub const GLOW_COLOR: Rgb = Rgb(0xd4, 0xa7, 0x2c); // Gold
pub const SELECTION_COLOR: Rgb = Rgb(0xcf, 0x22, 0x2e); // Red
pub const LABEL_COLOR: Rgb = Rgb(0xe6, 0xed, 0xf3);

/// Fill color for a node status.
pub fn status_color(status: NodeStatus) -> Rgb {
    match status {
        NodeStatus::Mastered => MASTERED_COLOR,
        NodeStatus::Learning => LEARNING_COLOR,
        NodeStatus::Todo => TODO_COLOR,
        NodeStatus::Locked => LOCKED_COLOR,
    }
}

// =============================================================================
// Nodes
// =============================================================================

/// Node radius for a mastery level, linear between `min` and `max`.
///
/// Strictly increasing in `mastery` whenever `min < max`.
pub fn node_radius(mastery: f32, min: f64, max: f64) -> f64 {
    let m = f64::from(mastery.clamp(0.0, 1.0));
    min + (max - min) * m
}

// =============================================================================
// Edges
// =============================================================================

/// Stroke pattern of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineDash {
    Solid,
    Dashed,
    Dotted,
}

impl LineDash {
    /// `(on, off)` lengths in pixels, `None` for solid.
    fn pattern(self) -> Option<(f64, f64)> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some((8.0, 6.0)),
            Self::Dotted => Some((2.0, 5.0)),
        }
    }
}

/// How an edge is stroked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeStyle {
    pub color: Rgb,
    pub dash: LineDash,
    /// Draw an arrowhead at the target end.
    pub arrow: bool,
}

/// Style for a relation kind.
pub fn edge_style(relation: RelationKind) -> EdgeStyle {
    match relation {
        RelationKind::Prerequisite => EdgeStyle {
            color: Rgb(0x9a, 0x67, 0x00),
            dash: LineDash::Solid,
            arrow: true,
        },
        RelationKind::Related => EdgeStyle {
            color: Rgb(0x57, 0x60, 0x6a),
            dash: LineDash::Dashed,
            arrow: false,
        },
        RelationKind::Application => EdgeStyle {
            color: Rgb(0x82, 0x50, 0xdf),
            dash: LineDash::Dotted,
            arrow: true,
        },
    }
}

/// Split a line into the visible segments of a dash pattern.
///
/// Backends without native dash support draw each returned segment.
pub fn dash_segments(from: Point, to: Point, dash: LineDash) -> Vec<(Point, Point)> {
    let Some((on, off)) = dash.pattern() else {
        return vec![(from, to)];
    };

    let delta = to - from;
    let length = delta.length();
    if length == 0.0 {
        return Vec::new();
    }
    let unit = delta.scale(1.0 / length);

    let mut segments = Vec::new();
    let mut start = 0.0;
    while start < length {
        let end = (start + on).min(length);
        segments.push((from + unit.scale(start), from + unit.scale(end)));
        start = end + off;
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex() {
        assert_eq!(MASTERED_COLOR.hex(), "#1a7f37");
    }

    #[test]
    fn test_solid_is_single_segment() {
        let segs = dash_segments(Point::new(0.0, 0.0), Point::new(10.0, 0.0), LineDash::Solid);
        assert_eq!(segs.len(), 1);
    }

    #[test]
    fn test_dashed_segments_stay_on_line() {
        let to = Point::new(100.0, 0.0);
        let segs = dash_segments(Point::new(0.0, 0.0), to, LineDash::Dashed);
        assert!(segs.len() > 1);
        for (a, b) in segs {
            assert_eq!(a.y, 0.0);
            assert!(b.x <= to.x);
            assert!(b.x - a.x <= 8.0 + 1e-9);
        }
    }
}
