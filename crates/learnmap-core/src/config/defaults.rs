//! Default values for learnmap configuration.
//!
//! All hardcoded defaults are centralized here for easy maintenance.

// ============================================================================
// Curriculum Defaults
// ============================================================================

/// Stage used when a grade string cannot be mapped to a curriculum stage.
pub const DEFAULT_STAGE: &str = "junior";

/// Placeholder returned when a prerequisite lookup targets an unknown label.
pub const DEFAULT_FALLBACK_PREREQUISITE: &str = "数学基础知识";

/// Built-in curriculum catalog, compiled into the library.
pub const BUILTIN_CURRICULUM: &str = include_str!("../curriculum/builtin.yaml");

// ============================================================================
// Surface Defaults
// ============================================================================

/// Default canvas width (pixels).
pub const DEFAULT_SURFACE_WIDTH: f64 = 800.0;

/// Default canvas height (pixels).
pub const DEFAULT_SURFACE_HEIGHT: f64 = 600.0;

/// Maximum distance between a touch point and a node centre for a hit.
pub const DEFAULT_HIT_RADIUS: f64 = 40.0;

/// Maximum pointer travel for a down/up pair to count as a tap.
pub const DEFAULT_TAP_SLOP: f64 = 8.0;

/// Radius of a node with zero mastery.
pub const DEFAULT_NODE_RADIUS_MIN: f64 = 18.0;

/// Radius of a fully mastered node.
pub const DEFAULT_NODE_RADIUS_MAX: f64 = 34.0;

/// Mean distance from centre below which the zoom toggle zooms in.
pub const DEFAULT_ZOOM_THRESHOLD: f64 = 200.0;

/// Radial scale applied when zooming in.
pub const DEFAULT_ZOOM_IN_FACTOR: f64 = 1.5;

/// Radial scale applied when zooming out.
pub const DEFAULT_ZOOM_OUT_FACTOR: f64 = 1.0 / 1.5;

/// Period of the highlight glow pulse (milliseconds).
pub const DEFAULT_PULSE_PERIOD_MS: u64 = 1200;

/// Duration of the entrance animation (milliseconds).
pub const DEFAULT_ENTRANCE_DURATION_MS: u64 = 600;

// ============================================================================
// Storage Defaults
// ============================================================================

/// Default data directory.
pub const DEFAULT_DATA_DIR: &str = ".learnmap";

/// Default mastery records file name.
pub const DEFAULT_MASTERY_FILE: &str = "mastery.json";

/// Default log file name, used while the terminal UI owns the screen.
pub const DEFAULT_LOG_FILE: &str = "learnmap.log";

/// Project-local config file name.
pub const LOCAL_CONFIG_FILE: &str = "learnmap.toml";
