//! Editor configuration.

use crate::geometry::LINE_HIT_TOLERANCE;
use crate::history::DEFAULT_HISTORY_LIMIT;
use serde::{Deserialize, Serialize};

/// Tunables for hit-testing, selection nodes and history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Distance from a line that still counts as a hit.
    pub line_hit_tolerance: f64,
    /// Half-size of the square hit area around a node.
    pub node_hit_tolerance: f64,
    /// Gap between a shape's bounds and its selection frame.
    pub highlight_offset: f64,
    /// Distance of the rotate node above the selection frame.
    pub rotate_node_offset: f64,
    pub rotate_node_enabled: bool,
    /// Maximum undo entries (0 = unbounded).
    pub history_limit: usize,
    pub clear_selection_on_empty_click: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            line_hit_tolerance: LINE_HIT_TOLERANCE,
            node_hit_tolerance: 10.0,
            highlight_offset: 4.0,
            rotate_node_offset: 24.0,
            rotate_node_enabled: true,
            history_limit: DEFAULT_HISTORY_LIMIT,
            clear_selection_on_empty_click: true,
        }
    }
}

impl EditorConfig {
    /// Parse from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
