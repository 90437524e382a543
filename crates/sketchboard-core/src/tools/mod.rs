//! Tool system for the drawing surface.

use crate::shapes::ShapeKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Tool selection errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
    #[error("{0} is not a drawing tool")]
    NotADrawingTool(ToolKind),
}

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Select,
    Line,
    Rectangle,
    Circle,
}

impl ToolKind {
    pub const ALL: [ToolKind; 4] = [ToolKind::Select, ToolKind::Line, ToolKind::Rectangle, ToolKind::Circle];

    /// Name used by the host UI.
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Select => "select",
            ToolKind::Line => "line",
            ToolKind::Rectangle => "rectangle",
            ToolKind::Circle => "circle",
        }
    }

    /// The shape this tool draws, or `None` for the select tool.
    pub fn shape_kind(self) -> Option<ShapeKind> {
        match self {
            ToolKind::Select => None,
            ToolKind::Line => Some(ShapeKind::Line),
            ToolKind::Rectangle => Some(ShapeKind::Rectangle),
            ToolKind::Circle => Some(ShapeKind::Circle),
        }
    }

    pub fn is_drawing_tool(self) -> bool {
        self.shape_kind().is_some()
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ToolKind {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        ToolKind::ALL
            .into_iter()
            .find(|tool| tool.name() == name)
            .ok_or_else(|| ToolError::UnknownTool(s.to_string()))
    }
}

impl TryFrom<ToolKind> for ShapeKind {
    type Error = ToolError;

    fn try_from(tool: ToolKind) -> Result<Self, Self::Error> {
        tool.shape_kind().ok_or(ToolError::NotADrawingTool(tool))
    }
}
