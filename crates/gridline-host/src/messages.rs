//! Wire messages exchanged with the host design tool.

use gridline_core::GridConfig;
use serde::{Deserialize, Serialize};

/// Outbound command. The host never acknowledges these.
///
/// Serialized as a JSON object tagged by `"type"`:
///
/// ```json
/// { "type": "apply-grid", "config": { ... }, "width": 1440, "height": 900, "replaceExisting": true }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum HostCommand {
    /// Apply a grid to the selected frame.
    ApplyGrid {
        config: GridConfig,
        width: f64,
        height: f64,
        replace_existing: bool,
    },
    /// Create a new frame carrying the grid.
    CreateGridFrame {
        config: GridConfig,
        frame_name: String,
        width: f64,
        height: f64,
        position_near_selection: bool,
    },
    /// Show a transient message to the user.
    Notify { message: String },
    /// Ask the host to report the current selection.
    GetSelection,
}

impl HostCommand {
    /// The `"type"` tag this command is sent with.
    pub fn kind(&self) -> &'static str {
        match self {
            HostCommand::ApplyGrid { .. } => "apply-grid",
            HostCommand::CreateGridFrame { .. } => "create-grid-frame",
            HostCommand::Notify { .. } => "notify",
            HostCommand::GetSelection => "get-selection",
        }
    }
}

/// What the host reports about its selection.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SelectionState {
    pub has_selection: bool,
    pub is_frame: bool,
    pub width: f64,
    pub height: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl SelectionState {
    /// A selected frame of the given size.
    pub fn frame(name: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            has_selection: true,
            is_frame: true,
            width,
            height,
            name: Some(name.into()),
        }
    }

    /// Whether a grid can be applied: a frame with a positive size is selected.
    pub fn can_apply(&self) -> bool {
        self.has_selection && self.is_frame && self.width > 0.0 && self.height > 0.0
    }
}

/// Inbound message from the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum HostEvent {
    Selection(SelectionState),
}
