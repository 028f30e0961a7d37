//! Builders for host commands.
//!
//! These are pure packaging steps. Sizes and names pass through as given;
//! the host decides what to do with degenerate frames.

use gridline_core::GridConfig;

use crate::messages::HostCommand;

/// Parameters of an `apply-grid` command.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ApplyGridRequest {
    pub config: GridConfig,
    pub width: f64,
    pub height: f64,
    /// Remove grids already on the frame
    pub replace_existing: bool,
}

/// Parameters of a `create-grid-frame` command.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CreateGridFrameRequest {
    pub config: GridConfig,
    pub frame_name: String,
    pub width: f64,
    pub height: f64,
    pub position_near_selection: bool,
}

pub fn build_apply_grid_message(request: ApplyGridRequest) -> HostCommand {
    HostCommand::ApplyGrid {
        config: request.config,
        width: request.width,
        height: request.height,
        replace_existing: request.replace_existing,
    }
}

pub fn build_create_grid_frame_message(request: CreateGridFrameRequest) -> HostCommand {
    HostCommand::CreateGridFrame {
        config: request.config,
        frame_name: request.frame_name,
        width: request.width,
        height: request.height,
        position_near_selection: request.position_near_selection,
    }
}

pub fn build_notify_message(message: impl Into<String>) -> HostCommand {
    HostCommand::Notify {
        message: message.into(),
    }
}
