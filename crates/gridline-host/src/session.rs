//! Applying grids to the host's current selection.

use std::cell::RefCell;
use std::rc::Rc;

use gridline_core::{GridConfig, GridPreset};
use gridline_layout::{scale_or_original, PreviewOptions};
use tracing::{debug, info};

use crate::builder::{
    build_apply_grid_message, build_create_grid_frame_message, build_notify_message,
    ApplyGridRequest, CreateGridFrameRequest,
};
use crate::messages::{HostCommand, HostEvent, SelectionState};
use crate::port::HostPort;

/// Shown when a grid is applied without a frame selected.
pub const NO_FRAME_MESSAGE: &str = "Select a frame first";

/// What [`GridSession::apply`] did.
#[derive(Debug, Clone, PartialEq)]
pub enum ApplyOutcome {
    /// The grid, scaled to the frame, was sent to the host.
    Applied { width: f64, height: f64 },
    /// No usable frame is selected; the user was notified.
    NoFrameSelected,
}

/// Tracks the host selection and sends grid commands through a port.
pub struct GridSession<P: HostPort> {
    port: P,
    selection: Rc<RefCell<SelectionState>>,
}

impl<P: HostPort> GridSession<P> {
    /// Start a session, subscribing to selection updates on `port`.
    pub fn new(mut port: P) -> Self {
        let selection = Rc::new(RefCell::new(SelectionState::default()));
        let latest = Rc::clone(&selection);
        port.on_message(Box::new(move |event: &HostEvent| match event {
            HostEvent::Selection(state) => {
                debug!(
                    has_selection = state.has_selection,
                    is_frame = state.is_frame,
                    "selection changed"
                );
                *latest.borrow_mut() = state.clone();
            }
        }));
        Self { port, selection }
    }

    /// Last selection reported by the host.
    pub fn selection(&self) -> SelectionState {
        self.selection.borrow().clone()
    }

    pub fn can_apply(&self) -> bool {
        self.selection.borrow().can_apply()
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    /// Ask the host for its current selection.
    pub fn request_selection(&mut self) {
        self.port.send(HostCommand::GetSelection);
    }

    /// Scale `config` from the reference in `options` onto the selected frame
    /// and send it to the host.
    pub fn apply(
        &mut self,
        config: &GridConfig,
        options: &PreviewOptions,
        replace_existing: bool,
    ) -> ApplyOutcome {
        let selection = self.selection();
        if !selection.can_apply() {
            debug!("apply requested without a frame selected");
            self.notify(NO_FRAME_MESSAGE);
            return ApplyOutcome::NoFrameSelected;
        }

        let scaled = scale_or_original(
            config,
            options.reference_width,
            options.reference_height,
            selection.width,
            selection.height,
            options.preserve_proportions,
        );
        self.port.send(build_apply_grid_message(ApplyGridRequest {
            config: scaled,
            width: selection.width,
            height: selection.height,
            replace_existing,
        }));
        info!(
            frame = selection.name.as_deref().unwrap_or(""),
            width = selection.width,
            height = selection.height,
            "applied grid"
        );

        ApplyOutcome::Applied {
            width: selection.width,
            height: selection.height,
        }
    }

    /// Ask the host to create a new frame carrying `config`.
    ///
    /// The frame is placed next to the selection when there is one.
    pub fn create_frame(
        &mut self,
        config: &GridConfig,
        name: impl Into<String>,
        width: f64,
        height: f64,
    ) {
        let position_near_selection = self.selection.borrow().has_selection;
        self.port
            .send(build_create_grid_frame_message(CreateGridFrameRequest {
                config: config.clone(),
                frame_name: name.into(),
                width,
                height,
                position_near_selection,
            }));
    }

    /// Create a frame for `preset` sized to its reference rectangle.
    pub fn create_preset_frame(&mut self, preset: &GridPreset) {
        let (width, height) = preset.reference_size();
        debug!(preset = %preset.id, width, height, "creating preset frame");
        self.create_frame(&preset.config, preset.name.clone(), width, height);
    }

    pub fn notify(&mut self, message: impl Into<String>) {
        self.port.send(build_notify_message(message));
    }
}
