//! The channel to the host design tool.

use crate::messages::{HostCommand, HostEvent};

/// Callback for inbound host messages.
pub type MessageHandler = Box<dyn FnMut(&HostEvent)>;

/// Fire-and-forget link to the host.
pub trait HostPort {
    /// Post a command. Delivery is not acknowledged.
    fn send(&mut self, command: HostCommand);

    /// Register a handler for messages from the host.
    fn on_message(&mut self, handler: MessageHandler);
}

/// Port that records outbound commands and lets callers inject events.
#[derive(Default)]
pub struct RecordingPort {
    sent: Vec<HostCommand>,
    handlers: Vec<MessageHandler>,
}

impl RecordingPort {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> &[HostCommand] {
        &self.sent
    }

    pub fn last_sent(&self) -> Option<&HostCommand> {
        self.sent.last()
    }

    pub fn take_sent(&mut self) -> Vec<HostCommand> {
        std::mem::take(&mut self.sent)
    }

    /// Hand `event` to every registered handler, as if the host sent it.
    pub fn deliver(&mut self, event: HostEvent) {
        for handler in &mut self.handlers {
            handler(&event);
        }
    }
}

impl std::fmt::Debug for RecordingPort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordingPort")
            .field("sent", &self.sent)
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

impl HostPort for RecordingPort {
    fn send(&mut self, command: HostCommand) {
        self.sent.push(command);
    }

    fn on_message(&mut self, handler: MessageHandler) {
        self.handlers.push(handler);
    }
}
