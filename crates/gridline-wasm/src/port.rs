//! Host port backed by a JavaScript callback.

use gridline_host::{HostCommand, HostEvent, HostPort, MessageHandler};
use tracing::warn;
use wasm_bindgen::JsValue;

use crate::to_js;

/// Posts commands through a JS function such as
/// `msg => parent.postMessage({ pluginMessage: msg }, '*')`.
///
/// Inbound messages are handed over by the engine through [`JsHostPort::receive`].
#[derive(Default)]
pub struct JsHostPort {
    post: Option<js_sys::Function>,
    handlers: Vec<MessageHandler>,
}

impl JsHostPort {
    pub fn new(post: Option<js_sys::Function>) -> Self {
        Self {
            post,
            handlers: Vec::new(),
        }
    }

    pub fn receive(&mut self, event: &HostEvent) {
        for handler in &mut self.handlers {
            handler(event);
        }
    }
}

impl HostPort for JsHostPort {
    fn send(&mut self, command: HostCommand) {
        let Some(post) = &self.post else {
            warn!(kind = command.kind(), "no host callback, dropping command");
            return;
        };
        let message = match to_js(&command) {
            Ok(message) => message,
            Err(_) => {
                warn!(kind = command.kind(), "could not serialize host command");
                return;
            }
        };
        if let Err(err) = post.call1(&JsValue::NULL, &message) {
            warn!(kind = command.kind(), error = ?err, "host callback failed");
        }
    }

    fn on_message(&mut self, handler: MessageHandler) {
        self.handlers.push(handler);
    }
}
