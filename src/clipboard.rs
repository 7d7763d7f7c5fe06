use crate::{
    element::PageElement,
    error::InteractionError,
    logging::EventLog,
    toast::{ToastKind, ToastNotifier},
};
use serde_json::json;
use std::rc::Rc;

pub const COPY_PAYLOAD_ATTRIBUTE: &str = "data-copy-value";
pub const COPY_SUCCESS_MESSAGE: &str = "Copied to clipboard!";

pub trait ClipboardWriter {
    fn write_text(&self, text: &str) -> Result<(), InteractionError>;
}

pub struct CopyAction<E: PageElement + 'static> {
    writer: Rc<dyn ClipboardWriter>,
    toasts: Rc<ToastNotifier<E>>,
    log: EventLog,
}

impl<E: PageElement + 'static> CopyAction<E> {
    pub fn new(writer: Rc<dyn ClipboardWriter>, toasts: Rc<ToastNotifier<E>>, log: EventLog) -> Self {
        Self { writer, toasts, log }
    }

    /// A failed copy is logged only; the user gets no failure toast.
    pub fn copy(&self, text: &str) -> bool {
        match self.writer.write_text(text) {
            Ok(()) => {
                self.toasts.show(COPY_SUCCESS_MESSAGE, ToastKind::Success);
                true
            }
            Err(err) => {
                self.log
                    .error("clipboard.copy_failed", json!({ "error": err.to_string() }));
                false
            }
        }
    }

    /// Copies the button's payload; absent or empty payloads do nothing.
    pub fn copy_from(&self, button: &E) -> bool {
        match button.attribute(COPY_PAYLOAD_ATTRIBUTE) {
            Some(payload) if !payload.is_empty() => self.copy(&payload),
            _ => false,
        }
    }
}
