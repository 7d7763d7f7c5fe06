use crate::{
    element::PageElement,
    icons::IconRenderer,
    logging::EventLog,
    schedule::{Scheduler, TaskHandle},
};
use serde_json::json;
use std::rc::Rc;

pub const TOAST_CLASS: &str = "toast";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToastKind {
    #[default]
    Success,
    Error,
    Info,
    Warning,
}

impl ToastKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
            Self::Warning => "warning",
        }
    }

    /// Only success toasts carry a leading glyph.
    pub fn icon(self) -> Option<&'static str> {
        match self {
            Self::Success => Some("check-circle"),
            _ => None,
        }
    }

    pub fn class_name(self) -> String {
        format!("{TOAST_CLASS} {}", self.as_str())
    }
}

/// Container that toast nodes are inserted into. The message must be
/// inserted as text, never parsed as markup.
pub trait ToastSurface<E> {
    fn present(&self, class_name: &str, icon: Option<&str>, message: &str) -> Option<E>;
}

pub struct ToastNotifier<E: PageElement + 'static> {
    surface: Option<Rc<dyn ToastSurface<E>>>,
    scheduler: Rc<dyn Scheduler>,
    icons: Rc<dyn IconRenderer<E>>,
    duration_ms: u32,
    log: EventLog,
}

impl<E: PageElement + 'static> ToastNotifier<E> {
    pub fn new(
        surface: Option<Rc<dyn ToastSurface<E>>>,
        scheduler: Rc<dyn Scheduler>,
        icons: Rc<dyn IconRenderer<E>>,
        duration_ms: u32,
        log: EventLog,
    ) -> Self {
        Self {
            surface,
            scheduler,
            icons,
            duration_ms,
            log,
        }
    }

    /// Shows a toast and schedules its removal. `None` when there is no
    /// container to show it in.
    pub fn show(&self, message: &str, kind: ToastKind) -> Option<TaskHandle> {
        let surface = self.surface.as_ref()?;
        let node = surface.present(&kind.class_name(), kind.icon(), message)?;

        if kind.icon().is_some() {
            self.icons.render_within(&node);
        }

        self.log.debug(
            "toast.shown",
            json!({ "kind": kind.as_str(), "duration_ms": self.duration_ms }),
        );

        Some(
            self.scheduler
                .schedule(self.duration_ms, Box::new(move || node.remove())),
        )
    }
}
