//! In-memory doubles for the browser capabilities.

use crate::{
    clipboard::ClipboardWriter,
    element::PageElement,
    error::InteractionError,
    icons::IconRenderer,
    logging::{EventLog, LogLevel, LogSink},
    navigation::SectionLocator,
    reveal::VisibilityObserver,
    schedule::{Scheduler, TaskHandle},
    theme::PreferenceStore,
    toast::ToastSurface,
};
use std::{
    cell::{Cell, RefCell},
    collections::{BTreeSet, HashMap},
    fmt,
    rc::Rc,
};

#[derive(Default)]
struct FakeNode {
    tag: String,
    classes: BTreeSet<String>,
    attributes: HashMap<String, String>,
    styles: HashMap<String, String>,
    text: String,
    queries: HashMap<String, Vec<FakeElement>>,
    children: Vec<FakeElement>,
    removed: bool,
}

/// Shared-handle element: clones point at the same node, like DOM handles.
#[derive(Clone, Default)]
pub struct FakeElement(Rc<RefCell<FakeNode>>);

impl fmt::Debug for FakeElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = self.0.borrow();
        f.debug_struct("FakeElement")
            .field("tag", &node.tag)
            .field("classes", &node.classes)
            .field("text", &node.text)
            .finish()
    }
}

impl PartialEq for FakeElement {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl FakeElement {
    pub fn new(tag: &str) -> Self {
        let element = Self::default();
        element.0.borrow_mut().tag = tag.to_string();
        element
    }

    pub fn with_class(self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    pub fn with_attribute(self, name: &str, value: &str) -> Self {
        self.0
            .borrow_mut()
            .attributes
            .insert(name.to_string(), value.to_string());
        self
    }

    /// Canned answer for `query_all(selector)`.
    pub fn with_query(self, selector: &str, matches: Vec<FakeElement>) -> Self {
        self.0
            .borrow_mut()
            .queries
            .insert(selector.to_string(), matches);
        self
    }

    pub fn style(&self, property: &str) -> Option<String> {
        self.0.borrow().styles.get(property).cloned()
    }

    pub fn text(&self) -> String {
        self.0.borrow().text.clone()
    }

    pub fn live_children(&self) -> Vec<FakeElement> {
        self.0
            .borrow()
            .children
            .iter()
            .filter(|child| !child.0.borrow().removed)
            .cloned()
            .collect()
    }
}

impl PageElement for FakeElement {
    fn add_class(&self, class: &str) {
        self.0.borrow_mut().classes.insert(class.to_string());
    }

    fn remove_class(&self, class: &str) {
        self.0.borrow_mut().classes.remove(class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.borrow().classes.contains(class)
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.borrow().attributes.get(name).cloned()
    }

    fn set_style(&self, property: &str, value: &str) {
        self.0
            .borrow_mut()
            .styles
            .insert(property.to_string(), value.to_string());
    }

    fn set_text(&self, text: &str) {
        self.0.borrow_mut().text = text.to_string();
    }

    fn query_all(&self, selector: &str) -> Vec<Self> {
        self.0
            .borrow()
            .queries
            .get(selector)
            .cloned()
            .unwrap_or_default()
    }

    fn remove(&self) {
        self.0.borrow_mut().removed = true;
    }
}

impl ToastSurface<FakeElement> for FakeElement {
    fn present(&self, class_name: &str, icon: Option<&str>, message: &str) -> Option<FakeElement> {
        let toast = FakeElement::new("div");
        for class in class_name.split_whitespace() {
            toast.add_class(class);
        }
        let toast = match icon {
            Some(icon) => toast.with_attribute("data-icon", icon),
            None => toast,
        };
        toast.set_text(message);
        self.0.borrow_mut().children.push(toast.clone());
        Some(toast)
    }
}

#[derive(Default)]
pub struct MemorySink {
    lines: RefCell<Vec<(LogLevel, String)>>,
}

impl MemorySink {
    pub fn lines(&self) -> Vec<(LogLevel, String)> {
        self.lines.borrow().clone()
    }

    pub fn count_at(&self, level: LogLevel) -> usize {
        self.lines
            .borrow()
            .iter()
            .filter(|(line_level, _)| *line_level == level)
            .count()
    }
}

impl LogSink for MemorySink {
    fn write(&self, level: LogLevel, line: &str) {
        self.lines.borrow_mut().push((level, line.to_string()));
    }
}

pub fn quiet_log() -> EventLog {
    EventLog::new(LogLevel::Error, Rc::new(MemorySink::default()), || 0)
}

struct PendingTask {
    id: u64,
    due: u64,
    task: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct ClockState {
    now: u64,
    next_id: u64,
    pending: Vec<PendingTask>,
}

/// Scheduler driven by `advance` instead of wall time.
#[derive(Default)]
pub struct VirtualClock {
    state: Rc<RefCell<ClockState>>,
}

impl VirtualClock {
    pub fn pending(&self) -> usize {
        self.state.borrow().pending.len()
    }

    pub fn advance(&self, millis: u64) {
        let target = self.state.borrow().now + millis;

        loop {
            let next = {
                let mut state = self.state.borrow_mut();
                let position = state
                    .pending
                    .iter()
                    .enumerate()
                    .filter(|(_, task)| task.due <= target)
                    .min_by_key(|(_, task)| (task.due, task.id))
                    .map(|(position, _)| position);
                position.map(|position| {
                    let task = state.pending.remove(position);
                    state.now = task.due;
                    task
                })
            };

            match next {
                Some(task) => (task.task)(),
                None => break,
            }
        }

        self.state.borrow_mut().now = target;
    }
}

impl Scheduler for VirtualClock {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> TaskHandle {
        let mut state = self.state.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;
        let due = state.now + u64::from(delay_ms);
        state.pending.push(PendingTask { id, due, task });

        let shared = self.state.clone();
        TaskHandle::new(move || shared.borrow_mut().pending.retain(|task| task.id != id))
    }
}

#[derive(Default)]
pub struct RecordingIcons {
    full: Cell<usize>,
    scoped: Cell<usize>,
}

impl RecordingIcons {
    pub fn full_renders(&self) -> usize {
        self.full.get()
    }

    pub fn scoped_renders(&self) -> usize {
        self.scoped.get()
    }
}

impl<E> IconRenderer<E> for RecordingIcons {
    fn render_all(&self) {
        self.full.set(self.full.get() + 1);
    }

    fn render_within(&self, _node: &E) {
        self.scoped.set(self.scoped.get() + 1);
    }
}

pub struct FailingPreferences;

impl PreferenceStore for FailingPreferences {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), InteractionError> {
        Err(InteractionError::Storage("quota exceeded".to_string()))
    }
}

pub struct FakeClipboard {
    failure: Option<String>,
    written: RefCell<Vec<String>>,
}

impl FakeClipboard {
    pub fn working() -> Self {
        Self {
            failure: None,
            written: RefCell::new(Vec::new()),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            failure: Some(reason.to_string()),
            written: RefCell::new(Vec::new()),
        }
    }

    pub fn written(&self) -> Vec<String> {
        self.written.borrow().clone()
    }
}

impl ClipboardWriter for FakeClipboard {
    fn write_text(&self, text: &str) -> Result<(), InteractionError> {
        if let Some(reason) = &self.failure {
            return Err(InteractionError::Clipboard(reason.clone()));
        }
        self.written.borrow_mut().push(text.to_string());
        Ok(())
    }
}

pub struct FakeLocator {
    ids: Vec<String>,
    scrolled: RefCell<Vec<String>>,
}

impl FakeLocator {
    pub fn with_ids(ids: &[&str]) -> Self {
        Self {
            ids: ids.iter().map(|id| id.to_string()).collect(),
            scrolled: RefCell::new(Vec::new()),
        }
    }

    pub fn scrolled(&self) -> Vec<String> {
        self.scrolled.borrow().clone()
    }
}

impl SectionLocator for FakeLocator {
    fn scroll_to(&self, id: &str) -> bool {
        if !self.ids.iter().any(|known| known == id) {
            return false;
        }
        self.scrolled.borrow_mut().push(id.to_string());
        true
    }
}

#[derive(Default)]
pub struct RecordingObserver {
    observed: Cell<usize>,
}

impl RecordingObserver {
    pub fn observed(&self) -> usize {
        self.observed.get()
    }
}

impl<E> VisibilityObserver<E> for RecordingObserver {
    fn observe(&self, _target: &E) {
        self.observed.set(self.observed.get() + 1);
    }
}
