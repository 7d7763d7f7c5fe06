use crate::{
    clipboard::ClipboardWriter,
    element::PageElement,
    error::InteractionError,
    icons::IconRenderer,
    logging::{EventLog, LogLevel, LogSink},
    navigation::SectionLocator,
    reveal::{VisibilityEntry, VisibilityObserver, WatchOptions},
    schedule::{Scheduler, TaskHandle},
    scroll::{ScrollMetrics, SectionBand},
    theme::PreferenceStore,
    toast::ToastSurface,
};
use gloo::timers::callback::Timeout;
use js_sys::{Array, Date, Function, Object, Reflect};
use serde_json::json;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, Document, Element, HtmlDocument, HtmlElement, HtmlTextAreaElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition, Storage, Window,
};

const ICON_PLACEHOLDER_SELECTOR: &str = "[data-lucide]";

pub(crate) fn js_err(error: JsValue) -> String {
    if let Some(value) = error.as_string() {
        return value;
    }
    if let Ok(json) = js_sys::JSON::stringify(&error) {
        if let Some(value) = json.as_string() {
            return value;
        }
    }
    format!("{error:?}")
}

pub(crate) fn now_unix_millis() -> f64 {
    Date::now()
}

/// Minutes east of UTC for the visitor's current local time.
pub(crate) fn local_offset_minutes() -> i32 {
    -(Date::new_0().get_timezone_offset() as i32)
}

pub(crate) fn now_unix_seconds() -> u64 {
    (Date::now() / 1_000.0) as u64
}

#[derive(Clone, PartialEq)]
pub(crate) struct DomElement(pub HtmlElement);

impl DomElement {
    pub(crate) fn from_element(element: Element) -> Option<Self> {
        element.dyn_into::<HtmlElement>().ok().map(Self)
    }
}

impl PageElement for DomElement {
    fn add_class(&self, class: &str) {
        let _ = self.0.class_list().add_1(class);
    }

    fn remove_class(&self, class: &str) {
        let _ = self.0.class_list().remove_1(class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn set_style(&self, property: &str, value: &str) {
        let _ = self.0.style().set_property(property, value);
    }

    fn set_text(&self, text: &str) {
        self.0.set_text_content(Some(text));
    }

    fn query_all(&self, selector: &str) -> Vec<Self> {
        let Ok(nodes) = self.0.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|index| nodes.get(index))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .map(Self)
            .collect()
    }

    fn remove(&self) {
        self.0.remove();
    }
}

pub(crate) fn query_all(document: &Document, selector: &str) -> Vec<DomElement> {
    let Ok(nodes) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|index| nodes.get(index))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .map(DomElement)
        .collect()
}

pub(crate) fn query_one(document: &Document, selector: &str) -> Option<DomElement> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(DomElement::from_element)
}

pub(crate) fn by_id(document: &Document, id: &str) -> Option<DomElement> {
    document.get_element_by_id(id).and_then(DomElement::from_element)
}

pub(crate) fn scroll_metrics(win: &Window, document: &Document) -> ScrollMetrics {
    let offset = win.scroll_y().unwrap_or(0.0);
    let viewport_height = win
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(0.0);
    let document_height = document
        .document_element()
        .map(|root| f64::from(root.scroll_height()))
        .unwrap_or(0.0);

    ScrollMetrics {
        offset,
        viewport_height,
        document_height,
    }
}

pub(crate) fn section_bands(document: &Document) -> Vec<SectionBand> {
    query_all(document, "section[id]")
        .into_iter()
        .map(|section| SectionBand {
            id: section.0.id(),
            top: f64::from(section.0.offset_top()),
            height: f64::from(section.0.client_height()),
        })
        .collect()
}

pub(crate) struct LocalStoragePreferences {
    storage: Storage,
}

impl LocalStoragePreferences {
    pub(crate) fn open() -> Option<Self> {
        let storage = window()?.local_storage().ok().flatten()?;
        Some(Self { storage })
    }
}

impl PreferenceStore for LocalStoragePreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), InteractionError> {
        self.storage
            .set_item(key, value)
            .map_err(|err| InteractionError::Storage(js_err(err)))
    }
}

/// Copies through a temporary textarea and `execCommand("copy")`, which
/// also works on pages served without a secure context.
pub(crate) struct LegacyClipboard {
    document: Document,
}

impl LegacyClipboard {
    pub(crate) fn new(document: Document) -> Self {
        Self { document }
    }
}

impl ClipboardWriter for LegacyClipboard {
    fn write_text(&self, text: &str) -> Result<(), InteractionError> {
        let html_document = self
            .document
            .clone()
            .dyn_into::<HtmlDocument>()
            .map_err(|_| InteractionError::Unavailable("HTMLDocument"))?;
        let body = self
            .document
            .body()
            .ok_or(InteractionError::Unavailable("document.body"))?;
        let textarea = self
            .document
            .create_element("textarea")
            .map_err(|err| InteractionError::Js(js_err(err)))?
            .dyn_into::<HtmlTextAreaElement>()
            .map_err(|_| InteractionError::Unavailable("HTMLTextAreaElement"))?;

        textarea.set_value(text);
        body.append_child(&textarea)
            .map_err(|err| InteractionError::Js(js_err(err)))?;
        let _ = textarea.focus();
        textarea.select();

        let copied = html_document.exec_command("copy");
        textarea.remove();

        match copied {
            Ok(true) => Ok(()),
            Ok(false) => Err(InteractionError::Clipboard("copy command was rejected".to_string())),
            Err(err) => Err(InteractionError::Clipboard(js_err(err))),
        }
    }
}

pub(crate) struct GlooScheduler;

impl Scheduler for GlooScheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> TaskHandle {
        let id = Timeout::new(delay_ms, task).forget();

        TaskHandle::new(move || {
            if let (Some(win), Some(id)) = (window(), id.as_f64()) {
                win.clear_timeout_with_handle(id as i32);
            }
        })
    }
}

pub(crate) struct ConsoleSink;

impl LogSink for ConsoleSink {
    fn write(&self, level: LogLevel, line: &str) {
        let line = JsValue::from_str(line);
        match level {
            LogLevel::Error => web_sys::console::error_1(&line),
            LogLevel::Warn => web_sys::console::warn_1(&line),
            LogLevel::Debug | LogLevel::Info => web_sys::console::log_1(&line),
        }
    }
}

pub(crate) struct LucideIcons {
    log: EventLog,
}

impl LucideIcons {
    pub(crate) fn new(log: EventLog) -> Self {
        Self { log }
    }

    fn create_icons(&self, options: Option<&JsValue>) -> Result<(), InteractionError> {
        let lucide = Reflect::get(&js_sys::global(), &JsValue::from_str("lucide"))
            .map_err(|err| InteractionError::Js(js_err(err)))?;
        if lucide.is_undefined() || lucide.is_null() {
            return Err(InteractionError::Unavailable("lucide"));
        }

        let create_icons = Reflect::get(&lucide, &JsValue::from_str("createIcons"))
            .map_err(|err| InteractionError::Js(js_err(err)))?;
        let Some(create_icons) = create_icons.dyn_ref::<Function>() else {
            return Err(InteractionError::Unavailable("lucide.createIcons"));
        };

        let called = match options {
            Some(options) => create_icons.call1(&lucide, options),
            None => create_icons.call0(&lucide),
        };
        called
            .map(|_| ())
            .map_err(|err| InteractionError::Js(js_err(err)))
    }

    fn report(&self, result: Result<(), InteractionError>) {
        if let Err(err) = result {
            self.log
                .debug("icons.render_skipped", json!({ "error": err.to_string() }));
        }
    }
}

impl IconRenderer<DomElement> for LucideIcons {
    fn render_all(&self) {
        let result = self.create_icons(None);
        self.report(result);
    }

    fn render_within(&self, node: &DomElement) {
        let placeholders = node.query_all(ICON_PLACEHOLDER_SELECTOR);
        if placeholders.is_empty() {
            return;
        }

        let nodes: Array = placeholders.iter().map(|el| JsValue::from(el.0.clone())).collect();
        let options = Object::new();
        let result = Reflect::set(&options, &JsValue::from_str("nodes"), &nodes)
            .map_err(|err| InteractionError::Js(js_err(err)))
            .and_then(|_| self.create_icons(Some(&options.into())));
        self.report(result);
    }
}

pub(crate) struct DomToastSurface {
    document: Document,
    container: HtmlElement,
}

impl DomToastSurface {
    pub(crate) fn new(document: Document, container: DomElement) -> Self {
        Self {
            document,
            container: container.0,
        }
    }

    fn create(&self, tag: &str) -> Option<HtmlElement> {
        self.document
            .create_element(tag)
            .ok()?
            .dyn_into::<HtmlElement>()
            .ok()
    }
}

impl ToastSurface<DomElement> for DomToastSurface {
    fn present(&self, class_name: &str, icon: Option<&str>, message: &str) -> Option<DomElement> {
        let toast = self.create("div")?;
        toast.set_class_name(class_name);

        if let Some(icon) = icon {
            let glyph = self.create("i")?;
            glyph.set_attribute("data-lucide", icon).ok()?;
            glyph.set_class_name("w-5 h-5");
            toast.append_child(&glyph).ok()?;
        }

        let text = self.create("span")?;
        text.set_text_content(Some(message));
        toast.append_child(&text).ok()?;

        self.container.append_child(&toast).ok()?;
        Some(DomElement(toast))
    }
}

pub(crate) struct DocumentLocator {
    document: Document,
}

impl DocumentLocator {
    pub(crate) fn new(document: Document) -> Self {
        Self { document }
    }
}

impl SectionLocator for DocumentLocator {
    fn scroll_to(&self, id: &str) -> bool {
        let Some(target) = self.document.get_element_by_id(id) else {
            return false;
        };

        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Start);
        target.scroll_into_view_with_scroll_into_view_options(&options);
        true
    }
}

/// Wraps a browser `IntersectionObserver`. The callback closure is leaked
/// on purpose: watchers live for the page session.
pub(crate) struct WebVisibilityObserver {
    observer: IntersectionObserver,
}

impl WebVisibilityObserver {
    pub(crate) fn new(
        options: &WatchOptions,
        mut on_entry: impl FnMut(VisibilityEntry<DomElement>) + 'static,
    ) -> Result<Self, InteractionError> {
        let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, _observer: IntersectionObserver| {
                for value in entries.iter() {
                    let entry: IntersectionObserverEntry = value.unchecked_into();
                    let Some(target) = DomElement::from_element(entry.target()) else {
                        continue;
                    };
                    on_entry(VisibilityEntry {
                        target,
                        is_intersecting: entry.is_intersecting(),
                        ratio: entry.intersection_ratio(),
                    });
                }
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(options.root_margin);

        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
                .map_err(|err| InteractionError::Js(js_err(err)))?;
        callback.forget();

        Ok(Self { observer })
    }
}

impl VisibilityObserver<DomElement> for WebVisibilityObserver {
    fn observe(&self, target: &DomElement) {
        self.observer.observe(&target.0);
    }
}
