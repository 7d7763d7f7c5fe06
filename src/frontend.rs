use crate::{
    clipboard::CopyAction,
    config::InteractionConfig,
    element::PageElement,
    filter::FilterController,
    footer::FooterStamp,
    icons::IconRenderer,
    logging::EventLog,
    navigation::{intercepts_click, navigate},
    reveal::{RevealKind, RevealTrigger},
    scroll::ScrollStateMapper,
    shortcuts::{is_theme_shortcut, KeyPress},
    theme::{MemoryPreferences, PreferenceStore, ThemeController},
    toast::{ToastNotifier, ToastSurface},
    web::{
        by_id, local_offset_minutes, now_unix_millis, now_unix_seconds, query_all, query_one,
        scroll_metrics, section_bands, ConsoleSink, DocumentLocator, DomElement, DomToastSurface,
        GlooScheduler, LegacyClipboard, LocalStoragePreferences, LucideIcons,
        WebVisibilityObserver,
    },
};
use gloo::events::{EventListener, EventListenerOptions};
use serde_json::json;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{window, Document, KeyboardEvent, Window};

type Icons = Rc<dyn IconRenderer<DomElement>>;

pub fn run() {
    let Some(document) = window().and_then(|w| w.document()) else {
        return;
    };

    if document.ready_state() == "loading" {
        EventListener::once(&document, "DOMContentLoaded", |_| init()).forget();
    } else {
        init();
    }
}

fn init() {
    let Some(win) = window() else {
        return;
    };
    let Some(document) = win.document() else {
        return;
    };
    let Some(root) = document
        .document_element()
        .and_then(DomElement::from_element)
    else {
        return;
    };

    let config = InteractionConfig::from_lookup(|name| root.attribute(name));
    let log = EventLog::new(config.log_level, Rc::new(ConsoleSink), now_unix_seconds);
    let icons: Icons = Rc::new(LucideIcons::new(log.clone()));
    icons.render_all();

    let scroll = wire_scroll(&win, &document, &config);
    wire_navigation(&document, scroll.nav_links(), &log);
    scroll.highlight_from_hash(&win.location().hash().unwrap_or_default());

    wire_reveal(&document, &config, &log);
    wire_theme(&win, &document, root, icons.clone(), &log);

    let surface = by_id(&document, "toast-container").map(|container| {
        Rc::new(DomToastSurface::new(document.clone(), container)) as Rc<dyn ToastSurface<DomElement>>
    });
    let toasts = Rc::new(ToastNotifier::new(
        surface,
        Rc::new(GlooScheduler),
        icons,
        config.toast_duration_ms,
        log.clone(),
    ));
    wire_copy_buttons(&document, toasts, &log);

    let stamp = FooterStamp::from_unix_millis(now_unix_millis() as i64, local_offset_minutes());
    if let Some(stamp) = stamp {
        stamp.apply(
            by_id(&document, "footer-year").as_ref(),
            by_id(&document, "last-deploy").as_ref(),
        );
    }

    let filters_active = wire_filters(&document, &log);

    log.info(
        "page.ready",
        json!({
            "toast_duration_ms": config.toast_duration_ms,
            "filters": filters_active,
        }),
    );
}

fn wire_scroll(
    win: &Window,
    document: &Document,
    config: &InteractionConfig,
) -> Rc<ScrollStateMapper<DomElement>> {
    let mapper = Rc::new(ScrollStateMapper::new(
        query_one(document, "header"),
        query_one(document, ".scroll-progress"),
        query_all(document, ".nav-link"),
        config.scroll_threshold_px,
        config.nav_offset_px,
    ));

    let handler = mapper.clone();
    let win_handle = win.clone();
    let doc_handle = document.clone();
    EventListener::new(win, "scroll", move |_| {
        let metrics = scroll_metrics(&win_handle, &doc_handle);
        handler.on_scroll(metrics, &section_bands(&doc_handle));
    })
    .forget();

    mapper
}

fn wire_navigation(document: &Document, links: &[DomElement], log: &EventLog) {
    let locator = Rc::new(DocumentLocator::new(document.clone()));

    for link in links {
        let locator = locator.clone();
        let log = log.clone();
        let href_source = link.clone();
        EventListener::new_with_options(
            &link.0,
            "click",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                let href = href_source.attribute("href");
                if !intercepts_click(href.as_deref()) {
                    return;
                }
                event.prevent_default();
                navigate(locator.as_ref(), href.as_deref(), &log);
            },
        )
        .forget();
    }
}

fn wire_reveal(document: &Document, config: &InteractionConfig, log: &EventLog) {
    for kind in [RevealKind::SectionScroll, RevealKind::Reveal] {
        let targets = query_all(document, kind.selector());
        if targets.is_empty() {
            continue;
        }

        let trigger = Rc::new(RevealTrigger::<DomElement>::new(kind, config.reveal_threshold));
        let handler = trigger.clone();
        match WebVisibilityObserver::new(&trigger.options(), move |entry| {
            handler.handle(&entry);
        }) {
            Ok(observer) => {
                let watched = trigger.watch(&observer, &targets);
                log.debug(
                    "reveal.watching",
                    json!({ "selector": kind.selector(), "count": watched }),
                );
            }
            Err(err) => log.warn(
                "reveal.observer_failed",
                json!({ "selector": kind.selector(), "error": err.to_string() }),
            ),
        }
    }
}

fn wire_theme(win: &Window, document: &Document, root: DomElement, icons: Icons, log: &EventLog) {
    let store: Rc<dyn PreferenceStore> = match LocalStoragePreferences::open() {
        Some(store) => Rc::new(store),
        None => {
            log.warn("theme.storage_unavailable", json!({ "fallback": "memory" }));
            Rc::new(MemoryPreferences::default())
        }
    };

    let controller = Rc::new(ThemeController::new(root, store, icons, log.clone()));
    controller.set_initial_theme();

    if let Some(toggle) = by_id(document, "theme-toggle") {
        let controller = controller.clone();
        EventListener::new(&toggle.0, "click", move |_| {
            controller.toggle();
        })
        .forget();
    }

    let doc_handle = document.clone();
    EventListener::new(win, "keydown", move |event| {
        let Some(key) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        let press = KeyPress {
            key: key.key(),
            ctrl: key.ctrl_key(),
            meta: key.meta_key(),
            alt: key.alt_key(),
            focus_tag: doc_handle.active_element().map(|el| el.tag_name()),
        };
        if is_theme_shortcut(&press) {
            controller.toggle();
        }
    })
    .forget();
}

fn wire_copy_buttons(document: &Document, toasts: Rc<ToastNotifier<DomElement>>, log: &EventLog) {
    let action = Rc::new(CopyAction::new(
        Rc::new(LegacyClipboard::new(document.clone())),
        toasts,
        log.clone(),
    ));

    for button in query_all(document, ".copy-button") {
        let action = action.clone();
        let source = button.clone();
        EventListener::new(&button.0, "click", move |_| {
            action.copy_from(&source);
        })
        .forget();
    }
}

fn wire_filters(document: &Document, log: &EventLog) -> bool {
    let chips = query_all(document, ".filter-chip");
    let grid = by_id(document, "project-grid");
    let Some(controller) = FilterController::new(grid.as_ref(), chips.clone(), log.clone()) else {
        return false;
    };
    let controller = Rc::new(controller);

    for (index, chip) in chips.iter().enumerate() {
        let controller = controller.clone();
        EventListener::new(&chip.0, "click", move |_| {
            controller.select(index);
        })
        .forget();
    }

    controller.chip_count() > 0
}
