use crate::{element::PageElement, error::InteractionError, icons::IconRenderer, logging::EventLog};
use serde_json::json;
use std::{cell::RefCell, collections::HashMap, rc::Rc};

pub const THEME_KEY: &str = "theme";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Anything other than an explicit "light" resolves to dark.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("light") => Self::Light,
            _ => Self::Dark,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), InteractionError>;
}

/// Session-only store, used when the browser refuses local storage.
#[derive(Default)]
pub struct MemoryPreferences {
    values: RefCell<HashMap<String, String>>,
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), InteractionError> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

pub struct ThemeController<E: PageElement> {
    root: E,
    store: Rc<dyn PreferenceStore>,
    icons: Rc<dyn IconRenderer<E>>,
    log: EventLog,
}

impl<E: PageElement> ThemeController<E> {
    pub fn new(
        root: E,
        store: Rc<dyn PreferenceStore>,
        icons: Rc<dyn IconRenderer<E>>,
        log: EventLog,
    ) -> Self {
        Self {
            root,
            store,
            icons,
            log,
        }
    }

    pub fn set_theme(&self, theme: Theme) {
        self.root.add_class(theme.as_str());
        self.root.remove_class(theme.toggled().as_str());

        if let Err(err) = self.store.set(THEME_KEY, theme.as_str()) {
            self.log.warn(
                "theme.persist_failed",
                json!({ "theme": theme.as_str(), "error": err.to_string() }),
            );
        }
    }

    pub fn set_initial_theme(&self) -> Theme {
        let stored = self.store.get(THEME_KEY);
        let theme = Theme::from_stored(stored.as_deref());
        self.set_theme(theme);
        self.log.debug(
            "theme.initial",
            json!({ "theme": theme.as_str(), "stored": stored.is_some() }),
        );
        theme
    }

    /// Reads the theme off the root element, not the store.
    pub fn applied(&self) -> Theme {
        if self.root.has_class(Theme::Dark.as_str()) {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn toggle(&self) -> Theme {
        let next = self.applied().toggled();
        self.set_theme(next);
        self.icons.render_all();
        self.log.info("theme.toggled", json!({ "theme": next.as_str() }));
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{quiet_log, FakeElement, FailingPreferences, RecordingIcons};
    use pretty_assertions::assert_eq;

    fn build(
        store: Rc<dyn PreferenceStore>,
    ) -> (ThemeController<FakeElement>, FakeElement, Rc<RecordingIcons>) {
        let root = FakeElement::new("html");
        let icons = Rc::new(RecordingIcons::default());
        let controller = ThemeController::new(root.clone(), store, icons.clone(), quiet_log());
        (controller, root, icons)
    }

    #[test]
    fn initial_theme_defaults_to_dark_without_stored_value() {
        let store = Rc::new(MemoryPreferences::default());
        let (controller, root, _) = build(store.clone());

        assert_eq!(controller.set_initial_theme(), Theme::Dark);
        assert!(root.has_class("dark"));
        assert!(!root.has_class("light"));
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("dark"));
    }

    #[test]
    fn stored_light_survives_reload() {
        let store = Rc::new(MemoryPreferences::default());
        let (first, _, _) = build(store.clone());
        first.set_theme(Theme::Light);

        let (reloaded, root, _) = build(store);
        assert_eq!(reloaded.set_initial_theme(), Theme::Light);
        assert!(root.has_class("light"));
        assert!(!root.has_class("dark"));
    }

    #[test]
    fn unknown_stored_value_falls_back_to_dark() {
        let store = Rc::new(MemoryPreferences::default());
        store.set(THEME_KEY, "sepia").expect("memory store accepts writes");
        let (controller, _, _) = build(store);

        assert_eq!(controller.set_initial_theme(), Theme::Dark);
    }

    #[test]
    fn toggling_twice_restores_original_theme() {
        for start in [Theme::Light, Theme::Dark] {
            let (controller, root, icons) = build(Rc::new(MemoryPreferences::default()));
            controller.set_theme(start);

            controller.toggle();
            assert_eq!(controller.applied(), start.toggled());
            controller.toggle();

            assert_eq!(controller.applied(), start);
            assert!(root.has_class(start.as_str()));
            assert!(!root.has_class(start.toggled().as_str()));
            assert_eq!(icons.full_renders(), 2);
        }
    }

    #[test]
    fn toggle_follows_root_class_not_stored_value() {
        let store = Rc::new(MemoryPreferences::default());
        let (controller, root, _) = build(store.clone());
        controller.set_theme(Theme::Dark);

        // Markup drifted: the root shows light while storage still says dark.
        root.remove_class("dark");
        root.add_class("light");

        assert_eq!(controller.toggle(), Theme::Dark);
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("dark"));
    }

    #[test]
    fn failed_persist_still_applies_theme() {
        let (controller, root, _) = build(Rc::new(FailingPreferences));

        controller.set_theme(Theme::Light);

        assert!(root.has_class("light"));
        assert_eq!(controller.applied(), Theme::Light);
    }
}
