use crate::logging::EventLog;
use serde_json::json;

/// Resolves in-page targets and scrolls them to the top of the viewport.
pub trait SectionLocator {
    fn scroll_to(&self, id: &str) -> bool;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavigationOutcome {
    Scrolled(String),
    TargetMissing,
    NotInPage,
}

/// Fragment id of an in-page href, e.g. `"#work"` -> `"work"`.
pub fn fragment_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Only in-page anchors are taken over; other links keep their default.
pub fn intercepts_click(href: Option<&str>) -> bool {
    href.is_some_and(|href| href.trim().starts_with('#'))
}

pub fn navigate(locator: &dyn SectionLocator, href: Option<&str>, log: &EventLog) -> NavigationOutcome {
    let outcome = match href.map(str::trim) {
        Some(href) if href.starts_with('#') => match fragment_id(href) {
            Some(id) if locator.scroll_to(id) => NavigationOutcome::Scrolled(id.to_string()),
            _ => NavigationOutcome::TargetMissing,
        },
        _ => NavigationOutcome::NotInPage,
    };

    let target = match &outcome {
        NavigationOutcome::Scrolled(id) => Some(id.as_str()),
        _ => None,
    };
    log.debug("nav.click", json!({ "href": href, "scrolled_to": target }));

    outcome
}
