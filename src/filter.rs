use crate::{
    element::{PageElement, CLASS_ACTIVE},
    logging::EventLog,
};
use serde_json::json;

pub const FILTER_ALL: &str = "all";
pub const FILTER_ATTRIBUTE: &str = "data-filter";
pub const TAGS_ATTRIBUTE: &str = "data-tags";
pub const CARD_SELECTOR: &str = ".project-card";
const DISPLAY_SHOWN: &str = "flex";
const DISPLAY_HIDDEN: &str = "none";

/// Splits a `data-tags` value into trimmed, case-folded labels.
pub fn parse_tags(raw: Option<&str>) -> Vec<String> {
    raw.map(|value| {
        value
            .split(',')
            .map(|tag| tag.trim().to_lowercase())
            .filter(|tag| !tag.is_empty())
            .collect()
    })
    .unwrap_or_default()
}

/// `filter` must already be case-folded.
pub fn card_matches(filter: &str, tags: &[String]) -> bool {
    filter == FILTER_ALL || tags.iter().any(|tag| tag == filter)
}

pub struct FilterController<E: PageElement> {
    chips: Vec<E>,
    cards: Vec<E>,
    log: EventLog,
}

impl<E: PageElement> FilterController<E> {
    /// `None` unless the grid exists and holds at least one card.
    pub fn new(grid: Option<&E>, chips: Vec<E>, log: EventLog) -> Option<Self> {
        let cards = grid?.query_all(CARD_SELECTOR);
        if cards.is_empty() {
            return None;
        }

        Some(Self { chips, cards, log })
    }

    pub fn chip_count(&self) -> usize {
        self.chips.len()
    }

    /// Activates the chip at `index` and returns how many cards are shown.
    pub fn select(&self, index: usize) -> usize {
        let Some(chip) = self.chips.get(index) else {
            return 0;
        };

        for other in &self.chips {
            other.remove_class(CLASS_ACTIVE);
        }
        chip.add_class(CLASS_ACTIVE);

        let filter = chip
            .attribute(FILTER_ATTRIBUTE)
            .map(|value| value.trim().to_lowercase())
            .unwrap_or_else(|| FILTER_ALL.to_string());

        let mut shown = 0;
        for card in &self.cards {
            let tags = parse_tags(card.attribute(TAGS_ATTRIBUTE).as_deref());
            if card_matches(&filter, &tags) {
                card.set_style("display", DISPLAY_SHOWN);
                shown += 1;
            } else {
                card.set_style("display", DISPLAY_HIDDEN);
            }
        }

        self.log.debug(
            "filter.applied",
            json!({ "filter": filter, "shown": shown, "total": self.cards.len() }),
        );
        shown
    }
}
