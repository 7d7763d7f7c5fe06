use crate::element::{PageElement, CLASS_ACTIVE};

pub const CLASS_SCROLLED: &str = "scrolled";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollMetrics {
    pub offset: f64,
    pub viewport_height: f64,
    pub document_height: f64,
}

/// Unclamped percentage of the scrollable range covered so far. `None` when
/// the document does not scroll at all.
pub fn progress_percent(metrics: ScrollMetrics) -> Option<f64> {
    let total = metrics.document_height - metrics.viewport_height;
    if total <= 0.0 {
        return None;
    }

    Some(metrics.offset / total * 100.0)
}

#[derive(Clone, Debug, PartialEq)]
pub struct SectionBand {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl SectionBand {
    pub fn contains(&self, offset: f64, nav_offset: f64) -> bool {
        let start = self.top - nav_offset;
        offset >= start && offset < start + self.height
    }
}

/// Last band in document order containing `offset` wins.
pub fn active_section(bands: &[SectionBand], offset: f64, nav_offset: f64) -> Option<&str> {
    bands
        .iter()
        .rev()
        .find(|band| band.contains(offset, nav_offset))
        .map(|band| band.id.as_str())
}

pub struct ScrollStateMapper<E: PageElement> {
    header: Option<E>,
    progress_bar: Option<E>,
    nav_links: Vec<E>,
    scrolled_threshold: f64,
    nav_offset: f64,
}

impl<E: PageElement> ScrollStateMapper<E> {
    pub fn new(
        header: Option<E>,
        progress_bar: Option<E>,
        nav_links: Vec<E>,
        scrolled_threshold: f64,
        nav_offset: f64,
    ) -> Self {
        Self {
            header,
            progress_bar,
            nav_links,
            scrolled_threshold,
            nav_offset,
        }
    }

    pub fn nav_links(&self) -> &[E] {
        &self.nav_links
    }

    pub fn is_past_threshold(&self, offset: f64) -> bool {
        offset > self.scrolled_threshold
    }

    /// Applies one scroll sample and returns the id of the active section.
    pub fn on_scroll(&self, metrics: ScrollMetrics, sections: &[SectionBand]) -> Option<String> {
        if let (Some(bar), Some(progress)) = (&self.progress_bar, progress_percent(metrics)) {
            bar.set_style("width", &format!("{progress}%"));
        }

        if let Some(header) = &self.header {
            header.toggle_class(CLASS_SCROLLED, self.is_past_threshold(metrics.offset));
        }

        let active = active_section(sections, metrics.offset, self.nav_offset).map(str::to_string);
        let target = active.as_ref().map(|id| format!("#{id}"));

        for link in &self.nav_links {
            link.remove_class(CLASS_ACTIVE);
            if target.is_some() && link.attribute("href") == target {
                link.add_class(CLASS_ACTIVE);
            }
        }

        active
    }

    /// Marks the link matching the location hash on first load.
    pub fn highlight_from_hash(&self, hash: &str) {
        let current = if hash.is_empty() { "#" } else { hash };

        for link in &self.nav_links {
            if link.attribute("href").as_deref() == Some(current) {
                link.add_class(CLASS_ACTIVE);
            }
        }
    }
}
