use crate::element::{PageElement, CLASS_VISIBLE};
use std::cell::RefCell;

pub const STAGGER_SELECTOR: &str = ".section-stagger > *";
const SECTION_ROOT_MARGIN: &str = "0px 0px -50px 0px";
const NO_ROOT_MARGIN: &str = "0px";
const RATIO_EPSILON: f64 = 1e-6;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealKind {
    Reveal,
    SectionScroll,
}

impl RevealKind {
    pub fn selector(self) -> &'static str {
        match self {
            Self::Reveal => ".reveal",
            Self::SectionScroll => ".section-scroll",
        }
    }

    pub fn root_margin(self) -> &'static str {
        match self {
            Self::Reveal => NO_ROOT_MARGIN,
            Self::SectionScroll => SECTION_ROOT_MARGIN,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct WatchOptions {
    pub threshold: f64,
    pub root_margin: &'static str,
}

pub struct VisibilityEntry<E> {
    pub target: E,
    pub is_intersecting: bool,
    pub ratio: f64,
}

pub trait VisibilityObserver<E> {
    fn observe(&self, target: &E);
}

pub fn stagger_delay(index: usize) -> String {
    format!("{}s", (index + 1) as f64 / 10.0)
}

/// One-shot reveal: once visible, an element stays visible. Targets are
/// left under observation after they trigger.
pub struct RevealTrigger<E> {
    kind: RevealKind,
    threshold: f64,
    staggered: RefCell<Vec<E>>,
}

impl<E: PageElement + PartialEq> RevealTrigger<E> {
    pub fn new(kind: RevealKind, threshold: f64) -> Self {
        Self {
            kind,
            threshold,
            staggered: RefCell::new(Vec::new()),
        }
    }

    pub fn options(&self) -> WatchOptions {
        WatchOptions {
            threshold: self.threshold,
            root_margin: self.kind.root_margin(),
        }
    }

    pub fn watch(&self, observer: &dyn VisibilityObserver<E>, targets: &[E]) -> usize {
        for target in targets {
            observer.observe(target);
        }
        targets.len()
    }

    /// Returns true when the entry changed its target: newly visible, or
    /// staggered for the first time.
    pub fn handle(&self, entry: &VisibilityEntry<E>) -> bool {
        if !entry.is_intersecting || entry.ratio + RATIO_EPSILON < self.threshold {
            return false;
        }

        let target = &entry.target;
        let newly_visible = !target.has_class(CLASS_VISIBLE);
        target.add_class(CLASS_VISIBLE);

        let staggered = self.kind == RevealKind::SectionScroll && self.first_stagger(target);
        if staggered {
            for (index, child) in target.query_all(STAGGER_SELECTOR).iter().enumerate() {
                child.set_style("transition-delay", &stagger_delay(index));
            }
        }

        newly_visible || staggered
    }

    fn first_stagger(&self, target: &E) -> bool {
        let mut staggered = self.staggered.borrow_mut();
        if staggered.contains(target) {
            return false;
        }
        staggered.push(target.clone());
        true
    }
}
