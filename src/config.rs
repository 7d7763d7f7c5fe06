use crate::logging::LogLevel;

const DEFAULT_TOAST_DURATION_MS: u32 = 3_000;
const DEFAULT_SCROLL_THRESHOLD_PX: u32 = 50;
const DEFAULT_NAV_OFFSET_PX: u32 = 100;
const DEFAULT_REVEAL_THRESHOLD: f64 = 0.1;
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

const TOAST_DURATION_MS_BOUNDS: (u32, u32) = (500, 60_000);
const SCROLL_THRESHOLD_PX_BOUNDS: (u32, u32) = (0, 2_000);
const NAV_OFFSET_PX_BOUNDS: (u32, u32) = (0, 2_000);
const REVEAL_THRESHOLD_BOUNDS: (f64, f64) = (0.0, 1.0);

pub const ATTR_TOAST_DURATION_MS: &str = "data-toast-duration-ms";
pub const ATTR_SCROLL_THRESHOLD: &str = "data-scroll-threshold";
pub const ATTR_NAV_OFFSET: &str = "data-nav-offset";
pub const ATTR_REVEAL_THRESHOLD: &str = "data-reveal-threshold";
pub const ATTR_LOG_LEVEL: &str = "data-log-level";

/// Tunables read from `data-*` attributes on the root element. Missing,
/// malformed, or out-of-range values fall back to the defaults.
#[derive(Clone, Debug, PartialEq)]
pub struct InteractionConfig {
    pub toast_duration_ms: u32,
    pub scroll_threshold_px: f64,
    pub nav_offset_px: f64,
    pub reveal_threshold: f64,
    pub log_level: LogLevel,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            toast_duration_ms: DEFAULT_TOAST_DURATION_MS,
            scroll_threshold_px: f64::from(DEFAULT_SCROLL_THRESHOLD_PX),
            nav_offset_px: f64::from(DEFAULT_NAV_OFFSET_PX),
            reveal_threshold: DEFAULT_REVEAL_THRESHOLD,
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

impl InteractionConfig {
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let toast_duration_ms = parse_u32_with_bounds(
            lookup(ATTR_TOAST_DURATION_MS),
            DEFAULT_TOAST_DURATION_MS,
            TOAST_DURATION_MS_BOUNDS,
        );
        let scroll_threshold_px = parse_u32_with_bounds(
            lookup(ATTR_SCROLL_THRESHOLD),
            DEFAULT_SCROLL_THRESHOLD_PX,
            SCROLL_THRESHOLD_PX_BOUNDS,
        );
        let nav_offset_px = parse_u32_with_bounds(
            lookup(ATTR_NAV_OFFSET),
            DEFAULT_NAV_OFFSET_PX,
            NAV_OFFSET_PX_BOUNDS,
        );
        let reveal_threshold = parse_f64_with_bounds(
            lookup(ATTR_REVEAL_THRESHOLD),
            DEFAULT_REVEAL_THRESHOLD,
            REVEAL_THRESHOLD_BOUNDS,
        );
        let log_level = lookup(ATTR_LOG_LEVEL)
            .as_deref()
            .and_then(LogLevel::parse)
            .unwrap_or(DEFAULT_LOG_LEVEL);

        Self {
            toast_duration_ms,
            scroll_threshold_px: f64::from(scroll_threshold_px),
            nav_offset_px: f64::from(nav_offset_px),
            reveal_threshold,
            log_level,
        }
    }
}

fn parse_u32_with_bounds(raw: Option<String>, default: u32, bounds: (u32, u32)) -> u32 {
    raw.and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_f64_with_bounds(raw: Option<String>, default: f64, bounds: (f64, f64)) -> f64 {
    raw.and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}
