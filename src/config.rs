use log::Level;

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug  // Verbose reveal/poll tracing when running locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

pub const DEFAULT_REVEAL_THRESHOLD: f64 = 0.1;
pub const VISIBLE_CLASS: &str = "visible";
pub const REVEAL_KEY_ATTR: &str = "data-reveal-key";

/// Delay between cards that scroll into view together.
pub const CARD_STAGGER_MS: u32 = 100;
pub const SECTION_ROOT_MARGIN_BOTTOM_PX: i32 = -100;

pub const POLL_STORAGE_KEY: &str = "ecoaware_poll";

pub const COUNT_UP_DURATION_MS: u32 = 2000;
pub const COUNT_UP_FRAME_MS: u32 = 16;

pub const NAV_SCROLLED_AFTER_PX: f64 = 50.0;
pub const NAV_SPY_OFFSET_PX: f64 = 200.0;
pub const BACK_TO_TOP_AFTER_PX: f64 = 400.0;

pub const CONTACT_STATUS_CLEAR_MS: u32 = 3500;
