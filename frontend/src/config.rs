use log::Level;

/// `localStorage` key holding the visitor's language choice.
pub const LANGUAGE_STORAGE_KEY: &str = "sprichweg.language";

pub const TELEGRAM_URL: &str = "https://t.me/sprichweg";

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug  // Verbose reveal/scroll traces while developing locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}
