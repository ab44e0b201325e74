use log::info;
use thiserror::Error;

use crate::viewport::listeners::{Listeners, Subscription};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LanguageEntry {
    pub code: &'static str,
    pub display_name: &'static str,
    pub flag: &'static str,
}

pub const LANGUAGES: [LanguageEntry; 3] = [
    LanguageEntry {
        code: "en",
        display_name: "English",
        flag: "🇬🇧",
    },
    LanguageEntry {
        code: "de",
        display_name: "Deutsch",
        flag: "🇩🇪",
    },
    LanguageEntry {
        code: "uk",
        display_name: "Українська",
        flag: "🇺🇦",
    },
];

pub const FALLBACK_LANGUAGE: &str = "en";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LanguageError {
    #[error("language list is empty, there is nothing to cycle through")]
    EmptyLanguageList,
}

/// Reduces a BCP 47 tag such as `de-AT` to its lowercase primary subtag.
pub fn primary_subtag(tag: &str) -> String {
    tag.trim()
        .split(|c: char| c == '-' || c == '_')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}

/// Position in a fixed, non-empty language list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LanguageCycleState<'a> {
    entries: &'a [LanguageEntry],
    current: usize,
}

impl<'a> LanguageCycleState<'a> {
    /// Starts at the entry whose code equals `preferred`, otherwise at the first one.
    pub fn new(entries: &'a [LanguageEntry], preferred: Option<&str>) -> Result<Self, LanguageError> {
        if entries.is_empty() {
            return Err(LanguageError::EmptyLanguageList);
        }
        let current = preferred
            .and_then(|code| entries.iter().position(|entry| entry.code == code))
            .unwrap_or(0);
        Ok(Self { entries, current })
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> &'a LanguageEntry {
        &self.entries[self.current]
    }

    pub fn next(self) -> (Self, &'a LanguageEntry) {
        let current = (self.current + 1) % self.entries.len();
        let state = Self {
            entries: self.entries,
            current,
        };
        (state, state.current())
    }
}

/// Owns the page's language selection and tells listeners about every change.
pub struct LanguageCycler {
    state: LanguageCycleState<'static>,
    listeners: Listeners<LanguageEntry>,
}

impl LanguageCycler {
    pub fn new(entries: &'static [LanguageEntry], preferred: Option<&str>) -> Result<Self, LanguageError> {
        Ok(Self {
            state: LanguageCycleState::new(entries, preferred)?,
            listeners: Listeners::new(),
        })
    }

    pub fn current(&self) -> &'static LanguageEntry {
        self.state.current()
    }

    pub fn cycle(&mut self) -> &'static LanguageEntry {
        let (state, selected) = self.state.next();
        self.state = state;
        info!("language switched to {}", selected.code);
        self.listeners.emit(selected);
        selected
    }

    pub fn subscribe(&self, listener: impl Fn(&LanguageEntry) + 'static) -> Subscription {
        self.listeners.subscribe(listener)
    }
}
