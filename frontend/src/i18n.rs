use std::collections::HashMap;
use std::rc::Rc;

use log::error;
use serde_json::Value;
use thiserror::Error;

use crate::language::{LanguageEntry, FALLBACK_LANGUAGE, LANGUAGES};

const BUILTIN_LOCALES: [(&str, &str); 3] = [
    ("en", include_str!("../locales/en.json")),
    ("de", include_str!("../locales/de.json")),
    ("uk", include_str!("../locales/uk.json")),
];

#[derive(Debug, Error)]
pub enum I18nError {
    #[error("locale {code} is not valid JSON: {source}")]
    InvalidLocale {
        code: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Translation tables keyed by language code.
///
/// Lookups never fail: a missing key falls back to English and then to the
/// key itself.
#[derive(Debug, Default, PartialEq)]
pub struct Translations {
    tables: HashMap<String, Value>,
}

impl Translations {
    /// Tables bundled into the binary. A table that does not parse is logged
    /// and left out, so its language falls back to English.
    pub fn builtin() -> Self {
        let mut translations = Translations::default();
        for (code, source) in BUILTIN_LOCALES {
            if let Err(e) = translations.insert_json(code, source) {
                error!("{}", e);
            }
        }
        translations
    }

    pub fn insert_json(&mut self, code: &str, source: &str) -> Result<(), I18nError> {
        let table = serde_json::from_str(source).map_err(|source| I18nError::InvalidLocale {
            code: code.to_string(),
            source,
        })?;
        self.tables.insert(code.to_string(), table);
        Ok(())
    }

    pub fn t(&self, lang: &str, key: &str) -> String {
        self.lookup_text(lang, key).unwrap_or_else(|| key.to_string())
    }

    pub fn t_or(&self, lang: &str, key: &str, default: &str) -> String {
        self.lookup_text(lang, key).unwrap_or_else(|| default.to_string())
    }

    pub fn t_list(&self, lang: &str, key: &str) -> Vec<String> {
        self.lookup(lang, key)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    fn lookup_text(&self, lang: &str, key: &str) -> Option<String> {
        self.lookup(lang, key)
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    fn lookup(&self, lang: &str, key: &str) -> Option<&Value> {
        find(self.tables.get(lang), key).or_else(|| find(self.tables.get(FALLBACK_LANGUAGE), key))
    }
}

/// Translations bound to the active language, shared with components through context.
#[derive(Clone, Debug, PartialEq)]
pub struct I18n {
    translations: Rc<Translations>,
    pub language: LanguageEntry,
}

impl I18n {
    pub fn new(translations: Rc<Translations>, language: LanguageEntry) -> Self {
        Self {
            translations,
            language,
        }
    }

    pub fn t(&self, key: &str) -> String {
        self.translations.t(self.language.code, key)
    }

    pub fn t_or(&self, key: &str, default: &str) -> String {
        self.translations.t_or(self.language.code, key, default)
    }

    pub fn t_list(&self, key: &str) -> Vec<String> {
        self.translations.t_list(self.language.code, key)
    }
}

impl Default for I18n {
    fn default() -> Self {
        I18n::new(Rc::new(Translations::builtin()), LANGUAGES[0])
    }
}

fn find<'a>(table: Option<&'a Value>, key: &str) -> Option<&'a Value> {
    key.split('.')
        .try_fold(table?, |node, segment| node.get(segment))
}
