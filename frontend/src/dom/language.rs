use log::warn;
use web_sys::Window;

use crate::config::LANGUAGE_STORAGE_KEY;
use crate::language::primary_subtag;

/// Stored choice first, then the browser's UI language, as a primary subtag.
pub fn preferred_language() -> Option<String> {
    let window = web_sys::window()?;
    stored_language(&window)
        .or_else(|| window.navigator().language())
        .map(|tag| primary_subtag(&tag))
}

fn stored_language(window: &Window) -> Option<String> {
    window
        .local_storage()
        .ok()
        .flatten()?
        .get_item(LANGUAGE_STORAGE_KEY)
        .ok()
        .flatten()
}

pub fn remember_language(code: &str) {
    let Some(storage) = web_sys::window().and_then(|window| window.local_storage().ok().flatten()) else {
        return;
    };
    if let Err(e) = storage.set_item(LANGUAGE_STORAGE_KEY, code) {
        warn!("could not store language choice: {:?}", e);
    }
}

/// Sets `<html lang>` to the active language.
pub fn apply_document_language(code: &str) {
    let root = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.document_element());
    if let Some(root) = root {
        if let Err(e) = root.set_attribute("lang", code) {
            warn!("could not set document language: {:?}", e);
        }
    }
}
