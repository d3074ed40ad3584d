//! Internationalization (i18n) module.
//!
//! User-facing replies, embedded at compile time and resolved by dotted key.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde_json::Value;
use tracing::warn;

/// Locale used when none is configured or a key is missing.
pub const DEFAULT_LOCALE: &str = "zh-TW";

/// Global translation store: LangCode -> Key -> Text
static TRANSLATIONS: OnceLock<HashMap<String, Value>> = OnceLock::new();

fn load() -> HashMap<String, Value> {
    let bundles = [
        ("zh-TW", include_str!("zh-TW.json")),
        ("en", include_str!("en.json")),
    ];

    let mut map = HashMap::new();
    for (lang, raw) in bundles {
        match serde_json::from_str(raw) {
            Ok(val) => {
                map.insert(lang.to_string(), val);
            }
            Err(e) => warn!("Skipping broken {} bundle: {}", lang, e),
        }
    }
    map
}

/// Load the bundles eagerly (optional; the first lookup loads them too).
pub fn init() {
    TRANSLATIONS.get_or_init(load);
}

/// Whether a bundle exists for `lang`.
pub fn is_supported(lang: &str) -> bool {
    TRANSLATIONS.get_or_init(load).contains_key(lang)
}

/// Get text for a key in a specific language.
/// Supports nested keys via dot notation, e.g., "photo.received".
pub fn get_text(lang: &str, key: &str) -> String {
    let store = TRANSLATIONS.get_or_init(load);

    // Try requested language
    if let Some(text) = store.get(lang).and_then(|val| resolve_key(val, key)) {
        return text;
    }

    // Fallback to the default bundle
    if lang != DEFAULT_LOCALE
        && let Some(text) = store.get(DEFAULT_LOCALE).and_then(|val| resolve_key(val, key))
    {
        return text;
    }

    // Key not found
    key.to_string()
}

fn resolve_key(val: &Value, key: &str) -> Option<String> {
    let mut current = val;
    for part in key.split('.') {
        current = current.get(part)?;
    }
    current.as_str().map(|s| s.to_string())
}
