//! Internationalization (i18n) support
//!
//! Selects the language of user-facing messages.
//! Supported languages: English (en), Spanish (es), Hebrew (he)
//!
//! Number, currency and date formatting follow the full [`Locale`]; only
//! the message catalog is limited to the languages above.

use rust_i18n::set_locale;

use crate::locale::Locale;

/// Supported message languages
pub const SUPPORTED_LOCALES: &[&str] = &["en", "es", "he"];

/// Default message language when the locale's language is not supported
pub const DEFAULT_LOCALE: &str = "en";

/// Initialize the message language for the active locale
///
/// Falls back to English if the locale's language is not supported.
pub fn init_locale(locale: &Locale) {
    let lang = message_language(locale);
    tracing::debug!(%locale, lang, "selected message language");
    set_locale(lang);
}

/// Map a locale to a supported message language
pub fn message_language(locale: &Locale) -> &'static str {
    SUPPORTED_LOCALES
        .iter()
        .copied()
        .find(|lang| *lang == locale.language())
        .unwrap_or(DEFAULT_LOCALE)
}
