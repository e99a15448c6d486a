//! Expiration date shown on the main screen: today plus five days, in the
//! locale's medium date style.

use chrono::{Days, NaiveDate};

use crate::locale::Locale;

/// Days until the offer expires
pub const EXPIRY_DAYS: u64 = 5;

/// `today` plus [`EXPIRY_DAYS`]
pub fn expiration_date(today: NaiveDate) -> NaiveDate {
    today
        .checked_add_days(Days::new(EXPIRY_DAYS))
        .unwrap_or(NaiveDate::MAX)
}

/// Regions where English dates put the month first
const MONTH_FIRST_REGIONS: &[&str] = &["US", "CA", "PH"];

/// Medium date style per language, and per region for English
fn date_pattern(locale: &Locale) -> &'static str {
    match locale.language() {
        "en" => match locale.region() {
            Some(region) if !MONTH_FIRST_REGIONS.contains(&region) => "%-d %b %Y",
            _ => "%b %-d, %Y",
        },
        "de" => "%d.%m.%Y",
        "ja" | "zh" | "ko" => "%Y/%m/%d",
        _ => "%-d %b %Y",
    }
}

fn chrono_locale(locale: &Locale) -> chrono::Locale {
    let language = locale.language();
    let candidates = [
        format!("{}_{}", language, locale.region_code()),
        format!("{}_{}", language, language.to_ascii_uppercase()),
    ];
    candidates
        .iter()
        .find_map(|name| chrono::Locale::try_from(name.as_str()).ok())
        .unwrap_or(chrono::Locale::en_US)
}

/// Format a date for `locale`, with localized month names
pub fn format_date(date: NaiveDate, locale: &Locale) -> String {
    let pattern = date_pattern(locale);
    let Some(midnight) = date.and_hms_opt(0, 0, 0) else {
        return date.to_string();
    };
    midnight
        .and_utc()
        .format_localized(pattern, chrono_locale(locale))
        .to_string()
}
