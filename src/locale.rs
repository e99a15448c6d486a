//! Locale identification and numeric grammar
//!
//! Parses BCP 47 (`es-ES`) and POSIX (`es_ES.UTF-8`) identifiers into a
//! [`Locale`], detects the device locale and exposes the decimal and grouping
//! symbols used to format and parse numbers.

use num_format::{Locale as NumLocale, ToFormattedString};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Locale used when the device does not report a usable one
pub const DEFAULT_LOCALE: &str = "en-US";

/// Legacy ISO 639 codes still reported by some platforms
const LEGACY_LANGUAGES: &[(&str, &str)] = &[("iw", "he"), ("in", "id"), ("ji", "yi")];

/// A language plus an optional region
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale {
    language: String,
    region: Option<String>,
}

impl Locale {
    /// Build a locale from already separated parts
    pub fn new(language: &str, region: Option<&str>) -> Result<Self> {
        let language = normalize_language(language)
            .ok_or_else(|| Error::InvalidLocale(language.to_string()))?;
        let region = match region {
            Some(r) => Some(
                normalize_region(r).ok_or_else(|| Error::InvalidLocale(r.to_string()))?,
            ),
            None => None,
        };
        Ok(Self { language, region })
    }

    /// Parse an identifier such as `es-ES`, `he_IL.UTF-8` or `zh-Hant-TW`
    pub fn parse(tag: &str) -> Result<Self> {
        let trimmed = tag.trim();
        // Strip POSIX codeset and modifier: "de_DE.UTF-8@euro" -> "de_DE"
        let base = trimmed
            .split(['.', '@'])
            .next()
            .unwrap_or_default();

        if base.eq_ignore_ascii_case("C") || base.eq_ignore_ascii_case("POSIX") {
            return Self::parse(DEFAULT_LOCALE);
        }

        let mut subtags = base.split(['-', '_']);
        let language = subtags
            .next()
            .and_then(normalize_language)
            .ok_or_else(|| Error::InvalidLocale(tag.to_string()))?;

        // The region is the first two-letter or three-digit subtag; scripts
        // and variants are skipped.
        let region = subtags.find_map(normalize_region);

        Ok(Self { language, region })
    }

    /// Detect the device locale, falling back to [`DEFAULT_LOCALE`]
    pub fn detect() -> Self {
        match sys_locale::get_locale() {
            Some(tag) => Self::parse(&tag).unwrap_or_else(|err| {
                tracing::debug!(%tag, %err, "unusable system locale, using default");
                Self::default()
            }),
            None => Self::default(),
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// The region code used to select a currency; empty when the locale has
    /// no region.
    pub fn region_code(&self) -> &str {
        self.region.as_deref().unwrap_or("")
    }

    /// Decimal and grouping symbols for this locale
    pub fn number_symbols(&self) -> NumberSymbols {
        NumberSymbols::from_num_locale(&self.num_locale())
    }

    /// Format an integer with this locale's digit grouping
    ///
    /// `u128` covers every whole part a `Decimal` amount can have.
    pub fn format_integer(&self, value: u128) -> String {
        value.to_formatted_string(&self.num_locale())
    }

    fn num_locale(&self) -> NumLocale {
        let full = self.to_string();
        NumLocale::from_name(&full)
            .or_else(|_| NumLocale::from_name(&self.language))
            .unwrap_or(NumLocale::en)
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            region: Some("US".to_string()),
        }
    }
}

impl FromStr for Locale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.region {
            Some(region) => write!(f, "{}-{}", self.language, region),
            None => f.write_str(&self.language),
        }
    }
}

/// The characters that make up a locale's numeric grammar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberSymbols {
    pub decimal: String,
    pub grouping: String,
}

impl NumberSymbols {
    fn from_num_locale(locale: &NumLocale) -> Self {
        Self {
            decimal: locale.decimal().to_string(),
            grouping: locale.separator().to_string(),
        }
    }

    /// Whether the grouping separator is a kind of space, in which case any
    /// space character is accepted on input.
    pub fn groups_with_space(&self) -> bool {
        self.grouping.chars().all(is_space_separator) && !self.grouping.is_empty()
    }
}

impl Default for NumberSymbols {
    fn default() -> Self {
        Self::from_num_locale(&NumLocale::en)
    }
}

pub(crate) fn is_space_separator(c: char) -> bool {
    matches!(c, ' ' | '\u{00a0}' | '\u{202f}')
}

fn normalize_language(raw: &str) -> Option<String> {
    let len = raw.len();
    if !(2..=3).contains(&len) || !raw.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let lower = raw.to_ascii_lowercase();
    let mapped = LEGACY_LANGUAGES
        .iter()
        .find(|(legacy, _)| *legacy == lower)
        .map(|(_, modern)| modern.to_string());
    Some(mapped.unwrap_or(lower))
}

fn normalize_region(raw: &str) -> Option<String> {
    let alpha = raw.len() == 2 && raw.chars().all(|c| c.is_ascii_alphabetic());
    let numeric = raw.len() == 3 && raw.chars().all(|c| c.is_ascii_digit());
    (alpha || numeric).then(|| raw.to_ascii_uppercase())
}
