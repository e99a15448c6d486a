//! Quantity input parsing
//!
//! Text typed by the user is read with the locale's numeric grammar,
//! truncated to a whole number and written back in canonical form.

use rust_i18n::t;

use crate::error::{Error, Result};
use crate::locale::{is_space_separator, Locale, NumberSymbols};

/// Quantity shown before the user has entered anything
pub const DEFAULT_QUANTITY: u32 = 1;

/// A successfully parsed quantity and its canonical display text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuantity {
    pub quantity: u32,
    pub formatted: String,
}

/// Parse `raw` as a quantity under `locale`
///
/// Accepts grouped digits (`1,234` in English, `1.234` in German) and an
/// optional fractional part, which is truncated.
pub fn parse_quantity(raw: &str, locale: &Locale) -> Result<ParsedQuantity> {
    let symbols = locale.number_symbols();
    let quantity = parse_with_symbols(raw, &symbols).ok_or_else(|| {
        tracing::warn!(input = raw, %locale, "rejected quantity input");
        Error::InvalidQuantityInput {
            input: raw.to_string(),
        }
    })?;

    Ok(ParsedQuantity {
        quantity,
        formatted: format_quantity(quantity, locale),
    })
}

/// Render a quantity with the locale's digit grouping
pub fn format_quantity(quantity: u32, locale: &Locale) -> String {
    locale.format_integer(u128::from(quantity))
}

fn parse_with_symbols(raw: &str, symbols: &NumberSymbols) -> Option<u32> {
    let text = raw.trim();
    let text = text.strip_prefix('+').unwrap_or(text);

    let (int_part, frac_part) = match text.split_once(symbols.decimal.as_str()) {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (text, None),
    };

    if let Some(frac) = frac_part {
        if !frac.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
    }

    let groups: Vec<&str> = if symbols.grouping.is_empty() {
        vec![int_part]
    } else if symbols.groups_with_space() {
        int_part.split(is_space_separator).collect()
    } else {
        int_part.split(symbols.grouping.as_str()).collect()
    };

    // Separators may only sit between digits
    if groups
        .iter()
        .any(|g| g.is_empty() || !g.chars().all(|c| c.is_ascii_digit()))
    {
        return None;
    }

    groups.concat().parse::<u32>().ok()
}

/// The quantity input field as owned by the caller
///
/// A commit either updates the quantity and text and clears the hint, or
/// shows the hint and leaves the quantity and text untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantityField {
    quantity: u32,
    text: String,
    hint: Option<String>,
}

impl QuantityField {
    pub fn new(locale: &Locale) -> Self {
        Self {
            quantity: DEFAULT_QUANTITY,
            text: format_quantity(DEFAULT_QUANTITY, locale),
            hint: None,
        }
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The validation hint, shown after a failed commit
    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    /// Handle the user finishing input in the field
    pub fn commit(&mut self, raw: &str, locale: &Locale) -> Result<u32> {
        match parse_quantity(raw, locale) {
            Ok(parsed) => {
                self.quantity = parsed.quantity;
                self.text = parsed.formatted;
                self.hint = None;
                Ok(self.quantity)
            }
            Err(err) => {
                self.reject(t!("quantity.hint").to_string());
                Err(err)
            }
        }
    }

    /// Show `hint` and keep the current quantity and text
    pub fn reject(&mut self, hint: String) {
        self.hint = Some(hint);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locale(tag: &str) -> Locale {
        Locale::parse(tag).unwrap()
    }

    #[test]
    fn test_parse_grouped_english() {
        let parsed = parse_quantity("1,234", &locale("en-US")).unwrap();
        assert_eq!(parsed.quantity, 1234);
        assert_eq!(parsed.formatted, "1,234");
    }

    #[test]
    fn test_parse_grouped_german() {
        let parsed = parse_quantity("1.234", &locale("de-DE")).unwrap();
        assert_eq!(parsed.quantity, 1234);
        assert_eq!(parsed.formatted, "1.234");
    }

    #[test]
    fn test_parse_truncates_fraction() {
        assert_eq!(parse_quantity("7.9", &locale("en-US")).unwrap().quantity, 7);
        assert_eq!(parse_quantity("7,9", &locale("de-DE")).unwrap().quantity, 7);
        assert_eq!(parse_quantity("12.", &locale("en-US")).unwrap().quantity, 12);
    }

    #[test]
    fn test_parse_canonicalizes() {
        let parsed = parse_quantity(" +0012345 ", &locale("en-US")).unwrap();
        assert_eq!(parsed.quantity, 12345);
        assert_eq!(parsed.formatted, "12,345");
    }

    #[test]
    fn test_parse_space_grouping() {
        let symbols = NumberSymbols {
            decimal: ",".to_string(),
            grouping: "\u{202f}".to_string(),
        };
        assert_eq!(parse_with_symbols("1 234", &symbols), Some(1234));
        assert_eq!(parse_with_symbols("1\u{a0}234,5", &symbols), Some(1234));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for tag in ["en-US", "de-DE", "es-ES", "he-IL", "fr-FR"] {
            let result = parse_quantity("abc", &locale(tag));
            assert!(matches!(result, Err(Error::InvalidQuantityInput { .. })));
        }
    }

    #[test]
    fn test_parse_rejects_malformed() {
        let en = locale("en-US");
        for input in ["", "   ", "-5", ",123", "12,", "1,,2", ".", "1.2.3", "12abc", "4294967296"] {
            assert!(parse_quantity(input, &en).is_err(), "accepted {:?}", input);
        }
    }

    #[test]
    fn test_parse_max() {
        let parsed = parse_quantity("4,294,967,295", &locale("en-US")).unwrap();
        assert_eq!(parsed.quantity, u32::MAX);
    }

    #[test]
    fn test_format_then_parse() {
        for tag in ["en-US", "de-DE", "es-ES", "he-IL", "fr-FR", "ja-JP"] {
            let loc = locale(tag);
            for q in [0, 1, 999, 1000, 1234567, u32::MAX] {
                let text = format_quantity(q, &loc);
                assert_eq!(parse_quantity(&text, &loc).unwrap().quantity, q, "{} {}", tag, text);
            }
        }
    }

    #[test]
    fn test_field_defaults() {
        let field = QuantityField::new(&locale("en-US"));
        assert_eq!(field.quantity(), DEFAULT_QUANTITY);
        assert_eq!(field.text(), "1");
        assert_eq!(field.hint(), None);
    }

    #[test]
    fn test_field_commit_success() {
        let en = locale("en-US");
        let mut field = QuantityField::new(&en);
        assert_eq!(field.commit("2500", &en), Ok(2500));
        assert_eq!(field.quantity(), 2500);
        assert_eq!(field.text(), "2,500");
        assert_eq!(field.hint(), None);
    }

    #[test]
    fn test_field_commit_failure_keeps_state() {
        let en = locale("en-US");
        let mut field = QuantityField::new(&en);
        field.commit("42", &en).unwrap();

        assert!(field.commit("abc", &en).is_err());
        assert_eq!(field.quantity(), 42);
        assert_eq!(field.text(), "42");
        assert!(field.hint().is_some());

        field.commit("43", &en).unwrap();
        assert_eq!(field.hint(), None);
    }
}
