//! The main screen and the two navigation targets
//!
//! Rendering returns plain text; the binary decides where it goes.

use chrono::NaiveDate;
use rust_i18n::t;

use crate::error::Result;
use crate::expiry::{expiration_date, format_date};
use crate::locale::Locale;
use crate::pricing::PricingConfig;
use crate::quantity::QuantityField;

/// Actions that hand off to another screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Help,
    LocaleSettings,
}

impl Navigation {
    pub fn render(self, locale: &Locale) -> String {
        match self {
            Navigation::Help => t!("help_screen.body").to_string(),
            Navigation::LocaleSettings => t!(
                "settings_screen.body",
                current = locale.to_string(),
                region = region_label(locale)
            )
            .to_string(),
        }
    }
}

fn region_label(locale: &Locale) -> String {
    match locale.region() {
        Some(region) => region.to_string(),
        None => t!("settings_screen.no_region").to_string(),
    }
}

/// State of the main screen: locale, pricing and the quantity field
#[derive(Debug, Clone)]
pub struct Screen {
    locale: Locale,
    pricing: PricingConfig,
    quantity: QuantityField,
    expires: NaiveDate,
}

impl Screen {
    pub fn new(locale: Locale, pricing: PricingConfig, today: NaiveDate) -> Self {
        let quantity = QuantityField::new(&locale);
        Self {
            locale,
            pricing,
            quantity,
            expires: expiration_date(today),
        }
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn quantity(&self) -> &QuantityField {
        &self.quantity
    }

    /// Commit text entered into the quantity field
    ///
    /// A quantity whose total would overflow is rejected like unparseable
    /// text, so the previous quantity and total stay on screen.
    pub fn enter_quantity(&mut self, raw: &str) -> Result<u32> {
        let mut field = self.quantity.clone();
        let quantity = match field.commit(raw, &self.locale) {
            Ok(quantity) => quantity,
            Err(err) => {
                self.quantity = field;
                return Err(err);
            }
        };

        if let Err(err) = self.pricing.total_for(self.locale.region_code(), quantity) {
            tracing::warn!(quantity, %err, "rejected quantity");
            self.quantity.reject(t!("quantity.too_large").to_string());
            return Err(err);
        }

        self.quantity = field;
        Ok(quantity)
    }

    pub fn price(&self) -> String {
        self.pricing.format_for(&self.locale)
    }

    pub fn expiration(&self) -> String {
        format_date(self.expires, &self.locale)
    }

    pub fn total(&self) -> String {
        self.pricing
            .format_total_for(&self.locale, self.quantity.quantity())
            .unwrap_or_else(|err| err.to_string())
    }

    pub fn render(&self) -> String {
        let mut lines = vec![
            t!("screen.title").to_string(),
            t!("screen.expires", date = self.expiration()).to_string(),
            t!("screen.price", price = self.price()).to_string(),
            t!("screen.quantity", quantity = self.quantity.text()).to_string(),
        ];
        if let Some(hint) = self.quantity.hint() {
            lines.push(format!("  ! {}", hint));
        }
        lines.push(t!("screen.total", total = self.total()).to_string());
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::pricing::RateTable;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn screen(tag: &str) -> Screen {
        Screen::new(
            Locale::parse(tag).unwrap(),
            PricingConfig::default(),
            NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
        )
    }

    #[test]
    fn test_screen_values() {
        let screen = screen("en-US");
        assert_eq!(screen.price(), "$0.10");
        assert_eq!(screen.expiration(), "Oct 21, 2026");
        assert_eq!(screen.total(), "$0.10");
    }

    #[test]
    fn test_enter_quantity_updates_total() {
        let mut screen = screen("en-US");
        assert_eq!(screen.enter_quantity("1,000"), Ok(1000));
        assert_eq!(screen.quantity().text(), "1,000");
        assert_eq!(screen.total(), "$100.00");
    }

    #[test]
    fn test_rejected_quantity_keeps_total() {
        let mut screen = screen("en-US");
        screen.enter_quantity("3").unwrap();
        assert!(screen.enter_quantity("three").is_err());
        assert_eq!(screen.quantity().quantity(), 3);
        assert_eq!(screen.total(), "$0.30");
    }

    #[test]
    fn test_quantity_overflowing_total_is_rejected() {
        let pricing = PricingConfig::new(
            Decimal::from_str("100000000000000000000").unwrap(),
            RateTable::defaults(),
            Locale::default(),
        )
        .unwrap();
        let mut screen = Screen::new(
            Locale::parse("en-US").unwrap(),
            pricing,
            NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
        );
        screen.enter_quantity("2").unwrap();
        let total = screen.total();

        let result = screen.enter_quantity("4,000,000,000");
        assert!(matches!(result, Err(Error::AmountOverflow(_))));
        assert_eq!(screen.quantity().quantity(), 2);
        assert_eq!(screen.quantity().text(), "2");
        assert!(screen.quantity().hint().is_some());
        assert_eq!(screen.total(), total);
    }

    #[test]
    fn test_render_contains_values() {
        let screen = screen("en-US");
        let text = screen.render();
        assert!(text.contains("$0.10"));
        assert!(text.contains("Oct 21, 2026"));
    }

    #[test]
    fn test_settings_shows_current_locale() {
        let locale = Locale::parse("he-IL").unwrap();
        let text = Navigation::LocaleSettings.render(&locale);
        assert!(text.contains("he-IL"));
        assert!(text.contains("IL"));
        assert!(!text.contains("%{"));
    }

    #[test]
    fn test_settings_without_region() {
        let text = Navigation::LocaleSettings.render(&Locale::parse("fr").unwrap());
        assert!(text.contains(": fr"));
        assert!(!text.contains("%{"));
    }

    #[test]
    fn test_help_is_not_empty() {
        assert!(!Navigation::Help.render(&Locale::default()).is_empty());
    }
}
