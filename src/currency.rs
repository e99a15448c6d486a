//! Currency formatting rules
//!
//! Each region maps to one currency. A [`CurrencyFormatter`] combines a
//! currency with the numeric grammar of a locale.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::locale::Locale;

/// Where the currency symbol goes relative to the amount
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolPlacement {
    /// `$0.10`
    Prefix,
    /// `0,09 €` (separated by a no-break space)
    Suffix,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Currency {
    pub code: &'static str,
    pub symbol: &'static str,
    pub fraction_digits: u32,
    pub placement: SymbolPlacement,
}

pub const USD: Currency = Currency {
    code: "USD",
    symbol: "$",
    fraction_digits: 2,
    placement: SymbolPlacement::Prefix,
};

pub const EUR: Currency = Currency {
    code: "EUR",
    symbol: "€",
    fraction_digits: 2,
    placement: SymbolPlacement::Suffix,
};

pub const ILS: Currency = Currency {
    code: "ILS",
    symbol: "₪",
    fraction_digits: 2,
    placement: SymbolPlacement::Suffix,
};

pub const GBP: Currency = Currency {
    code: "GBP",
    symbol: "£",
    fraction_digits: 2,
    placement: SymbolPlacement::Prefix,
};

pub const JPY: Currency = Currency {
    code: "JPY",
    symbol: "¥",
    fraction_digits: 0,
    placement: SymbolPlacement::Prefix,
};

pub const KRW: Currency = Currency {
    code: "KRW",
    symbol: "₩",
    fraction_digits: 0,
    placement: SymbolPlacement::Prefix,
};

pub const CAD: Currency = Currency {
    code: "CAD",
    symbol: "$",
    fraction_digits: 2,
    placement: SymbolPlacement::Prefix,
};

/// Region code to currency
const REGION_CURRENCIES: &[(&str, Currency)] = &[
    ("US", USD),
    ("ES", EUR),
    ("FR", EUR),
    ("DE", EUR),
    ("IT", EUR),
    ("IL", ILS),
    ("GB", GBP),
    ("JP", JPY),
    ("KR", KRW),
    ("CA", CAD),
];

/// Separator between an amount and a trailing symbol
const SUFFIX_SEPARATOR: char = '\u{00a0}';

impl Currency {
    /// Look up the currency used in a region (case-insensitive)
    pub fn for_region(region: &str) -> Option<Currency> {
        REGION_CURRENCIES
            .iter()
            .find(|(code, _)| code.eq_ignore_ascii_case(region))
            .map(|(_, currency)| *currency)
    }
}

/// Formats amounts in one currency following one locale's numeric grammar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormatter {
    locale: Locale,
    currency: Currency,
}

impl CurrencyFormatter {
    pub fn new(locale: Locale, currency: Currency) -> Self {
        Self { locale, currency }
    }

    /// The formatter for a device locale, if its region has a currency
    pub fn for_locale(locale: &Locale) -> Option<Self> {
        let currency = Currency::for_region(locale.region_code())?;
        Some(Self::new(locale.clone(), currency))
    }

    /// US dollars formatted for `en-US`
    pub fn reference() -> Self {
        Self::new(Locale::default(), USD)
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Round half-even to the currency's fraction digits and render with the
    /// locale's separators and the currency symbol.
    pub fn format(&self, amount: Decimal) -> String {
        let digits = self.currency.fraction_digits;
        let rounded = amount.round_dp_with_strategy(digits, RoundingStrategy::MidpointNearestEven);
        let number = self.format_number(rounded.abs(), digits);
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };

        match self.currency.placement {
            SymbolPlacement::Prefix => format!("{}{}{}", sign, self.currency.symbol, number),
            SymbolPlacement::Suffix => {
                format!("{}{}{}{}", sign, number, SUFFIX_SEPARATOR, self.currency.symbol)
            }
        }
    }

    fn format_number(&self, amount: Decimal, digits: u32) -> String {
        let text = format!("{:.*}", digits as usize, amount);
        let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));
        let grouped = int_part
            .parse::<u128>()
            .map(|n| self.locale.format_integer(n))
            .unwrap_or_else(|_| int_part.to_string());

        if frac_part.is_empty() {
            grouped
        } else {
            let symbols = self.locale.number_symbols();
            format!("{}{}{}", grouped, symbols.decimal, frac_part)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn formatter(tag: &str) -> CurrencyFormatter {
        CurrencyFormatter::for_locale(&Locale::parse(tag).unwrap()).unwrap()
    }

    #[test]
    fn test_currency_for_region() {
        assert_eq!(Currency::for_region("ES"), Some(EUR));
        assert_eq!(Currency::for_region("il"), Some(ILS));
        assert_eq!(Currency::for_region("ZZ"), None);
        assert_eq!(Currency::for_region(""), None);
    }

    #[test]
    fn test_reference_formatter() {
        let reference = CurrencyFormatter::reference();
        assert_eq!(reference.format(dec!(0.10)), "$0.10");
        assert_eq!(reference.format(dec!(1234.5)), "$1,234.50");
    }

    #[test]
    fn test_euro_suffix() {
        let de = formatter("de-DE");
        assert_eq!(de.format(dec!(1234.5)), "1.234,50\u{a0}€");
    }

    #[test]
    fn test_half_even_rounding() {
        let us = formatter("en-US");
        assert_eq!(us.format(dec!(0.125)), "$0.12");
        assert_eq!(us.format(dec!(0.135)), "$0.14");
        assert_eq!(us.format(dec!(0.093)), "$0.09");
    }

    #[test]
    fn test_groups_amounts_beyond_u64() {
        let reference = CurrencyFormatter::reference();
        assert_eq!(
            reference.format(dec!(123456789012345678901234)),
            "$123,456,789,012,345,678,901,234.00"
        );
        assert_eq!(
            reference.format(Decimal::MAX),
            "$79,228,162,514,264,337,593,543,950,335.00"
        );
    }

    #[test]
    fn test_zero_fraction_currency() {
        let jp = formatter("ja-JP");
        assert_eq!(jp.format(dec!(1234.6)), "¥1,235");
    }

    #[test]
    fn test_negative_amount() {
        let us = formatter("en-US");
        assert_eq!(us.format(dec!(-2.5)), "-$2.50");
        assert_eq!(us.format(dec!(-0.001)), "$0.00");
    }

    #[test]
    fn test_no_formatter_without_region() {
        assert!(CurrencyFormatter::for_locale(&Locale::parse("fr").unwrap()).is_none());
    }
}
