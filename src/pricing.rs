//! Locale-aware price formatting
//!
//! A fixed base price in US dollars is converted with a per-region exchange
//! rate and rendered in the device currency. Regions without a rate see the
//! base price in US dollars instead.

use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::currency::{Currency, CurrencyFormatter};
use crate::error::{Error, Result};
use crate::locale::Locale;

/// Ten cents, in US dollars
pub const DEFAULT_BASE_PRICE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// Built-in exchange rates: 0.93 euros and 3.61 new shekels per dollar
const DEFAULT_RATES: &[(&str, Decimal)] = &[
    ("ES", Decimal::from_parts(93, 0, 0, false, 2)),
    ("IL", Decimal::from_parts(361, 0, 0, false, 2)),
];

/// Region code to exchange rate multiplier
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RateTable {
    rates: BTreeMap<String, Decimal>,
}

impl RateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rate, replacing any existing rate for the region
    ///
    /// The rate must be positive and the region must have a known currency.
    pub fn with_rate(mut self, region: &str, rate: Decimal) -> Result<Self> {
        let region = region.trim().to_ascii_uppercase();
        if rate <= Decimal::ZERO {
            return Err(Error::InvalidRate(format!("{}={}", region, rate)));
        }
        if Currency::for_region(&region).is_none() {
            return Err(Error::UnknownCurrency(region));
        }
        self.rates.insert(region, rate);
        Ok(self)
    }

    /// Parse a `REGION=RATE` pair and add it
    pub fn with_entry(self, entry: &str) -> Result<Self> {
        let (region, rate) = entry
            .split_once('=')
            .ok_or_else(|| Error::InvalidRate(entry.to_string()))?;
        let rate = Decimal::from_str(rate.trim())
            .map_err(|_| Error::InvalidRate(entry.to_string()))?;
        if region.trim().is_empty() {
            return Err(Error::InvalidRate(entry.to_string()));
        }
        self.with_rate(region, rate)
    }

    pub fn get(&self, region: &str) -> Option<Decimal> {
        self.rates.get(&region.to_ascii_uppercase()).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.rates.iter().map(|(region, rate)| (region.as_str(), *rate))
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// The rates for Spain and Israel
    pub fn defaults() -> Self {
        let rates = DEFAULT_RATES
            .iter()
            .map(|(region, rate)| (region.to_string(), *rate))
            .collect();
        Self { rates }
    }
}

/// Parse a positive decimal amount such as `0.10`
pub fn parse_amount(raw: &str) -> Result<Decimal> {
    match Decimal::from_str(raw.trim()) {
        Ok(amount) if amount > Decimal::ZERO => Ok(amount),
        _ => Err(Error::InvalidAmount(raw.to_string())),
    }
}

/// Format `base_price` for `region`
///
/// When the region has a rate the converted price is rendered by `device`;
/// otherwise the unchanged base price is rendered by `reference`.
pub fn format_price(
    region: &str,
    base_price: Decimal,
    rates: &RateTable,
    device: Option<&CurrencyFormatter>,
    reference: &CurrencyFormatter,
) -> String {
    match (rates.get(region), device) {
        (Some(rate), Some(device)) => match base_price.checked_mul(rate) {
            Some(converted) => device.format(converted),
            None => {
                tracing::warn!(region, %base_price, %rate, "converted price overflows, using reference");
                reference.format(base_price)
            }
        },
        _ => reference.format(base_price),
    }
}

/// Immutable pricing configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingConfig {
    base_price: Decimal,
    rates: RateTable,
    reference: CurrencyFormatter,
}

impl PricingConfig {
    /// Build a configuration
    ///
    /// The base price must be positive and converting it with the largest
    /// rate must not overflow.
    pub fn new(base_price: Decimal, rates: RateTable, reference_locale: Locale) -> Result<Self> {
        if base_price <= Decimal::ZERO {
            return Err(Error::InvalidAmount(base_price.to_string()));
        }
        if let Some((region, rate)) = rates.iter().max_by_key(|(_, rate)| *rate) {
            if base_price.checked_mul(rate).is_none() {
                return Err(Error::AmountOverflow(format!("{} x {} ({})", base_price, rate, region)));
            }
        }
        let reference = CurrencyFormatter::for_locale(&reference_locale)
            .ok_or_else(|| Error::UnknownCurrency(reference_locale.region_code().to_string()))?;
        Ok(Self {
            base_price,
            rates,
            reference,
        })
    }

    pub fn base_price(&self) -> Decimal {
        self.base_price
    }

    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    pub fn reference(&self) -> &CurrencyFormatter {
        &self.reference
    }

    /// The displayed amount for a region: converted when a rate applies,
    /// the base price otherwise.
    ///
    /// Cannot overflow: `new` checks the base price against every rate.
    pub fn converted_price(&self, region: &str) -> Decimal {
        self.rates
            .get(region)
            .map_or(self.base_price, |rate| self.base_price.saturating_mul(rate))
    }

    /// The price of `quantity` units for a region
    pub fn total_for(&self, region: &str, quantity: u32) -> Result<Decimal> {
        let unit = self.converted_price(region);
        unit.checked_mul(Decimal::from(quantity))
            .ok_or_else(|| Error::AmountOverflow(format!("{} x {}", unit, quantity)))
    }

    /// Format the price for a device locale
    pub fn format_for(&self, locale: &Locale) -> String {
        let device = CurrencyFormatter::for_locale(locale);
        let formatted = format_price(
            locale.region_code(),
            self.base_price,
            &self.rates,
            device.as_ref(),
            &self.reference,
        );
        tracing::debug!(%locale, %formatted, "formatted price");
        formatted
    }

    /// Format `quantity` units at the locale's price
    pub fn format_total_for(&self, locale: &Locale, quantity: u32) -> Result<String> {
        let region = locale.region_code();
        let total = self.total_for(region, quantity)?;
        Ok(match (self.rates.get(region), CurrencyFormatter::for_locale(locale)) {
            (Some(_), Some(device)) => device.format(total),
            _ => self.reference.format(total),
        })
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            base_price: DEFAULT_BASE_PRICE,
            rates: RateTable::defaults(),
            reference: CurrencyFormatter::reference(),
        }
    }
}
