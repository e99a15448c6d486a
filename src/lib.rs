//! localetext - show prices, quantities and dates the way the device locale
//! expects them
//!
//! The library holds the formatting and parsing logic; the `localetext`
//! binary is a thin terminal front end over [`screen::Screen`].

rust_i18n::i18n!("locales", fallback = "en");

pub mod currency;
pub mod error;
pub mod expiry;
pub mod i18n;
pub mod locale;
pub mod pricing;
pub mod quantity;
pub mod screen;

pub use error::{Error, Result};
