//! Error types shared by the formatting and parsing modules

use thiserror::Error;

/// Errors raised by the library
///
/// Only `InvalidQuantityInput` can occur while the user is interacting with
/// the screen; the other variants come from building the configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The entered text is not a number in the active locale
    #[error("not a valid quantity: {input:?}")]
    InvalidQuantityInput { input: String },

    #[error("invalid locale identifier: {0:?}")]
    InvalidLocale(String),

    #[error("invalid amount {0:?}: must be a positive decimal number")]
    InvalidAmount(String),

    #[error("invalid exchange rate {0:?}: expected REGION=RATE with a positive rate")]
    InvalidRate(String),

    #[error("no currency is registered for region {0:?}")]
    UnknownCurrency(String),

    /// A price or total does not fit in a decimal amount
    #[error("amount too large: {0}")]
    AmountOverflow(String),
}

pub type Result<T> = std::result::Result<T, Error>;
