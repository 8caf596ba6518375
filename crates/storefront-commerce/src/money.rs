//! Price formatting.
//!
//! Prices from the commerce backend and the search index are integer amounts
//! in the currency's minor unit, tagged with a lowercase ISO code ("usd").
//! Codes without a known format still display, as `12.50 XTS`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Display rules for the currencies storefronts commonly sell in:
/// ISO code, prefix symbol, minor-unit digits.
const FORMATS: &[(&str, &str, u32)] = &[
    ("USD", "$", 2),
    ("EUR", "\u{20ac}", 2),
    ("GBP", "\u{00a3}", 2),
    ("JPY", "\u{00a5}", 0),
    ("CAD", "CA$", 2),
    ("AUD", "A$", 2),
    ("DKK", "kr ", 2),
    ("SEK", "kr ", 2),
    ("KRW", "\u{20a9}", 0),
];

/// An ISO 4217 currency code, normalized to upper case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Currency(String);

impl Currency {
    pub fn new(code: &str) -> Self {
        Self(code.trim().to_ascii_uppercase())
    }

    pub fn code(&self) -> &str {
        &self.0
    }

    fn format(&self) -> Option<(&'static str, u32)> {
        FORMATS
            .iter()
            .find(|(code, _, _)| *code == self.0)
            .map(|(_, symbol, places)| (*symbol, *places))
    }

    /// Whether a symbol is known for this code.
    pub fn is_known(&self) -> bool {
        self.format().is_some()
    }

    /// Minor-unit digits; unknown codes assume 2.
    pub fn decimal_places(&self) -> u32 {
        self.format().map_or(2, |(_, places)| places)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An amount in minor units of one currency.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    pub amount: i64,
    pub currency: Currency,
}

impl Money {
    pub fn new(amount: i64, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// The amount with the decimal point placed, without a symbol ("49.99").
    pub fn display_amount(&self) -> String {
        let places = self.currency.decimal_places();
        if places == 0 {
            return self.amount.to_string();
        }
        let divisor = 10_i64.pow(places);
        let sign = if self.amount < 0 { "-" } else { "" };
        let abs = self.amount.unsigned_abs();
        format!(
            "{}{}.{:0width$}",
            sign,
            abs / divisor as u64,
            abs % divisor as u64,
            width = places as usize
        )
    }

    /// "$49.99" for known currencies, "49.99 XTS" otherwise.
    pub fn display(&self) -> String {
        match self.currency.format() {
            Some((symbol, _)) => format!("{}{}", symbol, self.display_amount()),
            None => format!("{} {}", self.display_amount(), self.currency),
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}
