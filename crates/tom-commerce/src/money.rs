//! Money type for representing monetary values.
//!
//! Amounts are integer minor units (cents, kobo) of a single currency, so
//! sums are exact and rounding happens only when a value is displayed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Mul;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    USD,
    NGN,
    EUR,
    GBP,
    CAD,
    JPY,
}

impl Currency {
    /// Get the currency code (e.g., "USD").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::NGN => "NGN",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::CAD => "CAD",
            Currency::JPY => "JPY",
        }
    }

    /// Get the currency symbol (e.g., "$").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::NGN => "\u{20a6}",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
            Currency::CAD => "CA$",
            Currency::JPY => "\u{00a5}",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }

    /// Number of minor units in one major unit.
    pub fn minor_per_major(&self) -> i64 {
        10_i64.pow(self.decimal_places())
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "USD" => Some(Currency::USD),
            "NGN" => Some(Currency::NGN),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            "CAD" => Some(Currency::CAD),
            "JPY" => Some(Currency::JPY),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in the smallest currency unit.
    pub amount_minor: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from minor units.
    pub fn new(amount_minor: i64, currency: Currency) -> Self {
        Self {
            amount_minor,
            currency,
        }
    }

    /// Create a Money value from a major-unit decimal amount.
    ///
    /// ```
    /// use tom_commerce::money::{Money, Currency};
    /// let price = Money::from_major(49.99, Currency::USD);
    /// assert_eq!(price.amount_minor, 4999);
    /// ```
    pub fn from_major(amount: f64, currency: Currency) -> Self {
        let amount_minor = (amount * currency.minor_per_major() as f64).round() as i64;
        Self::new(amount_minor, currency)
    }

    /// Parse a major-unit amount typed by a person ("28", "49.99", " 1,200 ").
    ///
    /// Returns `None` for anything that is not a finite number.
    pub fn parse_major(input: &str, currency: Currency) -> Option<Self> {
        let cleaned: String = input
            .trim()
            .trim_start_matches(currency.symbol())
            .chars()
            .filter(|c| *c != ',')
            .collect();
        let value: f64 = cleaned.trim().parse().ok()?;
        if !value.is_finite() {
            return None;
        }
        Some(Self::from_major(value, currency))
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_minor == 0
    }

    /// Convert to a major-unit decimal value.
    pub fn to_major(&self) -> f64 {
        self.amount_minor as f64 / self.currency.minor_per_major() as f64
    }

    /// Format as a display string (e.g., "$49.99").
    pub fn display(&self) -> String {
        format!("{}{}", self.currency.symbol(), self.display_amount())
    }

    /// Like [`display`](Self::display) but drops a zero fraction ("$28", "$49.99").
    pub fn display_short(&self) -> String {
        if self.amount_minor % self.currency.minor_per_major() == 0 {
            format!("{}{}", self.currency.symbol(), self.amount_minor / self.currency.minor_per_major())
        } else {
            self.display()
        }
    }

    /// Format as a display string without symbol (e.g., "49.99").
    pub fn display_amount(&self) -> String {
        let places = self.currency.decimal_places() as usize;
        if places == 0 {
            return self.amount_minor.to_string();
        }
        let divisor = self.currency.minor_per_major();
        let sign = if self.amount_minor < 0 { "-" } else { "" };
        let abs = self.amount_minor.unsigned_abs();
        let major = abs / divisor as u64;
        let minor = abs % divisor as u64;
        format!("{sign}{major}.{minor:0places$}")
    }

    /// Try to add another Money value, returning None if currencies don't match.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        Some(Money::new(
            self.amount_minor.saturating_add(other.amount_minor),
            self.currency,
        ))
    }

    /// Multiply by a scalar quantity.
    pub fn multiply(&self, factor: i64) -> Money {
        Money::new(self.amount_minor.saturating_mul(factor), self.currency)
    }
}

impl Mul<i64> for Money {
    type Output = Money;

    fn mul(self, factor: i64) -> Money {
        self.multiply(factor)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_major() {
        let m = Money::from_major(49.99, Currency::USD);
        assert_eq!(m.amount_minor, 4999);

        let m = Money::from_major(100.0, Currency::JPY);
        assert_eq!(m.amount_minor, 100);
    }

    #[test]
    fn test_parse_major() {
        assert_eq!(
            Money::parse_major("28", Currency::USD),
            Some(Money::new(2800, Currency::USD))
        );
        assert_eq!(
            Money::parse_major(" $1,200.5 ", Currency::USD),
            Some(Money::new(120050, Currency::USD))
        );
        assert_eq!(Money::parse_major("abc", Currency::USD), None);
        assert_eq!(Money::parse_major("NaN", Currency::USD), None);
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::new(4999, Currency::USD).display(), "$49.99");
        assert_eq!(Money::new(5600, Currency::USD).display(), "$56.00");
        assert_eq!(Money::new(5, Currency::USD).display(), "$0.05");
        assert_eq!(Money::new(2100000, Currency::NGN).display(), "\u{20a6}21000.00");
        assert_eq!(Money::new(100, Currency::JPY).display(), "\u{00a5}100");
        assert_eq!(Money::new(2800, Currency::USD).display_short(), "$28");
        assert_eq!(Money::new(2850, Currency::USD).display_short(), "$28.50");
    }

    #[test]
    fn test_try_add_rejects_mixed_currencies() {
        let usd = Money::new(1000, Currency::USD);
        let ngn = Money::new(1000, Currency::NGN);
        assert_eq!(usd.try_add(&usd), Some(Money::new(2000, Currency::USD)));
        assert_eq!(usd.try_add(&ngn), None);
    }

    #[test]
    fn test_multiply() {
        let m = Money::new(2800, Currency::USD);
        assert_eq!((m * 2).amount_minor, 5600);
        assert_eq!(Money::new(i64::MAX, Currency::USD).multiply(2).amount_minor, i64::MAX);
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("USD"), Some(Currency::USD));
        assert_eq!(Currency::from_code("ngn"), Some(Currency::NGN));
        assert_eq!(Currency::from_code("INVALID"), None);
    }
}
