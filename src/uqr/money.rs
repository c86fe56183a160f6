use std::fmt;

use thiserror::Error;

/// Number of stored units per rupee
const SCALE: i64 = 10_000;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Money parse error: {0}, {1:?}")]
    Parse(&'static str, String),

    #[error("Money overflow: {0:?} is too large")]
    Overflow(String),
}

/// Amount in INR, stored as ten-thousandths of a rupee
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(pub i64);

impl Money {
    pub const ZERO: Self = Self(0);

    /// Smallest amount the payment form accepts (0.01 INR)
    pub const MIN_PAYMENT: Self = Self(100);

    /// Parses plain decimal text such as `100`, `100.5` or `0.01`.
    ///
    /// Signs and exponents are rejected, digits past the fourth decimal place are truncated.
    pub fn parse(string: &str) -> Result<Self, MoneyError> {
        let trimmed = string.trim();

        if trimmed.is_empty() {
            return Err(MoneyError::Parse("Empty amount", string.to_string()));
        }

        let mut parts = trimmed.split('.');

        let rupees = parts.next().unwrap_or_default();
        let fraction = parts.next();

        if parts.next().is_some() {
            return Err(MoneyError::Parse("Too many decimal points", string.to_string()));
        }

        let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());

        if !all_digits(rupees) || !fraction.map(all_digits).unwrap_or(true) {
            return Err(MoneyError::Parse("Not a plain decimal number", string.to_string()));
        }

        if rupees.is_empty() && fraction.map(str::is_empty).unwrap_or(true) {
            return Err(MoneyError::Parse("No digits", string.to_string()));
        }

        let rupees: i64 = if rupees.is_empty() {
            0
        } else {
            rupees
                .parse()
                .map_err(|_| MoneyError::Overflow(string.to_string()))?
        };

        let fraction = match fraction {
            None => 0,
            Some(fraction) => {
                let padded = format!("{:0<4}", fraction);
                // ascii digits only, so byte slicing is safe
                padded[..4].parse::<i64>().unwrap_or(0)
            }
        };

        rupees
            .checked_mul(SCALE)
            .and_then(|units| units.checked_add(fraction))
            .map(Money)
            .ok_or_else(|| MoneyError::Overflow(string.to_string()))
    }

    /// Exactly two decimal places, rounding half-up. Used inside payment URIs.
    pub fn to_fixed_2(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let paise = (self.0.unsigned_abs() + 50) / 100;

        format!("{sign}{}.{:02}", paise / 100, paise % 100)
    }
}

/// Shortest decimal form with at least one fractional digit, e.g. `100.0` or `12.5`
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let units = self.0.unsigned_abs();
        let scale = SCALE as u64;

        let fraction = format!("{:04}", units % scale);
        let fraction = fraction.trim_end_matches('0');
        let fraction = if fraction.is_empty() { "0" } else { fraction };

        return write!(f, "{sign}{}.{fraction}", units / scale);
    }
}
