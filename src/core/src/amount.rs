//! Conversion between entered token amounts and on-chain base units.

use crate::errors::CoreError;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use std::fmt;

/// Number of fractional digits a token amount may carry.
pub const TOKEN_DECIMALS: u32 = 6;

/// Number of base units in one whole token.
pub const BASE_UNITS_PER_TOKEN: u128 = 1_000_000;

/// An amount expressed in base units.
///
/// Serializes as a decimal integer string, which is how amounts travel on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BaseUnits(u128);

impl BaseUnits {
    /// Wraps a raw base-unit count.
    pub fn new(units: u128) -> Self {
        Self(units)
    }

    /// Gets the raw base-unit count.
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl fmt::Display for BaseUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for BaseUnits {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// A plain decimal split into its parts, fraction without trailing zeros.
struct DecimalParts<'a> {
    negative: bool,
    whole: &'a str,
    fraction: &'a str,
}

impl<'a> DecimalParts<'a> {
    /// Splits `[+-]digits[.digits]`; either side of the point may be empty, not both.
    fn split(text: &'a str) -> Option<Self> {
        let (negative, body) = match text.as_bytes().first() {
            Some(b'-') => (true, &text[1..]),
            Some(b'+') => (false, &text[1..]),
            _ => (false, text),
        };
        let (whole, fraction) = body.split_once('.').unwrap_or((body, ""));

        if whole.is_empty() && fraction.is_empty() {
            return None;
        }
        let digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if !digits(whole) || !digits(fraction) {
            return None;
        }

        Some(Self {
            negative,
            whole,
            fraction: fraction.trim_end_matches('0'),
        })
    }

    fn is_zero(&self) -> bool {
        self.fraction.is_empty() && self.whole.bytes().all(|b| b == b'0')
    }

    fn fraction_digits(&self) -> u32 {
        u32::try_from(self.fraction.len()).unwrap_or(u32::MAX)
    }
}

/// Converts a decimal token amount such as `"2.5"` into base units.
///
/// Plain decimals and scientific notation (`1e-3`) are accepted. Scaling is
/// done on an exact decimal, never on a float.
pub fn to_base_units(input: &str) -> Result<BaseUnits, CoreError> {
    let text = input.trim();

    let value = match DecimalParts::split(text) {
        Some(parts) => {
            if parts.negative || parts.is_zero() {
                return Err(not_positive(text));
            }
            check_precision(parts.fraction_digits())?;

            let whole = if parts.whole.is_empty() { "0" } else { parts.whole };
            let normalized = if parts.fraction.is_empty() {
                whole.to_string()
            } else {
                format!("{}.{}", whole, parts.fraction)
            };
            Decimal::from_str_exact(&normalized).map_err(|_| too_large(text))?
        }
        None if text.contains(|c: char| c == 'e' || c == 'E') => {
            let value = Decimal::from_scientific(&text.to_ascii_lowercase())
                .map_err(|_| not_a_number(text))?;
            if value <= Decimal::ZERO {
                return Err(not_positive(text));
            }
            check_precision(value.normalize().scale())?;
            value
        }
        None => return Err(not_a_number(text)),
    };

    let units = value
        .checked_mul(Decimal::new(BASE_UNITS_PER_TOKEN as i64, 0))
        .and_then(|scaled| scaled.trunc().to_u128())
        .ok_or_else(|| too_large(text))?;

    Ok(BaseUnits(units))
}

fn check_precision(digits: u32) -> Result<(), CoreError> {
    if digits > TOKEN_DECIMALS {
        return Err(CoreError::PrecisionExceeded {
            max: TOKEN_DECIMALS,
            actual: digits,
        });
    }
    Ok(())
}

fn not_a_number(text: &str) -> CoreError {
    CoreError::InvalidAmount(format!("'{}' is not a valid number", text))
}

fn not_positive(text: &str) -> CoreError {
    CoreError::InvalidAmount(format!("amount must be greater than zero, got {}", text))
}

fn too_large(text: &str) -> CoreError {
    CoreError::InvalidAmount(format!("amount {} is too large", text))
}

/// Formats base units as a token amount with at least one fractional digit.
pub fn format_base_units(units: u128) -> String {
    let whole = units / BASE_UNITS_PER_TOKEN;
    let fraction = units % BASE_UNITS_PER_TOKEN;

    let digits = format!("{:0width$}", fraction, width = TOKEN_DECIMALS as usize);
    let digits = digits.trim_end_matches('0');

    if digits.is_empty() {
        format!("{}.0", whole)
    } else {
        format!("{}.{}", whole, digits)
    }
}
