//! Input boundary: raw form text to validated values.
//!
//! The tax module assumes non-negative decimals. Text coming from the form
//! is either parsed strictly ([`parse_amount`]) or coerced to zero
//! ([`coerce_amount`]) before it reaches the model.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::error::InvoiceError;

/// Largest unit price or quantity accepted from text (10^12).
///
/// Keeps `price × quantity × rate` and the sum over many lines well inside
/// the range of [`Decimal`].
pub const MAX_AMOUNT: Decimal = dec!(1000000000000);

/// Parse a non-negative amount or quantity.
///
/// Accepts plain decimals (`"19.99"`), thousands separators (`"1,250.00"`)
/// and scientific notation (`"1e3"`). Empty, non-numeric, negative and
/// larger-than-[`MAX_AMOUNT`] text is rejected.
pub fn parse_amount(raw: &str) -> Result<Decimal, InvoiceError> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| *c != ',' && *c != '_')
        .collect();

    if cleaned.is_empty() {
        return Err(InvoiceError::Input("amount is empty".into()));
    }

    let value = Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .map_err(|_| InvoiceError::Input(format!("'{raw}' is not a number")))?;

    if value.is_sign_negative() && !value.is_zero() {
        return Err(InvoiceError::Input(format!(
            "'{raw}' is negative; amounts must be zero or more"
        )));
    }

    if value > MAX_AMOUNT {
        return Err(InvoiceError::Input(format!(
            "'{raw}' is too large; amounts must not exceed {MAX_AMOUNT}"
        )));
    }

    Ok(value.normalize())
}

/// Lenient variant of [`parse_amount`]: anything unusable becomes zero.
///
/// Empty text is zero silently; malformed, negative or oversized text is
/// zero with a warning.
pub fn coerce_amount(raw: &str) -> Decimal {
    if raw.trim().is_empty() {
        return Decimal::ZERO;
    }
    match parse_amount(raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(input = raw, error = %e, "coercing amount to zero");
            Decimal::ZERO
        }
    }
}

/// Parse a calendar date. Empty text clears the date.
///
/// Accepts ISO `YYYY-MM-DD` (what a date input produces) and `DD/MM/YYYY`.
pub fn parse_date(raw: &str) -> Result<Option<NaiveDate>, InvoiceError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%d/%m/%Y"))
        .map(Some)
        .map_err(|_| InvoiceError::Input(format!("'{raw}' is not a date (expected YYYY-MM-DD)")))
}
