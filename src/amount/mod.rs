mod config;
pub mod error;

use rust_decimal::Decimal;

use crate::primitives::Amount;
pub use config::AmountPolicy;
use error::AmountError;

/// Parses user entered text into an [`Amount`] and checks it against `policy`.
///
/// The same function backs the input pre-check and the orchestrator entry point,
/// so both always agree on what counts as a valid amount.
pub fn validate(text: &str, policy: &AmountPolicy) -> Result<Amount, AmountError> {
    let value = parse_non_negative(text)?;
    if value <= Decimal::ZERO {
        return Err(AmountError::NotPositive(value));
    }
    if value > policy.max_amount {
        return Err(AmountError::ExceedsMaximum {
            amount: value,
            max_amount: policy.max_amount,
        });
    }
    Ok(Amount::from(value))
}

fn parse_non_negative(text: &str) -> Result<Decimal, AmountError> {
    let trimmed = text.trim();
    let digits = trimmed.chars().filter(|c| c.is_ascii_digit()).count();
    let dots = trimmed.chars().filter(|c| *c == '.').count();
    if digits == 0 || dots > 1 || digits + dots != trimmed.len() {
        return Err(AmountError::NotADecimal(text.to_string()));
    }
    Decimal::from_str_exact(trimmed).map_err(|_| AmountError::NotADecimal(text.to_string()))
}
