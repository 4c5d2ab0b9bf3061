use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("AmountError - NotADecimal: '{0}'")]
    NotADecimal(String),
    #[error("AmountError - NotPositive: {0}")]
    NotPositive(Decimal),
    #[error("AmountError - ExceedsMaximum: {amount} > {max_amount}")]
    ExceedsMaximum {
        amount: Decimal,
        max_amount: Decimal,
    },
}
