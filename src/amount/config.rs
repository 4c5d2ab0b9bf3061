use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmountPolicy {
    #[serde(default = "default_max_amount")]
    pub max_amount: Decimal,
}

impl Default for AmountPolicy {
    fn default() -> Self {
        Self {
            max_amount: default_max_amount(),
        }
    }
}

fn default_max_amount() -> Decimal {
    dec!(0.01)
}
