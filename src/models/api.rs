use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Calculate endpoint response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculateResponse {
    pub amount: String,  // Formatted with 5 decimals
}

impl CalculateResponse {
    pub fn new(amount: Decimal) -> Self {
        Self {
            amount: format_decimal_5(amount),
        }
    }
}

/// Format a decimal with 5 decimal places for API response
///
/// Values too wide for 5 places keep as many as fit.
pub fn format_decimal_5(value: Decimal) -> String {
    let mut rounded = value.round_dp(5);
    rounded.rescale(5);
    rounded.to_string()
}
