//! # Formatting Utilities
//!
//! Display helpers for contract values. For address formatting, use
//! [`shared::utils::format_address`] or [`shared::utils::truncate_address`].

use alloy_primitives::U256;

/// Format an integer with comma separators (e.g. 1234567 -> "1,234,567").
pub fn format_integer(value: U256) -> String {
    let digits = value.to_string();

    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result
}

/// Balance line shown under the account list.
///
/// `None` means the balance has not been read yet.
pub fn format_balance(balance: Option<U256>) -> String {
    match balance {
        Some(value) => format_integer(value),
        None => "…".to_string(),
    }
}
