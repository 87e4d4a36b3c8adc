//! # Shared Utility Functions
//!
//! Common utility functions used across lib-core and the atm-web application.
//!
//! ## Address Formatting
//!
//! Functions for formatting `0x`-prefixed account addresses for display:
//! - [`format_address`] - Format address with ellipsis (first N and last M hex digits)
//! - [`truncate_address`] - Alias for `format_address` with default parameters
//!
//! ## Usage
//!
//! ```rust
//! use shared::utils::format_address;
//!
//! let address = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";
//! let formatted = format_address(address, 4, 4);
//! assert_eq!(formatted, "0xf39F...2266");
//! ```

/// Format an account address by showing the first `prefix_len` and last `suffix_len`
/// hex digits. A leading `0x` is kept and does not count towards `prefix_len`.
///
/// If the address is shorter than `prefix_len + suffix_len`, it is returned as-is.
///
/// # Examples
///
/// ```rust
/// use shared::utils::format_address;
///
/// let addr = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";
/// assert_eq!(format_address(addr, 4, 4), "0xf39F...2266");
/// assert_eq!(format_address(addr, 6, 6), "0xf39Fd6...b92266");
/// assert_eq!(format_address("0xshort", 4, 4), "0xshort");
/// ```
pub fn format_address(address: &str, prefix_len: usize, suffix_len: usize) -> String {
    let (head, digits) = match address.strip_prefix("0x") {
        Some(rest) => ("0x", rest),
        None => ("", address),
    };
    let digits_len = digits.len();

    // Also guard against individual lengths exceeding the digit count to prevent panics
    if digits_len <= prefix_len + suffix_len
        || prefix_len >= digits_len
        || suffix_len >= digits_len
        || !digits.is_ascii()
    {
        return address.to_string();
    }

    let prefix = &digits[..prefix_len];
    let suffix = &digits[digits_len - suffix_len..];

    format!("{}{}...{}", head, prefix, suffix)
}

/// Format an account address with default 4-digit prefix and suffix.
///
/// # Examples
///
/// ```rust
/// use shared::utils::truncate_address;
///
/// let addr = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";
/// assert_eq!(truncate_address(addr), "0xf39F...2266");
/// ```
pub fn truncate_address(address: &str) -> String {
    format_address(address, 4, 4)
}
