//! Report formatting utilities for terminal output

use crate::models::Money;

/// Format an amount with a currency symbol
pub fn format_amount(amount: Money, symbol: &str) -> String {
    amount.format_with_symbol(symbol)
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Format a double separator line
pub fn double_separator(width: usize) -> String {
    "═".repeat(width)
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}

/// First line of a multi-line text
pub fn first_line(s: &str) -> &str {
    s.lines().next().unwrap_or("")
}
