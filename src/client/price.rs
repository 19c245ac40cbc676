//! Rupiah price input formatting (`id-ID` grouping, e.g. `1.000.000`)

/// Format a string of ASCII digits with `.` thousands separators.
/// Leading zeros are dropped; an empty input stays empty.
pub fn format_idr(digits: &str) -> String {
    if digits.is_empty() {
        return String::new();
    }

    let trimmed = digits.trim_start_matches('0');
    let trimmed = if trimmed.is_empty() { "0" } else { trimmed };

    let mut out = String::with_capacity(trimmed.len() + trimmed.len() / 3);
    for (i, c) in trimmed.chars().enumerate() {
        if i > 0 && (trimmed.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

/// What the price field holds after each keystroke
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceInput {
    display: String,
    amount: Option<u64>,
}

impl PriceInput {
    /// Keep only the digits of whatever was typed or pasted
    pub fn from_typed(typed: &str) -> Self {
        let digits: String = typed.chars().filter(char::is_ascii_digit).collect();

        Self {
            display: format_idr(&digits),
            amount: if digits.is_empty() {
                None
            } else {
                digits.parse().ok()
            },
        }
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    /// `None` when empty or too large for a u64
    pub fn amount(&self) -> Option<u64> {
        self.amount
    }
}
