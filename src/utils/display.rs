//! Display formatting for report values

use crate::methods::Currency;

pub const NOT_AVAILABLE: &str = "N/A";

/// Fixed-precision number, or "N/A" when undefined.
pub fn format_value(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.*}", decimals, v),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Two-decimal amount with thousands separators and currency label,
/// e.g. "1,234.50 USD".
pub fn format_money(value: Option<f64>, currency: Currency) -> String {
    let Some(v) = value.filter(|v| v.is_finite()) else {
        return NOT_AVAILABLE.to_string();
    };

    let fixed = format!("{:.2}", v.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if v < 0.0 { "-" } else { "" };
    format!("{sign}{grouped}.{frac_part} {currency}")
}
