//! Money formatting for decimal amounts.
//!
//! Amounts throughout the system are plain [`Decimal`] values in MXN;
//! formatting is a display concern, so it lives here rather than on the
//! records themselves.

use rust_decimal::Decimal;

/// Format a decimal amount the way the dashboards render MXN currency:
/// `$` prefix, thousands separators, up to two decimal places with trailing
/// zeros dropped (`$25,999.99`, `$232,597`).
#[must_use]
pub fn format_mxn(amount: Decimal) -> String {
    let rounded = amount.round_dp(2).normalize();
    let text = rounded.abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((int, frac)) => (int.to_owned(), Some(frac.to_owned())),
        None => (text, None),
    };

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*ch);
    }

    let sign = if rounded.is_sign_negative() { "-" } else { "" };
    match frac_part {
        Some(frac) => format!("{sign}${grouped}.{frac}"),
        None => format!("{sign}${grouped}"),
    }
}
