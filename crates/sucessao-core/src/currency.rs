use rust_decimal::Decimal;

use crate::types::Money;

/// Render an amount in Brazilian real notation: `R$ 1.234.567,89`.
///
/// Rounds half-even to centavos. Negative amounts keep the sign after the
/// currency symbol (`R$ -80,00`).
pub fn format_brl(value: Money) -> String {
    let rounded = value.round_dp(2);
    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    let plain = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    format!("R$ {}{},{}", sign, group_thousands(int_part), frac_part)
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}
