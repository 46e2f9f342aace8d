use rust_decimal::Decimal;

use crate::decimal::Money;

/// ringgit amount as `RM1,234.56`; negatives are `-RM1,234.56`
pub fn format_ringgit(amount: Money, decimals: u32) -> String {
    let rounded = amount.round_dp(decimals);
    let sign = if rounded.is_negative() { "-" } else { "" };
    format!("{}RM{}", sign, group_thousands(rounded.abs().as_decimal(), decimals))
}

/// percentage with a fixed number of decimals, e.g. `18.88%`
pub fn format_percent(value: Decimal, decimals: u32) -> String {
    format!("{:.*}%", decimals as usize, value.round_dp(decimals))
}

fn group_thousands(value: Decimal, decimals: u32) -> String {
    let text = format!("{:.*}", decimals as usize, value);
    let (whole, fraction) = match text.split_once('.') {
        Some((w, f)) => (w, Some(f)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match fraction {
        Some(f) => format!("{}.{}", grouped, f),
        None => grouped,
    }
}
