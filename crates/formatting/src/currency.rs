use kwitansi_core::Nominal;

const CURRENCY_SYMBOL: &str = "Rp";
const GROUP_SEPARATOR: char = '.';

/// Format an amount as Indonesian Rupiah with no fractional digits.
///
/// Accepts a [`Nominal`] (number or numeric text) or `None`. Absent or
/// non-numeric input renders as `Rp 0`.
pub fn format_currency<'a>(amount: impl Into<Option<&'a Nominal>>) -> String {
    let value = amount.into().and_then(Nominal::amount).unwrap_or(0.0);
    format_rupiah(value)
}

/// Format a numeric amount as `Rp 1.234.567`, rounding half away from zero.
#[must_use]
pub fn format_rupiah(value: f64) -> String {
    if !value.is_finite() {
        return format!("{CURRENCY_SYMBOL} 0");
    }
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let grouped = group_thousands(&digits);
    if rounded < 0.0 {
        format!("-{CURRENCY_SYMBOL} {grouped}")
    } else {
        format!("{CURRENCY_SYMBOL} {grouped}")
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(GROUP_SEPARATOR);
        }
        out.push(ch);
    }
    out
}
