//! Presentation helpers for rates and currency amounts

/// Replacement rate rounded to two decimals with a percent sign (`64.64%`)
pub fn format_rate(rate_percent: f64) -> String {
    format!("{:.2}%", rate_percent)
}

/// Currency amount rounded to whole pesos and grouped by thousands (`$1,939,299`)
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("${}", amount);
    }

    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());

    format!("{}${}", sign, group_thousands(&digits))
}

/// Insert a comma every three digits from the right
fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
