//! pt-BR display formatting for currency, numbers and dates

use chrono::{Datelike, NaiveDate};

const MONTHS: [&str; 12] = [
    "janeiro", "fevereiro", "março", "abril", "maio", "junho",
    "julho", "agosto", "setembro", "outubro", "novembro", "dezembro",
];

/// Format with `.` thousands separator and `,` decimal mark
///
/// Non-finite values print as zero.
pub fn format_number(value: f64, decimals: usize) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let factor = 10_u64.pow(decimals as u32);
    let scaled = (value.abs() * factor as f64).round() as u64;
    let integer = scaled / factor;
    let fraction = scaled % factor;

    let sign = if value < 0.0 && scaled > 0 { "-" } else { "" };
    let mut out = format!("{sign}{}", group_thousands(integer));
    if decimals > 0 {
        out.push_str(&format!(",{fraction:0decimals$}"));
    }
    out
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

/// Brazilian real, e.g. `R$ 3.110,00` or `-R$ 4.800,00`
pub fn format_currency(value: f64) -> String {
    let amount = format_number(value, 2);
    match amount.strip_prefix('-') {
        Some(abs) => format!("-R$ {abs}"),
        None => format!("R$ {amount}"),
    }
}

/// Percentage with two decimals, e.g. `1,89%`
pub fn format_percent(pct: f64) -> String {
    format!("{}%", format_number(pct, 2))
}

/// Long date, e.g. `05 de março de 2026`
pub fn format_long_date(date: NaiveDate) -> String {
    format!("{:02} de {} de {}", date.day(), MONTHS[date.month0() as usize], date.year())
}
