//! COP price formatting and parsing

use std::sync::OnceLock;

use regex::Regex;

/// Format whole pesos the way es-CO does: `$2.000.000`
pub fn format_price(pesos: u64) -> String {
    let digits = pesos.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push('$');
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

fn price_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\s*\$?\s*(\d{1,3}(?:[.,]\d{3})+|\d+)\s*(?:COP)?\s*$")
            .expect("price pattern is valid")
    })
}

/// Parse a price written as `1200000`, `$1.200.000`, or `1,200,000 COP`
///
/// Grouping separators are required to sit every three digits; decimals are
/// not accepted since catalog prices are whole pesos.
pub fn parse_price(text: &str) -> Option<u64> {
    let caps = price_pattern().captures(text)?;
    let digits: String = caps[1].chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}
