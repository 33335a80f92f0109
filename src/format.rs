//! Display Formatting
//!
//! Pure helpers for pt-BR locale formatting of counts, currency,
//! percentages and day counts, plus lenient parsing of the decimal
//! strings the backend exports with comma separators.

/// Group an unsigned integer with `.` thousands separators ("1.234.567").
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - offset) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// Compact large values: 1.2M, 345K, otherwise grouped digits.
///
/// Mirrors the backend's card formatting so cards and exports agree.
pub fn format_compact(value: f64, prefix: &str) -> String {
    if !value.is_finite() || value == 0.0 {
        return format!("{}0", prefix);
    }

    let abs = value.abs();
    let sign = if value < 0.0 { "-" } else { "" };

    if abs >= 1_000_000.0 {
        format!("{}{}{:.1}M", prefix, sign, abs / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{}{}{:.0}K", prefix, sign, abs / 1_000.0)
    } else {
        format!("{}{}{}", prefix, sign, format_count(abs.round() as u64))
    }
}

/// Currency with pt-BR grouping and two decimals: "R$ 1.234,56".
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return "R$ 0,00".to_string();
    }

    let sign = if value < 0.0 { "-" } else { "" };
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    format!("{}R$ {},{:02}", sign, format_count(whole), frac)
}

/// Percentage with one decimal: "80.0%".
///
/// Keeps the `.` decimal point of the card trend contract
/// ("80.0% da base") rather than the comma of currency values.
pub fn format_percent(value: f64) -> String {
    if !value.is_finite() {
        return "0.0%".to_string();
    }
    format!("{:.1}%", value)
}

/// Day counts: "42 dias", or "N/A" when absent.
pub fn format_days(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{} dias", format_count(v.round().max(0.0) as u64)),
        _ => "N/A".to_string(),
    }
}

/// Blank or absent optional strings become "N/A".
pub fn or_na(value: Option<&str>) -> String {
    match value {
        Some(s) if !s.trim().is_empty() => s.trim().to_string(),
        _ => "N/A".to_string(),
    }
}

/// Lenient decimal parsing for backend strings like "1.234,56" or "R$ 987,5".
///
/// Commas become decimal points, currency symbols and spaces are stripped,
/// and when several points remain all but the last are treated as grouping.
pub fn parse_decimal_flexible(raw: &str) -> Option<f64> {
    let normalized: String = raw
        .replace(',', ".")
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    if normalized.is_empty() {
        return None;
    }

    let candidate = match normalized.matches('.').count() {
        0 | 1 => normalized,
        _ => {
            // "1.234.56" -> "1234.56"
            let last = normalized.rfind('.').unwrap_or(0);
            let (head, tail) = normalized.split_at(last);
            format!("{}{}", head.replace('.', ""), tail)
        }
    };

    candidate.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count_groups_thousands() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_234), "1.234");
        assert_eq!(format_count(1_234_567), "1.234.567");
    }

    #[test]
    fn test_format_compact() {
        assert_eq!(format_compact(0.0, "R$ "), "R$ 0");
        assert_eq!(format_compact(345_000.0, ""), "345K");
        assert_eq!(format_compact(1_200_000.0, "R$ "), "R$ 1.2M");
        assert_eq!(format_compact(842.0, ""), "842");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "R$ 0,00");
        assert_eq!(format_currency(1234.5), "R$ 1.234,50");
        assert_eq!(format_currency(-42.217), "-R$ 42,22");
    }

    #[test]
    fn test_format_percent_one_decimal() {
        assert_eq!(format_percent(80.0), "80.0%");
        assert_eq!(format_percent(15.04), "15.0%");
        assert_eq!(format_percent(f64::NAN), "0.0%");
    }

    #[test]
    fn test_format_days() {
        assert_eq!(format_days(Some(42.4)), "42 dias");
        assert_eq!(format_days(None), "N/A");
    }

    #[test]
    fn test_or_na() {
        assert_eq!(or_na(Some("Papelaria Sul")), "Papelaria Sul");
        assert_eq!(or_na(Some("   ")), "N/A");
        assert_eq!(or_na(None), "N/A");
    }

    #[test]
    fn test_parse_decimal_flexible() {
        assert_eq!(parse_decimal_flexible("1234,56"), Some(1234.56));
        assert_eq!(parse_decimal_flexible("1.234,56"), Some(1234.56));
        assert_eq!(parse_decimal_flexible("R$ 987,5"), Some(987.5));
        assert_eq!(parse_decimal_flexible("942"), Some(942.0));
        assert_eq!(parse_decimal_flexible("abc"), None);
        assert_eq!(parse_decimal_flexible(""), None);
    }
}
