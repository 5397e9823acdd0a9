/// Rupiah rendering: fixed `Rp.` prefix, thousands grouped with `.`.
/// 50000 becomes `Rp.50.000`; negative balances keep their sign.
pub fn rupiah(amount: i64) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    let digits = amount.unsigned_abs().to_string();
    let bytes = digits.as_bytes();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 && (bytes.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(*b as char);
    }

    format!("Rp.{sign}{grouped}")
}

/// Parse a user-typed amount. `.` and `,` are accepted as thousands
/// separators and stripped; after that the input must be all decimal
/// digits. Anything else (including overflow) is rejected.
pub fn parse_amount(input: &str) -> Option<i64> {
    let cleaned: String = input
        .trim()
        .chars()
        .filter(|c| *c != '.' && *c != ',')
        .collect();

    if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    cleaned.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_grouped_thousands() {
        assert_eq!(rupiah(0), "Rp.0");
        assert_eq!(rupiah(500), "Rp.500");
        assert_eq!(rupiah(50_000), "Rp.50.000");
        assert_eq!(rupiah(1_500_000), "Rp.1.500.000");
    }

    #[test]
    fn negative_balance_keeps_sign() {
        assert_eq!(rupiah(-15_000), "Rp.-15.000");
    }

    #[test]
    fn accepts_both_separator_styles() {
        assert_eq!(parse_amount("50000"), Some(50_000));
        assert_eq!(parse_amount("50.000"), Some(50_000));
        assert_eq!(parse_amount("50,000"), Some(50_000));
        assert_eq!(parse_amount("  1.234.567 "), Some(1_234_567));
    }

    #[test]
    fn rejects_non_numeric_input() {
        assert_eq!(parse_amount("50a00"), None);
        assert_eq!(parse_amount("-500"), None);
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("."), None);
        assert_eq!(parse_amount("lima ribu"), None);
    }

    #[test]
    fn rejects_overflowing_input() {
        assert_eq!(parse_amount("99999999999999999999999999"), None);
    }
}
