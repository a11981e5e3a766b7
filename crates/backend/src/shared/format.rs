/// Форматирует число с разделителями тысяч (запятыми)
///
/// # Примеры
/// ```ignore
/// assert_eq!(format_number(1234567), "1,234,567");
/// assert_eq!(format_number(42), "42");
/// ```
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

/// Сумма в центах -> "1,234.56"
pub fn format_minor_units(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!(
        "{}{}.{:02}",
        sign,
        format_number((abs / 100) as usize),
        abs % 100
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(42), "42");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn test_format_minor_units() {
        assert_eq!(format_minor_units(5999), "59.99");
        assert_eq!(format_minor_units(0), "0.00");
        assert_eq!(format_minor_units(123456789), "1,234,567.89");
        assert_eq!(format_minor_units(-5), "-0.05");
    }
}
