//! Locale-aware number formatting backing the template helpers.

use serde::{Deserialize, Serialize};

/// Separator characters used when formatting grouped numbers.
///
/// The default matches the `en-US` locale (`1,234,567.89`). There is no
/// ambient-locale detection; the active locale is whatever the configuration
/// says it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberLocale {
    /// Thousands separator inserted between digit groups.
    pub group: char,
    /// Decimal separator between the integer and fractional parts.
    pub decimal: char,
}
impl Default for NumberLocale {
    fn default() -> Self {
        Self { group: ',', decimal: '.' }
    }
}

/// Formats a float with grouping separators, preserving any fractional part
/// as produced by the float's shortest display form.
pub(crate) fn format_grouped(value: f64, locale: NumberLocale) -> String {
    let rendered = value.to_string();
    let (integer, fraction) = match rendered.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (rendered, None),
    };
    let (sign, digits) = match integer.strip_prefix('-') {
        Some(digits) => ("-", digits),
        None => ("", integer.as_str()),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(locale.group);
        }
        grouped.push(digit);
    }

    match fraction {
        Some(fraction) => format!("{sign}{grouped}{}{fraction}", locale.decimal),
        None => format!("{sign}{grouped}"),
    }
}

/// Formats a float to exactly one decimal place.
pub(crate) fn format_fixed(value: f64) -> String {
    format!("{value:.1}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1_234_567.0, "1,234,567")]
    #[case(1_000.0, "1,000")]
    #[case(999.0, "999")]
    #[case(0.0, "0")]
    #[case(-1_234_567.0, "-1,234,567")]
    #[case(1_234_567.25, "1,234,567.25")]
    fn test_groups_with_default_locale(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(format_grouped(value, NumberLocale::default()), expected);
    }

    #[test]
    fn test_groups_with_european_locale() {
        let locale = NumberLocale { group: '.', decimal: ',' };
        assert_eq!(format_grouped(1_234_567.5, locale), "1.234.567,5");
    }

    #[rstest]
    #[case(1234.567, "1234.6")]
    #[case(4.0, "4.0")]
    #[case(4.96, "5.0")]
    #[case(0.0, "0.0")]
    fn test_fixed_one_decimal_place(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(format_fixed(value), expected);
    }
}
