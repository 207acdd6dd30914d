use ratatui::{style::Style, text::Span};

use crate::ui::theme::Theme;

/// Two decimals with `,` thousands separators, e.g. `-1,234.50`.
///
/// Only the display is rounded; totals keep their full precision.
#[must_use]
pub fn format_amount(amount: f64) -> String {
    let formatted = format!("{:.2}", amount.abs());
    let (units, decimals) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(units.len() + units.len() / 3);
    for (i, digit) in units.chars().enumerate() {
        if i > 0 && (units.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && formatted != "0.00" {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped}.{decimals}")
}

/// Amount span colored by sign.
#[must_use]
pub fn styled_amount(amount: f64, theme: &Theme) -> Span<'static> {
    let color = if amount > 0.0 {
        theme.positive
    } else if amount < 0.0 {
        theme.negative
    } else {
        theme.text
    };

    Span::styled(format_amount(amount), Style::default().fg(color))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands_and_rounds_to_cents() {
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(999.999), "1,000.00");
        assert_eq!(format_amount(1234.5), "1,234.50");
        assert_eq!(format_amount(1234567.891), "1,234,567.89");
        assert_eq!(format_amount(-98765.4), "-98,765.40");
        assert_eq!(format_amount(-0.001), "0.00");
    }
}
