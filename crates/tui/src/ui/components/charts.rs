use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Paragraph},
};

use engine::DailyTotal;

use crate::ui::{
    components::{card::Card, money::format_amount},
    theme::Theme,
};

const LABEL_FORMAT: &str = "%m-%d";
const MIN_BAR_WIDTH: u16 = 5;
const MAX_BAR_WIDTH: u16 = 14;

/// Renders one vertical bar per date with its total printed on top.
///
/// Bar heights are the totals in cents; negative totals get an empty bar but
/// keep their signed label.
pub fn render_daily_totals(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &str,
    series: &[DailyTotal],
    theme: &Theme,
) {
    let total: f64 = series.iter().map(|point| point.total).sum();
    let inner = Card::new(title, theme)
        .note(format!("total {}", format_amount(total)))
        .draw(frame, area);

    if series.is_empty() {
        frame.render_widget(
            Paragraph::new(Line::from("No rows in the selected range."))
                .style(Style::default().fg(theme.text_muted))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let bars: Vec<Bar<'_>> = series
        .iter()
        .map(|point| {
            Bar::default()
                .value(bar_height(point.total))
                .label(Line::from(point.date.format(LABEL_FORMAT).to_string()))
                .text_value(format_amount(point.total))
        })
        .collect();

    let chart = BarChart::default()
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width(inner.width, series))
        .bar_gap(1)
        .bar_style(Style::default().fg(theme.bar))
        .value_style(
            Style::default()
                .fg(theme.text)
                .bg(theme.bar)
                .add_modifier(Modifier::BOLD),
        )
        .label_style(Style::default().fg(theme.text_muted));

    frame.render_widget(chart, inner);
}

fn bar_height(total: f64) -> u64 {
    (total * 100.0).round().max(0.0) as u64
}

/// Wide enough for the value text when there is room, never below the
/// `MM-DD` label.
fn bar_width(available: u16, series: &[DailyTotal]) -> u16 {
    let fit = (usize::from(available) / series.len().max(1)).saturating_sub(1);
    let fit = u16::try_from(fit).unwrap_or(u16::MAX);
    let text = series
        .iter()
        .map(|point| format_amount(point.total).len() as u16)
        .max()
        .unwrap_or(MIN_BAR_WIDTH);
    text.min(fit).clamp(MIN_BAR_WIDTH, MAX_BAR_WIDTH)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn point(day: u32, total: f64) -> DailyTotal {
        DailyTotal {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            total,
        }
    }

    #[test]
    fn heights_are_cents_and_never_negative() {
        assert_eq!(bar_height(150.0), 15_000);
        assert_eq!(bar_height(0.005), 1);
        assert_eq!(bar_height(-20.0), 0);
    }

    #[test]
    fn width_fits_labels_and_screen() {
        let series = [point(1, 1_234_567.0), point(2, 5.0)];
        assert_eq!(bar_width(200, &series), 12);
        assert_eq!(bar_width(8, &series), MIN_BAR_WIDTH);
        assert_eq!(bar_width(200, &[point(1, 1.0)]), MIN_BAR_WIDTH);
    }

    #[test]
    fn width_survives_more_dates_than_columns() {
        let series: Vec<_> = NaiveDate::from_ymd_opt(1900, 1, 1)
            .unwrap()
            .iter_days()
            .take(usize::from(u16::MAX) + 1)
            .map(|date| DailyTotal { date, total: 1.0 })
            .collect();
        assert_eq!(bar_width(200, &series), MIN_BAR_WIDTH);
        assert_eq!(bar_width(u16::MAX, &series), MIN_BAR_WIDTH);
    }
}
