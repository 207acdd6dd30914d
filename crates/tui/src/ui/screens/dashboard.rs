use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Cell, Paragraph, Row, Table, TableState, Wrap},
};

use engine::{DATE_FORMAT, DateRange, EntryColumn};

use crate::{
    app::{DashboardState, Focus, ReplyState},
    ui::{
        components::{card::Card, charts, money::format_amount},
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &DashboardState, model: &str) {
    let theme = Theme::default();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),      // Date range
            Constraint::Percentage(40), // Chart
            Constraint::Min(6),         // Table
            Constraint::Length(3),      // Question
            Constraint::Length(8),      // Reply
        ])
        .split(area);

    render_range(frame, layout[0], state, &theme);
    charts::render_daily_totals(
        frame,
        layout[1],
        "Sum of entered amounts by date",
        &state.report.series,
        &theme,
    );
    render_table(frame, layout[2], state, &theme);
    render_question(frame, layout[3], state, &theme);
    render_reply(frame, layout[4], state, model, &theme);
}

fn render_range(frame: &mut Frame<'_>, area: Rect, state: &DashboardState, theme: &Theme) {
    let focused = state.focus.is_date();
    let card = Card::new("Date range", theme).focused(focused);

    let line = match state.range {
        Some(range) => {
            let mut spans = vec![
                Span::styled("Start ", Style::default().fg(theme.text_muted)),
                date_field(range.start.format(DATE_FORMAT).to_string(), state.focus == Focus::Start, theme),
                Span::styled("   End ", Style::default().fg(theme.text_muted)),
                date_field(range.end.format(DATE_FORMAT).to_string(), state.focus == Focus::End, theme),
            ];
            if range.is_inverted() {
                spans.push(Span::styled(
                    "   start is after end, nothing selected",
                    Style::default().fg(theme.warning),
                ));
            } else {
                spans.push(Span::styled(
                    format!("   {} days", range.days()),
                    Style::default().fg(theme.text_muted),
                ));
            }
            Line::from(spans)
        }
        None => Line::from(Span::styled(
            "Start -   End -   no dates available",
            Style::default().fg(theme.text_muted),
        )),
    };

    card.render_with(frame, area, Paragraph::new(line));
}

fn date_field(value: String, focused: bool, theme: &Theme) -> Span<'static> {
    if focused {
        Span::styled(
            format!("[{value}]"),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(format!(" {value} "), Style::default().fg(theme.text))
    }
}

fn render_table(frame: &mut Frame<'_>, area: Rect, state: &DashboardState, theme: &Theme) {
    let title = format!("{} table", state.kind().label());
    let inner = Card::new(&title, theme)
        .focused(state.focus == Focus::Table)
        .note(format!("{} rows", state.report.row_count()))
        .draw(frame, area);

    if state.report.is_empty() {
        frame.render_widget(
            Paragraph::new(Line::from("No rows."))
                .style(Style::default().fg(theme.text_muted))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let header = Row::new(EntryColumn::ALL.map(|column| {
        let cell = Line::from(column.name());
        if matches!(column, EntryColumn::EnteredAmount) {
            Cell::from(cell.alignment(Alignment::Right))
        } else {
            Cell::from(cell)
        }
    }))
    .style(
        Style::default()
            .fg(theme.text_muted)
            .add_modifier(Modifier::BOLD),
    );

    let rows = state.report.rows.iter().map(|record| {
        Row::new([
            Cell::from(record.code_scale.as_str()),
            Cell::from(record.code_project.as_str()),
            Cell::from(record.entry_date.format(DATE_FORMAT).to_string()),
            Cell::from(Text::from(
                Line::from(format_amount(record.entered_amount)).alignment(Alignment::Right),
            )),
        ])
        .style(Style::default().fg(theme.text))
    });

    let table = Table::new(
        rows,
        [
            Constraint::Min(12),
            Constraint::Min(14),
            Constraint::Length(12),
            Constraint::Min(16),
        ],
    )
    .header(header)
    .column_spacing(2)
    .row_highlight_style(
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::REVERSED),
    );

    let mut table_state = TableState::default();
    if state.focus == Focus::Table {
        table_state.select(Some(state.selected_row));
    } else {
        *table_state.offset_mut() = state.selected_row;
    }
    frame.render_stateful_widget(table, inner, &mut table_state);
}

fn render_question(frame: &mut Frame<'_>, area: Rect, state: &DashboardState, theme: &Theme) {
    let focused = state.focus == Focus::Question;
    let card = Card::new("Ask about the data", theme).focused(focused);

    let content = if state.question.is_empty() && !focused {
        Span::styled(
            "Type your question based on the data",
            Style::default().fg(theme.text_muted),
        )
    } else {
        let cursor = if focused { "│" } else { "" };
        Span::styled(
            format!("{}{cursor}", state.question),
            Style::default().fg(if focused { theme.accent } else { theme.text }),
        )
    };

    card.render_with(frame, area, Paragraph::new(Line::from(content)));
}

fn render_reply(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &DashboardState,
    model: &str,
    theme: &Theme,
) {
    let title = format!("Reply ({model})");
    let card = Card::new(&title, theme);

    let paragraph = match &state.reply {
        ReplyState::Idle => Paragraph::new("").style(Style::default().fg(theme.text_muted)),
        ReplyState::Pending => {
            Paragraph::new("Waiting for the reply…").style(Style::default().fg(theme.text_muted))
        }
        ReplyState::Answer(answer) => {
            Paragraph::new(answer.as_str()).style(Style::default().fg(theme.text))
        }
        ReplyState::Failed(message) => {
            Paragraph::new(message.as_str()).style(Style::default().fg(theme.error))
        }
    };

    card.render_with(frame, area, paragraph.wrap(Wrap { trim: false }));
}

/// Summary shown in the info bar: `start → end` or `-` when there is no data.
pub fn range_label(range: Option<DateRange>) -> String {
    range.map_or_else(|| "-".to_string(), |range| range.to_string())
}
