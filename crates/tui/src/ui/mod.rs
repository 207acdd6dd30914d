pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

use crate::app::DashboardState;

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &DashboardState, model: &str) {
    let area = frame.area();
    let theme = Theme::default();
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.background)),
        area,
    );

    // Main layout: info bar, content, bottom bar
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info bar
            Constraint::Min(0),    // Dashboard
            Constraint::Length(1), // Bottom bar
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, &theme);
    screens::dashboard::render(frame, layout[1], state, model);
    render_bottom_bar(frame, layout[2], state, &theme);
    components::toast::render(frame, area, state.toast.as_ref());
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &DashboardState, theme: &Theme) {
    let line = Line::from(vec![
        Span::styled("Ledger", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {}  ", state.kind().label())),
        Span::styled("Data", Style::default().fg(theme.text_muted)),
        Span::raw(format!(
            ": {}  ",
            screens::dashboard::range_label(state.bounds)
        )),
        Span::styled("Rows", Style::default().fg(theme.text_muted)),
        Span::raw(format!(
            ": {}/{}  ",
            state.report.row_count(),
            state.ledger.len()
        )),
        Span::styled("Total", Style::default().fg(theme.text_muted)),
        Span::raw(": "),
        components::money::styled_amount(state.report.grand_total(), theme),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &DashboardState, theme: &Theme) {
    let mut parts = components::hints::hints_to_spans(
        &components::hints::for_focus(state.focus),
        theme,
    );
    parts.push(components::hints::hint_separator(theme));
    parts.extend(components::hints::hints_to_spans(
        &components::hints::global(),
        theme,
    ));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}
