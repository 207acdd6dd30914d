use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Widget},
};

use crate::ui::theme::Theme;

/// Rounded panel every dashboard section is drawn in. The title sits on the
/// left; an optional note (row count, total) is right-aligned on the same
/// border.
pub struct Card<'a> {
    title: &'a str,
    note: Option<String>,
    theme: &'a Theme,
    focused: bool,
}

impl<'a> Card<'a> {
    pub fn new(title: &'a str, theme: &'a Theme) -> Self {
        Self {
            title,
            note: None,
            theme,
            focused: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    fn block(&self) -> Block<'a> {
        let border = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border
        };

        let mut block = Block::default()
            .title(Span::styled(
                format!(" {} ", self.title),
                Style::default().fg(self.theme.accent),
            ))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(self.theme.surface));
        if let Some(note) = &self.note {
            block = block.title_top(
                Line::from(Span::styled(
                    format!(" {note} "),
                    Style::default().fg(self.theme.text_muted),
                ))
                .right_aligned(),
            );
        }
        block
    }

    /// Draw the border and return the area left for content.
    pub fn draw(&self, frame: &mut Frame<'_>, area: Rect) -> Rect {
        let block = self.block();
        let inner = block.inner(area);
        frame.render_widget(block, area);
        inner
    }

    pub fn render_with<W: Widget>(&self, frame: &mut Frame<'_>, area: Rect, content: W) {
        let inner = self.draw(frame, area);
        frame.render_widget(content, inner);
    }
}
