use ratatui::{style::Style, text::Span};

use crate::{app::Focus, ui::theme::Theme};

/// A keyboard hint consisting of a key and its action.
#[derive(Debug, Clone)]
pub struct KeyHint {
    pub key: &'static str,
    pub action: &'static str,
}

impl KeyHint {
    pub const fn new(key: &'static str, action: &'static str) -> Self {
        Self { key, action }
    }
}

/// Converts a list of key hints into styled spans for rendering.
pub fn hints_to_spans(hints: &[KeyHint], theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::new();

    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(hint.key, Style::default().fg(theme.accent)));
        spans.push(Span::raw(format!(" {}", hint.action)));
    }

    spans
}

/// Creates a separator span for dividing hint groups.
pub fn hint_separator(theme: &Theme) -> Span<'static> {
    Span::styled("  │  ", Style::default().fg(theme.border))
}

/// Hints for the focused control.
pub fn for_focus(focus: Focus) -> Vec<KeyHint> {
    match focus {
        Focus::Start | Focus::End => vec![
            KeyHint::new("↑↓/+-", "day"),
            KeyHint::new("PgUp/PgDn", "30 days"),
            KeyHint::new("r", "full range"),
        ],
        Focus::Table => vec![
            KeyHint::new("↑↓", "scroll"),
            KeyHint::new("PgUp/PgDn", "page"),
        ],
        Focus::Question => vec![KeyHint::new("Enter", "ask")],
    }
}

/// Shortcuts available everywhere.
pub fn global() -> Vec<KeyHint> {
    vec![
        KeyHint::new("Tab", "next"),
        KeyHint::new("Ctrl+L", "ledger"),
        KeyHint::new("Ctrl+R", "reload"),
        KeyHint::new("Esc", "quit"),
    ]
}
