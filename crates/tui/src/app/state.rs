use advisor::AdvisorError;
use engine::{DateRange, EntryKind, Ledger, Report, shift_date};

use crate::error::{AppError, Result};

const EMPTY_QUESTION: &str = "Type a question before submitting.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Start,
    End,
    Table,
    Question,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Self::Start => Self::End,
            Self::End => Self::Table,
            Self::Table => Self::Question,
            Self::Question => Self::Start,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Start => Self::Question,
            Self::End => Self::Start,
            Self::Table => Self::End,
            Self::Question => Self::Table,
        }
    }

    pub fn is_date(self) -> bool {
        matches!(self, Self::Start | Self::End)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastState {
    pub message: String,
    pub level: ToastLevel,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ReplyState {
    #[default]
    Idle,
    Pending,
    Answer(String),
    Failed(String),
}

/// Everything the dashboard shows, rebuilt from the ledger on every change.
#[derive(Debug)]
pub struct DashboardState {
    pub ledger: Ledger,
    /// Observed date bounds of `ledger`; `None` when it has no rows.
    pub bounds: Option<DateRange>,
    /// Selected range; seeded with `bounds`.
    pub range: Option<DateRange>,
    pub report: Report,
    pub focus: Focus,
    pub selected_row: usize,
    pub question: String,
    pub reply: ReplyState,
    pub toast: Option<ToastState>,
}

impl DashboardState {
    pub fn new(ledger: Ledger) -> Self {
        let mut state = Self {
            ledger: Ledger::default(),
            bounds: None,
            range: None,
            report: Report::default(),
            focus: Focus::Start,
            selected_row: 0,
            question: String::new(),
            reply: ReplyState::Idle,
            toast: None,
        };
        state.replace_ledger(ledger);
        state
    }

    pub fn kind(&self) -> EntryKind {
        self.ledger.kind
    }

    /// Swap in freshly loaded data and reseed the range with its bounds.
    pub fn replace_ledger(&mut self, ledger: Ledger) {
        self.bounds = ledger.bounds();
        self.range = self.bounds;
        self.ledger = ledger;
        self.selected_row = 0;
        self.refresh();
    }

    fn refresh(&mut self) {
        self.report = Report::build(&self.ledger.select(self.range));
        self.selected_row = self
            .selected_row
            .min(self.report.row_count().saturating_sub(1));
    }

    pub fn reset_range(&mut self) {
        self.range = self.bounds;
        self.refresh();
    }

    /// Move the focused date by `days`, staying inside the observed bounds.
    pub fn shift_focused(&mut self, days: i64) {
        let (Some(range), Some(bounds)) = (self.range, self.bounds) else {
            return;
        };
        let moved = match self.focus {
            Focus::Start => DateRange::new(shift_date(range.start, days), range.end),
            Focus::End => DateRange::new(range.start, shift_date(range.end, days)),
            Focus::Table | Focus::Question => return,
        };
        self.range = Some(moved.clamp_to(bounds));
        self.refresh();
    }

    pub fn select_next(&mut self, step: usize) {
        if self.report.is_empty() {
            return;
        }
        self.selected_row = (self.selected_row + step).min(self.report.row_count() - 1);
    }

    pub fn select_prev(&mut self, step: usize) {
        self.selected_row = self.selected_row.saturating_sub(step);
    }

    pub fn push_char(&mut self, ch: char) {
        self.question.push(ch);
    }

    pub fn pop_char(&mut self) {
        self.question.pop();
    }

    /// Validate the question and mark the reply as pending.
    ///
    /// A blank question only raises a warning and leaves the reply as it was.
    pub fn prepare_question(&mut self) -> Option<String> {
        match validate_question(&self.question) {
            Ok(question) => {
                self.reply = ReplyState::Pending;
                Some(question)
            }
            Err(err) => {
                self.notify(ToastLevel::Warning, err.to_string());
                None
            }
        }
    }

    /// Store the outcome of a chat request. Chart and table are not touched.
    pub fn apply_reply(&mut self, reply: std::result::Result<String, AdvisorError>) {
        match reply {
            Ok(answer) => self.reply = ReplyState::Answer(answer),
            Err(err) => {
                let message = AppError::from(err).to_string();
                self.notify(ToastLevel::Error, message.clone());
                self.reply = ReplyState::Failed(message);
            }
        }
    }

    pub fn notify(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(ToastState {
            message: message.into(),
            level,
        });
    }

    pub fn clear_toast(&mut self) {
        self.toast = None;
    }
}

pub fn validate_question(question: &str) -> Result<String> {
    let question = question.trim();
    if question.is_empty() {
        return Err(AppError::Validation(EMPTY_QUESTION.to_string()));
    }
    Ok(question.to_string())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use engine::EntryRecord;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn state() -> DashboardState {
        DashboardState::new(Ledger::new(
            EntryKind::Ingressos,
            vec![
                EntryRecord::new("A", "P1", date(2024, 1, 1), 100.0),
                EntryRecord::new("B", "P1", date(2024, 1, 1), 50.0),
                EntryRecord::new("C", "P2", date(2024, 1, 2), 200.0),
            ],
        ))
    }

    #[test]
    fn range_is_seeded_with_bounds() {
        let state = state();
        let bounds = DateRange::new(date(2024, 1, 1), date(2024, 1, 2));
        assert_eq!(state.bounds, Some(bounds));
        assert_eq!(state.range, Some(bounds));
        assert_eq!(state.report.row_count(), 3);
        assert_eq!(state.report.series.len(), 2);
    }

    #[test]
    fn shifting_dates_is_clamped_to_bounds() {
        let mut state = state();
        state.focus = Focus::End;
        state.shift_focused(10);
        assert_eq!(state.range.unwrap().end, date(2024, 1, 2));

        state.focus = Focus::Start;
        state.shift_focused(-10);
        assert_eq!(state.range.unwrap().start, date(2024, 1, 1));
    }

    #[test]
    fn start_past_end_selects_nothing() {
        let mut state = state();
        state.focus = Focus::End;
        state.shift_focused(-1);
        state.focus = Focus::Start;
        state.shift_focused(1);

        let range = state.range.unwrap();
        assert!(range.is_inverted());
        assert!(state.report.is_empty());
        assert!(state.report.series.is_empty());
        assert_eq!(state.selected_row, 0);

        state.reset_range();
        assert_eq!(state.report.row_count(), 3);
    }

    #[test]
    fn empty_ledger_has_no_range() {
        let mut state = DashboardState::new(Ledger::new(EntryKind::Registros, Vec::new()));
        assert_eq!(state.range, None);
        state.shift_focused(1);
        assert_eq!(state.range, None);
        assert!(state.report.is_empty());
        state.select_next(1);
        assert_eq!(state.selected_row, 0);
        assert_eq!(state.kind(), EntryKind::Registros);
    }

    #[test]
    fn blank_question_warns_and_is_not_sent() {
        let mut state = state();
        state.question = "   ".to_string();
        assert_eq!(state.prepare_question(), None);
        assert_eq!(state.reply, ReplyState::Idle);
        assert_eq!(
            state.toast.as_ref().map(|toast| toast.level),
            Some(ToastLevel::Warning)
        );
        assert!(matches!(
            validate_question(""),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn question_is_trimmed_and_marks_reply_pending() {
        let mut state = state();
        for ch in "  total? ".chars() {
            state.push_char(ch);
        }
        state.pop_char();
        assert_eq!(state.prepare_question().as_deref(), Some("total?"));
        assert_eq!(state.reply, ReplyState::Pending);
    }

    #[test]
    fn failed_reply_keeps_chart_and_table() {
        let mut state = state();
        let before = state.report.clone();
        state.question = "total?".to_string();
        state.prepare_question();

        state.apply_reply(Err(AdvisorError::EmptyReply));
        assert_eq!(state.report, before);
        assert!(matches!(state.reply, ReplyState::Failed(_)));
        assert_eq!(
            state.toast.as_ref().map(|toast| toast.level),
            Some(ToastLevel::Error)
        );

        state.apply_reply(Ok("350".to_string()));
        assert_eq!(state.reply, ReplyState::Answer("350".to_string()));
    }

    #[test]
    fn table_selection_stays_within_rows() {
        let mut state = state();
        state.select_next(10);
        assert_eq!(state.selected_row, 2);
        state.select_prev(1);
        assert_eq!(state.selected_row, 1);

        state.focus = Focus::End;
        state.shift_focused(-1);
        assert_eq!(state.report.row_count(), 2);
        assert_eq!(state.selected_row, 1);
    }

    #[test]
    fn focus_cycles_through_fields() {
        let mut focus = Focus::Start;
        for _ in 0..4 {
            focus = focus.next();
        }
        assert_eq!(focus, Focus::Start);
        assert_eq!(Focus::Start.prev(), Focus::Question);
        assert!(Focus::End.is_date());
        assert!(!Focus::Question.is_date());
    }
}
