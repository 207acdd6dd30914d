use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::Backend};

use advisor::Advisor;
use engine::{EntryKind, Store};

use crate::{
    error::{AppError, Result},
    ui::{
        self,
        keymap::{AppAction, map_key},
    },
};

pub use state::{DashboardState, Focus, ReplyState, ToastLevel, ToastState};

mod state;

const PAGE_DAYS: i64 = 30;
const PAGE_ROWS: usize = 10;

pub struct App {
    store: Store,
    advisor: Advisor,
    pub state: DashboardState,
    should_quit: bool,
}

impl App {
    /// Load the first ledger. A store failure here aborts startup.
    pub async fn new(store: Store, advisor: Advisor, kind: EntryKind) -> Result<Self> {
        let ledger = store.load(kind).await?;
        tracing::info!(kind = %kind, rows = ledger.len(), "ledger loaded");

        Ok(Self {
            store,
            advisor,
            state: DashboardState::new(ledger),
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    /// Hand the store back so the caller can close it.
    pub fn into_store(self) -> Store {
        self.store
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        while !self.should_quit {
            self.draw(terminal)?;

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.handle_key(terminal, key).await?
                    }
                    _ => {}
                }
            }
        }

        Ok(())
    }

    fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> Result<()> {
        terminal
            .draw(|frame| ui::render(frame, &self.state, self.advisor.model()))
            .map_err(|err| AppError::Terminal(err.to_string()))?;
        Ok(())
    }

    async fn handle_key<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        key: KeyEvent,
    ) -> Result<()> {
        let action = map_key(key);
        if action != AppAction::None {
            self.state.clear_toast();
        }

        match action {
            AppAction::Quit => self.should_quit = true,
            AppAction::NextField => self.state.focus = self.state.focus.next(),
            AppAction::PrevField => self.state.focus = self.state.focus.prev(),
            AppAction::SwitchKind => self.reload(self.state.kind().toggle()).await,
            AppAction::Reload => self.reload(self.state.kind()).await,
            AppAction::Submit => {
                if self.state.focus == Focus::Question {
                    self.submit_question(terminal).await?;
                } else {
                    self.state.focus = self.state.focus.next();
                }
            }
            AppAction::Backspace => {
                if self.state.focus == Focus::Question {
                    self.state.pop_char();
                }
            }
            AppAction::Up | AppAction::Right => self.step(1, 1),
            AppAction::Down | AppAction::Left => self.step(-1, 1),
            AppAction::PageUp => self.step(PAGE_DAYS, PAGE_ROWS),
            AppAction::PageDown => self.step(-PAGE_DAYS, PAGE_ROWS),
            AppAction::Input(ch) => self.handle_char(ch),
            AppAction::None => {}
        }

        Ok(())
    }

    /// Move the focused control: dates by `days`, the table by `rows`.
    ///
    /// On the table "up" means towards the first row, hence the sign flip.
    fn step(&mut self, days: i64, rows: usize) {
        match self.state.focus {
            Focus::Start | Focus::End => self.state.shift_focused(days),
            Focus::Table if days > 0 => self.state.select_prev(rows),
            Focus::Table => self.state.select_next(rows),
            Focus::Question => {}
        }
    }

    fn handle_char(&mut self, ch: char) {
        if self.state.focus == Focus::Question {
            self.state.push_char(ch);
            return;
        }

        match ch {
            'q' | 'Q' => self.should_quit = true,
            '+' | '=' => self.step(1, 1),
            '-' | '_' => self.step(-1, 1),
            'r' | 'R' => self.state.reset_range(),
            _ => {}
        }
    }

    /// Replace the ledger with a fresh read of `kind`. On failure the
    /// current data stays on screen.
    async fn reload(&mut self, kind: EntryKind) {
        match self.store.load(kind).await {
            Ok(ledger) => {
                tracing::info!(kind = %kind, rows = ledger.len(), "ledger reloaded");
                let rows = ledger.len();
                self.state.replace_ledger(ledger);
                self.state
                    .notify(ToastLevel::Info, format!("{}: {rows} rows", kind.label()));
            }
            Err(err) => {
                tracing::error!(kind = %kind, "reload failed: {err}");
                self.state
                    .notify(ToastLevel::Error, AppError::from(err).to_string());
            }
        }
    }

    /// Send the question with the current filtered rows. The loop is blocked
    /// until the service answers, so only one request is ever in flight.
    async fn submit_question<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let Some(question) = self.state.prepare_question() else {
            return Ok(());
        };

        self.draw(terminal)?;
        let reply = self.advisor.ask(&question, &self.state.report.rows).await;
        if let Err(err) = &reply {
            tracing::error!("chat request failed: {err}");
        }
        self.state.apply_reply(reply);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::backend::TestBackend;
    use sea_orm::{ConnectionTrait, Database, DatabaseConnection};

    use advisor::AdvisorConfig;
    use engine::DateRange;
    use migration::{Migrator, MigratorTrait};

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn seeded_db() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        db.execute_unprepared(
            "INSERT INTO ingressos VALUES \
             ('R-1', 'P-1', '2024-01-01', 100.0), \
             ('R-2', 'P-1', '2024-01-01', 50.0), \
             ('R-3', 'P-2', '2024-01-02', 200.0)",
        )
        .await
        .unwrap();
        db
    }

    /// Chat endpoint on a port nothing listens on: any request fails.
    async fn offline_advisor() -> Advisor {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        Advisor::new(AdvisorConfig {
            base_url: format!("http://{addr}/v1"),
            ..AdvisorConfig::new("sk-test")
        })
        .unwrap()
    }

    async fn app(db: &DatabaseConnection) -> App {
        let store = Store::builder().database(db.clone()).build().unwrap();
        App::new(store, offline_advisor().await, EntryKind::Ingressos)
            .await
            .unwrap()
    }

    fn terminal() -> Terminal<TestBackend> {
        Terminal::new(TestBackend::new(100, 40)).unwrap()
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    fn enter() -> KeyEvent {
        KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)
    }

    fn toast_level(app: &App) -> Option<ToastLevel> {
        app.state.toast.as_ref().map(|toast| toast.level)
    }

    #[tokio::test]
    async fn switching_kind_reseeds_range_from_new_bounds() {
        let db = seeded_db().await;
        db.execute_unprepared(
            "INSERT INTO registros VALUES \
             ('R-9', 'P-9', '2024-06-03', 3.0), \
             ('R-8', 'P-9', '2024-06-01', 1.0)",
        )
        .await
        .unwrap();
        let mut app = app(&db).await;
        app.state.shift_focused(1);

        app.handle_key(&mut terminal(), ctrl('l')).await.unwrap();

        let bounds = Some(DateRange::new(date(2024, 6, 1), date(2024, 6, 3)));
        assert_eq!(app.state.kind(), EntryKind::Registros);
        assert_eq!(app.state.bounds, bounds);
        assert_eq!(app.state.range, bounds);
        assert_eq!(app.state.report.row_count(), 2);
        assert_eq!(app.state.report.kind, EntryKind::Registros);
        assert_eq!(toast_level(&app), Some(ToastLevel::Info));
    }

    #[tokio::test]
    async fn failed_reload_keeps_current_data() {
        let db = seeded_db().await;
        let mut app = app(&db).await;
        app.state.focus = Focus::End;
        app.handle_key(&mut terminal(), KeyEvent::new(KeyCode::Down, KeyModifiers::NONE))
            .await
            .unwrap();

        let ledger = app.state.ledger.clone();
        let range = app.state.range;
        let report = app.state.report.clone();
        assert_eq!(range, Some(DateRange::day(date(2024, 1, 1))));

        db.execute_unprepared("DROP TABLE registros").await.unwrap();
        app.handle_key(&mut terminal(), ctrl('l')).await.unwrap();

        assert_eq!(app.state.kind(), EntryKind::Ingressos);
        assert_eq!(app.state.ledger, ledger);
        assert_eq!(app.state.range, range);
        assert_eq!(app.state.report, report);
        assert_eq!(toast_level(&app), Some(ToastLevel::Error));
        assert!(!app.should_quit);
    }

    #[tokio::test]
    async fn blank_question_is_not_sent() {
        let db = seeded_db().await;
        let mut app = app(&db).await;
        app.state.focus = Focus::Question;
        app.state.question = "   ".to_string();

        app.handle_key(&mut terminal(), enter()).await.unwrap();

        assert_eq!(app.state.reply, ReplyState::Idle);
        assert_eq!(toast_level(&app), Some(ToastLevel::Warning));
    }

    #[tokio::test]
    async fn service_failure_is_shown_and_keeps_report() {
        let db = seeded_db().await;
        let mut app = app(&db).await;
        let report = app.state.report.clone();
        app.state.focus = Focus::Question;
        app.state.question = "Which day had the highest total?".to_string();

        app.handle_key(&mut terminal(), enter()).await.unwrap();

        assert!(matches!(app.state.reply, ReplyState::Failed(_)));
        assert_eq!(toast_level(&app), Some(ToastLevel::Error));
        assert_eq!(app.state.report, report);
        assert_eq!(app.state.question, "Which day had the highest total?");
    }
}
