use std::{
    io::{Stdout, stdout},
    panic,
};

use crossterm::{
    cursor::Show,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::error::Result;

pub type AppTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Raw mode plus alternate screen. Pair every call with [`restore_terminal`].
///
/// A panic while the dashboard is up leaves the screen first, so the message
/// lands in the normal shell.
pub fn setup_terminal() -> Result<AppTerminal> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    if let Err(err) = crossterm::execute!(stdout, EnterAlternateScreen) {
        disable_raw_mode()?;
        return Err(err.into());
    }

    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = leave_screen();
        default_hook(info);
    }));

    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;
    Ok(terminal)
}

pub fn restore_terminal(terminal: &mut AppTerminal) -> Result<()> {
    let _ = panic::take_hook();
    leave_screen()?;
    terminal.show_cursor()?;
    Ok(())
}

fn leave_screen() -> std::io::Result<()> {
    disable_raw_mode()?;
    crossterm::execute!(stdout(), LeaveAlternateScreen, Show)
}
