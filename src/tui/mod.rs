// TUI module for the interactive debate chat
mod app;
mod events;
mod layout;
mod rendering;
mod timestamps;

use std::io;

use anyhow::Result;
pub use app::App;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::config::ApiConfig;
use crate::session::SessionStore;

/// Run the interactive TUI
pub fn run_interactive(
    config: ApiConfig,
    store: SessionStore,
    conversation_id: Option<&str>,
) -> Result<()> {
    let mut app = App::new(config, store, conversation_id)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run event loop
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}
