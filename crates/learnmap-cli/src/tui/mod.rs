//! Interactive graph view.
//!
//! Renders the stage graph on a braille canvas with:
//! - Mouse drag to move knowledge points, click to open details
//! - Centre / zoom / learning-path highlight keys
//! - Pulsing glow on highlighted nodes and a grow-in entrance

mod app;
mod components;
mod event;
mod ui;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io::stdout;

use app::App;
use learnmap_core::Config;

use crate::commands::Session;

/// Run the TUI application.
pub async fn run(config: Config, session: Session) -> color_eyre::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&config, session);

    let result = app.run(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}
