//! TUI mode execution

use super::{
    SessionData,
    messages::{print_session_exit_success, print_session_starting},
};
use crate::controller::Controller;
use crate::navigation::Section;
use crate::ui::{self, UIConfig};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{error::Error, io};

/// Runs the application in TUI mode
///
/// This function handles:
/// 1. Terminal setup and cleanup
/// 2. UI application initialization and execution
///
/// The logger must already write to a file; anything printed to the terminal
/// while the alternate screen is active would corrupt the display.
pub async fn run_tui_mode(
    session: SessionData,
    initial: Section,
    with_background: bool,
) -> Result<(), Box<dyn Error>> {
    print_session_starting(initial, &session.environment);

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    // Initialize the terminal with Crossterm backend
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (controller, updates) = Controller::new(session.api, session.export_dir, initial);
    let app = ui::App::new(controller, updates, UIConfig::new(with_background));

    let result = ui::run(&mut terminal, app).await;

    // Clean up the terminal after running the application
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result?;
    log::info!("Console closed");
    print_session_exit_success();

    Ok(())
}
