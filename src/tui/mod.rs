//! Terminal User Interface (TUI) for streaks.
//!
//! Provides the interactive habit grid. Built with ratatui and crossterm.
//! While the grid is open, stored reminders are armed; fired reminders
//! appear on the status line.

mod app;
mod event;
mod ui;

pub use app::{App, Mode};

use std::io;
use std::sync::mpsc;
use std::sync::Arc;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use crate::config::Config;
use crate::error::StreaksError;
use crate::features::reminders::{ChannelNotifier, ReminderScheduler};
use crate::habits::HabitStore;

/// Run the TUI application.
///
/// # Errors
///
/// Returns an error if the TUI fails to initialize or run.
pub fn run(store: HabitStore) -> Result<(), StreaksError> {
    let config = Config::load()?;

    // Reminders fire on timer threads and land here
    let (tx, rx) = mpsc::channel();
    let scheduler = ReminderScheduler::new(Arc::new(ChannelNotifier::new(tx)));

    // Setup terminal
    enable_raw_mode().map_err(|e| StreaksError::Config(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .map_err(|e| StreaksError::Config(format!("Failed to setup terminal: {e}")))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .map_err(|e| StreaksError::Config(format!("Failed to create terminal: {e}")))?;

    // Create app state and run main loop
    let mut app = App::new(store, scheduler, &config)?;
    let result = run_app(&mut terminal, &mut app, &rx);

    // Cancel pending timers before the terminal is restored
    app.shutdown();

    // Restore terminal
    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .ok();
    terminal.show_cursor().ok();

    result
}

/// Run the main application loop.
fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    reminders: &mpsc::Receiver<String>,
) -> Result<(), StreaksError> {
    loop {
        // Surface fired reminders on the status line
        while let Ok(name) = reminders.try_recv() {
            app.status = Some(format!("Reminder: time to do '{name}'!"));
        }

        // Draw UI
        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| StreaksError::Config(format!("Failed to draw: {e}")))?;

        // Handle events
        if let Some(action) = event::handle_events(app)? {
            match action {
                event::Action::Quit => break,
                event::Action::Refresh => app.refresh()?,
                event::Action::MarkDone => app.mark_done_selected()?,
                event::Action::Export => app.export()?,
            }
        }
    }

    Ok(())
}
