//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyModifiers};

use crate::error::StreaksError;
use crate::tui::app::{App, Mode};

/// Action to take after handling an event.
pub enum Action {
    /// Quit the application.
    Quit,
    /// Reload the habit table.
    Refresh,
    /// Mark the selected habit done.
    MarkDone,
    /// Export the habit report.
    Export,
}

/// Handle terminal events.
///
/// Returns an action to take, or None if no action is needed.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn handle_events(app: &mut App) -> Result<Option<Action>, StreaksError> {
    // Poll for events with a small timeout so reminder notifications
    // still reach the status line while idle
    if !event::poll(Duration::from_millis(100))
        .map_err(|e| StreaksError::Config(format!("Event poll failed: {e}")))?
    {
        return Ok(None);
    }

    let Event::Key(key) =
        event::read().map_err(|e| StreaksError::Config(format!("Event read failed: {e}")))?
    else {
        return Ok(None);
    };

    // Handle Ctrl+C
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Ok(Some(Action::Quit));
    }

    match app.mode {
        Mode::AddName | Mode::AddReminder | Mode::EditName | Mode::EditReminder => {
            match key.code {
                KeyCode::Enter => app.submit_input()?,
                KeyCode::Esc => app.cancel_input(),
                KeyCode::Backspace => {
                    app.input.pop();
                }
                KeyCode::Char(c) => app.input.push(c),
                _ => {}
            }
        }

        Mode::ConfirmDelete => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_delete()?,
            _ => app.cancel_input(),
        },

        Mode::Stats => app.close_stats(),

        Mode::Normal => match key.code {
            // Quit
            KeyCode::Char('q') | KeyCode::Esc => return Ok(Some(Action::Quit)),

            // Navigation - vim style
            KeyCode::Char('j') | KeyCode::Down => app.select_next(),
            KeyCode::Char('k') | KeyCode::Up => app.select_previous(),
            KeyCode::Char('g') | KeyCode::Home => app.select_first(),
            KeyCode::Char('G') | KeyCode::End => app.select_last(),

            // Actions
            KeyCode::Char('d') | KeyCode::Enter => return Ok(Some(Action::MarkDone)),
            KeyCode::Char('a') => app.begin_add(),
            KeyCode::Char('e') => app.begin_edit(),
            KeyCode::Char('x') => app.begin_delete(),
            KeyCode::Char('s') => app.show_stats()?,
            KeyCode::Char('o') => return Ok(Some(Action::Export)),
            KeyCode::Char('r') => return Ok(Some(Action::Refresh)),

            // Help
            KeyCode::Char('?') => {
                app.status = Some(
                    "j/k:nav | d:done | a:add | e:edit | x:delete | s:stats | o:export | q:quit"
                        .to_string(),
                );
            }

            _ => {}
        },
    }

    Ok(None)
}
