//! UI rendering for the TUI.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::tui::app::{App, Mode};

/// Render the application UI.
pub fn render(frame: &mut Frame<'_>, app: &App) {
    // Create layout: header, grid, input line, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Grid
            Constraint::Length(1), // Input line
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_grid(frame, app, chunks[1]);
    render_input(frame, app, chunks[2]);
    render_status_bar(frame, app, chunks[3]);

    if app.mode == Mode::Stats {
        render_stats_popup(frame, app);
    }
}

/// Render the header.
fn render_header(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let title = format!(" Habits ({}) ", app.rows.len());

    let header = Paragraph::new(title)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

    frame.render_widget(header, area);
}

/// Render the habit grid.
fn render_grid(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let header = Row::new(["ID", "Name", "Created", "Streak", "Last done", "Reminder"])
        .style(Style::default().add_modifier(Modifier::BOLD));

    let rows: Vec<Row<'_>> = app
        .rows
        .iter()
        .map(|row| {
            let streak = if row.streak > 0 {
                format!("{}d", row.streak)
            } else {
                "-".to_string()
            };

            let last_done = row
                .last_done
                .map_or_else(|| "Never".to_string(), |d| d.to_string());

            Row::new([
                row.habit.id.to_string(),
                row.habit.name.clone(),
                row.habit.created.to_string(),
                streak,
                last_done,
                row.habit.reminder_display(),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(4),
        Constraint::Min(16),
        Constraint::Length(12),
        Constraint::Length(7),
        Constraint::Length(12),
        Constraint::Length(9),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White)),
        )
        .highlight_style(Style::default().bg(Color::DarkGray));

    let mut state = TableState::default();
    state.select(Some(app.selected));

    frame.render_stateful_widget(table, area, &mut state);
}

/// Render the input line for add/edit prompts.
fn render_input(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let text = match app.mode {
        Mode::AddName => format!("New name: {}_", app.input),
        Mode::AddReminder => format!("Reminder (HH:MM): {}_", app.input),
        Mode::EditName => format!("Name: {}_", app.input),
        Mode::EditReminder => format!("Reminder (HH:MM): {}_", app.input),
        Mode::Normal | Mode::ConfirmDelete | Mode::Stats => String::new(),
    };

    let input = Paragraph::new(text).style(Style::default().fg(Color::Yellow));
    frame.render_widget(input, area);
}

/// Render the status bar.
fn render_status_bar(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let status_text = app
        .status
        .as_deref()
        .unwrap_or("j/k:nav | d:done | a:add | e:edit | x:delete | s:stats | o:export | q:quit");

    let status = Paragraph::new(status_text).style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, area);
}

/// Render the stats popup over the grid.
fn render_stats_popup(frame: &mut Frame<'_>, app: &App) {
    let Some(text) = app.stats_text.as_deref() else {
        return;
    };

    let area = centered_rect(60, 70, frame.area());

    let popup = Paragraph::new(text).block(
        Block::default()
            .title(" Stats (any key to close) ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}

/// A centered rect occupying the given percentage of the frame.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
