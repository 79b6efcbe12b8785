//! # TUI UI Components
//!
//! Ratatui-based UI rendering for each screen.

mod form;
mod help;
mod medications;

pub use form::render_form;
pub use help::render_help;
pub use medications::render_medications;

use crate::features::Permission;
use crate::tui::{App, InputMode, Screen};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};

/// Main render function - dispatches to screen-specific renderers
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_tabs(frame, app, chunks[0]);

    match app.current_screen {
        Screen::Medications => render_medications(frame, app, chunks[1]),
        Screen::AddMedication => render_form(frame, app, chunks[1]),
        Screen::Help => render_help(frame, app, chunks[1]),
    }

    render_status_bar(frame, app, chunks[2]);
}

/// Render the tab bar
fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = Screen::all()
        .iter()
        .map(|s| {
            let style = if *s == app.current_screen {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            Line::from(format!("[{}] {}", s.key(), s.title())).style(style)
        })
        .collect();

    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL).title(" medremind "))
        .select(Screen::all().iter().position(|s| *s == app.current_screen).unwrap_or(0))
        .style(Style::default().fg(Color::White))
        .highlight_style(Style::default().fg(Color::Yellow));

    frame.render_widget(tabs, area);
}

/// Render the status bar
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let desktop_status = match app.permission {
        Permission::Granted => Span::styled("● Desktop on", Style::default().fg(Color::Green)),
        Permission::Undetermined => Span::styled("● Desktop ?", Style::default().fg(Color::Yellow)),
        Permission::Denied => Span::styled("● Desktop off", Style::default().fg(Color::Red)),
    };

    let mode_status = match app.input_mode {
        InputMode::Normal => Span::raw(""),
        InputMode::Editing => Span::styled(
            " [EDITING] ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
    };

    let help_hint = Span::styled(" q:Quit ?:Help ", Style::default().fg(Color::DarkGray));

    // Error or status message
    let message = if let Some(err) = &app.error_message {
        Span::styled(format!(" Error: {} ", err), Style::default().fg(Color::Red))
    } else if let Some(status) = &app.status_message {
        Span::styled(format!(" {} ", status), Style::default().fg(Color::Green))
    } else {
        Span::raw("")
    };

    let status_line = Line::from(vec![
        desktop_status,
        Span::raw(" | "),
        mode_status,
        message,
        Span::raw(" "),
        help_hint,
    ]);

    let paragraph = Paragraph::new(status_line).style(Style::default().bg(Color::DarkGray));

    frame.render_widget(paragraph, area);
}

/// Helper to create a block with title
pub fn titled_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", title))
}

/// Helper to truncate text on a character boundary
pub fn truncate_text(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
pub(crate) fn render_to_string(app: &App, width: u16, height: u16) -> String {
    use ratatui::backend::TestBackend;

    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|frame| render(frame, app)).unwrap();
    let buffer = terminal.backend().buffer().clone();
    let mut out = String::new();
    for row in buffer.content.chunks(usize::from(width)) {
        for cell in row {
            out.push_str(cell.symbol());
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text_is_char_safe() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("Paracétamol forte", 8), "Parac...");
        assert_eq!(truncate_text("ééééééé", 5), "éé...");
    }

    #[test]
    fn test_status_bar_shows_errors() {
        let mut app = App::new();
        app.error_message = Some("Name is required".to_string());
        let screen = render_to_string(&app, 100, 20);
        assert!(screen.contains("Error: Name is required"));
        assert!(screen.contains("Desktop ?"));
    }

    #[test]
    fn test_tabs_list_every_screen() {
        let screen = render_to_string(&App::new(), 100, 20);
        for s in Screen::all() {
            assert!(screen.contains(s.title()), "missing tab {}", s.title());
        }
    }
}
