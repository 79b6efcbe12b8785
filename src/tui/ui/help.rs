//! # Help UI
//!
//! Keybindings and usage help.

use crate::features::FEATURES;
use crate::tui::ui::titled_block;
use crate::tui::App;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Render the help screen
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_keybindings(frame, chunks[0]);
    render_about(frame, app, chunks[1]);
}

fn render_keybindings(frame: &mut Frame, area: Rect) {
    let keybindings = vec![
        ("General", vec![
            ("q / Ctrl+c", "Quit"),
            ("?", "Show this help"),
            ("1", "Medication list"),
            ("a / 2", "Add a medication"),
            ("Esc", "Go back"),
        ]),
        ("Medication list", vec![
            ("j / Down", "Move down"),
            ("k / Up", "Move up"),
            ("g / G", "Top / bottom"),
            ("Tab", "Switch between list and reminders"),
            ("t / Enter", "Mark selected medication taken"),
            ("d", "Delete medication / dismiss reminder"),
            ("x", "Dismiss highlighted reminder (after Tab)"),
            ("r", "Check for due doses now"),
        ]),
        ("Add form", vec![
            ("Tab / Down", "Next field"),
            ("Shift+Tab / Up", "Previous field"),
            ("Left / Right", "Change frequency"),
            ("Enter", "Save"),
            ("Esc", "Cancel"),
        ]),
    ];

    let mut lines = vec![];

    for (section, bindings) in keybindings {
        lines.push(Line::from(vec![Span::styled(
            section,
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )]));

        for (key, desc) in bindings {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<16}", key), Style::default().fg(Color::Cyan)),
                Span::raw(desc),
            ]));
        }

        lines.push(Line::from(""));
    }

    let paragraph = Paragraph::new(lines)
        .block(titled_block("Keybindings"))
        .style(Style::default().fg(Color::White));

    frame.render_widget(paragraph, area);
}

fn render_about(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![
        Line::from(Span::styled(
            "How reminders work",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from("  Doses are checked once a minute."),
        Line::from("  A dose past its time and not taken today is"),
        Line::from("  marked missed and announced once."),
        Line::from("  Marking it taken clears its reminders."),
        Line::from(""),
        Line::from(vec![
            Span::raw("  Desktop notifications: "),
            Span::styled(app.permission.label(), Style::default().fg(Color::Cyan)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Features",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
    ];

    for feature in FEATURES {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<14}", feature.name), Style::default().fg(Color::Cyan)),
            Span::styled(format!("v{:<7}", feature.version), Style::default().fg(Color::DarkGray)),
            Span::raw(feature.description),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("medremind v{}", env!("CARGO_PKG_VERSION")),
        Style::default().fg(Color::DarkGray),
    )));

    let paragraph = Paragraph::new(lines)
        .block(titled_block("About"))
        .style(Style::default().fg(Color::White));

    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use crate::features::FEATURES;
    use crate::tui::ui::render_to_string;
    use crate::tui::{App, Screen};

    #[test]
    fn test_help_lists_keys_and_features() {
        let mut app = App::new();
        app.switch_screen(Screen::Help);
        let screen = render_to_string(&app, 140, 40);
        assert!(screen.contains("Mark selected medication taken"));
        assert!(screen.contains("Desktop notifications: not decided"));
        for feature in FEATURES {
            assert!(screen.contains(feature.name), "missing feature {}", feature.name);
        }
    }
}
