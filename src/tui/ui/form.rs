//! # Add Medication UI
//!
//! Creation form.

use crate::tui::state::FormField;
use crate::tui::ui::titled_block;
use crate::tui::App;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Render the add-medication form
pub fn render_form(frame: &mut Frame, app: &App, area: Rect) {
    let mut constraints: Vec<Constraint> = FormField::all()
        .iter()
        .map(|_| Constraint::Length(3))
        .collect();
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (i, field) in FormField::all().iter().enumerate() {
        let focused = app.form.field == *field;
        let mut value = app.form.value(*field);
        if focused && *field != FormField::Frequency {
            value.push('▏');
        }
        let style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::White)
        };
        let paragraph = Paragraph::new(value)
            .style(style)
            .block(titled_block(field.label()).border_style(style));
        frame.render_widget(paragraph, chunks[i]);
    }

    let hints = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "Tab/↓ next field  Shift+Tab/↑ previous  ←/→ change frequency",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            "Enter save  Esc cancel",
            Style::default().fg(Color::DarkGray),
        )),
    ]);
    frame.render_widget(hints, chunks[FormField::all().len()]);
}

#[cfg(test)]
mod tests {
    use crate::tui::ui::render_to_string;
    use crate::tui::App;

    #[test]
    fn test_form_shows_defaults() {
        let mut app = App::new();
        app.open_form();
        let screen = render_to_string(&app, 100, 24);
        assert!(screen.contains("Name"));
        assert!(screen.contains("Dosage"));
        assert!(screen.contains("< Daily >"));
        assert!(screen.contains("08:00"));
        assert!(screen.contains("[EDITING]"));
    }
}
