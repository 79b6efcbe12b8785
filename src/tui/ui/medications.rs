//! # Medications UI
//!
//! Medication list, pending reminder banners and recent activity.

use crate::features::medications::MedicationStatus;
use crate::tui::ui::{titled_block, truncate_text};
use crate::tui::{App, Focus};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};

/// Render the medications screen
pub fn render_medications(frame: &mut Frame, app: &App, area: Rect) {
    let banner_height = if app.banners.is_empty() {
        0
    } else {
        (app.banners.len() as u16).min(5) + 2
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(banner_height), // Reminder banners
            Constraint::Min(5),                // Medication list
            Constraint::Length(7),             // Activity log
        ])
        .split(area);

    if !app.banners.is_empty() {
        render_banners(frame, app, chunks[0]);
    }
    render_list(frame, app, chunks[1]);
    render_activity(frame, app, chunks[2]);
}

fn render_banners(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Banners;
    let items: Vec<ListItem> = app
        .banners
        .iter()
        .enumerate()
        .map(|(i, banner)| {
            let is_selected = focused && i == app.banner_index;
            let prefix = if is_selected { "> " } else { "  " };
            let style = if is_selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            };
            ListItem::new(Line::from(vec![
                Span::raw(prefix),
                Span::raw("⏰ "),
                Span::raw(banner.text.clone()),
            ]))
            .style(style)
        })
        .collect();

    let title = format!("Reminders ({}) - x to dismiss", app.banners.len());
    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let list = List::new(items).block(titled_block(&title).border_style(border_style));
    frame.render_widget(list, area);
}

fn render_list(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Medications;
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    if app.medications.is_empty() {
        let paragraph = Paragraph::new("No medications yet. Press 'a' to add one.")
            .block(titled_block("Medications").border_style(border_style))
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = app
        .medications
        .iter()
        .enumerate()
        .map(|(i, med)| {
            let is_selected = focused && i == app.selected_index;
            let prefix = if is_selected { "> " } else { "  " };
            let status = app
                .today
                .map(|today| med.status(today))
                .unwrap_or(MedicationStatus::Scheduled);
            let status_style = match status {
                MedicationStatus::TakenToday => Style::default().fg(Color::Green),
                MedicationStatus::Missed => {
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
                }
                MedicationStatus::Scheduled => Style::default().fg(Color::Gray),
            };
            let name_style = if is_selected {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            ListItem::new(Line::from(vec![
                Span::raw(prefix),
                Span::styled(format!("{:<24} ", truncate_text(&med.name, 24)), name_style),
                Span::styled(
                    format!("{:<14} ", truncate_text(&med.dosage, 14)),
                    Style::default().fg(Color::Cyan),
                ),
                Span::styled(
                    format!("{:<24} ", med.schedule_label()),
                    Style::default().fg(Color::Magenta),
                ),
                Span::styled(status.label(), status_style),
            ]))
        })
        .collect();

    let title = format!("Medications ({}) - t take, d delete", app.medications.len());
    let list = List::new(items).block(titled_block(&title).border_style(border_style));
    frame.render_widget(list, area);
}

fn render_activity(frame: &mut Frame, app: &App, area: Rect) {
    let visible = area.height.saturating_sub(2) as usize;
    let lines: Vec<Line> = app
        .activity_log
        .iter()
        .rev()
        .take(visible)
        .map(|entry| Line::from(Span::styled(entry.clone(), Style::default().fg(Color::Gray))))
        .collect();

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Activity "),
    );
    frame.render_widget(paragraph, area);
}
