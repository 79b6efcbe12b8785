//! # TUI Event Handling
//!
//! Keyboard input, UI ticks and scheduler events on one channel.

use crate::features::ReminderEvent;
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;
use tokio::sync::mpsc;

/// TUI events
#[derive(Debug)]
pub enum Event {
    /// Keyboard input
    Key(KeyEvent),
    /// Terminal resize
    Resize(u16, u16),
    /// State change published by the reminder scheduler
    Reminder(ReminderEvent),
    /// UI poll timeout
    Tick,
}

/// Event handler that combines keyboard, scheduler, and tick events
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    /// Create a new event handler; the returned sender feeds extra events in
    pub fn new(tick_rate: Duration) -> (Self, mpsc::UnboundedSender<Event>) {
        let (tx, rx) = mpsc::unbounded_channel();

        // Spawn keyboard event handler
        let key_tx = tx.clone();
        std::thread::spawn(move || loop {
            if event::poll(tick_rate).unwrap_or(false) {
                let forwarded = match event::read() {
                    Ok(CrosstermEvent::Key(key)) => key_tx.send(Event::Key(key)),
                    Ok(CrosstermEvent::Resize(w, h)) => key_tx.send(Event::Resize(w, h)),
                    _ => Ok(()),
                };
                if forwarded.is_err() {
                    break;
                }
            } else if key_tx.send(Event::Tick).is_err() {
                break;
            }
        });

        (EventHandler { rx }, tx)
    }

    /// Forward scheduler events into this handler
    pub fn forward_reminders(
        tx: mpsc::UnboundedSender<Event>,
        mut reminders: mpsc::UnboundedReceiver<ReminderEvent>,
    ) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            while let Some(event) = reminders.recv().await {
                if tx.send(Event::Reminder(event)).is_err() {
                    break;
                }
            }
        })
    }

    /// Receive the next event
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

/// Key action result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// No action
    None,
    /// Quit the application
    Quit,
    /// Switch to screen
    SwitchScreen(crate::tui::Screen),
    /// Move selection up
    Up,
    /// Move selection down
    Down,
    /// Act on the selected item
    Select,
    /// Go back / Cancel
    Back,
    /// Open the add-medication form
    StartInput,
    /// Submit the form
    SubmitInput,
    /// Cancel the form
    CancelInput,
    /// Character input
    Char(char),
    /// Backspace
    Backspace,
    /// Next form field
    NextField,
    /// Previous form field
    PrevField,
    /// Cycle a choice field backwards
    CycleLeft,
    /// Cycle a choice field forwards
    CycleRight,
    /// Switch focus between medications and banners
    ToggleFocus,
    /// Mark the selected medication taken
    Take,
    /// Delete the selected medication or dismiss the selected banner
    Delete,
    /// Dismiss the selected banner
    Dismiss,
    /// Run a due check now
    Refresh,
    /// Home
    Home,
    /// End
    End,
}

/// Map a key event to an action
pub fn map_key_event(key: KeyEvent, in_edit_mode: bool) -> KeyAction {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return KeyAction::Quit;
    }

    if in_edit_mode {
        // Form editing
        match key.code {
            KeyCode::Esc => KeyAction::CancelInput,
            KeyCode::Enter => KeyAction::SubmitInput,
            KeyCode::Backspace => KeyAction::Backspace,
            KeyCode::Tab | KeyCode::Down => KeyAction::NextField,
            KeyCode::BackTab | KeyCode::Up => KeyAction::PrevField,
            KeyCode::Left => KeyAction::CycleLeft,
            KeyCode::Right => KeyAction::CycleRight,
            KeyCode::Char(c) => KeyAction::Char(c),
            _ => KeyAction::None,
        }
    } else {
        // Normal mode navigation
        match (key.code, key.modifiers) {
            // Quit
            (KeyCode::Char('q'), KeyModifiers::NONE) => KeyAction::Quit,

            // Screen switching
            (KeyCode::Char('1'), KeyModifiers::NONE) => {
                KeyAction::SwitchScreen(crate::tui::Screen::Medications)
            }
            (KeyCode::Char('2'), KeyModifiers::NONE) | (KeyCode::Char('a'), KeyModifiers::NONE) => {
                KeyAction::StartInput
            }
            (KeyCode::Char('?'), _) => KeyAction::SwitchScreen(crate::tui::Screen::Help),

            // Navigation
            (KeyCode::Up, _) | (KeyCode::Char('k'), KeyModifiers::NONE) => KeyAction::Up,
            (KeyCode::Down, _) | (KeyCode::Char('j'), KeyModifiers::NONE) => KeyAction::Down,
            (KeyCode::Enter, _) | (KeyCode::Char(' '), KeyModifiers::NONE) => KeyAction::Select,
            (KeyCode::Esc, _) => KeyAction::Back,
            (KeyCode::Tab, _) | (KeyCode::BackTab, _) => KeyAction::ToggleFocus,
            (KeyCode::Home, _) | (KeyCode::Char('g'), KeyModifiers::NONE) => KeyAction::Home,
            (KeyCode::End, _) | (KeyCode::Char('G'), _) => KeyAction::End,

            // Actions
            (KeyCode::Char('t'), KeyModifiers::NONE) => KeyAction::Take,
            (KeyCode::Char('d'), KeyModifiers::NONE) | (KeyCode::Delete, _) => KeyAction::Delete,
            (KeyCode::Char('x'), KeyModifiers::NONE) => KeyAction::Dismiss,
            (KeyCode::Char('r'), KeyModifiers::NONE) => KeyAction::Refresh,

            _ => KeyAction::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::Screen;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_normal_mode_actions() {
        assert_eq!(map_key_event(key(KeyCode::Char('q')), false), KeyAction::Quit);
        assert_eq!(map_key_event(key(KeyCode::Char('a')), false), KeyAction::StartInput);
        assert_eq!(map_key_event(key(KeyCode::Char('t')), false), KeyAction::Take);
        assert_eq!(map_key_event(key(KeyCode::Char('d')), false), KeyAction::Delete);
        assert_eq!(map_key_event(key(KeyCode::Char('x')), false), KeyAction::Dismiss);
        assert_eq!(map_key_event(key(KeyCode::Char('r')), false), KeyAction::Refresh);
        assert_eq!(map_key_event(key(KeyCode::Tab), false), KeyAction::ToggleFocus);
        assert_eq!(
            map_key_event(key(KeyCode::Char('?')), false),
            KeyAction::SwitchScreen(Screen::Help)
        );
    }

    #[test]
    fn test_edit_mode_sends_letters_to_the_form() {
        assert_eq!(map_key_event(key(KeyCode::Char('q')), true), KeyAction::Char('q'));
        assert_eq!(map_key_event(key(KeyCode::Char('t')), true), KeyAction::Char('t'));
        assert_eq!(map_key_event(key(KeyCode::Tab), true), KeyAction::NextField);
        assert_eq!(map_key_event(key(KeyCode::Enter), true), KeyAction::SubmitInput);
        assert_eq!(map_key_event(key(KeyCode::Esc), true), KeyAction::CancelInput);
        assert_eq!(map_key_event(key(KeyCode::Right), true), KeyAction::CycleRight);
    }

    #[test]
    fn test_ctrl_c_always_quits() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key_event(ctrl_c, false), KeyAction::Quit);
        assert_eq!(map_key_event(ctrl_c, true), KeyAction::Quit);
    }
}
