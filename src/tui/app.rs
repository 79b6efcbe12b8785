//! # TUI Application Core
//!
//! Main application state and screen navigation.

use crate::features::{Medication, Notification, Permission, ReminderEvent, ReminderSnapshot};
use crate::tui::state::MedicationForm;
use chrono::NaiveDate;
use uuid::Uuid;

/// Maximum activity log entries kept
const ACTIVITY_LOG_LIMIT: usize = 100;

/// Available screens in the TUI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Medications,
    AddMedication,
    Help,
}

impl Screen {
    pub fn title(&self) -> &'static str {
        match self {
            Screen::Medications => "Medications",
            Screen::AddMedication => "Add Medication",
            Screen::Help => "Help",
        }
    }

    pub fn key(&self) -> char {
        match self {
            Screen::Medications => '1',
            Screen::AddMedication => '2',
            Screen::Help => '?',
        }
    }

    pub fn all() -> &'static [Screen] {
        &[Screen::Medications, Screen::AddMedication, Screen::Help]
    }
}

/// Input mode for text entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

/// Which pane of the medications screen has the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Medications,
    Banners,
}

/// Main application state
pub struct App {
    /// Current screen
    pub current_screen: Screen,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Medications from the latest snapshot
    pub medications: Vec<Medication>,
    /// Pending reminder banners
    pub banners: Vec<Notification>,
    /// Desktop notification permission
    pub permission: Permission,
    /// Date the latest snapshot was taken on
    pub today: Option<NaiveDate>,
    /// Selected medication
    pub selected_index: usize,
    /// Selected banner
    pub banner_index: usize,
    pub focus: Focus,
    /// Current input mode
    pub input_mode: InputMode,
    /// Add-medication form
    pub form: MedicationForm,
    /// Error message to display
    pub error_message: Option<String>,
    /// Status message to display
    pub status_message: Option<String>,
    /// Activity log (recent events)
    pub activity_log: Vec<String>,
}

impl App {
    pub fn new() -> Self {
        App {
            current_screen: Screen::Medications,
            should_quit: false,
            medications: Vec::new(),
            banners: Vec::new(),
            permission: Permission::Undetermined,
            today: None,
            selected_index: 0,
            banner_index: 0,
            focus: Focus::default(),
            input_mode: InputMode::Normal,
            form: MedicationForm::new(),
            error_message: None,
            status_message: None,
            activity_log: Vec::new(),
        }
    }

    /// Switch to a different screen
    pub fn switch_screen(&mut self, screen: Screen) {
        self.current_screen = screen;
        self.input_mode = InputMode::Normal;
    }

    /// Open the add-medication form with fresh defaults
    pub fn open_form(&mut self) {
        self.form.reset();
        self.current_screen = Screen::AddMedication;
        self.input_mode = InputMode::Editing;
    }

    /// Leave the form and return to the list
    pub fn close_form(&mut self) {
        self.form.reset();
        self.switch_screen(Screen::Medications);
    }

    /// Handle an event from the reminder scheduler
    pub fn handle_reminder_event(&mut self, event: ReminderEvent) {
        match event {
            ReminderEvent::Updated(snapshot) => self.apply_snapshot(snapshot),
            ReminderEvent::Due(notifications) => {
                for notification in notifications {
                    self.add_activity(notification.text);
                }
            }
        }
    }

    /// Replace displayed state with a snapshot
    pub fn apply_snapshot(&mut self, snapshot: ReminderSnapshot) {
        if snapshot.permission != self.permission {
            self.add_activity(format!(
                "Desktop notifications {}",
                snapshot.permission.label()
            ));
        }
        self.medications = snapshot.medications;
        self.banners = snapshot.banners;
        self.permission = snapshot.permission;
        self.today = Some(snapshot.today);
        self.selected_index = clamp_index(self.selected_index, self.medications.len());
        self.banner_index = clamp_index(self.banner_index, self.banners.len());
        if self.banners.is_empty() {
            self.focus = Focus::Medications;
        }
    }

    /// Add an activity log entry
    pub fn add_activity(&mut self, msg: String) {
        let timestamp = chrono::Local::now().format("%H:%M:%S").to_string();
        self.activity_log.push(format!("[{}] {}", timestamp, msg));

        if self.activity_log.len() > ACTIVITY_LOG_LIMIT {
            self.activity_log.remove(0);
        }
    }

    /// Clear error message
    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    /// Clear status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn selected_medication(&self) -> Option<&Medication> {
        self.medications.get(self.selected_index)
    }

    pub fn selected_medication_id(&self) -> Option<Uuid> {
        self.selected_medication().map(|m| m.id)
    }

    /// Banner a dismiss key acts on: only the highlighted one in the banner pane
    pub fn dismiss_target(&self) -> Option<usize> {
        let on_banners = self.current_screen == Screen::Medications && self.focus == Focus::Banners;
        (on_banners && self.banner_index < self.banners.len()).then_some(self.banner_index)
    }

    /// Toggle between the medication list and the banners
    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Medications if !self.banners.is_empty() => Focus::Banners,
            _ => Focus::Medications,
        };
    }

    /// Move selection up in the focused pane
    pub fn select_previous(&mut self) {
        let index = self.focused_index_mut();
        if *index > 0 {
            *index -= 1;
        }
    }

    /// Move selection down in the focused pane
    pub fn select_next(&mut self) {
        let max = self.focused_len();
        let index = self.focused_index_mut();
        if *index < max.saturating_sub(1) {
            *index += 1;
        }
    }

    pub fn select_first(&mut self) {
        *self.focused_index_mut() = 0;
    }

    pub fn select_last(&mut self) {
        let max = self.focused_len();
        *self.focused_index_mut() = max.saturating_sub(1);
    }

    fn focused_len(&self) -> usize {
        match self.focus {
            Focus::Medications => self.medications.len(),
            Focus::Banners => self.banners.len(),
        }
    }

    fn focused_index_mut(&mut self) -> &mut usize {
        match self.focus {
            Focus::Medications => &mut self.selected_index,
            Focus::Banners => &mut self.banner_index,
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

fn clamp_index(index: usize, len: usize) -> usize {
    index.min(len.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{Frequency, NewMedication, TimeOfDay};

    fn med(name: &str) -> Medication {
        NewMedication::new(name, "1 tab", Frequency::Daily, TimeOfDay::default()).into_medication()
    }

    fn snapshot(medications: Vec<Medication>, banners: Vec<Notification>) -> ReminderSnapshot {
        ReminderSnapshot {
            medications,
            banners,
            permission: Permission::Denied,
            today: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        }
    }

    #[test]
    fn test_snapshot_clamps_selection() {
        let mut app = App::new();
        app.apply_snapshot(snapshot(vec![med("a"), med("b"), med("c")], vec![]));
        app.select_last();
        assert_eq!(app.selected_index, 2);

        app.apply_snapshot(snapshot(vec![med("a")], vec![]));
        assert_eq!(app.selected_index, 0);
        assert_eq!(app.selected_medication().unwrap().name, "a");
    }

    #[test]
    fn test_focus_moves_to_banners_only_when_present() {
        let mut app = App::new();
        let a = med("a");
        app.apply_snapshot(snapshot(vec![a.clone()], vec![]));
        app.toggle_focus();
        assert_eq!(app.focus, Focus::Medications);

        let banner = Notification::for_medication(&a);
        app.apply_snapshot(snapshot(vec![a.clone()], vec![banner.clone(), banner]));
        app.toggle_focus();
        assert_eq!(app.focus, Focus::Banners);
        app.select_next();
        assert_eq!(app.banner_index, 1);
        assert_eq!(app.selected_index, 0);

        app.apply_snapshot(snapshot(vec![a], vec![]));
        assert_eq!(app.focus, Focus::Medications);
        assert_eq!(app.banner_index, 0);
    }

    #[test]
    fn test_dismiss_needs_banner_focus() {
        let mut app = App::new();
        let a = med("a");
        let banner = Notification::for_medication(&a);
        app.apply_snapshot(snapshot(vec![a], vec![banner.clone(), banner]));
        assert_eq!(app.dismiss_target(), None);

        app.toggle_focus();
        app.select_next();
        assert_eq!(app.dismiss_target(), Some(1));

        app.switch_screen(Screen::Help);
        assert_eq!(app.dismiss_target(), None);
    }

    #[test]
    fn test_due_events_go_to_activity_log() {
        let mut app = App::new();
        let a = med("Aspirin");
        app.handle_reminder_event(ReminderEvent::Due(vec![Notification::for_medication(&a)]));
        assert_eq!(app.activity_log.len(), 1);
        assert!(app.activity_log[0].ends_with("Time to take Aspirin (1 tab)"));
    }

    #[test]
    fn test_activity_log_is_bounded() {
        let mut app = App::new();
        for i in 0..(ACTIVITY_LOG_LIMIT + 5) {
            app.add_activity(format!("entry {i}"));
        }
        assert_eq!(app.activity_log.len(), ACTIVITY_LOG_LIMIT);
        assert!(app.activity_log[0].ends_with("entry 5"));
    }

    #[test]
    fn test_form_open_and_close() {
        let mut app = App::new();
        app.open_form();
        assert_eq!(app.current_screen, Screen::AddMedication);
        assert_eq!(app.input_mode, InputMode::Editing);
        app.form.input_char('x');
        app.close_form();
        assert_eq!(app.current_screen, Screen::Medications);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(app.form.name.is_empty());
    }
}
