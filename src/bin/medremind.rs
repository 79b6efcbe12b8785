//! # medremind
//!
//! Terminal medication reminder.
//!
//! Usage: `cargo run --bin medremind`

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, info};
use ratatui::prelude::*;
use std::fs::OpenOptions;
use std::io;
use std::sync::Arc;
use tokio::sync::mpsc;

use medremind::core::{Config, SystemClock};
use medremind::features::medications::JsonFileStorage;
use medremind::features::notifications::backend_for;
use medremind::features::{ReminderHandle, ReminderScheduler, ReminderStore};
use medremind::tui::event::{map_key_event, KeyAction};
use medremind::tui::{App, Event, EventHandler, Focus, InputMode, Screen};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    init_logging(&config)?;

    info!("Starting medremind (data in {})", config.data_dir.display());

    let store = ReminderStore::load(JsonFileStorage::new(&config.data_dir));
    let notifier = backend_for(config.desktop_notifications);

    let (reminder_tx, reminder_rx) = mpsc::unbounded_channel();
    let (reminders, scheduler_task) =
        ReminderScheduler::new(store, notifier, Arc::new(SystemClock))
            .with_interval(config.check_interval)
            .with_events(reminder_tx)
            .spawn();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();
    match reminders.snapshot().await {
        Ok(snapshot) => app.apply_snapshot(snapshot),
        Err(e) => app.error_message = Some(e.to_string()),
    }
    app.add_activity(format!("Loaded {} medications", app.medications.len()));

    let (mut events, event_tx) = EventHandler::new(config.tick_rate);
    let forwarder = EventHandler::forward_reminders(event_tx, reminder_rx);

    let result = run_app(&mut terminal, &mut app, &mut events, &reminders).await;

    reminders.shutdown().await;
    if let Err(e) = scheduler_task.await {
        error!("Reminder scheduler ended abnormally: {}", e);
    }
    forwarder.abort();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        error!("Application error: {}", e);
        return Err(e);
    }

    info!("medremind shutdown complete");
    Ok(())
}

fn init_logging(config: &Config) -> Result<()> {
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(&config.log_level),
    );
    if let Some(path) = &config.log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
    reminders: &ReminderHandle,
) -> Result<()> {
    loop {
        terminal.draw(|frame| {
            medremind::tui::ui::render(frame, app);
        })?;

        if let Some(event) = events.next().await {
            match event {
                Event::Key(key) => {
                    let action = map_key_event(key, app.input_mode == InputMode::Editing);
                    handle_action(app, action, reminders).await;
                }
                Event::Reminder(reminder_event) => {
                    app.handle_reminder_event(reminder_event);
                }
                Event::Tick | Event::Resize(_, _) => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

async fn handle_action(app: &mut App, action: KeyAction, reminders: &ReminderHandle) {
    match action {
        KeyAction::Quit => {
            app.should_quit = true;
        }
        KeyAction::SwitchScreen(screen) => {
            app.switch_screen(screen);
            app.clear_error();
            app.clear_status();
        }
        KeyAction::Up => app.select_previous(),
        KeyAction::Down => app.select_next(),
        KeyAction::Home => app.select_first(),
        KeyAction::End => app.select_last(),
        KeyAction::ToggleFocus => app.toggle_focus(),
        KeyAction::Back => {
            if app.current_screen != Screen::Medications {
                app.switch_screen(Screen::Medications);
            } else {
                app.focus = Focus::Medications;
            }
            app.clear_error();
        }
        KeyAction::StartInput => {
            app.clear_error();
            app.clear_status();
            app.open_form();
        }
        KeyAction::CancelInput => app.close_form(),
        KeyAction::Char(c) => app.form.input_char(c),
        KeyAction::Backspace => app.form.backspace(),
        KeyAction::NextField => app.form.next_field(),
        KeyAction::PrevField => app.form.previous_field(),
        KeyAction::CycleLeft => app.form.cycle_frequency(false),
        KeyAction::CycleRight => app.form.cycle_frequency(true),
        KeyAction::SubmitInput => submit_form(app, reminders).await,
        KeyAction::Select | KeyAction::Take => {
            if app.current_screen != Screen::Medications {
                return;
            }
            match app.focus {
                Focus::Medications => take_selected(app, reminders).await,
                Focus::Banners if action == KeyAction::Select => {
                    dismiss_selected(app, reminders).await
                }
                Focus::Banners => {}
            }
        }
        KeyAction::Delete => {
            if app.current_screen != Screen::Medications {
                return;
            }
            match app.focus {
                Focus::Medications => delete_selected(app, reminders).await,
                Focus::Banners => dismiss_selected(app, reminders).await,
            }
        }
        KeyAction::Dismiss => {
            if app.dismiss_target().is_some() {
                dismiss_selected(app, reminders).await;
            } else if !app.banners.is_empty() && app.current_screen == Screen::Medications {
                app.status_message = Some("Tab to the reminders to dismiss one".to_string());
            }
        }
        KeyAction::Refresh => match reminders.check_now().await {
            Ok(due) if due.is_empty() => {
                app.status_message = Some("Nothing due".to_string());
            }
            Ok(due) => {
                app.status_message = Some(format!("{} reminder(s) due", due.len()));
            }
            Err(e) => app.error_message = Some(e.to_string()),
        },
        KeyAction::None => {}
    }
}

async fn submit_form(app: &mut App, reminders: &ReminderHandle) {
    let new = match app.form.to_new_medication() {
        Ok(new) => new,
        Err(e) => {
            app.error_message = Some(e.to_string());
            return;
        }
    };

    match reminders.add_medication(new).await {
        Ok(medication) => {
            app.close_form();
            app.clear_error();
            app.status_message = Some(format!("Added {}", medication.name));
            app.add_activity(format!(
                "Added {} ({}), {}",
                medication.name,
                medication.dosage,
                medication.schedule_label()
            ));
        }
        Err(e) => {
            // Keep the form open so the input can be corrected
            app.error_message = Some(e.to_string());
        }
    }
}

async fn take_selected(app: &mut App, reminders: &ReminderHandle) {
    let Some(id) = app.selected_medication_id() else {
        return;
    };
    match reminders.take_medication(id).await {
        Ok(Some(medication)) => {
            app.status_message = Some(format!("{} marked as taken", medication.name));
            app.add_activity(format!("Took {}", medication.name));
        }
        Ok(None) => {}
        Err(e) => app.error_message = Some(e.to_string()),
    }
}

async fn delete_selected(app: &mut App, reminders: &ReminderHandle) {
    let Some(medication) = app.selected_medication().cloned() else {
        return;
    };
    match reminders.delete_medication(medication.id).await {
        Ok(true) => {
            app.status_message = Some(format!("Deleted {}", medication.name));
            app.add_activity(format!("Deleted {}", medication.name));
        }
        Ok(false) => {}
        Err(e) => app.error_message = Some(e.to_string()),
    }
}

async fn dismiss_selected(app: &mut App, reminders: &ReminderHandle) {
    let Some(index) = app.dismiss_target() else {
        return;
    };
    match reminders.dismiss(index).await {
        Ok(Some(_)) => app.status_message = Some("Reminder dismissed".to_string()),
        Ok(None) => {}
        Err(e) => app.error_message = Some(e.to_string()),
    }
}
