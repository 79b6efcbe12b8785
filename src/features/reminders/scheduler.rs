//! # Reminder Scheduler
//!
//! A single tokio task that owns the [`ReminderStore`] and the
//! [`NotificationDispatcher`]. Commands from the UI and ticks from the
//! check interval arrive over channels and each one runs to completion
//! before the next is taken, so mutations never interleave.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Desktop permission is resolved off the command loop
//! - 1.0.0: Initial scheduler with a one-minute check interval

use crate::core::{Clock, ReminderError, ReminderResult};
use crate::features::medications::{Medication, NewMedication, ReminderStore};
use crate::features::notifications::{
    DesktopNotifier, Notification, NotificationDispatcher, Permission, NOTIFICATION_TITLE,
};
use chrono::NaiveDate;
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use uuid::Uuid;

/// Default period between due checks
pub const DEFAULT_CHECK_INTERVAL: Duration =
    Duration::from_secs(crate::core::config::DEFAULT_CHECK_INTERVAL_SECS);

/// Command channel capacity
const COMMAND_CHANNEL_CAPACITY: usize = 64;

/// Requests handled by the scheduler task
#[derive(Debug)]
pub enum ReminderCommand {
    Add {
        medication: NewMedication,
        reply: oneshot::Sender<ReminderResult<Medication>>,
    },
    Delete {
        id: Uuid,
        reply: oneshot::Sender<bool>,
    },
    Take {
        id: Uuid,
        reply: oneshot::Sender<Option<Medication>>,
    },
    Dismiss {
        index: usize,
        reply: oneshot::Sender<Option<Notification>>,
    },
    /// Run a due check now instead of waiting for the next tick
    CheckNow {
        reply: oneshot::Sender<Vec<Notification>>,
    },
    Snapshot {
        reply: oneshot::Sender<ReminderSnapshot>,
    },
    Shutdown,
}

/// Everything the UI needs to render
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderSnapshot {
    pub medications: Vec<Medication>,
    pub banners: Vec<Notification>,
    pub permission: Permission,
    /// Device-local date the snapshot was taken on
    pub today: NaiveDate,
}

/// Published by the scheduler after state changes
#[derive(Debug, Clone)]
pub enum ReminderEvent {
    Updated(ReminderSnapshot),
    /// Medications that just became due
    Due(Vec<Notification>),
}

pub struct ReminderScheduler {
    store: ReminderStore,
    dispatcher: NotificationDispatcher,
    clock: Arc<dyn Clock>,
    notifier: Arc<dyn DesktopNotifier>,
    check_interval: Duration,
    events: Option<mpsc::UnboundedSender<ReminderEvent>>,
}

impl ReminderScheduler {
    pub fn new(
        store: ReminderStore,
        notifier: Arc<dyn DesktopNotifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        ReminderScheduler {
            store,
            dispatcher: NotificationDispatcher::new(),
            clock,
            notifier,
            check_interval: DEFAULT_CHECK_INTERVAL,
            events: None,
        }
    }

    pub fn with_interval(mut self, check_interval: Duration) -> Self {
        self.check_interval = check_interval;
        self
    }

    /// Publish [`ReminderEvent`]s on `events`
    pub fn with_events(mut self, events: mpsc::UnboundedSender<ReminderEvent>) -> Self {
        self.events = Some(events);
        self
    }

    /// Start the task. The first due check runs immediately.
    pub fn spawn(self) -> (ReminderHandle, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);
        let task = tokio::spawn(self.run(rx));
        (ReminderHandle { tx }, task)
    }

    async fn run(mut self, mut commands: mpsc::Receiver<ReminderCommand>) {
        info!(
            "Reminder scheduler started ({} medications, checking every {}s)",
            self.store.medications().len(),
            self.check_interval.as_secs()
        );

        let (permission_tx, mut permission_rx) = mpsc::unbounded_channel();
        let initial = self.notifier.permission().await;
        self.on_permission(initial, &permission_tx);

        // Startup check runs before any queued command is served
        self.check();
        let first_tick = Instant::now() + self.check_interval;
        let mut ticker = tokio::time::interval_at(first_tick, self.check_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;

                _ = ticker.tick() => {
                    self.check();
                }
                Some(permission) = permission_rx.recv() => {
                    self.on_permission(permission, &permission_tx);
                }
                command = commands.recv() => match command {
                    Some(ReminderCommand::Shutdown) | None => break,
                    Some(command) => self.handle(command),
                },
            }
        }

        info!("Reminder scheduler stopped");
    }

    fn handle(&mut self, command: ReminderCommand) {
        match command {
            ReminderCommand::Add { medication, reply } => {
                let result = self.store.add_medication(medication);
                if result.is_ok() {
                    self.publish();
                }
                let _ = reply.send(result);
            }
            ReminderCommand::Delete { id, reply } => {
                let removed = self.store.delete_medication(id);
                self.dispatcher.retract(id);
                self.publish();
                let _ = reply.send(removed);
            }
            ReminderCommand::Take { id, reply } => {
                let taken = self.store.take_medication(id, self.clock.today());
                if taken.is_some() {
                    let cleared = self.dispatcher.retract(id);
                    debug!("Cleared {cleared} banners for {id}");
                    self.publish();
                }
                let _ = reply.send(taken);
            }
            ReminderCommand::Dismiss { index, reply } => {
                let dismissed = self.dispatcher.dismiss(index);
                if dismissed.is_some() {
                    self.publish();
                }
                let _ = reply.send(dismissed);
            }
            ReminderCommand::CheckNow { reply } => {
                let emitted = self.check();
                let _ = reply.send(emitted);
            }
            ReminderCommand::Snapshot { reply } => {
                let _ = reply.send(self.snapshot());
            }
            // handled by the run loop
            ReminderCommand::Shutdown => {}
        }
    }

    /// Flag due medications, queue banners, hand desktop notifications off
    fn check(&mut self) -> Vec<Notification> {
        let now = self.clock.now();
        let emitted = self.store.check_due(now);
        debug!("Due check at {now}: {} new", emitted.len());

        if !emitted.is_empty() {
            let desktop = self.dispatcher.dispatch(emitted.clone());
            self.deliver(desktop);
            self.emit(ReminderEvent::Due(emitted.clone()));
        }
        self.publish();
        emitted
    }

    fn on_permission(
        &mut self,
        permission: Permission,
        feedback: &mpsc::UnboundedSender<Permission>,
    ) {
        debug!("Desktop notification permission: {}", permission.label());
        if self.dispatcher.on_permission(permission) {
            let notifier = self.notifier.clone();
            let feedback = feedback.clone();
            tokio::spawn(async move {
                let answer = notifier.request_permission().await;
                let _ = feedback.send(answer);
            });
        }
        self.publish();
    }

    fn deliver(&self, notifications: Vec<Notification>) {
        for notification in notifications {
            let notifier = self.notifier.clone();
            tokio::spawn(async move {
                if let Err(e) = notifier.show(NOTIFICATION_TITLE, &notification.text).await {
                    warn!("Desktop notification failed: {e:#}");
                }
            });
        }
    }

    fn snapshot(&self) -> ReminderSnapshot {
        ReminderSnapshot {
            medications: self.store.medications().to_vec(),
            banners: self.dispatcher.banners().to_vec(),
            permission: self.dispatcher.permission(),
            today: self.clock.today(),
        }
    }

    fn publish(&self) {
        if self.events.is_some() {
            self.emit(ReminderEvent::Updated(self.snapshot()));
        }
    }

    fn emit(&self, event: ReminderEvent) {
        if let Some(events) = &self.events {
            // receiver gone means the UI has exited
            let _ = events.send(event);
        }
    }
}

/// Cloneable handle for talking to a running scheduler
#[derive(Debug, Clone)]
pub struct ReminderHandle {
    tx: mpsc::Sender<ReminderCommand>,
}

impl ReminderHandle {
    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<T>) -> ReminderCommand,
    ) -> ReminderResult<T> {
        let (reply, response) = oneshot::channel();
        self.tx
            .send(make(reply))
            .await
            .map_err(|_| ReminderError::SchedulerStopped)?;
        response.await.map_err(|_| ReminderError::SchedulerStopped)
    }

    pub async fn add_medication(&self, medication: NewMedication) -> ReminderResult<Medication> {
        self.request(|reply| ReminderCommand::Add { medication, reply })
            .await?
    }

    /// `Ok(false)` when no medication had that id
    pub async fn delete_medication(&self, id: Uuid) -> ReminderResult<bool> {
        self.request(|reply| ReminderCommand::Delete { id, reply }).await
    }

    /// `Ok(None)` when no medication had that id
    pub async fn take_medication(&self, id: Uuid) -> ReminderResult<Option<Medication>> {
        self.request(|reply| ReminderCommand::Take { id, reply }).await
    }

    pub async fn dismiss(&self, index: usize) -> ReminderResult<Option<Notification>> {
        self.request(|reply| ReminderCommand::Dismiss { index, reply }).await
    }

    pub async fn check_now(&self) -> ReminderResult<Vec<Notification>> {
        self.request(|reply| ReminderCommand::CheckNow { reply }).await
    }

    pub async fn snapshot(&self) -> ReminderResult<ReminderSnapshot> {
        self.request(|reply| ReminderCommand::Snapshot { reply }).await
    }

    /// Stop the scheduler; later calls fail with `SchedulerStopped`
    pub async fn shutdown(&self) {
        let _ = self.tx.send(ReminderCommand::Shutdown).await;
    }
}
