//! Polling controller task and its handle

use super::{PollState, ViewSource};
use crate::error_classifier::ErrorClassifier;
use crate::events::{Event, EventSender, EventType};
use crate::logging::LogLevel;
use chrono::{DateTime, Local};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;

/// Whether the view is currently on screen.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
}

/// What a view renders from: the latest state plus the last good data.
#[derive(Debug)]
pub struct PollSnapshot<T> {
    pub state: PollState,
    /// Last successful result. Kept while a later fetch is failing.
    pub data: Option<Arc<T>>,
    /// Message of the most recent failure, cleared on success.
    pub error: Option<String>,
    /// Fetches started so far.
    pub attempts: u32,
    pub consecutive_failures: u32,
    pub last_success: Option<DateTime<Local>>,
}

impl<T> Clone for PollSnapshot<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state,
            data: self.data.clone(),
            error: self.error.clone(),
            attempts: self.attempts,
            consecutive_failures: self.consecutive_failures,
            last_success: self.last_success,
        }
    }
}

impl<T> PollSnapshot<T> {
    fn idle() -> Self {
        Self {
            state: PollState::Idle,
            data: None,
            error: None,
            attempts: 0,
            consecutive_failures: 0,
            last_success: None,
        }
    }

    /// Nothing to show yet: no data and no error.
    pub fn is_loading(&self) -> bool {
        self.data.is_none() && self.error.is_none()
    }
}

/// Owner of the refresh loop for one view.
pub struct PollingController<S: ViewSource> {
    source: S,
    label: String,
    interval: Duration,
    events: Option<EventSender>,
    classifier: ErrorClassifier,
    snapshots: watch::Sender<PollSnapshot<S::Output>>,
    visibility: watch::Receiver<Visibility>,
    cancel: CancellationToken,
}

impl<S: ViewSource> PollingController<S> {
    /// Spawn a controller for a view that starts out visible.
    pub fn spawn(
        source: S,
        interval: Duration,
        events: Option<EventSender>,
    ) -> PollHandle<S::Output> {
        Self::spawn_with_visibility(source, interval, events, Visibility::Visible)
    }

    pub fn spawn_with_visibility(
        source: S,
        interval: Duration,
        events: Option<EventSender>,
        initial: Visibility,
    ) -> PollHandle<S::Output> {
        let (snapshot_sender, snapshot_receiver) = watch::channel(PollSnapshot::idle());
        let (visibility_sender, visibility_receiver) = watch::channel(initial);
        let cancel = CancellationToken::new();

        let controller = Self {
            label: source.label(),
            source,
            interval,
            events,
            classifier: ErrorClassifier::new(),
            snapshots: snapshot_sender,
            visibility: visibility_receiver,
            cancel: cancel.clone(),
        };
        let join = tokio::spawn(controller.run());

        PollHandle {
            snapshots: snapshot_receiver,
            visibility: visibility_sender,
            cancel,
            join: Some(join),
        }
    }

    async fn run(mut self) {
        let mut ticker = interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut visible = *self.visibility.borrow_and_update() == Visibility::Visible;

        // The mount fetch happens immediately, visible or not.
        let mut fetch_due = true;
        loop {
            if fetch_due {
                fetch_due = false;
                if !self.fetch_once().await {
                    break;
                }
                // Visibility flips during the request are folded into it.
                visible = *self.visibility.borrow_and_update() == Visibility::Visible;
                continue;
            }

            tokio::select! {
                _ = self.cancel.cancelled() => break,
                _ = ticker.tick() => {
                    if visible {
                        fetch_due = true;
                    } else {
                        log::debug!("{}: hidden, skipping scheduled refresh", self.label);
                    }
                }
                changed = self.visibility.changed() => {
                    // The handle owns the sender; losing it means the view is gone.
                    if changed.is_err() {
                        break;
                    }
                    let now_visible =
                        *self.visibility.borrow_and_update() == Visibility::Visible;
                    if now_visible && !visible {
                        self.emit(Event::poller_with_level(
                            &self.label,
                            format!("{} visible again, refreshing now", self.label),
                            EventType::Refresh,
                            LogLevel::Debug,
                        ))
                        .await;
                        fetch_due = true;
                    } else if !now_visible && visible {
                        self.emit(Event::poller_with_level(
                            &self.label,
                            format!("{} hidden, pausing refreshes", self.label),
                            EventType::Waiting,
                            LogLevel::Debug,
                        ))
                        .await;
                    }
                    visible = now_visible;
                }
            }
        }
        log::debug!("{}: polling stopped", self.label);
    }

    /// Run one fetch and publish its outcome.
    ///
    /// Returns false when the controller was cancelled before the response
    /// arrived; the response is then dropped unseen.
    async fn fetch_once(&mut self) -> bool {
        self.publish(|snapshot| {
            snapshot.state = PollState::Fetching;
            snapshot.attempts += 1;
        });
        self.emit(Event::poll_state_change(&self.label, PollState::Fetching))
            .await;

        let result = tokio::select! {
            _ = self.cancel.cancelled() => return false,
            result = self.source.load() => result,
        };
        if self.cancel.is_cancelled() {
            return false;
        }

        match result {
            Ok(data) => {
                self.publish(|snapshot| {
                    snapshot.state = PollState::Loaded;
                    snapshot.data = Some(Arc::new(data));
                    snapshot.error = None;
                    snapshot.consecutive_failures = 0;
                    snapshot.last_success = Some(Local::now());
                });
                self.emit(Event::poller_with_level(
                    &self.label,
                    format!("Refreshed {}", self.label),
                    EventType::Success,
                    LogLevel::Info,
                ))
                .await;
                self.emit(Event::poll_state_change(&self.label, PollState::Loaded))
                    .await;
            }
            Err(e) => {
                let log_level = self.classifier.classify_fetch_error(&e);
                let message = e.to_string();
                self.publish(|snapshot| {
                    snapshot.state = PollState::Errored;
                    snapshot.error = Some(message.clone());
                    snapshot.consecutive_failures += 1;
                });
                self.emit(Event::poller_with_level(
                    &self.label,
                    format!("Failed to refresh {}: {}", self.label, message),
                    EventType::Error,
                    log_level,
                ))
                .await;
                self.emit(Event::poll_state_change(&self.label, PollState::Errored))
                    .await;
            }
        }
        true
    }

    fn publish(&self, update: impl FnOnce(&mut PollSnapshot<S::Output>)) {
        if self.cancel.is_cancelled() {
            return;
        }
        self.snapshots.send_modify(update);
    }

    async fn emit(&self, event: Event) {
        if let Some(events) = &self.events {
            events.send_event(event).await;
        }
    }
}

/// A mounted view's grip on its controller. Dropping it stops the polling.
pub struct PollHandle<T> {
    snapshots: watch::Receiver<PollSnapshot<T>>,
    visibility: watch::Sender<Visibility>,
    cancel: CancellationToken,
    join: Option<JoinHandle<()>>,
}

impl<T> PollHandle<T> {
    pub fn snapshot(&self) -> PollSnapshot<T> {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<PollSnapshot<T>> {
        self.snapshots.clone()
    }

    /// Report a visibility change. Repeating the current value is a no-op.
    pub fn set_visibility(&self, visibility: Visibility) {
        self.visibility.send_if_modified(|current| {
            if *current == visibility {
                return false;
            }
            *current = visibility;
            true
        });
    }

    /// Stop polling and wait for the task to finish.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(join) = self.join.take() {
            let _ = join.await;
        }
    }
}

impl<T> Drop for PollHandle<T> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
