//! Event System
//!
//! Types and helpers for background task events and activity logging

use crate::logging::{LogLevel, should_log_with_env};
use crate::polling::PollState;
use chrono::Local;
use std::fmt::Display;
use tokio::sync::mpsc;

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum EventSource {
    /// Polling controller of a mounted view, identified by its label.
    Poller(String),
    /// Transition choreography between views.
    Choreographer,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum EventType {
    Success,
    Error,
    Refresh,
    Waiting,
    /// A step of a view transition.
    Transition,
    StateChange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub source: EventSource,
    pub msg: String,
    pub timestamp: String,
    pub event_type: EventType,
    pub log_level: LogLevel,
    /// Set on poller state change events
    pub poll_state: Option<PollState>,
}

impl Event {
    fn new(source: EventSource, msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self {
            source,
            msg,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            event_type,
            log_level,
            poll_state: None,
        }
    }

    pub fn poller_with_level(
        view: &str,
        msg: String,
        event_type: EventType,
        log_level: LogLevel,
    ) -> Self {
        Self::new(
            EventSource::Poller(view.to_string()),
            msg,
            event_type,
            log_level,
        )
    }

    pub fn poll_state_change(view: &str, state: PollState) -> Self {
        Self {
            poll_state: Some(state),
            ..Self::new(
                EventSource::Poller(view.to_string()),
                format!("{} is now {}", view, state),
                EventType::StateChange,
                LogLevel::Debug,
            )
        }
    }

    pub fn choreographer(msg: String) -> Self {
        Self::new(
            EventSource::Choreographer,
            msg,
            EventType::Transition,
            LogLevel::Info,
        )
    }

    /// Whether the activity log and watch output show this event.
    ///
    /// State changes drive the views and never reach the log. Below `Info`,
    /// the `RUST_LOG` threshold decides.
    pub fn should_display(&self) -> bool {
        match (self.event_type, self.log_level) {
            (EventType::StateChange, _) => false,
            (EventType::Success, _) => true,
            (_, level) if level >= LogLevel::Info => true,
            (_, level) => should_log_with_env(level),
        }
    }

    /// Short label for where the event came from.
    pub fn origin(&self) -> &str {
        match &self.source {
            EventSource::Poller(view) => view,
            EventSource::Choreographer => "Transition",
        }
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {:<7} {}: {}",
            self.timestamp,
            self.event_type,
            self.origin(),
            self.msg
        )
    }
}

/// Common event sending utilities for background tasks
#[derive(Clone, Debug)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Send a generic event. A closed receiver is not an error: the UI may be gone.
    pub async fn send_event(&self, event: Event) {
        let _ = self.sender.send(event).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_changes_stay_out_of_the_log_panel() {
        let event = Event::poll_state_change("Campaigns", PollState::Loaded);
        assert_eq!(event.poll_state, Some(PollState::Loaded));
        assert!(!event.should_display());
    }

    #[test]
    fn info_and_success_events_are_displayed() {
        let info = Event::poller_with_level(
            "Campaigns",
            "Refreshing".into(),
            EventType::Refresh,
            LogLevel::Info,
        );
        assert!(info.should_display());
        assert!(info.to_string().ends_with("Refresh Campaigns: Refreshing"));
    }

    #[test]
    fn transition_steps_reach_the_log_panel() {
        let event = Event::choreographer("Navigated to /email-dashboard".into());
        assert_eq!(event.event_type, EventType::Transition);
        assert!(event.should_display());
        assert_eq!(event.origin(), "Transition");
    }

    #[tokio::test]
    async fn sending_to_a_closed_channel_is_silent() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        EventSender::new(tx)
            .send_event(Event::choreographer("gone".into()))
            .await;
    }
}
