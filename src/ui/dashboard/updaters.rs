//! Dashboard state update logic
//!
//! Contains all methods for updating dashboard state from events and keys

use super::state::{DashboardState, ExitAnimation, ViewState};

use crate::events::{Event as WorkerEvent, EventSource};
use crate::route::Route;
use crate::transition::{TransitionEvent, TransitionKind, TransitionState};
use crossterm::event::KeyCode;
use std::time::Instant;

impl DashboardState {
    /// Update the dashboard state with a new tick and the queued events.
    pub fn update(&mut self) {
        self.tick += 1;

        // Process all queued events one by one
        while let Some(event) = self.pending_events.pop_front() {
            self.process_event(&event);
            self.add_to_activity_log(event);
        }
    }

    fn process_event(&mut self, event: &WorkerEvent) {
        if let EventSource::Poller(view) = &event.source {
            if let Some(state) = event.poll_state {
                log::trace!("{} -> {}", view, state);
            }
        }
    }

    /// Apply one step of the transition sequence.
    pub fn handle_transition_event(&mut self, event: TransitionEvent) {
        match &event {
            TransitionEvent::ExitStarted(kind) => {
                self.exit_animation = Some(ExitAnimation {
                    kind: *kind,
                    started_at: Instant::now(),
                });
            }
            TransitionEvent::OverlayPublished(state) => {
                self.overlay = state.clone();
            }
            TransitionEvent::Navigate(route) => {
                self.exit_animation = None;
                self.navigate(route.clone());
                // The destination is mounted; start its entry countdown.
                self.transition.complete_after_entry();
            }
            TransitionEvent::CompleteRequested => {}
            TransitionEvent::OverlayCleared(_) => {
                self.overlay = TransitionState::default();
            }
        }
        self.add_to_activity_log(WorkerEvent::choreographer(describe(&event)));
    }

    /// React to a key press. Quit keys are handled by the caller.
    pub fn handle_key(&mut self, code: KeyCode) {
        // The home tiles are gone while the overlay is up.
        if self.transition.is_transitioning() {
            return;
        }

        match &mut self.view {
            ViewState::Home { selected } => match code {
                KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
                    *selected = match selected {
                        TransitionKind::Email => TransitionKind::Linkedin,
                        TransitionKind::Linkedin => TransitionKind::Email,
                    };
                }
                KeyCode::Char('e') | KeyCode::Char('1') => self.begin(TransitionKind::Email),
                KeyCode::Char('l') | KeyCode::Char('2') => self.begin(TransitionKind::Linkedin),
                KeyCode::Enter => {
                    let kind = *selected;
                    self.begin(kind);
                }
                _ => {}
            },
            ViewState::Campaigns { poll, selected } => {
                let campaigns = poll.snapshot().data;
                let count = campaigns.as_ref().map_or(0, |list| list.len());
                match code {
                    KeyCode::Up | KeyCode::Char('k') => *selected = selected.saturating_sub(1),
                    KeyCode::Down | KeyCode::Char('j') => {
                        *selected = (*selected + 1).min(count.saturating_sub(1));
                    }
                    KeyCode::Enter => {
                        let target = campaigns
                            .as_ref()
                            .and_then(|list| list.get(*selected))
                            .map(|campaign| campaign.campaign_id().to_string());
                        if let Some(id) = target {
                            self.navigate(Route::EmailDashboard(id));
                        }
                    }
                    KeyCode::Char('b') | KeyCode::Backspace => self.back(),
                    _ => {}
                }
            }
            ViewState::CampaignDashboard { .. } | ViewState::Linkedin => {
                if matches!(code, KeyCode::Char('b') | KeyCode::Backspace) {
                    self.back();
                }
            }
        }
    }

    fn begin(&mut self, kind: TransitionKind) {
        if let ViewState::Home { selected } = &mut self.view {
            *selected = kind;
        }
        self.transition.begin(kind);
    }
}

fn describe(event: &TransitionEvent) -> String {
    match event {
        TransitionEvent::ExitStarted(kind) => format!("{} transition started", kind),
        TransitionEvent::OverlayPublished(state) => format!(
            "Overlay up ({})",
            state.source_asset.unwrap_or("no asset")
        ),
        TransitionEvent::Navigate(route) => format!("Navigated to {}", route),
        TransitionEvent::CompleteRequested => "Destination ready".to_string(),
        TransitionEvent::OverlayCleared(kind) => format!("{} transition finished", kind),
    }
}
