//! Dashboard state management
//!
//! Contains the main dashboard state struct and the per-route view state

use crate::consts::cli_consts::MAX_ACTIVITY_LOGS;
use crate::environment::Environment;
use crate::events::{Event as WorkerEvent, EventSender};
use crate::gateway::CampaignGateway;
use crate::models::CampaignData;
use crate::polling::{
    CampaignDashboardSource, CampaignListSource, PollHandle, PollingController, Visibility,
};
use crate::route::Route;
use crate::transition::{TransitionContext, TransitionKind, TransitionState};
use crate::ui::app::UIConfig;

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Home tile leaving the screen at the start of a transition.
#[derive(Debug, Clone, Copy)]
pub struct ExitAnimation {
    pub kind: TransitionKind,
    pub started_at: Instant,
}

/// What the current route has mounted.
pub enum ViewState {
    Home {
        selected: TransitionKind,
    },
    Campaigns {
        poll: PollHandle<Vec<CampaignData>>,
        selected: usize,
    },
    CampaignDashboard {
        campaign_id: Option<String>,
        poll: PollHandle<CampaignData>,
    },
    Linkedin,
}

impl ViewState {
    pub fn set_visibility(&self, visibility: Visibility) {
        match self {
            ViewState::Campaigns { poll, .. } => poll.set_visibility(visibility),
            ViewState::CampaignDashboard { poll, .. } => poll.set_visibility(visibility),
            ViewState::Home { .. } | ViewState::Linkedin => {}
        }
    }
}

/// Everything the dashboard renders from.
pub struct DashboardState {
    /// The environment in which the application is running.
    pub environment: Environment,
    /// The start time of the application, used for computing uptime.
    pub start_time: Instant,
    pub route: Route,
    /// Routes left behind, most recent last.
    pub history: Vec<Route>,
    pub view: ViewState,
    /// Queue of events waiting to be processed
    pub pending_events: VecDeque<WorkerEvent>,
    /// Activity logs for display
    pub activity_logs: VecDeque<WorkerEvent>,
    /// Whether to enable background colors
    pub with_background_color: bool,
    /// Animation tick counter
    pub tick: usize,
    /// Overlay published by the transition context.
    pub overlay: TransitionState,
    pub exit_animation: Option<ExitAnimation>,
    /// Terminal focus, forwarded to the mounted poller.
    pub visibility: Visibility,
    pub poll_interval: Duration,

    pub(crate) transition: TransitionContext,
    gateway: Arc<dyn CampaignGateway>,
    events: EventSender,
}

impl DashboardState {
    pub fn new(
        environment: Environment,
        start_time: Instant,
        ui_config: UIConfig,
        gateway: Arc<dyn CampaignGateway>,
        events: EventSender,
        transition: TransitionContext,
    ) -> Self {
        let mut state = Self {
            environment,
            start_time,
            route: Route::Home,
            history: Vec::new(),
            view: ViewState::Home {
                selected: TransitionKind::Email,
            },
            pending_events: VecDeque::new(),
            activity_logs: VecDeque::new(),
            with_background_color: ui_config.with_background_color,
            tick: 0,
            overlay: TransitionState::default(),
            exit_animation: None,
            visibility: Visibility::Visible,
            poll_interval: ui_config.poll_interval,
            transition,
            gateway,
            events,
        };
        if ui_config.initial_route != Route::Home {
            state.mount(ui_config.initial_route);
        }
        state
    }

    /// Go to `route`, remembering where we came from.
    pub fn navigate(&mut self, route: Route) {
        if route == self.route {
            return;
        }
        let previous = std::mem::replace(&mut self.route, Route::Home);
        self.history.push(previous);
        self.mount(route);
    }

    /// Return to the previous route, or home when there is none.
    pub fn back(&mut self) {
        let route = self.history.pop().unwrap_or(Route::Home);
        self.mount(route);
    }

    /// Replace the mounted view. The old view's poller stops when it is dropped.
    fn mount(&mut self, route: Route) {
        let events = Some(self.events.clone());
        self.view = match &route {
            Route::Home => ViewState::Home {
                selected: TransitionKind::Email,
            },
            Route::EmailCampaigns => ViewState::Campaigns {
                poll: PollingController::spawn_with_visibility(
                    CampaignListSource::new(self.gateway.clone()),
                    self.poll_interval,
                    events,
                    self.visibility,
                ),
                selected: 0,
            },
            Route::EmailDashboard(id) => ViewState::CampaignDashboard {
                campaign_id: Some(id.clone()),
                poll: PollingController::spawn_with_visibility(
                    CampaignDashboardSource::new(self.gateway.clone(), Some(id.clone())),
                    self.poll_interval,
                    events,
                    self.visibility,
                ),
            },
            Route::LinkedinDashboard => ViewState::Linkedin,
        };
        log::debug!("Mounted {}", route);
        self.route = route;
    }

    pub fn set_visibility(&mut self, visibility: Visibility) {
        self.visibility = visibility;
        self.view.set_visibility(visibility);
    }

    /// Add an event to activity logs with size limit.
    ///
    /// Events the panel would hide are dropped so they never take a slot.
    pub fn add_to_activity_log(&mut self, event: WorkerEvent) {
        if !event.should_display() {
            return;
        }
        if self.activity_logs.len() >= MAX_ACTIVITY_LOGS {
            self.activity_logs.pop_front();
        }
        self.activity_logs.push_back(event);
    }

    /// Add an event to the processing queue
    pub fn add_event(&mut self, event: WorkerEvent) {
        self.pending_events.push_back(event);
    }

    /// Accent colour of the current route, taken from its channel gradient.
    pub fn accent_kind(&self) -> Option<TransitionKind> {
        match self.route {
            Route::Home => None,
            Route::EmailCampaigns | Route::EmailDashboard(_) => Some(TransitionKind::Email),
            Route::LinkedinDashboard => Some(TransitionKind::Linkedin),
        }
    }
}
