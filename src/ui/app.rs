//! Top-level screen switching and the terminal event loop

use crate::environment::Environment;
use crate::events::{Event as WorkerEvent, EventSender};
use crate::gateway::CampaignGateway;
use crate::polling::Visibility;
use crate::route::Route;
use crate::transition::{TransitionContext, TransitionEvent};
use crate::ui::dashboard::{DashboardState, render_dashboard};
use crate::ui::splash::render_splash;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{Frame, Terminal, backend::Backend};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{broadcast, mpsc};

const SPLASH_DURATION: Duration = Duration::from_secs(2);
const INPUT_POLL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone)]
pub struct UIConfig {
    pub with_background_color: bool,
    pub poll_interval: Duration,
    /// Route shown once the splash screen is gone.
    pub initial_route: Route,
}

/// Handles the dashboard passes to the views it mounts.
pub struct DashboardDeps {
    pub gateway: Arc<dyn CampaignGateway>,
    pub events: EventSender,
    pub transition: TransitionContext,
}

pub enum Screen {
    Splash { since: Instant },
    /// Every route lives inside the dashboard screen.
    Dashboard(Box<DashboardState>),
}

pub struct App {
    started: Instant,
    environment: Environment,
    screen: Screen,
    worker_events: mpsc::Receiver<WorkerEvent>,
    transition_events: mpsc::Receiver<TransitionEvent>,
    shutdown: broadcast::Sender<()>,
    ui_config: UIConfig,
    deps: DashboardDeps,
}

/// What the loop should do after a terminal event.
enum Flow {
    Continue,
    Quit,
}

impl App {
    pub fn new(
        environment: Environment,
        worker_events: mpsc::Receiver<WorkerEvent>,
        transition_events: mpsc::Receiver<TransitionEvent>,
        shutdown: broadcast::Sender<()>,
        ui_config: UIConfig,
        deps: DashboardDeps,
    ) -> Self {
        let started = Instant::now();
        Self {
            started,
            environment,
            screen: Screen::Splash { since: started },
            worker_events,
            transition_events,
            shutdown,
            ui_config,
            deps,
        }
    }

    fn dashboard(&mut self) -> Option<&mut DashboardState> {
        match &mut self.screen {
            Screen::Dashboard(state) => Some(state),
            Screen::Splash { .. } => None,
        }
    }

    /// Leave the splash screen and mount the initial route.
    fn open_dashboard(&mut self) {
        let state = DashboardState::new(
            self.environment,
            self.started,
            self.ui_config.clone(),
            self.deps.gateway.clone(),
            self.deps.events.clone(),
            self.deps.transition.clone(),
        );
        self.screen = Screen::Dashboard(Box::new(state));
    }

    /// Move queued channel traffic into the dashboard, then advance one tick.
    ///
    /// Events that arrive during the splash have no view to land in and are dropped.
    fn pump(&mut self) {
        while let Ok(event) = self.worker_events.try_recv() {
            if let Some(state) = self.dashboard() {
                state.add_event(event);
            }
        }
        while let Ok(event) = self.transition_events.try_recv() {
            if let Some(state) = self.dashboard() {
                state.handle_transition_event(event);
            }
        }
        match &mut self.screen {
            Screen::Dashboard(state) => state.update(),
            Screen::Splash { since } => {
                if since.elapsed() >= SPLASH_DURATION {
                    self.open_dashboard();
                }
            }
        }
    }

    fn on_terminal_event(&mut self, event: Event) -> Flow {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                    let _ = self.shutdown.send(());
                    return Flow::Quit;
                }
                match self.dashboard() {
                    Some(state) => state.handle_key(key.code),
                    // Any key skips the splash.
                    None => self.open_dashboard(),
                }
            }
            Event::FocusGained => self.set_visibility(Visibility::Visible),
            Event::FocusLost => self.set_visibility(Visibility::Hidden),
            _ => {}
        }
        Flow::Continue
    }

    fn set_visibility(&mut self, visibility: Visibility) {
        if let Some(state) = self.dashboard() {
            state.set_visibility(visibility);
        }
    }

    fn render(&self, f: &mut Frame) {
        match &self.screen {
            Screen::Splash { .. } => render_splash(f),
            Screen::Dashboard(state) => render_dashboard(f, state),
        }
    }
}

/// Drive the UI until the user quits or another task broadcasts shutdown.
pub async fn run<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> std::io::Result<()> {
    let mut shutdown = app.shutdown.subscribe();

    loop {
        if shutdown.try_recv().is_ok() {
            return Ok(());
        }

        app.pump();
        terminal.draw(|f| app.render(f))?;

        if event::poll(INPUT_POLL)? {
            if let Flow::Quit = app.on_terminal_event(event::read()?) {
                return Ok(());
            }
        }
    }
}
