//! TUI mode execution

use super::SessionData;
use crate::{print_cmd_info, print_cmd_success};
use crate::consts::cli_consts::EVENT_QUEUE_SIZE;
use crate::route::Route;
use crate::system::DeviceProfile;
use crate::transition::{MotionProfile, TransitionContext};
use crate::ui::{self, DashboardDeps, UIConfig};
use crossterm::{
    event::{DisableFocusChange, EnableFocusChange},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{error::Error, io};
use tokio::sync::mpsc;

/// Runs the application in TUI mode
///
/// This function handles:
/// 1. Motion profile selection for this machine
/// 2. Terminal setup and cleanup, including focus reporting
/// 3. UI application initialization and execution
///
/// # Arguments
/// * `session` - Session data from setup
/// * `with_background` - Whether to enable background colors
/// * `initial_route` - Route to open after the splash screen
pub async fn run_tui_mode(
    session: SessionData,
    with_background: bool,
    initial_route: Route,
) -> Result<(), Box<dyn Error>> {
    print_cmd_info!("Starting dashboard", "campaign data from {}", session.api_base_url);

    let device = DeviceProfile::detect(session.config.reduced_motion);
    let motion = MotionProfile::for_device(&device);
    log::debug!("{:?} -> {:?}", device, motion);
    let (transition_sender, transition_receiver) = mpsc::channel(EVENT_QUEUE_SIZE);
    let transition = TransitionContext::new(motion, transition_sender);

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    // Focus events stand in for visibility: pollers pause while unfocused.
    execute!(stdout, EnterAlternateScreen, EnableFocusChange)?;

    // Initialize the terminal with Crossterm backend
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let ui_config = UIConfig {
        with_background_color: with_background,
        poll_interval: session.poll_interval(),
        initial_route,
    };
    let deps = DashboardDeps {
        gateway: session.gateway,
        events: session.event_sender,
        transition,
    };
    let app = ui::App::new(
        session.environment,
        session.event_receiver,
        transition_receiver,
        session.shutdown_sender.clone(),
        ui_config,
        deps,
    );

    let result = ui::run(&mut terminal, app).await;

    // Clean up the terminal after running the application
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableFocusChange
    )?;
    terminal.show_cursor()?;

    // Handle the result
    result?;

    print_cmd_success!("Dashboard closed");

    Ok(())
}
