mod cli_messages;
mod config;
mod consts;
mod environment;
mod error_classifier;
mod events;
mod gateway;
mod logging;
mod models;
mod polling;
mod proxy;
mod route;
mod session;
pub mod system;
mod transition;
mod ui;
mod view;

use crate::config::{Config, get_config_path};
use crate::environment::Environment;
use crate::proxy::config::{ENVIRONMENT_VAR, ProxyConfig};
use crate::route::Route;
use crate::session::{SessionData, WatchTarget, run_tui_mode, run_watch_mode, setup_session};
use clap::{Parser, Subcommand};
use std::error::Error;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Campaign analytics dashboard for Instantly email outreach
struct Args {
    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Open the interactive dashboard
    Dashboard {
        /// Route to open after the splash screen, e.g. /email-dashboard
        #[arg(long, value_name = "PATH", conflicts_with = "campaign")]
        route: Option<String>,

        /// Open the dashboard of one campaign
        #[arg(long, value_name = "CAMPAIGN_ID")]
        campaign: Option<String>,

        /// Disable background colors
        #[arg(long = "no-background-color", action = clap::ArgAction::SetTrue)]
        no_background_color: bool,
    },
    /// Poll a campaign and print every refresh
    Watch {
        /// Campaign to watch. Defaults to the configured campaign, then the first one
        #[arg(long, value_name = "CAMPAIGN_ID", conflicts_with = "all")]
        campaign: Option<String>,

        /// Watch the whole campaign list instead of one campaign
        #[arg(long)]
        all: bool,
    },
    /// Run the local API proxy that injects the Instantly credential
    Serve {
        /// Port to listen on
        #[arg(long, env = "PROXY_PORT")]
        port: Option<u16>,
    },
    /// Show or edit the local configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the current configuration
    Show,
    /// Set the campaign `watch` follows when none is given
    SetCampaign {
        /// Campaign ID
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let environment = match std::env::var(ENVIRONMENT_VAR) {
        Ok(value) => value.parse::<Environment>().unwrap_or_else(|e| {
            print_cmd_warn!("Ignoring environment", "{}", e);
            Environment::default()
        }),
        Err(_) => Environment::default(),
    };

    let config_path = get_config_path()?;
    let args = Args::parse();
    match args.command {
        Command::Dashboard {
            route,
            campaign,
            no_background_color,
        } => {
            let config = Config::load_or_default(&config_path)?;
            let initial_route = match (route, campaign) {
                (Some(path), _) => Route::parse(&path),
                (None, Some(id)) => Route::EmailDashboard(id),
                (None, None) => Route::Home,
            };
            let session = start_session(config, environment)?;
            run_tui_mode(session, !no_background_color, initial_route).await
        }
        Command::Watch { campaign, all } => {
            logging::init_console_logging();
            let config = Config::load_or_default(&config_path)?;
            let target = if all {
                WatchTarget::AllCampaigns
            } else {
                WatchTarget::Campaign(campaign.or_else(|| config.default_campaign_id.clone()))
            };
            let session = start_session(config, environment)?;
            run_watch_mode(session, target).await
        }
        Command::Serve { port } => {
            logging::init_console_logging();
            let mut proxy_config = ProxyConfig::load()?;
            if let Some(port) = port {
                proxy_config.port = port;
            }
            proxy::serve(proxy_config).await?;
            Ok(())
        }
        Command::Config { action } => match action {
            ConfigAction::Show => {
                let config = Config::load_or_default(&config_path)?;
                print_cmd_info!(
                    "Configuration",
                    "{}\n{}",
                    config_path.display(),
                    serde_json::to_string_pretty(&config)?
                );
                Ok(())
            }
            ConfigAction::SetCampaign { id } => {
                let mut config = Config::load_or_default(&config_path)?;
                config.default_campaign_id = Some(id.clone());
                config.save(&config_path)?;
                print_cmd_success!("Default campaign saved", "Campaign {} will open by default", id);
                Ok(())
            }
        },
    }
}

fn start_session(config: Config, environment: Environment) -> Result<SessionData, Box<dyn Error>> {
    setup_session(config, environment).inspect_err(|e| {
        print_cmd_error!("Failed to start session", "{}", e);
    })
}
