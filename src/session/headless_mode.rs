//! Watch mode execution
//!
//! Polls one view without a terminal UI and prints each refresh to stdout.

use super::SessionData;
use crate::{print_cmd_info, print_cmd_success};
use crate::events::Event;
use crate::models::CampaignData;
use crate::polling::{
    CampaignDashboardSource, CampaignListSource, PollHandle, PollState, PollingController,
};
use crate::view::{CampaignCard, CampaignMetrics, header_title};
use std::error::Error;
use tokio::sync::{broadcast, mpsc};

/// Which view watch mode polls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchTarget {
    /// One campaign; `None` picks the first campaign in the analytics list.
    Campaign(Option<String>),
    AllCampaigns,
}

/// Runs the application in watch mode
///
/// This function handles:
/// 1. Ctrl+C handling for graceful shutdown
/// 2. Spawning the poller for the requested view
/// 3. Printing refreshes and activity until shutdown
pub async fn run_watch_mode(
    session: SessionData,
    target: WatchTarget,
) -> Result<(), Box<dyn Error>> {
    print_cmd_info!(
        "Watching campaigns",
        "polling {} every {}s, Ctrl+C to stop",
        session.api_base_url,
        session.poll_interval().as_secs()
    );

    // Trigger shutdown on Ctrl+C
    let shutdown_sender_clone = session.shutdown_sender.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            print_cmd_info!("Shutting down");
            let _ = shutdown_sender_clone.send(());
        }
    });

    let shutdown_receiver = session.shutdown_sender.subscribe();
    let interval = session.poll_interval();
    let events = Some(session.event_sender.clone());

    match target {
        WatchTarget::Campaign(campaign_id) => {
            let source = CampaignDashboardSource::new(session.gateway.clone(), campaign_id);
            let handle = PollingController::spawn(source, interval, events);
            watch_view(
                handle,
                session.event_receiver,
                shutdown_receiver,
                summarize_campaign,
            )
            .await;
        }
        WatchTarget::AllCampaigns => {
            let source = CampaignListSource::new(session.gateway.clone());
            let handle = PollingController::spawn(source, interval, events);
            watch_view(
                handle,
                session.event_receiver,
                shutdown_receiver,
                summarize_campaign_list,
            )
            .await;
        }
    }

    print_cmd_success!("Watch stopped");
    Ok(())
}

async fn watch_view<T>(
    handle: PollHandle<T>,
    mut events: mpsc::Receiver<Event>,
    mut shutdown: broadcast::Receiver<()>,
    describe: fn(&T) -> String,
) {
    let mut snapshots = handle.subscribe();
    loop {
        tokio::select! {
            Some(event) = events.recv() => {
                if event.should_display() {
                    println!("{}", event);
                }
            }
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = snapshots.borrow_and_update().clone();
                if snapshot.state == PollState::Loaded {
                    if let Some(data) = snapshot.data {
                        println!("{}", describe(&data));
                    }
                }
            }
            _ = shutdown.recv() => break,
        }
    }
    handle.shutdown().await;
}

fn summarize_campaign(data: &CampaignData) -> String {
    let metrics = CampaignMetrics::from_analytics(&data.analytics);
    let mut lines = vec![format!(
        "{} [{}]",
        header_title(Some(data)),
        data.status()
    )];
    lines.extend(
        metrics
            .counts
            .iter()
            .chain(metrics.rates.iter())
            .map(|slot| format!("  {:<24} {}", slot.label, slot.value)),
    );
    lines.join("\n")
}

fn summarize_campaign_list(campaigns: &Vec<CampaignData>) -> String {
    if campaigns.is_empty() {
        return "No campaigns found".to_string();
    }
    campaigns
        .iter()
        .map(|data| {
            let card = CampaignCard::from_data(data);
            let stats = card
                .quick_stats
                .iter()
                .map(|slot| format!("{} {}", slot.label, slot.value))
                .collect::<Vec<_>>()
                .join(", ");
            format!(
                "{} [{}] {} {}: {}",
                card.name, card.status, card.kind_label, card.short_id, stats
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CampaignAnalytics, CampaignDetails};

    fn campaign(name: &str) -> CampaignData {
        CampaignData {
            analytics: CampaignAnalytics {
                campaign_id: "0123456789abcdef".into(),
                campaign_name: name.into(),
                campaign_status: 1,
                emails_sent_count: 1200,
                open_count: 300,
                ..CampaignAnalytics::default()
            },
            details: CampaignDetails::default(),
        }
    }

    #[test]
    fn campaign_summary_lists_every_metric() {
        let summary = summarize_campaign(&campaign("Q3 Outreach"));
        assert!(summary.starts_with("Q3 Outreach"));
        assert!(summary.contains("1,200"));
        assert_eq!(summary.lines().count(), 1 + 12 + 4);
    }

    #[test]
    fn empty_campaign_list() {
        assert_eq!(summarize_campaign_list(&Vec::new()), "No campaigns found");
    }

    #[test]
    fn campaign_list_has_one_line_per_campaign() {
        let summary = summarize_campaign_list(&vec![campaign("A"), campaign("B")]);
        assert_eq!(summary.lines().count(), 2);
        assert!(summary.contains("01234567..."));
    }
}
