//! Timer-driven refresh of mounted views
//!
//! Every data view owns one [`PollHandle`]. The handle's task fetches on mount,
//! again on every interval tick while the view is visible, and immediately when
//! the view becomes visible again. Dropping the handle tears the task down.

pub mod controller;
pub mod sources;

pub use controller::{PollHandle, PollSnapshot, PollingController, Visibility};
pub use sources::{CampaignDashboardSource, CampaignListSource, ViewSource};

/// Lifecycle of a polled view.
#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum PollState {
    /// Created, first fetch not yet started
    Idle,
    /// A request is in flight
    Fetching,
    /// The last fetch succeeded
    Loaded,
    /// The last fetch failed; the next tick tries again
    Errored,
}
