//! View transition choreography
//!
//! Leaving the home view for one of the two channels runs a short sequence:
//! the selected tile animates out, a gradient overlay is published, the route
//! changes, and once the destination has mounted the overlay clears after a
//! grace period. [`TransitionContext`] owns that sequence; views only call
//! `begin` and `complete` and react to [`TransitionEvent`]s.

pub mod context;
pub mod motion;

pub use context::TransitionContext;
pub use motion::MotionProfile;

use crate::route::Route;
use std::fmt::{Display, Formatter};

/// Destination channel of a transition.
#[derive(Debug, Copy, Clone, PartialEq, Eq, strum::Display)]
pub enum TransitionKind {
    Email,
    Linkedin,
}

/// One colour stop of the overlay gradient.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct GradientStop(pub u8, pub u8, pub u8);

impl Display for GradientStop {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl TransitionKind {
    pub fn source_asset(&self) -> &'static str {
        match self {
            TransitionKind::Email => "sunset_email.png",
            TransitionKind::Linkedin => "blue_linkedin.png",
        }
    }

    pub fn target_gradient(&self) -> [GradientStop; 3] {
        match self {
            TransitionKind::Email => [
                GradientStop(0xf8, 0x71, 0x71),
                GradientStop(0xfb, 0x92, 0x3c),
                GradientStop(0xf9, 0x73, 0x16),
            ],
            TransitionKind::Linkedin => [
                GradientStop(0x1e, 0x40, 0xaf),
                GradientStop(0x3b, 0x82, 0xf6),
                GradientStop(0x60, 0xa5, 0xfa),
            ],
        }
    }

    /// Where the transition lands.
    pub fn route(&self) -> Route {
        match self {
            TransitionKind::Email => Route::EmailCampaigns,
            TransitionKind::Linkedin => Route::LinkedinDashboard,
        }
    }
}

/// The overlay as views see it. Inactive unless a transition is running.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransitionState {
    pub is_transitioning: bool,
    pub transition_type: Option<TransitionKind>,
    pub source_asset: Option<&'static str>,
    pub target_gradient: Option<[GradientStop; 3]>,
}

impl TransitionState {
    pub fn active(kind: TransitionKind) -> Self {
        Self {
            is_transitioning: true,
            transition_type: Some(kind),
            source_asset: Some(kind.source_asset()),
            target_gradient: Some(kind.target_gradient()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionEvent {
    /// The home tile starts its exit animation.
    ExitStarted(TransitionKind),
    OverlayPublished(TransitionState),
    Navigate(Route),
    /// The destination reported that it has mounted.
    CompleteRequested,
    OverlayCleared(TransitionKind),
}
