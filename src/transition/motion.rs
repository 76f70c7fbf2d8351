//! Phase timings of a view transition

use crate::consts::cli_consts::transition::{
    ENTRY_DELAY_MS, EXIT_DURATION_MS, GRACE_DELAY_MS, NAVIGATE_DELAY_MS, OVERLAY_DELAY_MS,
};
use crate::system::DeviceProfile;
use std::time::Duration;

/// Durations of each transition phase. Overlay and navigate delays are
/// measured from the start of the action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionProfile {
    pub exit_duration: Duration,
    pub overlay_delay: Duration,
    pub navigate_delay: Duration,
    pub entry_delay: Duration,
    pub grace_delay: Duration,
}

impl MotionProfile {
    pub const fn standard() -> Self {
        Self {
            exit_duration: Duration::from_millis(EXIT_DURATION_MS),
            overlay_delay: Duration::from_millis(OVERLAY_DELAY_MS),
            navigate_delay: Duration::from_millis(NAVIGATE_DELAY_MS),
            entry_delay: Duration::from_millis(ENTRY_DELAY_MS),
            grace_delay: Duration::from_millis(GRACE_DELAY_MS),
        }
    }

    /// Every phase runs back to back with no delay; ordering is unchanged.
    pub const fn reduced() -> Self {
        Self {
            exit_duration: Duration::ZERO,
            overlay_delay: Duration::ZERO,
            navigate_delay: Duration::ZERO,
            entry_delay: Duration::ZERO,
            grace_delay: Duration::ZERO,
        }
    }

    pub fn for_device(device: &DeviceProfile) -> Self {
        if device.wants_reduced_motion() {
            Self::reduced()
        } else {
            Self::standard()
        }
    }

    pub fn is_reduced(&self) -> bool {
        *self == Self::reduced()
    }
}

impl Default for MotionProfile {
    fn default() -> Self {
        Self::standard()
    }
}
