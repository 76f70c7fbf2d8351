//! System information used to pick a motion profile

use crate::consts::cli_consts::transition::{LOW_END_MAX_CORES, LOW_END_MEMORY_GB};
use std::thread::available_parallelism;
use sysinfo::System;

/// Environment variables that ask for reduced motion.
pub const REDUCED_MOTION_VARS: [&str; 2] = ["PROSPECTING_HUB_REDUCED_MOTION", "NO_MOTION"];

/// Get the number of logical cores available on the machine.
pub fn num_cores() -> usize {
    available_parallelism().map(|n| n.get()).unwrap_or(1) // Fallback to 1 if detection fails
}

/// Total memory in GB of the machine.
pub fn total_memory_gb() -> f64 {
    let mut sys = System::new();
    sys.refresh_memory();
    let total_memory = sys.total_memory(); // bytes
    total_memory as f64 / 1000.0 / 1000.0 / 1000.0 // Convert to GB
}

/// What the transition choreography needs to know about the machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceProfile {
    pub cpu_cores: usize,
    pub memory_gb: f64,
    pub prefers_reduced_motion: bool,
}

impl DeviceProfile {
    /// Inspect the machine. `config_reduced_motion` is the config file setting;
    /// the environment can only turn reduced motion on, never off.
    pub fn detect(config_reduced_motion: bool) -> Self {
        let prefers_reduced_motion = config_reduced_motion
            || REDUCED_MOTION_VARS
                .iter()
                .any(|var| std::env::var(var).is_ok_and(|value| env_flag_set(&value)));
        Self {
            cpu_cores: num_cores(),
            memory_gb: total_memory_gb(),
            prefers_reduced_motion,
        }
    }

    pub fn is_low_end(&self) -> bool {
        self.cpu_cores <= LOW_END_MAX_CORES || self.memory_gb < LOW_END_MEMORY_GB
    }

    pub fn wants_reduced_motion(&self) -> bool {
        self.prefers_reduced_motion || self.is_low_end()
    }
}

/// `1`, `true`, `yes` and `on` count as set; anything else (including empty) does not.
fn env_flag_set(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device(cpu_cores: usize, memory_gb: f64) -> DeviceProfile {
        DeviceProfile {
            cpu_cores,
            memory_gb,
            prefers_reduced_motion: false,
        }
    }

    #[test]
    fn low_end_thresholds() {
        assert!(device(2, 16.0).is_low_end());
        assert!(device(8, 3.9).is_low_end());
        assert!(!device(4, 4.0).is_low_end());
    }

    #[test]
    fn preference_alone_requests_reduced_motion() {
        let profile = DeviceProfile {
            prefers_reduced_motion: true,
            ..device(16, 32.0)
        };
        assert!(!profile.is_low_end());
        assert!(profile.wants_reduced_motion());
    }

    #[test]
    fn env_flags() {
        assert!(env_flag_set("1"));
        assert!(env_flag_set(" TRUE "));
        assert!(!env_flag_set("0"));
        assert!(!env_flag_set(""));
    }

    #[test]
    fn detection_reports_at_least_one_core() {
        let profile = DeviceProfile::detect(true);
        assert!(profile.cpu_cores >= 1);
        assert!(profile.prefers_reduced_motion);
    }
}
