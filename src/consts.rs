pub mod cli_consts {
    //! Dashboard Configuration Constants
    //!
    //! This module contains all configuration constants for the dashboard,
    //! organized by functional area for clarity and maintainability.

    // =============================================================================
    // QUEUE CONFIGURATION
    // =============================================================================

    /// The maximum number of events to keep in the activity logs.
    pub const MAX_ACTIVITY_LOGS: usize = 100;

    /// Maximum number of buffered events between background tasks and the UI
    pub const EVENT_QUEUE_SIZE: usize = 100;

    // =============================================================================
    // NETWORK CONFIGURATION
    // =============================================================================

    /// Outbound request configuration
    pub mod network {
        use std::time::Duration;

        /// Connect and request timeout for upstream calls (milliseconds)
        pub const REQUEST_TIMEOUT_MS: u64 = 10_000;

        pub const fn request_timeout() -> Duration {
            Duration::from_millis(REQUEST_TIMEOUT_MS)
        }

        /// Instantly API v2 base URL
        pub const UPSTREAM_BASE_URL: &str = "https://api.instantly.ai/api/v2";

        /// Default local proxy address the dashboard talks to
        pub const LOCAL_PROXY_URL: &str = "http://localhost:3000/api/instantly";
    }

    // =============================================================================
    // POLLING CONFIGURATION
    // =============================================================================

    /// Data refresh configuration
    pub mod polling {
        /// Interval between scheduled refreshes of a mounted view (milliseconds)
        pub const POLL_INTERVAL_MS: u64 = 30_000;
    }

    // =============================================================================
    // TRANSITION CONFIGURATION
    // =============================================================================

    /// View transition timings for the standard motion profile
    pub mod transition {
        /// Exit animation of the selected home tile (milliseconds)
        pub const EXIT_DURATION_MS: u64 = 500;

        /// Delay from action start until the overlay is published
        pub const OVERLAY_DELAY_MS: u64 = 100;

        /// Delay from action start until the route changes
        pub const NAVIGATE_DELAY_MS: u64 = 350;

        /// Destination entry delay before it reports completion
        pub const ENTRY_DELAY_MS: u64 = 300;

        /// Grace period between completion and clearing the overlay
        pub const GRACE_DELAY_MS: u64 = 800;

        /// Below this many logical cores the device is treated as low-end
        pub const LOW_END_MAX_CORES: usize = 2;

        /// Below this much memory (GB) the device is treated as low-end
        pub const LOW_END_MEMORY_GB: f64 = 4.0;
    }

    // =============================================================================
    // PROXY CONFIGURATION
    // =============================================================================

    pub mod proxy {
        /// Default port for `serve`
        pub const DEFAULT_PORT: &str = "3000";

        pub const ALLOW_ORIGIN: &str = "*";
        pub const ALLOW_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
        pub const ALLOW_HEADERS: &str = "Content-Type, Authorization";
    }
}
