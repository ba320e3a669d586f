//! Internal constants for tiling tuning.
//!
//! # Organization
//!
//! Constants are grouped by functionality:
//! - `timing` - Settle delays, cooldowns, and periods
//! - `window_size` - Window size thresholds for filtering
//! - `layout` - Tolerances used when comparing geometry
//! - `probe` - Candidate factors for size-restriction probing
//!
//! User-facing knobs live in the configuration; the values here are the
//! defaults those knobs fall back to plus the delays that only make sense
//! relative to each other.

/// Timing constants for deferred continuations and periodic passes.
pub mod timing {
    /// Delay before re-reading a window's bounds after a resize (ms).
    ///
    /// Window servers apply frames asynchronously; reading immediately
    /// usually returns the old frame.
    pub const SETTLE_DELAY_MS: u64 = 100;

    /// Delay between two size-probe attempts (ms).
    pub const PROBE_STEP_DELAY_MS: u64 = 100;

    /// Delay before bringing a freshly created split group forward (ms).
    pub const FRONT_BRING_DELAY_MS: u64 = 150;

    /// Delay before retrying a window whose bounds were not readable yet (ms).
    pub const CREATION_RETRY_DELAY_MS: u64 = 500;

    /// Number of retries for a window whose bounds were not readable yet.
    pub const CREATION_RETRY_ATTEMPTS: u8 = 3;

    /// Delay before scanning a freshly launched application for windows (ms).
    pub const APP_LAUNCH_SCAN_DELAY_MS: u64 = 500;

    /// Default period of the split rebalancer (ms).
    pub const REBALANCE_INTERVAL_MS: u64 = 2000;

    /// Default cooldown after an engine-initiated adjustment (ms).
    ///
    /// Slightly longer than the rebalance period so a window adjusted in one
    /// pass is never classified as user-resized in the next one.
    pub const REBALANCE_COOLDOWN_MS: u64 = 2200;

    /// Default retention of a recorded size restriction (seconds).
    pub const RESTRICTION_RETENTION_SECS: u64 = 60 * 60;

    /// Interval between two restriction pruning sweeps (seconds).
    pub const RESTRICTION_PRUNE_INTERVAL_SECS: u64 = 60;
}

/// Window size thresholds for filtering.
pub mod window_size {
    /// Minimum width for a window to be tiled automatically.
    pub const MIN_TILEABLE_WIDTH: f64 = 200.0;

    /// Minimum height for a window to be tiled automatically.
    pub const MIN_TILEABLE_HEIGHT: f64 = 100.0;

    /// Smallest height overlap prevention may shrink a window to.
    pub const MIN_OVERLAP_HEIGHT: f64 = 200.0;
}

/// Geometry comparison tolerances.
pub mod layout {
    /// Per-axis tolerance when verifying a window reached its target size.
    pub const VERIFY_TOLERANCE_PX: f64 = 10.0;

    /// Minimum size change the rebalancer treats as a real resize.
    pub const REBALANCE_TOLERANCE_PX: f64 = 2.0;

    /// Default padding between windows and screen edges.
    pub const DEFAULT_PADDING_PX: f64 = 8.0;

    /// Default height of the reserved taskbar band.
    pub const DEFAULT_TASKBAR_HEIGHT_PX: f64 = 48.0;
}

/// Size-restriction probing parameters.
pub mod probe {
    /// Fractions of the target size tried first, largest to smallest.
    pub const TARGET_FACTORS: [f64; 3] = [0.9, 0.8, 0.7];

    /// Fractions of the current size tried afterwards, to look for headroom.
    pub const CURRENT_FACTORS: [f64; 2] = [1.2, 1.1];
}

// ============================================================================
// Tests
// ============================================================================
