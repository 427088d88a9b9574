//! Fixed-interval sweep scheduler for Pokerforge.
//!
//! Idle rooms are reclaimed by lightweight background watchers: each one
//! wakes on a fixed interval, asks "is this still alive?", and exits the
//! first time the answer is no. There is no cancellation signal; the
//! check itself is the stop condition.
//!
//! # Overruns
//!
//! A sweep that wakes late (a stalled runtime, a suspended laptop) never
//! fires a burst of back-to-back passes. Missed passes are skipped and
//! the next one is scheduled from now.
//!
//! # Integration
//!
//! ```ignore
//! let handle = spawn_watcher("room qhzbtmwcar", SweepConfig::default(), move || {
//!     store.check_room_activity(&code)
//! });
//! ```

use std::fmt::Display;
use std::time::Duration;

use rand::Rng;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant as TokioInstant};
use tracing::{debug, trace, warn};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for a sweep scheduler.
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// Time between passes.
    pub interval: Duration,
    /// Random jitter (0..max) added to the *first* pass so watchers created
    /// in the same instant do not all wake together.
    pub initial_jitter: Duration,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(10),
            initial_jitter: Duration::from_millis(500),
        }
    }
}

impl SweepConfig {
    /// Shortest interval accepted; anything lower spins the runtime.
    pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

    /// Create a config with the given interval and default jitter.
    pub fn every(interval: Duration) -> Self {
        Self {
            interval,
            ..Default::default()
        }
    }

    /// Clamp out-of-range values so the config is safe to use.
    ///
    /// Called automatically by [`SweepScheduler::new`].
    pub fn validated(mut self) -> Self {
        if self.interval < Self::MIN_INTERVAL {
            warn!(
                interval_ms = self.interval.as_secs_f64() * 1000.0,
                "sweep interval below minimum, clamping"
            );
            self.interval = Self::MIN_INTERVAL;
        }
        self
    }
}

// ---------------------------------------------------------------------------
// Sweep info
// ---------------------------------------------------------------------------

/// Information about one pass, returned by [`SweepScheduler::wait_for_sweep`].
#[derive(Debug, Clone)]
pub struct SweepInfo {
    /// Monotonically increasing pass number (starts at 1).
    pub pass: u64,
    /// How far past its deadline this pass woke.
    pub late_by: Duration,
    /// Passes skipped because the scheduler woke more than a full
    /// interval late (0 in normal operation).
    pub passes_skipped: u64,
}

// ---------------------------------------------------------------------------
// Scheduler
// ---------------------------------------------------------------------------

/// Wakes a watcher on a fixed interval.
pub struct SweepScheduler {
    config: SweepConfig,
    pass_count: u64,
    next_pass: TokioInstant,
}

impl SweepScheduler {
    /// Create a new scheduler. The first pass is one interval (plus
    /// jitter) from now.
    pub fn new(config: SweepConfig) -> Self {
        let config = config.validated();

        let jitter = if config.initial_jitter.is_zero() {
            Duration::ZERO
        } else {
            let max_us = config.initial_jitter.as_micros() as u64;
            Duration::from_micros(rand::rng().random_range(0..max_us.max(1)))
        };
        let next_pass = TokioInstant::now() + config.interval + jitter;

        debug!(
            interval_ms = config.interval.as_secs_f64() * 1000.0,
            jitter_us = jitter.as_micros() as u64,
            "sweep scheduler created"
        );

        Self {
            config,
            pass_count: 0,
            next_pass,
        }
    }

    /// Wait until the next pass is due.
    pub async fn wait_for_sweep(&mut self) -> SweepInfo {
        time::sleep_until(self.next_pass).await;

        let now = TokioInstant::now();
        let interval = self.config.interval;
        let late_by = now.saturating_duration_since(self.next_pass);
        self.pass_count += 1;

        let passes_skipped = (late_by.as_nanos() / interval.as_nanos()) as u64;
        if passes_skipped > 0 {
            warn!(
                pass = self.pass_count,
                skipped = passes_skipped,
                late_ms = late_by.as_secs_f64() * 1000.0,
                "sweep overrun, skipping ahead"
            );
            self.next_pass = now + interval;
        } else {
            self.next_pass += interval;
        }

        trace!(pass = self.pass_count, "sweep fired");

        SweepInfo {
            pass: self.pass_count,
            late_by,
            passes_skipped,
        }
    }

    /// Passes fired so far.
    pub fn pass_count(&self) -> u64 {
        self.pass_count
    }

    /// The configured interval (after validation).
    pub fn interval(&self) -> Duration {
        self.config.interval
    }
}

// ---------------------------------------------------------------------------
// Watcher
// ---------------------------------------------------------------------------

/// Spawns a background task that calls `check` every interval until it
/// returns `false`.
///
/// The task resolves to the number of passes it ran, the last one being
/// the pass that observed `false`.
pub fn spawn_watcher<F>(
    label: impl Display + Send + 'static,
    config: SweepConfig,
    mut check: F,
) -> JoinHandle<u64>
where
    F: FnMut() -> bool + Send + 'static,
{
    tokio::spawn(async move {
        let mut scheduler = SweepScheduler::new(config);
        debug!(%label, "watcher started");
        loop {
            let info = scheduler.wait_for_sweep().await;
            if !check() {
                debug!(%label, passes = info.pass, "watcher stopped");
                return info.pass;
            }
        }
    })
}
