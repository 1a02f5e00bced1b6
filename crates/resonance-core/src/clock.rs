//! Fixed-period tick driver.
//!
//! [`run_clock`] submits one tick work item to the reactor actor per
//! period and waits for it to finish before scheduling the next, so two
//! ticks never run at once. A failed tick is logged and the loop carries
//! on at the next scheduled period; there is no fast retry.

use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior};

use crate::reactor::{ReactorError, ReactorHandle};
use crate::shutdown::ShutdownListener;

/// Why the clock stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockStopReason {
    /// The shutdown signal fired.
    Shutdown,
    /// The reactor actor stopped accepting work.
    ReactorUnavailable,
}

/// Result of a clock run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockSummary {
    /// Ticks that committed.
    pub ticks: u64,
    /// Ticks that failed and were skipped.
    pub failed_ticks: u64,
    /// Why the loop ended.
    pub stop_reason: ClockStopReason,
}

/// Drive the reactor at a fixed `period` until shutdown.
///
/// The first tick fires one full period after the call.
pub async fn run_clock(
    reactor: ReactorHandle,
    period: Duration,
    mut shutdown: ShutdownListener,
) -> ClockSummary {
    let period = period.max(Duration::from_millis(1));
    let first = Instant::now().checked_add(period).unwrap_or_else(Instant::now);
    let mut interval = tokio::time::interval_at(first, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut ticks: u64 = 0;
    let mut failed_ticks: u64 = 0;

    tracing::info!(period_ms = period.as_millis(), "Clock started");

    let stop_reason = loop {
        tokio::select! {
            biased;
            () = shutdown.wait() => break ClockStopReason::Shutdown,
            _ = interval.tick() => {}
        }

        match reactor.tick().await {
            Ok(_) => ticks = ticks.saturating_add(1),
            Err(ReactorError::Tick(e)) => {
                failed_ticks = failed_ticks.saturating_add(1);
                tracing::warn!(error = %e, failed_ticks, "Tick failed; keeping last committed state");
            }
            Err(e @ ReactorError::Unavailable(_)) => {
                tracing::error!(error = %e, "Reactor unavailable; clock stopping");
                break ClockStopReason::ReactorUnavailable;
            }
        }
    };

    tracing::info!(ticks, failed_ticks, reason = ?stop_reason, "Clock stopped");
    ClockSummary {
        ticks,
        failed_ticks,
        stop_reason,
    }
}
