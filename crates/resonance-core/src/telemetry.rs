//! Telemetry fan-out.
//!
//! [`TelemetryPublisher`] wraps a Tokio `broadcast` channel. Sends never
//! wait on receivers: a subscriber that falls more than the channel
//! capacity behind gets [`broadcast::error::RecvError::Lagged`], skips the
//! overwritten snapshots and resumes from the oldest one still buffered.
//! Neither the publisher nor the reactor can be stalled by a slow reader.
//!
//! [`spawn_telemetry`] republishes the latest committed snapshot at its
//! own cadence, independent of the tick period.

use std::time::Duration;

use resonance_types::ReactorSnapshot;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::shutdown::ShutdownListener;

/// Broadcasts snapshots to every live subscriber.
#[derive(Debug, Clone)]
pub struct TelemetryPublisher {
    tx: broadcast::Sender<ReactorSnapshot>,
    shutdown: ShutdownListener,
}

impl TelemetryPublisher {
    /// Create a publisher buffering up to `capacity` snapshots per
    /// subscriber. Subscriptions end when `shutdown` fires.
    pub fn new(capacity: usize, shutdown: ShutdownListener) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx, shutdown }
    }

    /// Send a snapshot to all subscribers.
    ///
    /// Returns the number of subscribers reached, or 0 if there are none.
    pub fn publish(&self, snapshot: ReactorSnapshot) -> usize {
        self.tx.send(snapshot).unwrap_or(0)
    }

    /// Open a new subscription. It only sees snapshots published after
    /// this call.
    pub fn subscribe(&self) -> TelemetrySubscription {
        TelemetrySubscription {
            rx: self.tx.subscribe(),
            shutdown: self.shutdown.clone(),
        }
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

/// One subscriber's view of the telemetry stream.
#[derive(Debug)]
pub struct TelemetrySubscription {
    rx: broadcast::Receiver<ReactorSnapshot>,
    shutdown: ShutdownListener,
}

impl TelemetrySubscription {
    /// Wait for the next snapshot.
    ///
    /// Returns `None` once shutdown fires or the publisher is gone.
    pub async fn next(&mut self) -> Option<ReactorSnapshot> {
        loop {
            tokio::select! {
                biased;
                () = self.shutdown.wait() => return None,
                result = self.rx.recv() => match result {
                    Ok(snapshot) => return Some(snapshot),
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::debug!(skipped, "Telemetry subscriber lagged, skipping ahead");
                    }
                    Err(broadcast::error::RecvError::Closed) => return None,
                },
            }
        }
    }
}

/// Republish the latest snapshot from `snapshots` every `interval` until
/// `shutdown` fires.
///
/// The join handle resolves to the number of publications made.
pub fn spawn_telemetry(
    publisher: TelemetryPublisher,
    snapshots: watch::Receiver<ReactorSnapshot>,
    interval: Duration,
    mut shutdown: ShutdownListener,
) -> JoinHandle<u64> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval.max(Duration::from_millis(1)));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut published: u64 = 0;

        loop {
            tokio::select! {
                biased;
                () = shutdown.wait() => break,
                _ = ticker.tick() => {}
            }
            let snapshot = *snapshots.borrow();
            let reached = publisher.publish(snapshot);
            published = published.saturating_add(1);
            tracing::trace!(tick = snapshot.tick, reached, "Telemetry published");
        }

        tracing::info!(published, "Telemetry publisher stopped");
        published
    })
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::shutdown::Shutdown;
    use crate::state::ReactorState;

    fn snapshot(tick: u64) -> ReactorSnapshot {
        let state = ReactorState {
            tick,
            ..ReactorState::offline()
        };
        state.snapshot(5.0, Utc::now())
    }

    #[test]
    fn publish_without_subscribers_is_fine() {
        let shutdown = Shutdown::new();
        let publisher = TelemetryPublisher::new(4, shutdown.listener());
        assert_eq!(publisher.publish(snapshot(1)), 0);
        assert_eq!(publisher.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn slow_subscriber_does_not_block_others() {
        let shutdown = Shutdown::new();
        let publisher = TelemetryPublisher::new(2, shutdown.listener());
        let mut slow = publisher.subscribe();
        let mut fast = publisher.subscribe();
        assert_eq!(publisher.subscriber_count(), 2);

        for tick in 1..=10 {
            assert_eq!(publisher.publish(snapshot(tick)), 2);
            let got = fast.next().await;
            assert_eq!(got.map(|s| s.tick), Some(tick));
        }

        // The slow reader lost the overwritten snapshots and resumes from
        // the oldest one still buffered.
        assert_eq!(slow.next().await.map(|s| s.tick), Some(9));
        assert_eq!(slow.next().await.map(|s| s.tick), Some(10));
    }

    #[tokio::test]
    async fn dropped_subscriber_is_removed_silently() {
        let shutdown = Shutdown::new();
        let publisher = TelemetryPublisher::new(4, shutdown.listener());
        let sub = publisher.subscribe();
        drop(sub);
        assert_eq!(publisher.subscriber_count(), 0);
        assert_eq!(publisher.publish(snapshot(1)), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn publishes_at_fixed_cadence_until_shutdown() {
        let shutdown = Shutdown::new();
        let publisher = TelemetryPublisher::new(16, shutdown.listener());
        let mut sub = publisher.subscribe();
        let (snap_tx, snap_rx) = watch::channel(snapshot(7));

        let task = spawn_telemetry(
            publisher,
            snap_rx,
            Duration::from_millis(500),
            shutdown.listener(),
        );

        // Published at 0, 500, 1000, 1500 and 2000 ms.
        tokio::time::sleep(Duration::from_millis(2_200)).await;
        snap_tx.send_replace(snapshot(8));
        shutdown.trigger();

        assert!(matches!(task.await, Ok(5)));
        assert_eq!(sub.next().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn republishes_latest_snapshot() {
        let shutdown = Shutdown::new();
        let publisher = TelemetryPublisher::new(16, shutdown.listener());
        let mut sub = publisher.subscribe();
        let (snap_tx, snap_rx) = watch::channel(snapshot(1));

        let _task = spawn_telemetry(
            publisher,
            snap_rx,
            Duration::from_millis(500),
            shutdown.listener(),
        );

        assert_eq!(sub.next().await.map(|s| s.tick), Some(1));
        snap_tx.send_replace(snapshot(2));
        assert_eq!(sub.next().await.map(|s| s.tick), Some(2));
        shutdown.trigger();
    }
}
