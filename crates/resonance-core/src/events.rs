//! Thread-safe accumulator for injected stimuli.
//!
//! Producers (command port, hazard bridge) push [`PendingEvent`]s at any
//! time from any task. The reactor actor drains the queue exactly once per
//! tick. The queue has its own lock, separate from the reactor state, and
//! the critical sections only move values in or out of a `Vec`.
//!
//! Stress is accumulated, never overwritten: two shocks in the same tick
//! add up.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use resonance_types::{PendingEvent, StimulusKind};

use crate::state::ReactorState;

/// Largest cosmic coupling accepted; larger requests are clamped to it.
pub const MAX_COSMIC_COUPLING: f64 = 1_000.0;

/// Clamp a stress magnitude into `[0, 1]`; NaN reads as 0.
pub const fn clamp_stress(magnitude: f64) -> f64 {
    if magnitude.is_nan() {
        return 0.0;
    }
    magnitude.clamp(0.0, 1.0)
}

/// Clamp a cosmic coupling into `[0, MAX_COSMIC_COUPLING]`; NaN reads as 0.
pub const fn clamp_cosmic(coupling: f64) -> f64 {
    if coupling.is_nan() {
        return 0.0;
    }
    coupling.clamp(0.0, MAX_COSMIC_COUPLING)
}

/// Result of draining the accumulator for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Drained {
    /// Sum of seismic and manual stress magnitudes.
    pub transient: f64,
    /// Sum of cosmic coupling.
    pub cosmic: f64,
    /// Number of events drained.
    pub events: u64,
}

impl Drained {
    /// Whether nothing was pending.
    pub const fn is_empty(&self) -> bool {
        self.events == 0
    }
}

/// Totals of everything ever submitted, kept for conservation checks.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SubmittedTotals {
    /// Number of events accepted.
    pub events: u64,
    /// Sum of accepted stress magnitudes.
    pub stress: f64,
    /// Sum of accepted cosmic coupling.
    pub cosmic: f64,
}

#[derive(Debug, Default)]
struct Inner {
    pending: Vec<PendingEvent>,
    submitted: SubmittedTotals,
}

/// Buffers stimuli between ticks.
#[derive(Debug, Default)]
pub struct EventAccumulator {
    inner: Mutex<Inner>,
}

impl EventAccumulator {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // The guarded data is a plain Vec and counters; a panic in another
        // holder cannot leave it half-written.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Clamp `magnitude` into the domain of `kind` and queue it.
    ///
    /// Returns the event as queued.
    pub fn submit(&self, kind: StimulusKind, magnitude: f64) -> PendingEvent {
        let magnitude = if kind.is_transient() {
            clamp_stress(magnitude)
        } else {
            clamp_cosmic(magnitude)
        };
        let event = PendingEvent {
            kind,
            magnitude,
            received_at: Utc::now(),
        };

        let mut inner = self.lock();
        inner.submitted.events = inner.submitted.events.saturating_add(1);
        if kind.is_transient() {
            inner.submitted.stress += magnitude;
        } else {
            inner.submitted.cosmic += magnitude;
        }
        inner.pending.push(event);
        event
    }

    /// Take every pending event and sum it by persistence class.
    pub fn drain(&self) -> Drained {
        let pending = std::mem::take(&mut self.lock().pending);

        pending
            .iter()
            .fold(Drained::default(), |mut acc, event| {
                if event.kind.is_transient() {
                    acc.transient += event.magnitude;
                } else {
                    acc.cosmic += event.magnitude;
                }
                acc.events = acc.events.saturating_add(1);
                acc
            })
    }

    /// Drain, fold cosmic coupling into `state.geomagnetic_residual`, and
    /// return the drained sums. The transient part is left for the
    /// physics step.
    pub fn drain_and_apply(&self, state: &mut ReactorState) -> Drained {
        let drained = self.drain();
        state.geomagnetic_residual += drained.cosmic;
        drained
    }

    /// Number of events waiting for the next tick.
    pub fn pending_len(&self) -> usize {
        self.lock().pending.len()
    }

    /// Totals of everything accepted so far.
    pub fn submitted(&self) -> SubmittedTotals {
        self.lock().submitted
    }
}
