//! The reactor actor: the single writer of [`ReactorState`].
//!
//! # Architecture
//!
//! [`ReactorCore`] is plain synchronous code: it owns the state, the
//! physics engine and the safety controller, and exposes one method per
//! mutation. [`spawn_reactor`] moves a core into a Tokio task that pulls
//! work items off a bounded `mpsc` channel one at a time, in arrival
//! order. Ticks from the clock and commands from the HTTP layer share that
//! channel, so no two mutations ever interleave.
//!
//! After every completed mutation the actor publishes a fresh
//! [`ReactorSnapshot`] on a `watch` channel. Readers only ever see those
//! published copies, never a state that is mid-tick.
//!
//! Stimuli bypass the channel: [`ReactorHandle::inject_stress`] and friends
//! push straight into the shared [`EventAccumulator`], which the next tick
//! drains.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use resonance_types::{
    HazardObservation, PendingEvent, ReactorSnapshot, ReactorStats, ReactorStatus, StimulusKind,
};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use crate::config::ResonanceConfig;
use crate::events::{EventAccumulator, SubmittedTotals};
use crate::hazard;
use crate::physics::{self, PhysicsEngine};
use crate::safety::{SafetyController, StartOutcome};
use crate::state::{RODS_FULLY_INSERTED, ReactorState, TickError, clamp_rod_position};

/// Errors returned through a [`ReactorHandle`].
#[derive(Debug, thiserror::Error)]
pub enum ReactorError {
    /// The actor has stopped and no longer accepts work.
    #[error("reactor unavailable: {0}")]
    Unavailable(String),

    /// The tick was rejected; the previous state stays authoritative.
    #[error("tick failed: {0}")]
    Tick(#[from] TickError),
}

/// Outcome of one committed tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    /// Tick number just committed.
    pub tick: u64,
    /// Status before the tick.
    pub previous_status: ReactorStatus,
    /// Snapshot taken right after the commit.
    pub snapshot: ReactorSnapshot,
    /// Number of pending events drained by this tick.
    pub events_applied: u64,
    /// Whether the safety controller engaged a SCRAM on this tick.
    pub auto_scram: bool,
}

// ---------------------------------------------------------------------------
// Synchronous core
// ---------------------------------------------------------------------------

/// Reactor state plus everything that mutates it.
#[derive(Debug)]
pub struct ReactorCore {
    state: ReactorState,
    physics: PhysicsEngine,
    safety: SafetyController,
    events: Arc<EventAccumulator>,
    stats: ReactorStats,
}

impl ReactorCore {
    /// Build an OFFLINE core from configuration.
    ///
    /// The jitter RNG is seeded with `reactor.seed` and the SCRAM RNG with
    /// the next seed, so the two streams are independent but reproducible.
    pub fn new(config: &ResonanceConfig, events: Arc<EventAccumulator>) -> Self {
        let seed = config.reactor.seed;
        Self {
            state: ReactorState::offline(),
            physics: PhysicsEngine::new(config.physics, seed),
            safety: SafetyController::new(config.safety, seed.wrapping_add(1)),
            events,
            stats: ReactorStats::default(),
        }
    }

    /// The last committed state.
    pub const fn state(&self) -> &ReactorState {
        &self.state
    }

    /// Counters accumulated so far.
    pub const fn stats(&self) -> &ReactorStats {
        &self.stats
    }

    /// The accumulator this core drains.
    pub const fn events(&self) -> &Arc<EventAccumulator> {
        &self.events
    }

    /// Snapshot of the committed state stamped `now`.
    pub fn snapshot(&self, now: DateTime<Utc>) -> ReactorSnapshot {
        self.state.snapshot(self.physics.config().heat_per_flux, now)
    }

    /// Run one tick and commit it if every field stays finite.
    ///
    /// On error the committed state is untouched and `failed_ticks` is
    /// incremented.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Result<TickReport, TickError> {
        match self.compute_tick(now) {
            Ok(report) => Ok(report),
            Err(e) => {
                self.stats.failed_ticks = self.stats.failed_ticks.saturating_add(1);
                Err(e)
            }
        }
    }

    fn compute_tick(&mut self, now: DateTime<Utc>) -> Result<TickReport, TickError> {
        let previous_status = self.state.status;
        let mut next = self.state;
        next.tick = next.tick.checked_add(1).ok_or(TickError::TickOverflow)?;

        // Cosmic coupling lands in the residual before this tick's decay.
        let drained = self.events.drain_and_apply(&mut next);

        let mut auto_scram = false;
        match next.status {
            ReactorStatus::Offline => {
                physics::decay_residual(&mut next, self.physics.config());
            }
            ReactorStatus::Scram => {
                physics::decay_residual(&mut next, self.physics.config());
                self.safety.scram_decay(&mut next);
            }
            ReactorStatus::Startup
            | ReactorStatus::Nominal
            | ReactorStatus::Warning
            | ReactorStatus::Critical => {
                next = self.physics.step(&next, drained.transient);
                auto_scram = self.safety.evaluate(&mut next);
            }
        }

        next.ensure_finite()?;
        next.last_tick_at = Some(now);
        self.state = next;

        let stats = &mut self.stats;
        stats.ticks = stats.ticks.saturating_add(1);
        stats.events_drained = stats.events_drained.saturating_add(drained.events);
        stats.stress_drained += drained.transient;
        if !previous_status.is_running() {
            stats.stress_discarded += drained.transient;
        }
        stats.cosmic_drained += drained.cosmic;
        if auto_scram {
            stats.auto_scrams = stats.auto_scrams.saturating_add(1);
        }

        if previous_status != next.status {
            tracing::info!(
                tick = next.tick,
                from = %previous_status,
                to = %next.status,
                "Reactor status changed"
            );
        }
        tracing::debug!(
            tick = next.tick,
            status = %next.status,
            neutron_flux = next.neutron_flux,
            k_eff = next.k_eff,
            core_temperature = next.core_temperature,
            events = drained.events,
            "Tick committed"
        );

        Ok(TickReport {
            tick: next.tick,
            previous_status,
            snapshot: self.snapshot(now),
            events_applied: drained.events,
            auto_scram,
        })
    }

    /// Move an OFFLINE core into STARTUP; a no-op in any other state.
    pub fn start(&mut self) -> StartOutcome {
        let outcome = self.safety.start(&mut self.state);
        match outcome {
            StartOutcome::Started => tracing::info!(tick = self.state.tick, "Reactor starting"),
            StartOutcome::AlreadyRunning => {
                tracing::debug!(status = %self.state.status, "Start ignored; reactor not offline");
            }
        }
        outcome
    }

    /// Force the SCRAM branch, bypassing threshold evaluation.
    pub fn manual_scram(&mut self) {
        tracing::warn!(
            tick = self.state.tick,
            status = %self.state.status,
            "Manual SCRAM engaged"
        );
        self.safety.engage_scram(&mut self.state);
        self.stats.manual_scrams = self.stats.manual_scrams.saturating_add(1);
    }

    /// Move the control rods; the request is clamped to `[0, 100]`.
    ///
    /// A SCRAM in progress pins the rods back to fully inserted on its
    /// next tick.
    pub fn set_control_rods(&mut self, position: f64) -> f64 {
        let applied = clamp_rod_position(position);
        self.state.control_rod_position = applied;
        tracing::info!(requested = position, applied, "Control rods moved");
        applied
    }

    /// Drop the core straight to a cold OFFLINE state, keeping counters.
    pub fn force_offline(&mut self) {
        let state = &mut self.state;
        state.status = ReactorStatus::Offline;
        state.neutron_flux = 0.0;
        state.k_eff = 0.0;
        state.phase_noise = 0.0;
        state.control_rod_position = RODS_FULLY_INSERTED;
        tracing::info!(tick = state.tick, "Reactor forced offline");
    }
}

// ---------------------------------------------------------------------------
// Actor
// ---------------------------------------------------------------------------

#[derive(Debug)]
enum Command {
    Tick {
        reply: oneshot::Sender<Result<TickReport, TickError>>,
    },
    Start {
        reply: oneshot::Sender<StartOutcome>,
    },
    Scram {
        reply: oneshot::Sender<ReactorSnapshot>,
    },
    SetControlRods {
        position: f64,
        reply: oneshot::Sender<ReactorSnapshot>,
    },
    Stats {
        reply: oneshot::Sender<ReactorStats>,
    },
    Shutdown {
        reply: oneshot::Sender<ReactorSnapshot>,
    },
}

fn respond<T>(reply: oneshot::Sender<T>, value: T) {
    if reply.send(value).is_err() {
        tracing::trace!("Command caller went away before the reply");
    }
}

/// Publish the committed state and return the snapshot that was sent.
fn publish(core: &ReactorCore, snapshots: &watch::Sender<ReactorSnapshot>) -> ReactorSnapshot {
    let snapshot = core.snapshot(Utc::now());
    snapshots.send_replace(snapshot);
    snapshot
}

async fn run_actor(
    mut core: ReactorCore,
    mut commands: mpsc::Receiver<Command>,
    snapshots: watch::Sender<ReactorSnapshot>,
) -> ReactorStats {
    while let Some(command) = commands.recv().await {
        match command {
            Command::Tick { reply } => {
                let result = core.tick(Utc::now());
                if let Ok(report) = &result {
                    snapshots.send_replace(report.snapshot);
                }
                respond(reply, result);
            }
            Command::Start { reply } => {
                let outcome = core.start();
                if outcome == StartOutcome::Started {
                    publish(&core, &snapshots);
                }
                respond(reply, outcome);
            }
            Command::Scram { reply } => {
                core.manual_scram();
                respond(reply, publish(&core, &snapshots));
            }
            Command::SetControlRods { position, reply } => {
                core.set_control_rods(position);
                respond(reply, publish(&core, &snapshots));
            }
            Command::Stats { reply } => respond(reply, *core.stats()),
            Command::Shutdown { reply } => {
                core.force_offline();
                respond(reply, publish(&core, &snapshots));
                break;
            }
        }
    }

    if core.state().status != ReactorStatus::Offline {
        core.force_offline();
        publish(&core, &snapshots);
    }
    tracing::info!(ticks = core.stats().ticks, "Reactor actor stopped");
    *core.stats()
}

/// Spawn the reactor actor and return a handle to it.
///
/// The join handle resolves to the final counters once the actor stops,
/// either through [`ReactorHandle::shutdown`] or because every handle was
/// dropped.
pub fn spawn_reactor(config: &ResonanceConfig) -> (ReactorHandle, JoinHandle<ReactorStats>) {
    let events = Arc::new(EventAccumulator::new());
    let core = ReactorCore::new(config, Arc::clone(&events));
    let (command_tx, command_rx) = mpsc::channel(config.reactor.command_capacity.max(1));
    let (snapshot_tx, snapshot_rx) = watch::channel(core.snapshot(Utc::now()));

    let join = tokio::spawn(run_actor(core, command_rx, snapshot_tx));
    let handle = ReactorHandle {
        commands: command_tx,
        events,
        snapshots: snapshot_rx,
    };
    (handle, join)
}

// ---------------------------------------------------------------------------
// Command port
// ---------------------------------------------------------------------------

/// Cloneable command port into the reactor actor.
#[derive(Debug, Clone)]
pub struct ReactorHandle {
    commands: mpsc::Sender<Command>,
    events: Arc<EventAccumulator>,
    snapshots: watch::Receiver<ReactorSnapshot>,
}

impl ReactorHandle {
    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> Result<T, ReactorError> {
        let (tx, rx) = oneshot::channel();
        self.commands
            .send(build(tx))
            .await
            .map_err(|e| ReactorError::Unavailable(format!("command queue closed: {e}")))?;
        rx.await
            .map_err(|e| ReactorError::Unavailable(format!("no reply from actor: {e}")))
    }

    /// Ask the actor to run one tick.
    pub async fn tick(&self) -> Result<TickReport, ReactorError> {
        Ok(self.request(|reply| Command::Tick { reply }).await??)
    }

    /// Start the reactor. Idempotent: a running core reports
    /// [`StartOutcome::AlreadyRunning`].
    pub async fn start_reactor(&self) -> Result<StartOutcome, ReactorError> {
        self.request(|reply| Command::Start { reply }).await
    }

    /// Force a SCRAM immediately.
    pub async fn manual_scram(&self) -> Result<ReactorSnapshot, ReactorError> {
        self.request(|reply| Command::Scram { reply }).await
    }

    /// Move the control rods to `position` (clamped to `[0, 100]`).
    pub async fn set_control_rods(&self, position: f64) -> Result<ReactorSnapshot, ReactorError> {
        self.request(|reply| Command::SetControlRods { position, reply })
            .await
    }

    /// Read the actor's counters.
    pub async fn stats(&self) -> Result<ReactorStats, ReactorError> {
        self.request(|reply| Command::Stats { reply }).await
    }

    /// Force the core OFFLINE and stop the actor.
    pub async fn shutdown(&self) -> Result<ReactorSnapshot, ReactorError> {
        self.request(|reply| Command::Shutdown { reply }).await
    }

    /// Queue operator stress for the next tick (clamped to `[0, 1]`).
    pub fn inject_stress(&self, magnitude: f64) -> PendingEvent {
        self.events.submit(StimulusKind::ManualStress, magnitude)
    }

    /// Queue seismic stress for the next tick (clamped to `[0, 1]`).
    pub fn inject_seismic(&self, magnitude: f64) -> PendingEvent {
        self.events.submit(StimulusKind::Seismic, magnitude)
    }

    /// Queue cosmic coupling for the next tick (clamped to `>= 0`).
    pub fn inject_cosmic(&self, coupling: f64) -> PendingEvent {
        self.events.submit(StimulusKind::Cosmic, coupling)
    }

    /// Translate a hazard observation and queue the resulting stimulus.
    pub fn apply_hazard(&self, observation: &HazardObservation) -> PendingEvent {
        let stimulus = hazard::stimulus_for(observation);
        let event = self.events.submit(stimulus.kind, stimulus.magnitude);
        tracing::info!(?observation, kind = ?event.kind, magnitude = event.magnitude, "Hazard applied");
        event
    }

    /// Latest published snapshot.
    pub fn status(&self) -> ReactorSnapshot {
        *self.snapshots.borrow()
    }

    /// A receiver that wakes on every published snapshot.
    pub fn watch_snapshots(&self) -> watch::Receiver<ReactorSnapshot> {
        self.snapshots.clone()
    }

    /// Totals of every stimulus accepted so far.
    pub fn submitted(&self) -> SubmittedTotals {
        self.events.submitted()
    }

    /// Whether the actor is still accepting work.
    pub fn is_available(&self) -> bool {
        !self.commands.is_closed()
    }
}
