#![cfg(feature = "std")]

//! Thread-safe match host with a delayed opponent reply.
//!
//! The controller owns the [`MatchState`] behind a mutex, so player input and
//! the scheduled opponent move never interleave. After the player's shot
//! hands the turn over, the opponent's move is queued on a [`Scheduler`]
//! instead of being computed inline. Every queued move carries the
//! generation it was queued in; `reset` bumps the generation and cancels the
//! handle, so a move that slipped past cancellation still finds itself stale
//! and does nothing.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use rand::{rngs::SmallRng, SeedableRng};
use tokio::sync::watch;

use crate::{
    common::{MatchError, Side},
    config::MatchConfig,
    game::{AttackReport, MatchState},
    scheduler::{Scheduler, TaskHandle},
};

struct Inner<H> {
    state: MatchState,
    rng: SmallRng,
    pending: Option<H>,
    generation: u64,
}

struct Shared<S: Scheduler> {
    scheduler: S,
    thinking_delay: Duration,
    inner: Mutex<Inner<S::Handle>>,
    updates: watch::Sender<MatchState>,
}

/// Cloneable handle to one running match.
pub struct MatchController<S: Scheduler> {
    shared: Arc<Shared<S>>,
}

impl<S: Scheduler> Clone for MatchController<S> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<S: Scheduler> Shared<S> {
    fn lock(&self) -> MutexGuard<'_, Inner<S::Handle>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, state: &MatchState) {
        self.updates.send_replace(state.clone());
    }

    /// Body of a scheduled opponent move.
    fn run_scheduled(&self, generation: u64) {
        let mut inner = self.lock();
        if inner.generation != generation {
            log::debug!("dropping stale opponent move from generation {}", generation);
            return;
        }
        inner.pending = None;
        let Inner { state, rng, .. } = &mut *inner;
        if state.opponent_move(rng).is_some() {
            self.publish(state);
        }
    }
}

impl<S: Scheduler> MatchController<S> {
    /// New match using `config`; fleets come from `config.seed` when set.
    pub fn new(scheduler: S, config: MatchConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_rng(&mut rand::rng()),
        };
        Self::with_rng(scheduler, config.thinking_delay, rng)
    }

    /// New match drawing fleets and opponent choices from `rng`.
    pub fn with_rng(scheduler: S, thinking_delay: Duration, mut rng: SmallRng) -> Self {
        let state = MatchState::new(&mut rng);
        let (updates, _) = watch::channel(state.clone());
        log::info!("new match, opponent thinks for {:?}", thinking_delay);
        Self {
            shared: Arc::new(Shared {
                scheduler,
                thinking_delay,
                inner: Mutex::new(Inner {
                    state,
                    rng,
                    pending: None,
                    generation: 0,
                }),
                updates,
            }),
        }
    }

    /// `actor` fires at `(row, col)`.
    ///
    /// When the shot hands the turn to the opponent, its reply is scheduled
    /// after the thinking delay; until it lands, further player attacks fail
    /// with [`MatchError::InvalidTurn`].
    pub fn attack(&self, actor: Side, row: usize, col: usize) -> Result<AttackReport, MatchError> {
        let mut inner = self.shared.lock();
        let report = inner.state.attack(actor, row, col)?;

        if actor == Side::Opponent {
            // A host-driven opponent shot supersedes any queued one.
            self.cancel_pending(&mut inner);
        }
        if inner.state.turn() == Side::Opponent
            && inner.state.winner().is_none()
            && inner.pending.is_none()
        {
            self.schedule_opponent(&mut inner);
        }
        self.shared.publish(&inner.state);
        Ok(report)
    }

    /// Run the opponent's turn now, superseding any scheduled move.
    ///
    /// Returns `None` when the match is over or it is not the opponent's
    /// turn.
    pub fn opponent_move(&self) -> Option<AttackReport> {
        let mut inner = self.shared.lock();
        if inner.state.winner().is_some() || inner.state.turn() != Side::Opponent {
            return None;
        }
        self.cancel_pending(&mut inner);
        let Inner { state, rng, .. } = &mut *inner;
        let report = state.opponent_move(rng);
        self.shared.publish(state);
        report
    }

    /// Cancel any pending opponent move and start over with fresh fleets.
    pub fn reset(&self) {
        let mut inner = self.shared.lock();
        self.cancel_pending(&mut inner);
        let Inner { state, rng, .. } = &mut *inner;
        state.reset(rng);
        self.shared.publish(state);
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> MatchState {
        self.shared.lock().state.clone()
    }

    /// Receiver that sees every published state, for renderers.
    pub fn subscribe(&self) -> watch::Receiver<MatchState> {
        self.shared.updates.subscribe()
    }

    /// Whether an opponent move is queued and has not run yet.
    pub fn has_pending_move(&self) -> bool {
        self.shared.lock().pending.is_some()
    }

    pub fn thinking_delay(&self) -> Duration {
        self.shared.thinking_delay
    }

    fn cancel_pending(&self, inner: &mut Inner<S::Handle>) {
        inner.generation += 1;
        if let Some(handle) = inner.pending.take() {
            log::debug!("cancelling pending opponent move");
            handle.cancel();
        }
    }

    fn schedule_opponent(&self, inner: &mut Inner<S::Handle>) {
        inner.generation += 1;
        let generation = inner.generation;
        let shared: Weak<Shared<S>> = Arc::downgrade(&self.shared);
        let handle = self.shared.scheduler.after(
            self.shared.thinking_delay,
            Box::new(move || {
                if let Some(shared) = shared.upgrade() {
                    shared.run_scheduled(generation);
                }
            }),
        );
        inner.pending = Some(handle);
    }
}
