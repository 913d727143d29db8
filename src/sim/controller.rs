//! Game loop controller
//!
//! The host engine drives the controller with plain method calls:
//! `tick` once per frame, `activate`/`release` for input, `on_collision`
//! from its physics callbacks. The controller never calls back into the
//! host; it queues [`GameEvent`]s instead.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::pipes::PipePool;
use super::state::{CollisionKind, GameEvent, GamePhase, GameState};
use crate::consts::BEST_SCORE_KEY;
use crate::error::TuningError;
use crate::store::ScoreStore;
use crate::tuning::Tuning;

/// Owns the game state, the RNG and the best-score store
pub struct GameLoop<S: ScoreStore> {
    pub(super) tuning: Tuning,
    pub(super) state: GameState,
    pub(super) store: S,
    pub(super) rng: Pcg32,
    pub(super) events: Vec<GameEvent>,
}

impl<S: ScoreStore> GameLoop<S> {
    /// Set up a session in the Ready phase.
    ///
    /// The stored best score is read once here so the HUD can show it
    /// before the first game over. Fails if `tuning` does not validate.
    pub fn new(tuning: Tuning, store: S, seed: u64) -> Result<Self, TuningError> {
        tuning.validate()?;
        let mut rng = Pcg32::seed_from_u64(seed);
        let pipes = PipePool::new(&tuning, &mut rng);
        let mut state = GameState::new(&tuning, pipes);

        state.score.best = match store.get(BEST_SCORE_KEY) {
            Ok(best) => best.unwrap_or(0),
            Err(e) => {
                log::warn!("Could not read best score: {e}");
                0
            }
        };

        let mut game = Self {
            tuning,
            state,
            store,
            rng,
            events: Vec::new(),
        };
        game.enter_ready();
        log::info!(
            "Game loop ready (seed {seed}, {} pipe pairs, best {})",
            game.state.pipes.len(),
            game.state.score.best
        );
        Ok(game)
    }

    /// The single input signal (key or pointer down)
    pub fn activate(&mut self) {
        match self.state.phase {
            GamePhase::Ready => self.enter_playing(),
            GamePhase::Playing => {
                if !self.state.flap_latch {
                    self.state.flap_latch = true;
                    self.flap();
                }
            }
            GamePhase::GameOver => {
                if self.state.restart_allowed {
                    self.restart();
                }
            }
        }
    }

    /// Input released; the next `activate` may flap again
    pub fn release(&mut self) {
        self.state.flap_latch = false;
    }

    /// Collision reported by the host (or the built-in checks).
    ///
    /// No effect once the run is over. Returns true if this call ended the run.
    pub fn on_collision(&mut self, kind: CollisionKind) -> bool {
        if self.state.phase == GamePhase::GameOver {
            return false;
        }
        self.enter_game_over(kind);
        true
    }

    /// Start a fresh session: clear score, reset bird and pipes, back to Ready
    pub fn restart(&mut self) {
        self.state.score.clear();
        self.state.player.reset(&self.tuning);
        self.state.pipes.reset(&self.tuning, &mut self.rng);
        self.state.crash = None;
        self.enter_ready();
        log::info!("Session restarted");
    }

    /// Take all events queued since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u64 {
        self.state.score.current
    }

    pub fn best(&self) -> u64 {
        self.state.score.best
    }

    pub fn restart_allowed(&self) -> bool {
        self.state.restart_allowed
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// State as JSON, for hosts that mirror it across a language boundary
    pub fn snapshot_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.state)
    }

    fn flap(&mut self) {
        let player = &mut self.state.player;
        player.vel_y = self.tuning.flap_velocity;
        player.angle = -self.tuning.elevation_angle;
        player.flapped = true;
        self.events.push(GameEvent::Flap);
    }

    fn enter_ready(&mut self) {
        self.state.phase = GamePhase::Ready;
        self.state.phase_time = 0.0;
        self.state.restart_allowed = false;
        self.state.flap_latch = false;
        self.state.player.gravity_enabled = false;
        self.events.push(GameEvent::Ready);
    }

    fn enter_playing(&mut self) {
        self.state.phase = GamePhase::Playing;
        self.state.phase_time = 0.0;
        self.state.player.gravity_enabled = true;
        self.events.push(GameEvent::Start);
        log::info!("Playing");
    }

    fn enter_game_over(&mut self, kind: CollisionKind) {
        self.state.phase = GamePhase::GameOver;
        self.state.phase_time = 0.0;
        self.state.crash = Some(kind);
        self.state.player.gravity_enabled = true;
        self.state.restart_allowed = self.tuning.restart_cooldown <= 0.0;

        self.events.push(GameEvent::Hit);
        if kind == CollisionKind::Obstacle {
            self.events.push(GameEvent::Die);
        }

        let score = self.state.score.current;
        let (best, new_best) = self.persist_best();
        self.events.push(GameEvent::GameOver {
            score,
            best,
            new_best,
        });
        if self.state.restart_allowed {
            self.events.push(GameEvent::RestartAllowed);
        }
        log::info!("Game over ({kind:?}): score {score}, best {best}");
    }

    /// Read the stored best once, take the max once, write once
    fn persist_best(&mut self) -> (u64, bool) {
        let score = self.state.score.current;
        let stored = match self.store.get(BEST_SCORE_KEY) {
            Ok(stored) => stored.unwrap_or(0),
            Err(e) => {
                log::warn!("Could not read best score, using in-memory value: {e}");
                self.state.score.best
            }
        };

        let best = stored.max(score);
        if let Err(e) = self.store.set(BEST_SCORE_KEY, best) {
            log::warn!("Could not persist best score {best}: {e}");
        }

        let new_best = score > stored;
        if new_best {
            log::info!("New best score: {best}");
        }
        self.state.score.best = best;
        (best, new_best)
    }
}
