//! Browser binding
//!
//! The JS engine owns rendering, audio and input listeners. Each animation
//! frame it calls `frame(dt, held)`, forwards collision callbacks, and reads
//! back coordinates and queued events to draw and play.

use wasm_bindgen::prelude::*;

use crate::clock::FrameClock;
use crate::hud;
use crate::sim::{CollisionKind, GameLoop, GamePhase, TickInput};
use crate::store::LocalStorageStore;
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    // Already initialized is fine
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Game instance handed to JS
#[wasm_bindgen]
pub struct WebGame {
    game: GameLoop<LocalStorageStore>,
    clock: FrameClock,
}

#[wasm_bindgen]
impl WebGame {
    /// Create a game; `tuning_json` may be empty for defaults
    #[wasm_bindgen(constructor)]
    pub fn new(tuning_json: &str) -> Result<WebGame, JsValue> {
        let tuning = if tuning_json.trim().is_empty() {
            Tuning::default()
        } else {
            Tuning::from_json(tuning_json).map_err(|e| JsValue::from_str(&e.to_string()))?
        };
        let seed = js_sys::Date::now() as u64;
        let game = GameLoop::new(tuning, LocalStorageStore, seed)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self {
            game,
            clock: FrameClock::default(),
        })
    }

    /// Advance by a real frame time (seconds); runs as many fixed ticks as fit
    pub fn frame(&mut self, dt: f32, held: bool) -> u32 {
        let steps = self.clock.advance(dt);
        let input = TickInput {
            activate_held: held,
            ..Default::default()
        };
        for _ in 0..steps {
            self.game.tick(self.clock.step(), &input);
        }
        steps
    }

    pub fn activate(&mut self) {
        self.game.activate();
    }

    pub fn release(&mut self) {
        self.game.release();
    }

    /// Collision callback from the engine's physics
    pub fn on_collision(&mut self, with_obstacle: bool) -> bool {
        let kind = if with_obstacle {
            CollisionKind::Obstacle
        } else {
            CollisionKind::Ground
        };
        self.game.on_collision(kind)
    }

    /// "ready", "playing" or "gameover"
    pub fn phase(&self) -> String {
        match self.game.phase() {
            GamePhase::Ready => "ready",
            GamePhase::Playing => "playing",
            GamePhase::GameOver => "gameover",
        }
        .to_string()
    }

    pub fn score(&self) -> f64 {
        self.game.score() as f64
    }

    pub fn best_label(&self) -> String {
        hud::best_score_label(self.game.best())
    }

    pub fn restart_allowed(&self) -> bool {
        self.game.restart_allowed()
    }

    /// Queued events as a JSON array
    pub fn drain_events(&mut self) -> String {
        serde_json::to_string(&self.game.drain_events()).unwrap_or_else(|_| "[]".to_string())
    }

    /// Full state as JSON (player, pipes, score, ground offset)
    pub fn snapshot(&self) -> Result<String, JsValue> {
        self.game
            .snapshot_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Score digit sprites as JSON `[[digit, x], ...]`
    pub fn score_digits(&self, center_x: f32, digit_width: f32) -> String {
        let sprites: Vec<(u8, f32)> = hud::digit_layout(self.game.score(), center_x, digit_width)
            .into_iter()
            .map(|s| (s.digit, s.x))
            .collect();
        serde_json::to_string(&sprites).unwrap_or_else(|_| "[]".to_string())
    }

    /// Tab hidden: drop accumulated time so we don't fast-forward on return
    pub fn pause_clock(&mut self) {
        self.clock.reset();
    }
}
