//! Session lifecycle
//!
//! Every transition is total: a call that doesn't apply to the current
//! phase leaves the state untouched.
//!
//! ```text
//! Idle ──start──> Running <──resume── Paused
//!                  │  └──────pause──────^
//!                  ├─ level cleared ─> LevelComplete ──advance──> Running
//!                  ├─ last level cleared ─> Victory
//!                  └─ lives exhausted / end ─> Defeat
//! ```

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::level::setup_level;
use super::state::{GameEvent, GamePhase, GameState, Outcome, Player};

impl GameState {
    /// Full reset: level 1, zero score, full lives, empty log, fresh player.
    /// The RNG restarts from the session seed, so the layout is reproducible.
    pub(crate) fn reset(&mut self) {
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.reset_entity_ids();
        self.score = 0;
        self.lives = self.tuning.starting_lives;
        self.results.clear();
        self.end_requested = false;
        self.flash_ticks = 0;
        self.time_ticks = 0;
        self.player = Player::new(self.field());
        setup_level(self, 1);
    }

    /// Begin a new run from Idle or after a finished one
    pub fn start(&mut self) {
        if matches!(self.phase, GamePhase::Idle) || self.phase.is_terminal() {
            self.reset();
            self.phase = GamePhase::Running;
            log::info!("Session started (seed {})", self.seed);
        }
    }

    pub fn pause(&mut self) {
        if self.phase == GamePhase::Running {
            self.phase = GamePhase::Paused;
            log::info!("Paused");
        }
    }

    pub fn resume(&mut self) {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Running;
            log::info!("Resumed");
        }
    }

    /// Full reset from any phase, straight into Running
    pub fn restart(&mut self) {
        self.reset();
        self.phase = GamePhase::Running;
        log::info!("Session restarted (seed {})", self.seed);
    }

    /// Lay out the level the completed one rolled over to and keep playing
    pub fn advance_to_next_level(&mut self) {
        if self.phase == GamePhase::LevelComplete {
            let level = self.level;
            setup_level(self, level);
            self.phase = GamePhase::Running;
        }
    }

    /// Give up now. Cleared levels stay in the log.
    pub fn end_here(&mut self) {
        if !self.phase.is_terminal() {
            finish(self, Outcome::Defeat);
        }
    }

    /// Ask for confirmation before ending; play continues meanwhile
    pub fn request_end(&mut self) {
        if !self.phase.is_terminal() {
            self.end_requested = true;
        }
    }

    pub fn cancel_end(&mut self) {
        self.end_requested = false;
    }

    /// Confirm a pending end request
    pub fn confirm_end(&mut self) {
        if self.end_requested {
            self.end_requested = false;
            self.end_here();
        }
    }

    /// Seed used by the next full reset
    pub fn reseed(&mut self, seed: u64) {
        self.seed = seed;
        self.tuning.seed = seed;
    }
}

/// Enter a terminal phase and publish the run summary
pub(crate) fn finish(state: &mut GameState, outcome: Outcome) {
    state.phase = match outcome {
        Outcome::Victory => GamePhase::Victory,
        Outcome::Defeat => GamePhase::Defeat,
    };
    state.end_requested = false;
    log::info!(
        "Session over: {:?} with score {} after {} level(s)",
        outcome,
        state.score,
        state.results.len()
    );
    state.emit(GameEvent::GameEnded {
        outcome,
        score: state.score,
        levels: state.results.clone(),
    });
}
