//! Game state and core simulation types
//!
//! Everything the tick and the lifecycle calls mutate lives on [`GameState`].
//! The presentation layer reads entities and [`Snapshot`] and drains
//! [`GameEvent`]s; it never writes.

use std::fmt;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::tuning::Tuning;
use crate::{clamp_to_field, rand_range};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Before the first start
    Idle,
    /// Active gameplay
    Running,
    /// Paused by the player
    Paused,
    /// Level cleared, waiting for the player to continue
    LevelComplete,
    /// Final level cleared
    Victory,
    /// Out of lives, or ended by the player
    Defeat,
}

impl GamePhase {
    /// Victory and Defeat end the session
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::Victory | GamePhase::Defeat)
    }
}

/// Directional input for one tick, each component in {-1, 0, 1}.
/// Screen coordinates: +x is right, +y is down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Axes {
    pub x: i8,
    pub y: i8,
}

impl Axes {
    pub fn new(x: i8, y: i8) -> Self {
        Self {
            x: x.signum(),
            y: y.signum(),
        }
    }

    /// Unit-length direction; diagonals are no faster than straight moves
    pub fn direction(self) -> Vec2 {
        let v = Vec2::new(self.x as f32, self.y as f32);
        let mag = v.length();
        if mag > 0.0 { v / mag } else { v }
    }
}

/// The player's submarine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    /// Base movement speed per tick, before the level multiplier
    pub speed: f32,
    /// Velocity from input alone (currents are applied as a separate push)
    pub vel: Vec2,
    /// Ticks of invulnerability left
    pub shield: u32,
    /// Facing angle (radians), smoothed toward the direction of travel
    pub angle: f32,
}

impl Player {
    pub fn new(field: Vec2) -> Self {
        Self {
            pos: Self::start_position(field),
            radius: PLAYER_RADIUS,
            speed: PLAYER_SPEED,
            vel: Vec2::ZERO,
            shield: 0,
            angle: 0.0,
        }
    }

    /// Bottom-center start point used at every level setup
    pub fn start_position(field: Vec2) -> Vec2 {
        Vec2::new(field.x / 2.0, field.y - PLAYER_START_INSET)
    }

    pub fn is_shielded(&self) -> bool {
        self.shield > 0
    }

    /// Move from input, get pushed by currents, stay on the field
    pub fn update(&mut self, axes: Axes, speed_multiplier: f32, currents: &[Current], field: Vec2) {
        self.vel = axes.direction() * self.speed * speed_multiplier;
        self.pos += self.vel;

        for current in currents {
            self.pos += current.push_at(self.pos);
        }

        self.pos = clamp_to_field(self.pos, self.radius, field);

        if self.vel.length() > FACING_DEADZONE {
            let target = self.vel.y.atan2(self.vel.x);
            self.angle = self.angle * (1.0 - FACING_BLEND) + target * FACING_BLEND;
        }

        self.shield = self.shield.saturating_sub(1);
    }
}

/// An oxygen tank
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    /// Cosmetic glow phase, never read by the simulation
    pub pulse: f32,
}

/// A drifting mine that bounces off the field edges
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mine {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    pub vel: Vec2,
}

impl Mine {
    /// Mine at `pos` heading along `heading` (radians) at `speed`
    pub fn new(id: u32, pos: Vec2, heading: f32, speed: f32) -> Self {
        Self {
            id,
            pos,
            radius: MINE_RADIUS,
            vel: Vec2::new(heading.cos(), heading.sin()) * speed,
        }
    }

    pub fn update(&mut self, speed_multiplier: f32, field: Vec2) {
        self.pos += self.vel * speed_multiplier;

        // Flip only while heading out, so a mine already past the edge
        // can't get stuck flipping every tick
        if (self.pos.x < self.radius && self.vel.x < 0.0)
            || (self.pos.x > field.x - self.radius && self.vel.x > 0.0)
        {
            self.vel.x = -self.vel.x;
        }
        if (self.pos.y < self.radius && self.vel.y < 0.0)
            || (self.pos.y > field.y - self.radius && self.vel.y > 0.0)
        {
            self.vel.y = -self.vel.y;
        }
    }

    /// Bounce straight back (used when a shielded player is hit)
    pub fn reflect(&mut self) {
        self.vel = -self.vel;
    }
}

/// An ocean current pushing the player inside its influence radius
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Current {
    pub id: u32,
    pub pos: Vec2,
    /// Influence radius; the push fades linearly to zero at this distance
    pub range: f32,
    pub vel: Vec2,
    pub phase: f32,
}

impl Current {
    /// Slow organic drift in push strength
    pub fn update(&mut self) {
        self.phase += CURRENT_PHASE_STEP;
        self.vel.x *= 0.99 + self.phase.sin() * 0.005;
        self.vel.y *= 0.99 + self.phase.cos() * 0.005;
    }

    /// Displacement applied to something at `pos` this tick
    pub fn push_at(&self, pos: Vec2) -> Vec2 {
        if self.range <= 0.0 {
            return Vec2::ZERO;
        }
        let influence = (1.0 - self.pos.distance(pos) / self.range).max(0.0);
        self.vel * influence
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Long invulnerability window
    Shield,
    /// Slows every mine on the field
    Slow,
    /// Flat score bonus
    Score,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [PowerUpKind::Shield, PowerUpKind::Slow, PowerUpKind::Score];

    /// Uniformly pick a kind
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let idx = (rand_range(rng, 0.0, Self::ALL.len() as f32) as usize).min(Self::ALL.len() - 1);
        Self::ALL[idx]
    }
}

/// A temporary pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub radius: f32,
    /// Ticks until the pickup expires
    pub life: u32,
}

impl PowerUp {
    pub fn new(id: u32, kind: PowerUpKind, pos: Vec2) -> Self {
        Self {
            id,
            kind,
            pos,
            radius: POWER_UP_RADIUS,
            life: POWER_UP_LIFE_TICKS,
        }
    }

    pub fn update(&mut self) {
        self.life = self.life.saturating_sub(1);
    }

    pub fn is_expired(&self) -> bool {
        self.life == 0
    }
}

/// Summary of one cleared level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelResult {
    pub level: u32,
    pub speed_multiplier: f64,
    /// Cumulative score when the level was cleared
    pub score: u64,
    /// Lives left when the level was cleared
    pub lives: u8,
    pub tokens: u32,
}

impl fmt::Display for LevelResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Level {} complete. Oxygen {}/{}. Speed {:.1}x. Score {}. Lives {}.",
            self.level, self.tokens, self.tokens, self.speed_multiplier, self.score, self.lives
        )
    }
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Victory,
    Defeat,
}

/// Notifications for the presentation layer, queued in emission order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A level was generated (banner data)
    LevelStarted {
        level: u32,
        speed_multiplier: f64,
        mines: u32,
        currents: u32,
    },
    TokenCollected {
        id: u32,
        collected: u32,
        target: u32,
        score: u64,
    },
    PowerUpSpawned {
        id: u32,
        kind: PowerUpKind,
        pos: Vec2,
    },
    PowerUpCollected {
        id: u32,
        kind: PowerUpKind,
    },
    /// A mine bounced off the shielded player
    MineDeflected { id: u32 },
    /// Unshielded mine hit; also the lives-changed notification
    DamageTaken { lives: u8 },
    LevelComplete { result: LevelResult },
    GameEnded {
        outcome: Outcome,
        score: u64,
        levels: Vec<LevelResult>,
    },
}

/// Read-only HUD view, cheap to take after every call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub level: u32,
    pub max_levels: u32,
    pub tokens_collected: u32,
    pub tokens_target: u32,
    pub lives: u8,
    pub score: u64,
    pub speed_multiplier: f64,
    pub mines: u32,
    pub currents: u32,
    pub shield: u32,
    pub end_requested: bool,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Balance and field configuration
    pub tuning: Tuning,
    /// Seed every full reset restarts the RNG from
    pub seed: u64,
    pub rng: Pcg32,
    /// Current level (1-based)
    pub level: u32,
    pub tokens_collected: u32,
    pub score: u64,
    pub lives: u8,
    pub phase: GamePhase,
    /// Movement multiplier for the current level
    pub speed_multiplier: f64,
    pub player: Player,
    pub tokens: Vec<Token>,
    pub mines: Vec<Mine>,
    pub currents: Vec<Current>,
    pub power_ups: Vec<PowerUp>,
    /// One entry per cleared level, in order
    pub results: Vec<LevelResult>,
    /// Mine count generated for the current level
    pub mine_count: u32,
    /// Current count generated for the current level
    pub current_count: u32,
    /// Ticks left on the damage flash cue
    pub flash_ticks: u32,
    /// Ticks left on the level banner cue
    pub banner_ticks: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// An end-of-game confirmation is pending
    pub end_requested: bool,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a session in the Idle phase with level 1 already laid out
    pub fn new(tuning: Tuning) -> Self {
        let tuning = tuning.sanitized();
        let field = tuning.field();
        let mut state = Self {
            seed: tuning.seed,
            rng: Pcg32::seed_from_u64(tuning.seed),
            level: 1,
            tokens_collected: 0,
            score: 0,
            lives: tuning.starting_lives,
            phase: GamePhase::Idle,
            speed_multiplier: 1.0,
            player: Player::new(field),
            tokens: Vec::new(),
            mines: Vec::new(),
            currents: Vec::new(),
            power_ups: Vec::new(),
            results: Vec::new(),
            mine_count: 0,
            current_count: 0,
            flash_ticks: 0,
            banner_ticks: 0,
            time_ticks: 0,
            end_requested: false,
            events: Vec::new(),
            next_id: 1,
            tuning,
        };
        state.reset();
        // Layout is for drawing behind the start screen; start() announces it
        state.events.clear();
        state
    }

    /// Default tuning with a specific seed
    pub fn with_seed(seed: u64) -> Self {
        Self::new(Tuning {
            seed,
            ..Tuning::default()
        })
    }

    pub fn field(&self) -> Vec2 {
        self.tuning.field()
    }

    pub fn tokens_target(&self) -> u32 {
        self.tuning.tokens_per_level
    }

    pub fn max_levels(&self) -> u32 {
        self.tuning.max_levels
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Restart entity numbering (full reset only)
    pub(crate) fn reset_entity_ids(&mut self) {
        self.next_id = 1;
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events raised since the last drain, oldest first
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            level: self.level,
            max_levels: self.max_levels(),
            tokens_collected: self.tokens_collected,
            tokens_target: self.tokens_target(),
            lives: self.lives,
            score: self.score,
            speed_multiplier: self.speed_multiplier,
            mines: self.mine_count,
            currents: self.current_count,
            shield: self.player.shield,
            end_requested: self.end_requested,
        }
    }
}
