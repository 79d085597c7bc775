//! Game state and core simulation types
//!
//! The single mutable source of truth for one frame's worth of game facts.
//! Behavior here is limited to invariant enforcement (clamping, capping);
//! the physics step in `tick` does everything else.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Which side of the court a paddle defends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Horizontal sign of a ball leaving this side's paddle (+1 rightward)
    pub fn sign(&self) -> f32 {
        match self {
            Side::Left => 1.0,
            Side::Right => -1.0,
        }
    }

}

/// Axis-aligned rectangle, used for paddle snapshots and collision tests
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// A paddle. `x` is fixed at construction; only `y` moves.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Paddle {
    pub x: f32,
    pub y: f32,
}

impl Paddle {
    pub fn new(side: Side) -> Self {
        let x = match side {
            Side::Left => PADDLE_MARGIN,
            Side::Right => COURT_WIDTH - PADDLE_MARGIN - PADDLE_WIDTH,
        };
        Self {
            x,
            y: Self::center_start(),
        }
    }

    /// Vertically centered starting position
    pub fn center_start() -> f32 {
        COURT_HEIGHT / 2.0 - PADDLE_HEIGHT / 2.0
    }

    /// Move vertically by `dy`, clamped into the court
    pub fn shift(&mut self, dy: f32) {
        self.y = (self.y + dy).clamp(0.0, COURT_HEIGHT - PADDLE_HEIGHT);
    }

    pub fn center_y(&self) -> f32 {
        self.y + PADDLE_HEIGHT / 2.0
    }

    pub fn rect(&self) -> Rect {
        Rect {
            x: self.x,
            y: self.y,
            w: PADDLE_WIDTH,
            h: PADDLE_HEIGHT,
        }
    }
}

/// The ball. Speed is tracked separately from the velocity vector so the
/// per-hit gain can be applied and capped without recomputing magnitudes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub speed: f32,
}

impl Ball {
    /// Ball parked at center, moving horizontally in `direction`
    pub fn centered(direction: f32) -> Self {
        Self {
            pos: Vec2::new(COURT_WIDTH / 2.0, COURT_HEIGHT / 2.0),
            vel: Vec2::new(BASE_BALL_SPEED * direction, 0.0),
            speed: BASE_BALL_SPEED,
        }
    }
}

/// A discrete audio trigger emitted by the physics step.
///
/// The simulation only decides *when* to fire which cue; the audio
/// collaborator owns the pitch/envelope profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cue {
    /// Ball struck a wall or paddle
    Hit,
    /// A point was scored
    Score,
}

/// Serializable coin-flip source for the serve direction on game reset.
///
/// Keeping a seed + draw counter instead of a live RNG keeps the state
/// snapshot-friendly while staying reproducible under a fixed seed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub draws: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, draws: 0 }
    }

    /// Draw +1.0 or -1.0 with equal probability
    pub fn next_sign(&mut self) -> f32 {
        let mut rng = Pcg32::seed_from_u64(self.seed.wrapping_add(self.draws));
        self.draws += 1;
        if rng.random::<bool>() { 1.0 } else { -1.0 }
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub left_score: u32,
    pub right_score: u32,
    /// Orthogonal flag: freezes all simulation mutation while set
    pub paused: bool,
    /// Serve countdown; the ball stays parked at center while > 0
    pub serve_timer_ms: f32,
    /// Sign of the next serve's horizontal velocity (+1 rightward)
    pub serve_direction: f32,
    pub left_paddle: Paddle,
    pub right_paddle: Paddle,
    pub ball: Ball,
    pub rng_state: RngState,
}

impl GameState {
    /// Create a new game with the given seed, first serve pending
    pub fn new(seed: u64) -> Self {
        let mut rng_state = RngState::new(seed);
        let direction = rng_state.next_sign();
        let mut state = Self {
            left_score: 0,
            right_score: 0,
            paused: false,
            serve_timer_ms: 0.0,
            serve_direction: direction,
            left_paddle: Paddle::new(Side::Left),
            right_paddle: Paddle::new(Side::Right),
            ball: Ball::centered(direction),
            rng_state,
        };
        state.reset_ball(direction);
        state
    }

    /// True while the serve countdown is running
    pub fn serving(&self) -> bool {
        self.serve_timer_ms > 0.0
    }

    /// Park the ball at center and arm the serve countdown toward `direction`
    pub fn reset_ball(&mut self, direction: f32) {
        self.ball = Ball::centered(direction);
        self.serve_direction = direction;
        self.serve_timer_ms = SERVE_DELAY_MS;
    }

    /// Full manual restart: scores cleared, paddles recentered, new coin-flip
    /// serve. The only path that ever decrements a score.
    pub fn reset_game(&mut self) {
        self.left_score = 0;
        self.right_score = 0;
        self.paused = false;
        self.left_paddle.y = Paddle::center_start();
        self.right_paddle.y = Paddle::center_start();
        let direction = self.rng_state.next_sign();
        self.reset_ball(direction);
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Left => &self.left_paddle,
            Side::Right => &self.right_paddle,
        }
    }
}
