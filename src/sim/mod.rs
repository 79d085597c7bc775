//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only (serve coin flip)
//! - No rendering or platform dependencies
//! - Audio cues flow outward as events, never as side effects

pub mod collision;
pub mod input;
pub mod state;
pub mod tick;

pub use collision::{deflection_velocity, intersects_paddle};
pub use input::{Control, InputMap, TickInput};
pub use state::{Ball, Cue, GameState, Paddle, Rect, RngState, Side};
pub use tick::{clamp_frame_dt, tick};
