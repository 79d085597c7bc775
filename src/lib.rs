//! Court Pong - a classic two-paddle court game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (input mapping, physics, game state)
//! - `renderer`: Canvas 2D presentation
//! - `audio`: Procedural sound cues via Web Audio
//! - `settings`: Audio preferences persisted in LocalStorage

pub mod audio;
#[cfg(target_arch = "wasm32")]
pub mod renderer;
pub mod settings;
pub mod sim;

pub use audio::AudioManager;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Court dimensions
    pub const COURT_WIDTH: f32 = 960.0;
    pub const COURT_HEIGHT: f32 = 540.0;

    /// Paddle dimensions
    pub const PADDLE_WIDTH: f32 = 14.0;
    pub const PADDLE_HEIGHT: f32 = 110.0;
    /// Horizontal inset of each paddle from its side of the court
    pub const PADDLE_MARGIN: f32 = 28.0;
    /// Paddle vertical speed (units/s)
    pub const PADDLE_SPEED: f32 = 520.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BASE_BALL_SPEED: f32 = 370.0;
    /// Multiplicative speed gain per paddle hit
    pub const BALL_SPEED_GAIN: f32 = 1.06;
    /// Maximum ball speed
    pub const MAX_BALL_SPEED: f32 = 760.0;

    /// Steepest deflection off a paddle edge (radians)
    pub const MAX_BOUNCE_ANGLE: f32 = std::f32::consts::FRAC_PI_3;

    /// Countdown between a point and the next serve (ms)
    pub const SERVE_DELAY_MS: f32 = 1000.0;

    /// Frame delta cap - bounds integration error across frame hitches
    pub const MAX_FRAME_DT: f32 = 0.02;
}
