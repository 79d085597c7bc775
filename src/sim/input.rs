//! Input mapping
//!
//! Translates raw pressed/released control state into per-tick intents.
//! Movement controls are level-triggered (apply every tick while held);
//! pause and restart are edge-triggered (fire once per press). Binding of
//! physical keys to these logical controls is the platform layer's job.

use serde::{Deserialize, Serialize};

/// Logical control identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Control {
    LeftUp,
    LeftDown,
    RightUp,
    RightDown,
    Pause,
    Restart,
}

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub left_up: bool,
    pub left_down: bool,
    pub right_up: bool,
    pub right_down: bool,
    /// Toggle pause (one-shot)
    pub pause: bool,
    /// Restart the game (one-shot)
    pub restart: bool,
}

/// Held-control state with edge detection for the one-shot actions
#[derive(Debug, Clone, Default)]
pub struct InputMap {
    left_up: bool,
    left_down: bool,
    right_up: bool,
    right_down: bool,
    pause_held: bool,
    restart_held: bool,
    pause_pending: bool,
    restart_pending: bool,
}

impl InputMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a press or release of a logical control
    pub fn set(&mut self, control: Control, pressed: bool) {
        match control {
            Control::LeftUp => self.left_up = pressed,
            Control::LeftDown => self.left_down = pressed,
            Control::RightUp => self.right_up = pressed,
            Control::RightDown => self.right_down = pressed,
            Control::Pause => {
                // Edge: fire once per press, re-arm on release
                if pressed && !self.pause_held {
                    self.pause_pending = true;
                }
                self.pause_held = pressed;
            }
            Control::Restart => {
                if pressed && !self.restart_held {
                    self.restart_pending = true;
                }
                self.restart_held = pressed;
            }
        }
    }

    /// Resolve this frame's intents, draining the one-shot edges
    pub fn tick_input(&mut self) -> TickInput {
        let input = TickInput {
            left_up: self.left_up,
            left_down: self.left_down,
            right_up: self.right_up,
            right_down: self.right_down,
            pause: self.pause_pending,
            restart: self.restart_pending,
        };
        self.pause_pending = false;
        self.restart_pending = false;
        input
    }
}
