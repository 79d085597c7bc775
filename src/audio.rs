//! Audio system using the Web Audio API
//!
//! Procedurally generated sound cues - no external files needed. Cues are
//! fire-and-forget: a missing or suspended AudioContext drops them silently.

use crate::sim::Cue;

#[cfg(target_arch = "wasm32")]
use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

/// Audio manager for the game
#[cfg(target_arch = "wasm32")]
pub struct AudioManager {
    ctx: Option<AudioContext>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

#[cfg(target_arch = "wasm32")]
impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_arch = "wasm32")]
impl AudioManager {
    pub fn new() -> Self {
        // May fail outside a secure context; the game plays on without sound
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a cue fired by the simulation
    pub fn play(&self, cue: Cue) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Browsers suspend the context until a user gesture
        if ctx.state() == web_sys::AudioContextState::Suspended {
            return;
        }

        match cue {
            Cue::Hit => self.play_hit(ctx, vol),
            Cue::Score => self.play_score(ctx, vol),
        }
    }

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Shared blip envelope: quick swell, fast decay
    fn apply_envelope(&self, gain: &GainNode, t: f64, vol: f32) {
        gain.gain().set_value_at_time(0.0001, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(vol * 0.03, t + 0.01)
            .ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.0001, t + 0.11)
            .ok();
    }

    /// Hit - fixed-frequency square blip
    fn play_hit(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 460.0, OscillatorType::Square) else {
            return;
        };
        let t = ctx.current_time();

        self.apply_envelope(&gain, t, vol);

        osc.start().ok();
        osc.stop_with_when(t + 0.12).ok();
    }

    /// Score - descending sine blip
    fn play_score(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 220.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        osc.frequency().set_value_at_time(220.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(160.0, t + 0.08)
            .ok();
        self.apply_envelope(&gain, t, vol);

        osc.start().ok();
        osc.stop_with_when(t + 0.12).ok();
    }
}

/// Native stub: the simulation core runs headless with no audio backend
#[cfg(not(target_arch = "wasm32"))]
#[derive(Default)]
pub struct AudioManager;

#[cfg(not(target_arch = "wasm32"))]
impl AudioManager {
    pub fn new() -> Self {
        Self
    }

    pub fn resume(&self) {}

    pub fn set_master_volume(&mut self, _vol: f32) {}

    pub fn set_sfx_volume(&mut self, _vol: f32) {}

    pub fn set_muted(&mut self, _muted: bool) {}

    pub fn play(&self, _cue: Cue) {}
}
