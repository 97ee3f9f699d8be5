//! Audio cues using the Web Audio API
//!
//! Both cues are synthesized on the fly, so there is nothing to load and
//! nothing that can stall the frame loop. Every failure is swallowed.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::settings::Settings;
use crate::sim::AudioCue;

/// Base gain per cue before the volume settings apply
const HIT_GAIN: f32 = 0.28;
const GAME_OVER_GAIN: f32 = 0.45;

/// Plays cues requested by the simulation
pub struct AudioManager {
    ctx: Option<AudioContext>,
    volume: f32,
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            volume: settings.effective_volume(),
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Fire and forget
    pub fn play(&self, cue: AudioCue) {
        if self.volume <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };

        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match cue {
            AudioCue::Hit => self.play_hit(ctx, self.volume * HIT_GAIN),
            AudioCue::GameOver => self.play_game_over(ctx, self.volume * GAME_OVER_GAIN),
        }
    }

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

    /// Short square-wave zap sweeping down, with a noisy sawtooth crackle
    fn play_hit(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();

        if let Some((osc, gain)) = self.create_osc(ctx, 880.0, OscillatorType::Square) {
            gain.gain().set_value_at_time(vol, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.001, t + 0.12)
                .ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(110.0, t + 0.12)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.14).ok();
        }

        if let Some((osc, gain)) = self.create_osc(ctx, 140.0, OscillatorType::Sawtooth) {
            gain.gain().set_value_at_time(vol * 0.5, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.001, t + 0.08)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.1).ok();
        }
    }

    /// Slow descending arpeggio
    fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [392.0, 330.0, 262.0, 196.0, 131.0].iter().enumerate() {
            let delay = i as f64 * 0.22;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.001, t + 0.35)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.4).ok();
            }
        }
    }
}
