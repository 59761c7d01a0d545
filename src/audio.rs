//! Audio adapter for simulation sound cues
//!
//! Procedurally generated sound effects - no external files needed!
//! Each cue maps to a short list of oscillator tones. Synthesis itself lives
//! behind `AudioBackend`; without one, playback is a silent no-op.

use serde::{Deserialize, Serialize};

use crate::settings::Settings;
use crate::sim::{GameEvent, SoundCue};

/// Oscillator waveform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

/// One oscillator voice with an exponential frequency sweep and gain decay
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tone {
    pub waveform: Waveform,
    /// Hz at the start of the tone
    pub start_freq: f32,
    /// Hz at the end of the tone (equal to start for a flat pitch)
    pub end_freq: f32,
    /// Seconds
    pub duration: f32,
    /// Peak gain before volume scaling
    pub gain: f32,
    /// Seconds to wait before starting
    pub delay: f32,
}

impl Tone {
    const fn new(waveform: Waveform, start_freq: f32, end_freq: f32, duration: f32, gain: f32) -> Self {
        Self {
            waveform,
            start_freq,
            end_freq,
            duration,
            gain,
            delay: 0.0,
        }
    }

    const fn delayed(mut self, delay: f32) -> Self {
        self.delay = delay;
        self
    }
}

/// Gain level tones decay to
pub const TONE_FLOOR_GAIN: f32 = 0.01;

const FIRE: [Tone; 1] = [Tone::new(Waveform::Triangle, 400.0, 100.0, 0.1, 0.1)];
const HIT: [Tone; 1] = [Tone::new(Waveform::Sawtooth, 100.0, 50.0, 0.05, 0.1)];
const COLLECT: [Tone; 1] = [Tone::new(Waveform::Sine, 800.0, 1200.0, 0.05, 0.05)];
const LEVEL_UP: [Tone; 3] = [
    Tone::new(Waveform::Square, 400.0, 400.0, 0.1, 0.1),
    Tone::new(Waveform::Square, 500.0, 500.0, 0.1, 0.1).delayed(0.1),
    Tone::new(Waveform::Square, 800.0, 800.0, 0.2, 0.1).delayed(0.2),
];
const SELECT: [Tone; 1] = [Tone::new(Waveform::Sine, 600.0, 800.0, 0.1, 0.1)];
const POWER_UP: [Tone; 1] = [Tone::new(Waveform::Sine, 300.0, 800.0, 0.3, 0.2)];
// Low rumble layered from two oscillators
const EXPLOSION: [Tone; 2] = [
    Tone::new(Waveform::Sawtooth, 100.0, 10.0, 0.3, 0.3),
    Tone::new(Waveform::Square, 80.0, 10.0, 0.3, 0.2),
];
const DEATH: [Tone; 1] = [Tone::new(Waveform::Sawtooth, 200.0, 50.0, 1.0, 0.3)];

/// Tone recipe for a cue
pub fn recipe(cue: SoundCue) -> &'static [Tone] {
    match cue {
        SoundCue::Fire => &FIRE,
        SoundCue::Hit => &HIT,
        SoundCue::Collect => &COLLECT,
        SoundCue::LevelUp => &LEVEL_UP,
        SoundCue::Select => &SELECT,
        SoundCue::PowerUp => &POWER_UP,
        SoundCue::Explosion => &EXPLOSION,
        SoundCue::Death => &DEATH,
    }
}

/// Something that can synthesize tones (Web Audio, cpal, a test recorder)
pub trait AudioBackend {
    fn play_tone(&mut self, tone: &Tone);
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Option<Box<dyn AudioBackend>>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(None)
    }
}

impl std::fmt::Debug for AudioManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioManager")
            .field("has_backend", &self.backend.is_some())
            .field("master_volume", &self.master_volume)
            .field("sfx_volume", &self.sfx_volume)
            .field("muted", &self.muted)
            .finish()
    }
}

impl AudioManager {
    pub fn new(backend: Option<Box<dyn AudioBackend>>) -> Self {
        if backend.is_none() {
            log::warn!("No audio backend - audio disabled");
        }
        Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
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

    /// Apply persisted audio preferences
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_master_volume(settings.master_volume);
        self.set_sfx_volume(settings.sfx_volume);
        self.set_muted(settings.muted);
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound cue
    pub fn play(&mut self, cue: SoundCue) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(backend) = self.backend.as_mut() else {
            return;
        };

        for tone in recipe(cue) {
            let scaled = Tone {
                gain: tone.gain * vol,
                ..*tone
            };
            backend.play_tone(&scaled);
        }
    }

    /// Play every sound cue in a batch of drained events
    pub fn handle_events(&mut self, events: &[GameEvent]) {
        for event in events {
            if let GameEvent::Sound(cue) = event {
                self.play(*cue);
            }
        }
    }
}
