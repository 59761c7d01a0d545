//! Data-driven game balance
//!
//! Every knob here has a default matching the shipped game. A JSON file can
//! override any subset of fields; missing fields keep their defaults.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Errors from loading or validating a tuning file
#[derive(Debug)]
pub enum TuningError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Io(e) => write!(f, "failed to read tuning file: {e}"),
            TuningError::Parse(e) => write!(f, "failed to parse tuning file: {e}"),
            TuningError::Invalid(msg) => write!(f, "invalid tuning: {msg}"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Io(e) => Some(e),
            TuningError::Parse(e) => Some(e),
            TuningError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for TuningError {
    fn from(e: std::io::Error) -> Self {
        TuningError::Io(e)
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

/// Balance parameters for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Spawning ===
    /// Frames between spawns at the start of a run
    pub spawn_interval_initial: u64,
    /// Floor for the spawn interval
    pub spawn_interval_min: u64,
    /// The interval shrinks by one frame every this many frames
    pub spawn_ramp_frames: u64,
    /// Enemy hp multiplier grows by 1.0 every this many frames
    pub difficulty_ramp_frames: u64,
    pub fast_unlock_frame: u64,
    pub fast_chance: f64,
    pub tank_unlock_frame: u64,
    pub tank_chance: f64,
    /// Spawn ring sits this far past half the larger viewport dimension
    pub spawn_margin: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,

    // === Progression ===
    pub xp_base: f32,
    pub xp_factor: f32,

    // === Shared damage windows ===
    /// Player contact damage lands only on frames divisible by this
    pub contact_damage_interval: u64,
    /// Area weapon damages enemies only on frames divisible by this
    pub area_tick_interval: u64,
    /// Hit cue is emitted only on frames divisible by this
    pub hit_sound_interval: u64,

    // === Weapons ===
    /// Seeking weapon only targets enemies closer than this
    pub seek_range: f32,

    // === Buffs and pickups ===
    pub speed_boost_multiplier: f32,
    pub speed_boost_frames: u32,
    pub heal_pickup_amount: f32,

    // === Drops ===
    /// Chance an enemy death drops a power-up instead of a gem
    pub rare_drop_chance: f64,
    /// Chance a destroyed crate drops a power-up instead of a gem
    pub crate_pickup_chance: f64,
    /// Chance a low-value gem drops as the upgraded tier
    pub gem_upgrade_chance: f64,

    // === World ===
    pub obstacle_count: usize,
    /// Obstacles are placed within +/- this on both axes
    pub world_half_extent: f32,
    /// No obstacle overlaps a circle of this radius around the start point
    pub start_clear_radius: f32,

    // === Presentation cadence ===
    /// HUD snapshot emitted every this many frames
    pub hud_interval: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            spawn_interval_initial: 60,
            spawn_interval_min: 5,
            spawn_ramp_frames: 500,
            difficulty_ramp_frames: 3600,
            fast_unlock_frame: 600,
            fast_chance: 0.4,
            tank_unlock_frame: 1200,
            tank_chance: 0.15,
            spawn_margin: 100.0,
            viewport_width: 1280.0,
            viewport_height: 720.0,

            xp_base: 10.0,
            xp_factor: 1.2,

            contact_damage_interval: 30,
            area_tick_interval: 15,
            hit_sound_interval: 5,

            seek_range: 600.0,

            speed_boost_multiplier: 1.6,
            speed_boost_frames: 900,
            heal_pickup_amount: 30.0,

            rare_drop_chance: 0.005,
            crate_pickup_chance: 0.4,
            gem_upgrade_chance: 0.1,

            obstacle_count: 100,
            world_half_extent: 2500.0,
            start_clear_radius: 60.0,

            hud_interval: 5,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a JSON tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json_str(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Reject values that would stall or break the simulation
    pub fn validate(&self) -> Result<(), TuningError> {
        let invalid = |msg: &str| Err(TuningError::Invalid(msg.to_string()));

        if self.spawn_interval_min == 0 {
            return invalid("spawn_interval_min must be at least 1");
        }
        if self.spawn_interval_min > self.spawn_interval_initial {
            return invalid("spawn_interval_min exceeds spawn_interval_initial");
        }
        if self.spawn_ramp_frames == 0 || self.difficulty_ramp_frames == 0 {
            return invalid("ramp frame counts must be positive");
        }
        for (name, interval) in [
            ("contact_damage_interval", self.contact_damage_interval),
            ("area_tick_interval", self.area_tick_interval),
            ("hit_sound_interval", self.hit_sound_interval),
            ("hud_interval", self.hud_interval),
        ] {
            if interval == 0 {
                return Err(TuningError::Invalid(format!("{name} must be at least 1")));
            }
        }
        for (name, p) in [
            ("fast_chance", self.fast_chance),
            ("tank_chance", self.tank_chance),
            ("rare_drop_chance", self.rare_drop_chance),
            ("crate_pickup_chance", self.crate_pickup_chance),
            ("gem_upgrade_chance", self.gem_upgrade_chance),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(TuningError::Invalid(format!("{name} must be within [0, 1]")));
            }
        }
        if self.xp_base <= 0.0 || self.xp_factor <= 0.0 {
            return invalid("xp curve parameters must be positive");
        }
        if self.world_half_extent <= 0.0 {
            return invalid("world_half_extent must be positive");
        }
        Ok(())
    }
}
