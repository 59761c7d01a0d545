//! Arena Survivor - a top-down arena survival simulation core
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (movement, spawning, weapons, combat, loot, progression)
//! - `tuning`: Data-driven game balance
//! - `settings`: Presentation preferences
//! - `audio`: Sound cue to tone adapter
//! - `renderer`: Render snapshots handed to the presentation layer

pub mod audio;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Simulation frames per second (display-refresh driven)
    pub const FRAMES_PER_SECOND: u64 = 60;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 12.0;
    pub const PLAYER_BASE_SPEED: f32 = 2.5;
    pub const PLAYER_BASE_HP: f32 = 100.0;
    pub const PLAYER_PICKUP_RANGE: f32 = 60.0;
    /// Gems and pickups inside this distance are collected
    pub const COLLECT_RADIUS: f32 = PLAYER_RADIUS + 10.0;

    /// Enemy knockback decay per frame
    pub const KNOCKBACK_DECAY: f32 = 0.8;
    /// Knockback impulse from a non-area projectile hit
    pub const KNOCKBACK_IMPULSE: f32 = 5.0;
    /// Push away from the player when the area weapon ticks
    pub const AREA_PUSH: f32 = 1.0;

    /// Magnetize step toward the player (fraction of remaining distance)
    pub const GEM_MAGNET_LERP: f32 = 0.2;
    /// Magnet pickup scatters gems within +/- half of this around the player
    pub const MAGNET_SCATTER: f32 = 50.0;

    /// Pickup defaults
    pub const PICKUP_RADIUS: f32 = 15.0;

    /// Damage above this is shown with critical styling
    pub const CRIT_DISPLAY_THRESHOLD: i32 = 30;

    /// Upgrade selection side effect
    pub const UPGRADE_SELECT_HEAL: f32 = 10.0;
    /// Number of offers generated per level-up
    pub const UPGRADE_OFFER_COUNT: usize = 3;
}

/// Normalize a vector, mapping the zero vector to zero
#[inline]
pub fn direction_to(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).normalize_or_zero()
}

/// Unit vector for an angle in radians
#[inline]
pub fn unit_from_angle(theta: f32) -> Vec2 {
    Vec2::new(theta.cos(), theta.sin())
}

/// Convert elapsed frames to whole survival seconds
#[inline]
pub fn frames_to_seconds(frames: u64) -> u64 {
    frames / consts::FRAMES_PER_SECOND
}
