//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one call to `tick` is one frame)
//! - Seeded RNG only
//! - Removals deferred to one filtering pass per frame
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod combat;
pub mod events;
pub mod loot;
pub mod movement;
pub mod progression;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod weapons;
pub mod world;

pub use collision::{circle_rect_overlap, circles_overlap};
pub use events::{GameEvent, HudSnapshot, SoundCue};
pub use progression::{
    Rarity, UpgradeCategory, UpgradeEffect, UpgradeOption, apply_effect, apply_upgrade,
    xp_for_level,
};
pub use state::{
    DamageText, Enemy, EnemyKind, GamePhase, GameState, Gem, GemTier, HeldKeys, Key, Obstacle,
    ObstacleKind, Pickup, PickupKind, Player, Projectile, Stats, TextStyle, Weapon, WeaponKind,
};
pub use tick::{TickInput, hud_snapshot, tick};
