//! Events emitted by the simulation for the presentation layer
//!
//! The simulation never waits on audio or rendering; it only queues these
//! for the host to drain between ticks.

use serde::{Deserialize, Serialize};

use super::progression::UpgradeOption;
use super::state::{EnemyKind, PickupKind};

/// Discrete sound cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    Fire,
    Hit,
    Collect,
    LevelUp,
    Select,
    Death,
    Explosion,
    PowerUp,
}

impl SoundCue {
    pub const ALL: [SoundCue; 8] = [
        SoundCue::Fire,
        SoundCue::Hit,
        SoundCue::Collect,
        SoundCue::LevelUp,
        SoundCue::Select,
        SoundCue::Death,
        SoundCue::Explosion,
        SoundCue::PowerUp,
    ];
}

/// Reduced-frequency HUD data
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HudSnapshot {
    pub hp: f32,
    pub max_hp: f32,
    pub xp: u32,
    pub next_level_xp: u32,
    pub level: u32,
    pub elapsed_seconds: u64,
}

/// Something the presentation layer may react to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Sound(SoundCue),
    Hud(HudSnapshot),
    /// The player leveled up; exactly three offers
    LevelUp {
        level: u32,
        options: Vec<UpgradeOption>,
    },
    GameOver {
        survived_seconds: u64,
    },
    EnemyKilled {
        kind: EnemyKind,
    },
    PlayerDamaged {
        damage: f32,
    },
    PickupCollected {
        kind: PickupKind,
    },
}
