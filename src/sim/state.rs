//! Game state and core simulation types
//!
//! Every mutable collection the simulation owns lives in `GameState`, along
//! with the frame counter, buff timers and the seeded RNG.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::events::GameEvent;
use super::progression::UpgradeOption;
use crate::consts::*;
use crate::tuning::{Tuning, TuningError};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Waiting for an upgrade choice; ticks are halted
    LevelUp,
    /// Game is paused
    Paused,
    /// Run ended
    GameOver,
}

/// Player stats, mutated only by upgrades and pickups
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub max_hp: f32,
    pub hp: f32,
    pub speed: f32,
    pub pickup_range: f32,
    /// Damage multiplier
    pub might: f32,
    /// Added to the per-frame cooldown decrement
    pub cooldown_reduction: f32,
    /// Size multiplier for area effects
    pub area: f32,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            max_hp: PLAYER_BASE_HP,
            hp: PLAYER_BASE_HP,
            speed: PLAYER_BASE_SPEED,
            pickup_range: PLAYER_PICKUP_RANGE,
            might: 1.0,
            cooldown_reduction: 0.0,
            area: 1.0,
        }
    }
}

impl Stats {
    /// Restore hp, never exceeding max hp
    pub fn heal(&mut self, amount: f32) {
        self.hp = (self.hp + amount).clamp(0.0, self.max_hp);
    }
}

/// The fixed set of weapon kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    /// Fires at the nearest enemy in range
    Seeking,
    /// Thrown upward in the facing direction, falls under gravity
    Arcing,
    /// Persistent aura around the player
    Area,
}

impl WeaponKind {
    pub const ALL: [WeaponKind; 3] = [WeaponKind::Seeking, WeaponKind::Arcing, WeaponKind::Area];

    pub fn display_name(&self) -> &'static str {
        match self {
            WeaponKind::Seeking => "Magic Wand",
            WeaponKind::Arcing => "Throwing Axe",
            WeaponKind::Area => "Garlic Aura",
        }
    }

    /// Starting (damage, base cooldown) for a newly acquired weapon
    pub fn base_stats(&self) -> (f32, f32) {
        match self {
            WeaponKind::Seeking => (15.0, 60.0),
            WeaponKind::Arcing => (25.0, 80.0),
            WeaponKind::Area => (5.0, 1.0),
        }
    }
}

/// An owned weapon with its own cooldown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub kind: WeaponKind,
    pub level: u32,
    pub damage: f32,
    pub cooldown_timer: f32,
    pub base_cooldown: f32,
    pub name: String,
}

impl Weapon {
    pub fn new(kind: WeaponKind) -> Self {
        let (damage, base_cooldown) = kind.base_stats();
        Self {
            kind,
            level: 1,
            damage,
            cooldown_timer: 0.0,
            base_cooldown,
            name: kind.display_name().to_string(),
        }
    }
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub facing_right: bool,
    pub level: u32,
    pub xp: u32,
    pub next_level_xp: u32,
    pub stats: Stats,
    /// Owned weapons in acquisition order
    pub weapons: Vec<Weapon>,
}

impl Player {
    pub fn new(xp_base: f32) -> Self {
        Self {
            pos: Vec2::ZERO,
            facing_right: true,
            level: 1,
            xp: 0,
            next_level_xp: xp_base.floor() as u32,
            stats: Stats::default(),
            weapons: vec![Weapon::new(WeaponKind::Seeking)],
        }
    }

    pub fn weapon(&self, kind: WeaponKind) -> Option<&Weapon> {
        self.weapons.iter().find(|w| w.kind == kind)
    }

    pub fn weapon_mut(&mut self, kind: WeaponKind) -> Option<&mut Weapon> {
        self.weapons.iter_mut().find(|w| w.kind == kind)
    }

    pub fn has_weapon(&self, kind: WeaponKind) -> bool {
        self.weapon(kind).is_some()
    }

    /// +1 when facing right, -1 when facing left
    pub fn facing_sign(&self) -> f32 {
        if self.facing_right { 1.0 } else { -1.0 }
    }
}

/// Enemy types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Basic,
    Fast,
    Tank,
}

/// Per-kind enemy parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyParams {
    pub base_hp: f32,
    pub speed: f32,
    pub radius: f32,
    pub contact_damage: f32,
}

static ENEMY_TABLE: [EnemyParams; 3] = [
    EnemyParams { base_hp: 15.0, speed: 1.5, radius: 10.0, contact_damage: 8.0 }, // Basic
    EnemyParams { base_hp: 8.0, speed: 2.8, radius: 8.0, contact_damage: 8.0 },   // Fast
    EnemyParams { base_hp: 80.0, speed: 0.9, radius: 18.0, contact_damage: 15.0 }, // Tank
];

impl EnemyKind {
    pub fn params(&self) -> &'static EnemyParams {
        &ENEMY_TABLE[*self as usize]
    }
}

/// A hostile entity chasing the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub hp: f32,
    pub max_hp: f32,
    pub speed: f32,
    pub damage: f32,
    pub radius: f32,
    /// Residual displacement per frame, decays geometrically
    pub knockback: Vec2,
}

/// A live projectile (or the persistent area effect)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub damage: f32,
    /// Frames remaining
    pub duration: u32,
    /// Hits remaining
    pub pierce: u32,
    pub weapon: WeaponKind,
    /// Presentation-only spin
    pub rotation: Option<f32>,
}

impl Projectile {
    pub fn is_area(&self) -> bool {
        self.weapon == WeaponKind::Area
    }

    /// Whether this projectile may still damage something
    pub fn can_hit(&self) -> bool {
        self.is_area() || self.pierce > 0
    }
}

/// Gem color tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GemTier {
    Blue,
    Green,
    Red,
}

/// Experience currency dropped on kills
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gem {
    pub id: u32,
    pub pos: Vec2,
    pub value: u32,
    pub tier: GemTier,
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupKind {
    Heal,
    Magnet,
    Bomb,
    SpeedBoost,
}

impl PickupKind {
    /// Announcement shown when collected
    pub fn announce_text(&self) -> &'static str {
        match self {
            PickupKind::Heal => "Roast Chicken!",
            PickupKind::Magnet => "Magnet!",
            PickupKind::Bomb => "Screen Bomb!",
            PickupKind::SpeedBoost => "Haste!",
        }
    }
}

/// A power-up lying on the ground
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub id: u32,
    pub kind: PickupKind,
    pub pos: Vec2,
    pub radius: f32,
}

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Tree,
    Rock,
    /// The only destructible kind
    Crate,
}

/// Axis-aligned world obstacle; `pos` is the top-left corner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub kind: ObstacleKind,
    pub destructible: bool,
    pub hp: f32,
    pub max_hp: f32,
}

impl Obstacle {
    pub fn center(&self) -> Vec2 {
        self.pos + self.size() * 0.5
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Text style for floating numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextStyle {
    Damage,
    Critical,
    PlayerHurt,
    ObstacleHit,
    /// Bomb kill marker
    Kill,
    Announce(PickupKind),
}

/// Floating damage/announcement text (cosmetic only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DamageText {
    pub id: u32,
    pub pos: Vec2,
    pub text: String,
    /// Frames remaining
    pub life: u32,
    pub style: TextStyle,
    pub scale: f32,
}

/// Movement keys (WASD and arrows)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    W,
    A,
    S,
    D,
    ArrowUp,
    ArrowLeft,
    ArrowDown,
    ArrowRight,
}

impl Key {
    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Set of currently held movement keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldKeys(u8);

impl HeldKeys {
    pub fn press(&mut self, key: Key) {
        self.0 |= key.bit();
    }

    pub fn release(&mut self, key: Key) {
        self.0 &= !key.bit();
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.0 & key.bit() != 0
    }

    pub fn up(&self) -> bool {
        self.is_held(Key::W) || self.is_held(Key::ArrowUp)
    }

    pub fn down(&self) -> bool {
        self.is_held(Key::S) || self.is_held(Key::ArrowDown)
    }

    pub fn left(&self) -> bool {
        self.is_held(Key::A) || self.is_held(Key::ArrowLeft)
    }

    pub fn right(&self) -> bool {
        self.is_held(Key::D) || self.is_held(Key::ArrowRight)
    }
}

impl FromIterator<Key> for HeldKeys {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        let mut keys = HeldKeys::default();
        for key in iter {
            keys.press(key);
        }
        keys
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    /// Frames simulated in the Playing phase
    pub frame: u64,
    pub phase: GamePhase,
    /// Frames of speed boost remaining
    pub speed_boost_timer: u32,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub gems: Vec<Gem>,
    pub pickups: Vec<Pickup>,
    pub obstacles: Vec<Obstacle>,
    pub damage_texts: Vec<DamageText>,
    /// Offers awaiting a choice (non-empty only in LevelUp)
    pub pending_offers: Vec<UpgradeOption>,
    /// Events emitted since the last drain
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new run with default tuning and a generated world
    pub fn new(seed: u64) -> Self {
        Self::generated(seed, Tuning::default())
    }

    /// Create a new run with explicit tuning and a generated world
    ///
    /// Tuning built in code is checked the same way as a loaded file.
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::generated(seed, tuning))
    }

    /// A run with no obstacles (useful for scripted scenarios)
    pub fn empty(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::blank(seed, tuning))
    }

    fn generated(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self::blank(seed, tuning);
        super::world::generate_obstacles(&mut state);
        log::info!(
            "Started run with seed {} ({} obstacles)",
            seed,
            state.obstacles.len()
        );
        state
    }

    fn blank(seed: u64, tuning: Tuning) -> Self {
        let player = Player::new(tuning.xp_base);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            frame: 0,
            phase: GamePhase::Playing,
            speed_boost_timer: 0,
            player,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            gems: Vec::new(),
            pickups: Vec::new(),
            obstacles: Vec::new(),
            damage_texts: Vec::new(),
            pending_offers: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    ///
    /// Wraps back to 1 after `u32::MAX`; IDs only need to be unique among live entities.
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.checked_add(1).unwrap_or(1);
        id
    }

    /// Whole seconds survived so far
    pub fn elapsed_seconds(&self) -> u64 {
        crate::frames_to_seconds(self.frame)
    }

    /// Take all events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn push_text(&mut self, pos: Vec2, text: String, life: u32, style: TextStyle, scale: f32) {
        let id = self.next_entity_id();
        self.damage_texts.push(DamageText {
            id,
            pos,
            text,
            life,
            style,
            scale,
        });
    }

    pub fn spawn_gem(&mut self, pos: Vec2, value: u32, tier: GemTier) {
        let id = self.next_entity_id();
        self.gems.push(Gem { id, pos, value, tier });
    }

    pub fn spawn_pickup(&mut self, pos: Vec2, kind: PickupKind) {
        let id = self.next_entity_id();
        self.pickups.push(Pickup {
            id,
            kind,
            pos,
            radius: PICKUP_RADIUS,
        });
    }

    /// Player speed this frame, including the speed-boost buff
    pub fn current_speed(&self) -> f32 {
        if self.speed_boost_timer > 0 {
            self.player.stats.speed * self.tuning.speed_boost_multiplier
        } else {
            self.player.stats.speed
        }
    }
}
