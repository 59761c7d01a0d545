//! Experience, leveling and upgrades
//!
//! Upgrade offers are plain data: a tagged `UpgradeEffect` interpreted by
//! `apply_effect`, so offers can be serialized and handed to the UI freely.

use glam::Vec2;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::collision::circles_overlap;
use super::events::{GameEvent, SoundCue};
use super::loot::{ANNOUNCE_TEXT_LIFE, apply_pickup};
use super::state::{GamePhase, GameState, Player, TextStyle, Weapon, WeaponKind};
use crate::consts::*;

/// XP needed to advance from `level`: floor(base * level^factor)
pub fn xp_for_level(base: f32, factor: f32, level: u32) -> u32 {
    (base * (level as f32).powf(factor)).floor() as u32
}

/// Offer rarity tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Rare,
    Legendary,
}

/// Offer category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpgradeCategory {
    Stat,
    Weapon,
    Heal,
}

/// Mutation applied when an offer is chosen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum UpgradeEffect {
    /// Additive damage multiplier
    Might(f32),
    /// Additive cooldown reduction
    CooldownReduction(f32),
    /// Additive area multiplier
    Area(f32),
    /// Multiplicative move speed
    SpeedMultiplier(f32),
    /// Acquire the weapon, or level it up if already owned
    Weapon(WeaponKind),
    /// Flat heal
    Heal(f32),
}

/// One entry offered on level-up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpgradeOption {
    /// Unique per offer, even for the same catalog entry
    pub id: u32,
    /// Catalog key
    pub key: String,
    pub name: String,
    pub description: String,
    pub synergy: Option<String>,
    pub category: UpgradeCategory,
    pub rarity: Rarity,
    pub effect: UpgradeEffect,
}

/// Catalog entry before an id is attached
struct CatalogEntry {
    key: &'static str,
    name: &'static str,
    description: &'static str,
    synergy: &'static str,
    category: UpgradeCategory,
    rarity: Rarity,
    effect: UpgradeEffect,
}

fn stat_entry(
    key: &'static str,
    name: &'static str,
    description: &'static str,
    synergy: &'static str,
    rarity: Rarity,
    effect: UpgradeEffect,
) -> CatalogEntry {
    CatalogEntry {
        key,
        name,
        description,
        synergy,
        category: UpgradeCategory::Stat,
        rarity,
        effect,
    }
}

/// Weapon entries change their text depending on ownership
fn weapon_entry(player: &Player, kind: WeaponKind) -> CatalogEntry {
    let owned = player.has_weapon(kind);
    let (key, name, description, synergy, rarity) = match (kind, owned) {
        (WeaponKind::Seeking, false) => (
            "wand",
            "Magic Wand",
            "Fires a magic missile at the nearest enemy",
            "New weapon",
            Rarity::Common,
        ),
        (WeaponKind::Seeking, true) => (
            "wand",
            "Empowered Wand",
            "Damage +5",
            "Starter weapon",
            Rarity::Common,
        ),
        (WeaponKind::Arcing, false) => (
            "axe",
            "Throwing Axe",
            "Hurls an axe high into the air that crashes through enemies",
            "New weapon",
            Rarity::Rare,
        ),
        (WeaponKind::Arcing, true) => (
            "axe",
            "Empowered Axe",
            "Damage +10, cooldown -10%",
            "High damage output",
            Rarity::Rare,
        ),
        (WeaponKind::Area, false) => (
            "aura",
            "Garlic Aura",
            "Deals continuous damage to nearby enemies and pushes them back",
            "New weapon",
            Rarity::Rare,
        ),
        (WeaponKind::Area, true) => (
            "aura",
            "Empowered Aura",
            "Area +20%",
            "Defensive relic",
            Rarity::Rare,
        ),
    };
    CatalogEntry {
        key,
        name,
        description,
        synergy,
        category: UpgradeCategory::Weapon,
        rarity,
        effect: UpgradeEffect::Weapon(kind),
    }
}

/// The eight catalog entries as they read for `player` right now
fn catalog(player: &Player) -> Vec<CatalogEntry> {
    vec![
        stat_entry(
            "might",
            "Spinach",
            "All damage +10%",
            "Works with every weapon",
            Rarity::Common,
            UpgradeEffect::Might(0.1),
        ),
        stat_entry(
            "cooldown",
            "Empty Tome",
            "Weapon cooldown -5%",
            "Great with the Magic Wand",
            Rarity::Rare,
            UpgradeEffect::CooldownReduction(0.05),
        ),
        stat_entry(
            "area",
            "Candelabrador",
            "Attack area +10%",
            "Great with the Garlic Aura",
            Rarity::Common,
            UpgradeEffect::Area(0.1),
        ),
        stat_entry(
            "speed",
            "Wings",
            "Move speed +10%",
            "Better survival",
            Rarity::Common,
            UpgradeEffect::SpeedMultiplier(1.1),
        ),
        weapon_entry(player, WeaponKind::Seeking),
        weapon_entry(player, WeaponKind::Arcing),
        weapon_entry(player, WeaponKind::Area),
        CatalogEntry {
            key: "feast",
            name: "Floor Feast",
            description: "Instantly restore 50 HP",
            synergy: "A lifesaver",
            category: UpgradeCategory::Heal,
            rarity: Rarity::Legendary,
            effect: UpgradeEffect::Heal(50.0),
        },
    ]
}

/// Shuffle the catalog and offer the first three, each with a fresh id
pub fn generate_offers(state: &mut GameState) -> Vec<UpgradeOption> {
    let mut pool = catalog(&state.player);
    debug_assert!(!pool.is_empty(), "upgrade catalog must never be empty");

    pool.shuffle(&mut state.rng);
    pool.into_iter()
        .take(UPGRADE_OFFER_COUNT)
        .map(|entry| UpgradeOption {
            id: state.next_entity_id(),
            key: entry.key.to_string(),
            name: entry.name.to_string(),
            description: entry.description.to_string(),
            synergy: Some(entry.synergy.to_string()),
            category: entry.category,
            rarity: entry.rarity,
            effect: entry.effect,
        })
        .collect()
}

/// Apply an upgrade effect to the player
pub fn apply_effect(player: &mut Player, effect: &UpgradeEffect) {
    match *effect {
        UpgradeEffect::Might(delta) => player.stats.might += delta,
        UpgradeEffect::CooldownReduction(delta) => player.stats.cooldown_reduction += delta,
        UpgradeEffect::Area(delta) => player.stats.area += delta,
        UpgradeEffect::SpeedMultiplier(factor) => player.stats.speed *= factor,
        UpgradeEffect::Heal(amount) => player.stats.heal(amount),
        UpgradeEffect::Weapon(kind) => upgrade_weapon(player, kind),
    }
}

/// Level an owned weapon, or add it when not yet owned
fn upgrade_weapon(player: &mut Player, kind: WeaponKind) {
    let Some(weapon) = player.weapon_mut(kind) else {
        player.weapons.push(Weapon::new(kind));
        return;
    };

    weapon.level += 1;
    match kind {
        WeaponKind::Seeking => weapon.damage += 5.0,
        WeaponKind::Arcing => {
            weapon.damage += 10.0;
            weapon.base_cooldown *= 0.9;
        }
        WeaponKind::Area => player.stats.area *= 1.2,
    }
}

/// Apply a chosen offer and resume play
///
/// Only accepted while an offer is pending (or during play); the chosen id
/// must match one of the pending offers. Returns whether it was applied.
pub fn apply_upgrade(state: &mut GameState, option: &UpgradeOption) -> bool {
    match state.phase {
        GamePhase::LevelUp | GamePhase::Playing => {}
        phase => {
            log::warn!("Ignoring upgrade {:?} during {:?}", option.name, phase);
            return false;
        }
    }

    let Some(chosen) = state.pending_offers.iter().find(|o| o.id == option.id) else {
        log::warn!("Ignoring upgrade {} (id {}): not on offer", option.name, option.id);
        return false;
    };
    let effect = chosen.effect;

    state.emit(GameEvent::Sound(SoundCue::Select));
    apply_effect(&mut state.player, &effect);
    state.player.stats.heal(UPGRADE_SELECT_HEAL);
    state.pending_offers.clear();
    state.phase = GamePhase::Playing;

    log::info!("Applied upgrade {} at level {}", option.name, state.player.level);
    true
}

/// Magnetize and collect gems, then check for one level-up
pub fn collect_gems(state: &mut GameState) {
    let player_pos = state.player.pos;
    let pickup_range = state.player.stats.pickup_range;

    let mut collected = Vec::new();
    let mut gained = 0u32;
    for gem in &mut state.gems {
        let dist = gem.pos.distance(player_pos);
        if dist < pickup_range {
            gem.pos += (player_pos - gem.pos) * GEM_MAGNET_LERP;
        }
        if dist < COLLECT_RADIUS {
            gained += gem.value;
            collected.push(gem.id);
        }
    }

    if !collected.is_empty() {
        state.player.xp += gained;
        state.gems.retain(|g| !collected.contains(&g.id));
        for _ in &collected {
            state.emit(GameEvent::Sound(SoundCue::Collect));
        }
    }

    check_level_up(state);
}

/// Grant at most one level if xp has reached the threshold
pub fn check_level_up(state: &mut GameState) {
    let player = &mut state.player;
    if player.xp < player.next_level_xp {
        return;
    }

    player.level += 1;
    player.xp -= player.next_level_xp;
    player.next_level_xp = xp_for_level(state.tuning.xp_base, state.tuning.xp_factor, player.level);
    let level = player.level;

    let options = generate_offers(state);
    log::info!(
        "Level up to {} (offers: {})",
        level,
        options
            .iter()
            .map(|o| o.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );

    state.pending_offers = options.clone();
    state.phase = GamePhase::LevelUp;
    state.emit(GameEvent::Sound(SoundCue::LevelUp));
    state.emit(GameEvent::LevelUp { level, options });
}

/// Collect power-ups touching the player and apply their effects
pub fn collect_pickups(state: &mut GameState) {
    let player_pos = state.player.pos;
    let touched: Vec<_> = state
        .pickups
        .iter()
        .filter(|p| circles_overlap(player_pos, COLLECT_RADIUS, p.pos, p.radius))
        .map(|p| (p.id, p.kind))
        .collect();

    if touched.is_empty() {
        return;
    }
    state.pickups.retain(|p| !touched.iter().any(|&(id, _)| id == p.id));

    for (_, kind) in touched {
        state.emit(GameEvent::Sound(SoundCue::PowerUp));
        state.emit(GameEvent::PickupCollected { kind });
        apply_pickup(state, kind);
        state.push_text(
            player_pos - Vec2::new(0.0, 40.0),
            kind.announce_text().to_string(),
            ANNOUNCE_TEXT_LIFE,
            TextStyle::Announce(kind),
            1.5,
        );
        log::debug!("Collected {:?} pickup", kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::GemTier;
    use crate::tuning::Tuning;

    fn empty_state() -> GameState {
        GameState::empty(21, Tuning::default()).unwrap()
    }

    #[test]
    fn test_xp_formula() {
        assert_eq!(xp_for_level(10.0, 1.2, 1), 10);
        assert_eq!(xp_for_level(10.0, 1.2, 2), 22);
        assert_eq!(xp_for_level(10.0, 1.2, 5), 68);
    }

    #[test]
    fn test_offers_unique_and_three() {
        let mut state = empty_state();
        let a = generate_offers(&mut state);
        let b = generate_offers(&mut state);
        assert_eq!(a.len(), 3);
        assert_eq!(b.len(), 3);

        let mut ids: Vec<u32> = a.iter().chain(b.iter()).map(|o| o.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 6);

        let mut keys: Vec<&str> = a.iter().map(|o| o.key.as_str()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), 3);
    }

    #[test]
    fn test_weapon_text_depends_on_ownership() {
        let mut player = Player::new(10.0);
        assert_eq!(weapon_entry(&player, WeaponKind::Seeking).name, "Empowered Wand");
        assert_eq!(weapon_entry(&player, WeaponKind::Arcing).name, "Throwing Axe");
        player.weapons.push(Weapon::new(WeaponKind::Arcing));
        assert_eq!(weapon_entry(&player, WeaponKind::Arcing).name, "Empowered Axe");
    }

    #[test]
    fn test_stat_effects() {
        let mut player = Player::new(10.0);
        apply_effect(&mut player, &UpgradeEffect::Might(0.1));
        apply_effect(&mut player, &UpgradeEffect::CooldownReduction(0.05));
        apply_effect(&mut player, &UpgradeEffect::Area(0.1));
        apply_effect(&mut player, &UpgradeEffect::SpeedMultiplier(1.1));
        assert!((player.stats.might - 1.1).abs() < 1e-6);
        assert!((player.stats.cooldown_reduction - 0.05).abs() < 1e-6);
        assert!((player.stats.area - 1.1).abs() < 1e-6);
        assert!((player.stats.speed - 2.75).abs() < 1e-6);
    }

    #[test]
    fn test_weapon_effects() {
        let mut player = Player::new(10.0);
        apply_effect(&mut player, &UpgradeEffect::Weapon(WeaponKind::Seeking));
        assert_eq!(player.weapons[0].level, 2);
        assert_eq!(player.weapons[0].damage, 20.0);

        apply_effect(&mut player, &UpgradeEffect::Weapon(WeaponKind::Arcing));
        assert_eq!(player.weapons.len(), 2);
        apply_effect(&mut player, &UpgradeEffect::Weapon(WeaponKind::Arcing));
        let axe = player.weapon(WeaponKind::Arcing).unwrap();
        assert_eq!(axe.level, 2);
        assert_eq!(axe.damage, 35.0);
        assert!((axe.base_cooldown - 72.0).abs() < 1e-4);

        apply_effect(&mut player, &UpgradeEffect::Weapon(WeaponKind::Area));
        apply_effect(&mut player, &UpgradeEffect::Weapon(WeaponKind::Area));
        assert!((player.stats.area - 1.2).abs() < 1e-6);
    }

    #[test]
    fn test_heal_effect_clamps() {
        let mut player = Player::new(10.0);
        player.stats.hp = 80.0;
        apply_effect(&mut player, &UpgradeEffect::Heal(50.0));
        assert_eq!(player.stats.hp, player.stats.max_hp);
    }

    #[test]
    fn test_gem_magnetize_then_collect() {
        let mut state = empty_state();
        state.spawn_gem(Vec2::new(50.0, 0.0), 2, GemTier::Blue);

        collect_gems(&mut state);
        // Inside pickup range but outside collect radius: pulled 20% closer
        assert_eq!(state.gems.len(), 1);
        assert!((state.gems[0].pos.x - 40.0).abs() < 1e-4);

        for _ in 0..10 {
            collect_gems(&mut state);
        }
        assert!(state.gems.is_empty());
        assert_eq!(state.player.xp, 2);
    }

    #[test]
    fn test_gem_out_of_range_stays() {
        let mut state = empty_state();
        state.spawn_gem(Vec2::new(200.0, 0.0), 2, GemTier::Blue);
        collect_gems(&mut state);
        assert_eq!(state.gems[0].pos, Vec2::new(200.0, 0.0));
    }

    #[test]
    fn test_single_level_per_check() {
        let mut state = empty_state();
        state.spawn_gem(Vec2::ZERO, 40, GemTier::Red);
        collect_gems(&mut state);

        assert_eq!(state.player.level, 2);
        assert_eq!(state.player.xp, 30);
        assert_eq!(state.phase, GamePhase::LevelUp);
        assert_eq!(state.pending_offers.len(), 3);

        let chosen = state.pending_offers[0].clone();
        assert!(apply_upgrade(&mut state, &chosen));
        // Surplus is evaluated again on the next check
        check_level_up(&mut state);
        assert_eq!(state.player.level, 3);
        assert_eq!(state.player.xp, 8);
    }

    #[test]
    fn test_apply_upgrade_guarded() {
        let mut state = empty_state();
        state.spawn_gem(Vec2::ZERO, 10, GemTier::Green);
        collect_gems(&mut state);
        let offer = state.pending_offers[1].clone();

        let mut bogus = offer.clone();
        bogus.id = 99_999;
        assert!(!apply_upgrade(&mut state, &bogus));
        assert_eq!(state.phase, GamePhase::LevelUp);

        state.phase = GamePhase::GameOver;
        assert!(!apply_upgrade(&mut state, &offer));

        state.phase = GamePhase::LevelUp;
        state.player.stats.hp = 50.0;
        assert!(apply_upgrade(&mut state, &offer));
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.pending_offers.is_empty());
        assert!(state.player.stats.hp >= 60.0);
        assert!(state.player.stats.hp <= state.player.stats.max_hp);

        // Offers are single-use
        assert!(!apply_upgrade(&mut state, &offer));
    }

    #[test]
    fn test_pickup_collection() {
        let mut state = empty_state();
        state.player.stats.hp = 10.0;
        state.spawn_pickup(Vec2::new(30.0, 0.0), crate::sim::state::PickupKind::Heal);
        state.spawn_pickup(Vec2::new(300.0, 0.0), crate::sim::state::PickupKind::Bomb);
        collect_pickups(&mut state);
        assert_eq!(state.pickups.len(), 1);
        assert_eq!(state.player.stats.hp, 40.0);
        assert_eq!(state.damage_texts.len(), 1);
    }
}
