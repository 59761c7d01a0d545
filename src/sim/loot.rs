//! Drop tables and power-up effects

use glam::Vec2;
use rand::Rng;

use super::events::{GameEvent, SoundCue};
use super::state::{EnemyKind, GameState, GemTier, PickupKind, TextStyle};
use crate::consts::MAGNET_SCATTER;

/// Gem value for basic and fast enemies
pub const LOW_GEM_VALUE: u32 = 2;
/// Gem value for tanks
pub const TANK_GEM_VALUE: u32 = 20;
/// Gem value from an opened crate
pub const CRATE_GEM_VALUE: u32 = 10;
/// Gem value left behind by the bomb
pub const BOMB_GEM_VALUE: u32 = 1;
/// Cosmetic number shown on bomb kills
pub const BOMB_DISPLAY_DAMAGE: &str = "9999";
pub const BOMB_TEXT_LIFE: u32 = 30;
pub const ANNOUNCE_TEXT_LIFE: u32 = 80;

/// Weighted power-up roll: heal 40%, magnet 20%, speed 20%, bomb 20%
pub fn roll_pickup_kind<R: Rng>(rng: &mut R) -> PickupKind {
    let r: f32 = rng.random();
    if r < 0.4 {
        PickupKind::Heal
    } else if r < 0.6 {
        PickupKind::Magnet
    } else if r < 0.8 {
        PickupKind::SpeedBoost
    } else {
        PickupKind::Bomb
    }
}

/// Drop a power-up of a random kind at `pos`
pub fn drop_pickup(state: &mut GameState, pos: Vec2) {
    let kind = roll_pickup_kind(&mut state.rng);
    log::debug!("Dropped {:?} pickup at ({:.0}, {:.0})", kind, pos.x, pos.y);
    state.spawn_pickup(pos, kind);
}

/// Loot for a slain enemy: rarely a power-up, otherwise a gem by kind
pub fn drop_enemy_loot(state: &mut GameState, kind: EnemyKind, pos: Vec2) {
    if state.rng.random_bool(state.tuning.rare_drop_chance) {
        drop_pickup(state, pos);
        return;
    }

    let (value, tier) = match kind {
        EnemyKind::Tank => (TANK_GEM_VALUE, GemTier::Red),
        EnemyKind::Basic | EnemyKind::Fast => {
            let tier = if state.rng.random_bool(state.tuning.gem_upgrade_chance) {
                GemTier::Green
            } else {
                GemTier::Blue
            };
            (LOW_GEM_VALUE, tier)
        }
    };
    state.spawn_gem(pos, value, tier);
}

/// Loot for an opened crate
pub fn drop_crate_loot(state: &mut GameState, center: Vec2) {
    if state.rng.random_bool(state.tuning.crate_pickup_chance) {
        drop_pickup(state, center);
    } else {
        state.spawn_gem(center, CRATE_GEM_VALUE, GemTier::Green);
    }
}

/// Apply a collected power-up
pub fn apply_pickup(state: &mut GameState, kind: PickupKind) {
    match kind {
        PickupKind::Heal => {
            let amount = state.tuning.heal_pickup_amount;
            state.player.stats.heal(amount);
        }
        PickupKind::SpeedBoost => {
            state.speed_boost_timer = state.tuning.speed_boost_frames;
        }
        PickupKind::Bomb => detonate_bomb(state),
        PickupKind::Magnet => magnetize_all(state),
    }
}

/// Remove every enemy, leaving a low-value gem where each stood
pub fn detonate_bomb(state: &mut GameState) {
    state.emit(GameEvent::Sound(SoundCue::Explosion));

    let victims = std::mem::take(&mut state.enemies);
    log::debug!("Bomb cleared {} enemies", victims.len());
    for enemy in &victims {
        state.push_text(
            enemy.pos,
            BOMB_DISPLAY_DAMAGE.to_string(),
            BOMB_TEXT_LIFE,
            TextStyle::Kill,
            1.0,
        );
        state.spawn_gem(enemy.pos, BOMB_GEM_VALUE, GemTier::Blue);
        state.emit(GameEvent::EnemyKilled { kind: enemy.kind });
    }
}

/// Pull every gem to a random spot right next to the player
pub fn magnetize_all(state: &mut GameState) {
    let center = state.player.pos;
    let half = MAGNET_SCATTER / 2.0;
    for gem in &mut state.gems {
        gem.pos = center
            + Vec2::new(
                state.rng.random_range(-half..half),
                state.rng.random_range(-half..half),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::spawn::make_enemy;
    use crate::tuning::Tuning;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn empty_state() -> GameState {
        GameState::empty(11, Tuning::default()).unwrap()
    }

    #[test]
    fn test_pickup_distribution() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut counts = [0u32; 4];
        for _ in 0..10_000 {
            let idx = match roll_pickup_kind(&mut rng) {
                PickupKind::Heal => 0,
                PickupKind::Magnet => 1,
                PickupKind::SpeedBoost => 2,
                PickupKind::Bomb => 3,
            };
            counts[idx] += 1;
        }
        assert!((3700..4300).contains(&counts[0]));
        for &c in &counts[1..] {
            assert!((1700..2300).contains(&c));
        }
    }

    #[test]
    fn test_bomb_clears_and_drops_gems() {
        let mut state = empty_state();
        let t = Tuning::default();
        let spots = [
            Vec2::new(10.0, 0.0),
            Vec2::new(-40.0, 25.0),
            Vec2::new(300.0, -90.0),
        ];
        for (i, &pos) in spots.iter().enumerate() {
            state
                .enemies
                .push(make_enemy(&t, i as u32 + 100, EnemyKind::Basic, pos, 0));
        }

        apply_pickup(&mut state, PickupKind::Bomb);

        assert!(state.enemies.is_empty());
        assert_eq!(state.gems.len(), 3);
        for (gem, &pos) in state.gems.iter().zip(spots.iter()) {
            assert_eq!(gem.pos, pos);
            assert_eq!(gem.value, BOMB_GEM_VALUE);
            assert_eq!(gem.tier, GemTier::Blue);
        }
        assert_eq!(state.damage_texts.len(), 3);
    }

    #[test]
    fn test_heal_pickup_clamps() {
        let mut state = empty_state();
        state.player.stats.hp = 90.0;
        apply_pickup(&mut state, PickupKind::Heal);
        assert_eq!(state.player.stats.hp, state.player.stats.max_hp);

        state.player.stats.hp = 40.0;
        apply_pickup(&mut state, PickupKind::Heal);
        assert_eq!(state.player.stats.hp, 70.0);
    }

    #[test]
    fn test_speed_boost_sets_timer() {
        let mut state = empty_state();
        apply_pickup(&mut state, PickupKind::SpeedBoost);
        assert_eq!(state.speed_boost_timer, 900);
    }

    #[test]
    fn test_magnet_relocates_gems() {
        let mut state = empty_state();
        state.player.pos = Vec2::new(500.0, 500.0);
        state.spawn_gem(Vec2::new(-2000.0, 40.0), 2, GemTier::Blue);
        state.spawn_gem(Vec2::new(1500.0, -900.0), 20, GemTier::Red);

        apply_pickup(&mut state, PickupKind::Magnet);

        for gem in &state.gems {
            let offset = (gem.pos - state.player.pos).abs();
            assert!(offset.x <= 25.0 && offset.y <= 25.0);
        }
        // Values are untouched; collection still happens naturally
        assert_eq!(state.player.xp, 0);
    }

    #[test]
    fn test_tank_drops_red_gem() {
        let mut state = empty_state();
        state.tuning.rare_drop_chance = 0.0;
        drop_enemy_loot(&mut state, EnemyKind::Tank, Vec2::new(1.0, 2.0));
        assert_eq!(state.gems[0].value, TANK_GEM_VALUE);
        assert_eq!(state.gems[0].tier, GemTier::Red);
    }

    #[test]
    fn test_rare_drop_gives_pickup() {
        let mut state = empty_state();
        state.tuning.rare_drop_chance = 1.0;
        drop_enemy_loot(&mut state, EnemyKind::Basic, Vec2::ZERO);
        assert!(state.gems.is_empty());
        assert_eq!(state.pickups.len(), 1);
    }

    #[test]
    fn test_crate_loot() {
        let mut state = empty_state();
        state.tuning.crate_pickup_chance = 0.0;
        drop_crate_loot(&mut state, Vec2::new(20.0, 20.0));
        assert_eq!(state.gems[0].value, CRATE_GEM_VALUE);
        assert_eq!(state.gems[0].tier, GemTier::Green);
    }
}
