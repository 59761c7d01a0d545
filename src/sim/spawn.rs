//! Time-gated enemy spawning with difficulty scaling

use glam::Vec2;
use rand::Rng;

use super::state::{Enemy, EnemyKind, GameState};
use crate::tuning::Tuning;
use crate::unit_from_angle;

/// Frames between spawns at `frame`, shrinking over time down to the floor
pub fn spawn_interval(tuning: &Tuning, frame: u64) -> u64 {
    tuning
        .spawn_interval_initial
        .saturating_sub(frame / tuning.spawn_ramp_frames)
        .max(tuning.spawn_interval_min)
}

/// Whether a spawn fires on `frame`
pub fn should_spawn(tuning: &Tuning, frame: u64) -> bool {
    frame % spawn_interval(tuning, frame) == 0
}

/// Enemy hp multiplier at `frame`
pub fn difficulty_multiplier(tuning: &Tuning, frame: u64) -> f32 {
    1.0 + frame as f32 / tuning.difficulty_ramp_frames as f32
}

/// Distance from the player at which enemies appear (just off screen)
pub fn spawn_distance(tuning: &Tuning) -> f32 {
    tuning.viewport_width.max(tuning.viewport_height) / 2.0 + tuning.spawn_margin
}

/// Pick an enemy kind using the layered time gates
///
/// Both gates roll independently; a successful tank roll wins over fast.
pub fn choose_kind<R: Rng>(tuning: &Tuning, frame: u64, rng: &mut R) -> EnemyKind {
    let is_tank = frame > tuning.tank_unlock_frame && rng.random_bool(tuning.tank_chance);
    let is_fast = frame > tuning.fast_unlock_frame && rng.random_bool(tuning.fast_chance);

    if is_tank {
        EnemyKind::Tank
    } else if is_fast {
        EnemyKind::Fast
    } else {
        EnemyKind::Basic
    }
}

/// Build an enemy of `kind` at `pos` with hp scaled for `frame`
pub fn make_enemy(tuning: &Tuning, id: u32, kind: EnemyKind, pos: Vec2, frame: u64) -> Enemy {
    let params = kind.params();
    let hp = params.base_hp * difficulty_multiplier(tuning, frame);
    Enemy {
        id,
        kind,
        pos,
        hp,
        max_hp: hp,
        speed: params.speed,
        damage: params.contact_damage,
        radius: params.radius,
        knockback: Vec2::ZERO,
    }
}

/// Spawn one enemy on the spawn ring if this frame's gate is open
pub fn update_spawning(state: &mut GameState) {
    let frame = state.frame;
    if !should_spawn(&state.tuning, frame) {
        return;
    }

    let angle = state.rng.random_range(0.0..std::f32::consts::TAU);
    let pos = state.player.pos + unit_from_angle(angle) * spawn_distance(&state.tuning);
    let kind = choose_kind(&state.tuning, frame, &mut state.rng);

    let id = state.next_entity_id();
    let enemy = make_enemy(&state.tuning, id, kind, pos, frame);
    if kind == EnemyKind::Tank {
        log::debug!("Tank spawned at frame {} with {:.0} hp", frame, enemy.hp);
    }
    state.enemies.push(enemy);
}
