//! Weapon cooldowns, firing and projectile advance
//!
//! Each weapon kind maps to one `WeaponBehavior` entry in a fixed table.
//! The set of kinds is closed, so dispatch is a plain index.

use glam::Vec2;
use rand::Rng;

use super::events::{GameEvent, SoundCue};
use super::state::{GameState, Projectile, WeaponKind};
use crate::{direction_to, unit_from_angle};

pub const SEEK_SPEED: f32 = 8.0;
pub const SEEK_RADIUS: f32 = 6.0;
pub const SEEK_DURATION: u32 = 60;
pub const SEEK_PIERCE: u32 = 1;

pub const ARC_HORIZONTAL_SPEED: f32 = 4.0;
/// Horizontal jitter is uniform in [-ARC_JITTER, ARC_JITTER)
pub const ARC_JITTER: f32 = 1.0;
pub const ARC_LAUNCH_SPEED: f32 = -11.0;
pub const ARC_GRAVITY: f32 = 0.4;
pub const ARC_SPIN: f32 = 0.3;
pub const ARC_RADIUS: f32 = 10.0;
pub const ARC_DURATION: u32 = 80;
pub const ARC_PIERCE: u32 = 99;
/// Thrown from slightly above the player's center
pub const ARC_LAUNCH_OFFSET: f32 = 10.0;
pub const ARC_DAMAGE_FACTOR: f32 = 1.5;

pub const AREA_BASE_RADIUS: f32 = 55.0;
pub const AREA_DAMAGE_FACTOR: f32 = 0.2;
/// The area effect never expires and never runs out of hits
pub const UNLIMITED: u32 = u32::MAX;

/// Per-kind fire and update behavior
pub struct WeaponBehavior {
    /// Emit projectiles for a weapon with the given base damage
    pub fire: fn(&mut GameState, f32),
    /// Advance one projectile of this kind by one frame
    pub advance: fn(&mut Projectile, &AdvanceContext),
}

/// Player-derived inputs for advancing projectiles
#[derive(Debug, Clone, Copy)]
pub struct AdvanceContext {
    pub player_pos: Vec2,
    pub area: f32,
}

static BEHAVIORS: [WeaponBehavior; 3] = [
    WeaponBehavior {
        fire: fire_seeking,
        advance: advance_linear,
    },
    WeaponBehavior {
        fire: fire_arcing,
        advance: advance_arcing,
    },
    WeaponBehavior {
        fire: fire_area,
        advance: advance_area,
    },
];

impl WeaponKind {
    pub fn behavior(&self) -> &'static WeaponBehavior {
        &BEHAVIORS[*self as usize]
    }
}

/// Tick every weapon's cooldown and fire those that are ready
pub fn update_weapons(state: &mut GameState) {
    let cooldown_step = 1.0 + state.player.stats.cooldown_reduction;

    let mut ready: Vec<(WeaponKind, f32)> = Vec::new();
    for weapon in &mut state.player.weapons {
        if weapon.cooldown_timer > 0.0 {
            weapon.cooldown_timer -= cooldown_step;
        } else {
            weapon.cooldown_timer = weapon.base_cooldown;
            ready.push((weapon.kind, weapon.damage));
        }
    }

    for (kind, damage) in ready {
        (kind.behavior().fire)(state, damage);
    }
}

/// Nearest enemy strictly within `range` of `from`
pub fn nearest_enemy_in_range(state: &GameState, from: Vec2, range: f32) -> Option<Vec2> {
    state
        .enemies
        .iter()
        .map(|e| (e.pos, e.pos.distance(from)))
        .filter(|&(_, dist)| dist < range)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(pos, _)| pos)
}

fn fire_seeking(state: &mut GameState, damage: f32) {
    let origin = state.player.pos;
    let dir = match nearest_enemy_in_range(state, origin, state.tuning.seek_range) {
        Some(target) => direction_to(origin, target),
        None => unit_from_angle(state.rng.random_range(0.0..std::f32::consts::TAU)),
    };

    let id = state.next_entity_id();
    state.projectiles.push(Projectile {
        id,
        pos: origin,
        vel: dir * SEEK_SPEED,
        radius: SEEK_RADIUS,
        damage: damage * state.player.stats.might,
        duration: SEEK_DURATION,
        pierce: SEEK_PIERCE,
        weapon: WeaponKind::Seeking,
        rotation: None,
    });
    state.emit(GameEvent::Sound(SoundCue::Fire));
}

fn fire_arcing(state: &mut GameState, damage: f32) {
    let jitter = state.rng.random_range(-ARC_JITTER..ARC_JITTER);
    let vx = state.player.facing_sign() * ARC_HORIZONTAL_SPEED + jitter;

    let id = state.next_entity_id();
    state.projectiles.push(Projectile {
        id,
        pos: state.player.pos - Vec2::new(0.0, ARC_LAUNCH_OFFSET),
        vel: Vec2::new(vx, ARC_LAUNCH_SPEED),
        radius: ARC_RADIUS,
        damage: damage * ARC_DAMAGE_FACTOR * state.player.stats.might,
        duration: ARC_DURATION,
        pierce: ARC_PIERCE,
        weapon: WeaponKind::Arcing,
        rotation: Some(0.0),
    });
    state.emit(GameEvent::Sound(SoundCue::Fire));
}

fn fire_area(state: &mut GameState, damage: f32) {
    if state.projectiles.iter().any(Projectile::is_area) {
        return;
    }

    let id = state.next_entity_id();
    state.projectiles.push(Projectile {
        id,
        pos: state.player.pos,
        vel: Vec2::ZERO,
        radius: AREA_BASE_RADIUS * state.player.stats.area,
        damage: damage * AREA_DAMAGE_FACTOR * state.player.stats.might,
        duration: UNLIMITED,
        pierce: UNLIMITED,
        weapon: WeaponKind::Area,
        rotation: None,
    });
}

fn advance_linear(p: &mut Projectile, _ctx: &AdvanceContext) {
    p.pos += p.vel;
}

fn advance_arcing(p: &mut Projectile, _ctx: &AdvanceContext) {
    p.vel.y += ARC_GRAVITY;
    p.pos += p.vel;
    p.rotation = Some(p.rotation.unwrap_or(0.0) + ARC_SPIN);
}

fn advance_area(p: &mut Projectile, ctx: &AdvanceContext) {
    p.pos = ctx.player_pos;
    p.radius = AREA_BASE_RADIUS * ctx.area;
}

/// Move every projectile, age finite ones and drop the expired
pub fn advance_projectiles(state: &mut GameState) {
    let ctx = AdvanceContext {
        player_pos: state.player.pos,
        area: state.player.stats.area,
    };

    for p in &mut state.projectiles {
        (p.weapon.behavior().advance)(p, &ctx);
        if p.duration != UNLIMITED {
            p.duration = p.duration.saturating_sub(1);
        }
    }
    state.projectiles.retain(|p| p.duration > 0);
}
