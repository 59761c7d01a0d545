//! Collision-driven combat resolution
//!
//! Removals are gathered into per-frame sets while iterating and applied in
//! one filtering pass at the end, so nothing is mutated out from under a loop.

use std::collections::HashSet;

use glam::Vec2;

use super::collision::{circle_rect_overlap, circles_overlap};
use super::events::{GameEvent, SoundCue};
use super::loot::{drop_crate_loot, drop_enemy_loot};
use super::state::{GamePhase, GameState, TextStyle};
use crate::consts::*;
use crate::direction_to;

pub const HIT_TEXT_LIFE: u32 = 30;
pub const HURT_TEXT_LIFE: u32 = 40;
pub const OBSTACLE_TEXT_LIFE: u32 = 20;
pub const OBSTACLE_TEXT_SCALE: f32 = 0.8;
/// Hit numbers float this far above the enemy
const HIT_TEXT_RISE: f32 = 15.0;

/// Entities marked for removal this frame
#[derive(Debug, Default)]
pub struct RemovalSet {
    pub enemies: HashSet<u32>,
    pub obstacles: HashSet<u32>,
}

/// Resolve every collision for one frame and apply removals
pub fn resolve_combat(state: &mut GameState) {
    let mut removals = RemovalSet::default();
    resolve_enemy_hits(state, &mut removals);
    resolve_player_contact(state, &removals);
    resolve_obstacle_hits(state, &mut removals);
    apply_removals(state, &removals);
}

/// Projectiles against enemies
pub fn resolve_enemy_hits(state: &mut GameState, removals: &mut RemovalSet) {
    let frame = state.frame;
    let area_tick = frame % state.tuning.area_tick_interval == 0;
    let hit_sound = frame % state.tuning.hit_sound_interval == 0;
    let player_pos = state.player.pos;

    let mut texts = Vec::new();
    let mut kills = Vec::new();
    let mut hit_count = 0usize;

    for enemy in &mut state.enemies {
        for p in &mut state.projectiles {
            if removals.enemies.contains(&enemy.id) {
                break;
            }
            if p.is_area() && !area_tick {
                continue;
            }
            if !p.can_hit() || !circles_overlap(enemy.pos, enemy.radius, p.pos, p.radius) {
                continue;
            }

            hit_count += 1;
            let dmg = p.damage.floor();
            enemy.hp -= dmg;

            let style = if dmg as i32 > CRIT_DISPLAY_THRESHOLD {
                TextStyle::Critical
            } else {
                TextStyle::Damage
            };
            texts.push((enemy.pos - Vec2::new(0.0, HIT_TEXT_RISE), dmg, style));

            if p.is_area() {
                enemy.knockback -= direction_to(enemy.pos, player_pos) * AREA_PUSH;
            } else {
                enemy.knockback += p.vel.normalize_or_zero() * KNOCKBACK_IMPULSE;
                p.pierce -= 1;
            }

            if enemy.hp <= 0.0 {
                removals.enemies.insert(enemy.id);
                kills.push((enemy.kind, enemy.pos));
            }
        }
    }

    if hit_sound {
        for _ in 0..hit_count {
            state.emit(GameEvent::Sound(SoundCue::Hit));
        }
    }
    for (pos, dmg, style) in texts {
        state.push_text(pos, format!("{}", dmg as i32), HIT_TEXT_LIFE, style, 1.0);
    }
    for (kind, pos) in kills {
        drop_enemy_loot(state, kind, pos);
        state.emit(GameEvent::EnemyKilled { kind });
    }
}

/// Enemy contact damage, applied only on gate frames
pub fn resolve_player_contact(state: &mut GameState, removals: &RemovalSet) {
    if state.frame % state.tuning.contact_damage_interval != 0 {
        return;
    }

    let player_pos = state.player.pos;
    let hits: Vec<f32> = state
        .enemies
        .iter()
        .filter(|e| !removals.enemies.contains(&e.id))
        .filter(|e| circles_overlap(e.pos, e.radius, player_pos, PLAYER_RADIUS))
        .map(|e| e.damage)
        .collect();

    for damage in hits {
        state.player.stats.hp -= damage;
        state.emit(GameEvent::Sound(SoundCue::Hit));
        state.emit(GameEvent::PlayerDamaged { damage });
        state.push_text(
            player_pos,
            format!("-{}", damage),
            HURT_TEXT_LIFE,
            TextStyle::PlayerHurt,
            1.0,
        );

        if state.player.stats.hp <= 0.0 && state.phase != GamePhase::GameOver {
            let survived_seconds = state.elapsed_seconds();
            state.phase = GamePhase::GameOver;
            state.emit(GameEvent::Sound(SoundCue::Death));
            state.emit(GameEvent::GameOver { survived_seconds });
            log::info!(
                "Game over at level {} after {}s",
                state.player.level,
                survived_seconds
            );
        }
    }
}

/// Projectiles against destructible obstacles
pub fn resolve_obstacle_hits(state: &mut GameState, removals: &mut RemovalSet) {
    let mut texts = Vec::new();
    let mut destroyed = Vec::new();

    for p in &mut state.projectiles {
        for obs in &mut state.obstacles {
            if !obs.destructible || removals.obstacles.contains(&obs.id) {
                continue;
            }
            if !p.can_hit() || !circle_rect_overlap(p.pos, p.radius, obs.center(), obs.size()) {
                continue;
            }

            obs.hp -= p.damage;
            if !p.is_area() {
                p.pierce -= 1;
            }
            texts.push((Vec2::new(obs.center().x, obs.pos.y), p.damage.floor()));

            if obs.hp <= 0.0 {
                removals.obstacles.insert(obs.id);
                destroyed.push(obs.center());
            }
        }
    }

    for (pos, dmg) in texts {
        state.push_text(
            pos,
            format!("{}", dmg as i32),
            OBSTACLE_TEXT_LIFE,
            TextStyle::ObstacleHit,
            OBSTACLE_TEXT_SCALE,
        );
    }
    for center in destroyed {
        state.emit(GameEvent::Sound(SoundCue::Explosion));
        log::debug!("Crate destroyed at ({:.0}, {:.0})", center.x, center.y);
        drop_crate_loot(state, center);
    }
}

/// Batch-filter spent projectiles and everything marked for removal
pub fn apply_removals(state: &mut GameState, removals: &RemovalSet) {
    state.projectiles.retain(|p| p.pierce > 0);
    state.enemies.retain(|e| !removals.enemies.contains(&e.id));
    state.obstacles.retain(|o| !removals.obstacles.contains(&o.id));
}
