//! Sprite generation from simulation state

use glam::Vec2;

use super::instance::{Shape, SpriteInstance, SpriteKind, colors};
use super::{RenderFrame, TextInstance};
use crate::consts::PLAYER_RADIUS;
use crate::sim::tick::hud_snapshot;
use crate::sim::{
    EnemyKind, GameState, GemTier, ObstacleKind, PickupKind, Projectile, TextStyle, WeaponKind,
};

/// Gems draw smaller than their pickup footprint
pub const GEM_DRAW_RADIUS: f32 = 4.0;
/// Base font size for floating text
pub const TEXT_BASE_SIZE: f32 = 14.0;

fn enemy_color(kind: EnemyKind) -> [f32; 4] {
    match kind {
        EnemyKind::Basic => colors::ENEMY_BASIC,
        EnemyKind::Fast => colors::ENEMY_FAST,
        EnemyKind::Tank => colors::ENEMY_TANK,
    }
}

fn gem_color(tier: GemTier) -> [f32; 4] {
    match tier {
        GemTier::Blue => colors::GEM_BLUE,
        GemTier::Green => colors::GEM_GREEN,
        GemTier::Red => colors::GEM_RED,
    }
}

pub fn pickup_color(kind: PickupKind) -> [f32; 4] {
    match kind {
        PickupKind::Heal => colors::PICKUP_HEAL,
        PickupKind::Magnet => colors::PICKUP_MAGNET,
        PickupKind::Bomb => colors::PICKUP_BOMB,
        PickupKind::SpeedBoost => colors::PICKUP_SPEED,
    }
}

fn text_color(style: TextStyle) -> [f32; 4] {
    match style {
        TextStyle::Damage => colors::DAMAGE,
        TextStyle::Critical => colors::CRIT,
        TextStyle::PlayerHurt | TextStyle::Kill => colors::HURT,
        TextStyle::ObstacleHit => colors::OBSTACLE_HIT,
        TextStyle::Announce(kind) => pickup_color(kind),
    }
}

fn projectile_sprite(p: &Projectile) -> SpriteInstance {
    let sprite = match p.weapon {
        WeaponKind::Seeking => {
            SpriteInstance::circle(SpriteKind::Projectile, p.pos, p.radius, colors::WAND)
        }
        WeaponKind::Arcing => SpriteInstance::new(
            SpriteKind::Projectile,
            Shape::Rect,
            p.pos,
            Vec2::splat(p.radius * 2.0),
            colors::AXE,
        ),
        WeaponKind::Area => SpriteInstance::new(
            SpriteKind::Projectile,
            Shape::Ring,
            p.pos,
            Vec2::splat(p.radius * 2.0),
            colors::AURA,
        ),
    };
    sprite.with_rotation(p.rotation.unwrap_or(0.0))
}

/// Build a render snapshot of every live entity, back to front
pub fn build_frame(state: &GameState) -> RenderFrame {
    let mut sprites = Vec::with_capacity(
        state.obstacles.len()
            + state.gems.len()
            + state.pickups.len()
            + state.enemies.len()
            + state.projectiles.len()
            + 1,
    );

    for obs in &state.obstacles {
        let color = match obs.kind {
            ObstacleKind::Tree => colors::TREE,
            ObstacleKind::Rock => colors::ROCK,
            ObstacleKind::Crate => colors::CRATE,
        };
        sprites.push(SpriteInstance::new(
            SpriteKind::Obstacle,
            Shape::Rect,
            obs.center(),
            obs.size(),
            color,
        ));
    }

    for gem in &state.gems {
        sprites.push(SpriteInstance::circle(
            SpriteKind::Gem,
            gem.pos,
            GEM_DRAW_RADIUS,
            gem_color(gem.tier),
        ));
    }

    for p in &state.pickups {
        let shape = if p.kind == PickupKind::Heal {
            Shape::Cross
        } else {
            Shape::Circle
        };
        sprites.push(SpriteInstance::new(
            SpriteKind::Pickup,
            shape,
            p.pos,
            Vec2::splat(p.radius * 2.0),
            pickup_color(p.kind),
        ));
    }

    for enemy in &state.enemies {
        sprites.push(SpriteInstance::circle(
            SpriteKind::Enemy,
            enemy.pos,
            enemy.radius,
            enemy_color(enemy.kind),
        ));
    }

    sprites.push(SpriteInstance::circle(
        SpriteKind::Player,
        state.player.pos,
        PLAYER_RADIUS,
        colors::PLAYER,
    ));

    sprites.extend(state.projectiles.iter().map(projectile_sprite));

    let texts = state
        .damage_texts
        .iter()
        .map(|t| TextInstance {
            position: t.pos,
            text: t.text.clone(),
            color: text_color(t.style),
            size: TEXT_BASE_SIZE * t.scale,
        })
        .collect();

    RenderFrame {
        camera: state.player.pos,
        viewport: Vec2::new(state.tuning.viewport_width, state.tuning.viewport_height),
        facing_right: state.player.facing_right,
        sprites,
        texts,
        hud: hud_snapshot(state),
    }
}
