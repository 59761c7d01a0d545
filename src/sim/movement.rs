//! Player and enemy movement

use glam::Vec2;

use super::collision::circle_rect_overlap;
use super::state::{GameState, HeldKeys};
use crate::consts::{KNOCKBACK_DECAY, PLAYER_RADIUS};
use crate::direction_to;

/// Unnormalized movement direction from held keys (screen y grows downward)
pub fn input_direction(keys: &HeldKeys) -> Vec2 {
    let mut dir = Vec2::ZERO;
    if keys.up() {
        dir.y -= 1.0;
    }
    if keys.down() {
        dir.y += 1.0;
    }
    if keys.left() {
        dir.x -= 1.0;
    }
    if keys.right() {
        dir.x += 1.0;
    }
    dir
}

/// Move the player, vetoing the whole step if it would touch any obstacle
///
/// There is no sliding along walls: a blocked step leaves the player in place.
pub fn move_player(state: &mut GameState, keys: &HeldKeys) {
    let dir = input_direction(keys);

    if dir.x < 0.0 {
        state.player.facing_right = false;
    } else if dir.x > 0.0 {
        state.player.facing_right = true;
    }

    if dir == Vec2::ZERO {
        return;
    }

    let next = state.player.pos + dir.normalize() * state.current_speed();
    let blocked = state
        .obstacles
        .iter()
        .any(|obs| circle_rect_overlap(next, PLAYER_RADIUS, obs.center(), obs.size()));

    if !blocked {
        state.player.pos = next;
    }
}

/// Apply residual knockback, decay it, then step every enemy toward the player
///
/// Enemies ignore obstacles.
pub fn advance_enemies(state: &mut GameState) {
    let target = state.player.pos;
    for enemy in &mut state.enemies {
        enemy.pos += enemy.knockback;
        enemy.knockback *= KNOCKBACK_DECAY;

        enemy.pos += direction_to(enemy.pos, target) * enemy.speed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Enemy, EnemyKind, Key, Obstacle, ObstacleKind};
    use crate::tuning::Tuning;

    fn empty_state() -> GameState {
        GameState::empty(1, Tuning::default()).unwrap()
    }

    fn keys(list: &[Key]) -> HeldKeys {
        list.iter().copied().collect()
    }

    fn enemy_at(pos: Vec2) -> Enemy {
        let p = EnemyKind::Basic.params();
        Enemy {
            id: 1,
            kind: EnemyKind::Basic,
            pos,
            hp: p.base_hp,
            max_hp: p.base_hp,
            speed: p.speed,
            damage: p.contact_damage,
            radius: p.radius,
            knockback: Vec2::ZERO,
        }
    }

    #[test]
    fn test_diagonal_is_normalized() {
        let mut state = empty_state();
        move_player(&mut state, &keys(&[Key::D, Key::S]));
        let moved = state.player.pos.length();
        assert!((moved - state.player.stats.speed).abs() < 1e-4);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut state = empty_state();
        move_player(&mut state, &keys(&[Key::W, Key::ArrowDown]));
        assert_eq!(state.player.pos, Vec2::ZERO);
    }

    #[test]
    fn test_facing_follows_horizontal_input() {
        let mut state = empty_state();
        move_player(&mut state, &keys(&[Key::ArrowLeft]));
        assert!(!state.player.facing_right);
        move_player(&mut state, &keys(&[Key::W]));
        assert!(!state.player.facing_right);
        move_player(&mut state, &keys(&[Key::D]));
        assert!(state.player.facing_right);
    }

    #[test]
    fn test_obstacle_vetoes_entire_move() {
        let mut state = empty_state();
        // Wall just right of the player: the next step would overlap it
        state.obstacles.push(Obstacle {
            id: 99,
            pos: Vec2::new(PLAYER_RADIUS + 1.0, -50.0),
            width: 20.0,
            height: 100.0,
            kind: ObstacleKind::Rock,
            destructible: false,
            hp: 9999.0,
            max_hp: 9999.0,
        });

        // Diagonal move is blocked entirely, no sliding along y
        move_player(&mut state, &keys(&[Key::D, Key::S]));
        assert_eq!(state.player.pos, Vec2::ZERO);

        // Moving away is fine
        move_player(&mut state, &keys(&[Key::A]));
        assert!(state.player.pos.x < 0.0);
    }

    #[test]
    fn test_speed_boost_applies() {
        let mut state = empty_state();
        state.speed_boost_timer = 5;
        move_player(&mut state, &keys(&[Key::D]));
        assert!((state.player.pos.x - 2.5 * 1.6).abs() < 1e-4);
    }

    #[test]
    fn test_enemy_pursues_player() {
        let mut state = empty_state();
        state.enemies.push(enemy_at(Vec2::new(100.0, 0.0)));
        advance_enemies(&mut state);
        assert!((state.enemies[0].pos.x - 98.5).abs() < 1e-4);
        assert_eq!(state.enemies[0].pos.y, 0.0);
    }

    #[test]
    fn test_knockback_decays_geometrically() {
        let mut state = empty_state();
        let mut enemy = enemy_at(Vec2::new(0.0, 500.0));
        enemy.speed = 0.0;
        enemy.knockback = Vec2::new(5.0, 0.0);
        state.enemies.push(enemy);

        advance_enemies(&mut state);
        assert!((state.enemies[0].pos.x - 5.0).abs() < 1e-4);
        assert!((state.enemies[0].knockback.x - 4.0).abs() < 1e-4);

        for _ in 0..200 {
            advance_enemies(&mut state);
        }
        assert!(state.enemies[0].knockback.length() < 1e-6);
        // Total displacement converges to 5 / (1 - 0.8)
        assert!((state.enemies[0].pos.x - 25.0).abs() < 1e-2);
    }
}
