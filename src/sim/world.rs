//! World generation
//!
//! Obstacles are placed once when a run starts. Trees and rocks are permanent
//! scenery; crates can be shot open for loot.

use glam::Vec2;
use rand::Rng;

use super::collision::circle_rect_overlap;
use super::state::{GameState, Obstacle, ObstacleKind};

/// Hit points given to scenery that can never be destroyed
pub const INDESTRUCTIBLE_HP: f32 = 9999.0;
pub const CRATE_HP: f32 = 25.0;
pub const CRATE_SIZE: f32 = 40.0;

/// Placement attempts per obstacle before giving up on that slot
const MAX_PLACEMENT_ATTEMPTS: u32 = 8;

/// Populate `state.obstacles` according to tuning
pub fn generate_obstacles(state: &mut GameState) {
    let count = state.tuning.obstacle_count;
    let extent = state.tuning.world_half_extent;
    let clear_radius = state.tuning.start_clear_radius;
    let start = state.player.pos;

    for _ in 0..count {
        let roll: f32 = state.rng.random();
        let (kind, destructible, hp, width, height) = if roll < 0.4 {
            let w = state.rng.random_range(40.0..90.0);
            let h = state.rng.random_range(40.0..90.0);
            (ObstacleKind::Tree, false, INDESTRUCTIBLE_HP, w, h)
        } else if roll < 0.6 {
            let w = state.rng.random_range(40.0..90.0);
            let h = state.rng.random_range(40.0..90.0);
            (ObstacleKind::Rock, false, INDESTRUCTIBLE_HP, w, h)
        } else {
            (ObstacleKind::Crate, true, CRATE_HP, CRATE_SIZE, CRATE_SIZE)
        };

        let size = Vec2::new(width, height);
        let mut placed = None;
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let pos = Vec2::new(
                state.rng.random_range(-extent..extent),
                state.rng.random_range(-extent..extent),
            );
            if !circle_rect_overlap(start, clear_radius, pos + size * 0.5, size) {
                placed = Some(pos);
                break;
            }
        }

        let Some(pos) = placed else {
            log::debug!("Skipped obstacle placement near start point");
            continue;
        };

        let id = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id,
            pos,
            width,
            height,
            kind,
            destructible,
            hp,
            max_hp: hp,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::PLAYER_RADIUS;
    use crate::tuning::Tuning;

    #[test]
    fn test_generates_requested_count() {
        let state = GameState::new(42);
        // Placement near the origin is retried, so nearly every slot fills
        assert!(state.obstacles.len() >= 95);
        assert!(state.obstacles.len() <= 100);
    }

    #[test]
    fn test_start_point_is_clear() {
        for seed in 0..20 {
            let state = GameState::new(seed);
            for obs in &state.obstacles {
                assert!(!circle_rect_overlap(
                    Vec2::ZERO,
                    PLAYER_RADIUS,
                    obs.center(),
                    obs.size()
                ));
            }
        }
    }

    #[test]
    fn test_only_crates_destructible() {
        let state = GameState::new(7);
        for obs in &state.obstacles {
            assert_eq!(obs.destructible, obs.kind == ObstacleKind::Crate);
            if obs.destructible {
                assert_eq!(obs.hp, CRATE_HP);
                assert_eq!(obs.width, CRATE_SIZE);
            }
        }
    }

    #[test]
    fn test_empty_tuning_no_obstacles() {
        let tuning = Tuning {
            obstacle_count: 0,
            ..Default::default()
        };
        let state = GameState::with_tuning(1, tuning).unwrap();
        assert!(state.obstacles.is_empty());
    }
}
