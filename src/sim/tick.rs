//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use super::combat::resolve_combat;
use super::events::{GameEvent, HudSnapshot};
use super::movement::{advance_enemies, move_player};
use super::progression::{collect_gems, collect_pickups};
use super::spawn::update_spawning;
use super::state::{GamePhase, GameState, HeldKeys};
use super::weapons::{advance_projectiles, update_weapons};

/// Floating text rises this far each frame
pub const TEXT_DRIFT: f32 = 0.5;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Movement keys held this frame
    pub keys: HeldKeys,
    /// Pause toggle
    pub pause: bool,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                log::debug!("Paused at frame {}", state.frame);
                return;
            }
            GamePhase::Paused => state.phase = GamePhase::Playing,
            _ => {}
        }
    }

    // Level-up choices, pause and game over all halt the world
    if state.phase != GamePhase::Playing {
        return;
    }

    state.frame += 1;
    state.speed_boost_timer = state.speed_boost_timer.saturating_sub(1);

    move_player(state, &input.keys);
    advance_enemies(state);
    update_spawning(state);
    update_weapons(state);
    advance_projectiles(state);

    resolve_combat(state);
    if state.phase == GamePhase::GameOver {
        return;
    }

    collect_gems(state);
    collect_pickups(state);
    update_texts(state);

    if state.frame % state.tuning.hud_interval == 0 {
        let snapshot = hud_snapshot(state);
        state.emit(GameEvent::Hud(snapshot));
    }
}

/// Drift floating texts upward and drop the expired
pub fn update_texts(state: &mut GameState) {
    for text in &mut state.damage_texts {
        text.pos.y -= TEXT_DRIFT;
        text.life = text.life.saturating_sub(1);
    }
    state.damage_texts.retain(|t| t.life > 0);
}

/// Current HUD values
pub fn hud_snapshot(state: &GameState) -> HudSnapshot {
    let player = &state.player;
    HudSnapshot {
        hp: player.stats.hp,
        max_hp: player.stats.max_hp,
        xp: player.xp,
        next_level_xp: player.next_level_xp,
        level: player.level,
        elapsed_seconds: state.elapsed_seconds(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{GemTier, Key};
    use crate::tuning::Tuning;
    use glam::Vec2;

    #[test]
    fn test_tick_advances_frame() {
        let mut state = GameState::empty(12345, Tuning::default()).unwrap();
        let input = TickInput::default();
        tick(&mut state, &input);
        assert_eq!(state.frame, 1);
        // Starter weapon fires on the first frame
        assert_eq!(state.projectiles.len(), 1);
    }

    #[test]
    fn test_tick_pause() {
        let mut state = GameState::empty(12345, Tuning::default()).unwrap();
        tick(&mut state, &TickInput::default());

        let input = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.phase, GamePhase::Paused);
        assert_eq!(state.frame, 1);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.frame, 1);

        // Unpause
        tick(&mut state, &input);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.frame, 2);
    }

    #[test]
    fn test_level_up_halts_world() {
        let mut state = GameState::empty(12345, Tuning::default()).unwrap();
        state.spawn_gem(Vec2::ZERO, 10, GemTier::Blue);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::LevelUp);

        let frame = state.frame;
        let right = TickInput {
            keys: [Key::D].into_iter().collect(),
            pause: false,
        };
        tick(&mut state, &right);
        tick(&mut state, &right);
        assert_eq!(state.frame, frame);
        assert_eq!(state.player.pos, Vec2::ZERO);
        // Pause is ignored while choosing
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::LevelUp);
    }

    #[test]
    fn test_speed_boost_expires() {
        let mut state = GameState::empty(1, Tuning::default()).unwrap();
        state.speed_boost_timer = 2;
        tick(&mut state, &TickInput::default());
        tick(&mut state, &TickInput::default());
        assert_eq!(state.speed_boost_timer, 0);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.speed_boost_timer, 0);
    }

    #[test]
    fn test_texts_drift_and_expire() {
        let mut state = GameState::empty(1, Tuning::default()).unwrap();
        state.push_text(
            Vec2::new(0.0, 100.0),
            "7".to_string(),
            2,
            crate::sim::state::TextStyle::Damage,
            1.0,
        );
        update_texts(&mut state);
        assert_eq!(state.damage_texts[0].pos.y, 99.5);
        update_texts(&mut state);
        assert!(state.damage_texts.is_empty());
    }

    #[test]
    fn test_hud_every_interval() {
        let mut state = GameState::empty(1, Tuning::default()).unwrap();
        for _ in 0..10 {
            tick(&mut state, &TickInput::default());
        }
        let huds: Vec<_> = state
            .drain_events()
            .into_iter()
            .filter_map(|e| match e {
                GameEvent::Hud(h) => Some(h),
                _ => None,
            })
            .collect();
        assert_eq!(huds.len(), 2);
        assert_eq!(huds[0].hp, 100.0);
        assert_eq!(huds[0].next_level_xp, 10);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        let inputs = [
            TickInput {
                keys: [Key::W].into_iter().collect(),
                ..Default::default()
            },
            TickInput {
                keys: [Key::D, Key::S].into_iter().collect(),
                ..Default::default()
            },
            TickInput::default(),
        ];

        for i in 0..900 {
            let input = &inputs[(i / 60) % inputs.len()];
            tick(&mut state1, input);
            tick(&mut state2, input);
        }

        assert_eq!(state1.frame, state2.frame);
        assert_eq!(state1.player.pos, state2.player.pos);
        assert_eq!(state1.enemies.len(), state2.enemies.len());
        assert_eq!(state1.events, state2.events);
    }
}
