//! Arena Survivor headless runner
//!
//! Drives the simulation without a window: feeds scripted or autopilot
//! input, picks the first offer on every level-up and prints a JSON summary.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec2;

use arena_survivor::audio::AudioManager;
use arena_survivor::renderer::{build_frame, present};
use arena_survivor::sim::{
    GameEvent, GamePhase, GameState, HeldKeys, Key, TickInput, apply_upgrade, hud_snapshot, tick,
};
use arena_survivor::{Settings, Tuning};

/// Enemies closer than this steer the autopilot away
const AUTOPILOT_DANGER_RADIUS: f32 = 200.0;
/// Frames per leg of the idle wander pattern
const AUTOPILOT_WANDER_FRAMES: u64 = 90;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Seed for the run's RNG.
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Number of frames to simulate (60 per second of game time).
    #[arg(long, value_name = "FRAMES", default_value_t = 3600)]
    ticks: u64,
    /// Balance overrides as a JSON file; missing fields keep their defaults.
    #[arg(long, value_name = "PATH")]
    tuning: Option<PathBuf>,
    /// Presentation preferences as a JSON file.
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,
    /// Write the effective presentation preferences to this file.
    #[arg(long, value_name = "PATH")]
    save_settings: Option<PathBuf>,
    /// Steer the player away from nearby enemies instead of standing still.
    #[arg(long)]
    autopilot: bool,
}

#[derive(Debug, Default)]
struct RunStats {
    kills: u64,
    level_ups: u32,
    upgrades: Vec<String>,
    damage_taken: f32,
    pickups: u32,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = CliArgs::parse();

    let tuning = match &args.tuning {
        Some(path) => Tuning::load(path)
            .with_context(|| format!("failed to load tuning from {}", path.display()))?,
        None => Tuning::default(),
    };
    let settings = args
        .settings
        .as_ref()
        .map(Settings::load)
        .unwrap_or_default();
    if let Some(path) = &args.save_settings {
        save_settings(&settings, path)?;
    }

    let mut audio = AudioManager::new(None);
    audio.apply_settings(&settings);

    let mut state = GameState::with_tuning(args.seed, tuning).context("invalid tuning")?;
    let mut stats = RunStats::default();

    for _ in 0..args.ticks {
        let input = TickInput {
            keys: if args.autopilot {
                autopilot_keys(&state)
            } else {
                HeldKeys::default()
            },
            pause: false,
        };
        tick(&mut state, &input);

        let events = state.drain_events();
        audio.handle_events(&events);
        record_events(&mut stats, &events);

        let mut frame = build_frame(&state);
        frame.apply_settings(&settings);
        present(None, &frame);

        match state.phase {
            GamePhase::LevelUp => choose_first_offer(&mut state, &mut stats),
            GamePhase::GameOver => break,
            _ => {}
        }
    }

    let summary = serde_json::json!({
        "seed": args.seed,
        "frames": state.frame,
        "phase": state.phase,
        "hud": hud_snapshot(&state),
        "kills": stats.kills,
        "level_ups": stats.level_ups,
        "upgrades": stats.upgrades,
        "damage_taken": stats.damage_taken,
        "pickups": stats.pickups,
        "weapons": state.player.weapons.iter().map(|w| (w.name.clone(), w.level)).collect::<Vec<_>>(),
        "enemies_alive": state.enemies.len(),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn save_settings(settings: &Settings, path: &Path) -> Result<()> {
    settings
        .save(path)
        .with_context(|| format!("failed to save settings to {}", path.display()))
}

fn record_events(stats: &mut RunStats, events: &[GameEvent]) {
    for event in events {
        match event {
            GameEvent::EnemyKilled { .. } => stats.kills += 1,
            GameEvent::LevelUp { level, options } => {
                stats.level_ups += 1;
                log::debug!("Level {} offers {} upgrades", level, options.len());
            }
            GameEvent::PlayerDamaged { damage } => stats.damage_taken += damage,
            GameEvent::PickupCollected { kind } => {
                stats.pickups += 1;
                log::info!("Picked up {:?}", kind);
            }
            GameEvent::GameOver { survived_seconds } => {
                log::info!("Survived {}s", survived_seconds);
            }
            GameEvent::Sound(_) | GameEvent::Hud(_) => {}
        }
    }
}

fn choose_first_offer(state: &mut GameState, stats: &mut RunStats) {
    let Some(offer) = state.pending_offers.first().cloned() else {
        log::warn!("Level-up without offers at frame {}", state.frame);
        return;
    };
    if apply_upgrade(state, &offer) {
        stats.upgrades.push(offer.name);
    }
}

/// Flee the weighted center of nearby enemies, otherwise wander in a square
fn autopilot_keys(state: &GameState) -> HeldKeys {
    let player = state.player.pos;
    let threat: Vec2 = state
        .enemies
        .iter()
        .filter(|e| e.pos.distance(player) < AUTOPILOT_DANGER_RADIUS)
        .map(|e| (player - e.pos).normalize_or_zero() / e.pos.distance(player).max(1.0))
        .sum();

    let dir = if threat.length_squared() > f32::EPSILON {
        threat.normalize()
    } else {
        match (state.frame / AUTOPILOT_WANDER_FRAMES) % 4 {
            0 => Vec2::X,
            1 => Vec2::Y,
            2 => Vec2::NEG_X,
            _ => Vec2::NEG_Y,
        }
    };

    let mut keys = HeldKeys::default();
    if dir.x > 0.3 {
        keys.press(Key::D);
    } else if dir.x < -0.3 {
        keys.press(Key::A);
    }
    if dir.y > 0.3 {
        keys.press(Key::S);
    } else if dir.y < -0.3 {
        keys.press(Key::W);
    }
    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_settings_flag() {
        let path = std::env::temp_dir().join(format!(
            "arena_survivor_cli_settings_{}.json",
            std::process::id()
        ));
        let arg = path.to_str().unwrap();
        let args = CliArgs::try_parse_from(["arena-survivor", "--save-settings", arg]).unwrap();
        assert_eq!(args.save_settings.as_deref(), Some(path.as_path()));

        let settings = Settings {
            muted: true,
            sfx_volume: 0.25,
            ..Settings::default()
        };
        save_settings(&settings, &path).unwrap();
        let loaded = Settings::load(&path);
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_save_settings_bad_path_errors() {
        let dir = std::env::temp_dir().join("arena_survivor_missing_dir_for_settings");
        let err = save_settings(&Settings::default(), &dir.join("nested").join("s.json"))
            .unwrap_err();
        assert!(err.to_string().contains("failed to save settings"));
    }
}
