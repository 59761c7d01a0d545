//! Render snapshots for the presentation layer
//!
//! The simulation never draws. Each frame the host builds a `RenderFrame`
//! and hands it to whatever `RenderTarget` it has (canvas, wgpu, nothing).

pub mod instance;
pub mod shapes;

use glam::Vec2;

use crate::settings::Settings;
use crate::sim::HudSnapshot;

pub use instance::{Shape, SpriteInstance, SpriteKind, colors};
pub use shapes::build_frame;

/// Floating text to draw over the world
#[derive(Debug, Clone, PartialEq)]
pub struct TextInstance {
    pub position: Vec2,
    pub text: String,
    pub color: [f32; 4],
    /// Font size in pixels
    pub size: f32,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone)]
pub struct RenderFrame {
    /// World point at the center of the screen
    pub camera: Vec2,
    pub viewport: Vec2,
    pub facing_right: bool,
    /// Back to front
    pub sprites: Vec<SpriteInstance>,
    pub texts: Vec<TextInstance>,
    pub hud: HudSnapshot,
}

impl RenderFrame {
    /// Strip presentation the player has turned off
    pub fn apply_settings(&mut self, settings: &Settings) {
        if !settings.show_damage_numbers {
            self.texts.clear();
        }
        if settings.reduced_motion {
            for sprite in &mut self.sprites {
                sprite.rotation = 0.0;
            }
        }
    }

    /// Raw bytes of the sprite instances for a GPU upload
    pub fn sprite_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.sprites)
    }

    /// World to screen transform for this frame's camera
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        world - self.camera + self.viewport * 0.5
    }
}

/// Anything that can draw a frame
pub trait RenderTarget {
    fn draw(&mut self, frame: &RenderFrame);
}

/// Draw a frame if a target is available
///
/// A missing target skips this frame's draw only; the simulation is unaffected.
pub fn present(target: Option<&mut dyn RenderTarget>, frame: &RenderFrame) {
    if let Some(target) = target {
        target.draw(frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GameState;
    use crate::tuning::Tuning;

    #[derive(Default)]
    struct CountingTarget {
        frames: usize,
        sprites: usize,
    }

    impl RenderTarget for CountingTarget {
        fn draw(&mut self, frame: &RenderFrame) {
            self.frames += 1;
            self.sprites += frame.sprites.len();
        }
    }

    #[test]
    fn test_present_to_target() {
        let state = GameState::empty(1, Tuning::default()).unwrap();
        let frame = build_frame(&state);
        let mut target = CountingTarget::default();
        present(Some(&mut target), &frame);
        assert_eq!(target.frames, 1);
        assert_eq!(target.sprites, 1);
    }

    #[test]
    fn test_present_without_target_is_noop() {
        let state = GameState::empty(1, Tuning::default()).unwrap();
        present(None, &build_frame(&state));
    }

    #[test]
    fn test_sprite_bytes_len() {
        let state = GameState::new(8);
        let frame = build_frame(&state);
        assert_eq!(
            frame.sprite_bytes().len(),
            frame.sprites.len() * std::mem::size_of::<SpriteInstance>()
        );
    }

    #[test]
    fn test_world_to_screen_centers_camera() {
        let mut state = GameState::empty(1, Tuning::default()).unwrap();
        state.player.pos = Vec2::new(300.0, -40.0);
        let frame = build_frame(&state);
        assert_eq!(frame.world_to_screen(state.player.pos), Vec2::new(640.0, 360.0));
    }

    #[test]
    fn test_settings_strip_texts_and_spin() {
        let mut state = GameState::empty(1, Tuning::default()).unwrap();
        state.push_text(Vec2::ZERO, "5".into(), 30, crate::sim::TextStyle::Damage, 1.0);
        let mut frame = build_frame(&state);
        frame.sprites[0].rotation = 1.0;

        frame.apply_settings(&Settings {
            show_damage_numbers: false,
            reduced_motion: true,
            ..Settings::default()
        });
        assert!(frame.texts.is_empty());
        assert_eq!(frame.sprites[0].rotation, 0.0);
    }
}
