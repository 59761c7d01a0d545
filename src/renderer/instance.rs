//! GPU-friendly instance records for 2D sprites

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// Primitive shape a sprite is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum Shape {
    Circle = 0,
    Rect = 1,
    /// Filled circle with a faint outline
    Ring = 2,
    Cross = 3,
}

/// Which entity category a sprite belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum SpriteKind {
    Obstacle = 0,
    Gem = 1,
    Pickup = 2,
    Enemy = 3,
    Player = 4,
    Projectile = 5,
}

/// One sprite, laid out for direct upload into an instance buffer
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    /// Center in world space
    pub position: [f32; 2],
    /// Full width and height
    pub size: [f32; 2],
    pub color: [f32; 4],
    /// Radians
    pub rotation: f32,
    pub shape: u32,
    pub kind: u32,
    pub _pad: u32,
}

impl SpriteInstance {
    pub fn circle(kind: SpriteKind, center: Vec2, radius: f32, color: [f32; 4]) -> Self {
        Self::new(kind, Shape::Circle, center, Vec2::splat(radius * 2.0), color)
    }

    pub fn new(kind: SpriteKind, shape: Shape, center: Vec2, size: Vec2, color: [f32; 4]) -> Self {
        Self {
            position: center.to_array(),
            size: size.to_array(),
            color,
            rotation: 0.0,
            shape: shape as u32,
            kind: kind as u32,
            _pad: 0,
        }
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn center(&self) -> Vec2 {
        Vec2::from_array(self.position)
    }
}

/// Colors for game elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.094, 0.094, 0.106, 1.0];
    pub const PLAYER: [f32; 4] = [0.231, 0.510, 0.965, 1.0];

    pub const ENEMY_BASIC: [f32; 4] = [0.133, 0.773, 0.369, 1.0];
    pub const ENEMY_FAST: [f32; 4] = [0.659, 0.333, 0.969, 1.0];
    pub const ENEMY_TANK: [f32; 4] = [0.937, 0.267, 0.267, 1.0];

    pub const GEM_BLUE: [f32; 4] = [0.376, 0.647, 0.980, 1.0];
    pub const GEM_GREEN: [f32; 4] = [0.290, 0.871, 0.502, 1.0];
    pub const GEM_RED: [f32; 4] = [0.973, 0.443, 0.443, 1.0];

    pub const PICKUP_HEAL: [f32; 4] = [0.957, 0.247, 0.369, 1.0];
    pub const PICKUP_MAGNET: [f32; 4] = PLAYER;
    pub const PICKUP_BOMB: [f32; 4] = [0.094, 0.094, 0.106, 1.0];
    pub const PICKUP_SPEED: [f32; 4] = [0.918, 0.702, 0.031, 1.0];

    pub const TREE: [f32; 4] = [0.086, 0.396, 0.204, 1.0];
    pub const ROCK: [f32; 4] = [0.247, 0.247, 0.275, 1.0];
    pub const CRATE: [f32; 4] = [0.573, 0.251, 0.055, 1.0];

    pub const WAND: [f32; 4] = GEM_BLUE;
    pub const AXE: [f32; 4] = ENEMY_TANK;
    pub const AURA: [f32; 4] = [1.0, 0.784, 0.392, 0.2];

    pub const DAMAGE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const CRIT: [f32; 4] = [0.984, 0.749, 0.141, 1.0];
    pub const HURT: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const OBSTACLE_HIT: [f32; 4] = [0.8, 0.8, 0.8, 1.0];
}
