//! Cursor overlay: a dot pinned to the pointer and a ring that trails it.
//!
//! The ring follows the pointer on a damped spring integrated in seconds, and
//! tweens its diameter when the vacuum turns on or off.

use crate::canvas::Canvas;
use crate::config::CursorRingConfig;
use glam::Vec2;

/// Spring substep, small enough to keep stiff springs stable.
const SUBSTEP: f32 = 1.0 / 240.0;
/// Longest frame gap integrated; longer stalls are treated as this.
const MAX_DELTA: f32 = 0.1;

#[derive(Debug, Clone)]
pub struct CursorRing {
    config: CursorRingConfig,
    position: Vec2,
    velocity: Vec2,
    placed: bool,
    diameter: f32,
    tween_from: f32,
    tween_to: f32,
    tween_elapsed: f32,
}

impl CursorRing {
    pub fn new(config: CursorRingConfig) -> Self {
        let size = config.size;
        Self {
            config,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            placed: false,
            diameter: size,
            tween_from: size,
            tween_to: size,
            tween_elapsed: 0.0,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn diameter(&self) -> f32 {
        self.diameter
    }

    fn target_diameter(&self, vacuum: bool) -> f32 {
        if vacuum {
            self.config.vacuum_size
        } else {
            self.config.size
        }
    }

    /// Advance the spring and the size tween by `dt` seconds.
    pub fn update(&mut self, pointer: Vec2, vacuum: bool, dt: f32) {
        if !self.placed {
            // First sighting of the pointer, skip the fly-in
            self.position = pointer;
            self.placed = true;
        }

        let mut remaining = dt.clamp(0.0, MAX_DELTA);
        while remaining > 0.0 {
            let h = remaining.min(SUBSTEP);
            let spring = (pointer - self.position) * self.config.stiffness;
            let damping = self.velocity * self.config.damping;
            let accel = (spring - damping) / self.config.mass;
            self.velocity += accel * h;
            self.position += self.velocity * h;
            remaining -= h;
        }

        let target = self.target_diameter(vacuum);
        if target != self.tween_to {
            self.tween_from = self.diameter;
            self.tween_to = target;
            self.tween_elapsed = 0.0;
        }
        self.tween_elapsed += dt.max(0.0);
        let t = if self.config.resize_secs > 0.0 {
            (self.tween_elapsed / self.config.resize_secs).min(1.0)
        } else {
            1.0
        };
        self.diameter = self.tween_from + (self.tween_to - self.tween_from) * t;
    }

    pub fn draw(&self, canvas: &mut dyn Canvas, pointer: Vec2) {
        if !self.config.enabled || !self.placed {
            return;
        }
        let opacity = self.config.opacity;
        canvas.fill_circle(pointer, self.config.dot_radius, self.config.dot_color.with_opacity(opacity));
        canvas.stroke_circle(
            self.position,
            self.diameter * 0.5,
            self.config.stroke_width,
            self.config.ring_color.with_opacity(opacity),
        );
    }
}
