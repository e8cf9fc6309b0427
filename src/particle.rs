//! A single particle and its per-frame force model.
//!
//! Particles never interact with each other. Each frame a particle reads one
//! shared [`FrameInput`] snapshot (pointer, mode, viewport) and updates its own
//! velocity and position from it.

use crate::canvas::Canvas;
use crate::config::GravityConfig;
use crate::visuals::Color;
use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

/// Which force model particles follow this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Spring back home, pushed away by the pointer, bounce off walls.
    #[default]
    Normal,
    /// Everything drifts toward the pointer.
    Vacuum,
}

impl Mode {
    pub fn from_vacuum(active: bool) -> Self {
        if active {
            Mode::Vacuum
        } else {
            Mode::Normal
        }
    }

    pub fn is_vacuum(self) -> bool {
        self == Mode::Vacuum
    }
}

/// Shared state every particle observes during one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    pub pointer: Vec2,
    pub mode: Mode,
    /// Viewport size; walls sit at `0` and at these extents.
    pub viewport: Vec2,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Current display radius, always within `0..=original_radius`.
    pub radius: f32,
    pub original_radius: f32,
    /// Rest position the home spring pulls toward.
    pub home: Vec2,
    pub friction: f32,
    pub spring_factor: f32,
    pub color: Color,
}

impl Particle {
    /// Create a particle at rest at `position`, drawing its constants from `config`.
    pub fn spawn<R: Rng + ?Sized>(position: Vec2, config: &GravityConfig, rng: &mut R) -> Self {
        let physics = &config.physics;
        let original_radius = physics.radius_range.sample(rng);
        Self {
            position,
            velocity: Vec2::ZERO,
            radius: original_radius,
            original_radius,
            home: position,
            friction: physics.friction_range.sample(rng),
            spring_factor: physics.spring_range.sample(rng),
            color: config.appearance.palette.pick(rng),
        }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Advance one frame.
    pub fn update<R: Rng + ?Sized>(&mut self, input: &FrameInput, config: &GravityConfig, rng: &mut R) {
        let to_pointer = input.pointer - self.position;
        let dist = to_pointer.length();

        let ceiling = match input.mode {
            Mode::Normal => {
                let physics = &config.physics;

                if self.radius < self.original_radius {
                    self.radius = (self.radius + physics.radius_recovery).min(self.original_radius);
                }
                self.radius = self.radius.clamp(0.0, self.original_radius);

                self.velocity += (self.home - self.position) * self.spring_factor;

                if dist < physics.cursor_radius {
                    let falloff = (physics.cursor_radius - dist) / physics.cursor_radius;
                    let away = direction_or_random(-to_pointer, rng);
                    self.velocity += away * falloff * physics.repulsion_strength;
                }

                let damping = if physics.per_particle_friction {
                    self.friction
                } else {
                    physics.friction
                };
                self.velocity *= damping;

                physics.max_velocity
            }
            Mode::Vacuum => {
                let vacuum = &config.vacuum;
                let toward = direction_or_random(to_pointer, rng);

                self.velocity += toward * vacuum.attraction;
                self.velocity *= vacuum.friction;

                if dist < vacuum.caught_radius {
                    self.velocity *= vacuum.caught_damping;
                    // Keeps caught particles from collapsing onto one point
                    if dist < vacuum.separation_radius {
                        self.velocity -= toward * vacuum.separation_push;
                    }
                }

                vacuum.max_velocity
            }
        };

        self.velocity = self.velocity.clamp_length_max(ceiling);
        self.position += self.velocity;

        if input.mode == Mode::Normal {
            self.bounce(input.viewport);
        }
    }

    /// Reflect the velocity component that carries the particle further past a wall.
    fn bounce(&mut self, viewport: Vec2) {
        if (self.position.x < 0.0 && self.velocity.x < 0.0)
            || (self.position.x > viewport.x && self.velocity.x > 0.0)
        {
            self.velocity.x = -self.velocity.x;
        }
        if (self.position.y < 0.0 && self.velocity.y < 0.0)
            || (self.position.y > viewport.y && self.velocity.y > 0.0)
        {
            self.velocity.y = -self.velocity.y;
        }
    }

    /// Release impulse applied when the vacuum switches off.
    ///
    /// Restores the rest radius and returns the impulse that was added.
    pub fn splash<R: Rng + ?Sized>(&mut self, pointer: Vec2, config: &GravityConfig, rng: &mut R) -> Vec2 {
        let splash = &config.splash;
        self.radius = self.original_radius;

        let away = self.position - pointer;
        let force = splash.force.sample(rng);
        let impulse = if away.length() < splash.near_radius {
            random_direction(rng) * force * splash.near_multiplier
        } else {
            direction_or_random(away, rng) * force
        };

        self.velocity += impulse;
        impulse
    }

    pub fn draw(&self, canvas: &mut dyn Canvas, opacity: f32) {
        if self.radius <= 0.0 {
            return;
        }
        canvas.fill_circle(self.position, self.radius, self.color.with_opacity(opacity));
    }
}

/// Unit vector along `v`, or a random unit vector when `v` has no direction.
pub(crate) fn direction_or_random<R: Rng + ?Sized>(v: Vec2, rng: &mut R) -> Vec2 {
    v.try_normalize().unwrap_or_else(|| random_direction(rng))
}

fn random_direction<R: Rng + ?Sized>(rng: &mut R) -> Vec2 {
    Vec2::from_angle(rng.gen_range(0.0..TAU))
}
