//! The particle store.
//!
//! A [`ParticleField`] owns a fixed number of particles for its whole life.
//! Nothing is ever added or removed after construction; resizing the viewport
//! only moves the walls.

use crate::canvas::Canvas;
use crate::config::GravityConfig;
use crate::particle::{FrameInput, Mode, Particle};
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

pub struct ParticleField {
    particles: Vec<Particle>,
    config: GravityConfig,
    rng: SmallRng,
    viewport: Vec2,
    mode: Mode,
}

impl ParticleField {
    /// Scatter `config.particle_count` particles uniformly over `viewport`.
    pub fn new(config: GravityConfig, viewport: Vec2) -> Self {
        let mut rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::seed_from_u64(clock_seed()),
        };

        let particles = (0..config.particle_count)
            .map(|_| {
                let position = Vec2::new(rng.gen::<f32>() * viewport.x, rng.gen::<f32>() * viewport.y);
                Particle::spawn(position, &config, &mut rng)
            })
            .collect::<Vec<_>>();

        info!(
            count = particles.len(),
            width = viewport.x,
            height = viewport.y,
            "spawned particle field"
        );

        Self {
            particles,
            config,
            rng,
            viewport,
            mode: Mode::Normal,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Mutable access to particle state. The slice length cannot change.
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn config(&self) -> &GravityConfig {
        &self.config
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Move the walls. Particles keep their positions.
    pub fn resize(&mut self, viewport: Vec2) {
        debug!(width = viewport.x, height = viewport.y, "viewport resized");
        self.viewport = viewport;
    }

    /// Switch force model.
    ///
    /// Leaving vacuum mode splashes every particle away from `pointer`.
    /// Returns `true` if a splash happened.
    pub fn set_mode(&mut self, mode: Mode, pointer: Vec2) -> bool {
        let released = self.mode == Mode::Vacuum && mode == Mode::Normal;
        if mode != self.mode {
            info!(from = ?self.mode, to = ?mode, "mode changed");
        }
        self.mode = mode;

        if released {
            for p in &mut self.particles {
                p.splash(pointer, &self.config, &mut self.rng);
            }
            debug!(count = self.particles.len(), x = pointer.x, y = pointer.y, "splash");
        }
        released
    }

    /// Advance every particle one frame against the same snapshot.
    pub fn step(&mut self, pointer: Vec2) {
        let input = FrameInput {
            pointer,
            mode: self.mode,
            viewport: self.viewport,
        };
        for p in &mut self.particles {
            p.update(&input, &self.config, &mut self.rng);
        }
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        let opacity = self.config.appearance.opacity;
        for p in &self.particles {
            p.draw(canvas, opacity);
        }
    }
}

/// Different every run, for unseeded configs.
fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(42)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::DrawList;

    const FAR: Vec2 = Vec2::new(-1000.0, -1000.0);

    fn field(count: usize) -> ParticleField {
        let config = GravityConfig::default().with_particle_count(count).with_seed(1234);
        ParticleField::new(config, Vec2::new(1280.0, 720.0))
    }

    #[test]
    fn test_spawn_inside_viewport() {
        let field = field(300);
        assert_eq!(field.len(), 300);
        for p in field.particles() {
            assert!(p.position.x >= 0.0 && p.position.x <= 1280.0);
            assert!(p.position.y >= 0.0 && p.position.y <= 720.0);
        }
    }

    #[test]
    fn test_same_seed_same_field() {
        let a = field(50);
        let b = field(50);
        assert_eq!(a.particles(), b.particles());
    }

    #[test]
    fn test_zero_sized_viewport_does_not_panic() {
        let config = GravityConfig::default().with_seed(1);
        let mut field = ParticleField::new(config, Vec2::ZERO);
        field.step(FAR);
        assert_eq!(field.len(), 300);
    }

    #[test]
    fn test_resize_keeps_particles_in_place() {
        let mut field = field(100);
        let before: Vec<Vec2> = field.particles().iter().map(|p| p.position).collect();

        field.resize(Vec2::new(200.0, 100.0));
        field.resize(Vec2::new(4000.0, 3000.0));

        let after: Vec<Vec2> = field.particles().iter().map(|p| p.position).collect();
        assert_eq!(before, after);
        assert_eq!(field.len(), 100);
        assert_eq!(field.viewport(), Vec2::new(4000.0, 3000.0));
    }

    #[test]
    fn test_splash_only_on_release() {
        let mut field = field(20);
        assert!(!field.set_mode(Mode::Normal, FAR));
        assert!(!field.set_mode(Mode::Vacuum, FAR));
        assert!(!field.set_mode(Mode::Vacuum, FAR));
        assert!(field.set_mode(Mode::Normal, Vec2::new(640.0, 360.0)));
        assert!(field.particles().iter().all(|p| p.speed() > 0.0));
    }

    #[test]
    fn test_draw_paints_every_particle() {
        let field = field(25);
        let mut list = DrawList::new(1280, 720);
        field.draw(&mut list);
        assert_eq!(list.paint_count(), 25);
    }
}
