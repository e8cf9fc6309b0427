//! End-to-end behavior of the effect across many frames.
//!
//! These tests drive the public API the way a host does: mount, feed pointer
//! and vacuum input, run frames through the scheduler, and inspect the
//! particle store and the painted output.

use cursor_gravity::prelude::*;
use cursor_gravity::DrawCommand;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

const VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);
const FAR: Vec2 = Vec2::new(-1000.0, -1000.0);

fn seeded(count: usize, seed: u64) -> GravityConfig {
    let mut config = GravityConfig::default().with_particle_count(count).with_seed(seed);
    config.appearance.cursor_ring.enabled = false;
    config
}

struct Harness {
    effect: CursorGravity,
    scheduler: FrameScheduler,
    canvas: DrawList,
}

impl Harness {
    fn new(config: GravityConfig) -> Self {
        let mut effect = CursorGravity::new(config).unwrap();
        let mut scheduler = FrameScheduler::new();
        let mut canvas = DrawList::new(VIEWPORT.x as u32, VIEWPORT.y as u32);
        effect.mount(&mut scheduler, &mut canvas);
        Self {
            effect,
            scheduler,
            canvas,
        }
    }

    fn frame(&mut self) -> bool {
        let due = self.scheduler.begin_frame();
        self.effect
            .frame(&due, &mut self.scheduler, &mut self.canvas, 1.0 / 60.0)
    }

    fn particles(&self) -> &[Particle] {
        self.effect.field().unwrap().particles()
    }
}

fn ceiling(config: &GravityConfig, mode: Mode) -> f32 {
    match mode {
        Mode::Normal => config.physics.max_velocity,
        Mode::Vacuum => config.vacuum.max_velocity,
    }
}

// ============================================================================
// Invariants under random input
// ============================================================================

#[test]
fn test_radius_and_speed_bounds_hold_every_frame() {
    let config = seeded(300, 1);
    let mut h = Harness::new(config.clone());
    let mut rng = SmallRng::seed_from_u64(99);

    for frame in 0..600 {
        // Wander the pointer and flip the vacuum now and then
        if frame % 7 == 0 {
            h.effect.pointer_moved(Vec2::new(
                rng.gen_range(-100.0..VIEWPORT.x + 100.0),
                rng.gen_range(-100.0..VIEWPORT.y + 100.0),
            ));
        }
        if frame % 90 == 0 {
            let active = h.effect.is_vacuum_active();
            h.effect.set_vacuum(!active);
        }

        assert!(h.frame());

        let mode = h.effect.field().unwrap().mode();
        let limit = ceiling(&config, mode) + 1e-3;
        for p in h.particles() {
            assert!(p.radius >= 0.0 && p.radius <= p.original_radius, "radius out of range: {:?}", p);
            assert!(p.speed() <= limit, "speed {} above {} in {:?}", p.speed(), limit, mode);
            assert!(p.position.is_finite());
        }
    }
}

#[test]
fn test_particle_count_is_fixed() {
    let mut h = Harness::new(seeded(300, 2));
    let sizes = [(10, 10), (1920, 1080), (1, 2000), (800, 600)];

    for (i, (w, hgt)) in sizes.iter().cycle().take(40).enumerate() {
        h.effect.resize(&mut h.canvas, *w, *hgt);
        h.effect.set_vacuum(i % 3 == 0);
        h.frame();
        assert_eq!(h.particles().len(), 300);
    }
}

// ============================================================================
// Normal mode
// ============================================================================

#[test]
fn test_displaced_particle_springs_home() {
    let mut h = Harness::new(seeded(1, 3));
    {
        let p = &mut h.effect.field_mut().unwrap().particles_mut()[0];
        p.home = Vec2::new(640.0, 360.0);
        p.position = Vec2::new(840.0, 260.0);
        p.velocity = Vec2::ZERO;
    }

    let start = 223.6;
    let mut checkpoints = Vec::new();
    for frame in 0..600 {
        h.frame();
        if frame % 100 == 99 {
            let p = &h.particles()[0];
            checkpoints.push(p.position.distance(p.home));
        }
    }

    assert!(checkpoints[0] < start);
    assert!(checkpoints.windows(2).all(|w| w[1] <= w[0] + 0.5));
    assert!(*checkpoints.last().unwrap() < 0.5, "did not settle: {:?}", checkpoints);
}

#[test]
fn test_pointer_repels_in_normal_mode() {
    let mut h = Harness::new(seeded(1, 4));
    {
        let p = &mut h.effect.field_mut().unwrap().particles_mut()[0];
        p.home = Vec2::new(500.0, 500.0);
        p.position = Vec2::new(500.0, 500.0);
        p.velocity = Vec2::ZERO;
    }
    h.effect.pointer_moved(Vec2::new(500.0, 600.0));
    h.frame();

    let p = &h.particles()[0];
    assert!(p.velocity.y < 0.0);
    assert!(p.velocity.x.abs() < 1e-5);
    assert!(p.position.y < 500.0);
}

// ============================================================================
// Vacuum mode
// ============================================================================

#[test]
fn test_vacuum_first_frame_heads_for_pointer() {
    let mut h = Harness::new(seeded(1, 5));
    {
        let p = &mut h.effect.field_mut().unwrap().particles_mut()[0];
        p.position = Vec2::ZERO;
        p.velocity = Vec2::ZERO;
    }
    let pointer = Vec2::new(1000.0, 1000.0);
    h.effect.pointer_moved(pointer);
    h.effect.set_vacuum(true);
    h.frame();

    let p = &h.particles()[0];
    let before = Vec2::ZERO;
    assert!(p.velocity.dot((pointer - before).normalize()) > 0.0);
    assert!(p.speed() <= 4.0);
}

#[test]
fn test_vacuum_closes_distance_over_time() {
    let config = seeded(100, 6);
    let mut h = Harness::new(config);
    let pointer = Vec2::new(640.0, 360.0);
    h.effect.pointer_moved(pointer);
    h.effect.set_vacuum(true);

    let mean_distance = |ps: &[Particle]| {
        ps.iter().map(|p| p.position.distance(pointer)).sum::<f32>() / ps.len() as f32
    };

    let mut previous = mean_distance(h.particles());
    for _ in 0..10 {
        for _ in 0..30 {
            h.frame();
        }
        let now = mean_distance(h.particles());
        if previous > 40.0 {
            assert!(now < previous, "mean distance grew from {} to {}", previous, now);
        }
        previous = now;
    }
    assert!(previous < 150.0);
}

#[test]
fn test_vacuum_does_not_bounce_off_walls() {
    let mut h = Harness::new(seeded(1, 7));
    {
        let p = &mut h.effect.field_mut().unwrap().particles_mut()[0];
        p.position = Vec2::new(5.0, 360.0);
        p.velocity = Vec2::ZERO;
    }
    h.effect.pointer_moved(Vec2::new(-600.0, 360.0));
    h.effect.set_vacuum(true);
    for _ in 0..60 {
        h.frame();
    }
    assert!(h.particles()[0].position.x < 0.0);
}

// ============================================================================
// Release splash
// ============================================================================

#[test]
fn test_release_gives_every_particle_an_impulse() {
    let mut h = Harness::new(seeded(300, 8));
    let pointer = Vec2::new(640.0, 360.0);
    h.effect.pointer_moved(pointer);
    h.effect.set_vacuum(true);
    for _ in 0..200 {
        h.frame();
    }

    let before: Vec<Vec2> = h.particles().iter().map(|p| p.velocity).collect();
    h.effect.set_vacuum(false);

    for (p, v) in h.particles().iter().zip(before) {
        assert_eq!(p.radius, p.original_radius);
        let impulse = p.velocity - v;
        assert!(impulse.length() >= 10.0 - 1e-3, "weak splash {:?}", impulse);
    }
}

#[test]
fn test_after_release_particles_return_home() {
    let mut h = Harness::new(seeded(50, 9));
    h.effect.pointer_moved(Vec2::new(640.0, 360.0));
    h.effect.set_vacuum(true);
    for _ in 0..120 {
        h.frame();
    }
    h.effect.set_vacuum(false);
    h.effect.pointer_moved(FAR);
    for _ in 0..900 {
        h.frame();
    }

    for p in h.particles() {
        assert!(p.position.distance(p.home) < 2.0, "{:?} far from home", p.position);
    }
}

// ============================================================================
// Scheduling and teardown
// ============================================================================

#[test]
fn test_each_frame_clears_then_paints_all() {
    let mut h = Harness::new(seeded(40, 10));
    for _ in 0..5 {
        assert!(h.frame());
        assert_eq!(h.canvas.commands()[0], DrawCommand::Clear);
        assert_eq!(h.canvas.commands().len(), 41);
    }
    assert_eq!(h.canvas.clear_count(), 5);
}

#[test]
fn test_no_paint_after_unmount() {
    let mut h = Harness::new(seeded(40, 11));
    for _ in 0..3 {
        h.frame();
    }
    h.effect.unmount(&mut h.scheduler);
    let clears = h.canvas.clear_count();
    let paints = h.canvas.paint_count();

    // Input after teardown goes nowhere
    h.effect.pointer_moved(Vec2::new(1.0, 1.0));
    h.effect.resize(&mut h.canvas, 10, 10);
    for _ in 0..30 {
        assert!(!h.frame());
    }

    assert_eq!(h.canvas.clear_count(), clears);
    assert_eq!(h.canvas.paint_count(), paints);
    assert_eq!(h.canvas.size(), VIEWPORT);
    assert_ne!(h.effect.pointer(), Vec2::new(1.0, 1.0));
}

#[test]
fn test_foreign_request_does_not_drive_effect() {
    let mut h = Harness::new(seeded(5, 12));
    h.frame();
    h.effect.unmount(&mut h.scheduler);

    // Someone else keeps the scheduler busy
    h.scheduler.request_frame();
    assert!(!h.frame());
}

#[test]
fn test_ring_drawn_when_enabled() {
    let config = GravityConfig::default().with_particle_count(10).with_seed(13);
    let mut h = Harness::new(config);
    h.effect.pointer_moved(Vec2::new(100.0, 100.0));
    h.frame();
    // clear + 10 particles + dot + ring
    assert_eq!(h.canvas.commands().len(), 13);
}

#[test]
fn test_sample_config_matches_defaults() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/cursor-gravity.toml");
    let config = GravityConfig::load(path).unwrap();
    let defaults = GravityConfig::default();

    assert_eq!(config.particle_count, defaults.particle_count);
    assert_eq!(config.physics, defaults.physics);
    assert_eq!(config.vacuum, defaults.vacuum);
    assert_eq!(config.splash, defaults.splash);
    assert_eq!(config.appearance.palette.colors().len(), 6);
    assert_eq!(config.appearance.cursor_ring.size, 24.0);
}
