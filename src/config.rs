//! Configuration for the cursor gravity effect.
//!
//! Every constant the force model uses is a named, defaulted field here so it
//! can be tuned from a TOML file or overridden in tests. Missing keys fall
//! back to the defaults, so a config file only needs the values it changes:
//!
//! ```toml
//! particle_count = 500
//! seed = 42
//!
//! [physics]
//! cursor_radius = 200.0
//!
//! [vacuum]
//! max_velocity = 3.0
//! ```

use crate::error::ConfigError;
use crate::visuals::{Color, Palette};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Half-open range `[min, max)` used for per-particle randomized constants.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct ValueRange {
    pub min: f32,
    pub max: f32,
}

impl ValueRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Sample uniformly. A zero-width range always returns `min`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        if self.max <= self.min {
            self.min
        } else {
            rng.gen_range(self.min..self.max)
        }
    }

    pub fn contains(&self, value: f32) -> bool {
        if self.max <= self.min {
            value == self.min
        } else {
            value >= self.min && value < self.max
        }
    }
}

/// Normal-mode forces and the per-particle constants drawn at creation.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Distance within which the pointer pushes particles away.
    pub cursor_radius: f32,
    /// Repulsion applied at zero distance, falling off linearly to the radius.
    pub repulsion_strength: f32,
    /// Speed ceiling in normal mode.
    pub max_velocity: f32,
    /// Velocity multiplier applied every normal-mode frame.
    pub friction: f32,
    /// Use each particle's own `friction` instead of `friction` above.
    pub per_particle_friction: bool,
    /// Range of the home spring constant.
    pub spring_range: ValueRange,
    /// Range of the per-particle friction constant.
    pub friction_range: ValueRange,
    /// Range of the rest radius.
    pub radius_range: ValueRange,
    /// Radius regained per frame while below the rest radius.
    pub radius_recovery: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            cursor_radius: 150.0,
            repulsion_strength: 2.0,
            max_velocity: 15.0,
            friction: 0.90,
            per_particle_friction: false,
            spring_range: ValueRange::new(0.01, 0.03),
            friction_range: ValueRange::new(0.90, 0.95),
            radius_range: ValueRange::new(1.0, 3.0),
            radius_recovery: 0.1,
        }
    }
}

/// Forces used while the vacuum signal is active.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct VacuumConfig {
    /// Constant pull toward the pointer, per frame.
    pub attraction: f32,
    /// Velocity multiplier applied every vacuum frame.
    pub friction: f32,
    /// Speed ceiling while vacuuming.
    pub max_velocity: f32,
    /// Particles closer than this are "caught" and slowed further.
    pub caught_radius: f32,
    /// Extra velocity multiplier for caught particles.
    pub caught_damping: f32,
    /// Particles closer than this get pushed back out.
    pub separation_radius: f32,
    /// Size of that outward push.
    pub separation_push: f32,
}

impl Default for VacuumConfig {
    fn default() -> Self {
        Self {
            attraction: 0.1,
            friction: 0.95,
            max_velocity: 4.0,
            caught_radius: 30.0,
            caught_damping: 0.7,
            separation_radius: 10.0,
            separation_push: 2.0,
        }
    }
}

/// Impulse applied to every particle when the vacuum is released.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SplashConfig {
    /// Impulse magnitude range.
    pub force: ValueRange,
    /// Particles closer than this to the pointer scatter in a random direction.
    pub near_radius: f32,
    /// Magnitude multiplier for those near particles.
    pub near_multiplier: f32,
}

impl Default for SplashConfig {
    fn default() -> Self {
        Self {
            force: ValueRange::new(10.0, 20.0),
            near_radius: 50.0,
            near_multiplier: 3.0,
        }
    }
}

/// Trailing ring that follows the pointer.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CursorRingConfig {
    pub enabled: bool,
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
    /// Ring diameter when idle.
    pub size: f32,
    /// Ring diameter while vacuuming.
    pub vacuum_size: f32,
    /// Seconds taken to tween between diameters.
    pub resize_secs: f32,
    pub stroke_width: f32,
    pub dot_radius: f32,
    pub dot_color: Color,
    pub ring_color: Color,
    pub opacity: f32,
}

impl Default for CursorRingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            stiffness: 120.0,
            damping: 25.0,
            mass: 1.0,
            size: 24.0,
            vacuum_size: 80.0,
            resize_secs: 0.2,
            stroke_width: 2.0,
            dot_radius: 6.0,
            dot_color: Color::rgb(0x63 as f32 / 255.0, 0x66 as f32 / 255.0, 0xF1 as f32 / 255.0),
            ring_color: Color::rgb(0x81 as f32 / 255.0, 0x8C as f32 / 255.0, 0xF8 as f32 / 255.0),
            opacity: 0.6,
        }
    }
}

/// How particles look once drawn.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppearanceConfig {
    pub palette: Palette,
    pub background: Color,
    /// Global opacity applied to particle colors.
    pub opacity: f32,
    pub cursor_ring: CursorRingConfig,
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            background: Color::rgb(0.98, 0.98, 0.98),
            opacity: 0.6,
            cursor_ring: CursorRingConfig::default(),
        }
    }
}

/// Complete effect configuration.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GravityConfig {
    /// Number of particles, fixed for the lifetime of the effect.
    pub particle_count: usize,
    /// Seed for reproducible runs. `None` seeds from the clock.
    pub seed: Option<u64>,
    pub physics: PhysicsConfig,
    pub vacuum: VacuumConfig,
    pub splash: SplashConfig,
    pub appearance: AppearanceConfig,
}

impl Default for GravityConfig {
    fn default() -> Self {
        Self {
            particle_count: 300,
            seed: None,
            physics: PhysicsConfig::default(),
            vacuum: VacuumConfig::default(),
            splash: SplashConfig::default(),
            appearance: AppearanceConfig::default(),
        }
    }
}

impl GravityConfig {
    /// Load and validate a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Parse and validate TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: GravityConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_particle_count(mut self, count: usize) -> Self {
        self.particle_count = count;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check that every value keeps the force model well defined.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.physics;
        positive("physics.cursor_radius", p.cursor_radius)?;
        non_negative("physics.repulsion_strength", p.repulsion_strength)?;
        positive("physics.max_velocity", p.max_velocity)?;
        unit_interval("physics.friction", p.friction)?;
        range("physics.spring_range", p.spring_range, 0.0)?;
        range("physics.friction_range", p.friction_range, 0.0)?;
        if p.friction_range.max > 1.0 {
            return Err(invalid("physics.friction_range", "max must be at most 1"));
        }
        range("physics.radius_range", p.radius_range, f32::MIN_POSITIVE)?;
        positive("physics.radius_recovery", p.radius_recovery)?;

        let v = &self.vacuum;
        non_negative("vacuum.attraction", v.attraction)?;
        unit_interval("vacuum.friction", v.friction)?;
        positive("vacuum.max_velocity", v.max_velocity)?;
        non_negative("vacuum.caught_radius", v.caught_radius)?;
        unit_interval("vacuum.caught_damping", v.caught_damping)?;
        non_negative("vacuum.separation_radius", v.separation_radius)?;
        non_negative("vacuum.separation_push", v.separation_push)?;

        let s = &self.splash;
        range("splash.force", s.force, f32::MIN_POSITIVE)?;
        non_negative("splash.near_radius", s.near_radius)?;
        positive("splash.near_multiplier", s.near_multiplier)?;

        let a = &self.appearance;
        if a.palette.is_empty() {
            return Err(invalid("appearance.palette", "needs at least one color"));
        }
        unit_interval("appearance.opacity", a.opacity)?;

        let r = &a.cursor_ring;
        positive("appearance.cursor_ring.stiffness", r.stiffness)?;
        non_negative("appearance.cursor_ring.damping", r.damping)?;
        positive("appearance.cursor_ring.mass", r.mass)?;
        non_negative("appearance.cursor_ring.resize_secs", r.resize_secs)?;
        non_negative("appearance.cursor_ring.size", r.size)?;
        non_negative("appearance.cursor_ring.vacuum_size", r.vacuum_size)?;
        non_negative("appearance.cursor_ring.stroke_width", r.stroke_width)?;
        non_negative("appearance.cursor_ring.dot_radius", r.dot_radius)?;
        unit_interval("appearance.cursor_ring.opacity", r.opacity)?;

        Ok(())
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, &format!("must be positive, got {}", value)))
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, &format!("must not be negative, got {}", value)))
    }
}

fn unit_interval(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(invalid(field, &format!("must be in (0, 1], got {}", value)))
    }
}

fn range(field: &'static str, r: ValueRange, floor: f32) -> Result<(), ConfigError> {
    if !(r.min.is_finite() && r.max.is_finite()) || r.min < floor {
        return Err(invalid(field, &format!("min must be at least {}, got {}", floor, r.min)));
    }
    if r.max < r.min {
        return Err(invalid(field, &format!("max {} is below min {}", r.max, r.min)));
    }
    Ok(())
}
