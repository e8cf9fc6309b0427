//! # cursor-gravity
//!
//! A cursor-reactive particle background. A few hundred particles rest at
//! random home positions, get pushed away by the pointer, spring back home,
//! and can be vacuumed toward the pointer by an external signal. Releasing
//! the vacuum splashes them back out.
//!
//! ## Quick Start
//!
//! ```ignore
//! use cursor_gravity::prelude::*;
//!
//! let mut effect = CursorGravity::new(GravityConfig::default())?;
//! let mut scheduler = FrameScheduler::new();
//! let mut canvas = DrawList::new(1280, 720);
//!
//! effect.mount(&mut scheduler, &mut canvas);
//! effect.pointer_moved(Vec2::new(640.0, 360.0));
//!
//! // Once per display refresh:
//! let due = scheduler.begin_frame();
//! effect.frame(&due, &mut scheduler, &mut canvas, 1.0 / 60.0);
//!
//! // Parent controller toggles the vacuum:
//! effect.set_vacuum(true);
//! ```
//!
//! ## Modes
//!
//! | Mode | Forces | Speed limit | Walls |
//! |------|--------|-------------|-------|
//! | [`Mode::Normal`] | home spring, pointer repulsion, 0.90 damping | 15 | bounce |
//! | [`Mode::Vacuum`] | pull toward pointer, 0.95 damping | 4 | none |
//!
//! Every constant lives in [`GravityConfig`] and can be loaded from TOML.

pub mod canvas;
pub mod config;
pub mod cursor;
pub mod effect;
pub mod error;
pub mod field;
mod gpu;
pub mod headless;
pub mod input;
pub mod particle;
pub mod scheduler;
pub mod time;
pub mod visuals;
pub mod window;

pub use canvas::{Canvas, DrawCommand, DrawList, RasterCanvas};
pub use config::GravityConfig;
pub use effect::CursorGravity;
pub use error::{ConfigError, GpuError, RunError};
pub use field::ParticleField;
pub use glam::Vec2;
pub use particle::{FrameInput, Mode, Particle};
pub use scheduler::{DueFrames, FrameRequest, FrameScheduler};
pub use visuals::{Color, Palette};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use cursor_gravity::prelude::*;
/// ```
pub mod prelude {
    pub use crate::canvas::{Canvas, DrawList, RasterCanvas};
    pub use crate::config::{GravityConfig, ValueRange};
    pub use crate::effect::CursorGravity;
    pub use crate::field::ParticleField;
    pub use crate::particle::{FrameInput, Mode, Particle};
    pub use crate::scheduler::FrameScheduler;
    pub use crate::time::Time;
    pub use crate::visuals::{Color, Palette};
    pub use crate::Vec2;
}
