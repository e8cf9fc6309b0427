//! The mounted effect: particle field, pointer state, vacuum signal and frame
//! chain wired together.
//!
//! Lifecycle:
//!
//! 1. [`CursorGravity::mount`] creates the particles (first mount only),
//!    starts listening for pointer and resize input, and requests a frame.
//! 2. Each display refresh the host passes the due frames to
//!    [`CursorGravity::frame`]. The effect clears the canvas, steps and draws
//!    every particle, then requests the following frame.
//! 3. [`CursorGravity::unmount`] stops listening and cancels the pending
//!    frame, so nothing is painted afterwards.

use crate::canvas::Canvas;
use crate::config::GravityConfig;
use crate::cursor::CursorRing;
use crate::error::ConfigError;
use crate::field::ParticleField;
use crate::particle::Mode;
use crate::scheduler::{DueFrames, FrameRequest, FrameScheduler};
use glam::Vec2;
use tracing::{debug, info};

/// Pointer position before any pointer event arrives: far off screen.
pub const POINTER_PARKED: Vec2 = Vec2::new(-1000.0, -1000.0);

pub struct CursorGravity {
    config: GravityConfig,
    field: Option<ParticleField>,
    ring: CursorRing,
    pointer: Vec2,
    /// Set by the first pointer event; the cursor overlay waits for it.
    pointer_seen: bool,
    vacuum: bool,
    listening: bool,
    pending: Option<FrameRequest>,
}

impl CursorGravity {
    /// Create an unmounted effect. Fails if `config` does not validate.
    pub fn new(config: GravityConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let ring = CursorRing::new(config.appearance.cursor_ring.clone());
        Ok(Self {
            config,
            field: None,
            ring,
            pointer: POINTER_PARKED,
            pointer_seen: false,
            vacuum: false,
            listening: false,
            pending: None,
        })
    }

    pub fn config(&self) -> &GravityConfig {
        &self.config
    }

    /// The particle store, once the effect has been mounted.
    pub fn field(&self) -> Option<&ParticleField> {
        self.field.as_ref()
    }

    pub fn field_mut(&mut self) -> Option<&mut ParticleField> {
        self.field.as_mut()
    }

    pub fn ring(&self) -> &CursorRing {
        &self.ring
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn is_vacuum_active(&self) -> bool {
        self.vacuum
    }

    pub fn is_mounted(&self) -> bool {
        self.listening
    }

    /// Start the effect on `canvas`.
    ///
    /// Particles are created on the first mount only, in the mode the vacuum
    /// signal currently asks for. Mounting an already mounted effect does
    /// nothing.
    pub fn mount(&mut self, scheduler: &mut FrameScheduler, canvas: &mut dyn Canvas) {
        if self.listening {
            return;
        }
        if self.field.is_none() {
            self.field = Some(ParticleField::new(self.config.clone(), canvas.size()));
        }
        if let Some(field) = &mut self.field {
            field.resize(canvas.size());
            field.set_mode(Mode::from_vacuum(self.vacuum), self.pointer);
        }
        self.listening = true;
        self.pending = Some(scheduler.request_frame());
        info!(particles = self.config.particle_count, "cursor gravity mounted");
    }

    /// Stop listening for input and cancel the pending frame.
    pub fn unmount(&mut self, scheduler: &mut FrameScheduler) {
        if let Some(request) = self.pending.take() {
            scheduler.cancel_frame(request);
        }
        if self.listening {
            info!("cursor gravity unmounted");
        }
        self.listening = false;
    }

    /// Pointer moved to `position`. Last write per frame wins.
    pub fn pointer_moved(&mut self, position: Vec2) {
        if self.listening {
            self.pointer = position;
            self.pointer_seen = true;
        }
    }

    /// Touch moved; the first touch point drives the pointer.
    pub fn touch_moved(&mut self, touches: &[Vec2]) {
        if let Some(first) = touches.first() {
            self.pointer_moved(*first);
        }
    }

    /// Viewport changed size. Particles are neither rescaled nor clamped.
    pub fn resize(&mut self, canvas: &mut dyn Canvas, width: u32, height: u32) {
        if !self.listening {
            return;
        }
        canvas.resize(width, height);
        if let Some(field) = &mut self.field {
            field.resize(Vec2::new(width as f32, height as f32));
        }
    }

    /// External vacuum signal.
    ///
    /// Turning it off splashes the particles away from the last pointer
    /// position immediately, before the next frame.
    pub fn set_vacuum(&mut self, active: bool) {
        if active == self.vacuum {
            return;
        }
        self.vacuum = active;
        if let Some(field) = &mut self.field {
            field.set_mode(Mode::from_vacuum(active), self.pointer);
        }
    }

    /// Run one frame if ours is due. Returns whether anything was painted.
    ///
    /// `dt` is the wall-clock frame delta in seconds; only the cursor ring
    /// uses it.
    pub fn frame(
        &mut self,
        due: &DueFrames,
        scheduler: &mut FrameScheduler,
        canvas: &mut dyn Canvas,
        dt: f32,
    ) -> bool {
        match self.pending {
            Some(request) if due.contains(request) => {}
            _ => return false,
        }
        self.pending = None;

        let Some(field) = &mut self.field else {
            return false;
        };

        // Pointer and mode are read once, every particle sees the same values
        let pointer = self.pointer;
        canvas.clear();
        field.step(pointer);
        field.draw(canvas);

        if self.pointer_seen {
            self.ring.update(pointer, self.vacuum, dt);
            self.ring.draw(canvas, pointer);
        }

        self.pending = Some(scheduler.request_frame());
        debug!(target: "cursor_gravity::frame", frame = scheduler.frame_count(), "frame drawn");
        true
    }
}
