//! Headless host: runs the effect for a fixed number of frames on a CPU
//! canvas and hands back the last frame.

use std::ops::Range;

use glam::Vec2;
use tracing::info;

use crate::canvas::RasterCanvas;
use crate::config::GravityConfig;
use crate::effect::CursorGravity;
use crate::error::RunError;
use crate::scheduler::FrameScheduler;
use crate::time::Time;

/// A scripted headless run.
#[derive(Debug, Clone)]
pub struct HeadlessRun {
    pub frames: u32,
    pub width: u32,
    pub height: u32,
    /// Pointer position for the whole run. Defaults to the canvas center.
    pub pointer: Option<Vec2>,
    /// Frames during which the vacuum is held.
    pub vacuum: Option<Range<u32>>,
}

impl HeadlessRun {
    pub fn new(frames: u32, width: u32, height: u32) -> Self {
        Self {
            frames,
            width,
            height,
            pointer: None,
            vacuum: None,
        }
    }
}

/// Run `run.frames` frames at a fixed 60 Hz step and return the canvas.
pub fn render_headless(config: GravityConfig, run: &HeadlessRun) -> Result<RasterCanvas, RunError> {
    let background = config.appearance.background;
    let mut effect = CursorGravity::new(config)?;
    let mut scheduler = FrameScheduler::new();
    let mut canvas = RasterCanvas::new(run.width, run.height, background);
    let mut time = Time::fixed(1.0 / 60.0);

    effect.mount(&mut scheduler, &mut canvas);
    let pointer = run
        .pointer
        .unwrap_or_else(|| Vec2::new(run.width as f32, run.height as f32) * 0.5);
    effect.pointer_moved(pointer);

    let mut painted = 0;
    for frame in 0..run.frames {
        let vacuum = run.vacuum.as_ref().is_some_and(|r| r.contains(&frame));
        effect.set_vacuum(vacuum);

        time.update();
        let due = scheduler.begin_frame();
        if effect.frame(&due, &mut scheduler, &mut canvas, time.delta()) {
            painted += 1;
        }
    }
    effect.unmount(&mut scheduler);

    info!(frames = painted, "headless run finished");
    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_headless_paints_particles() {
        let config = GravityConfig::default().with_seed(5).with_particle_count(200);
        let canvas = render_headless(config, &HeadlessRun::new(3, 160, 120)).unwrap();

        let background = Rgba(GravityConfig::default().appearance.background.to_rgba8());
        assert!(canvas.image().pixels().any(|p| *p != background));
    }

    #[test]
    fn test_headless_rejects_bad_config() {
        let mut config = GravityConfig::default();
        config.vacuum.max_velocity = 0.0;
        assert!(matches!(
            render_headless(config, &HeadlessRun::new(1, 10, 10)),
            Err(RunError::Config(_))
        ));
    }

    #[test]
    fn test_headless_zero_frames_is_background_only() {
        let config = GravityConfig::default().with_seed(5);
        let canvas = render_headless(config, &HeadlessRun::new(0, 32, 32)).unwrap();
        let background = Rgba(GravityConfig::default().appearance.background.to_rgba8());
        assert!(canvas.image().pixels().all(|p| *p == background));
    }
}
