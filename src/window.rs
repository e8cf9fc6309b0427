//! Windowed host: runs the effect full-window with winit and wgpu.
//!
//! Hold the left mouse button or Space to vacuum, release to splash, Escape
//! to quit. Redraws are only requested while the effect has a frame pending.

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use tracing::{debug, error, warn};

use crate::canvas::{Canvas, DrawList};
use crate::config::GravityConfig;
use crate::effect::CursorGravity;
use crate::error::RunError;
use crate::gpu::Renderer;
use crate::input::{Input, KeyCode, PointerUpdate};
use crate::scheduler::FrameScheduler;
use crate::time::Time;

const TITLE: &str = "Cursor Gravity";

/// Open a window and run the effect until it is closed.
pub fn run_windowed(config: GravityConfig, width: u32, height: u32) -> Result<(), RunError> {
    let effect = CursorGravity::new(config)?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(effect, width, height);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

struct App {
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    effect: CursorGravity,
    scheduler: FrameScheduler,
    canvas: DrawList,
    input: Input,
    time: Time,
    initial_size: (u32, u32),
    error: Option<RunError>,
}

impl App {
    fn new(effect: CursorGravity, width: u32, height: u32) -> Self {
        Self {
            window: None,
            renderer: None,
            effect,
            scheduler: FrameScheduler::new(),
            canvas: DrawList::new(width, height),
            input: Input::new(),
            time: Time::new(),
            initial_size: (width, height),
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: RunError) {
        error!("{}", err);
        self.error = Some(err);
        self.shutdown(event_loop);
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        self.effect.unmount(&mut self.scheduler);
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        if self.time.update() {
            debug!(fps = self.time.fps(), "frame rate");
            if let Some(window) = &self.window {
                window.set_title(&format!("{} - {:.0} FPS", TITLE, self.time.fps()));
            }
        }

        let due = self.scheduler.begin_frame();
        let painted = self
            .effect
            .frame(&due, &mut self.scheduler, &mut self.canvas, self.time.delta());

        let mut out_of_memory = false;
        if painted {
            if let Some(renderer) = &mut self.renderer {
                match renderer.render(&self.canvas) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        warn!("surface lost, reconfiguring");
                        let (w, h) = (renderer.config.width, renderer.config.height);
                        renderer.resize(w, h);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => out_of_memory = true,
                    Err(e) => error!("Render error: {:?}", e),
                }
            }
        }
        if out_of_memory {
            error!("GPU out of memory");
            self.shutdown(event_loop);
            return;
        }

        self.input.begin_frame();
        if self.scheduler.has_pending() {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let (width, height) = self.initial_size;
        let window_attrs = Window::default_attributes()
            .with_title(TITLE)
            .with_inner_size(winit::dpi::PhysicalSize::new(width, height));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => return self.fail(event_loop, e.into()),
        };

        let background = self.effect.config().appearance.background;
        let renderer = match pollster::block_on(Renderer::new(window.clone(), background)) {
            Ok(renderer) => renderer,
            Err(e) => return self.fail(event_loop, e.into()),
        };

        let size = window.inner_size();
        self.canvas.resize(size.width, size.height);
        self.effect.mount(&mut self.scheduler, &mut self.canvas);

        self.renderer = Some(renderer);
        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match &event {
            WindowEvent::CloseRequested => {
                self.shutdown(event_loop);
                return;
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(physical_size.width, physical_size.height);
                }
                self.effect
                    .resize(&mut self.canvas, physical_size.width, physical_size.height);
                return;
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
                return;
            }
            _ => {}
        }

        match self.input.handle_event(&event) {
            Some(PointerUpdate::Moved(position)) => self.effect.pointer_moved(position),
            Some(PointerUpdate::Touches(points)) => self.effect.touch_moved(&points),
            None => {}
        }

        if self.input.key_pressed(KeyCode::Escape) {
            self.shutdown(event_loop);
            return;
        }

        self.effect.set_vacuum(self.input.vacuum_held());
    }
}
