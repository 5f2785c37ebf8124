//! projview - orthographic vs perspective projection demo
//!
//! Usage:
//!   cargo run --release -- [--config <file.json>] [--shaders <dir>] [--texture <path>] [--windowed]
//!
//! Closing the window quits.

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use projview::core::{logging, time::FrameTimer, DemoConfig, Error};
use projview::render::{
    context::GpuContext,
    window::{is_minimized, WindowConfig},
    DemoRenderer,
};

struct App {
    config: DemoConfig,
    window: Option<Arc<Window>>,
    gpu: Option<GpuContext>,
    renderer: Option<DemoRenderer>,
    timer: FrameTimer,
    /// Set while the window has a zero-sized client area
    minimized: bool,
}

impl App {
    fn new(config: DemoConfig) -> Self {
        Self {
            config,
            window: None,
            gpu: None,
            renderer: None,
            timer: FrameTimer::new(),
            minimized: false,
        }
    }

    /// Window, GPU context and all demo resources
    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), Error> {
        let window_config = WindowConfig::for_event_loop(&self.config.window, event_loop);
        log::info!(
            "Creating {}x{} window (fullscreen: {})",
            window_config.width,
            window_config.height,
            window_config.fullscreen
        );

        let window = event_loop
            .create_window(window_config.attributes())
            .map_err(|e| Error::Window(format!("Failed to create window: {}", e)))?;
        let window = Arc::new(window);
        self.window = Some(window.clone());

        let gpu = pollster::block_on(GpuContext::new(window))?;
        let renderer = DemoRenderer::new(&gpu, &self.config)?;

        self.gpu = Some(gpu);
        self.renderer = Some(renderer);
        // Animation time starts once everything is uploaded
        self.timer = FrameTimer::new();
        Ok(())
    }

    fn redraw(&mut self) {
        if self.minimized {
            return;
        }
        let Some(gpu) = self.gpu.as_mut() else { return };
        let Some(renderer) = self.renderer.as_ref() else { return };

        if self.timer.tick() {
            log::debug!("{:.1} fps", self.timer.fps());
        }

        match renderer.render(gpu, &self.config, self.timer.elapsed_secs()) {
            Ok(()) => {}
            Err(Error::SurfaceOutdated) => {
                log::debug!("Surface outdated, reconfiguring");
                let (width, height) = gpu.size();
                gpu.resize(width, height);
            }
            Err(e) => log::warn!("Skipping frame: {}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.init(event_loop) {
            log::error!("{}", e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                self.minimized = is_minimized(size);
                if self.minimized {
                    return;
                }
                if let (Some(gpu), Some(renderer)) = (self.gpu.as_mut(), self.renderer.as_mut()) {
                    gpu.resize(size.width, size.height);
                    renderer.resize(&gpu.device, size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        // Keep rendering continuously
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        // Drop GPU resources before the surface's window goes away
        self.renderer = None;
        self.gpu = None;
        log::info!("Rendered {} frames", self.timer.frame_count());
    }
}

fn main() {
    logging::init();
    log::info!("projview starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match DemoConfig::from_args(&args) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(2);
        }
    };

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("Failed to create event loop: {}", e);
            std::process::exit(1);
        }
    };
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {}", e);
        std::process::exit(1);
    }
}
