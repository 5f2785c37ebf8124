//! Window setup using winit

use winit::{
    dpi::PhysicalSize,
    event_loop::ActiveEventLoop,
    window::{Fullscreen, WindowAttributes},
};

use crate::core::config::WindowSettings;

/// Window configuration resolved against the desktop
#[derive(Clone, Debug)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub fullscreen: bool,
    pub resizable: bool,
}

impl WindowConfig {
    /// Size the window from the desktop display mode.
    ///
    /// Fullscreen windows take the desktop resolution; if it is unknown the
    /// fallback size from the settings is used instead.
    pub fn resolve(settings: &WindowSettings, desktop: Option<PhysicalSize<u32>>) -> Self {
        let fallback = PhysicalSize::new(settings.fallback_width, settings.fallback_height);
        let size = if settings.fullscreen {
            match desktop.filter(|s| s.width > 0 && s.height > 0) {
                Some(size) => size,
                None => {
                    log::error!("Could not get display mode, using {}x{}", fallback.width, fallback.height);
                    fallback
                }
            }
        } else {
            fallback
        };

        Self {
            title: settings.title.clone(),
            width: size.width,
            height: size.height,
            fullscreen: settings.fullscreen,
            resizable: settings.resizable,
        }
    }

    /// Query the primary monitor and resolve the window size
    pub fn for_event_loop(settings: &WindowSettings, event_loop: &ActiveEventLoop) -> Self {
        let desktop = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next())
            .map(|monitor| monitor.size());
        Self::resolve(settings, desktop)
    }

    pub fn attributes(&self) -> WindowAttributes {
        let attributes = WindowAttributes::default()
            .with_title(self.title.clone())
            .with_inner_size(PhysicalSize::new(self.width, self.height))
            .with_resizable(self.resizable);

        if self.fullscreen {
            attributes.with_fullscreen(Some(Fullscreen::Borderless(None)))
        } else {
            attributes
        }
    }
}

/// A zero-sized client area has no surface to draw into
pub fn is_minimized(size: PhysicalSize<u32>) -> bool {
    size.width == 0 || size.height == 0
}
