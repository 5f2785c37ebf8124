//! Per-frame transforms for the two quads
//!
//! The orthographic quad is placed in window pixels: the projection maps
//! `[0, width] x [0, height]` onto the screen and the model matrix blows the
//! unit quad up to window size before shrinking it. The perspective quad
//! sits at the origin, two units in front of the camera, spinning about +Y.
//!
//! Depth uses the zero-to-one clip range, so the `_rh` constructors are used
//! rather than the `_rh_gl` ones. x/y mapping is the same either way.

use glam::{Mat4, Vec3};

use crate::core::config::{DemoConfig, OrthoSettings, PerspectiveSettings};

/// Drawable size in pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1) as f32,
            height: height.max(1) as f32,
        }
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }
}

/// Pixel-space orthographic projection with origin at the bottom-left
pub fn ortho_projection(viewport: Viewport) -> Mat4 {
    Mat4::orthographic_rh(0.0, viewport.width, 0.0, viewport.height, -1.0, 1.0)
}

/// Model matrix for the orthographic quad.
///
/// Applied right-to-left: shrink by `scale`, stretch to the window size
/// (flattening z), then move to the window centre.
pub fn ortho_model(viewport: Viewport, scale: f32) -> Mat4 {
    Mat4::from_translation(Vec3::new(viewport.width / 2.0, viewport.height / 2.0, 0.0))
        * Mat4::from_scale(Vec3::new(viewport.width, viewport.height, 0.0))
        * Mat4::from_scale(Vec3::new(scale, scale, 1.0))
}

pub fn perspective_projection(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    Mat4::perspective_rh(fov_y_degrees.to_radians(), aspect, near, far)
}

/// View matrix: the world moved `distance` units away from the camera
pub fn perspective_view(distance: f32) -> Mat4 {
    Mat4::from_translation(Vec3::new(0.0, 0.0, -distance))
}

/// Model matrix for the spinning quad at `elapsed` seconds
pub fn perspective_model(elapsed: f32, scale: f32, degrees_per_second: f32) -> Mat4 {
    let angle = elapsed * degrees_per_second.to_radians();
    Mat4::from_scale(Vec3::new(scale, scale, 1.0)) * Mat4::from_rotation_y(angle)
}

/// Orthographic quad transforms
#[derive(Clone, Copy, Debug)]
pub struct OrthoMatrices {
    pub projection: Mat4,
    pub model: Mat4,
}

impl OrthoMatrices {
    pub fn new(settings: &OrthoSettings, viewport: Viewport) -> Self {
        Self {
            projection: ortho_projection(viewport),
            model: ortho_model(viewport, settings.scale),
        }
    }

    pub fn mvp(&self) -> Mat4 {
        self.projection * self.model
    }
}

/// Perspective quad transforms
#[derive(Clone, Copy, Debug)]
pub struct PerspectiveMatrices {
    pub projection: Mat4,
    pub view: Mat4,
    pub model: Mat4,
}

impl PerspectiveMatrices {
    pub fn new(settings: &PerspectiveSettings, viewport: Viewport, elapsed: f32) -> Self {
        let aspect = settings.aspect.unwrap_or_else(|| viewport.aspect());
        Self {
            projection: perspective_projection(
                settings.fov_y_degrees,
                aspect,
                settings.near,
                settings.far,
            ),
            view: perspective_view(settings.camera_distance),
            model: perspective_model(elapsed, settings.scale, settings.degrees_per_second),
        }
    }

    pub fn mvp(&self) -> Mat4 {
        self.projection * self.view * self.model
    }
}

/// Everything recomputed once per frame
#[derive(Clone, Copy, Debug)]
pub struct FrameMatrices {
    pub ortho: OrthoMatrices,
    pub perspective: PerspectiveMatrices,
    pub time: f32,
}

impl FrameMatrices {
    pub fn compute(config: &DemoConfig, viewport: Viewport, elapsed: f32) -> Self {
        Self {
            ortho: OrthoMatrices::new(&config.ortho, viewport),
            perspective: PerspectiveMatrices::new(&config.perspective, viewport, elapsed),
            time: elapsed,
        }
    }
}
