//! Demo configuration
//!
//! Defaults reproduce the stock demo: a fullscreen window, the three WGSL
//! files under `shaders/` and `assets/texture.png`. Any subset of fields can
//! be overridden from a JSON file or from the command line.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::error::Error;
use crate::core::types::Result;

/// Window setup
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub title: String,
    /// Borderless fullscreen at the desktop resolution
    pub fullscreen: bool,
    pub resizable: bool,
    /// Used when the desktop mode can't be queried, and for windowed mode
    pub fallback_width: u32,
    pub fallback_height: u32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "Perspective vs Orthographic".to_string(),
            fullscreen: true,
            resizable: true,
            fallback_width: 1280,
            fallback_height: 720,
        }
    }
}

/// Orthographic quad placement
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrthoSettings {
    /// Fraction of the window size covered by the quad's unit extent
    pub scale: f32,
}

impl Default for OrthoSettings {
    fn default() -> Self {
        Self { scale: 0.25 }
    }
}

/// Perspective camera and quad animation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerspectiveSettings {
    /// Vertical field of view in degrees
    pub fov_y_degrees: f32,
    /// Fixed aspect ratio; `None` follows the window
    pub aspect: Option<f32>,
    pub near: f32,
    pub far: f32,
    /// How far the view is pulled back from the quad
    pub camera_distance: f32,
    pub scale: f32,
    /// Spin about +Y
    pub degrees_per_second: f32,
}

impl Default for PerspectiveSettings {
    fn default() -> Self {
        Self {
            fov_y_degrees: 45.0,
            aspect: Some(800.0 / 600.0),
            near: 0.1,
            far: 100.0,
            camera_distance: 2.0,
            scale: 0.5,
            degrees_per_second: 50.0,
        }
    }
}

/// Full demo configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub window: WindowSettings,
    /// Directory holding `vs_ortho.wgsl`, `vs_perspective.wgsl` and `fs.wgsl`
    pub shader_dir: PathBuf,
    pub texture_path: PathBuf,
    /// Flip rows on load so uv (0, 0) samples the bottom-left of the image
    pub flip_texture: bool,
    pub ortho: OrthoSettings,
    pub perspective: PerspectiveSettings,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            window: WindowSettings::default(),
            shader_dir: PathBuf::from("shaders"),
            texture_path: PathBuf::from("assets/texture.png"),
            flip_texture: true,
            ortho: OrthoSettings::default(),
            perspective: PerspectiveSettings::default(),
        }
    }
}

impl DemoConfig {
    /// Load a config from a JSON file; missing fields keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| Error::io("config", path, e))?;
        Self::from_json(&text)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Build a config from command line arguments (program name excluded).
    ///
    /// `--config <path>` is applied first, then `--shaders <dir>`,
    /// `--texture <path>` and `--windowed` override it.
    pub fn from_args(args: &[String]) -> Result<Self> {
        let mut config = match flag_value(args, "--config")? {
            Some(path) => Self::from_file(Path::new(path))?,
            None => Self::default(),
        };

        if let Some(dir) = flag_value(args, "--shaders")? {
            config.shader_dir = PathBuf::from(dir);
        }
        if let Some(path) = flag_value(args, "--texture")? {
            config.texture_path = PathBuf::from(path);
        }
        if args.iter().any(|a| a == "--windowed") {
            config.window.fullscreen = false;
        }

        config.validate()?;
        Ok(config)
    }

    /// Path of a shader file inside the shader directory
    pub fn shader_path(&self, file_name: &str) -> PathBuf {
        self.shader_dir.join(file_name)
    }

    fn validate(&self) -> Result<()> {
        let p = &self.perspective;
        if !(p.near > 0.0 && p.far > p.near) {
            return Err(Error::Config(format!(
                "perspective planes must satisfy 0 < near < far (near={}, far={})",
                p.near, p.far
            )));
        }
        if !(p.fov_y_degrees > 0.0 && p.fov_y_degrees < 180.0) {
            return Err(Error::Config(format!(
                "perspective fov must be in (0, 180) degrees, got {}",
                p.fov_y_degrees
            )));
        }
        if let Some(aspect) = p.aspect {
            if aspect <= 0.0 {
                return Err(Error::Config(format!("aspect must be positive, got {}", aspect)));
            }
        }
        if self.window.fallback_width == 0 || self.window.fallback_height == 0 {
            return Err(Error::Config("fallback window size must be non-zero".to_string()));
        }
        Ok(())
    }
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Result<Option<&'a str>> {
    match args.iter().position(|a| a == flag) {
        Some(i) => args
            .get(i + 1)
            .map(|v| Some(v.as_str()))
            .ok_or_else(|| Error::Config(format!("{} expects a value", flag))),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults_match_stock_demo() {
        let config = DemoConfig::default();
        assert_eq!(config.window.title, "Perspective vs Orthographic");
        assert!(config.window.fullscreen);
        assert_eq!(config.shader_path("fs.wgsl"), PathBuf::from("shaders/fs.wgsl"));
        assert_eq!(config.ortho.scale, 0.25);
        assert_eq!(config.perspective.fov_y_degrees, 45.0);
        assert_eq!(config.perspective.aspect, Some(800.0 / 600.0));
        assert_eq!(config.perspective.degrees_per_second, 50.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = DemoConfig::from_json(r#"{ "perspective": { "fov_y_degrees": 60.0 } }"#)
            .unwrap();
        assert_eq!(config.perspective.fov_y_degrees, 60.0);
        assert_eq!(config.perspective.near, 0.1);
        assert_eq!(config.texture_path, PathBuf::from("assets/texture.png"));
    }

    #[test]
    fn test_null_aspect_follows_window() {
        let config = DemoConfig::from_json(r#"{ "perspective": { "aspect": null } }"#).unwrap();
        assert_eq!(config.perspective.aspect, None);
    }

    #[test]
    fn test_invalid_planes_rejected() {
        let err = DemoConfig::from_json(r#"{ "perspective": { "near": 5.0, "far": 1.0 } }"#)
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(matches!(DemoConfig::from_json("{ nope"), Err(Error::Config(_))));
    }

    #[test]
    fn test_args_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "shader_dir": "from_file", "window": {{ "fullscreen": true }} }}"#)
            .unwrap();
        let path = file.path().to_string_lossy().to_string();

        let config = DemoConfig::from_args(&args(&[
            "--config", &path, "--texture", "img/other.png", "--windowed",
        ]))
        .unwrap();

        assert_eq!(config.shader_dir, PathBuf::from("from_file"));
        assert_eq!(config.texture_path, PathBuf::from("img/other.png"));
        assert!(!config.window.fullscreen);
    }

    #[test]
    fn test_missing_flag_value() {
        let err = DemoConfig::from_args(&args(&["--shaders"])).unwrap_err();
        assert!(err.to_string().contains("--shaders"));
    }

    #[test]
    fn test_missing_config_file() {
        let err = DemoConfig::from_args(&args(&["--config", "/nonexistent/demo.json"]))
            .unwrap_err();
        assert!(matches!(err, Error::Io { kind: "config", .. }));
    }
}
