//! Error types for the demo

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the demo
#[derive(Debug, Error)]
pub enum Error {
    #[error("GPU error: {0}")]
    Gpu(String),

    /// Surface needs reconfiguring before the next frame
    #[error("Surface outdated")]
    SurfaceOutdated,

    #[error("Window error: {0}")]
    Window(String),

    #[error("Failed to open {kind} file: {} ({source})", path.display())]
    Io {
        kind: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Shader compilation error in {}:\n{message}", path.display())]
    Shader { path: PathBuf, message: String },

    #[error("Failed to decode texture {}: {message}", path.display())]
    Texture { path: PathBuf, message: String },

    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    /// Wrap an IO error with the kind of file and the path that caused it
    pub fn io(kind: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { kind, path: path.into(), source }
    }

    /// Outdated and lost surfaces are recoverable by reconfiguring
    pub fn from_surface(error: wgpu::SurfaceError) -> Self {
        match error {
            wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost => Self::SurfaceOutdated,
            other => Self::Gpu(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shader_error_message_names_file() {
        let err = Error::Shader {
            path: PathBuf::from("shaders/fs.wgsl"),
            message: "expected `;`".to_string(),
        };
        let text = err.to_string();
        assert!(text.starts_with("Shader compilation error in shaders/fs.wgsl:"));
        assert!(text.ends_with("expected `;`"));
    }

    #[test]
    fn test_io_error_keeps_source() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = Error::io("texture", "assets/texture.png", source);
        assert_eq!(err.to_string(), "Failed to open texture file: assets/texture.png (missing)");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_surface_errors_classified() {
        assert!(matches!(Error::from_surface(wgpu::SurfaceError::Outdated), Error::SurfaceOutdated));
        assert!(matches!(Error::from_surface(wgpu::SurfaceError::Lost), Error::SurfaceOutdated));
        assert!(matches!(Error::from_surface(wgpu::SurfaceError::Timeout), Error::Gpu(_)));
        assert!(matches!(Error::from_surface(wgpu::SurfaceError::OutOfMemory), Error::Gpu(_)));
    }
}
