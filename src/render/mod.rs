//! Rendering system and GPU interfaces

pub mod window;
pub mod context;
pub mod shader;
pub mod mesh;
pub mod buffer;
pub mod texture;
pub mod pipeline;
pub mod demo;

pub use demo::DemoRenderer;
