//! GPU buffer management

pub mod uniform_buffer;

pub use uniform_buffer::{OrthoUniforms, PerspectiveUniforms, UniformBuffer};
