//! Render pipelines

pub mod quad;

pub use quad::QuadPipeline;
