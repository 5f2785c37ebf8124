//! Transform math for the demo

pub mod projection;

pub use projection::{FrameMatrices, OrthoMatrices, PerspectiveMatrices, Viewport};
