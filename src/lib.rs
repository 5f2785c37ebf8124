//! projview - orthographic and perspective projections side by side

pub mod core;
pub mod math;
pub mod render;
