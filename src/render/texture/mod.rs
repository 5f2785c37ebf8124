//! Texture management

pub mod image_texture;
pub mod depth;

pub use image_texture::{ImageTexture, decode_image};
pub use depth::{DepthTexture, DEPTH_FORMAT};
