//! Sampled 2D texture loaded from an image file

use std::path::Path;

use image::RgbaImage;

use crate::core::error::Error;
use crate::core::types::Result;

/// Decode an image file to RGBA8.
///
/// With `flip` set, rows are reversed so that texture coordinate (0, 0)
/// lands on the bottom-left pixel of the picture.
pub fn decode_image(path: &Path, flip: bool) -> Result<RgbaImage> {
    let decoded = image::open(path).map_err(|e| match e {
        image::ImageError::IoError(source) => Error::io("texture", path, source),
        other => Error::Texture { path: path.to_path_buf(), message: other.to_string() },
    })?;

    let mut rgba = decoded.to_rgba8();
    if flip {
        image::imageops::flip_vertical_in_place(&mut rgba);
    }
    Ok(rgba)
}

/// GPU texture with its view and sampler
pub struct ImageTexture {
    #[allow(dead_code)]
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    sampler: wgpu::Sampler,
    width: u32,
    height: u32,
}

impl ImageTexture {
    /// Bind group layout shared by every pipeline that samples the texture
    pub fn bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("texture_bind_group_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        })
    }

    /// Load an image file and upload it
    pub fn load(device: &wgpu::Device, queue: &wgpu::Queue, path: &Path, flip: bool) -> Result<Self> {
        let image = decode_image(path, flip)?;
        Ok(Self::upload(device, queue, &image, &path.to_string_lossy()))
    }

    /// Load an image, or fall back to a 1x1 black texture when it can't be read.
    ///
    /// This is the one place a texture failure is logged.
    pub fn load_or_placeholder(device: &wgpu::Device, queue: &wgpu::Queue, path: &Path, flip: bool) -> Self {
        match Self::load(device, queue, path, flip) {
            Ok(texture) => texture,
            Err(e) => {
                log::error!("{}", e);
                Self::placeholder(device, queue)
            }
        }
    }

    pub fn placeholder(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        let image = RgbaImage::from_pixel(1, 1, image::Rgba([0, 0, 0, 255]));
        Self::upload(device, queue, &image, "placeholder_texture")
    }

    /// Upload RGBA8 pixels as an sRGB texture with repeat wrapping and
    /// linear filtering
    pub fn upload(device: &wgpu::Device, queue: &wgpu::Queue, image: &RgbaImage, label: &str) -> Self {
        let (width, height) = image.dimensions();
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            image.as_raw(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("texture_sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
            width,
            height,
        }
    }

    /// Create bind group for the layout from [`ImageTexture::bind_group_layout`]
    pub fn create_bind_group(&self, device: &wgpu::Device, layout: &wgpu::BindGroupLayout) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("texture_bind_group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&self.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        })
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_two_row_png(dir: &Path) -> std::path::PathBuf {
        // top row red, bottom row blue
        let mut img = RgbaImage::new(2, 2);
        for x in 0..2 {
            img.put_pixel(x, 0, image::Rgba([255, 0, 0, 255]));
            img.put_pixel(x, 1, image::Rgba([0, 0, 255, 255]));
        }
        let path = dir.join("rows.png");
        img.save(&path).unwrap();
        path
    }

    #[test]
    fn test_flip_puts_bottom_row_first() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_two_row_png(dir.path());

        let flipped = decode_image(&path, true).unwrap();
        assert_eq!(flipped.get_pixel(0, 0).0, [0, 0, 255, 255]);
        assert_eq!(flipped.get_pixel(0, 1).0, [255, 0, 0, 255]);

        let unflipped = decode_image(&path, false).unwrap();
        assert_eq!(unflipped.get_pixel(0, 0).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = decode_image(Path::new("/nonexistent/texture.png"), true).unwrap_err();
        assert!(matches!(err, Error::Io { kind: "texture", .. }));
        assert!(err.to_string().starts_with("Failed to open texture file: /nonexistent/texture.png"));
    }

    #[test]
    fn test_garbage_file_is_texture_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("not_an_image.png");
        std::fs::write(&path, b"definitely not a png").unwrap();
        let err = decode_image(&path, true).unwrap_err();
        assert!(matches!(err, Error::Texture { .. }));
        // decode failures carry the decoder diagnostic, not the open-file wording
        let text = err.to_string();
        assert!(text.starts_with("Failed to decode texture"), "{}", text);
        assert!(!text.contains("Failed to open"));
    }

    #[test]
    fn test_bundled_texture_decodes() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/texture.png");
        let img = decode_image(&path, true).unwrap();
        assert_eq!(img.dimensions(), (256, 144));
    }
}
