//! GPU uniform buffers for the per-quad transforms

use std::marker::PhantomData;

use bytemuck::{Pod, Zeroable};

use crate::math::{OrthoMatrices, PerspectiveMatrices};

/// Orthographic program uniforms (must match `OrthoUniforms` in vs_ortho.wgsl)
///
/// The WGSL struct is padded to its 16-byte alignment after `time`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct OrthoUniforms {
    /// Pixel-space projection (64 bytes, offset 0)
    pub projection: [[f32; 4]; 4],
    /// Model matrix (64 bytes, offset 64)
    pub model: [[f32; 4]; 4],
    /// Seconds since startup (4 bytes, offset 128)
    pub time: f32,
    pub _pad: [f32; 3],
}

impl OrthoUniforms {
    pub fn new(matrices: &OrthoMatrices, time: f32) -> Self {
        Self {
            projection: matrices.projection.to_cols_array_2d(),
            model: matrices.model.to_cols_array_2d(),
            time,
            _pad: [0.0; 3],
        }
    }
}

/// Perspective program uniforms (must match `PerspectiveUniforms` in vs_perspective.wgsl)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct PerspectiveUniforms {
    pub projection: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub time: f32,
    pub _pad: [f32; 3],
}

impl PerspectiveUniforms {
    pub fn new(matrices: &PerspectiveMatrices, time: f32) -> Self {
        Self {
            projection: matrices.projection.to_cols_array_2d(),
            view: matrices.view.to_cols_array_2d(),
            model: matrices.model.to_cols_array_2d(),
            time,
            _pad: [0.0; 3],
        }
    }
}

/// Uniform buffer holding one `T`, bound at group 0 binding 0 for the vertex stage
pub struct UniformBuffer<T: Pod> {
    buffer: wgpu::Buffer,
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    _marker: PhantomData<T>,
}

impl<T: Pod> UniformBuffer<T> {
    pub fn new(device: &wgpu::Device, label: &str) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: std::mem::size_of::<T>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(&format!("{}_bind_group_layout", label)),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(std::mem::size_of::<T>() as u64),
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{}_bind_group", label)),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });

        Self {
            buffer,
            bind_group_layout,
            bind_group,
            _marker: PhantomData,
        }
    }

    /// Write new contents; takes effect at the next submit
    pub fn update(&self, queue: &wgpu::Queue, value: &T) {
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(value));
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::DemoConfig;
    use crate::math::{FrameMatrices, Viewport};

    #[test]
    fn test_uniform_sizes() {
        // Must match the WGSL struct sizes
        assert_eq!(std::mem::size_of::<OrthoUniforms>(), 144);
        assert_eq!(std::mem::size_of::<PerspectiveUniforms>(), 208);
    }

    #[test]
    fn test_time_offsets() {
        let u = OrthoUniforms::zeroed();
        let base = &u as *const _ as usize;
        assert_eq!(&u.time as *const _ as usize - base, 128);

        let p = PerspectiveUniforms::zeroed();
        let base = &p as *const _ as usize;
        assert_eq!(&p.time as *const _ as usize - base, 192);
    }

    #[test]
    fn test_from_frame_matrices() {
        let frame = FrameMatrices::compute(&DemoConfig::default(), Viewport::new(800, 600), 1.5);

        let ortho = OrthoUniforms::new(&frame.ortho, frame.time);
        assert_eq!(ortho.time, 1.5);
        assert_eq!(ortho.model, frame.ortho.model.to_cols_array_2d());

        let persp = PerspectiveUniforms::new(&frame.perspective, frame.time);
        // view translation lives in the last column
        assert_eq!(persp.view[3], [0.0, 0.0, -2.0, 1.0]);
        assert_eq!(persp.projection, frame.perspective.projection.to_cols_array_2d());
    }

    fn parse_shader(file_name: &str) -> naga::Module {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("shaders").join(file_name);
        let source = std::fs::read_to_string(path).unwrap();
        naga::front::wgsl::parse_str(&source).unwrap()
    }

    fn wgsl_struct_size(module: &naga::Module, name: &str) -> usize {
        let mut layouter = naga::proc::Layouter::default();
        layouter.update(module.to_ctx()).unwrap();
        let (handle, _) = module
            .types
            .iter()
            .find(|(_, ty)| ty.name.as_deref() == Some(name))
            .unwrap_or_else(|| panic!("no struct {} in shader", name));
        layouter[handle].size as usize
    }

    #[test]
    fn test_wgsl_struct_sizes_match() {
        let ortho = parse_shader("vs_ortho.wgsl");
        assert_eq!(wgsl_struct_size(&ortho, "OrthoUniforms"), std::mem::size_of::<OrthoUniforms>());

        let perspective = parse_shader("vs_perspective.wgsl");
        assert_eq!(
            wgsl_struct_size(&perspective, "PerspectiveUniforms"),
            std::mem::size_of::<PerspectiveUniforms>()
        );
    }
}
