//! Static quad geometry

use std::mem;

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

/// Interleaved position + texture coordinate vertex (5 floats)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub tex_coords: [f32; 2],
}

impl Vertex {
    pub const ATTRS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2];

    pub const fn new(position: [f32; 3], tex_coords: [f32; 2]) -> Self {
        Self { position, tex_coords }
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Unit quad for the orthographic draw; the model matrix sizes it
pub const ORTHO_QUAD: [Vertex; 4] = [
    Vertex::new([-1.0, -1.0, 0.0], [0.0, 0.0]), // bottom-left
    Vertex::new([1.0, -1.0, 0.0], [1.0, 0.0]),  // bottom-right
    Vertex::new([1.0, 1.0, 0.0], [1.0, 1.0]),   // top-right
    Vertex::new([-1.0, 1.0, 0.0], [0.0, 1.0]),  // top-left
];

/// 16:9 quad for the perspective draw
pub const PERSPECTIVE_QUAD: [Vertex; 4] = [
    Vertex::new([-2.0, -1.125, 0.0], [0.0, 0.0]),
    Vertex::new([2.0, -1.125, 0.0], [1.0, 0.0]),
    Vertex::new([2.0, 1.125, 0.0], [1.0, 1.0]),
    Vertex::new([-2.0, 1.125, 0.0], [0.0, 1.0]),
];

/// Two counter-clockwise triangles: bottom-left, bottom-right, top-right,
/// then top-right, top-left, bottom-left
pub const QUAD_INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];

/// Vertex buffers for both quads and the index buffer they share
pub struct QuadMeshes {
    pub ortho: wgpu::Buffer,
    pub perspective: wgpu::Buffer,
    pub indices: wgpu::Buffer,
}

impl QuadMeshes {
    pub fn new(device: &wgpu::Device) -> Self {
        let vertex_buffer = |label: &str, vertices: &[Vertex]| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(vertices),
                usage: wgpu::BufferUsages::VERTEX,
            })
        };

        let ortho = vertex_buffer("ortho_quad_vertices", &ORTHO_QUAD);
        let perspective = vertex_buffer("perspective_quad_vertices", &PERSPECTIVE_QUAD);
        let indices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_indices"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self { ortho, perspective, indices }
    }

    pub fn index_count(&self) -> u32 {
        QUAD_INDICES.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec2, Vec3};

    #[test]
    fn test_vertex_stride_is_five_floats() {
        assert_eq!(mem::size_of::<Vertex>(), 5 * mem::size_of::<f32>());
        let layout = Vertex::layout();
        assert_eq!(layout.array_stride, 20);
        assert_eq!(layout.attributes[0].offset, 0);
        assert_eq!(layout.attributes[1].offset, 12);
        assert_eq!(layout.attributes[1].shader_location, 1);
    }

    #[test]
    fn test_triangles_wind_counter_clockwise() {
        for quad in [&ORTHO_QUAD, &PERSPECTIVE_QUAD] {
            for tri in QUAD_INDICES.chunks(3) {
                let p = |i: u32| Vec3::from(quad[i as usize].position).truncate();
                let (a, b, c) = (p(tri[0]), p(tri[1]), p(tri[2]));
                assert!((b - a).perp_dot(c - a) > 0.0);
            }
        }
    }

    #[test]
    fn test_uvs_follow_corners() {
        for quad in [&ORTHO_QUAD, &PERSPECTIVE_QUAD] {
            for v in quad {
                let pos = Vec2::new(v.position[0], v.position[1]);
                let expected = Vec2::new(
                    if pos.x > 0.0 { 1.0 } else { 0.0 },
                    if pos.y > 0.0 { 1.0 } else { 0.0 },
                );
                assert_eq!(Vec2::from(v.tex_coords), expected);
            }
        }
    }

    #[test]
    fn test_perspective_quad_is_sixteen_by_nine() {
        let w = PERSPECTIVE_QUAD[1].position[0] - PERSPECTIVE_QUAD[0].position[0];
        let h = PERSPECTIVE_QUAD[3].position[1] - PERSPECTIVE_QUAD[0].position[1];
        assert!((w / h - 16.0 / 9.0).abs() < 1e-6);
    }

    /// (location, byte size) of each `vs_main` input in a vertex shader
    fn shader_vertex_inputs(file_name: &str) -> Vec<(u32, u64)> {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("shaders").join(file_name);
        let source = std::fs::read_to_string(path).unwrap();
        let module = naga::front::wgsl::parse_str(&source).unwrap();

        let entry = module.entry_points.iter().find(|ep| ep.name == "vs_main").unwrap();
        let input = &module.types[entry.function.arguments[0].ty];
        let naga::TypeInner::Struct { members, .. } = &input.inner else {
            panic!("vs_main input in {} is not a struct", file_name);
        };

        members
            .iter()
            .map(|member| {
                let Some(naga::Binding::Location { location, .. }) = &member.binding else {
                    panic!("{} has an input without a location", file_name);
                };
                let naga::TypeInner::Vector { size, scalar } = &module.types[member.ty].inner else {
                    panic!("{} has a non-vector input", file_name);
                };
                (*location, *size as u64 * scalar.width as u64)
            })
            .collect()
    }

    #[test]
    fn test_shader_vertex_inputs_match_attributes() {
        let expected: Vec<(u32, u64)> = Vertex::ATTRS
            .iter()
            .map(|attr| (attr.shader_location, attr.format.size()))
            .collect();

        for file_name in ["vs_ortho.wgsl", "vs_perspective.wgsl"] {
            assert_eq!(shader_vertex_inputs(file_name), expected, "{}", file_name);
        }
    }
}
