//! WGSL shader loading
//!
//! Shaders are read from disk at startup. Each file is parsed and validated
//! with naga before it reaches the device so that a broken shader produces a
//! readable diagnostic naming the file, instead of a device validation panic.

use std::path::{Path, PathBuf};

use crate::core::config::DemoConfig;
use crate::core::error::Error;
use crate::core::types::Result;

pub const ORTHO_VERTEX_FILE: &str = "vs_ortho.wgsl";
pub const PERSPECTIVE_VERTEX_FILE: &str = "vs_perspective.wgsl";
pub const FRAGMENT_FILE: &str = "fs.wgsl";

/// Pipeline stage a shader file is compiled for
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    fn naga_stage(self) -> naga::ShaderStage {
        match self {
            ShaderStage::Vertex => naga::ShaderStage::Vertex,
            ShaderStage::Fragment => naga::ShaderStage::Fragment,
        }
    }
}

/// Read a shader file into a string
pub fn load_shader_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| Error::io("shader", path, e))
}

/// Parse and validate WGSL source, returning the entry point for `stage`
pub fn check_wgsl(path: &Path, source: &str, stage: ShaderStage) -> Result<String> {
    let shader_error = |message: String| Error::Shader { path: path.to_path_buf(), message };

    let module = naga::front::wgsl::parse_str(source)
        .map_err(|e| shader_error(e.emit_to_string(source)))?;

    naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    )
    .validate(&module)
    .map_err(|e| shader_error(e.emit_to_string(source)))?;

    module
        .entry_points
        .iter()
        .find(|ep| ep.stage == stage.naga_stage())
        .map(|ep| ep.name.clone())
        .ok_or_else(|| shader_error(format!("no {:?} entry point", stage)))
}

/// A shader module ready to be used in a pipeline
pub struct CompiledShader {
    pub module: wgpu::ShaderModule,
    pub entry_point: String,
    pub path: PathBuf,
}

/// Load, check and create a shader module for one stage.
///
/// Errors are returned for the caller to log.
pub fn compile_shader(device: &wgpu::Device, path: &Path, stage: ShaderStage) -> Result<CompiledShader> {
    let source = load_shader_source(path)?;

    let entry_point = check_wgsl(path, &source, stage)?;

    let label = path.to_string_lossy();
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(&label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });

    log::debug!("Compiled {} ({:?}, entry `{}`)", path.display(), stage, entry_point);

    Ok(CompiledShader {
        module,
        entry_point,
        path: path.to_path_buf(),
    })
}

/// The two vertex shaders and the fragment shader they share
pub struct ShaderSet {
    pub ortho_vertex: CompiledShader,
    pub perspective_vertex: CompiledShader,
    pub fragment: CompiledShader,
}

impl ShaderSet {
    pub fn load(device: &wgpu::Device, config: &DemoConfig) -> Result<Self> {
        Ok(Self {
            ortho_vertex: compile_shader(device, &config.shader_path(ORTHO_VERTEX_FILE), ShaderStage::Vertex)?,
            perspective_vertex: compile_shader(device, &config.shader_path(PERSPECTIVE_VERTEX_FILE), ShaderStage::Vertex)?,
            fragment: compile_shader(device, &config.shader_path(FRAGMENT_FILE), ShaderStage::Fragment)?,
        })
    }
}
