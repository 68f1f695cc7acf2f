//! Shader compilation and render pipeline construction.
//!
//! A "shader program" here is a vertex module paired with one of the
//! built-in fragment entry points in a render pipeline. Compilation and
//! pipeline validation both run inside wgpu error scopes so a bad shader
//! surfaces as a typed error with the validation log, not a panic.

use std::path::Path;

use crate::error::{Error, ShaderStage};
use crate::gpu::GpuContext;
use crate::mesh::Vertex;

/// Built-in vertex stage source.
pub const SCENE_VS: &str = include_str!("shaders/scene_vs.wgsl");
/// Built-in fragment stages (`fs_textured` and `fs_color`).
pub const SCENE_FS: &str = include_str!("shaders/scene_fs.wgsl");

/// Reads a user-supplied vertex shader source file.
///
/// `kind` names the switch that requested it ("sail" or "water") for the
/// diagnostic. Called before any window or GPU setup, matching the
/// fail-fast behavior of argument handling.
pub fn load_shader_source(kind: &'static str, path: impl AsRef<Path>) -> Result<String, Error> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path).map_err(|source| Error::ShaderFileRead {
        kind,
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("using {kind} vertex shader from {}", path.display());
    Ok(source)
}

/// Compiles a WGSL module, reporting validation failures as
/// [`Error::ShaderCompile`] with the stage and log attached.
pub fn compile(
    gpu: &GpuContext,
    source: &str,
    stage: ShaderStage,
    label: &str,
) -> Result<wgpu::ShaderModule, Error> {
    gpu.device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = gpu
        .device
        .create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        });
    if let Some(err) = pollster::block_on(gpu.device.pop_error_scope()) {
        return Err(Error::ShaderCompile {
            stage,
            log: err.to_string(),
        });
    }
    Ok(module)
}

/// Builds a triangle-strip render pipeline from a vertex module and one of
/// the built-in fragment entry points.
///
/// Pipeline state matches the scene's fixed GL configuration: CCW front
/// faces, no culling, depth test Less with write. A validation failure here
/// (typically a stage-interface mismatch from a user-supplied vertex
/// shader) is [`Error::ShaderLink`].
pub fn build_pipeline(
    gpu: &GpuContext,
    layout: &wgpu::PipelineLayout,
    vertex: &wgpu::ShaderModule,
    fragment: &wgpu::ShaderModule,
    fragment_entry: &str,
    label: &str,
) -> Result<wgpu::RenderPipeline, Error> {
    gpu.device.push_error_scope(wgpu::ErrorFilter::Validation);
    let pipeline = gpu
        .device
        .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: vertex,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::LAYOUT],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: fragment,
                entry_point: Some(fragment_entry),
                targets: &[Some(wgpu::ColorTargetState {
                    format: gpu.config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });
    if let Some(err) = pollster::block_on(gpu.device.pop_error_scope()) {
        return Err(Error::ShaderLink {
            log: err.to_string(),
        });
    }
    Ok(pipeline)
}
