//! Per-frame scene rendering.
//!
//! The [`Renderer`] owns every GPU object the scene needs: the simple and
//! textured pipelines (plus optional sail/water variants), the house and
//! roof meshes, the brick texture, and one uniform buffer and bind group per
//! drawable. All of it is created at startup and lives until process exit;
//! nothing is allocated on the GPU per frame.
//!
//! # Bind groups
//!
//! - **Group 0**: scene uniforms (projection/view/model matrices and the
//!   wind/time scalars).
//! - **Group 1**: texture and sampler, bound only by textured pipelines.

use crate::clock::AnimationFrame;
use crate::error::{Error, ShaderStage};
use crate::gpu::GpuContext;
use crate::math::{Mat4, deg_to_rad};
use crate::mesh::Mesh;
use crate::scene;
use crate::shader;
use crate::texture::{Texture, srgb_to_linear};

/// Sky-blue clear color, in sRGB terms.
const SKY_SRGB: [f32; 3] = [0.678, 0.847, 0.902];

/// Scene uniforms uploaded once per drawable per frame.
///
/// CPU matrices are row-major; they cross to WGSL's column-major layout
/// through [`Mat4::to_cols_array_2d`] when this struct is filled in. The
/// wind/time scalars are uploaded every frame so user-supplied vertex
/// shaders that declare them always see live values.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniforms {
    pub project: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub current_angle: f32,
    pub wind_dir: f32,
    pub wind_speed: f32,
    pub _pad: f32,
}

/// Which pipeline a drawable renders with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Program {
    /// Vertex color only (the roof).
    Simple,
    /// Vertex color modulated by a sampled texel (the house).
    Textured,
}

/// Optional user-supplied vertex shader sources, already read from disk.
#[derive(Default)]
pub struct VertexShaderOverrides {
    pub sail: Option<String>,
    pub water: Option<String>,
}

/// One mesh bound to a program, its uniforms, and an optional texture.
struct Drawable {
    mesh: Mesh,
    program: Program,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    texture_bind_group: Option<wgpu::BindGroup>,
    /// Local transform, pre-multiplied by the frame-wide Y rotation. Both
    /// scene drawables currently use the identity.
    local: Mat4,
}

/// The world-to-eye matrix: back seven units, down two, scene turned 45
/// degrees so the house is viewed corner-on.
pub fn view_matrix() -> Mat4 {
    Mat4::translation(0.0, -2.0, -7.0) * Mat4::rotation_y(deg_to_rad(-45.0))
}

/// The eye-to-clip matrix for the configured window size. Built once at
/// startup and held constant; the projection does not track resizes.
pub fn projection_matrix(width: u32, height: u32) -> Mat4 {
    Mat4::perspective(24.0, width as f32 / height as f32, 1.0, 100.0)
}

fn sky_clear_color() -> wgpu::Color {
    // The surface format is sRGB, so the clear value has to be linearized
    // for the displayed pixels to read back as the sky color.
    wgpu::Color {
        r: srgb_to_linear(SKY_SRGB[0]) as f64,
        g: srgb_to_linear(SKY_SRGB[1]) as f64,
        b: srgb_to_linear(SKY_SRGB[2]) as f64,
        a: 1.0,
    }
}

pub struct Renderer {
    simple_pipeline: wgpu::RenderPipeline,
    textured_pipeline: wgpu::RenderPipeline,
    /// Built when `-sail` / `-water` supply vertex shaders; held for
    /// wind-animated drawables. The baked-in scene has none, so these are
    /// never in the draw list.
    #[allow(dead_code)]
    sail_pipeline: Option<wgpu::RenderPipeline>,
    #[allow(dead_code)]
    water_pipeline: Option<wgpu::RenderPipeline>,
    /// Draw order is fixed: roof first, then house.
    drawables: Vec<Drawable>,
    view: Mat4,
    projection: Mat4,
    #[allow(dead_code)]
    depth_texture: wgpu::Texture,
    depth_view: wgpu::TextureView,
    depth_size: (u32, u32),
}

impl Renderer {
    /// Builds every pipeline, mesh, texture, and uniform binding the scene
    /// needs. Fails fast: any shader or texture problem aborts startup.
    pub fn new(gpu: &GpuContext, overrides: &VertexShaderOverrides) -> Result<Self, Error> {
        let device = &gpu.device;

        let scene_vs = shader::compile(
            gpu,
            shader::SCENE_VS,
            ShaderStage::Vertex,
            "Scene Vertex Shader",
        )?;
        let scene_fs = shader::compile(
            gpu,
            shader::SCENE_FS,
            ShaderStage::Fragment,
            "Scene Fragment Shader",
        )?;

        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Scene Uniform Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let texture_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Texture Bind Group Layout"),
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
            });

        let simple_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Simple Pipeline Layout"),
            bind_group_layouts: &[&uniform_bind_group_layout],
            push_constant_ranges: &[],
        });
        let textured_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Textured Pipeline Layout"),
            bind_group_layouts: &[&uniform_bind_group_layout, &texture_bind_group_layout],
            push_constant_ranges: &[],
        });

        let simple_pipeline = shader::build_pipeline(
            gpu,
            &simple_layout,
            &scene_vs,
            &scene_fs,
            "fs_color",
            "Simple Pipeline",
        )?;
        let textured_pipeline = shader::build_pipeline(
            gpu,
            &textured_layout,
            &scene_vs,
            &scene_fs,
            "fs_textured",
            "Textured Pipeline",
        )?;

        let sail_pipeline = overrides
            .sail
            .as_deref()
            .map(|source| {
                let module = shader::compile(gpu, source, ShaderStage::Vertex, "Sail Vertex Shader")?;
                shader::build_pipeline(
                    gpu,
                    &textured_layout,
                    &module,
                    &scene_fs,
                    "fs_textured",
                    "Sail Pipeline",
                )
            })
            .transpose()?;
        let water_pipeline = overrides
            .water
            .as_deref()
            .map(|source| {
                let module =
                    shader::compile(gpu, source, ShaderStage::Vertex, "Water Vertex Shader")?;
                shader::build_pipeline(
                    gpu,
                    &textured_layout,
                    &module,
                    &scene_fs,
                    "fs_textured",
                    "Water Pipeline",
                )
            })
            .transpose()?;

        let brick = Texture::from_file(
            gpu,
            "brick.jpg",
            wgpu::AddressMode::MirrorRepeat,
            wgpu::AddressMode::Repeat,
        )?;

        let roof = Drawable::new(
            gpu,
            Mesh::new(gpu, &scene::roof_vertices(), scene::ROOF_STRIPS.to_vec()),
            Program::Simple,
            &uniform_bind_group_layout,
            None,
        );
        let house = Drawable::new(
            gpu,
            Mesh::new(gpu, &scene::house_vertices(), scene::HOUSE_STRIPS.to_vec()),
            Program::Textured,
            &uniform_bind_group_layout,
            Some((&texture_bind_group_layout, &brick)),
        );

        let (depth_texture, depth_view) = create_depth_texture(gpu);

        Ok(Self {
            simple_pipeline,
            textured_pipeline,
            sail_pipeline,
            water_pipeline,
            drawables: vec![roof, house],
            view: view_matrix(),
            projection: projection_matrix(gpu.width(), gpu.height()),
            depth_texture,
            depth_view,
            depth_size: (gpu.width(), gpu.height()),
        })
    }

    /// Recreates the depth buffer if the surface was resized.
    fn ensure_depth_size(&mut self, gpu: &GpuContext) {
        if self.depth_size != (gpu.width(), gpu.height()) {
            let (texture, view) = create_depth_texture(gpu);
            self.depth_texture = texture;
            self.depth_view = view;
            self.depth_size = (gpu.width(), gpu.height());
        }
    }

    /// Renders one frame into `target`.
    ///
    /// Clears color and depth, then draws each drawable in fixed order
    /// (roof, house): pipeline, uniforms, texture, and one draw call per
    /// strip segment.
    pub fn render(
        &mut self,
        gpu: &GpuContext,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        frame: AnimationFrame,
    ) {
        self.ensure_depth_size(gpu);

        let rotation = Mat4::rotation_y(frame.model_rotation_y);
        for drawable in &self.drawables {
            let model = rotation * drawable.local;
            let uniforms = SceneUniforms {
                project: self.projection.to_cols_array_2d(),
                view: self.view.to_cols_array_2d(),
                model: model.to_cols_array_2d(),
                current_angle: frame.current_angle,
                wind_dir: frame.wind_dir,
                wind_speed: frame.wind_speed,
                _pad: 0.0,
            };
            gpu.queue
                .write_buffer(&drawable.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
        }

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Scene Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(sky_clear_color()),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        for drawable in &self.drawables {
            let pipeline = match drawable.program {
                Program::Simple => &self.simple_pipeline,
                Program::Textured => &self.textured_pipeline,
            };
            render_pass.set_pipeline(pipeline);
            render_pass.set_bind_group(0, &drawable.uniform_bind_group, &[]);
            if let Some(texture_bind_group) = &drawable.texture_bind_group {
                render_pass.set_bind_group(1, texture_bind_group, &[]);
            }
            render_pass.set_vertex_buffer(0, drawable.mesh.vertex_buffer.slice(..));
            for &(first, count) in &drawable.mesh.strips {
                render_pass.draw(first..first + count, 0..1);
            }
        }
    }
}

impl Drawable {
    fn new(
        gpu: &GpuContext,
        mesh: Mesh,
        program: Program,
        uniform_layout: &wgpu::BindGroupLayout,
        texture: Option<(&wgpu::BindGroupLayout, &Texture)>,
    ) -> Self {
        let uniform_buffer = gpu.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Drawable Uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let uniform_bind_group = gpu.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Drawable Uniform Bind Group"),
            layout: uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let texture_bind_group = texture.map(|(layout, texture)| {
            gpu.device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Drawable Texture Bind Group"),
                layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(&texture.view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(&texture.sampler),
                    },
                ],
            })
        });

        Self {
            mesh,
            program,
            uniform_buffer,
            uniform_bind_group,
            texture_bind_group,
            local: Mat4::IDENTITY,
        }
    }
}

fn create_depth_texture(gpu: &GpuContext) -> (wgpu::Texture, wgpu::TextureView) {
    let texture = gpu.device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width: gpu.width(),
            height: gpu.height(),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Depth32Float,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    (texture, view)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_uniforms_match_the_wgsl_block() {
        // Three mat4x4 plus four f32, 16-byte aligned.
        assert_eq!(std::mem::size_of::<SceneUniforms>(), 208);
    }

    #[test]
    fn view_places_the_eye_behind_and_above() {
        let v = view_matrix();
        assert_eq!(v.0[0][3], 0.0);
        assert_eq!(v.0[1][3], -2.0);
        assert_eq!(v.0[2][3], -7.0);
        // Rotation part comes from rotation_y(-45 degrees).
        let c = deg_to_rad(-45.0).cos();
        assert!((v.0[0][0] - c).abs() < 1e-5);
    }

    #[test]
    fn projection_uses_the_window_aspect() {
        let p = projection_matrix(400, 600);
        assert!((p.0[0][0] / p.0[1][1] - 1.5).abs() < 1e-5);
    }

    #[test]
    fn clear_color_reads_back_as_sky_blue() {
        let c = sky_clear_color();
        // Linear values that encode to ~(173, 216, 230) on an sRGB target.
        assert!((c.r - 0.4173).abs() < 1e-3);
        assert!((c.g - 0.6867).abs() < 1e-3);
        assert!((c.b - 0.7914).abs() < 1e-3);
    }
}
