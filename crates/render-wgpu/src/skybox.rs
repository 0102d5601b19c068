use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use skyview_render::{CubemapImages, TextureLoadError};
use wgpu::util::DeviceExt;

use crate::gpu::DEPTH_FORMAT;
use crate::shaders;

/// Errors from loading or compiling the skybox shader.
#[derive(Debug, thiserror::Error)]
pub enum ShaderError {
    #[error("failed to read shader {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("shader {label} failed to compile: {message}")]
    Compile { label: String, message: String },
}

/// Where the skybox WGSL comes from.
///
/// A file must define `vs_main` and `fs_main` with the bindings of
/// [`shaders::SKYBOX_SHADER`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SkyboxShader {
    #[default]
    Embedded,
    File(PathBuf),
}

impl SkyboxShader {
    pub fn label(&self) -> String {
        match self {
            SkyboxShader::Embedded => "embedded skybox shader".to_string(),
            SkyboxShader::File(path) => path.display().to_string(),
        }
    }

    pub fn load(&self) -> Result<Cow<'static, str>, ShaderError> {
        match self {
            SkyboxShader::Embedded => Ok(Cow::Borrowed(shaders::SKYBOX_SHADER)),
            SkyboxShader::File(path) => std::fs::read_to_string(path)
                .map(Cow::Owned)
                .map_err(|source| ShaderError::Io {
                    path: path.clone(),
                    source,
                }),
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct CameraUniforms {
    view: [[f32; 4]; 4],
    projection: [[f32; 4]; 4],
}

const _: () = assert!(std::mem::size_of::<CameraUniforms>() == 128);

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
struct SkyVertex {
    position: [f32; 3],
}

/// Generate the 36 position-only vertices of a cube spanning [-1, 1].
fn cube_vertices() -> Vec<SkyVertex> {
    const CORNERS: [[f32; 3]; 8] = [
        [-1.0, -1.0, -1.0],
        [1.0, -1.0, -1.0],
        [1.0, 1.0, -1.0],
        [-1.0, 1.0, -1.0],
        [-1.0, -1.0, 1.0],
        [1.0, -1.0, 1.0],
        [1.0, 1.0, 1.0],
        [-1.0, 1.0, 1.0],
    ];
    #[rustfmt::skip]
    const TRIANGLES: [usize; 36] = [
        0, 1, 2, 2, 3, 0, // -Z
        4, 5, 6, 6, 7, 4, // +Z
        0, 3, 7, 7, 4, 0, // -X
        1, 5, 6, 6, 2, 1, // +X
        0, 4, 5, 5, 1, 0, // -Y
        3, 2, 6, 6, 7, 3, // +Y
    ];
    TRIANGLES
        .iter()
        .map(|&i| SkyVertex {
            position: CORNERS[i],
        })
        .collect()
}

/// The cube every skybox variant is drawn with.
pub struct CubeMesh {
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
}

impl CubeMesh {
    pub fn new(device: &wgpu::Device) -> Self {
        let vertices = cube_vertices();
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("skybox_cube_vertex_buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        Self {
            vertex_buffer,
            vertex_count: vertices.len() as u32,
        }
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }
}

/// The skybox shader program: render pipeline, camera uniforms, cubemap
/// sampler and the shared cube mesh.
pub struct SkyboxPipeline {
    pipeline: wgpu::RenderPipeline,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    texture_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    mesh: Arc<CubeMesh>,
}

impl SkyboxPipeline {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        shader: &SkyboxShader,
    ) -> Result<Self, ShaderError> {
        let label = shader.label();
        let source = shader.load()?;

        let camera_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("skybox_camera_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("skybox_texture_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::Cube,
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

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("skybox_pipeline_layout"),
            bind_group_layouts: &[&camera_layout, &texture_layout],
            push_constant_ranges: &[],
        });

        // Validation errors from user-supplied WGSL surface here instead of
        // reaching the uncaptured-error handler.
        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("skybox_shader"),
            source: wgpu::ShaderSource::Wgsl(source),
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("skybox_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &module,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<SkyVertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![0 => Float32x3],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &module,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                // viewed from inside
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: false,
                // fragments sit exactly at depth 1.0, the cleared value
                depth_compare: wgpu::CompareFunction::LessEqual,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        if let Some(err) = pollster::block_on(device.pop_error_scope()) {
            return Err(ShaderError::Compile {
                label,
                message: err.to_string(),
            });
        }
        tracing::info!(shader = %label, "skybox pipeline built");

        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("skybox_camera_buffer"),
            contents: bytemuck::bytes_of(&CameraUniforms {
                view: Mat4::IDENTITY.to_cols_array_2d(),
                projection: Mat4::IDENTITY.to_cols_array_2d(),
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("skybox_camera_bind_group"),
            layout: &camera_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("skybox_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        Ok(Self {
            pipeline,
            camera_buffer,
            camera_bind_group,
            texture_layout,
            sampler,
            mesh: Arc::new(CubeMesh::new(device)),
        })
    }

    /// Write the `view` and `projection` uniforms used by the next draw.
    pub fn set_camera(&self, queue: &wgpu::Queue, view: Mat4, projection: Mat4) {
        queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::bytes_of(&CameraUniforms {
                view: view.to_cols_array_2d(),
                projection: projection.to_cols_array_2d(),
            }),
        );
    }

    pub fn mesh(&self) -> &Arc<CubeMesh> {
        &self.mesh
    }
}

/// One skybox variant: a six-layer cubemap texture drawn on the shared cube.
pub struct GpuSkybox {
    _texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
    mesh: Arc<CubeMesh>,
    size: u32,
}

impl GpuSkybox {
    /// Load six face images (front, back, top, bottom, right, left) and
    /// upload them as a cubemap.
    pub fn from_paths<P: AsRef<Path>>(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        pipeline: &SkyboxPipeline,
        paths: &[P],
        label: &str,
    ) -> Result<Self, TextureLoadError> {
        let images = CubemapImages::load(paths)?;
        Ok(Self::new(device, queue, pipeline, &images, label))
    }

    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        pipeline: &SkyboxPipeline,
        images: &CubemapImages,
        label: &str,
    ) -> Self {
        let size = images.size();
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(&format!("skybox_{label}")),
            size: wgpu::Extent3d {
                width: size,
                height: size,
                depth_or_array_layers: 6,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        for (face, img) in images.faces() {
            queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &texture,
                    mip_level: 0,
                    origin: wgpu::Origin3d {
                        x: 0,
                        y: 0,
                        z: face.layer(),
                    },
                    aspect: wgpu::TextureAspect::All,
                },
                img.as_raw(),
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(4 * size),
                    rows_per_image: Some(size),
                },
                wgpu::Extent3d {
                    width: size,
                    height: size,
                    depth_or_array_layers: 1,
                },
            );
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor {
            label: Some(&format!("skybox_{label}_cube_view")),
            dimension: Some(wgpu::TextureViewDimension::Cube),
            ..Default::default()
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("skybox_{label}_bind_group")),
            layout: &pipeline.texture_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&pipeline.sampler),
                },
            ],
        });

        tracing::info!(label, size, "skybox cubemap uploaded");

        Self {
            _texture: texture,
            bind_group,
            mesh: Arc::clone(pipeline.mesh()),
            size,
        }
    }

    /// Face edge length in pixels.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Record the skybox draw. Uniforms must already be set on `pipeline`.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>, pipeline: &SkyboxPipeline) {
        pass.set_pipeline(&pipeline.pipeline);
        pass.set_bind_group(0, &pipeline.camera_bind_group, &[]);
        pass.set_bind_group(1, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, self.mesh.vertex_buffer.slice(..));
        pass.draw(0..self.mesh.vertex_count, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_has_36_unit_vertices() {
        let vertices = cube_vertices();
        assert_eq!(vertices.len(), 36);
        for v in &vertices {
            assert!(v.position.iter().all(|c| c.abs() == 1.0));
        }
    }

    #[test]
    fn each_cube_side_has_two_triangles() {
        let vertices = cube_vertices();
        for axis in 0..3 {
            for sign in [-1.0f32, 1.0] {
                let on_side = vertices
                    .chunks(3)
                    .filter(|tri| tri.iter().all(|v| v.position[axis] == sign))
                    .count();
                assert_eq!(on_side, 2, "axis {axis} sign {sign}");
            }
        }
    }

    #[test]
    fn embedded_shader_loads() {
        let source = SkyboxShader::Embedded.load().unwrap();
        assert!(source.contains("fn vs_main"));
        assert!(source.contains("fn fs_main"));
        assert!(source.contains("texture_cube"));
    }

    #[test]
    fn missing_shader_file_is_io_error() {
        let shader = SkyboxShader::File(PathBuf::from("/nonexistent/skybox.wgsl"));
        let err = shader.load().unwrap_err();
        assert!(matches!(err, ShaderError::Io { .. }));
        assert!(err.to_string().contains("skybox.wgsl"));
    }

    #[test]
    fn uniforms_are_column_major() {
        let view = Mat4::from_translation(glam::Vec3::new(1.0, 2.0, 3.0));
        let uniforms = CameraUniforms {
            view: view.to_cols_array_2d(),
            projection: Mat4::IDENTITY.to_cols_array_2d(),
        };
        assert_eq!(uniforms.view[3], [1.0, 2.0, 3.0, 1.0]);
    }
}
