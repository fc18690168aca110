//! GPU mesh rendering with opaque and alpha-blended passes

use crate::GpuContext;
use bytemuck::{Pod, Zeroable};
use nalgebra::{Matrix4, Point3};
use std::sync::Arc;
use stereoatlas_core::{Error, Result, TriangleMesh};
use wgpu::util::DeviceExt;
use winit::window::Window;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Alpha at or above this is drawn in the opaque pass
pub const OPAQUE_ALPHA: f32 = 0.999;

/// Vertex data for mesh rendering
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl MeshVertex {
    /// Vertex buffer layout descriptor
    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // Position
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                // Normal
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

/// Camera uniform data
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub view_pos: [f32; 4],
}

impl CameraUniform {
    pub fn new(view_proj: Matrix4<f32>, eye: Point3<f32>) -> Self {
        Self {
            view_proj: view_proj.into(),
            view_pos: [eye.x, eye.y, eye.z, 1.0],
        }
    }
}

/// Lighting coefficients for one shading style
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialParams {
    pub ambient: f32,
    pub diffuse: f32,
    pub specular: f32,
    pub shininess: f32,
    /// Quantise diffuse light into this many bands; 0 disables
    pub bands: f32,
}

impl Default for MaterialParams {
    fn default() -> Self {
        Self {
            ambient: 0.2,
            diffuse: 0.8,
            specular: 0.0,
            shininess: 1.0,
            bands: 0.0,
        }
    }
}

/// Per-draw uniform data
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct DrawUniform {
    pub color: [f32; 4],
    pub lighting: [f32; 4],
    pub params: [f32; 4],
}

impl DrawUniform {
    pub fn new(color: [f32; 4], material: MaterialParams) -> Self {
        Self {
            color,
            lighting: [material.ambient, material.diffuse, material.specular, material.shininess],
            params: [material.bands, 0.0, 0.0, 0.0],
        }
    }
}

/// Mesh rendering configuration
#[derive(Debug, Clone)]
pub struct MeshRenderConfig {
    pub background_color: [f64; 4],
    pub enable_multisampling: bool,
}

impl Default for MeshRenderConfig {
    fn default() -> Self {
        Self {
            background_color: [1.0, 1.0, 1.0, 1.0],
            enable_multisampling: true,
        }
    }
}

/// Mesh data in GPU layout, ready for upload
#[derive(Debug, Clone)]
pub struct GpuMesh {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
    pub draw: DrawUniform,
}

impl GpuMesh {
    pub fn is_opaque(&self) -> bool {
        self.draw.color[3] >= OPAQUE_ALPHA
    }
}

/// Convert a triangle mesh to GPU mesh format.
///
/// Vertex normals are computed when the mesh has none.
pub fn mesh_to_gpu_mesh(mesh: &TriangleMesh, color: [f32; 3], alpha: f32, material: MaterialParams) -> GpuMesh {
    let computed;
    let normals = match mesh.normals.as_ref() {
        Some(n) if n.len() == mesh.vertices.len() => n,
        _ => {
            computed = mesh.calculate_vertex_normals();
            &computed
        }
    };

    let vertices = mesh
        .vertices
        .iter()
        .zip(normals.iter())
        .map(|(p, n)| MeshVertex {
            position: [p.x, p.y, p.z],
            normal: [n.x, n.y, n.z],
        })
        .collect();

    let indices = mesh
        .faces
        .iter()
        .flat_map(|f| [f[0] as u32, f[1] as u32, f[2] as u32])
        .collect();

    GpuMesh {
        vertices,
        indices,
        draw: DrawUniform::new([color[0], color[1], color[2], alpha.clamp(0.0, 1.0)], material),
    }
}

/// One camera's view of the uploaded meshes
#[derive(Debug, Clone)]
pub struct ViewPass {
    pub camera: CameraUniform,
    /// Normalised viewport `[x, y, width, height]`; `None` covers the surface
    pub viewport: Option<[f32; 4]>,
    /// Indices into the uploaded meshes, drawn in this order within each pass
    pub order: Vec<usize>,
}

struct UploadedMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    bind_group: wgpu::BindGroup,
    opaque: bool,
}

struct CameraSlot {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// Mesh renderer drawing opaque geometry first, then alpha-blended geometry
/// without depth writes.
pub struct MeshRenderer<'window> {
    pub gpu_context: GpuContext,
    pub surface: wgpu::Surface<'window>,
    pub surface_config: wgpu::SurfaceConfiguration,
    pub config: MeshRenderConfig,
    opaque_pipeline: wgpu::RenderPipeline,
    blend_pipeline: wgpu::RenderPipeline,
    camera_layout: wgpu::BindGroupLayout,
    draw_layout: wgpu::BindGroupLayout,
    cameras: Vec<CameraSlot>,
    // One slot per mesh passed to `set_meshes`; empty meshes upload nothing
    meshes: Vec<Option<UploadedMesh>>,
    depth_view: wgpu::TextureView,
    msaa_view: Option<wgpu::TextureView>,
    sample_count: u32,
}

impl MeshRenderer<'static> {
    /// Create a renderer presenting to `window`
    pub async fn new(window: Arc<Window>, config: MeshRenderConfig) -> Result<Self> {
        let instance = GpuContext::create_instance();
        let size = window.inner_size();
        let surface = instance
            .create_surface(window)
            .map_err(|e| Error::Gpu(format!("Failed to create surface: {:?}", e)))?;
        let gpu_context = GpuContext::for_surface(instance, &surface).await?;

        let surface_caps = surface.get_capabilities(&gpu_context.adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| Error::Gpu("Surface reports no supported formats".to_string()))?;

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&gpu_context.device, &surface_config);

        let sample_count = if config.enable_multisampling { 4 } else { 1 };

        let camera_layout = gpu_context.create_uniform_layout("camera_bind_group_layout");
        let draw_layout = gpu_context.create_uniform_layout("draw_bind_group_layout");

        let shader = gpu_context.create_shader_module("Mesh Shader", include_str!("shaders/mesh.wgsl"));

        let opaque_pipeline = Self::create_render_pipeline(
            &gpu_context.device,
            &[&camera_layout, &draw_layout],
            &shader,
            surface_format,
            sample_count,
            false,
        );
        let blend_pipeline = Self::create_render_pipeline(
            &gpu_context.device,
            &[&camera_layout, &draw_layout],
            &shader,
            surface_format,
            sample_count,
            true,
        );

        let depth_view = Self::create_depth_view(&gpu_context.device, &surface_config, sample_count);
        let msaa_view = Self::create_msaa_view(&gpu_context.device, &surface_config, sample_count);

        Ok(Self {
            gpu_context,
            surface,
            surface_config,
            config,
            opaque_pipeline,
            blend_pipeline,
            camera_layout,
            draw_layout,
            cameras: Vec::new(),
            meshes: Vec::new(),
            depth_view,
            msaa_view,
            sample_count,
        })
    }
}

impl<'window> MeshRenderer<'window> {
    /// Create a render pipeline for mesh rendering
    fn create_render_pipeline(
        device: &wgpu::Device,
        bind_group_layouts: &[&wgpu::BindGroupLayout],
        shader: &wgpu::ShaderModule,
        surface_format: wgpu::TextureFormat,
        sample_count: u32,
        blended: bool,
    ) -> wgpu::RenderPipeline {
        let label = if blended { "Blended" } else { "Opaque" };
        let render_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(&format!("{} Mesh Render Pipeline Layout", label)),
            bind_group_layouts,
            push_constant_ranges: &[],
        });

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(&format!("{} Mesh Render Pipeline", label)),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: "vs_main",
                buffers: &[MeshVertex::desc()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: if blended {
                        Some(wgpu::BlendState::ALPHA_BLENDING)
                    } else {
                        Some(wgpu::BlendState::REPLACE)
                    },
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // Atlas meshes are not consistently wound
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: !blended,
                depth_compare: wgpu::CompareFunction::LessEqual,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: sample_count,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
        })
    }

    fn create_depth_view(device: &wgpu::Device, config: &wgpu::SurfaceConfiguration, sample_count: u32) -> wgpu::TextureView {
        device
            .create_texture(&wgpu::TextureDescriptor {
                label: Some("Depth Texture"),
                size: wgpu::Extent3d {
                    width: config.width,
                    height: config.height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count,
                dimension: wgpu::TextureDimension::D2,
                format: DEPTH_FORMAT,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                view_formats: &[],
            })
            .create_view(&wgpu::TextureViewDescriptor::default())
    }

    fn create_msaa_view(device: &wgpu::Device, config: &wgpu::SurfaceConfiguration, sample_count: u32) -> Option<wgpu::TextureView> {
        if sample_count == 1 {
            return None;
        }
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("MSAA Texture"),
            size: wgpu::Extent3d {
                width: config.width,
                height: config.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count,
            dimension: wgpu::TextureDimension::D2,
            format: config.format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        Some(texture.create_view(&wgpu::TextureViewDescriptor::default()))
    }

    /// Replace the uploaded meshes
    pub fn set_meshes(&mut self, meshes: &[GpuMesh]) {
        let device = &self.gpu_context.device;
        self.meshes = meshes
            .iter()
            .map(|mesh| {
                if mesh.indices.is_empty() {
                    return None;
                }
                let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Mesh Vertex Buffer"),
                    contents: bytemuck::cast_slice(&mesh.vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                });
                let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Mesh Index Buffer"),
                    contents: bytemuck::cast_slice(&mesh.indices),
                    usage: wgpu::BufferUsages::INDEX,
                });
                let draw_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Draw Uniform Buffer"),
                    contents: bytemuck::bytes_of(&mesh.draw),
                    usage: wgpu::BufferUsages::UNIFORM,
                });
                let bind_group = self
                    .gpu_context
                    .create_uniform_bind_group("draw_bind_group", &self.draw_layout, &draw_buffer);
                Some(UploadedMesh {
                    vertex_buffer,
                    index_buffer,
                    index_count: mesh.indices.len() as u32,
                    bind_group,
                    opaque: mesh.is_opaque(),
                })
            })
            .collect();
        tracing::debug!(meshes = self.mesh_count(), "uploaded meshes");
    }

    /// Number of non-empty meshes currently uploaded
    pub fn mesh_count(&self) -> usize {
        self.meshes.iter().flatten().count()
    }

    /// Resize renderer surface
    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.surface_config.width = new_size.width;
            self.surface_config.height = new_size.height;
            self.surface.configure(&self.gpu_context.device, &self.surface_config);
            self.depth_view = Self::create_depth_view(&self.gpu_context.device, &self.surface_config, self.sample_count);
            self.msaa_view = Self::create_msaa_view(&self.gpu_context.device, &self.surface_config, self.sample_count);
        }
    }

    /// Surface aspect ratio (width / height)
    pub fn aspect_ratio(&self) -> f32 {
        self.surface_config.width as f32 / self.surface_config.height.max(1) as f32
    }

    fn ensure_camera_slots(&mut self, count: usize) {
        while self.cameras.len() < count {
            let buffer = self.gpu_context.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("Camera Buffer"),
                size: std::mem::size_of::<CameraUniform>() as wgpu::BufferAddress,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            let bind_group = self
                .gpu_context
                .create_uniform_bind_group("camera_bind_group", &self.camera_layout, &buffer);
            self.cameras.push(CameraSlot { buffer, bind_group });
        }
    }

    /// Render one frame with one pass per view.
    ///
    /// Lost or outdated surfaces are reconfigured and the frame is skipped;
    /// other surface errors are returned.
    pub fn render(&mut self, views: &[ViewPass]) -> Result<FrameStatus> {
        if views.is_empty() {
            return Ok(FrameStatus::Skipped);
        }
        self.ensure_camera_slots(views.len());
        for (slot, view) in self.cameras.iter().zip(views) {
            self.gpu_context
                .queue
                .write_buffer(&slot.buffer, 0, bytemuck::bytes_of(&view.camera));
        }

        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(e) => {
                let status = surface_error_status(&e)?;
                tracing::debug!("surface unavailable ({:?}), reconfiguring", e);
                self.surface.configure(&self.gpu_context.device, &self.surface_config);
                return Ok(status);
            }
        };
        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());

        let (color_attachment, resolve_target) = match self.msaa_view.as_ref() {
            Some(msaa_view) => (msaa_view, Some(&view)),
            None => (&view, None),
        };

        let mut encoder = self
            .gpu_context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Mesh Render Encoder"),
            });

        let bg = self.config.background_color;
        let setups = plan_passes(views, self.surface_config.width, self.surface_config.height);

        for ((slot, pass), setup) in self.cameras.iter().zip(views).zip(setups) {
            let load = if setup.clear_color {
                wgpu::LoadOp::Clear(wgpu::Color {
                    r: bg[0],
                    g: bg[1],
                    b: bg[2],
                    a: bg[3],
                })
            } else {
                wgpu::LoadOp::Load
            };
            let depth_load = if setup.clear_depth {
                wgpu::LoadOp::Clear(1.0)
            } else {
                wgpu::LoadOp::Load
            };

            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Mesh Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: color_attachment,
                    resolve_target,
                    ops: wgpu::Operations {
                        load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: depth_load,
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            let [x, y, w, h] = setup.rect;
            render_pass.set_viewport(x as f32, y as f32, w as f32, h as f32, 0.0, 1.0);
            render_pass.set_scissor_rect(x, y, w, h);
            render_pass.set_bind_group(0, &slot.bind_group, &[]);

            for opaque in [true, false] {
                render_pass.set_pipeline(if opaque {
                    &self.opaque_pipeline
                } else {
                    &self.blend_pipeline
                });
                for mesh in pass
                    .order
                    .iter()
                    .filter_map(|&i| self.meshes.get(i).and_then(Option::as_ref))
                    .filter(|m| m.opaque == opaque)
                {
                    render_pass.set_bind_group(1, &mesh.bind_group, &[]);
                    render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                    render_pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                    render_pass.draw_indexed(0..mesh.index_count, 0, 0..1);
                }
            }
        }

        self.gpu_context.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(FrameStatus::Presented)
    }
}

/// Result of a successful call to [`MeshRenderer::render`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    Presented,
    /// No frame was shown; draw again on the next redraw
    Skipped,
}

/// Whether a surface error is worth retrying
pub fn surface_error_status(error: &wgpu::SurfaceError) -> Result<FrameStatus> {
    match error {
        wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost => {
            Ok(FrameStatus::Skipped)
        }
        other => Err(Error::Gpu(format!("Failed to get surface texture: {:?}", other))),
    }
}

/// Attachment setup of one view's render pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassSetup {
    /// Clear to the background; later views draw over earlier ones
    pub clear_color: bool,
    pub clear_depth: bool,
    /// Pixel rectangle `[x, y, width, height]` for viewport and scissor
    pub rect: [u32; 4],
}

/// One render pass per view. Every view gets a fresh depth buffer so an
/// inset is never depth tested against the main view.
pub fn plan_passes(views: &[ViewPass], width: u32, height: u32) -> Vec<PassSetup> {
    views
        .iter()
        .enumerate()
        .map(|(i, view)| PassSetup {
            clear_color: i == 0,
            clear_depth: true,
            rect: pixel_rect(view.viewport, width.max(1), height.max(1)),
        })
        .collect()
}

fn pixel_rect(viewport: Option<[f32; 4]>, width: u32, height: u32) -> [u32; 4] {
    let [x, y, w, h] = viewport.unwrap_or([0.0, 0.0, 1.0, 1.0]);
    let to_px = |v: f32, extent: u32| ((v.clamp(0.0, 1.0) * extent as f32).round() as u32).min(extent);

    let px = to_px(x, width).min(width - 1);
    let py = to_px(y, height).min(height - 1);
    [
        px,
        py,
        to_px(w, width).clamp(1, width - px),
        to_px(h, height).clamp(1, height - py),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use stereoatlas_core::Point3f;

    fn view(viewport: Option<[f32; 4]>) -> ViewPass {
        ViewPass {
            camera: CameraUniform::new(Matrix4::identity(), Point3::origin()),
            viewport,
            order: vec![0],
        }
    }

    #[test]
    fn test_vertex_layout_size() {
        assert_eq!(std::mem::size_of::<MeshVertex>(), 24);
        assert_eq!(std::mem::size_of::<CameraUniform>(), 80);
        assert_eq!(std::mem::size_of::<DrawUniform>(), 48);
    }

    #[test]
    fn test_mesh_to_gpu_mesh() {
        let mesh = TriangleMesh::cylinder(Point3f::origin(), Point3f::new(0.0, 0.0, 10.0), 1.0, 8);
        let gpu = mesh_to_gpu_mesh(&mesh, [1.0, 0.0, 0.0], 0.2, MaterialParams::default());
        assert_eq!(gpu.vertices.len(), mesh.vertex_count());
        assert_eq!(gpu.indices.len(), mesh.face_count() * 3);
        assert!(!gpu.is_opaque());
        assert_eq!(gpu.draw.color, [1.0, 0.0, 0.0, 0.2]);
    }

    #[test]
    fn test_normals_computed_when_missing() {
        let mesh = TriangleMesh::from_vertices_and_faces(
            vec![Point3f::new(0.0, 0.0, 0.0), Point3f::new(1.0, 0.0, 0.0), Point3f::new(0.0, 1.0, 0.0)],
            vec![[0, 1, 2]],
        );
        let gpu = mesh_to_gpu_mesh(&mesh, [1.0; 3], 1.0, MaterialParams::default());
        assert!(gpu.is_opaque());
        for v in &gpu.vertices {
            assert_relative_eq!(v.normal[2], 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_alpha_is_clamped() {
        let mesh = TriangleMesh::new();
        let gpu = mesh_to_gpu_mesh(&mesh, [0.5; 3], 3.0, MaterialParams::default());
        assert_eq!(gpu.draw.color[3], 1.0);
    }

    #[test]
    fn test_inset_view_gets_own_depth_clear() {
        let views = [view(None), view(Some([0.0, 0.75, 0.25, 0.25]))];
        let setups = plan_passes(&views, 1200, 800);
        assert_eq!(
            setups,
            vec![
                PassSetup {
                    clear_color: true,
                    clear_depth: true,
                    rect: [0, 0, 1200, 800],
                },
                PassSetup {
                    clear_color: false,
                    clear_depth: true,
                    rect: [0, 600, 300, 200],
                },
            ]
        );
    }

    #[test]
    fn test_viewport_rect_stays_on_surface() {
        let setups = plan_passes(&[view(Some([0.9, 0.9, 0.5, 0.5]))], 100, 100);
        assert_eq!(setups[0].rect, [90, 90, 10, 10]);

        let setups = plan_passes(&[view(Some([1.0, 0.0, 0.0, 1.0]))], 100, 100);
        assert_eq!(setups[0].rect, [99, 0, 1, 100]);
    }

    #[test]
    fn test_surface_errors() {
        assert_eq!(surface_error_status(&wgpu::SurfaceError::Lost).unwrap(), FrameStatus::Skipped);
        assert_eq!(surface_error_status(&wgpu::SurfaceError::Outdated).unwrap(), FrameStatus::Skipped);
        assert_eq!(surface_error_status(&wgpu::SurfaceError::Timeout).unwrap(), FrameStatus::Skipped);
        assert!(matches!(
            surface_error_status(&wgpu::SurfaceError::OutOfMemory),
            Err(Error::Gpu(_))
        ));
    }
}
