//! Window viewer for composed atlas scenes

use std::sync::Arc;
use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, Event, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    keyboard::{Key, NamedKey},
    window::WindowBuilder,
};

use crate::actor::Actor;
use crate::camera::Camera;
use crate::scene::{ComposedScene, SceneRenderer};
use nalgebra::Point3;
use stereoatlas_core::{Color, Drawable, Error, Result};
use stereoatlas_gpu::{
    mesh_to_gpu_mesh, CameraUniform, FrameStatus, GpuMesh, MeshRenderConfig, MeshRenderer, ViewPass,
};
use tracing::{debug, error, info};

/// Overview viewport in the bottom-left corner, as `[x, y, width, height]`
const INSET_VIEWPORT: [f32; 4] = [0.0, 0.75, 0.25, 0.25];
const INSET_ALPHA: f32 = 0.5;

const ORBIT_SPEED: f32 = 0.01;
const SCROLL_ZOOM_STEP: f32 = 0.1;

/// Opaque actors in insertion order, then translucent actors back to front
/// as seen from `eye`.
pub fn draw_order(actors: &[Actor], eye: &Point3<f32>) -> Vec<usize> {
    let (translucent, mut order): (Vec<usize>, Vec<usize>) =
        (0..actors.len()).partition(|&i| actors[i].is_translucent());

    let mut by_depth: Vec<(f32, usize)> = translucent
        .into_iter()
        .map(|i| ((actors[i].center() - eye).norm(), i))
        .collect();
    by_depth.sort_by(|a, b| b.0.total_cmp(&a.0));

    order.extend(by_depth.into_iter().map(|(_, i)| i));
    order
}

/// Upload form of every actor, followed by the inset mesh when present
pub fn scene_to_gpu_meshes(scene: &ComposedScene) -> Vec<GpuMesh> {
    let material = scene.settings.shader_style.material();
    let mut meshes: Vec<GpuMesh> = scene
        .actors
        .iter()
        .map(|actor| mesh_to_gpu_mesh(&actor.mesh, actor.color.to_array(), actor.alpha, material))
        .collect();
    if let Some(inset) = &scene.inset {
        meshes.push(mesh_to_gpu_mesh(inset, Color::GREY.to_array(), INSET_ALPHA, material));
    }
    meshes
}

/// Shows a composed scene in a native window until it is closed.
///
/// Left drag orbits, right drag pans, the wheel zooms, `R` restores the
/// initial view and `Esc`/`Q` close the window.
#[derive(Debug, Clone)]
pub struct WindowViewer {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub config: MeshRenderConfig,
}

impl Default for WindowViewer {
    fn default() -> Self {
        Self {
            title: "stereoatlas".to_string(),
            width: 1200,
            height: 800,
            config: MeshRenderConfig::default(),
        }
    }
}

impl WindowViewer {
    pub fn new(title: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            title: title.into(),
            width,
            height,
            ..Default::default()
        }
    }
}

struct ViewState {
    camera: Camera,
    inset_camera: Option<Camera>,
    last_mouse_pos: Option<PhysicalPosition<f64>>,
    orbiting: bool,
    panning: bool,
}

impl ViewState {
    fn new(scene: &ComposedScene, aspect_ratio: f32, zoom: f32) -> Self {
        let (min, max) = scene.bounds;
        let mut camera = Camera::framing(min, max, aspect_ratio);
        camera.zoom(zoom);
        camera.set_home();

        let inset_camera = scene.inset.as_ref().map(|mesh| {
            let (min, max) = mesh.bounding_box();
            Camera::framing(min, max, aspect_ratio)
        });

        Self {
            camera,
            inset_camera,
            last_mouse_pos: None,
            orbiting: false,
            panning: false,
        }
    }

    fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.camera.aspect_ratio = aspect_ratio;
        if let Some(inset) = self.inset_camera.as_mut() {
            inset.aspect_ratio = aspect_ratio;
        }
    }

    fn views(&self, scene: &ComposedScene) -> Vec<ViewPass> {
        let mut views = vec![ViewPass {
            camera: CameraUniform::new(self.camera.view_projection(), self.camera.position),
            viewport: None,
            order: draw_order(&scene.actors, &self.camera.position),
        }];
        if let Some(inset) = &self.inset_camera {
            views.push(ViewPass {
                camera: CameraUniform::new(inset.view_projection(), inset.position),
                viewport: Some(INSET_VIEWPORT),
                order: vec![scene.actors.len()],
            });
        }
        views
    }
}

impl SceneRenderer for WindowViewer {
    fn render(&mut self, scene: &ComposedScene, zoom: f32) -> Result<()> {
        info!(title = %self.title, actors = scene.actors.len(), zoom, "opening viewer window");

        let event_loop = EventLoop::new()
            .map_err(|e| Error::Visualization(format!("Failed to create event loop: {}", e)))?;
        let window = Arc::new(
            WindowBuilder::new()
                .with_title(self.title.as_str())
                .with_inner_size(winit::dpi::LogicalSize::new(self.width as f64, self.height as f64))
                .build(&event_loop)
                .map_err(|e| Error::Visualization(format!("Failed to create window: {}", e)))?,
        );

        let background = scene.settings.background;
        let config = MeshRenderConfig {
            background_color: [background.r as f64, background.g as f64, background.b as f64, 1.0],
            ..self.config.clone()
        };
        let mut renderer = pollster::block_on(MeshRenderer::new(window.clone(), config))?;
        renderer.set_meshes(&scene_to_gpu_meshes(scene));

        let mut state = ViewState::new(scene, renderer.aspect_ratio(), zoom);
        debug!(camera = ?state.camera.position, fov = state.camera.fov, "initial view");

        let mut failure = None;
        let failure_slot = &mut failure;

        event_loop
            .run(move |event, target| {
                target.set_control_flow(ControlFlow::Wait);

                let Event::WindowEvent { event, .. } = event else {
                    return;
                };
                match event {
                    WindowEvent::CloseRequested => target.exit(),
                    WindowEvent::Resized(new_size) => {
                        renderer.resize(new_size);
                        state.set_aspect_ratio(renderer.aspect_ratio());
                        window.request_redraw();
                    }
                    WindowEvent::MouseInput { state: button_state, button, .. } => {
                        let pressed = button_state == ElementState::Pressed;
                        match button {
                            MouseButton::Left => state.orbiting = pressed,
                            MouseButton::Right => state.panning = pressed,
                            _ => {}
                        }
                    }
                    WindowEvent::CursorMoved { position, .. } => {
                        if let Some(last) = state.last_mouse_pos {
                            let dx = (position.x - last.x) as f32;
                            let dy = (position.y - last.y) as f32;
                            if state.orbiting {
                                state.camera.orbit(dx * ORBIT_SPEED, dy * ORBIT_SPEED);
                                window.request_redraw();
                            } else if state.panning {
                                let height = window.inner_size().height.max(1) as f32;
                                state.camera.pan(dx / height, dy / height);
                                window.request_redraw();
                            }
                        }
                        state.last_mouse_pos = Some(position);
                    }
                    WindowEvent::MouseWheel { delta, .. } => {
                        let scroll = match delta {
                            MouseScrollDelta::LineDelta(_, y) => y,
                            MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 100.0,
                        };
                        state.camera.zoom((1.0 + scroll * SCROLL_ZOOM_STEP).max(0.1));
                        window.request_redraw();
                    }
                    WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                        match &event.logical_key {
                            Key::Named(NamedKey::Escape) => target.exit(),
                            Key::Character(c) => match c.as_str() {
                                "q" | "Q" => target.exit(),
                                "r" | "R" => {
                                    state.camera.reset();
                                    debug!("camera reset");
                                    window.request_redraw();
                                }
                                _ => {}
                            },
                            _ => {}
                        }
                    }
                    WindowEvent::RedrawRequested => match renderer.render(&state.views(scene)) {
                        Ok(FrameStatus::Presented) => {}
                        Ok(FrameStatus::Skipped) => {
                            debug!("frame skipped");
                            window.request_redraw();
                        }
                        Err(e) => {
                            error!("closing viewer: {}", e);
                            *failure_slot = Some(e);
                            target.exit();
                        }
                    },
                    _ => {}
                }
            })
            .map_err(|e| Error::Visualization(format!("Event loop error: {}", e)))?;

        if let Some(e) = failure {
            return Err(e);
        }
        info!("viewer window closed");
        Ok(())
    }
}
