use anyhow::Result;
use clap::Parser;
use egui::Context as EguiContext;
use skyview_common::{FrameClock, FrameTimer, SkyboxVariant, VariantTable};
use skyview_input::{InputEvent, InputHandler, Key, KeyState};
use skyview_kernel::{SceneContext, Viewport};
use skyview_render::{FpsCamera, TextureLoadError, face_paths};
use skyview_render_wgpu::{GpuSkybox, ShaderError, SkyboxShader, WgpuRenderer};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, ElementState, KeyEvent, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{CursorGrabMode, Window, WindowId};

/// Pixel-precise scroll deltas (touchpads) are divided by this to get lines.
const PIXELS_PER_LINE: f32 = 20.0;

#[derive(Parser)]
#[command(name = "skyview-desktop", about = "Skybox viewer with a free-flying camera")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Directory holding one sub-directory of face images per skybox
    #[arg(long, default_value = "./textures")]
    assets: PathBuf,

    /// Face image file extension
    #[arg(long, default_value = "tga")]
    ext: String,

    /// WGSL skybox shader (defaults to the built-in one)
    #[arg(long)]
    shader: Option<PathBuf>,

    /// Initial window width
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Initial window height
    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Camera speed in units per second
    #[arg(long, default_value_t = 2.5)]
    speed: f32,

    /// Mouse look sensitivity in degrees per pixel
    #[arg(long, default_value_t = 0.1)]
    sensitivity: f32,
}

/// Fatal startup errors.
#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no compatible GPU adapter found")]
    NoAdapter,
    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("failed to load {variant} skybox: {source}")]
    Texture {
        variant: SkyboxVariant,
        #[source]
        source: TextureLoadError,
    },
    #[error(transparent)]
    Shader(#[from] ShaderError),
}

/// Startup settings taken from the command line.
struct Settings {
    assets: PathBuf,
    ext: String,
    shader: SkyboxShader,
    size: PhysicalSize<u32>,
}

/// GPU and window resources, created once the event loop resumes.
struct GpuState {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: WgpuRenderer,
    skyboxes: VariantTable<GpuSkybox>,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

struct SkyviewApp {
    settings: Settings,
    scene: SceneContext,
    clock: FrameClock,
    frame_timer: FrameTimer,
    /// Unbounded cursor position built from raw mouse motion, so look input
    /// never stops at the window edge.
    virtual_cursor: (f64, f64),
    gpu: Option<GpuState>,
    egui_ctx: EguiContext,
    init_error: Option<AppError>,
}

impl SkyviewApp {
    fn new(cli: Cli) -> Self {
        let camera = FpsCamera::default()
            .with_speed(cli.speed)
            .with_sensitivity(cli.sensitivity);
        let viewport = Viewport::new(cli.width, cli.height);
        Self {
            settings: Settings {
                assets: cli.assets,
                ext: cli.ext,
                shader: cli.shader.map_or(SkyboxShader::Embedded, SkyboxShader::File),
                size: PhysicalSize::new(cli.width, cli.height),
            },
            scene: SceneContext::new(camera, viewport),
            clock: FrameClock::new(),
            frame_timer: FrameTimer::new(120),
            virtual_cursor: (0.0, 0.0),
            gpu: None,
            egui_ctx: EguiContext::default(),
            init_error: None,
        }
    }

    fn init_gpu(&self, event_loop: &ActiveEventLoop) -> Result<GpuState, AppError> {
        let attrs = Window::default_attributes()
            .with_title("Sky Box")
            .with_inner_size(self.settings.size);
        let window = Arc::new(event_loop.create_window(attrs)?);

        let grabbed = window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
        if let Err(e) = grabbed {
            tracing::warn!("cursor grab unavailable: {e}");
        }
        window.set_cursor_visible(false);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or(AppError::NoAdapter)?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("skyview_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let renderer = WgpuRenderer::new(
            &device,
            surface_format,
            config.width,
            config.height,
            &self.settings.shader,
        )?;

        // Every variant is loaded up front; any failure aborts startup.
        let skyboxes = VariantTable::try_from_fn(|variant| {
            let paths = face_paths(&self.settings.assets, variant, &self.settings.ext);
            GpuSkybox::from_paths(
                &device,
                &queue,
                renderer.pipeline(),
                &paths,
                variant.dir_name(),
            )
            .map_err(|source| AppError::Texture { variant, source })
        })?;

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );

        Ok(GpuState {
            window,
            surface,
            device,
            queue,
            config,
            renderer,
            skyboxes,
            egui_winit,
            egui_renderer,
        })
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if let Some(gpu) = &mut self.gpu {
            gpu.config.width = new_size.width.max(1);
            gpu.config.height = new_size.height.max(1);
            gpu.surface.configure(&gpu.device, &gpu.config);
            gpu.renderer
                .resize(&gpu.device, gpu.config.width, gpu.config.height);
        }
        self.scene.on_event(&InputEvent::Resized {
            width: new_size.width,
            height: new_size.height,
        });
    }

    fn render_frame(&mut self) {
        let Some(gpu) = &mut self.gpu else {
            return;
        };

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.surface.configure(&gpu.device, &gpu.config);
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };

        let target = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let view = self.scene.render_view();
        gpu.renderer.render(
            &gpu.device,
            &gpu.queue,
            &target,
            &view,
            gpu.skyboxes.get(view.variant),
        );

        if hud_takes_input(&self.scene) {
            let raw_input = gpu.egui_winit.take_egui_input(&gpu.window);
            let full_output = self.egui_ctx.run(raw_input, |ctx| {
                draw_hud(ctx, &self.scene, &self.frame_timer);
            });

            gpu.egui_winit
                .handle_platform_output(&gpu.window, full_output.platform_output);

            let paint_jobs = self
                .egui_ctx
                .tessellate(full_output.shapes, full_output.pixels_per_point);

            let screen_descriptor = egui_wgpu::ScreenDescriptor {
                size_in_pixels: [gpu.config.width, gpu.config.height],
                pixels_per_point: full_output.pixels_per_point,
            };

            for (id, image_delta) in &full_output.textures_delta.set {
                gpu.egui_renderer
                    .update_texture(&gpu.device, &gpu.queue, *id, image_delta);
            }
            let mut encoder = gpu
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("egui_encoder"),
                });
            gpu.egui_renderer.update_buffers(
                &gpu.device,
                &gpu.queue,
                &mut encoder,
                &paint_jobs,
                &screen_descriptor,
            );
            {
                let mut pass = encoder
                    .begin_render_pass(&wgpu::RenderPassDescriptor {
                        label: Some("egui_pass"),
                        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                            view: &target,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Load,
                                store: wgpu::StoreOp::Store,
                            },
                        })],
                        depth_stencil_attachment: None,
                        ..Default::default()
                    })
                    .forget_lifetime();
                gpu.egui_renderer
                    .render(&mut pass, &paint_jobs, &screen_descriptor);
            }
            gpu.queue.submit(std::iter::once(encoder.finish()));
            for id in &full_output.textures_delta.free {
                gpu.egui_renderer.free_texture(id);
            }
        }

        output.present();
        gpu.window.request_redraw();
    }
}

impl ApplicationHandler for SkyviewApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }

        match self.init_gpu(event_loop) {
            Ok(gpu) => {
                let size = gpu.window.inner_size();
                self.gpu = Some(gpu);
                self.scene.on_event(&InputEvent::Resized {
                    width: size.width,
                    height: size.height,
                });
                // asset loading is not part of the first frame
                self.clock = FrameClock::new();
            }
            Err(e) => {
                tracing::error!("startup failed: {e}");
                self.init_error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // egui only drains its queue while the HUD is drawn
        if hud_takes_input(&self.scene) {
            if let Some(gpu) = &mut self.gpu {
                let response = gpu.egui_winit.on_window_event(&gpu.window, &event);
                if response.consumed {
                    return;
                }
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                self.resize(new_size);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: key_state,
                        ..
                    },
                ..
            } => {
                if let Some(key) = map_key(code) {
                    let state = match key_state {
                        ElementState::Pressed => KeyState::Pressed,
                        ElementState::Released => KeyState::Released,
                    };
                    self.scene.on_event(&InputEvent::Key { key, state });
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let y = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / PIXELS_PER_LINE,
                };
                self.scene.on_event(&InputEvent::Scroll { y });
            }
            WindowEvent::RedrawRequested => {
                let dt = self.clock.tick();
                self.frame_timer.record(dt);
                self.scene.step(dt);

                if self.scene.should_quit() {
                    event_loop.exit();
                    return;
                }
                self.render_frame();
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.virtual_cursor.0 += delta.0;
            self.virtual_cursor.1 += delta.1;
            let (x, y) = self.virtual_cursor;
            self.scene.on_event(&InputEvent::CursorMoved { x, y });
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(gpu) = &self.gpu {
            gpu.window.request_redraw();
        }
    }
}

fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::KeyW => Some(Key::W),
        KeyCode::KeyA => Some(Key::A),
        KeyCode::KeyS => Some(Key::S),
        KeyCode::KeyD => Some(Key::D),
        KeyCode::Space => Some(Key::Space),
        KeyCode::Escape => Some(Key::Escape),
        KeyCode::F1 => Some(Key::ToggleHud),
        _ => None,
    }
}

/// Whether window events are forwarded to egui this frame. Must match the
/// condition under which the HUD pass takes egui's input.
fn hud_takes_input(scene: &SceneContext) -> bool {
    scene.hud_visible()
}

fn draw_hud(ctx: &EguiContext, scene: &SceneContext, timer: &FrameTimer) {
    let camera = scene.camera();
    let p = camera.position;

    egui::Window::new("Skybox")
        .default_pos([10.0, 10.0])
        .resizable(false)
        .show(ctx, |ui| {
            ui.label(format!("Variant: {}", scene.active_variant()));
            ui.label(format!("Camera: ({:.1}, {:.1}, {:.1})", p.x, p.y, p.z));
            ui.label(format!(
                "Yaw: {:.1}  Pitch: {:.1}",
                camera.yaw(),
                camera.pitch()
            ));
            ui.label(format!("FOV: {:.0}", camera.zoom()));
            ui.label(format!(
                "Frame: {:.2} ms ({:.0} fps)",
                timer.average_ms(),
                timer.fps()
            ));
            ui.separator();
            ui.small("WASD: Move | Mouse: Look | Scroll: Zoom");
            ui.small("Space: Next Skybox | F1: HUD | Esc: Quit");
        });
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("skyview-desktop starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = SkyviewApp::new(cli);
    event_loop.run_app(&mut app)?;

    if let Some(err) = app.init_error.take() {
        return Err(err.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(key: Key) -> InputEvent {
        InputEvent::Key {
            key,
            state: KeyState::Pressed,
        }
    }

    fn release(key: Key) -> InputEvent {
        InputEvent::Key {
            key,
            state: KeyState::Released,
        }
    }

    #[test]
    fn hidden_hud_stops_taking_window_input() {
        let mut scene = SceneContext::default();
        assert!(hud_takes_input(&scene));

        scene.on_event(&press(Key::ToggleHud));
        scene.step(0.016);
        assert!(!hud_takes_input(&scene));

        // input while hidden stays out of the HUD
        scene.on_events(&[press(Key::W), InputEvent::Scroll { y: 1.0 }, release(Key::W)]);
        scene.step(0.016);
        assert!(!hud_takes_input(&scene));

        scene.on_event(&release(Key::ToggleHud));
        scene.step(0.016);
        scene.on_event(&press(Key::ToggleHud));
        scene.step(0.016);
        assert!(hud_takes_input(&scene));
    }

    #[test]
    fn function_keys_map_to_hud_toggle() {
        assert_eq!(map_key(KeyCode::F1), Some(Key::ToggleHud));
        assert_eq!(map_key(KeyCode::Space), Some(Key::Space));
        assert_eq!(map_key(KeyCode::KeyQ), None);
    }
}
