//! Solar-system viewer entry point. Owns the winit application loop and wires
//! input, simulation state, the scene renderer, and the settings overlay
//! together.

mod renderer;
mod scene;

use std::path::Path;
use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::event::{DeviceEvent, DeviceId, ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use orrery_core::camera::CameraMovement;
use orrery_core::input::{InputState, Key};
use orrery_core::state::ProgramState;
use orrery_core::time::FrameClock;
use orrery_devtools::SettingsOverlay;
use orrery_platform::window::{create_window, set_cursor_captured, PlatformConfig};
use orrery_render::GpuContext;

use crate::renderer::SceneRenderer;

const STATE_FILE: &str = "resources/program_state.txt";

struct ViewerState {
    window: Arc<Window>,
    gpu: GpuContext,
    renderer: SceneRenderer,
    overlay: SettingsOverlay,
    input: InputState,
    clock: FrameClock,
    state: ProgramState,
}

impl ViewerState {
    fn new(event_loop: &ActiveEventLoop, config: &PlatformConfig) -> Result<Self, String> {
        let window = create_window(event_loop, config)?;
        let gpu = GpuContext::new(window.clone())?;

        let mut state = ProgramState::default();
        state.load_from_file(Path::new(STATE_FILE));
        // Cursor capture and mouse look follow overlay visibility, including
        // when a saved state starts with the overlay open.
        state.mouse_look_enabled = !state.ui_visible;

        let renderer = SceneRenderer::new(&gpu, &state);
        let overlay = SettingsOverlay::new(&gpu.device, gpu.surface_format, &window);

        set_cursor_captured(&window, state.mouse_look_enabled);

        Ok(Self {
            window,
            gpu,
            renderer,
            overlay,
            input: InputState::new(),
            clock: FrameClock::new(),
            state,
        })
    }

    fn save_state(&self) {
        if let Err(e) = self.state.save_to_file(Path::new(STATE_FILE)) {
            log::error!("{e}");
        }
    }

    /// Apply this frame's input to the program state and camera.
    fn update(&mut self) {
        if self.input.is_just_pressed(Key::F1) {
            self.overlay.toggle(&mut self.state);
            // The overlay needs a free cursor; mouse-look resumes when it
            // closes.
            self.state.mouse_look_enabled = !self.state.ui_visible;
            set_cursor_captured(&self.window, self.state.mouse_look_enabled);
        }
        if self.input.is_just_pressed(Key::B) {
            self.state.blinn = !self.state.blinn;
            log::info!(
                "Lighting model: {}",
                if self.state.blinn { "Blinn-Phong" } else { "Phong" }
            );
        }
        if self.input.is_held(Key::Q) {
            self.state.adjust_exposure(-0.1);
        }
        if self.input.is_held(Key::E) {
            self.state.adjust_exposure(0.1);
        }

        let dt = self.clock.dt;
        if self.input.is_held(Key::W) {
            self.state.camera.process_keyboard(CameraMovement::Forward, dt);
        }
        if self.input.is_held(Key::S) {
            self.state.camera.process_keyboard(CameraMovement::Backward, dt);
        }
        if self.input.is_held(Key::A) {
            self.state.camera.process_keyboard(CameraMovement::Left, dt);
        }
        if self.input.is_held(Key::D) {
            self.state.camera.process_keyboard(CameraMovement::Right, dt);
        }

        // Screen-space y grows downward; pitch grows upward.
        let (dx, dy) = self.input.take_mouse_delta();
        if self.state.mouse_look_enabled {
            self.state.camera.process_mouse_movement(dx, -dy);
        }
        let scroll = self.input.take_scroll_delta();
        if scroll != 0.0 {
            self.state.camera.process_mouse_scroll(scroll);
        }
    }

    fn redraw(&mut self) {
        self.clock.begin_frame();
        self.update();

        let Some((surface_texture, surface_view)) = self.gpu.begin_frame() else {
            return;
        };

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame encoder"),
            });

        self.renderer.render(
            &self.gpu,
            &mut encoder,
            &surface_view,
            &self.state,
            self.clock.total_time,
        );

        // Overlay on top of the resolved frame.
        let (primitives, textures_delta) =
            self.overlay
                .prepare(&self.window, &mut self.state, &self.clock);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.gpu.size.0, self.gpu.size.1],
            pixels_per_point: self.window.scale_factor() as f32,
        };
        self.overlay.upload(
            &self.gpu.device,
            &self.gpu.queue,
            &mut encoder,
            &primitives,
            &textures_delta,
            &screen_descriptor,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("overlay pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &surface_view,
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
            self.overlay.paint(&mut pass, &primitives, &screen_descriptor);
        }

        self.overlay.cleanup(&textures_delta);

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();

        self.input.end_frame();
    }
}

struct App {
    config: PlatformConfig,
    state: Option<ViewerState>,
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        match ViewerState::new(event_loop, &self.config) {
            Ok(state) => self.state = Some(state),
            Err(e) => {
                log::error!("Startup failed: {e}");
                std::process::exit(-1);
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &self.state {
            state.window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = &mut self.state else {
            return;
        };

        let egui_consumed = state.overlay.handle_window_event(&state.window, &event);

        match event {
            WindowEvent::CloseRequested => {
                state.save_state();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                state.gpu.resize(size.width, size.height);
                state
                    .renderer
                    .resize(&state.gpu, size.width.max(1), size.height.max(1));
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    if code == KeyCode::Escape && event.state == ElementState::Pressed {
                        state.save_state();
                        event_loop.exit();
                        return;
                    }
                    if egui_consumed {
                        return;
                    }
                    if let Some(key) = map_key(code) {
                        match event.state {
                            ElementState::Pressed => state.input.key_down(key),
                            ElementState::Released => state.input.key_up(key),
                        }
                    }
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let dy = match delta {
                    winit::event::MouseScrollDelta::LineDelta(_, y) => y,
                    winit::event::MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 40.0,
                };
                state.input.add_scroll_delta(dy);
            }
            WindowEvent::RedrawRequested => {
                state.redraw();
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        let Some(state) = &mut self.state else {
            return;
        };
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            state.input.add_mouse_delta(dx as f32, dy as f32);
        }
    }
}

fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::KeyW => Some(Key::W),
        KeyCode::KeyA => Some(Key::A),
        KeyCode::KeyS => Some(Key::S),
        KeyCode::KeyD => Some(Key::D),
        KeyCode::KeyB => Some(Key::B),
        KeyCode::KeyQ => Some(Key::Q),
        KeyCode::KeyE => Some(Key::E),
        KeyCode::Escape => Some(Key::Escape),
        KeyCode::F1 => Some(Key::F1),
        _ => None,
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("Failed to create event loop: {e}");
            std::process::exit(-1);
        }
    };
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App {
        config: PlatformConfig::default(),
        state: None,
    };
    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {e}");
        std::process::exit(-1);
    }
}
