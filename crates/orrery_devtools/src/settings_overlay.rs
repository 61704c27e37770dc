//! Settings overlay rendered via egui on top of the scene.
//!
//! Integration pattern: egui requires a three-phase render split because
//! `egui_wgpu::Renderer::render()` needs a `RenderPass<'static>`, while
//! `begin_render_pass` borrows the encoder. The phases are:
//!
//!   1. `prepare()` -- run egui UI logic, produce tessellated primitives
//!   2. `upload()`  -- upload textures and update GPU buffers (borrows encoder mutably)
//!   3. `paint()`   -- render into a new render pass with `forget_lifetime()`
//!   4. `cleanup()` -- free textures egui no longer references
//!
//! The overlay only runs UI logic when `state.ui_visible` is set (toggled by
//! F1), but egui event handling is always active so the overlay can intercept
//! clicks when it is shown.

use orrery_core::state::ProgramState;
use orrery_core::time::FrameClock;
use winit::window::Window;

pub struct SettingsOverlay {
    pub egui_ctx: egui::Context,
    pub egui_winit_state: egui_winit::State,
    pub egui_renderer: egui_wgpu::Renderer,
}

impl SettingsOverlay {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        window: &Window,
    ) -> Self {
        let egui_ctx = egui::Context::default();
        let egui_winit_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui_ctx.viewport_id(),
            window,
            None,
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(device, surface_format, None, 1, false);

        Self {
            egui_ctx,
            egui_winit_state,
            egui_renderer,
        }
    }

    /// Flip overlay visibility (F1). The caller adjusts cursor capture and
    /// mouse look to match.
    pub fn toggle(&mut self, state: &mut ProgramState) {
        state.ui_visible = !state.ui_visible;
        log::info!(
            "Settings overlay: {}",
            if state.ui_visible { "ON" } else { "OFF" }
        );
    }

    pub fn handle_window_event(
        &mut self,
        window: &Window,
        event: &winit::event::WindowEvent,
    ) -> bool {
        let response = self.egui_winit_state.on_window_event(window, event);
        response.consumed
    }

    /// Run the UI against the mutable program state and tessellate it. Every
    /// widget edits `state` directly; the caller re-uploads uniforms from it
    /// each frame anyway.
    pub fn prepare(
        &mut self,
        window: &Window,
        state: &mut ProgramState,
        clock: &FrameClock,
    ) -> (Vec<egui::ClippedPrimitive>, egui::TexturesDelta) {
        let raw_input = self.egui_winit_state.take_egui_input(window);
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            if state.ui_visible {
                egui::Window::new("Settings")
                    .default_pos([10.0, 10.0])
                    .show(ctx, |ui| {
                        ui.label(format!("FPS: {:.1}", clock.smoothed_fps));
                        ui.label(format!(
                            "Frame time: {:.2} ms",
                            clock.smoothed_frame_time_ms
                        ));
                        ui.separator();

                        let mut clear = [
                            state.clear_color.x,
                            state.clear_color.y,
                            state.clear_color.z,
                        ];
                        if ui.color_edit_button_rgb(&mut clear).changed() {
                            state.clear_color.x = clear[0];
                            state.clear_color.y = clear[1];
                            state.clear_color.z = clear[2];
                        }

                        ui.add(
                            egui::Slider::new(&mut state.camera.speed_coef, 0.1..=10.0)
                                .text("Movement speed"),
                        );

                        ui.separator();
                        ui.checkbox(&mut state.hdr, "HDR");
                        if state.hdr {
                            ui.checkbox(&mut state.bloom, "Bloom");
                            ui.add(
                                egui::Slider::new(&mut state.exposure, 0.01..=5.0).text("Exposure"),
                            );
                            ui.add(egui::Slider::new(&mut state.gamma, 1.0..=3.0).text("Gamma"));
                        }

                        ui.separator();
                        ui.label("Point light attenuation");
                        ui.add(
                            egui::DragValue::new(&mut state.point_light.constant)
                                .speed(0.05)
                                .prefix("constant: "),
                        );
                        ui.add(
                            egui::DragValue::new(&mut state.point_light.linear)
                                .speed(0.05)
                                .prefix("linear: "),
                        );
                        ui.add(
                            egui::DragValue::new(&mut state.point_light.quadratic)
                                .speed(0.05)
                                .prefix("quadratic: "),
                        );
                    });

                egui::Window::new("Camera info")
                    .default_pos([10.0, 360.0])
                    .show(ctx, |ui| {
                        let position = state.camera.position;
                        ui.label(format!(
                            "Camera position: ({:.1}, {:.1}, {:.1})",
                            position.x, position.y, position.z
                        ));
                        ui.label(format!(
                            "(Yaw, Pitch): ({:.1}, {:.1})",
                            state.camera.yaw, state.camera.pitch
                        ));
                        let front = state.camera.front;
                        ui.label(format!(
                            "Camera front: ({:.1}, {:.1}, {:.1})",
                            front.x, front.y, front.z
                        ));
                        ui.checkbox(&mut state.mouse_look_enabled, "Camera mouse update");
                    });
            }
        });

        self.egui_winit_state
            .handle_platform_output(window, full_output.platform_output);

        let primitives = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        (primitives, full_output.textures_delta)
    }

    /// Upload textures and update buffers. Call before creating the egui render pass.
    pub fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        primitives: &[egui::ClippedPrimitive],
        textures_delta: &egui::TexturesDelta,
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) {
        for (id, image_delta) in &textures_delta.set {
            self.egui_renderer
                .update_texture(device, queue, *id, image_delta);
        }

        self.egui_renderer
            .update_buffers(device, queue, encoder, primitives, screen_descriptor);
    }

    /// Render into an existing render pass. Call after `upload()`.
    pub fn paint(
        &self,
        render_pass: &mut wgpu::RenderPass<'static>,
        primitives: &[egui::ClippedPrimitive],
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) {
        self.egui_renderer
            .render(render_pass, primitives, screen_descriptor);
    }

    /// Free textures that egui no longer needs. Call after rendering.
    pub fn cleanup(&mut self, textures_delta: &egui::TexturesDelta) {
        for id in &textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
    }
}
