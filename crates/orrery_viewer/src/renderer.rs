//! GPU-side scene renderer. Owns every pipeline, mesh, texture, and uniform
//! buffer, and turns the scene's draw plan into the two render passes of a
//! frame: the HDR scene pass and the resolve pass to the surface.

use std::collections::HashMap;
use std::path::Path;

use glam::Mat4;
use wgpu::util::DeviceExt;

use orrery_core::state::ProgramState;
use orrery_render::model_pipeline::{create_texture_bind_group, create_uniform_bind_group};
use orrery_render::uniforms::{FrameUniform, ObjectUniform, SkyboxUniform, TonemapUniform};
use orrery_render::{
    geometry, obj, BlendPipeline, CulledPipeline, FloorPipeline, GpuContext, HdrTarget, Mesh,
    ModelPipeline, PostPipeline, SkyboxPipeline, Texture,
};

use crate::scene::{self, DrawItem, ModelAsset, ModelInstance};

struct GpuModel {
    mesh: Mesh,
    texture_bind_group: wgpu::BindGroup,
}

/// Uniform buffer plus the bind group that exposes it to one pipeline layout.
struct BoundUniform {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

fn bound_uniform<T: bytemuck::Pod>(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    value: &T,
    label: &str,
) -> BoundUniform {
    let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::bytes_of(value),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    });
    let bind_group = create_uniform_bind_group(device, layout, &buffer, label);
    BoundUniform { buffer, bind_group }
}

pub struct SceneRenderer {
    model_pipeline: ModelPipeline,
    floor_pipeline: FloorPipeline,
    blend_pipeline: BlendPipeline,
    cull_pipeline: CulledPipeline,
    skybox_pipeline: SkyboxPipeline,
    post_pipeline: PostPipeline,
    hdr: HdrTarget,

    // Frame-level uniforms. The same buffer feeds one bind group per pipeline
    // layout that consumes it.
    frame_buffer: wgpu::Buffer,
    frame_bg_model: wgpu::BindGroup,
    frame_bg_floor: wgpu::BindGroup,
    frame_bg_blend: wgpu::BindGroup,
    frame_bg_cull: wgpu::BindGroup,
    lights_buffer: wgpu::Buffer,
    lights_bg_model: wgpu::BindGroup,
    lights_bg_floor: wgpu::BindGroup,
    skybox_camera: BoundUniform,
    tonemap: BoundUniform,

    // Per-object model matrices.
    model_objects: HashMap<ModelInstance, BoundUniform>,
    wood_box_object: BoundUniform,
    culled_box_object: BoundUniform,

    // Geometry and textures.
    floor_mesh: Mesh,
    box_exterior_mesh: Mesh,
    window_mesh: Mesh,
    culled_box_mesh: Mesh,
    skybox_mesh: Mesh,
    models: HashMap<ModelAsset, GpuModel>,
    wood_bg_blend: wgpu::BindGroup,
    wood_bg_cull: wgpu::BindGroup,
    window_bg: wgpu::BindGroup,
    floor_texture_bg: wgpu::BindGroup,
    skybox_texture_bg: wgpu::BindGroup,
    post_scene_bg: wgpu::BindGroup,
}

impl SceneRenderer {
    pub fn new(gpu: &GpuContext, state: &ProgramState) -> Self {
        let device = &gpu.device;
        let queue = &gpu.queue;

        let model_pipeline = ModelPipeline::new(device);
        let floor_pipeline = FloorPipeline::new(device);
        let blend_pipeline = BlendPipeline::new(device);
        let cull_pipeline = CulledPipeline::new(device);
        let skybox_pipeline = SkyboxPipeline::new(device);
        let post_pipeline = PostPipeline::new(device, gpu.surface_format);
        let hdr = HdrTarget::new(device, gpu.size.0, gpu.size.1);

        // Frame + lights uniforms, shared across the scene pass.
        let frame_uniform = FrameUniform::new(
            state.camera.view_matrix(),
            scene::projection_matrix(state.camera.zoom, gpu.size.0, gpu.size.1),
            state.camera.position,
            state.blinn,
        );
        let frame_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("frame uniform"),
            contents: bytemuck::bytes_of(&frame_uniform),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let frame_bg_model = create_uniform_bind_group(
            device,
            &model_pipeline.frame_bind_group_layout,
            &frame_buffer,
            "frame bg model",
        );
        let frame_bg_floor = create_uniform_bind_group(
            device,
            &floor_pipeline.frame_bind_group_layout,
            &frame_buffer,
            "frame bg floor",
        );
        let frame_bg_blend = create_uniform_bind_group(
            device,
            &blend_pipeline.frame_bind_group_layout,
            &frame_buffer,
            "frame bg blend",
        );
        let frame_bg_cull = create_uniform_bind_group(
            device,
            &cull_pipeline.frame_bind_group_layout,
            &frame_buffer,
            "frame bg cull",
        );

        let lights = scene::lights_uniform(&state.point_light);
        let lights_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("lights uniform"),
            contents: bytemuck::bytes_of(&lights),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let lights_bg_model = create_uniform_bind_group(
            device,
            &model_pipeline.lights_bind_group_layout,
            &lights_buffer,
            "lights bg model",
        );
        let lights_bg_floor = create_uniform_bind_group(
            device,
            &floor_pipeline.lights_bind_group_layout,
            &lights_buffer,
            "lights bg floor",
        );

        let skybox_camera = bound_uniform(
            device,
            &skybox_pipeline.camera_bind_group_layout,
            &SkyboxUniform::new(state.camera.view_matrix(), Mat4::IDENTITY),
            "skybox camera",
        );
        let tonemap = bound_uniform(
            device,
            &post_pipeline.params_bind_group_layout,
            &TonemapUniform::new(
                state.hdr,
                state.bloom,
                state.kernel_effect,
                state.exposure,
                state.gamma,
            ),
            "tonemap params",
        );

        // One model-matrix buffer per placed object. The mini props are
        // rewritten every frame; the rest are written once here.
        let mut model_objects = HashMap::new();
        for instance in ModelInstance::ALL {
            model_objects.insert(
                instance,
                bound_uniform(
                    device,
                    &model_pipeline.object_bind_group_layout,
                    &ObjectUniform::new(instance.transform(0.0)),
                    "model object",
                ),
            );
        }
        let wood_box_object = bound_uniform(
            device,
            &blend_pipeline.object_bind_group_layout,
            &ObjectUniform::new(scene::wood_box_transform()),
            "wood box object",
        );
        let culled_box_object = bound_uniform(
            device,
            &cull_pipeline.object_bind_group_layout,
            &ObjectUniform::new(scene::culled_box_transform()),
            "culled box object",
        );

        // Static geometry.
        let floor_mesh = Mesh::from_vertices(device, "floor", &geometry::floor_vertices());
        let box_exterior_mesh =
            Mesh::from_vertices(device, "box exterior", &geometry::box_exterior_vertices());
        let window_mesh =
            Mesh::from_vertices(device, "window face", &geometry::window_face_vertices());
        let culled_box_mesh =
            Mesh::from_vertices(device, "culled box", &geometry::culled_box_vertices());
        let skybox_mesh = Mesh::from_vertices(device, "skybox", &geometry::skybox_vertices());

        // Textures.
        let wood_texture = Texture::from_path(device, queue, Path::new(scene::WOOD_TEXTURE));
        let window_texture = Texture::from_path(device, queue, Path::new(scene::WINDOW_TEXTURE));
        let floor_texture = Texture::from_path(device, queue, Path::new(scene::FLOOR_TEXTURE));
        let face_paths = scene::skybox_face_paths().map(Path::new);
        let cubemap = Texture::cubemap_from_paths(device, queue, &face_paths);

        let wood_bg_blend = create_texture_bind_group(
            device,
            &blend_pipeline.texture_bind_group_layout,
            &wood_texture,
            "wood texture blend",
        );
        let wood_bg_cull = create_texture_bind_group(
            device,
            &cull_pipeline.texture_bind_group_layout,
            &wood_texture,
            "wood texture cull",
        );
        let window_bg = create_texture_bind_group(
            device,
            &blend_pipeline.texture_bind_group_layout,
            &window_texture,
            "window texture",
        );
        let floor_texture_bg = create_texture_bind_group(
            device,
            &floor_pipeline.texture_bind_group_layout,
            &floor_texture,
            "floor texture",
        );
        let skybox_texture_bg = skybox_pipeline.create_texture_bind_group(device, &cubemap);
        let post_scene_bg = post_pipeline.create_scene_bind_group(device, &hdr);

        let models = load_models(device, queue, &model_pipeline);

        Self {
            model_pipeline,
            floor_pipeline,
            blend_pipeline,
            cull_pipeline,
            skybox_pipeline,
            post_pipeline,
            hdr,
            frame_buffer,
            frame_bg_model,
            frame_bg_floor,
            frame_bg_blend,
            frame_bg_cull,
            lights_buffer,
            lights_bg_model,
            lights_bg_floor,
            skybox_camera,
            tonemap,
            model_objects,
            wood_box_object,
            culled_box_object,
            floor_mesh,
            box_exterior_mesh,
            window_mesh,
            culled_box_mesh,
            skybox_mesh,
            models,
            wood_bg_blend,
            wood_bg_cull,
            window_bg,
            floor_texture_bg,
            skybox_texture_bg,
            post_scene_bg,
        }
    }

    pub fn resize(&mut self, gpu: &GpuContext, width: u32, height: u32) {
        self.hdr.resize(&gpu.device, width, height);
        self.post_scene_bg = self
            .post_pipeline
            .create_scene_bind_group(&gpu.device, &self.hdr);
    }

    /// Record the whole frame: upload this frame's uniforms, run the scene
    /// pass into the HDR target, then resolve to `surface_view`.
    pub fn render(
        &mut self,
        gpu: &GpuContext,
        encoder: &mut wgpu::CommandEncoder,
        surface_view: &wgpu::TextureView,
        state: &ProgramState,
        time: f32,
    ) {
        let queue = &gpu.queue;
        let view = state.camera.view_matrix();
        let projection = scene::projection_matrix(state.camera.zoom, gpu.size.0, gpu.size.1);

        queue.write_buffer(
            &self.frame_buffer,
            0,
            bytemuck::bytes_of(&FrameUniform::new(
                view,
                projection,
                state.camera.position,
                state.blinn,
            )),
        );
        queue.write_buffer(
            &self.lights_buffer,
            0,
            bytemuck::bytes_of(&scene::lights_uniform(&state.point_light)),
        );
        queue.write_buffer(
            &self.skybox_camera.buffer,
            0,
            bytemuck::bytes_of(&SkyboxUniform::new(view, projection)),
        );
        queue.write_buffer(
            &self.tonemap.buffer,
            0,
            bytemuck::bytes_of(&TonemapUniform::new(
                state.hdr,
                state.bloom,
                state.kernel_effect,
                state.exposure,
                state.gamma,
            )),
        );
        if let Some(object) = self.model_objects.get(&ModelInstance::MiniRocket) {
            queue.write_buffer(
                &object.buffer,
                0,
                bytemuck::bytes_of(&ObjectUniform::new(scene::mini_rocket_transform(
                    time,
                    state.prop_position,
                    state.prop_scale,
                ))),
            );
        }
        if let Some(object) = self.model_objects.get(&ModelInstance::MiniAstronaut) {
            queue.write_buffer(
                &object.buffer,
                0,
                bytemuck::bytes_of(&ObjectUniform::new(
                    ModelInstance::MiniAstronaut.transform(time),
                )),
            );
        }

        let clear = wgpu::Color {
            r: state.clear_color.x as f64,
            g: state.clear_color.y as f64,
            b: state.clear_color.z as f64,
            a: 1.0,
        };

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene pass"),
                color_attachments: &[Some(self.hdr.color_attachment(clear))],
                depth_stencil_attachment: Some(self.hdr.depth_attachment()),
                ..Default::default()
            });

            for item in scene::draw_plan() {
                match item {
                    DrawItem::Floor => {
                        pass.set_pipeline(&self.floor_pipeline.pipeline);
                        pass.set_bind_group(0, &self.frame_bg_floor, &[]);
                        pass.set_bind_group(1, &self.lights_bg_floor, &[]);
                        pass.set_bind_group(2, &self.floor_texture_bg, &[]);
                        self.floor_mesh.draw(&mut pass);
                    }
                    DrawItem::BoxExterior => {
                        pass.set_pipeline(&self.blend_pipeline.pipeline);
                        pass.set_bind_group(0, &self.frame_bg_blend, &[]);
                        pass.set_bind_group(1, &self.wood_box_object.bind_group, &[]);
                        pass.set_bind_group(2, &self.wood_bg_blend, &[]);
                        self.box_exterior_mesh.draw(&mut pass);
                    }
                    DrawItem::WindowFace => {
                        pass.set_pipeline(&self.blend_pipeline.pipeline);
                        pass.set_bind_group(0, &self.frame_bg_blend, &[]);
                        pass.set_bind_group(1, &self.wood_box_object.bind_group, &[]);
                        pass.set_bind_group(2, &self.window_bg, &[]);
                        self.window_mesh.draw(&mut pass);
                    }
                    DrawItem::CulledBox => {
                        pass.set_pipeline(&self.cull_pipeline.pipeline);
                        pass.set_bind_group(0, &self.frame_bg_cull, &[]);
                        pass.set_bind_group(1, &self.culled_box_object.bind_group, &[]);
                        pass.set_bind_group(2, &self.wood_bg_cull, &[]);
                        self.culled_box_mesh.draw(&mut pass);
                    }
                    DrawItem::Model(instance) => {
                        let Some(model) = self.models.get(&instance.asset()) else {
                            continue;
                        };
                        let Some(object) = self.model_objects.get(&instance) else {
                            continue;
                        };
                        pass.set_pipeline(&self.model_pipeline.pipeline);
                        pass.set_bind_group(0, &self.frame_bg_model, &[]);
                        pass.set_bind_group(1, &self.lights_bg_model, &[]);
                        pass.set_bind_group(2, &object.bind_group, &[]);
                        pass.set_bind_group(3, &model.texture_bind_group, &[]);
                        model.mesh.draw(&mut pass);
                    }
                    DrawItem::Skybox => {
                        pass.set_pipeline(&self.skybox_pipeline.pipeline);
                        pass.set_bind_group(0, &self.skybox_camera.bind_group, &[]);
                        pass.set_bind_group(1, &self.skybox_texture_bg, &[]);
                        self.skybox_mesh.draw(&mut pass);
                    }
                }
            }
        }

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("resolve pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: surface_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });
            self.post_pipeline
                .draw(&mut pass, &self.tonemap.bind_group, &self.post_scene_bg);
        }
    }
}

/// Load the five OBJ assets. A model that fails to parse is replaced by a unit
/// cube with a plain white texture so the scene stays navigable.
fn load_models(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    pipeline: &ModelPipeline,
) -> HashMap<ModelAsset, GpuModel> {
    let mut models = HashMap::new();
    for asset in ModelAsset::ALL {
        let path = Path::new(asset.obj_path());
        let model = match obj::load_obj(path) {
            Ok(parsed) => {
                log::info!(
                    "Loaded model '{}': {} vertices, {} indices",
                    path.display(),
                    parsed.vertices.len(),
                    parsed.indices.len()
                );
                let mesh = Mesh::from_indexed(
                    device,
                    &path.to_string_lossy(),
                    &parsed.vertices,
                    &parsed.indices,
                );
                let texture = match &parsed.diffuse_texture {
                    Some(texture_path) => Texture::from_path(device, queue, texture_path),
                    None => Texture::from_rgba8(
                        device,
                        queue,
                        &[255, 255, 255, 255],
                        1,
                        1,
                        "untextured model",
                    ),
                };
                GpuModel {
                    mesh,
                    texture_bind_group: pipeline.create_texture_bind_group(
                        device,
                        &texture,
                        "model texture",
                    ),
                }
            }
            Err(err) => {
                log::warn!("Model '{}' failed to load: {err}; using cube", path.display());
                let mesh = Mesh::from_vertices(
                    device,
                    "fallback cube",
                    &geometry::fallback_cube_vertices(),
                );
                let texture = Texture::from_rgba8(
                    device,
                    queue,
                    &[200, 200, 200, 255],
                    1,
                    1,
                    "fallback model",
                );
                GpuModel {
                    mesh,
                    texture_bind_group: pipeline.create_texture_bind_group(
                        device,
                        &texture,
                        "fallback texture",
                    ),
                }
            }
        };
        models.insert(asset, model);
    }
    models
}
