pub mod blend_pipeline;
pub mod cull_pipeline;
pub mod floor_pipeline;
pub mod geometry;
pub mod gpu_context;
pub mod mesh;
pub mod model_pipeline;
pub mod obj;
pub mod offscreen;
pub mod post_pipeline;
pub mod skybox_pipeline;
pub mod texture;
pub mod uniforms;
pub mod vertex;

pub use blend_pipeline::BlendPipeline;
pub use cull_pipeline::CulledPipeline;
pub use floor_pipeline::FloorPipeline;
pub use gpu_context::GpuContext;
pub use mesh::Mesh;
pub use model_pipeline::{create_texture_bind_group, create_uniform_bind_group, ModelPipeline};
pub use offscreen::HdrTarget;
pub use post_pipeline::PostPipeline;
pub use skybox_pipeline::SkyboxPipeline;
pub use texture::Texture;
pub use uniforms::{FrameUniform, LightsUniform, ObjectUniform, SkyboxUniform, TonemapUniform};
pub use vertex::{ModelVertex, SkyVertex, TexturedVertex};
