//! Lit pipeline for the floor quad. The quad's vertices are stored in world
//! space, so the layout skips the per-object bind group.

use crate::model_pipeline::{texture_layout, uniform_layout};
use crate::offscreen::HDR_FORMAT;
use crate::texture::DEPTH_FORMAT;
use crate::uniforms::{FrameUniform, LightsUniform};
use crate::vertex::ModelVertex;

pub struct FloorPipeline {
    pub pipeline: wgpu::RenderPipeline,
    pub frame_bind_group_layout: wgpu::BindGroupLayout,
    pub lights_bind_group_layout: wgpu::BindGroupLayout,
    pub texture_bind_group_layout: wgpu::BindGroupLayout,
}

impl FloorPipeline {
    pub fn new(device: &wgpu::Device) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("floor shader"),
            source: wgpu::ShaderSource::Wgsl(
                include_str!("shaders/blinn_phong_texture.wgsl").into(),
            ),
        });

        let frame_bind_group_layout = uniform_layout(
            device,
            "floor frame bgl",
            wgpu::ShaderStages::VERTEX_FRAGMENT,
            std::mem::size_of::<FrameUniform>(),
        );
        let lights_bind_group_layout = uniform_layout(
            device,
            "floor lights bgl",
            wgpu::ShaderStages::FRAGMENT,
            std::mem::size_of::<LightsUniform>(),
        );
        let texture_bind_group_layout = texture_layout(device, "floor texture bgl");

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("floor pipeline layout"),
            bind_group_layouts: &[
                &frame_bind_group_layout,
                &lights_bind_group_layout,
                &texture_bind_group_layout,
            ],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("floor pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[ModelVertex::layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: HDR_FORMAT,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multiview: None,
            cache: None,
        });

        Self {
            pipeline,
            frame_bind_group_layout,
            lights_bind_group_layout,
            texture_bind_group_layout,
        }
    }
}
