//! Alpha-blended pipeline for the wooden box and its window face. Culling is
//! off so the interior stays visible through the transparent side; the window
//! must be drawn after the exterior within the same pass.

use crate::model_pipeline::{texture_layout, uniform_layout};
use crate::offscreen::HDR_FORMAT;
use crate::texture::DEPTH_FORMAT;
use crate::uniforms::{FrameUniform, ObjectUniform};
use crate::vertex::TexturedVertex;

pub struct BlendPipeline {
    pub pipeline: wgpu::RenderPipeline,
    pub frame_bind_group_layout: wgpu::BindGroupLayout,
    pub object_bind_group_layout: wgpu::BindGroupLayout,
    pub texture_bind_group_layout: wgpu::BindGroupLayout,
}

impl BlendPipeline {
    pub fn new(device: &wgpu::Device) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("blending shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/blending.wgsl").into()),
        });

        let frame_bind_group_layout = uniform_layout(
            device,
            "blend frame bgl",
            wgpu::ShaderStages::VERTEX,
            std::mem::size_of::<FrameUniform>(),
        );
        let object_bind_group_layout = uniform_layout(
            device,
            "blend object bgl",
            wgpu::ShaderStages::VERTEX,
            std::mem::size_of::<ObjectUniform>(),
        );
        let texture_bind_group_layout = texture_layout(device, "blend texture bgl");

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("blend pipeline layout"),
            bind_group_layouts: &[
                &frame_bind_group_layout,
                &object_bind_group_layout,
                &texture_bind_group_layout,
            ],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("blend pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[TexturedVertex::layout()],
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
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
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
            object_bind_group_layout,
            texture_bind_group_layout,
        }
    }
}
