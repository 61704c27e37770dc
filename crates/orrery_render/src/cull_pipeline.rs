//! Front-face-culling pipeline for the second box. Its vertex data winds
//! clockwise when viewed from outside, so declaring clockwise as front and
//! culling front faces leaves only the exterior walls.

use crate::model_pipeline::{texture_layout, uniform_layout};
use crate::offscreen::HDR_FORMAT;
use crate::texture::DEPTH_FORMAT;
use crate::uniforms::{FrameUniform, ObjectUniform};
use crate::vertex::TexturedVertex;

pub struct CulledPipeline {
    pub pipeline: wgpu::RenderPipeline,
    pub frame_bind_group_layout: wgpu::BindGroupLayout,
    pub object_bind_group_layout: wgpu::BindGroupLayout,
    pub texture_bind_group_layout: wgpu::BindGroupLayout,
}

impl CulledPipeline {
    pub fn new(device: &wgpu::Device) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("face culling shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/face_culling.wgsl").into()),
        });

        let frame_bind_group_layout = uniform_layout(
            device,
            "cull frame bgl",
            wgpu::ShaderStages::VERTEX,
            std::mem::size_of::<FrameUniform>(),
        );
        let object_bind_group_layout = uniform_layout(
            device,
            "cull object bgl",
            wgpu::ShaderStages::VERTEX,
            std::mem::size_of::<ObjectUniform>(),
        );
        let texture_bind_group_layout = texture_layout(device, "cull texture bgl");

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("cull pipeline layout"),
            bind_group_layouts: &[
                &frame_bind_group_layout,
                &object_bind_group_layout,
                &texture_bind_group_layout,
            ],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("cull pipeline"),
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
                front_face: wgpu::FrontFace::Cw,
                cull_mode: Some(wgpu::Face::Front),
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
            object_bind_group_layout,
            texture_bind_group_layout,
        }
    }
}
