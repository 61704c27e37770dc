//! GPU texture creation from image files, raw pixels, and cubemap face sets.
//!
//! Loading failures are non-fatal: a missing or undecodable image logs a
//! warning and yields a 1x1 placeholder (or a black cubemap face) so the frame
//! loop keeps running with degraded visuals.

use std::path::Path;

pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

pub struct Texture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    pub size: (u32, u32),
}

impl Texture {
    pub fn from_rgba8(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        pixels: &[u8],
        width: u32,
        height: u32,
        label: &str,
    ) -> Self {
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = create_sampler(device, label);

        Self {
            texture,
            view,
            sampler,
            size: (width, height),
        }
    }

    pub fn from_bytes(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        bytes: &[u8],
        label: &str,
    ) -> Result<Self, String> {
        let decoded = image::load_from_memory(bytes)
            .map_err(|e| format!("Failed to decode image '{label}': {e}"))?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(Self::from_rgba8(
            device, queue, &rgba, width, height, label,
        ))
    }

    /// Load a texture from disk, falling back to a 1x1 white placeholder when
    /// the file is missing or undecodable.
    pub fn from_path(device: &wgpu::Device, queue: &wgpu::Queue, path: &Path) -> Self {
        let label = path.to_string_lossy();
        match std::fs::read(path) {
            Ok(bytes) => match Self::from_bytes(device, queue, &bytes, &label) {
                Ok(texture) => texture,
                Err(err) => {
                    log::warn!("{err}; using placeholder");
                    Self::from_rgba8(device, queue, &[255, 255, 255, 255], 1, 1, "placeholder")
                }
            },
            Err(err) => {
                log::warn!(
                    "Texture failed to load at path: {} ({err}); using placeholder",
                    path.display()
                );
                Self::from_rgba8(device, queue, &[255, 255, 255, 255], 1, 1, "placeholder")
            }
        }
    }

    /// Build a cubemap from six face files in +X, -X, +Y, -Y, +Z, -Z order.
    /// Every face is resized to the first successfully decoded face's
    /// dimensions; failed faces stay black.
    pub fn cubemap_from_paths(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        paths: &[&Path; 6],
    ) -> Self {
        let mut faces: Vec<Option<image::RgbaImage>> = Vec::with_capacity(6);
        for path in paths {
            match std::fs::read(path).map_err(|e| e.to_string()).and_then(|b| {
                image::load_from_memory(&b)
                    .map(|img| img.to_rgba8())
                    .map_err(|e| e.to_string())
            }) {
                Ok(img) => faces.push(Some(img)),
                Err(err) => {
                    log::warn!(
                        "Cubemap texture failed to load at path: {} ({err})",
                        path.display()
                    );
                    faces.push(None);
                }
            }
        }

        let (width, height) = faces
            .iter()
            .flatten()
            .next()
            .map(|img| img.dimensions())
            .unwrap_or((1, 1));

        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 6,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("skybox cubemap"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        let black = vec![0u8; (width * height * 4) as usize];
        for (layer, face) in faces.iter().enumerate() {
            let pixels: &[u8] = match face {
                Some(img) if img.dimensions() == (width, height) => img.as_raw(),
                Some(img) => {
                    log::warn!(
                        "Cubemap face {layer} is {:?}, expected {width}x{height}; leaving black",
                        img.dimensions()
                    );
                    &black
                }
                None => &black,
            };
            queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &texture,
                    mip_level: 0,
                    origin: wgpu::Origin3d {
                        x: 0,
                        y: 0,
                        z: layer as u32,
                    },
                    aspect: wgpu::TextureAspect::All,
                },
                pixels,
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(4 * width),
                    rows_per_image: Some(height),
                },
                wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
            );
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor {
            dimension: Some(wgpu::TextureViewDimension::Cube),
            ..Default::default()
        });
        let sampler = create_sampler(device, "skybox cubemap");

        Self {
            texture,
            view,
            sampler,
            size: (width, height),
        }
    }
}

/// Depth attachment for the off-screen scene passes.
pub fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("scene depth"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

fn create_sampler(device: &wgpu::Device, label: &str) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some(label),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::FilterMode::Linear,
        ..Default::default()
    })
}
