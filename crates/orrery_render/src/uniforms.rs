//! GPU uniform types shared by the scene pipelines. Field names and order are
//! a contract with the WGSL structs in `src/shaders/`; both sides must agree
//! on std140-compatible padding.

use glam::{Mat3, Mat4, Vec3};

/// Per-frame camera data plus the Blinn-Phong toggle, bound at group 0 of the
/// lit pipelines. View and projection are computed once per frame and shared
/// by every draw.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub view_position: [f32; 4],
    pub blinn: u32,
    pub shininess: f32,
    pub _pad: [f32; 2],
}

impl FrameUniform {
    pub fn new(view: Mat4, projection: Mat4, view_position: Vec3, blinn: bool) -> Self {
        Self {
            view: view.to_cols_array_2d(),
            projection: projection.to_cols_array_2d(),
            view_position: view_position.extend(1.0).to_array(),
            blinn: blinn as u32,
            shininess: 32.0,
            _pad: [0.0; 2],
        }
    }
}

/// Directional light plus `point_light[0]`, bound at group 1 of the lit
/// pipelines. The directional light is fixed scene data; the point light
/// attenuation is editable through the overlay.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightsUniform {
    pub dir_direction: [f32; 4],
    pub dir_ambient: [f32; 4],
    pub dir_diffuse: [f32; 4],
    pub dir_specular: [f32; 4],
    pub point_position: [f32; 4],
    pub point_ambient: [f32; 4],
    pub point_diffuse: [f32; 4],
    pub point_specular: [f32; 4],
    /// x = constant, y = linear, z = quadratic.
    pub point_attenuation: [f32; 4],
}

/// Per-object model transform, bound at group 2.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
}

impl ObjectUniform {
    pub fn new(model: Mat4) -> Self {
        Self {
            model: model.to_cols_array_2d(),
        }
    }
}

/// Skybox camera data. The view matrix keeps only the 3x3 rotational part so
/// the cube never translates relative to the camera.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SkyboxUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
}

impl SkyboxUniform {
    pub fn new(view: Mat4, projection: Mat4) -> Self {
        let rotation_only = Mat4::from_mat3(Mat3::from_mat4(view));
        Self {
            view: rotation_only.to_cols_array_2d(),
            projection: projection.to_cols_array_2d(),
        }
    }
}

/// Post-process controls for the resolve pass.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TonemapUniform {
    pub hdr: u32,
    pub bloom: u32,
    pub effect: i32,
    pub _pad0: u32,
    pub exposure: f32,
    pub gamma: f32,
    pub _pad1: [f32; 2],
}

impl TonemapUniform {
    pub fn new(hdr: bool, bloom: bool, effect: i32, exposure: f32, gamma: f32) -> Self {
        Self {
            hdr: hdr as u32,
            bloom: bloom as u32,
            effect,
            _pad0: 0,
            exposure,
            gamma,
            _pad1: [0.0; 2],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skybox_uniform_strips_translation() {
        let view = Mat4::look_at_rh(
            Vec3::new(10.0, -4.0, 7.0),
            Vec3::new(10.0, -4.0, 6.0),
            Vec3::Y,
        );
        let uniform = SkyboxUniform::new(view, Mat4::IDENTITY);
        // Column 3 must be the identity translation column.
        assert_eq!(uniform.view[3], [0.0, 0.0, 0.0, 1.0]);
        // The rotational part is untouched.
        let original = view.to_cols_array_2d();
        for col in 0..3 {
            for row in 0..3 {
                assert!((uniform.view[col][row] - original[col][row]).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_uniform_sizes_match_wgsl_layout() {
        assert_eq!(std::mem::size_of::<FrameUniform>(), 160);
        assert_eq!(std::mem::size_of::<LightsUniform>(), 144);
        assert_eq!(std::mem::size_of::<ObjectUniform>(), 64);
        assert_eq!(std::mem::size_of::<SkyboxUniform>(), 128);
        assert_eq!(std::mem::size_of::<TonemapUniform>(), 32);
    }
}
