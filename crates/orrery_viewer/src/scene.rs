//! Fixed scene description: which objects exist, where they sit, and the order
//! they are drawn in. The renderer walks [`draw_plan`] every frame; keeping the
//! order here as data makes the pass sequencing testable without a GPU.

use glam::{Mat4, Vec3};
use orrery_core::state::PointLight;
use orrery_render::uniforms::LightsUniform;

pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 100.0;

/// World position of the wooden box with the transparent window side.
pub const WOOD_BOX_POSITION: Vec3 = Vec3::new(-5.0, 0.0, -1.0);
/// World position of the box drawn through the front-face-culling pipeline.
pub const CULLED_BOX_POSITION: Vec3 = Vec3::new(-5.0, 0.0, -3.0);

/// The five OBJ assets on disk. Both astronauts and the mini astronaut share
/// one mesh; the mini rocket shares the rocket mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelAsset {
    Sun,
    Earth,
    Rocket,
    Mars,
    Astronaut,
}

impl ModelAsset {
    pub const ALL: [ModelAsset; 5] = [
        ModelAsset::Sun,
        ModelAsset::Earth,
        ModelAsset::Rocket,
        ModelAsset::Mars,
        ModelAsset::Astronaut,
    ];

    pub fn obj_path(self) -> &'static str {
        match self {
            ModelAsset::Sun => "resources/objects/sun/sun.obj",
            ModelAsset::Earth => "resources/objects/earth/Earth.obj",
            ModelAsset::Rocket => "resources/objects/rocket/Toy_Rocket.obj",
            ModelAsset::Mars => "resources/objects/mars/Mars_2K.obj",
            ModelAsset::Astronaut => "resources/objects/astronaut/Astronaut.obj",
        }
    }
}

/// A placed instance of a model in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelInstance {
    Sun,
    Earth,
    Rocket,
    Mars,
    AstronautLeft,
    AstronautRight,
    /// Toy rocket bobbing above the wooden box.
    MiniRocket,
    /// Astronaut bobbing above the culled box.
    MiniAstronaut,
}

impl ModelInstance {
    pub const ALL: [ModelInstance; 8] = [
        ModelInstance::Sun,
        ModelInstance::Earth,
        ModelInstance::Rocket,
        ModelInstance::Mars,
        ModelInstance::AstronautLeft,
        ModelInstance::AstronautRight,
        ModelInstance::MiniRocket,
        ModelInstance::MiniAstronaut,
    ];

    pub fn asset(self) -> ModelAsset {
        match self {
            ModelInstance::Sun => ModelAsset::Sun,
            ModelInstance::Earth => ModelAsset::Earth,
            ModelInstance::Rocket | ModelInstance::MiniRocket => ModelAsset::Rocket,
            ModelInstance::Mars => ModelAsset::Mars,
            ModelInstance::AstronautLeft
            | ModelInstance::AstronautRight
            | ModelInstance::MiniAstronaut => ModelAsset::Astronaut,
        }
    }

    /// Model matrix at `time` seconds. Only the two mini props animate: they
    /// bob on a cosine between 0.2 and 0.4 units below their box top.
    pub fn transform(self, time: f32) -> Mat4 {
        match self {
            ModelInstance::Sun => {
                Mat4::from_translation(Vec3::new(-35.0, 15.0, 10.0)) * Mat4::from_scale(Vec3::splat(9.5))
            }
            ModelInstance::Earth => {
                Mat4::from_translation(Vec3::new(0.0, -5.0, -25.0))
                    * Mat4::from_rotation_x(170f32.to_radians())
                    * Mat4::from_rotation_y((-40f32).to_radians())
                    * Mat4::from_scale(Vec3::splat(4.5))
            }
            ModelInstance::Rocket => {
                Mat4::from_translation(Vec3::new(8.0, 1.9, -20.0))
                    * Mat4::from_rotation_z((-50f32).to_radians())
                    * Mat4::from_scale(Vec3::splat(0.7))
            }
            ModelInstance::Mars => {
                Mat4::from_translation(Vec3::new(35.0, 8.0, -15.0)) * Mat4::from_scale(Vec3::splat(1.4))
            }
            ModelInstance::AstronautLeft => {
                Mat4::from_translation(Vec3::new(34.5, 12.7, -14.0))
                    * Mat4::from_rotation_y(30f32.to_radians())
                    * Mat4::from_scale(Vec3::splat(0.15))
            }
            ModelInstance::AstronautRight => {
                Mat4::from_translation(Vec3::new(34.9, 12.7, -14.0))
                    * Mat4::from_rotation_y((-30f32).to_radians())
                    * Mat4::from_scale(Vec3::splat(0.15))
            }
            ModelInstance::MiniRocket => mini_rocket_transform(time, Vec3::ZERO, 0.2),
            ModelInstance::MiniAstronaut => {
                Mat4::from_translation(Vec3::new(
                    CULLED_BOX_POSITION.x,
                    -0.1 * time.cos() - 0.3,
                    CULLED_BOX_POSITION.z,
                )) * Mat4::from_rotation_y(90f32.to_radians())
                    * Mat4::from_scale(Vec3::splat(0.15))
            }
        }
    }
}

/// One entry of the per-frame draw sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawItem {
    Floor,
    BoxExterior,
    Model(ModelInstance),
    WindowFace,
    CulledBox,
    Skybox,
}

/// The fixed draw order. Ordering constraints baked in here:
/// - the window face follows the box exterior so blending composites over it,
/// - the skybox is last, relying on the far-plane depth trick to fill only
///   untouched pixels.
pub fn draw_plan() -> Vec<DrawItem> {
    vec![
        DrawItem::Floor,
        DrawItem::BoxExterior,
        DrawItem::Model(ModelInstance::MiniRocket),
        DrawItem::WindowFace,
        DrawItem::CulledBox,
        DrawItem::Model(ModelInstance::MiniAstronaut),
        DrawItem::Model(ModelInstance::Sun),
        DrawItem::Model(ModelInstance::Earth),
        DrawItem::Model(ModelInstance::Rocket),
        DrawItem::Model(ModelInstance::Mars),
        DrawItem::Model(ModelInstance::AstronautLeft),
        DrawItem::Model(ModelInstance::AstronautRight),
        DrawItem::Skybox,
    ]
}

/// Transform for the rocket prop bobbing above the wood box. `offset` and
/// `scale` come from the program state so the prop can be nudged at runtime.
pub fn mini_rocket_transform(time: f32, offset: Vec3, scale: f32) -> Mat4 {
    Mat4::from_translation(
        Vec3::new(
            WOOD_BOX_POSITION.x,
            -0.1 * time.cos() - 0.3,
            WOOD_BOX_POSITION.z,
        ) + offset,
    ) * Mat4::from_scale(Vec3::splat(scale))
}

pub fn wood_box_transform() -> Mat4 {
    Mat4::from_translation(WOOD_BOX_POSITION)
}

pub fn culled_box_transform() -> Mat4 {
    Mat4::from_translation(CULLED_BOX_POSITION)
}

pub fn projection_matrix(zoom_degrees: f32, width: u32, height: u32) -> Mat4 {
    let aspect = width.max(1) as f32 / height.max(1) as f32;
    Mat4::perspective_rh(zoom_degrees.to_radians(), aspect, Z_NEAR, Z_FAR)
}

/// The frame's light set: a fixed reddish directional light plus the sun's
/// point light with its overlay-editable attenuation.
pub fn lights_uniform(point: &PointLight) -> LightsUniform {
    LightsUniform {
        dir_direction: [-30.0, -50.0, 0.0, 0.0],
        dir_ambient: [0.06, 0.06, 0.06, 1.0],
        dir_diffuse: [0.6, 0.2, 0.2, 1.0],
        dir_specular: [0.1, 0.1, 0.1, 1.0],
        point_position: point.position.extend(1.0).to_array(),
        point_ambient: point.ambient.extend(1.0).to_array(),
        point_diffuse: point.diffuse.extend(1.0).to_array(),
        point_specular: point.specular.extend(1.0).to_array(),
        point_attenuation: [point.constant, point.linear, point.quadratic, 0.0],
    }
}

/// Skybox cubemap faces in the +X, -X, +Y, -Y, +Z, -Z binding order.
pub fn skybox_face_paths() -> [&'static str; 6] {
    [
        "resources/textures/skybox/_front.png",
        "resources/textures/skybox/_back.png",
        "resources/textures/skybox/_bottom.png",
        "resources/textures/skybox/_top.png",
        "resources/textures/skybox/_right.png",
        "resources/textures/skybox/_left.png",
    ]
}

pub const WOOD_TEXTURE: &str = "resources/textures/wood_texture.png";
pub const WINDOW_TEXTURE: &str = "resources/textures/window_60percent.png";
pub const FLOOR_TEXTURE: &str = "resources/textures/metal_texture.png";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skybox_is_drawn_last() {
        let plan = draw_plan();
        assert_eq!(plan.last(), Some(&DrawItem::Skybox));
        assert_eq!(
            plan.iter().filter(|i| **i == DrawItem::Skybox).count(),
            1
        );
    }

    #[test]
    fn test_floor_is_drawn_first() {
        assert_eq!(draw_plan().first(), Some(&DrawItem::Floor));
    }

    #[test]
    fn test_window_face_follows_box_exterior() {
        let plan = draw_plan();
        let exterior = plan
            .iter()
            .position(|i| *i == DrawItem::BoxExterior)
            .unwrap();
        let window = plan
            .iter()
            .position(|i| *i == DrawItem::WindowFace)
            .unwrap();
        assert!(window > exterior);
    }

    #[test]
    fn test_every_model_instance_drawn_exactly_once() {
        let plan = draw_plan();
        for instance in ModelInstance::ALL {
            assert_eq!(
                plan.iter()
                    .filter(|i| **i == DrawItem::Model(instance))
                    .count(),
                1,
                "{instance:?} should appear once"
            );
        }
    }

    #[test]
    fn test_mini_props_bob_within_expected_band() {
        for step in 0..100 {
            let time = step as f32 * 0.37;
            let y = ModelInstance::MiniRocket.transform(time).w_axis.y;
            assert!((-0.4..=-0.2).contains(&y), "y = {y} at t = {time}");
        }
    }

    #[test]
    fn test_static_transforms_place_objects() {
        let sun = ModelInstance::Sun.transform(0.0);
        assert_eq!(sun.w_axis.truncate(), Vec3::new(-35.0, 15.0, 10.0));
        // Uniform scale 9.5 along the x basis.
        assert!((sun.x_axis.length() - 9.5).abs() < 1e-5);

        let mars = ModelInstance::Mars.transform(12.0);
        assert_eq!(mars.w_axis.truncate(), Vec3::new(35.0, 8.0, -15.0));
    }

    #[test]
    fn test_mini_rocket_honors_prop_offset_and_scale() {
        let base = scene_y(0.0, Vec3::ZERO);
        let nudged = scene_y(0.0, Vec3::new(0.5, 1.0, -0.25));
        assert_eq!(nudged - base, 1.0);

        let scaled = mini_rocket_transform(0.0, Vec3::ZERO, 0.4);
        assert!((scaled.x_axis.length() - 0.4).abs() < 1e-6);
    }

    fn scene_y(time: f32, offset: Vec3) -> f32 {
        mini_rocket_transform(time, offset, 0.2).w_axis.y
    }

    #[test]
    fn test_mini_props_share_meshes_with_large_models() {
        assert_eq!(ModelInstance::MiniRocket.asset(), ModelAsset::Rocket);
        assert_eq!(ModelInstance::MiniAstronaut.asset(), ModelAsset::Astronaut);
        assert_eq!(ModelInstance::AstronautLeft.asset(), ModelAsset::Astronaut);
    }

    #[test]
    fn test_projection_honors_zoom_and_clip_range() {
        let wide = projection_matrix(45.0, 800, 600);
        let narrow = projection_matrix(10.0, 800, 600);
        // A narrower field of view magnifies: larger focal terms on the diagonal.
        assert!(narrow.x_axis.x > wide.x_axis.x);
        assert!(narrow.y_axis.y > wide.y_axis.y);
    }

    #[test]
    fn test_lights_uniform_carries_attenuation() {
        let light = PointLight::default();
        let uniform = lights_uniform(&light);
        assert_eq!(uniform.point_attenuation, [1.0, 0.014, 0.0007, 0.0]);
        assert_eq!(uniform.dir_diffuse, [0.6, 0.2, 0.2, 1.0]);
    }
}
