//! Free-fly camera with yaw/pitch orientation and a zoomable field of view.
//!
//! The front/right/up basis is always re-derived from yaw and pitch after any
//! orientation change; callers never set the basis vectors directly. Pitch is
//! clamped to ±89° to keep the look-at basis well defined, and zoom (the
//! vertical field of view in degrees) is clamped to [1, 45].

use glam::{Mat4, Vec3};

pub const YAW_DEFAULT: f32 = -90.0;
pub const PITCH_DEFAULT: f32 = 0.0;
pub const SPEED_DEFAULT: f32 = 2.5;
pub const SENSITIVITY_DEFAULT: f32 = 0.1;
pub const ZOOM_DEFAULT: f32 = 45.0;

pub const PITCH_LIMIT: f32 = 89.0;
pub const ZOOM_MIN: f32 = 1.0;
pub const ZOOM_MAX: f32 = 45.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMovement {
    Forward,
    Backward,
    Left,
    Right,
}

#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    pub front: Vec3,
    pub up: Vec3,
    pub right: Vec3,
    pub world_up: Vec3,
    /// Horizontal orientation in degrees. -90 faces down -Z.
    pub yaw: f32,
    /// Vertical orientation in degrees, clamped to ±[`PITCH_LIMIT`].
    pub pitch: f32,
    pub movement_speed: f32,
    pub mouse_sensitivity: f32,
    /// Vertical field of view in degrees, adjusted by scroll.
    pub zoom: f32,
    /// User-tunable multiplier on movement speed (edited in the overlay).
    pub speed_coef: f32,
}

impl Camera {
    pub fn new(position: Vec3) -> Self {
        let mut camera = Self {
            position,
            front: Vec3::NEG_Z,
            up: Vec3::Y,
            right: Vec3::X,
            world_up: Vec3::Y,
            yaw: YAW_DEFAULT,
            pitch: PITCH_DEFAULT,
            movement_speed: SPEED_DEFAULT,
            mouse_sensitivity: SENSITIVITY_DEFAULT,
            zoom: ZOOM_DEFAULT,
            speed_coef: 1.0,
        };
        camera.update_basis();
        camera
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    pub fn process_keyboard(&mut self, direction: CameraMovement, dt: f32) {
        let velocity = self.movement_speed * self.speed_coef * dt;
        match direction {
            CameraMovement::Forward => self.position += self.front * velocity,
            CameraMovement::Backward => self.position -= self.front * velocity,
            CameraMovement::Left => self.position -= self.right * velocity,
            CameraMovement::Right => self.position += self.right * velocity,
        }
    }

    pub fn process_mouse_movement(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.mouse_sensitivity;
        self.pitch += dy * self.mouse_sensitivity;
        self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.update_basis();
    }

    pub fn process_mouse_scroll(&mut self, dy: f32) {
        self.zoom = (self.zoom - dy).clamp(ZOOM_MIN, ZOOM_MAX);
    }

    /// Point the camera along `front`, deriving yaw/pitch from the vector so
    /// the basis invariant holds. Used when restoring a persisted camera pose.
    pub fn set_front(&mut self, front: Vec3) {
        let front = front.normalize_or_zero();
        if front == Vec3::ZERO {
            return;
        }
        self.pitch = front
            .y
            .clamp(-1.0, 1.0)
            .asin()
            .to_degrees()
            .clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.yaw = front.z.atan2(front.x).to_degrees();
        self.update_basis();
    }

    fn update_basis(&mut self) {
        let (yaw_sin, yaw_cos) = self.yaw.to_radians().sin_cos();
        let (pitch_sin, pitch_cos) = self.pitch.to_radians().sin_cos();
        self.front = Vec3::new(yaw_cos * pitch_cos, pitch_sin, yaw_sin * pitch_cos).normalize();
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 3.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_camera_faces_negative_z() {
        let camera = Camera::default();
        assert!((camera.front - Vec3::NEG_Z).length() < 1e-5);
        assert!((camera.up - Vec3::Y).length() < 1e-5);
        assert!((camera.right - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn test_pitch_clamped_under_any_mouse_sequence() {
        let mut camera = Camera::default();
        for _ in 0..1000 {
            camera.process_mouse_movement(3.0, 50.0);
            assert!(camera.pitch <= PITCH_LIMIT);
        }
        for _ in 0..1000 {
            camera.process_mouse_movement(-3.0, -50.0);
            assert!(camera.pitch >= -PITCH_LIMIT);
        }
    }

    #[test]
    fn test_front_stays_unit_length_after_movement() {
        let mut camera = Camera::default();
        camera.process_mouse_movement(123.4, -56.7);
        assert!((camera.front.length() - 1.0).abs() < 1e-5);
        assert!((camera.right.length() - 1.0).abs() < 1e-5);
        assert!((camera.up.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_zoom_clamped_regardless_of_cumulative_scroll() {
        let mut camera = Camera::default();
        for _ in 0..500 {
            camera.process_mouse_scroll(10.0);
        }
        assert_eq!(camera.zoom, ZOOM_MIN);
        for _ in 0..500 {
            camera.process_mouse_scroll(-10.0);
        }
        assert_eq!(camera.zoom, ZOOM_MAX);
    }

    #[test]
    fn test_keyboard_moves_along_basis_scaled_by_dt() {
        let mut camera = Camera::default();
        let start = camera.position;
        camera.process_keyboard(CameraMovement::Forward, 0.5);
        let expected = start + camera.front * camera.movement_speed * 0.5;
        assert!((camera.position - expected).length() < 1e-5);

        camera.process_keyboard(CameraMovement::Backward, 0.5);
        assert!((camera.position - start).length() < 1e-5);
    }

    #[test]
    fn test_speed_coef_scales_movement() {
        let mut camera = Camera::default();
        camera.speed_coef = 3.0;
        let start = camera.position;
        camera.process_keyboard(CameraMovement::Right, 1.0);
        let travelled = (camera.position - start).length();
        assert!((travelled - camera.movement_speed * 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_set_front_round_trips_direction() {
        let mut camera = Camera::default();
        camera.process_mouse_movement(371.0, -142.0);
        let front = camera.front;

        let mut restored = Camera::default();
        restored.set_front(front);
        assert!((restored.front - front).length() < 1e-4);
    }

    #[test]
    fn test_set_front_ignores_zero_vector() {
        let mut camera = Camera::default();
        let before = camera.front;
        camera.set_front(Vec3::ZERO);
        assert_eq!(camera.front, before);
    }

    #[test]
    fn test_view_matrix_looks_down_front() {
        let camera = Camera::default();
        let view = camera.view_matrix();
        // A point straight ahead of the camera lands on the -Z view axis.
        let ahead = camera.position + camera.front * 5.0;
        let in_view = view.transform_point3(ahead);
        assert!(in_view.x.abs() < 1e-4);
        assert!(in_view.y.abs() < 1e-4);
        assert!((in_view.z + 5.0).abs() < 1e-4);
    }
}
