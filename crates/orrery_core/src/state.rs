//! The single program-state record shared by input handling, rendering, and the
//! settings overlay, plus its positional save/load file format.
//!
//! Exactly one `ProgramState` exists per run. It is owned by the viewer and
//! passed by mutable reference wherever it is read or edited; nothing here is
//! global.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use glam::Vec3;

use crate::camera::Camera;

/// Static point light placed at the sun. Attenuation coefficients are the only
/// fields edited at runtime (via the overlay drag values).
#[derive(Debug, Clone)]
pub struct PointLight {
    pub position: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            position: Vec3::new(-26.0, 22.0, 16.0),
            ambient: Vec3::splat(0.7),
            diffuse: Vec3::splat(0.6),
            specular: Vec3::splat(1.0),
            constant: 1.0,
            linear: 0.014,
            quadratic: 0.0007,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProgramState {
    pub clear_color: Vec3,
    pub ui_visible: bool,
    pub camera: Camera,
    pub mouse_look_enabled: bool,
    /// Extra translation applied to the bobbing prop above the wood box.
    pub prop_position: Vec3,
    pub prop_scale: f32,
    pub point_light: PointLight,
    pub blinn: bool,
    pub hdr: bool,
    pub bloom: bool,
    pub exposure: f32,
    pub gamma: f32,
    pub kernel_effect: i32,
}

impl Default for ProgramState {
    fn default() -> Self {
        Self {
            clear_color: Vec3::ZERO,
            ui_visible: false,
            camera: Camera::default(),
            mouse_look_enabled: true,
            prop_position: Vec3::ZERO,
            prop_scale: 0.2,
            point_light: PointLight::default(),
            blinn: false,
            hdr: false,
            bloom: false,
            exposure: 0.2,
            gamma: 2.2,
            kernel_effect: 3,
        }
    }
}

impl ProgramState {
    /// Nudge the tonemap exposure, never below zero.
    pub fn adjust_exposure(&mut self, delta: f32) {
        self.exposure = (self.exposure + delta).max(0.0);
    }

    /// Write the persisted fields, one value per line, in the fixed order:
    /// clear color r/g/b, ui_visible (0/1), camera position x/y/z,
    /// camera front x/y/z. The format is positional; field count and order are
    /// the file contract.
    pub fn save_to_file(&self, path: &Path) -> Result<(), String> {
        let mut out = String::new();
        for value in [
            self.clear_color.x,
            self.clear_color.y,
            self.clear_color.z,
        ] {
            let _ = writeln!(out, "{value}");
        }
        let _ = writeln!(out, "{}", self.ui_visible as u8);
        for value in [
            self.camera.position.x,
            self.camera.position.y,
            self.camera.position.z,
            self.camera.front.x,
            self.camera.front.y,
            self.camera.front.z,
        ] {
            let _ = writeln!(out, "{value}");
        }
        fs::write(path, out)
            .map_err(|e| format!("Failed to write program state {}: {e}", path.display()))
    }

    /// Read the same 10 values back in order. A missing file or a malformed
    /// value leaves the remaining fields at their current values; parsing stops
    /// at the first failure so a truncated file restores a usable prefix.
    pub fn load_from_file(&mut self, path: &Path) {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!(
                    "Program state {} not loaded ({e}); keeping defaults",
                    path.display()
                );
                return;
            }
        };
        let mut values = raw.lines().map(str::trim);

        let mut next_f32 = || values.next().and_then(|v| v.parse::<f32>().ok());

        let Some(r) = next_f32() else { return };
        self.clear_color.x = r;
        let Some(g) = next_f32() else { return };
        self.clear_color.y = g;
        let Some(b) = next_f32() else { return };
        self.clear_color.z = b;

        match values.next() {
            Some("0") => self.ui_visible = false,
            Some("1") => self.ui_visible = true,
            _ => return,
        }

        let mut next_f32 = || values.next().and_then(|v| v.parse::<f32>().ok());
        let Some(x) = next_f32() else { return };
        self.camera.position.x = x;
        let Some(y) = next_f32() else { return };
        self.camera.position.y = y;
        let Some(z) = next_f32() else { return };
        self.camera.position.z = z;

        let (Some(fx), Some(fy), Some(fz)) = (next_f32(), next_f32(), next_f32()) else {
            return;
        };
        // Route the loaded facing direction through the camera so yaw/pitch and
        // the basis vectors stay consistent with it.
        self.camera.set_front(Vec3::new(fx, fy, fz));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("orrery_state_{name}_{}", std::process::id()))
    }

    #[test]
    fn test_round_trip_restores_persisted_fields() {
        let path = scratch_path("round_trip");
        let mut saved = ProgramState::default();
        saved.clear_color = Vec3::new(0.25, 0.5, 0.125);
        saved.ui_visible = true;
        saved.camera.position = Vec3::new(1.5, -2.0, 7.25);
        saved.camera.process_mouse_movement(150.0, -30.0);
        saved.save_to_file(&path).unwrap();

        let mut loaded = ProgramState::default();
        loaded.load_from_file(&path);
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.clear_color, saved.clear_color);
        assert!(loaded.ui_visible);
        assert_eq!(loaded.camera.position, saved.camera.position);
        assert!((loaded.camera.front - saved.camera.front).length() < 1e-4);
    }

    #[test]
    fn test_missing_file_keeps_defaults() {
        let path = scratch_path("missing_nonexistent");
        let mut state = ProgramState::default();
        state.load_from_file(&path);

        let defaults = ProgramState::default();
        assert_eq!(state.clear_color, defaults.clear_color);
        assert!(!state.ui_visible);
        assert_eq!(state.camera.position, defaults.camera.position);
        assert_eq!(state.camera.front, defaults.camera.front);
    }

    #[test]
    fn test_truncated_file_applies_leading_fields_only() {
        let path = scratch_path("truncated");
        std::fs::write(&path, "0.1\n0.2\n0.3\n1\n").unwrap();

        let mut state = ProgramState::default();
        state.load_from_file(&path);
        std::fs::remove_file(&path).ok();

        assert_eq!(state.clear_color, Vec3::new(0.1, 0.2, 0.3));
        assert!(state.ui_visible);
        // Camera fields after the truncation point keep their defaults.
        assert_eq!(state.camera.position, Vec3::new(0.0, 0.0, 3.0));
    }

    #[test]
    fn test_malformed_value_stops_parsing() {
        let path = scratch_path("malformed");
        std::fs::write(&path, "0.5\nnot_a_number\n0.5\n1\n").unwrap();

        let mut state = ProgramState::default();
        state.load_from_file(&path);
        std::fs::remove_file(&path).ok();

        assert_eq!(state.clear_color.x, 0.5);
        // Everything from the malformed value onward is untouched.
        assert_eq!(state.clear_color.y, 0.0);
        assert_eq!(state.clear_color.z, 0.0);
        assert!(!state.ui_visible);
    }

    #[test]
    fn test_save_writes_ten_lines() {
        let path = scratch_path("ten_lines");
        ProgramState::default().save_to_file(&path).unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(raw.lines().count(), 10);
    }

    #[test]
    fn test_exposure_adjustment_floors_at_zero() {
        let mut state = ProgramState::default();
        state.exposure = 0.15;
        state.adjust_exposure(-0.1);
        state.adjust_exposure(-0.1);
        assert_eq!(state.exposure, 0.0);
        state.adjust_exposure(0.1);
        assert!((state.exposure - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_default_point_light_matches_scene() {
        let light = PointLight::default();
        assert_eq!(light.position, Vec3::new(-26.0, 22.0, 16.0));
        assert_eq!(light.constant, 1.0);
    }
}
