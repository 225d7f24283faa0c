use bealtmian_common::SessionConfig;
use bealtmian_input::{InputSnapshot, MoveKey};
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// First-person camera pose.
///
/// `pitch` is carried but never applied: projection is yaw-only and there is
/// no vertical look.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub position: DVec3,
    /// Radians about the vertical axis.
    pub yaw: f64,
    pub pitch: f64,
}

/// Per-frame camera speeds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraMotion {
    /// World units per frame.
    pub speed: f64,
    /// Radians per frame.
    pub rotate_speed: f64,
}

impl Default for CameraMotion {
    fn default() -> Self {
        Self {
            speed: 0.3,
            rotate_speed: 0.05,
        }
    }
}

impl CameraMotion {
    pub fn from_config(config: &SessionConfig) -> Self {
        Self {
            speed: config.move_speed,
            rotate_speed: config.rotate_speed,
        }
    }
}

impl Default for CameraPose {
    fn default() -> Self {
        Self::at(DVec3::new(0.0, -2.0, -5.0))
    }
}

impl CameraPose {
    pub fn at(position: DVec3) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    /// Horizontal view direction.
    pub fn forward(&self) -> DVec3 {
        DVec3::new(self.yaw.sin(), 0.0, self.yaw.cos())
    }

    /// Apply one frame of movement. Every held key contributes; forward and
    /// backward use the yaw from before this frame's rotation.
    pub fn apply_input(&mut self, input: InputSnapshot, motion: CameraMotion) {
        let step = self.forward() * motion.speed;
        if input.is_held(MoveKey::Forward) {
            self.position += step;
        }
        if input.is_held(MoveKey::Backward) {
            self.position -= step;
        }
        if input.is_held(MoveKey::RotateLeft) {
            self.yaw -= motion.rotate_speed;
        }
        if input.is_held(MoveKey::RotateRight) {
            self.yaw += motion.rotate_speed;
        }
    }

    /// Distance to a point in the ground (x-z) plane.
    pub fn ground_distance(&self, point: DVec3) -> f64 {
        let dx = point.x - self.position.x;
        let dz = point.z - self.position.z;
        dx.hypot(dz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    const EPS: f64 = 1e-12;

    fn origin() -> CameraPose {
        CameraPose::at(DVec3::ZERO)
    }

    #[test]
    fn forward_at_zero_yaw_moves_along_z() {
        let mut cam = origin();
        cam.apply_input(InputSnapshot::from_chars("w"), CameraMotion::default());
        assert!(cam.position.x.abs() < EPS);
        assert!((cam.position.z - 0.3).abs() < EPS);
        assert_eq!(cam.position.y, 0.0);
    }

    #[test]
    fn forward_at_quarter_turn_moves_along_x() {
        let mut cam = origin();
        cam.yaw = FRAC_PI_2;
        cam.apply_input(InputSnapshot::from_chars("w"), CameraMotion::default());
        assert!((cam.position.x - 0.3).abs() < EPS);
        assert!(cam.position.z.abs() < EPS);
    }

    #[test]
    fn backward_negates_forward() {
        let mut cam = origin();
        cam.apply_input(InputSnapshot::from_chars("s"), CameraMotion::default());
        assert!((cam.position.z + 0.3).abs() < EPS);
    }

    #[test]
    fn rotation_keys_adjust_yaw_only() {
        let mut cam = origin();
        cam.apply_input(InputSnapshot::from_chars("d"), CameraMotion::default());
        assert!((cam.yaw - 0.05).abs() < EPS);
        cam.apply_input(InputSnapshot::from_chars("a"), CameraMotion::default());
        cam.apply_input(InputSnapshot::from_chars("a"), CameraMotion::default());
        assert!((cam.yaw + 0.05).abs() < EPS);
        assert_eq!(cam.position, DVec3::ZERO);
        assert_eq!(cam.pitch, 0.0);
    }

    #[test]
    fn combined_keys_apply_in_same_tick() {
        let mut cam = origin();
        cam.apply_input(InputSnapshot::from_chars("wd"), CameraMotion::default());
        assert!((cam.position.z - 0.3).abs() < EPS);
        assert!((cam.yaw - 0.05).abs() < EPS);
    }

    #[test]
    fn no_keys_no_motion() {
        let mut cam = CameraPose::default();
        let before = cam;
        cam.apply_input(InputSnapshot::EMPTY, CameraMotion::default());
        assert_eq!(cam, before);
    }

    #[test]
    fn ground_distance_ignores_height() {
        let cam = origin();
        let d = cam.ground_distance(DVec3::new(3.0, 100.0, 4.0));
        assert!((d - 5.0).abs() < EPS);
    }
}
