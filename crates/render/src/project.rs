use bealtmian_common::SessionConfig;
use bealtmian_kernel::CameraPose;
use glam::{DVec2, DVec3};

/// Screen size and pinhole parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub focal_length: f64,
    /// Camera-space depths at or below this are rejected.
    pub near_epsilon: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::from_config(&SessionConfig::default())
    }
}

impl Viewport {
    pub fn from_config(config: &SessionConfig) -> Self {
        Self {
            width: f64::from(config.width),
            height: f64::from(config.height),
            focal_length: config.focal_length,
            near_epsilon: config.near_epsilon,
        }
    }
}

/// A projected point. `depth` is the camera-space z, used only for the
/// near-plane test and as a hint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
    pub depth: f64,
}

impl ScreenPoint {
    pub fn xy(self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }
}

/// Project a world point through a yaw-only pinhole camera.
///
/// The x/z offset from the camera is rotated by the yaw; y is left as is, so
/// pitch has no effect. Returns `None` when the camera-space depth is at or
/// below the near epsilon.
pub fn project(point: DVec3, camera: &CameraPose, viewport: &Viewport) -> Option<ScreenPoint> {
    let t = point - camera.position;
    let (sin, cos) = camera.yaw.sin_cos();

    let rx = t.x * cos - t.z * sin;
    let rz = t.x * sin + t.z * cos;
    if rz <= viewport.near_epsilon {
        return None;
    }

    let f = viewport.focal_length;
    Some(ScreenPoint {
        x: rx * f / rz + viewport.width / 2.0,
        y: t.y * f / rz + viewport.height / 2.0,
        depth: rz,
    })
}

/// Project every point, or none: a single rejected corner drops the polygon.
pub fn project_all<const N: usize>(
    points: &[DVec3; N],
    camera: &CameraPose,
    viewport: &Viewport,
) -> Option<[DVec2; N]> {
    let mut out = [DVec2::ZERO; N];
    for (slot, point) in out.iter_mut().zip(points) {
        *slot = project(*point, camera, viewport)?.xy();
    }
    Some(out)
}
