use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Errors from session configuration validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("viewport must be non-empty, got {width}x{height}")]
    EmptyViewport { width: u32, height: u32 },
    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f64 },
    #[error("{name} range is inverted: [{min}, {max}]")]
    InvertedRange {
        name: &'static str,
        min: f64,
        max: f64,
    },
    #[error("frame interval must be non-zero")]
    ZeroFrameInterval,
}

/// Every tunable of a session: viewport, projection, scene generation,
/// timing and camera motion.
///
/// `Default` yields the stock 800x600 demo with 15 cubes and a 3 second
/// loading splash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Pinhole focal length in pixels.
    pub focal_length: f64,
    /// Points at or below this camera-space depth are rejected.
    pub near_epsilon: f64,
    /// Number of cubes generated at startup.
    pub cube_count: usize,
    /// Inclusive integer range for cube x positions.
    pub cube_x_range: (i32, i32),
    /// Inclusive integer range for cube z positions.
    pub cube_z_range: (i32, i32),
    /// Half-extent range for cube sizes.
    pub cube_size_range: (f64, f64),
    /// Initial camera position.
    pub camera_start: DVec3,
    pub loading_duration: Duration,
    /// Fixed delay between ticks.
    pub frame_interval: Duration,
    /// Loading-screen tile edge in pixels.
    pub tile_size: u32,
    /// Sky band height in pixels.
    pub sky_band_height: u32,
    /// World units per frame.
    pub move_speed: f64,
    /// Radians per frame.
    pub rotate_speed: f64,
    /// Seed for the session RNG; `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            focal_length: 400.0,
            near_epsilon: 0.1,
            cube_count: 15,
            cube_x_range: (-20, 20),
            cube_z_range: (5, 40),
            cube_size_range: (0.5, 1.5),
            camera_start: DVec3::new(0.0, -2.0, -5.0),
            loading_duration: Duration::from_secs(3),
            frame_interval: Duration::from_millis(30),
            tile_size: 20,
            sky_band_height: 20,
            move_speed: 0.3,
            rotate_speed: 0.05,
            seed: None,
        }
    }
}

impl SessionConfig {
    /// Check that the configuration describes a drawable session.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyViewport {
                width: self.width,
                height: self.height,
            });
        }
        positive("focal_length", self.focal_length)?;
        positive("near_epsilon", self.near_epsilon)?;
        positive("tile_size", f64::from(self.tile_size))?;
        positive("sky_band_height", f64::from(self.sky_band_height))?;
        positive("cube_size_range.min", self.cube_size_range.0)?;
        ordered(
            "cube_x_range",
            f64::from(self.cube_x_range.0),
            f64::from(self.cube_x_range.1),
        )?;
        ordered(
            "cube_z_range",
            f64::from(self.cube_z_range.0),
            f64::from(self.cube_z_range.1),
        )?;
        ordered(
            "cube_size_range",
            self.cube_size_range.0,
            self.cube_size_range.1,
        )?;
        if self.frame_interval.is_zero() {
            return Err(ConfigError::ZeroFrameInterval);
        }
        Ok(())
    }

    /// Horizontal and vertical screen center.
    pub fn center(&self) -> (f64, f64) {
        (f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

fn ordered(name: &'static str, min: f64, max: f64) -> Result<(), ConfigError> {
    if min <= max {
        Ok(())
    } else {
        Err(ConfigError::InvertedRange { name, min, max })
    }
}
