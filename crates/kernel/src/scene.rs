use bealtmian_common::SessionConfig;
use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::RandomSource;

/// Vertex indices of the six cube faces, four corners each.
pub const CUBE_FACES: [[usize; 4]; 6] = [
    [0, 1, 2, 3],
    [4, 5, 6, 7],
    [0, 1, 5, 4],
    [2, 3, 7, 6],
    [0, 3, 7, 4],
    [1, 2, 6, 5],
];

/// An axis-aligned cube. `size` is the half-extent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cube {
    pub position: DVec3,
    pub size: f64,
}

impl Cube {
    pub fn new(position: DVec3, size: f64) -> Self {
        Self { position, size }
    }

    /// The eight corners, near face (-z) first, each face counter-clockwise
    /// from the (-x, -y) corner.
    pub fn vertices(&self) -> [DVec3; 8] {
        let DVec3 { x, y, z } = self.position;
        let s = self.size;
        [
            DVec3::new(x - s, y - s, z - s),
            DVec3::new(x + s, y - s, z - s),
            DVec3::new(x + s, y + s, z - s),
            DVec3::new(x - s, y + s, z - s),
            DVec3::new(x - s, y - s, z + s),
            DVec3::new(x + s, y - s, z + s),
            DVec3::new(x + s, y + s, z + s),
            DVec3::new(x - s, y + s, z + s),
        ]
    }
}

/// The fixed collection of cubes for a session.
///
/// Read-only once built: renderers borrow it and sort references, never the
/// collection itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    cubes: Vec<Cube>,
    floor: FloorGrid,
}

impl Scene {
    pub fn from_cubes(cubes: Vec<Cube>) -> Self {
        Self {
            cubes,
            floor: FloorGrid::default(),
        }
    }

    /// Scatter `cube_count` cubes on integer x/z positions at ground level.
    pub fn generate(config: &SessionConfig, rng: &mut dyn RandomSource) -> Self {
        let (x_min, x_max) = config.cube_x_range;
        let (z_min, z_max) = config.cube_z_range;
        let (s_min, s_max) = config.cube_size_range;

        let cubes = (0..config.cube_count)
            .map(|_| {
                let x = rng.int_inclusive(i64::from(x_min), i64::from(x_max));
                let z = rng.int_inclusive(i64::from(z_min), i64::from(z_max));
                let size = rng.uniform(s_min, s_max);
                Cube::new(DVec3::new(x as f64, 0.0, z as f64), size)
            })
            .collect();

        let scene = Self::from_cubes(cubes);
        tracing::info!(cubes = scene.cube_count(), "scene generated");
        scene
    }

    pub fn cubes(&self) -> &[Cube] {
        &self.cubes
    }

    pub fn cube_count(&self) -> usize {
        self.cubes.len()
    }

    pub fn floor(&self) -> &FloorGrid {
        &self.floor
    }
}

/// The floor: a band of quads on a horizontal plane, walked far to near.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloorGrid {
    /// First (farthest) z row.
    pub far_z: i32,
    /// Rows stop before reaching this z.
    pub near_z: i32,
    pub z_step: i32,
    pub min_x: i32,
    /// Columns stop before reaching this x.
    pub max_x: i32,
    pub x_step: i32,
    /// Plane height. Positive y is below the camera on screen.
    pub height: f64,
}

impl Default for FloorGrid {
    fn default() -> Self {
        Self {
            far_z: 50,
            near_z: 0,
            z_step: 5,
            min_x: -30,
            max_x: 30,
            x_step: 2,
            height: 1.0,
        }
    }
}

impl FloorGrid {
    /// Quads in draw order: rows from far to near, each row left to right.
    pub fn quads(&self) -> impl Iterator<Item = FloorQuad> {
        let grid = *self;
        let rows = std::iter::successors(Some(grid.far_z), move |z| Some(z - grid.z_step))
            .take_while(move |z| *z > grid.near_z);
        rows.flat_map(move |z| {
            std::iter::successors(Some(grid.min_x), move |x| Some(x + grid.x_step))
                .take_while(move |x| *x < grid.max_x)
                .map(move |x| FloorQuad {
                    x,
                    z,
                    width: grid.x_step,
                    depth: grid.z_step,
                    height: grid.height,
                })
        })
    }

    pub fn quad_count(&self) -> usize {
        self.quads().count()
    }
}

/// One floor tile anchored at its (x, z) corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloorQuad {
    pub x: i32,
    pub z: i32,
    pub width: i32,
    pub depth: i32,
    pub height: f64,
}

impl FloorQuad {
    pub fn corners(&self) -> [DVec3; 4] {
        let x0 = f64::from(self.x);
        let z0 = f64::from(self.z);
        let x1 = f64::from(self.x + self.width);
        let z1 = f64::from(self.z + self.depth);
        let y = self.height;
        [
            DVec3::new(x0, y, z0),
            DVec3::new(x1, y, z0),
            DVec3::new(x1, y, z1),
            DVec3::new(x0, y, z1),
        ]
    }
}
