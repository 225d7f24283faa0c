//! Software rendering: yaw-only pinhole projection, XOR pattern colors, and a
//! painter's-algorithm frame composer drawing onto an abstract `Canvas`.
//!
//! # Invariants
//! - Drawing never mutates the scene; only the composer's physics step moves
//!   the camera, and only after the frame is drawn.
//! - Polygons with any corner at or behind the near plane are skipped whole.
//!   There is no clipping and no z-buffer.

mod canvas;
mod display_list;
pub mod pattern;
mod project;
mod renderer;

pub use canvas::{Canvas, Font};
pub use display_list::{DisplayList, DrawCommand, DrawStats};
pub use project::{ScreenPoint, Viewport, project, project_all};
pub use renderer::{
    FrameComposer, FrameReport, LOADING_FONT, LOADING_TEXT, depth_order, draw_cube, draw_cubes,
    draw_floor, draw_loading_screen, draw_sky,
};

pub fn crate_info() -> &'static str {
    "bealtmian-render v0.1.0"
}
