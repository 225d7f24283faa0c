//! egui painter backend for the bealtmian `Canvas`.
//!
//! Maps canvas pixels onto an egui painter region, scaling uniformly so the
//! whole canvas fits. Shapes are painted in call order, which preserves the
//! composer's back-to-front layering.

mod canvas;

pub use canvas::{EguiCanvas, to_color32};

pub fn crate_info() -> &'static str {
    "bealtmian-render-egui v0.1.0"
}
