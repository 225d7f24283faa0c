use bealtmian_common::Rgb;
use glam::DVec2;

/// Font request for text draws. Backends map the family to whatever they have.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    pub family: &'static str,
    pub size: f32,
}

/// A 2D drawing surface in pixel coordinates, origin top-left, y down.
///
/// Later draws paint over earlier ones; there is no depth test.
pub trait Canvas {
    /// Erase everything drawn so far.
    fn clear(&mut self);

    /// Fill the axis-aligned rectangle between two corners.
    fn fill_rect(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, color: Rgb);

    /// Fill a convex polygon, optionally stroking its outline.
    fn fill_polygon(&mut self, points: &[DVec2], fill: Rgb, outline: Option<Rgb>);

    /// Draw text centered on `(x, y)`.
    fn draw_text(&mut self, x: f64, y: f64, text: &str, color: Rgb, font: Font);
}
