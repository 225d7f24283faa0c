use bealtmian_common::Rgb;
use bealtmian_render::{Canvas, Font};
use egui::{Align2, Color32, CornerRadius, FontId, Painter, Pos2, Rect, Shape, Stroke, Vec2};
use glam::DVec2;

/// Outline width in points for stroked polygons.
const OUTLINE_WIDTH: f32 = 1.0;

pub fn to_color32(color: Rgb) -> Color32 {
    Color32::from_rgb(color.r, color.g, color.b)
}

/// A canvas of `width` x `height` pixels drawn into `target` on an egui painter.
pub struct EguiCanvas<'p> {
    painter: &'p Painter,
    target: Rect,
    origin: Pos2,
    scale: f32,
}

impl<'p> EguiCanvas<'p> {
    /// Fit a `width` x `height` canvas into `target`, centered, keeping aspect.
    pub fn new(painter: &'p Painter, target: Rect, width: u32, height: u32) -> Self {
        let size = Vec2::new(width.max(1) as f32, height.max(1) as f32);
        let scale = (target.width() / size.x).min(target.height() / size.y);
        let origin = target.center() - size * scale / 2.0;
        Self {
            painter,
            target,
            origin,
            scale,
        }
    }

    /// Points per canvas pixel.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn to_screen(&self, x: f64, y: f64) -> Pos2 {
        self.origin + Vec2::new(x as f32, y as f32) * self.scale
    }
}

impl Canvas for EguiCanvas<'_> {
    fn clear(&mut self) {
        self.painter
            .rect_filled(self.target, CornerRadius::ZERO, Color32::WHITE);
    }

    fn fill_rect(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, color: Rgb) {
        let rect = Rect::from_two_pos(self.to_screen(x0, y0), self.to_screen(x1, y1));
        self.painter
            .rect_filled(rect, CornerRadius::ZERO, to_color32(color));
    }

    fn fill_polygon(&mut self, points: &[DVec2], fill: Rgb, outline: Option<Rgb>) {
        let points: Vec<Pos2> = points.iter().map(|p| self.to_screen(p.x, p.y)).collect();
        let stroke = outline.map_or(Stroke::NONE, |c| Stroke::new(OUTLINE_WIDTH, to_color32(c)));
        self.painter
            .add(Shape::convex_polygon(points, to_color32(fill), stroke));
    }

    fn draw_text(&mut self, x: f64, y: f64, text: &str, color: Rgb, font: Font) {
        self.painter.text(
            self.to_screen(x, y),
            Align2::CENTER_CENTER,
            text,
            FontId::proportional(font.size * self.scale),
            to_color32(color),
        );
    }
}
