use bealtmian_common::Rgb;
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::AddAssign;

use crate::{Canvas, Font};

/// One recorded canvas call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    FillRect {
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
        color: Rgb,
    },
    FillPolygon {
        points: Vec<DVec2>,
        fill: Rgb,
        outline: Option<Rgb>,
    },
    Text {
        x: f64,
        y: f64,
        text: String,
        color: Rgb,
        font: Font,
    },
}

/// Recording canvas: keeps the calls of the current frame in order.
///
/// `clear` empties the list, so after a tick it holds exactly one frame.
/// Replaying onto another canvas reproduces the frame.
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Polygons in draw order, as `(points, fill, outline)`.
    pub fn polygons(&self) -> impl Iterator<Item = (&[DVec2], Rgb, Option<Rgb>)> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::FillPolygon {
                points,
                fill,
                outline,
            } => Some((points.as_slice(), *fill, *outline)),
            _ => None,
        })
    }

    pub fn replay(&self, canvas: &mut dyn Canvas) {
        for cmd in &self.commands {
            match cmd {
                DrawCommand::Clear => canvas.clear(),
                DrawCommand::FillRect {
                    x0,
                    y0,
                    x1,
                    y1,
                    color,
                } => canvas.fill_rect(*x0, *y0, *x1, *y1, *color),
                DrawCommand::FillPolygon {
                    points,
                    fill,
                    outline,
                } => canvas.fill_polygon(points, *fill, *outline),
                DrawCommand::Text {
                    x,
                    y,
                    text,
                    color,
                    font,
                } => canvas.draw_text(*x, *y, text, *color, *font),
            }
        }
    }

    pub fn stats(&self) -> DrawStats {
        let mut stats = DrawStats::default();
        for cmd in &self.commands {
            match cmd {
                DrawCommand::Clear => stats.clears += 1,
                DrawCommand::FillRect { .. } => stats.rects += 1,
                DrawCommand::FillPolygon { outline, .. } => {
                    stats.polygons += 1;
                    if outline.is_some() {
                        stats.outlined_polygons += 1;
                    }
                }
                DrawCommand::Text { .. } => stats.texts += 1,
            }
        }
        stats
    }
}

impl Canvas for DisplayList {
    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_rect(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, color: Rgb) {
        self.commands.push(DrawCommand::FillRect {
            x0,
            y0,
            x1,
            y1,
            color,
        });
    }

    fn fill_polygon(&mut self, points: &[DVec2], fill: Rgb, outline: Option<Rgb>) {
        self.commands.push(DrawCommand::FillPolygon {
            points: points.to_vec(),
            fill,
            outline,
        });
    }

    fn draw_text(&mut self, x: f64, y: f64, text: &str, color: Rgb, font: Font) {
        self.commands.push(DrawCommand::Text {
            x,
            y,
            text: text.to_owned(),
            color,
            font,
        });
    }
}

/// Human-readable dump of the recorded frame, one call per line.
impl fmt::Display for DisplayList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cmd in &self.commands {
            match cmd {
                DrawCommand::Clear => writeln!(f, "clear")?,
                DrawCommand::FillRect {
                    x0,
                    y0,
                    x1,
                    y1,
                    color,
                } => writeln!(f, "rect ({x0:.1}, {y0:.1})-({x1:.1}, {y1:.1}) {color}")?,
                DrawCommand::FillPolygon {
                    points,
                    fill,
                    outline,
                } => {
                    write!(f, "polygon {fill}")?;
                    if let Some(outline) = outline {
                        write!(f, " outline {outline}")?;
                    }
                    for p in points {
                        write!(f, " ({:.1}, {:.1})", p.x, p.y)?;
                    }
                    writeln!(f)?;
                }
                DrawCommand::Text {
                    x, y, text, color, ..
                } => writeln!(f, "text ({x:.1}, {y:.1}) {color} {text:?}")?,
            }
        }
        Ok(())
    }
}

/// Draw-call counts for a frame or a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawStats {
    pub clears: u64,
    pub rects: u64,
    pub polygons: u64,
    pub outlined_polygons: u64,
    pub texts: u64,
}

impl AddAssign for DrawStats {
    fn add_assign(&mut self, rhs: Self) {
        self.clears += rhs.clears;
        self.rects += rhs.rects;
        self.polygons += rhs.polygons;
        self.outlined_polygons += rhs.outlined_polygons;
        self.texts += rhs.texts;
    }
}
