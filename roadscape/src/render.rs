//! Drawing contract between the scene and whatever surface renders it.
//!
//! The core never talks to a concrete surface. Entities implement
//! [`Drawable`] against the narrow [`Canvas`] trait; the wasm binding
//! provides a canvas over `CanvasRenderingContext2d`, and [`SvgCanvas`]
//! records to SVG for tests and offline output.
//!
//! [`SvgCanvas`]: crate::svg::SvgCanvas

use crate::primitives::Point;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const ROAD: Color = Color::rgb(0xBB, 0xBB, 0xBB);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }

    /// Channel from a float, clamped to `0..=255`.
    pub fn channel(v: f64) -> u8 {
        v.round().clamp(0.0, 255.0) as u8
    }

    pub fn to_css(&self) -> String {
        if self.a == 255 {
            format!("rgb({},{},{})", self.r, self.g, self.b)
        } else {
            format!("rgba({},{},{},{:.3})", self.r, self.g, self.b, self.a as f64 / 255.0)
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PolyStyle {
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub line_width: f64,
    /// Round joins; used for road surfaces so that arcs blend.
    pub round_join: bool,
}

impl Default for PolyStyle {
    fn default() -> Self {
        PolyStyle {
            fill: Some(Color::rgba(0, 0, 255, 77)),
            stroke: Some(Color::rgb(0, 0, 255)),
            line_width: 2.0,
            round_join: false,
        }
    }
}

impl PolyStyle {
    pub fn filled(fill: Color, stroke: Color, line_width: f64) -> Self {
        PolyStyle { fill: Some(fill), stroke: Some(stroke), line_width, round_join: false }
    }

    pub fn outline(stroke: Color, line_width: f64) -> Self {
        PolyStyle { fill: None, stroke: Some(stroke), line_width, round_join: false }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LineStyle {
    pub color: Color,
    pub width: f64,
    /// Alternating dash/gap lengths; empty for a solid line.
    pub dash: Vec<f64>,
    pub round_cap: bool,
}

impl Default for LineStyle {
    fn default() -> Self {
        LineStyle { color: Color::BLACK, width: 2.0, dash: Vec::new(), round_cap: false }
    }
}

impl LineStyle {
    pub fn solid(color: Color, width: f64) -> Self {
        LineStyle { color, width, ..Default::default() }
    }

    pub fn dashed(color: Color, width: f64, dash: &[f64]) -> Self {
        LineStyle { color, width, dash: dash.to_vec(), round_cap: false }
    }
}

pub trait Canvas {
    fn polygon(&mut self, points: &[Point], style: &PolyStyle);
    fn line(&mut self, p1: Point, p2: Point, style: &LineStyle);
    /// Named image centered at `center`, rotated by `rotation` radians.
    fn sprite(&mut self, name: &str, center: Point, rotation: f64);
}

/// Anything the world can put on a canvas, seen from `view_point`.
pub trait Drawable {
    fn draw(&self, canvas: &mut dyn Canvas, view_point: Point);
}

#[cfg(test)]
pub(crate) mod recording {
    use super::*;

    /// Canvas that only remembers what was asked of it.
    #[derive(Default)]
    pub struct RecordingCanvas {
        pub polygons: Vec<(Vec<Point>, PolyStyle)>,
        pub lines: Vec<(Point, Point, LineStyle)>,
        pub sprites: Vec<(String, Point, f64)>,
    }

    impl Canvas for RecordingCanvas {
        fn polygon(&mut self, points: &[Point], style: &PolyStyle) {
            self.polygons.push((points.to_vec(), style.clone()));
        }
        fn line(&mut self, p1: Point, p2: Point, style: &LineStyle) {
            self.lines.push((p1, p2, style.clone()));
        }
        fn sprite(&mut self, name: &str, center: Point, rotation: f64) {
            self.sprites.push((name.to_string(), center, rotation));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_colors() {
        assert_eq!(Color::ROAD.to_css(), "rgb(187,187,187)");
        assert_eq!(Color::rgba(255, 0, 0, 0).to_css(), "rgba(255,0,0,0.000)");
        assert_eq!(Color::channel(300.0), 255);
        assert_eq!(Color::channel(49.6), 50);
    }
}
