use crate::primitives::Point;
use crate::render::{Canvas, Color, LineStyle, PolyStyle};

/// Canvas that records every call as an SVG element.
#[derive(Default)]
pub struct SvgCanvas {
    elements: Vec<String>,
}

fn paint(c: Option<Color>) -> String {
    c.map(|c| c.to_css()).unwrap_or_else(|| "none".to_string())
}

fn dash_attr(dash: &[f64]) -> String {
    if dash.is_empty() {
        return String::new();
    }
    let parts: Vec<String> = dash.iter().map(|d| d.to_string()).collect();
    format!(" stroke-dasharray=\"{}\"", parts.join(" "))
}

impl SvgCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elements(&self) -> &[String] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Wrap the recorded elements in an `<svg>` document.
    pub fn finish(&self, width: f64, height: f64) -> String {
        let mut out = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\">\n",
            width, height, width, height
        );
        for e in &self.elements {
            out.push_str("  ");
            out.push_str(e);
            out.push('\n');
        }
        out.push_str("</svg>\n");
        out
    }
}

impl Canvas for SvgCanvas {
    fn polygon(&mut self, points: &[Point], style: &PolyStyle) {
        let Some(first) = points.first() else {
            return;
        };
        let mut d = format!("M {} {}", first.x, first.y);
        for p in &points[1..] {
            d.push_str(&format!(" L {} {}", p.x, p.y));
        }
        d.push_str(" Z");
        let join = if style.round_join { " stroke-linejoin=\"round\"" } else { "" };
        self.elements.push(format!(
            "<path d=\"{}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{}\"{}/>",
            d,
            paint(style.fill),
            paint(style.stroke),
            style.line_width,
            join
        ));
    }

    fn line(&mut self, p1: Point, p2: Point, style: &LineStyle) {
        let cap = if style.round_cap { " stroke-linecap=\"round\"" } else { "" };
        self.elements.push(format!(
            "<path d=\"M {} {} L {} {}\" stroke=\"{}\" stroke-width=\"{}\"{}{}/>",
            p1.x,
            p1.y,
            p2.x,
            p2.y,
            style.color.to_css(),
            style.width,
            dash_attr(&style.dash),
            cap
        ));
    }

    fn sprite(&mut self, name: &str, center: Point, rotation: f64) {
        self.elements.push(format!(
            "<use href=\"#{}\" transform=\"translate({} {}) rotate({})\"/>",
            name,
            center.x,
            center.y,
            rotation.to_degrees()
        ));
    }
}
