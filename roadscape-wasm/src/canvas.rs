use js_sys::Array;
use roadscape::{Canvas, Color, LineStyle, Point, PolyStyle};
use std::collections::HashMap;
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

/// Images registered from JS, looked up by sprite name.
#[derive(Default)]
pub struct SpriteSheet {
    images: HashMap<String, HtmlImageElement>,
}

impl SpriteSheet {
    pub fn insert(&mut self, name: String, img: HtmlImageElement) { self.images.insert(name, img); }
    pub fn get(&self, name: &str) -> Option<&HtmlImageElement> { self.images.get(name) }
}

/// [`Canvas`] over a 2D rendering context.
pub struct ContextCanvas<'a> {
    ctx: &'a CanvasRenderingContext2d,
    sprites: &'a SpriteSheet,
}

impl<'a> ContextCanvas<'a> {
    pub fn new(ctx: &'a CanvasRenderingContext2d, sprites: &'a SpriteSheet) -> Self {
        ContextCanvas { ctx, sprites }
    }

    fn set_dash(&self, dash: &[f64]) {
        let arr = Array::new();
        for d in dash { arr.push(&JsValue::from_f64(*d)); }
        let _ = self.ctx.set_line_dash(&arr);
    }
}

fn css(c: Color) -> String { c.to_css() }

impl Canvas for ContextCanvas<'_> {
    fn polygon(&mut self, points: &[Point], style: &PolyStyle) {
        let Some(first) = points.first() else { return };
        let ctx = self.ctx;
        ctx.begin_path();
        ctx.move_to(first.x, first.y);
        for p in &points[1..] { ctx.line_to(p.x, p.y); }
        ctx.close_path();
        ctx.set_line_join(if style.round_join { "round" } else { "miter" });
        if let Some(fill) = style.fill {
            ctx.set_fill_style_str(&css(fill));
            ctx.fill();
        }
        if let Some(stroke) = style.stroke {
            ctx.set_stroke_style_str(&css(stroke));
            ctx.set_line_width(style.line_width);
            ctx.stroke();
        }
    }

    fn line(&mut self, p1: Point, p2: Point, style: &LineStyle) {
        let ctx = self.ctx;
        ctx.begin_path();
        ctx.set_line_width(style.width);
        ctx.set_stroke_style_str(&css(style.color));
        ctx.set_line_cap(if style.round_cap { "round" } else { "butt" });
        self.set_dash(&style.dash);
        ctx.move_to(p1.x, p1.y);
        ctx.line_to(p2.x, p2.y);
        ctx.stroke();
        self.set_dash(&[]);
    }

    fn sprite(&mut self, name: &str, center: Point, rotation: f64) {
        let Some(img) = self.sprites.get(name) else {
            log::trace!("sprite '{}' not registered", name);
            return;
        };
        let ctx = self.ctx;
        ctx.save();
        let _ = ctx.translate(center.x, center.y);
        let _ = ctx.rotate(rotation);
        let (w, h) = (img.width() as f64, img.height() as f64);
        let _ = ctx.draw_image_with_html_image_element(img, -w / 2.0, -h / 2.0);
        ctx.restore();
    }
}
