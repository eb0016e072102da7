use crate::canvas::ContextCanvas;
use crate::error;
use crate::interop::{self, BuildingView, MarkingView, TreeView};
use crate::RoadWorld;
use js_sys::Float64Array;
use roadscape::{Graph, MarkingKind, Point, Segment, WorldConfig};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};
type JsValue = wasm_bindgen::JsValue;

#[wasm_bindgen]
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn finite(x: f64, y: f64) -> Option<JsValue> {
    if !x.is_finite() {
        return Some(error::non_finite("x"));
    }
    if !y.is_finite() {
        return Some(error::non_finite("y"));
    }
    None
}

fn marking_kind(s: &str) -> Option<MarkingKind> {
    match s {
        "stop" => Some(MarkingKind::Stop),
        "crossing" => Some(MarkingKind::Crossing),
        "start" => Some(MarkingKind::Start),
        _ => None,
    }
}

#[wasm_bindgen]
impl RoadWorld {
    /// Empty world. `config_json` may set any subset of the config fields;
    /// on failure the error envelope is thrown.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<RoadWorld, JsValue> {
        let config = match config_json {
            Some(s) => WorldConfig::from_json_str(&s).map_err(|e| error::config(&e))?,
            None => WorldConfig::default(),
        };
        RoadWorld::rs_new(config).map_err(|e| error::config(&e))
    }

    // Points
    pub fn add_point(&mut self, x: f64, y: f64) -> bool {
        self.inner.graph_mut().try_add_point(Point::new(x, y))
    }
    pub fn add_point_res(&mut self, x: f64, y: f64) -> JsValue {
        if let Some(e) = finite(x, y) {
            return e;
        }
        error::ok(JsValue::from_bool(self.add_point(x, y)))
    }
    pub fn remove_point(&mut self, x: f64, y: f64) -> bool {
        self.inner.graph_mut().remove_point(Point::new(x, y))
    }
    pub fn move_point(&mut self, fx: f64, fy: f64, tx: f64, ty: f64) -> bool {
        self.inner.graph_mut().move_point(Point::new(fx, fy), Point::new(tx, ty))
    }
    pub fn move_point_res(&mut self, fx: f64, fy: f64, tx: f64, ty: f64) -> JsValue {
        if let Some(e) = finite(tx, ty) {
            return e;
        }
        if !self.inner.graph().contains_point(Point::new(fx, fy)) {
            return error::unknown_point(fx, fy);
        }
        error::ok(JsValue::from_bool(self.move_point(fx, fy, tx, ty)))
    }
    pub fn point_count(&self) -> u32 {
        self.inner.graph().points().len() as u32
    }
    /// Nearest point within `threshold` as `[x, y]`, or null.
    pub fn nearest_point(&self, x: f64, y: f64, threshold: f64) -> JsValue {
        match self.inner.graph().nearest_point(Point::new(x, y), threshold) {
            Some(p) => interop::to_js(&[p.x, p.y]),
            None => JsValue::NULL,
        }
    }

    // Segments
    pub fn add_segment(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> bool {
        self.inner
            .graph_mut()
            .try_add_segment(Segment::new(Point::new(x1, y1), Point::new(x2, y2)))
    }
    pub fn add_segment_res(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> JsValue {
        for (x, y) in [(x1, y1), (x2, y2)] {
            if let Some(e) = finite(x, y) {
                return e;
            }
            if !self.inner.graph().contains_point(Point::new(x, y)) {
                return error::unknown_point(x, y);
            }
        }
        if Point::new(x1, y1) == Point::new(x2, y2) {
            return error::err("invalid_segment", "segment endpoints cannot be the same point", None);
        }
        error::ok(JsValue::from_bool(self.add_segment(x1, y1, x2, y2)))
    }
    pub fn remove_segment(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> bool {
        self.inner
            .graph_mut()
            .remove_segment(&Segment::new(Point::new(x1, y1), Point::new(x2, y2)))
    }
    pub fn segment_count(&self) -> u32 {
        self.inner.graph().segments().len() as u32
    }

    pub fn clear(&mut self) {
        self.inner.dispose();
    }

    // Generation
    pub fn generate(&mut self) -> bool {
        self.inner.generate()
    }
    pub fn regenerate(&mut self) {
        self.inner.regenerate()
    }
    pub fn hash(&self) -> String {
        format!("{:016x}", self.inner.hash())
    }
    pub fn set_trees_enabled(&mut self, on: bool) {
        if on {
            self.inner.enable_trees();
        } else {
            self.inner.disable_trees();
        }
    }
    pub fn trees_enabled(&self) -> bool {
        self.inner.trees_enabled()
    }
    pub fn config_json(&self) -> String {
        self.inner.config().to_json_string()
    }

    // Persistence
    pub fn save_graph_json(&self) -> String {
        self.inner.graph().to_json_string()
    }
    /// Replace the graph. Markings are dropped, the scene regenerates on the
    /// next `generate`.
    pub fn load_graph_json(&mut self, json: &str) -> JsValue {
        match Graph::from_json_str(json) {
            Ok(g) => {
                let counts = interop::new_obj();
                interop::set_kv(&counts, "points", &JsValue::from_f64(g.points().len() as f64));
                interop::set_kv(&counts, "segments", &JsValue::from_f64(g.segments().len() as f64));
                self.inner.clear_markings();
                *self.inner.graph_mut() = g;
                error::ok(counts.into())
            }
            Err(e) => error::graph(&e),
        }
    }

    // Read accessors
    pub fn points(&self) -> Float64Array {
        interop::flat_points(self.inner.graph().points())
    }
    pub fn segments(&self) -> Float64Array {
        interop::flat_segments(self.inner.graph().segments())
    }
    pub fn road_borders(&self) -> Float64Array {
        interop::flat_segments(self.inner.road_borders())
    }
    pub fn lane_guides(&self) -> Float64Array {
        interop::flat_segments(self.inner.lane_guides())
    }
    /// Road outlines as `[[x, y], ...]` rings.
    pub fn roads(&self) -> JsValue {
        let rings: Vec<Vec<[f64; 2]>> =
            self.inner.roads().iter().map(|r| interop::ring(&r.envelope.poly.points)).collect();
        interop::to_js(&rings)
    }
    pub fn buildings(&self) -> JsValue {
        let v: Vec<BuildingView> = self
            .inner
            .buildings()
            .iter()
            .map(|b| BuildingView { base: interop::ring(&b.base.points), height: b.height })
            .collect();
        interop::to_js(&v)
    }
    pub fn trees(&self) -> JsValue {
        let v: Vec<TreeView> = self
            .inner
            .trees()
            .iter()
            .map(|t| TreeView { x: t.center.x, y: t.center.y, radius: t.radius, parent: t.parent })
            .collect();
        interop::to_js(&v)
    }
    pub fn markings(&self) -> JsValue {
        let v: Vec<MarkingView> = self
            .inner
            .markings()
            .iter()
            .map(|m| {
                let s = m.shape();
                MarkingView { kind: m.kind(), x: s.center.x, y: s.center.y, base: interop::ring(&s.base.points) }
            })
            .collect();
        interop::to_js(&v)
    }

    // Markings
    pub fn place_marking_res(&mut self, kind: &str, x: f64, y: f64, threshold: f64) -> JsValue {
        let Some(k) = marking_kind(kind) else {
            return error::invalid_kind(kind);
        };
        if let Some(e) = finite(x, y) {
            return e;
        }
        error::ok(JsValue::from_bool(self.inner.place_marking(k, Point::new(x, y), threshold)))
    }
    pub fn remove_marking_at(&mut self, x: f64, y: f64) -> bool {
        self.inner.remove_marking_at(Point::new(x, y))
    }
    pub fn clear_markings(&mut self) {
        self.inner.clear_markings()
    }

    // Rendering
    pub fn register_sprite(&mut self, name: String, img: HtmlImageElement) {
        self.sprites.insert(name, img);
    }
    pub fn draw(&self, ctx: &CanvasRenderingContext2d, vx: f64, vy: f64) {
        let mut canvas = ContextCanvas::new(ctx, &self.sprites);
        self.inner.draw(&mut canvas, Point::new(vx, vy));
    }
}
