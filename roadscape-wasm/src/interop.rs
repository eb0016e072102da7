use js_sys::{Float64Array, Object, Reflect};
use roadscape::{Point, Segment};
use serde::Serialize;
use wasm_bindgen::JsValue;

pub fn new_obj() -> Object { Object::new() }
pub fn set_kv(obj: &Object, k: &str, v: &JsValue) {
    let _ = Reflect::set(obj, &JsValue::from_str(k), v);
}
pub fn arr_f64(slice: &[f64]) -> Float64Array {
    let arr = Float64Array::new_with_length(slice.len() as u32);
    arr.copy_from(slice); arr
}

/// `[x0, y0, x1, y1, ...]`
pub fn flat_points(points: &[Point]) -> Float64Array {
    let v: Vec<f64> = points.iter().flat_map(|p| [p.x, p.y]).collect();
    arr_f64(&v)
}

/// `[x1, y1, x2, y2, ...]`, four numbers per segment.
pub fn flat_segments(segments: &[Segment]) -> Float64Array {
    let v: Vec<f64> = segments.iter().flat_map(|s| [s.p1.x, s.p1.y, s.p2.x, s.p2.y]).collect();
    arr_f64(&v)
}

pub fn to_js<T: Serialize + ?Sized>(v: &T) -> JsValue {
    serde_wasm_bindgen::to_value(v).unwrap_or(JsValue::NULL)
}

pub fn ring(points: &[Point]) -> Vec<[f64; 2]> {
    points.iter().map(|p| [p.x, p.y]).collect()
}

#[derive(Serialize)]
pub struct BuildingView {
    pub base: Vec<[f64; 2]>,
    pub height: f64,
}

#[derive(Serialize)]
pub struct TreeView {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub parent: Option<usize>,
}

#[derive(Serialize)]
pub struct MarkingView {
    pub kind: roadscape::MarkingKind,
    pub x: f64,
    pub y: f64,
    pub base: Vec<[f64; 2]>,
}
