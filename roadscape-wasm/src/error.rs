use js_sys::{Object, Reflect};
use roadscape::{ConfigError, GraphError};
use wasm_bindgen::prelude::*;

fn set_kv(obj: &Object, k: &str, v: &JsValue) { let _ = Reflect::set(obj, &JsValue::from_str(k), v); }

fn new_obj() -> Object { Object::new() }

pub fn ok(v: JsValue) -> JsValue {
    let o = new_obj();
    set_kv(&o, "ok", &JsValue::from_bool(true));
    set_kv(&o, "value", &v);
    o.into()
}

pub fn err(code: &'static str, message: impl Into<String>, data: Option<JsValue>) -> JsValue {
    let root = new_obj();
    set_kv(&root, "ok", &JsValue::from_bool(false));
    let e = new_obj();
    set_kv(&e, "code", &JsValue::from_str(code));
    set_kv(&e, "message", &JsValue::from_str(&message.into()));
    if let Some(d) = data { set_kv(&e, "data", &d); }
    set_kv(&root, "error", &e.into());
    root.into()
}

#[inline]
pub fn non_finite(param: &str) -> JsValue {
    let d = new_obj(); set_kv(&d, "param", &JsValue::from_str(param));
    err("non_finite", format!("parameter '{}' must be finite", param), Some(d.into()))
}

#[inline]
pub fn unknown_point(x: f64, y: f64) -> JsValue {
    let d = new_obj();
    set_kv(&d, "x", &JsValue::from_f64(x));
    set_kv(&d, "y", &JsValue::from_f64(y));
    err("unknown_point", format!("no point at ({}, {})", x, y), Some(d.into()))
}

#[inline]
pub fn invalid_kind(got: &str) -> JsValue {
    let d = new_obj(); set_kv(&d, "got", &JsValue::from_str(got));
    err("invalid_kind", "marking kind must be 'stop', 'crossing' or 'start'", Some(d.into()))
}

pub fn config(e: &ConfigError) -> JsValue {
    match e {
        ConfigError::NotPositive { param, got } => {
            let d = new_obj();
            set_kv(&d, "param", &JsValue::from_str(param));
            set_kv(&d, "got", &JsValue::from_f64(*got));
            err("invalid_config", e.to_string(), Some(d.into()))
        }
        ConfigError::Zero { param } => {
            let d = new_obj(); set_kv(&d, "param", &JsValue::from_str(param));
            err("invalid_config", e.to_string(), Some(d.into()))
        }
        ConfigError::Json(_) => err("invalid_json", e.to_string(), None),
    }
}

pub fn graph(e: &GraphError) -> JsValue {
    match e {
        GraphError::InconsistentData { index, x, y } => {
            let d = new_obj();
            set_kv(&d, "segment", &JsValue::from_f64(*index as f64));
            set_kv(&d, "x", &JsValue::from_f64(*x));
            set_kv(&d, "y", &JsValue::from_f64(*y));
            err("inconsistent_data", e.to_string(), Some(d.into()))
        }
        GraphError::Json(_) => err("invalid_json", e.to_string(), None),
    }
}
