//! The four sink stages of the pipeline.

pub mod export;
pub mod notify;
pub mod persist;
pub mod render;

mod questions;

/// Wire spelling of a serde enum value, e.g. `Industry::ItServices` ->
/// `"IT Services"`.
pub(crate) fn wire_str<T: serde::Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(s)) => s,
        _ => String::new(),
    }
}
