use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures of the browser-facing shell. The engine itself never fails.
#[derive(Debug, Error)]
pub enum GraphError {
	#[error("canvas has no 2d context")]
	NoContext,

	#[error("canvas call failed: {0}")]
	Js(String),

	#[error("invalid graph json: {0}")]
	Json(#[from] serde_json::Error),
}

impl From<JsValue> for GraphError {
	fn from(value: JsValue) -> Self {
		GraphError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
	}
}
