//! Calls into renderers loaded by the host page.
//!
//! The 3D and map views are plain JS libraries registered on a global object
//! (`window.punxGraph.show3d(data)`, `window.punxGraph.showMap(layers)`). When
//! the page did not load them the hand-off is skipped with a warning.

use js_sys::{Function, JSON, Reflect};
use log::{info, warn};
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};

/// Serializes `payload` and passes it to `window[namespace][method]`.
///
/// Returns whether the renderer was found and accepted the call.
pub fn hand_off<T: Serialize>(namespace: &str, method: &str, payload: &T) -> bool {
	let json = match serde_json::to_string(payload) {
		Ok(json) => json,
		Err(e) => {
			warn!("punx-graph: failed to serialize {} payload: {}", method, e);
			return false;
		}
	};
	hand_off_json(namespace, method, &json)
}

/// Like [`hand_off`], for an already serialized JSON payload.
pub fn hand_off_json(namespace: &str, method: &str, json: &str) -> bool {
	let Some(window) = web_sys::window() else {
		warn!("punx-graph: no window, cannot call {}.{}", namespace, method);
		return false;
	};

	let target = Reflect::get(&window, &JsValue::from_str(namespace))
		.ok()
		.filter(|target| target.is_object());
	let Some(target) = target else {
		warn!("punx-graph: renderer library {} is not loaded", namespace);
		return false;
	};

	let function = Reflect::get(&target, &JsValue::from_str(method))
		.ok()
		.and_then(|value| value.dyn_into::<Function>().ok());
	let Some(function) = function else {
		warn!("punx-graph: {}.{} is not a function", namespace, method);
		return false;
	};

	let args = match JSON::parse(json) {
		Ok(args) => args,
		Err(e) => {
			warn!("punx-graph: invalid payload for {}.{}: {:?}", namespace, method, e);
			return false;
		}
	};

	match function.call1(&target, &args) {
		Ok(_) => {
			info!("punx-graph: handed off to {}.{}", namespace, method);
			true
		}
		Err(e) => {
			warn!("punx-graph: {}.{} failed: {:?}", namespace, method, e);
			false
		}
	}
}
