//! Leptos component wrapping the force-directed graph canvas.
//!
//! The component creates an HTML canvas element, mounts the graph view into
//! its [`GraphController`] and wires up pointer handlers: left click selects a
//! node (or clears the highlight on empty canvas), right click cycles a node's
//! cluster colors, dragging moves a node together with its cluster mates, and
//! the wheel zooms. An animation loop runs via `requestAnimationFrame`.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::controller::GraphController;
use super::render;
use super::types::GraphData;

/// Pointer travel (pixels) below which a press counts as a click.
const TAP_TOLERANCE: f64 = 3.0;

fn viewport_size(window: &Window) -> (f64, f64) {
	(
		window
			.inner_width()
			.ok()
			.and_then(|v| v.as_f64())
			.unwrap_or(800.0),
		window
			.inner_height()
			.ok()
			.and_then(|v| v.as_f64())
			.unwrap_or(600.0),
	)
}

/// Whether a press released at `release` is a plain click. Clicks with a
/// modifier key held, or that moved beyond [`TAP_TOLERANCE`], are not.
fn is_tap(press: (f64, f64), release: (f64, f64), modified: bool) -> bool {
	!modified && (release.0 - press.0).hypot(release.1 - press.1) <= TAP_TOLERANCE
}

/// Event position relative to the canvas.
fn canvas_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?;
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Renders an interactive force-directed graph on a canvas element.
///
/// The component sizes itself to its parent container by default; set
/// `fullscreen = true` to fill the viewport and resize with the window.
/// Explicit `width`/`height` override automatic sizing.
#[component]
pub fn ForceGraphCanvas(
	#[prop(into)] data: Signal<GraphData>,
	controller: GraphController,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let press: Rc<Cell<Option<(f64, f64)>>> = Rc::new(Cell::new(None));
	let controller_init = controller.clone();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas;
		let Some(window) = web_sys::window() else {
			warn!("punx-graph: no window, graph not mounted");
			return;
		};

		let (w, h) = if fullscreen {
			viewport_size(&window)
		} else {
			let parent = canvas.parent_element();
			(
				width.unwrap_or_else(|| {
					parent
						.as_ref()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					parent
						.as_ref()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok());
		let Some(ctx) = ctx else {
			warn!("punx-graph: canvas 2d context unavailable");
			return;
		};

		controller_init.mount(data.get(), w, h);

		if fullscreen && resize_cb.borrow().is_none() {
			let (controller_resize, canvas_resize) = (controller_init.clone(), canvas.clone());
			*resize_cb.borrow_mut() = Some(Closure::new(move || {
				let Some(win) = web_sys::window() else {
					return;
				};
				let (nw, nh) = viewport_size(&win);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				controller_resize.with_view(|c| c.state.resize(nw, nh));
			}));
			if let Some(ref cb) = *resize_cb.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		if animate.borrow().is_some() {
			return;
		}
		let (controller_anim, animate_inner) = (controller_init.clone(), animate.clone());
		*animate.borrow_mut() = Some(Closure::new(move || {
			controller_anim.with_view(|c| {
				if c.state.animation_running {
					c.state.tick(0.016);
				}
				render::render(&c.state, &ctx, &c.scale, &c.theme);
			});
			if let (Some(cb), Some(win)) = (animate_inner.borrow().as_ref(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let (controller_md, press_md) = (controller.clone(), press.clone());
	let on_mousedown = move |ev: MouseEvent| {
		if ev.button() != 0 {
			return;
		}
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		press_md.set(Some((x, y)));

		controller_md.with_view(|c| {
			let Some(idx) = c.state.node_at_position(x, y, &c.scale) else {
				c.state.pan.active = true;
				c.state.pan.start_x = x;
				c.state.pan.start_y = y;
				c.state.pan.transform_start_x = c.state.transform.x;
				c.state.pan.transform_start_y = c.state.transform.y;
				return;
			};
			let Some((node_x, node_y)) = c.state.node_position(idx) else {
				return;
			};
			let companions = c
				.state
				.node_id(idx)
				.map(|id| c.drag_companions(id))
				.unwrap_or_default()
				.iter()
				.filter_map(|mate| {
					let mate_idx = c.state.graph_index(mate)?;
					let (mx, my) = c.state.node_position(mate_idx)?;
					Some((mate_idx, mx, my))
				})
				.collect();

			let drag = &mut c.state.drag;
			drag.active = true;
			drag.node_idx = Some(idx);
			drag.start_x = x;
			drag.start_y = y;
			drag.node_start_x = node_x;
			drag.node_start_y = node_y;
			drag.companions = companions;
		});
	};

	let controller_mm = controller.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};

		controller_mm.with_view(|c| {
			if c.state.drag.active {
				let (dx, dy) = (
					(x - c.state.drag.start_x) / c.state.transform.k,
					(y - c.state.drag.start_y) / c.state.transform.k,
				);
				c.state.drag_to(dx as f32, dy as f32);
			} else {
				let hovered = c.state.node_at_position(x, y, &c.scale);
				c.state.set_hover(hovered);
				if c.state.pan.active {
					c.state.transform.x = c.state.pan.transform_start_x + (x - c.state.pan.start_x);
					c.state.transform.y = c.state.pan.transform_start_y + (y - c.state.pan.start_y);
				}
			}
		});
	};

	let (controller_mu, press_mu) = (controller.clone(), press.clone());
	let on_mouseup = move |ev: MouseEvent| {
		let point = canvas_point(canvas_ref, &ev);
		let modified = ev.shift_key() || ev.ctrl_key() || ev.meta_key();
		let tapped = controller_mu.with_view(|c| {
			c.state.drag.active = false;
			c.state.drag.node_idx = None;
			c.state.drag.companions.clear();
			c.state.pan.active = false;

			let (x, y) = point?;
			let pressed = press_mu.take()?;
			if !is_tap(pressed, (x, y), modified) {
				return None;
			}
			let hit = c.state.node_at_position(x, y, &c.scale);
			Some(hit.and_then(|idx| c.state.node_id(idx).map(str::to_string)))
		});

		match tapped.flatten() {
			Some(Some(id)) => {
				controller_mu.select_node(&id);
			}
			Some(None) => controller_mu.background_tap(),
			None => {}
		}
	};

	let controller_cm = controller.clone();
	let on_contextmenu = move |ev: MouseEvent| {
		ev.prevent_default();
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		let id = controller_cm
			.with_view(|c| {
				c.state
					.node_at_position(x, y, &c.scale)
					.and_then(|idx| c.state.node_id(idx).map(str::to_string))
			})
			.flatten();
		if let Some(id) = id {
			controller_cm.context_node(&id);
		}
	};

	let (controller_ml, press_ml) = (controller.clone(), press.clone());
	let on_mouseleave = move |_: MouseEvent| {
		press_ml.set(None);
		controller_ml.with_view(|c| {
			c.state.drag.active = false;
			c.state.drag.node_idx = None;
			c.state.drag.companions.clear();
			c.state.pan.active = false;
			c.state.set_hover(None);
		});
	};

	let controller_wh = controller.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};

		controller_wh.with_view(|c| {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			let new_k = (c.state.transform.k * factor).clamp(0.1, 10.0);
			let ratio = new_k / c.state.transform.k;
			c.state.transform.x = x - (x - c.state.transform.x) * ratio;
			c.state.transform.y = y - (y - c.state.transform.y) * ratio;
			c.state.transform.k = new_k;
		});
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="force-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:contextmenu=on_contextmenu
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
