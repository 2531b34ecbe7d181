//! punx-graph: interactive genealogy of bands and their members.
//!
//! The [`explore`] module holds the render-independent exploration engine
//! (neighborhood highlighting, clusters, search, show-only filtering). The
//! [`components`] module draws the graph on a canvas with physics-based
//! layout and wires the engine to pointer events and control panels.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

/// Hand-off to the page's 3D and map renderers.
pub mod bridge;
/// Leptos components.
pub mod components;
/// Viewer settings.
pub mod config;
/// Render-independent exploration engine.
pub mod explore;
/// Graph data shaped for the external renderers.
pub mod projection;

pub use components::force_graph::{
	ExplorerStatus, ForceGraphCanvas, GraphController, GraphData, GraphLink, GraphNode, NodeKind,
};
pub use config::ViewerConfig;

use components::force_graph::theme::Color;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("punx-graph: logging initialized");
}

/// Text content of the `<script>` element with the given id.
fn script_text(id: &str) -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(id)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Load graph data from a script element with id="graph-data".
/// Expected format: JSON with { nodes: [...], links: [...] }
fn load_graph_data() -> Option<GraphData> {
	let json_text = script_text("graph-data")?;

	match serde_json::from_str::<GraphData>(&json_text) {
		Ok(data) => {
			info!(
				"punx-graph: loaded {} nodes, {} links",
				data.nodes.len(),
				data.links.len()
			);
			Some(data)
		}
		Err(e) => {
			warn!("punx-graph: failed to parse graph data: {}", e);
			None
		}
	}
}

/// Viewer settings from an optional script element with id="graph-config".
fn load_viewer_config() -> ViewerConfig {
	script_text("graph-config")
		.map(|text| ViewerConfig::from_json(&text))
		.unwrap_or_default()
}

/// `- n +` buttons for the highlight depth around the selected node.
#[component]
fn DepthPanel(controller: GraphController) -> impl IntoView {
	let status = controller.status();
	let (minus, plus) = (controller.clone(), controller);

	view! {
		<div
			class="panel depth-controls"
			style:display=move || if status.get().selected.is_some() { "block" } else { "none" }
		>
			<button class="btn depth-btn" on:click=move |_| { minus.contract(); }>"-"</button>
			<span class="depth-level">{move || status.get().depth}</span>
			<button class="btn depth-btn" on:click=move |_| { plus.expand(); }>"+"</button>
		</div>
	}
}

/// Color picker and buttons for turning the highlighted nodes into a cluster.
#[component]
fn ClusterPanel(controller: GraphController) -> impl IntoView {
	let status = controller.status();
	let color = RwSignal::new(
		controller
			.config()
			.default_cluster_color()
			.as_str()
			.to_string(),
	);
	let open = RwSignal::new(true);
	let selected = Memo::new(move |_| status.get().selected);

	Effect::new(move |_| {
		if selected.get().is_some() {
			open.set(true);
		}
	});

	let (random, create) = (controller.clone(), controller);

	view! {
		<div
			class="panel cluster-panel"
			style:display=move || {
				if open.get() && selected.get().is_some() { "block" } else { "none" }
			}
		>
			<div class="panel-header">"Create Cluster"</div>
			<label class="panel-label">"Cluster Color:"</label>
			<div class="panel-row">
				<input
					type="color"
					prop:value=move || color.get()
					on:input=move |ev| color.set(event_target_value(&ev))
				/>
				<button
					class="btn btn-default"
					on:click=move |_| {
						let generated = random.random_color();
						color.set(Color::parse(generated.as_str()).to_css_rgb());
					}
				>
					"Random"
				</button>
			</div>
			<div class="panel-row">
				<button
					class="btn btn-green"
					on:click=move |_| {
						if create.create_cluster(Some(color.get_untracked())).is_some() {
							open.set(false);
						}
					}
				>
					"Create Cluster"
				</button>
				<button class="btn btn-red" on:click=move |_| open.set(false)>"Cancel"</button>
			</div>
		</div>
	}
}

/// Show-only toggle, reset buttons and the external view hand-offs.
#[component]
fn ControlPanel(controller: GraphController) -> impl IntoView {
	let status = controller.status();
	let (show_only, clear_highlights, clear_all, view_3d, view_map) = (
		controller.clone(),
		controller.clone(),
		controller.clone(),
		controller.clone(),
		controller,
	);

	view! {
		<div class="panel control-panel">
			<button class="btn" on:click=move |_| { show_only.toggle_show_only(); }>
				{move || if status.get().show_only { "Show All" } else { "Show Only Clusters" }}
			</button>
			<button class="btn" on:click=move |_| clear_highlights.clear_highlights()>
				"Clear Highlights"
			</button>
			<button class="btn btn-red" on:click=move |_| clear_all.clear_all()>
				"Clear All Clusters"
			</button>
			<button class="btn" on:click=move |_| { view_3d.open_3d_view(); }>"3D View"</button>
			<button class="btn" on:click=move |_| { view_map.open_map_view(); }>"Map View"</button>
		</div>
	}
}

/// Search box with a dropdown of matching node ids.
#[component]
fn SearchBox(controller: GraphController) -> impl IntoView {
	let status = controller.status();
	let query = RwSignal::new(String::new());
	let picker = StoredValue::new_local(controller.clone());

	view! {
		<div class="panel search-panel">
			<input
				type="search"
				placeholder="Search bands and members"
				prop:value=move || query.get()
				on:input=move |ev| {
					let text = event_target_value(&ev);
					controller.search(&text);
					query.set(text);
				}
			/>
			<ul class="search-results">
				{move || {
					status
						.get()
						.search_results
						.into_iter()
						.map(|id| {
							let label = id.clone();
							view! {
								<li on:click=move |_| {
									picker.with_value(|c| c.pick_search_result(&id));
								}>{label}</li>
							}
						})
						.collect_view()
				}}
			</ul>
		</div>
	}
}

/// Details of the selected node: kind, years and its members or bands.
#[component]
fn InfoPanel(controller: GraphController) -> impl IntoView {
	let status = controller.status();

	view! {
		<div class="panel info-panel">
			{move || {
				status
					.get()
					.details
					.map(|details| {
						let related = details
							.related
							.into_iter()
							.map(|entry| {
								let line = match entry.label {
									Some(label) => format!("{} – {}", entry.id, label),
									None => entry.id,
								};
								view! { <li>{line}</li> }
							})
							.collect_view();
						view! {
							<h2>{details.id}</h2>
							<p class="subtitle">
								{details.kind.name()}
								{details.years.map(|years| format!(" ({})", years))}
							</p>
							<h3>{details.kind.related_heading()}</h3>
							<ul>{related}</ul>
						}
					})
			}}
		</div>
	}
}

/// Main application component.
/// Loads graph data and viewer settings from the DOM and renders the graph
/// with its control panels.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_viewer_config();
	let theme = config.theme.clone();
	let graph_data = load_graph_data().unwrap_or_default();
	let graph_signal = Signal::derive(move || graph_data.clone());
	let controller = GraphController::new(config);

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme=theme />
		<Title text="Punk Genealogy" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-graph">
			<ForceGraphCanvas data=graph_signal controller=controller.clone() fullscreen=true />
			<div class="graph-overlay">
				<h1>"Punk Genealogy"</h1>
				<p class="subtitle">
					"Click a node to highlight its neighborhood. Right-click to cycle its cluster colors. Drag to move, scroll to zoom."
				</p>
			</div>
			<SearchBox controller=controller.clone() />
			<DepthPanel controller=controller.clone() />
			<ClusterPanel controller=controller.clone() />
			<ControlPanel controller=controller.clone() />
			<InfoPanel controller=controller />
		</div>
	}
}
