//! Shared handle between the canvas and the control panels.
//!
//! The canvas mounts a [`GraphContext`] into the controller once it knows its
//! size; panels call the explorer operations through the controller and read
//! back an [`ExplorerStatus`] signal.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;

use super::scale::ScaleConfig;
use super::state::ForceGraphState;
use super::theme::Theme;
use super::types::{GraphData, NodeDetails};
use crate::bridge;
use crate::config::ViewerConfig;
use crate::explore::{ClusterColor, Explorer, GraphHandle};
use crate::projection;

/// Everything one mounted graph view owns.
pub struct GraphContext {
	/// Layout, view transform and element display state.
	pub state: ForceGraphState,
	/// Highlight, clusters, search and filter.
	pub explorer: Explorer,
	/// The loaded nodes and links.
	pub data: GraphData,
	/// Zoom-dependent sizes.
	pub scale: ScaleConfig,
	/// Colors for the canvas.
	pub theme: Theme,
	/// Node shown in the info panel without being the highlight seed.
	pub inspected: Option<String>,
}

impl GraphContext {
	/// Lays out `data` in a `width` x `height` view.
	pub fn new(data: GraphData, width: f64, height: f64, config: &ViewerConfig) -> Self {
		let theme = config.theme();
		Self {
			state: ForceGraphState::new(&data, width, height, &theme),
			explorer: Explorer::new(config.cluster_style()),
			data,
			scale: ScaleConfig::default(),
			theme,
			inspected: None,
		}
	}

	/// Node ids of the cluster mates that move with a dragged node.
	pub fn drag_companions(&self, id: &str) -> Vec<String> {
		self.explorer.drag_companions(id)
	}
}

/// Snapshot of explorer state for the panels.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExplorerStatus {
	/// Highlight seed.
	pub selected: Option<String>,
	/// Picked search result shown in the info panel.
	pub inspected: Option<String>,
	/// Highlight depth.
	pub depth: usize,
	/// Number of clusters created.
	pub cluster_count: usize,
	/// Whether the show-only filter is on.
	pub show_only: bool,
	/// Info panel contents for the inspected or selected node.
	pub details: Option<NodeDetails>,
	/// Ids matching the current search.
	pub search_results: Vec<String>,
}

impl ExplorerStatus {
	fn of(ctx: &GraphContext) -> Self {
		let selected = ctx.explorer.highlight().seed().map(str::to_string);
		Self {
			details: ctx
				.inspected
				.as_deref()
				.or(selected.as_deref())
				.and_then(|id| ctx.data.details(id)),
			selected,
			inspected: ctx.inspected.clone(),
			depth: ctx.explorer.highlight().depth(),
			cluster_count: ctx.explorer.clusters().clusters().len(),
			show_only: ctx.explorer.show_only_active(),
			search_results: ctx.explorer.node_search().matches().to_vec(),
		}
	}
}

/// Cheap-to-clone handle to a graph view.
#[derive(Clone)]
pub struct GraphController {
	context: Rc<RefCell<Option<GraphContext>>>,
	status: RwSignal<ExplorerStatus>,
	config: Rc<ViewerConfig>,
}

impl GraphController {
	/// A controller with nothing mounted yet.
	pub fn new(config: ViewerConfig) -> Self {
		Self {
			context: Rc::new(RefCell::new(None)),
			status: RwSignal::new(ExplorerStatus::default()),
			config: Rc::new(config),
		}
	}

	/// Settings the view was created with.
	pub fn config(&self) -> &ViewerConfig {
		&self.config
	}

	/// Explorer status, updated after every action.
	pub fn status(&self) -> RwSignal<ExplorerStatus> {
		self.status
	}

	/// Installs the graph view. Replaces any earlier one.
	pub fn mount(&self, data: GraphData, width: f64, height: f64) {
		let ctx = GraphContext::new(data, width, height, &self.config);
		let status = ExplorerStatus::of(&ctx);
		*self.context.borrow_mut() = Some(ctx);
		self.status.set(status);
	}

	/// Whether the canvas has mounted a view.
	pub fn is_mounted(&self) -> bool {
		self.context.borrow().is_some()
	}

	/// Runs `f` on the mounted view without touching explorer status.
	/// Used by the animation loop and pointer tracking.
	pub fn with_view<R>(&self, f: impl FnOnce(&mut GraphContext) -> R) -> Option<R> {
		self.context.borrow_mut().as_mut().map(f)
	}

	/// Runs an explorer action and republishes the status.
	fn act<R>(&self, action: &str, f: impl FnOnce(&mut GraphContext) -> R) -> Option<R> {
		let (result, status) = {
			let mut guard = self.context.borrow_mut();
			let Some(ctx) = guard.as_mut() else {
				warn!("punx-graph: {} ignored, graph is not mounted", action);
				return None;
			};
			let result = f(ctx);
			ctx.state.sync_emphasis(ctx.explorer.highlighted_nodes());
			(result, ExplorerStatus::of(ctx))
		};
		self.status.set(status);
		Some(result)
	}

	/// Left click on a node.
	pub fn select_node(&self, id: &str) -> bool {
		self.act("select", |ctx| {
			ctx.inspected = None;
			ctx.explorer.select_node(&mut ctx.state.store, id)
		})
		.unwrap_or(false)
	}

	/// Right click on a node: cycles its cluster colors.
	pub fn context_node(&self, id: &str) {
		self.act("cycle membership", |ctx| {
			ctx.explorer.context_node(&mut ctx.state.store, id)
		});
	}

	/// Click on empty canvas.
	pub fn background_tap(&self) {
		self.act("background tap", |ctx| {
			ctx.inspected = None;
			ctx.explorer.background_tap(&mut ctx.state.store)
		});
	}

	/// `+` depth button.
	pub fn expand(&self) -> bool {
		self.act("expand", |ctx| ctx.explorer.expand(&mut ctx.state.store))
			.unwrap_or(false)
	}

	/// `-` depth button.
	pub fn contract(&self) -> bool {
		self.act("contract", |ctx| ctx.explorer.contract(&mut ctx.state.store))
			.unwrap_or(false)
	}

	/// Clusters the highlighted nodes with `color`, or a random pastel.
	pub fn create_cluster(&self, color: Option<String>) -> Option<usize> {
		let color = color.map(ClusterColor::new);
		self.act("create cluster", |ctx| {
			ctx.explorer.create_cluster(&mut ctx.state.store, color)
		})
		.flatten()
	}

	/// A fresh random cluster color at the configured saturation and lightness.
	pub fn random_color(&self) -> ClusterColor {
		ClusterColor::random(self.config.cluster_style())
	}

	/// Drops the highlight and the show-only filter.
	pub fn clear_highlights(&self) {
		self.act("clear highlights", |ctx| {
			ctx.explorer.clear_highlights(&mut ctx.state.store)
		});
	}

	/// Drops highlight, clusters and the show-only filter.
	pub fn clear_all(&self) {
		self.act("clear all", |ctx| {
			ctx.inspected = None;
			ctx.explorer.clear_all(&mut ctx.state.store)
		});
	}

	/// Flips the show-only filter and returns its new state.
	pub fn toggle_show_only(&self) -> bool {
		self.act("show only", |ctx| {
			ctx.explorer.toggle_show_only(&mut ctx.state.store)
		})
		.unwrap_or(false)
	}

	/// Marks nodes whose id contains `query` and returns them.
	pub fn search(&self, query: &str) -> Vec<String> {
		self.act("search", |ctx| ctx.explorer.search(&mut ctx.state.store, query))
			.unwrap_or_default()
	}

	/// Centers on a search result, narrows the search marks to it and shows
	/// its details. The highlight and cluster focus are left alone.
	pub fn pick_search_result(&self, id: &str) {
		self.act("pick search result", |ctx| {
			ctx.explorer.pick_search_result(&mut ctx.state.store, id);
			ctx.state.center_on(id);
			if ctx.state.store.contains_node(id) {
				ctx.inspected = Some(id.to_string());
			}
		});
	}

	/// Removes the search marks.
	pub fn clear_search(&self) {
		self.act("clear search", |ctx| {
			ctx.inspected = None;
			ctx.explorer.clear_search(&mut ctx.state.store)
		});
	}

	/// Sends the current graph, colored as displayed, to the 3D renderer.
	pub fn open_3d_view(&self) -> bool {
		let payload = self.act("3D view", |ctx| {
			projection::force3d_data(&ctx.data, &ctx.state.store, &ctx.theme)
		});
		payload.is_some_and(|payload| {
			bridge::hand_off(&self.config.renderer_namespace, "show3d", &payload)
		})
	}

	/// Sends geolocated nodes and links to the map renderer.
	pub fn open_map_view(&self) -> bool {
		let payload = self.act("map view", |ctx| projection::map_layers(&ctx.data));
		payload.is_some_and(|payload| {
			bridge::hand_off(&self.config.renderer_namespace, "showMap", &payload)
		})
	}
}
