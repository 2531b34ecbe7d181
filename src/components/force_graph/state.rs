//! Graph simulation state and interaction tracking.
//!
//! Wraps the `force_graph` physics simulation together with the element store
//! the explorer writes marks into, view transforms for pan/zoom, and an
//! emphasis animator that smoothly grows highlighted and hovered nodes.

use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::scale::{ScaleConfig, ScaledValues};
use super::theme::Theme;
use super::types::{GraphData, NodeKind};
use crate::explore::{EdgeId, GraphStore};

/// Per-node display metadata attached to each node in the simulation.
#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	/// Position of the node in the [`GraphStore`].
	pub meta: usize,
	pub label: String,
	/// Hover text: `id (years)`.
	pub tooltip: String,
	/// Color used when no cluster color is set.
	pub base_color: String,
	/// Size multiplier (1.0 = normal, >1.0 = larger/more important)
	pub size: f64,
}

/// Pan and zoom transform applied to the entire graph view.
#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	/// Zoom factor (1.0 = 100%, clamped to 0.1..10.0).
	pub k: f64,
}

/// Tracks an in-progress node drag, including cluster mates moving along.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
	/// Cluster mates and their positions when the drag began.
	pub companions: Vec<(DefaultNodeIdx, f32, f32)>,
}

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Smoothly animated emphasis of highlighted and hovered nodes.
///
/// Each node has its own intensity (0.0 to 1.0) that eases towards 1.0 while
/// the node is a target and decays back to 0.0 once it is not. A short hold
/// time keeps the hover ring from flashing when the pointer skirts a node.
#[derive(Clone, Debug, Default)]
pub struct EmphasisState {
	pub hovered_node: Option<DefaultNodeIdx>,
	selected: HashSet<DefaultNodeIdx>,
	node_intensity: HashMap<DefaultNodeIdx, f64>,
	hover_ring_intensity: HashMap<DefaultNodeIdx, f64>,
	hold_timer: HashMap<DefaultNodeIdx, f64>,
}

/// Minimum time (seconds) a hover must be held before it can fade out.
const MIN_HOLD_TIME: f64 = 0.12;

impl EmphasisState {
	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		if self.hovered_node == node {
			return;
		}
		self.hovered_node = node;
		if let Some(idx) = node {
			self.hold_timer.insert(idx, MIN_HOLD_TIME);
		}
	}

	/// Replaces the set of nodes that stay emphasized regardless of hover.
	pub fn set_selected(&mut self, nodes: impl IntoIterator<Item = DefaultNodeIdx>) {
		self.selected = nodes.into_iter().collect();
	}

	fn is_target(&self, idx: &DefaultNodeIdx) -> bool {
		self.selected.contains(idx) || self.hovered_node.as_ref() == Some(idx)
	}

	/// Exponential smoothing: value += (target - value) * (1 - e^(-speed * dt))
	pub fn tick(&mut self, dt: f64) {
		const FADE_IN_SPEED: f64 = 6.0;
		const FADE_OUT_SPEED: f64 = 4.0;

		let fade_in_factor = 1.0 - (-FADE_IN_SPEED * dt).exp();
		let fade_out_decay = (-FADE_OUT_SPEED * dt).exp();

		let targets: Vec<DefaultNodeIdx> = self
			.selected
			.iter()
			.copied()
			.chain(self.hovered_node)
			.collect();
		for idx in targets {
			let intensity = self.node_intensity.entry(idx).or_insert(0.0);
			*intensity += (1.0 - *intensity) * fade_in_factor;
		}
		if let Some(idx) = self.hovered_node {
			let intensity = self.hover_ring_intensity.entry(idx).or_insert(0.0);
			*intensity += (1.0 - *intensity) * fade_in_factor;
		}

		let hovered = self.hovered_node;
		self.hold_timer.retain(|idx, timer| {
			if hovered == Some(*idx) {
				return true;
			}
			*timer -= dt;
			*timer > 0.0
		});

		let hold_timer = &self.hold_timer;
		let selected = &self.selected;
		self.node_intensity.retain(|idx, intensity| {
			if selected.contains(idx) || hovered == Some(*idx) {
				return true;
			}
			if hold_timer.get(idx).copied().unwrap_or(0.0) <= 0.0 {
				*intensity *= fade_out_decay;
			}
			*intensity > 0.005
		});
		self.hover_ring_intensity.retain(|idx, intensity| {
			if hovered == Some(*idx) {
				return true;
			}
			if hold_timer.get(idx).copied().unwrap_or(0.0) <= 0.0 {
				*intensity *= fade_out_decay;
			}
			*intensity > 0.005
		});
	}

	pub fn node_intensity(&self, idx: DefaultNodeIdx) -> f64 {
		self.node_intensity.get(&idx).copied().unwrap_or(0.0)
	}

	pub fn hover_ring_intensity(&self, idx: DefaultNodeIdx) -> f64 {
		self.hover_ring_intensity.get(&idx).copied().unwrap_or(0.0)
	}

	/// Whether `idx` is currently a target (selected or hovered).
	pub fn is_emphasized(&self, idx: DefaultNodeIdx) -> bool {
		self.is_target(&idx)
	}
}

/// Physics simulation, element styles and interaction state for one canvas.
///
/// Created once when the component mounts, then mutated each frame by the
/// animation loop and by the explorer through [`ForceGraphState::store`].
pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	/// Marks, colors and visibility of every node and edge.
	pub store: GraphStore,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub emphasis: EmphasisState,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
	/// Simulation index of every store node, by store position.
	graph_idx: Vec<DefaultNodeIdx>,
	/// Role label of every accepted link, by [`EdgeId`].
	edge_labels: Vec<Option<String>>,
}

impl ForceGraphState {
	pub fn new(data: &GraphData, width: f64, height: f64, theme: &Theme) -> Self {
		let store = GraphStore::from(data);
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});

		let mut degree = vec![0usize; store.node_count()];
		for &(source, target) in store.links() {
			degree[source] += 1;
			degree[target] += 1;
		}
		let max_degree = degree.iter().copied().max().unwrap_or(1).max(1);

		let mut graph_idx = Vec::with_capacity(store.node_count());
		for node in &data.nodes {
			// Duplicate ids resolve to an earlier store position.
			let meta = graph_idx.len();
			if store.node_index(&node.id) != Some(meta) {
				continue;
			}
			let base_color = node.color.clone().unwrap_or_else(|| match node.kind {
				NodeKind::Band => theme.kinds.band.to_css_rgb(),
				NodeKind::Member => theme.kinds.member.to_css_rgb(),
				NodeKind::Other => theme.palette.get(meta).to_css_rgb(),
			});
			let tooltip = match &node.years {
				Some(years) => format!("{} ({})", node.id, years),
				None => node.id.clone(),
			};
			let angle = (meta as f64) * 2.0 * PI / store.node_count() as f64;
			let (x, y) = (
				(width / 2.0 + 100.0 * angle.cos()) as f32,
				(height / 2.0 + 100.0 * angle.sin()) as f32,
			);

			// Bands are drawn larger than members.
			let degree_factor = (degree[meta] as f64 / max_degree as f64).sqrt();
			let size = match node.kind {
				NodeKind::Band => 1.3 + 0.7 * degree_factor,
				_ => 0.8 + 0.4 * degree_factor,
			};

			let idx = graph.add_node(NodeData {
				x,
				y,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeInfo {
					meta,
					label: node.display_name().to_string(),
					tooltip,
					base_color,
					size,
				},
			});
			graph_idx.push(idx);
		}

		for &(source, target) in store.links() {
			graph.add_edge(graph_idx[source], graph_idx[target], EdgeData::default());
		}
		let edge_labels = data
			.links
			.iter()
			.filter(|link| {
				store.node_index(&link.source).is_some() && store.node_index(&link.target).is_some()
			})
			.map(|link| link.label.clone())
			.collect();

		Self {
			graph,
			store,
			transform: ViewTransform {
				x: 0.0,
				y: 0.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			emphasis: EmphasisState::default(),
			width,
			height,
			animation_running: true,
			graph_idx,
			edge_labels,
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Topmost visible node under the screen position.
	pub fn node_at_position(
		&self,
		sx: f64,
		sy: f64,
		config: &ScaleConfig,
	) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let scale = ScaledValues::new(config, self.transform.k);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let visible = self
				.store
				.node_style(node.data.user_data.meta)
				.is_none_or(|style| style.visible());
			if !visible {
				return;
			}
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			let node_hit_radius = scale.hit_radius * node.data.user_data.size;
			if (dx * dx + dy * dy).sqrt() < node_hit_radius {
				found = Some(node.index());
			}
		});
		found
	}

	pub fn graph_index(&self, id: &str) -> Option<DefaultNodeIdx> {
		self.store
			.node_index(id)
			.and_then(|meta| self.graph_idx.get(meta).copied())
	}

	pub fn node_id(&self, idx: DefaultNodeIdx) -> Option<&str> {
		let mut meta = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				meta = Some(node.data.user_data.meta);
			}
		});
		meta.and_then(|meta| self.store.node_id(meta))
	}

	pub fn edge_label(&self, edge: EdgeId) -> Option<&str> {
		self.edge_labels.get(edge.0).and_then(|label| label.as_deref())
	}

	pub fn node_position(&self, idx: DefaultNodeIdx) -> Option<(f32, f32)> {
		let mut position = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				position = Some((node.x(), node.y()));
			}
		});
		position
	}

	/// Positions of all nodes, indexed by store position.
	pub fn positions(&self) -> Vec<(f64, f64)> {
		let mut positions = vec![(0.0, 0.0); self.store.node_count()];
		self.graph.visit_nodes(|node| {
			if let Some(slot) = positions.get_mut(node.data.user_data.meta) {
				*slot = (node.x() as f64, node.y() as f64);
			}
		});
		positions
	}

	/// Pins the dragged node and its companions at the drag offset.
	pub fn drag_to(&mut self, dx: f32, dy: f32) {
		let Some(idx) = self.drag.node_idx else {
			return;
		};
		let mut targets: HashMap<DefaultNodeIdx, (f32, f32)> = self
			.drag
			.companions
			.iter()
			.map(|&(mate, x, y)| (mate, (x + dx, y + dy)))
			.collect();
		targets.insert(idx, (self.drag.node_start_x + dx, self.drag.node_start_y + dy));

		self.graph.visit_nodes_mut(|node| {
			if let Some(&(x, y)) = targets.get(&node.index()) {
				node.data.x = x;
				node.data.y = y;
				node.data.is_anchor = true;
			}
		});
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		self.emphasis.set_hover(node);
	}

	/// Keeps the emphasis animation in step with the highlighted node ids.
	pub fn sync_emphasis<'a>(&mut self, highlighted: impl IntoIterator<Item = &'a String>) {
		let selected: Vec<DefaultNodeIdx> = highlighted
			.into_iter()
			.filter_map(|id| self.graph_index(id))
			.collect();
		self.emphasis.set_selected(selected);
	}

	/// Centers the view on the node with `id`.
	pub fn center_on(&mut self, id: &str) {
		let Some((x, y)) = self.graph_index(id).and_then(|idx| self.node_position(idx)) else {
			return;
		};
		self.transform.x = self.width / 2.0 - x as f64 * self.transform.k;
		self.transform.y = self.height / 2.0 - y as f64 * self.transform.k;
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
		self.emphasis.tick(dt as f64);
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}
