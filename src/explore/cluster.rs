//! Named, colored node groups and multi-cluster color resolution.
//!
//! Clusters are append-only: indices are never reused until [`ClusterManager::clear_all`].
//! A node may belong to several clusters at once; its displayed color is
//! resolved by the focused cluster first, then by the cluster it joined last.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;

use log::{debug, info};

use super::handle::{GraphHandle, Mark};

/// A CSS color value attached to a cluster.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ClusterColor(String);

impl ClusterColor {
	/// Wraps a CSS color string as given.
	pub fn new(css: impl Into<String>) -> Self {
		Self(css.into())
	}

	/// `hsl(<hue>, <saturation>%, <lightness>%)` with the hue wrapped into `0..360`.
	pub fn from_hue(hue: f64, style: ClusterStyle) -> Self {
		let hue = (hue.floor() as i64).rem_euclid(360);
		Self(format!(
			"hsl({hue}, {}%, {}%)",
			style.saturation, style.lightness
		))
	}

	/// A uniformly random hue at the configured saturation and lightness.
	pub fn random(style: ClusterStyle) -> Self {
		Self::from_hue(random_unit() * 360.0, style)
	}

	/// The CSS text.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for ClusterColor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// Saturation and lightness used for generated cluster colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClusterStyle {
	/// Percent, `0..=100`.
	pub saturation: u8,
	/// Percent, `0..=100`.
	pub lightness: u8,
}

impl Default for ClusterStyle {
	fn default() -> Self {
		Self {
			saturation: 70,
			lightness: 75,
		}
	}
}

#[cfg(target_arch = "wasm32")]
fn random_unit() -> f64 {
	js_sys::Math::random()
}

#[cfg(not(target_arch = "wasm32"))]
fn random_unit() -> f64 {
	use std::sync::atomic::{AtomicU64, Ordering};
	use std::time::{SystemTime, UNIX_EPOCH};

	static CALLS: AtomicU64 = AtomicU64::new(0);

	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.map(|elapsed| elapsed.subsec_nanos())
		.unwrap_or(0);
	let seed = nanos as f64 + CALLS.fetch_add(1, Ordering::Relaxed) as f64 * 7.31;
	let x = (seed * 12.9898 + seed * 78.233).sin() * 43758.5453;
	x - x.floor()
}

/// A persistent group of nodes sharing one color.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClusterRecord {
	index: usize,
	color: ClusterColor,
	members: BTreeSet<String>,
}

impl ClusterRecord {
	/// Position in creation order.
	pub fn index(&self) -> usize {
		self.index
	}

	/// Color shared by the members.
	pub fn color(&self) -> &ClusterColor {
		&self.color
	}

	/// Ids of the current members.
	pub fn members(&self) -> &BTreeSet<String> {
		&self.members
	}
}

/// One entry of a node's membership sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Membership {
	/// Index of the joined cluster.
	pub cluster: usize,
	/// Color of that cluster when the node joined.
	pub color: ClusterColor,
}

/// Cluster records, per-node membership sequences and the focus pointer.
#[derive(Clone, Debug, Default)]
pub struct ClusterManager {
	clusters: Vec<ClusterRecord>,
	memberships: HashMap<String, Vec<Membership>>,
	/// Memberships of nodes detached by cycling, kept so the next cycle can restore them.
	detached: HashMap<String, Vec<Membership>>,
	focused: Option<usize>,
	style: ClusterStyle,
}

impl ClusterManager {
	/// No clusters yet; random colors use `style`.
	pub fn new(style: ClusterStyle) -> Self {
		Self {
			style,
			..Self::default()
		}
	}

	/// Every cluster, in creation order.
	pub fn clusters(&self) -> &[ClusterRecord] {
		&self.clusters
	}

	/// Index of the cluster whose color wins for shared nodes.
	pub fn focused(&self) -> Option<usize> {
		self.focused
	}

	/// Membership sequence of `node`, oldest first.
	pub fn memberships(&self, node: &str) -> &[Membership] {
		self.memberships.get(node).map_or(&[], Vec::as_slice)
	}

	/// Every node that currently belongs to at least one cluster.
	pub fn clustered_nodes(&self) -> HashSet<String> {
		self.memberships
			.iter()
			.filter(|(_, entries)| !entries.is_empty())
			.map(|(id, _)| id.clone())
			.collect()
	}

	/// Appends a cluster made of the known `candidates` and focuses it.
	///
	/// Without an explicit color a random one is generated. Returns `None`
	/// (and changes nothing) when no candidate is a node of `graph`.
	pub fn create_cluster<G, I, S>(
		&mut self,
		graph: &mut G,
		candidates: I,
		color: Option<ClusterColor>,
	) -> Option<usize>
	where
		G: GraphHandle + ?Sized,
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let members: BTreeSet<String> = candidates
			.into_iter()
			.filter(|id| graph.contains_node(id.as_ref()))
			.map(|id| id.as_ref().to_string())
			.collect();

		if members.is_empty() {
			debug!("punx-graph: not creating a cluster from an empty selection");
			return None;
		}

		let color = color.unwrap_or_else(|| ClusterColor::random(self.style));
		let index = self.clusters.len();

		for id in &members {
			self.detached.remove(id);
			self.memberships
				.entry(id.clone())
				.or_default()
				.push(Membership {
					cluster: index,
					color: color.clone(),
				});
		}

		info!(
			"punx-graph: created cluster {index} with {} nodes in color {color}",
			members.len()
		);

		self.clusters.push(ClusterRecord {
			index,
			color,
			members,
		});
		self.focused = Some(index);
		self.resolve_display(graph);

		Some(index)
	}

	/// Steps a node's displayed color through its clusters, then off.
	///
	/// The current position is found by comparing the displayed color against
	/// each membership color (first match wins). One step past the last entry
	/// detaches the node from every cluster it belonged to. Cycling a detached
	/// node again restores those memberships.
	pub fn cycle_node_membership<G>(&mut self, graph: &mut G, node: &str)
	where
		G: GraphHandle + ?Sized,
	{
		let entries = self.memberships(node).to_vec();
		if entries.is_empty() {
			if let Some(previous) = self.detached.remove(node) {
				self.reattach(graph, node, previous);
			}
			return;
		}

		let displayed = graph.node_color(node);
		let next = match entries
			.iter()
			.position(|entry| Some(entry.color.as_str()) == displayed.as_deref())
		{
			Some(current) => (current + 1) % (entries.len() + 1),
			None => 0,
		};

		if next == entries.len() {
			self.detach(graph, node, entries);
		} else {
			graph.set_node_color(node, Some(entries[next].color.as_str()));
			graph.set_node_mark(node, Mark::Clustered, true);
		}
	}

	/// Focuses the most recently joined cluster of a multi-cluster node.
	///
	/// Nodes with fewer than two memberships are left alone.
	pub fn focus_most_recent<G>(&mut self, graph: &mut G, node: &str) -> bool
	where
		G: GraphHandle + ?Sized,
	{
		let entries = self.memberships(node);
		if entries.len() < 2 {
			return false;
		}
		let Some(latest) = entries.last().map(|entry| entry.cluster) else {
			return false;
		};

		self.focused = Some(latest);
		self.resolve_display(graph);
		true
	}

	/// Color a node should display given the focus pointer, if clustered.
	pub fn display_color(&self, node: &str) -> Option<&ClusterColor> {
		let entries = self.memberships.get(node)?;
		let chosen = entries
			.iter()
			.find(|entry| Some(entry.cluster) == self.focused)
			.or_else(|| entries.last())?;
		self.clusters.get(chosen.cluster).map(ClusterRecord::color)
	}

	/// Cluster whose color an edge between `source` and `target` takes.
	///
	/// Common clusters are enumerated in the source's membership order. The
	/// focused cluster wins when it is among them, otherwise the last one does.
	pub fn edge_cluster(&self, source: &str, target: &str) -> Option<usize> {
		let source_entries = self.memberships.get(source)?;
		let target_entries = self.memberships.get(target)?;

		let common: Vec<usize> = source_entries
			.iter()
			.map(|entry| entry.cluster)
			.filter(|cluster| target_entries.iter().any(|entry| entry.cluster == *cluster))
			.collect();

		self.focused
			.filter(|focused| self.clusters.get(*focused).is_some() && common.contains(focused))
			.or_else(|| common.last().copied())
	}

	/// Rewrites every node and edge color from the membership map.
	pub fn resolve_display<G>(&self, graph: &mut G)
	where
		G: GraphHandle + ?Sized,
	{
		for id in graph.node_ids() {
			let color = self.display_color(&id);
			graph.set_node_color(&id, color.map(ClusterColor::as_str));
			graph.set_node_mark(&id, Mark::Clustered, color.is_some());
		}
		self.resolve_edges(graph);
	}

	/// Other members of the cluster `node` joined most recently.
	pub fn cluster_mates(&self, node: &str) -> Vec<String> {
		let Some(latest) = self.memberships(node).last() else {
			return Vec::new();
		};
		self.clusters
			.get(latest.cluster)
			.map(|record| {
				record
					.members
					.iter()
					.filter(|id| id.as_str() != node)
					.cloned()
					.collect()
			})
			.unwrap_or_default()
	}

	/// Forgets every cluster and strips all cluster colors from the graph.
	pub fn clear_all<G>(&mut self, graph: &mut G)
	where
		G: GraphHandle + ?Sized,
	{
		self.clusters.clear();
		self.memberships.clear();
		self.detached.clear();
		self.focused = None;

		graph.clear_marks(&[Mark::Clustered]);
		for id in graph.node_ids() {
			graph.set_node_color(&id, None);
		}
		for edge in graph.edges() {
			graph.set_edge_color(edge.id, None);
		}

		info!("punx-graph: reset all cluster data");
	}

	fn resolve_edges<G>(&self, graph: &mut G)
	where
		G: GraphHandle + ?Sized,
	{
		for edge in graph.edges() {
			let color = self
				.edge_cluster(&edge.source, &edge.target)
				.and_then(|cluster| self.clusters.get(cluster))
				.map(|record| record.color.as_str());
			graph.set_edge_color(edge.id, color);
			graph.set_edge_mark(edge.id, Mark::Clustered, color.is_some());
		}
	}

	fn detach<G>(&mut self, graph: &mut G, node: &str, entries: Vec<Membership>)
	where
		G: GraphHandle + ?Sized,
	{
		for entry in &entries {
			if let Some(record) = self.clusters.get_mut(entry.cluster) {
				record.members.remove(node);
			}
		}
		self.memberships.remove(node);
		self.detached.insert(node.to_string(), entries);

		graph.set_node_color(node, None);
		graph.set_node_mark(node, Mark::Clustered, false);
		self.resolve_edges(graph);
	}

	fn reattach<G>(&mut self, graph: &mut G, node: &str, entries: Vec<Membership>)
	where
		G: GraphHandle + ?Sized,
	{
		let entries: Vec<Membership> = entries
			.into_iter()
			.filter(|entry| entry.cluster < self.clusters.len())
			.collect();
		let Some(first) = entries.first() else {
			return;
		};

		graph.set_node_color(node, Some(first.color.as_str()));
		graph.set_node_mark(node, Mark::Clustered, true);

		for entry in &entries {
			self.clusters[entry.cluster].members.insert(node.to_string());
		}
		self.memberships.insert(node.to_string(), entries);
		self.resolve_edges(graph);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::explore::handle::EdgeId;
	use crate::explore::store::GraphStore;

	fn path_graph() -> GraphStore {
		GraphStore::new(["A", "B", "C", "D"], [("A", "B"), ("B", "C"), ("C", "D")])
	}

	fn red() -> Option<ClusterColor> {
		Some(ClusterColor::new("red"))
	}

	fn blue() -> Option<ClusterColor> {
		Some(ClusterColor::new("blue"))
	}

	#[test]
	fn focused_cluster_wins_and_edges_fall_back_to_recent_common() {
		let mut graph = path_graph();
		let mut clusters = ClusterManager::default();

		assert_eq!(clusters.create_cluster(&mut graph, ["A", "B"], red()), Some(0));
		assert_eq!(clusters.create_cluster(&mut graph, ["B", "C"], blue()), Some(1));

		assert_eq!(clusters.focused(), Some(1));
		assert_eq!(graph.node_color("B").as_deref(), Some("blue"));
		assert_eq!(graph.node_color("A").as_deref(), Some("red"));
		assert_eq!(graph.node_color("C").as_deref(), Some("blue"));
		assert_eq!(graph.node_color("D"), None);

		assert_eq!(graph.edge_color(EdgeId(0)).as_deref(), Some("red"));
		assert_eq!(graph.edge_color(EdgeId(1)).as_deref(), Some("blue"));
		assert_eq!(graph.edge_color(EdgeId(2)), None);
		assert!(graph.edge_has_mark(EdgeId(0), Mark::Clustered));
		assert!(!graph.edge_has_mark(EdgeId(2), Mark::Clustered));
	}

	#[test]
	fn display_falls_back_to_most_recent_when_focus_is_elsewhere() {
		let mut graph = path_graph();
		let mut clusters = ClusterManager::default();
		clusters.create_cluster(&mut graph, ["B"], Some(ClusterColor::new("c0")));
		clusters.create_cluster(&mut graph, ["D"], Some(ClusterColor::new("c1")));
		clusters.create_cluster(&mut graph, ["B"], Some(ClusterColor::new("c2")));

		clusters.focused = Some(2);
		assert_eq!(clusters.display_color("B").map(ClusterColor::as_str), Some("c2"));

		clusters.focused = Some(5);
		assert_eq!(clusters.display_color("B").map(ClusterColor::as_str), Some("c2"));

		clusters.focused = None;
		assert_eq!(clusters.display_color("B").map(ClusterColor::as_str), Some("c2"));

		clusters.focused = Some(0);
		assert_eq!(clusters.display_color("B").map(ClusterColor::as_str), Some("c0"));
	}

	#[test]
	fn empty_or_unknown_candidates_create_nothing() {
		let mut graph = path_graph();
		let mut clusters = ClusterManager::default();

		assert_eq!(clusters.create_cluster(&mut graph, Vec::<String>::new(), red()), None);
		assert_eq!(clusters.create_cluster(&mut graph, ["X", "Y"], red()), None);

		assert!(clusters.clusters().is_empty());
		assert_eq!(clusters.focused(), None);
	}

	#[test]
	fn unknown_candidates_are_skipped() {
		let mut graph = path_graph();
		let mut clusters = ClusterManager::default();

		let index = clusters.create_cluster(&mut graph, ["A", "X"], red());

		assert_eq!(index, Some(0));
		let members: Vec<&str> = clusters.clusters()[0]
			.members()
			.iter()
			.map(String::as_str)
			.collect();
		assert_eq!(members, vec!["A"]);
	}

	#[test]
	fn single_cluster_node_cycles_off_and_back_on() {
		let mut graph = path_graph();
		let mut clusters = ClusterManager::default();
		clusters.create_cluster(&mut graph, ["A", "B"], red());

		clusters.cycle_node_membership(&mut graph, "A");

		assert_eq!(graph.node_color("A"), None);
		assert!(!graph.node_has_mark("A", Mark::Clustered));
		assert!(clusters.memberships("A").is_empty());
		assert!(!clusters.clusters()[0].members().contains("A"));
		assert_eq!(graph.edge_color(EdgeId(0)), None);

		clusters.cycle_node_membership(&mut graph, "A");

		assert_eq!(graph.node_color("A").as_deref(), Some("red"));
		assert!(graph.node_has_mark("A", Mark::Clustered));
		assert_eq!(clusters.memberships("A").len(), 1);
		assert!(clusters.clusters()[0].members().contains("A"));
		assert_eq!(graph.edge_color(EdgeId(0)).as_deref(), Some("red"));
	}

	#[test]
	fn shared_node_steps_through_each_cluster_color() {
		let mut graph = path_graph();
		let mut clusters = ClusterManager::default();
		clusters.create_cluster(&mut graph, ["A", "B"], red());
		clusters.create_cluster(&mut graph, ["B", "C"], blue());
		assert_eq!(graph.node_color("B").as_deref(), Some("blue"));

		clusters.cycle_node_membership(&mut graph, "B");
		assert_eq!(graph.node_color("B"), None);
		assert!(clusters.memberships("B").is_empty());
		assert!(!clusters.clusters()[0].members().contains("B"));
		assert!(!clusters.clusters()[1].members().contains("B"));

		clusters.cycle_node_membership(&mut graph, "B");
		assert_eq!(graph.node_color("B").as_deref(), Some("red"));
		assert_eq!(clusters.memberships("B").len(), 2);

		clusters.cycle_node_membership(&mut graph, "B");
		assert_eq!(graph.node_color("B").as_deref(), Some("blue"));
		assert_eq!(clusters.memberships("B").len(), 2);
	}

	#[test]
	fn cycling_an_unclustered_node_is_a_no_op() {
		let mut graph = path_graph();
		let mut clusters = ClusterManager::default();
		clusters.create_cluster(&mut graph, ["A"], red());

		clusters.cycle_node_membership(&mut graph, "D");

		assert_eq!(graph.node_color("D"), None);
		assert!(clusters.memberships("D").is_empty());
	}

	#[test]
	fn undisplayed_membership_starts_at_first_entry() {
		let mut graph = path_graph();
		let mut clusters = ClusterManager::default();
		clusters.create_cluster(&mut graph, ["A", "B"], red());
		clusters.create_cluster(&mut graph, ["B"], blue());
		graph.set_node_color("B", None);

		clusters.cycle_node_membership(&mut graph, "B");

		assert_eq!(graph.node_color("B").as_deref(), Some("red"));
	}

	#[test]
	fn colliding_colors_match_the_first_entry() {
		let mut graph = path_graph();
		let mut clusters = ClusterManager::default();
		clusters.create_cluster(&mut graph, ["B"], red());
		clusters.create_cluster(&mut graph, ["B"], red());

		clusters.cycle_node_membership(&mut graph, "B");

		assert_eq!(graph.node_color("B").as_deref(), Some("red"));
		assert_eq!(clusters.memberships("B").len(), 2);
	}

	#[test]
	fn focus_most_recent_needs_multiple_memberships() {
		let mut graph = path_graph();
		let mut clusters = ClusterManager::default();
		clusters.create_cluster(&mut graph, ["A", "B"], red());
		clusters.create_cluster(&mut graph, ["C"], blue());

		assert!(!clusters.focus_most_recent(&mut graph, "A"));
		assert_eq!(clusters.focused(), Some(1));

		clusters.create_cluster(&mut graph, ["A"], Some(ClusterColor::new("green")));
		clusters.focused = Some(1);
		clusters.resolve_display(&mut graph);
		assert_eq!(graph.node_color("A").as_deref(), Some("green"));

		assert!(clusters.focus_most_recent(&mut graph, "A"));
		assert_eq!(clusters.focused(), Some(2));
	}

	#[test]
	fn clear_all_strips_every_cluster_trace() {
		let mut graph = path_graph();
		let mut clusters = ClusterManager::default();
		clusters.create_cluster(&mut graph, ["A", "B", "C"], red());
		clusters.cycle_node_membership(&mut graph, "C");

		clusters.clear_all(&mut graph);

		assert!(clusters.clusters().is_empty());
		assert!(clusters.clustered_nodes().is_empty());
		assert_eq!(clusters.focused(), None);
		for id in graph.node_ids() {
			assert_eq!(graph.node_color(&id), None);
			assert!(!graph.node_has_mark(&id, Mark::Clustered));
		}
		for edge in graph.edges() {
			assert_eq!(graph.edge_color(edge.id), None);
		}

		clusters.cycle_node_membership(&mut graph, "C");
		assert_eq!(graph.node_color("C"), None);
		assert_eq!(clusters.create_cluster(&mut graph, ["D"], blue()), Some(0));
	}

	#[test]
	fn indices_are_not_reused_when_clusters_empty_out() {
		let mut graph = path_graph();
		let mut clusters = ClusterManager::default();
		clusters.create_cluster(&mut graph, ["A"], red());
		clusters.cycle_node_membership(&mut graph, "A");

		assert_eq!(clusters.create_cluster(&mut graph, ["B"], blue()), Some(1));
		assert_eq!(clusters.clusters().len(), 2);
		assert!(clusters.clusters()[0].members().is_empty());
	}

	#[test]
	fn cluster_mates_follow_latest_membership() {
		let mut graph = path_graph();
		let mut clusters = ClusterManager::default();
		clusters.create_cluster(&mut graph, ["A", "B"], red());
		clusters.create_cluster(&mut graph, ["B", "C", "D"], blue());

		assert_eq!(clusters.cluster_mates("B"), vec!["C", "D"]);
		assert_eq!(clusters.cluster_mates("A"), vec!["B"]);
		assert!(clusters.cluster_mates("X").is_empty());
	}

	#[test]
	fn generated_colors_use_configured_saturation_and_lightness() {
		let style = ClusterStyle::default();
		let color = ClusterColor::random(style);
		assert!(color.as_str().starts_with("hsl("));
		assert!(color.as_str().ends_with(", 70%, 75%)"));

		assert_eq!(ClusterColor::from_hue(400.7, style).as_str(), "hsl(40, 70%, 75%)");
		assert_eq!(
			ClusterColor::from_hue(12.0, ClusterStyle { saturation: 50, lightness: 60 }).as_str(),
			"hsl(12, 50%, 60%)"
		);
	}
}
