//! The explorer context object owned by a graph view.
//!
//! Composes the highlighter, the cluster manager, search and the show-only
//! filter, and exposes the operations the UI wires to buttons and pointer
//! events. All state lives here; nothing is global, so independent views can
//! each own one.

use std::collections::HashSet;

use super::cluster::{ClusterColor, ClusterManager, ClusterStyle};
use super::filter::ShowOnlyFilter;
use super::handle::GraphHandle;
use super::highlight::NeighborhoodHighlighter;
use super::search::NodeSearch;

/// Exploration state of one graph view: highlight, clusters, search and
/// the show-only filter.
#[derive(Clone, Debug, Default)]
pub struct Explorer {
	highlight: NeighborhoodHighlighter,
	clusters: ClusterManager,
	search: NodeSearch,
	show_only: ShowOnlyFilter,
}

impl Explorer {
	/// An empty explorer whose random cluster colors use `style`.
	pub fn new(style: ClusterStyle) -> Self {
		Self {
			clusters: ClusterManager::new(style),
			..Self::default()
		}
	}

	/// The neighborhood highlighter.
	pub fn highlight(&self) -> &NeighborhoodHighlighter {
		&self.highlight
	}

	/// The cluster manager.
	pub fn clusters(&self) -> &ClusterManager {
		&self.clusters
	}

	/// The last search and its matches.
	pub fn node_search(&self) -> &NodeSearch {
		&self.search
	}

	/// Whether the show-only filter is on.
	pub fn show_only_active(&self) -> bool {
		self.show_only.active()
	}

	/// The currently highlighted node set.
	pub fn highlighted_nodes(&self) -> &HashSet<String> {
		self.highlight.highlighted()
	}

	/// Primary selection of a node: seeds the highlight at depth 1 and, for a
	/// node shared by several clusters, focuses its most recent one.
	pub fn select_node<G>(&mut self, graph: &mut G, id: &str) -> bool
	where
		G: GraphHandle + ?Sized,
	{
		if !self.highlight.set_seed(graph, id) {
			return false;
		}
		self.clusters.focus_most_recent(graph, id);
		true
	}

	/// Context (right-click) interaction on a node.
	pub fn context_node<G>(&mut self, graph: &mut G, id: &str)
	where
		G: GraphHandle + ?Sized,
	{
		self.clusters.cycle_node_membership(graph, id);
	}

	/// Click on empty canvas: drops the neighborhood highlight.
	pub fn background_tap<G>(&mut self, graph: &mut G)
	where
		G: GraphHandle + ?Sized,
	{
		self.highlight.clear(graph);
	}

	/// Grows the highlight by one hop. False without a seed.
	pub fn expand<G>(&mut self, graph: &mut G) -> bool
	where
		G: GraphHandle + ?Sized,
	{
		self.highlight.expand(graph)
	}

	/// Shrinks the highlight by one hop, never below depth 1.
	pub fn contract<G>(&mut self, graph: &mut G) -> bool
	where
		G: GraphHandle + ?Sized,
	{
		self.highlight.contract(graph)
	}

	/// Snapshots the highlighted set into a new cluster.
	pub fn create_cluster<G>(&mut self, graph: &mut G, color: Option<ClusterColor>) -> Option<usize>
	where
		G: GraphHandle + ?Sized,
	{
		let mut candidates: Vec<String> = self.highlight.highlighted().iter().cloned().collect();
		candidates.sort();
		self.clusters.create_cluster(graph, candidates, color)
	}

	/// Drops the highlight and turns the show-only filter off. Clusters stay.
	pub fn clear_highlights<G>(&mut self, graph: &mut G)
	where
		G: GraphHandle + ?Sized,
	{
		self.highlight.clear(graph);
		self.show_only.reset(graph);
	}

	/// Resets highlight, clusters and the show-only filter.
	pub fn clear_all<G>(&mut self, graph: &mut G)
	where
		G: GraphHandle + ?Sized,
	{
		self.highlight.clear(graph);
		self.clusters.clear_all(graph);
		self.show_only.reset(graph);
	}

	/// Shows only highlighted and clustered nodes, or everything again.
	pub fn toggle_show_only<G>(&mut self, graph: &mut G) -> bool
	where
		G: GraphHandle + ?Sized,
	{
		let mut keep = self.highlight.highlighted().clone();
		keep.extend(self.clusters.clustered_nodes());
		self.show_only.toggle(graph, &keep)
	}

	/// Runs a node search and returns the matching ids.
	pub fn search<G>(&mut self, graph: &mut G, query: &str) -> Vec<String>
	where
		G: GraphHandle + ?Sized,
	{
		self.search.search(graph, query).to_vec()
	}

	/// Narrows the search marks to the picked result.
	pub fn pick_search_result<G>(&mut self, graph: &mut G, id: &str)
	where
		G: GraphHandle + ?Sized,
	{
		self.search.focus_result(graph, id);
	}

	/// Removes every search mark.
	pub fn clear_search<G>(&mut self, graph: &mut G)
	where
		G: GraphHandle + ?Sized,
	{
		self.search.clear(graph);
	}

	/// Nodes that travel with `id` when it is dragged.
	pub fn drag_companions(&self, id: &str) -> Vec<String> {
		self.clusters.cluster_mates(id)
	}
}
