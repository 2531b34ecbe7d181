//! "Show only" filter: hides everything outside a kept node set.

use std::collections::HashSet;

use super::handle::GraphHandle;

/// Whether the graph is narrowed to highlighted and clustered nodes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ShowOnlyFilter {
	active: bool,
}

impl ShowOnlyFilter {
	/// Whether the filter is on.
	pub fn active(&self) -> bool {
		self.active
	}

	/// Flips the filter and returns the new state.
	///
	/// Turning on hides every node outside `keep` and every edge touching a
	/// hidden node. Turning off shows everything again.
	pub fn toggle<G>(&mut self, graph: &mut G, keep: &HashSet<String>) -> bool
	where
		G: GraphHandle + ?Sized,
	{
		if self.active {
			self.reset(graph);
			return false;
		}

		self.active = true;
		for id in graph.node_ids() {
			graph.set_node_visible(&id, keep.contains(&id));
		}
		for edge in graph.edges() {
			let visible = graph.node_visible(&edge.source) && graph.node_visible(&edge.target);
			graph.set_edge_visible(edge.id, visible);
		}
		true
	}

	/// Shows every element and turns the filter off.
	pub fn reset<G>(&mut self, graph: &mut G)
	where
		G: GraphHandle + ?Sized,
	{
		self.active = false;
		for id in graph.node_ids() {
			graph.set_node_visible(&id, true);
		}
		for edge in graph.edges() {
			graph.set_edge_visible(edge.id, true);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::explore::handle::EdgeId;
	use crate::explore::store::GraphStore;

	#[test]
	fn toggling_hides_then_restores() {
		let mut graph = GraphStore::new(["A", "B", "C"], [("A", "B"), ("B", "C")]);
		let mut filter = ShowOnlyFilter::default();
		let keep: HashSet<String> = ["A", "B"].iter().map(|id| id.to_string()).collect();

		assert!(filter.toggle(&mut graph, &keep));
		assert!(filter.active());
		assert!(graph.node_visible("A"));
		assert!(!graph.node_visible("C"));
		assert!(graph.edge_visible(EdgeId(0)));
		assert!(!graph.edge_visible(EdgeId(1)));

		assert!(!filter.toggle(&mut graph, &keep));
		assert!(graph.node_visible("C"));
		assert!(graph.edge_visible(EdgeId(1)));
	}

	#[test]
	fn empty_keep_set_hides_everything() {
		let mut graph = GraphStore::new(["A", "B"], [("A", "B")]);
		let mut filter = ShowOnlyFilter::default();

		filter.toggle(&mut graph, &HashSet::new());

		assert!(!graph.node_visible("A"));
		assert!(!graph.node_visible("B"));
		assert!(!graph.edge_visible(EdgeId(0)));
	}
}
