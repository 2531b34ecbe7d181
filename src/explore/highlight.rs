//! Depth-limited neighborhood highlighting.
//!
//! A seed node plus a depth defines the highlighted set: every node within
//! `depth` hops of the seed. Everything else is faded. The set is recomputed
//! from scratch whenever the seed or depth changes and pushed to the graph as
//! a full resync of the `Highlight`/`Faded` marks.

use std::collections::{HashSet, VecDeque};

use log::debug;

use super::handle::{GraphHandle, Mark};

/// Breadth-first closure of `seed` over node adjacency, `depth` layers deep.
///
/// Includes the seed itself. Returns an empty set for unknown seeds.
pub fn compute_reachable<G>(graph: &G, seed: &str, depth: usize) -> HashSet<String>
where
	G: GraphHandle + ?Sized,
{
	if !graph.contains_node(seed) {
		return HashSet::new();
	}

	let mut visited = HashSet::from([seed.to_string()]);
	let mut queue = VecDeque::from([(seed.to_string(), 0usize)]);

	while let Some((node, hops)) = queue.pop_front() {
		if hops >= depth {
			continue;
		}

		for next in graph.neighbors(&node) {
			if visited.insert(next.clone()) {
				queue.push_back((next, hops + 1));
			}
		}
	}

	visited
}

/// Owns the seed, the expansion depth and the highlighted set derived from them.
#[derive(Clone, Debug)]
pub struct NeighborhoodHighlighter {
	seed: Option<String>,
	depth: usize,
	highlighted: HashSet<String>,
}

impl Default for NeighborhoodHighlighter {
	fn default() -> Self {
		Self {
			seed: None,
			depth: 1,
			highlighted: HashSet::new(),
		}
	}
}

impl NeighborhoodHighlighter {
	/// The node the highlight grows from, if any.
	pub fn seed(&self) -> Option<&str> {
		self.seed.as_deref()
	}

	/// Current expansion radius, always at least 1.
	pub fn depth(&self) -> usize {
		self.depth
	}

	/// Nodes within `depth` hops of the seed.
	pub fn highlighted(&self) -> &HashSet<String> {
		&self.highlighted
	}

	/// Starts a new highlight at `node` with depth 1.
	///
	/// Unknown nodes leave every bit of state untouched and return `false`.
	pub fn set_seed<G>(&mut self, graph: &mut G, node: &str) -> bool
	where
		G: GraphHandle + ?Sized,
	{
		if !graph.contains_node(node) {
			debug!("punx-graph: ignoring highlight seed {node:?}, not in graph");
			return false;
		}

		self.seed = Some(node.to_string());
		self.depth = 1;
		self.recompute(graph);
		true
	}

	/// Grows the depth by one. No-op without a seed.
	pub fn expand<G>(&mut self, graph: &mut G) -> bool
	where
		G: GraphHandle + ?Sized,
	{
		if self.seed.is_none() {
			return false;
		}

		self.depth += 1;
		self.recompute(graph);
		true
	}

	/// Shrinks the depth by one, never below 1. No-op without a seed.
	pub fn contract<G>(&mut self, graph: &mut G) -> bool
	where
		G: GraphHandle + ?Sized,
	{
		if self.seed.is_none() || self.depth <= 1 {
			return false;
		}

		self.depth -= 1;
		self.recompute(graph);
		true
	}

	/// Drops the seed and removes every highlight and fade mark.
	pub fn clear<G>(&mut self, graph: &mut G)
	where
		G: GraphHandle + ?Sized,
	{
		self.seed = None;
		self.depth = 1;
		self.highlighted.clear();
		self.refresh(graph);
	}

	/// Rewrites the `Highlight`/`Faded` marks from the current highlighted set.
	///
	/// Every node ends up highlighted or faded while a seed is active; with no
	/// seed both marks are simply cleared.
	pub fn refresh<G>(&self, graph: &mut G)
	where
		G: GraphHandle + ?Sized,
	{
		graph.clear_marks(&[Mark::Highlight, Mark::Faded]);

		if self.seed.is_none() {
			return;
		}

		for id in graph.node_ids() {
			let mark = if self.highlighted.contains(&id) {
				Mark::Highlight
			} else {
				Mark::Faded
			};
			graph.set_node_mark(&id, mark, true);
		}
	}

	fn recompute<G>(&mut self, graph: &mut G)
	where
		G: GraphHandle + ?Sized,
	{
		self.highlighted = match &self.seed {
			Some(seed) => compute_reachable(graph, seed, self.depth),
			None => HashSet::new(),
		};
		self.refresh(graph);
	}
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;

	use super::*;
	use crate::explore::store::GraphStore;

	fn path_graph() -> GraphStore {
		GraphStore::new(["A", "B", "C", "D"], [("A", "B"), ("B", "C"), ("C", "D")])
	}

	fn set(ids: &[&str]) -> HashSet<String> {
		ids.iter().map(|id| id.to_string()).collect()
	}

	fn marked(graph: &GraphStore, mark: Mark) -> HashSet<String> {
		graph
			.node_ids()
			.into_iter()
			.filter(|id| graph.node_has_mark(id, mark))
			.collect()
	}

	#[test]
	fn seed_on_path_highlights_direct_neighbors() {
		let mut graph = path_graph();
		let mut highlighter = NeighborhoodHighlighter::default();

		assert!(highlighter.set_seed(&mut graph, "B"));

		assert_eq!(highlighter.depth(), 1);
		assert_eq!(highlighter.highlighted(), &set(&["A", "B", "C"]));
		assert_eq!(marked(&graph, Mark::Highlight), set(&["A", "B", "C"]));
		assert_eq!(marked(&graph, Mark::Faded), set(&["D"]));
	}

	#[test]
	fn expand_reaches_the_whole_path() {
		let mut graph = path_graph();
		let mut highlighter = NeighborhoodHighlighter::default();
		highlighter.set_seed(&mut graph, "B");

		assert!(highlighter.expand(&mut graph));

		assert_eq!(highlighter.depth(), 2);
		assert_eq!(highlighter.highlighted(), &set(&["A", "B", "C", "D"]));
		assert!(marked(&graph, Mark::Faded).is_empty());
	}

	#[test]
	fn contract_stops_at_depth_one() {
		let mut graph = path_graph();
		let mut highlighter = NeighborhoodHighlighter::default();
		highlighter.set_seed(&mut graph, "A");

		assert!(!highlighter.contract(&mut graph));
		assert_eq!(highlighter.depth(), 1);
		assert_eq!(highlighter.highlighted(), &set(&["A", "B"]));
	}

	#[test]
	fn new_seed_resets_depth() {
		let mut graph = path_graph();
		let mut highlighter = NeighborhoodHighlighter::default();
		highlighter.set_seed(&mut graph, "A");
		highlighter.expand(&mut graph);
		highlighter.expand(&mut graph);

		highlighter.set_seed(&mut graph, "D");

		assert_eq!(highlighter.depth(), 1);
		assert_eq!(highlighter.highlighted(), &set(&["C", "D"]));
		assert_eq!(marked(&graph, Mark::Faded), set(&["A", "B"]));
	}

	#[test]
	fn unknown_seed_leaves_state_alone() {
		let mut graph = path_graph();
		let mut highlighter = NeighborhoodHighlighter::default();
		highlighter.set_seed(&mut graph, "C");
		highlighter.expand(&mut graph);

		assert!(!highlighter.set_seed(&mut graph, "Z"));

		assert_eq!(highlighter.seed(), Some("C"));
		assert_eq!(highlighter.depth(), 2);
		assert_eq!(marked(&graph, Mark::Highlight), set(&["A", "B", "C", "D"]));
	}

	#[test]
	fn depth_controls_without_seed_do_nothing() {
		let mut graph = path_graph();
		let mut highlighter = NeighborhoodHighlighter::default();

		assert!(!highlighter.expand(&mut graph));
		assert!(!highlighter.contract(&mut graph));
		assert_eq!(highlighter.depth(), 1);
		assert!(marked(&graph, Mark::Faded).is_empty());
	}

	#[test]
	fn clear_removes_all_highlight_marks() {
		let mut graph = path_graph();
		let mut highlighter = NeighborhoodHighlighter::default();
		highlighter.set_seed(&mut graph, "B");

		highlighter.clear(&mut graph);

		assert_eq!(highlighter.seed(), None);
		assert!(highlighter.highlighted().is_empty());
		assert!(marked(&graph, Mark::Highlight).is_empty());
		assert!(marked(&graph, Mark::Faded).is_empty());
	}

	#[test]
	fn cycles_terminate() {
		let graph = GraphStore::new(
			["a", "b", "c"],
			[("a", "b"), ("b", "c"), ("c", "a")],
		);
		assert_eq!(compute_reachable(&graph, "a", 50), set(&["a", "b", "c"]));
	}

	fn arbitrary_graph() -> impl Strategy<Value = (GraphStore, usize)> {
		(1usize..12).prop_flat_map(|n| {
			(
				prop::collection::vec((0..n, 0..n), 0..30),
				0..n,
			)
				.prop_map(move |(links, seed)| {
					let ids = (0..n).map(|i| format!("n{i}"));
					let links = links
						.into_iter()
						.map(|(s, t)| (format!("n{s}"), format!("n{t}")));
					(GraphStore::new(ids, links), seed)
				})
		})
	}

	proptest! {
		#[test]
		fn depth_one_is_seed_plus_neighbors((graph, seed) in arbitrary_graph()) {
			let seed = format!("n{seed}");
			let mut expected: HashSet<String> = graph.neighbors(&seed).into_iter().collect();
			expected.insert(seed.clone());

			prop_assert_eq!(compute_reachable(&graph, &seed, 1), expected);
		}

		#[test]
		fn reachable_sets_grow_with_depth(
			(graph, seed) in arbitrary_graph(),
			shallow in 1usize..5,
			extra in 1usize..5,
		) {
			let seed = format!("n{seed}");
			let near = compute_reachable(&graph, &seed, shallow);
			let far = compute_reachable(&graph, &seed, shallow + extra);

			prop_assert!(near.is_subset(&far));
		}

		#[test]
		fn contract_then_expand_round_trips((mut graph, seed) in arbitrary_graph(), depth in 2usize..6) {
			let seed = format!("n{seed}");
			let mut highlighter = NeighborhoodHighlighter::default();
			highlighter.set_seed(&mut graph, &seed);
			for _ in 1..depth {
				highlighter.expand(&mut graph);
			}
			let before = highlighter.highlighted().clone();

			highlighter.contract(&mut graph);
			highlighter.expand(&mut graph);

			prop_assert_eq!(highlighter.depth(), depth);
			prop_assert_eq!(highlighter.highlighted(), &before);
		}
	}
}
