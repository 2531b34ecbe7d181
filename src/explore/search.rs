//! Case-insensitive substring search over node ids.

use super::handle::{GraphHandle, Mark};

/// The last query and the node ids it matched.
#[derive(Clone, Debug, Default)]
pub struct NodeSearch {
	query: String,
	matches: Vec<String>,
}

impl NodeSearch {
	/// The last non-empty query, trimmed.
	pub fn query(&self) -> &str {
		&self.query
	}

	/// Ids matching the last query, in load order.
	pub fn matches(&self) -> &[String] {
		&self.matches
	}

	/// Marks matching nodes as hits and fades everything else.
	///
	/// An empty (or all-whitespace) query clears the search instead. When
	/// nothing matches, every node and edge is faded.
	pub fn search<G>(&mut self, graph: &mut G, query: &str) -> &[String]
	where
		G: GraphHandle + ?Sized,
	{
		let query = query.trim();
		if query.is_empty() {
			self.clear(graph);
			return &self.matches;
		}

		let needle = query.to_lowercase();
		self.query = query.to_string();
		self.matches = graph
			.node_ids()
			.into_iter()
			.filter(|id| id.to_lowercase().contains(&needle))
			.collect();

		apply_marks(graph, &self.matches);
		&self.matches
	}

	/// Narrows the marking to a single picked result.
	pub fn focus_result<G>(&mut self, graph: &mut G, id: &str)
	where
		G: GraphHandle + ?Sized,
	{
		if !graph.contains_node(id) {
			return;
		}
		apply_marks(graph, &[id.to_string()]);
	}

	/// Forgets the query and removes every search mark.
	pub fn clear<G>(&mut self, graph: &mut G)
	where
		G: GraphHandle + ?Sized,
	{
		self.query.clear();
		self.matches.clear();
		graph.clear_marks(&[Mark::SearchHit, Mark::SearchFaded]);
	}
}

fn apply_marks<G>(graph: &mut G, hits: &[String])
where
	G: GraphHandle + ?Sized,
{
	graph.clear_marks(&[Mark::SearchHit, Mark::SearchFaded]);

	for id in graph.node_ids() {
		let mark = if hits.contains(&id) {
			Mark::SearchHit
		} else {
			Mark::SearchFaded
		};
		graph.set_node_mark(&id, mark, true);
	}
	for edge in graph.edges() {
		graph.set_edge_mark(edge.id, Mark::SearchFaded, true);
	}
}
