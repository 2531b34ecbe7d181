//! The narrow interface the explorer needs from whatever draws the graph.
//!
//! Anything that can answer adjacency queries and carry per-element display
//! state can back the explorer: the canvas component uses [`GraphStore`], and
//! so do the tests.
//!
//! [`GraphStore`]: super::store::GraphStore

/// Stable identity of an edge: its position in the graph's edge list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub usize);

/// An edge together with the ids of its endpoints.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdgeEnds {
	/// Position in the edge list.
	pub id: EdgeId,
	/// Id of the node the edge starts at.
	pub source: String,
	/// Id of the node the edge ends at.
	pub target: String,
}

/// Boolean display states an element can carry.
///
/// Each mark has exactly one writer: the highlighter owns `Highlight` and
/// `Faded`, the cluster manager owns `Clustered`, search owns `SearchHit` and
/// `SearchFaded`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mark {
	/// Inside the neighborhood of the highlight seed.
	Highlight,
	/// Outside the neighborhood while a highlight is active.
	Faded,
	/// Member of at least one cluster, or an edge inside one.
	Clustered,
	/// Matches the current search.
	SearchHit,
	/// Does not match the current search.
	SearchFaded,
}

impl Mark {
	/// Every mark, in declaration order.
	pub const ALL: [Mark; 5] = [
		Mark::Highlight,
		Mark::Faded,
		Mark::Clustered,
		Mark::SearchHit,
		Mark::SearchFaded,
	];
}

/// Lookup, adjacency, marking, coloring and visibility over a rendered graph.
pub trait GraphHandle {
	/// Whether a node with `id` exists.
	fn contains_node(&self, id: &str) -> bool;

	/// All node ids, in load order.
	fn node_ids(&self) -> Vec<String>;

	/// Nodes adjacent to `id`, ignoring edge direction. Empty for unknown ids.
	fn neighbors(&self, id: &str) -> Vec<String>;

	/// All edges, in load order.
	fn edges(&self) -> Vec<EdgeEnds>;

	/// Whether node `id` carries `mark`. False for unknown ids.
	fn node_has_mark(&self, id: &str, mark: Mark) -> bool;
	/// Adds or removes `mark` on node `id`. Unknown ids are ignored.
	fn set_node_mark(&mut self, id: &str, mark: Mark, on: bool);
	/// Whether `edge` carries `mark`.
	fn edge_has_mark(&self, edge: EdgeId, mark: Mark) -> bool;
	/// Adds or removes `mark` on `edge`.
	fn set_edge_mark(&mut self, edge: EdgeId, mark: Mark, on: bool);

	/// Removes `marks` from every node and edge.
	fn clear_marks(&mut self, marks: &[Mark]);

	/// The color currently displayed for a node, if any override is set.
	fn node_color(&self, id: &str) -> Option<String>;
	/// Sets or removes the color override of node `id`.
	fn set_node_color(&mut self, id: &str, color: Option<&str>);
	/// The color override of `edge`, if any.
	fn edge_color(&self, edge: EdgeId) -> Option<String>;
	/// Sets or removes the color override of `edge`.
	fn set_edge_color(&mut self, edge: EdgeId, color: Option<&str>);

	/// Whether node `id` is shown.
	fn node_visible(&self, id: &str) -> bool;
	/// Shows or hides node `id`.
	fn set_node_visible(&mut self, id: &str, visible: bool);
	/// Whether `edge` is shown.
	fn edge_visible(&self, edge: EdgeId) -> bool;
	/// Shows or hides `edge`.
	fn set_edge_visible(&mut self, edge: EdgeId, visible: bool);
}
