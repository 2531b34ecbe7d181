//! In-memory element store backing [`GraphHandle`].
//!
//! Holds node identities, undirected adjacency, the edge list and the display
//! style of every element. The canvas renderer reads styles from here; the
//! explorer writes them through the trait.

use std::collections::{HashMap, HashSet};

use super::handle::{EdgeEnds, EdgeId, GraphHandle, Mark};

/// Display state of a single node or edge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElementStyle {
	marks: HashSet<Mark>,
	color: Option<String>,
	visible: bool,
}

impl Default for ElementStyle {
	fn default() -> Self {
		Self {
			marks: HashSet::new(),
			color: None,
			visible: true,
		}
	}
}

impl ElementStyle {
	/// Whether the element carries `mark`.
	pub fn has(&self, mark: Mark) -> bool {
		self.marks.contains(&mark)
	}

	/// Color override, if set.
	pub fn color(&self) -> Option<&str> {
		self.color.as_deref()
	}

	/// Whether the element is shown.
	pub fn visible(&self) -> bool {
		self.visible
	}

	fn set_mark(&mut self, mark: Mark, on: bool) {
		if on {
			self.marks.insert(mark);
		} else {
			self.marks.remove(&mark);
		}
	}
}

/// Node ids, adjacency, edges and per-element styles for one graph view.
#[derive(Clone, Debug, Default)]
pub struct GraphStore {
	ids: Vec<String>,
	index_by_id: HashMap<String, usize>,
	adjacency: Vec<Vec<usize>>,
	links: Vec<(usize, usize)>,
	node_styles: Vec<ElementStyle>,
	edge_styles: Vec<ElementStyle>,
}

impl GraphStore {
	/// Builds a store from node ids and `(source, target)` links.
	///
	/// Repeated node ids are ignored after their first occurrence. Links whose
	/// endpoints are unknown are dropped, so an [`EdgeId`] is the position of
	/// the edge among the accepted links.
	pub fn new<N, L, S>(nodes: N, links: L) -> Self
	where
		N: IntoIterator<Item = S>,
		L: IntoIterator<Item = (S, S)>,
		S: Into<String>,
	{
		let mut store = Self::default();

		for id in nodes {
			let id = id.into();
			if store.index_by_id.contains_key(&id) {
				continue;
			}
			store.index_by_id.insert(id.clone(), store.ids.len());
			store.ids.push(id);
			store.adjacency.push(Vec::new());
			store.node_styles.push(ElementStyle::default());
		}

		for (source, target) in links {
			let (source, target) = (source.into(), target.into());
			let (Some(&src), Some(&tgt)) =
				(store.index_by_id.get(&source), store.index_by_id.get(&target))
			else {
				continue;
			};

			store.links.push((src, tgt));
			store.edge_styles.push(ElementStyle::default());

			if src != tgt {
				if !store.adjacency[src].contains(&tgt) {
					store.adjacency[src].push(tgt);
				}
				if !store.adjacency[tgt].contains(&src) {
					store.adjacency[tgt].push(src);
				}
			}
		}

		store
	}

	/// Number of distinct nodes.
	pub fn node_count(&self) -> usize {
		self.ids.len()
	}

	/// Number of edges with both endpoints present.
	pub fn edge_count(&self) -> usize {
		self.links.len()
	}

	/// Load-order index of node `id`.
	pub fn node_index(&self, id: &str) -> Option<usize> {
		self.index_by_id.get(id).copied()
	}

	/// Id of the node at `index`.
	pub fn node_id(&self, index: usize) -> Option<&str> {
		self.ids.get(index).map(String::as_str)
	}

	/// Edge endpoints as node indices, in edge order.
	pub fn links(&self) -> &[(usize, usize)] {
		&self.links
	}

	/// Display state of the node at `index`.
	pub fn node_style(&self, index: usize) -> Option<&ElementStyle> {
		self.node_styles.get(index)
	}

	/// Display state of `edge`.
	pub fn edge_style(&self, edge: EdgeId) -> Option<&ElementStyle> {
		self.edge_styles.get(edge.0)
	}

	fn node_style_mut(&mut self, id: &str) -> Option<&mut ElementStyle> {
		let index = self.node_index(id)?;
		self.node_styles.get_mut(index)
	}
}

impl GraphHandle for GraphStore {
	fn contains_node(&self, id: &str) -> bool {
		self.index_by_id.contains_key(id)
	}

	fn node_ids(&self) -> Vec<String> {
		self.ids.clone()
	}

	fn neighbors(&self, id: &str) -> Vec<String> {
		let Some(index) = self.node_index(id) else {
			return Vec::new();
		};
		self.adjacency[index]
			.iter()
			.map(|&next| self.ids[next].clone())
			.collect()
	}

	fn edges(&self) -> Vec<EdgeEnds> {
		self.links
			.iter()
			.enumerate()
			.map(|(i, &(src, tgt))| EdgeEnds {
				id: EdgeId(i),
				source: self.ids[src].clone(),
				target: self.ids[tgt].clone(),
			})
			.collect()
	}

	fn node_has_mark(&self, id: &str, mark: Mark) -> bool {
		self.node_index(id)
			.and_then(|index| self.node_styles.get(index))
			.is_some_and(|style| style.has(mark))
	}

	fn set_node_mark(&mut self, id: &str, mark: Mark, on: bool) {
		if let Some(style) = self.node_style_mut(id) {
			style.set_mark(mark, on);
		}
	}

	fn edge_has_mark(&self, edge: EdgeId, mark: Mark) -> bool {
		self.edge_style(edge).is_some_and(|style| style.has(mark))
	}

	fn set_edge_mark(&mut self, edge: EdgeId, mark: Mark, on: bool) {
		if let Some(style) = self.edge_styles.get_mut(edge.0) {
			style.set_mark(mark, on);
		}
	}

	fn clear_marks(&mut self, marks: &[Mark]) {
		for style in self.node_styles.iter_mut().chain(self.edge_styles.iter_mut()) {
			for &mark in marks {
				style.set_mark(mark, false);
			}
		}
	}

	fn node_color(&self, id: &str) -> Option<String> {
		self.node_index(id)
			.and_then(|index| self.node_styles.get(index))
			.and_then(|style| style.color.clone())
	}

	fn set_node_color(&mut self, id: &str, color: Option<&str>) {
		if let Some(style) = self.node_style_mut(id) {
			style.color = color.map(str::to_string);
		}
	}

	fn edge_color(&self, edge: EdgeId) -> Option<String> {
		self.edge_style(edge).and_then(|style| style.color.clone())
	}

	fn set_edge_color(&mut self, edge: EdgeId, color: Option<&str>) {
		if let Some(style) = self.edge_styles.get_mut(edge.0) {
			style.color = color.map(str::to_string);
		}
	}

	fn node_visible(&self, id: &str) -> bool {
		self.node_index(id)
			.and_then(|index| self.node_styles.get(index))
			.is_some_and(ElementStyle::visible)
	}

	fn set_node_visible(&mut self, id: &str, visible: bool) {
		if let Some(style) = self.node_style_mut(id) {
			style.visible = visible;
		}
	}

	fn edge_visible(&self, edge: EdgeId) -> bool {
		self.edge_style(edge).is_some_and(ElementStyle::visible)
	}

	fn set_edge_visible(&mut self, edge: EdgeId, visible: bool) {
		if let Some(style) = self.edge_styles.get_mut(edge.0) {
			style.visible = visible;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn band_graph() -> GraphStore {
		GraphStore::new(
			["Black Flag", "Henry Rollins", "Rollins Band", "Greg Ginn"],
			[
				("Henry Rollins", "Black Flag"),
				("Henry Rollins", "Rollins Band"),
				("Greg Ginn", "Black Flag"),
				("Greg Ginn", "Nobody"),
			],
		)
	}

	#[test]
	fn adjacency_ignores_direction() {
		let store = band_graph();
		let mut neighbors = store.neighbors("Black Flag");
		neighbors.sort();
		assert_eq!(neighbors, vec!["Greg Ginn", "Henry Rollins"]);
		assert_eq!(
			store.neighbors("Henry Rollins"),
			vec!["Black Flag", "Rollins Band"]
		);
	}

	#[test]
	fn links_to_unknown_nodes_are_dropped() {
		let store = band_graph();
		assert_eq!(store.edge_count(), 3);
		assert!(store.neighbors("Nobody").is_empty());
		assert!(!store.contains_node("Nobody"));
	}

	#[test]
	fn duplicate_links_and_self_loops_do_not_repeat_neighbors() {
		let store = GraphStore::new(["a", "b"], [("a", "b"), ("b", "a"), ("a", "a")]);
		assert_eq!(store.edge_count(), 3);
		assert_eq!(store.neighbors("a"), vec!["b"]);
		assert_eq!(store.neighbors("b"), vec!["a"]);
	}

	#[test]
	fn clear_marks_only_touches_requested_marks() {
		let mut store = band_graph();
		store.set_node_mark("Black Flag", Mark::Highlight, true);
		store.set_node_mark("Black Flag", Mark::Clustered, true);
		store.set_edge_mark(EdgeId(0), Mark::Faded, true);

		store.clear_marks(&[Mark::Highlight, Mark::Faded]);

		assert!(!store.node_has_mark("Black Flag", Mark::Highlight));
		assert!(store.node_has_mark("Black Flag", Mark::Clustered));
		assert!(!store.edge_has_mark(EdgeId(0), Mark::Faded));
	}

	#[test]
	fn styles_on_unknown_elements_are_ignored() {
		let mut store = band_graph();
		store.set_node_color("Nobody", Some("red"));
		store.set_edge_visible(EdgeId(99), false);
		assert_eq!(store.node_color("Nobody"), None);
		assert!(!store.edge_visible(EdgeId(99)));
		assert!(store.node_visible("Greg Ginn"));
	}
}
