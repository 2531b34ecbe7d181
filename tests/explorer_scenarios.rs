//! End-to-end exploration scenarios against the in-memory element store.

use std::collections::HashSet;

use punx_graph::explore::{
	ClusterColor, ClusterManager, EdgeId, Explorer, GraphHandle, GraphStore, Mark,
	compute_reachable,
};

fn path() -> GraphStore {
	GraphStore::new(
		["A", "B", "C", "D"],
		[("A", "B"), ("B", "C"), ("C", "D")],
	)
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
fn seeding_and_expanding_a_path() {
	let mut graph = path();
	let mut explorer = Explorer::default();

	assert!(explorer.select_node(&mut graph, "B"));
	assert_eq!(explorer.highlight().depth(), 1);
	assert_eq!(explorer.highlighted_nodes(), &set(&["A", "B", "C"]));
	assert_eq!(marked(&graph, Mark::Highlight), set(&["A", "B", "C"]));
	assert_eq!(marked(&graph, Mark::Faded), set(&["D"]));

	assert!(explorer.expand(&mut graph));
	assert_eq!(explorer.highlight().depth(), 2);
	assert_eq!(marked(&graph, Mark::Highlight), set(&["A", "B", "C", "D"]));
	assert!(marked(&graph, Mark::Faded).is_empty());
}

#[test]
fn contract_stops_at_depth_one() {
	let mut graph = path();
	let mut explorer = Explorer::default();
	explorer.select_node(&mut graph, "A");

	assert!(!explorer.contract(&mut graph));
	assert_eq!(explorer.highlight().depth(), 1);
	assert_eq!(explorer.highlighted_nodes(), &set(&["A", "B"]));
}

#[test]
fn unknown_seed_changes_nothing() {
	let mut graph = path();
	let mut explorer = Explorer::default();
	explorer.select_node(&mut graph, "C");

	assert!(!explorer.select_node(&mut graph, "Z"));
	assert_eq!(explorer.highlight().seed(), Some("C"));
	assert_eq!(explorer.highlighted_nodes(), &set(&["B", "C", "D"]));
}

#[test]
fn reachable_sets_on_the_path() {
	let graph = path();

	assert_eq!(compute_reachable(&graph, "A", 1), set(&["A", "B"]));
	assert_eq!(compute_reachable(&graph, "A", 2), set(&["A", "B", "C"]));
	assert_eq!(compute_reachable(&graph, "A", 10), set(&["A", "B", "C", "D"]));
	assert!(compute_reachable(&graph, "Z", 1).is_empty());
}

#[test]
fn overlapping_clusters_resolve_by_focus_then_recency() {
	let mut graph = path();
	let mut clusters = ClusterManager::default();

	assert_eq!(
		clusters.create_cluster(&mut graph, ["A", "B"], Some(ClusterColor::new("red"))),
		Some(0)
	);
	assert_eq!(
		clusters.create_cluster(&mut graph, ["B", "C"], Some(ClusterColor::new("blue"))),
		Some(1)
	);

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
fn clear_all_forgets_every_membership() {
	let mut graph = path();
	let mut explorer = Explorer::default();
	explorer.select_node(&mut graph, "B");
	explorer.create_cluster(&mut graph, None);

	explorer.clear_all(&mut graph);

	assert!(explorer.clusters().clusters().is_empty());
	for id in graph.node_ids() {
		assert!(explorer.clusters().memberships(&id).is_empty());
		assert_eq!(graph.node_color(&id), None);
		assert!(!graph.node_has_mark(&id, Mark::Clustered));
	}
	for edge in graph.edges() {
		assert_eq!(graph.edge_color(edge.id), None);
	}
}

#[test]
fn cycling_a_single_membership_toggles_it() {
	let mut graph = path();
	let mut explorer = Explorer::default();
	explorer.select_node(&mut graph, "D");
	explorer.create_cluster(&mut graph, Some(ClusterColor::new("green")));

	explorer.context_node(&mut graph, "D");
	assert_eq!(graph.node_color("D"), None);
	assert!(explorer.clusters().memberships("D").is_empty());
	assert!(!explorer.clusters().clusters()[0].members().contains("D"));

	explorer.context_node(&mut graph, "D");
	assert_eq!(graph.node_color("D").as_deref(), Some("green"));
	assert_eq!(explorer.clusters().memberships("D").len(), 1);
	assert!(explorer.clusters().clusters()[0].members().contains("D"));
}

#[test]
fn search_and_show_only_leave_clusters_alone() {
	let mut graph = path();
	let mut explorer = Explorer::default();
	explorer.select_node(&mut graph, "A");
	explorer.create_cluster(&mut graph, Some(ClusterColor::new("red")));
	explorer.background_tap(&mut graph);

	assert_eq!(explorer.search(&mut graph, "c"), vec!["C"]);
	assert_eq!(marked(&graph, Mark::SearchHit), set(&["C"]));

	assert!(explorer.toggle_show_only(&mut graph));
	assert!(graph.node_visible("A"));
	assert!(graph.node_visible("B"));
	assert!(!graph.node_visible("C"));
	assert!(!graph.edge_visible(EdgeId(1)));

	explorer.clear_search(&mut graph);
	explorer.clear_highlights(&mut graph);
	assert!(graph.node_visible("C"));
	assert!(marked(&graph, Mark::SearchHit).is_empty());
	assert_eq!(graph.node_color("A").as_deref(), Some("red"));
}
