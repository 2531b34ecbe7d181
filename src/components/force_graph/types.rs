//! Graph data structures for input to the force graph component.

use serde::{Deserialize, Serialize};

use crate::explore::GraphStore;

/// What a node stands for in the genealogy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
	Band,
	Member,
	#[default]
	#[serde(other)]
	Other,
}

impl NodeKind {
	/// Lowercase name, as in the input data.
	pub fn name(self) -> &'static str {
		match self {
			NodeKind::Band => "band",
			NodeKind::Member => "member",
			NodeKind::Other => "other",
		}
	}

	/// Heading for the related entries listed in the info panel.
	pub fn related_heading(self) -> &'static str {
		match self {
			NodeKind::Band => "Members",
			NodeKind::Member => "Bands",
			NodeKind::Other => "Related",
		}
	}
}

/// A node in the graph.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphNode {
	/// Unique identifier for this node. Used to reference nodes in links.
	pub id: String,
	/// Optional display label. Falls back to the id when rendering.
	#[serde(default)]
	pub label: Option<String>,
	#[serde(default, rename = "type")]
	pub kind: NodeKind,
	/// Years active, free-form (e.g. "1977-1986").
	#[serde(default)]
	pub years: Option<String>,
	#[serde(default)]
	pub lat: Option<f64>,
	#[serde(default)]
	pub lon: Option<f64>,
	/// Optional CSS color override (e.g., "#ff0000" or "rgb(255, 0, 0)").
	/// If not set, color is derived from the node kind.
	#[serde(default)]
	pub color: Option<String>,
}

impl GraphNode {
	pub fn display_name(&self) -> &str {
		self.label.as_deref().unwrap_or(&self.id)
	}

	/// `(lat, lon)` when both coordinates are present.
	pub fn position(&self) -> Option<(f64, f64)> {
		self.lat.zip(self.lon)
	}
}

/// A directed edge between two nodes, member -> band.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphLink {
	/// Source node ID.
	pub source: String,
	/// Target node ID.
	pub target: String,
	/// Role or instrument shown along the edge.
	#[serde(default)]
	pub label: Option<String>,
}

/// Complete graph data: nodes and links.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
}

/// One line of the info panel: a related node and the link label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelatedEntry {
	pub id: String,
	pub label: Option<String>,
}

/// Everything the info panel shows about one node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeDetails {
	pub id: String,
	pub kind: NodeKind,
	pub years: Option<String>,
	pub related: Vec<RelatedEntry>,
}

impl GraphData {
	/// The node with `id`, if present.
	pub fn node(&self, id: &str) -> Option<&GraphNode> {
		self.nodes.iter().find(|node| node.id == id)
	}

	/// Info-panel details for `id`.
	///
	/// Bands list the sources of links pointing at them; members list the
	/// targets of their own links.
	pub fn details(&self, id: &str) -> Option<NodeDetails> {
		let node = self.node(id)?;
		let related = self
			.links
			.iter()
			.filter_map(|link| match node.kind {
				NodeKind::Band if link.target == id => Some(&link.source),
				NodeKind::Member if link.source == id => Some(&link.target),
				NodeKind::Other if link.source == id => Some(&link.target),
				NodeKind::Other if link.target == id => Some(&link.source),
				_ => None,
			}.map(|other| RelatedEntry {
				id: other.clone(),
				label: link.label.clone(),
			}))
			.collect();

		Some(NodeDetails {
			id: node.id.clone(),
			kind: node.kind,
			years: node.years.clone(),
			related,
		})
	}
}

impl From<&GraphData> for GraphStore {
	fn from(data: &GraphData) -> Self {
		GraphStore::new(
			data.nodes.iter().map(|node| node.id.clone()),
			data.links
				.iter()
				.map(|link| (link.source.clone(), link.target.clone())),
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::explore::GraphHandle;

	const SAMPLE: &str = r##"{
		"nodes": [
			{ "id": "Bad Brains", "type": "band", "years": "1977-", "lat": 38.9, "lon": -77.0 },
			{ "id": "H.R.", "type": "member", "years": "1977-" },
			{ "id": "Dr. Know", "type": "member", "color": "#ff0000" },
			{ "id": "Zine", "type": "fanzine" }
		],
		"links": [
			{ "source": "H.R.", "target": "Bad Brains", "label": "vocals" },
			{ "source": "Dr. Know", "target": "Bad Brains", "label": "guitar" }
		]
	}"##;

	#[test]
	fn parses_band_member_data() {
		let data: GraphData = serde_json::from_str(SAMPLE).expect("sample parses");

		assert_eq!(data.nodes.len(), 4);
		assert_eq!(data.nodes[0].kind, NodeKind::Band);
		assert_eq!(data.nodes[0].position(), Some((38.9, -77.0)));
		assert_eq!(data.nodes[1].position(), None);
		assert_eq!(data.nodes[3].kind, NodeKind::Other);
		assert_eq!(data.links[0].label.as_deref(), Some("vocals"));
	}

	#[test]
	fn band_details_list_members_and_member_details_list_bands() {
		let data: GraphData = serde_json::from_str(SAMPLE).expect("sample parses");

		let band = data.details("Bad Brains").expect("band exists");
		assert_eq!(band.kind.related_heading(), "Members");
		assert_eq!(
			band.related,
			vec![
				RelatedEntry { id: "H.R.".into(), label: Some("vocals".into()) },
				RelatedEntry { id: "Dr. Know".into(), label: Some("guitar".into()) },
			]
		);

		let member = data.details("H.R.").expect("member exists");
		assert_eq!(member.years.as_deref(), Some("1977-"));
		assert_eq!(member.related.len(), 1);
		assert_eq!(member.related[0].id, "Bad Brains");

		assert!(data.details("Nobody").is_none());
	}

	#[test]
	fn converts_into_an_element_store() {
		let data: GraphData = serde_json::from_str(SAMPLE).expect("sample parses");
		let store = GraphStore::from(&data);

		assert_eq!(store.node_count(), 4);
		assert_eq!(store.neighbors("Bad Brains"), vec!["H.R.", "Dr. Know"]);
	}
}
