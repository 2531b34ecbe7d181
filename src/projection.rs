//! Data handed to the external 3D force-graph and map renderers.
//!
//! Both projections are plain serde structures; the renderers themselves live
//! on the JS side and receive them through [`crate::bridge`].

use serde::Serialize;

use crate::components::force_graph::{GraphData, NodeKind, Theme};
use crate::explore::GraphHandle;

const DEFAULT_LINK_COLOR: &str = "#cccccc";

/// A node of the 3D view.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Force3dNode {
	pub id: String,
	#[serde(rename = "type")]
	pub kind: NodeKind,
	pub years: Option<String>,
	pub color: String,
}

/// A link of the 3D view.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Force3dLink {
	pub source: String,
	pub target: String,
	pub color: String,
}

/// Nodes and links for the 3D view, colored as currently displayed.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Force3dData {
	pub nodes: Vec<Force3dNode>,
	pub links: Vec<Force3dLink>,
}

/// Projects the graph for the 3D view.
///
/// Node colors are the current cluster color, else the kind default (bands
/// keep the band color, everything else the member color). Link colors are
/// the current edge color, else a neutral gray.
pub fn force3d_data<G>(data: &GraphData, graph: &G, theme: &Theme) -> Force3dData
where
	G: GraphHandle + ?Sized,
{
	let nodes = graph
		.node_ids()
		.into_iter()
		.map(|id| {
			let node = data.node(&id);
			let kind = node.map(|node| node.kind).unwrap_or_default();
			let color = graph.node_color(&id).unwrap_or_else(|| match kind {
				NodeKind::Band => theme.kinds.band.to_css_rgb(),
				_ => theme.kinds.member.to_css_rgb(),
			});
			Force3dNode {
				years: node.and_then(|node| node.years.clone()),
				id,
				kind,
				color,
			}
		})
		.collect();

	let links = graph
		.edges()
		.into_iter()
		.map(|edge| Force3dLink {
			color: graph
				.edge_color(edge.id)
				.unwrap_or_else(|| DEFAULT_LINK_COLOR.to_string()),
			source: edge.source,
			target: edge.target,
		})
		.collect();

	Force3dData { nodes, links }
}

/// A geolocated node.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MapMarker {
	pub id: String,
	#[serde(rename = "type")]
	pub kind: NodeKind,
	pub lat: f64,
	pub lon: f64,
}

/// A link between two geolocated nodes.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MapPolyline {
	pub source: String,
	pub target: String,
	/// `[[lat, lon], [lat, lon]]`
	pub points: [[f64; 2]; 2],
}

/// Markers and connecting lines for the map view.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct MapLayers {
	pub markers: Vec<MapMarker>,
	pub polylines: Vec<MapPolyline>,
}

/// Projects geolocated nodes and the links between them.
pub fn map_layers(data: &GraphData) -> MapLayers {
	let markers = data
		.nodes
		.iter()
		.filter_map(|node| {
			let (lat, lon) = node.position()?;
			Some(MapMarker {
				id: node.id.clone(),
				kind: node.kind,
				lat,
				lon,
			})
		})
		.collect();

	let polylines = data
		.links
		.iter()
		.filter_map(|link| {
			let from = data.node(&link.source)?.position()?;
			let to = data.node(&link.target)?.position()?;
			Some(MapPolyline {
				source: link.source.clone(),
				target: link.target.clone(),
				points: [[from.0, from.1], [to.0, to.1]],
			})
		})
		.collect();

	MapLayers { markers, polylines }
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::explore::{ClusterColor, Explorer, GraphStore};

	fn sample() -> GraphData {
		serde_json::from_str(
			r##"{
				"nodes": [
					{ "id": "Dead Kennedys", "type": "band", "years": "1978-1986", "lat": 37.77, "lon": -122.42 },
					{ "id": "Jello Biafra", "type": "member", "lat": 37.8, "lon": -122.27 },
					{ "id": "East Bay Ray", "type": "member" }
				],
				"links": [
					{ "source": "Jello Biafra", "target": "Dead Kennedys", "label": "vocals" },
					{ "source": "East Bay Ray", "target": "Dead Kennedys", "label": "guitar" }
				]
			}"##,
		)
		.expect("sample parses")
	}

	#[test]
	fn force3d_uses_kind_colors_until_clustered() {
		let data = sample();
		let mut graph = GraphStore::from(&data);
		let theme = Theme::default();

		let plain = force3d_data(&data, &graph, &theme);
		assert_eq!(plain.nodes[0].color, "#2e86ab");
		assert_eq!(plain.nodes[1].color, "#e67e22");
		assert_eq!(plain.nodes[0].years.as_deref(), Some("1978-1986"));
		assert!(plain.links.iter().all(|link| link.color == DEFAULT_LINK_COLOR));

		let mut explorer = Explorer::default();
		explorer.select_node(&mut graph, "Jello Biafra");
		explorer.create_cluster(&mut graph, Some(ClusterColor::new("#ff00ff")));

		let clustered = force3d_data(&data, &graph, &theme);
		assert_eq!(clustered.nodes[0].color, "#ff00ff");
		assert_eq!(clustered.nodes[2].color, "#e67e22");
		assert_eq!(clustered.links[0].color, "#ff00ff");
		assert_eq!(clustered.links[1].color, DEFAULT_LINK_COLOR);
	}

	#[test]
	fn force3d_serializes_with_type_field() {
		let data = sample();
		let graph = GraphStore::from(&data);
		let json = serde_json::to_value(force3d_data(&data, &graph, &Theme::default()))
			.expect("serializes");

		assert_eq!(json["nodes"][0]["type"], "band");
		assert_eq!(json["links"][0]["source"], "Jello Biafra");
	}

	#[test]
	fn map_keeps_only_geolocated_elements() {
		let layers = map_layers(&sample());

		assert_eq!(layers.markers.len(), 2);
		assert_eq!(layers.markers[1].id, "Jello Biafra");
		assert_eq!(layers.polylines.len(), 1);
		assert_eq!(layers.polylines[0].points, [[37.8, -122.27], [37.77, -122.42]]);
	}
}
