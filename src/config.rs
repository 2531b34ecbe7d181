//! Viewer settings read from the page.
//!
//! An optional `<script id="graph-config" type="application/json">` block
//! overrides any of the fields below; missing fields keep their defaults.

use log::warn;
use serde::Deserialize;

use crate::components::force_graph::Theme;
use crate::explore::{ClusterColor, ClusterStyle};

/// Settings for one graph viewer.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
	/// Theme preset name: `default`, `midnight`, `minimal` or `light`.
	pub theme: String,
	/// Saturation (percent) of generated cluster colors.
	pub cluster_saturation: u8,
	/// Lightness (percent) of generated cluster colors.
	pub cluster_lightness: u8,
	/// Initial value of the cluster color picker.
	pub default_cluster_color: String,
	/// Global JS object holding the 3D and map renderers.
	pub renderer_namespace: String,
}

impl Default for ViewerConfig {
	fn default() -> Self {
		Self {
			theme: "default".to_string(),
			cluster_saturation: 70,
			cluster_lightness: 75,
			default_cluster_color: "#FFD700".to_string(),
			renderer_namespace: "punxGraph".to_string(),
		}
	}
}

impl ViewerConfig {
	/// Parses a config block, falling back to defaults on malformed input.
	pub fn from_json(text: &str) -> Self {
		match serde_json::from_str::<Self>(text) {
			Ok(mut config) => {
				if !is_picker_color(&config.default_cluster_color) {
					warn!(
						"punx-graph: default_cluster_color {:?} is not #rrggbb, using default",
						config.default_cluster_color
					);
					config.default_cluster_color = Self::default().default_cluster_color;
				}
				config
			}
			Err(e) => {
				warn!("punx-graph: failed to parse viewer config: {}", e);
				Self::default()
			}
		}
	}

	/// Cluster color saturation and lightness, capped at 100%.
	pub fn cluster_style(&self) -> ClusterStyle {
		ClusterStyle {
			saturation: self.cluster_saturation.min(100),
			lightness: self.cluster_lightness.min(100),
		}
	}

	/// Initial cluster picker color.
	pub fn default_cluster_color(&self) -> ClusterColor {
		ClusterColor::new(self.default_cluster_color.clone())
	}

	/// The configured theme preset, or the default theme for unknown names.
	pub fn theme(&self) -> Theme {
		Theme::by_name(&self.theme).unwrap_or_else(|| {
			warn!("punx-graph: unknown theme {:?}, using default", self.theme);
			Theme::default()
		})
	}
}

/// `#rrggbb`, the only form a color input accepts.
fn is_picker_color(value: &str) -> bool {
	value
		.strip_prefix('#')
		.is_some_and(|hex| hex.len() == 6 && hex.bytes().all(|b| b.is_ascii_hexdigit()))
}
