//! Zoom-dependent scaling configuration for graph visuals.
//!
//! # Coordinate Spaces
//!
//! - **World-space**: the coordinate system of the graph. Values in world-space
//!   scale proportionally with zoom.
//! - **Screen-space**: pixel coordinates on the canvas. Values in screen-space
//!   stay constant regardless of zoom level.
//!
//! Every size in [`ScaleConfig`] declares a [`ScaleBehavior`]; [`ScaledValues`]
//! turns the whole configuration into world-space numbers once per frame.

/// Defines how a visual property scales with zoom level.
#[derive(Clone, Debug)]
pub enum ScaleBehavior {
	/// Constant world-space size. Appears larger when zoomed in.
	World,
	/// Constant screen-space size (pixels). Unaffected by zoom.
	Screen,
	/// World-space scaling, clamped to min/max screen-space bounds.
	Clamped { min_screen: f64, max_screen: f64 },
}

impl ScaleBehavior {
	/// World-space value for `base` at zoom `k`.
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		match self {
			ScaleBehavior::World => base,
			ScaleBehavior::Screen => base / k,
			ScaleBehavior::Clamped {
				min_screen,
				max_screen,
			} => base.clamp(min_screen / k, max_screen / k),
		}
	}
}

/// Defines how alpha/opacity scales with zoom level.
#[derive(Clone, Debug)]
pub enum AlphaBehavior {
	/// Constant alpha regardless of zoom.
	Constant,
	/// Alpha scales linearly with zoom, clamped to [0, 1].
	ScaleWithZoom,
	/// Fully visible at `full_alpha_k`, zero at `zero_alpha_k`.
	Fade {
		zero_alpha_k: f64,
		full_alpha_k: f64,
	},
}

impl AlphaBehavior {
	/// Alpha multiplier for zoom `k`.
	pub fn apply(&self, k: f64) -> f64 {
		match self {
			AlphaBehavior::Constant => 1.0,
			AlphaBehavior::ScaleWithZoom => k.clamp(0.0, 1.0),
			AlphaBehavior::Fade {
				zero_alpha_k,
				full_alpha_k,
			} => {
				if zero_alpha_k == full_alpha_k {
					return 1.0;
				}
				((k - zero_alpha_k) / (full_alpha_k - zero_alpha_k)).clamp(0.0, 1.0)
			}
		}
	}
}

#[derive(Clone, Debug)]
pub struct NodeScaleConfig {
	/// Base node radius in world units.
	pub radius: f64,
	pub radius_behavior: ScaleBehavior,
	/// Hit detection radius in world units.
	pub hit_radius: f64,
	pub hit_behavior: ScaleBehavior,
	/// Label font size in screen pixels.
	pub label_size: f64,
	/// Zoom below which labels stop shrinking.
	pub label_min_k: f64,
}

#[derive(Clone, Debug)]
pub struct EdgeScaleConfig {
	/// Base line width in screen pixels.
	pub line_width: f64,
	/// Role label font size in screen pixels.
	pub label_size: f64,
	/// Role labels fade out when zoomed away.
	pub label_alpha_behavior: AlphaBehavior,
}

#[derive(Clone, Debug)]
pub struct ArrowScaleConfig {
	/// Base arrow size in world units.
	pub size: f64,
	pub size_behavior: ScaleBehavior,
	pub alpha_behavior: AlphaBehavior,
	/// Minimum alpha to bother drawing.
	pub cull_alpha: f64,
}

/// Rings drawn around highlighted and hovered nodes.
#[derive(Clone, Debug)]
pub struct RingScaleConfig {
	/// Hover ring stroke width in screen pixels.
	pub hover_width: f64,
	/// Ring offset from node edge in screen pixels.
	pub offset: f64,
}

/// Complete scale configuration for all graph elements.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	pub node: NodeScaleConfig,
	pub edge: EdgeScaleConfig,
	pub arrow: ArrowScaleConfig,
	pub ring: RingScaleConfig,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			node: NodeScaleConfig {
				radius: 7.0,
				radius_behavior: ScaleBehavior::Clamped {
					min_screen: 4.0,
					max_screen: f64::INFINITY,
				},
				hit_radius: 12.0,
				hit_behavior: ScaleBehavior::Clamped {
					min_screen: 6.0,
					max_screen: f64::INFINITY,
				},
				label_size: 11.0,
				label_min_k: 0.5,
			},
			edge: EdgeScaleConfig {
				line_width: 1.5,
				label_size: 9.0,
				label_alpha_behavior: AlphaBehavior::Fade {
					zero_alpha_k: 0.8,
					full_alpha_k: 1.4,
				},
			},
			arrow: ArrowScaleConfig {
				size: 5.0,
				size_behavior: ScaleBehavior::Clamped {
					min_screen: 0.0,
					max_screen: 18.0,
				},
				alpha_behavior: AlphaBehavior::ScaleWithZoom,
				cull_alpha: 0.05,
			},
			ring: RingScaleConfig {
				hover_width: 1.5,
				offset: 2.0,
			},
		}
	}
}

/// Pre-computed world-space values for one zoom level.
///
/// Create this once per frame and pass it to rendering functions.
#[derive(Clone, Debug)]
pub struct ScaledValues {
	pub k: f64,
	pub node_radius: f64,
	pub hit_radius: f64,
	pub label_font: String,
	pub edge_line_width: f64,
	pub edge_label_font: String,
	pub edge_label_alpha: f64,
	pub arrow_size: f64,
	pub arrow_alpha: f64,
	pub cull_arrows: bool,
	pub hover_ring_width: f64,
	pub ring_offset: f64,
}

impl ScaledValues {
	pub fn new(config: &ScaleConfig, k: f64) -> Self {
		let label_font_size = config.node.label_size / k.max(config.node.label_min_k);
		let arrow_alpha = config.arrow.alpha_behavior.apply(k);

		Self {
			k,
			node_radius: config.node.radius_behavior.apply(config.node.radius, k),
			hit_radius: config.node.hit_behavior.apply(config.node.hit_radius, k),
			label_font: format!("{}px sans-serif", label_font_size),
			edge_line_width: config.edge.line_width / k,
			edge_label_font: format!("{}px sans-serif", config.edge.label_size / k),
			edge_label_alpha: config.edge.label_alpha_behavior.apply(k),
			arrow_size: config.arrow.size_behavior.apply(config.arrow.size, k),
			arrow_alpha,
			cull_arrows: arrow_alpha < config.arrow.cull_alpha,
			hover_ring_width: config.ring.hover_width / k,
			ring_offset: config.ring.offset / k,
		}
	}

	/// World-space width of a stroke that should be `px` screen pixels wide.
	pub fn screen_px(&self, px: f64) -> f64 {
		px / self.k
	}
}
