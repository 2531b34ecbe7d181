//! Canvas rendering for the force graph.
//!
//! Rendering uses multiple passes for correct z-ordering:
//! 1. Background (screen space)
//! 2. Edges with arrows and role labels (world space)
//! 3. Plain nodes, then emphasized nodes on top
//! 4. Hover tooltip (screen space)
//!
//! Everything the explorer decides (marks, cluster colors, visibility) is read
//! from the element store; the renderer only maps it onto pixels.

use std::f64::consts::PI;

use force_graph::Node;
use web_sys::CanvasRenderingContext2d;

use super::scale::{ScaleConfig, ScaledValues};
use super::state::{ForceGraphState, NodeInfo};
use super::theme::{Color, Theme};
use crate::explore::{EdgeId, ElementStyle, Mark};

fn smooth_step(t: f64) -> f64 {
	t * t * (3.0 - 2.0 * t)
}

/// Renders the complete graph to the canvas.
pub fn render(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	theme: &Theme,
) {
	let scale = ScaledValues::new(config, state.transform.k);

	draw_background(state, ctx, theme);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);

	draw_edges(state, ctx, &scale, theme);
	draw_nodes(state, ctx, &scale, theme);

	ctx.restore();

	if theme.background.vignette > 0.0 {
		draw_vignette(state, ctx, theme);
	}
	draw_tooltip(state, ctx, &scale, theme);
}

fn draw_background(state: &ForceGraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let gradient = theme
		.background
		.use_gradient
		.then(|| {
			ctx.create_radial_gradient(
				state.width / 2.0,
				state.height / 2.0,
				0.0,
				state.width / 2.0,
				state.height / 2.0,
				state.width.max(state.height) * 0.8,
			)
			.ok()
		})
		.flatten();

	match gradient {
		Some(gradient) => {
			let _ = gradient.add_color_stop(0.0, &theme.background.color_secondary.to_css());
			let _ = gradient.add_color_stop(1.0, &theme.background.color.to_css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		None => ctx.set_fill_style_str(&theme.background.color.to_css()),
	}

	ctx.fill_rect(0.0, 0.0, state.width, state.height);
}

fn draw_vignette(state: &ForceGraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let Ok(gradient) = ctx.create_radial_gradient(
		state.width / 2.0,
		state.height / 2.0,
		state.width.min(state.height) * 0.3,
		state.width / 2.0,
		state.height / 2.0,
		state.width.max(state.height) * 0.7,
	) else {
		return;
	};

	let _ = gradient.add_color_stop(0.0, "rgba(0, 0, 0, 0)");
	let _ = gradient.add_color_stop(
		1.0,
		&format!("rgba(0, 0, 0, {})", theme.background.vignette),
	);

	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
}

/// Opacity of an element given its marks.
fn mark_alpha(style: &ElementStyle, theme: &Theme) -> f64 {
	let mut alpha: f64 = 1.0;
	if style.has(Mark::Faded) {
		alpha = alpha.min(theme.marks.faded_alpha);
	}
	if style.has(Mark::SearchFaded) {
		alpha = alpha.min(theme.marks.search_faded_alpha);
	}
	alpha
}

fn draw_edges(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let positions = state.positions();
	let default_style = ElementStyle::default();

	for (i, &(source, target)) in state.store.links().iter().enumerate() {
		let edge = EdgeId(i);
		let style = state.store.edge_style(edge).unwrap_or(&default_style);
		let source_style = state.store.node_style(source).unwrap_or(&default_style);
		let target_style = state.store.node_style(target).unwrap_or(&default_style);
		if !style.visible() || !source_style.visible() || !target_style.visible() {
			continue;
		}

		let ((x1, y1), (x2, y2)) = (positions[source], positions[target]);
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			continue;
		}

		let color = style.color().map(Color::parse).unwrap_or(theme.edge.color);
		let mut alpha = mark_alpha(style, theme);
		if source_style.has(Mark::Faded) || target_style.has(Mark::Faded) {
			alpha = alpha.min(theme.marks.faded_alpha);
		}
		let width = if style.has(Mark::Clustered) {
			scale.edge_line_width * 2.0
		} else {
			scale.edge_line_width
		};

		let (ux, uy) = (dx / dist, dy / dist);
		let inset = scale.node_radius + scale.arrow_size;

		ctx.set_global_alpha(alpha);
		ctx.set_stroke_style_str(&color.to_css());
		ctx.set_line_width(width);

		if theme.edge.curved && dist > scale.node_radius * 4.0 {
			draw_curved_edge(ctx, (x1, y1), (x2, y2), inset, theme.edge.curve_tension);
		} else {
			ctx.begin_path();
			ctx.move_to(x1 + ux * scale.node_radius, y1 + uy * scale.node_radius);
			ctx.line_to(x2 - ux * inset, y2 - uy * inset);
			ctx.stroke();
		}

		if !scale.cull_arrows {
			ctx.set_global_alpha(alpha * scale.arrow_alpha);
			ctx.set_fill_style_str(&color.to_css());

			let (tip_x, tip_y) = (x2 - ux * scale.node_radius, y2 - uy * scale.node_radius);
			let (back_x, back_y) = (tip_x - ux * scale.arrow_size, tip_y - uy * scale.arrow_size);
			let (px, py) = (-uy * scale.arrow_size * 0.5, ux * scale.arrow_size * 0.5);

			ctx.begin_path();
			ctx.move_to(tip_x, tip_y);
			ctx.line_to(back_x + px, back_y + py);
			ctx.line_to(back_x - px, back_y - py);
			ctx.close_path();
			ctx.fill();
		}

		if let Some(label) = state.edge_label(edge) {
			let label_alpha = alpha * scale.edge_label_alpha;
			if label_alpha > 0.05 {
				ctx.set_global_alpha(label_alpha);
				ctx.set_fill_style_str(&theme.edge.label_color.to_css());
				ctx.set_font(&scale.edge_label_font);
				ctx.set_text_align("center");
				let _ = ctx.fill_text(label, (x1 + x2) / 2.0, (y1 + y2) / 2.0 - 2.0 / scale.k);
				ctx.set_text_align("start");
			}
		}
	}

	ctx.set_global_alpha(1.0);
}

fn draw_curved_edge(
	ctx: &CanvasRenderingContext2d,
	(x1, y1): (f64, f64),
	(x2, y2): (f64, f64),
	offset: f64,
	tension: f64,
) {
	let (dx, dy) = (x2 - x1, y2 - y1);
	let dist = (dx * dx + dy * dy).sqrt();
	let (ux, uy) = (dx / dist, dy / dist);

	let curve_offset = dist * tension * 0.3;
	let (px, py) = (-uy * curve_offset, ux * curve_offset);

	let (start_x, start_y) = (x1 + ux * offset, y1 + uy * offset);
	let (end_x, end_y) = (x2 - ux * offset, y2 - uy * offset);
	let (mid_x, mid_y) = ((x1 + x2) / 2.0 + px, (y1 + y2) / 2.0 + py);

	ctx.begin_path();
	ctx.move_to(start_x, start_y);
	ctx.quadratic_curve_to(mid_x, mid_y, end_x, end_y);
	ctx.stroke();
}

fn draw_nodes(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let default_style = ElementStyle::default();
	let style_of = |node: &Node<NodeInfo>| {
		state
			.store
			.node_style(node.data.user_data.meta)
			.unwrap_or(&default_style)
	};

	// Pass 1: plain nodes
	state.graph.visit_nodes(|node| {
		let style = style_of(node);
		if !style.visible() || state.emphasis.node_intensity(node.index()) > 0.001 {
			return;
		}
		draw_node(state, ctx, node, style, scale, theme);
	});

	// Pass 2: emphasized and transitioning nodes on top
	state.graph.visit_nodes(|node| {
		let style = style_of(node);
		if !style.visible() || state.emphasis.node_intensity(node.index()) <= 0.001 {
			return;
		}
		draw_node(state, ctx, node, style, scale, theme);
	});
}

fn draw_node(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	node: &Node<NodeInfo>,
	style: &ElementStyle,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let info = &node.data.user_data;
	let (x, y) = (node.x() as f64, node.y() as f64);
	let emphasis = smooth_step(state.emphasis.node_intensity(node.index()));
	let hover = smooth_step(state.emphasis.hover_ring_intensity(node.index()));
	let radius = scale.node_radius * info.size * (1.0 + 0.25 * emphasis + 0.15 * hover);
	let alpha = mark_alpha(style, theme);
	let color = style.color().unwrap_or(info.base_color.as_str());

	ctx.set_global_alpha(alpha);

	let gradient = theme
		.node
		.use_gradient
		.then(|| {
			ctx.create_radial_gradient(x - radius * 0.3, y - radius * 0.3, 0.0, x, y, radius)
				.ok()
		})
		.flatten();

	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
	match gradient {
		Some(gradient) => {
			let base_color = Color::parse(color);
			let _ = gradient.add_color_stop(0.0, &base_color.lighten(0.4).to_css());
			let _ = gradient.add_color_stop(0.7, &base_color.to_css());
			let _ = gradient.add_color_stop(1.0, &base_color.darken(0.2).to_css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		None => ctx.set_fill_style_str(color),
	}
	ctx.fill();

	if theme.node.border_width > 0.0 {
		ctx.set_stroke_style_str(&theme.node.border_color.to_css());
		ctx.set_line_width(scale.screen_px(theme.node.border_width));
		ctx.stroke();
	}

	if style.has(Mark::Highlight) {
		stroke_ring(
			ctx,
			(x, y),
			radius + scale.ring_offset,
			&theme.marks.highlight_ring,
			scale.screen_px(theme.marks.highlight_ring_width),
		);
	}
	if style.has(Mark::SearchHit) {
		stroke_ring(
			ctx,
			(x, y),
			radius + scale.ring_offset * 3.0,
			&theme.marks.search_hit,
			scale.screen_px(theme.marks.highlight_ring_width),
		);
	}
	if hover > 0.01 {
		stroke_ring(
			ctx,
			(x, y),
			radius + scale.ring_offset * 2.0,
			&theme.node.label_color.with_alpha(0.8 * hover),
			scale.hover_ring_width,
		);
	}

	if alpha > 0.5 {
		ctx.set_global_alpha(alpha * (0.8 + 0.2 * emphasis));
		ctx.set_fill_style_str(&theme.node.label_color.to_css());
		ctx.set_font(&scale.label_font);
		let _ = ctx.fill_text(&info.label, x + radius + 4.0 / scale.k, y + 3.0 / scale.k);
	}

	ctx.set_global_alpha(1.0);
}

fn stroke_ring(
	ctx: &CanvasRenderingContext2d,
	(x, y): (f64, f64),
	radius: f64,
	color: &Color,
	width: f64,
) {
	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
	ctx.set_stroke_style_str(&color.to_css());
	ctx.set_line_width(width);
	ctx.stroke();
}

/// Draws `id (years)` next to the hovered node, in screen space.
fn draw_tooltip(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let Some(idx) = state.emphasis.hovered_node else {
		return;
	};
	let mut tooltip = None;
	state.graph.visit_nodes(|node| {
		if node.index() == idx {
			let (x, y) = (node.x() as f64, node.y() as f64);
			tooltip = Some((
				node.data.user_data.tooltip.clone(),
				x * scale.k + state.transform.x,
				y * scale.k + state.transform.y,
			));
		}
	});
	let Some((text, sx, sy)) = tooltip else {
		return;
	};

	ctx.set_font("12px sans-serif");
	let width = ctx
		.measure_text(&text)
		.map(|metrics| metrics.width())
		.unwrap_or(text.len() as f64 * 7.0);
	let (left, top) = (sx + 12.0, sy - 28.0);

	ctx.set_fill_style_str(&theme.background.color.with_alpha(0.9).to_css());
	ctx.fill_rect(left, top, width + 12.0, 20.0);
	ctx.set_fill_style_str(&theme.node.label_color.with_alpha(1.0).to_css());
	let _ = ctx.fill_text(&text, left + 6.0, top + 14.0);
}
