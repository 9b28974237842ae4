//! Canvas rendering for the evidence graph.
//!
//! Draws one published [`LayoutFrame`] per call. Passes run in z-order:
//! background, edges, node discs, the hover ring, then labels on top. The
//! renderer never touches live simulation state — only the snapshot it is
//! handed.

use std::collections::HashMap;
use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::theme::Theme;
use crate::engine::{Bounds, LayoutFrame, NodeView};

/// Above this many nodes, only the hovered node gets a label.
const LABEL_NODE_LIMIT: usize = 24;

/// Renders a layout frame to the canvas.
pub fn render(
	frame: &LayoutFrame,
	ctx: &CanvasRenderingContext2d,
	theme: &Theme,
	bounds: Bounds,
	hovered: Option<&str>,
) {
	draw_background(ctx, theme, bounds);
	draw_edges(frame, ctx, theme);
	draw_nodes(frame, ctx, theme, hovered);
	draw_labels(frame, ctx, theme, hovered);
	if theme.background.vignette > 0.0 {
		draw_vignette(ctx, theme, bounds);
	}
}

fn draw_background(ctx: &CanvasRenderingContext2d, theme: &Theme, bounds: Bounds) {
	let (cx, cy) = bounds.center();
	if theme.background.use_gradient {
		let Ok(gradient) = ctx.create_radial_gradient(
			cx,
			cy,
			0.0,
			cx,
			cy,
			bounds.width.max(bounds.height) * 0.8,
		) else {
			ctx.set_fill_style_str(&theme.background.color.to_css());
			ctx.fill_rect(0.0, 0.0, bounds.width, bounds.height);
			return;
		};
		let _ = gradient.add_color_stop(0.0, &theme.background.color_secondary.to_css());
		let _ = gradient.add_color_stop(1.0, &theme.background.color.to_css());

		#[allow(deprecated)]
		ctx.set_fill_style(&gradient);
	} else {
		ctx.set_fill_style_str(&theme.background.color.to_css());
	}

	ctx.fill_rect(0.0, 0.0, bounds.width, bounds.height);
}

fn draw_vignette(ctx: &CanvasRenderingContext2d, theme: &Theme, bounds: Bounds) {
	let (cx, cy) = bounds.center();
	let Ok(gradient) = ctx.create_radial_gradient(
		cx,
		cy,
		bounds.width.min(bounds.height) * 0.3,
		cx,
		cy,
		bounds.width.max(bounds.height) * 0.7,
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
	ctx.fill_rect(0.0, 0.0, bounds.width, bounds.height);
}

fn draw_edges(frame: &LayoutFrame, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let by_id: HashMap<&str, &NodeView> =
		frame.nodes.iter().map(|n| (n.id.as_str(), n)).collect();

	ctx.set_line_width(theme.edge.line_width);
	for edge in &frame.edges {
		let (Some(source), Some(target)) = (
			by_id.get(edge.source_id.as_str()),
			by_id.get(edge.target_id.as_str()),
		) else {
			continue;
		};

		ctx.set_stroke_style_str(&theme.edge.color.with_alpha(edge.opacity).to_css());
		ctx.begin_path();
		ctx.move_to(source.x, source.y);
		ctx.line_to(target.x, target.y);
		ctx.stroke();
	}
}

fn draw_nodes(
	frame: &LayoutFrame,
	ctx: &CanvasRenderingContext2d,
	theme: &Theme,
	hovered: Option<&str>,
) {
	for node in &frame.nodes {
		let color = theme.palette.get(node.color_index);

		if theme.node.use_gradient {
			if let Ok(gradient) = ctx.create_radial_gradient(
				node.x - node.radius * 0.3,
				node.y - node.radius * 0.3,
				node.radius * 0.1,
				node.x,
				node.y,
				node.radius,
			) {
				let _ = gradient.add_color_stop(0.0, &color.lighten(0.25).to_css());
				let _ = gradient.add_color_stop(1.0, &color.darken(0.1).to_css());
				#[allow(deprecated)]
				ctx.set_fill_style(&gradient);
			} else {
				ctx.set_fill_style_str(&color.to_css());
			}
		} else {
			ctx.set_fill_style_str(&color.to_css());
		}

		ctx.begin_path();
		let _ = ctx.arc(node.x, node.y, node.radius, 0.0, PI * 2.0);
		ctx.fill();

		if hovered == Some(node.id.as_str()) {
			ctx.set_stroke_style_str(&theme.node.hover_ring_color.to_css());
			ctx.set_line_width(theme.node.hover_ring_width);
			ctx.begin_path();
			let _ = ctx.arc(
				node.x,
				node.y,
				node.radius + theme.node.hover_ring_offset,
				0.0,
				PI * 2.0,
			);
			ctx.stroke();
		}
	}
}

fn draw_labels(
	frame: &LayoutFrame,
	ctx: &CanvasRenderingContext2d,
	theme: &Theme,
	hovered: Option<&str>,
) {
	let label_all = frame.nodes.len() <= LABEL_NODE_LIMIT;
	ctx.set_font(&format!("{}px sans-serif", theme.label.size));
	ctx.set_text_align("center");

	for node in &frame.nodes {
		let is_hovered = hovered == Some(node.id.as_str());
		if !label_all && !is_hovered {
			continue;
		}
		let color = if is_hovered {
			theme.label.color.with_alpha(1.0)
		} else {
			theme.label.color
		};
		ctx.set_fill_style_str(&color.to_css());
		let _ = ctx.fill_text(
			&node.title,
			node.x,
			node.y + node.radius + theme.label.offset + theme.label.size,
		);
	}
}
