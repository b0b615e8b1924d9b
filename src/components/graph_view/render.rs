//! Canvas rendering for the topology view.
//!
//! Drawing happens in passes for correct z-ordering: background and dot
//! grid (screen space), then edges, the pending user-drawn link, and nodes
//! with their emphasis rings and labels (world space), and finally the
//! vignette back in screen space.

use std::collections::HashMap;
use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::model::NodeStatus;
use super::scale::{ScaleConfig, ScaledValues};
use super::scene::{GraphScene, NodeHandle};
use super::theme::{Color, Theme};

/// Per-node drawing data resolved from the rendered document each frame.
#[derive(Clone, Debug)]
pub struct NodeVisual {
	pub label: String,
	pub status: NodeStatus,
}

/// Id-keyed drawing data for every document node.
pub type VisualIndex = HashMap<String, NodeVisual>;

fn smooth_step(t: f64) -> f64 {
	t * t * (3.0 - 2.0 * t)
}

/// Renders the complete scene to the canvas.
pub fn render(
	scene: &GraphScene,
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	theme: &Theme,
	visuals: &VisualIndex,
) {
	let scale = ScaledValues::new(config, scene.transform.k);

	draw_background(scene, ctx, theme);

	ctx.save();
	let _ = ctx.translate(scene.transform.x, scene.transform.y);
	let _ = ctx.scale(scene.transform.k, scene.transform.k);

	draw_edges(scene, ctx, config, &scale, theme);
	draw_pending_link(scene, ctx, &scale, theme);
	draw_nodes(scene, ctx, &scale, theme, visuals);

	ctx.restore();

	if theme.background.vignette > 0.0 {
		draw_vignette(scene, ctx, theme);
	}
}

fn draw_background(scene: &GraphScene, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	ctx.set_fill_style_str(&theme.background.color.to_css());
	ctx.fill_rect(0.0, 0.0, scene.width, scene.height);

	let grid = &theme.background.grid_color;
	if grid.a <= 0.0 {
		return;
	}

	// Dot grid in screen space, offset with the pan so it reads as a floor.
	let step = theme.background.grid_step;
	let (ox, oy) = (
		scene.transform.x.rem_euclid(step),
		scene.transform.y.rem_euclid(step),
	);
	ctx.set_fill_style_str(&grid.to_css());
	let mut y = oy - step;
	while y < scene.height + step {
		let mut x = ox - step;
		while x < scene.width + step {
			ctx.fill_rect(x, y, 1.5, 1.5);
			x += step;
		}
		y += step;
	}
}

fn draw_vignette(scene: &GraphScene, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let gradient = ctx
		.create_radial_gradient(
			scene.width / 2.0,
			scene.height / 2.0,
			scene.width.min(scene.height) * 0.3,
			scene.width / 2.0,
			scene.height / 2.0,
			scene.width.max(scene.height) * 0.7,
		)
		.unwrap();

	gradient.add_color_stop(0.0, "rgba(0, 0, 0, 0)").unwrap();
	gradient
		.add_color_stop(
			1.0,
			&format!("rgba(0, 0, 0, {})", theme.background.vignette),
		)
		.unwrap();

	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	ctx.fill_rect(0.0, 0.0, scene.width, scene.height);
}

fn draw_edges(
	scene: &GraphScene,
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let dash_offset = scale.dash_offset(scene.flow_time, config.flow_speed);

	ctx.set_line_width(scale.edge_line_width);
	let _ = ctx.set_line_dash(&js_sys::Array::of2(
		&JsValue::from_f64(scale.dash_pattern.0),
		&JsValue::from_f64(scale.dash_pattern.1),
	));
	ctx.set_line_dash_offset(dash_offset);

	scene.graph.visit_edges(|n1, n2, _| {
		draw_edge(ctx, scale, theme, n1, n2);
	});

	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_edge(
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
	n1: &force_graph::Node<NodeHandle>,
	n2: &force_graph::Node<NodeHandle>,
) {
	let (x1, y1, x2, y2) = (n1.x() as f64, n1.y() as f64, n2.x() as f64, n2.y() as f64);
	let (dx, dy) = (x2 - x1, y2 - y1);
	let dist = (dx * dx + dy * dy).sqrt();
	if dist < 0.001 {
		return;
	}
	let (ux, uy) = (dx / dist, dy / dist);

	ctx.set_stroke_style_str(&theme.edge.color.to_css());
	ctx.begin_path();
	ctx.move_to(x1 + ux * scale.node_radius, y1 + uy * scale.node_radius);
	ctx.line_to(
		x2 - ux * (scale.node_radius + scale.arrow_size),
		y2 - uy * (scale.node_radius + scale.arrow_size),
	);
	ctx.stroke();

	// Arrow head at the target end.
	let _ = ctx.set_line_dash(&js_sys::Array::new());
	ctx.set_fill_style_str(&theme.edge.color.to_css());
	let (tip_x, tip_y) = (x2 - ux * scale.node_radius, y2 - uy * scale.node_radius);
	let (back_x, back_y) = (tip_x - ux * scale.arrow_size, tip_y - uy * scale.arrow_size);
	let (px, py) = (-uy * scale.arrow_size * 0.5, ux * scale.arrow_size * 0.5);
	ctx.begin_path();
	ctx.move_to(tip_x, tip_y);
	ctx.line_to(back_x + px, back_y + py);
	ctx.line_to(back_x - px, back_y - py);
	ctx.close_path();
	ctx.fill();
	let _ = ctx.set_line_dash(&js_sys::Array::of2(
		&JsValue::from_f64(scale.dash_pattern.0),
		&JsValue::from_f64(scale.dash_pattern.1),
	));
}

fn draw_pending_link(
	scene: &GraphScene,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
) {
	if !scene.link.active {
		return;
	}
	let Some(source) = scene.link.source else {
		return;
	};
	let Some((sx, sy)) = scene.node_position(source) else {
		return;
	};
	let (cx, cy) = scene.link.cursor;

	ctx.set_stroke_style_str(&theme.edge.pending_color.to_css());
	ctx.set_line_width(scale.edge_line_width);
	let _ = ctx.set_line_dash(&js_sys::Array::of2(
		&JsValue::from_f64(scale.dash_pattern.0 * 0.5),
		&JsValue::from_f64(scale.dash_pattern.1 * 0.5),
	));
	ctx.begin_path();
	ctx.move_to(sx as f64, sy as f64);
	ctx.line_to(cx, cy);
	ctx.stroke();
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_nodes(
	scene: &GraphScene,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
	visuals: &VisualIndex,
) {
	scene.graph.visit_nodes(|node| {
		let idx = node.index();
		let (x, y) = (node.x() as f64, node.y() as f64);
		let visual = visuals.get(&node.data.user_data.id);
		let status = visual.map(|v| v.status).unwrap_or(NodeStatus::Unknown);
		let fill = theme.status.color(status);

		let ring_t = smooth_step(scene.focus.ring_intensity(idx));
		let glow_t = smooth_step(scene.focus.glow_intensity(idx));
		let radius = scale.node_radius * (1.0 + 0.1 * ring_t);

		draw_node_body(ctx, x, y, radius, fill, theme);

		// Hover glow: a single faint ring hugging the node.
		if glow_t > 0.01 {
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius + scale.ring_offset * 0.6, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(
				&theme.node.hover_color.with_alpha(theme.node.hover_color.a * glow_t).to_css(),
			);
			ctx.set_line_width(scale.ring_width);
			ctx.stroke();
		}

		// Selection: the double ring.
		if ring_t > 0.01 {
			let ring = theme.node.ring_color;
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius + scale.ring_offset, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(&ring.with_alpha(0.8 * ring_t).to_css());
			ctx.set_line_width(scale.ring_width);
			ctx.stroke();

			ctx.begin_path();
			let _ = ctx.arc(x, y, radius + scale.ring_offset * 2.5, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(&ring.with_alpha(0.3 * ring_t).to_css());
			ctx.set_line_width(scale.ring_width * 0.5);
			ctx.stroke();
		}

		if let Some(visual) = visuals.get(&node.data.user_data.id) {
			if !visual.label.is_empty() {
				ctx.set_fill_style_str(&theme.node.label_color.to_css());
				ctx.set_font(&scale.label_font);
				let _ = ctx.fill_text(&visual.label, x + radius + 4.0, y + 3.0);
			}
		}
	});
}

fn draw_node_body(
	ctx: &CanvasRenderingContext2d,
	x: f64,
	y: f64,
	radius: f64,
	fill: Color,
	theme: &Theme,
) {
	if theme.node.use_gradient {
		let gradient = ctx
			.create_radial_gradient(x - radius * 0.3, y - radius * 0.3, 0.0, x, y, radius)
			.unwrap();
		gradient
			.add_color_stop(0.0, &fill.lighten(0.4).to_css())
			.unwrap();
		gradient.add_color_stop(0.7, &fill.to_css()).unwrap();
		gradient
			.add_color_stop(1.0, &fill.darken(0.2).to_css())
			.unwrap();

		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		#[allow(deprecated)]
		ctx.set_fill_style(&gradient);
		ctx.fill();
	} else {
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&fill.to_css());
		ctx.fill();
	}
}
