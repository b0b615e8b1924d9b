//! Simulation state and interaction tracking for the topology canvas.
//!
//! Wraps the `force_graph` physics simulation with the document-id index,
//! view transforms for pan/zoom, in-progress drag/pan/link interactions, and
//! smoothly animated selection/hover emphasis.

use std::collections::HashMap;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use crate::model::Graph;
use super::scale::{ScaleConfig, ScaledValues};

/// Frames to wait after a wholesale replacement before fitting the viewport,
/// so the force layout has settled a little first.
const FIT_DELAY_FRAMES: u32 = 18;

/// Viewport fraction left as padding on each side when fitting.
const FIT_PADDING: f64 = 0.2;

/// Per-node payload in the simulation: the document node it stands for.
#[derive(Clone, Debug)]
pub struct NodeHandle {
	pub id: String,
}

/// Pan and zoom transform applied to the entire canvas.
#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	/// Zoom factor (1.0 = 100%, clamped to 0.1..10.0).
	pub k: f64,
}

/// Tracks an in-progress node drag operation.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	/// Whether the pointer actually moved; a motionless press on the
	/// background counts as a click and clears the selection.
	pub moved: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Tracks a user-drawn connection being dragged out from a node.
#[derive(Clone, Debug, Default)]
pub struct LinkState {
	pub active: bool,
	pub source: Option<DefaultNodeIdx>,
	/// Current pointer position in graph coordinates.
	pub cursor: (f64, f64),
}

impl LinkState {
	pub fn begin(&mut self, source: DefaultNodeIdx, gx: f64, gy: f64) {
		self.active = true;
		self.source = Some(source);
		self.cursor = (gx, gy);
	}

	pub fn clear(&mut self) {
		self.active = false;
		self.source = None;
	}
}

// Smoothing factors for emphasis transitions. At 60fps, fade-in reaches
// ~95% in roughly 150ms, fade-out in roughly 250ms.
const FADE_IN_SPEED: f64 = 6.0;
const FADE_OUT_SPEED: f64 = 4.0;

/// Smoothly animated selection and hover emphasis.
///
/// Each node carries its own intensity in `[0, 1]` that eases toward 1 while
/// the node is selected (ring) or hovered (glow) and decays back afterward,
/// using exponential smoothing for a natural ease-out.
#[derive(Clone, Debug, Default)]
pub struct FocusState {
	pub selected: Option<DefaultNodeIdx>,
	pub hovered: Option<DefaultNodeIdx>,
	ring: HashMap<DefaultNodeIdx, f64>,
	glow: HashMap<DefaultNodeIdx, f64>,
}

fn animate(map: &mut HashMap<DefaultNodeIdx, f64>, active: Option<DefaultNodeIdx>, dt: f64) {
	let fade_in = 1.0 - (-FADE_IN_SPEED * dt).exp();
	let fade_out = (-FADE_OUT_SPEED * dt).exp();

	if let Some(idx) = active {
		let intensity = map.entry(idx).or_insert(0.0);
		*intensity += (1.0 - *intensity) * fade_in;
	}
	map.retain(|idx, intensity| {
		if active == Some(*idx) {
			true
		} else {
			*intensity *= fade_out;
			*intensity > 0.005
		}
	});
}

impl FocusState {
	pub fn set_selected(&mut self, node: Option<DefaultNodeIdx>) {
		self.selected = node;
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		self.hovered = node;
	}

	/// Advances all emphasis intensities toward their targets.
	pub fn tick(&mut self, dt: f64) {
		animate(&mut self.ring, self.selected, dt);
		animate(&mut self.glow, self.hovered, dt);
	}

	/// Selection ring intensity for a node (already smoothed).
	pub fn ring_intensity(&self, idx: DefaultNodeIdx) -> f64 {
		self.ring.get(&idx).copied().unwrap_or(0.0)
	}

	/// Hover glow intensity for a node (already smoothed).
	pub fn glow_intensity(&self, idx: DefaultNodeIdx) -> f64 {
		self.glow.get(&idx).copied().unwrap_or(0.0)
	}
}

/// Core canvas state: physics simulation plus interaction tracking.
///
/// Rebuilt from the rendered document on every wholesale replacement (fresh
/// seed positions, viewport re-fit scheduled) and on every structural edit
/// (current layout positions carried over, no re-fit). Mutated each frame by
/// the animation loop.
pub struct GraphScene {
	pub graph: ForceGraph<NodeHandle, ()>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub link: LinkState,
	pub focus: FocusState,
	pub width: f64,
	pub height: f64,
	pub flow_time: f64,
	fit_countdown: Option<u32>,
	index: HashMap<String, DefaultNodeIdx>,
}

impl GraphScene {
	/// Builds a scene from a freshly fetched document, seeding nodes at
	/// their document positions and scheduling a one-shot viewport fit.
	pub fn new(doc: &Graph, width: f64, height: f64) -> Self {
		let mut scene = Self::build(doc, width, height, None);
		scene.fit_countdown = Some(FIT_DELAY_FRAMES);
		scene
	}

	/// Rebuilds after a structural edit, carrying over the viewport and the
	/// current layout positions of surviving nodes.
	pub fn rebuild(doc: &Graph, prior: &GraphScene) -> Self {
		let mut carried = HashMap::new();
		prior.graph.visit_nodes(|node| {
			carried.insert(
				node.data.user_data.id.clone(),
				(node.x(), node.y(), node.data.is_anchor),
			);
		});
		let mut scene = Self::build(doc, prior.width, prior.height, Some(&carried));
		scene.transform = prior.transform.clone();
		scene.focus = prior.focus.clone();
		scene.flow_time = prior.flow_time;
		scene
	}

	fn build(
		doc: &Graph,
		width: f64,
		height: f64,
		carried: Option<&HashMap<String, (f32, f32, bool)>>,
	) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});
		let mut index = HashMap::new();

		for node in &doc.nodes {
			let seed = carried.and_then(|c| c.get(&node.id).copied());
			let (x, y, is_anchor) = seed.unwrap_or((
				node.position.x as f32,
				node.position.y as f32,
				false,
			));
			let idx = graph.add_node(NodeData {
				x,
				y,
				mass: 10.0,
				is_anchor,
				user_data: NodeHandle {
					id: node.id.clone(),
				},
			});
			index.insert(node.id.clone(), idx);
		}

		for edge in &doc.edges {
			if let (Some(&src), Some(&tgt)) = (index.get(&edge.source), index.get(&edge.target)) {
				graph.add_edge(src, tgt, EdgeData::default());
			}
		}

		Self {
			graph,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			link: LinkState::default(),
			focus: FocusState::default(),
			width,
			height,
			flow_time: 0.0,
			fit_countdown: None,
			index,
		}
	}

	/// The simulation index for a document node id.
	pub fn idx_of(&self, id: &str) -> Option<DefaultNodeIdx> {
		self.index.get(id).copied()
	}

	/// The document node id for a simulation index.
	pub fn id_of(&self, idx: DefaultNodeIdx) -> Option<String> {
		self.index
			.iter()
			.find_map(|(id, &i)| (i == idx).then(|| id.clone()))
	}

	/// Converts screen coordinates into graph coordinates.
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// The node under a screen position, if any.
	pub fn node_at_position(
		&self,
		sx: f64,
		sy: f64,
		config: &ScaleConfig,
	) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let scale = ScaledValues::new(config, self.transform.k);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			if (dx * dx + dy * dy).sqrt() < scale.hit_radius {
				found = Some(node.index());
			}
		});
		found
	}

	/// Current simulation position of a node.
	pub fn node_position(&self, idx: DefaultNodeIdx) -> Option<(f32, f32)> {
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				found = Some((node.x(), node.y()));
			}
		});
		found
	}

	/// Moves a node, optionally anchoring it against the simulation.
	pub fn move_node(&mut self, idx: DefaultNodeIdx, x: f32, y: f32, anchor: bool) {
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				node.data.x = x;
				node.data.y = y;
				if anchor {
					node.data.is_anchor = true;
				}
			}
		});
	}

	/// Projects the store's node selection onto the emphasis state.
	pub fn set_selected_id(&mut self, id: Option<&str>) {
		let idx = id.and_then(|id| self.idx_of(id));
		self.focus.set_selected(idx);
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		self.focus.set_hover(node);
	}

	/// Advances physics, emphasis fades, and the pending viewport fit.
	pub fn tick(&mut self, dt: f64) {
		self.graph.update(dt as f32);
		self.flow_time += dt;
		self.focus.tick(dt);

		if let Some(frames) = self.fit_countdown {
			if frames == 0 {
				self.fit_countdown = None;
				self.fit_to_view(FIT_PADDING);
			} else {
				self.fit_countdown = Some(frames - 1);
			}
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	/// Fits every node into the visible viewport with fractional padding.
	pub fn fit_to_view(&mut self, padding: f64) {
		let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
		let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
		self.graph.visit_nodes(|node| {
			min_x = min_x.min(node.x() as f64);
			min_y = min_y.min(node.y() as f64);
			max_x = max_x.max(node.x() as f64);
			max_y = max_y.max(node.y() as f64);
		});

		if !min_x.is_finite() {
			self.transform = ViewTransform {
				x: self.width / 2.0,
				y: self.height / 2.0,
				k: 1.0,
			};
			return;
		}

		let (span_x, span_y) = (max_x - min_x, max_y - min_y);
		let usable_w = self.width * (1.0 - 2.0 * padding);
		let usable_h = self.height * (1.0 - 2.0 * padding);
		let k = if span_x < 1.0 && span_y < 1.0 {
			1.0
		} else {
			(usable_w / span_x.max(1.0)).min(usable_h / span_y.max(1.0))
		};
		let k = k.clamp(0.1, 10.0);

		let (cx, cy) = ((min_x + max_x) / 2.0, (min_y + max_y) / 2.0);
		self.transform = ViewTransform {
			x: self.width / 2.0 - cx * k,
			y: self.height / 2.0 - cy * k,
			k,
		};
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::api::fixtures;

	fn scene() -> GraphScene {
		GraphScene::new(&fixtures::graph("1").unwrap(), 800.0, 600.0)
	}

	#[test]
	fn build_indexes_every_document_node() {
		let scene = scene();
		for id in ["node-1", "node-2", "node-3"] {
			let idx = scene.idx_of(id).expect("indexed");
			assert_eq!(scene.id_of(idx).as_deref(), Some(id));
		}
		assert!(scene.idx_of("ghost").is_none());
	}

	#[test]
	fn screen_to_graph_inverts_the_transform() {
		let mut scene = scene();
		scene.transform = ViewTransform {
			x: 120.0,
			y: -40.0,
			k: 2.0,
		};
		let (gx, gy) = scene.screen_to_graph(120.0 + 2.0 * 50.0, -40.0 + 2.0 * 30.0);
		assert!((gx - 50.0).abs() < 1e-9);
		assert!((gy - 30.0).abs() < 1e-9);
	}

	#[test]
	fn fit_to_view_centers_the_node_bounds() {
		let mut scene = scene();
		scene.fit_to_view(0.2);

		let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
		let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);
		scene.graph.visit_nodes(|node| {
			min_x = min_x.min(node.x() as f64);
			max_x = max_x.max(node.x() as f64);
			min_y = min_y.min(node.y() as f64);
			max_y = max_y.max(node.y() as f64);
		});
		let (cx, cy) = ((min_x + max_x) / 2.0, (min_y + max_y) / 2.0);

		// The bounds center must land on the canvas center.
		let sx = scene.transform.x + cx * scene.transform.k;
		let sy = scene.transform.y + cy * scene.transform.k;
		assert!((sx - 400.0).abs() < 1e-6);
		assert!((sy - 300.0).abs() < 1e-6);
		assert!(scene.transform.k >= 0.1 && scene.transform.k <= 10.0);
	}

	#[test]
	fn fit_to_view_handles_an_empty_scene() {
		let mut scene = GraphScene::new(&Graph::default(), 640.0, 480.0);
		scene.fit_to_view(0.2);
		assert_eq!(scene.transform.k, 1.0);
		assert_eq!(scene.transform.x, 320.0);
	}

	#[test]
	fn rebuild_preserves_layout_and_viewport() {
		let mut first = scene();
		let idx = first.idx_of("node-2").unwrap();
		first.move_node(idx, -77.0, 33.0, true);
		first.transform = ViewTransform {
			x: 5.0,
			y: 6.0,
			k: 1.5,
		};

		let mut doc = fixtures::graph("1").unwrap();
		doc.remove_node("node-3");
		let second = GraphScene::rebuild(&doc, &first);

		assert!(second.idx_of("node-3").is_none());
		let idx2 = second.idx_of("node-2").unwrap();
		assert_eq!(second.node_position(idx2), Some((-77.0, 33.0)));
		assert_eq!(second.transform.x, 5.0);
		assert_eq!(second.transform.k, 1.5);
	}

	#[test]
	fn focus_intensity_eases_in_and_out() {
		let mut focus = FocusState::default();
		let idx = scene().idx_of("node-1").unwrap();

		focus.set_selected(Some(idx));
		for _ in 0..60 {
			focus.tick(0.016);
		}
		assert!(focus.ring_intensity(idx) > 0.9);

		focus.set_selected(None);
		for _ in 0..120 {
			focus.tick(0.016);
		}
		assert!(focus.ring_intensity(idx) < 0.05);
	}

	#[test]
	fn selection_projection_tolerates_stale_ids() {
		let mut scene = scene();
		scene.set_selected_id(Some("node-2"));
		assert_eq!(scene.focus.selected, scene.idx_of("node-2"));

		// A selection left over from a previous graph resolves to nothing.
		scene.set_selected_id(Some("gone"));
		assert_eq!(scene.focus.selected, None);
	}
}
