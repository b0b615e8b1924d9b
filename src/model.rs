//! Domain model shared across the gateway, store, and views.
//!
//! These are the wire shapes served by the backend (and mirrored by the
//! fixtures), plus the pure graph operations the graph view relies on to
//! keep its rendered copy consistent.

use serde::{Deserialize, Serialize};

/// A selectable application whose topology can be visualized.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Application {
	/// Unique identifier, used to key graph fetches.
	pub id: String,
	/// Display name shown in the selector and top bar.
	pub name: String,
	/// Optional emoji/icon shown next to the name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub icon: Option<String>,
}

/// Health of a service node or resource.
///
/// The wire carries lowercase strings; anything unrecognized maps to
/// [`NodeStatus::Unknown`] so a misbehaving backend degrades the badge
/// rendering instead of failing the whole decode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
	Healthy,
	Degraded,
	Down,
	#[serde(other)]
	Unknown,
}

impl NodeStatus {
	/// Human-readable label for badges and read-only fields.
	pub fn label(self) -> &'static str {
		match self {
			NodeStatus::Healthy => "Healthy",
			NodeStatus::Degraded => "Degraded",
			NodeStatus::Down => "Down",
			NodeStatus::Unknown => "Unknown",
		}
	}
}

/// Editable payload attached to each graph node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
	/// Mirrors the owning node's id.
	pub id: String,
	/// Display label, editable in the inspector.
	pub label: String,
	/// Current health, read-only in the inspector.
	pub status: NodeStatus,
	/// Tunable metric in `[0, 100]`.
	pub value: u8,
	/// Optional free-form description.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
}

/// Layout-seed coordinates for a node.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
	pub x: f64,
	pub y: f64,
}

/// A service node in an application topology.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
	/// Unique within its graph; edges reference this.
	pub id: String,
	/// Renderer node kind, carried through from the wire.
	#[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
	pub kind: Option<String>,
	/// Seed position handed to the layout engine.
	pub position: Position,
	/// Editable node payload.
	pub data: NodeData,
}

/// A directed dependency between two nodes in the same graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
	/// Unique edge identifier.
	pub id: String,
	/// Source node id.
	pub source: String,
	/// Target node id.
	pub target: String,
	/// Renderer edge kind, carried through from the wire.
	#[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
	pub kind: Option<String>,
}

/// One application's dependency topology, replaced wholesale on re-fetch.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
	pub nodes: Vec<GraphNode>,
	pub edges: Vec<GraphEdge>,
}

impl Graph {
	/// Looks up a node by id.
	pub fn node(&self, id: &str) -> Option<&GraphNode> {
		self.nodes.iter().find(|n| n.id == id)
	}

	/// Whether a node with the given id exists.
	pub fn contains(&self, id: &str) -> bool {
		self.node(id).is_some()
	}

	/// Removes a node and every edge whose source or target references it.
	///
	/// Returns `false` when no such node exists (the edge set is left
	/// untouched in that case).
	pub fn remove_node(&mut self, id: &str) -> bool {
		let before = self.nodes.len();
		self.nodes.retain(|n| n.id != id);
		if self.nodes.len() == before {
			return false;
		}
		self.edges.retain(|e| e.source != id && e.target != id);
		true
	}

	/// Adds a user-drawn edge between two existing nodes.
	///
	/// Endpoint existence is the only validation; duplicates and self-loops
	/// are accepted as drawn. Returns the freshly assigned edge id, or `None`
	/// when either endpoint is missing.
	pub fn add_edge(&mut self, source: &str, target: &str) -> Option<String> {
		if !self.contains(source) || !self.contains(target) {
			return None;
		}
		let mut n = self.edges.len() + 1;
		let mut id = format!("edge-{n}");
		while self.edges.iter().any(|e| e.id == id) {
			n += 1;
			id = format!("edge-{n}");
		}
		self.edges.push(GraphEdge {
			id: id.clone(),
			source: source.to_string(),
			target: target.to_string(),
			kind: None,
		});
		Some(id)
	}
}

/// Clamps a raw numeric value onto the node-value range `[0, 100]`.
///
/// Infinities coerce to the nearest bound; NaN collapses to 0 rather than
/// poisoning the slider.
pub fn clamp_value(raw: f64) -> u8 {
	if raw.is_nan() {
		return 0;
	}
	raw.clamp(0.0, 100.0).round() as u8
}

/// Parses free-text numeric input into the node-value range.
///
/// Unparsable text coerces to 0; out-of-range numbers coerce to the nearest
/// bound.
pub fn parse_value(text: &str) -> u8 {
	text.trim().parse::<f64>().map(clamp_value).unwrap_or(0)
}

/// A simulated infrastructure resource shown in the card view.
///
/// Fixture-sourced only; the dials on each card are ephemeral view state and
/// never round-trip through this struct.
#[derive(Clone, Debug, PartialEq)]
pub struct Resource {
	pub id: String,
	pub name: String,
	pub kind: ResourceKind,
	pub icon: String,
	pub status: NodeStatus,
	/// Display-only price tag, e.g. `"$0.03/HR"`.
	pub cost: String,
	pub cpu: f64,
	pub memory: f64,
	pub disk: f64,
	pub region: String,
}

/// Kind of simulated resource backing a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResourceKind {
	Postgres,
	Redis,
	Mongodb,
	App,
}

#[cfg(test)]
mod tests {
	use super::*;

	fn node(id: &str) -> GraphNode {
		GraphNode {
			id: id.to_string(),
			kind: None,
			position: Position { x: 0.0, y: 0.0 },
			data: NodeData {
				id: id.to_string(),
				label: id.to_uppercase(),
				status: NodeStatus::Healthy,
				value: 50,
				description: None,
			},
		}
	}

	fn edge(id: &str, source: &str, target: &str) -> GraphEdge {
		GraphEdge {
			id: id.to_string(),
			source: source.to_string(),
			target: target.to_string(),
			kind: None,
		}
	}

	fn triangle() -> Graph {
		Graph {
			nodes: vec![node("a"), node("b"), node("c")],
			edges: vec![edge("e1", "a", "b"), edge("e2", "a", "c"), edge("e3", "b", "c")],
		}
	}

	#[test]
	fn remove_node_drops_incident_edges() {
		let mut graph = triangle();
		assert!(graph.remove_node("a"));

		let ids: Vec<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids, ["b", "c"]);
		let edges: Vec<&str> = graph.edges.iter().map(|e| e.id.as_str()).collect();
		assert_eq!(edges, ["e3"]);
	}

	#[test]
	fn remove_missing_node_is_a_no_op() {
		let mut graph = triangle();
		assert!(!graph.remove_node("zz"));
		assert_eq!(graph.nodes.len(), 3);
		assert_eq!(graph.edges.len(), 3);
	}

	#[test]
	fn add_edge_requires_both_endpoints() {
		let mut graph = triangle();
		assert!(graph.add_edge("a", "missing").is_none());
		assert!(graph.add_edge("missing", "a").is_none());
		assert_eq!(graph.edges.len(), 3);

		let id = graph.add_edge("c", "a").expect("both endpoints exist");
		assert_eq!(graph.edges.len(), 4);
		assert!(graph.edges.iter().any(|e| e.id == id && e.source == "c" && e.target == "a"));
	}

	#[test]
	fn add_edge_ids_stay_unique() {
		let mut graph = triangle();
		// Occupy the first candidate id to force the collision path.
		graph.edges.push(edge("edge-5", "a", "b"));
		let id = graph.add_edge("b", "a").unwrap();
		assert_eq!(id, "edge-6");
		let mut ids: Vec<&str> = graph.edges.iter().map(|e| e.id.as_str()).collect();
		ids.sort_unstable();
		ids.dedup();
		assert_eq!(ids.len(), graph.edges.len());
	}

	#[test]
	fn clamp_value_covers_the_whole_range() {
		assert_eq!(clamp_value(-5.0), 0);
		assert_eq!(clamp_value(500.0), 100);
		assert_eq!(clamp_value(f64::NAN), 0);
		assert_eq!(clamp_value(f64::INFINITY), 100);
		assert_eq!(clamp_value(f64::NEG_INFINITY), 0);
		assert_eq!(clamp_value(42.4), 42);
		for n in [-1000.0, -0.1, 0.0, 33.3, 100.0, 1e9] {
			assert!(clamp_value(n) <= 100);
		}
	}

	#[test]
	fn parse_value_defaults_unparsable_input_to_zero() {
		assert_eq!(parse_value("70"), 70);
		assert_eq!(parse_value("  12.6 "), 13);
		assert_eq!(parse_value("-3"), 0);
		assert_eq!(parse_value("101"), 100);
		assert_eq!(parse_value("banana"), 0);
		assert_eq!(parse_value(""), 0);
	}

	#[test]
	fn unknown_status_strings_deserialize_to_unknown() {
		let status: NodeStatus = serde_json::from_str("\"healthy\"").unwrap();
		assert_eq!(status, NodeStatus::Healthy);
		let status: NodeStatus = serde_json::from_str("\"on-fire\"").unwrap();
		assert_eq!(status, NodeStatus::Unknown);
	}

	#[test]
	fn graph_round_trips_through_the_wire_shape() {
		let json = r#"{
			"nodes": [{
				"id": "node-1",
				"type": "default",
				"position": { "x": 250.0, "y": 100.0 },
				"data": { "id": "node-1", "label": "API", "status": "healthy", "value": 50 }
			}],
			"edges": [{ "id": "edge-1", "source": "node-1", "target": "node-1", "type": "smoothstep" }]
		}"#;
		let graph: Graph = serde_json::from_str(json).unwrap();
		assert_eq!(graph.nodes[0].kind.as_deref(), Some("default"));
		assert_eq!(graph.nodes[0].data.value, 50);
		assert_eq!(graph.edges[0].kind.as_deref(), Some("smoothstep"));

		let back = serde_json::to_string(&graph).unwrap();
		let again: Graph = serde_json::from_str(&back).unwrap();
		assert_eq!(graph, again);
	}
}
