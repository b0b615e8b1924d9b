//! The rendered copy of the fetched graph.
//!
//! [`RenderedGraph`] is the only mutable graph state in the app: the gateway
//! replaces it wholesale on every successful fetch, and user interaction
//! (node deletion, user-drawn edges, inspector edits, drag positions)
//! mutates it locally. Nothing here is ever written back to the gateway.
//!
//! Two counters let the canvas distinguish how to resynchronize its
//! simulation: `generation` bumps on wholesale replacement (rebuild and
//! re-fit the viewport), `revision` bumps on structural edits (rebuild in
//! place, keeping current layout positions).

use leptos::prelude::*;

use crate::model::{Graph, GraphNode, NodeData};

/// Reactive handle to the rendered graph document.
#[derive(Clone, Copy)]
pub struct RenderedGraph {
	graph: RwSignal<Graph>,
	generation: RwSignal<u64>,
	revision: RwSignal<u64>,
}

impl RenderedGraph {
	/// Creates an empty document.
	pub fn new() -> Self {
		Self {
			graph: RwSignal::new(Graph::default()),
			generation: RwSignal::new(0),
			revision: RwSignal::new(0),
		}
	}

	/// Replaces the whole document, discarding any local edits.
	pub fn replace(&self, graph: Graph) {
		self.graph.set(graph);
		self.generation.update(|g| *g += 1);
	}

	/// Empties the document (used while a new graph is in flight).
	pub fn clear(&self) {
		self.replace(Graph::default());
	}

	/// Bumped on every wholesale replacement.
	pub fn generation(&self) -> ReadSignal<u64> {
		self.generation.read_only()
	}

	/// Bumped on every structural edit (node removal, edge creation).
	pub fn revision(&self) -> ReadSignal<u64> {
		self.revision.read_only()
	}

	/// Reads the document reactively.
	pub fn with<R>(&self, f: impl FnOnce(&Graph) -> R) -> R {
		self.graph.with(f)
	}

	/// Reads the document without subscribing (per-frame canvas reads).
	pub fn with_untracked<R>(&self, f: impl FnOnce(&Graph) -> R) -> R {
		self.graph.with_untracked(f)
	}

	/// Resolves a node id to a copy of the node, reactively.
	pub fn node(&self, id: &str) -> Option<GraphNode> {
		self.graph.with(|g| g.node(id).cloned())
	}

	/// Removes a node and its incident edges. Structural.
	pub fn remove_node(&self, id: &str) -> bool {
		let mut removed = false;
		self.graph.update(|g| removed = g.remove_node(id));
		if removed {
			self.revision.update(|r| *r += 1);
		}
		removed
	}

	/// Adds a user-drawn edge between two existing nodes. Structural.
	pub fn add_edge(&self, source: &str, target: &str) -> bool {
		let mut added = None;
		self.graph.update(|g| added = g.add_edge(source, target));
		if added.is_some() {
			self.revision.update(|r| *r += 1);
		}
		added.is_some()
	}

	/// Applies an inspector edit to one node's payload. Non-structural.
	pub fn update_node_data(&self, id: &str, f: impl FnOnce(&mut NodeData)) {
		self.graph.update(|g| {
			if let Some(node) = g.nodes.iter_mut().find(|n| n.id == id) {
				f(&mut node.data);
			}
		});
	}

	/// Records a node's final position after a drag. Non-structural.
	pub fn set_position(&self, id: &str, x: f64, y: f64) {
		self.graph.update(|g| {
			if let Some(node) = g.nodes.iter_mut().find(|n| n.id == id) {
				node.position.x = x;
				node.position.y = y;
			}
		});
	}
}

impl Default for RenderedGraph {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::api::fixtures;
	use leptos::reactive::owner::Owner;

	fn with_doc(test: impl FnOnce(RenderedGraph)) {
		let owner = Owner::new();
		owner.set();
		let doc = RenderedGraph::new();
		doc.replace(fixtures::graph("1").unwrap());
		test(doc);
	}

	#[test]
	fn replace_bumps_generation_and_swaps_content() {
		with_doc(|doc| {
			assert_eq!(doc.generation().get_untracked(), 1);
			assert_eq!(doc.with_untracked(|g| g.nodes.len()), 3);

			doc.replace(fixtures::graph("2").unwrap());
			assert_eq!(doc.generation().get_untracked(), 2);
			assert_eq!(
				doc.node("node-1").unwrap().data.label,
				fixtures::graph("2").unwrap().nodes[0].data.label
			);
		});
	}

	#[test]
	fn remove_node_is_structural_and_keeps_integrity() {
		with_doc(|doc| {
			let revision = doc.revision().get_untracked();
			assert!(doc.remove_node("node-1"));
			assert_eq!(doc.revision().get_untracked(), revision + 1);
			doc.with_untracked(|g| {
				assert_eq!(g.nodes.len(), 2);
				assert!(g.edges.is_empty(), "both fixture edges hang off node-1");
			});

			// Removing something already gone changes nothing.
			assert!(!doc.remove_node("node-1"));
			assert_eq!(doc.revision().get_untracked(), revision + 1);
		});
	}

	#[test]
	fn add_edge_validates_endpoints() {
		with_doc(|doc| {
			let revision = doc.revision().get_untracked();
			assert!(doc.add_edge("node-2", "node-3"));
			assert_eq!(doc.revision().get_untracked(), revision + 1);
			assert!(!doc.add_edge("node-2", "ghost"));
			assert_eq!(doc.revision().get_untracked(), revision + 1);
		});
	}

	#[test]
	fn data_edits_do_not_bump_revision() {
		with_doc(|doc| {
			let revision = doc.revision().get_untracked();
			doc.update_node_data("node-1", |d| d.label = "Renamed".to_string());
			doc.set_position("node-1", 10.0, 20.0);
			assert_eq!(doc.revision().get_untracked(), revision);

			let node = doc.node("node-1").unwrap();
			assert_eq!(node.data.label, "Renamed");
			assert_eq!((node.position.x, node.position.y), (10.0, 20.0));
		});
	}
}
