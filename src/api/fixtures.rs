//! Static fixture data served when the live backend is unavailable.
//!
//! The same collections back the simulated backend in development builds, so
//! the fallback path and the happy path agree on content. Application ids
//! `'1'..'5'` each map to a distinct three-service topology.

use crate::model::{Application, Graph, GraphEdge, GraphNode, NodeData, NodeStatus, Position};

fn app(id: &str, name: &str, icon: &str) -> Application {
	Application {
		id: id.to_string(),
		name: name.to_string(),
		icon: Some(icon.to_string()),
	}
}

fn service(
	id: &str,
	label: &str,
	status: NodeStatus,
	value: u8,
	description: &str,
	x: f64,
	y: f64,
) -> GraphNode {
	GraphNode {
		id: id.to_string(),
		kind: Some("default".to_string()),
		position: Position { x, y },
		data: NodeData {
			id: id.to_string(),
			label: label.to_string(),
			status,
			value,
			description: Some(description.to_string()),
		},
	}
}

fn link(id: &str, source: &str, target: &str) -> GraphEdge {
	GraphEdge {
		id: id.to_string(),
		source: source.to_string(),
		target: target.to_string(),
		kind: Some("smoothstep".to_string()),
	}
}

/// Fan-out from one entry service to two dependencies, the shape every
/// fixture topology shares.
fn topology(primary: GraphNode, left: GraphNode, right: GraphNode) -> Graph {
	let edges = vec![
		link("edge-1", &primary.id, &left.id),
		link("edge-2", &primary.id, &right.id),
	];
	Graph {
		nodes: vec![primary, left, right],
		edges,
	}
}

/// The selectable applications.
pub fn apps() -> Vec<Application> {
	vec![
		app("1", "billing-api", "\u{1F4A1}"),
		app("2", "auth-service", "\u{2699}\u{FE0F}"),
		app("3", "search-indexer", "\u{1F680}"),
		app("4", "media-pipeline", "\u{1F48E}"),
		app("5", "edge-gateway", "\u{2B50}"),
	]
}

/// The topology fixture for one application id, if one exists.
pub fn graph(app_id: &str) -> Option<Graph> {
	use NodeStatus::{Degraded, Down, Healthy};

	let graph = match app_id {
		"1" => topology(
			service(
				"node-1",
				"API Service",
				Healthy,
				50,
				"Primary API service handling requests",
				250.0,
				100.0,
			),
			service(
				"node-2",
				"Database",
				Healthy,
				75,
				"PostgreSQL primary instance",
				100.0,
				300.0,
			),
			service(
				"node-3",
				"Cache Service",
				Degraded,
				30,
				"Redis cache layer",
				400.0,
				300.0,
			),
		),
		"2" => topology(
			service(
				"node-1",
				"Auth Service",
				Healthy,
				60,
				"Token issuing and session checks",
				250.0,
				100.0,
			),
			service(
				"node-2",
				"Database",
				Healthy,
				80,
				"MySQL credential store",
				100.0,
				300.0,
			),
			service(
				"node-3",
				"Message Queue",
				Down,
				0,
				"RabbitMQ instance",
				400.0,
				300.0,
			),
		),
		"3" => topology(
			service(
				"node-1",
				"Indexer Service",
				Healthy,
				45,
				"Document ingestion frontend",
				250.0,
				100.0,
			),
			service(
				"node-2",
				"Database",
				Degraded,
				25,
				"MongoDB document store",
				100.0,
				300.0,
			),
			service(
				"node-3",
				"Worker",
				Healthy,
				70,
				"Background indexing worker",
				400.0,
				300.0,
			),
		),
		"4" => topology(
			service(
				"node-1",
				"Transcoder",
				Healthy,
				55,
				"Media transcoding frontend",
				250.0,
				100.0,
			),
			service(
				"node-2",
				"Database",
				Healthy,
				65,
				"PostgreSQL metadata store",
				100.0,
				300.0,
			),
			service(
				"node-3",
				"Job Runner",
				Healthy,
				40,
				"Background job processor",
				400.0,
				300.0,
			),
		),
		"5" => topology(
			service(
				"node-1",
				"Edge Proxy",
				Healthy,
				90,
				"Terminates inbound traffic",
				250.0,
				100.0,
			),
			service(
				"node-2",
				"Database",
				Healthy,
				85,
				"Distributed SQL cluster",
				100.0,
				300.0,
			),
			service(
				"node-3",
				"Rate Limiter",
				Degraded,
				35,
				"Per-tenant request throttling",
				400.0,
				300.0,
			),
		),
		_ => return None,
	};
	Some(graph)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn every_app_id_has_a_distinct_topology() {
		let apps = apps();
		assert_eq!(apps.len(), 5);

		let mut seen = Vec::new();
		for app in &apps {
			let graph = graph(&app.id).expect("fixture graph for listed app");
			assert_eq!(graph.nodes.len(), 3);
			assert_eq!(graph.edges.len(), 2);
			let labels: Vec<String> =
				graph.nodes.iter().map(|n| n.data.label.clone()).collect();
			assert!(!seen.contains(&labels), "topology for app {} repeats", app.id);
			seen.push(labels);
		}
	}

	#[test]
	fn fixture_edges_reference_existing_nodes() {
		for id in ["1", "2", "3", "4", "5"] {
			let graph = graph(id).unwrap();
			for edge in &graph.edges {
				assert!(graph.contains(&edge.source));
				assert!(graph.contains(&edge.target));
			}
		}
	}

	#[test]
	fn unknown_ids_have_no_fixture() {
		assert!(graph("nonexistent-id").is_none());
		assert!(graph("6").is_none());
		assert!(graph("").is_none());
	}
}
