//! Simulated backend for development builds.
//!
//! Stands in for a live topology service: routes the two endpoint shapes,
//! injects synthetic latency, and fails a configurable fraction of requests
//! with a 500 so the gateway's fixture fallback actually gets exercised.
//! Routing and response synthesis are pure; only [`intercept`] touches the
//! browser clock and random source.

use gloo_timers::future::TimeoutFuture;
use serde::Serialize;

use super::fixtures;
use super::http::RawResponse;

/// Tunables for the simulated backend.
pub(super) struct MockConfig {
	/// Fraction of requests answered with a synthetic 500, in `[0, 1]`.
	pub failure_rate: f64,
	pub apps_latency_ms: u32,
	pub graph_latency_ms: u32,
}

impl Default for MockConfig {
	fn default() -> Self {
		Self {
			failure_rate: 0.1,
			apps_latency_ms: 300,
			graph_latency_ms: 400,
		}
	}
}

/// The endpoint shapes the simulated backend understands.
#[derive(Debug, PartialEq, Eq)]
pub(super) enum Route {
	Apps,
	Graph(String),
}

/// Matches a request path against the known endpoints.
pub(super) fn route(path: &str) -> Option<Route> {
	if path == "/api/apps" {
		return Some(Route::Apps);
	}
	let id = path.strip_prefix("/api/apps/")?.strip_suffix("/graph")?;
	if id.is_empty() || id.contains('/') {
		return None;
	}
	Some(Route::Graph(id.to_string()))
}

/// Synthesizes the response for a route given a failure roll in `[0, 1)`.
pub(super) fn respond(route: &Route, roll: f64, config: &MockConfig) -> RawResponse {
	if roll < config.failure_rate {
		return RawResponse {
			status: 500,
			body: error_body("simulated backend failure"),
		};
	}
	match route {
		Route::Apps => RawResponse {
			status: 200,
			body: data_body(&fixtures::apps()),
		},
		Route::Graph(id) => match fixtures::graph(id) {
			Some(graph) => RawResponse {
				status: 200,
				body: data_body(&graph),
			},
			None => RawResponse {
				status: 404,
				body: error_body("graph not found"),
			},
		},
	}
}

fn data_body<T: Serialize>(data: &T) -> String {
	serde_json::json!({ "data": data }).to_string()
}

fn error_body(message: &str) -> String {
	serde_json::json!({ "error": message }).to_string()
}

/// Intercepts a request if it matches a known endpoint.
///
/// Returns `None` for unrecognized paths, which then fall through to the
/// live transport untouched.
pub(super) async fn intercept(path: &str) -> Option<RawResponse> {
	let route = route(path)?;
	let config = MockConfig::default();
	let latency = match route {
		Route::Apps => config.apps_latency_ms,
		Route::Graph(_) => config.graph_latency_ms,
	};
	TimeoutFuture::new(latency).await;
	Some(respond(&route, js_sys::Math::random(), &config))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::{Application, Graph};

	fn passing() -> MockConfig {
		MockConfig {
			failure_rate: 0.1,
			..MockConfig::default()
		}
	}

	#[test]
	fn recognizes_the_two_endpoint_shapes() {
		assert_eq!(route("/api/apps"), Some(Route::Apps));
		assert_eq!(route("/api/apps/3/graph"), Some(Route::Graph("3".to_string())));
		assert_eq!(route("/api/apps//graph"), None);
		assert_eq!(route("/api/apps/1/2/graph"), None);
		assert_eq!(route("/api/health"), None);
		assert_eq!(route("/api/apps/1"), None);
	}

	#[test]
	fn rolls_below_the_failure_rate_become_synthetic_500s() {
		let raw = respond(&Route::Apps, 0.0, &passing());
		assert_eq!(raw.status, 500);
		assert!(raw.body.contains("simulated backend failure"));
	}

	#[test]
	fn surviving_app_requests_serve_the_fixture_list() {
		let raw = respond(&Route::Apps, 0.99, &passing());
		assert_eq!(raw.status, 200);
		let apps: Vec<Application> = super::super::decode(&raw.body).unwrap();
		assert_eq!(apps, fixtures::apps());
	}

	#[test]
	fn surviving_graph_requests_serve_the_fixture_topology() {
		let raw = respond(&Route::Graph("2".to_string()), 0.99, &passing());
		assert_eq!(raw.status, 200);
		let graph: Graph = super::super::decode(&raw.body).unwrap();
		assert_eq!(graph, fixtures::graph("2").unwrap());
	}

	#[test]
	fn unknown_graph_ids_get_a_404() {
		let raw = respond(&Route::Graph("nonexistent-id".to_string()), 0.99, &passing());
		assert_eq!(raw.status, 404);
		assert!(raw.body.contains("graph not found"));
	}

	#[test]
	fn failure_rate_zero_never_fails() {
		let config = MockConfig {
			failure_rate: 0.0,
			..MockConfig::default()
		};
		let raw = respond(&Route::Apps, 0.0, &config);
		assert_eq!(raw.status, 200);
	}
}
