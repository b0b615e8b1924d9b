//! Remote data gateway.
//!
//! Both operations try the live backend first and degrade to the static
//! fixtures on any recoverable failure (transport faults, non-success
//! statuses, explicit error payloads, undecodable bodies). The only terminal
//! error a consumer ever sees is [`FetchError::NotFound`], raised when a
//! graph is requested for an id that not even the fixtures know.

use log::warn;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::model::{Application, Graph};

pub mod fixtures;
mod http;
#[cfg(debug_assertions)]
mod mock;
mod remote;

pub use remote::{Remote, RemoteState};

/// Failure classes of the gateway.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FetchError {
	/// The request never produced an HTTP response.
	#[error("request failed: {0}")]
	Transport(String),
	/// The backend answered with a non-success status or an error payload.
	#[error("backend reported: {0}")]
	Api(String),
	/// The response body did not decode into the expected shape.
	#[error("malformed response: {0}")]
	Decode(String),
	/// Neither the backend nor the fixtures know the requested id. Terminal.
	#[error("no topology found for application `{0}`")]
	NotFound(String),
}

/// Wire envelope: either `{ "data": ... }` or `{ "error": "..." }`.
///
/// `Failure` is listed first so a payload carrying both fields is treated as
/// the failure it declares.
#[derive(Deserialize)]
#[serde(untagged)]
enum Payload<T> {
	Failure { error: String },
	Data { data: T },
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, FetchError> {
	match serde_json::from_str::<Payload<T>>(body) {
		Ok(Payload::Data { data }) => Ok(data),
		Ok(Payload::Failure { error }) => Err(FetchError::Api(error)),
		Err(err) => Err(FetchError::Decode(err.to_string())),
	}
}

async fn request<T: DeserializeOwned>(path: &str) -> Result<T, FetchError> {
	let body = http::get(path).await?;
	decode(&body)
}

/// Fetches the selectable application list.
///
/// Never fails: the fixture list stands in whenever the live call does not
/// work out.
pub async fn fetch_apps() -> Result<Vec<Application>, FetchError> {
	match request("/api/apps").await {
		Ok(apps) => Ok(apps),
		Err(err) => {
			warn!("topograph: app list request failed, serving fixtures: {err}");
			Ok(fixtures::apps())
		}
	}
}

/// Fetches the topology for one application.
///
/// Falls back to the fixture keyed by the same id; an id missing from the
/// fixtures too ends in [`FetchError::NotFound`].
pub async fn fetch_graph(app_id: &str) -> Result<Graph, FetchError> {
	match request(&format!("/api/apps/{app_id}/graph")).await {
		Ok(graph) => Ok(graph),
		Err(err) => {
			warn!("topograph: graph request for `{app_id}` failed, serving fixtures: {err}");
			fallback_graph(app_id)
		}
	}
}

fn fallback_graph(app_id: &str) -> Result<Graph, FetchError> {
	fixtures::graph(app_id).ok_or_else(|| FetchError::NotFound(app_id.to_string()))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn decode_accepts_data_envelopes() {
		let apps: Vec<Application> = decode(r#"{ "data": [] }"#).unwrap();
		assert!(apps.is_empty());
	}

	#[test]
	fn decode_treats_error_fields_as_failures() {
		let result: Result<Vec<Application>, _> = decode(r#"{ "error": "boom" }"#);
		assert_eq!(result, Err(FetchError::Api("boom".to_string())));
	}

	#[test]
	fn decode_flags_malformed_bodies() {
		let result: Result<Vec<Application>, _> = decode("<html>502</html>");
		assert!(matches!(result, Err(FetchError::Decode(_))));
	}

	#[test]
	fn fallback_serves_every_fixture_id() {
		for id in ["1", "2", "3", "4", "5"] {
			let graph = fallback_graph(id).expect("fixture graph");
			assert_eq!(graph, fixtures::graph(id).unwrap());
			assert_eq!(graph.nodes.len(), 3);
		}
	}

	#[test]
	fn fallback_for_unknown_ids_is_terminal_not_found() {
		assert_eq!(
			fallback_graph("nonexistent-id"),
			Err(FetchError::NotFound("nonexistent-id".to_string()))
		);
	}
}
