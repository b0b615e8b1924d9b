//! Transport layer for the gateway.
//!
//! In development builds the simulated backend intercepts the two known
//! endpoint shapes before any real request is made; everything else (and all
//! release-build traffic) goes through the browser's `fetch`.

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use super::FetchError;

/// One HTTP-shaped exchange: a status code plus the raw body text.
pub(super) struct RawResponse {
	pub status: u16,
	pub body: String,
}

impl RawResponse {
	fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}

	/// Extracts the body of a successful response, or the status failure.
	pub(super) fn into_body(self) -> Result<String, FetchError> {
		if self.is_success() {
			Ok(self.body)
		} else {
			Err(FetchError::Api(format!("HTTP {}", self.status)))
		}
	}
}

/// Performs a GET against the app origin and returns the body text.
pub(super) async fn get(path: &str) -> Result<String, FetchError> {
	#[cfg(debug_assertions)]
	if let Some(raw) = super::mock::intercept(path).await {
		return raw.into_body();
	}

	live_get(path).await?.into_body()
}

async fn live_get(path: &str) -> Result<RawResponse, FetchError> {
	let window =
		web_sys::window().ok_or_else(|| FetchError::Transport("no window object".to_string()))?;
	let response = JsFuture::from(window.fetch_with_str(path))
		.await
		.map_err(js_failure)?;
	let response: Response = response
		.dyn_into()
		.map_err(|_| FetchError::Transport("fetch yielded a non-Response value".to_string()))?;
	let body = JsFuture::from(response.text().map_err(js_failure)?)
		.await
		.map_err(js_failure)?;

	Ok(RawResponse {
		status: response.status(),
		body: body.as_string().unwrap_or_default(),
	})
}

fn js_failure(value: JsValue) -> FetchError {
	FetchError::Transport(
		value
			.as_string()
			.unwrap_or_else(|| format!("{value:?}")),
	)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn success_statuses_yield_the_body() {
		let raw = RawResponse {
			status: 200,
			body: "{}".to_string(),
		};
		assert_eq!(raw.into_body().unwrap(), "{}");
	}

	#[test]
	fn failure_statuses_become_api_errors() {
		for status in [404, 500, 302] {
			let raw = RawResponse {
				status,
				body: String::new(),
			};
			assert_eq!(
				raw.into_body(),
				Err(FetchError::Api(format!("HTTP {status}")))
			);
		}
	}
}
