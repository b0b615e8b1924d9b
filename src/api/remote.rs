//! Keyed tri-state holder for in-flight gateway calls.
//!
//! Consumers observe exactly one of loading/failed/ready per request, and a
//! request that is superseded before it resolves is discarded instead of
//! clobbering newer state: [`Remote::settle`] only applies a completion
//! whose key still matches the most recent [`Remote::begin`].

use std::future::Future;

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::debug;

use super::FetchError;

/// Lifecycle of one remote value.
#[derive(Clone, Debug, PartialEq)]
pub enum RemoteState<T> {
	/// Nothing requested yet.
	Idle,
	/// A request is in flight.
	Loading,
	/// The most recent request resolved with data.
	Ready(T),
	/// The most recent request failed terminally.
	Failed(FetchError),
}

impl<T> RemoteState<T> {
	/// Whether a request is currently in flight.
	pub fn is_loading(&self) -> bool {
		matches!(self, RemoteState::Loading)
	}
}

/// A reactive slot for one remote value, keyed by request identity.
pub struct Remote<T: Send + Sync + 'static> {
	state: RwSignal<RemoteState<T>>,
	key: RwSignal<Option<String>>,
}

impl<T: Send + Sync + 'static> Clone for Remote<T> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<T: Send + Sync + 'static> Copy for Remote<T> {}

impl<T: Clone + Send + Sync + 'static> Remote<T> {
	/// Creates an idle slot.
	pub fn new() -> Self {
		Self {
			state: RwSignal::new(RemoteState::Idle),
			key: RwSignal::new(None),
		}
	}

	/// Current state; reading inside a reactive scope subscribes to changes.
	pub fn state(&self) -> RemoteState<T> {
		self.state.get()
	}

	/// The key of the most recent request, if any.
	pub fn key(&self) -> Option<String> {
		self.key.get_untracked()
	}

	/// Marks a new request as the one whose completion counts.
	pub fn begin(&self, key: &str) {
		self.key.set(Some(key.to_string()));
		self.state.set(RemoteState::Loading);
	}

	/// Applies a completion, unless a newer request has superseded it.
	pub fn settle(&self, key: &str, result: Result<T, FetchError>) {
		if self.key.get_untracked().as_deref() != Some(key) {
			debug!("topograph: discarding stale response for `{key}`");
			return;
		}
		self.state.set(match result {
			Ok(value) => RemoteState::Ready(value),
			Err(err) => RemoteState::Failed(err),
		});
	}

	/// Clears the slot back to idle, detaching any in-flight request.
	pub fn reset(&self) {
		self.key.set(None);
		self.state.set(RemoteState::Idle);
	}

	/// Begins a request and settles it when the future resolves.
	pub fn load<F, Fut>(&self, key: String, fetch: F)
	where
		F: FnOnce(String) -> Fut + 'static,
		Fut: Future<Output = Result<T, FetchError>> + 'static,
	{
		self.begin(&key);
		let remote = *self;
		spawn_local(async move {
			let result = fetch(key.clone()).await;
			remote.settle(&key, result);
		});
	}
}

impl<T: Clone + Send + Sync + 'static> Default for Remote<T> {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use leptos::reactive::owner::Owner;

	fn with_owner(test: impl FnOnce()) {
		let owner = Owner::new();
		owner.set();
		test();
	}

	#[test]
	fn begin_then_settle_reaches_ready() {
		with_owner(|| {
			let remote = Remote::<u32>::new();
			assert_eq!(remote.state(), RemoteState::Idle);

			remote.begin("1");
			assert!(remote.state().is_loading());

			remote.settle("1", Ok(7));
			assert_eq!(remote.state(), RemoteState::Ready(7));
		});
	}

	#[test]
	fn failures_settle_as_failed() {
		with_owner(|| {
			let remote = Remote::<u32>::new();
			remote.begin("1");
			remote.settle("1", Err(FetchError::NotFound("1".to_string())));
			assert_eq!(
				remote.state(),
				RemoteState::Failed(FetchError::NotFound("1".to_string()))
			);
		});
	}

	#[test]
	fn superseded_responses_are_discarded() {
		with_owner(|| {
			let remote = Remote::<&'static str>::new();

			// Request app 1, then app 2 before 1 resolves.
			remote.begin("1");
			remote.begin("2");

			// App 1's response arrives late: it must not win.
			remote.settle("1", Ok("graph of 1"));
			assert!(remote.state().is_loading());

			remote.settle("2", Ok("graph of 2"));
			assert_eq!(remote.state(), RemoteState::Ready("graph of 2"));

			// And a second stale arrival changes nothing.
			remote.settle("1", Ok("graph of 1 again"));
			assert_eq!(remote.state(), RemoteState::Ready("graph of 2"));
		});
	}

	#[test]
	fn reset_detaches_in_flight_requests() {
		with_owner(|| {
			let remote = Remote::<u32>::new();
			remote.begin("1");
			remote.reset();
			assert_eq!(remote.state(), RemoteState::Idle);
			remote.settle("1", Ok(9));
			assert_eq!(remote.state(), RemoteState::Idle);
		});
	}
}
