//! topograph: interactive infrastructure topology dashboard.
//!
//! This crate renders an application's service dependency graph with a
//! physics-based canvas layout, a node inspector for editing the rendered
//! copy, and a card-based resource utilization view. Data comes from a
//! remote gateway that degrades to static fixtures whenever the live
//! backend misbehaves.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info};

pub mod api;
pub mod components;
pub mod model;
pub mod store;

pub use components::shell::Shell;

use api::Remote;
use components::graph_view::RenderedGraph;
use model::Application;
use store::AppStore;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("topograph: logging initialized");
}

/// Main application component.
///
/// Constructs the store, the rendered graph document, and the application
/// list slot, provides them by context, and wraps the shell in an error
/// boundary whose fallback replaces the whole interface with a reload
/// notice.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let store = AppStore::new();
	let doc = RenderedGraph::new();
	let apps = Remote::<Vec<Application>>::new();
	provide_context(store);
	provide_context(doc);
	provide_context(apps);

	apps.load("apps".to_string(), |_| async { api::fetch_apps().await });

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Topograph" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<ErrorBoundary fallback=|_| {
			view! {
				<div class="app-crash">
					<h1>"Something went wrong"</h1>
					<p>"The dashboard hit an unexpected error."</p>
					<button on:click=|_| {
						if let Some(window) = web_sys::window() {
							let _ = window.location().reload();
						}
					}>"Reload"</button>
				</div>
			}
		}>
			<Shell />
		</ErrorBoundary>
	}
}
