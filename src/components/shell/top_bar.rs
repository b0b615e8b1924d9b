//! Top bar: mobile menu button, selected application chip, view toggle.

use leptos::prelude::*;

use crate::api::{Remote, RemoteState};
use crate::model::Application;
use crate::store::{AppStore, ViewType};

fn view_button_class(active: bool) -> &'static str {
	if active {
		"view-button view-button-active"
	} else {
		"view-button"
	}
}

#[component]
pub fn TopBar() -> impl IntoView {
	let store = expect_context::<AppStore>();
	let apps = expect_context::<Remote<Vec<Application>>>();

	let app_name = Signal::derive(move || {
		let selected = store.selected_app_id().get()?;
		match apps.state() {
			RemoteState::Ready(list) => list.into_iter().find(|a| a.id == selected).map(|a| a.name),
			_ => None,
		}
	});

	view! {
		<header class="top-bar">
			<div class="top-bar-left">
				<button
					class="menu-button"
					title="Applications"
					on:click=move |_| store.set_is_mobile_panel_open(true)
				>
					"\u{2630}"
				</button>
				<div class="logo">"T"</div>
				<div class="app-chip">
					{move || app_name.get().unwrap_or_else(|| "No application".to_string())}
				</div>
			</div>
			<div class="top-bar-right">
				<button
					class=move || view_button_class(store.view_type().get() == ViewType::Graph)
					on:click=move |_| store.set_view_type(ViewType::Graph)
				>
					"Graph"
				</button>
				<button
					class=move || view_button_class(store.view_type().get() == ViewType::Resources)
					on:click=move |_| store.set_view_type(ViewType::Resources)
				>
					"Resources"
				</button>
			</div>
		</header>
	}
}
