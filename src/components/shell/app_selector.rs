//! Application selector column.

use leptos::prelude::*;

use crate::api::{Remote, RemoteState};
use crate::model::Application;
use crate::store::AppStore;

/// Selectable application list with loading and error states.
#[component]
pub fn AppSelector() -> impl IntoView {
	let store = expect_context::<AppStore>();
	let apps = expect_context::<Remote<Vec<Application>>>();

	view! {
		<div class="app-selector">
			<div class="app-selector-header">"Application"</div>
			{move || match apps.state() {
				RemoteState::Idle | RemoteState::Loading => {
					view! {
						<div class="app-selector-skeleton">
							{(0..3)
								.map(|_| view! { <div class="skeleton-row"></div> })
								.collect_view()}
						</div>
					}
						.into_any()
				}
				RemoteState::Failed(_) => {
					view! { <div class="app-selector-error">"Failed to load apps"</div> }
						.into_any()
				}
				RemoteState::Ready(list) => {
					view! {
						<div class="app-selector-list">
							{list
								.into_iter()
								.map(|app| {
									let row_id = app.id.clone();
									let click_id = app.id.clone();
									let icon = app
										.icon
										.unwrap_or_else(|| "\u{1F4E6}".to_string());
									view! {
										<button
											class=move || {
												let selected = store.selected_app_id().get();
												if selected.as_deref() == Some(row_id.as_str()) {
													"app-row app-row-selected"
												} else {
													"app-row"
												}
											}
											on:click=move |_| {
												store.set_selected_app_id(Some(click_id.clone()))
											}
										>
											<span class="app-icon">{icon}</span>
											<span class="app-name">{app.name}</span>
											<span class="app-chevron">"\u{203A}"</span>
										</button>
									}
								})
								.collect_view()}
						</div>
					}
						.into_any()
				}
			}}
		</div>
	}
}
