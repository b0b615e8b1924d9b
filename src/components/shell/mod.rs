//! Application shell: layout composition driven by the store.
//!
//! The shell has no logic of its own beyond auto-selecting the first
//! application once the list arrives; everything else is composition over
//! the store's view mode and panel flags.

mod app_selector;
mod left_rail;
mod right_panel;
mod top_bar;

use leptos::prelude::*;

use crate::api::{Remote, RemoteState};
use crate::model::Application;
use crate::store::{AppStore, ViewType};

use super::graph_view::GraphView;
use super::resources::ResourceCardsView;

pub use app_selector::AppSelector;
pub use left_rail::LeftRail;
pub use right_panel::RightPanel;
pub use top_bar::TopBar;

/// The whole dashboard layout.
#[component]
pub fn Shell() -> impl IntoView {
	let store = expect_context::<AppStore>();
	let apps = expect_context::<Remote<Vec<Application>>>();

	// Auto-select the first application once the list arrives.
	Effect::new(move |_| {
		if let RemoteState::Ready(list) = apps.state() {
			if store.selected_app_id().get_untracked().is_none() {
				if let Some(first) = list.first() {
					store.set_selected_app_id(Some(first.id.clone()));
				}
			}
		}
	});

	view! {
		<div class="shell">
			<TopBar />
			<div class="shell-body">
				<LeftRail />
				<div class="shell-sidebar">
					<AppSelector />
				</div>
				<main class="shell-main">
					{move || match store.view_type().get() {
						ViewType::Graph => view! { <GraphView /> }.into_any(),
						ViewType::Resources => view! { <ResourceCardsView /> }.into_any(),
					}}
				</main>
				{move || {
					(store.view_type().get() == ViewType::Graph)
						.then(|| view! { <RightPanel /> })
				}}
				{move || {
					store
						.is_mobile_panel_open()
						.get()
						.then(|| {
							view! {
								<div class="mobile-overlay">
									<div
										class="mobile-backdrop"
										on:click=move |_| store.set_is_mobile_panel_open(false)
									></div>
									<div class="mobile-panel">
										<AppSelector />
									</div>
								</div>
							}
						})
				}}
			</div>
		</div>
	}
}
