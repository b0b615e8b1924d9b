//! Right panel hosting the node inspector in graph view.

use leptos::prelude::*;

use crate::store::AppStore;

use super::super::inspector::NodeInspector;

#[component]
pub fn RightPanel() -> impl IntoView {
	let store = expect_context::<AppStore>();

	view! {
		<aside class="right-panel">
			<div class="right-panel-header">
				<h2>"Node Inspector"</h2>
				<button
					class="panel-close"
					title="Close"
					on:click=move |_| store.set_is_mobile_panel_open(false)
				>
					"\u{2715}"
				</button>
			</div>
			<NodeInspector />
		</aside>
	}
}
