//! Node inspector panel.
//!
//! Bound to the store's node selection: resolves it against the rendered
//! document to zero or one node, mirrors the editable fields into local
//! signals for responsive input, and writes every keystroke and slider move
//! through to the document so the canvas reflects edits immediately. Edits
//! live and die with the rendered graph; nothing is persisted.

use leptos::prelude::*;

use crate::model::{NodeStatus, parse_value};
use crate::store::AppStore;

use super::badge::StatusBadge;
use super::graph_view::RenderedGraph;

fn tab_class(active: &str, tab: &str) -> &'static str {
	if active == tab {
		"inspector-tab inspector-tab-active"
	} else {
		"inspector-tab"
	}
}

/// Editor for the currently selected graph node.
#[component]
pub fn NodeInspector() -> impl IntoView {
	let store = expect_context::<AppStore>();
	let doc = expect_context::<RenderedGraph>();

	// Selection resolved against the document. A memo so data-only edits do
	// not rebuild the input elements out from under the user.
	let selected_node = Memo::new(move |_| {
		store
			.selected_node_id()
			.get()
			.filter(|id| doc.with(|g| g.contains(id)))
	});

	let status = Signal::derive(move || {
		selected_node
			.get()
			.and_then(|id| doc.with(|g| g.node(&id).map(|n| n.data.status)))
			.unwrap_or(NodeStatus::Unknown)
	});
	let position = Signal::derive(move || {
		selected_node
			.get()
			.and_then(|id| doc.with(|g| g.node(&id).map(|n| (n.position.x, n.position.y))))
			.unwrap_or((0.0, 0.0))
	});

	let local_label = RwSignal::new(String::new());
	let local_description = RwSignal::new(String::new());
	let local_value = RwSignal::new(0u8);

	// Reset the local mirror whenever the selection changes. The document
	// read is untracked so write-through edits do not loop back here.
	Effect::new(move |_| {
		let data = selected_node
			.get()
			.and_then(|id| doc.with_untracked(|g| g.node(&id).map(|n| n.data.clone())));
		match data {
			Some(data) => {
				local_label.set(data.label);
				local_description.set(data.description.unwrap_or_default());
				local_value.set(data.value);
			}
			None => {
				local_label.set(String::new());
				local_description.set(String::new());
				local_value.set(0);
			}
		}
	});

	let set_label = move |text: String| {
		local_label.set(text.clone());
		if let Some(id) = store.selected_node_id().get_untracked() {
			doc.update_node_data(&id, move |d| d.label = text);
		}
	};
	let set_description = move |text: String| {
		local_description.set(text.clone());
		if let Some(id) = store.selected_node_id().get_untracked() {
			doc.update_node_data(&id, move |d| d.description = Some(text));
		}
	};
	let set_value = move |value: u8| {
		local_value.set(value);
		if let Some(id) = store.selected_node_id().get_untracked() {
			doc.update_node_data(&id, move |d| d.value = value);
		}
	};

	let tab = store.active_inspector_tab();

	view! {
		<div class="inspector">
			{move || match selected_node.get() {
				None => {
					view! { <div class="inspector-empty">"Select a node to inspect"</div> }
						.into_any()
				}
				Some(node_id) => {
					view! {
						<div class="inspector-header">
							<h3>"Service Node"</h3>
							<StatusBadge status=status />
						</div>
						<div class="inspector-tabs">
							<button
								class=move || tab_class(&tab.get(), "config")
								on:click=move |_| store.set_active_inspector_tab("config")
							>
								"Config"
							</button>
							<button
								class=move || tab_class(&tab.get(), "runtime")
								on:click=move |_| store.set_active_inspector_tab("runtime")
							>
								"Runtime"
							</button>
						</div>
						{move || match tab.get().as_str() {
							"config" => {
								view! {
									<div class="inspector-fields">
										<label class="field">
											<span class="field-label">"Node Name"</span>
											<input
												type="text"
												prop:value=move || local_label.get()
												on:input=move |ev| set_label(event_target_value(&ev))
											/>
										</label>
										<label class="field">
											<span class="field-label">"Description"</span>
											<textarea
												rows="3"
												prop:value=move || local_description.get()
												on:input=move |ev| {
													set_description(event_target_value(&ev))
												}
											></textarea>
										</label>
										<div class="field">
											<div class="field-row">
												<span class="field-label">"Value"</span>
												<span class="field-value">
													{move || local_value.get()}
												</span>
											</div>
											<input
												type="range"
												min="0"
												max="100"
												step="1"
												prop:value=move || local_value.get().to_string()
												on:input=move |ev| {
													set_value(parse_value(&event_target_value(&ev)))
												}
											/>
											<input
												type="number"
												min="0"
												max="100"
												prop:value=move || local_value.get().to_string()
												on:input=move |ev| {
													set_value(parse_value(&event_target_value(&ev)))
												}
											/>
										</div>
									</div>
								}
									.into_any()
							}
							"runtime" => {
								let node_id = node_id.clone();
								view! {
									<div class="inspector-fields">
										<div class="field">
											<span class="field-label">"Node ID"</span>
											<input type="text" prop:value=node_id disabled=true />
										</div>
										<div class="field">
											<span class="field-label">"Status"</span>
											<input
												type="text"
												prop:value=move || status.get().label().to_string()
												disabled=true
											/>
										</div>
										<div class="field">
											<span class="field-label">"Position"</span>
											<div class="field-row">
												<input
													type="text"
													prop:value=move || {
														format!("{:.0}", position.get().0)
													}
													disabled=true
												/>
												<input
													type="text"
													prop:value=move || {
														format!("{:.0}", position.get().1)
													}
													disabled=true
												/>
											</div>
										</div>
									</div>
								}
									.into_any()
							}
							// Any other tab name shows no matched content.
							_ => ().into_any(),
						}}
					}
						.into_any()
				}
			}}
		</div>
	}
}
