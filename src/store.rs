//! Cross-component selection and view state.
//!
//! A single [`AppStore`] instance is constructed at startup and handed to
//! every consumer through context. All mutation goes through the named
//! actions; reads hand out read-only signal halves so views re-derive their
//! presentation whenever a field changes. Writes are synchronous: a read in
//! the same turn observes the new value.

use leptos::prelude::*;

/// Which main view fills the content area.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewType {
	/// The force-directed topology canvas.
	#[default]
	Graph,
	/// The resource card grid.
	Resources,
}

/// Shared UI selection state, one instance per running app.
///
/// Deliberately not a global: tests construct isolated instances, and the
/// app provides one by context at the root.
#[derive(Clone, Copy)]
pub struct AppStore {
	selected_app_id: RwSignal<Option<String>>,
	selected_node_id: RwSignal<Option<String>>,
	view_type: RwSignal<ViewType>,
	active_inspector_tab: RwSignal<String>,
	is_mobile_panel_open: RwSignal<bool>,
}

impl AppStore {
	/// Creates a store with the startup defaults: nothing selected, graph
	/// view, `"config"` inspector tab, mobile panel closed.
	pub fn new() -> Self {
		Self {
			selected_app_id: RwSignal::new(None),
			selected_node_id: RwSignal::new(None),
			view_type: RwSignal::new(ViewType::Graph),
			active_inspector_tab: RwSignal::new("config".to_string()),
			is_mobile_panel_open: RwSignal::new(false),
		}
	}

	/// Currently selected application id, if any.
	pub fn selected_app_id(&self) -> ReadSignal<Option<String>> {
		self.selected_app_id.read_only()
	}

	/// Currently selected graph node id, if any.
	///
	/// Only meaningful while the graph view is active, but deliberately left
	/// alone by [`AppStore::set_view_type`].
	pub fn selected_node_id(&self) -> ReadSignal<Option<String>> {
		self.selected_node_id.read_only()
	}

	/// Active main view.
	pub fn view_type(&self) -> ReadSignal<ViewType> {
		self.view_type.read_only()
	}

	/// Active inspector tab name. Free-form; the inspector only recognizes
	/// `"config"` and `"runtime"`.
	pub fn active_inspector_tab(&self) -> ReadSignal<String> {
		self.active_inspector_tab.read_only()
	}

	/// Whether the narrow-viewport overlay panel is open.
	pub fn is_mobile_panel_open(&self) -> ReadSignal<bool> {
		self.is_mobile_panel_open.read_only()
	}

	/// Replaces the selected application. Does not clear the node selection;
	/// the graph view refetches and the stale selection simply fails to
	/// resolve until it is replaced.
	pub fn set_selected_app_id(&self, id: Option<String>) {
		self.selected_app_id.set(id);
	}

	/// Replaces the node selection; `None` deselects.
	pub fn set_selected_node_id(&self, id: Option<String>) {
		self.selected_node_id.set(id);
	}

	/// Switches the main view. No other field is touched.
	pub fn set_view_type(&self, view: ViewType) {
		self.view_type.set(view);
	}

	/// Selects the inspector tab by name.
	pub fn set_active_inspector_tab(&self, tab: impl Into<String>) {
		self.active_inspector_tab.set(tab.into());
	}

	/// Opens or closes the narrow-viewport overlay panel.
	pub fn set_is_mobile_panel_open(&self, open: bool) {
		self.is_mobile_panel_open.set(open);
	}
}

impl Default for AppStore {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use leptos::reactive::owner::Owner;

	fn with_store(test: impl FnOnce(AppStore)) {
		let owner = Owner::new();
		owner.set();
		test(AppStore::new());
	}

	#[test]
	fn starts_with_documented_defaults() {
		with_store(|store| {
			assert_eq!(store.selected_app_id().get_untracked(), None);
			assert_eq!(store.selected_node_id().get_untracked(), None);
			assert_eq!(store.view_type().get_untracked(), ViewType::Graph);
			assert_eq!(store.active_inspector_tab().get_untracked(), "config");
			assert!(!store.is_mobile_panel_open().get_untracked());
		});
	}

	#[test]
	fn writes_are_visible_to_reads_in_the_same_turn() {
		with_store(|store| {
			store.set_selected_app_id(Some("2".to_string()));
			assert_eq!(store.selected_app_id().get_untracked().as_deref(), Some("2"));

			store.set_selected_node_id(Some("node-1".to_string()));
			assert_eq!(
				store.selected_node_id().get_untracked().as_deref(),
				Some("node-1")
			);

			store.set_is_mobile_panel_open(true);
			assert!(store.is_mobile_panel_open().get_untracked());

			store.set_selected_node_id(None);
			assert_eq!(store.selected_node_id().get_untracked(), None);
		});
	}

	#[test]
	fn view_switches_leave_node_selection_alone() {
		with_store(|store| {
			store.set_selected_node_id(Some("node-3".to_string()));
			store.set_view_type(ViewType::Resources);
			store.set_view_type(ViewType::Graph);
			assert_eq!(
				store.selected_node_id().get_untracked().as_deref(),
				Some("node-3")
			);
		});
	}

	#[test]
	fn inspector_tab_accepts_arbitrary_names() {
		with_store(|store| {
			store.set_active_inspector_tab("runtime");
			assert_eq!(store.active_inspector_tab().get_untracked(), "runtime");
			store.set_active_inspector_tab("telemetry");
			assert_eq!(store.active_inspector_tab().get_untracked(), "telemetry");
		});
	}

	#[test]
	fn instances_are_isolated() {
		with_store(|a| {
			let b = AppStore::new();
			a.set_selected_app_id(Some("1".to_string()));
			assert_eq!(b.selected_app_id().get_untracked(), None);
		});
	}
}
