use leptos::prelude::*;

use crate::model::NodeStatus;

/// Badge variant styles.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum BadgeVariant {
	#[default]
	Default,
	Success,
	Warning,
	Danger,
}

impl BadgeVariant {
	fn class(self) -> &'static str {
		match self {
			BadgeVariant::Default => "badge badge-default",
			BadgeVariant::Success => "badge badge-success",
			BadgeVariant::Warning => "badge badge-warning",
			BadgeVariant::Danger => "badge badge-danger",
		}
	}
}

/// Maps a node status onto its badge variant.
///
/// Anything the UI does not recognize renders with the default variant
/// rather than failing.
pub fn variant_for(status: NodeStatus) -> BadgeVariant {
	match status {
		NodeStatus::Healthy => BadgeVariant::Success,
		NodeStatus::Degraded => BadgeVariant::Warning,
		NodeStatus::Down => BadgeVariant::Danger,
		NodeStatus::Unknown => BadgeVariant::Default,
	}
}

/// A styled badge/tag.
#[component]
pub fn Badge(
	/// The visual variant of the badge.
	#[prop(default = BadgeVariant::Default)]
	variant: BadgeVariant,
	/// Badge content.
	children: Children,
) -> impl IntoView {
	view! { <span class=variant.class()>{children()}</span> }
}

/// A badge rendering a node or resource status.
#[component]
pub fn StatusBadge(
	/// The status to render.
	#[prop(into)]
	status: Signal<NodeStatus>,
) -> impl IntoView {
	view! {
		<span class=move || variant_for(status.get()).class()>
			{move || status.get().label()}
		</span>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn every_status_maps_to_a_variant() {
		assert_eq!(variant_for(NodeStatus::Healthy), BadgeVariant::Success);
		assert_eq!(variant_for(NodeStatus::Degraded), BadgeVariant::Warning);
		assert_eq!(variant_for(NodeStatus::Down), BadgeVariant::Danger);
	}

	#[test]
	fn unrecognized_status_falls_back_to_the_default_variant() {
		assert_eq!(variant_for(NodeStatus::Unknown), BadgeVariant::Default);
		assert_eq!(BadgeVariant::default(), BadgeVariant::Default);
	}
}
