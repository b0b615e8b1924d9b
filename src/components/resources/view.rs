//! The resource card grid.

use leptos::prelude::*;

use crate::model::{NodeStatus, Resource, ResourceKind};

use super::card::ResourceCard;

/// The fixed resource set shown in the card view. Entirely simulated; no
/// gateway call is involved.
pub fn default_resources() -> Vec<Resource> {
	let resource = |id: &str, name: &str, kind, icon: &str, status| Resource {
		id: id.to_string(),
		name: name.to_string(),
		kind,
		icon: icon.to_string(),
		status,
		cost: "$0.03/HR".to_string(),
		cpu: 0.02,
		memory: 0.05,
		disk: 10.0,
		region: "us-east-1".to_string(),
	};

	vec![
		resource(
			"postgres-1",
			"Postgres",
			ResourceKind::Postgres,
			"\u{1F418}",
			NodeStatus::Healthy,
		),
		resource(
			"redis-1",
			"Redis",
			ResourceKind::Redis,
			"\u{1F4E6}",
			NodeStatus::Degraded,
		),
		resource(
			"mongodb-1",
			"Mongodb",
			ResourceKind::Mongodb,
			"\u{1F343}",
			NodeStatus::Down,
		),
		resource(
			"app-1",
			"billing-api",
			ResourceKind::App,
			"\u{1F4A1}",
			NodeStatus::Healthy,
		),
	]
}

/// Card grid over the fixed resource set.
#[component]
pub fn ResourceCardsView() -> impl IntoView {
	view! {
		<div class="resources-view">
			<div class="resources-grid">
				{default_resources()
					.into_iter()
					.map(|resource| view! { <ResourceCard resource=resource /> })
					.collect_view()}
			</div>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::resources::card::Metric;

	#[test]
	fn the_card_set_is_fixed_and_distinct() {
		let resources = default_resources();
		assert_eq!(resources.len(), 4);
		let mut kinds: Vec<ResourceKind> = resources.iter().map(|r| r.kind).collect();
		kinds.dedup();
		assert_eq!(kinds.len(), 4);
	}

	#[test]
	fn seed_values_sit_inside_the_dial_ranges() {
		for r in default_resources() {
			assert_eq!(Metric::Cpu.clamp(r.cpu), r.cpu);
			assert_eq!(Metric::Memory.clamp(r.memory), r.memory);
			assert_eq!(Metric::Disk.clamp(r.disk), r.disk);
		}
	}
}
