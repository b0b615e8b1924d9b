//! A single resource card with per-metric dials.

use leptos::prelude::*;

use crate::model::{NodeStatus, Resource};

use super::super::badge::StatusBadge;

/// A tunable dial on a resource card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Metric {
	Cpu,
	Memory,
	Disk,
}

impl Metric {
	/// Upper bound of the dial; the lower bound is always 0.
	pub fn max(self) -> f64 {
		match self {
			Metric::Cpu => 1.0,
			Metric::Memory | Metric::Disk => 10.0,
		}
	}

	/// Clamps a raw dial value into this metric's range.
	///
	/// NaN collapses to 0.
	pub fn clamp(self, value: f64) -> f64 {
		if value.is_nan() {
			return 0.0;
		}
		value.clamp(0.0, self.max())
	}
}

/// Tabs on a resource card; all but `Region` select a dial.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardTab {
	Cpu,
	Memory,
	Disk,
	Region,
}

impl CardTab {
	/// All tabs in display order.
	pub const ALL: [CardTab; 4] = [CardTab::Cpu, CardTab::Memory, CardTab::Disk, CardTab::Region];

	pub fn label(self) -> &'static str {
		match self {
			CardTab::Cpu => "cpu",
			CardTab::Memory => "memory",
			CardTab::Disk => "disk",
			CardTab::Region => "region",
		}
	}

	/// The dial this tab edits, if it is not the read-only region tab.
	pub fn metric(self) -> Option<Metric> {
		match self {
			CardTab::Cpu => Some(Metric::Cpu),
			CardTab::Memory => Some(Metric::Memory),
			CardTab::Disk => Some(Metric::Disk),
			CardTab::Region => None,
		}
	}
}

fn status_glyph(status: NodeStatus) -> &'static str {
	match status {
		NodeStatus::Healthy => "\u{2714}",
		NodeStatus::Degraded => "\u{26A0}",
		NodeStatus::Down => "\u{2716}",
		NodeStatus::Unknown => "\u{25CB}",
	}
}

/// One resource card: header, exclusive tab row, the active dial (or the
/// read-only region), and a status footer. Dial state is local to the card
/// and seeded once from the resource's initial values.
#[component]
pub fn ResourceCard(
	/// The fixture resource backing this card.
	resource: Resource,
) -> impl IntoView {
	let active_tab = RwSignal::new(CardTab::Cpu);
	let cpu = RwSignal::new(Metric::Cpu.clamp(resource.cpu));
	let memory = RwSignal::new(Metric::Memory.clamp(resource.memory));
	let disk = RwSignal::new(Metric::Disk.clamp(resource.disk));

	let dial = move |metric: Metric| -> RwSignal<f64> {
		match metric {
			Metric::Cpu => cpu,
			Metric::Memory => memory,
			Metric::Disk => disk,
		}
	};
	let current = Signal::derive(move || {
		active_tab
			.get()
			.metric()
			.map(|m| dial(m).get())
			.unwrap_or(0.0)
	});

	let status = resource.status;
	let name = resource.name.clone();
	let cost = resource.cost.clone();
	let icon = resource.icon.clone();
	let region = resource.region.clone();

	view! {
		<div class="resource-card">
			<div class="resource-card-header">
				<span class="resource-icon">{icon}</span>
				<div>
					<h3 class="resource-name">{name}</h3>
					<p class="resource-cost">{cost}</p>
				</div>
			</div>

			<div class="resource-tabs">
				{CardTab::ALL
					.into_iter()
					.map(|t| {
						view! {
							<button
								class=move || {
									if active_tab.get() == t {
										"resource-tab resource-tab-active"
									} else {
										"resource-tab"
									}
								}
								on:click=move |_| active_tab.set(t)
							>
								{t.label()}
								{move || {
									(active_tab.get() == t && t.metric().is_some())
										.then(|| format!(" {:.2}", current.get()))
								}}
							</button>
						}
					})
					.collect_view()}
			</div>

			{move || match active_tab.get().metric() {
				Some(metric) => {
					view! {
						<div class="resource-dial">
							<input
								type="range"
								min="0"
								max=metric.max().to_string()
								step="0.01"
								prop:value=move || format!("{:.2}", dial(metric).get())
								on:input=move |ev| {
									let raw = event_target_value(&ev).parse().unwrap_or(0.0);
									dial(metric).set(metric.clamp(raw));
								}
							/>
							<span class="resource-dial-value">
								{move || format!("{:.2}", dial(metric).get())}
							</span>
						</div>
					}
						.into_any()
				}
				None => {
					let region = region.clone();
					view! { <div class="resource-region">{region}</div> }.into_any()
				}
			}}

			<div class="resource-card-footer">
				<span class="resource-status-icon">{status_glyph(status)}</span>
				<StatusBadge status=status />
				<span class="resource-provider">"aws"</span>
			</div>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn cpu_dial_never_leaves_unit_range() {
		assert_eq!(Metric::Cpu.clamp(1.5), 1.0);
		assert_eq!(Metric::Cpu.clamp(-0.2), 0.0);
		assert_eq!(Metric::Cpu.clamp(0.42), 0.42);
		assert_eq!(Metric::Cpu.clamp(f64::NAN), 0.0);
	}

	#[test]
	fn memory_and_disk_dials_cap_at_ten() {
		for metric in [Metric::Memory, Metric::Disk] {
			assert_eq!(metric.clamp(11.0), 10.0);
			assert_eq!(metric.clamp(-1.0), 0.0);
			assert_eq!(metric.clamp(9.99), 9.99);
		}
	}

	#[test]
	fn only_the_region_tab_has_no_dial() {
		for tab in CardTab::ALL {
			assert_eq!(tab.metric().is_none(), tab == CardTab::Region);
		}
	}
}
