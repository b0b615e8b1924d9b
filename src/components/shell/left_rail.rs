//! Static icon rail along the left edge.

use leptos::prelude::*;

const RAIL_ITEMS: [(&str, &str); 6] = [
	("\u{1F419}", "GitHub"),
	("\u{1F418}", "PostgreSQL"),
	("\u{1F4E6}", "Redis"),
	("\u{1F343}", "MongoDB"),
	("\u{1F9E9}", "Service"),
	("\u{1F310}", "Network"),
];

#[component]
pub fn LeftRail() -> impl IntoView {
	view! {
		<nav class="left-rail">
			{RAIL_ITEMS
				.into_iter()
				.map(|(icon, label)| {
					view! {
						<button class="rail-button" title=label>
							{icon}
						</button>
					}
				})
				.collect_view()}
		</nav>
	}
}
