//! Static era legend. Swatches come from the same table the spheres use.

use leptos::prelude::*;

use super::force_graph::encoding::{Rgb, color_for_partition, label_for_partition};

/// Partition codes in display order, oldest era first.
pub const LEGEND_ORDER: [i32; 7] = [0, 4, 6, 5, 1, 3, 2];

pub fn legend_entries() -> impl Iterator<Item = (&'static str, Rgb)> {
	LEGEND_ORDER
		.iter()
		.map(|&code| (label_for_partition(code), color_for_partition(code)))
}

#[component]
pub fn Legend() -> impl IntoView {
	view! {
		<div class="graph-legend">
			<strong>"Legend"</strong>
			<br />
			{legend_entries()
				.map(|(label, color)| {
					view! {
						<span style:color=color.to_string()>"■"</span>
						" "
						{label}
						<br />
					}
				})
				.collect_view()}
		</div>
	}
}
