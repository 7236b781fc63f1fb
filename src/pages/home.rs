use std::sync::Arc;

use leptos::prelude::*;

use crate::components::force_graph::ForceGraphCanvas;
use crate::components::legend::Legend;
use crate::data::GraphData;

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let graph = GraphData::embedded().map(Arc::new);

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>
			{graph
				.map(|data| {
					view! {
						<div class="fullscreen-graph">
							<ForceGraphCanvas data=data fullscreen=true />
							<div class="graph-overlay">
								<h1>"U.S. Presidential Elections"</h1>
								<p class="subtitle">
									"Hover a node for its metrics. Click to open its article. Scroll to zoom. Drag to pan."
								</p>
							</div>
							<Legend />
						</div>
					}
				})}
		</ErrorBoundary>
	}
}
