use leptos::prelude::*;

/// 404 Page
#[component]
pub fn NotFound() -> impl IntoView {
	view! { <h1>"Nothing to see here."</h1> }
}
