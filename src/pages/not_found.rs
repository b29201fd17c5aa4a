use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<article class="docs-page">
			<h1>"Page not found"</h1>
			<A href="/">"Back to the cheatsheet"</A>
		</article>
	}
}
