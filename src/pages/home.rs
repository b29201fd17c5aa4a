use leptos::prelude::*;
use leptos_router::components::A;

/// Landing page listing the available topics.
#[component]
pub fn Home() -> impl IntoView {
	view! {
		<article class="docs-page">
			<h1>"System Design Cheatsheet"</h1>
			<p>
				"Short, diagram-first notes on classic system design interview questions. "
				"Every diagram can be dragged to pan and scrolled to zoom."
			</p>
			<ul>
				<li>
					<A href="/newsfeed">"Designing a newsfeed"</A>
				</li>
			</ul>
		</article>
	}
}
