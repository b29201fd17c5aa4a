use leptos::prelude::*;

use crate::components::newsfeed::{ArchDiagram, DatabaseDiagram};
use crate::components::tooltip::Tooltip;

#[component]
pub fn Newsfeed() -> impl IntoView {
	view! {
		<article class="docs-page">
			<h1>"Designing a newsfeed"</h1>

			<h2>"Architecture"</h2>
			<p>
				"Posts enter through the API gateway and are queued for work servers, which "
				<Tooltip content="Push each new post into the cached timeline of every follower at write time.">
					"fan out"
				</Tooltip>
				" to follower timelines. Accounts with huge follower counts are instead "
				<Tooltip content="Merge the author's recent posts into the reader's feed at read time.">
					"pulled"
				</Tooltip>
				" from the database when a reader opens the feed."
			</p>
			<ArchDiagram />

			<h2>"Data model"</h2>
			<p>
				"Users and follow relationships live in SQL; posts and precomputed timelines "
				"live in document collections keyed by user."
			</p>
			<DatabaseDiagram />
		</article>
	}
}
