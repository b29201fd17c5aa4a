use leptos::prelude::*;

const BUBBLE_STYLE: &str = "position: absolute; bottom: calc(100% + 5px); left: 50%; \
	transform: translateX(-50%); z-index: 10; background: #374151; color: #ffffff; \
	padding: 16px; border-radius: 6px; box-shadow: 0 4px 6px rgba(0, 0, 0, 0.1); \
	font-size: 14px; max-width: 400px; width: max-content; overflow-wrap: break-word;";

/// Hover/focus bubble explaining the wrapped term.
#[component]
pub fn Tooltip(#[prop(into)] content: String, children: Children) -> impl IntoView {
	let (open, set_open) = signal(false);

	view! {
		<span
			class="tooltip-trigger"
			tabindex="0"
			style="position: relative; cursor: help;"
			on:mouseenter=move |_| set_open.set(true)
			on:mouseleave=move |_| set_open.set(false)
			on:focus=move |_| set_open.set(true)
			on:blur=move |_| set_open.set(false)
		>
			{children()}
			{move || {
				open.get()
					.then(|| view! { <span role="tooltip" style=BUBBLE_STYLE>{content.clone()}</span> })
			}}
		</span>
	}
}
