//! Leptos client-side app wiring and routes.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

// Modules
pub mod components;
mod pages;

// Top-Level pages
use crate::pages::home::Home;
use crate::pages::newsfeed::Newsfeed;
use crate::pages::not_found::NotFound;

const SITE_TITLE: &str = "System Design Cheatsheet";

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// Top navigation bar shared by every page.
#[component]
fn NavBar() -> impl IntoView {
	view! {
		<nav class="site-nav">
			<A href="/">{SITE_TITLE}</A>
		</nav>
	}
}

/// An app router which renders the documentation pages and handles 404's
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />

		// sets the document title
		<Title text=SITE_TITLE />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<NavBar />
			<main>
				<Routes fallback=|| view! { <NotFound /> }>
					<Route path=path!("/") view=Home />
					<Route path=path!("/newsfeed") view=Newsfeed />
				</Routes>
			</main>
		</Router>
	}
}
