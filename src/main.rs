use leptos::prelude::*;
use system_design_cheatsheet::{App, init_logging};

fn main() {
	init_logging();
	mount_to_body(App)
}
