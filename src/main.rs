//! Client entrypoint for the CSR build.

// Bin target reuses lib deps, silence noisy lint.
#![allow(unused_crate_dependencies)]

use leptos::prelude::*;
use moondust::{App, init_logging, install};

fn main() {
	init_logging();

	mount_to_body(|| {
		view! { <App /> }
	});

	// Mounting is synchronous in CSR, so the widget is in the DOM now.
	install();
}
