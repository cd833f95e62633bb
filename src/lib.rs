//! moondust: a golden cursor trail and a lunar phase widget for web pages.
//!
//! Built for WASM. Host pages call [`install`] once the DOM is ready; the
//! bundled client binary mounts [`App`], a demo page carrying the moon widget.

use std::cell::Cell;

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::wasm_bindgen;

#[cfg(target_arch = "wasm32")]
use getrandom as _;

pub mod components;
pub mod config;
pub mod surface;

pub use components::moon_phase::{MoonConfig, MoonPhase, MoonWidget, PhaseReading};
pub use components::stardust::{ParticleSystem, StardustStyle, TrailDriver};
pub use config::Config;
pub use surface::{DisplaySurface, DomScheduler, DomSurface, Scheduler};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("moondust: logging initialized");
}

thread_local! {
	static INSTALLED: Cell<bool> = const { Cell::new(false) };
}

/// Mark the page as installed. Only the first call returns `true`.
fn claim_install() -> bool {
	INSTALLED.with(|installed| !installed.replace(true))
}

/// Attach both decorations to the current page.
///
/// The moon widget is filled in only when its icon element exists; the
/// stardust trail follows the pointer over the whole document. Later calls
/// are ignored so each pointer move still spawns exactly one particle.
#[wasm_bindgen]
pub fn install() {
	if !claim_install() {
		warn!("moondust: already installed, ignoring");
		return;
	}
	if let Err(e) = try_install() {
		warn!("moondust: install failed: {:?}", e);
	}
}

fn try_install() -> Result<(), JsValue> {
	let document = web_sys::window()
		.and_then(|w| w.document())
		.ok_or_else(|| JsValue::from_str("no document"))?;
	let config = Config::load(&document);

	if config.enable_stardust {
		components::stardust::install_stardust(config.stardust.clone())?;
	}

	if config.enable_moon && components::moon_phase::show_moon_phase(&config.moon).is_none() {
		info!("moondust: no moon widget on this page");
	}
	Ok(())
}

/// Demo page hosting the moon widget. Call [`install`] after mounting it.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Moondust" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<main class="moondust-demo">
			<h1>"Tonight's Moon"</h1>
			<MoonWidget />
			<p class="subtitle">"Move the pointer anywhere to scatter stardust."</p>
		</main>
	}
}
