//! Browser wiring for the stardust trail.
//!
//! A document-wide `mousemove` listener spawns one particle per event, and a
//! single `setInterval` driver ticks every live particle. The interval is armed
//! on the first spawn and cleared once the trail is empty, so an idle page runs
//! no timers.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use wasm_bindgen::prelude::*;
use web_sys::MouseEvent;

use super::driver::TrailDriver;
use super::particles::ParticleSystem;
use super::style::StardustStyle;
use crate::surface::{DomScheduler, DomSurface};

type DomTrail = TrailDriver<DomSurface, ChaCha8Rng, DomScheduler>;

/// The trail plus the interval callback that ticks it.
struct Trail {
	driver: RefCell<DomTrail>,
	// Kept alive for as long as the scheduler may call it.
	_tick_cb: Closure<dyn FnMut()>,
}

/// Attach the cursor trail to the current document.
pub fn install_stardust(style: StardustStyle) -> Result<(), JsValue> {
	let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
	let surface = DomSurface::current().ok_or_else(|| JsValue::from_str("no document body"))?;
	let document = surface.document().clone();
	let system = ParticleSystem::new(surface, ChaCha8Rng::from_entropy(), style);

	// The tick closure holds a weak handle so the trail does not own itself.
	let trail = Rc::new_cyclic(|weak: &Weak<Trail>| {
		let weak = weak.clone();
		let tick_cb = Closure::<dyn FnMut()>::new(move || {
			if let Some(trail) = weak.upgrade() {
				trail.driver.borrow_mut().tick();
			}
		});
		let callback: js_sys::Function = tick_cb.as_ref().unchecked_ref::<js_sys::Function>().clone();
		let scheduler = DomScheduler::new(window, callback);
		Trail {
			driver: RefCell::new(TrailDriver::new(system, scheduler)),
			_tick_cb: tick_cb,
		}
	});

	let on_mousemove = Closure::<dyn FnMut(MouseEvent)>::new(move |ev: MouseEvent| {
		trail
			.driver
			.borrow_mut()
			.pointer_moved(ev.page_x() as f64, ev.page_y() as f64);
	});
	document.add_event_listener_with_callback("mousemove", on_mousemove.as_ref().unchecked_ref())?;
	// The listener lives as long as the page.
	on_mousemove.forget();

	log::info!("moondust: stardust trail installed");
	Ok(())
}
