//! Single repeating tick shared by every particle in a trail.

use rand::Rng;

use super::particles::ParticleSystem;
use crate::surface::{DisplaySurface, Scheduler};

/// Couples a [`ParticleSystem`] with the interval that ticks it.
///
/// The interval is started by the first successful spawn and cleared by the
/// tick that leaves no particle alive, so an idle trail holds no timer.
pub struct TrailDriver<S: DisplaySurface, R: Rng, T: Scheduler> {
	system: ParticleSystem<S, R>,
	scheduler: T,
	interval: Option<T::Handle>,
}

impl<S: DisplaySurface, R: Rng, T: Scheduler> TrailDriver<S, R, T> {
	/// Drive `system` with intervals from `scheduler`.
	pub fn new(system: ParticleSystem<S, R>, scheduler: T) -> Self {
		Self {
			system,
			scheduler,
			interval: None,
		}
	}

	/// Handle one pointer movement. Returns whether a particle was spawned.
	pub fn pointer_moved(&mut self, x: f64, y: f64) -> bool {
		let spawned = self.system.spawn(x, y);
		if spawned && self.interval.is_none() {
			let interval_ms = self.system.style().tick_interval_ms;
			self.interval = self.scheduler.start_interval(interval_ms);
			if self.interval.is_some() {
				log::debug!("moondust: stardust driver started ({} ms)", interval_ms);
			}
		}
		spawned
	}

	/// Interval callback. Returns the number of particles still alive.
	pub fn tick(&mut self) -> usize {
		let live = self.system.tick();
		if live == 0 {
			if let Some(handle) = self.interval.take() {
				self.scheduler.clear_interval(handle);
				log::debug!("moondust: stardust driver idle");
			}
		}
		live
	}

	/// Whether an interval is currently running.
	pub fn is_armed(&self) -> bool {
		self.interval.is_some()
	}

	/// The driven particle system.
	pub fn system(&self) -> &ParticleSystem<S, R> {
		&self.system
	}

	#[cfg(test)]
	pub(crate) fn scheduler(&self) -> &T {
		&self.scheduler
	}
}
