//! Lunar phase widget.
//!
//! Computes the current phase from a reference new moon and the mean synodic
//! month, then fills the page's moon widget and lights the matching indicator.

mod calendar;
mod phase;
mod widget;

pub use calendar::{PhaseReading, ReferenceDate, SYNODIC_MONTH_DAYS, elapsed_days, phase_day};
pub use phase::{Locale, MoonPhase};
pub use widget::{MoonConfig, MoonWidget, update_moon_widget};

use crate::surface::DomSurface;

/// Fill the moon widget in the current document, if the page has one.
pub fn show_moon_phase(config: &MoonConfig) -> Option<PhaseReading> {
	let mut surface = DomSurface::current()?;
	update_moon_widget(&mut surface, config, js_sys::Date::now())
}
