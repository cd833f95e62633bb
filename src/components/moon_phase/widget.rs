//! Moon widget: writes a [`PhaseReading`] into the page and highlights the
//! matching phase indicator.

use leptos::prelude::*;
use serde::Deserialize;

use super::calendar::{PhaseReading, ReferenceDate, SYNODIC_MONTH_DAYS};
use super::phase::{Locale, MoonPhase};
use crate::surface::DisplaySurface;

/// Where the widget lives in the page and how the cycle is anchored.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct MoonConfig {
	/// Date of a known new moon
	pub reference: ReferenceDate,
	/// Length of the lunar cycle in days
	pub cycle_days: f64,
	/// Language of the phase label
	pub locale: Locale,
	/// Element receiving the phase glyph. Its absence disables the widget.
	pub icon_id: String,
	/// Element receiving the phase label
	pub label_id: String,
	/// Indicators are looked up as `{indicator_prefix}{index}`.
	pub indicator_prefix: String,
	/// Class marking the current phase's indicator
	pub active_class: String,
}

impl Default for MoonConfig {
	fn default() -> Self {
		Self {
			reference: ReferenceDate::default(),
			cycle_days: SYNODIC_MONTH_DAYS,
			locale: Locale::default(),
			icon_id: "mainMoonIcon".into(),
			label_id: "mainMoonText".into(),
			indicator_prefix: "p".into(),
			active_class: "active".into(),
		}
	}
}

impl MoonConfig {
	/// Repair values that would make the cycle arithmetic meaningless.
	pub fn sanitized(mut self) -> Self {
		if !(self.cycle_days.is_finite() && self.cycle_days > 0.0) {
			log::warn!(
				"moondust: invalid cycle length {}, using {}",
				self.cycle_days,
				SYNODIC_MONTH_DAYS
			);
			self.cycle_days = SYNODIC_MONTH_DAYS;
		}
		if !self.reference.is_valid() {
			log::warn!("moondust: invalid reference date {:?}, using default", self.reference);
			self.reference = ReferenceDate::default();
		}
		self
	}

	fn indicator_id(&self, index: usize) -> String {
		format!("{}{}", self.indicator_prefix, index)
	}

	/// Compute the reading at `now_ms`.
	pub fn reading_at(&self, now_ms: f64) -> PhaseReading {
		PhaseReading::at(
			now_ms,
			self.reference.epoch_millis(),
			self.cycle_days,
			self.locale,
		)
	}
}

/// Update the widget for the instant `now_ms`.
///
/// Returns `None` without touching the page when the icon element is missing.
pub fn update_moon_widget<S: DisplaySurface>(
	surface: &mut S,
	config: &MoonConfig,
	now_ms: f64,
) -> Option<PhaseReading> {
	let icon = surface.element_by_id(&config.icon_id)?;
	let reading = config.reading_at(now_ms);

	surface.set_text(&icon, reading.icon);
	if let Some(label) = surface.element_by_id(&config.label_id) {
		surface.set_text(&label, reading.label);
	}

	for index in 0..MoonPhase::ALL.len() {
		if let Some(indicator) = surface.element_by_id(&config.indicator_id(index)) {
			surface.toggle_class(&indicator, &config.active_class, false);
		}
	}
	if let Some(active) = surface.element_by_id(&config.indicator_id(reading.index())) {
		surface.toggle_class(&active, &config.active_class, true);
	}

	log::info!(
		"moondust: {} {} (day {:.2} of cycle)",
		reading.icon,
		reading.label,
		reading.phase_day
	);
	Some(reading)
}

/// Markup for the moon widget: a large glyph, its label, and a strip of eight
/// phase indicators. Pair with [`update_moon_widget`] to fill it in.
#[component]
pub fn MoonWidget(#[prop(optional)] config: Option<MoonConfig>) -> impl IntoView {
	let config = config.unwrap_or_default();
	let locale = config.locale;
	let indicators = MoonPhase::ALL
		.iter()
		.map(|phase| {
			view! {
				<span
					id={config.indicator_id(phase.index())}
					class="moon-phase-dot"
					title={phase.label(locale)}
				>
					{phase.glyph()}
				</span>
			}
		})
		.collect_view();

	view! {
		<section class="moon-widget">
			<div id={config.icon_id.clone()} class="moon-icon"></div>
			<p id={config.label_id.clone()} class="moon-text"></p>
			<div class="moon-phases">{indicators}</div>
		</section>
	}
}
