//! Lunar cycle arithmetic relative to a known new moon.

use serde::Deserialize;

use super::phase::{Locale, MoonPhase};

/// Mean synodic month in days.
pub const SYNODIC_MONTH_DAYS: f64 = 29.53058867;

const MS_PER_DAY: f64 = 1000.0 * 60.0 * 60.0 * 24.0;

/// Calendar date of a known new moon. `month` is 1-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct ReferenceDate {
	/// Four-digit year
	pub year: i32,
	/// Month, 1 = January
	pub month: u32,
	/// Day of the month
	pub day: u32,
}

/// Years accepted for a reference date. Browsers read years below 100 as
/// 19xx, so two-digit years are rejected to keep native and browser epochs equal.
const REFERENCE_YEARS: std::ops::RangeInclusive<i32> = 1900..=9999;

impl Default for ReferenceDate {
	/// New moon of 11 January 2024.
	fn default() -> Self {
		Self {
			year: 2024,
			month: 1,
			day: 11,
		}
	}
}

impl ReferenceDate {
	/// Whether this is a real calendar date in a supported year.
	pub fn is_valid(&self) -> bool {
		REFERENCE_YEARS.contains(&self.year)
			&& (1..=12).contains(&self.month)
			&& (1..=days_in_month(self.year, self.month)).contains(&self.day)
	}

	/// Milliseconds since the Unix epoch at UTC midnight of this date.
	pub fn utc_millis(&self) -> f64 {
		days_from_civil(self.year as i64, self.month, self.day) as f64 * MS_PER_DAY
	}

	/// Milliseconds since the Unix epoch at local midnight, per the browser's time zone.
	#[cfg(target_arch = "wasm32")]
	pub fn epoch_millis(&self) -> f64 {
		let (Ok(year), Ok(month), Ok(day)) = (
			u32::try_from(self.year),
			i32::try_from(self.month),
			i32::try_from(self.day),
		) else {
			return self.utc_millis();
		};
		js_sys::Date::new_with_year_month_day(year, month - 1, day).get_time()
	}

	/// Native builds have no browser time zone, so midnight is taken in UTC.
	#[cfg(not(target_arch = "wasm32"))]
	pub fn epoch_millis(&self) -> f64 {
		self.utc_millis()
	}
}

fn days_in_month(year: i32, month: u32) -> u32 {
	match month {
		2 if (year % 4 == 0 && year % 100 != 0) || year % 400 == 0 => 29,
		2 => 28,
		4 | 6 | 9 | 11 => 30,
		_ => 31,
	}
}

/// Days from 1970-01-01 to the given proleptic Gregorian date.
fn days_from_civil(year: i64, month: u32, day: u32) -> i64 {
	let y = if month <= 2 { year - 1 } else { year };
	let era = if y >= 0 { y } else { y - 399 } / 400;
	let yoe = y - era * 400;
	let mp = (month as i64 + 9) % 12;
	let doy = (153 * mp + 2) / 5 + day as i64 - 1;
	let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
	era * 146_097 + doe - 719_468
}

/// Whole days between two instants, rounded up. Direction is ignored.
pub fn elapsed_days(now_ms: f64, epoch_ms: f64) -> f64 {
	((now_ms - epoch_ms).abs() / MS_PER_DAY).ceil()
}

/// Position within the lunar cycle, in `[0, cycle_days)`.
pub fn phase_day(elapsed_days: f64, cycle_days: f64) -> f64 {
	elapsed_days.rem_euclid(cycle_days)
}

/// The moon phase computed for one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhaseReading {
	/// Classified phase
	pub phase: MoonPhase,
	/// Phase glyph
	pub icon: &'static str,
	/// Localized phase name
	pub label: &'static str,
	/// Days into the current cycle
	pub phase_day: f64,
}

impl PhaseReading {
	/// Compute the reading at `now_ms` for a cycle anchored at `epoch_ms`.
	pub fn at(now_ms: f64, epoch_ms: f64, cycle_days: f64, locale: Locale) -> Self {
		let phase_day = phase_day(elapsed_days(now_ms, epoch_ms), cycle_days);
		let phase = MoonPhase::from_cycle_day(phase_day);
		Self {
			phase,
			icon: phase.glyph(),
			label: phase.label(locale),
			phase_day,
		}
	}

	/// Phase index in `0..8`.
	pub fn index(&self) -> usize {
		self.phase.index()
	}
}
