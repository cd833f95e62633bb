//! The eight named lunar phases and how a cycle day maps onto them.

use serde::Deserialize;

/// Lunar phase, ordered from new moon through waning crescent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoonPhase {
	/// Index 0
	New,
	/// Index 1
	WaxingCrescent,
	/// Index 2
	FirstQuarter,
	/// Index 3
	WaxingGibbous,
	/// Index 4
	Full,
	/// Index 5
	WaningGibbous,
	/// Index 6
	LastQuarter,
	/// Index 7
	WaningCrescent,
}

/// Exclusive upper bound (in days into the cycle) for each phase but the last.
const UPPER_BOUNDS: [(f64, MoonPhase); 7] = [
	(1.0, MoonPhase::New),
	(7.4, MoonPhase::WaxingCrescent),
	(8.4, MoonPhase::FirstQuarter),
	(14.8, MoonPhase::WaxingGibbous),
	(15.8, MoonPhase::Full),
	(22.1, MoonPhase::WaningGibbous),
	(23.1, MoonPhase::LastQuarter),
];

impl MoonPhase {
	/// All phases in index order.
	pub const ALL: [MoonPhase; 8] = [
		MoonPhase::New,
		MoonPhase::WaxingCrescent,
		MoonPhase::FirstQuarter,
		MoonPhase::WaxingGibbous,
		MoonPhase::Full,
		MoonPhase::WaningGibbous,
		MoonPhase::LastQuarter,
		MoonPhase::WaningCrescent,
	];

	/// Classify a day within the synodic cycle.
	pub fn from_cycle_day(phase_day: f64) -> Self {
		UPPER_BOUNDS
			.iter()
			.find(|(bound, _)| phase_day < *bound)
			.map(|&(_, phase)| phase)
			.unwrap_or(MoonPhase::WaningCrescent)
	}

	/// Position in [`MoonPhase::ALL`], always in `0..8`.
	pub fn index(self) -> usize {
		self as usize
	}

	/// Inverse of [`MoonPhase::index`].
	pub fn from_index(index: usize) -> Option<Self> {
		Self::ALL.get(index).copied()
	}

	/// Moon emoji for this phase.
	pub fn glyph(self) -> &'static str {
		match self {
			MoonPhase::New => "🌑",
			MoonPhase::WaxingCrescent => "🌒",
			MoonPhase::FirstQuarter => "🌓",
			MoonPhase::WaxingGibbous => "🌔",
			MoonPhase::Full => "🌕",
			MoonPhase::WaningGibbous => "🌖",
			MoonPhase::LastQuarter => "🌗",
			MoonPhase::WaningCrescent => "🌘",
		}
	}

	/// Phase name in `locale`.
	pub fn label(self, locale: Locale) -> &'static str {
		locale.labels()[self.index()]
	}
}

/// Language used for phase labels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
	/// English names (default)
	#[default]
	English,
	/// Spanish names
	Spanish,
}

impl Locale {
	fn labels(self) -> &'static [&'static str; 8] {
		match self {
			Locale::English => &[
				"New Moon",
				"Waxing Crescent",
				"First Quarter",
				"Waxing Gibbous",
				"Full Moon",
				"Waning Gibbous",
				"Last Quarter",
				"Waning Crescent",
			],
			Locale::Spanish => &[
				"Luna Nueva",
				"Creciente",
				"Cuarto Creciente",
				"Gibosa Creciente",
				"Luna Llena",
				"Gibosa Menguante",
				"Cuarto Menguante",
				"Menguante",
			],
		}
	}
}
