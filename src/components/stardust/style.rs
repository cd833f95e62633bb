//! Visual styling and sampling ranges for stardust particles.

use rand::Rng;
use serde::Deserialize;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
	/// Red channel
	pub r: u8,
	/// Green channel
	pub g: u8,
	/// Blue channel
	pub b: u8,
	/// Alpha, 0.0 to 1.0
	pub a: f64,
}

impl Color {
	/// Opaque color from channels.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Same color with a different alpha.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`.
	pub fn from_hex(hex: &str) -> Option<Self> {
		let digits = hex.strip_prefix('#').filter(|d| d.is_ascii())?;
		let channel = |s: &str| u8::from_str_radix(s, 16).ok();
		match digits.len() {
			3 => {
				let mut it = digits.chars().map(|c| c.to_digit(16).map(|d| (d * 17) as u8));
				Some(Self::rgb(it.next()??, it.next()??, it.next()??))
			}
			6 => Some(Self::rgb(
				channel(&digits[0..2])?,
				channel(&digits[2..4])?,
				channel(&digits[4..6])?,
			)),
			8 => Some(
				Self::rgb(
					channel(&digits[0..2])?,
					channel(&digits[2..4])?,
					channel(&digits[4..6])?,
				)
				.with_alpha(channel(&digits[6..8])? as f64 / 255.0),
			),
			_ => None,
		}
	}

	/// Hex when opaque, `rgba(..)` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

impl TryFrom<String> for Color {
	type Error = String;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Color::from_hex(value.trim()).ok_or_else(|| format!("invalid hex color: {value:?}"))
	}
}

/// Half-open `[min, max)` range a particle parameter is drawn from.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct SampleRange {
	/// Inclusive lower bound
	pub min: f64,
	/// Exclusive upper bound
	pub max: f64,
}

impl SampleRange {
	/// Range `[min, max)`.
	pub const fn new(min: f64, max: f64) -> Self {
		Self { min, max }
	}

	/// Draw a value. An empty or inverted range yields `min`.
	pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
		if self.max > self.min {
			rng.gen_range(self.min..self.max)
		} else {
			self.min
		}
	}

	/// Whether `value` falls inside the range.
	pub fn contains(&self, value: f64) -> bool {
		value >= self.min && value < self.max
	}

	fn is_valid(&self) -> bool {
		self.min.is_finite() && self.max.is_finite() && self.max > self.min
	}
}

/// Appearance and motion parameters for the cursor trail.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct StardustStyle {
	/// Particle fill color
	pub color: Color,
	/// Inner glow color
	pub glow_inner: Color,
	/// Inner glow blur radius (px)
	pub glow_inner_radius: f64,
	/// Outer glow color
	pub glow_outer: Color,
	/// Outer glow blur radius (px)
	pub glow_outer_radius: f64,
	/// Stacking order above page content
	pub z_index: i32,
	/// Diameter in pixels
	pub size: SampleRange,
	/// Opacity at spawn
	pub initial_opacity: f64,
	/// Horizontal drift per tick (px)
	pub drift_x: SampleRange,
	/// Vertical drift per tick (px), positive is downwards
	pub drift_y: SampleRange,
	/// Opacity lost per tick
	pub fade: SampleRange,
	/// Period of the shared tick
	pub tick_interval_ms: u32,
	/// Upper bound on live particles. `None` leaves the trail unbounded.
	pub max_particles: Option<usize>,
}

impl StardustStyle {
	/// Golden dust with a warm glow (default)
	pub fn gold() -> Self {
		Self {
			color: Color::rgb(255, 215, 0),
			glow_inner: Color::rgb(255, 215, 0),
			glow_inner_radius: 8.0,
			glow_outer: Color::rgb(218, 165, 32),
			glow_outer_radius: 15.0,
			z_index: 9999,
			size: SampleRange::new(3.0, 8.0),
			initial_opacity: 0.9,
			drift_x: SampleRange::new(-1.0, 1.0),
			drift_y: SampleRange::new(-0.5, 2.5),
			fade: SampleRange::new(0.02, 0.05),
			tick_interval_ms: 20,
			max_particles: None,
		}
	}

	/// CSS `box-shadow` value for the glow.
	pub fn box_shadow(&self) -> String {
		format!(
			"0 0 {}px {}, 0 0 {}px {}",
			self.glow_inner_radius,
			self.glow_inner.to_css(),
			self.glow_outer_radius,
			self.glow_outer.to_css()
		)
	}

	/// Repair values that would break the trail, logging each fix.
	///
	/// Particles must always expire, so the fade range has to stay strictly positive.
	pub fn sanitized(mut self) -> Self {
		let defaults = Self::gold();
		for (name, range, fallback) in [
			("size", &mut self.size, defaults.size),
			("drift_x", &mut self.drift_x, defaults.drift_x),
			("drift_y", &mut self.drift_y, defaults.drift_y),
		] {
			if !range.min.is_finite() || !range.max.is_finite() {
				log::warn!("moondust: non-finite {} range, using default", name);
				*range = fallback;
			} else if !range.is_valid() {
				log::warn!("moondust: empty {} range, collapsing to {}", name, range.min);
				range.max = range.min;
			}
		}
		if self.size.min <= 0.0 {
			log::warn!("moondust: particle size must be positive, using default");
			self.size = defaults.size;
		}
		if !self.fade.is_valid() || self.fade.min <= 0.0 {
			log::warn!("moondust: fade range must be positive, using default");
			self.fade = defaults.fade;
		}
		if !(self.initial_opacity > 0.0 && self.initial_opacity <= 1.0) {
			log::warn!("moondust: opacity out of (0, 1], using default");
			self.initial_opacity = defaults.initial_opacity;
		}
		if self.tick_interval_ms == 0 {
			log::warn!("moondust: zero tick interval, using default");
			self.tick_interval_ms = defaults.tick_interval_ms;
		} else if i32::try_from(self.tick_interval_ms).is_err() {
			log::warn!("moondust: tick interval {} ms too long, clamping", self.tick_interval_ms);
			self.tick_interval_ms = i32::MAX as u32;
		}
		self
	}
}

impl Default for StardustStyle {
	fn default() -> Self {
		Self::gold()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_hex_colors() {
		assert_eq!(Color::from_hex("#FFD700"), Some(Color::rgb(255, 215, 0)));
		assert_eq!(Color::from_hex("#fff"), Some(Color::rgb(255, 255, 255)));
		assert_eq!(Color::from_hex("ffd700"), None);
		assert_eq!(Color::from_hex("#ffd70"), None);
		let translucent = Color::from_hex("#00000080").unwrap();
		assert!((translucent.a - 128.0 / 255.0).abs() < 1e-9);
	}

	#[test]
	fn default_glow_matches_gold_look() {
		assert_eq!(
			StardustStyle::gold().box_shadow(),
			"0 0 8px #ffd700, 0 0 15px #daa520"
		);
	}

	#[test]
	fn inverted_range_samples_its_minimum() {
		let mut rng = rand::thread_rng();
		let range = SampleRange::new(5.0, 2.0);
		assert_eq!(range.sample(&mut rng), 5.0);
	}

	#[test]
	fn sanitize_restores_positive_fade() {
		let style = StardustStyle {
			fade: SampleRange::new(0.0, 0.0),
			tick_interval_ms: 0,
			size: SampleRange::new(6.0, 4.0),
			..StardustStyle::gold()
		}
		.sanitized();
		assert_eq!(style.fade, SampleRange::new(0.02, 0.05));
		assert_eq!(style.tick_interval_ms, 20);
		assert_eq!(style.size, SampleRange::new(6.0, 6.0));
	}

	#[test]
	fn sanitize_rejects_non_positive_sizes() {
		let style = StardustStyle {
			size: SampleRange::new(-5.0, -1.0),
			..StardustStyle::gold()
		}
		.sanitized();
		assert_eq!(style.size, SampleRange::new(3.0, 8.0));

		let style = StardustStyle {
			size: SampleRange::new(0.0, 4.0),
			..StardustStyle::gold()
		}
		.sanitized();
		assert_eq!(style.size, SampleRange::new(3.0, 8.0));
	}

	#[test]
	fn sanitize_clamps_interval_to_timer_range() {
		let style = StardustStyle {
			tick_interval_ms: u32::MAX,
			..StardustStyle::gold()
		}
		.sanitized();
		assert_eq!(style.tick_interval_ms, i32::MAX as u32);
		assert!(i32::try_from(style.tick_interval_ms).is_ok());

		let style = StardustStyle {
			tick_interval_ms: 35,
			..StardustStyle::gold()
		}
		.sanitized();
		assert_eq!(style.tick_interval_ms, 35);
	}
}
