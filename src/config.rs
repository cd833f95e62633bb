//! Runtime configuration, read from an optional JSON script element.
//!
//! ```html
//! <script id="moondust-config" type="application/json">
//!   { "moon": { "locale": "spanish" }, "stardust": { "max_particles": 400 } }
//! </script>
//! ```
//!
//! Every field is optional; anything left out keeps its default.

use serde::Deserialize;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlScriptElement};

use crate::components::moon_phase::MoonConfig;
use crate::components::stardust::StardustStyle;

/// Id of the script element holding the JSON configuration.
pub const CONFIG_ELEMENT_ID: &str = "moondust-config";

/// Settings for both decorations.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
	/// Attach the cursor trail
	pub enable_stardust: bool,
	/// Fill the moon widget when the page has one
	pub enable_moon: bool,
	/// Cursor trail look and motion
	pub stardust: StardustStyle,
	/// Moon widget ids and cycle anchor
	pub moon: MoonConfig,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			enable_stardust: true,
			enable_moon: true,
			stardust: StardustStyle::default(),
			moon: MoonConfig::default(),
		}
	}
}

impl Config {
	/// Parse a JSON document and repair out-of-range values.
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		let config: Config = serde_json::from_str(json)?;
		Ok(config.sanitized())
	}

	fn sanitized(self) -> Self {
		Self {
			stardust: self.stardust.sanitized(),
			moon: self.moon.sanitized(),
			..self
		}
	}

	/// Load from the `moondust-config` element, falling back to defaults when
	/// it is absent or malformed.
	pub fn load(document: &Document) -> Self {
		let Some(json_text) = config_text(document) else {
			return Self::default();
		};

		match Self::from_json(&json_text) {
			Ok(config) => {
				log::info!("moondust: loaded config from #{}", CONFIG_ELEMENT_ID);
				config
			}
			Err(e) => {
				log::warn!("moondust: failed to parse config: {}", e);
				Self::default()
			}
		}
	}
}

fn config_text(document: &Document) -> Option<String> {
	let element = document.get_element_by_id(CONFIG_ELEMENT_ID)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}
