//! Page decorations.

pub mod moon_phase;
pub mod stardust;
