//! Stardust cursor trail.
//!
//! Every pointer movement over the document drops a small glowing particle at
//! the pointer. Particles drift, fade, and detach themselves once invisible:
//! - [`ParticleSystem`] owns the live particles and advances them per tick
//! - [`StardustStyle`] holds the look and the ranges each particle is sampled from
//! - [`TrailDriver`] starts and stops the shared tick interval
//! - [`install_stardust`] wires the system to `mousemove` and a shared interval

mod driver;
mod emitter;
mod particles;
pub mod style;

pub use driver::TrailDriver;
pub use emitter::install_stardust;
pub use particles::{Particle, ParticleState, ParticleSystem};
pub use style::{Color, SampleRange, StardustStyle};
