//! Cursor-trail particles and the tick-driven system that owns them.

use rand::Rng;

use super::style::StardustStyle;
use crate::surface::DisplaySurface;

/// A single fading speck of dust.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	/// Left edge in page pixels
	pub x: f64,
	/// Top edge in page pixels
	pub y: f64,
	/// Horizontal drift per tick
	pub vx: f64,
	/// Vertical drift per tick
	pub vy: f64,
	/// Diameter in pixels
	pub size: f64,
	/// Current opacity; the particle is removed at or below zero
	pub opacity: f64,
	/// Opacity lost per tick
	pub fade: f64,
}

/// Lifecycle of a particle. `Removed` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleState {
	/// Still visible and ticking
	Alive,
	/// Faded out; its element is detached
	Removed,
}

impl Particle {
	/// Sample a new particle at page coordinates `(x, y)`.
	pub fn spawn<R: Rng + ?Sized>(x: f64, y: f64, style: &StardustStyle, rng: &mut R) -> Self {
		let size = style.size.sample(rng);
		let vx = style.drift_x.sample(rng);
		let vy = style.drift_y.sample(rng);
		let fade = style.fade.sample(rng);
		Self {
			x,
			y,
			vx,
			vy,
			size,
			opacity: style.initial_opacity,
			fade,
		}
	}

	/// Advance one tick.
	pub fn step(&mut self) -> ParticleState {
		self.x += self.vx;
		self.y += self.vy;
		self.opacity -= self.fade;
		self.state()
	}

	/// Current lifecycle state.
	pub fn state(&self) -> ParticleState {
		if self.opacity <= 0.0 {
			ParticleState::Removed
		} else {
			ParticleState::Alive
		}
	}
}

/// A particle paired with the element rendering it.
#[derive(Debug)]
struct LiveParticle<E> {
	particle: Particle,
	element: E,
}

/// Owns every live particle and drives them from one external tick.
///
/// Each pointer move spawns one particle; [`ParticleSystem::tick`] advances all
/// of them and detaches the ones that have faded out.
pub struct ParticleSystem<S: DisplaySurface, R: Rng> {
	surface: S,
	rng: R,
	style: StardustStyle,
	live: Vec<LiveParticle<S::Element>>,
}

impl<S: DisplaySurface, R: Rng> ParticleSystem<S, R> {
	/// Empty system drawing on `surface`.
	pub fn new(surface: S, rng: R, style: StardustStyle) -> Self {
		Self {
			surface,
			rng,
			style,
			live: Vec::new(),
		}
	}

	/// Spawn one particle at page coordinates `(x, y)`.
	///
	/// Returns `false` when the configured cap is reached or the surface could
	/// not create an element.
	pub fn spawn(&mut self, x: f64, y: f64) -> bool {
		if let Some(max) = self.style.max_particles {
			if self.live.len() >= max {
				return false;
			}
		}

		let particle = Particle::spawn(x, y, &self.style, &mut self.rng);
		let Some(element) = self.surface.create_element("span") else {
			return false;
		};

		let size = px(particle.size);
		let shadow = self.style.box_shadow();
		let s = &mut self.surface;
		s.set_style(&element, "position", "absolute");
		s.set_style(&element, "left", &px(particle.x));
		s.set_style(&element, "top", &px(particle.y));
		s.set_style(&element, "width", &size);
		s.set_style(&element, "height", &size);
		s.set_style(&element, "border-radius", "50%");
		s.set_style(&element, "pointer-events", "none");
		s.set_style(&element, "opacity", &particle.opacity.to_string());
		s.set_style(&element, "z-index", &self.style.z_index.to_string());
		s.set_style(&element, "background", &self.style.color.to_css());
		s.set_style(&element, "box-shadow", &shadow);
		s.append_element(&element);

		self.live.push(LiveParticle { particle, element });
		true
	}

	/// Advance every particle by one tick. Returns the number still alive.
	pub fn tick(&mut self) -> usize {
		let surface = &mut self.surface;
		self.live.retain_mut(|live| match live.particle.step() {
			ParticleState::Alive => {
				let p = &live.particle;
				surface.set_style(&live.element, "left", &px(p.x));
				surface.set_style(&live.element, "top", &px(p.y));
				surface.set_style(&live.element, "opacity", &p.opacity.to_string());
				true
			}
			ParticleState::Removed => {
				surface.remove_element(&live.element);
				false
			}
		});
		self.live.len()
	}

	/// Number of particles on screen.
	pub fn live_count(&self) -> usize {
		self.live.len()
	}

	/// Whether no particle is on screen.
	pub fn is_idle(&self) -> bool {
		self.live.is_empty()
	}

	/// Style particles are sampled from.
	pub fn style(&self) -> &StardustStyle {
		&self.style
	}

	/// Iterate the particles currently on screen.
	pub fn particles(&self) -> impl Iterator<Item = &Particle> {
		self.live.iter().map(|l| &l.particle)
	}

	#[cfg(test)]
	pub(crate) fn surface(&self) -> &S {
		&self.surface
	}
}

fn px(v: f64) -> String {
	format!("{v}px")
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand_chacha::ChaCha8Rng;

	use super::*;
	use crate::surface::testing::FakeSurface;

	fn system(style: StardustStyle) -> ParticleSystem<FakeSurface, ChaCha8Rng> {
		ParticleSystem::new(FakeSurface::default(), ChaCha8Rng::seed_from_u64(7), style)
	}

	#[test]
	fn sampled_parameters_stay_in_range() {
		let style = StardustStyle::gold();
		let mut rng = ChaCha8Rng::seed_from_u64(42);
		for _ in 0..2000 {
			let p = Particle::spawn(10.0, 20.0, &style, &mut rng);
			assert!((3.0..8.0).contains(&p.size), "size {}", p.size);
			assert!((-1.0..1.0).contains(&p.vx), "vx {}", p.vx);
			assert!((-0.5..2.5).contains(&p.vy), "vy {}", p.vy);
			assert!((0.02..0.05).contains(&p.fade), "fade {}", p.fade);
			assert_eq!(p.opacity, 0.9);
			assert_eq!((p.x, p.y), (10.0, 20.0));
		}
	}

	#[test]
	fn same_seed_spawns_same_particle() {
		let style = StardustStyle::gold();
		let a = Particle::spawn(0.0, 0.0, &style, &mut ChaCha8Rng::seed_from_u64(3));
		let b = Particle::spawn(0.0, 0.0, &style, &mut ChaCha8Rng::seed_from_u64(3));
		assert_eq!(a, b);
	}

	#[test]
	fn opacity_strictly_decreases_until_removed() {
		let mut p = Particle {
			x: 0.0,
			y: 0.0,
			vx: 0.5,
			vy: 1.0,
			size: 4.0,
			opacity: 0.9,
			fade: 0.02,
		};
		let mut last = p.opacity;
		let mut ticks = 0;
		while p.step() == ParticleState::Alive {
			assert!(p.opacity < last);
			last = p.opacity;
			ticks += 1;
			assert!(ticks < 100, "particle never expired");
		}
		// 0.9 / 0.02 = 45 ticks, allowing for float drift on the last one
		assert!((44..=45).contains(&ticks), "ticks {ticks}");
		assert!((p.x - 0.5 * (ticks + 1) as f64).abs() < 1e-9);
		assert_eq!(p.state(), ParticleState::Removed);
	}

	#[test]
	fn one_move_creates_exactly_one_particle_at_pointer() {
		let mut sys = system(StardustStyle::gold());
		assert!(sys.spawn(120.0, 45.5));
		let attached = sys.surface().attached("span");
		assert_eq!(attached.len(), 1);
		let node = attached[0];
		assert_eq!(node.styles["left"], "120px");
		assert_eq!(node.styles["top"], "45.5px");
		assert_eq!(node.styles["pointer-events"], "none");
		assert_eq!(node.styles["border-radius"], "50%");
		assert_eq!(node.styles["width"], node.styles["height"]);
		assert_eq!(node.styles["opacity"], "0.9");
		assert_eq!(node.styles["background"], "#ffd700");
	}

	#[test]
	fn tick_moves_and_eventually_detaches_everything() {
		let mut sys = system(StardustStyle::gold());
		for i in 0..25 {
			assert!(sys.spawn(i as f64, 0.0));
		}
		assert_eq!(sys.live_count(), 25);

		let before: Vec<Particle> = sys.particles().cloned().collect();
		assert_eq!(sys.tick(), 25);
		for (old, new) in before.iter().zip(sys.particles()) {
			assert!((new.x - (old.x + old.vx)).abs() < 1e-12);
			assert!((new.y - (old.y + old.vy)).abs() < 1e-12);
			assert!(new.opacity < old.opacity);
		}

		// Slowest fade is 0.02/tick from 0.9, so 46 ticks clears the system.
		for _ in 0..46 {
			sys.tick();
		}
		assert!(sys.is_idle());
		assert!(sys.surface().attached("span").is_empty());
		assert_eq!(sys.surface().nodes.len(), 25);
	}

	#[test]
	fn cap_skips_spawns_until_particles_expire() {
		let style = StardustStyle {
			max_particles: Some(3),
			..StardustStyle::gold()
		};
		let mut sys = system(style);
		assert!(sys.spawn(0.0, 0.0));
		assert!(sys.spawn(0.0, 0.0));
		assert!(sys.spawn(0.0, 0.0));
		assert!(!sys.spawn(0.0, 0.0));
		assert_eq!(sys.live_count(), 3);

		while !sys.is_idle() {
			sys.tick();
		}
		assert!(sys.spawn(0.0, 0.0));
	}

	#[test]
	fn unbounded_by_default() {
		let mut sys = system(StardustStyle::gold());
		for _ in 0..500 {
			assert!(sys.spawn(1.0, 1.0));
		}
		assert_eq!(sys.live_count(), 500);
	}

	#[test]
	fn failed_element_creation_spawns_nothing() {
		let mut surface = FakeSurface::default();
		surface.creation_budget = Some(0);
		let mut sys = ParticleSystem::new(
			surface,
			ChaCha8Rng::seed_from_u64(1),
			StardustStyle::gold(),
		);
		assert!(!sys.spawn(5.0, 5.0));
		assert!(sys.is_idle());
	}
}
