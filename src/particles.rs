//! Cosmetic field of particles drifting down onto the fill line.
//!
//! Particles never affect reported fill values. They fall inside the cylindrical
//! envelope of the silo and are recycled to a band under the roof as soon as they
//! sink below the current fill line.

use std::f64::consts::TAU;

use nalgebra::Vector3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::geometry::{Point, SiloGeometry};

/// Tuning for [`ParticleField`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleSettings {
    /// Number of particles in the pool.
    pub count: usize,
    /// Slowest fall speed in metres per second.
    pub min_fall_speed: f64,
    /// Fastest fall speed in metres per second.
    pub max_fall_speed: f64,
    /// Radius of the spawn disc as a fraction of the cylinder radius.
    pub spawn_radius_fraction: f64,
    /// Depth of the band under the roof where recycled particles reappear, in metres.
    pub spawn_band: f64,
    /// Seed for the field's random number generator.
    pub seed: u64,
}

impl Default for ParticleSettings {
    fn default() -> Self {
        Self {
            count: 200,
            min_fall_speed: 0.6,
            max_fall_speed: 3.6,
            spawn_radius_fraction: 0.9,
            spawn_band: 1.0,
            seed: 42,
        }
    }
}

impl ParticleSettings {
    /// Replace unusable values with defaults and order the speed range.
    fn sanitized(self) -> Self {
        let defaults = Self::default();
        let or_default = |value: f64, fallback: f64| {
            if value.is_finite() && value >= 0.0 {
                value
            } else {
                fallback
            }
        };
        let low = or_default(self.min_fall_speed, defaults.min_fall_speed);
        let high = or_default(self.max_fall_speed, defaults.max_fall_speed);
        Self {
            count: self.count,
            min_fall_speed: low.min(high),
            max_fall_speed: low.max(high),
            spawn_radius_fraction: or_default(
                self.spawn_radius_fraction,
                defaults.spawn_radius_fraction,
            )
            .min(1.0),
            spawn_band: or_default(self.spawn_band, defaults.spawn_band),
            seed: self.seed,
        }
    }
}

/// One falling marker.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Particle {
    /// Position in the silo's local frame.
    pub position: Point,
    /// Vertical velocity in metres per second; always negative or zero.
    pub fall_speed: f64,
}

/// Fixed-size pool of particles bounded by the silo shell and the fill line.
#[derive(Clone, Debug)]
pub struct ParticleField {
    /// Shape the particles are confined to.
    geometry: SiloGeometry,
    /// The particle pool; its length never changes.
    particles: Vec<Particle>,
    /// Source of spawn positions and speeds.
    rng: ChaCha8Rng,
    /// Sanitized tuning.
    settings: ParticleSettings,
    /// Number of recycles since construction.
    recycled: u64,
}

impl ParticleField {
    /// Populate a field between the fill line for `fill_percentage` and the roof.
    ///
    /// # Examples
    /// ```
    /// use silofill::{ParticleField, ParticleSettings, SiloGeometry};
    ///
    /// let silo = SiloGeometry::new(2.345, 3.29, 2.345, 13.30).expect("valid silo");
    /// let mut field = ParticleField::new(silo, 0.0, ParticleSettings::default());
    /// field.tick(1.0 / 60.0, 0.0);
    /// assert_eq!(field.len(), 200);
    /// ```
    #[must_use]
    pub fn new(geometry: SiloGeometry, fill_percentage: f64, settings: ParticleSettings) -> Self {
        let settings = settings.sanitized();
        let mut field = Self {
            geometry,
            particles: Vec::with_capacity(settings.count),
            rng: ChaCha8Rng::seed_from_u64(settings.seed),
            settings,
            recycled: 0,
        };
        let floor = geometry.fill_line_y(fill_percentage);
        for _ in 0..settings.count {
            let particle = field.spawn(floor, geometry.cylinder_top_y());
            field.particles.push(particle);
        }
        field
    }

    /// Move every particle down by `dt` seconds of fall and recycle those that sank
    /// below the fill line for `fill_percentage`.
    ///
    /// Ticks with a non-positive or non-finite `dt` are ignored.
    pub fn tick(&mut self, dt: f64, fill_percentage: f64) {
        if !(dt > 0.0 && dt.is_finite()) {
            log::warn!("ignoring particle tick with invalid delta {dt}");
            return;
        }
        let fill_line = self.geometry.fill_line_y(fill_percentage);
        let top = self.geometry.cylinder_top_y();
        let floor = fill_line.max(top - self.settings.spawn_band);
        let mut recycled = 0_u64;
        for index in 0..self.particles.len() {
            let particle = &mut self.particles[index];
            let fall = Vector3::y() * (particle.fall_speed * dt);
            particle.position = (particle.position.to_vector() + fall).into();
            if particle.position.y < fill_line {
                self.particles[index] = self.spawn(floor, top);
                recycled += 1;
            }
        }
        if recycled > 0 {
            log::trace!("recycled {recycled} particles below fill line {fill_line:.3}");
        }
        self.recycled += recycled;
    }

    /// Current particles.
    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Current particle positions.
    pub fn positions(&self) -> impl Iterator<Item = Point> + '_ {
        self.particles.iter().map(|particle| particle.position)
    }

    /// Size of the pool.
    #[must_use]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether the pool holds no particles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Number of particles recycled since the field was created.
    #[must_use]
    pub fn recycled_count(&self) -> u64 {
        self.recycled
    }

    /// Draw a particle at a random height in `[floor, top]` with a random speed.
    ///
    /// The radius is `sqrt(u)` scaled so particles cover the spawn disc uniformly.
    fn spawn(&mut self, floor: f64, top: f64) -> Particle {
        let floor = floor.min(top);
        let radius = self.rng.gen::<f64>().sqrt()
            * self.settings.spawn_radius_fraction
            * self.geometry.cylinder_radius();
        let azimuth = self.rng.gen_range(0.0..TAU);
        let height = floor + self.rng.gen::<f64>() * (top - floor);
        let speed = self
            .rng
            .gen_range(self.settings.min_fall_speed..=self.settings.max_fall_speed);
        Particle {
            position: Point::new(radius * azimuth.cos(), height, radius * azimuth.sin()),
            fall_speed: -speed,
        }
    }
}
