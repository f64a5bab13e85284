//! State of one rendered silo, advanced once per frame.

use std::f64::consts::TAU;

use crate::animator::LevelAnimator;
use crate::config::ViewSettings;
use crate::errors::GeometryError;
use crate::fill::{solve_fill_with_inset, FillSolid};
use crate::geometry::{Point, SiloGeometry};
use crate::particles::ParticleField;
use crate::status::{readout, FillStatus};

/// Everything the renderer needs to draw one silo.
#[derive(Clone, Debug)]
pub struct SiloView {
    /// Fixed shape of the silo.
    geometry: SiloGeometry,
    /// Displayed level chasing telemetry.
    animator: LevelAnimator,
    /// Cosmetic falling particles.
    particles: ParticleField,
    /// Solids for the currently displayed level.
    solids: Vec<FillSolid>,
    /// Idle rotation of the shell around the vertical axis, in `[0, 2π)`.
    rotation: f64,
    /// Tuning this view was created with.
    settings: ViewSettings,
}

impl SiloView {
    /// Create an empty view awaiting its first reading.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError`] when `settings.radius_inset` is outside `[0, 1)` or the
    /// fill envelope derived from it has no usable volume.
    ///
    /// # Examples
    /// ```
    /// use silofill::{SiloGeometry, SiloView, ViewSettings};
    ///
    /// let silo = SiloGeometry::new(2.345, 3.29, 2.345, 13.30).expect("valid silo");
    /// let view = SiloView::new(silo, ViewSettings::default()).expect("valid view");
    /// assert!(view.fill_solids().is_empty());
    /// assert_eq!(view.readout(), silofill::NO_DATA);
    /// ```
    pub fn new(geometry: SiloGeometry, settings: ViewSettings) -> Result<Self, GeometryError> {
        let solids = solve_fill_with_inset(&geometry, 0.0, settings.radius_inset)?;
        Ok(Self {
            geometry,
            animator: LevelAnimator::new(settings.animator),
            particles: ParticleField::new(geometry, 0.0, settings.particles),
            solids,
            rotation: 0.0,
            settings,
        })
    }

    /// Record the latest telemetry reading.
    pub fn set_target_percentage(&mut self, percentage: f64) {
        self.animator.set_target(percentage);
    }

    /// Advance the view by `dt` seconds.
    ///
    /// Ticks with a non-positive or non-finite `dt` are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError`] when the fill solids cannot be recomputed.
    ///
    /// # Examples
    /// ```
    /// use silofill::{SiloGeometry, SiloView, SolidKind, ViewSettings};
    ///
    /// let silo = SiloGeometry::new(2.345, 3.29, 2.345, 13.30).expect("valid silo");
    /// let mut view = SiloView::new(silo, ViewSettings::default()).expect("valid view");
    /// view.set_target_percentage(50.0);
    /// view.tick(1.0 / 60.0).expect("solvable");
    /// assert_eq!(view.fill_solids()[0].kind, SolidKind::ConeSegment);
    /// ```
    pub fn tick(&mut self, dt: f64) -> Result<(), GeometryError> {
        if !(dt > 0.0 && dt.is_finite()) {
            log::warn!("ignoring view tick with invalid delta {dt}");
            return Ok(());
        }
        let displayed = self.animator.tick(dt);
        self.solids = solve_fill_with_inset(&self.geometry, displayed, self.settings.radius_inset)?;
        self.particles.tick(dt, displayed);
        self.rotation = (self.rotation + self.settings.rotation_speed * dt).rem_euclid(TAU);
        Ok(())
    }

    /// Shape of the silo.
    #[must_use]
    pub fn geometry(&self) -> &SiloGeometry {
        &self.geometry
    }

    /// Solids for the displayed level, cone segment first.
    #[must_use]
    pub fn fill_solids(&self) -> &[FillSolid] {
        &self.solids
    }

    /// Level currently shown.
    #[must_use]
    pub fn displayed_percentage(&self) -> f64 {
        self.animator.displayed()
    }

    /// Latest reading, if any.
    #[must_use]
    pub fn target_percentage(&self) -> Option<f64> {
        self.animator.target()
    }

    /// Whether telemetry has reported this silo yet.
    #[must_use]
    pub fn has_data(&self) -> bool {
        self.animator.has_data()
    }

    /// Visible particle positions. A full silo shows none.
    #[must_use]
    pub fn particle_positions(&self) -> Vec<Point> {
        if self.animator.displayed() >= 100.0 {
            Vec::new()
        } else {
            self.particles.positions().collect()
        }
    }

    /// The particle pool, including particles hidden while the silo is full.
    #[must_use]
    pub fn particle_field(&self) -> &ParticleField {
        &self.particles
    }

    /// Rotation of the shell around the vertical axis in radians.
    #[must_use]
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Status band of the latest reading.
    #[must_use]
    pub fn status(&self) -> Option<FillStatus> {
        self.animator.target().map(FillStatus::from_percentage)
    }

    /// Numeric readout of the displayed level, or a placeholder without data.
    #[must_use]
    pub fn readout(&self) -> String {
        readout(self.has_data().then(|| self.displayed_percentage()))
    }
}
